use crate::app::SPINNER_FRAME_COUNT;

const FRAMES: [char; SPINNER_FRAME_COUNT] =
    ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

pub fn frame(idx: usize) -> char {
    FRAMES[idx % FRAMES.len()]
}

/// Spinner followed by a label, e.g. `⠹ Loading your reports…`.
pub fn label(idx: usize, text: &str) -> String {
    format!("{} {text}", frame(idx))
}
