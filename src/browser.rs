use color_eyre::eyre::{eyre, Result};
use std::process::{Command, Stdio};

/// Opens `url` in the default browser without waiting for it.
///
/// WSL2 compiles as `target_os = "linux"` but needs `wslview` (or `cmd.exe`)
/// rather than `xdg-open`, so it is detected at runtime.
pub fn open_in_browser(url: &str) -> Result<()> {
    check_scheme(url)?;

    if cfg!(target_os = "windows") {
        // The empty "" title keeps `start` from treating the URL as a window title
        return spawn_detached("cmd", &["/C", "start", "", url])
            .map_err(|e| eyre!("Failed to open browser: {e}"));
    }

    let opener = if cfg!(target_os = "macos") {
        "open"
    } else if is_wsl() {
        "wslview"
    } else {
        "xdg-open"
    };

    match spawn_detached(opener, &[url]) {
        Ok(()) => return Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(opener, "browser opener not installed");
        }
        Err(e) => return Err(eyre!("Failed to open browser with {opener}: {e}")),
    }

    if is_wsl() {
        return spawn_detached("cmd.exe", &["/C", "start", "", url])
            .map_err(|e| eyre!("Failed to open browser via cmd.exe: {e}"));
    }

    Err(eyre!(
        "No browser opener found. On WSL install wslu; on Linux install xdg-utils."
    ))
}

/// Only http(s) is handed to the opener.
pub fn check_scheme(url: &str) -> Result<()> {
    if url.starts_with("https://") || url.starts_with("http://") {
        Ok(())
    } else {
        Err(eyre!("Refusing to open non-HTTP URL: {url}"))
    }
}

fn is_wsl() -> bool {
    std::env::var_os("WSL_DISTRO_NAME").is_some()
}

fn spawn_detached(program: &str, args: &[&str]) -> std::io::Result<()> {
    Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(|_| ())
}
