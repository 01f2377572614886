use std::fs;

// Embeds the CI build number (from a BUILD_NUMBER file) into the version string.
fn main() {
    let build_number = fs::read_to_string("BUILD_NUMBER")
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "0".to_string());

    println!("cargo:rustc-env=BUILD_NUMBER={build_number}");
    println!("cargo:rerun-if-changed=BUILD_NUMBER");
}
