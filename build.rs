//! Build script for spotmix.
//!
//! Places the `.env.example` configuration template into the user's local data
//! directory so a fresh install has a ready-made starting point next to the
//! location where `config::load_env` looks for `.env`.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root into `<data_local_dir>/spotmix/`.
///
/// A missing template only produces a cargo warning. Failing to create the
/// target directory or to write the file aborts the build.
///
/// Target locations:
/// - Linux: `~/.local/share/spotmix/.env.example`
/// - macOS: `~/Library/Application Support/spotmix/.env.example`
/// - Windows: `%LOCALAPPDATA%/spotmix/.env.example`
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotmix");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        fs::copy(&template, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
