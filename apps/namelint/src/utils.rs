//! Small helpers shared by the binary and printers.

use owo_colors::OwoColorize;
use std::path::Path;

/// Colors are on unless JSON output is requested or `NO_COLOR` is set.
pub fn use_colors(output: &str) -> bool {
    output != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if use_colors("human") {
        paint(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix() -> String {
    prefix("error:", |s| s.red().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("note:", |s| s.yellow().bold().to_string())
}

pub fn info_prefix() -> String {
    prefix("info:", |s| s.blue().bold().to_string())
}

/// Display `target` relative to the working directory when that is shorter.
pub fn rel_to_wd(target: &Path) -> String {
    match std::env::current_dir() {
        Ok(wd) => rel_to(target, &wd),
        Err(_) => target.to_string_lossy().to_string(),
    }
}

fn rel_to(target: &Path, base: &Path) -> String {
    let shown = pathdiff::diff_paths(target, base)
        .filter(|rel| !rel.as_os_str().is_empty() && rel.as_os_str().len() < target.as_os_str().len());
    match shown {
        Some(rel) => rel.to_string_lossy().to_string(),
        None => target.to_string_lossy().to_string(),
    }
}
