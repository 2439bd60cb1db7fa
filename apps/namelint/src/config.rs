//! Configuration discovery and effective settings resolution.
//!
//! namelint reads `namelint.toml|yaml|yml` from the store root (or closest
//! ancestor) and merges it with CLI flags to produce an `Effective` config.
//! Defaults:
//! - `output`: `human`
//! - `ignore`: none (hidden directories are always skipped)
//!
//! Overrides precedence: CLI > config file > defaults.
//!
//! This file configures the tool itself. The auto-lint flags live in
//! `.namelint/data.json` (see `settings`).

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_TOML: &str = "namelint.toml";
const CONFIG_YAML: [&str; 2] = ["namelint.yaml", "namelint.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `namelint.toml|yaml`.
pub struct NamelintConfig {
    pub output: Option<String>,
    /// Store-relative glob patterns excluded from linting.
    #[serde(default)]
    pub ignore: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub store_root: PathBuf,
    pub output: String,
    pub ignore: Vec<String>,
    pub config_found: bool,
}

/// Walk upward from `start` to detect the store root.
///
/// Stops when a `namelint.toml|yaml|yml` file or a `.namelint` state
/// directory is found; otherwise `start` itself is the root. Relative starts
/// are resolved against the working directory first.
pub fn detect_store_root(start: &Path) -> PathBuf {
    let start = absolute(start);
    let mut cur = start.as_path();
    loop {
        if has_config(cur) || cur.join(crate::settings::STATE_DIR).is_dir() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start,
        }
    }
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize()
        .or_else(|_| std::env::current_dir().map(|cwd| cwd.join(path)))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn has_config(dir: &Path) -> bool {
    dir.join(CONFIG_TOML).exists() || CONFIG_YAML.iter().any(|y| dir.join(y).exists())
}

/// Load `NamelintConfig` from `namelint.toml` or `namelint.yaml|yml` if
/// present and valid.
pub fn load_config(root: &Path) -> Option<NamelintConfig> {
    let toml_path = root.join(CONFIG_TOML);
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        let cfg: NamelintConfig = match toml::from_str(&s) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!(path = %toml_path.display(), error = %e, "invalid config; using defaults");
                return None;
            }
        };
        return Some(cfg);
    }
    for yml in CONFIG_YAML {
        let p = root.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            let cfg: NamelintConfig = match serde_yaml::from_str(&s) {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!(path = %p.display(), error = %e, "invalid config; using defaults");
                    return None;
                }
            };
            return Some(cfg);
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// CLI ignore patterns are added to the configured ones.
pub fn resolve_effective(
    cli_store: Option<&str>,
    cli_output: Option<&str>,
    cli_ignore: &[String],
) -> Effective {
    let start = PathBuf::from(cli_store.unwrap_or("."));
    let store_root = detect_store_root(&start);
    let loaded = load_config(&store_root);
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let output = cli_output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let mut ignore = cfg.ignore.unwrap_or_default();
    ignore.extend(cli_ignore.iter().cloned());

    Effective {
        store_root,
        output,
        ignore,
        config_found,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("namelint.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
output = "json"
ignore = ["attachments/**"]
    "#
        )
        .unwrap();
        fs::create_dir_all(root.join("notes/deep")).unwrap();

        // Resolve from a nested directory; the config marks the store root
        let nested = root.join("notes/deep");
        let eff = resolve_effective(nested.to_str(), None, &[]);
        assert_eq!(eff.store_root, root.canonicalize().unwrap());
        assert_eq!(eff.output, "json");
        assert_eq!(eff.ignore, vec!["attachments/**".to_string()]);
        assert!(eff.config_found);
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("namelint.yaml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
ignore:
  - "*.tmp"
            "#
        )
        .unwrap();

        let eff = resolve_effective(root.to_str(), None, &[]);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.ignore, vec!["*.tmp".to_string()]);
    }

    #[test]
    fn test_cli_precedence_and_ignore_merge() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("namelint.toml"), "output = \"json\"\nignore = [\"a/**\"]\n").unwrap();

        let eff = resolve_effective(root.to_str(), Some("human"), &["b/**".to_string()]);
        assert_eq!(eff.output, "human");
        assert_eq!(eff.ignore, vec!["a/**".to_string(), "b/**".to_string()]);
    }

    #[test]
    fn test_state_dir_marks_root_without_config() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join(".namelint")).unwrap();
        fs::create_dir_all(root.join("sub")).unwrap();
        let eff = resolve_effective(root.join("sub").to_str(), None, &[]);
        assert_eq!(eff.store_root, root.canonicalize().unwrap());
        assert!(!eff.config_found);
        assert_eq!(eff.output, "human");
    }

    #[test]
    fn test_default_store_climbs_from_working_dir() {
        let dir = tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        fs::write(root.join("namelint.toml"), "output = \"json\"\n").unwrap();
        fs::create_dir_all(root.join("notes/deep")).unwrap();

        let prev = std::env::current_dir().unwrap();
        std::env::set_current_dir(root.join("notes/deep")).unwrap();
        let eff = resolve_effective(None, None, &[]);
        let from_relative = detect_store_root(Path::new(".."));
        std::env::set_current_dir(prev).unwrap();

        assert_eq!(eff.store_root, root);
        assert!(eff.config_found);
        assert_eq!(eff.output, "json");
        assert_eq!(from_relative, root);
    }

    #[test]
    fn test_invalid_toml_falls_back_to_defaults() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("namelint.toml"), "output = [").unwrap();
        assert!(load_config(dir.path()).is_none());
    }
}
