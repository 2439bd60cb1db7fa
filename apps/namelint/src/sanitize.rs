//! Basename sanitizer.
//!
//! Strips characters that break links or paths on at least one platform:
//! `[ ] : / \ ^ | #`. A name that becomes empty through stripping is replaced
//! by a random `file-NNNN` fallback. The fallback is not checked against
//! existing files.

use rand::Rng;
use regex::Regex;
use std::sync::OnceLock;

/// Characters removed from basenames, as a regex class.
const ILLEGAL_CLASS: &str = r"(?i)[\[\]:/\\\^|#]";

const FALLBACK_PREFIX: &str = "file-";

fn illegal_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ILLEGAL_CLASS).expect("illegal character class is a valid regex"))
}

/// Return the cleaned form of `basename`.
///
/// Names that contain none of the illegal characters come back unchanged.
/// When stripping leaves nothing, the result is `file-<R>` with `R` drawn
/// uniformly from `1000..=9999`, so two calls on the same input may differ.
pub fn sanitize(basename: &str) -> String {
    let stripped = illegal_chars().replace_all(basename, "");
    if stripped.is_empty() && !basename.is_empty() {
        return fallback_name();
    }
    stripped.into_owned()
}

/// True when `sanitize` would leave `basename` untouched.
pub fn is_clean(basename: &str) -> bool {
    !illegal_chars().is_match(basename)
}

fn fallback_name() -> String {
    let n: u16 = rand::thread_rng().gen_range(1000..=9999);
    format!("{}{}", FALLBACK_PREFIX, n)
}
