//! namelint core library.
//!
//! This crate exposes programmatic APIs for cleaning file basenames of
//! characters that break links or paths on some platforms, either for a whole
//! store at once or automatically as files are created and renamed.
//!
//! High-level modules:
//! - `sanitize`: The basename cleaning rule and its random fallback.
//! - `store`: File references, the `FileStore` trait, disk and memory stores.
//! - `lint`: Single-file and whole-store linting.
//! - `events`: Create/rename event bus with scoped subscriptions.
//! - `autolint`: Subscribes the lint callback to store events.
//! - `settings`: Persisted auto-lint flags.
//! - `plugin`: `NameLinter`, the owner tying settings, linter and events together.
//! - `notice`, `models`: Notices and run reports.
//! - `cli`, `config`, `output`, `utils`, `watch`: Binary support.
pub mod autolint;
pub mod cli;
pub mod config;
pub mod events;
pub mod lint;
pub mod models;
pub mod notice;
pub mod output;
pub mod plugin;
pub mod sanitize;
pub mod settings;
pub mod store;
pub mod utils;
pub mod watch;
