//! CLI argument parsing via `clap`.

use crate::lint::{LINT_ALL_COMMAND_ID, LINT_ALL_COMMAND_NAME};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "namelint",
    version,
    about = "Strip problematic characters from filenames",
    long_about = "namelint — remove [ ] : / \\ ^ | # from file basenames across a store, on demand or as files appear.\n\nConfiguration precedence: CLI > namelint.toml > defaults.",
    after_help = "Examples:\n  namelint lint --store ~/notes\n  namelint lint 'inbox/idea|1.md'\n  namelint settings auto-lint-new-files on\n  namelint watch --store ~/notes",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current namelint version.")]
    Version,
    /// Lint all filenames in the store, or only the given files
    #[command(
        alias = LINT_ALL_COMMAND_ID,
        about = LINT_ALL_COMMAND_NAME,
        long_about = "Rename every file whose basename contains [ ] : / \\ ^ | #. Names that would collide with an existing file are reported and left alone.",
        after_help = "Examples:\n  namelint lint\n  namelint lint --output json\n  namelint lint 'notes/a:b.md'"
    )]
    Lint {
        #[arg(long, help = "Store root (default: current dir)")]
        store: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Glob of store-relative paths to skip (repeatable)")]
        ignore: Vec<String>,
        #[arg(help = "Store-relative files to lint instead of the whole store")]
        files: Vec<String>,
    },
    /// Watch the store and lint files as they are created or renamed
    #[command(
        about = "Auto-lint on file events",
        long_about = "Run until interrupted, linting files on create and rename events according to the persisted auto-lint settings."
    )]
    Watch {
        #[arg(long, help = "Store root (default: current dir)")]
        store: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
        #[arg(long, help = "Glob of store-relative paths to skip (repeatable)")]
        ignore: Vec<String>,
    },
    /// Inspect or change persisted settings
    Settings {
        #[arg(long, global = true, help = "Store root (default: current dir)")]
        store: Option<String>,
        #[command(subcommand)]
        cmd: SettingsCmd,
    },
}

#[derive(Subcommand)]
/// Subcommands for `namelint settings`
pub enum SettingsCmd {
    /// Print persisted settings
    #[command(about = "Show settings")]
    Show {
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Toggle auto-lint for newly created files
    #[command(
        about = "Auto-lint new files",
        long_about = "When a new file is created, automatically lint its name. Applies to `namelint watch`."
    )]
    AutoLintNewFiles {
        #[arg(value_enum)]
        state: Toggle,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        matches!(self, Toggle::On)
    }
}
