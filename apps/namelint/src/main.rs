//! namelint CLI binary entry point.
//! Delegates to the library for lint/watch/settings and prints results.

use clap::Parser;
use namelint::cli::{Cli, Commands, SettingsCmd};
use namelint::config::{self, Effective};
use namelint::events::EventBus;
use namelint::models::LintReport;
use namelint::notice::{Notifier, Notices};
use namelint::output::{self, ConsoleNotifier};
use namelint::plugin::NameLinter;
use namelint::store::{FileRef, FsStore};
use namelint::utils::{error_prefix, info_prefix, note_prefix, rel_to_wd};
use namelint::{settings, watch};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Lint {
            store,
            output,
            ignore,
            files,
        } => {
            let eff = config::resolve_effective(store.as_deref(), output.as_deref(), &ignore);
            let root = open_store_root(&eff);
            let fs_store = FsStore::new(&root).with_ignore(&eff.ignore);
            let targets: Vec<FileRef> = files
                .iter()
                .map(|f| resolve_target(&fs_store, f))
                .collect();

            let notices = Rc::new(Notices::new());
            let app = load_or_exit(&root, fs_store, Rc::clone(&notices)).await;
            let outcomes = if targets.is_empty() {
                match app.lint_all().await {
                    Ok(o) => o,
                    Err(e) => fail(format!("cannot list store files: {}", e)),
                }
            } else {
                app.linter().lint_files(&targets).await
            };
            app.unload();

            let report = LintReport::from_outcomes(outcomes);
            output::print_report(&report, &notices.take(), &eff.output);
            if report.summary.failed > 0 {
                std::process::exit(1);
            }
        }
        Commands::Watch {
            store,
            output,
            ignore,
        } => {
            let eff = config::resolve_effective(store.as_deref(), output.as_deref(), &ignore);
            let root = open_store_root(&eff);
            let fs_store = FsStore::new(&root).with_ignore(&eff.ignore);
            let app = load_or_exit(&root, fs_store.clone(), ConsoleNotifier::new(&eff.output)).await;
            let s = *app.settings();
            if !s.auto_lint_on_create && !s.auto_lint_on_rename {
                eprintln!(
                    "{} Auto-lint is off. Enable it with `namelint settings auto-lint-new-files on`.",
                    note_prefix()
                );
                return;
            }
            let watcher = match watch::StoreWatcher::start(fs_store) {
                Ok(w) => w,
                Err(e) => fail(e.to_string()),
            };
            if eff.output != "json" {
                eprintln!(
                    "{} Watching {} (create={}, rename={}). Press Ctrl-C to stop.",
                    info_prefix(),
                    rel_to_wd(&root),
                    s.auto_lint_on_create,
                    s.auto_lint_on_rename
                );
            }
            watch::run(app.bus(), watcher, async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await;
            app.unload();
        }
        Commands::Settings { store, cmd } => {
            let eff = config::resolve_effective(store.as_deref(), None, &[]);
            let root = open_store_root(&eff);
            match cmd {
                SettingsCmd::Show { output } => {
                    let output = output.unwrap_or(eff.output);
                    match settings::load(&root).await {
                        Ok(s) => output::print_settings(&s, &output),
                        Err(e) => fail(e.to_string()),
                    }
                }
                SettingsCmd::AutoLintNewFiles { state } => {
                    let fs_store = FsStore::new(&root);
                    let mut app = load_or_exit(&root, fs_store, Notices::new()).await;
                    if let Err(e) = app.set_auto_lint_on_create(state.enabled()).await {
                        fail(e.to_string());
                    }
                    output::print_settings(app.settings(), &eff.output);
                    app.unload();
                }
            }
        }
    }
}

fn fail(msg: impl std::fmt::Display) -> ! {
    eprintln!("{} {}", error_prefix(), msg);
    std::process::exit(2);
}

/// Canonical store root; exits when it is not a directory.
fn open_store_root(eff: &Effective) -> PathBuf {
    // Friendly note if no namelint config was found
    if !eff.config_found && eff.output != "json" {
        eprintln!("{} No namelint.toml found; using defaults.", note_prefix());
    }
    match eff.store_root.canonicalize() {
        Ok(p) if p.is_dir() => p,
        _ => fail(format!(
            "Store root is not a directory: {} (pass --store)",
            eff.store_root.to_string_lossy()
        )),
    }
}

async fn load_or_exit<N: Notifier + 'static>(
    root: &Path,
    store: FsStore,
    notifier: N,
) -> NameLinter<FsStore, N> {
    match NameLinter::load(root, store, notifier, Rc::new(EventBus::new())).await {
        Ok(app) => app,
        Err(e) => fail(e.to_string()),
    }
}

/// Accept a path relative to the working directory or to the store root.
fn resolve_target(store: &FsStore, arg: &str) -> FileRef {
    let candidates = [PathBuf::from(arg), store.resolve(arg)];
    for c in candidates.iter() {
        if let Ok(abs) = c.canonicalize() {
            if abs.is_file() {
                if let Some(rel) = store.relative(&abs) {
                    return FileRef::from_path(&rel);
                }
            }
        }
    }
    fail(format!("Not a file in the store: {}", arg))
}
