//! Owner of settings, linter and auto-lint wiring for one store.
//!
//! `NameLinter` follows a plugin lifecycle: `load` reads the persisted
//! settings and re-enables auto-lint for the flags that are on; the toggle
//! handlers mutate one flag, persist it, then re-wire the subscription;
//! `unload` (or drop) releases every subscription.

use crate::autolint::AutoLint;
use crate::events::{EventBus, StoreEventKind};
use crate::lint::Linter;
use crate::models::LintOutcome;
use crate::notice::Notifier;
use crate::settings::{self, LinterSettings, SettingsError};
use crate::store::{FileStore, StoreError};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::info;

pub struct NameLinter<S, N> {
    root: PathBuf,
    settings: LinterSettings,
    auto: AutoLint<S, N>,
}

impl<S, N> NameLinter<S, N>
where
    S: FileStore + 'static,
    N: Notifier + 'static,
{
    /// Load settings persisted under `root` and wire auto-lint accordingly.
    pub async fn load(
        root: impl Into<PathBuf>,
        store: S,
        notifier: N,
        bus: Rc<EventBus>,
    ) -> Result<Self, SettingsError> {
        let root = root.into();
        let settings = settings::load(&root).await?;
        let linter = Rc::new(Linter::new(store, notifier));
        let this = NameLinter {
            root,
            settings,
            auto: AutoLint::new(linter, bus),
        };
        if this.settings.auto_lint_on_create {
            this.auto.set_auto_lint(StoreEventKind::Create, true);
        }
        if this.settings.auto_lint_on_rename {
            this.auto.set_auto_lint(StoreEventKind::Rename, true);
        }
        info!(
            root = %this.root.display(),
            on_create = this.settings.auto_lint_on_create,
            on_rename = this.settings.auto_lint_on_rename,
            "loaded"
        );
        Ok(this)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings(&self) -> &LinterSettings {
        &self.settings
    }

    pub fn linter(&self) -> &Rc<Linter<S, N>> {
        self.auto.linter()
    }

    pub fn bus(&self) -> &Rc<EventBus> {
        self.auto.bus()
    }

    /// Run the `lint-all-filenames` command.
    pub async fn lint_all(&self) -> Result<Vec<LintOutcome>, StoreError> {
        self.linter().lint_all().await
    }

    /// Toggle handler for `autoLintOnCreate`.
    pub async fn set_auto_lint_on_create(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.settings.auto_lint_on_create = enabled;
        self.save_settings().await?;
        self.auto.set_auto_lint(StoreEventKind::Create, enabled);
        Ok(())
    }

    /// Toggle handler for `autoLintOnRename`.
    pub async fn set_auto_lint_on_rename(&mut self, enabled: bool) -> Result<(), SettingsError> {
        self.settings.auto_lint_on_rename = enabled;
        self.save_settings().await?;
        self.auto.set_auto_lint(StoreEventKind::Rename, enabled);
        Ok(())
    }

    pub async fn save_settings(&self) -> Result<(), SettingsError> {
        settings::save(&self.root, &self.settings).await
    }

    pub fn is_auto_lint_enabled(&self, kind: StoreEventKind) -> bool {
        self.auto.is_enabled(kind)
    }

    /// Release event subscriptions. In-flight lints are not cancelled.
    pub fn unload(self) {
        info!(root = %self.root.display(), "unloaded");
    }
}
