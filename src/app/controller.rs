use log::{error, info, warn};

use crate::app::state::{GenerationContext, PanelValues};
use crate::error::Result;
use crate::extension::{ExtensionHandle, UnitExtension};
use crate::records::{ConfigStore, SaveOutcome};

/// What a pre-processing pass did with the panel values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessOutcome {
    /// This generation already triggered the store.
    AlreadyRan,
    /// Nothing typed and nothing selected.
    Idle,
    /// The extension is unavailable; the request was left alone.
    Disabled,
    Saved(SaveOutcome),
    Loaded { name: String, units: usize },
    NotFound { name: String },
    Failed { action: &'static str, message: String },
}

/// Pre/post generation hooks driving the configuration store.
pub struct RetainController<E> {
    store: ConfigStore,
    extension: ExtensionHandle<E>,
    saved_configs: Vec<String>,
    reported_missing: bool,
}

impl<E: UnitExtension> RetainController<E> {
    pub fn new(store: ConfigStore, extension: ExtensionHandle<E>) -> Self {
        let saved_configs = store.choices();
        Self {
            store,
            extension,
            saved_configs,
            reported_missing: false,
        }
    }

    pub fn title() -> &'static str {
        "RetainControlNet"
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Selector contents as of the last refresh.
    pub fn saved_configs(&self) -> &[String] {
        &self.saved_configs
    }

    pub fn refresh_choices(&mut self) -> &[String] {
        self.saved_configs = self.store.choices();
        &self.saved_configs
    }

    /// Pre-processing hook. Never fails; problems are logged and reported in the outcome.
    pub fn process(
        &mut self,
        ctx: &mut GenerationContext,
        request: &mut E::Request,
        panel: &PanelValues,
    ) -> ProcessOutcome {
        if ctx.is_triggered() {
            return ProcessOutcome::AlreadyRan;
        }
        if panel.is_idle() {
            return ProcessOutcome::Idle;
        }

        ctx.mark_triggered();

        let extension = match &self.extension {
            ExtensionHandle::Present(extension) => extension,
            ExtensionHandle::Absent { reason } => {
                if !self.reported_missing {
                    warn!("ControlNet extension unavailable ({reason}); settings left untouched");
                    self.reported_missing = true;
                }
                return ProcessOutcome::Disabled;
            }
        };

        if let Some(name) = panel.save_name() {
            let outcome = match save_current(&self.store, extension, request, name) {
                Ok(saved) => ProcessOutcome::Saved(saved),
                Err(err) => {
                    error!("Error saving configuration '{name}': {err}");
                    ProcessOutcome::Failed {
                        action: "save",
                        message: err.to_string(),
                    }
                }
            };
            self.refresh_choices();
            return outcome;
        }

        let Some(name) = panel.selection() else {
            return ProcessOutcome::Idle;
        };
        match load_into(&self.store, extension, request, name) {
            Ok(Some(units)) => {
                info!("Configuration '{name}' loaded ({units} unit(s))");
                ProcessOutcome::Loaded {
                    name: name.to_string(),
                    units,
                }
            }
            Ok(None) => ProcessOutcome::NotFound {
                name: name.to_string(),
            },
            Err(err) => {
                error!("Error loading configuration '{name}': {err}");
                ProcessOutcome::Failed {
                    action: "load",
                    message: err.to_string(),
                }
            }
        }
    }

    /// Post-processing hook: re-arm the store for the next generation.
    pub fn postprocess(&mut self, ctx: &mut GenerationContext) {
        ctx.reset();
    }
}

fn save_current<E: UnitExtension>(
    store: &ConfigStore,
    extension: &E,
    request: &E::Request,
    name: &str,
) -> Result<SaveOutcome> {
    let units = extension.extract_current(request)?;
    store.save(name, &units)
}

fn load_into<E: UnitExtension>(
    store: &ConfigStore,
    extension: &E,
    request: &mut E::Request,
    name: &str,
) -> Result<Option<usize>> {
    let Some(units) = store.load(name)? else {
        return Ok(None);
    };
    let count = units.len();
    extension.apply(request, units)?;
    Ok(Some(count))
}
