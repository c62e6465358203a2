use crate::app::controller::RetainController;
use crate::config::Config;
use crate::error::Result;
use crate::host::{resolve_extension, RequestFileUnits};
use crate::records::ConfigStore;

/// Wire the store and the extension handle from configuration.
pub fn build_controller(config: &Config) -> Result<RetainController<RequestFileUnits>> {
    let store = ConfigStore::from_config(config);
    store.prepare()?;
    Ok(RetainController::new(store, resolve_extension(config)))
}
