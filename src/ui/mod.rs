pub mod layout;
pub mod panel;
pub mod styles;
pub mod terminal;

pub use panel::{run_settings_panel, PanelFocus, PanelState};
pub use terminal::TerminalGuard;
