pub mod bootstrap;
pub mod controller;
pub mod state;

pub use bootstrap::build_controller;
pub use controller::{ProcessOutcome, RetainController};
pub use state::{GenerationContext, PanelValues};
