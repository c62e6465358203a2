//! Boundary to the extension that owns ControlNet settings.
//!
//! The store never interprets units itself; it only asks the extension to
//! read them out of a live request and to put them back.

pub mod units;

pub use units::{ControlMode, ControlUnit, ResizeMode};

use crate::error::Result;

/// Operations the owning extension provides for one kind of host request.
pub trait UnitExtension {
    type Request;

    /// Snapshot the units currently attached to `request`.
    fn extract_current(&self, request: &Self::Request) -> Result<Vec<ControlUnit>>;

    /// Replace the units attached to `request`.
    fn apply(&self, request: &mut Self::Request, units: Vec<ControlUnit>) -> Result<()>;
}

/// Whether the extension was found when the application started.
pub enum ExtensionHandle<E> {
    Present(E),
    Absent { reason: String },
}

impl<E: UnitExtension> ExtensionHandle<E> {
    pub fn absent(reason: impl Into<String>) -> Self {
        ExtensionHandle::Absent {
            reason: reason.into(),
        }
    }
}
