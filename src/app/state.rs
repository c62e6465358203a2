use crate::records::NONE_CHOICE;

/// Per-generation state. A generation triggers the store at most once.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerationContext {
    triggered: bool,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub(crate) fn mark_triggered(&mut self) {
        self.triggered = true;
    }

    pub(crate) fn reset(&mut self) {
        self.triggered = false;
    }
}

/// Values submitted from the settings panel for one generation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PanelValues {
    pub config_name: String,
    pub selected_config: Option<String>,
}

impl PanelValues {
    pub fn save_as(name: impl Into<String>) -> Self {
        Self {
            config_name: name.into(),
            selected_config: None,
        }
    }

    pub fn load(name: impl Into<String>) -> Self {
        Self {
            config_name: String::new(),
            selected_config: Some(name.into()),
        }
    }

    /// Name to save under, if the user typed one.
    pub fn save_name(&self) -> Option<&str> {
        Some(self.config_name.as_str()).filter(|name| !name.is_empty())
    }

    /// Record to load, ignoring the `None` sentinel.
    pub fn selection(&self) -> Option<&str> {
        self.selected_config
            .as_deref()
            .filter(|name| !name.is_empty() && *name != NONE_CHOICE)
    }

    pub fn is_idle(&self) -> bool {
        self.save_name().is_none() && self.selection().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_sentinel_is_not_a_selection() {
        let values = PanelValues::load(NONE_CHOICE);
        assert_eq!(values.selection(), None);
        assert!(values.is_idle());
        assert!(PanelValues::default().is_idle());
    }

    #[test]
    fn typed_name_is_a_save_request() {
        let values = PanelValues::save_as("studio-lighting");
        assert_eq!(values.save_name(), Some("studio-lighting"));
        assert!(!values.is_idle());
    }

    #[test]
    fn context_flag_round_trips() {
        let mut ctx = GenerationContext::new();
        assert!(!ctx.is_triggered());
        ctx.mark_triggered();
        assert!(ctx.is_triggered());
        ctx.reset();
        assert!(!ctx.is_triggered());
    }
}
