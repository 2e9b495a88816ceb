//! Error types for the design model

use thiserror::Error;

/// Errors raised by design lookups and updates
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DesignError {
    /// Component name not present in the design
    #[error("lookup failed: unknown component '{name}'")]
    UnknownComponent {
        name: String,
        suggestions: Vec<String>,
    },

    /// Pin name not present on the component
    #[error("lookup failed: unknown pin '{pin}' on component '{component}'")]
    UnknownPin {
        component: String,
        pin: String,
        suggestions: Vec<String>,
    },

    /// Name looks like a variable but none is defined
    #[error("unknown design variable '{0}'")]
    UnknownVariable(String),

    /// Variables that refer to each other
    #[error("design variable cycle: {}", cycle.join(" -> "))]
    VariableCycle { cycle: Vec<String> },

    /// Value that cannot be parsed as a length or layer
    #[error("invalid value '{value}': {reason}")]
    InvalidValue { value: String, reason: String },

    /// Pin definition that does not describe an edge
    #[error("invalid pin '{pin}' on component '{component}': {reason}")]
    InvalidPin {
        component: String,
        pin: String,
        reason: String,
    },

    /// A pin may only belong to one net
    #[error("pin '{pin}' on component '{component}' is already connected (net {net})")]
    PinAlreadyConnected {
        component: String,
        pin: String,
        net: u32,
    },

    /// Component names are unique within a design
    #[error("component '{0}' already exists")]
    DuplicateComponent(String),
}

impl DesignError {
    /// Create an unknown component error with suggestions
    pub fn unknown_component(name: impl Into<String>, suggestions: Vec<String>) -> Self {
        Self::UnknownComponent {
            name: name.into(),
            suggestions,
        }
    }

    /// Create an unknown pin error with suggestions
    pub fn unknown_pin(
        component: impl Into<String>,
        pin: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        Self::UnknownPin {
            component: component.into(),
            pin: pin.into(),
            suggestions,
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Get suggestions if available
    pub fn suggestions(&self) -> Option<&[String]> {
        match self {
            Self::UnknownComponent { suggestions, .. } => Some(suggestions),
            Self::UnknownPin { suggestions, .. } => Some(suggestions),
            _ => None,
        }
    }
}
