//! Configuration for the path planner

use serde::Deserialize;

/// Clearance added past the enclosing box when a route wraps around it
pub const DEFAULT_KEEPOUT: f64 = 0.2;

/// Configuration options for route planning
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Keep-out margin beyond the left/right edges of the enclosing box
    pub keepout_x: f64,

    /// Keep-out margin beyond the bottom/top edges of the enclosing box
    pub keepout_y: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            keepout_x: DEFAULT_KEEPOUT,
            keepout_y: DEFAULT_KEEPOUT,
        }
    }
}

impl RoutingConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set both keep-out margins
    pub fn with_keepout(mut self, margin: f64) -> Self {
        self.keepout_x = margin;
        self.keepout_y = margin;
        self
    }

    /// Set the horizontal keep-out margin
    pub fn with_keepout_x(mut self, margin: f64) -> Self {
        self.keepout_x = margin;
        self
    }

    /// Set the vertical keep-out margin
    pub fn with_keepout_y(mut self, margin: f64) -> Self {
        self.keepout_y = margin;
        self
    }
}
