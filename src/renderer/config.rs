//! SVG output settings
//!
//! Designs are laid out in millimetres with y pointing up. SVG user space
//! has y pointing down, so every coordinate goes through [`SvgConfig::project`]
//! on its way out.

use crate::routing::Point;

/// How a routed design is drawn
#[derive(Debug, Clone, PartialEq)]
pub struct SvgConfig {
    /// Blank margin around the drawn extent, in SVG user units
    pub viewbox_padding: f64,

    /// Emit an XML declaration and `xmlns` so the file opens on its own
    pub standalone: bool,

    /// One element per line, indented by group depth
    pub pretty_print: bool,

    /// Prepended to every class name (`cpw-trace`, `cpw-gnd-cut`, ...)
    pub class_prefix: Option<String>,

    /// SVG user units per millimetre
    pub scale: f64,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 20.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("cpw-".to_string()),
            scale: 100.0,
        }
    }
}

impl SvgConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Emit a bare `<svg>` fragment for embedding when false
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set how many SVG user units one millimetre of layout spans.
    ///
    /// CPW widths are tens of microns, so the default of 100 keeps a 10 um
    /// trace at one user unit.
    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    /// Map a layout point (mm, y up) into SVG user space (y down)
    pub fn project(&self, p: Point) -> Point {
        Point::new(p.x, -p.y) * self.scale
    }

    /// Convert a layout length in mm to SVG user units
    pub fn length(&self, mm: f64) -> f64 {
        mm * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_draw_ten_micron_trace_one_unit_wide() {
        let config = SvgConfig::default();
        assert_eq!(config.viewbox_padding, 20.0);
        assert!(config.standalone);
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix.as_deref(), Some("cpw-"));
        assert_eq!(config.length(0.01), 1.0);
    }

    #[test]
    fn test_project_flips_y() {
        let config = SvgConfig::new().with_scale(10.0);
        assert_eq!(config.project(Point::new(1.5, 2.0)), Point::new(15.0, -20.0));
        assert_eq!(config.length(0.25), 2.5);
    }

    #[test]
    fn test_builders() {
        let config = SvgConfig::new()
            .with_viewbox_padding(10.0)
            .with_standalone(false)
            .with_pretty_print(false)
            .with_class_prefix("chip-");

        assert_eq!(config.viewbox_padding, 10.0);
        assert!(!config.standalone);
        assert!(!config.pretty_print);
        assert_eq!(config.class_prefix.as_deref(), Some("chip-"));
        assert_eq!(config.without_class_prefix().class_prefix, None);
    }
}
