//! cpw-autoroute - straight-segment coplanar-waveguide routing
//!
//! This library plans CPW connector centrelines between two oriented pins
//! on axis-aligned components, registers the resulting traces in a design,
//! and renders the design as SVG.
//!
//! The routing core in [`routing`] is a pure function of its inputs. The
//! [`design`] model, the [`cpw`] connector and the TOML [`file`] format sit
//! on top of it.
//!
//! # Example
//!
//! ```rust
//! use cpw_autoroute::render;
//!
//! let svg = render(r#"
//!     [[components]]
//!     name = "Q1"
//!     bounds = [0.0, 0.0, 2.0, 2.0]
//!     pins = [{ name = "a", position = [2.0, 1.0], normal = [1.0, 0.0] }]
//!
//!     [[components]]
//!     name = "Q2"
//!     bounds = [5.0, 0.0, 7.0, 2.0]
//!     pins = [{ name = "b", position = [5.0, 1.0], normal = [-1.0, 0.0] }]
//!
//!     [[connectors]]
//!     name = "cpw1"
//!     start = { component = "Q1", pin = "a" }
//!     end = { component = "Q2", pin = "b" }
//! "#).unwrap();
//!
//! assert!(svg.contains("cpw-trace"));
//! ```

pub mod cpw;
pub mod design;
pub mod error;
pub mod file;
mod log;
pub mod renderer;
pub mod routing;

pub use cpw::{Connector, CpwAutoStraightLine, CpwOptions, PinInput};
pub use design::{Design, DesignError};
pub use error::Error;
pub use file::{DesignFile, FileError, RoutedDesign};
pub use renderer::{render_report, render_svg, SvgConfig};
pub use routing::{path_length, plan, PathPlanner, Route, RouteRequest, RoutingConfig};

/// Parse a design file and route all of its connectors
pub fn route(source: &str) -> Result<RoutedDesign, Error> {
    let file = DesignFile::from_str(source)?;
    Ok(file.route()?)
}

/// Route a design file and render it to SVG with default configuration
pub fn render(source: &str) -> Result<String, Error> {
    render_with_config(source, &SvgConfig::default())
}

/// Route a design file and render it to SVG with custom configuration
///
/// # Example
///
/// ```rust
/// use cpw_autoroute::{render_with_config, SvgConfig};
///
/// let config = SvgConfig::default().with_scale(10.0).with_standalone(false);
/// let svg = render_with_config("", &config).unwrap();
/// assert!(svg.starts_with("<svg"));
/// ```
pub fn render_with_config(source: &str, config: &SvgConfig) -> Result<String, Error> {
    let routed = route(source)?;
    Ok(render_svg(&routed.design, config))
}
