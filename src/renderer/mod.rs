//! Output for routed designs
//!
//! `svg` draws components, pins, ground cut-outs and centre traces with
//! CSS classes for styling; `report` prints the routed connectors as text.

pub mod config;
pub mod report;
pub mod svg;

pub use config::SvgConfig;
pub use report::render_report;
pub use svg::render_svg;
