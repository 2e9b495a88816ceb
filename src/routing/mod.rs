//! CPW route planning between two oriented pins
//!
//! Given two pins (position and outward normal) on two axis-aligned
//! components, the planner picks a 1, 2 or 3 segment centreline that leaves
//! each pin head-on, never folds back on itself and stays out of both
//! components.

pub mod config;
pub mod length;
pub mod lint;
pub mod planner;
pub mod segments;
pub mod types;

pub use config::RoutingConfig;
pub use length::path_length;
pub use lint::{LintCategory, LintWarning};
pub use planner::{classify, plan, Alignment, OrientationCase, PathPlanner, Route, RouteChoice};
pub use segments::{build_points, ConstAxis, Segments};
pub use types::{BoundingBox, Pin, Point, RouteRequest};
