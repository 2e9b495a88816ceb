//! TOML design files
//!
//! A design file lists design variables, routing margins, placed
//! components with their pins, and the connectors to route between them:
//!
//! ```toml
//! [variables]
//! cpw_width = "10 um"
//!
//! [[components]]
//! name = "Q1"
//! bounds = [0.0, 0.0, 2.0, 2.0]
//! pins = [{ name = "a", position = [2.0, 1.0], normal = [1.0, 0.0] }]
//!
//! [[connectors]]
//! name = "cpw1"
//! start = { component = "Q1", pin = "a" }
//! end = { component = "Q2", pin = "b" }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use ariadne::{Color, Label, Report, ReportKind, Source};
use serde::Deserialize;
use thiserror::Error;

use crate::cpw::{Connector, CpwAutoStraightLine, CpwOptions, PinInput};
use crate::design::{Design, DesignError, PinRecord};
use crate::log::warn;
use crate::routing::{BoundingBox, LintWarning, PathPlanner, Point, RoutingConfig};

/// Errors that can occur when loading a design file
#[derive(Error, Debug)]
pub enum FileError {
    #[error("Failed to read design file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse design file: {0}")]
    Parse(#[from] toml::de::Error),
}

impl FileError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let FileError::Parse(err) = self else {
            return self.to_string();
        };
        let span = err.span().unwrap_or(0..0);

        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message("invalid design file")
            .with_label(
                Label::new((filename, span))
                    .with_message(err.message())
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

fn default_pin_width() -> String {
    "cpw_width".to_string()
}

/// A pin given by midpoint and outward normal
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PinSpec {
    pub name: String,
    pub position: [f64; 2],
    pub normal: [f64; 2],
    #[serde(default = "default_pin_width")]
    pub width: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ComponentSpec {
    pub name: String,
    /// `[min_x, min_y, max_x, max_y]`
    pub bounds: [f64; 4],
    #[serde(default)]
    pub pins: Vec<PinSpec>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ConnectorSpec {
    pub name: String,
    pub start: PinInput,
    pub end: PinInput,
    #[serde(default)]
    pub options: CpwOptions,
}

impl ConnectorSpec {
    pub fn to_line(&self) -> CpwAutoStraightLine {
        CpwAutoStraightLine::new(self.name.clone(), self.start.clone(), self.end.clone())
            .with_options(self.options.clone())
    }
}

/// Parsed design file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DesignFile {
    pub variables: BTreeMap<String, String>,
    pub routing: RoutingConfig,
    pub components: Vec<ComponentSpec>,
    pub connectors: Vec<ConnectorSpec>,
}

/// A lint warning raised while routing a named connector
#[derive(Debug, Clone, PartialEq)]
pub struct ConnectorWarning {
    pub connector: String,
    pub warning: LintWarning,
}

impl fmt::Display for ConnectorWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.connector, self.warning)
    }
}

/// A design with every connector of its file routed
#[derive(Debug, Clone)]
pub struct RoutedDesign {
    pub design: Design,
    pub connectors: Vec<Connector>,
    pub warnings: Vec<ConnectorWarning>,
}

impl DesignFile {
    /// Load a design file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FileError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Parse a design file from a TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, FileError> {
        Ok(toml::from_str(content)?)
    }

    /// Place the components and pins, without routing anything
    pub fn design(&self) -> Result<Design, DesignError> {
        let mut design = Design::new();
        for (name, value) in &self.variables {
            design.set_variable(name.clone(), value.clone());
        }

        for component in &self.components {
            let [min_x, min_y, max_x, max_y] = component.bounds;
            let bounds = BoundingBox::new(min_x, min_y, max_x, max_y);
            let id = design.add_component(component.name.clone(), bounds)?;
            for pin in &component.pins {
                let width = design.parse_value(&pin.width)?;
                let record = PinRecord::from_normal(
                    pin.name.clone(),
                    Point::from(pin.position),
                    Point::from(pin.normal),
                    width,
                );
                design.add_pin(id, record)?;
            }
        }
        Ok(design)
    }

    /// Build the design and route every connector in file order
    pub fn route(&self) -> Result<RoutedDesign, DesignError> {
        let mut design = self.design()?;
        let planner = PathPlanner::new(self.routing);
        let mut connectors = Vec::with_capacity(self.connectors.len());
        let mut warnings = Vec::new();

        for connector in &self.connectors {
            let line = connector.to_line();
            for warning in line.lint(&design)? {
                warn!(connector = %connector.name, %warning, "routing assumption violated");
                warnings.push(ConnectorWarning {
                    connector: connector.name.clone(),
                    warning,
                });
            }
            connectors.push(line.make(&mut design, &planner)?);
        }

        Ok(RoutedDesign {
            design,
            connectors,
            warnings,
        })
    }
}
