//! Components, pins and geometry records held by a design

use std::collections::BTreeMap;
use std::fmt;

use crate::routing::{BoundingBox, Pin, Point};

use super::error::DesignError;

/// Stable handle for a component in a design
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A named pin: an edge segment of its component with an outward normal.
///
/// The normal is the unit tangent from `points[0]` to `points[1]` rotated
/// 90 degrees counter-clockwise, so the point order fixes which side of
/// the edge is "outside".
#[derive(Debug, Clone, PartialEq)]
pub struct PinRecord {
    pub name: String,
    pub points: [Point; 2],
    pub middle: Point,
    pub normal: Point,
    pub width: f64,
}

impl PinRecord {
    /// Build a pin from its two edge points
    pub fn from_points(
        component: &str,
        name: impl Into<String>,
        points: [Point; 2],
        width: f64,
    ) -> Result<Self, DesignError> {
        let name = name.into();
        let delta = points[1] - points[0];
        let len = delta.length();
        if len == 0.0 || !len.is_finite() {
            return Err(DesignError::InvalidPin {
                component: component.to_string(),
                pin: name,
                reason: "pin points must be distinct and finite".to_string(),
            });
        }
        let tangent = delta / len;

        Ok(Self {
            name,
            points,
            middle: (points[0] + points[1]) / 2.0,
            normal: tangent.perp(),
            width,
        })
    }

    /// Build a pin from its midpoint and outward normal
    pub fn from_normal(name: impl Into<String>, middle: Point, normal: Point, width: f64) -> Self {
        // Clockwise tangent, so that rotating it counter-clockwise gives `normal`
        let half = Point::new(normal.y, -normal.x) * (width / 2.0);
        Self {
            name: name.into(),
            points: [middle - half, middle + half],
            middle,
            normal,
            width,
        }
    }

    /// The same edge seen from the other side, under a new name
    pub fn reversed(&self, name: impl Into<String>, width: f64) -> Self {
        Self {
            name: name.into(),
            points: [self.points[1], self.points[0]],
            middle: self.middle,
            normal: -self.normal,
            width,
        }
    }

    /// Routing view of the pin
    pub fn as_pin(&self) -> Pin {
        Pin::new(self.middle, self.normal)
    }
}

/// Whether a component was placed by the user or generated by routing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Placed,
    Connector,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Component {
    pub id: ComponentId,
    pub name: String,
    pub kind: ComponentKind,
    pub bounds: BoundingBox,
    pub pins: BTreeMap<String, PinRecord>,
}

impl Component {
    pub fn new(
        id: ComponentId,
        name: impl Into<String>,
        kind: ComponentKind,
        bounds: BoundingBox,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            bounds,
            pins: BTreeMap::new(),
        }
    }

    pub fn pin(&self, name: &str) -> Option<&PinRecord> {
        self.pins.get(name)
    }
}

/// A stroked polyline in the geometry table
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    pub name: String,
    pub component: ComponentId,
    pub points: Vec<Point>,
    pub width: f64,
    pub layer: u32,
    /// Removed from the ground plane rather than added as metal
    pub subtract: bool,
}
