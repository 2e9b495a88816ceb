//! Geometry value types shared by the planner and the design model

use glam::DVec2;

/// A 2D point or vector in millimetres, y axis pointing up
pub type Point = DVec2;

/// Default CPW centre-trace width (10 um)
pub const DEFAULT_WIDTH: f64 = 0.010;

/// Default lead-in length at either end (22 um)
pub const DEFAULT_LEAD: f64 = 0.022;

/// A connection point on a component, as seen by the router
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    /// Where the lead attaches
    pub position: Point,
    /// Outward unit normal, axis-aligned
    pub normal: Point,
}

impl Pin {
    pub fn new(position: Point, normal: Point) -> Self {
        Self { position, normal }
    }

    /// Point reached after the mandatory half-width stand-off plus `lead`
    pub fn standoff(&self, width: f64, lead: f64) -> Point {
        self.position + self.normal * (width / 2.0 + lead)
    }
}

/// Axis-aligned extent of a single component
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Smallest box containing all the given points
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let init = Self::new(first.x, first.y, first.x, first.y);
        Some(iter.fold(init, |b, p| b.expand_to_include(*p)))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Smallest box containing both (the enclosing box of a route)
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    pub fn expand_to_include(&self, point: Point) -> BoundingBox {
        BoundingBox::new(
            self.min_x.min(point.x),
            self.min_y.min(point.y),
            self.max_x.max(point.x),
            self.max_y.max(point.y),
        )
    }

    /// Grow every side outward by `margin`
    pub fn expand(&self, margin: f64) -> BoundingBox {
        BoundingBox::new(
            self.min_x - margin,
            self.min_y - margin,
            self.max_x + margin,
            self.max_y + margin,
        )
    }

    /// True if the point lies strictly inside (edges excluded)
    pub fn contains_strict(&self, point: Point) -> bool {
        point.x > self.min_x && point.x < self.max_x && point.y > self.min_y && point.y < self.max_y
    }

    /// True if the point lies inside or on the boundary
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// True if the two boxes share interior area
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        self.min_x < other.max_x
            && other.min_x < self.max_x
            && self.min_y < other.max_y
            && other.min_y < self.max_y
    }

    /// `x` equals the left or right extreme exactly
    pub fn on_x_extreme(&self, x: f64) -> bool {
        x == self.min_x || x == self.max_x
    }

    /// `y` equals the bottom or top extreme exactly
    pub fn on_y_extreme(&self, y: f64) -> bool {
        y == self.min_y || y == self.max_y
    }
}

/// Everything the planner needs to route one connector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub start: Pin,
    pub start_bounds: BoundingBox,
    pub end: Pin,
    pub end_bounds: BoundingBox,
    /// Centre-trace width
    pub width: f64,
    pub lead_start: f64,
    pub lead_end: f64,
}

impl RouteRequest {
    pub fn new(start: Pin, start_bounds: BoundingBox, end: Pin, end_bounds: BoundingBox) -> Self {
        Self {
            start,
            start_bounds,
            end,
            end_bounds,
            width: DEFAULT_WIDTH,
            lead_start: DEFAULT_LEAD,
            lead_end: DEFAULT_LEAD,
        }
    }

    /// Set the centre-trace width
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = width;
        self
    }

    /// Set the lead-in lengths at the start and end pins
    pub fn with_leads(mut self, lead_start: f64, lead_end: f64) -> Self {
        self.lead_start = lead_start;
        self.lead_end = lead_end;
        self
    }

    pub fn start_standoff(&self) -> Point {
        self.start.standoff(self.width, self.lead_start)
    }

    pub fn end_standoff(&self) -> Point {
        self.end.standoff(self.width, self.lead_end)
    }

    /// Box enclosing both components
    pub fn enclosing(&self) -> BoundingBox {
        self.start_bounds.union(&self.end_bounds)
    }
}
