//! Topology selection for a CPW between two oriented pins
//!
//! The planner first classifies how the two pin normals relate to each
//! other, then runs a per-case decision tree that picks a 1, 2 or 3 segment
//! topology. Every branch encodes a geometric rule that keeps the route from
//! folding back on itself or cutting through either host component. When a
//! route has to wrap around the outside of both components, two candidates
//! are built and the shorter one wins.
//!
//! All comparisons are exact. Pins sit on coordinates produced by the same
//! construction that produced the bounding boxes, so "on the boundary" means
//! bit-for-bit equal.

use std::fmt;

use crate::log::debug;

use super::config::RoutingConfig;
use super::length::path_length;
use super::segments::{build_points, ConstAxis, Segments};
use super::types::{BoundingBox, Point, RouteRequest};

/// Relative orientation of the two pin normals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrientationCase {
    /// Normals point in opposite directions
    Antiparallel,
    /// Normals are at right angles
    Perpendicular,
    /// Normals point the same way
    Parallel,
}

impl fmt::Display for OrientationCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrientationCase::Antiparallel => write!(f, "antiparallel"),
            OrientationCase::Perpendicular => write!(f, "perpendicular"),
            OrientationCase::Parallel => write!(f, "parallel"),
        }
    }
}

/// Classify two unit normals by their dot product.
///
/// Anything that is neither exactly opposite nor exactly orthogonal is
/// treated as parallel.
pub fn classify(n1: Point, n2: Point) -> OrientationCase {
    let normdot = n1.dot(n2);
    if normdot == -1.0 {
        OrientationCase::Antiparallel
    } else if normdot == 0.0 {
        OrientationCase::Perpendicular
    } else {
        OrientationCase::Parallel
    }
}

/// How the stand-off displacement of antiparallel pins lines up with the start normal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Pins point straight at each other
    Facing,
    /// Displacement is partly along the normals: needs an S-bend
    Staggered,
    /// Displacement is exactly across the normals
    Sideways,
    /// Pins point away from each other
    Opposed,
}

/// Bucket the cosine between the stand-off displacement and the start normal.
///
/// A NaN (coincident stand-off points) is treated as facing.
pub fn classify_alignment(alignment: f64) -> Alignment {
    if alignment == 1.0 {
        Alignment::Facing
    } else if alignment > 0.0 {
        Alignment::Staggered
    } else if alignment == 0.0 {
        Alignment::Sideways
    } else if alignment < 0.0 {
        Alignment::Opposed
    } else {
        Alignment::Facing
    }
}

/// What the decision tree settled on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RouteChoice {
    /// A single topology
    Fixed(Segments),
    /// Two wrap-around candidates; `first` is used only when strictly shorter
    ShorterOf { first: Segments, second: Segments },
}

/// A planned connector centreline
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Vertices from the start pin to the end pin
    pub points: Vec<Point>,
    /// Topology the vertices were built from
    pub segments: Segments,
    /// Orientation class of the pin pair
    pub case: OrientationCase,
}

impl Route {
    pub fn length(&self) -> f64 {
        path_length(&self.points)
    }

    /// Extent of the centreline
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }
}

/// Stateless route planner
#[derive(Debug, Clone, Copy, Default)]
pub struct PathPlanner {
    config: RoutingConfig,
}

impl PathPlanner {
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Plan the connector centreline for a request
    pub fn plan(&self, req: &RouteRequest) -> Route {
        let case = classify(req.start.normal, req.end.normal);
        let choice = self.choose_for(case, req);

        let (segments, points) = match choice {
            RouteChoice::Fixed(segments) => (segments, self.build(req, segments)),
            RouteChoice::ShorterOf { first, second } => {
                let a = self.build(req, first);
                let b = self.build(req, second);
                let (la, lb) = (path_length(&a), path_length(&b));
                debug!(la, lb, "comparing wrap-around candidates");
                if la < lb {
                    (first, a)
                } else {
                    (second, b)
                }
            }
        };

        debug!(%case, %segments, "planned route");
        Route {
            points,
            segments,
            case,
        }
    }

    /// Run the decision tree without building any vertices
    pub fn choose(&self, req: &RouteRequest) -> RouteChoice {
        self.choose_for(classify(req.start.normal, req.end.normal), req)
    }

    fn choose_for(&self, case: OrientationCase, req: &RouteRequest) -> RouteChoice {
        match case {
            OrientationCase::Antiparallel => self.antiparallel(req),
            OrientationCase::Perpendicular => self.perpendicular(req),
            OrientationCase::Parallel => self.parallel(req),
        }
    }

    fn build(&self, req: &RouteRequest, segments: Segments) -> Vec<Point> {
        build_points(
            &req.start,
            &req.end,
            req.width,
            segments,
            req.lead_start,
            req.lead_end,
        )
    }

    fn antiparallel(&self, req: &RouteRequest) -> RouteChoice {
        let n1 = req.start.normal;
        let d = req.end_standoff() - req.start_standoff();
        let alignment = (d / d.length()).dot(n1);
        let (b1, b2) = (&req.start_bounds, &req.end_bounds);
        let horizontal = n1.y == 0.0;

        let kind = classify_alignment(alignment);
        debug!(alignment, ?kind, "antiparallel pins");

        match kind {
            Alignment::Facing | Alignment::Sideways => RouteChoice::Fixed(Segments::One),
            Alignment::Staggered => {
                // S-bend through the gap the two pins face across
                if horizontal {
                    let value = separation(b1.min_x, b1.max_x, b2.min_x, b2.max_x)
                        .unwrap_or_else(|| req.enclosing().center().x);
                    RouteChoice::Fixed(Segments::Three {
                        axis: ConstAxis::X,
                        value,
                    })
                } else {
                    let value = separation(b1.min_y, b1.max_y, b2.min_y, b2.max_y)
                        .unwrap_or_else(|| req.enclosing().center().y);
                    RouteChoice::Fixed(Segments::Three {
                        axis: ConstAxis::Y,
                        value,
                    })
                }
            }
            Alignment::Opposed => {
                // Cross between the components if they are separated across the normals,
                // otherwise go around the outside
                if horizontal {
                    match separation(b1.min_y, b1.max_y, b2.min_y, b2.max_y) {
                        Some(value) => RouteChoice::Fixed(Segments::Three {
                            axis: ConstAxis::Y,
                            value,
                        }),
                        None => self.wrap(req, ConstAxis::Y),
                    }
                } else {
                    match separation(b1.min_x, b1.max_x, b2.min_x, b2.max_x) {
                        Some(value) => RouteChoice::Fixed(Segments::Three {
                            axis: ConstAxis::X,
                            value,
                        }),
                        None => self.wrap(req, ConstAxis::X),
                    }
                }
            }
        }
    }

    fn perpendicular(&self, req: &RouteRequest) -> RouteChoice {
        let enc = req.enclosing();
        let (m1, m2) = (req.start.position, req.end.position);

        let m1_on_x = enc.on_x_extreme(m1.x);
        let m1_on_y = enc.on_y_extreme(m1.y);
        let m2_on_x = enc.on_x_extreme(m2.x);
        let m2_on_y = enc.on_y_extreme(m2.y);
        debug!(m1_on_x, m1_on_y, m2_on_x, m2_on_y, "perpendicular pins");

        if (m1_on_x && m2_on_y) || (m1_on_y && m2_on_x) {
            // Both on the outer perimeter, on adjacent edges
            return RouteChoice::Fixed(Segments::Two);
        }

        if !(m1_on_x || m1_on_y || m2_on_x || m2_on_y) {
            // Both inside the perimeter: at most one corner needed
            return if m1.x == m2.x || m1.y == m2.y {
                RouteChoice::Fixed(Segments::One)
            } else {
                RouteChoice::Fixed(Segments::Two)
            };
        }

        if m1_on_x || m1_on_y {
            self.one_on_perimeter(
                &enc,
                m1_on_x,
                req.end.normal,
                &req.start_bounds,
                &req.end_bounds,
            )
        } else {
            self.one_on_perimeter(
                &enc,
                m2_on_x,
                req.start.normal,
                &req.end_bounds,
                &req.start_bounds,
            )
        }
    }

    /// Exactly one pin lies on the enclosing perimeter.
    ///
    /// `own` is the box of the pin on the perimeter, `other` the box of the
    /// interior pin whose normal is `other_normal`. `on_x_extreme` says the
    /// perimeter pin sits on the left or right edge rather than top or bottom.
    fn one_on_perimeter(
        &self,
        enc: &BoundingBox,
        on_x_extreme: bool,
        other_normal: Point,
        own: &BoundingBox,
        other: &BoundingBox,
    ) -> RouteChoice {
        let Margins { kx, ky } = self.margins();

        let segments = if on_x_extreme {
            if other_normal.y > 0.0 {
                // interior pin points up
                if own.min_y > other.max_y {
                    Segments::Two
                } else {
                    Segments::Three {
                        axis: ConstAxis::Y,
                        value: enc.max_y + ky,
                    }
                }
            } else if other.min_y > own.max_y {
                Segments::Two
            } else {
                Segments::Three {
                    axis: ConstAxis::Y,
                    value: enc.min_y - ky,
                }
            }
        } else if other_normal.x < 0.0 {
            // interior pin points left
            if other.min_x > own.max_x {
                Segments::Two
            } else {
                Segments::Three {
                    axis: ConstAxis::X,
                    value: enc.min_x - kx,
                }
            }
        } else if own.min_x > other.max_x {
            Segments::Two
        } else {
            Segments::Three {
                axis: ConstAxis::X,
                value: enc.max_x + kx,
            }
        };
        RouteChoice::Fixed(segments)
    }

    fn parallel(&self, req: &RouteRequest) -> RouteChoice {
        let (m1, m2) = (req.start.position, req.end.position);
        let n1 = req.start.normal;
        let (b1, b2) = (&req.start_bounds, &req.end_bounds);

        if (m1.x == m2.x || m1.y == m2.y) && n1.dot(m2 - m1) == 0.0 {
            // Side by side on a common edge line
            return RouteChoice::Fixed(Segments::One);
        }

        // One corner only clears both boxes when they are apart across the normals
        if n1.y == 0.0 {
            match separation(b1.min_y, b1.max_y, b2.min_y, b2.max_y) {
                Some(_) => RouteChoice::Fixed(Segments::Two),
                None => self.wrap(req, ConstAxis::Y),
            }
        } else {
            match separation(b1.min_x, b1.max_x, b2.min_x, b2.max_x) {
                Some(_) => RouteChoice::Fixed(Segments::Two),
                None => self.wrap(req, ConstAxis::X),
            }
        }
    }

    /// Two candidates around opposite outer edges of the enclosing box.
    ///
    /// Top is preferred over bottom and left over right only when strictly shorter.
    fn wrap(&self, req: &RouteRequest, axis: ConstAxis) -> RouteChoice {
        let enc = req.enclosing();
        let Margins { kx, ky } = self.margins();
        match axis {
            ConstAxis::Y => RouteChoice::ShorterOf {
                first: Segments::Three {
                    axis,
                    value: enc.max_y + ky,
                },
                second: Segments::Three {
                    axis,
                    value: enc.min_y - ky,
                },
            },
            ConstAxis::X => RouteChoice::ShorterOf {
                first: Segments::Three {
                    axis,
                    value: enc.min_x - kx,
                },
                second: Segments::Three {
                    axis,
                    value: enc.max_x + kx,
                },
            },
        }
    }

    fn margins(&self) -> Margins {
        Margins {
            kx: self.config.keepout_x,
            ky: self.config.keepout_y,
        }
    }
}

struct Margins {
    kx: f64,
    ky: f64,
}

/// Midpoint of the gap between two intervals, if they are strictly apart
fn separation(lo1: f64, hi1: f64, lo2: f64, hi2: f64) -> Option<f64> {
    if hi1 < lo2 {
        Some((hi1 + lo2) / 2.0)
    } else if hi2 < lo1 {
        Some((hi2 + lo1) / 2.0)
    } else {
        None
    }
}

/// Plan a route with the default configuration
pub fn plan(req: &RouteRequest) -> Route {
    PathPlanner::default().plan(req)
}
