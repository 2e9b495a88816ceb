//! Materialize a chosen topology into a concrete vertex list

use std::fmt;

use super::types::{Pin, Point};

/// Which coordinate is held constant along the middle leg of a 3-segment route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstAxis {
    /// Middle leg is vertical, on `x = value`
    X,
    /// Middle leg is horizontal, on `y = value`
    Y,
}

/// Routing topology between the two stand-off points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segments {
    /// Straight across from stand-off to stand-off
    One,
    /// One corner between the stand-offs
    Two,
    /// A middle leg on a constant line, joined to each stand-off
    Three { axis: ConstAxis, value: f64 },
}

impl Segments {
    /// Number of segments between the two stand-off points
    pub fn count(&self) -> usize {
        match self {
            Segments::One => 1,
            Segments::Two => 2,
            Segments::Three { .. } => 3,
        }
    }
}

impl fmt::Display for Segments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segments::One => write!(f, "1 segment"),
            Segments::Two => write!(f, "2 segments"),
            Segments::Three {
                axis: ConstAxis::X,
                value,
            } => write!(f, "3 segments via x = {}", value),
            Segments::Three {
                axis: ConstAxis::Y,
                value,
            } => write!(f, "3 segments via y = {}", value),
        }
    }
}

/// Build the vertex list for `segments` between two pins.
///
/// The result always starts at `start.position` and ends at `end.position`,
/// with each pin's stand-off point (half the width plus the lead) as the
/// second and second-to-last vertex.
pub fn build_points(
    start: &Pin,
    end: &Pin,
    width: f64,
    segments: Segments,
    lead_start: f64,
    lead_end: f64,
) -> Vec<Point> {
    let s = start.standoff(width, lead_start);
    let e = end.standoff(width, lead_end);

    let mut points = Vec::with_capacity(4 + segments.count() - 1);
    points.push(start.position);
    points.push(s);
    match segments {
        Segments::One => {}
        Segments::Two => points.push(pick_corner(s, start.normal, e, end.normal)),
        Segments::Three {
            axis: ConstAxis::X,
            value,
        } => {
            points.push(Point::new(value, s.y));
            points.push(Point::new(value, e.y));
        }
        Segments::Three {
            axis: ConstAxis::Y,
            value,
        } => {
            points.push(Point::new(s.x, value));
            points.push(Point::new(e.x, value));
        }
    }
    points.push(e);
    points.push(end.position);
    points
}

/// Choose between the two diagonal corners of the rectangle spanned by the
/// stand-offs so the route does not trace back on itself.
fn pick_corner(s: Point, sn: Point, e: Point, en: Point) -> Point {
    let corner1 = Point::new(s.x, e.y);
    let corner2 = Point::new(e.x, s.y);

    let start_c1 = (corner1 - s).dot(sn);
    let end_c1 = (corner1 - e).dot(en);
    let start_c2 = (corner2 - s).dot(sn);
    let end_c2 = (corner2 - e).dot(en);

    if start_c1 > 0.0 && end_c1 > 0.0 {
        corner1
    } else if start_c2 > 0.0 && end_c2 > 0.0 {
        corner2
    } else if start_c1.min(end_c1) >= 0.0 {
        corner1
    } else {
        corner2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(x: f64, y: f64, nx: f64, ny: f64) -> Pin {
        Pin::new(Point::new(x, y), Point::new(nx, ny))
    }

    // width 0.5 and lead 0.25 give a stand-off of exactly 0.5
    const W: f64 = 0.5;
    const L: f64 = 0.25;

    #[test]
    fn test_one_segment_has_four_points() {
        let pts = build_points(
            &pin(0.0, 0.0, 1.0, 0.0),
            &pin(4.0, 0.0, -1.0, 0.0),
            W,
            Segments::One,
            L,
            L,
        );
        assert_eq!(
            pts,
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.5, 0.0),
                Point::new(3.5, 0.0),
                Point::new(4.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_two_segments_picks_corner_both_normals_face() {
        // right-pointing start, down-pointing end above and to the right
        let pts = build_points(
            &pin(0.0, 0.0, 1.0, 0.0),
            &pin(4.0, 4.0, 0.0, -1.0),
            W,
            Segments::Two,
            L,
            L,
        );
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[2], Point::new(4.0, 0.0));
    }

    #[test]
    fn test_two_segments_falls_back_to_non_negative_corner() {
        // start points right, end points up from above; no corner is strictly ahead of both
        let pts = build_points(
            &pin(2.0, 1.0, 1.0, 0.0),
            &pin(4.0, 5.0, 0.0, 1.0),
            W,
            Segments::Two,
            L,
            L,
        );
        assert_eq!(pts[2], Point::new(2.5, 5.5));
    }

    #[test]
    fn test_two_segments_falls_back_to_second_corner() {
        let pts = build_points(
            &pin(2.0, 4.0, 1.0, 0.0),
            &pin(3.0, 1.0, 1.0, 0.0),
            W,
            Segments::Two,
            L,
            L,
        );
        assert_eq!(pts[2], Point::new(3.5, 4.0));
    }

    #[test]
    fn test_three_segments_constant_x() {
        let pts = build_points(
            &pin(0.0, 0.0, 0.0, 1.0),
            &pin(4.0, 0.0, 0.0, 1.0),
            W,
            Segments::Three {
                axis: ConstAxis::X,
                value: 2.0,
            },
            L,
            L,
        );
        assert_eq!(pts.len(), 6);
        assert_eq!(pts[2], Point::new(2.0, 0.5));
        assert_eq!(pts[3], Point::new(2.0, 0.5));
    }

    #[test]
    fn test_three_segments_constant_y() {
        let pts = build_points(
            &pin(0.0, 0.0, 1.0, 0.0),
            &pin(0.0, 3.0, -1.0, 0.0),
            W,
            Segments::Three {
                axis: ConstAxis::Y,
                value: 1.5,
            },
            L,
            L,
        );
        assert_eq!(pts[2], Point::new(0.5, 1.5));
        assert_eq!(pts[3], Point::new(-0.5, 1.5));
        assert_eq!(*pts.last().unwrap(), Point::new(0.0, 3.0));
    }

    #[test]
    fn test_segments_display() {
        assert_eq!(Segments::One.to_string(), "1 segment");
        assert_eq!(
            Segments::Three {
                axis: ConstAxis::Y,
                value: 3.25
            }
            .to_string(),
            "3 segments via y = 3.25"
        );
    }
}
