//! Assumption checks for route requests.
//!
//! The planner is total: it produces a route for any input. These checks
//! report inputs that break the conditions under which that route is
//! guaranteed to be clean (axis-aligned pins on a box edge, no corner pins,
//! separated components). They never change what the planner does.

use std::fmt;

use super::types::{BoundingBox, Pin, Point, RouteRequest};

/// A lint warning about a route request
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of assumption violation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    /// Normal is not a unit vector along x or y
    Normal,
    /// Pin is not on its component's edge or points inward
    Placement,
    /// Pin sits on a corner of its component
    Corner,
    /// Component boxes overlap
    Overlap,
    /// Component boxes touch with no gap
    Gap,
    /// Negative width or lead length
    Parameter,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Normal => write!(f, "normal"),
            LintCategory::Placement => write!(f, "placement"),
            LintCategory::Corner => write!(f, "corner"),
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::Gap => write!(f, "gap"),
            LintCategory::Parameter => write!(f, "parameter"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Run all checks on a request.
pub fn check(req: &RouteRequest) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_pin("start", &req.start, &req.start_bounds, &mut warnings);
    check_pin("end", &req.end, &req.end_bounds, &mut warnings);
    check_boxes(&req.start_bounds, &req.end_bounds, &mut warnings);
    check_parameters(req, &mut warnings);
    warnings
}

fn is_axis_unit(n: Point) -> bool {
    (n.x == 0.0 && n.y.abs() == 1.0) || (n.y == 0.0 && n.x.abs() == 1.0)
}

fn check_pin(label: &str, pin: &Pin, bounds: &BoundingBox, warnings: &mut Vec<LintWarning>) {
    let (p, n) = (pin.position, pin.normal);

    if !is_axis_unit(n) {
        warnings.push(LintWarning {
            category: LintCategory::Normal,
            message: format!(
                "{} pin normal ({}, {}) is not a unit vector along x or y",
                label, n.x, n.y
            ),
        });
        // Placement checks below depend on an axis-aligned normal
        return;
    }

    if !bounds.contains(p) {
        warnings.push(LintWarning {
            category: LintCategory::Placement,
            message: format!(
                "{} pin at ({}, {}) lies outside its component",
                label, p.x, p.y
            ),
        });
        return;
    }

    let on_x = bounds.on_x_extreme(p.x);
    let on_y = bounds.on_y_extreme(p.y);

    if on_x && on_y {
        warnings.push(LintWarning {
            category: LintCategory::Corner,
            message: format!(
                "{} pin at ({}, {}) sits on a component corner",
                label, p.x, p.y
            ),
        });
        return;
    }

    // The edge the normal points away from
    let outward = if n.x == 1.0 {
        p.x == bounds.max_x
    } else if n.x == -1.0 {
        p.x == bounds.min_x
    } else if n.y == 1.0 {
        p.y == bounds.max_y
    } else {
        p.y == bounds.min_y
    };

    if !outward {
        let reason = if on_x || on_y {
            "its normal does not point away from the edge"
        } else {
            "it is not on the component edge"
        };
        warnings.push(LintWarning {
            category: LintCategory::Placement,
            message: format!("{} pin at ({}, {}): {}", label, p.x, p.y, reason),
        });
    }
}

fn check_boxes(a: &BoundingBox, b: &BoundingBox, warnings: &mut Vec<LintWarning>) {
    if a.overlaps(b) {
        warnings.push(LintWarning {
            category: LintCategory::Overlap,
            message: "component bounding boxes overlap".to_string(),
        });
        return;
    }

    let x_touch = a.max_x == b.min_x || b.max_x == a.min_x;
    let y_touch = a.max_y == b.min_y || b.max_y == a.min_y;
    let x_meet = a.min_x <= b.max_x && b.min_x <= a.max_x;
    let y_meet = a.min_y <= b.max_y && b.min_y <= a.max_y;

    if (x_touch && y_meet) || (y_touch && x_meet) {
        warnings.push(LintWarning {
            category: LintCategory::Gap,
            message: "components share an edge; a nonzero gap is required".to_string(),
        });
    }
}

fn check_parameters(req: &RouteRequest, warnings: &mut Vec<LintWarning>) {
    for (name, value) in [
        ("width", req.width),
        ("start lead", req.lead_start),
        ("end lead", req.lead_end),
    ] {
        if value < 0.0 {
            warnings.push(LintWarning {
                category: LintCategory::Parameter,
                message: format!("{} is negative ({})", name, value),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_request() -> RouteRequest {
        RouteRequest::new(
            Pin::new(Point::new(2.0, 1.0), Point::X),
            BoundingBox::new(0.0, 0.0, 2.0, 2.0),
            Pin::new(Point::new(5.0, 1.0), Point::NEG_X),
            BoundingBox::new(5.0, 0.0, 7.0, 2.0),
        )
    }

    fn categories(warnings: &[LintWarning]) -> Vec<LintCategory> {
        warnings.iter().map(|w| w.category).collect()
    }

    #[test]
    fn test_clean_request_has_no_warnings() {
        assert!(check(&clean_request()).is_empty());
    }

    #[test]
    fn test_rotated_normal() {
        let mut req = clean_request();
        req.start.normal = Point::new(0.6, 0.8);
        assert_eq!(categories(&check(&req)), vec![LintCategory::Normal]);
    }

    #[test]
    fn test_corner_pin() {
        let mut req = clean_request();
        req.start.position = Point::new(2.0, 2.0);
        assert_eq!(categories(&check(&req)), vec![LintCategory::Corner]);
    }

    #[test]
    fn test_inward_normal() {
        let mut req = clean_request();
        req.end.normal = Point::X;
        let warnings = check(&req);
        assert_eq!(categories(&warnings), vec![LintCategory::Placement]);
        assert!(warnings[0].message.contains("does not point away"));
    }

    #[test]
    fn test_pin_outside_component() {
        let mut req = clean_request();
        req.end.position = Point::new(4.0, 1.0);
        assert_eq!(categories(&check(&req)), vec![LintCategory::Placement]);
    }

    #[test]
    fn test_overlap_and_gap() {
        let mut req = clean_request();
        req.end_bounds = BoundingBox::new(1.0, 0.0, 7.0, 2.0);
        assert!(categories(&check(&req)).contains(&LintCategory::Overlap));

        req.end_bounds = BoundingBox::new(2.0, 0.0, 7.0, 2.0);
        assert!(categories(&check(&req)).contains(&LintCategory::Gap));
    }

    #[test]
    fn test_negative_lead() {
        let req = clean_request().with_leads(-0.1, 0.0);
        let warnings = check(&req);
        assert_eq!(categories(&warnings), vec![LintCategory::Parameter]);
        assert_eq!(warnings[0].to_string(), "[parameter] start lead is negative (-0.1)");
    }
}
