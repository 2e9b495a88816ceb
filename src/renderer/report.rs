//! Plain-text summary of routed connectors

use std::fmt::Write;

use crate::cpw::Connector;

/// One block per connector: endpoints, orientation, topology, length and vertices
pub fn render_report(connectors: &[Connector]) -> String {
    let mut out = String::new();
    for c in connectors {
        // Writing to a String cannot fail
        let _ = writeln!(
            out,
            "{} ({}.{} -> {}.{}): {}, {}, length {:.4}",
            c.name,
            c.start.component,
            c.start.pin,
            c.end.component,
            c.end.pin,
            c.route.case,
            c.route.segments,
            c.route.length(),
        );
        for p in &c.route.points {
            // `+ 0.0` folds negative zero so it prints as 0
            let _ = writeln!(out, "  ({:.4}, {:.4})", p.x + 0.0, p.y + 0.0);
        }
    }
    out
}
