//! SVG generation from a routed design

use crate::design::{Component, ComponentKind, Design};
use crate::routing::{BoundingBox, Point};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    traces: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            traces: vec![],
            indent: 1,
        }
    }

    /// Add the built-in palette for components, pins and traces
    pub fn add_default_styles(&mut self) {
        let p = self.prefix();
        self.styles.extend([
            format!(".{p}rect {{ fill: #f5f5f5; stroke: #333333; stroke-width: 1; }}"),
            format!(".{p}label {{ font-family: sans-serif; font-size: 14px; fill: #333333; }}"),
            format!(".{p}pin {{ stroke: #ff9800; }}"),
            format!(".{p}gnd-cut {{ stroke: #bbdefb; fill: none; }}"),
            format!(".{p}trace {{ stroke: #1565c0; fill: none; }}"),
        ]);
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Design coordinates (mm, y up) to SVG user units (y down)
    fn to_svg(&self, p: Point) -> (String, String) {
        let q = self.config.project(p);
        (fmt_num(q.x), fmt_num(q.y))
    }

    fn length(&self, mm: f64) -> String {
        fmt_num(self.config.length(mm))
    }

    /// Add a rectangle covering a design-space box
    pub fn add_rect(&mut self, id: Option<&str>, bounds: &BoundingBox) {
        let prefix = self.prefix();
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        let (x, y) = self.to_svg(Point::new(bounds.min_x, bounds.max_y));

        self.elements.push(format!(
            r#"{}<rect{} class="{}shape {}rect" x="{}" y="{}" width="{}" height="{}"/>"#,
            self.indent_str(),
            id_attr,
            prefix,
            prefix,
            x,
            y,
            self.length(bounds.width()),
            self.length(bounds.height()),
        ));
    }

    /// Add a pin edge as a line
    pub fn add_pin(&mut self, name: &str, points: &[Point; 2], width: f64) {
        let prefix = self.prefix();
        let (x1, y1) = self.to_svg(points[0]);
        let (x2, y2) = self.to_svg(points[1]);

        self.elements.push(format!(
            r#"{}<line class="{}pin" data-pin="{}" x1="{}" y1="{}" x2="{}" y2="{}" stroke-width="{}"/>"#,
            self.indent_str(),
            prefix,
            escape_xml(name),
            x1,
            y1,
            x2,
            y2,
            self.length(width),
        ));
    }

    /// Add a text label centred on a design-space point
    pub fn add_label(&mut self, text: &str, at: Point) {
        let prefix = self.prefix();
        let (x, y) = self.to_svg(at);

        self.elements.push(format!(
            r#"{}<text class="{}label" x="{}" y="{}" text-anchor="middle" dominant-baseline="middle">{}</text>"#,
            self.indent_str(),
            prefix,
            x,
            y,
            escape_xml(text)
        ));
    }

    /// Add a stroked polyline; traces render above components
    pub fn add_trace_path(&mut self, path: &[Point], class: &str, width: f64) {
        let prefix = self.prefix();
        let scaled: Vec<Point> = path.iter().map(|&p| self.config.project(p)).collect();

        self.traces.push(format!(
            r#"{}<path class="{}{}" d="{}" stroke-width="{}" stroke-linejoin="miter" fill="none"/>"#,
            self.indent_str(),
            prefix,
            class,
            path_to_d(&scaled),
            self.length(width),
        ));
    }

    /// Add a group element with optional ID and classes
    pub fn start_group(&mut self, id: Option<&str>, classes: &[String]) {
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };

        self.elements
            .push(format!("{}<g{}{}>", self.indent_str(), id_attr, class_attr));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string around a design-space extent
    pub fn build(self, extent: BoundingBox) -> String {
        let padding = self.config.viewbox_padding;
        let corner = self.config.project(Point::new(extent.min_x, extent.max_y));
        let vb_x = corner.x - padding;
        let vb_y = corner.y - padding;
        let vb_w = self.config.length(extent.width()) + 2.0 * padding;
        let vb_h = self.config.length(extent.height()) + 2.0 * padding;

        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            fmt_num(vb_x),
            fmt_num(vb_y),
            fmt_num(vb_w),
            fmt_num(vb_h)
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        for trace in &self.traces {
            svg.push_str(trace);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a design to an SVG string
pub fn render_svg(design: &Design, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_default_styles();
    let prefix = builder.prefix();

    let mut extent: Option<BoundingBox> = None;
    for component in design.components() {
        extent = Some(match extent {
            Some(e) => e.union(&component.bounds),
            None => component.bounds,
        });

        match component.kind {
            ComponentKind::Placed => render_component(component, &prefix, &mut builder),
            ComponentKind::Connector => {
                // Ground cut first so the centre trace draws on top of it
                let mut shapes: Vec<_> = design.paths_of(component.id).collect();
                shapes.sort_by_key(|s| !s.subtract);
                for shape in shapes {
                    let class = if shape.subtract { "gnd-cut" } else { "trace" };
                    builder.add_trace_path(&shape.points, class, shape.width);
                }
            }
        }
    }

    builder.build(extent.unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0)))
}

fn render_component(component: &Component, prefix: &str, builder: &mut SvgBuilder) {
    builder.start_group(Some(&component.name), &[format!("{}component", prefix)]);
    builder.add_rect(None, &component.bounds);
    builder.add_label(&component.name, component.bounds.center());
    for pin in component.pins.values() {
        builder.add_pin(&pin.name, &pin.points, pin.width);
    }
    builder.end_group();
}

/// Format a coordinate with at most three decimals and no trailing zeros
fn fmt_num(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn path_to_d(path: &[Point]) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut d = format!("M{} {}", fmt_num(path[0].x), fmt_num(path[0].y));
    for point in &path[1..] {
        d.push_str(&format!(" L{} {}", fmt_num(point.x), fmt_num(point.y)));
    }
    d
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpw::{CpwAutoStraightLine, PinInput};
    use crate::design::PinRecord;
    use crate::routing::PathPlanner;

    fn routed() -> Design {
        let mut design = Design::new();
        let q1 = design
            .add_component("Q1", BoundingBox::new(0.0, 0.0, 2.0, 2.0))
            .unwrap();
        design
            .add_pin(q1, PinRecord::from_normal("a", Point::new(2.0, 1.0), Point::X, 0.01))
            .unwrap();
        let q2 = design
            .add_component("Q2", BoundingBox::new(5.0, 0.0, 7.0, 2.0))
            .unwrap();
        design
            .add_pin(q2, PinRecord::from_normal("b", Point::new(5.0, 1.0), Point::NEG_X, 0.01))
            .unwrap();
        CpwAutoStraightLine::new("cpw1", PinInput::new("Q1", "a"), PinInput::new("Q2", "b"))
            .make(&mut design, &PathPlanner::default())
            .unwrap();
        design
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(200.0), "200");
        assert_eq!(fmt_num(202.70000000000002), "202.7");
        assert_eq!(fmt_num(-0.0001), "0");
        assert_eq!(fmt_num(-12.5), "-12.5");
    }

    #[test]
    fn test_path_to_d() {
        let path = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ];
        assert_eq!(path_to_d(&path), "M0 0 L100 0 L100 100");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
    }

    #[test]
    fn test_render_empty_design() {
        let svg = render_svg(&Design::new(), &SvgConfig::default());
        assert!(svg.contains(r#"viewBox="-20 -20 40 40""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_render_flips_y_and_scales() {
        let svg = render_svg(&routed(), &SvgConfig::default());

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="-20 -220 740 240""#));
        assert!(svg.contains(r#"<g id="Q1" class="cpw-component">"#));
        assert!(svg.contains(r#"x="0" y="-200" width="200" height="200""#));
        assert!(svg.contains(r#"d="M200 -100 L202.7 -100 L497.3 -100 L500 -100""#));
    }

    #[test]
    fn test_gnd_cut_drawn_before_trace() {
        let svg = render_svg(&routed(), &SvgConfig::default());
        let cut = svg.find("cpw-gnd-cut\"").unwrap();
        let trace = svg.find("cpw-trace\"").unwrap();
        assert!(cut < trace);
        assert!(svg.contains(r#"class="cpw-gnd-cut" d="M200"#));
        assert!(svg.contains(r#"stroke-width="2.2""#));
    }

    #[test]
    fn test_compact_output() {
        let config = SvgConfig::new()
            .with_pretty_print(false)
            .with_standalone(false)
            .without_class_prefix();
        let svg = render_svg(&routed(), &config);
        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains('\n'));
        assert!(svg.contains(r#"class="trace""#));
    }
}
