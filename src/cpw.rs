//! Auto-routed straight-segment CPW connector
//!
//! [`CpwAutoStraightLine`] looks up two pins in a [`Design`], plans a
//! centreline between them with the routing planner and writes the result
//! back: a connector component with a `center_trace` and a `gnd_cut` path,
//! two pins facing back at the host pins, and nets joining each pair.
//! Either every update lands or none does.

use serde::Deserialize;

use crate::design::{
    parse_layer, ComponentId, ComponentKind, Design, DesignError, PathShape, PinRef,
};
use crate::log::debug;
use crate::routing::{lint, LintWarning, PathPlanner, Route, RouteRequest};

/// Name of the connector pin facing the start pin
pub const START_PIN: &str = "auto_cpw_start";
/// Name of the connector pin facing the end pin
pub const END_PIN: &str = "auto_cpw_end";

fn default_lead() -> String {
    "22um".to_string()
}

/// Lead-in lengths at each end
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LeadIn {
    pub start: String,
    pub end: String,
}

impl Default for LeadIn {
    fn default() -> Self {
        Self {
            start: default_lead(),
            end: default_lead(),
        }
    }
}

/// Connector options; values are lengths or design variable names
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CpwOptions {
    pub cpw_width: String,
    pub cpw_gap: String,
    pub layer: String,
    pub leadin: LeadIn,
}

impl Default for CpwOptions {
    fn default() -> Self {
        Self {
            cpw_width: "cpw_width".to_string(),
            cpw_gap: "cpw_gap".to_string(),
            layer: "1".to_string(),
            leadin: LeadIn::default(),
        }
    }
}

impl CpwOptions {
    pub fn with_width(mut self, width: impl Into<String>) -> Self {
        self.cpw_width = width.into();
        self
    }

    pub fn with_gap(mut self, gap: impl Into<String>) -> Self {
        self.cpw_gap = gap.into();
        self
    }

    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.layer = layer.into();
        self
    }

    pub fn with_leads(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.leadin = LeadIn {
            start: start.into(),
            end: end.into(),
        };
        self
    }

    fn resolve(&self, design: &Design) -> Result<Resolved, DesignError> {
        Ok(Resolved {
            width: design.parse_value(&self.cpw_width)?,
            gap: design.parse_value(&self.cpw_gap)?,
            layer: parse_layer(&self.layer)?,
            lead_start: design.parse_value(&self.leadin.start)?,
            lead_end: design.parse_value(&self.leadin.end)?,
        })
    }
}

struct Resolved {
    width: f64,
    gap: f64,
    layer: u32,
    lead_start: f64,
    lead_end: f64,
}

/// One end of a connector, by component and pin name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PinInput {
    pub component: String,
    pub pin: String,
}

impl PinInput {
    pub fn new(component: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            pin: pin.into(),
        }
    }
}

/// What `make` added to the design
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub id: ComponentId,
    pub name: String,
    pub start: PinInput,
    pub end: PinInput,
    pub route: Route,
    pub width: f64,
    pub gap: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CpwAutoStraightLine {
    pub name: String,
    pub start: PinInput,
    pub end: PinInput,
    pub options: CpwOptions,
}

impl CpwAutoStraightLine {
    pub fn new(name: impl Into<String>, start: PinInput, end: PinInput) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            options: CpwOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CpwOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the routing request from the design's pins and options
    pub fn request(&self, design: &Design) -> Result<RouteRequest, DesignError> {
        let opts = self.options.resolve(design)?;
        self.request_with(design, &opts)
    }

    fn request_with(&self, design: &Design, opts: &Resolved) -> Result<RouteRequest, DesignError> {
        let (c1, p1) = design.pin(&self.start.component, &self.start.pin)?;
        let (c2, p2) = design.pin(&self.end.component, &self.end.pin)?;
        Ok(
            RouteRequest::new(p1.as_pin(), c1.bounds, p2.as_pin(), c2.bounds)
                .with_width(opts.width)
                .with_leads(opts.lead_start, opts.lead_end),
        )
    }

    /// Check the request against the planner's placement assumptions
    pub fn lint(&self, design: &Design) -> Result<Vec<LintWarning>, DesignError> {
        Ok(lint::check(&self.request(design)?))
    }

    /// Route the connector and register it in the design
    pub fn make(
        &self,
        design: &mut Design,
        planner: &PathPlanner,
    ) -> Result<Connector, DesignError> {
        let opts = self.options.resolve(design)?;
        let req = self.request_with(design, &opts)?;

        let (start_id, start_pin) = {
            let (c, p) = design.pin(&self.start.component, &self.start.pin)?;
            (c.id, p.clone())
        };
        let (end_id, end_pin) = {
            let (c, p) = design.pin(&self.end.component, &self.end.pin)?;
            (c.id, p.clone())
        };

        let start_ref = PinRef::new(start_id, start_pin.name.clone());
        let end_ref = PinRef::new(end_id, end_pin.name.clone());
        if start_ref == end_ref {
            return Err(DesignError::InvalidPin {
                component: self.start.component.clone(),
                pin: self.start.pin.clone(),
                reason: "a connector cannot start and end on the same pin".to_string(),
            });
        }
        design.ensure_unconnected(&start_ref)?;
        design.ensure_unconnected(&end_ref)?;
        design.ensure_name_free(&self.name)?;

        let route = planner.plan(&req);
        debug!(name = %self.name, length = route.length(), "routed connector");

        // Nothing below can fail once the checks above have passed
        let cut_width = opts.width + 2.0 * opts.gap;
        let bounds = route
            .bounds()
            .unwrap_or(req.start_bounds)
            .expand(cut_width / 2.0);
        let id = design.insert_component(self.name.clone(), ComponentKind::Connector, bounds)?;

        design.add_path(PathShape {
            name: "center_trace".to_string(),
            component: id,
            points: route.points.clone(),
            width: opts.width,
            layer: opts.layer,
            subtract: false,
        });
        design.add_path(PathShape {
            name: "gnd_cut".to_string(),
            component: id,
            points: route.points.clone(),
            width: cut_width,
            layer: opts.layer,
            subtract: true,
        });

        design.add_pin(id, start_pin.reversed(START_PIN, opts.width))?;
        design.add_pin(id, end_pin.reversed(END_PIN, opts.width))?;
        design.connect(start_ref, PinRef::new(id, START_PIN))?;
        design.connect(end_ref, PinRef::new(id, END_PIN))?;

        Ok(Connector {
            id,
            name: self.name.clone(),
            start: self.start.clone(),
            end: self.end.clone(),
            route,
            width: opts.width,
            gap: opts.gap,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::PinRecord;
    use crate::routing::{BoundingBox, Point, Segments};
    use pretty_assertions::assert_eq;

    fn design() -> Design {
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
        design
    }

    fn line() -> CpwAutoStraightLine {
        CpwAutoStraightLine::new("cpw1", PinInput::new("Q1", "a"), PinInput::new("Q2", "b"))
    }

    #[test]
    fn test_default_options() {
        let opts = CpwOptions::default();
        assert_eq!(opts.cpw_width, "cpw_width");
        assert_eq!(opts.cpw_gap, "cpw_gap");
        assert_eq!(opts.layer, "1");
        assert_eq!(opts.leadin.start, "22um");
        assert_eq!(opts.leadin.end, "22um");
    }

    #[test]
    fn test_make_registers_geometry_pins_and_nets() {
        let mut design = design();
        let connector = line().make(&mut design, &PathPlanner::default()).unwrap();

        assert_eq!(connector.route.segments, Segments::One);
        assert_eq!(connector.width, 0.01);
        assert_eq!(connector.gap, 0.006);

        let shapes: Vec<_> = design.paths_of(connector.id).collect();
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].name, "center_trace");
        assert!(!shapes[0].subtract);
        assert_eq!(shapes[1].name, "gnd_cut");
        assert!(shapes[1].subtract);
        assert_eq!(shapes[1].width, 0.01 + 2.0 * 0.006);
        assert_eq!(shapes[0].points, connector.route.points);
        assert_eq!(shapes[0].layer, 1);

        let component = design.component(connector.id).unwrap();
        assert_eq!(component.kind, ComponentKind::Connector);
        let start = component.pin(START_PIN).unwrap();
        assert_eq!(start.normal, Point::NEG_X);
        assert_eq!(start.middle, Point::new(2.0, 1.0));
        let end = component.pin(END_PIN).unwrap();
        assert_eq!(end.normal, Point::X);

        assert_eq!(design.netlist().len(), 2);
    }

    #[test]
    fn test_second_make_on_same_pins_fails_without_changes() {
        let mut design = design();
        line().make(&mut design, &PathPlanner::default()).unwrap();
        let before = design.geometry().len();

        let again =
            CpwAutoStraightLine::new("cpw2", PinInput::new("Q1", "a"), PinInput::new("Q2", "b"));
        let err = again.make(&mut design, &PathPlanner::default()).unwrap_err();
        assert!(matches!(err, DesignError::PinAlreadyConnected { .. }));
        assert_eq!(design.geometry().len(), before);
        assert!(design.component_by_name("cpw2").is_err());
        assert_eq!(design.netlist().len(), 2);
    }

    #[test]
    fn test_unknown_pin_leaves_design_untouched() {
        let mut design = design();
        let bad = CpwAutoStraightLine::new(
            "cpw1",
            PinInput::new("Q1", "z"),
            PinInput::new("Q2", "b"),
        );
        let err = bad.make(&mut design, &PathPlanner::default()).unwrap_err();
        assert!(matches!(err, DesignError::UnknownPin { .. }));
        assert!(design.geometry().is_empty());
        assert!(design.netlist().is_empty());
    }

    #[test]
    fn test_options_resolve_through_variables() {
        let mut design = design();
        design.set_variable("trace", "20um");
        let line = line().with_options(
            CpwOptions::default()
                .with_width("trace")
                .with_gap("4 um")
                .with_layer("3")
                .with_leads("0", "0"),
        );
        let req = line.request(&design).unwrap();
        assert_eq!(req.width, 0.02);
        assert_eq!(req.lead_start, 0.0);

        let connector = line.make(&mut design, &PathPlanner::default()).unwrap();
        assert_eq!(connector.gap, 0.004);
        assert!(design.paths_of(connector.id).all(|s| s.layer == 3));
    }

    #[test]
    fn test_bad_option_is_reported() {
        let design = design();
        let line = line().with_options(CpwOptions::default().with_gap("wide"));
        assert_eq!(
            line.request(&design).unwrap_err(),
            DesignError::UnknownVariable("wide".to_string())
        );
    }

    #[test]
    fn test_same_pin_at_both_ends() {
        let mut design = design();
        let line =
            CpwAutoStraightLine::new("loop", PinInput::new("Q1", "a"), PinInput::new("Q1", "a"));
        let err = line.make(&mut design, &PathPlanner::default()).unwrap_err();
        assert!(matches!(err, DesignError::InvalidPin { .. }));
        assert!(design.netlist().is_empty());
    }

    #[test]
    fn test_lint_clean_pair() {
        assert!(line().lint(&design()).unwrap().is_empty());
    }
}
