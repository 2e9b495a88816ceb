//! Design model: components, pins, design variables, geometry and netlist
//!
//! A [`Design`] is the host that connectors read pin geometry from and
//! write their traces back into. Lookups by name return [`DesignError`]
//! with "did you mean" suggestions on a miss.

pub mod error;
pub mod netlist;
pub mod types;
pub mod units;

use std::collections::{BTreeMap, HashMap};

pub use error::DesignError;
pub use netlist::{Net, Netlist, PinRef};
pub use types::{Component, ComponentId, ComponentKind, PathShape, PinRecord};
pub use units::{parse_layer, parse_length};

use crate::log::debug;
use crate::routing::BoundingBox;

/// Variables every new design starts with
pub const DEFAULT_VARIABLES: [(&str, &str); 2] = [("cpw_width", "10 um"), ("cpw_gap", "6 um")];

#[derive(Debug, Clone)]
pub struct Design {
    variables: BTreeMap<String, String>,
    components: BTreeMap<ComponentId, Component>,
    names: HashMap<String, ComponentId>,
    geometry: Vec<PathShape>,
    netlist: Netlist,
    next_id: u32,
}

impl Default for Design {
    fn default() -> Self {
        Self::new()
    }
}

impl Design {
    pub fn new() -> Self {
        Self {
            variables: DEFAULT_VARIABLES
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            components: BTreeMap::new(),
            names: HashMap::new(),
            geometry: Vec::new(),
            netlist: Netlist::new(),
            next_id: 0,
        }
    }

    pub fn set_variable(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(name.into(), value.into());
    }

    pub fn variables(&self) -> &BTreeMap<String, String> {
        &self.variables
    }

    /// Resolve a length option, following variable references, into mm
    pub fn parse_value(&self, text: &str) -> Result<f64, DesignError> {
        units::resolve_length(&self.variables, text)
    }

    /// Add a user-placed component
    pub fn add_component(
        &mut self,
        name: impl Into<String>,
        bounds: BoundingBox,
    ) -> Result<ComponentId, DesignError> {
        self.insert_component(name.into(), ComponentKind::Placed, bounds)
    }

    pub(crate) fn insert_component(
        &mut self,
        name: String,
        kind: ComponentKind,
        bounds: BoundingBox,
    ) -> Result<ComponentId, DesignError> {
        self.ensure_name_free(&name)?;
        self.next_id += 1;
        let id = ComponentId(self.next_id);
        debug!(%id, name = %name, "adding component");
        self.names.insert(name.clone(), id);
        self.components
            .insert(id, Component::new(id, name, kind, bounds));
        Ok(id)
    }

    /// Attach or replace a pin on a component
    pub fn add_pin(&mut self, id: ComponentId, pin: PinRecord) -> Result<(), DesignError> {
        let component = self
            .components
            .get_mut(&id)
            .ok_or_else(|| DesignError::unknown_component(id.to_string(), Vec::new()))?;
        component.pins.insert(pin.name.clone(), pin);
        Ok(())
    }

    pub fn ensure_name_free(&self, name: &str) -> Result<(), DesignError> {
        if self.names.contains_key(name) {
            return Err(DesignError::DuplicateComponent(name.to_string()));
        }
        Ok(())
    }

    pub fn component(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(&id)
    }

    /// Look up a component by name
    pub fn component_by_name(&self, name: &str) -> Result<&Component, DesignError> {
        self.names
            .get(name)
            .and_then(|id| self.components.get(id))
            .ok_or_else(|| {
                let suggestions = find_similar(self.names.keys(), name, 2);
                DesignError::unknown_component(name, suggestions)
            })
    }

    /// Look up a pin by component and pin name
    pub fn pin(&self, component: &str, pin: &str) -> Result<(&Component, &PinRecord), DesignError> {
        let comp = self.component_by_name(component)?;
        let record = comp.pin(pin).ok_or_else(|| {
            let suggestions = find_similar(comp.pins.keys(), pin, 2);
            DesignError::unknown_pin(component, pin, suggestions)
        })?;
        Ok((comp, record))
    }

    /// Components in insertion order
    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    /// Fail if the pin already belongs to a net
    pub fn ensure_unconnected(&self, pin: &PinRef) -> Result<(), DesignError> {
        match self.netlist.net_of(pin) {
            Some(net) => Err(DesignError::PinAlreadyConnected {
                component: self.display_name(pin.component),
                pin: pin.pin.clone(),
                net,
            }),
            None => Ok(()),
        }
    }

    /// Join two pins in a new net
    pub fn connect(&mut self, a: PinRef, b: PinRef) -> Result<u32, DesignError> {
        self.ensure_unconnected(&a)?;
        self.ensure_unconnected(&b)?;
        let net = self.netlist.push(a, b);
        debug!(net, "connected pins");
        Ok(net)
    }

    pub fn netlist(&self) -> &Netlist {
        &self.netlist
    }

    pub fn add_path(&mut self, shape: PathShape) {
        self.geometry.push(shape);
    }

    pub fn geometry(&self) -> &[PathShape] {
        &self.geometry
    }

    /// Geometry owned by one component
    pub fn paths_of(&self, id: ComponentId) -> impl Iterator<Item = &PathShape> {
        self.geometry.iter().filter(move |s| s.component == id)
    }

    fn display_name(&self, id: ComponentId) -> String {
        self.components
            .get(&id)
            .map(|c| c.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}

/// Calculate Levenshtein distance between two strings
fn levenshtein_distance(a: &str, b: &str) -> usize {
    let b_chars: Vec<char> = b.chars().collect();
    let mut prev: Vec<usize> = (0..=b_chars.len()).collect();

    for (i, ca) in a.chars().enumerate() {
        let mut row = Vec::with_capacity(prev.len());
        row.push(i + 1);
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != *cb);
            row.push((prev[j] + cost).min(prev[j + 1] + 1).min(row[j] + 1));
        }
        prev = row;
    }

    prev[b_chars.len()]
}

/// Find names similar to `target`, closest first, at most three
fn find_similar<'a>(
    names: impl IntoIterator<Item = &'a String>,
    target: &str,
    max_distance: usize,
) -> Vec<String> {
    let mut candidates: Vec<(&String, usize)> = names
        .into_iter()
        .map(|name| (name, levenshtein_distance(name, target)))
        .filter(|(_, d)| *d > 0 && *d <= max_distance)
        .collect();

    candidates.sort_by(|(a, da), (b, db)| da.cmp(db).then_with(|| a.cmp(b)));
    candidates
        .into_iter()
        .map(|(name, _)| name.clone())
        .take(3)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::Point;

    fn two_qubits() -> Design {
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

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein_distance("hello", "hello"), 0);
        assert_eq!(levenshtein_distance("Q1", "Q2"), 1);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn test_default_variables() {
        let design = Design::new();
        assert_eq!(design.parse_value("cpw_width").unwrap(), 0.01);
        assert_eq!(design.parse_value("cpw_gap").unwrap(), 0.006);
    }

    #[test]
    fn test_unknown_component_suggests() {
        let design = two_qubits();
        let err = design.component_by_name("Q3").unwrap_err();
        assert_eq!(
            err,
            DesignError::unknown_component("Q3", vec!["Q1".to_string(), "Q2".to_string()])
        );
    }

    #[test]
    fn test_unknown_pin_suggests() {
        let design = two_qubits();
        let err = design.pin("Q1", "aa").unwrap_err();
        assert_eq!(
            err,
            DesignError::unknown_pin("Q1", "aa", vec!["a".to_string()])
        );
    }

    #[test]
    fn test_duplicate_component() {
        let mut design = two_qubits();
        let err = design
            .add_component("Q1", BoundingBox::new(0.0, 0.0, 1.0, 1.0))
            .unwrap_err();
        assert_eq!(err, DesignError::DuplicateComponent("Q1".to_string()));
    }

    #[test]
    fn test_connect_twice_fails() {
        let mut design = two_qubits();
        let q1 = design.component_by_name("Q1").unwrap().id;
        let q2 = design.component_by_name("Q2").unwrap().id;

        let net = design
            .connect(PinRef::new(q1, "a"), PinRef::new(q2, "b"))
            .unwrap();
        assert_eq!(net, 1);

        let err = design
            .connect(PinRef::new(q2, "b"), PinRef::new(q1, "a"))
            .unwrap_err();
        assert_eq!(
            err,
            DesignError::PinAlreadyConnected {
                component: "Q2".to_string(),
                pin: "b".to_string(),
                net: 1,
            }
        );
        assert_eq!(design.netlist().len(), 1);
    }
}
