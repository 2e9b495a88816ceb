//! Two-pin nets between component pins

use super::types::ComponentId;

/// A pin addressed by component handle and pin name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PinRef {
    pub component: ComponentId,
    pub pin: String,
}

impl PinRef {
    pub fn new(component: ComponentId, pin: impl Into<String>) -> Self {
        Self {
            component,
            pin: pin.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Net {
    pub id: u32,
    pub a: PinRef,
    pub b: PinRef,
}

impl Net {
    pub fn contains(&self, pin: &PinRef) -> bool {
        &self.a == pin || &self.b == pin
    }
}

/// Connectivity table; each pin belongs to at most one net
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Netlist {
    nets: Vec<Net>,
    next_id: u32,
}

impl Netlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Net id the pin already belongs to, if any
    pub fn net_of(&self, pin: &PinRef) -> Option<u32> {
        self.nets.iter().find(|n| n.contains(pin)).map(|n| n.id)
    }

    /// Record a net; callers check `net_of` on both pins first
    pub(crate) fn push(&mut self, a: PinRef, b: PinRef) -> u32 {
        self.next_id += 1;
        let id = self.next_id;
        self.nets.push(Net { id, a, b });
        id
    }

    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    pub fn len(&self) -> usize {
        self.nets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_net_ids_start_at_one() {
        let mut netlist = Netlist::new();
        let a = PinRef::new(ComponentId(1), "a");
        let b = PinRef::new(ComponentId(2), "b");
        assert_eq!(netlist.push(a.clone(), b.clone()), 1);
        assert_eq!(netlist.net_of(&a), Some(1));
        assert_eq!(netlist.net_of(&b), Some(1));
        assert_eq!(netlist.net_of(&PinRef::new(ComponentId(1), "b")), None);
        assert_eq!(netlist.len(), 1);
    }
}
