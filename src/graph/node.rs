use super::slot::{InputSlot, OutputSlot};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A visual node id. Editors emit both numeric and string ids; two ids are the
/// same node when their string forms match, as they would as JSON object keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeId {
    Int(i64),
    Str(String),
}

impl NodeId {
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Int(n) => write!(f, "{}", n),
            NodeId::Str(s) => write!(f, "{}", s),
        }
    }
}

impl PartialEq for NodeId {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NodeId::Int(a), NodeId::Int(b)) => a == b,
            (NodeId::Str(a), NodeId::Str(b)) => a == b,
            _ => self.key() == other.key(),
        }
    }
}

impl Eq for NodeId {}

impl From<i64> for NodeId {
    fn from(id: i64) -> Self {
        NodeId::Int(id)
    }
}

impl From<i32> for NodeId {
    fn from(id: i32) -> Self {
        NodeId::Int(id.into())
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId::Str(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId::Str(id)
    }
}

/// Execution mode of a visual node.
///
/// Only `Never` (muted) and `Bypass` change how a node is translated; the
/// remaining modes execute normally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum NodeMode {
    #[default]
    Always,
    OnEvent,
    /// Muted: excluded from execution with no pass-through.
    Never,
    OnTrigger,
    /// Excluded from execution; consumers are rewired to its upstream producers.
    Bypass,
    Other(i64),
}

impl NodeMode {
    pub fn is_muted(self) -> bool {
        self == NodeMode::Never
    }

    pub fn is_bypassed(self) -> bool {
        self == NodeMode::Bypass
    }

    /// Whether a node in this mode becomes part of the execution format.
    pub fn is_executed(self) -> bool {
        !self.is_muted() && !self.is_bypassed()
    }
}

impl From<i64> for NodeMode {
    fn from(mode: i64) -> Self {
        match mode {
            0 => NodeMode::Always,
            1 => NodeMode::OnEvent,
            2 => NodeMode::Never,
            3 => NodeMode::OnTrigger,
            4 => NodeMode::Bypass,
            other => NodeMode::Other(other),
        }
    }
}

impl From<NodeMode> for i64 {
    fn from(mode: NodeMode) -> Self {
        match mode {
            NodeMode::Always => 0,
            NodeMode::OnEvent => 1,
            NodeMode::Never => 2,
            NodeMode::OnTrigger => 3,
            NodeMode::Bypass => 4,
            NodeMode::Other(other) => other,
        }
    }
}

/// A node of the visual graph.
///
/// `flags`, `properties` and `widgets_values` belong to the editor and are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: NodeId,
    pub node_type: String,
    pub pos: [f64; 2],
    pub size: [f64; 2],
    pub flags: Map<String, Value>,
    /// Position in the last computed execution order.
    pub order: i64,
    pub mode: NodeMode,
    pub inputs: Vec<InputSlot>,
    pub outputs: Vec<OutputSlot>,
    pub properties: Map<String, Value>,
    pub widgets_values: Value,
}

impl GraphNode {
    pub fn new(id: impl Into<NodeId>, node_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            node_type: node_type.into(),
            pos: [0.0, 0.0],
            size: [0.0, 0.0],
            flags: Map::new(),
            order: 0,
            mode: NodeMode::Always,
            inputs: Vec::new(),
            outputs: Vec::new(),
            properties: Map::new(),
            widgets_values: Value::Array(Vec::new()),
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<InputSlot>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<OutputSlot>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_mode(mut self, mode: NodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Index of the input slot called `name`.
    pub fn find_input_slot(&self, name: &str) -> Option<usize> {
        self.inputs.iter().position(|slot| slot.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_compares_by_key() {
        assert_eq!(NodeId::Int(5), NodeId::Str("5".to_string()));
        assert_ne!(NodeId::Int(5), NodeId::Int(6));
        assert_eq!(NodeId::from("sampler").key(), "sampler");
    }

    #[test]
    fn test_node_mode_round_trips_reserved_values() {
        assert_eq!(NodeMode::from(4), NodeMode::Bypass);
        assert_eq!(NodeMode::from(7), NodeMode::Other(7));
        assert_eq!(i64::from(NodeMode::Other(7)), 7);
        assert!(NodeMode::OnEvent.is_executed());
        assert!(!NodeMode::Never.is_executed());
    }
}
