use super::link::{GraphGroup, LinkId};
use super::node::{GraphNode, NodeId, NodeMode};
use super::slot::{InputSlot, OutputSlot, SlotType};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Visual graph as saved by the editor.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGraph {
    #[serde(default)]
    pub last_node_id: Option<NodeId>,
    #[serde(default)]
    pub last_link_id: Option<LinkId>,
    pub nodes: Vec<RawNode>,
    #[serde(default)]
    pub links: Vec<RawLink>,
    #[serde(default)]
    pub groups: Option<Vec<GraphGroup>>,
    #[serde(default)]
    pub config: Option<Map<String, Value>>,
    #[serde(default)]
    pub extra: Option<Map<String, Value>>,
    #[serde(default)]
    pub version: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(default)]
    pub pos: RawVector2,
    #[serde(default)]
    pub size: RawVector2,
    #[serde(default)]
    pub flags: Map<String, Value>,
    #[serde(default)]
    pub order: i64,
    #[serde(default)]
    pub mode: NodeMode,
    #[serde(default)]
    pub inputs: Option<Vec<InputSlot>>,
    #[serde(default)]
    pub outputs: Option<Vec<OutputSlot>>,
    #[serde(default)]
    pub properties: Map<String, Value>,
    #[serde(default = "empty_widgets")]
    pub widgets_values: Value,
}

/// Older editor versions write sizes as `{"0": w, "1": h}`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum RawVector2 {
    Array([f64; 2]),
    Object {
        #[serde(rename = "0")]
        x: f64,
        #[serde(rename = "1")]
        y: f64,
    },
}

impl Default for RawVector2 {
    fn default() -> Self {
        RawVector2::Array([0.0, 0.0])
    }
}

impl From<RawVector2> for [f64; 2] {
    fn from(raw: RawVector2) -> Self {
        match raw {
            RawVector2::Array(v) => v,
            RawVector2::Object { x, y } => [x, y],
        }
    }
}

/// `[id, src_id, src_slot, dst_id, dst_slot, type]`. Endpoints may be null in
/// graphs saved mid-edit.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLink(
    pub LinkId,
    pub Option<NodeId>,
    pub Option<usize>,
    pub Option<NodeId>,
    pub Option<usize>,
    pub Option<SlotType>,
);

fn empty_widgets() -> Value {
    Value::Array(Vec::new())
}

impl From<RawNode> for GraphNode {
    fn from(raw: RawNode) -> Self {
        GraphNode {
            id: raw.id,
            node_type: raw.node_type,
            pos: raw.pos.into(),
            size: raw.size.into(),
            flags: raw.flags,
            order: raw.order,
            mode: raw.mode,
            inputs: raw.inputs.unwrap_or_default(),
            outputs: raw.outputs.unwrap_or_default(),
            properties: raw.properties,
            widgets_values: raw.widgets_values,
        }
    }
}
