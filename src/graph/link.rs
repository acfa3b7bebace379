use super::node::NodeId;
use super::slot::SlotType;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type LinkId = u64;

/// A directed connection from an output slot to an input slot.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphLink {
    pub id: LinkId,
    pub link_type: SlotType,
    pub src_id: NodeId,
    pub src_slot: usize,
    pub dst_id: NodeId,
    pub dst_slot: usize,
}

/// A titled box drawn around nodes in the editor. Never interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphGroup {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub bounding: [f64; 4],
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub locked: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
