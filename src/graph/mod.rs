//! The visual graph: nodes with ordered slots, first-class links, groups and
//! editor blobs, as produced by a node editor.

use crate::config::SlotTypePolicy;
use crate::error::GraphError;
use ahash::AHashMap;
use log::debug;
use serde_json::{Map, Value};

mod format;
mod link;
mod node;
pub mod scheduler;
mod slot;

pub use format::*;
pub use link::*;
pub use node::*;
pub use slot::*;

/// An editable visual graph.
///
/// Nodes keep the order in which they were loaded or added; that order is the
/// graph's natural iteration order. Slots reference links by id only, so every
/// link lookup may come back empty.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    last_node_id: Option<NodeId>,
    last_link_id: Option<LinkId>,
    nodes: Vec<GraphNode>,
    node_index: AHashMap<String, usize>,
    links: AHashMap<LinkId, GraphLink>,
    groups: Vec<GraphGroup>,
    config: Map<String, Value>,
    extra: Map<String, Value>,
    version: f64,
    slot_type_policy: SlotTypePolicy,
}

/// Configures a `Graph` before it is loaded.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    slot_type_policy: SlotTypePolicy,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot_type_policy(mut self, policy: SlotTypePolicy) -> Self {
        self.slot_type_policy = policy;
        self
    }

    pub fn build(self) -> Graph {
        Graph {
            slot_type_policy: self.slot_type_policy,
            ..Graph::default()
        }
    }
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    pub fn from_json_str(json: &str) -> Result<Self, GraphError> {
        let raw: RawGraph =
            serde_json::from_str(json).map_err(|e| GraphError::JsonParseError(e.to_string()))?;
        let mut graph = Self::new();
        graph.deserialize(raw)?;
        Ok(graph)
    }

    pub fn from_value(json: Value) -> Result<Self, GraphError> {
        let mut graph = Self::new();
        graph.deserialize_value(json)?;
        Ok(graph)
    }

    /// Resets all state, including the id counters. The slot type policy is kept.
    pub fn clear(&mut self) -> &mut Self {
        *self = Self {
            slot_type_policy: self.slot_type_policy,
            ..Self::default()
        };
        self
    }

    pub fn deserialize_value(&mut self, json: Value) -> Result<&mut Self, GraphError> {
        let raw: RawGraph =
            serde_json::from_value(json).map_err(|e| GraphError::JsonParseError(e.to_string()))?;
        self.deserialize(raw)
    }

    /// Replaces the graph with `raw`.
    ///
    /// Links with a null endpoint, or whose endpoint node does not exist, are
    /// dropped.
    pub fn deserialize(&mut self, raw: RawGraph) -> Result<&mut Self, GraphError> {
        if self.slot_type_policy == SlotTypePolicy::NamedOnly {
            Self::check_named_slots(&raw)?;
        }

        self.clear();
        self.last_node_id = raw.last_node_id;
        self.last_link_id = raw.last_link_id;

        for raw_node in raw.nodes {
            self.insert_node(raw_node.into());
        }

        let mut dropped = 0usize;
        for RawLink(id, src_id, src_slot, dst_id, dst_slot, link_type) in raw.links {
            let (Some(src_id), Some(src_slot), Some(dst_id), Some(dst_slot)) =
                (src_id, src_slot, dst_id, dst_slot)
            else {
                debug!("Dropping link {}: null endpoint", id);
                dropped += 1;
                continue;
            };
            if self.get_node_by_id(&src_id).is_none() || self.get_node_by_id(&dst_id).is_none() {
                debug!(
                    "Dropping link {}: endpoint node '{}' or '{}' not found",
                    id, src_id, dst_id
                );
                dropped += 1;
                continue;
            }
            let link = GraphLink {
                id,
                link_type: link_type.unwrap_or(SlotType::Any),
                src_id,
                src_slot,
                dst_id,
                dst_slot,
            };
            self.links.insert(id, link);
        }

        self.groups = raw.groups.unwrap_or_default();
        if let Some(config) = raw.config {
            self.config = config;
        }
        if let Some(extra) = raw.extra {
            self.extra = extra;
        }
        self.version = raw.version;

        debug!(
            "Loaded graph with {} nodes, {} links ({} dropped), {} groups",
            self.nodes.len(),
            self.links.len(),
            dropped,
            self.groups.len()
        );
        Ok(self)
    }

    fn check_named_slots(raw: &RawGraph) -> Result<(), GraphError> {
        for node in &raw.nodes {
            let inputs = node.inputs.iter().flatten().map(|s| (&s.name, &s.slot_type));
            let outputs = node.outputs.iter().flatten().map(|s| (&s.name, &s.slot_type));
            if let Some((name, _)) = inputs.chain(outputs).find(|(_, t)| t.is_wildcard()) {
                return Err(GraphError::WildcardSlotType {
                    node_id: node.id.to_string(),
                    slot: name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Inserts `node`, replacing any node with the same id in place.
    fn insert_node(&mut self, node: GraphNode) -> &mut GraphNode {
        let key = node.id.key();
        let index = match self.node_index.get(&key) {
            Some(&index) => {
                self.nodes[index] = node;
                index
            }
            None => {
                self.nodes.push(node);
                self.node_index.insert(key, self.nodes.len() - 1);
                self.nodes.len() - 1
            }
        };
        &mut self.nodes[index]
    }

    /// Adds a node built programmatically and advances `last_node_id` past
    /// numeric ids.
    pub fn add_node(&mut self, node: GraphNode) -> &mut GraphNode {
        if let NodeId::Int(id) = node.id {
            let newer = match self.last_node_id {
                Some(NodeId::Int(last)) => id > last,
                _ => true,
            };
            if newer {
                self.last_node_id = Some(NodeId::Int(id));
            }
        }
        self.insert_node(node)
    }

    pub(crate) fn index_of(&self, id: &NodeId) -> Option<usize> {
        self.node_index.get(&id.key()).copied()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn get_node_by_id(&self, id: &NodeId) -> Option<&GraphNode> {
        self.index_of(id).map(|index| &self.nodes[index])
    }

    pub fn get_node_by_id_mut(&mut self, id: &NodeId) -> Option<&mut GraphNode> {
        match self.index_of(id) {
            Some(index) => Some(&mut self.nodes[index]),
            None => None,
        }
    }

    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    pub fn get_link(&self, id: LinkId) -> Option<&GraphLink> {
        self.links.get(&id)
    }

    /// All links, in no particular order.
    pub fn links(&self) -> impl Iterator<Item = &GraphLink> {
        self.links.values()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn groups(&self) -> &[GraphGroup] {
        &self.groups
    }

    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn version(&self) -> f64 {
        self.version
    }

    pub fn last_node_id(&self) -> Option<&NodeId> {
        self.last_node_id.as_ref()
    }

    pub fn last_link_id(&self) -> Option<LinkId> {
        self.last_link_id
    }

    /// The link feeding input `slot` of `node`, if the slot exists, is
    /// connected, and its link is known to the graph.
    pub fn get_input_link(&self, node: &GraphNode, slot: usize) -> Option<&GraphLink> {
        let link_id = node.inputs.get(slot)?.link?;
        self.links.get(&link_id)
    }

    /// The node feeding input `slot` of `node`.
    pub fn get_input_node(&self, node: &GraphNode, slot: usize) -> Option<&GraphNode> {
        let link = self.get_input_link(node, slot)?;
        self.get_node_by_id(&link.src_id)
    }

    /// Connects output `src_slot` of `src_id` to input `dst_slot` of `dst_id`.
    ///
    /// Any link already feeding the destination slot is removed first. Returns
    /// `None` without touching the graph for self-loops, unknown nodes and
    /// out-of-range slots.
    pub fn connect(
        &mut self,
        src_id: &NodeId,
        src_slot: usize,
        dst_id: &NodeId,
        dst_slot: usize,
    ) -> Option<LinkId> {
        if src_id == dst_id {
            debug!("Rejecting self-loop on node '{}'", src_id);
            return None;
        }
        let (Some(src), Some(dst)) = (self.index_of(src_id), self.index_of(dst_id)) else {
            debug!("Rejecting link '{}' -> '{}': node not found", src_id, dst_id);
            return None;
        };
        let (Some(src_output), Some(dst_input)) = (
            self.nodes[src].outputs.get(src_slot),
            self.nodes[dst].inputs.get(dst_slot),
        ) else {
            debug!(
                "Rejecting link '{}'[{}] -> '{}'[{}]: slot out of range",
                src_id, src_slot, dst_id, dst_slot
            );
            return None;
        };

        let link_type = if dst_input.slot_type.is_wildcard() {
            src_output.slot_type.clone()
        } else {
            dst_input.slot_type.clone()
        };

        if let Some(previous) = self.nodes[dst].inputs[dst_slot].link.take() {
            self.detach_link(previous);
        }

        let id = self.next_link_id();
        let link = GraphLink {
            id,
            link_type,
            src_id: self.nodes[src].id.clone(),
            src_slot,
            dst_id: self.nodes[dst].id.clone(),
            dst_slot,
        };
        self.links.insert(id, link);
        self.nodes[src].outputs[src_slot].links.push(id);
        self.nodes[dst].inputs[dst_slot].link = Some(id);
        Some(id)
    }

    /// Removes link `id` from the link table and from its source output slot.
    fn detach_link(&mut self, id: LinkId) {
        let Some(link) = self.links.remove(&id) else {
            return;
        };
        if let Some(src) = self.index_of(&link.src_id) {
            if let Some(output) = self.nodes[src].outputs.get_mut(link.src_slot) {
                output.links.retain(|&l| l != id);
            }
        }
    }

    fn next_link_id(&mut self) -> LinkId {
        let mut id = self.last_link_id.unwrap_or(0);
        loop {
            id += 1;
            if !self.links.contains_key(&id) {
                break;
            }
        }
        self.last_link_id = Some(id);
        id
    }

    /// Switches a node between bypass and normal mode. Links are left alone.
    /// Returns `false` if the node does not exist.
    pub fn bypass_node_by_id(&mut self, id: &NodeId, bypass: bool) -> bool {
        self.set_mode(id, if bypass { NodeMode::Bypass } else { NodeMode::Always })
    }

    /// Switches a node between muted and normal mode.
    pub fn mute_node_by_id(&mut self, id: &NodeId, mute: bool) -> bool {
        self.set_mode(id, if mute { NodeMode::Never } else { NodeMode::Always })
    }

    fn set_mode(&mut self, id: &NodeId, mode: NodeMode) -> bool {
        match self.get_node_by_id_mut(id) {
            Some(node) => {
                node.mode = mode;
                true
            }
            None => false,
        }
    }
}
