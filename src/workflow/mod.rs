//! The execution format: a flat, id-keyed map of nodes whose inputs embed
//! either scalars or direct `[producer_id, output_index]` references.

use crate::config::ReferencePolicy;
use crate::error::WorkflowError;
use indexmap::IndexMap;
use serde_json::Value;

mod format;
mod merge;
mod node;

pub use format::*;
pub use node::*;

/// An execution-format workflow under construction or edit.
#[derive(Debug, Clone, Default)]
pub struct Workflow {
    /// Counter behind generated node ids. Only ever grows.
    index: u64,
    nodes: IndexMap<String, Node>,
    reference_policy: ReferencePolicy,
}

/// Configures a `Workflow` before any nodes are added.
#[derive(Debug, Clone, Default)]
pub struct WorkflowBuilder {
    reference_policy: ReferencePolicy,
}

impl WorkflowBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reference_policy(mut self, policy: ReferencePolicy) -> Self {
        self.reference_policy = policy;
        self
    }

    pub fn build(self) -> Workflow {
        Workflow {
            index: 0,
            nodes: IndexMap::new(),
            reference_policy: self.reference_policy,
        }
    }
}

impl Workflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> WorkflowBuilder {
        WorkflowBuilder::new()
    }

    pub fn reference_policy(&self) -> ReferencePolicy {
        self.reference_policy
    }

    /// Produces the next free numeric id, skipping ids that were supplied explicitly.
    fn gen_id(&mut self) -> String {
        loop {
            self.index += 1;
            let id = self.index.to_string();
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    /// Adds a node with a generated id.
    pub fn node(&mut self, class_type: impl Into<String>) -> &mut Node {
        let id = self.gen_id();
        self.insert_node(Node::new(id, class_type.into(), None))
    }

    /// Adds a node under `id`, replacing any node already registered there.
    pub fn node_with_id(&mut self, class_type: impl Into<String>, id: impl Into<String>) -> &mut Node {
        self.insert_node(Node::new(id.into(), class_type.into(), None))
    }

    pub(crate) fn insert_node(&mut self, node: Node) -> &mut Node {
        let (index, _) = self.nodes.insert_full(node.id().to_string(), node);
        &mut self.nodes[index]
    }

    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drops every node and resets id generation. The reference policy is kept.
    pub fn clear(&mut self) -> &mut Self {
        self.index = 0;
        self.nodes.clear();
        self
    }

    /// Converts the workflow into its execution format.
    pub fn serialize(&self) -> ApiWorkflow {
        self.nodes
            .iter()
            .map(|(id, node)| {
                let api_node = ApiNode {
                    inputs: node.inputs().clone(),
                    class_type: node.class_type().to_string(),
                    meta: node.meta().cloned(),
                };
                (id.clone(), api_node)
            })
            .collect()
    }

    pub fn to_json(&self) -> Result<Value, WorkflowError> {
        serde_json::to_value(self.serialize())
            .map_err(|e| WorkflowError::SerializeError(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, WorkflowError> {
        serde_json::to_string(&self.serialize())
            .map_err(|e| WorkflowError::SerializeError(e.to_string()))
    }

    /// Replaces the contents of this workflow with `raw`, honouring the
    /// configured reference policy.
    pub fn deserialize(&mut self, raw: ApiWorkflow) -> Result<&mut Self, WorkflowError> {
        if self.reference_policy == ReferencePolicy::Strict {
            // Validate before clearing so a rejected payload leaves the workflow intact.
            Self::check_references(&IndexMap::new(), &raw)?;
        }
        self.clear();
        self.merge_api_format(raw)
    }

    /// Builds a workflow from `raw` using the tolerant reference policy.
    pub fn from_api_format(raw: ApiWorkflow) -> Result<Self, WorkflowError> {
        let mut workflow = Self::new();
        workflow.merge_api_format(raw)?;
        Ok(workflow)
    }

    pub fn from_json_str(json: &str) -> Result<Self, WorkflowError> {
        let raw: ApiWorkflow =
            serde_json::from_str(json).map_err(|e| WorkflowError::JsonParseError(e.to_string()))?;
        Self::from_api_format(raw)
    }

    pub fn from_value(json: Value) -> Result<Self, WorkflowError> {
        let raw: ApiWorkflow = serde_json::from_value(json)
            .map_err(|e| WorkflowError::JsonParseError(e.to_string()))?;
        Self::from_api_format(raw)
    }
}
