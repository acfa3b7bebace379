use super::node::InputValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named inputs of a node in execution format.
pub type ApiInputs = IndexMap<String, InputValue>;

/// The execution format: node id -> node.
pub type ApiWorkflow = IndexMap<String, ApiNode>;

/// A node as it appears in the execution format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiNode {
    #[serde(default)]
    pub inputs: ApiInputs,
    pub class_type: String,
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Map<String, Value>>,
}

impl ApiNode {
    pub fn new(class_type: impl Into<String>) -> Self {
        Self {
            inputs: ApiInputs::new(),
            class_type: class_type.into(),
            meta: None,
        }
    }
}
