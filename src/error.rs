use thiserror::Error;

/// Errors that can occur while building or merging an execution-format workflow.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WorkflowError {
    #[error("Failed to parse workflow JSON: {0}")]
    JsonParseError(String),

    #[error("Failed to serialize workflow: {0}")]
    SerializeError(String),

    #[error(
        "Invalid workflow format: node \"{missing_node_id}\" not found, which is required by input '{input}' of node '{node_id}'"
    )]
    ReferenceNotFound {
        missing_node_id: String,
        node_id: String,
        input: String,
    },
}

/// Errors that can occur while loading a visual graph.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Failed to parse graph JSON: {0}")]
    JsonParseError(String),

    #[error("Slot '{slot}' of node '{node_id}' declares the wildcard type, which is not allowed")]
    WildcardSlotType { node_id: String, slot: String },
}
