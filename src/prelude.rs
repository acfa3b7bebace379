//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the comfyflow crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use comfyflow::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let graph_json = std::fs::read_to_string("path/to/graph.json")?;
//! let mut graph = Graph::from_json_str(&graph_json)?;
//!
//! let workflow = (&mut graph).into_workflow()?;
//! println!("{}", workflow.to_json_string()?);
//! # Ok(())
//! # }
//! ```

// Execution format
pub use crate::workflow::{ApiNode, ApiWorkflow, InputValue, Node, OutputRef, Workflow};

// Visual graph
pub use crate::graph::{
    Graph, GraphGroup, GraphLink, GraphNode, InputSlot, LinkId, NodeId, NodeMode, OutputSlot,
    SlotType,
};

// Translation
pub use crate::convert::{IntoWorkflow, NodeDefinitions};

// Configuration
pub use crate::config::{ReferencePolicy, SlotTypePolicy};

// Error types
pub use crate::error::{GraphError, WorkflowError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
