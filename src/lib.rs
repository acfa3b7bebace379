//! # comfyflow - Visual Graph / Execution Workflow Translation
//!
//! **comfyflow** converts between the two shapes a node-based image pipeline
//! takes: the **visual graph** an editor saves (slots, first-class links,
//! positions, bypass and mute modes) and the flat **execution format** an
//! executor consumes (an id-keyed map whose inputs embed scalars or direct
//! `[producer_id, output_index]` references).
//!
//! ## Core Workflow
//!
//! 1.  **Load the Graph**: Deserialize the editor's JSON into a `Graph`. Links with
//!     missing endpoints are dropped on the way in.
//! 2.  **Schedule**: `Graph::compute_execution_order` produces a deterministic
//!     ordering that tolerates cycles.
//! 3.  **Translate**: `Graph::to_workflow` emits the execution format in that order,
//!     skipping muted nodes and resolving inputs through bypassed ones.
//! 4.  **Edit**: Build or patch execution workflows directly with `Workflow`,
//!     merging whole graphs or only their scalar parameters.
//!
//! ## Quick Start
//!
//! ```rust
//! use comfyflow::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let mut graph = Graph::from_value(json!({
//!         "last_node_id": 2,
//!         "last_link_id": 1,
//!         "nodes": [
//!             {
//!                 "id": 1, "type": "CheckpointLoaderSimple", "mode": 0,
//!                 "outputs": [{ "name": "MODEL", "type": "MODEL", "links": [1] }]
//!             },
//!             {
//!                 "id": 2, "type": "KSampler", "mode": 0,
//!                 "inputs": [{ "name": "model", "type": "MODEL", "link": 1 }]
//!             }
//!         ],
//!         "links": [[1, 1, 0, 2, 0, "MODEL"]],
//!         "version": 0.4
//!     }))?;
//!
//!     let api = graph.to_workflow();
//!     assert_eq!(api["2"].inputs["model"], InputValue::Output(OutputRef::new("1", 0)));
//!
//!     // Build an execution workflow by hand.
//!     let mut workflow = Workflow::new();
//!     let model = workflow.node("CheckpointLoaderSimple").output(0);
//!     workflow
//!         .node("KSampler")
//!         .set_input("model", model)
//!         .set_input("seed", 42i64);
//!     println!("{}", workflow.to_json_string()?);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod convert;
pub mod error;
pub mod graph;
pub mod prelude;
pub mod workflow;
