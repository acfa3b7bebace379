//! Translation between the visual graph and the execution format.

use crate::error::WorkflowError;
use crate::graph::{InputSlot, OutputSlot};
use crate::workflow::Workflow;

mod from_workflow;
mod to_workflow;

/// Types that can be turned into an execution-format `Workflow`.
pub trait IntoWorkflow {
    fn into_workflow(self) -> Result<Workflow, WorkflowError>;
}

/// Source of slot layouts per node class, typically backed by the executor's
/// node registry.
///
/// Returning `None` means the class is unknown and its nodes get no slots.
pub trait NodeDefinitions {
    fn input_slots(&self, class_type: &str) -> Option<Vec<InputSlot>>;
    fn output_slots(&self, class_type: &str) -> Option<Vec<OutputSlot>>;
}

/// Knows no node classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefinitions;

impl NodeDefinitions for NoDefinitions {
    fn input_slots(&self, _class_type: &str) -> Option<Vec<InputSlot>> {
        None
    }

    fn output_slots(&self, _class_type: &str) -> Option<Vec<OutputSlot>> {
        None
    }
}
