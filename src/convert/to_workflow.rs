use super::IntoWorkflow;
use crate::error::WorkflowError;
use crate::graph::{Graph, GraphLink, GraphNode};
use crate::workflow::{ApiNode, ApiWorkflow, InputValue, OutputRef, Workflow};
use ahash::AHashSet;
use itertools::Itertools;
use log::{debug, warn};

impl Graph {
    /// Translates the graph into execution format.
    ///
    /// Nodes are emitted in execution order. Muted and bypassed nodes are left
    /// out; inputs fed through bypassed nodes are rewired to the first
    /// upstream producer that is not bypassed. Inputs that cannot be resolved
    /// are omitted.
    ///
    /// Recomputes the execution order first, so every node's `order` field is
    /// up to date afterwards.
    pub fn to_workflow(&mut self) -> ApiWorkflow {
        let mut output = ApiWorkflow::new();

        for index in self.update_execution_order() {
            let node = &self.nodes()[index];
            if !node.mode.is_executed() {
                continue;
            }

            let mut api_node = ApiNode::new(node.node_type.clone());
            for (slot, input) in node.inputs.iter().enumerate() {
                if let Some(producer) = self.resolve_input(node, slot) {
                    api_node
                        .inputs
                        .insert(input.name.clone(), InputValue::Output(producer));
                }
            }
            output.insert(node.id.key(), api_node);
        }

        output
    }

    /// Finds the real producer behind input `slot` of `consumer`, walking up
    /// through bypassed nodes.
    ///
    /// At each bypassed node the walk continues through the first of its input
    /// slots whose type equals the consumer's slot type, trying the slot at the
    /// incoming link's source index first and then every slot in order.
    fn resolve_input(&self, consumer: &GraphNode, slot: usize) -> Option<OutputRef> {
        let expected = &consumer.inputs.get(slot)?.slot_type;
        let mut link: &GraphLink = self.get_input_link(consumer, slot)?;
        let mut producer = self.get_node_by_id(&link.src_id)?;
        let mut walked = AHashSet::new();

        while producer.mode.is_bypassed() {
            if !walked.insert(producer.id.key()) {
                warn!(
                    "Bypass chain feeding '{}' of node '{}' loops through '{}'",
                    consumer.inputs[slot].name, consumer.id, producer.id
                );
                return None;
            }

            let candidate = std::iter::once(link.src_slot)
                .chain(0..producer.inputs.len())
                .unique()
                .find(|&j| {
                    producer
                        .inputs
                        .get(j)
                        .is_some_and(|input| &input.slot_type == expected)
                });
            let Some(j) = candidate else {
                debug!(
                    "No '{}' input on bypassed node '{}' to feed '{}' of node '{}'",
                    expected, producer.id, consumer.inputs[slot].name, consumer.id
                );
                return None;
            };

            link = self.get_input_link(producer, j)?;
            producer = self.get_node_by_id(&link.src_id)?;
        }

        if producer.mode.is_muted() {
            debug!(
                "Input '{}' of node '{}' is fed by muted node '{}'",
                consumer.inputs[slot].name, consumer.id, producer.id
            );
            return None;
        }

        Some(OutputRef::new(link.src_id.key(), link.src_slot as u32))
    }
}

impl IntoWorkflow for &mut Graph {
    fn into_workflow(self) -> Result<Workflow, WorkflowError> {
        Workflow::from_api_format(self.to_workflow())
    }
}
