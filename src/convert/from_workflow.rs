use super::{NoDefinitions, NodeDefinitions};
use crate::graph::{Graph, GraphNode, NodeId};
use crate::workflow::Workflow;
use log::debug;

/// Maps an execution-format id back to a visual id, preferring integers when
/// the id is a canonical integer.
fn node_id_from_key(key: &str) -> NodeId {
    match key.parse::<i64>() {
        Ok(id) if id.to_string() == key => NodeId::Int(id),
        _ => NodeId::from(key),
    }
}

impl Graph {
    /// Rebuilds a visual graph from `workflow` without node definitions.
    ///
    /// Every node starts without slots, so no reference survives as a link and
    /// scalar inputs are not represented. Use `from_workflow_with` to recover
    /// links.
    pub fn from_workflow(workflow: &Workflow) -> Graph {
        Self::from_workflow_with(workflow, &NoDefinitions)
    }

    /// Rebuilds a visual graph from `workflow`, seeding slots from `definitions`.
    ///
    /// A reference input becomes a link when the consumer has an input slot
    /// with the same name and the producer has the referenced output slot.
    /// Anything else is dropped.
    pub fn from_workflow_with(workflow: &Workflow, definitions: &dyn NodeDefinitions) -> Graph {
        let mut graph = Graph::new();

        for node in workflow.nodes() {
            let class_type = node.class_type();
            let graph_node = GraphNode::new(node_id_from_key(node.id()), class_type)
                .with_inputs(definitions.input_slots(class_type).unwrap_or_default())
                .with_outputs(definitions.output_slots(class_type).unwrap_or_default());
            graph.add_node(graph_node);
        }

        for node in workflow.nodes() {
            let dst_id = node_id_from_key(node.id());
            for (name, value) in node.inputs() {
                let Some(output) = value.as_output() else {
                    continue;
                };
                let Some(dst_slot) = graph
                    .get_node_by_id(&dst_id)
                    .and_then(|dst| dst.find_input_slot(name))
                else {
                    debug!("Node '{}' has no input slot '{}', dropping link", dst_id, name);
                    continue;
                };
                let src_id = node_id_from_key(&output.node_id);
                graph.connect(&src_id, output.index as usize, &dst_id, dst_slot);
            }
        }

        graph
    }
}
