use super::{ApiWorkflow, InputValue, Node, Workflow};
use crate::config::ReferencePolicy;
use crate::error::WorkflowError;
use indexmap::IndexMap;
use log::warn;

impl Workflow {
    /// Upserts every node of `other` into this workflow, replacing nodes that
    /// share an id.
    pub fn merge(&mut self, other: &Workflow) -> Result<&mut Self, WorkflowError> {
        self.merge_api_format(other.serialize())
    }

    /// Upserts every node of `raw` into this workflow.
    ///
    /// Runs in two passes: node shells first, then inputs, so references may
    /// point at nodes declared later in `raw` or already present in `self`.
    /// A reference to a node found in neither is dropped under
    /// `ReferencePolicy::Tolerant` and rejected under `ReferencePolicy::Strict`,
    /// in which case nothing is merged.
    pub fn merge_api_format(&mut self, raw: ApiWorkflow) -> Result<&mut Self, WorkflowError> {
        if self.reference_policy == ReferencePolicy::Strict {
            Self::check_references(&self.nodes, &raw)?;
        }

        for (id, api_node) in &raw {
            self.insert_node(Node::new(
                id.clone(),
                api_node.class_type.clone(),
                api_node.meta.clone(),
            ));
        }

        for (id, api_node) in raw {
            let resolved: Vec<(String, InputValue)> = api_node
                .inputs
                .into_iter()
                .filter(|(name, value)| match value.as_output() {
                    Some(output) if !self.nodes.contains_key(&output.node_id) => {
                        warn!(
                            "Dropping input '{}' of node '{}': node \"{}\" not found",
                            name, id, output.node_id
                        );
                        false
                    }
                    _ => true,
                })
                .collect();

            if let Some(node) = self.nodes.get_mut(&id) {
                for (name, value) in resolved {
                    node.insert_input(name, value);
                }
            }
        }

        Ok(self)
    }

    /// Copies scalar inputs from `raw` onto nodes that exist in both workflows.
    ///
    /// Values are copied verbatim, so a `null` overwrites rather than removes.
    /// References in `raw` are ignored, so the link structure of `self` is left
    /// as is. Nodes only present in `raw` are not added.
    pub fn merge_inputs(&mut self, raw: &ApiWorkflow) -> &mut Self {
        for (id, api_node) in raw {
            let Some(node) = self.nodes.get_mut(id) else {
                continue;
            };
            for (name, value) in &api_node.inputs {
                if !value.is_output() {
                    node.insert_input(name.clone(), value.clone());
                }
            }
        }
        self
    }

    /// Fails on the first reference in `raw` that resolves to neither `existing`
    /// nor another node of `raw`.
    pub(super) fn check_references(
        existing: &IndexMap<String, Node>,
        raw: &ApiWorkflow,
    ) -> Result<(), WorkflowError> {
        for (id, api_node) in raw {
            for (name, value) in &api_node.inputs {
                let Some(output) = value.as_output() else {
                    continue;
                };
                if !raw.contains_key(&output.node_id) && !existing.contains_key(&output.node_id) {
                    return Err(WorkflowError::ReferenceNotFound {
                        missing_node_id: output.node_id.clone(),
                        node_id: id.clone(),
                        input: name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}
