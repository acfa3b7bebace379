//! Deterministic, cycle-tolerant execution ordering of a visual graph.

use super::{Graph, GraphNode};
use ahash::{AHashMap, AHashSet};
use log::debug;
use std::collections::VecDeque;

/// Computes an execution order as positions into `graph.nodes()`.
///
/// Kahn's algorithm seeded with every node that has no connected inputs, in
/// natural order. Natural order is the order nodes were loaded or added in;
/// numeric ids get no precedence over string ids. Nodes whose incoming links never all resolve (cycles,
/// dangling link ids) are appended afterwards in natural order, so every node
/// appears exactly once.
pub fn execution_order(graph: &Graph) -> Vec<usize> {
    let nodes = graph.nodes();
    let mut order = Vec::with_capacity(nodes.len());
    let mut ready = VecDeque::new();
    let mut placed = vec![false; nodes.len()];
    let mut remaining_links: AHashMap<usize, i64> = AHashMap::new();
    let mut visited_links = AHashSet::new();

    for (index, node) in nodes.iter().enumerate() {
        let connected = node.inputs.iter().filter(|slot| slot.link.is_some()).count();
        if connected == 0 {
            ready.push_back(index);
        } else {
            remaining_links.insert(index, connected as i64);
        }
    }

    while let Some(index) = ready.pop_front() {
        order.push(index);
        placed[index] = true;

        for output in &nodes[index].outputs {
            for link_id in &output.links {
                let Some(link) = graph.get_link(*link_id) else {
                    continue;
                };
                if !visited_links.insert(link.id) {
                    continue;
                }
                let Some(target) = graph.index_of(&link.dst_id) else {
                    continue;
                };
                // Targets without a pending count were already seeded.
                if let Some(remaining) = remaining_links.get_mut(&target) {
                    *remaining -= 1;
                    if *remaining == 0 {
                        ready.push_back(target);
                    }
                }
            }
        }
    }

    if order.len() < nodes.len() {
        debug!(
            "{} node(s) left unscheduled, appending in natural order",
            nodes.len() - order.len()
        );
        order.extend((0..nodes.len()).filter(|&index| !placed[index]));
    }

    order
}

impl Graph {
    /// Computes the execution order, stores each node's position in its
    /// `order` field and returns the nodes in that order.
    pub fn compute_execution_order(&mut self) -> Vec<&GraphNode> {
        let order = self.update_execution_order();
        order.into_iter().map(|index| &self.nodes[index]).collect()
    }

    /// Rewrites every node's `order` field and returns the order as positions
    /// into `nodes()`.
    pub(crate) fn update_execution_order(&mut self) -> Vec<usize> {
        let order = execution_order(self);
        for (position, &index) in order.iter().enumerate() {
            self.nodes[index].order = position as i64;
        }
        order
    }
}
