//! Service Map Graph
//!
//! Projects a group's flat item list into positioned nodes and edges for the
//! dependency map. The graph is rebuilt wholesale from current item state on
//! every change; positions are a render-time projection, never stored.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::models::{ItemId, WorkItem};

// Node box and spacing constants, matching the original dagre configuration
// (left-to-right rank direction).
pub const NODE_WIDTH: f64 = 220.0;
pub const NODE_HEIGHT: f64 = 80.0;
pub const RANK_SEP: f64 = 200.0;
pub const NODE_SEP: f64 = 80.0;

/// A positioned node, anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub id: ItemId,
    pub label: String,
    pub done: bool,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: ItemId,
    pub to: ItemId,
}

/// Build the positioned dependency graph for one group: exactly one node per
/// item, one edge per `(item, next)` pair whose target exists in the list.
pub fn build_graph(items: &[WorkItem]) -> (Vec<GraphNode>, Vec<GraphEdge>) {
    let mut graph: DiGraph<ItemId, ()> = DiGraph::new();
    let mut index_of: HashMap<ItemId, NodeIndex> = HashMap::new();
    for item in items {
        index_of.insert(item.id, graph.add_node(item.id));
    }

    let mut edges = Vec::new();
    for item in items {
        for next in &item.next_ids {
            // A target outside the item set would be an orphan edge; skip it.
            let (Some(&from), Some(&to)) = (index_of.get(&item.id), index_of.get(next)) else {
                continue;
            };
            graph.add_edge(from, to, ());
            edges.push(GraphEdge {
                from: item.id,
                to: *next,
            });
        }
    }

    let ranks = assign_ranks(&graph, items, &index_of);

    // Stack nodes within a rank in item-list order.
    let mut used_rows: HashMap<usize, usize> = HashMap::new();
    let nodes = items
        .iter()
        .map(|item| {
            let rank = ranks.get(&item.id).copied().unwrap_or(0);
            let row = used_rows.entry(rank).or_insert(0);
            let node = GraphNode {
                id: item.id,
                label: item.title.clone(),
                done: item.completed,
                x: rank as f64 * (NODE_WIDTH + RANK_SEP),
                y: *row as f64 * (NODE_HEIGHT + NODE_SEP),
            };
            *row += 1;
            node
        })
        .collect();

    (nodes, edges)
}

/// Longest-path layering: a node's rank is one past its deepest predecessor.
/// Isolated nodes and disconnected components land at rank 0 and up like any
/// other node. The backend contract promises a DAG; if a cycle shows up anyway
/// we fall back to list-order ranks instead of panicking.
fn assign_ranks(
    graph: &DiGraph<ItemId, ()>,
    items: &[WorkItem],
    index_of: &HashMap<ItemId, NodeIndex>,
) -> HashMap<ItemId, usize> {
    match toposort(graph, None) {
        Ok(order) => {
            let mut rank_by_index: HashMap<NodeIndex, usize> = HashMap::new();
            for idx in order {
                let rank = graph
                    .neighbors_directed(idx, petgraph::Direction::Incoming)
                    .filter_map(|pred| rank_by_index.get(&pred))
                    .map(|r| r + 1)
                    .max()
                    .unwrap_or(0);
                rank_by_index.insert(idx, rank);
            }
            index_of
                .iter()
                .map(|(id, idx)| (*id, rank_by_index.get(idx).copied().unwrap_or(0)))
                .collect()
        }
        Err(_) => items
            .iter()
            .enumerate()
            .map(|(pos, item)| (item.id, pos))
            .collect(),
    }
}
