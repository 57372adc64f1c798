use std::collections::{HashMap, VecDeque};

use petgraph::graphmap::UnGraphMap;
use trajno_common::station::Network;

pub(crate) type NodeID = usize;

/// Frozen station graph.
///
/// Node ids are ranks in ascending station-name order, so iterating
/// neighbors in ascending id order is iterating them in ascending name
/// order. Every algorithm downstream leans on that for reproducible
/// output; traversal scratch state lives in the traversal, never here.
#[derive(Clone, Debug)]
pub(crate) struct Topo {
    graph: UnGraphMap<NodeID, ()>,
    names: Vec<String>,
    ids: HashMap<String, NodeID>,
}

impl Topo {
    pub(crate) fn new(network: &Network) -> Self {
        let names: Vec<String> = network.stations.keys().cloned().collect();
        let ids: HashMap<String, NodeID> = names
            .iter()
            .enumerate()
            .map(|(id, name)| (name.clone(), id))
            .collect();

        let mut graph = UnGraphMap::new();
        for id in 0..names.len() {
            graph.add_node(id);
        }
        for (from, to) in &network.connections {
            graph.add_edge(ids[from], ids[to], ());
        }

        Topo { graph, names, ids }
    }

    pub(crate) fn id(&self, name: &str) -> Option<NodeID> {
        self.ids.get(name).copied()
    }

    pub(crate) fn name(&self, id: NodeID) -> &str {
        &self.names[id]
    }

    pub(crate) fn station_count(&self) -> usize {
        self.names.len()
    }

    /// Neighbors in ascending id order. GraphMap yields them in edge
    /// insertion order, so the sort is what makes every traversal
    /// reproducible.
    pub(crate) fn neighbors(&self, v: NodeID) -> Vec<NodeID> {
        let mut adjacent: Vec<NodeID> = self.graph.neighbors(v).collect();
        adjacent.sort_unstable();
        adjacent
    }

    pub(crate) fn contains_track(&self, a: NodeID, b: NodeID) -> bool {
        self.graph.contains_edge(a, b)
    }

    /// Removes the track in both orientations. Only ever called on the
    /// route selector's working copies.
    pub(crate) fn remove_track(&mut self, a: NodeID, b: NodeID) {
        self.graph.remove_edge(a, b);
    }

    /// First-reached breadth-first search from `s` to `t`, visiting
    /// neighbors in ascending name order. Returns the unique
    /// minimum-length path that ordering selects, or `None` when `t`
    /// is unreachable.
    pub(crate) fn shortest_path(&self, s: NodeID, t: NodeID) -> Option<Vec<NodeID>> {
        if s >= self.names.len() || t >= self.names.len() {
            return None;
        }
        if s == t {
            return Some(vec![s]);
        }

        let mut prev: Vec<Option<NodeID>> = vec![None; self.names.len()];
        let mut seen = vec![false; self.names.len()];
        seen[s] = true;

        let mut queue = VecDeque::new();
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            for w in self.neighbors(v) {
                if seen[w] {
                    continue;
                }
                seen[w] = true;
                prev[w] = Some(v);
                if w == t {
                    return Some(walk_back(&prev, s, t));
                }
                queue.push_back(w);
            }
        }
        None
    }
}

fn walk_back(prev: &[Option<NodeID>], s: NodeID, t: NodeID) -> Vec<NodeID> {
    let mut path = vec![t];
    let mut node = t;
    while node != s {
        match prev[node] {
            Some(p) => {
                path.push(p);
                node = p;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
