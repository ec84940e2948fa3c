//! Undirected wayfinding graphs and breadth-first routing.
//!
//! Both graphs answer minimum-hop queries with a plain BFS. Determinism
//! comes from exploration order alone: neighbors are enqueued in edge
//! creation order, and the first finished path wins.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use crate::map::VenueMap;
use crate::{Error, Result};

/// Room adjacency derived from corridors. Nodes are room indices into the
/// map the graph was built from.
#[derive(Debug, Clone)]
pub struct RoomGraph {
    names: Vec<String>,
    adjacency: Vec<Vec<usize>>,
    corridor_of: FxHashMap<(usize, usize), usize>,
}

impl RoomGraph {
    pub fn build(map: &VenueMap) -> Self {
        let mut adjacency = vec![Vec::new(); map.rooms.len()];
        let mut corridor_of = FxHashMap::default();
        for (ci, c) in map.corridors.iter().enumerate() {
            adjacency[c.room_a].push(c.room_b);
            adjacency[c.room_b].push(c.room_a);
            corridor_of.insert(ordered(c.room_a, c.room_b), ci);
        }
        Self {
            names: map.rooms.iter().map(|r| r.name.clone()).collect(),
            adjacency,
            corridor_of,
        }
    }

    /// Corridor index joining two rooms, if they are adjacent.
    pub fn corridor_between(&self, a: usize, b: usize) -> Option<usize> {
        self.corridor_of.get(&ordered(a, b)).copied()
    }

    /// Minimum-hop room path, both endpoints included. A room routes to
    /// itself as the single-element path.
    pub fn shortest_path(&self, from: usize, to: usize) -> Result<Vec<usize>> {
        bfs(&self.adjacency, from, to).ok_or_else(|| Error::NoRoute {
            from: self.names[from].clone(),
            to: self.names[to].clone(),
        })
    }
}

fn ordered(a: usize, b: usize) -> (usize, usize) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Exhibit adjacency from declared connections.
///
/// Every declared edge is symmetric regardless of whether the reverse
/// declaration exists, and declared targets that match no exhibit still
/// become nodes; the catalogue is permissive by contract.
#[derive(Debug, Clone, Default)]
pub struct ExhibitGraph {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
    adjacency: Vec<Vec<usize>>,
}

impl ExhibitGraph {
    pub fn build(map: &VenueMap) -> Self {
        let mut graph = Self::default();
        for ex in &map.exhibits {
            graph.ensure_node(&ex.name);
        }
        for ex in &map.exhibits {
            for target in &ex.connections {
                graph.add_edge(&ex.name, target);
            }
        }
        graph
    }

    fn ensure_node(&mut self, name: &str) -> usize {
        if let Some(&i) = self.index.get(name) {
            return i;
        }
        let i = self.names.len();
        self.names.push(name.to_string());
        self.index.insert(name.to_string(), i);
        self.adjacency.push(Vec::new());
        i
    }

    /// Inserts a symmetric edge, creating missing endpoints as nodes.
    pub fn add_edge(&mut self, a: &str, b: &str) {
        let ia = self.ensure_node(a);
        let ib = self.ensure_node(b);
        self.adjacency[ia].push(ib);
        self.adjacency[ib].push(ia);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Minimum-hop exhibit path by name, both endpoints included.
    pub fn shortest_path(&self, from: &str, to: &str) -> Result<Vec<String>> {
        let ia = self.lookup(from)?;
        let ib = self.lookup(to)?;
        let path = bfs(&self.adjacency, ia, ib).ok_or_else(|| Error::NoRoute {
            from: from.to_string(),
            to: to.to_string(),
        })?;
        Ok(path.into_iter().map(|i| self.names[i].clone()).collect())
    }

    /// Chains shortest paths through every consecutive pair of `stops`,
    /// dropping the repeated junction between legs. Any unreachable leg
    /// fails the whole chain.
    pub fn route_through(&self, stops: &[&str]) -> Result<Vec<String>> {
        match stops {
            [] => Ok(Vec::new()),
            [only] => self.shortest_path(only, only),
            _ => {
                let mut full: Vec<String> = Vec::new();
                for pair in stops.windows(2) {
                    let leg = self.shortest_path(pair[0], pair[1])?;
                    if full.is_empty() {
                        full.extend(leg);
                    } else {
                        full.extend(leg.into_iter().skip(1));
                    }
                }
                Ok(full)
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<usize> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| Error::UnknownExhibit {
                name: name.to_string(),
            })
    }
}

fn bfs(adjacency: &[Vec<usize>], from: usize, to: usize) -> Option<Vec<usize>> {
    let mut prev: Vec<Option<usize>> = vec![None; adjacency.len()];
    let mut seen = vec![false; adjacency.len()];
    seen[from] = true;

    let mut queue = VecDeque::new();
    queue.push_back(from);
    while let Some(cur) = queue.pop_front() {
        if cur == to {
            break;
        }
        for &n in &adjacency[cur] {
            if !seen[n] {
                seen[n] = true;
                prev[n] = Some(cur);
                queue.push_back(n);
            }
        }
    }

    if !seen[to] {
        return None;
    }
    let mut path = vec![to];
    let mut cur = to;
    while let Some(p) = prev[cur] {
        path.push(p);
        cur = p;
    }
    path.reverse();
    Some(path)
}
