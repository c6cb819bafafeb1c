// graph_utils.rs
use crate::csv_utils::CsvBuilder;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::Bfs;
use std::collections::{HashMap, HashSet};
use std::error::Error;

/// The undirected friendship graph. Nodes are compact integer user ids;
/// an edge exists whenever either side lists the other as a friend, so the
/// edge set is symmetric even though the source adjacency lists are not.
#[derive(Debug)]
pub struct FriendGraph {
    graph: UnGraph<u32, ()>,
    nodes: HashMap<u32, NodeIndex>,
}

impl Default for FriendGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl FriendGraph {
    pub fn new() -> Self {
        FriendGraph {
            graph: UnGraph::new_undirected(),
            nodes: HashMap::new(),
        }
    }

    fn intern(&mut self, uid: u32) -> NodeIndex {
        let graph = &mut self.graph;
        *self
            .nodes
            .entry(uid)
            .or_insert_with(|| graph.add_node(uid))
    }

    /// Adds a user node, whether or not any friendship ever references it.
    pub fn add_user(&mut self, uid: u32) {
        self.intern(uid);
    }

    /// Adds the undirected edge (a, b), creating either node as needed.
    /// Re-adding an existing friendship is a no-op rather than a parallel
    /// edge.
    pub fn add_friendship(&mut self, a: u32, b: u32) {
        let a = self.intern(a);
        let b = self.intern(b);
        self.graph.update_edge(a, b, ());
    }

    pub fn contains(&self, uid: u32) -> bool {
        self.nodes.contains_key(&uid)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Builds the graph from a `friends.csv`-shaped table (`uid`, `friends`).
    ///
    /// Users whose friend list is empty or the `None` sentinel contribute no
    /// node at all; every other user contributes its own node plus one edge
    /// per listed friend. Friend lists here are comma-delimited with
    /// optional whitespace, so each id is trimmed before parsing.
    pub fn from_csv(file_path: &str) -> Result<Self, Box<dyn Error>> {
        let mut table = CsvBuilder::from_csv(file_path);
        if let Some(e) = table.take_error() {
            return Err(format!("failed to read '{}': {}", file_path, e).into());
        }
        Self::from_table(&table, file_path)
    }

    /// Builds the graph from an already-loaded adjacency table.
    pub fn from_table(table: &CsvBuilder, file_path: &str) -> Result<Self, Box<dyn Error>> {
        let uid_index = table
            .column_index("uid")
            .ok_or(format!("column 'uid' not found in '{}'", file_path))?;
        let friends_index = table
            .column_index("friends")
            .ok_or(format!("column 'friends' not found in '{}'", file_path))?;

        let mut friend_graph = FriendGraph::new();
        if let Some(rows) = table.get_data() {
            for (index, row) in rows.iter().enumerate() {
                let friends = row.get(friends_index).map(|s| s.as_str()).unwrap_or("");
                if friends.is_empty() || friends == "None" {
                    continue;
                }

                let uid = parse_uid(row.get(uid_index).map(|s| s.as_str()).unwrap_or(""))
                    .map_err(|e| format!("{} (row {} of '{}')", e, index, file_path))?;
                friend_graph.add_user(uid);

                for friend in friends.split(',') {
                    let friend = friend.trim();
                    if friend.is_empty() {
                        continue;
                    }
                    let friend = parse_uid(friend)
                        .map_err(|e| format!("{} (row {} of '{}')", e, index, file_path))?;
                    friend_graph.add_friendship(uid, friend);
                }
            }
        }

        Ok(friend_graph)
    }

    /// Returns the connected component containing `seed`, ascending by uid.
    /// A seed that never appears in the graph is an error, not an empty
    /// component.
    pub fn component_of(&self, seed: u32) -> Result<Vec<u32>, Box<dyn Error>> {
        let start = self
            .nodes
            .get(&seed)
            .ok_or(format!("seed user {} is not a node of the friend graph", seed))?;

        let mut component = Vec::new();
        let mut bfs = Bfs::new(&self.graph, *start);
        while let Some(node) = bfs.next(&self.graph) {
            component.push(self.graph[node]);
        }
        component.sort_unstable();

        Ok(component)
    }

    /// Enumerates every connected component, each ascending by uid. Every
    /// node lands in exactly one component. The components themselves come
    /// out in first-visited order; components of equal size are not ranked
    /// beyond that.
    pub fn components(&self) -> Vec<Vec<u32>> {
        let mut visited: HashSet<NodeIndex> = HashSet::new();
        let mut components = Vec::new();

        for start in self.graph.node_indices() {
            if visited.contains(&start) {
                continue;
            }

            let mut component = Vec::new();
            let mut bfs = Bfs::new(&self.graph, start);
            while let Some(node) = bfs.next(&self.graph) {
                visited.insert(node);
                component.push(self.graph[node]);
            }
            component.sort_unstable();
            components.push(component);
        }

        components
    }

    /// Rebuilds the graph with every node in `removed` (and its edges)
    /// dropped.
    pub fn without(&self, removed: &HashSet<u32>) -> FriendGraph {
        let mut remainder = FriendGraph::new();

        for &uid in self.nodes.keys() {
            if !removed.contains(&uid) {
                remainder.add_user(uid);
            }
        }
        for edge in self.graph.edge_indices() {
            if let Some((a, b)) = self.graph.edge_endpoints(edge) {
                let a = self.graph[a];
                let b = self.graph[b];
                if !removed.contains(&a) && !removed.contains(&b) {
                    remainder.add_friendship(a, b);
                }
            }
        }

        remainder
    }
}

fn parse_uid(value: &str) -> Result<u32, Box<dyn Error>> {
    value
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("bad uid '{}'", value).into())
}

/// Everything the friend graph job reports to the operator.
#[derive(Debug)]
pub struct CoverageReport {
    /// Rows in the adjacency table, sentinel rows included.
    pub user_rows: usize,
    /// Nodes actually present in the graph.
    pub total_nodes: usize,
    /// The connected component containing the seed user, ascending by uid.
    pub seed_component: Vec<u32>,
    /// The largest component left once the seed component is removed; empty
    /// when removal empties the graph.
    pub next_largest: Vec<u32>,
    /// Mean size over all components left after removal; 0.0 when none
    /// remain.
    pub mean_remaining: f64,
}

impl CoverageReport {
    /// The seed component's share of all graph nodes.
    pub fn seed_fraction(&self) -> f64 {
        self.seed_component.len() as f64 / self.total_nodes as f64
    }
}

/// Runs the whole analysis over a `friends.csv`-shaped table: build the
/// graph, take the component containing `seed`, then remove it and measure
/// what is left.
pub fn analyze(file_path: &str, seed: u32) -> Result<CoverageReport, Box<dyn Error>> {
    let mut table = CsvBuilder::from_csv(file_path);
    if let Some(e) = table.take_error() {
        return Err(format!("failed to read '{}': {}", file_path, e).into());
    }
    let user_rows = table.get_data().map(|rows| rows.len()).unwrap_or(0);

    let graph = FriendGraph::from_table(&table, file_path)?;
    let total_nodes = graph.node_count();
    let seed_component = graph.component_of(seed)?;

    let removed: HashSet<u32> = seed_component.iter().copied().collect();
    let remainder = graph.without(&removed);
    let components = remainder.components();

    let next_largest = components
        .iter()
        .max_by_key(|component| component.len())
        .cloned()
        .unwrap_or_default();
    let mean_remaining = if components.is_empty() {
        0.0
    } else {
        components.iter().map(|c| c.len()).sum::<usize>() as f64 / components.len() as f64
    };

    Ok(CoverageReport {
        user_rows,
        total_nodes,
        seed_component,
        next_largest,
        mean_remaining,
    })
}

/// Writes a component's node list to `file_path` as a single comma-joined
/// line, the `max_cover.csv` convention.
pub fn write_cover(file_path: &str, component: &[u32]) -> Result<(), Box<dyn Error>> {
    let line = component
        .iter()
        .map(|uid| uid.to_string())
        .collect::<Vec<String>>()
        .join(",");
    std::fs::write(file_path, line)?;
    Ok(())
}
