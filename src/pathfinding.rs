use crate::aisle_graph::AisleGraph;
use crate::config::{Heuristic, PathfindingConfig};
use crate::geometry::Point;
use crate::layout::StoreLayout;
use crate::route::Route;
use crate::smoothing;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use tracing::{debug, trace, warn};

/// Cardinal steps: up, right, down, left
const CARDINAL: [(f64, f64); 4] = [(0.0, -1.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)];
/// Diagonal steps: up-right, down-right, down-left, up-left
const DIAGONAL: [(f64, f64); 4] = [(1.0, -1.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, -1.0)];

/// A node in the search arena. `parent` indexes an earlier node.
#[derive(Debug, Clone)]
struct SearchNode {
    position: Point,
    g: f64,
    h: f64,
    parent: Option<usize>,
    closed: bool,
}

impl SearchNode {
    fn f(&self) -> f64 {
        self.g + self.h
    }
}

/// Open-set entry; the arena index doubles as insertion order
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: f64,
    id: usize,
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap (BinaryHeap is max-heap by default)
        other.f.total_cmp(&self.f)
            // Tie-breaker: earliest inserted node first
            .then_with(|| other.id.cmp(&self.id))
    }
}

/// Buckets nodes by position so "is there a node within r" stays cheap
struct NodeIndex {
    cell: f64,
    buckets: HashMap<(i64, i64), Vec<usize>>,
}

impl NodeIndex {
    fn new(cell: f64) -> Self {
        NodeIndex {
            cell,
            buckets: HashMap::new(),
        }
    }

    fn key(&self, p: &Point) -> (i64, i64) {
        ((p.x / self.cell).floor() as i64, (p.y / self.cell).floor() as i64)
    }

    fn insert(&mut self, p: &Point, id: usize) {
        let key = self.key(p);
        self.buckets.entry(key).or_default().push(id);
    }

    /// Lowest node id within `cell` of `p` (per axis, strict) that satisfies `filter`
    fn find<F>(&self, p: &Point, nodes: &[SearchNode], filter: F) -> Option<usize>
    where
        F: Fn(&SearchNode) -> bool,
    {
        let (kx, ky) = self.key(p);
        let mut best: Option<usize> = None;
        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(ids) = self.buckets.get(&(kx + dx, ky + dy)) else {
                    continue;
                };
                for &id in ids {
                    let node = &nodes[id];
                    if node.position.within_box(p, self.cell) && filter(node) {
                        best = Some(best.map_or(id, |b| b.min(id)));
                    }
                }
            }
        }
        best
    }
}

/// Grid A* over a store layout
pub struct Pathfinder<'a> {
    layout: &'a StoreLayout,
    graph: AisleGraph<'a>,
    config: PathfindingConfig,
}

impl<'a> Pathfinder<'a> {
    pub fn new(layout: &'a StoreLayout, config: PathfindingConfig) -> Self {
        Pathfinder {
            layout,
            graph: AisleGraph::new(layout),
            config,
        }
    }

    pub fn with_defaults(layout: &'a StoreLayout) -> Self {
        Self::new(layout, PathfindingConfig::default())
    }

    pub fn layout(&self) -> &'a StoreLayout {
        self.layout
    }

    pub fn graph(&self) -> &AisleGraph<'a> {
        &self.graph
    }

    pub fn config(&self) -> &PathfindingConfig {
        &self.config
    }

    /// Route between two store-plane points; empty when unreachable
    pub fn find_path(&self, start: Point, end: Point) -> Route {
        match self.find_raw_path(start, end) {
            Some(path) => smoothing::smooth(&path, self.layout),
            None => Route::empty(),
        }
    }

    /// Snap both endpoints to the aisles and run the grid search.
    /// Returns the unsmoothed node sequence.
    pub fn find_raw_path(&self, start: Point, end: Point) -> Option<Vec<Point>> {
        let start = self.graph.nearest_aisle_point(&start);
        let end = self.graph.nearest_aisle_point(&end);
        self.search(start, end)
    }

    fn heuristic(&self, a: &Point, b: &Point) -> f64 {
        match self.config.heuristic {
            Heuristic::Manhattan => a.manhattan(b),
            Heuristic::Euclidean => a.distance(b),
        }
    }

    fn reached(&self, p: &Point, end: &Point) -> bool {
        let grid = self.layout.grid_size();
        (p.x - end.x).abs() <= grid && (p.y - end.y).abs() <= grid
    }

    /// Candidate moves from `p` in a fixed order: nearby junctions first,
    /// then cardinal steps, then diagonals
    fn neighbors(&self, p: &Point) -> Vec<Point> {
        let grid = self.layout.grid_size();
        let mut out = Vec::with_capacity(self.graph.intersections().len() + 8);

        for junction in self.graph.intersections() {
            if junction.within_box(p, grid * 2.0) {
                out.push(*junction);
            }
        }

        let diagonals: &[(f64, f64)] = if self.config.allow_diagonal { &DIAGONAL } else { &[] };
        for &(dx, dy) in CARDINAL.iter().chain(diagonals) {
            out.push(p.offset(dx * grid, dy * grid));
        }

        out.retain(|n| self.layout.is_valid_node(n));
        out
    }

    fn search(&self, start: Point, end: Point) -> Option<Vec<Point>> {
        let radius = self.config.dedup_radius.radius(self.layout.grid_size());
        let mut nodes: Vec<SearchNode> = Vec::new();
        let mut index = NodeIndex::new(radius);
        let mut open: BinaryHeap<OpenEntry> = BinaryHeap::new();

        nodes.push(SearchNode {
            position: start,
            g: 0.0,
            h: self.heuristic(&start, &end),
            parent: None,
            closed: false,
        });
        index.insert(&start, 0);
        open.push(OpenEntry { f: nodes[0].f(), id: 0 });

        let mut expansions = 0usize;
        while let Some(entry) = open.pop() {
            let current = entry.id;
            if nodes[current].closed || entry.f > nodes[current].f() {
                continue; // stale entry
            }

            let position = nodes[current].position;
            if self.reached(&position, &end) {
                let path = reconstruct(&nodes, current);
                debug!(
                    from = ?start,
                    to = ?end,
                    expansions,
                    nodes = nodes.len(),
                    length = path.len(),
                    "path found"
                );
                return Some(path);
            }

            nodes[current].closed = true;
            expansions += 1;
            if expansions > self.config.max_expansions {
                warn!(expansions, "search aborted, expansion limit reached");
                return None;
            }

            trace!(x = position.x, y = position.y, g = nodes[current].g, "expanding");

            for neighbor in self.neighbors(&position) {
                if index.find(&neighbor, &nodes, |n| n.closed).is_some() {
                    continue;
                }

                if let Some(existing) = index.find(&neighbor, &nodes, |n| !n.closed) {
                    if relax(&mut nodes, existing, current) {
                        open.push(OpenEntry { f: nodes[existing].f(), id: existing });
                    }
                    continue;
                }

                let g = nodes[current].g + position.distance(&neighbor);

                let id = nodes.len();
                nodes.push(SearchNode {
                    position: neighbor,
                    g,
                    h: self.heuristic(&neighbor, &end),
                    parent: Some(current),
                    closed: false,
                });
                index.insert(&neighbor, id);
                open.push(OpenEntry { f: nodes[id].f(), id });
            }
        }

        debug!(from = ?start, to = ?end, expansions, "no path found");
        None
    }
}

/// Re-parent `node` onto `parent` when that is cheaper. The cost is measured
/// to the node's own position, which may differ from the candidate that
/// matched it.
fn relax(nodes: &mut [SearchNode], node: usize, parent: usize) -> bool {
    let g = nodes[parent].g + nodes[parent].position.distance(&nodes[node].position);
    if g < nodes[node].g {
        nodes[node].g = g;
        nodes[node].parent = Some(parent);
        true
    } else {
        false
    }
}

fn reconstruct(nodes: &[SearchNode], last: usize) -> Vec<Point> {
    let mut path = Vec::new();
    let mut cursor = Some(last);
    while let Some(id) = cursor {
        path.push(nodes[id].position);
        cursor = nodes[id].parent;
    }
    path.reverse();
    path
}
