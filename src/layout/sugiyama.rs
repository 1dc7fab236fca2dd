//! Sugiyama layered graph layout, ranks running top to bottom.
//!
//! Phases:
//!   1. Cycle removal (greedy-FAS), skipped when petgraph finds a
//!      topological order
//!   2. Layer assignment (longest path)
//!   3. Dummy node insertion
//!   4. Crossing minimisation (barycenter)
//!   5. Coordinate assignment
//!
//! Nodes are addressed by position: `0..real_count` are the graph's nodes in
//! insertion order, anything above is a dummy. No phase iterates a hash
//! container, so equal graphs always get equal coordinates.

use log::trace;

use super::graph::LayoutGraph;
use crate::config::LayoutConfig;

// ─── Mini-graph helpers ──────────────────────────────────────────────────────

/// Successor and predecessor lists over node positions.
#[derive(Debug, Clone, Default)]
pub struct AdjGraph {
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
    edges: Vec<(usize, usize)>,
}

impl AdjGraph {
    pub fn with_nodes(count: usize) -> Self {
        Self {
            successors: vec![Vec::new(); count],
            predecessors: vec![Vec::new(); count],
            edges: Vec::new(),
        }
    }

    /// Build from a LayoutGraph, keeping its node positions and edge order.
    pub fn from_layout_graph(lg: &LayoutGraph) -> Self {
        let mut ag = Self::with_nodes(lg.node_count());
        for (src, tgt) in lg.index_edges() {
            ag.add_edge(src, tgt);
        }
        ag
    }

    fn add_node(&mut self) -> usize {
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        self.successors.len() - 1
    }

    fn add_edge(&mut self, src: usize, tgt: usize) {
        self.successors[src].push(tgt);
        self.predecessors[tgt].push(src);
        self.edges.push((src, tgt));
    }

    pub fn node_count(&self) -> usize {
        self.successors.len()
    }

    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    pub fn successors_of(&self, node: usize) -> &[usize] {
        &self.successors[node]
    }

    pub fn predecessors_of(&self, node: usize) -> &[usize] {
        &self.predecessors[node]
    }
}

// ─── Cycle Removal (Greedy-FAS) ─────────────────────────────────────────────

/// Node ordering by the greedy-FAS heuristic: sinks go to the back, sources
/// to the front, and otherwise the node with the largest out-minus-in
/// degree goes to the front. Ties go to the lowest position.
fn greedy_fas_ordering(ag: &AdjGraph) -> Vec<usize> {
    let n = ag.node_count();
    let mut active = vec![true; n];
    let mut out_deg: Vec<i64> = (0..n).map(|v| ag.successors_of(v).len() as i64).collect();
    let mut in_deg: Vec<i64> = (0..n).map(|v| ag.predecessors_of(v).len() as i64).collect();

    let mut s1: Vec<usize> = Vec::new();
    let mut s2: Vec<usize> = Vec::new();

    loop {
        loop {
            let sinks: Vec<usize> = (0..n).filter(|&v| active[v] && out_deg[v] == 0).collect();
            if sinks.is_empty() {
                break;
            }
            for sink in sinks {
                deactivate(ag, sink, &mut active, &mut out_deg, &mut in_deg);
                s2.push(sink);
            }
        }

        loop {
            let sources: Vec<usize> = (0..n).filter(|&v| active[v] && in_deg[v] == 0).collect();
            if sources.is_empty() {
                break;
            }
            for source in sources {
                deactivate(ag, source, &mut active, &mut out_deg, &mut in_deg);
                s1.push(source);
            }
        }

        let mut best: Option<(usize, i64)> = None;
        for v in (0..n).filter(|&v| active[v]) {
            let delta = out_deg[v] - in_deg[v];
            if best.is_none_or(|(_, d)| delta > d) {
                best = Some((v, delta));
            }
        }
        match best {
            Some((v, _)) => {
                deactivate(ag, v, &mut active, &mut out_deg, &mut in_deg);
                s1.push(v);
            }
            None => break,
        }
    }

    s2.reverse();
    s1.extend(s2);
    s1
}

/// Take `v` out of the active set and update its neighbours' degrees.
fn deactivate(ag: &AdjGraph, v: usize, active: &mut [bool], out_deg: &mut [i64], in_deg: &mut [i64]) {
    active[v] = false;
    for &succ in ag.successors_of(v) {
        if active[succ] {
            in_deg[succ] -= 1;
        }
    }
    for &pred in ag.predecessors_of(v) {
        if active[pred] {
            out_deg[pred] -= 1;
        }
    }
}

/// The acyclic version of `ag`: every edge pointing backwards in the FAS
/// ordering is reversed. Returns the DAG, the ordering (a topological order
/// of the DAG) and the number of reversed edges.
pub fn remove_cycles(ag: &AdjGraph) -> (AdjGraph, Vec<usize>, usize) {
    let ordering = greedy_fas_ordering(ag);
    let mut position = vec![0usize; ag.node_count()];
    for (i, &v) in ordering.iter().enumerate() {
        position[v] = i;
    }

    let mut dag = AdjGraph::with_nodes(ag.node_count());
    let mut reversed = 0usize;
    for &(src, tgt) in ag.edges() {
        if position[src] > position[tgt] {
            dag.add_edge(tgt, src);
            reversed += 1;
        } else {
            dag.add_edge(src, tgt);
        }
    }
    (dag, ordering, reversed)
}

// ─── Layer Assignment ────────────────────────────────────────────────────────

pub struct LayerAssignment {
    pub dag: AdjGraph,
    /// Rank per node position.
    pub layers: Vec<usize>,
    pub layer_count: usize,
    pub reversed_edges: usize,
}

impl LayerAssignment {
    /// Longest-path layering of the cycle-free graph. Sources and isolated
    /// nodes land on rank 0.
    pub fn assign(ag: &AdjGraph) -> Self {
        let (dag, order, reversed_edges) = remove_cycles(ag);
        Self::longest_path(dag, &order, reversed_edges)
    }

    /// Layering of a graph already known to be acyclic, walked in the given
    /// topological order. No edge is reversed.
    pub fn assign_acyclic(ag: &AdjGraph, order: &[usize]) -> Self {
        Self::longest_path(ag.clone(), order, 0)
    }

    fn longest_path(dag: AdjGraph, order: &[usize], reversed_edges: usize) -> Self {
        let mut layers = vec![0usize; dag.node_count()];
        for &v in order {
            for &succ in dag.successors_of(v) {
                layers[succ] = layers[succ].max(layers[v] + 1);
            }
        }

        let layer_count = layers.iter().copied().max().map_or(1, |max| max + 1);

        Self {
            dag,
            layers,
            layer_count,
            reversed_edges,
        }
    }
}

// ─── Dummy Node Insertion ────────────────────────────────────────────────────

/// The DAG with every rank-spanning edge split into unit-length segments.
pub struct AugmentedGraph {
    pub ag: AdjGraph,
    pub layers: Vec<usize>,
    pub layer_count: usize,
    /// Positions below this are real nodes.
    pub real_count: usize,
}

impl AugmentedGraph {
    pub fn is_dummy(&self, node: usize) -> bool {
        node >= self.real_count
    }
}

pub fn insert_dummy_nodes(la: &LayerAssignment) -> AugmentedGraph {
    let real_count = la.dag.node_count();
    let mut ag = AdjGraph::with_nodes(real_count);
    let mut layers = la.layers.clone();

    for &(src, tgt) in la.dag.edges() {
        let src_layer = layers[src];
        let tgt_layer = layers[tgt];
        if tgt_layer <= src_layer + 1 {
            ag.add_edge(src, tgt);
            continue;
        }

        let mut chain_prev = src;
        for layer in src_layer + 1..tgt_layer {
            let dummy = ag.add_node();
            layers.push(layer);
            ag.add_edge(chain_prev, dummy);
            chain_prev = dummy;
        }
        ag.add_edge(chain_prev, tgt);
    }

    AugmentedGraph {
        ag,
        layers,
        layer_count: la.layer_count,
        real_count,
    }
}

// ─── Crossing Minimization ───────────────────────────────────────────────────

#[derive(Clone, Copy)]
enum Sweep {
    /// Order a layer by its predecessors in the layer above.
    Down,
    /// Order a layer by its successors in the layer below.
    Up,
}

/// Reorder `ordering[layer]` by the mean position of its neighbours in
/// `ordering[fixed]`. Nodes without such neighbours keep their position.
fn reorder_layer(ordering: &mut [Vec<usize>], layer: usize, fixed: usize, ag: &AdjGraph, sweep: Sweep) {
    let mut position = vec![None; ag.node_count()];
    for (i, &v) in ordering[fixed].iter().enumerate() {
        position[v] = Some(i as f64);
    }

    let mut keyed: Vec<(f64, usize)> = ordering[layer]
        .iter()
        .enumerate()
        .map(|(current, &v)| {
            let neighbors = match sweep {
                Sweep::Down => ag.predecessors_of(v),
                Sweep::Up => ag.successors_of(v),
            };
            let placed: Vec<f64> = neighbors.iter().filter_map(|&nb| position[nb]).collect();
            let key = if placed.is_empty() {
                current as f64
            } else {
                placed.iter().sum::<f64>() / placed.len() as f64
            };
            (key, v)
        })
        .collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    ordering[layer] = keyed.into_iter().map(|(_, v)| v).collect();
}

pub fn count_crossings(ordering: &[Vec<usize>], ag: &AdjGraph) -> usize {
    let mut position = vec![0usize; ag.node_count()];
    for layer in ordering {
        for (i, &v) in layer.iter().enumerate() {
            position[v] = i;
        }
    }

    let mut total = 0usize;
    for l_idx in 0..ordering.len().saturating_sub(1) {
        let mut segments: Vec<(usize, usize)> = Vec::new();
        for &src in &ordering[l_idx] {
            for &tgt in ag.successors_of(src) {
                segments.push((position[src], position[tgt]));
            }
        }
        for i in 0..segments.len() {
            for j in (i + 1)..segments.len() {
                let (ei0, ei1) = segments[i];
                let (ej0, ej1) = segments[j];
                if (ei0 < ej0 && ei1 > ej1) || (ei0 > ej0 && ei1 < ej1) {
                    total += 1;
                }
            }
        }
    }
    total
}

/// Barycenter sweeps, down then up, keeping the ordering with the fewest
/// crossings. Stops at the first sweep that does not improve.
pub fn minimise_crossings(aug: &AugmentedGraph, max_passes: usize) -> Vec<Vec<usize>> {
    let layer_count = aug.layer_count;
    let mut ordering: Vec<Vec<usize>> = vec![Vec::new(); layer_count];
    for (node, &layer) in aug.layers.iter().enumerate() {
        ordering[layer].push(node);
    }

    let mut best = ordering.clone();
    let mut best_crossings = count_crossings(&ordering, &aug.ag);

    for pass in 0..max_passes {
        if best_crossings == 0 {
            break;
        }
        for layer_idx in 1..layer_count {
            reorder_layer(&mut ordering, layer_idx, layer_idx - 1, &aug.ag, Sweep::Down);
        }
        for layer_idx in (0..layer_count.saturating_sub(1)).rev() {
            reorder_layer(&mut ordering, layer_idx, layer_idx + 1, &aug.ag, Sweep::Up);
        }

        let crossings = count_crossings(&ordering, &aug.ag);
        trace!(pass = pass, crossings = crossings; "Barycenter sweep");
        if crossings >= best_crossings {
            break;
        }
        best = ordering.clone();
        best_crossings = crossings;
    }

    best
}

// ─── Coordinate Assignment ───────────────────────────────────────────────────

/// Box centers for every node position, real and dummy.
///
/// Each layer is laid out left to right with `horizontal_gap` between
/// boxes and centered on the widest layer. Every layer below the first is
/// then shifted as a block toward the mean center of its parents, which
/// keeps the gaps intact. Finally the drawing is moved so its left and top
/// edges sit at `margin`.
pub fn assign_coordinates(
    ordering: &[Vec<usize>],
    aug: &AugmentedGraph,
    sizes: &[(f64, f64)],
    config: &LayoutConfig,
) -> Vec<(f64, f64)> {
    let dims = |node: usize| -> (f64, f64) {
        if aug.is_dummy(node) {
            (config.dummy_width, 0.0)
        } else {
            sizes[node]
        }
    };

    let mut centers = vec![(0.0, 0.0); aug.ag.node_count()];

    // y: stack layers by their tallest box
    let mut top = config.margin;
    for layer_nodes in ordering {
        let layer_height = layer_nodes
            .iter()
            .map(|&v| dims(v).1)
            .fold(0.0, f64::max);
        for &v in layer_nodes {
            centers[v].1 = top + layer_height / 2.0;
        }
        top += layer_height + config.vertical_gap;
    }

    // x: pack each layer, centered on the widest one
    let layer_widths: Vec<f64> = ordering
        .iter()
        .map(|layer_nodes| {
            let boxes: f64 = layer_nodes.iter().map(|&v| dims(v).0).sum();
            let gaps = layer_nodes.len().saturating_sub(1) as f64 * config.horizontal_gap;
            boxes + gaps
        })
        .collect();
    let max_width = layer_widths.iter().copied().fold(0.0, f64::max);

    for (layer_idx, layer_nodes) in ordering.iter().enumerate() {
        let mut x = (max_width - layer_widths[layer_idx]) / 2.0;
        for &v in layer_nodes {
            let width = dims(v).0;
            centers[v].0 = x + width / 2.0;
            x += width + config.horizontal_gap;
        }
    }

    // Barycenter refinement — shift each layer toward its parents
    for layer_nodes in ordering.iter().skip(1) {
        let mut sum = 0.0;
        let mut count = 0usize;
        for &v in layer_nodes {
            for &parent in aug.ag.predecessors_of(v) {
                sum += centers[parent].0 - centers[v].0;
                count += 1;
            }
        }
        if count == 0 {
            continue;
        }
        let shift = sum / count as f64;
        for &v in layer_nodes {
            centers[v].0 += shift;
        }
    }

    // Normalize so the leftmost box starts at the margin
    let min_left = (0..centers.len())
        .map(|v| centers[v].0 - dims(v).0 / 2.0)
        .fold(f64::INFINITY, f64::min);
    if min_left.is_finite() {
        let offset = config.margin - min_left;
        for center in &mut centers {
            center.0 += offset;
        }
    }

    centers
}

// ─── SugiyamaLayout Engine ───────────────────────────────────────────────────

/// Centers and ranks of the real nodes, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct SugiyamaResult {
    pub centers: Vec<(f64, f64)>,
    pub ranks: Vec<usize>,
}

/// Sugiyama layered layout engine.
pub struct SugiyamaLayout;

impl SugiyamaLayout {
    /// Run all phases. `sizes` holds `(width, height)` per node position.
    pub fn layout(lg: &LayoutGraph, sizes: &[(f64, f64)], config: &LayoutConfig) -> SugiyamaResult {
        let ag = AdjGraph::from_layout_graph(lg);
        let la = match lg.topological_order() {
            Some(order) => LayerAssignment::assign_acyclic(&ag, &order),
            None => LayerAssignment::assign(&ag),
        };
        trace!(
            nodes = ag.node_count(),
            layers = la.layer_count,
            reversed = la.reversed_edges;
            "Layer assignment done"
        );

        let aug = insert_dummy_nodes(&la);
        let ordering = minimise_crossings(&aug, config.max_crossing_passes);
        trace!(
            dummies = aug.ag.node_count() - aug.real_count,
            crossings = count_crossings(&ordering, &aug.ag);
            "Ordering done"
        );

        let mut centers = assign_coordinates(&ordering, &aug, sizes, config);
        centers.truncate(aug.real_count);
        let mut ranks = aug.layers;
        ranks.truncate(aug.real_count);

        SugiyamaResult { centers, ranks }
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_layout_sugiyama.rs"]
mod tests;
