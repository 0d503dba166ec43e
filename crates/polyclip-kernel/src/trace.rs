//! Boundary loop tracing over the combined graph.
//!
//! Two strategies produce the same loop for well-behaved input:
//!
//! - [`trace_eager`] splits every crossing first (restarting the scan after
//!   each split), keeps the edges that lie on the overlap boundary and walks
//!   them as a single cycle.
//! - [`trace_lazy`] walks the rings directly and resolves a crossing only
//!   when the walk reaches the edge that holds it.
//!
//! Both are bounded by [`ClipSettings::max_iterations`].

use std::collections::{BTreeMap, BTreeSet};

use polyclip_math::polygon::signed_area;
use polyclip_math::{lerp, Point3, Tolerance};

use crate::classify::is_inside;
use crate::error::{ClipError, Result};
use crate::graph::{Edge, Graph, NodeId, Origin};
use crate::segment::intersect;
use crate::settings::ClipSettings;

/// Split every proper crossing between target and clip edges.
///
/// The scan restarts after each split because splitting appends new edges.
/// Returns the number of crossing nodes inserted.
pub fn split_all_crossings(graph: &mut Graph, settings: &ClipSettings) -> Result<usize> {
    let tol = settings.tolerance();
    let mut splits = 0;
    'scan: loop {
        for ti in 0..graph.target_edges.len() {
            let [a1, a2] = graph.target_edges[ti];
            let (pa1, pa2) = (graph.point(a1), graph.point(a2));
            for ci in 0..graph.clip_edges.len() {
                let [b1, b2] = graph.clip_edges[ci];
                let Some(hit) = intersect(&pa1, &pa2, &graph.point(b1), &graph.point(b2), &tol)
                else {
                    continue;
                };
                if splits == settings.max_iterations {
                    return Err(ClipError::IterationLimitExceeded(settings.max_iterations));
                }
                graph.split_crossing(ti, ci, hit.point);
                splits += 1;
                continue 'scan;
            }
        }
        return Ok(splits);
    }
}

/// Edges on the boundary of the overlap region.
///
/// Target edges come first, then clip edges. An edge qualifies when both
/// endpoints are flagged inside and its midpoint is inside both input
/// polygons. An undirected edge present in both lists is kept once.
pub fn relevant_edges(graph: &Graph, tol: &Tolerance) -> Vec<Edge> {
    let mut seen = BTreeSet::new();
    let mut relevant = Vec::new();
    for &[a, b] in graph.target_edges.iter().chain(graph.clip_edges.iter()) {
        if !graph.node(a).inside || !graph.node(b).inside {
            continue;
        }
        let mid = lerp(&graph.point(a), &graph.point(b), 0.5);
        if !is_inside(&mid, graph.ring(Origin::Target), tol)
            || !is_inside(&mid, graph.ring(Origin::Clip), tol)
        {
            continue;
        }
        if seen.insert((a.min(b), a.max(b))) {
            relevant.push([a, b]);
        }
    }
    relevant
}

/// Drop edges with an endpoint of degree one until none are left.
///
/// What remains is the union of the cycles in `edges`. A shared boundary
/// segment or collinear run between polygons on opposite sides prunes away
/// completely.
pub fn prune_dangling(mut edges: Vec<Edge>) -> Vec<Edge> {
    loop {
        let mut degree: BTreeMap<NodeId, usize> = BTreeMap::new();
        for &[a, b] in &edges {
            *degree.entry(a).or_default() += 1;
            *degree.entry(b).or_default() += 1;
        }
        let before = edges.len();
        edges.retain(|[a, b]| degree[a] > 1 && degree[b] > 1);
        if edges.len() == before {
            return edges;
        }
    }
}

/// Split all crossings, then walk the relevant-edge cycle.
///
/// Returns an empty loop when no edge lies on an overlap boundary, or when
/// the polygons only touch and the traced loop encloses no area.
pub fn trace_eager(graph: &mut Graph, settings: &ClipSettings) -> Result<Vec<NodeId>> {
    let tol = settings.tolerance();
    let splits = split_all_crossings(graph, settings)?;
    let relevant = relevant_edges(graph, &tol);
    let found = relevant.len();
    let cycles = prune_dangling(relevant);
    debug_clip!(
        "eager: {} crossings, {} relevant edges, {} on cycles",
        splits,
        found,
        cycles.len()
    );
    if cycles.is_empty() {
        return Ok(Vec::new());
    }
    let path = walk_cycle(&cycles, settings.max_iterations)?;
    if encloses_no_area(graph, &path, &tol) {
        return Ok(Vec::new());
    }
    Ok(path)
}

fn encloses_no_area(graph: &Graph, path: &[NodeId], tol: &Tolerance) -> bool {
    let pts: Vec<Point3> = path.iter().map(|&id| graph.point(id)).collect();
    signed_area(&pts).abs() <= tol.linear
}

/// Walk `edges` as one cycle, starting along the first edge.
///
/// Fails when a node has no onward neighbor or when the cycle does not use
/// every edge (a disconnected or multi-loop arrangement).
pub fn walk_cycle(edges: &[Edge], max_iterations: usize) -> Result<Vec<NodeId>> {
    let Some(&[start, first]) = edges.first() else {
        return Ok(Vec::new());
    };

    let mut adjacency: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
    for &[a, b] in edges {
        adjacency.entry(a).or_default().push(b);
        adjacency.entry(b).or_default().push(a);
    }

    let mut path = vec![start];
    let mut prev = start;
    let mut current = first;
    while current != start {
        if path.len() > max_iterations {
            return Err(ClipError::IterationLimitExceeded(max_iterations));
        }
        path.push(current);
        let next = adjacency
            .get(&current)
            .and_then(|nbs| nbs.iter().copied().find(|&n| n != prev))
            .ok_or_else(|| ClipError::TraceFailure(format!("no next node after {current}")))?;
        prev = current;
        current = next;
    }

    if path.len() != edges.len() {
        return Err(ClipError::TraceFailure(format!(
            "incomplete loop: visited {} nodes but have {} edges",
            path.len(),
            edges.len()
        )));
    }
    Ok(path)
}

enum Step {
    Advance(NodeId),
    Closed,
}

/// Walk the rings, splitting crossings as they are reached.
///
/// The walk starts at the first inside node along the target edges. When no
/// target edge touches an inside node it starts at the nearest crossing on
/// the first target edge that has one. Returns an empty loop when there is
/// neither.
///
/// A walk that dead-ends before enclosing any area is handed to
/// [`trace_eager`] on the partly split graph, which settles touches that
/// only share vertices or boundary segments.
pub fn trace_lazy(graph: &mut Graph, settings: &ClipSettings) -> Result<Vec<NodeId>> {
    let tol = settings.tolerance();
    let Some(start) = lazy_start(graph, &tol) else {
        return Ok(Vec::new());
    };
    debug_clip!("lazy: start at {}", start);

    let mut path = vec![start];
    let mut prev = None;
    let mut current = start;
    for _ in 0..settings.max_iterations {
        match lazy_step(graph, current, prev, start, &tol) {
            Err(ClipError::TraceFailure(reason)) if encloses_no_area(graph, &path, &tol) => {
                debug_clip!("lazy: {}, retrying eagerly", reason);
                return trace_eager(graph, settings);
            }
            Err(e) => return Err(e),
            Ok(Step::Closed) if encloses_no_area(graph, &path, &tol) => return Ok(Vec::new()),
            Ok(Step::Closed) => return Ok(path),
            Ok(Step::Advance(next)) => {
                path.push(next);
                prev = Some(current);
                current = next;
            }
        }
    }
    Err(ClipError::IterationLimitExceeded(settings.max_iterations))
}

fn lazy_start(graph: &mut Graph, tol: &Tolerance) -> Option<NodeId> {
    if let Some(&[a, _]) = graph
        .target_edges
        .iter()
        .find(|&&[a, _]| graph.node(a).inside)
    {
        return Some(a);
    }
    for ti in 0..graph.target_edges.len() {
        let [a, b] = graph.target_edges[ti];
        if let Some(crossing) = nearest_crossing(graph, a, b, Origin::Target, tol) {
            return Some(graph.split_crossing(ti, crossing.other, crossing.point));
        }
    }
    None
}

struct Crossing {
    /// Index into the opposite polygon's edge list.
    other: usize,
    /// Parameter along the walked edge.
    along: f64,
    /// Crossing point, z taken from the target edge.
    point: Point3,
}

/// Nearest proper crossing walking from `a` to `b`, an edge of `origin`.
fn nearest_crossing(
    graph: &Graph,
    a: NodeId,
    b: NodeId,
    origin: Origin,
    tol: &Tolerance,
) -> Option<Crossing> {
    let (pa, pb) = (graph.point(a), graph.point(b));
    let mut best: Option<Crossing> = None;
    for (other, &[c1, c2]) in graph.edges(origin.opposite()).iter().enumerate() {
        let (pc1, pc2) = (graph.point(c1), graph.point(c2));
        let found = match origin {
            Origin::Target => intersect(&pa, &pb, &pc1, &pc2, tol).map(|h| (h.t, h.point)),
            Origin::Clip => intersect(&pc1, &pc2, &pa, &pb, tol).map(|h| (h.u, h.point)),
        };
        if let Some((along, point)) = found {
            if best.as_ref().map_or(true, |c| along < c.along) {
                best = Some(Crossing {
                    other,
                    along,
                    point,
                });
            }
        }
    }
    best
}

fn lazy_step(
    graph: &mut Graph,
    current: NodeId,
    prev: Option<NodeId>,
    start: NodeId,
    tol: &Tolerance,
) -> Result<Step> {
    let neighbors = graph.node(current).neighbors.clone();
    for n in neighbors {
        if Some(n) == prev {
            continue;
        }
        let Some((origin, index)) = graph.edge_owner(current, n) else {
            continue;
        };

        let crossing = nearest_crossing(graph, current, n, origin, tol);
        let candidate = match &crossing {
            Some(c) => c.point,
            None if graph.node(n).inside => graph.point(n),
            None => continue,
        };
        let mid = lerp(&graph.point(current), &candidate, 0.5);
        if !is_inside(&mid, graph.ring(origin.opposite()), tol) {
            continue;
        }

        let Some(c) = crossing else {
            if n == start {
                return Ok(Step::Closed);
            }
            return Ok(Step::Advance(n));
        };
        let x = match origin {
            Origin::Target => graph.split_crossing(index, c.other, c.point),
            Origin::Clip => graph.split_crossing(c.other, index, c.point),
        };
        return Ok(Step::Advance(x));
    }
    Err(ClipError::TraceFailure(format!(
        "failed to find next node after {current}"
    )))
}
