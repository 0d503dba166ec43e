//! Node arena for the combined boundary graph of two polygons.
//!
//! Nodes live in a single `Vec` and refer to each other by [`NodeId`], the
//! node's position in that vector. Each polygon starts as a ring where node
//! `i` links to `i - 1` and `i + 1`. Crossing and on-edge splits rewire the
//! rings into one planar graph. Nodes are never removed, only unlinked.

use std::fmt;

use polyclip_math::{Point3, Polygon, Tolerance};
use serde::{Deserialize, Serialize};

use crate::classify::is_inside;

/// Index of a node in a [`Graph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Position in the node arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Monotonic id counter owned by one clip call.
#[derive(Debug, Default)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    /// Start counting at zero.
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Hand out the next id.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }
}

/// Which input polygon a node or edge came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// The polygon being clipped.
    Target,
    /// The clip boundary.
    Clip,
}

impl Origin {
    /// The other polygon.
    pub fn opposite(self) -> Self {
        match self {
            Origin::Target => Origin::Clip,
            Origin::Clip => Origin::Target,
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Origin::Target => write!(f, "target"),
            Origin::Clip => write!(f, "clip"),
        }
    }
}

/// A graph vertex: an input vertex or a computed crossing.
#[derive(Debug, Clone)]
pub struct Node {
    /// Identity, equal to the arena position.
    pub id: NodeId,
    /// Coordinate; z is carried attribute data.
    pub point: Point3,
    /// Inside (or on the boundary of) the opposite polygon.
    pub inside: bool,
    /// Polygon the node was created for. Crossings are tagged `Target`.
    pub origin: Origin,
    /// Adjacent nodes in insertion order, without duplicates.
    pub neighbors: Vec<NodeId>,
}

/// An ordered pair of node ids.
pub type Edge = [NodeId; 2];

/// The combined boundary graph of one clip call.
#[derive(Debug)]
pub struct Graph {
    nodes: Vec<Node>,
    ids: IdGenerator,
    target_ring: Vec<Point3>,
    clip_ring: Vec<Point3>,
    /// Target ring in vertex order. Merged entries point at shared nodes.
    pub target: Vec<NodeId>,
    /// Clip ring in vertex order. Merged entries point at target nodes.
    pub clip: Vec<NodeId>,
    /// Target boundary edges; grows as edges are split.
    pub target_edges: Vec<Edge>,
    /// Clip boundary edges; grows as edges are split.
    pub clip_edges: Vec<Edge>,
}

impl Graph {
    /// Build two independent rings, target first, ids from one generator.
    pub fn new(target: &Polygon, clip: &Polygon) -> Self {
        let mut graph = Self {
            nodes: Vec::with_capacity(target.len() + clip.len()),
            ids: IdGenerator::new(),
            target_ring: target.points.clone(),
            clip_ring: clip.points.clone(),
            target: Vec::with_capacity(target.len()),
            clip: Vec::with_capacity(clip.len()),
            target_edges: Vec::new(),
            clip_edges: Vec::new(),
        };
        graph.target = graph.add_ring(&target.points, Origin::Target);
        graph.clip = graph.add_ring(&clip.points, Origin::Clip);
        graph.rebuild_edges();
        graph
    }

    fn add_ring(&mut self, points: &[Point3], origin: Origin) -> Vec<NodeId> {
        let ring: Vec<NodeId> = points
            .iter()
            .map(|p| self.add_node(*p, false, origin))
            .collect();
        let n = ring.len();
        for i in 0..n {
            let prev = ring[(i + n - 1) % n];
            let next = ring[(i + 1) % n];
            self.link(ring[i], prev);
            self.link(ring[i], next);
        }
        ring
    }

    /// Allocate a node with no neighbors.
    pub fn add_node(&mut self, point: Point3, inside: bool, origin: Origin) -> NodeId {
        let id = self.ids.next_id();
        debug_assert_eq!(id.index(), self.nodes.len());
        self.nodes.push(Node {
            id,
            point,
            inside,
            origin,
            neighbors: Vec::new(),
        });
        id
    }

    /// Borrow a node.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    /// Coordinate of a node.
    #[inline]
    pub fn point(&self, id: NodeId) -> Point3 {
        self.nodes[id.index()].point
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Number of nodes allocated, including unlinked ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The unsplit input vertex ring of a polygon.
    pub fn ring(&self, origin: Origin) -> &[Point3] {
        match origin {
            Origin::Target => &self.target_ring,
            Origin::Clip => &self.clip_ring,
        }
    }

    /// Edge list of an input polygon.
    pub fn edges(&self, origin: Origin) -> &[Edge] {
        match origin {
            Origin::Target => &self.target_edges,
            Origin::Clip => &self.clip_edges,
        }
    }

    /// Link two nodes in both directions. Existing links and self-links are ignored.
    pub fn link(&mut self, a: NodeId, b: NodeId) {
        if a == b {
            return;
        }
        if !self.node(a).neighbors.contains(&b) {
            self.node_mut(a).neighbors.push(b);
        }
        if !self.node(b).neighbors.contains(&a) {
            self.node_mut(b).neighbors.push(a);
        }
    }

    /// Remove the link between two nodes in both directions.
    pub fn unlink(&mut self, a: NodeId, b: NodeId) {
        self.node_mut(a).neighbors.retain(|&n| n != b);
        self.node_mut(b).neighbors.retain(|&n| n != a);
    }

    /// Regenerate both edge lists from the ring lists.
    pub fn rebuild_edges(&mut self) {
        self.target_edges = ring_edges(&self.target);
        self.clip_edges = ring_edges(&self.clip);
    }

    /// Flag every node of `origin` that lies inside the opposite polygon.
    ///
    /// Returns true when all of them are inside.
    pub fn classify(&mut self, origin: Origin, tol: &Tolerance) -> bool {
        let members = match origin {
            Origin::Target => self.target.clone(),
            Origin::Clip => self.clip.clone(),
        };
        let mut count = 0;
        for id in &members {
            let point = self.point(*id);
            if is_inside(&point, self.ring(origin.opposite()), tol) {
                self.node_mut(*id).inside = true;
                count += 1;
            }
        }
        count == members.len()
    }

    /// Snap clip vertices onto target vertices with the same planar position.
    ///
    /// The clip entry is replaced by the target node, its neighbors are
    /// rewired to the target node, and the inside flags are combined. The
    /// orphaned clip node keeps its slot but has no neighbors.
    pub fn merge_coincident(&mut self, tol: &Tolerance) -> usize {
        let mut merged = 0;
        for ci in 0..self.clip.len() {
            let cid = self.clip[ci];
            let cp = self.point(cid);
            let Some(tid) = self
                .target
                .iter()
                .copied()
                .find(|&t| tol.points_equal(&self.point(t), &cp))
            else {
                continue;
            };
            if tid == cid {
                continue;
            }
            let neighbors = std::mem::take(&mut self.node_mut(cid).neighbors);
            for nb in neighbors {
                self.node_mut(nb).neighbors.retain(|&n| n != cid);
                self.link(nb, tid);
            }
            let inside = self.node(cid).inside;
            self.node_mut(tid).inside |= inside;
            self.clip[ci] = tid;
            merged += 1;
        }
        if merged > 0 {
            self.rebuild_edges();
        }
        merged
    }

    /// Split edges of the opposite polygon at vertices of `origin` lying on them.
    ///
    /// Each touching vertex is flagged inside. A vertex equal to an edge
    /// endpoint is flagged without splitting.
    pub fn split_on_edges(&mut self, origin: Origin, tol: &Tolerance) -> usize {
        let members = match origin {
            Origin::Target => self.target.clone(),
            Origin::Clip => self.clip.clone(),
        };
        let mut splits = 0;
        for v in members {
            let p = self.point(v);
            let mut i = 0;
            while i < self.edges(origin.opposite()).len() {
                let [a, b] = self.edges(origin.opposite())[i];
                i += 1;
                if v == a || v == b {
                    self.node_mut(v).inside = true;
                    continue;
                }
                let (pa, pb) = (self.point(a), self.point(b));
                if tol.points_equal(&p, &pa) || tol.points_equal(&p, &pb) {
                    self.node_mut(v).inside = true;
                    continue;
                }
                if !tol.point_on_segment(&p, &pa, &pb) {
                    continue;
                }
                self.node_mut(v).inside = true;
                self.unlink(a, b);
                self.link(a, v);
                self.link(v, b);
                let edges = match origin.opposite() {
                    Origin::Target => &mut self.target_edges,
                    Origin::Clip => &mut self.clip_edges,
                };
                edges[i - 1] = [a, v];
                edges.push([v, b]);
                splits += 1;
            }
        }
        splits
    }

    /// Merge shared vertices, then split both polygons at on-edge touches.
    pub fn prepare(&mut self, tol: &Tolerance) {
        let merged = self.merge_coincident(tol);
        let target_touches = self.split_on_edges(Origin::Target, tol);
        let clip_touches = self.split_on_edges(Origin::Clip, tol);
        debug_clip!(
            "prepare: merged={} target on clip edges={} clip on target edges={}",
            merged,
            target_touches,
            clip_touches
        );
    }

    /// Insert a crossing node between target edge `ti` and clip edge `ci`.
    ///
    /// Both edges are detached and reattached through the new node, whose
    /// neighbors are `[from, to, cross1, cross2]`. Edge `ti` becomes
    /// `(from, x)` and `(x, to)` is appended; the clip edge likewise.
    pub fn split_crossing(&mut self, ti: usize, ci: usize, point: Point3) -> NodeId {
        let [from, to] = self.target_edges[ti];
        let [cross1, cross2] = self.clip_edges[ci];
        let x = self.add_node(point, true, Origin::Target);

        self.unlink(from, to);
        self.unlink(cross1, cross2);
        self.link(x, from);
        self.link(x, to);
        self.link(x, cross1);
        self.link(x, cross2);

        self.target_edges[ti] = [from, x];
        self.target_edges.push([x, to]);
        self.clip_edges[ci] = [cross1, x];
        self.clip_edges.push([x, cross2]);

        debug_clip!(
            "split: {} on ({}, {}) x ({}, {}) at ({:.6}, {:.6}, {:.6})",
            x,
            from,
            to,
            cross1,
            cross2,
            point.x,
            point.y,
            point.z
        );
        x
    }

    /// Find which edge list holds the undirected edge `a`-`b`.
    ///
    /// Target edges are searched first.
    pub fn edge_owner(&self, a: NodeId, b: NodeId) -> Option<(Origin, usize)> {
        let matches = |e: &Edge| (e[0] == a && e[1] == b) || (e[0] == b && e[1] == a);
        if let Some(i) = self.target_edges.iter().position(matches) {
            return Some((Origin::Target, i));
        }
        self.clip_edges
            .iter()
            .position(matches)
            .map(|i| (Origin::Clip, i))
    }
}

fn ring_edges(ring: &[NodeId]) -> Vec<Edge> {
    let n = ring.len();
    if n < 2 {
        return Vec::new();
    }
    (0..n).map(|i| [ring[i], ring[(i + 1) % n]]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon {
        Polygon::from_xy(&[
            (x0, y0),
            (x0 + size, y0),
            (x0 + size, y0 + size),
            (x0, y0 + size),
        ])
    }

    #[test]
    fn test_rings_and_ids() {
        let g = Graph::new(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0));
        assert_eq!(g.len(), 8);
        for (i, node) in g.nodes().iter().enumerate() {
            assert_eq!(node.id.index(), i);
            assert_eq!(node.neighbors.len(), 2);
        }
        assert_eq!(g.node(NodeId(0)).neighbors, vec![NodeId(3), NodeId(1)]);
        assert_eq!(g.node(NodeId(4)).origin, Origin::Clip);
        assert_eq!(g.target_edges.len(), 4);
        assert_eq!(g.clip_edges[3], [NodeId(7), NodeId(4)]);
    }

    #[test]
    fn test_classify() {
        let tol = Tolerance::DEFAULT;
        let mut g = Graph::new(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0));
        assert!(!g.classify(Origin::Target, &tol));
        let inside: Vec<bool> = g.target.iter().map(|&id| g.node(id).inside).collect();
        assert_eq!(inside, vec![false, false, true, false]);
    }

    #[test]
    fn test_split_crossing_rewires_four_half_edges() {
        let mut g = Graph::new(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0));
        // Target edge (2,0)-(2,2) crosses clip edge (1,1)-(3,1)
        let x = g.split_crossing(1, 0, Point3::new(2.0, 1.0, 0.0));
        assert_eq!(x, NodeId(8));
        let n1 = NodeId(1);
        let n2 = NodeId(2);
        let c4 = NodeId(4);
        let c5 = NodeId(5);
        assert_eq!(g.node(x).neighbors, vec![n1, n2, c4, c5]);
        assert!(!g.node(n1).neighbors.contains(&n2));
        assert!(!g.node(c4).neighbors.contains(&c5));
        assert!(g.node(x).inside);
        assert_eq!(g.target_edges[1], [n1, x]);
        assert_eq!(g.target_edges[4], [x, n2]);
        assert_eq!(g.clip_edges[0], [c4, x]);
        assert_eq!(g.clip_edges[4], [x, c5]);
    }

    #[test]
    fn test_merge_shared_vertex() {
        let tol = Tolerance::DEFAULT;
        // Clip shares the target vertex (2, 2)
        let mut g = Graph::new(&square(0.0, 0.0, 2.0), &square(2.0, 2.0, 2.0));
        let merged = g.merge_coincident(&tol);
        assert_eq!(merged, 1);
        assert_eq!(g.clip[0], NodeId(2));
        assert!(g.node(NodeId(4)).neighbors.is_empty());
        // Target (2,2) now links its two target and two clip neighbors
        let nb = &g.node(NodeId(2)).neighbors;
        assert_eq!(nb.len(), 4);
        assert!(nb.contains(&NodeId(5)) && nb.contains(&NodeId(7)));
        assert_eq!(g.clip_edges[0], [NodeId(2), NodeId(5)]);
    }

    #[test]
    fn test_on_edge_split() {
        let tol = Tolerance::DEFAULT;
        // Clip triangle touches the target's right edge at (2, 1)
        let target = square(0.0, 0.0, 2.0);
        let clip = Polygon::from_xy(&[(2.0, 1.0), (4.0, 0.0), (4.0, 2.0)]);
        let mut g = Graph::new(&target, &clip);
        let splits = g.split_on_edges(Origin::Clip, &tol);
        assert_eq!(splits, 1);
        let v = NodeId(4);
        assert!(g.node(v).inside);
        assert_eq!(g.target_edges[1], [NodeId(1), v]);
        assert_eq!(g.target_edges[4], [v, NodeId(2)]);
        assert!(!g.node(NodeId(1)).neighbors.contains(&NodeId(2)));
        assert_eq!(g.node(v).neighbors.len(), 4);
    }

    #[test]
    fn test_edge_owner() {
        let g = Graph::new(&square(0.0, 0.0, 2.0), &square(1.0, 1.0, 2.0));
        assert_eq!(g.edge_owner(NodeId(1), NodeId(0)), Some((Origin::Target, 0)));
        assert_eq!(g.edge_owner(NodeId(4), NodeId(7)), Some((Origin::Clip, 3)));
        assert_eq!(g.edge_owner(NodeId(0), NodeId(2)), None);
    }
}
