//! A balanced kd-tree whose nodes can carry aggregated subtree data.
//!
//! Every node owns one item and at most two children. Construction splits on the
//! coordinate with the widest spread, taking the median item as the node's own
//! item, so depth is `O(log n)`.
//!
//! Aggregates are a separate, explicit phase: [`KdTree::build`] leaves them
//! unset and [`KdTree::propagate_data`] fills in, for every node, the bounding
//! box and weighted centroid of its whole subtree. Visitors that read
//! aggregates are only meaningful after propagation.

use std::ops::ControlFlow;

use log::trace;

use crate::bounding_box::BoundingBox;
use crate::error::{Error, Result};
use crate::point::{Point, PointLike};
use crate::stats::MeanAccumulator;

/// Aggregated data for the subtree rooted at a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeData<const D: usize> {
    bounding_box: BoundingBox<D>,
    centroid: MeanAccumulator<D>,
}

impl<const D: usize> NodeData<D> {
    /// Combine a node's own item with its children's aggregates.
    ///
    /// Children must already have been propagated.
    fn aggregate<T: PointLike<D>>(
        point: &T,
        left: Option<&Node<T, D>>,
        right: Option<&Node<T, D>>,
    ) -> Self {
        let mut bounding_box = BoundingBox::new(point.location());
        let mut centroid = MeanAccumulator::new();
        point.accumulate(&mut centroid);
        for data in [left, right].into_iter().flatten().filter_map(Node::data) {
            bounding_box.add_box(&data.bounding_box);
            centroid += &data.centroid;
        }
        Self {
            bounding_box,
            centroid,
        }
    }

    /// Bounding box of every item in the subtree.
    pub fn bounding_box(&self) -> &BoundingBox<D> {
        &self.bounding_box
    }

    /// Weighted mean of every item in the subtree.
    pub fn centroid(&self) -> &MeanAccumulator<D> {
        &self.centroid
    }
}

/// A kd-tree node.
#[derive(Clone, Debug)]
pub struct Node<T, const D: usize> {
    point: T,
    split_axis: usize,
    left: Option<Box<Self>>,
    right: Option<Box<Self>>,
    data: Option<NodeData<D>>,
}

impl<T, const D: usize> Node<T, D> {
    /// The item stored at this node.
    pub fn point(&self) -> &T {
        &self.point
    }

    /// Coordinate this node splits its children on.
    pub fn split_axis(&self) -> usize {
        self.split_axis
    }

    /// Subtree of items not greater than this one on the split axis.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// Subtree of items not less than this one on the split axis.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether the node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Subtree aggregates, if [`KdTree::propagate_data`] has run.
    pub fn data(&self) -> Option<&NodeData<D>> {
        self.data.as_ref()
    }

    /// Subtree bounding box, if propagated.
    pub fn bounding_box(&self) -> Option<&BoundingBox<D>> {
        self.data.as_ref().map(NodeData::bounding_box)
    }

    /// Subtree centroid, if propagated.
    pub fn centroid(&self) -> Option<&MeanAccumulator<D>> {
        self.data.as_ref().map(NodeData::centroid)
    }
}

/// Balanced kd-tree over items of type `T`.
#[derive(Clone, Debug)]
pub struct KdTree<T, const D: usize> {
    root: Box<Node<T, D>>,
    size: usize,
    propagated: bool,
}

impl<T: PointLike<D>, const D: usize> KdTree<T, D> {
    /// Build a tree over `points`.
    ///
    /// Aggregates are left unset; call [`propagate_data`](Self::propagate_data)
    /// before running visitors that need them.
    pub fn build(points: Vec<T>) -> Result<Self> {
        let size = points.len();
        let root = build_node(points).ok_or(Error::EmptyInput)?;
        trace!("built kd-tree over {size} points");
        Ok(Self {
            root,
            size,
            propagated: false,
        })
    }

    /// Number of items (and nodes) in the tree.
    pub fn size(&self) -> usize {
        self.size
    }

    /// The root node.
    pub fn root(&self) -> &Node<T, D> {
        &self.root
    }

    /// Whether every node's aggregates are current.
    pub fn is_propagated(&self) -> bool {
        self.propagated
    }

    /// Compute every node's bounding box and centroid, children before parents.
    pub fn propagate_data(&mut self) {
        propagate(&mut self.root);
        self.propagated = true;
    }

    /// Visit nodes parent-before-children.
    ///
    /// `state` is threaded down the tree: each child starts from its own clone of
    /// whatever its parent's visit left behind, so sibling subtrees never see each
    /// other's changes. Returning `false` from `visit` skips the node's children.
    pub fn preorder_depth_first<S, F>(&self, state: S, mut visit: F)
    where
        S: Clone,
        F: FnMut(&Node<T, D>, &mut S) -> bool,
    {
        preorder(&self.root, state, &mut visit);
    }

    /// Visit nodes children-before-parent.
    ///
    /// Returning [`ControlFlow::Break`] ends the walk immediately; its value is
    /// returned.
    pub fn postorder_depth_first<B, F>(&self, mut visit: F) -> Option<B>
    where
        F: FnMut(&Node<T, D>) -> ControlFlow<B>,
    {
        match postorder(&self.root, &mut visit) {
            ControlFlow::Break(b) => Some(b),
            ControlFlow::Continue(()) => None,
        }
    }

    /// The item closest to `x`.
    pub fn nearest_neighbour(&self, x: &Point<D>) -> &T {
        let mut best = (&self.root.point, self.root.point.squared_distance_to(x));
        nearest(&self.root, x, &mut best);
        best.0
    }
}

fn build_node<T: PointLike<D>, const D: usize>(mut points: Vec<T>) -> Option<Box<Node<T, D>>> {
    if points.is_empty() {
        return None;
    }

    let split_axis = widest_axis(&points);
    let median = points.len() / 2;
    if D > 0 {
        points.select_nth_unstable_by(median, |a, b| {
            a.location()[split_axis].total_cmp(&b.location()[split_axis])
        });
    }
    let mut right = points.split_off(median);
    let point = right.swap_remove(0);

    Some(Box::new(Node {
        point,
        split_axis,
        left: build_node(points),
        right: build_node(right),
        data: None,
    }))
}

fn widest_axis<T: PointLike<D>, const D: usize>(points: &[T]) -> usize {
    let mut best_axis = 0;
    let mut best_spread = f64::NEG_INFINITY;
    for axis in 0..D {
        let (lo, hi) = points
            .iter()
            .map(|p| p.location()[axis])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if hi - lo > best_spread {
            best_spread = hi - lo;
            best_axis = axis;
        }
    }
    best_axis
}

fn propagate<T: PointLike<D>, const D: usize>(node: &mut Node<T, D>) {
    if let Some(left) = node.left.as_deref_mut() {
        propagate(left);
    }
    if let Some(right) = node.right.as_deref_mut() {
        propagate(right);
    }
    node.data = Some(NodeData::aggregate(
        &node.point,
        node.left.as_deref(),
        node.right.as_deref(),
    ));
}

fn preorder<T, S, F, const D: usize>(node: &Node<T, D>, mut state: S, visit: &mut F)
where
    S: Clone,
    F: FnMut(&Node<T, D>, &mut S) -> bool,
{
    if !visit(node, &mut state) {
        return;
    }
    match (node.left(), node.right()) {
        (Some(left), Some(right)) => {
            preorder(left, state.clone(), visit);
            preorder(right, state, visit);
        }
        (Some(child), None) | (None, Some(child)) => preorder(child, state, visit),
        (None, None) => {}
    }
}

fn postorder<T, B, F, const D: usize>(node: &Node<T, D>, visit: &mut F) -> ControlFlow<B>
where
    F: FnMut(&Node<T, D>) -> ControlFlow<B>,
{
    if let Some(left) = node.left() {
        postorder(left, visit)?;
    }
    if let Some(right) = node.right() {
        postorder(right, visit)?;
    }
    visit(node)
}

fn nearest<'a, T: PointLike<D>, const D: usize>(
    node: &'a Node<T, D>,
    x: &Point<D>,
    best: &mut (&'a T, f64),
) {
    let d = node.point.squared_distance_to(x);
    if d < best.1 {
        *best = (&node.point, d);
    }
    if D == 0 {
        return;
    }

    let offset = x[node.split_axis] - node.point.location()[node.split_axis];
    let (near, far) = if offset < 0.0 {
        (node.left(), node.right())
    } else {
        (node.right(), node.left())
    };
    if let Some(near) = near {
        nearest(near, x, best);
    }
    if offset * offset < best.1 {
        if let Some(far) = far {
            nearest(far, x, best);
        }
    }
}
