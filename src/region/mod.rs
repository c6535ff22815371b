//! Host region tree.
//!
//! Regions are rectangles positioned relative to their parent. The tree
//! tracks visibility and dirtiness, paints into an off-screen canvas, and
//! delivers notifications to subscribers as [`Signal`]s:
//!
//! - `Resized` when `set_position` changes a region's size
//! - `Redraw` for each dirty, visible region once per refresh cycle
//!
//! Subscriptions are explicit handles. [`RegionTree::subscribe`] hands one
//! out and [`RegionTree::unsubscribe`] consumes it, so each is cancelled at
//! most once.
//!
//! Geometry is signed: a parent one row tall yields children with zero or
//! negative height, which simply occupy no cells.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Clear, Widget};
use slab::Slab;
use std::collections::HashMap;
use tracing::debug;

/// Handle to a region in a [`RegionTree`].
///
/// Slots of unlinked regions are reused; the generation keeps an old handle
/// from reaching the region that took its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId {
    key: usize,
    generation: u64,
}

/// Size and offset of a region relative to its parent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Position {
    /// Height in rows.
    pub lines: i32,
    /// Width in columns.
    pub cols: i32,
    /// Row offset from the parent's top edge.
    pub row: i32,
    /// Column offset from the parent's left edge.
    pub col: i32,
}

impl Position {
    /// Build a position from `(lines, cols)` at `(row, col)`.
    pub const fn new(lines: i32, cols: i32, row: i32, col: i32) -> Self {
        Self {
            lines,
            cols,
            row,
            col,
        }
    }
}

/// Notification kinds a region can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    /// The region needs repainting.
    Redraw,
    /// The region's size changed.
    Resized,
}

/// Identifies a live subscription inside a [`Signal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A registration for one kind of notification on one region.
///
/// Not `Clone`: the single handle is returned to
/// [`RegionTree::unsubscribe`] to cancel it.
#[must_use = "subscriptions must be handed back to RegionTree::unsubscribe"]
#[derive(Debug, PartialEq, Eq)]
pub struct Subscription {
    id: SubscriptionId,
    region: RegionId,
    kind: SignalKind,
}

impl Subscription {
    /// Identifier carried by signals delivered to this subscription.
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Region this subscription listens to.
    pub fn region(&self) -> RegionId {
        self.region
    }

    /// Kind of notification.
    pub fn kind(&self) -> SignalKind {
        self.kind
    }
}

/// A notification delivered to one subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    /// Receiving subscription.
    pub subscription: SubscriptionId,
    /// Region that raised it.
    pub region: RegionId,
    /// What happened.
    pub kind: SignalKind,
}

#[derive(Debug)]
struct Node {
    generation: u64,
    parent: Option<RegionId>,
    children: Vec<RegionId>,
    position: Position,
    visible: bool,
    dirty: bool,
}

/// Tree of screen regions rooted at the terminal.
#[derive(Debug)]
pub struct RegionTree {
    nodes: Slab<Node>,
    next_generation: u64,
    root: RegionId,
    subscriptions: HashMap<SubscriptionId, (RegionId, SignalKind)>,
    next_subscription: u64,
    pending_resized: Vec<RegionId>,
    canvas: Buffer,
}

impl RegionTree {
    /// Create a tree whose visible root covers a `cols` × `lines` terminal.
    pub fn new(cols: u16, lines: u16) -> Self {
        let root = Node {
            generation: 0,
            parent: None,
            children: Vec::new(),
            position: Position::new(i32::from(lines), i32::from(cols), 0, 0),
            visible: true,
            dirty: true,
        };
        let mut nodes = Slab::new();
        let key = nodes.insert(root);
        Self {
            nodes,
            next_generation: 1,
            root: RegionId { key, generation: 0 },
            subscriptions: HashMap::new(),
            next_subscription: 0,
            pending_resized: Vec::new(),
            canvas: Buffer::empty(Rect::new(0, 0, cols, lines)),
        }
    }

    /// The root region.
    pub fn root(&self) -> RegionId {
        self.root
    }

    /// Create a hidden child of `parent` with an empty position.
    ///
    /// Creating a child of a region that no longer exists yields a detached
    /// region that is never painted.
    pub fn new_child(&mut self, parent: RegionId) -> RegionId {
        let id = RegionId {
            key: self.nodes.vacant_key(),
            generation: self.next_generation,
        };
        self.next_generation += 1;
        let attached = match self.node_mut(parent) {
            Some(node) => {
                node.children.push(id);
                Some(parent)
            }
            None => None,
        };
        self.nodes.insert(Node {
            generation: id.generation,
            parent: attached,
            children: Vec::new(),
            position: Position::default(),
            visible: false,
            dirty: false,
        });
        id
    }

    /// Whether `id` is still linked into the tree.
    pub fn contains(&self, id: RegionId) -> bool {
        self.node(id).is_some()
    }

    /// Number of live regions, root included.
    pub fn region_count(&self) -> usize {
        self.nodes.len()
    }

    /// Current position of `id`, or an empty one if it was unlinked.
    pub fn get_position(&self, id: RegionId) -> Position {
        self.node(id).map(|n| n.position).unwrap_or_default()
    }

    /// Move and resize `id`.
    ///
    /// A size change queues a `Resized` notification; any change dirties the
    /// region and its descendants.
    pub fn set_position(&mut self, id: RegionId, position: Position) {
        let Some(old) = self.node(id).map(|n| n.position) else {
            return;
        };
        if old == position {
            return;
        }
        let old_area = self.absolute_area(id);
        Clear.render(old_area, &mut self.canvas);
        if let Some(node) = self.node_mut(id) {
            node.position = position;
        }
        if (old.lines, old.cols) != (position.lines, position.cols)
            && !self.pending_resized.contains(&id)
        {
            self.pending_resized.push(id);
        }
        self.dirty_subtree(id);
    }

    /// Resize the root to a new terminal size. The canvas is reset and
    /// every region repaints.
    pub fn resize_root(&mut self, cols: u16, lines: u16) {
        let area = Rect::new(0, 0, cols, lines);
        self.canvas.resize(area);
        self.canvas.reset();
        let root = self.root;
        self.set_position(root, Position::new(i32::from(lines), i32::from(cols), 0, 0));
        self.dirty_subtree(root);
    }

    /// Make `id` visible and schedule its repaint.
    pub fn show(&mut self, id: RegionId) {
        if let Some(node) = self.node_mut(id) {
            node.visible = true;
        }
        self.dirty_subtree(id);
    }

    /// Hide `id`, erasing the cells it occupied.
    pub fn hide(&mut self, id: RegionId) {
        let area = self.absolute_area(id);
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.visible = false;
        node.dirty = false;
        Clear.render(area, &mut self.canvas);
    }

    /// Whether `id` and all its ancestors are visible.
    pub fn is_visible(&self, id: RegionId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            match self.node(current) {
                Some(node) if node.visible => cursor = node.parent,
                _ => return false,
            }
        }
        true
    }

    /// Detach `id` and its descendants from the tree and release them.
    ///
    /// Subscriptions on released regions stay registered until they are
    /// handed to [`unsubscribe`](Self::unsubscribe) but never fire again.
    pub fn unlink(&mut self, id: RegionId) {
        if id == self.root {
            return;
        }
        let area = self.absolute_area(id);
        if self.node(id).is_none() {
            return;
        }
        let Some(node) = self.nodes.try_remove(id.key) else {
            return;
        };
        Clear.render(area, &mut self.canvas);
        if let Some(parent) = node.parent.and_then(|p| self.node_mut(p)) {
            parent.children.retain(|child| *child != id);
        }
        self.pending_resized.retain(|pending| *pending != id);
        for child in node.children {
            if let Some(child_node) = self.node_mut(child) {
                child_node.parent = None;
            }
            self.unlink(child);
        }
        debug!(region = id.key, "region unlinked");
    }

    /// Schedule a repaint of `id` on the next refresh cycle. Repeated calls
    /// before the cycle coalesce.
    pub fn dirty(&mut self, id: RegionId) {
        if let Some(node) = self.node_mut(id) {
            node.dirty = true;
        }
    }

    /// Whether `id` is waiting to be repainted.
    pub fn is_dirty(&self, id: RegionId) -> bool {
        self.node(id).is_some_and(|n| n.dirty)
    }

    /// Register for `kind` notifications on `region`.
    pub fn subscribe(&mut self, region: RegionId, kind: SignalKind) -> Subscription {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscriptions.insert(id, (region, kind));
        Subscription { id, region, kind }
    }

    /// Cancel a subscription.
    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.subscriptions.remove(&subscription.id);
    }

    /// Number of live subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Collect the next batch of notifications.
    ///
    /// Pending resizes are delivered first, as their handlers usually move
    /// other regions. Resizes nobody listens to are dropped. Once none
    /// remain, every dirty visible region is erased, marked clean and
    /// reported to its redraw subscribers, parents before children. Call
    /// repeatedly until it returns an empty batch.
    pub fn take_signals(&mut self) -> Vec<Signal> {
        if !self.pending_resized.is_empty() {
            let resized: Vec<Signal> = std::mem::take(&mut self.pending_resized)
                .into_iter()
                .flat_map(|region| self.signals_for(region, SignalKind::Resized))
                .collect();
            if !resized.is_empty() {
                return resized;
            }
        }

        let mut order = Vec::new();
        self.collect_visible(self.root, &mut order);
        let mut signals = Vec::new();
        for region in order {
            if !self.is_dirty(region) {
                continue;
            }
            let area = self.absolute_area(region);
            if let Some(node) = self.node_mut(region) {
                node.dirty = false;
            }
            let listeners = self.signals_for(region, SignalKind::Redraw);
            if !listeners.is_empty() {
                Clear.render(area, &mut self.canvas);
            }
            signals.extend(listeners);
        }
        signals
    }

    /// Cells `id` occupies on the canvas, clipped to its ancestors.
    ///
    /// Empty when the region is degenerate, off-screen or unlinked.
    pub fn absolute_area(&self, id: RegionId) -> Rect {
        let mut chain = Vec::new();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(node) = self.node(current) else {
                return Rect::default();
            };
            chain.push(node.position);
            cursor = node.parent;
        }
        if self.root_of(id) != Some(self.root) {
            return Rect::default();
        }

        // (top, left, bottom, right), clipped at every level.
        let mut clip = (0i32, 0i32, i32::MAX, i32::MAX);
        let (mut origin_row, mut origin_col) = (0i32, 0i32);
        for pos in chain.iter().rev() {
            let top = origin_row.saturating_add(pos.row);
            let left = origin_col.saturating_add(pos.col);
            let bottom = top.saturating_add(pos.lines.max(0));
            let right = left.saturating_add(pos.cols.max(0));
            clip = (
                clip.0.max(top),
                clip.1.max(left),
                clip.2.min(bottom),
                clip.3.min(right),
            );
            origin_row = top;
            origin_col = left;
        }
        let (top, left, bottom, right) = clip;
        let height = (bottom - top).max(0);
        let width = (right - left).max(0);
        let area = Rect::new(to_u16(left), to_u16(top), to_u16(width), to_u16(height));
        area.intersection(self.canvas.area)
    }

    /// The painted screen.
    pub fn canvas(&self) -> &Buffer {
        &self.canvas
    }

    /// Mutable access for redraw handlers.
    pub fn canvas_mut(&mut self) -> &mut Buffer {
        &mut self.canvas
    }

    fn node(&self, id: RegionId) -> Option<&Node> {
        self.nodes
            .get(id.key)
            .filter(|node| node.generation == id.generation)
    }

    fn node_mut(&mut self, id: RegionId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.key)
            .filter(|node| node.generation == id.generation)
    }

    fn root_of(&self, id: RegionId) -> Option<RegionId> {
        let mut current = id;
        loop {
            match self.node(current)?.parent {
                Some(parent) => current = parent,
                None => return Some(current),
            }
        }
    }

    fn dirty_subtree(&mut self, id: RegionId) {
        let children = match self.node_mut(id) {
            Some(node) => {
                node.dirty = true;
                node.children.clone()
            }
            None => return,
        };
        for child in children {
            self.dirty_subtree(child);
        }
    }

    fn collect_visible(&self, id: RegionId, out: &mut Vec<RegionId>) {
        let Some(node) = self.node(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        out.push(id);
        for child in &node.children {
            self.collect_visible(*child, out);
        }
    }

    fn signals_for(&self, region: RegionId, kind: SignalKind) -> Vec<Signal> {
        let mut signals: Vec<Signal> = self
            .subscriptions
            .iter()
            .filter(|(_, (r, k))| *r == region && *k == kind)
            .map(|(id, _)| Signal {
                subscription: *id,
                region,
                kind,
            })
            .collect();
        signals.sort_by_key(|s| s.subscription.0);
        signals
    }
}

fn to_u16(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

#[cfg(test)]
#[path = "region_tests.rs"]
mod tests;
