//! The host page, seen through the narrow window the tracker needs.
//!
//! [`Page::snapshot`] reads the *live* state every time it is called; the
//! tracker never keeps a previous snapshot around to diff against.

use crate::tracker_actor::Badge;
use std::sync::{Arc, Mutex};

/// Opaque handle of an element on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// A top-level heading (`h1`).
#[derive(Debug, Clone, PartialEq)]
pub struct HeadingNode {
    pub node: NodeId,
    pub text: String,
    /// False when layout hides the element.
    pub visible: bool,
}

/// An inline element inside a subordinate heading.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanNode {
    pub node: NodeId,
    pub text: String,
}

/// A subordinate heading (`h2`) and its first inner span, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct SubheadingNode {
    pub node: NodeId,
    pub text: String,
    pub first_span: Option<SpanNode>,
}

/// A control (`button`) with its accessible label.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlNode {
    pub node: NodeId,
    pub label: Option<String>,
}

/// The parts of the page the tracker reads, in document order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSnapshot {
    pub headings: Vec<HeadingNode>,
    pub subheadings: Vec<SubheadingNode>,
    pub controls: Vec<ControlNode>,
}

/// The live page.
pub trait Page: Send + Sync {
    fn snapshot(&self) -> PageSnapshot;

    /// Whether a badge is already attached immediately after `anchor`.
    fn has_badge_after(&self, anchor: NodeId) -> bool;

    fn insert_badge_after(&self, anchor: NodeId, badge: Badge);

    /// Re-renders the badge attached after `anchor`. Returns false when there is none.
    fn update_badge(&self, anchor: NodeId, badge: Badge) -> bool;
}

#[derive(Default)]
struct MemoryPageState {
    snapshot: PageSnapshot,
    badges: Vec<(NodeId, Badge)>,
    mutations: usize,
}

/// In-memory [`Page`] for tests and demos.
///
/// Cheap to clone; clones share the same page.
#[derive(Clone, Default)]
pub struct MemoryPage {
    state: Arc<Mutex<MemoryPageState>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole panel: new content, previous badges gone.
    pub fn navigate(&self, snapshot: PageSnapshot) {
        if let Ok(mut state) = self.state.lock() {
            state.snapshot = snapshot;
            state.badges.clear();
        }
    }

    /// Changes content in place; badges already on the page stay.
    pub fn set_snapshot(&self, snapshot: PageSnapshot) {
        if let Ok(mut state) = self.state.lock() {
            state.snapshot = snapshot;
        }
    }

    /// Removes every badge, as a host re-render would.
    pub fn clear_badges(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.badges.clear();
        }
    }

    pub fn badges(&self) -> Vec<(NodeId, Badge)> {
        self.state
            .lock()
            .map(|state| state.badges.clone())
            .unwrap_or_default()
    }

    /// The first badge on the page, if any.
    pub fn badge(&self) -> Option<Badge> {
        self.badges().into_iter().next().map(|(_, badge)| badge)
    }

    /// The badge attached after `anchor`, if any.
    pub fn badge_after(&self, anchor: NodeId) -> Option<Badge> {
        self.badges()
            .into_iter()
            .find(|(node, _)| *node == anchor)
            .map(|(_, badge)| badge)
    }

    /// Number of badge insertions and updates so far.
    pub fn mutations(&self) -> usize {
        self.state.lock().map(|state| state.mutations).unwrap_or(0)
    }
}

impl Page for MemoryPage {
    fn snapshot(&self) -> PageSnapshot {
        self.state
            .lock()
            .map(|state| state.snapshot.clone())
            .unwrap_or_default()
    }

    fn has_badge_after(&self, anchor: NodeId) -> bool {
        self.state
            .lock()
            .map(|state| state.badges.iter().any(|(node, _)| *node == anchor))
            .unwrap_or(false)
    }

    fn insert_badge_after(&self, anchor: NodeId, badge: Badge) {
        if let Ok(mut state) = self.state.lock() {
            state.badges.push((anchor, badge));
            state.mutations += 1;
        }
    }

    fn update_badge(&self, anchor: NodeId, badge: Badge) -> bool {
        let Ok(mut state) = self.state.lock() else {
            return false;
        };
        let Some(slot) = state.badges.iter_mut().find(|(node, _)| *node == anchor) else {
            return false;
        };
        slot.1 = badge;
        state.mutations += 1;
        true
    }
}

/// Small builder for snapshots, mostly for tests.
#[derive(Debug, Default)]
pub struct SnapshotBuilder {
    snapshot: PageSnapshot,
    next_id: u64,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn id(&mut self) -> NodeId {
        self.next_id += 1;
        NodeId(self.next_id)
    }

    pub fn heading(mut self, text: impl Into<String>) -> Self {
        let node = self.id();
        self.snapshot.headings.push(HeadingNode {
            node,
            text: text.into(),
            visible: true,
        });
        self
    }

    pub fn hidden_heading(mut self, text: impl Into<String>) -> Self {
        let node = self.id();
        self.snapshot.headings.push(HeadingNode {
            node,
            text: text.into(),
            visible: false,
        });
        self
    }

    pub fn subheading(mut self, text: impl Into<String>) -> Self {
        let node = self.id();
        self.snapshot.subheadings.push(SubheadingNode {
            node,
            text: text.into(),
            first_span: None,
        });
        self
    }

    pub fn subheading_with_span(mut self, text: impl Into<String>, span: impl Into<String>) -> Self {
        let node = self.id();
        let span_node = self.id();
        self.snapshot.subheadings.push(SubheadingNode {
            node,
            text: text.into(),
            first_span: Some(SpanNode {
                node: span_node,
                text: span.into(),
            }),
        });
        self
    }

    pub fn control(mut self, label: impl Into<String>) -> Self {
        let node = self.id();
        self.snapshot.controls.push(ControlNode {
            node,
            label: Some(label.into()),
        });
        self
    }

    pub fn build(self) -> PageSnapshot {
        self.snapshot
    }
}
