//! In-memory [`Surface`] with a virtual clock and scriptable geometry.
//!
//! Nothing happens on its own: time moves with [`FakeSurface::advance`],
//! events fire through [`FakeSurface::dispatch`] and friends, and elements
//! enter the viewport through [`FakeSurface::intersect`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use crate::surface::{
    DomEvent, EventKind, IntersectionCallback, IntersectionEntry, Listener, NodeId, ObserverId,
    ObserverOptions, ScrollBehavior, Surface, Target, TimerId, TimerTask,
};

const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;
const CLOCK_EPOCH_MS: f64 = 1_700_000_000_000.0;

#[derive(Debug, Default)]
struct FakeNode {
    tag: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    styles: BTreeMap<String, String>,
    text: String,
    top: f64,
    height: f64,
}

struct PendingTimer {
    id: TimerId,
    task: TimerTask,
}

struct FakeObserver {
    options: ObserverOptions,
    callback: IntersectionCallback,
    targets: Vec<NodeId>,
}

/// A scroll requested through [`Surface::scroll_to`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollRequest {
    pub top: f64,
    pub behavior: ScrollBehavior,
}

struct Inner {
    nodes: Vec<FakeNode>,
    listeners: Vec<(Target, EventKind, Listener)>,
    timers: BTreeMap<(Duration, u32), PendingTimer>,
    next_timer: u32,
    observers: Vec<FakeObserver>,
    now: Duration,
    viewport_width: f64,
    scroll_y: f64,
    scroll_requests: Vec<ScrollRequest>,
    referrer: Option<String>,
    location: String,
    random_state: u64,
    mutations: usize,
    id_lookups: usize,
}

pub struct FakeSurface {
    inner: RefCell<Inner>,
}

impl Default for FakeSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSurface {
    /// An empty document whose root is a `body` element.
    pub fn new() -> Self {
        let body = FakeNode {
            tag: "body".to_string(),
            ..FakeNode::default()
        };
        Self {
            inner: RefCell::new(Inner {
                nodes: vec![body],
                listeners: Vec::new(),
                timers: BTreeMap::new(),
                next_timer: 1,
                observers: Vec::new(),
                now: Duration::ZERO,
                viewport_width: DEFAULT_VIEWPORT_WIDTH,
                scroll_y: 0.0,
                scroll_requests: Vec::new(),
                referrer: None,
                location: "https://studio.example/".to_string(),
                random_state: 0x2545_f491_4f6c_dd1d,
                mutations: 0,
                id_lookups: 0,
            }),
        }
    }

    pub fn shared() -> Rc<Self> {
        Rc::new(Self::new())
    }

    pub fn body(&self) -> NodeId {
        NodeId(0)
    }

    // Page scripting

    /// Create an element with an id and append it to `parent` (or the body).
    /// Does not count as a mutation.
    pub fn add_element(&self, parent: Option<NodeId>, tag: &str, id: Option<&str>) -> NodeId {
        let before = self.mutation_count();
        let node = self.create_element(tag);
        if let Some(id) = id {
            self.set_attribute(node, "id", id);
        }
        self.append_child(parent.unwrap_or(self.body()), node);
        self.inner.borrow_mut().mutations = before;
        node
    }

    /// Create an element carrying `class` under `parent` (or the body).
    /// Does not count as a mutation.
    pub fn add_classed(&self, parent: Option<NodeId>, tag: &str, class: &str) -> NodeId {
        let before = self.mutation_count();
        let node = self.create_element(tag);
        self.add_class(node, class);
        self.append_child(parent.unwrap_or(self.body()), node);
        self.inner.borrow_mut().mutations = before;
        node
    }

    /// Document-relative top and height used by every geometry query.
    pub fn set_geometry(&self, node: NodeId, top: f64, height: f64) {
        let mut inner = self.inner.borrow_mut();
        if let Some(n) = inner.nodes.get_mut(node.0 as usize) {
            n.top = top;
            n.height = height;
        }
    }

    pub fn set_referrer(&self, referrer: Option<&str>) {
        self.inner.borrow_mut().referrer = referrer.map(ToOwned::to_owned);
    }

    pub fn set_location(&self, href: &str) {
        self.inner.borrow_mut().location = href.to_string();
    }

    // Driving the event loop

    /// Move the virtual clock forward, running every timer that falls due in
    /// order, including timers scheduled by those timers.
    pub fn advance(&self, by: Duration) {
        let deadline = self.inner.borrow().now + by;
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let due = inner
                    .timers
                    .keys()
                    .next()
                    .copied()
                    .filter(|(at, _)| *at <= deadline);
                due.and_then(|key| {
                    inner.now = key.0;
                    inner.timers.remove(&key)
                })
            };
            match next {
                Some(timer) => (timer.task)(),
                None => break,
            }
        }
        self.inner.borrow_mut().now = deadline;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn elapsed(&self) -> Duration {
        self.inner.borrow().now
    }

    pub fn pending_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }

    /// Fire an event at a target; returns it so callers can inspect
    /// `is_default_prevented`.
    pub fn dispatch(&self, target: Target, kind: EventKind) -> DomEvent {
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .filter(|(t, k, _)| *t == target && *k == kind)
            .map(|(_, _, listener)| listener.clone())
            .collect();
        let event = DomEvent::new(kind, target);
        for listener in listeners {
            listener(&event);
        }
        event
    }

    pub fn click(&self, node: NodeId) -> DomEvent {
        self.dispatch(Target::Node(node), EventKind::Click)
    }

    /// Change the viewport width and fire `resize` on the window.
    pub fn resize_viewport(&self, width: f64) {
        self.inner.borrow_mut().viewport_width = width;
        self.dispatch(Target::Window, EventKind::Resize);
    }

    /// Scroll as a user would: move and fire `scroll` on the window.
    pub fn user_scroll(&self, y: f64) {
        self.inner.borrow_mut().scroll_y = y;
        self.dispatch(Target::Window, EventKind::Scroll);
    }

    /// Report the given nodes as entering the viewport, in that order, to
    /// every observer watching them.
    pub fn intersect(&self, nodes: &[NodeId]) {
        let batches: Vec<(ObserverId, IntersectionCallback, Vec<IntersectionEntry>)> = self
            .inner
            .borrow()
            .observers
            .iter()
            .enumerate()
            .filter_map(|(index, observer)| {
                let entries: Vec<IntersectionEntry> = nodes
                    .iter()
                    .filter(|node| observer.targets.contains(*node))
                    .map(|node| IntersectionEntry {
                        node: *node,
                        is_intersecting: true,
                    })
                    .collect();
                (!entries.is_empty()).then(|| {
                    (ObserverId(index as u32), observer.callback.clone(), entries)
                })
            })
            .collect();
        for (id, callback, entries) in batches {
            callback(id, &entries);
        }
    }

    // Inspection

    pub fn is_observed(&self, node: NodeId) -> bool {
        self.inner
            .borrow()
            .observers
            .iter()
            .any(|observer| observer.targets.contains(&node))
    }

    pub fn observer_options(&self, observer: ObserverId) -> Option<ObserverOptions> {
        self.inner
            .borrow()
            .observers
            .get(observer.0 as usize)
            .map(|o| o.options.clone())
    }

    pub fn listener_count(&self, target: Target, kind: EventKind) -> usize {
        self.inner
            .borrow()
            .listeners
            .iter()
            .filter(|(t, k, _)| *t == target && *k == kind)
            .count()
    }

    pub fn scroll_requests(&self) -> Vec<ScrollRequest> {
        self.inner.borrow().scroll_requests.clone()
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<String> {
        self.inner
            .borrow()
            .nodes
            .get(node.0 as usize)
            .and_then(|n| n.styles.get(property).cloned())
    }

    pub fn classes(&self, node: NodeId) -> Vec<String> {
        self.inner
            .borrow()
            .nodes
            .get(node.0 as usize)
            .map(|n| n.classes.clone())
            .unwrap_or_default()
    }

    pub fn tag(&self, node: NodeId) -> String {
        self.inner
            .borrow()
            .nodes
            .get(node.0 as usize)
            .map(|n| n.tag.clone())
            .unwrap_or_default()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.inner
            .borrow()
            .nodes
            .get(node.0 as usize)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.inner
            .borrow()
            .nodes
            .get(node.0 as usize)
            .and_then(|n| n.parent)
    }

    /// Tree edits, attribute, class and style writes since the last reset.
    pub fn mutation_count(&self) -> usize {
        self.inner.borrow().mutations
    }

    /// Calls to [`Surface::element_by_id`] so far.
    pub fn id_lookups(&self) -> usize {
        self.inner.borrow().id_lookups
    }

    pub fn reset_mutations(&self) {
        self.inner.borrow_mut().mutations = 0;
    }

    fn mutate<R>(&self, node: NodeId, f: impl FnOnce(&mut FakeNode) -> R) -> Option<R> {
        let mut inner = self.inner.borrow_mut();
        inner.mutations += 1;
        inner.nodes.get_mut(node.0 as usize).map(f)
    }

    fn read<R>(&self, node: NodeId, f: impl FnOnce(&FakeNode) -> R) -> Option<R> {
        self.inner.borrow().nodes.get(node.0 as usize).map(f)
    }

    fn detach(inner: &mut Inner, node: NodeId) {
        if let Some(parent) = inner.nodes[node.0 as usize].parent.take() {
            inner.nodes[parent.0 as usize]
                .children
                .retain(|child| *child != node);
        }
    }

    /// Descendants of `root` in document order, excluding `root`.
    fn descendants(inner: &Inner, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = inner.nodes[root.0 as usize]
            .children
            .iter()
            .rev()
            .copied()
            .collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(inner.nodes[node.0 as usize].children.iter().rev().copied());
        }
        out
    }

    fn matches(node: &FakeNode, selector: &str) -> bool {
        if let Some(id) = selector.strip_prefix('#') {
            node.attributes.get("id").is_some_and(|value| value == id)
        } else if let Some(class) = selector.strip_prefix('.') {
            node.classes.iter().any(|c| c == class)
        } else {
            node.tag.eq_ignore_ascii_case(selector)
        }
    }

    fn select(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        let inner = self.inner.borrow();
        if root.0 as usize >= inner.nodes.len() {
            return Vec::new();
        }
        Self::descendants(&inner, root)
            .into_iter()
            .filter(|node| Self::matches(&inner.nodes[node.0 as usize], selector))
            .collect()
    }
}

impl Surface for FakeSurface {
    fn create_element(&self, tag: &str) -> NodeId {
        let mut inner = self.inner.borrow_mut();
        inner.mutations += 1;
        inner.nodes.push(FakeNode {
            tag: tag.to_ascii_lowercase(),
            ..FakeNode::default()
        });
        NodeId((inner.nodes.len() - 1) as u32)
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        let mut inner = self.inner.borrow_mut();
        let len = inner.nodes.len();
        if parent.0 as usize >= len || child.0 as usize >= len || parent == child {
            return;
        }
        inner.mutations += 1;
        Self::detach(&mut inner, child);
        inner.nodes[child.0 as usize].parent = Some(parent);
        inner.nodes[parent.0 as usize].children.push(child);
    }

    fn insert_after(&self, reference: NodeId, node: NodeId) {
        let mut inner = self.inner.borrow_mut();
        let len = inner.nodes.len();
        if reference.0 as usize >= len || node.0 as usize >= len || reference == node {
            return;
        }
        let Some(parent) = inner.nodes[reference.0 as usize].parent else {
            return;
        };
        inner.mutations += 1;
        Self::detach(&mut inner, node);
        let siblings = &mut inner.nodes[parent.0 as usize].children;
        let position = siblings
            .iter()
            .position(|sibling| *sibling == reference)
            .map_or(siblings.len(), |index| index + 1);
        siblings.insert(position, node);
        inner.nodes[node.0 as usize].parent = Some(parent);
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.inner.borrow_mut().id_lookups += 1;
        self.select(self.body(), &format!("#{id}")).into_iter().next()
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.select(self.body(), selector)
    }

    fn query_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        self.select(root, selector)
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        self.mutate(node, |n| {
            n.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.read(node, |n| n.attributes.get(name).cloned()).flatten()
    }

    fn set_text(&self, node: NodeId, text: &str) {
        self.mutate(node, |n| n.text = text.to_string());
    }

    fn text(&self, node: NodeId) -> String {
        self.read(node, |n| n.text.clone()).unwrap_or_default()
    }

    fn add_class(&self, node: NodeId, class: &str) {
        self.mutate(node, |n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        self.mutate(node, |n| n.classes.retain(|c| c != class));
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.read(node, |n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        self.mutate(node, |n| {
            n.styles.insert(property.to_string(), value.to_string());
        });
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.read(node, |n| n.top).unwrap_or(0.0)
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.read(node, |n| n.height).unwrap_or(0.0)
    }

    fn bounding_top(&self, node: NodeId) -> f64 {
        self.offset_top(node) - self.scroll_y()
    }

    fn bounding_height(&self, node: NodeId) -> f64 {
        self.offset_height(node)
    }

    fn viewport_width(&self) -> f64 {
        self.inner.borrow().viewport_width
    }

    fn scroll_y(&self) -> f64 {
        self.inner.borrow().scroll_y
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let mut inner = self.inner.borrow_mut();
        inner.scroll_y = top.max(0.0);
        inner.scroll_requests.push(ScrollRequest { top, behavior });
    }

    fn now_ms(&self) -> f64 {
        CLOCK_EPOCH_MS + self.inner.borrow().now.as_millis() as f64
    }

    fn random(&self) -> f64 {
        // xorshift64*, deterministic across runs.
        let mut inner = self.inner.borrow_mut();
        let mut x = inner.random_state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        inner.random_state = x;
        let bits = x.wrapping_mul(0x2545_f491_4f6c_dd1d) >> 11;
        bits as f64 / (1u64 << 53) as f64
    }

    fn referrer(&self) -> Option<String> {
        self.inner.borrow().referrer.clone()
    }

    fn location_href(&self) -> String {
        self.inner.borrow().location.clone()
    }

    fn location_hash(&self) -> String {
        let location = self.inner.borrow().location.clone();
        location
            .find('#')
            .map(|index| location[index..].to_string())
            .filter(|hash| hash.len() > 1)
            .unwrap_or_default()
    }

    fn listen(&self, target: Target, kind: EventKind, listener: Listener) {
        self.inner
            .borrow_mut()
            .listeners
            .push((target, kind, listener));
    }

    fn set_timeout(&self, delay: Duration, task: TimerTask) -> TimerId {
        let mut inner = self.inner.borrow_mut();
        let seq = inner.next_timer;
        inner.next_timer += 1;
        let id = TimerId(seq);
        let due = inner.now + delay;
        inner.timers.insert((due, seq), PendingTimer { id, task });
        id
    }

    fn clear_timeout(&self, timer: TimerId) {
        let mut inner = self.inner.borrow_mut();
        let key = inner
            .timers
            .iter()
            .find(|(_, pending)| pending.id == timer)
            .map(|(key, _)| *key);
        if let Some(key) = key {
            inner.timers.remove(&key);
        }
    }

    fn create_intersection_observer(
        &self,
        options: &ObserverOptions,
        callback: IntersectionCallback,
    ) -> ObserverId {
        let mut inner = self.inner.borrow_mut();
        inner.observers.push(FakeObserver {
            options: options.clone(),
            callback,
            targets: Vec::new(),
        });
        ObserverId((inner.observers.len() - 1) as u32)
    }

    fn observe(&self, observer: ObserverId, node: NodeId) {
        if let Some(o) = self.inner.borrow_mut().observers.get_mut(observer.0 as usize) {
            if !o.targets.contains(&node) {
                o.targets.push(node);
            }
        }
    }

    fn unobserve(&self, observer: ObserverId, node: NodeId) {
        if let Some(o) = self.inner.borrow_mut().observers.get_mut(observer.0 as usize) {
            o.targets.retain(|target| *target != node);
        }
    }
}
