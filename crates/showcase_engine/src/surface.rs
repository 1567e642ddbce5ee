use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

/// Handle to an element owned by a [`Surface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Load,
    Error,
    Click,
    Scroll,
    Resize,
}

impl EventKind {
    pub fn dom_name(self) -> &'static str {
        match self {
            EventKind::Load => "load",
            EventKind::Error => "error",
            EventKind::Click => "click",
            EventKind::Scroll => "scroll",
            EventKind::Resize => "resize",
        }
    }
}

/// What a listener is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    Window,
    Node(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// An event as seen by listeners. Only the default action can be influenced.
#[derive(Debug)]
pub struct DomEvent {
    pub kind: EventKind,
    pub target: Target,
    default_prevented: Cell<bool>,
}

impl DomEvent {
    pub fn new(kind: EventKind, target: Target) -> Self {
        Self {
            kind,
            target,
            default_prevented: Cell::new(false),
        }
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionEntry {
    pub node: NodeId,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

pub type Listener = Rc<dyn Fn(&DomEvent)>;
pub type TimerTask = Box<dyn FnOnce()>;
pub type IntersectionCallback = Rc<dyn Fn(ObserverId, &[IntersectionEntry])>;

/// The rendering surface: everything the components need from a document,
/// its window and its event loop.
///
/// Implementations are single-threaded and must not hold internal borrows
/// while invoking listeners, timer tasks or intersection callbacks, since
/// those call straight back into the surface.
pub trait Surface {
    // Tree
    fn create_element(&self, tag: &str) -> NodeId;
    fn append_child(&self, parent: NodeId, child: NodeId);
    fn insert_after(&self, reference: NodeId, node: NodeId);
    fn element_by_id(&self, id: &str) -> Option<NodeId>;
    /// Supports `#id`, `.class` and bare tag selectors at minimum.
    fn query_all(&self, selector: &str) -> Vec<NodeId>;
    fn query_within(&self, root: NodeId, selector: &str) -> Vec<NodeId>;

    // Content
    fn set_attribute(&self, node: NodeId, name: &str, value: &str);
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn set_text(&self, node: NodeId, text: &str);
    fn text(&self, node: NodeId) -> String;
    fn add_class(&self, node: NodeId, class: &str);
    fn remove_class(&self, node: NodeId, class: &str);
    fn has_class(&self, node: NodeId, class: &str) -> bool;
    fn set_style(&self, node: NodeId, property: &str, value: &str);

    // Geometry
    /// Layout offset from the document top.
    fn offset_top(&self, node: NodeId) -> f64;
    fn offset_height(&self, node: NodeId) -> f64;
    /// Top edge relative to the viewport.
    fn bounding_top(&self, node: NodeId) -> f64;
    fn bounding_height(&self, node: NodeId) -> f64;
    fn viewport_width(&self) -> f64;
    fn scroll_y(&self) -> f64;
    fn scroll_to(&self, top: f64, behavior: ScrollBehavior);

    // Environment
    fn now_ms(&self) -> f64;
    /// Uniform in `[0, 1)`.
    fn random(&self) -> f64;
    fn referrer(&self) -> Option<String>;
    fn location_href(&self) -> String;
    /// Location fragment including the leading `#`, or empty.
    fn location_hash(&self) -> String;

    // Event loop
    fn listen(&self, target: Target, kind: EventKind, listener: Listener);
    fn set_timeout(&self, delay: Duration, task: TimerTask) -> TimerId;
    fn clear_timeout(&self, timer: TimerId);
    fn create_intersection_observer(
        &self,
        options: &ObserverOptions,
        callback: IntersectionCallback,
    ) -> ObserverId;
    fn observe(&self, observer: ObserverId, node: NodeId);
    fn unobserve(&self, observer: ObserverId, node: NodeId);
}

pub type SurfaceRef = Rc<dyn Surface>;
