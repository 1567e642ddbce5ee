//! [`Surface`] backed by the browser document through `web-sys`.
//!
//! Elements handed to the engine are registered once and addressed by their
//! index. DOM failures are logged and otherwise ignored.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Context;
use js_sys::{Array, Date, Math, Reflect};
use showcase_engine::{
    DomEvent, EventKind, IntersectionCallback, IntersectionEntry, Listener, NodeId, ObserverId,
    ObserverOptions, ScrollBehavior, Surface, Target, TimerId, TimerTask,
};
use showcase_logging::showcase_warn;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, IntersectionObserver,
    IntersectionObserverEntry, IntersectionObserverInit, NodeList, ScrollToOptions, Window,
};

/// Handle for elements that could not be created; every operation on it is
/// a no-op.
const DETACHED: NodeId = NodeId(u32::MAX);

/// Property carrying an element's registry index.
const NODE_KEY: &str = "__showcaseNode";

/// Elements known to the engine, shared with observer callbacks.
///
/// Each registered element is tagged with its index so a repeated lookup
/// does not scan the list.
#[derive(Clone, Default)]
struct Registry(Rc<RefCell<Vec<Element>>>);

impl Registry {
    fn register(&self, element: Element) -> NodeId {
        let key = JsValue::from_str(NODE_KEY);
        let tagged = Reflect::get(&element, &key)
            .ok()
            .and_then(|index| index.as_f64())
            .map(|index| index as u32);
        if let Some(index) = tagged {
            let known = self
                .0
                .borrow()
                .get(index as usize)
                .is_some_and(|known| *known == element);
            if known {
                return NodeId(index);
            }
        }

        let mut nodes = self.0.borrow_mut();
        let index = nodes.len() as u32;
        if let Err(err) = Reflect::set(&element, &key, &JsValue::from_f64(f64::from(index))) {
            showcase_warn!("tagging element {} failed: {:?}", index, err);
        }
        nodes.push(element);
        NodeId(index)
    }

    fn get(&self, node: NodeId) -> Option<Element> {
        self.0.borrow().get(node.0 as usize).cloned()
    }
}

/// Pending `setTimeout` callbacks by timer id, with the browser handle.
///
/// A fired callback reports its id in `spent`; its closure is released on
/// the next timer call, never from inside itself.
#[derive(Default)]
struct Timers {
    next: Cell<u32>,
    pending: RefCell<HashMap<u32, (i32, Closure<dyn FnMut()>)>>,
    spent: Rc<RefCell<Vec<u32>>>,
}

impl Timers {
    fn next_id(&self) -> u32 {
        let id = self.next.get();
        self.next.set(id.wrapping_add(1));
        id
    }

    fn release_spent(&self) {
        let spent: Vec<u32> = self.spent.borrow_mut().drain(..).collect();
        if spent.is_empty() {
            return;
        }
        let mut pending = self.pending.borrow_mut();
        for id in spent {
            pending.remove(&id);
        }
    }
}

pub struct WebSurface {
    window: Window,
    document: Document,
    registry: Registry,
    timers: Timers,
    observers: RefCell<Vec<Option<IntersectionObserver>>>,
}

impl WebSurface {
    pub fn from_window() -> anyhow::Result<Self> {
        let window = web_sys::window().context("no global window")?;
        let document = window.document().context("window has no document")?;
        Ok(Self {
            window,
            document,
            registry: Registry::default(),
            timers: Timers::default(),
            observers: RefCell::new(Vec::new()),
        })
    }

    fn register(&self, element: Element) -> NodeId {
        self.registry.register(element)
    }

    fn element(&self, node: NodeId) -> Option<Element> {
        self.registry.get(node)
    }

    fn observer(&self, observer: ObserverId) -> Option<IntersectionObserver> {
        self.observers
            .borrow()
            .get(observer.0 as usize)
            .cloned()
            .flatten()
    }

    fn html(&self, node: NodeId) -> Option<HtmlElement> {
        self.element(node)?.dyn_into::<HtmlElement>().ok()
    }

    fn register_all(&self, list: Result<NodeList, JsValue>, selector: &str) -> Vec<NodeId> {
        let list = match list {
            Ok(list) => list,
            Err(err) => {
                showcase_warn!("query {} failed: {:?}", selector, err);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|index| list.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| self.register(element))
            .collect()
    }

    fn event_target(&self, target: Target) -> Option<EventTarget> {
        match target {
            Target::Window => Some(self.window.clone().into()),
            Target::Node(node) => self.element(node).map(Into::into),
        }
    }
}

fn check(result: Result<(), JsValue>, what: &str) {
    if let Err(err) = result {
        showcase_warn!("{} failed: {:?}", what, err);
    }
}

impl Surface for WebSurface {
    fn create_element(&self, tag: &str) -> NodeId {
        match self.document.create_element(tag) {
            Ok(element) => self.register(element),
            Err(err) => {
                showcase_warn!("create_element({}) failed: {:?}", tag, err);
                DETACHED
            }
        }
    }

    fn append_child(&self, parent: NodeId, child: NodeId) {
        if let (Some(parent), Some(child)) = (self.element(parent), self.element(child)) {
            check(parent.append_child(&child).map(|_| ()), "append_child");
        }
    }

    fn insert_after(&self, reference: NodeId, node: NodeId) {
        let (Some(reference), Some(node)) = (self.element(reference), self.element(node)) else {
            return;
        };
        if let Some(parent) = reference.parent_node() {
            let next = reference.next_sibling();
            check(
                parent.insert_before(&node, next.as_ref()).map(|_| ()),
                "insert_after",
            );
        }
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document
            .get_element_by_id(id)
            .map(|element| self.register(element))
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        self.register_all(self.document.query_selector_all(selector), selector)
    }

    fn query_within(&self, root: NodeId, selector: &str) -> Vec<NodeId> {
        match self.element(root) {
            Some(root) => self.register_all(root.query_selector_all(selector), selector),
            None => Vec::new(),
        }
    }

    fn set_attribute(&self, node: NodeId, name: &str, value: &str) {
        if let Some(element) = self.element(node) {
            check(element.set_attribute(name, value), "set_attribute");
        }
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.element(node)?.get_attribute(name)
    }

    fn set_text(&self, node: NodeId, text: &str) {
        if let Some(element) = self.element(node) {
            element.set_text_content(Some(text));
        }
    }

    fn text(&self, node: NodeId) -> String {
        self.element(node)
            .and_then(|element| element.text_content())
            .unwrap_or_default()
    }

    fn add_class(&self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            check(element.class_list().add_1(class), "classList.add");
        }
    }

    fn remove_class(&self, node: NodeId, class: &str) {
        if let Some(element) = self.element(node) {
            check(element.class_list().remove_1(class), "classList.remove");
        }
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.element(node)
            .is_some_and(|element| element.class_list().contains(class))
    }

    fn set_style(&self, node: NodeId, property: &str, value: &str) {
        if let Some(element) = self.html(node) {
            check(element.style().set_property(property, value), "style");
        }
    }

    fn offset_top(&self, node: NodeId) -> f64 {
        self.html(node)
            .map_or(0.0, |element| f64::from(element.offset_top()))
    }

    fn offset_height(&self, node: NodeId) -> f64 {
        self.html(node)
            .map_or(0.0, |element| f64::from(element.offset_height()))
    }

    fn bounding_top(&self, node: NodeId) -> f64 {
        self.element(node)
            .map_or(0.0, |element| element.get_bounding_client_rect().top())
    }

    fn bounding_height(&self, node: NodeId) -> f64 {
        self.element(node)
            .map_or(0.0, |element| element.get_bounding_client_rect().height())
    }

    fn viewport_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|width| width.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&self, top: f64, behavior: ScrollBehavior) {
        let options = ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(match behavior {
            ScrollBehavior::Smooth => web_sys::ScrollBehavior::Smooth,
            ScrollBehavior::Instant => web_sys::ScrollBehavior::Instant,
        });
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn now_ms(&self) -> f64 {
        Date::now()
    }

    fn random(&self) -> f64 {
        Math::random()
    }

    fn referrer(&self) -> Option<String> {
        Some(self.document.referrer()).filter(|referrer| !referrer.is_empty())
    }

    fn location_href(&self) -> String {
        self.window.location().href().unwrap_or_default()
    }

    fn location_hash(&self) -> String {
        self.window.location().hash().unwrap_or_default()
    }

    fn listen(&self, target: Target, kind: EventKind, listener: Listener) {
        let Some(event_target) = self.event_target(target) else {
            return;
        };
        let callback = Closure::wrap(Box::new(move |event: Event| {
            let dom_event = DomEvent::new(kind, target);
            listener(&dom_event);
            if dom_event.is_default_prevented() {
                event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);
        check(
            event_target
                .add_event_listener_with_callback(kind.dom_name(), callback.as_ref().unchecked_ref()),
            "addEventListener",
        );
        callback.forget();
    }

    fn set_timeout(&self, delay: Duration, task: TimerTask) -> TimerId {
        self.timers.release_spent();
        let id = self.timers.next_id();
        let spent = self.timers.spent.clone();
        let mut task = Some(task);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(task) = task.take() {
                task();
            }
            spent.borrow_mut().push(id);
        }) as Box<dyn FnMut()>);

        let delay_ms = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                delay_ms,
            ) {
            Ok(handle) => {
                self.timers
                    .pending
                    .borrow_mut()
                    .insert(id, (handle, callback));
            }
            Err(err) => showcase_warn!("setTimeout failed: {:?}", err),
        }
        TimerId(id)
    }

    fn clear_timeout(&self, timer: TimerId) {
        let entry = self.timers.pending.borrow_mut().remove(&timer.0);
        if let Some((handle, _callback)) = entry {
            self.window.clear_timeout_with_handle(handle);
        }
        self.timers.release_spent();
    }

    fn create_intersection_observer(
        &self,
        options: &ObserverOptions,
        callback: IntersectionCallback,
    ) -> ObserverId {
        let id = ObserverId(self.observers.borrow().len() as u32);
        let registry = self.registry.clone();
        let js_callback = Closure::wrap(Box::new(move |entries: Array, _: IntersectionObserver| {
            let entries: Vec<IntersectionEntry> = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .filter_map(|entry| {
                    Some(IntersectionEntry {
                        node: registry.register(entry.target()),
                        is_intersecting: entry.is_intersecting(),
                    })
                })
                .collect();
            callback(id, &entries);
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);
        let observer =
            match IntersectionObserver::new_with_options(js_callback.as_ref().unchecked_ref(), &init) {
                Ok(observer) => Some(observer),
                Err(err) => {
                    showcase_warn!("IntersectionObserver unavailable: {:?}", err);
                    None
                }
            };
        self.observers.borrow_mut().push(observer);
        js_callback.forget();
        id
    }

    fn observe(&self, observer: ObserverId, node: NodeId) {
        if let (Some(observer), Some(element)) = (self.observer(observer), self.element(node)) {
            observer.observe(&element);
        }
    }

    fn unobserve(&self, observer: ObserverId, node: NodeId) {
        if let (Some(observer), Some(element)) = (self.observer(observer), self.element(node)) {
            observer.unobserve(&element);
        }
    }
}
