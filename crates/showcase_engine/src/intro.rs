use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use showcase_core::{IntroSettings, IntroTarget};
use showcase_logging::showcase_debug;

use crate::classes::VISIBLE;
use crate::schedule::{CancellationToken, ScheduledTask};
use crate::surface::{NodeId, Surface, SurfaceRef};

const INTRO_ELEMENTS: [IntroTarget; 3] = [
    IntroTarget::StudioText,
    IntroTarget::RightDot,
    IntroTarget::LeftDot,
];

/// Whether the page carries any element the intro animates.
pub fn intro_present(surface: &dyn Surface) -> bool {
    INTRO_ELEMENTS
        .iter()
        .any(|target| surface.element_by_id(target.element_id()).is_some())
}

/// Hide the intro elements and schedule their reveal. Missing elements are
/// skipped. Returns the scheduled reveals in firing order.
pub fn run_intro(surface: &SurfaceRef, intro: &IntroSettings) -> Vec<ScheduledTask> {
    let mut scheduled = Vec::new();
    for cue in intro.timeline() {
        let Some(node) = surface.element_by_id(cue.target.element_id()) else {
            continue;
        };
        prepare(surface.as_ref(), cue.target, node, intro);

        let weak = Rc::downgrade(surface);
        let target = cue.target;
        scheduled.push(ScheduledTask::schedule(surface, cue.at, move || {
            if let Some(surface) = weak.upgrade() {
                reveal(surface.as_ref(), target, node);
            }
        }));
    }
    showcase_debug!("intro: scheduled {} reveals", scheduled.len());
    scheduled
}

fn prepare(surface: &dyn Surface, target: IntroTarget, node: NodeId, intro: &IntroSettings) {
    match target {
        IntroTarget::RightDot | IntroTarget::LeftDot => {
            surface.set_style(node, "opacity", "0");
            surface.set_style(node, "transition", &intro.dot_transition);
        }
        IntroTarget::StudioText => {
            surface.set_style(node, "opacity", "0");
            surface.set_style(node, "transform", "translateY(10px)");
        }
        IntroTarget::Tagline => {}
    }
}

fn reveal(surface: &dyn Surface, target: IntroTarget, node: NodeId) {
    surface.add_class(node, VISIBLE);
    match target {
        IntroTarget::RightDot | IntroTarget::LeftDot => {
            surface.set_style(node, "opacity", "1");
        }
        IntroTarget::StudioText => {
            surface.set_style(node, "opacity", "1");
            surface.set_style(node, "transform", "translateY(0)");
        }
        IntroTarget::Tagline => {}
    }
}

/// Types a text into an element one character per tick.
pub struct Typewriter {
    inner: Rc<TypewriterInner>,
}

struct TypewriterInner {
    surface: Weak<dyn Surface>,
    node: NodeId,
    chars: Vec<char>,
    typed: Cell<usize>,
    speed: Duration,
    token: CancellationToken,
    pending: RefCell<Option<ScheduledTask>>,
    on_complete: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl Typewriter {
    /// Clear `node` and start typing `text` at one character per `speed`.
    /// `on_complete` runs once after the last character.
    pub fn start(
        surface: &SurfaceRef,
        node: NodeId,
        text: &str,
        speed: Duration,
        on_complete: impl FnOnce() + 'static,
    ) -> Self {
        surface.set_text(node, "");
        let inner = Rc::new(TypewriterInner {
            surface: Rc::downgrade(surface),
            node,
            chars: text.chars().collect(),
            typed: Cell::new(0),
            speed,
            token: CancellationToken::new(),
            pending: RefCell::new(None),
            on_complete: RefCell::new(Some(Box::new(on_complete))),
        });
        TypewriterInner::schedule_next(&inner, surface);
        Self { inner }
    }

    pub fn cancel(&self) {
        self.inner.token.cancel();
        if let Some(pending) = self.inner.pending.borrow_mut().take() {
            pending.cancel();
        }
    }

    pub fn is_finished(&self) -> bool {
        self.inner.on_complete.borrow().is_none()
    }
}

impl TypewriterInner {
    fn schedule_next(inner: &Rc<Self>, surface: &SurfaceRef) {
        let next = inner.clone();
        let task = ScheduledTask::schedule(surface, inner.speed, move || next.tick());
        *inner.pending.borrow_mut() = Some(task);
    }

    fn tick(self: Rc<Self>) {
        if self.token.is_cancelled() {
            return;
        }
        let Some(surface) = self.surface.upgrade() else {
            return;
        };

        // An empty text still takes one tick before completing.
        let typed = (self.typed.get() + 1).min(self.chars.len().max(1));
        self.typed.set(typed);
        let shown: String = self.chars.iter().take(typed).collect();
        surface.set_text(self.node, &shown);

        if typed >= self.chars.len() {
            self.pending.borrow_mut().take();
            let done = self.on_complete.borrow_mut().take();
            if let Some(done) = done {
                done();
            }
        } else {
            Self::schedule_next(&self, &surface);
        }
    }
}
