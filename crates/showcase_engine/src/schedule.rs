use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use crate::surface::{Surface, SurfaceRef, TimerId};

/// Shared flag telling a scheduled task not to run.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// A one-shot timer that can be cancelled through its handle or its token.
///
/// Dropping the handle does not cancel the task.
pub struct ScheduledTask {
    surface: Weak<dyn Surface>,
    timer: TimerId,
    token: CancellationToken,
    fired: Rc<Cell<bool>>,
}

impl ScheduledTask {
    pub fn schedule(
        surface: &SurfaceRef,
        delay: Duration,
        task: impl FnOnce() + 'static,
    ) -> Self {
        let token = CancellationToken::new();
        let fired = Rc::new(Cell::new(false));
        let guard = token.clone();
        let fired_flag = fired.clone();
        let timer = surface.set_timeout(
            delay,
            Box::new(move || {
                if guard.is_cancelled() {
                    return;
                }
                fired_flag.set(true);
                task();
            }),
        );
        Self {
            surface: Rc::downgrade(surface),
            timer,
            token,
            fired,
        }
    }

    pub fn cancel(&self) {
        if self.token.is_cancelled() || self.fired.get() {
            return;
        }
        self.token.cancel();
        if let Some(surface) = self.surface.upgrade() {
            surface.clear_timeout(self.timer);
        }
    }

    pub fn is_pending(&self) -> bool {
        !self.token.is_cancelled() && !self.fired.get()
    }

    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }
}

/// Runs only the last of a burst of calls, once `delay` has passed without
/// a newer call.
pub struct Debouncer {
    surface: Weak<dyn Surface>,
    delay: Duration,
    pending: RefCell<Option<ScheduledTask>>,
}

impl Debouncer {
    pub fn new(surface: &SurfaceRef, delay: Duration) -> Self {
        Self {
            surface: Rc::downgrade(surface),
            delay,
            pending: RefCell::new(None),
        }
    }

    pub fn call(&self, task: impl FnOnce() + 'static) {
        if let Some(previous) = self.pending.borrow_mut().take() {
            previous.cancel();
        }
        let Some(surface) = self.surface.upgrade() else {
            return;
        };
        let next = ScheduledTask::schedule(&surface, self.delay, task);
        *self.pending.borrow_mut() = Some(next);
    }

    pub fn is_pending(&self) -> bool {
        self.pending
            .borrow()
            .as_ref()
            .is_some_and(ScheduledTask::is_pending)
    }
}
