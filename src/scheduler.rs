//! Deferred tasks and wall-clock time, injected so the flow can run under a
//! simulated clock.

use std::fmt;
use std::time::Duration;

use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::js_sys::Date;

/// Runs a task once after a delay.
pub trait Scheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ScheduledTask;
}

/// Handle to a pending task. Cancelling or dropping it stops the task from running.
#[must_use = "dropping a ScheduledTask cancels it"]
pub struct ScheduledTask {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl ScheduledTask {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        ScheduledTask {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A task that cannot be cancelled (e.g. scheduling itself failed).
    pub fn detached() -> Self {
        ScheduledTask { cancel: None }
    }

    pub fn cancel(mut self) {
        self.run_cancel();
    }

    /// Let the task run even though this handle goes away.
    pub fn detach(mut self) {
        self.cancel = None;
    }

    fn run_cancel(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.run_cancel();
    }
}

impl fmt::Debug for ScheduledTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduledTask")
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

/// [`Scheduler`] backed by `window.setTimeout` / `window.clearTimeout`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn schedule(&self, delay: Duration, task: Box<dyn FnOnce()>) -> ScheduledTask {
        let Some(window) = web_sys::window() else {
            log::warn!("no window; deferred task dropped");
            return ScheduledTask::detached();
        };

        // Frees itself once invoked, so a detached task stays callable.
        let callback = Closure::once_into_js(move || task());
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        match window.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            millis,
        ) {
            Ok(handle) => ScheduledTask::new(move || {
                if let Some(window) = web_sys::window() {
                    window.clear_timeout_with_handle(handle);
                }
            }),
            Err(err) => {
                log::warn!("setTimeout failed: {err:?}");
                ScheduledTask::detached()
            }
        }
    }
}

/// Milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// [`Clock`] backed by `Date.now()`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_millis(&self) -> u64 {
        Date::now() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn dropping_a_task_cancels_it_once() {
        let cancelled = Rc::new(Cell::new(0));
        let task = {
            let cancelled = cancelled.clone();
            ScheduledTask::new(move || cancelled.set(cancelled.get() + 1))
        };
        drop(task);
        assert_eq!(cancelled.get(), 1);

        let task = {
            let cancelled = cancelled.clone();
            ScheduledTask::new(move || cancelled.set(cancelled.get() + 1))
        };
        task.cancel();
        assert_eq!(cancelled.get(), 2);
    }

    #[test]
    fn detached_tasks_are_never_cancelled() {
        let cancelled = Rc::new(Cell::new(false));
        let task = {
            let cancelled = cancelled.clone();
            ScheduledTask::new(move || cancelled.set(true))
        };
        task.detach();
        assert!(!cancelled.get());
    }
}
