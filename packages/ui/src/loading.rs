//! Loading indicators that always clear.
//!
//! A [`BusyGuard`] bumps a counter when created and drops it again when it
//! goes out of scope, so an early `return` or `?` in an async handler still
//! clears the spinner.

use std::cell::Cell;
use std::rc::Rc;

use dioxus::prelude::*;

pub trait BusyCounter {
    fn adjust(&self, delta: i32);
    fn count(&self) -> u32;

    fn is_busy(&self) -> bool {
        self.count() > 0
    }
}

impl BusyCounter for Signal<u32> {
    /// The owning component may already be gone when a guard drops.
    fn adjust(&self, delta: i32) {
        let mut signal = *self;
        if let Ok(mut count) = signal.try_write() {
            *count = count.saturating_add_signed(delta);
        };
    }

    fn count(&self) -> u32 {
        self.try_peek().map(|count| *count).unwrap_or(0)
    }
}

impl BusyCounter for Rc<Cell<u32>> {
    fn adjust(&self, delta: i32) {
        self.set(self.get().saturating_add_signed(delta));
    }

    fn count(&self) -> u32 {
        self.get()
    }
}

#[must_use = "the indicator clears as soon as the guard is dropped"]
pub struct BusyGuard<C: BusyCounter> {
    counter: C,
}

impl<C: BusyCounter> BusyGuard<C> {
    pub fn start(counter: C) -> Self {
        counter.adjust(1);
        Self { counter }
    }
}

impl<C: BusyCounter> Drop for BusyGuard<C> {
    fn drop(&mut self) {
        self.counter.adjust(-1);
    }
}
