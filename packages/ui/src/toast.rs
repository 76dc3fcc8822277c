//! # Toast notifications
//!
//! Every user-visible success or failure goes through [`ToastStack`]. Toasts
//! stack newest-last and each one owns a dismiss timer. The stack is bounded:
//! pushing past `max_visible` drops the oldest toast and cancels its timer,
//! and a manual dismiss cancels the timer too, so timers never pile up.

use api::{ApiError, ErrorKind};

use crate::timer::Cancel;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn class(&self) -> &'static str {
        match self {
            ToastLevel::Info => "toast info",
            ToastLevel::Success => "toast success",
            ToastLevel::Warning => "toast warning",
            ToastLevel::Error => "toast error",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub level: ToastLevel,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug)]
struct Entry<H> {
    toast: Toast,
    timer: Option<H>,
}

#[derive(Debug)]
pub struct ToastStack<H: Cancel> {
    entries: Vec<Entry<H>>,
    next_id: u64,
    max_visible: usize,
}

impl<H: Cancel> ToastStack<H> {
    pub fn new(max_visible: usize) -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
            max_visible: max_visible.max(1),
        }
    }

    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            toast: Toast {
                id,
                level,
                message: message.into(),
                timestamp: current_time(),
            },
            timer: None,
        });
        while self.entries.len() > self.max_visible {
            let evicted = self.entries.remove(0);
            if let Some(timer) = evicted.timer {
                timer.cancel();
            }
        }
        id
    }

    /// Attach the dismiss timer for `id`. Cancels `timer` straight away when
    /// the toast is already gone.
    pub fn attach_timer(&mut self, id: u64, timer: H) {
        match self.entries.iter_mut().find(|e| e.toast.id == id) {
            Some(entry) => {
                if let Some(previous) = entry.timer.replace(timer) {
                    previous.cancel();
                }
            }
            None => timer.cancel(),
        }
    }

    /// Remove a toast. `expired` is true when its own timer fired, in which
    /// case the timer is finished and is not cancelled.
    pub fn dismiss(&mut self, id: u64, expired: bool) -> bool {
        let Some(index) = self.entries.iter().position(|e| e.toast.id == id) else {
            return false;
        };
        let entry = self.entries.remove(index);
        if let (Some(timer), false) = (entry.timer, expired) {
            timer.cancel();
        }
        true
    }

    pub fn toasts(&self) -> Vec<Toast> {
        self.entries.iter().map(|e| e.toast.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Level and text for a failed backend call, following the error taxonomy:
/// transport problems are errors, rejected tokens warn that the session
/// ended, business rejections are informational.
pub fn error_toast(action: &str, error: &ApiError) -> (ToastLevel, String) {
    match error.kind() {
        ErrorKind::Transport => {
            tracing::error!("{} failed: {}", action, error);
            (ToastLevel::Error, format!("{action} failed. Please try again."))
        }
        ErrorKind::AuthRejected => (
            ToastLevel::Warning,
            "Your session has expired. Please log in again.".to_string(),
        ),
        ErrorKind::Business => (ToastLevel::Info, error.to_string()),
    }
}

/// Like [`error_toast`], but a refused login or registration is an error,
/// not a notice.
pub fn auth_error_toast(action: &str, error: &ApiError) -> (ToastLevel, String) {
    match error.kind() {
        ErrorKind::Business => (ToastLevel::Error, error.to_string()),
        _ => error_toast(action, error),
    }
}

fn current_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Timer(u64, Rc<RefCell<Vec<u64>>>);

    impl Cancel for Timer {
        fn cancel(self) {
            self.1.borrow_mut().push(self.0);
        }
    }

    #[test]
    fn test_overflow_drops_oldest_and_cancels_its_timer() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let mut stack = ToastStack::new(2);
        for n in 0..3 {
            let id = stack.push(ToastLevel::Info, format!("toast {n}"));
            stack.attach_timer(id, Timer(id, cancelled.clone()));
        }

        let messages: Vec<String> = stack.toasts().into_iter().map(|t| t.message).collect();
        assert_eq!(messages, vec!["toast 1", "toast 2"]);
        assert_eq!(*cancelled.borrow(), vec![1]);
    }

    #[test]
    fn test_manual_dismiss_cancels_timer() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let mut stack = ToastStack::new(5);
        let id = stack.push(ToastLevel::Success, "saved");
        stack.attach_timer(id, Timer(id, cancelled.clone()));

        assert!(stack.dismiss(id, false));
        assert!(!stack.dismiss(id, false));
        assert_eq!(*cancelled.borrow(), vec![id]);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_expiry_does_not_cancel() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let mut stack = ToastStack::new(5);
        let id = stack.push(ToastLevel::Warning, "careful");
        stack.attach_timer(id, Timer(id, cancelled.clone()));

        assert!(stack.dismiss(id, true));
        assert!(cancelled.borrow().is_empty());
    }

    #[test]
    fn test_timer_for_evicted_toast_is_cancelled() {
        let cancelled = Rc::new(RefCell::new(Vec::new()));
        let mut stack = ToastStack::new(1);
        let first = stack.push(ToastLevel::Info, "a");
        stack.push(ToastLevel::Info, "b");
        stack.attach_timer(first, Timer(first, cancelled.clone()));
        assert_eq!(*cancelled.borrow(), vec![first]);
    }

    #[test]
    fn test_error_toast_levels() {
        let (level, _) = error_toast("Login", &ApiError::Transport("down".into()));
        assert_eq!(level, ToastLevel::Error);
        let (level, text) = error_toast(
            "Downgrade",
            &ApiError::Rejected {
                status: 400,
                message: "Already on the free plan".into(),
            },
        );
        assert_eq!(level, ToastLevel::Info);
        assert_eq!(text, "Already on the free plan");
        let (level, _) = error_toast("Refresh", &ApiError::Unauthorized);
        assert_eq!(level, ToastLevel::Warning);
    }

    #[test]
    fn test_auth_refusal_is_an_error_toast() {
        let refused = ApiError::Rejected {
            status: 401,
            message: "Invalid email or password".into(),
        };
        assert_eq!(
            auth_error_toast("Login", &refused),
            (ToastLevel::Error, "Invalid email or password".to_string())
        );
        let (level, text) = auth_error_toast("Registration", &ApiError::Transport("down".into()));
        assert_eq!(level, ToastLevel::Error);
        assert_eq!(text, "Registration failed. Please try again.");
    }
}
