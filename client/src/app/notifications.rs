//! # Notifications
//!
//! Short-lived toasts confirming or reporting the outcome of an action.
//!
//! Every toast gets an expiry timer on the tokio runtime. The timers belong to
//! the [`NotificationCenter`]: dismissing a toast aborts its timer, and
//! dropping the center aborts all of them, so nothing fires after teardown.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// How long a toast stays visible.
pub const TOAST_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub kind: ToastKind,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub duration: Duration,
}

/// Owns the visible toasts and their expiry timers.
#[derive(Debug)]
pub struct NotificationCenter {
    toasts: Arc<RwLock<Vec<Toast>>>,
    timers: Arc<Mutex<HashMap<Uuid, JoinHandle<()>>>>,
    duration: Duration,
}

impl Default for NotificationCenter {
    fn default() -> Self {
        Self::with_duration(TOAST_DURATION)
    }
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_duration(duration: Duration) -> Self {
        Self {
            toasts: Arc::new(RwLock::new(Vec::new())),
            timers: Arc::new(Mutex::new(HashMap::new())),
            duration,
        }
    }

    /// Show a success toast
    pub fn success(&self, message: impl Into<String>) -> Toast {
        self.push(ToastKind::Success, message.into())
    }

    /// Show an error toast
    pub fn error(&self, message: impl Into<String>) -> Toast {
        self.push(ToastKind::Error, message.into())
    }

    /// Toasts that have not expired yet, oldest first.
    pub fn active(&self) -> Vec<Toast> {
        self.toasts.read().clone()
    }

    /// Remove a toast early. Returns whether it was still visible.
    pub fn dismiss(&self, id: Uuid) -> bool {
        if let Some(timer) = self.timers.lock().remove(&id) {
            timer.abort();
        }
        let mut toasts = self.toasts.write();
        let before = toasts.len();
        toasts.retain(|toast| toast.id != id);
        toasts.len() != before
    }

    /// Abort every pending timer and drop all toasts.
    pub fn shutdown(&self) {
        for (_, timer) in self.timers.lock().drain() {
            timer.abort();
        }
        self.toasts.write().clear();
    }

    fn push(&self, kind: ToastKind, message: String) -> Toast {
        let toast = Toast {
            id: Uuid::new_v4(),
            kind,
            message,
            created_at: Utc::now(),
            duration: self.duration,
        };
        self.toasts.write().push(toast.clone());
        tracing::debug!(id = %toast.id, kind = ?toast.kind, message = %toast.message, "Toast shown");

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let id = toast.id;
                let duration = self.duration;
                let toasts = Arc::clone(&self.toasts);
                let timers = Arc::clone(&self.timers);
                // Hold the timer lock across spawn so the task cannot remove
                // its own entry before it is inserted.
                let mut pending = self.timers.lock();
                let timer = handle.spawn(async move {
                    tokio::time::sleep(duration).await;
                    toasts.write().retain(|toast| toast.id != id);
                    timers.lock().remove(&id);
                });
                pending.insert(id, timer);
            }
            Err(_) => {
                tracing::warn!(id = %toast.id, "No async runtime, toast will stay until dismissed");
            }
        }
        toast
    }
}

impl Drop for NotificationCenter {
    fn drop(&mut self) {
        for (_, timer) in self.timers.lock().drain() {
            timer.abort();
        }
    }
}
