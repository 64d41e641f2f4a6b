//! Session context shared by the views of one signed-in session.
//!
//! SessionContext carries slowly-changing, session-scoped settings that many
//! unrelated views read:
//! - Locale
//! - Granted permissions
//! - Unread notification count
//! - Preferred page size
//!
//! It is created once and handed down to whoever needs it; clones share the
//! same state. Readers either take a snapshot with [`SessionContext::get`] or
//! hold a [`Subscription`] and check it for changes.

use std::collections::BTreeSet;
use std::num::NonZeroUsize;

use tokio::sync::watch;

/// Session-scoped settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Session {
    pub locale: String,
    pub permissions: BTreeSet<String>,
    pub unread_notifications: u32,
    /// Page size the user picked, if any; views fall back to their config.
    pub page_size: Option<NonZeroUsize>,
}

impl Session {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            ..Self::default()
        }
    }

    /// Returns `true` if the permission was granted to this session.
    pub fn can(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

/// Shared handle to session state with an update/subscribe contract.
///
/// # Example
///
/// ```
/// use tabula_lib::context::{Session, SessionContext};
///
/// let cx = SessionContext::new(Session::new("en"));
/// let mut sub = cx.subscribe();
///
/// cx.update(|s| s.unread_notifications += 1);
/// assert!(sub.has_changed());
/// assert_eq!(sub.latest().unread_notifications, 1);
/// assert!(!sub.has_changed());
/// ```
#[derive(Debug, Clone)]
pub struct SessionContext<S = Session> {
    tx: watch::Sender<S>,
}

impl<S: Clone> SessionContext<S> {
    /// Create a context holding the initial state.
    pub fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Snapshot of the current state.
    pub fn get(&self) -> S {
        self.tx.borrow().clone()
    }

    /// Read the current state without cloning it.
    pub fn read<T>(&self, f: impl FnOnce(&S) -> T) -> T {
        f(&self.tx.borrow())
    }

    /// Modify the state in place and notify every subscriber.
    pub fn update(&self, f: impl FnOnce(&mut S)) {
        self.tx.send_modify(f);
    }

    /// Replace the state and notify every subscriber.
    pub fn replace(&self, state: S) {
        self.tx.send_replace(state);
    }

    /// Start observing changes made after this call.
    pub fn subscribe(&self) -> Subscription<S> {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A reader that can tell whether the state changed since it last looked.
#[derive(Debug)]
pub struct Subscription<S> {
    rx: watch::Receiver<S>,
}

impl<S: Clone> Subscription<S> {
    /// Returns `true` if the state changed since the last [`latest`](Self::latest).
    pub fn has_changed(&self) -> bool {
        self.rx.has_changed().unwrap_or(false)
    }

    /// Current state, marking it as seen.
    pub fn latest(&mut self) -> S {
        self.rx.borrow_and_update().clone()
    }

    /// Wait until the state changes, then return it.
    ///
    /// Returns `None` once every [`SessionContext`] handle is dropped.
    pub async fn changed(&mut self) -> Option<S> {
        self.rx.changed().await.ok()?;
        Some(self.latest())
    }
}
