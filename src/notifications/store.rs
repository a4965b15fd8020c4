// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The [`Store`] owns every notification of one application context. It caps
//! the number of entries, runs dismissal and removal timers, and broadcasts the
//! full state to its subscribers after each committed mutation.
//!
//! Timers are deadlines kept next to the records. They fire when
//! [`Store::tick_at`] is called with a time past them, which the
//! [`Store::run_timers`] driver does on its own as deadlines come due.

use super::notification::{Content, ContentPatch, Kind, Notification, NotificationId};
use crate::config::{DEFAULT_NOTIFICATION_DURATION_MS, DEFAULT_NOTIFICATION_LIMIT, DEFAULT_REMOVE_DELAY_MS};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;

/// Callback receiving the full notification list, newest first.
pub type Listener = dyn Fn(&[Notification]) + Send + Sync;

/// Tunables of a [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSettings {
    /// Maximum number of notifications held at once (at least 1).
    pub limit: usize,
    /// Delay between dismissal and physical removal.
    pub remove_delay: Duration,
    /// Lifetime used by the convenience producers when none is given.
    pub default_duration: Duration,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            limit: DEFAULT_NOTIFICATION_LIMIT,
            remove_delay: Duration::from_millis(DEFAULT_REMOVE_DELAY_MS),
            default_duration: Duration::from_millis(DEFAULT_NOTIFICATION_DURATION_MS),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    /// Newest first.
    notifications: VecDeque<Notification>,
    last_id: u64,
    /// Pending auto-dismissals (set by `create` with a duration).
    dismiss_at: HashMap<NotificationId, Instant>,
    /// Pending physical removals. At most one per id.
    remove_at: HashMap<NotificationId, Instant>,
}

impl State {
    fn position(&self, id: NotificationId) -> Option<usize> {
        self.notifications.iter().position(|n| n.id() == id)
    }

    fn forget_timers(&mut self, id: NotificationId) {
        self.dismiss_at.remove(&id);
        self.remove_at.remove(&id);
    }

    /// Closes the record and queues its removal. An earlier queued removal
    /// wins over `removal`.
    fn close(&mut self, index: usize, removal: Instant) -> bool {
        let notification = &mut self.notifications[index];
        let id = notification.id();
        let was_open = notification.close();
        self.dismiss_at.remove(&id);
        let scheduled = match self.remove_at.get(&id) {
            Some(&queued) if queued <= removal => false,
            _ => {
                self.remove_at.insert(id, removal);
                true
            }
        };
        was_open || scheduled
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.dismiss_at
            .values()
            .chain(self.remove_at.values())
            .min()
            .copied()
    }
}

#[derive(Default)]
struct Listeners {
    last_key: u64,
    entries: Vec<(u64, Arc<Listener>)>,
}

struct Shared {
    settings: StoreSettings,
    state: Mutex<State>,
    listeners: Mutex<Listeners>,
    /// Wakes the timer driver when a new deadline is scheduled.
    timers_changed: Notify,
}

/// Shared handle to one notification store.
///
/// Cloning is cheap and every clone observes the same state. Create one
/// store per application context and hand clones to producers and
/// renderers.
///
/// Listeners are called while the store serializes broadcasts, so a listener
/// must not call back into the store it is subscribed to.
#[derive(Clone)]
pub struct Store {
    shared: Arc<Shared>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new(StoreSettings::default())
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("settings", &self.shared.settings)
            .field("len", &self.len())
            .finish()
    }
}

enum Schedule {
    Manual,
    DismissAfter(Duration),
    RemoveAfter(Duration),
}

impl Store {
    /// Creates an empty store.
    #[must_use]
    pub fn new(settings: StoreSettings) -> Self {
        let settings = StoreSettings {
            limit: settings.limit.max(1),
            ..settings
        };
        Self {
            shared: Arc::new(Shared {
                settings,
                state: Mutex::new(State::default()),
                listeners: Mutex::new(Listeners::default()),
                timers_changed: Notify::new(),
            }),
        }
    }

    #[must_use]
    pub fn settings(&self) -> StoreSettings {
        self.shared.settings
    }

    /// Inserts a new open notification at the front and returns its id.
    ///
    /// The oldest entries beyond the limit are dropped outright, together with
    /// their pending timers. With a `duration`, the notification is dismissed
    /// automatically once it elapses.
    pub fn create(&self, content: Content, kind: Kind, duration: Option<Duration>) -> NotificationId {
        let schedule = duration.map_or(Schedule::Manual, Schedule::DismissAfter);
        self.insert(content, kind, schedule)
    }

    /// Shows `content` and removes it after `duration` (or the default lifetime).
    pub fn notify(&self, content: Content, kind: Kind, duration: Option<Duration>) -> NotificationId {
        let lifetime = duration.unwrap_or(self.shared.settings.default_duration);
        self.insert(content, kind, Schedule::RemoveAfter(lifetime))
    }

    pub fn success(&self, message: impl Into<String>, duration: Option<Duration>) -> NotificationId {
        self.notify(Content::message(message), Kind::Success, duration)
    }

    pub fn error(&self, message: impl Into<String>, duration: Option<Duration>) -> NotificationId {
        self.notify(Content::message(message), Kind::Error, duration)
    }

    pub fn info(&self, message: impl Into<String>, duration: Option<Duration>) -> NotificationId {
        self.notify(Content::message(message), Kind::Info, duration)
    }

    pub fn warning(&self, message: impl Into<String>, duration: Option<Duration>) -> NotificationId {
        self.notify(Content::message(message), Kind::Warning, duration)
    }

    fn insert(&self, content: Content, kind: Kind, schedule: Schedule) -> NotificationId {
        let now = Instant::now();
        let mut state = self.lock_state();

        state.last_id += 1;
        let id = NotificationId::from_raw(state.last_id);
        state
            .notifications
            .push_front(Notification::new(id, kind, content, now));

        while state.notifications.len() > self.shared.settings.limit {
            if let Some(evicted) = state.notifications.pop_back() {
                tracing::debug!(id = %evicted.id(), "notification evicted by limit");
                state.forget_timers(evicted.id());
            }
        }

        match schedule {
            Schedule::Manual => {}
            Schedule::DismissAfter(after) => {
                state.dismiss_at.insert(id, now + after);
            }
            Schedule::RemoveAfter(after) => {
                state.remove_at.insert(id, now + after);
            }
        }

        tracing::debug!(id = %id, kind = %kind, "notification created");
        self.commit(state);
        self.shared.timers_changed.notify_one();
        id
    }

    /// Merges `patch` into the notification with `id`. Unknown ids are ignored.
    pub fn update(&self, id: NotificationId, patch: ContentPatch) {
        let mut state = self.lock_state();
        let Some(index) = state.position(id) else {
            return;
        };
        if state.notifications[index].apply(patch) {
            self.commit(state);
        }
    }

    /// Hides one notification (or all of them with `None`) and schedules its
    /// removal after the removal delay.
    ///
    /// A notification that is already due for removal earlier keeps that
    /// deadline, so dismissing twice never postpones removal.
    pub fn dismiss(&self, id: Option<NotificationId>) {
        let removal = Instant::now() + self.shared.settings.remove_delay;
        let mut state = self.lock_state();

        let changed = match id {
            Some(id) => match state.position(id) {
                Some(index) => state.close(index, removal),
                None => false,
            },
            None => {
                let mut changed = false;
                for index in 0..state.notifications.len() {
                    changed |= state.close(index, removal);
                }
                changed
            }
        };

        if changed {
            tracing::debug!(id = ?id.map(|id| id.get()), "notification dismissed");
            self.commit(state);
            self.shared.timers_changed.notify_one();
        }
    }

    /// Deletes one notification (or all of them with `None`) immediately,
    /// cancelling its pending timers.
    pub fn remove(&self, id: Option<NotificationId>) {
        let mut state = self.lock_state();

        let changed = match id {
            Some(id) => {
                state.forget_timers(id);
                match state.position(id) {
                    Some(index) => {
                        state.notifications.remove(index);
                        true
                    }
                    None => false,
                }
            }
            None => {
                let had_any = !state.notifications.is_empty();
                state.notifications.clear();
                state.dismiss_at.clear();
                state.remove_at.clear();
                had_any
            }
        };

        if changed {
            tracing::debug!(id = ?id.map(|id| id.get()), "notification removed");
            self.commit(state);
        }
    }

    /// Registers `listener`; it is called with the full state after every
    /// mutation until the returned subscription is dropped or unsubscribed.
    #[must_use = "dropping the subscription unsubscribes the listener"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[Notification]) + Send + Sync + 'static,
    {
        let mut listeners = self.lock_listeners();
        listeners.last_key += 1;
        let key = listeners.last_key;
        listeners.entries.push((key, Arc::new(listener)));

        Subscription {
            store: Arc::downgrade(&self.shared),
            key,
        }
    }

    /// Fires every timer due at the current time.
    pub fn tick(&self) {
        self.tick_at(Instant::now());
    }

    /// Fires every timer due at `now`.
    ///
    /// A due auto-dismissal queues the removal relative to its own deadline,
    /// so a single late tick can close and remove the same notification.
    pub fn tick_at(&self, now: Instant) {
        let remove_delay = self.shared.settings.remove_delay;
        let mut state = self.lock_state();
        let mut changed = false;

        let mut due: Vec<(NotificationId, Instant)> = state
            .dismiss_at
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(id, at)| (*id, *at))
            .collect();
        due.sort_by_key(|(_, at)| *at);
        for (id, at) in due {
            match state.position(id) {
                Some(index) => changed |= state.close(index, at + remove_delay),
                None => {
                    state.dismiss_at.remove(&id);
                }
            }
        }

        let expired: Vec<NotificationId> = state
            .remove_at
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(id, _)| *id)
            .collect();
        for id in expired {
            state.remove_at.remove(&id);
            if let Some(index) = state.position(id) {
                state.notifications.remove(index);
                tracing::debug!(id = %id, "notification removed after delay");
                changed = true;
            }
        }

        if changed {
            self.commit(state);
        }
    }

    /// Earliest pending timer, if any.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.lock_state().next_deadline()
    }

    /// Drives the store's timers until the future is dropped.
    ///
    /// Spawn this once per store; it sleeps until the next deadline and wakes
    /// up early whenever a new timer is scheduled.
    pub async fn run_timers(&self) {
        loop {
            let changed = self.shared.timers_changed.notified();
            match self.next_deadline() {
                Some(deadline) => {
                    tokio::select! {
                        () = tokio::time::sleep_until(deadline) => self.tick(),
                        () = changed => {}
                    }
                }
                None => changed.await,
            }
        }
    }

    /// Copy of the current notifications, newest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.lock_state().notifications.iter().cloned().collect()
    }

    /// Copy of the notifications still visible, newest first.
    #[must_use]
    pub fn visible(&self) -> Vec<Notification> {
        self.lock_state()
            .notifications
            .iter()
            .filter(|n| n.is_open())
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn get(&self, id: NotificationId) -> Option<Notification> {
        let state = self.lock_state();
        state.position(id).map(|index| state.notifications[index].clone())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock_state().notifications.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of removal timers currently pending.
    #[must_use]
    pub fn pending_removals(&self) -> usize {
        self.lock_state().remove_at.len()
    }

    /// Publishes the committed state. The listener lock is taken before the
    /// state lock is released so broadcasts go out in mutation order.
    fn commit(&self, state: MutexGuard<'_, State>) {
        let snapshot: Vec<Notification> = state.notifications.iter().cloned().collect();
        let listeners = self.lock_listeners();
        drop(state);
        for (_, listener) in &listeners.entries {
            listener(&snapshot);
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.shared.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Listeners> {
        self.shared
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Registration handle returned by [`Store::subscribe`].
///
/// Dropping it (or calling [`Subscription::unsubscribe`]) deregisters the
/// listener.
#[derive(Debug)]
pub struct Subscription {
    store: Weak<Shared>,
    key: u64,
}

impl Subscription {
    pub fn unsubscribe(self) {
        // Drop does the work.
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(shared) = self.store.upgrade() {
            let mut listeners = shared.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            listeners.entries.retain(|(key, _)| *key != self.key);
        }
    }
}
