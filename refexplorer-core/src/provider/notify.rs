//! Provider Notifications
//!
//! Two kinds of listeners hang off a provider:
//!
//! - Discovery listeners are one-shot. They run once when the index finishes
//!   populating and are then forgotten.
//! - Asset change listeners are persistent. They stay registered until the
//!   [`Subscription`] handed out at registration is dropped.
//!
//! Listener lists are copied out of their lock before any callback runs, so
//! a callback may freely query the provider or register new listeners.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};
use smallvec::SmallVec;

use crate::asset::AssetMetadata;

/// Callback run once when discovery completes.
pub type DiscoveryListener = Box<dyn FnOnce() + Send>;

/// Callback run on every asset change.
pub type AssetChangeListener = Arc<dyn Fn(&AssetChange) + Send + Sync>;

/// Unique identifier for a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Generate a new unique listener ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::new()
    }
}

/// A change to the provider's asset index.
#[derive(Debug, Clone, PartialEq)]
pub enum AssetChange {
    Added(AssetMetadata),
    Removed(AssetMetadata),
    Updated(AssetMetadata),
}

impl AssetChange {
    /// The asset the change is about.
    pub fn asset(&self) -> &AssetMetadata {
        match self {
            AssetChange::Added(asset) | AssetChange::Removed(asset) | AssetChange::Updated(asset) => {
                asset
            }
        }
    }
}

/// Holds one-shot discovery listeners until discovery completes.
#[derive(Default)]
pub struct DiscoveryNotifier {
    pending: Mutex<Vec<DiscoveryListener>>,
}

impl DiscoveryNotifier {
    /// Create an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a listener for the next completion.
    pub fn register(&self, listener: DiscoveryListener) {
        self.pending.lock().push(listener);
    }

    /// Number of listeners waiting for completion.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Run and drop every queued listener. Returns how many ran.
    pub fn fire(&self) -> usize {
        let listeners = std::mem::take(&mut *self.pending.lock());
        let count = listeners.len();
        for listener in listeners {
            listener();
        }
        count
    }
}

/// Registry of persistent asset change listeners.
#[derive(Default)]
pub struct AssetChangeNotifier {
    listeners: RwLock<Vec<(ListenerId, AssetChangeListener)>>,
}

impl AssetChangeNotifier {
    /// Create an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a listener.
    ///
    /// Returns a subscription that unregisters the listener when dropped.
    pub fn subscribe(self: &Arc<Self>, listener: AssetChangeListener) -> Subscription {
        let id = ListenerId::new();
        self.listeners.write().push((id, listener));
        Subscription {
            id,
            notifier: Arc::downgrade(self),
        }
    }

    /// Remove a listener.
    fn unsubscribe(&self, id: ListenerId) {
        self.listeners.write().retain(|(listener_id, _)| *listener_id != id);
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Deliver `change` to every registered listener.
    pub fn notify(&self, change: &AssetChange) {
        let listeners: SmallVec<[AssetChangeListener; 4]> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        for listener in listeners {
            listener(change);
        }
    }
}

/// Handle to a registered asset change listener.
///
/// Dropping this handle unregisters the listener.
pub struct Subscription {
    id: ListenerId,
    notifier: Weak<AssetChangeNotifier>,
}

impl Subscription {
    /// Identifier of the registered listener.
    pub fn id(&self) -> ListenerId {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(notifier) = self.notifier.upgrade() {
            notifier.unsubscribe(self.id);
        }
    }
}
