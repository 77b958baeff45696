//! Typed callback channels.
//!
//! Each [`CommandKind`](super::CommandKind) payload has its own channel.
//! Subscribing returns a [`Subscription`] guard; dropping the guard removes
//! the subscriber.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use bevy::math::{Vec2, Vec3, Vec4};

use super::{Dispatch, DispatchArgs};

/// Boxed subscriber callback for a channel carrying `T`.
pub type Subscriber<T> = Box<dyn FnMut(&DispatchArgs, T) + Send>;

struct Subscribers<T> {
    next_id: u64,
    entries: Vec<(u64, Subscriber<T>)>,
    /// Number of `invoke` calls currently running.
    depth: usize,
    /// Ids unsubscribed while their entry was taken out for an invocation.
    removed: Vec<u64>,
}

impl<T> Subscribers<T> {
    fn remove(&mut self, id: u64) {
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        if self.depth > 0 {
            self.removed.push(id);
        }
    }
}

/// A list of subscribers for one payload type.
///
/// Subscribers run synchronously in subscription order. A subscriber may drop
/// its own [`Subscription`] or subscribe new callbacks; both take effect once
/// the current invocation finishes.
pub struct Channel<T> {
    inner: Arc<Mutex<Subscribers<T>>>,
}

impl<T: Copy + 'static> Channel<T> {
    /// Create a channel with no subscribers.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Subscribers {
                next_id: 0,
                entries: Vec::new(),
                depth: 0,
                removed: Vec::new(),
            })),
        }
    }

    /// Add a subscriber. It stays registered until the returned guard drops.
    pub fn subscribe<F>(&self, subscriber: F) -> Subscription
    where
        F: FnMut(&DispatchArgs, T) + Send + 'static,
    {
        let id = {
            let mut subscribers = self.lock();
            let id = subscribers.next_id;
            subscribers.next_id += 1;
            subscribers.entries.push((id, Box::new(subscriber)));
            id
        };

        let weak: Weak<Mutex<Subscribers<T>>> = Arc::downgrade(&self.inner);
        Subscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.lock().unwrap_or_else(PoisonError::into_inner).remove(id);
                }
            })),
        }
    }

    /// Invoke every subscriber. Returns how many were called.
    ///
    /// The lock is not held while subscribers run.
    pub fn invoke(&self, args: &DispatchArgs, value: T) -> usize {
        let mut invocation = Invocation::start(self);
        for (_, subscriber) in invocation.running.iter_mut() {
            subscriber(args, value);
        }
        invocation.running.len()
    }

    /// Get the number of subscribers.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Check if there are no subscribers.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Channel<T> {
    fn lock(&self) -> MutexGuard<'_, Subscribers<T>> {
        // A panicking subscriber poisons the lock; the list itself is still valid.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T: Copy + 'static> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Subscribers taken out of a channel for one `invoke`.
///
/// Dropping it puts them back in front of any added meanwhile, minus those
/// unsubscribed meanwhile. This also runs when a subscriber panics.
struct Invocation<'a, T> {
    channel: &'a Channel<T>,
    running: Vec<(u64, Subscriber<T>)>,
}

impl<'a, T> Invocation<'a, T> {
    fn start(channel: &'a Channel<T>) -> Self {
        let mut subscribers = channel.lock();
        subscribers.depth += 1;
        let running = std::mem::take(&mut subscribers.entries);
        Self { channel, running }
    }
}

impl<T> Drop for Invocation<'_, T> {
    fn drop(&mut self) {
        let mut subscribers = self.channel.lock();
        subscribers.depth -= 1;

        let mut running = std::mem::take(&mut self.running);
        running.retain(|(id, _)| !subscribers.removed.contains(id));
        running.append(&mut subscribers.entries);
        subscribers.entries = running;

        if subscribers.depth == 0 {
            subscribers.removed.clear();
        }
    }
}

/// Guard for a channel subscription.
///
/// Dropping it unsubscribes. Use [`forget`](Self::forget) to keep the
/// subscriber for as long as the console lives.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Release the guard without unsubscribing.
    pub fn forget(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unsubscribe.is_some())
            .finish()
    }
}

/// One channel per dispatch shape.
#[derive(Default)]
pub struct ConsoleChannels {
    pub trigger: Channel<()>,
    pub vec2: Channel<Vec2>,
    pub vec3: Channel<Vec3>,
    pub vec4: Channel<Vec4>,
    pub float: Channel<f32>,
    pub int: Channel<i32>,
}

impl ConsoleChannels {
    /// Route a dispatch to its channel. Returns how many subscribers ran.
    pub fn invoke(&self, dispatch: &Dispatch) -> usize {
        match dispatch {
            Dispatch::Trigger(args) => self.trigger.invoke(args, ()),
            Dispatch::Vec2(args, v) => self.vec2.invoke(args, *v),
            Dispatch::Vec3(args, v) => self.vec3.invoke(args, *v),
            Dispatch::Vec4(args, v) => self.vec4.invoke(args, *v),
            Dispatch::Float(args, v) => self.float.invoke(args, *v),
            Dispatch::Int(args, v) => self.int.invoke(args, *v),
        }
    }
}

impl std::fmt::Debug for ConsoleChannels {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleChannels")
            .field("trigger", &self.trigger.len())
            .field("vec2", &self.vec2.len())
            .field("vec3", &self.vec3.len())
            .field("vec4", &self.vec4.len())
            .field("float", &self.float.len())
            .field("int", &self.int.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_subscribe_and_invoke() {
        let channel = Channel::<f32>::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        let _sub = channel.subscribe(move |args, value| {
            sink.lock().unwrap().push((args.keyword().to_string(), value));
        });

        assert_eq!(channel.invoke(&DispatchArgs::new("speed"), 2.5), 1);
        assert_eq!(*seen.lock().unwrap(), vec![("speed".to_string(), 2.5)]);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let channel = Channel::<()>::new();
        let count = Arc::new(AtomicUsize::new(0));

        let counter = count.clone();
        let sub = channel.subscribe(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        channel.invoke(&DispatchArgs::new("fly"), ());
        drop(sub);
        assert!(channel.is_empty());
        assert_eq!(channel.invoke(&DispatchArgs::new("fly"), ()), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_forget_keeps_subscriber() {
        let channel = Channel::<i32>::new();
        channel.subscribe(|_, _| {}).forget();
        assert_eq!(channel.len(), 1);
    }

    #[test]
    fn test_subscription_outlives_channel() {
        let channel = Channel::<i32>::new();
        let sub = channel.subscribe(|_, _| {});
        drop(channel);
        drop(sub);
    }

    #[test]
    fn test_unsubscribe_only_removes_own_entry() {
        let channel = Channel::<i32>::new();
        let first = channel.subscribe(|_, _| {});
        let _second = channel.subscribe(|_, _| {});
        drop(first);
        assert_eq!(channel.len(), 1);
    }

    #[test]
    fn test_console_channels_route_by_shape() {
        let channels = ConsoleChannels::default();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        let _sub = channels.vec3.subscribe(move |_, v| {
            assert_eq!(v, Vec3::new(1.0, 2.0, 3.0));
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let vec3 = Dispatch::Vec3(DispatchArgs::new("teleport"), Vec3::new(1.0, 2.0, 3.0));
        let vec2 = Dispatch::Vec2(DispatchArgs::new("teleport"), Vec2::ONE);
        assert_eq!(channels.invoke(&vec3), 1);
        assert_eq!(channels.invoke(&vec2), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscriber_can_drop_its_own_subscription() {
        let channel = Channel::<i32>::new();
        let count = Arc::new(AtomicUsize::new(0));
        let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));

        let counter = count.clone();
        let own = slot.clone();
        let sub = channel.subscribe(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            drop(own.lock().unwrap().take());
        });
        let _other = channel.subscribe(|_, _| {});
        *slot.lock().unwrap() = Some(sub);

        assert_eq!(channel.invoke(&DispatchArgs::new("once"), 1), 2);
        assert_eq!(channel.len(), 1);
        assert_eq!(channel.invoke(&DispatchArgs::new("once"), 2), 1);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscribe_during_invoke_runs_next_time() {
        let channel = Arc::new(Channel::<()>::new());
        let count = Arc::new(AtomicUsize::new(0));
        let added = Arc::new(Mutex::new(Vec::new()));

        let inner_channel = Arc::downgrade(&channel);
        let counter = count.clone();
        let keep = added.clone();
        channel
            .subscribe(move |_, _| {
                if let Some(channel) = inner_channel.upgrade() {
                    let counter = counter.clone();
                    let sub = channel.subscribe(move |_, _| {
                        counter.fetch_add(1, Ordering::SeqCst);
                    });
                    keep.lock().unwrap().push(sub);
                }
            })
            .forget();

        assert_eq!(channel.invoke(&DispatchArgs::new("spawn"), ()), 1);
        assert_eq!(count.load(Ordering::SeqCst), 0);
        assert_eq!(channel.len(), 2);

        assert_eq!(channel.invoke(&DispatchArgs::new("spawn"), ()), 2);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }
}
