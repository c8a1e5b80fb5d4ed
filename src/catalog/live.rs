use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;

use crate::catalog::store::{FoodStore, Listener, Subscription};
use crate::models::FoodItem;

type Projection<T> = Arc<dyn Fn(&[FoodItem]) -> T + Send + Sync>;

/// A read-only projection over the food store that re-emits on every write.
///
/// Subscribers get the current value immediately. Later emissions only happen
/// when the store changes, so callers should not count on more than one.
pub struct LiveQuery<T> {
    store: Arc<FoodStore>,
    project: Projection<T>,
}

impl<T> Clone for LiveQuery<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            project: Arc::clone(&self.project),
        }
    }
}

impl<T: 'static> LiveQuery<T> {
    pub fn new(
        store: Arc<FoodStore>,
        project: impl Fn(&[FoodItem]) -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            store,
            project: Arc::new(project),
        }
    }

    /// One-shot snapshot of the projection.
    pub fn current(&self) -> T {
        self.store.read_foods(|foods| (self.project)(foods))
    }

    /// Call `on_emit` with the current value now and after every store write.
    pub fn subscribe(&self, on_emit: impl Fn(T) + Send + Sync + 'static) -> Subscription {
        let project = Arc::clone(&self.project);
        let listener: Listener = Arc::new(move |foods: &[FoodItem]| on_emit(project(foods)));
        self.store.register(listener)
    }
}

impl<T: Send + 'static> LiveQuery<T> {
    /// Deliver emissions through a channel so they can be drained on the
    /// consumer's own thread. The latest received value is authoritative.
    pub fn into_channel(self) -> (Receiver<T>, Subscription) {
        let (tx, rx) = mpsc::channel();
        let tx = std::sync::Mutex::new(tx);
        let subscription = self.subscribe(move |value| {
            if let Ok(tx) = tx.lock() {
                // Receiver gone means the consumer closed; nothing left to do.
                let _ = tx.send(value);
            }
        });
        (rx, subscription)
    }
}
