use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock, Weak};

use tracing::debug;

use crate::catalog::persistence::{dedupe_foods, validate_catalog};
use crate::error::Result;
use crate::models::FoodItem;

pub(crate) type Listener = Arc<dyn Fn(&[FoodItem]) + Send + Sync>;

/// In-process food table shared by every live query.
///
/// Listeners run on the writing thread while the dispatch lock is held, so
/// they must not write back into the store.
pub struct FoodStore {
    foods: RwLock<Vec<FoodItem>>,
    version: AtomicU64,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    dispatch: Mutex<()>,
}

impl FoodStore {
    /// Create a store seeded with already validated foods.
    pub fn new(foods: Vec<FoodItem>) -> Result<Arc<Self>> {
        validate_catalog(&foods)?;
        Ok(Arc::new(Self {
            foods: RwLock::new(dedupe_foods(foods)),
            version: AtomicU64::new(0),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(0),
            dispatch: Mutex::new(()),
        }))
    }

    pub fn empty() -> Arc<Self> {
        Arc::new(Self {
            foods: RwLock::new(Vec::new()),
            version: AtomicU64::new(0),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(0),
            dispatch: Mutex::new(()),
        })
    }

    /// Number of writes applied since creation.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.read_foods(|foods| foods.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run `f` against the current table.
    pub fn read_foods<R>(&self, f: impl FnOnce(&[FoodItem]) -> R) -> R {
        let foods = self.foods.read().unwrap_or_else(PoisonError::into_inner);
        f(&foods)
    }

    /// Replace the whole table and notify subscribers.
    pub fn replace_all(&self, foods: Vec<FoodItem>) -> Result<()> {
        validate_catalog(&foods)?;
        let foods = dedupe_foods(foods);
        self.write(move |table| *table = foods);
        Ok(())
    }

    /// Insert a food, or replace the one with the same category and name.
    pub fn upsert(&self, food: FoodItem) -> Result<()> {
        validate_catalog(std::slice::from_ref(&food))?;
        self.write(move |table| {
            match table
                .iter_mut()
                .find(|f| f.category == food.category && f.name == food.name)
            {
                Some(existing) => *existing = food,
                None => table.push(food),
            }
        });
        Ok(())
    }

    fn write(&self, apply: impl FnOnce(&mut Vec<FoodItem>)) {
        let _dispatch = self.lock_dispatch();
        let snapshot = {
            let mut table = self.foods.write().unwrap_or_else(PoisonError::into_inner);
            apply(&mut table);
            table.clone()
        };
        let version = self.version.fetch_add(1, Ordering::SeqCst) + 1;
        let listeners = self.listeners_snapshot();
        debug!(version, listeners = listeners.len(), "food store updated");
        for listener in listeners {
            listener(&snapshot);
        }
    }

    /// Register a listener and emit the current table to it right away.
    pub(crate) fn register(self: &Arc<Self>, listener: Listener) -> Subscription {
        let _dispatch = self.lock_dispatch();
        let id = self.next_listener_id.fetch_add(1, Ordering::SeqCst);
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::clone(&listener)));

        let snapshot = self.read_foods(|foods| foods.to_vec());
        listener(&snapshot);

        Subscription {
            store: Arc::downgrade(self),
            id,
        }
    }

    fn unregister(&self, id: u64) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(listener_id, _)| *listener_id != id);
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn listeners_snapshot(&self) -> Vec<Listener> {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }

    fn lock_dispatch(&self) -> MutexGuard<'_, ()> {
        self.dispatch.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Keeps a live query subscribed; dropping it stops further emissions.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    store: Weak<FoodStore>,
    id: u64,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.unregister(self.id);
        }
    }
}
