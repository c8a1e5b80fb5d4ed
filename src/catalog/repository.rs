use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::warn;

use crate::catalog::live::LiveQuery;
use crate::catalog::store::FoodStore;
use crate::models::FoodItem;

/// Read-only access to the food catalog.
///
/// Every query is live: it keeps reflecting the store after writes.
pub trait FoodRepository {
    /// Distinct category names.
    fn list_categories(&self) -> LiveQuery<Vec<String>>;

    /// Foods whose category matches exactly. Unknown categories yield an empty list.
    fn list_foods_in_category(&self, category: &str) -> LiveQuery<Vec<FoodItem>>;

    /// Case-sensitive exact lookup by display name.
    ///
    /// Names are only unique within a category; the first match wins.
    fn get_food_by_name(&self, name: &str) -> LiveQuery<Option<FoodItem>>;

    /// Exact lookup of one food by category and name.
    fn get_food_in_category(&self, category: &str, name: &str) -> LiveQuery<Option<FoodItem>>;

    /// Resolve a name, falling back to [`FoodItem::placeholder`] when absent.
    fn get_food_or_placeholder(&self, name: &str) -> FoodItem {
        match self.get_food_by_name(name).current() {
            Some(food) => food,
            None => {
                warn!(name, "food not found, using placeholder");
                FoodItem::placeholder()
            }
        }
    }
}

/// [`FoodRepository`] backed by the in-process [`FoodStore`].
#[derive(Clone)]
pub struct CatalogRepository {
    store: Arc<FoodStore>,
}

impl CatalogRepository {
    pub fn new(store: Arc<FoodStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<FoodStore> {
        &self.store
    }

    /// All foods, in catalog order.
    pub fn all_foods(&self) -> Vec<FoodItem> {
        self.store.read_foods(|foods| foods.to_vec())
    }
}

impl FoodRepository for CatalogRepository {
    fn list_categories(&self) -> LiveQuery<Vec<String>> {
        LiveQuery::new(Arc::clone(&self.store), |foods| {
            foods
                .iter()
                .map(|f| f.category.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        })
    }

    fn list_foods_in_category(&self, category: &str) -> LiveQuery<Vec<FoodItem>> {
        let category = category.to_string();
        LiveQuery::new(Arc::clone(&self.store), move |foods| {
            foods
                .iter()
                .filter(|f| f.category == category)
                .cloned()
                .collect()
        })
    }

    fn get_food_by_name(&self, name: &str) -> LiveQuery<Option<FoodItem>> {
        let name = name.to_string();
        LiveQuery::new(Arc::clone(&self.store), move |foods| {
            foods.iter().find(|f| f.name == name).cloned()
        })
    }

    fn get_food_in_category(&self, category: &str, name: &str) -> LiveQuery<Option<FoodItem>> {
        let category = category.to_string();
        let name = name.to_string();
        LiveQuery::new(Arc::clone(&self.store), move |foods| {
            foods
                .iter()
                .find(|f| f.category == category && f.name == name)
                .cloned()
        })
    }
}
