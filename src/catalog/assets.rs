use std::collections::HashMap;

use tracing::warn;

use crate::models::FoodItem;

/// Asset shown when a food has no image mapping.
pub const PLACEHOLDER_ASSET: &str = "food_image_placeholder";

/// Load-time mapping from `(category, name)` to an image asset id.
#[derive(Debug, Clone, Default)]
pub struct AssetIndex {
    assets: HashMap<(String, String), String>,
}

impl AssetIndex {
    pub fn from_foods(foods: &[FoodItem]) -> Self {
        let assets = foods
            .iter()
            .map(|food| {
                let asset = food
                    .image
                    .clone()
                    .unwrap_or_else(|| asset_slug(&food.category, &food.name));
                (food.key(), asset)
            })
            .collect();
        Self { assets }
    }

    pub fn lookup(&self, category: &str, name: &str) -> Option<&str> {
        self.assets
            .get(&(category.to_string(), name.to_string()))
            .map(String::as_str)
    }

    /// Same as [`lookup`](Self::lookup) but never fails; misses are logged.
    pub fn lookup_or_placeholder(&self, category: &str, name: &str) -> &str {
        match self.lookup(category, name) {
            Some(asset) => asset,
            None => {
                warn!(category, name, "no asset for food, using placeholder");
                PLACEHOLDER_ASSET
            }
        }
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}

/// Asset id derived from category and name: lowercase ASCII, `_` separated.
pub fn asset_slug(category: &str, name: &str) -> String {
    let raw = format!("{}_{}", category, name);
    let mut slug = String::with_capacity(raw.len());
    for c in raw.chars().map(fold_accent) {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    slug.trim_matches('_').to_string()
}

fn fold_accent(c: char) -> char {
    match c {
        'á' | 'à' | 'ä' | 'â' | 'Á' | 'À' | 'Ä' | 'Â' => 'a',
        'é' | 'è' | 'ë' | 'ê' | 'É' | 'È' | 'Ë' | 'Ê' => 'e',
        'í' | 'ì' | 'ï' | 'î' | 'Í' | 'Ì' | 'Ï' | 'Î' => 'i',
        'ó' | 'ò' | 'ö' | 'ô' | 'Ó' | 'Ò' | 'Ö' | 'Ô' => 'o',
        'ú' | 'ù' | 'ü' | 'û' | 'Ú' | 'Ù' | 'Ü' | 'Û' => 'u',
        'ñ' | 'Ñ' => 'n',
        other => other,
    }
}
