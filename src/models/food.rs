use serde::{Deserialize, Serialize};

/// Name used by the placeholder entry returned when a lookup misses.
pub const PLACEHOLDER_NAME: &str = "";

/// A food entry in the substitution catalog.
///
/// `equivalent_amount` is the ratio of this food against the implicit
/// baseline unit shared by every food of the same category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    #[serde(rename = "Category")]
    pub category: String,

    #[serde(rename = "Name")]
    pub name: String,

    #[serde(rename = "EquivalentAmount")]
    pub equivalent_amount: f64,

    /// Presentation-only image reference.
    #[serde(rename = "Image", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl FoodItem {
    pub fn new(category: &str, name: &str, equivalent_amount: f64) -> Self {
        Self {
            category: category.to_string(),
            name: name.to_string(),
            equivalent_amount,
            image: None,
        }
    }

    /// Stand-in for a food that could not be found. Its ratio is zero, so it
    /// must never be used as a conversion reference.
    pub fn placeholder() -> Self {
        Self {
            category: String::new(),
            name: PLACEHOLDER_NAME.to_string(),
            equivalent_amount: 0.0,
            image: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name == PLACEHOLDER_NAME && self.category.is_empty()
    }

    /// Whether the ratio can be used as a conversion factor.
    #[inline]
    pub fn has_valid_ratio(&self) -> bool {
        self.equivalent_amount.is_finite() && self.equivalent_amount > 0.0
    }

    /// Key used for deduplication: the name is unique within a category.
    pub fn key(&self) -> (String, String) {
        (self.category.clone(), self.name.clone())
    }

    /// Debug string for logging.
    pub fn debug_string(&self) -> String {
        format!(
            "{}/{} (ratio {})",
            self.category, self.name, self.equivalent_amount
        )
    }
}
