use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Measurement-unit labels keyed by food display name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitLabels(BTreeMap<String, String>);

impl UnitLabels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, food_name: &str, unit: &str) {
        self.0.insert(food_name.to_string(), unit.to_string());
    }

    pub fn label_for(&self, food_name: &str) -> Option<&str> {
        self.0.get(food_name).map(String::as_str)
    }

    /// Label for display; unknown foods get an empty label.
    pub fn label_or_blank(&self, food_name: &str) -> String {
        self.label_for(food_name).unwrap_or_default().to_string()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
