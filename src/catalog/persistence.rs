use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog::units::UnitLabels;
use crate::error::{CambiaError, Result};
use crate::models::FoodItem;

/// Catalog compiled into the binary, used when no file is given.
const BUNDLED_CATALOG: &str = include_str!("../../data/foods.json");

/// Foods plus the unit labels that go with them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "Foods")]
    pub foods: Vec<FoodItem>,

    #[serde(rename = "Units", default)]
    pub units: UnitLabels,
}

/// One line of the CSV import/export format.
#[derive(Debug, Serialize, Deserialize)]
struct CsvRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "EquivalentAmount")]
    equivalent_amount: f64,
    #[serde(rename = "Image", default)]
    image: Option<String>,
    #[serde(rename = "Unit", default)]
    unit: Option<String>,
}

/// Parse and validate a JSON catalog.
pub fn parse_catalog(content: &str) -> Result<Catalog> {
    let mut catalog: Catalog = serde_json::from_str(content)?;
    validate_catalog(&catalog.foods)?;
    catalog.foods = dedupe_foods(catalog.foods);
    Ok(catalog)
}

/// Load a catalog from a JSON file.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let catalog = parse_catalog(&content)?;
    info!(path = %path.display(), foods = catalog.foods.len(), "catalog loaded");
    Ok(catalog)
}

/// The catalog shipped with the binary.
pub fn bundled_catalog() -> Result<Catalog> {
    parse_catalog(BUNDLED_CATALOG)
}

/// Load a catalog from CSV (`Category,Name,EquivalentAmount,Image,Unit`).
pub fn load_catalog_csv<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let mut reader = csv::Reader::from_path(path.as_ref())?;
    let mut catalog = Catalog::default();

    for row in reader.deserialize() {
        let row: CsvRow = row?;
        if let Some(unit) = row.unit.as_deref().filter(|u| !u.is_empty()) {
            catalog.units.insert(&row.name, unit);
        }
        catalog.foods.push(FoodItem {
            category: row.category,
            name: row.name,
            equivalent_amount: row.equivalent_amount,
            image: row.image.filter(|i| !i.is_empty()),
        });
    }

    validate_catalog(&catalog.foods)?;
    catalog.foods = dedupe_foods(catalog.foods);
    info!(foods = catalog.foods.len(), "catalog imported from CSV");
    Ok(catalog)
}

/// Write the catalog as CSV.
pub fn save_catalog_csv<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    let mut writer = csv::Writer::from_path(path.as_ref())?;

    for food in &catalog.foods {
        writer.serialize(CsvRow {
            category: food.category.clone(),
            name: food.name.clone(),
            equivalent_amount: food.equivalent_amount,
            image: food.image.clone(),
            unit: catalog.units.label_for(&food.name).map(str::to_string),
        })?;
    }

    writer.flush()?;
    Ok(())
}

/// Write the catalog as pretty JSON.
pub fn save_catalog<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    let json = serde_json::to_string_pretty(catalog)?;
    fs::write(path, json)?;
    Ok(())
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false)
}

/// Load a catalog, reading CSV for `.csv` files and JSON otherwise.
pub fn load_catalog_file<P: AsRef<Path>>(path: P) -> Result<Catalog> {
    let path = path.as_ref();
    if is_csv(path) {
        load_catalog_csv(path)
    } else {
        load_catalog(path)
    }
}

/// Save a catalog, writing CSV for `.csv` files and JSON otherwise.
pub fn save_catalog_file<P: AsRef<Path>>(path: P, catalog: &Catalog) -> Result<()> {
    let path = path.as_ref();
    if is_csv(path) {
        save_catalog_csv(path, catalog)
    } else {
        save_catalog(path, catalog)
    }
}

/// Reject foods that would make a conversion undefined.
pub fn validate_catalog(foods: &[FoodItem]) -> Result<()> {
    for food in foods {
        if food.name.trim().is_empty() {
            return Err(CambiaError::DataIntegrity {
                food: food.debug_string(),
                reason: "empty name".to_string(),
            });
        }
        if food.category.trim().is_empty() {
            return Err(CambiaError::DataIntegrity {
                food: food.name.clone(),
                reason: "empty category".to_string(),
            });
        }
        if !food.has_valid_ratio() {
            return Err(CambiaError::DataIntegrity {
                food: food.name.clone(),
                reason: format!(
                    "equivalent amount must be positive and finite, got {}",
                    food.equivalent_amount
                ),
            });
        }
    }
    Ok(())
}

/// Deduplicate by `(category, name)`: the last occurrence wins and keeps the
/// position of the first.
pub fn dedupe_foods(foods: Vec<FoodItem>) -> Vec<FoodItem> {
    let mut positions: HashMap<(String, String), usize> = HashMap::new();
    let mut deduped: Vec<FoodItem> = Vec::with_capacity(foods.len());

    for food in foods {
        match positions.get(&food.key()) {
            Some(&idx) => {
                debug!(food = %food.debug_string(), "duplicate food replaced");
                deduped[idx] = food;
            }
            None => {
                positions.insert(food.key(), deduped.len());
                deduped.push(food);
            }
        }
    }

    deduped
}
