use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{CambiaError, Result};
use crate::models::FoodItem;

/// Minimum Jaro-Winkler similarity for a name to be suggested.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Actions offered while a conversion session is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    EnterAmount,
    ChangeAlternative,
    Reset,
    Done,
}

/// Prompt for a category.
pub fn prompt_category(categories: &[String]) -> Result<String> {
    if categories.is_empty() {
        return Err(CambiaError::NoFoods);
    }

    let selection = Select::new()
        .with_prompt("Choose a food category")
        .items(categories)
        .default(0)
        .interact()?;

    Ok(categories[selection].clone())
}

/// Prompt for one food out of `foods`.
pub fn prompt_food(foods: &[FoodItem], prompt: &str) -> Result<FoodItem> {
    if foods.is_empty() {
        return Err(CambiaError::NoFoods);
    }

    let names: Vec<&str> = foods.iter().map(|f| f.name.as_str()).collect();
    let selection = Select::new()
        .with_prompt(prompt)
        .items(&names)
        .default(0)
        .interact()?;

    Ok(foods[selection].clone())
}

/// Prompt for the amount of the reference food. Returned untouched so the
/// session decides whether it is valid.
pub fn prompt_amount(food_name: &str, unit: &str) -> Result<String> {
    let prompt = if unit.is_empty() {
        format!("Amount of {}", food_name)
    } else {
        format!("Amount of {} ({})", food_name, unit)
    };

    let input: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;

    Ok(input)
}

pub fn prompt_session_action() -> Result<SessionAction> {
    let options = [
        "Enter amount",
        "Change alternative food",
        "Reset",
        "Done",
    ];

    let selection = Select::new()
        .with_prompt("What next?")
        .items(&options)
        .default(0)
        .interact()?;

    Ok(match selection {
        0 => SessionAction::EnterAmount,
        1 => SessionAction::ChangeAlternative,
        2 => SessionAction::Reset,
        _ => SessionAction::Done,
    })
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Names similar to `input`, best match first, at most five.
///
/// Matching is case-insensitive here only to help the user; lookups
/// themselves stay exact.
pub fn suggest_food_names(input: &str, foods: &[FoodItem]) -> Vec<String> {
    let needle = input.to_lowercase();
    let mut candidates: Vec<(&FoodItem, f64)> = foods
        .iter()
        .map(|f| (f, jaro_winkler(&f.name.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    candidates
        .into_iter()
        .take(5)
        .map(|(f, _)| f.name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggestions_rank_closest_first() {
        let foods = vec![
            FoodItem::new("Cereales", "Arroz", 30.0),
            FoodItem::new("Cereales", "Pasta", 30.0),
            FoodItem::new("Frutas", "Manzana", 150.0),
        ];
        let suggestions = suggest_food_names("arroz", &foods);
        assert_eq!(suggestions.first().map(String::as_str), Some("Arroz"));
        assert!(!suggestions.contains(&"Manzana".to_string()));
    }

    #[test]
    fn test_no_suggestions_for_garbage() {
        let foods = vec![FoodItem::new("Cereales", "Arroz", 30.0)];
        assert!(suggest_food_names("zzzzzzzz", &foods).is_empty());
    }
}
