use crate::catalog::{AssetIndex, UnitLabels};
use crate::models::{ConversionState, FoodItem, InputStatus};

/// Message shown when the typed amount is rejected.
pub const INVALID_AMOUNT_MESSAGE: &str = "Invalid amount entered";

/// Display the available categories.
pub fn display_categories(categories: &[String]) {
    if categories.is_empty() {
        println!("No categories in catalog.");
        return;
    }

    println!();
    println!("=== Categories ({}) ===", categories.len());
    println!();
    for category in categories {
        println!("  {}", category.to_uppercase());
    }
    println!();
}

/// Display foods of one category with ratio, unit and asset.
pub fn display_food_list(foods: &[FoodItem], units: &UnitLabels, assets: &AssetIndex, title: &str) {
    if foods.is_empty() {
        println!("{}: (none)", title);
        return;
    }

    println!();
    println!("=== {} ({} items) ===", title.to_uppercase(), foods.len());
    println!();

    let max_name_len = foods.iter().map(|f| f.name.chars().count()).max().unwrap_or(10);

    for food in foods {
        println!(
            "  {:<width$}  {:>8.2} {:<9} [{}]",
            food.name,
            food.equivalent_amount,
            units.label_or_blank(&food.name),
            assets.lookup_or_placeholder(&food.category, &food.name),
            width = max_name_len
        );
    }

    println!();
}

/// One line describing the conversion, or the error notice for bad input.
pub fn format_conversion(state: &ConversionState) -> String {
    let alternative = state
        .selected_alternative
        .as_ref()
        .map(|f| f.name.as_str())
        .unwrap_or("?");

    match state.status {
        InputStatus::Idle => format!(
            "{} ({}) -> {} ({}): enter an amount",
            state.reference.name, state.reference_unit, alternative, state.alternative_unit
        ),
        InputStatus::Invalid => format!(
            "[!] {} '{}' -> {}: {}",
            state.reference.name, state.raw_amount_text, alternative, INVALID_AMOUNT_MESSAGE
        ),
        InputStatus::Valid => format!(
            "{} {} {} = {} {} {}",
            state.raw_amount_text.trim(),
            state.reference_unit,
            state.reference.name,
            state.alternative_amount_text(),
            state.alternative_unit,
            alternative
        ),
    }
}

/// Render a conversion state.
pub fn display_conversion(state: &ConversionState) {
    println!("{}", format_conversion(state));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> ConversionState {
        let mut state = ConversionState::new(FoodItem::new("grains", "rice", 1.0), "g".to_string());
        state.selected_alternative = Some(FoodItem::new("grains", "pasta", 0.9));
        state.alternative_unit = "g".to_string();
        state
    }

    #[test]
    fn test_format_valid_conversion() {
        let mut state = state();
        state.raw_amount_text = "100".to_string();
        state.parsed_amount = Some(100.0);
        state.status = InputStatus::Valid;
        state.alternative_amount = Some(90.0);
        assert_eq!(format_conversion(&state), "100 g rice = 90.00 g pasta");
    }

    #[test]
    fn test_format_invalid_conversion() {
        let mut state = state();
        state.raw_amount_text = "abc".to_string();
        state.status = InputStatus::Invalid;
        assert_eq!(format_conversion(&state).matches(INVALID_AMOUNT_MESSAGE).count(), 1);
    }
}
