use crate::models::FoodItem;

/// Where a conversion session stands with respect to the entered amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputStatus {
    /// No amount entered.
    #[default]
    Idle,
    Valid,
    Invalid,
}

/// Snapshot of one conversion session, published after every event.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionState {
    pub reference: FoodItem,
    pub raw_amount_text: String,
    pub parsed_amount: Option<f64>,
    pub status: InputStatus,
    pub selected_alternative: Option<FoodItem>,

    /// Equivalent amount of the alternative, already rounded to two decimals.
    pub alternative_amount: Option<f64>,

    pub reference_unit: String,
    pub alternative_unit: String,
}

impl ConversionState {
    pub fn new(reference: FoodItem, reference_unit: String) -> Self {
        Self {
            reference,
            raw_amount_text: String::new(),
            parsed_amount: None,
            status: InputStatus::Idle,
            selected_alternative: None,
            alternative_amount: None,
            reference_unit,
            alternative_unit: String::new(),
        }
    }

    /// False only when the entered text was rejected.
    pub fn is_input_valid(&self) -> bool {
        self.status != InputStatus::Invalid
    }

    /// Alternative amount as shown to the user: two decimals, or blank.
    pub fn alternative_amount_text(&self) -> String {
        self.alternative_amount
            .map(|amount| format!("{:.2}", amount))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle_and_blank() {
        let state = ConversionState::new(FoodItem::new("grains", "rice", 1.0), "g".to_string());
        assert_eq!(state.status, InputStatus::Idle);
        assert!(state.is_input_valid());
        assert_eq!(state.alternative_amount_text(), "");
    }

    #[test]
    fn test_amount_text_has_two_decimals() {
        let mut state = ConversionState::new(FoodItem::new("grains", "rice", 1.0), String::new());
        state.alternative_amount = Some(90.0);
        assert_eq!(state.alternative_amount_text(), "90.00");
    }
}
