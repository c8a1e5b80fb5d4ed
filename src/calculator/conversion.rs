use crate::error::{CambiaError, Result};
use crate::models::{FoodItem, InputStatus};

/// Outcome of parsing the amount text typed by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountInput {
    Empty,
    Valid(f64),
    Invalid,
}

impl AmountInput {
    pub fn status(&self) -> InputStatus {
        match self {
            AmountInput::Empty => InputStatus::Idle,
            AmountInput::Valid(_) => InputStatus::Valid,
            AmountInput::Invalid => InputStatus::Invalid,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            AmountInput::Valid(amount) => Some(*amount),
            _ => None,
        }
    }
}

/// Parse a non-negative decimal amount. Surrounding whitespace is ignored.
pub fn parse_amount(text: &str) -> AmountInput {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return AmountInput::Empty;
    }

    match trimmed.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => AmountInput::Valid(amount.abs()),
        _ => AmountInput::Invalid,
    }
}

/// Round half-up to two decimal places.
///
/// Works on the shortest decimal representation of `value`, so `1.005`
/// becomes `1.01` while `1.00499999999995` stays `1.0`. Negative values round
/// half away from zero. Values with no more than two decimals, including
/// anything too large to carry a fractional part, come back unchanged.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }

    let text = value.abs().to_string();
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    if frac_part.len() <= 2 {
        return value;
    }

    let mut cents: u64 = match format!("{}{}", int_part, &frac_part[..2]).parse() {
        Ok(cents) => cents,
        Err(_) => return value,
    };
    if frac_part.as_bytes()[2] >= b'5' {
        cents += 1;
    }

    (cents as f64 / 100.0).copysign(value)
}

/// Equivalent amount of `alternative` for `amount` of `reference`.
///
/// The reference ratio must be positive and finite; the alternative may be
/// the zero-ratio placeholder. A result that overflows is `InvalidInput`.
pub fn convert_amount(amount: f64, reference: &FoodItem, alternative: &FoodItem) -> Result<f64> {
    if !reference.has_valid_ratio() {
        return Err(CambiaError::DataIntegrity {
            food: reference.name.clone(),
            reason: format!(
                "reference equivalent amount must be positive and finite, got {}",
                reference.equivalent_amount
            ),
        });
    }
    if !alternative.equivalent_amount.is_finite() || alternative.equivalent_amount < 0.0 {
        return Err(CambiaError::DataIntegrity {
            food: alternative.name.clone(),
            reason: format!(
                "alternative equivalent amount must be non-negative and finite, got {}",
                alternative.equivalent_amount
            ),
        });
    }

    let converted = amount / reference.equivalent_amount * alternative.equivalent_amount;
    if !converted.is_finite() {
        return Err(CambiaError::InvalidInput(format!(
            "{} of {} is out of range when converted to {}",
            amount, reference.name, alternative.name
        )));
    }

    Ok(round2(converted))
}

/// Pure evaluation of one conversion: input status and the rounded
/// alternative amount (absent unless the input is valid and an alternative
/// is chosen).
pub fn evaluate(
    reference: &FoodItem,
    amount_text: &str,
    alternative: Option<&FoodItem>,
) -> Result<(InputStatus, Option<f64>)> {
    let input = parse_amount(amount_text);
    let amount = match (input.value(), alternative) {
        (Some(amount), Some(alternative)) => Some(convert_amount(amount, reference, alternative)?),
        _ => None,
    };
    Ok((input.status(), amount))
}
