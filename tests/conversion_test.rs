use assert_float_eq::assert_float_absolute_eq;

use cambia_dietas_rs::calculator::{evaluate, round2, ConversionSession, SessionEvent};
use cambia_dietas_rs::catalog::UnitLabels;
use cambia_dietas_rs::models::{FoodItem, InputStatus};

fn rice() -> FoodItem {
    FoodItem::new("grains", "rice", 1.0)
}

fn pasta() -> FoodItem {
    FoodItem::new("grains", "pasta", 0.9)
}

fn bread() -> FoodItem {
    FoodItem::new("grains", "bread", 1.3)
}

fn session_with_pasta() -> ConversionSession {
    let mut session = ConversionSession::new(rice(), UnitLabels::new()).unwrap();
    session.select_alternative(pasta()).unwrap();
    session
}

#[test]
fn test_rice_to_pasta_scenario() {
    let mut session = session_with_pasta();
    let state = session.set_amount_text("100");

    assert!(state.is_input_valid());
    assert_eq!(state.status, InputStatus::Valid);
    assert_float_absolute_eq!(state.alternative_amount.unwrap(), 90.0, 1e-9);
    assert_eq!(state.alternative_amount_text(), "90.00");
}

#[test]
fn test_non_numeric_input_is_invalid() {
    let mut session = session_with_pasta();
    let state = session.set_amount_text("abc");

    assert!(!state.is_input_valid());
    assert_eq!(state.alternative_amount_text(), "");
    assert_eq!(state.raw_amount_text, "abc");
}

#[test]
fn test_negative_input_is_invalid() {
    let mut session = session_with_pasta();
    let state = session.set_amount_text("-5");

    assert!(!state.is_input_valid());
    assert_eq!(state.parsed_amount, None);
    assert_eq!(state.alternative_amount, None);
}

#[test]
fn test_invalid_after_valid_blanks_amount() {
    let mut session = session_with_pasta();
    session.set_amount_text("100");
    let state = session.set_amount_text("10x");

    assert!(!state.is_input_valid());
    assert_eq!(state.alternative_amount_text(), "");
}

#[test]
fn test_switching_alternative_recomputes_when_valid() {
    let mut session = session_with_pasta();
    session.set_amount_text("100");
    let state = session.select_alternative(bread()).unwrap();

    assert_eq!(state.parsed_amount, Some(100.0));
    assert_float_absolute_eq!(state.alternative_amount.unwrap(), 130.0, 1e-9);
}

#[test]
fn test_switching_alternative_when_invalid_stays_blank() {
    let mut session = session_with_pasta();
    session.set_amount_text("abc");
    let state = session.select_alternative(bread()).unwrap();

    assert!(!state.is_input_valid());
    assert_eq!(state.alternative_amount_text(), "");
}

#[test]
fn test_formula_matches_rounded_ratio() {
    let cases = [
        (100.0, 30.0, 40.0),
        (37.5, 150.0, 80.0),
        (1.0, 3.0, 1.0),
        (250.0, 200.0, 125.0),
        (0.0, 1.0, 5.0),
    ];

    for (amount, reference_ratio, alternative_ratio) in cases {
        let reference = FoodItem::new("c", "a", reference_ratio);
        let alternative = FoodItem::new("c", "b", alternative_ratio);
        let (status, converted) =
            evaluate(&reference, &amount.to_string(), Some(&alternative)).unwrap();

        assert_eq!(status, InputStatus::Valid);
        let expected = round2(amount / reference_ratio * alternative_ratio);
        assert_float_absolute_eq!(converted.unwrap(), expected, 1e-9);
    }
}

#[test]
fn test_empty_text_is_idle() {
    let mut session = session_with_pasta();
    session.set_amount_text("100");
    let state = session.set_amount_text("");

    assert_eq!(state.status, InputStatus::Idle);
    assert!(state.is_input_valid());
    assert_eq!(state.alternative_amount_text(), "");
}

#[test]
fn test_reference_refresh_recomputes() {
    let mut session = session_with_pasta();
    session.set_amount_text("100");
    let state = session
        .handle(SessionEvent::ReferenceRefreshed(FoodItem::new("grains", "rice", 2.0)))
        .unwrap();

    assert_float_absolute_eq!(state.alternative_amount.unwrap(), 45.0, 1e-9);
}

#[test]
fn test_zero_ratio_reference_is_refused() {
    let broken = FoodItem::new("grains", "rice", 0.0);
    assert!(ConversionSession::new(broken, UnitLabels::new()).is_err());
}

#[test]
fn test_huge_amount_keeps_formula() {
    let mut session = ConversionSession::new(rice(), UnitLabels::new()).unwrap();
    session
        .select_alternative(FoodItem::new("grains", "rice flakes", 1.0))
        .unwrap();
    let state = session.set_amount_text("1e307");

    assert!(state.is_input_valid());
    assert_eq!(state.alternative_amount, Some(round2(1e307 / 1.0 * 1.0)));
    assert_eq!(state.alternative_amount, Some(1e307));
}

#[test]
fn test_overflowing_amount_is_never_published_as_infinite() {
    let mut session =
        ConversionSession::new(FoodItem::new("grains", "rice", 0.5), UnitLabels::new()).unwrap();
    session.select_alternative(pasta()).unwrap();
    let state = session.set_amount_text("1e308");

    assert_eq!(state.alternative_amount, None);
    assert!(!state.alternative_amount_text().contains("inf"));
}

#[test]
fn test_alternative_must_share_category() {
    let mut session = session_with_pasta();
    session.set_amount_text("100");

    let milk = FoodItem::new("dairy", "milk", 200.0);
    assert!(session.select_alternative(milk).is_err());
    assert_eq!(session.state().alternative_amount_text(), "90.00");
}
