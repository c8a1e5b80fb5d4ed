use std::sync::mpsc::Receiver;

use tracing::{debug, warn};

use crate::calculator::conversion::{convert_amount, parse_amount};
use crate::catalog::UnitLabels;
use crate::error::{CambiaError, Result};
use crate::models::{ConversionState, FoodItem, InputStatus};

/// Discrete inputs that drive a conversion session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    AmountChanged(String),
    AlternativeSelected(FoodItem),
    /// A fresh catalog emission for the reference food.
    ReferenceRefreshed(FoodItem),
    Reset,
}

type Observer = Box<dyn FnMut(&ConversionState)>;

/// Handle returned by [`ConversionSession::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObserverId(u64);

/// State machine for one "convert food A into food B" screen.
///
/// Every event is applied synchronously and the resulting state is pushed to
/// all observers. The catalog is never written.
pub struct ConversionSession {
    state: ConversionState,
    units: UnitLabels,
    observers: Vec<(ObserverId, Observer)>,
    next_observer: u64,
}

impl ConversionSession {
    /// Open a session for `reference`. A reference with an unusable ratio is
    /// corrupt catalog data and is refused outright.
    pub fn new(reference: FoodItem, units: UnitLabels) -> Result<Self> {
        ensure_reference(&reference)?;
        let reference_unit = units.label_or_blank(&reference.name);
        debug!(reference = %reference.debug_string(), "conversion session opened");
        Ok(Self {
            state: ConversionState::new(reference, reference_unit),
            units,
            observers: Vec::new(),
            next_observer: 0,
        })
    }

    pub fn state(&self) -> &ConversionState {
        &self.state
    }

    /// Register an observer; it receives the current state immediately.
    pub fn subscribe(&mut self, mut observer: impl FnMut(&ConversionState) + 'static) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        observer(&self.state);
        self.observers.push((id, Box::new(observer)));
        id
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != before
    }

    /// Apply one event. A corrupt or foreign reference refresh and an
    /// alternative from another category are errors; the state is left as it
    /// was in both cases.
    pub fn handle(&mut self, event: SessionEvent) -> Result<&ConversionState> {
        match event {
            SessionEvent::AmountChanged(text) => self.apply_amount(text),
            SessionEvent::AlternativeSelected(food) => self.apply_alternative(food)?,
            SessionEvent::ReferenceRefreshed(food) => self.apply_reference(food)?,
            SessionEvent::Reset => self.apply_reset(),
        }
        self.publish();
        Ok(&self.state)
    }

    pub fn set_amount_text(&mut self, text: &str) -> &ConversionState {
        self.apply_amount(text.to_string());
        self.publish();
        &self.state
    }

    /// Pick the food to convert into. It must share the reference's
    /// category; the placeholder is always accepted.
    pub fn select_alternative(&mut self, food: FoodItem) -> Result<&ConversionState> {
        self.apply_alternative(food)?;
        self.publish();
        Ok(&self.state)
    }

    pub fn reset(&mut self) -> &ConversionState {
        self.apply_reset();
        self.publish();
        &self.state
    }

    /// Drain pending catalog emissions for the reference food and apply the
    /// most recent one. Returns whether the reference was refreshed.
    pub fn drain_reference_updates(&mut self, updates: &Receiver<Option<FoodItem>>) -> Result<bool> {
        match updates.try_iter().last() {
            Some(Some(food)) => {
                self.handle(SessionEvent::ReferenceRefreshed(food))?;
                Ok(true)
            }
            Some(None) => {
                warn!(
                    reference = %self.state.reference.name,
                    "reference food disappeared from catalog, keeping last known value"
                );
                Ok(false)
            }
            None => Ok(false),
        }
    }

    fn apply_amount(&mut self, text: String) {
        let input = parse_amount(&text);
        self.state.raw_amount_text = text;
        self.state.parsed_amount = input.value();
        self.state.status = input.status();
        if self.state.status == InputStatus::Invalid {
            debug!(text = %self.state.raw_amount_text, "rejected amount input");
        }
        self.recompute();
    }

    fn apply_alternative(&mut self, food: FoodItem) -> Result<()> {
        if !food.is_placeholder() && food.category != self.state.reference.category {
            return Err(CambiaError::InvalidInput(format!(
                "'{}' is in category '{}', not '{}'",
                food.name, food.category, self.state.reference.category
            )));
        }
        self.state.alternative_unit = self.units.label_or_blank(&food.name);
        self.state.selected_alternative = Some(food);
        self.recompute();
        Ok(())
    }

    fn apply_reference(&mut self, food: FoodItem) -> Result<()> {
        let current = &self.state.reference;
        if food.category != current.category || food.name != current.name {
            return Err(CambiaError::DataIntegrity {
                food: food.debug_string(),
                reason: format!("refresh does not match reference {}", current.debug_string()),
            });
        }
        ensure_reference(&food)?;
        self.state.reference_unit = self.units.label_or_blank(&food.name);
        self.state.reference = food;
        self.recompute();
        Ok(())
    }

    fn apply_reset(&mut self) {
        self.state.raw_amount_text.clear();
        self.state.parsed_amount = None;
        self.state.status = InputStatus::Idle;
        self.state.alternative_amount = None;
    }

    fn recompute(&mut self) {
        self.state.alternative_amount = match (
            self.state.status,
            self.state.parsed_amount,
            &self.state.selected_alternative,
        ) {
            (InputStatus::Valid, Some(amount), Some(alternative)) => {
                match convert_amount(amount, &self.state.reference, alternative) {
                    Ok(converted) => Some(converted),
                    Err(e) => {
                        warn!(error = %e, "conversion skipped");
                        None
                    }
                }
            }
            _ => None,
        };
    }

    fn publish(&mut self) {
        for (_, observer) in &mut self.observers {
            observer(&self.state);
        }
    }
}

fn ensure_reference(food: &FoodItem) -> Result<()> {
    if food.has_valid_ratio() {
        Ok(())
    } else {
        Err(CambiaError::DataIntegrity {
            food: food.name.clone(),
            reason: format!(
                "cannot convert from a food with equivalent amount {}",
                food.equivalent_amount
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rice() -> FoodItem {
        FoodItem::new("grains", "rice", 1.0)
    }

    fn pasta() -> FoodItem {
        FoodItem::new("grains", "pasta", 0.9)
    }

    fn units() -> UnitLabels {
        let mut units = UnitLabels::new();
        units.insert("rice", "g");
        units.insert("pasta", "g");
        units
    }

    #[test]
    fn test_rejects_placeholder_reference() {
        let result = ConversionSession::new(FoodItem::placeholder(), UnitLabels::new());
        assert!(matches!(result, Err(CambiaError::DataIntegrity { .. })));
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut session = ConversionSession::new(rice(), units()).unwrap();
        session.select_alternative(pasta()).unwrap();
        session.set_amount_text("100");
        let state = session.reset();
        assert_eq!(state.status, InputStatus::Idle);
        assert_eq!(state.alternative_amount_text(), "");
        assert_eq!(state.selected_alternative, Some(pasta()));
    }

    #[test]
    fn test_observers_see_every_event() {
        let mut session = ConversionSession::new(rice(), units()).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = session.subscribe(move |state| sink.borrow_mut().push(state.alternative_amount_text()));

        session.select_alternative(pasta()).unwrap();
        session.set_amount_text("100");
        assert_eq!(*seen.borrow(), vec!["", "", "90.00"]);

        assert!(session.unsubscribe(id));
        session.set_amount_text("200");
        assert_eq!(seen.borrow().len(), 3);
    }

    #[test]
    fn test_corrupt_reference_refresh_keeps_previous() {
        let mut session = ConversionSession::new(rice(), units()).unwrap();
        session.select_alternative(pasta()).unwrap();
        session.set_amount_text("100");

        let broken = FoodItem::new("grains", "rice", 0.0);
        assert!(session.handle(SessionEvent::ReferenceRefreshed(broken)).is_err());
        assert_eq!(session.state().reference, rice());
        assert_eq!(session.state().alternative_amount_text(), "90.00");
    }

    #[test]
    fn test_units_are_attached() {
        let mut session = ConversionSession::new(rice(), units()).unwrap();
        assert_eq!(session.state().reference_unit, "g");
        session
            .select_alternative(FoodItem::new("grains", "bread", 1.3))
            .unwrap();
        assert_eq!(session.state().alternative_unit, "");
    }

    #[test]
    fn test_alternative_from_other_category_is_refused() {
        let mut session = ConversionSession::new(rice(), units()).unwrap();
        session.select_alternative(pasta()).unwrap();
        session.set_amount_text("100");

        let milk = FoodItem::new("dairy", "milk", 200.0);
        assert!(matches!(
            session.select_alternative(milk.clone()),
            Err(CambiaError::InvalidInput(_))
        ));
        assert!(session.handle(SessionEvent::AlternativeSelected(milk)).is_err());
        assert_eq!(session.state().selected_alternative, Some(pasta()));
        assert_eq!(session.state().alternative_amount_text(), "90.00");
    }

    #[test]
    fn test_placeholder_alternative_is_accepted() {
        let mut session = ConversionSession::new(rice(), units()).unwrap();
        let state = session.select_alternative(FoodItem::placeholder()).unwrap();
        assert!(state.selected_alternative.as_ref().unwrap().is_placeholder());
    }

    #[test]
    fn test_refresh_for_same_name_in_other_category_is_refused() {
        let egg = FoodItem::new("protein", "egg", 60.0);
        let mut session =
            ConversionSession::new(FoodItem::new("protein", "milk", 50.0), UnitLabels::new()).unwrap();
        session.select_alternative(egg).unwrap();
        session.set_amount_text("100");

        let dairy_milk = FoodItem::new("dairy", "milk", 200.0);
        assert!(session.handle(SessionEvent::ReferenceRefreshed(dairy_milk)).is_err());
        assert_eq!(session.state().reference.category, "protein");
        assert_eq!(session.state().alternative_amount_text(), "120.00");
    }

    #[test]
    fn test_overflowing_conversion_is_blank() {
        let mut session =
            ConversionSession::new(FoodItem::new("grains", "rice", 0.5), UnitLabels::new()).unwrap();
        session
            .select_alternative(FoodItem::new("grains", "pasta", 1.0))
            .unwrap();
        let state = session.set_amount_text("1e308");
        assert_eq!(state.status, InputStatus::Valid);
        assert_eq!(state.alternative_amount, None);
        assert_eq!(state.alternative_amount_text(), "");
    }
}
