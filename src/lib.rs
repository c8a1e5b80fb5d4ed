pub mod calculator;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;

pub use error::{CambiaError, Result};
pub use models::{ConversionState, FoodItem, InputStatus};
