mod conversion;
mod food;

pub use conversion::{ConversionState, InputStatus};
pub use food::{FoodItem, PLACEHOLDER_NAME};
