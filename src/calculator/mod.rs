pub mod conversion;
pub mod session;

pub use conversion::{convert_amount, evaluate, parse_amount, round2, AmountInput};
pub use session::{ConversionSession, ObserverId, SessionEvent};
