pub mod delivery;
pub mod error;
pub mod models;

pub use delivery::{DeliveryReport, DeliveryStatus, UndoOutcome};
pub use error::ChatError;
pub use models::Message;
