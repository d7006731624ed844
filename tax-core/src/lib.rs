pub mod calculations;
pub mod error;
pub mod models;
pub mod schedules;

pub use error::TaxError;
pub use models::*;
pub use schedules::ScheduleRegistry;
