pub mod block;
pub mod booking;
pub mod business_hours;
pub mod service;

pub use block::{BlockKind, BlockSpec, BlockedInterval, RecurrencePattern};
pub use booking::{Booking, BookingStatus};
pub use business_hours::BusinessHoursEntry;
pub use service::Service;
