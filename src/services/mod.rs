pub mod availability;
pub mod blocks;
pub mod booking;
pub mod calendar;
pub mod clock;
pub mod stats;
pub mod time_math;
