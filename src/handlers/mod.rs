pub mod availability;
pub mod blocks;
pub mod bookings;
pub mod business_hours;
pub mod calendar;
pub mod health;
pub mod services;
pub mod stats;
