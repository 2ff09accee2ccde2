use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: String,
    pub provider_id: String,
    pub service_id: String,
    pub date: NaiveDate,
    /// Wall-clock start as "HH:MM". End time is always derived from
    /// `duration_minutes`, never stored.
    pub start_time: String,
    pub duration_minutes: i32,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub service_price: f64,
    pub platform_fee: f64,
    pub total_amount: f64,
    pub confirmation_number: String,
    pub status: BookingStatus,
    pub provider_notes: Option<String>,
    pub customer_notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    #[serde(rename = "no-show")]
    NoShow,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Completed => "completed",
            BookingStatus::NoShow => "no-show",
        }
    }

    /// Strict parse for API input. Unknown values are an error at the
    /// handler level, not a silent default.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(BookingStatus::Pending),
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "completed" => Some(BookingStatus::Completed),
            "no-show" => Some(BookingStatus::NoShow),
            _ => None,
        }
    }

    /// Statuses that commit the interval against new bookings.
    pub fn blocks_slot(&self) -> bool {
        matches!(
            self,
            BookingStatus::Pending | BookingStatus::Confirmed | BookingStatus::Completed
        )
    }
}
