use chrono::NaiveDateTime;
use serde::Serialize;

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize)]
pub struct Booking {
    pub id: i64,
    pub service_id: i64,
    pub user_email: String,
    pub datetime: NaiveDateTime,
    pub seen: bool,
}

/// A booking as shown to the owner of the booked service.
#[derive(Debug, Clone, Serialize)]
pub struct OwnerBooking {
    pub booking: Booking,
    pub service_name: String,
    pub owner_name: String,
}
