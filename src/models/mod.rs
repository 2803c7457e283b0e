pub mod booking;
pub mod service;
pub mod user;

pub use booking::{Booking, OwnerBooking};
pub use service::{Price, PriceError, Service, ServiceListing};
pub use user::User;
