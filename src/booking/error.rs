//! Error types for table bookings.

use crate::notice::Notice;
use crate::transport::TransportError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum BookingError {
    #[error("Missing required booking fields")]
    MissingFields,

    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    #[error("Phone number too short: {0}")]
    InvalidPhone(String),

    #[error("Invalid number of guests: {0}")]
    InvalidGuests(String),

    /// Non-2xx response. One entry per server-side validation error.
    #[error("Booking rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    #[error("Network error: {0}")]
    Network(#[from] TransportError),
}

impl Notice for BookingError {
    fn notice(&self) -> String {
        match self {
            BookingError::MissingFields => {
                "Please fill in all required fields (Name, Email, Phone, Number of Guests, and Booking Time)".to_string()
            }
            BookingError::InvalidEmail(_) => "Please enter a valid email address".to_string(),
            BookingError::InvalidPhone(_) => {
                "Please enter a valid phone number (at least 10 digits)".to_string()
            }
            BookingError::InvalidGuests(_) => {
                "Please enter a valid number of guests (between 1 and 20)".to_string()
            }
            BookingError::Rejected(errors) => format!("Booking failed:\n{}", errors.join("\n")),
            BookingError::Network(_) => {
                "Network error. Please check your internet connection and try again.".to_string()
            }
        }
    }
}
