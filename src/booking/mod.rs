//! Table booking form: validation and submission.

pub mod error;

pub use error::*;

use crate::transport::{paths, ApiRequest, Transport};
use regex::Regex;
use serde::Serialize;
use serde_json::Value;
use std::sync::{Arc, LazyLock};
use tracing::{info, instrument, warn};

pub const MIN_GUESTS: u32 = 1;
pub const MAX_GUESTS: u32 = 20;
pub const MIN_PHONE_LEN: usize = 10;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex"));

/// Raw form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub guests: String,
    pub booking_time: String,
    pub message: String,
}

/// A validated booking, ready to send.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub number_of_guests: u32,
    pub booking_time: String,
    pub message: String,
}

impl BookingForm {
    /// Trims the input and checks it. The first failing rule is reported.
    pub fn validate(&self) -> Result<Booking, BookingError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let phone = self.phone.trim();
        let guests = self.guests.trim();
        let booking_time = self.booking_time.trim();

        if [name, email, phone, guests, booking_time].iter().any(|f| f.is_empty()) {
            return Err(BookingError::MissingFields);
        }
        if !EMAIL_RE.is_match(email) {
            return Err(BookingError::InvalidEmail(email.to_string()));
        }
        if phone.chars().count() < MIN_PHONE_LEN {
            return Err(BookingError::InvalidPhone(phone.to_string()));
        }
        let number_of_guests = guests
            .parse::<u32>()
            .ok()
            .filter(|g| (MIN_GUESTS..=MAX_GUESTS).contains(g))
            .ok_or_else(|| BookingError::InvalidGuests(guests.to_string()))?;

        Ok(Booking {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
            number_of_guests,
            booking_time: booking_time.to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

/// `"14:30"` → `"2:30 PM"`. Input that is not `HH:MM` is returned unchanged.
pub fn format_time_display(time: &str) -> String {
    let Some((hours, minutes)) = time.split_once(':') else {
        return time.to_string();
    };
    let Ok(hour) = hours.parse::<u32>() else {
        return time.to_string();
    };
    let ampm = if hour >= 12 { "PM" } else { "AM" };
    let display = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{display}:{minutes} {ampm}")
}

#[derive(Clone)]
pub struct BookingService {
    transport: Arc<dyn Transport>,
}

impl BookingService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Validates and submits `form`. Returns the server's confirmation message.
    #[instrument(skip(self, form))]
    pub async fn submit(&self, form: &BookingForm) -> Result<String, BookingError> {
        let booking = form.validate()?;
        let body = serde_json::to_value(&booking)
            .map_err(|e| BookingError::Rejected(vec![e.to_string()]))?;

        let response = self.transport.send(ApiRequest::post(paths::BOOKINGS, body)).await?;
        if response.is_success() {
            info!(guests = booking.number_of_guests, "Booking confirmed");
            return Ok(response.message().unwrap_or("Booking received").to_string());
        }

        let errors: Vec<String> = response
            .body
            .get("errors")
            .and_then(Value::as_array)
            .map(|errs| errs.iter().map(|e| e.as_str().map_or_else(|| e.to_string(), str::to_string)).collect())
            .unwrap_or_default();
        warn!(status = response.status, "Booking rejected");
        if errors.is_empty() {
            let message = response
                .message()
                .unwrap_or("Failed to create booking. Please try again.");
            return Err(BookingError::Rejected(vec![message.to_string()]));
        }
        Err(BookingError::Rejected(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{ApiResponse, TransportError};
    use async_trait::async_trait;
    use serde_json::json;

    fn form() -> BookingForm {
        BookingForm {
            name: " Ada ".into(),
            email: "ada@example.com".into(),
            phone: "0123456789".into(),
            guests: "4".into(),
            booking_time: "18:30".into(),
            message: String::new(),
        }
    }

    struct Canned(ApiResponse);

    #[async_trait]
    impl Transport for Canned {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            assert_eq!(request.path, paths::BOOKINGS);
            assert_eq!(request.body.as_ref().unwrap()["numberOfGuests"], 4);
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_validate_rules_in_order() {
        assert_eq!(form().validate().unwrap().name, "Ada");

        let missing = BookingForm { booking_time: "  ".into(), email: "bad".into(), ..form() };
        assert_eq!(missing.validate(), Err(BookingError::MissingFields));

        let email = BookingForm { email: "ada@example".into(), ..form() };
        assert!(matches!(email.validate(), Err(BookingError::InvalidEmail(_))));

        let phone = BookingForm { phone: "12345".into(), ..form() };
        assert!(matches!(phone.validate(), Err(BookingError::InvalidPhone(_))));

        for guests in ["0", "21", "many", "-2"] {
            let bad = BookingForm { guests: guests.into(), ..form() };
            assert!(matches!(bad.validate(), Err(BookingError::InvalidGuests(_))), "{guests}");
        }
        let max = BookingForm { guests: "20".into(), ..form() };
        assert_eq!(max.validate().unwrap().number_of_guests, 20);
    }

    #[test]
    fn test_format_time_display() {
        assert_eq!(format_time_display("14:30"), "2:30 PM");
        assert_eq!(format_time_display("09:05"), "9:05 AM");
        assert_eq!(format_time_display("12:00"), "12:00 PM");
        assert_eq!(format_time_display("00:15"), "12:15 AM");
        assert_eq!(format_time_display("soon"), "soon");
    }

    #[tokio::test]
    async fn test_submit_reports_server_errors() {
        let ok = BookingService::new(Arc::new(Canned(ApiResponse::new(201, json!({ "message": "Table booked" })))));
        assert_eq!(ok.submit(&form()).await.unwrap(), "Table booked");

        let rejected = BookingService::new(Arc::new(Canned(ApiResponse::new(
            422,
            json!({ "errors": ["Time slot full", "Try 19:00"] }),
        ))));
        let err = rejected.submit(&form()).await.unwrap_err();
        assert_eq!(
            err,
            BookingError::Rejected(vec!["Time slot full".into(), "Try 19:00".into()])
        );
    }
}
