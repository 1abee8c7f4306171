//! Form payloads posted by the marketing site

use lagentry_common::{is_valid_email, trimmed, Error, Result};
use lagentry_email::{DemoBooking, SignupContact};
use serde::Deserialize;

/// Agent named in demo emails when the visitor did not pick one
pub const DEFAULT_DEMO_AGENT: &str = "General Demo";

/// Newsletter or waitlist signup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupRequest {
    pub email: Option<String>,
    pub name: Option<String>,
}

impl SignupRequest {
    /// Validate and normalize into the contact the emails are addressed to
    pub fn into_contact(self) -> Result<SignupContact> {
        let email = trimmed(self.email.as_deref())
            .ok_or_else(|| Error::Validation("Email is required".to_string()))?;

        if !is_valid_email(email) {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        Ok(SignupContact {
            email: email.to_string(),
            name: self.name.as_deref().map(str::trim).unwrap_or("").to_string(),
        })
    }
}

/// Demo booking form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoBookingRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub agent_of_interest: Option<String>,
    pub message: Option<String>,
    pub booking_date: Option<String>,
    pub booking_time: Option<String>,
    /// Preformatted slot; overrides date and time in emails when present
    pub booking_date_time: Option<String>,
}

/// Present and non-empty
fn provided(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|v| !v.is_empty())
}

impl DemoBookingRequest {
    /// Validate and normalize into the booking both demo emails describe
    pub fn into_booking(self) -> Result<DemoBooking> {
        let (Some(name), Some(email), Some(phone), Some(date), Some(time)) = (
            provided(&self.name),
            provided(&self.email),
            provided(&self.phone),
            provided(&self.booking_date),
            provided(&self.booking_time),
        ) else {
            return Err(Error::Validation(
                "Name, email, phone, date, and time are required".to_string(),
            ));
        };

        let email = email.trim();
        if !is_valid_email(email) {
            return Err(Error::Validation("Invalid email format".to_string()));
        }

        let date_time = match provided(&self.booking_date_time) {
            Some(slot) => slot.to_string(),
            None => format!("{} at {}", date, time),
        };

        Ok(DemoBooking {
            email: email.to_string(),
            name: name.trim().to_string(),
            phone: phone.trim().to_string(),
            company: self.company.clone().unwrap_or_default(),
            date_time,
            agent_name: provided(&self.agent_of_interest)
                .unwrap_or(DEFAULT_DEMO_AGENT)
                .to_string(),
            user_requirement: self.message.clone().unwrap_or_default(),
        })
    }
}
