//! Newsletter and waitlist signup handlers

use axum::{extract::State, Json};
use lagentry_common::{Error, LenientJson};
use lagentry_email::Notification;
use serde_json::{json, Value};

use crate::api::middleware::{SignupRejection, SignupsState};
use crate::domain::entities::SignupRequest;

/// Subscribe a visitor to the newsletter
pub async fn subscribe_newsletter(
    State(state): State<SignupsState>,
    body: Result<LenientJson<SignupRequest>, Error>,
) -> Result<Json<Value>, SignupRejection> {
    let LenientJson(req) = body?;
    let contact = req.into_contact()?;

    tracing::info!(email = %contact.email, "Newsletter signup");
    state
        .notifier
        .notify(Notification::NewsletterWelcome(contact));

    Ok(Json(json!({
        "success": true,
        "message": "Successfully subscribed to newsletter!",
    })))
}

/// Add a visitor to the product waitlist
pub async fn join_waitlist(
    State(state): State<SignupsState>,
    body: Result<LenientJson<SignupRequest>, Error>,
) -> Result<Json<Value>, SignupRejection> {
    let LenientJson(req) = body?;
    let contact = req.into_contact()?;

    tracing::info!(email = %contact.email, "Waitlist signup");
    state
        .notifier
        .notify(Notification::WaitlistConfirmation(contact));

    Ok(Json(json!({
        "success": true,
        "message": "Successfully joined the waitlist!",
    })))
}
