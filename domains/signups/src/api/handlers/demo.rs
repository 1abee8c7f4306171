//! Demo booking handler

use axum::{extract::State, Json};
use lagentry_common::{Error, LenientJson};
use lagentry_email::Notification;
use serde_json::{json, Value};

use crate::api::middleware::{SignupRejection, SignupsState};
use crate::domain::entities::DemoBookingRequest;

/// Book a demo: confirm to the visitor and alert the team
pub async fn book_demo(
    State(state): State<SignupsState>,
    body: Result<LenientJson<DemoBookingRequest>, Error>,
) -> Result<Json<Value>, SignupRejection> {
    let LenientJson(req) = body?;
    let booking = req.into_booking()?;

    tracing::info!(
        email = %booking.email,
        agent = %booking.agent_name,
        date_time = %booking.date_time,
        "Demo booked"
    );

    state
        .notifier
        .notify(Notification::DemoConfirmation(booking.clone()));
    state
        .notifier
        .notify(Notification::DemoInternalNotification(booking));

    Ok(Json(json!({
        "success": true,
        "message": "Demo booked successfully!",
    })))
}
