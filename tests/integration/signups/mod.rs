//! Newsletter, waitlist and demo booking integration tests

use axum::http::{Method, StatusCode};
use serde_json::json;

use lagentry_email::TemplateKind;

use crate::common::TestApp;

mod test_newsletter {
    use super::*;

    #[tokio::test]
    async fn test_subscribe_sends_welcome() {
        let app = TestApp::new();

        let (status, body) = app
            .call(
                Method::POST,
                "/api/newsletter",
                Some(json!({"email": " nadia@example.com ", "name": "Nadia"})),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Successfully subscribed to newsletter!");

        app.wait_for_emails(1).await;
        let welcomes = app.email.get_emails_of_kind(TemplateKind::NewsletterWelcome);
        assert_eq!(welcomes.len(), 1);
        assert_eq!(welcomes[0].message.to, "nadia@example.com");
        assert_eq!(welcomes[0].message.bcc.as_deref(), Some("info@lagentry.com"));
    }

    #[tokio::test]
    async fn test_missing_email() {
        let app = TestApp::new();

        let (status, body) = app
            .call(Method::POST, "/api/newsletter", Some(json!({"name": "x"})))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Email is required");
    }

    #[tokio::test]
    async fn test_malformed_email_sends_nothing() {
        let app = TestApp::new();

        let (status, body) = app
            .call(
                Method::POST,
                "/api/newsletter",
                Some(json!({"email": "not-an-email"})),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid email format");

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(app.email.email_count(), 0);
    }

    #[tokio::test]
    async fn test_wrong_method_uses_message_key() {
        let app = TestApp::new();

        let (status, body) = app.call(Method::GET, "/api/newsletter", None).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Method not allowed");
    }
}

mod test_waitlist {
    use super::*;

    #[tokio::test]
    async fn test_join_sends_confirmation() {
        let app = TestApp::new();

        let (status, body) = app
            .call(
                Method::POST,
                "/api/waitlist",
                Some(json!({"email": "omar@example.com"})),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Successfully joined the waitlist!");

        app.wait_for_emails(1).await;
        assert_eq!(
            app.email
                .get_emails_of_kind(TemplateKind::WaitlistConfirmation)
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let app = TestApp::new();
        let request = axum::http::Request::builder()
            .method(Method::POST)
            .uri("/api/waitlist")
            .header("content-type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap();

        let response = app.send(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = crate::common::parse_body(response).await;
        assert_eq!(body["success"], false);
        assert!(body["message"].is_string());
    }
}

mod test_book_demo {
    use super::*;

    #[tokio::test]
    async fn test_booking_sends_both_emails() {
        let app = TestApp::new();

        let (status, body) = app
            .call(
                Method::POST,
                "/api/book-demo",
                Some(json!({
                    "name": "Omar",
                    "email": "omar@example.com",
                    "phone": "+971500000000",
                    "company": "Acme",
                    "agentOfInterest": "Sales Agent",
                    "bookingDate": "2026-11-02",
                    "bookingTime": "10:00",
                })),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Demo booked successfully!");

        app.wait_for_emails(2).await;
        let confirmation = app.email.get_emails_of_kind(TemplateKind::DemoConfirmation);
        let internal = app
            .email
            .get_emails_of_kind(TemplateKind::DemoInternalNotification);
        assert_eq!(confirmation.len(), 1);
        assert_eq!(internal.len(), 1);
        assert_eq!(internal[0].message.to, "info@lagentry.com");
        assert_eq!(internal[0].message.reply_to.as_deref(), Some("omar@example.com"));
        assert!(internal[0].message.body_text.contains("2026-11-02 at 10:00"));
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let app = TestApp::new();

        let (status, body) = app
            .call(
                Method::POST,
                "/api/book-demo",
                Some(json!({"name": "Omar", "email": "omar@example.com"})),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["message"],
            "Name, email, phone, date, and time are required"
        );
    }
}
