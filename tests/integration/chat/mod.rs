//! Admin chat and chat widget integration tests

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use serde_json::json;

use lagentry_chat::{HandoffStatus, Sender};
use lagentry_email::TemplateKind;

use crate::common::{parse_body, TestApp};

mod test_get_conversation {
    use super::*;

    #[tokio::test]
    async fn test_unknown_id_is_created_empty() {
        let app = TestApp::new();

        let (status, body) = app.call(Method::GET, "/api/admin/chat/c1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["conversation"]["id"], "c1");
        assert_eq!(body["conversation"]["handoff_status"], "bot");
        assert_eq!(body["conversation"]["status"], "open");
        assert_eq!(body["conversation"]["messageCount"], 0);
        assert_eq!(body["messages"], json!([]));
    }

    #[tokio::test]
    async fn test_blank_id_is_bad_request() {
        let app = TestApp::new();

        let (status, body) = app
            .call(Method::GET, "/api/admin/chat/%20%20", None)
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Conversation ID is required");
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let app = TestApp::new();

        let (status, body) = app
            .call(Method::DELETE, "/api/admin/chat/c1", None)
            .await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Method not allowed");
    }
}

mod test_takeover_and_release {
    use super::*;

    #[tokio::test]
    async fn test_takeover_credits_admin_and_announces() {
        let app = TestApp::new();

        let (status, body) = app
            .call(
                Method::POST,
                "/api/admin/chat/c1/takeover",
                Some(json!({"adminEmail": "zoya@lagentry.com"})),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["handoff_status"], "human");
        assert_eq!(body["conversation"]["handoff_by"], "zoya@lagentry.com");

        let messages = app.store().get_messages("c1").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::System);
        assert_eq!(
            messages[0].content,
            "A human agent has joined the conversation."
        );
    }

    #[tokio::test]
    async fn test_takeover_without_body_uses_default_admin() {
        let app = TestApp::new();

        let (status, body) = app
            .call(Method::POST, "/api/admin/chat/c1/takeover", None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["conversation"]["handoff_by"], "admin");
    }

    #[tokio::test]
    async fn test_release_returns_to_bot_with_history() {
        let app = TestApp::new();
        app.call(
            Method::POST,
            "/api/chat/c1/messages",
            Some(json!({"sender": "user", "content": "hi"})),
        )
        .await;
        app.call(Method::POST, "/api/admin/chat/c1/takeover", None)
            .await;

        let (status, body) = app
            .call(Method::POST, "/api/admin/chat/c1/release", None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["handoff_status"], "bot");
        assert_eq!(body["conversation"]["handoff_status"], "bot");

        let (_, body) = app.call(Method::GET, "/api/admin/chat/c1", None).await;
        let senders: Vec<&str> = body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["sender"].as_str().unwrap())
            .collect();
        assert_eq!(senders, vec!["user", "system", "system"]);
        assert_eq!(
            body["messages"][2]["content"],
            "The conversation has been returned to the AI assistant."
        );
    }

    #[tokio::test]
    async fn test_get_on_takeover_is_405() {
        let app = TestApp::new();

        let (status, body) = app
            .call(Method::GET, "/api/admin/chat/c1/takeover", None)
            .await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(body["error"], "Method not allowed");
    }
}

mod test_reply {
    use super::*;

    #[test_log::test(tokio::test)]
    async fn test_reply_implies_takeover() {
        let app = TestApp::new();

        let (status, body) = app
            .call(
                Method::POST,
                "/api/admin/chat/c1/reply",
                Some(json!({"message": "Hello, I'm here to help", "adminEmail": "a@x.com"})),
            )
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Reply sent successfully");
        assert_eq!(body["handoff_status"], "human");

        let conversation = app.store().get("c1").await.unwrap().unwrap();
        assert_eq!(conversation.handoff_status, HandoffStatus::Human);
        assert_eq!(conversation.handoff_by.as_deref(), Some("a@x.com"));

        let messages = app.store().get_messages("c1").await.unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Admin);
    }

    #[tokio::test]
    async fn test_reply_requires_message() {
        let app = TestApp::new();

        for body in [json!({}), json!({"message": ""}), json!({"message": 7})] {
            let (status, body) = app
                .call(Method::POST, "/api/admin/chat/c1/reply", Some(body))
                .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Message is required");
        }

        assert!(app.store().get_messages("c1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_reply_accepts_body_without_content_type() {
        let app = TestApp::new();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/admin/chat/c1/reply")
            .body(Body::from(r#"{"message":"plain"}"#))
            .unwrap();

        let response = app.send(request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(parse_body(response).await["handoff_status"], "human");
    }
}

mod test_widget_messages {
    use super::*;

    #[tokio::test]
    async fn test_first_visitor_message_alerts_team_once() {
        let app = TestApp::new();

        for content in ["I need pricing", "Anyone there?"] {
            let (status, body) = app
                .call(
                    Method::POST,
                    "/api/chat/c9/messages",
                    Some(json!({"sender": "user", "content": content})),
                )
                .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["message"]["sender"], "user");
            assert_eq!(body["handoff_status"], "bot");
        }

        app.wait_for_emails(1).await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let alerts = app.email.get_emails_of_kind(TemplateKind::ChatNotification);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].message.to, "info@lagentry.com");
        assert!(alerts[0].message.body_text.contains("I need pricing"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_messages_alert_every_conversation() {
        let app = std::sync::Arc::new(TestApp::new());
        let conversations = 50;

        let mut handles = Vec::new();
        for i in 0..conversations {
            for n in 0..6 {
                let app = app.clone();
                handles.push(tokio::spawn(async move {
                    app.call(
                        Method::POST,
                        &format!("/api/chat/burst{}/messages", i),
                        Some(json!({"sender": "user", "content": format!("hello {}", n)})),
                    )
                    .await
                    .0
                }));
            }
        }
        for handle in handles {
            assert_eq!(handle.await.unwrap(), StatusCode::OK);
        }

        app.wait_for_emails(conversations).await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let alerts = app.email.get_emails_of_kind(TemplateKind::ChatNotification);
        assert_eq!(alerts.len(), conversations);
    }

    #[tokio::test]
    async fn test_bot_message_does_not_alert() {
        let app = TestApp::new();

        let (status, _) = app
            .call(
                Method::POST,
                "/api/chat/c9/messages",
                Some(json!({"sender": "bot", "content": "Hi! How can I help?"})),
            )
            .await;
        assert_eq!(status, StatusCode::OK);

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(app.email.email_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_sender_is_rejected() {
        let app = TestApp::new();

        let (status, body) = app
            .call(
                Method::POST,
                "/api/chat/c9/messages",
                Some(json!({"sender": "invalid_sender", "content": "x"})),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(app.store().get("c9").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_content_is_rejected() {
        let app = TestApp::new();

        let (status, body) = app
            .call(
                Method::POST,
                "/api/chat/c9/messages",
                Some(json!({"sender": "user", "content": ""})),
            )
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Message is required");
    }

    #[tokio::test]
    async fn test_widget_sees_admin_reply() {
        let app = TestApp::new();
        app.call(
            Method::POST,
            "/api/admin/chat/c9/reply",
            Some(json!({"message": "A human here"})),
        )
        .await;

        let (status, body) = app
            .call(Method::GET, "/api/chat/c9/messages", None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["handoff_status"], "human");
        assert_eq!(body["messages"][0]["content"], "A human here");
    }

    #[tokio::test]
    async fn test_polling_unknown_conversation_does_not_create_it() {
        let app = TestApp::new();

        let (status, body) = app
            .call(Method::GET, "/api/chat/ghost/messages", None)
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["handoff_status"], "bot");
        assert_eq!(body["messages"], json!([]));
        assert!(app.store().get("ghost").await.unwrap().is_none());
    }
}

mod test_list {
    use super::*;

    #[tokio::test]
    async fn test_list_returns_summaries() {
        let app = TestApp::new();
        app.call(
            Method::POST,
            "/api/chat/a/messages",
            Some(json!({"sender": "user", "content": "first"})),
        )
        .await;
        app.call(Method::POST, "/api/admin/chat/b/takeover", None)
            .await;

        let (status, body) = app.call(Method::GET, "/api/admin/chat", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 2);
        assert_eq!(body["conversations"][0]["id"], "b");
        assert_eq!(body["conversations"][0]["handoff_status"], "human");
        assert_eq!(body["conversations"][1]["messageCount"], 1);
        assert_eq!(
            body["conversations"][1]["lastMessage"]["content"],
            "first"
        );
    }
}
