//! Transactional email content
//!
//! Canonical content for every email the website sends, shared by all
//! providers. Each [`Notification`] renders to a complete [`EmailMessage`]
//! addressed according to the sender [`EmailIdentity`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{EmailIdentity, EmailMessage};

/// Which transactional template an email was rendered from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    WaitlistConfirmation,
    NewsletterWelcome,
    DemoConfirmation,
    DemoInternalNotification,
    ChatNotification,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WaitlistConfirmation => "waitlist_confirmation",
            Self::NewsletterWelcome => "newsletter_welcome",
            Self::DemoConfirmation => "demo_confirmation",
            Self::DemoInternalNotification => "demo_internal_notification",
            Self::ChatNotification => "chat_notification",
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visitor who signed up through a website form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignupContact {
    pub email: String,
    pub name: String,
}

/// Demo booking details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoBooking {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub company: String,
    pub date_time: String,
    pub agent_name: String,
    pub user_requirement: String,
}

/// First visitor message of a new chat conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatAlert {
    pub conversation_id: String,
    pub user_message: String,
    pub timestamp: DateTime<Utc>,
}

/// A transactional email request: template kind plus its payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum Notification {
    WaitlistConfirmation(SignupContact),
    NewsletterWelcome(SignupContact),
    DemoConfirmation(DemoBooking),
    DemoInternalNotification(DemoBooking),
    ChatNotification(ChatAlert),
}

impl Notification {
    pub fn kind(&self) -> TemplateKind {
        match self {
            Self::WaitlistConfirmation(_) => TemplateKind::WaitlistConfirmation,
            Self::NewsletterWelcome(_) => TemplateKind::NewsletterWelcome,
            Self::DemoConfirmation(_) => TemplateKind::DemoConfirmation,
            Self::DemoInternalNotification(_) => TemplateKind::DemoInternalNotification,
            Self::ChatNotification(_) => TemplateKind::ChatNotification,
        }
    }
}

/// Render a notification into a ready-to-send message
pub fn render(notification: &Notification, identity: &EmailIdentity) -> EmailMessage {
    let message = match notification {
        Notification::WaitlistConfirmation(contact) => {
            visitor_message(identity, &contact.email, waitlist_confirmation(contact))
        }
        Notification::NewsletterWelcome(contact) => {
            visitor_message(identity, &contact.email, newsletter_welcome(contact))
        }
        Notification::DemoConfirmation(booking) => {
            visitor_message(identity, &booking.email, demo_confirmation(booking))
        }
        Notification::DemoInternalNotification(booking) => {
            let (subject, text, html) = demo_internal_notification(booking);
            EmailMessage::new(
                identity.company_email.clone(),
                identity.from_address.clone(),
                subject,
                text,
            )
            .with_html(html)
            .with_reply_to(booking.email.clone())
        }
        Notification::ChatNotification(alert) => {
            let (subject, text, html) = chat_notification(alert, &identity.admin_chat_url);
            EmailMessage::new(
                identity.company_email.clone(),
                identity.from_address.clone(),
                subject,
                text,
            )
            .with_html(html)
            .with_reply_to(identity.from_address.clone())
            .with_metadata(
                "conversation_id".to_string(),
                alert.conversation_id.clone(),
            )
        }
    };

    message
        .with_from_name(identity.from_name.clone())
        .with_metadata(
            "email_type".to_string(),
            notification.kind().as_str().to_string(),
        )
}

/// Mail to a visitor: company inbox in BCC, replies come back to us
fn visitor_message(
    identity: &EmailIdentity,
    to: &str,
    (subject, text, html): (String, String, String),
) -> EmailMessage {
    EmailMessage::new(to.to_string(), identity.from_address.clone(), subject, text)
        .with_html(html)
        .with_bcc(identity.company_email.clone())
        .with_reply_to(identity.from_address.clone())
}

fn greeting_name(name: &str) -> &str {
    name.split_whitespace().next().unwrap_or("there")
}

/// Minimal HTML escaping for visitor-supplied text
fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn wrap_html(inner: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">{}</div>"#,
        inner
    )
}

/// Paragraphs to (text, html); the HTML side is escaped
fn paragraphs(lines: &[&str]) -> (String, String) {
    let text = lines.join("\n\n");
    let html = lines
        .iter()
        .map(|l| format!("<p>{}</p>", escape_html(l)))
        .collect::<String>();
    (text, html)
}

const SIGNATURE_TEXT: &str = "Zoya\nCEO, Lagentry";
const SIGNATURE_HTML: &str = "<p><strong>Zoya</strong><br>CEO, Lagentry</p>";

fn signed(lines: &[&str]) -> (String, String) {
    let (text, html) = paragraphs(lines);
    (
        format!("{}\n\n{}", text, SIGNATURE_TEXT),
        wrap_html(&format!("{}{}", html, SIGNATURE_HTML)),
    )
}

pub fn waitlist_confirmation(contact: &SignupContact) -> (String, String, String) {
    let hi = format!("Hi {},", greeting_name(&contact.name));
    let (text, html) = signed(&[
        hi.as_str(),
        "You're officially on the Lagentry waitlist!",
        "I'm Zoya, CEO of Lagentry, and I wanted to personally say hello.",
        "We're building what we like to call \"AI employees\" agents that don't just chat, but actually work inside real businesses across MENA.",
        "You'll hear from us as we open early access, roll out features, and get closer to launch. No noise. No spam. Just real updates.",
        "If you ever want to share what you're hoping to automate, just reply! I read these myself.",
        "Glad you're here. Really.",
    ]);
    (
        "You're officially in! Welcome to Lagentry 🚀".to_string(),
        text,
        html,
    )
}

pub fn newsletter_welcome(contact: &SignupContact) -> (String, String, String) {
    let hi = format!("Hi {},", greeting_name(&contact.name));
    let (text, html) = signed(&[
        hi.as_str(),
        "Welcome to Lagentry!",
        "From time to time, I'll share how we're building \"AI employees\" for real businesses in MENA what's working, what isn't, and what's coming next.",
        "This won't be marketing fluff.",
        "Just honest updates from the ground.",
        "Thanks for joining us.",
    ]);
    (
        "Welcome to Lagentry! Let's build this right".to_string(),
        text,
        html,
    )
}

pub fn demo_confirmation(booking: &DemoBooking) -> (String, String, String) {
    let name = booking.name.trim();
    let hi = format!("Hi {},", if name.is_empty() { "there" } else { name });
    let (text, html) = signed(&[
        hi.as_str(),
        "Your Lagentry demo is confirmed!",
        "In the session, I'll walk you through how Lagentry agents work in real production environments beyond demos and buzzwords.",
        "You'll find the meeting details in your calendar invite.",
        "You can reschedule or cancel anytime if needed.",
        "Looking forward to speaking with you!",
    ]);
    (
        "Your Lagentry demo is booked! Let's automate your business!".to_string(),
        text,
        html,
    )
}

fn or_na(value: &str) -> &str {
    if value.trim().is_empty() {
        "N/A"
    } else {
        value
    }
}

pub fn demo_internal_notification(booking: &DemoBooking) -> (String, String, String) {
    let date_time = if booking.date_time.trim().is_empty() {
        "Date TBD"
    } else {
        booking.date_time.as_str()
    };
    let agent = if booking.agent_name.trim().is_empty() {
        "General"
    } else {
        booking.agent_name.as_str()
    };

    let mut fields = vec![
        ("Name", booking.name.as_str()),
        ("Email", booking.email.as_str()),
        ("Phone", or_na(&booking.phone)),
        ("Company", or_na(&booking.company)),
        ("Date & Time", date_time),
        ("Agent of Interest", agent),
    ];
    if !booking.user_requirement.trim().is_empty() {
        fields.push(("User Requirements", booking.user_requirement.as_str()));
    }

    let text = format!(
        "New Demo Booking\n\n{}",
        fields
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n")
    );
    let rows = fields
        .iter()
        .map(|(label, value)| {
            format!(
                "<p><strong>{}:</strong> {}</p>",
                escape_html(label),
                escape_html(value)
            )
        })
        .collect::<String>();
    let html = wrap_html(&format!(
        r#"<h2 style="color: #333;">New Demo Booking</h2><div style="background: #f5f5f5; padding: 15px; border-radius: 8px; margin: 20px 0;">{}</div>"#,
        rows
    ));

    (
        format!("New Demo Booking: {} - {}", booking.name, date_time),
        text,
        html,
    )
}

pub fn chat_notification(alert: &ChatAlert, chat_url: &str) -> (String, String, String) {
    let time = alert.timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let text = format!(
        "New Chat Conversation\n\n\
        A new conversation has started on the Lagentry website chatbot.\n\n\
        User Message: {}\n\n\
        Conversation ID: {}\n\
        Time: {}\n\n\
        View & Reply: {}",
        alert.user_message, alert.conversation_id, time, chat_url
    );

    let html = wrap_html(&format!(
        r#"
        <h2 style="color: #9b5cff;">New Chat Conversation</h2>
        <p>A new conversation has started on the Lagentry website chatbot.</p>
        <div style="background: #f5f5f5; padding: 15px; border-radius: 8px; margin: 20px 0;">
            <p style="margin: 0 0 10px 0;"><strong>User Message:</strong></p>
            <p style="margin: 0; color: #333;">{message}</p>
        </div>
        <p><strong>Conversation ID:</strong> {conversation_id}</p>
        <p><strong>Time:</strong> {time}</p>
        <div style="margin: 30px 0;">
            <a href="{chat_url}"
               style="background: #9b5cff; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block;">
                View &amp; Reply in Admin Panel
            </a>
        </div>
        "#,
        message = escape_html(&alert.user_message),
        conversation_id = escape_html(&alert.conversation_id),
        time = time,
        chat_url = escape_html(chat_url),
    ));

    (
        "New Chat Conversation - Lagentry Website".to_string(),
        text,
        html,
    )
}
