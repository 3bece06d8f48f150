//! Message body rendering for Matrix notifications.
//!
//! An alert event is rendered into two parallel bodies: plaintext and an
//! HTML variant carrying the same content. Line breaks inside a body are the
//! literal two-character sequence `\n`, which is how the homeserver expects
//! breaks inside a single-line message value.

use crate::core::AlertEvent;

/// The two message bodies sent for one alert, derived purely from the event.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageBody {
    /// Plaintext rendering.
    pub body: String,
    /// HTML rendering with the same content and ordering.
    pub formatted_body: String,
}

impl MessageBody {
    /// Renders both bodies for an event. Condition results keep their input
    /// order in both renderings.
    pub fn render(event: &AlertEvent, resolved: bool) -> Self {
        Self {
            body: build_plaintext(event, resolved),
            formatted_body: build_html(event, resolved),
        }
    }
}

fn build_plaintext(event: &AlertEvent, resolved: bool) -> String {
    let mut body = if resolved {
        format!(
            "An alert for `{}` has been resolved after passing successfully {} time(s) in a row",
            event.display_name, event.success_threshold
        )
    } else {
        format!(
            "An alert for `{}` has been triggered due to having failed {} time(s) in a row",
            event.display_name, event.failure_threshold
        )
    };
    if let Some(description) = event.description() {
        body.push_str("\\n");
        body.push_str(description);
    }
    for result in &event.condition_results {
        let prefix = if result.success { "✓" } else { "✕" };
        body.push_str(&format!("\\n{} - {}", prefix, result.condition));
    }
    body
}

fn build_html(event: &AlertEvent, resolved: bool) -> String {
    let headline = if resolved {
        format!(
            "An alert for <code>{}</code> has been resolved after passing successfully {} time(s) in a row",
            event.display_name, event.success_threshold
        )
    } else {
        format!(
            "An alert for <code>{}</code> has been triggered due to having failed {} time(s) in a row",
            event.display_name, event.failure_threshold
        )
    };
    let mut body = format!("<h3>{headline}</h3>");
    if let Some(description) = event.description() {
        body.push_str(&format!("\\n<blockquote>{description}</blockquote>"));
    }
    body.push_str("\\n<h5>Condition results</h5><ul>");
    for result in &event.condition_results {
        let prefix = if result.success { "✅" } else { "❌" };
        body.push_str(&format!("<li>{} - <code>{}</code></li>", prefix, result.condition));
    }
    body.push_str("</ul>");
    body
}
