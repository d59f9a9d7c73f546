//! HTML rendering for the page and the htmx fragments.
//!
//! Everything here is a pure function of its inputs, so rendering the same
//! entries twice yields identical markup.

use crate::constants::{REFRESH_TRIGGER, ROUTE_SUBMIT, ROUTE_UPDATE};
use crate::entry::Entry;
use crate::validation::Limits;

const CHAR_COUNT_SCRIPT: &str = "
function updateCharCount(inputId, countId, maxLength) {
    const input = document.getElementById(inputId);
    const count = document.getElementById(countId);
    const remainingChars = maxLength - input.value.length;
    count.textContent = remainingChars + '/' + maxLength;
}
";

/// Escapes text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

pub fn message_list(entries: &[Entry]) -> String {
    if entries.is_empty() {
        return concat!(
            r#"<div id="message-list" class="empty-state">"#,
            "<p>No messages yet. Be the first to say hi!</p>",
            "</div>"
        )
        .to_string();
    }
    let mut html = String::from(r#"<div id="message-list" class="message-list">"#);
    for entry in entries {
        html.push_str(&format!(
            concat!(
                r#"<div class="message"><div class="message-content">"#,
                r#"<span class="message-name">{}: </span>"#,
                r#"<span class="message-text">{}</span>"#,
                r#"<small class="message-timestamp">{}</small>"#,
                "</div></div>"
            ),
            escape(&entry.name),
            escape(&entry.message),
            escape(&entry.timestamp),
        ));
    }
    html.push_str("</div>");
    html
}

pub fn guest_counter(count: usize) -> String {
    format!(
        r#"<div id="guest-counter" class="guest-counter">{count} guests have said hi so far <span class="emoji">👋</span></div>"#
    )
}

/// The swappable region: optional notice, guest counter and message list.
pub fn update_area(entries: &[Entry], notice: Option<&str>) -> String {
    let mut html = format!(
        r#"<div id="update-area" hx-get="{ROUTE_UPDATE}" hx-trigger="{REFRESH_TRIGGER}" hx-swap="outerHTML">"#
    );
    if let Some(notice) = notice {
        html.push_str(&format!(r#"<p class="form-error">{}</p>"#, escape(notice)));
    }
    html.push_str(&guest_counter(entries.len()));
    html.push_str(&message_list(entries));
    html.push_str("</div>");
    html
}

fn form(limits: &Limits) -> String {
    let mut html = format!(
        r##"<form id="message-form" hx-post="{ROUTE_SUBMIT}" hx-target="#update-area" hx-swap="outerHTML"><div class="input-group">"##
    );
    html.push_str(&text_input(
        "name",
        "Name:",
        "Enter your name",
        "nameCount",
        limits.max_name_chars,
    ));
    html.push_str(&text_input(
        "message",
        "Message:",
        "Enter your message",
        "messageCount",
        limits.max_message_chars,
    ));
    html.push_str(r#"</div><button type="submit">Submit</button></form>"#);
    html
}

fn text_input(id: &str, label: &str, placeholder: &str, count_id: &str, max: usize) -> String {
    format!(
        concat!(
            r#"<div class="input-wrapper"><label for="{id}">{label}</label>"#,
            r#"<div class="input-with-counter">"#,
            r#"<input type="text" id="{id}" name="{id}" required placeholder="{placeholder}" "#,
            r#"maxlength="{max}" oninput="updateCharCount('{id}', '{count_id}', {max})">"#,
            r#"<span id="{count_id}" class="char-count"></span>"#,
            "</div></div>"
        ),
        id = id,
        label = label,
        placeholder = placeholder,
        count_id = count_id,
        max = max,
    )
}

/// Full document served on initial load.
pub fn page(entries: &[Entry], limits: &Limits) -> String {
    let mut html = String::from(concat!(
        "<!doctype html><html><head>",
        r#"<meta charset="utf-8">"#,
        "<title>Simple Guestbook</title>",
        r#"<link rel="stylesheet" href="https://unpkg.com/sakura.css/css/sakura-vader.css" type="text/css">"#,
        r#"<link rel="stylesheet" href="/style.css" type="text/css">"#,
        r#"<link rel="icon" type="image/png" href="/assets/favicon.png">"#,
        r#"<script src="https://unpkg.com/htmx.org@1.9.10"></script>"#,
        r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#,
        r#"<meta name="og:image" content="/assets/guestbook.jpg">"#,
    ));
    html.push_str(&format!("<script>{CHAR_COUNT_SCRIPT}</script>"));
    html.push_str("</head><body><main><h1>✍️ Guestbook</h1>");
    html.push_str(&form(limits));
    html.push_str("<h2>🪵 log</h2>");
    html.push_str(&update_area(entries, None));
    html.push_str(r#"<div class="footer">made with ❤️ using htmx</div>"#);
    html.push_str("</main></body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, name: &str, message: &str) -> Entry {
        Entry {
            id,
            name: name.to_string(),
            message: message.to_string(),
            timestamp: "2024-12-25 06:01:13 PM PST".to_string(),
        }
    }

    #[test]
    fn empty_list_renders_placeholder() {
        let html = message_list(&[]);
        assert!(html.contains(r#"class="empty-state""#));
        assert!(html.contains("No messages yet. Be the first to say hi!"));
    }

    #[test]
    fn list_contains_name_message_and_timestamp() {
        let html = message_list(&[entry(1, "Alice", "Hello!")]);
        assert!(html.contains(r#"<span class="message-name">Alice: </span>"#));
        assert!(html.contains(r#"<span class="message-text">Hello!</span>"#));
        assert!(html.contains("2024-12-25 06:01:13 PM PST"));
    }

    #[test]
    fn list_keeps_given_order() {
        let html = message_list(&[entry(2, "Bob", "second"), entry(1, "Alice", "first")]);
        let bob = html.find("Bob").unwrap();
        let alice = html.find("Alice").unwrap();
        assert!(bob < alice);
    }

    #[test]
    fn user_text_is_escaped() {
        let html = message_list(&[entry(1, "<script>", "a & \"b\"")]);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("a &amp; &quot;b&quot;"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let entries = vec![entry(1, "Alice", "Hello!"), entry(2, "Bob", "Hi")];
        assert_eq!(update_area(&entries, None), update_area(&entries, None));
        assert_eq!(
            page(&entries, &Limits::default()),
            page(&entries, &Limits::default())
        );
    }

    #[test]
    fn update_area_polls_and_counts_guests() {
        let html = update_area(&[entry(1, "Alice", "Hello!")], None);
        assert!(html.starts_with(r#"<div id="update-area""#));
        assert!(html.contains(r#"hx-get="/update-messages""#));
        assert!(html.contains(r#"hx-trigger="every 10s""#));
        assert!(html.contains("1 guests have said hi so far"));
        assert!(!html.contains("form-error"));
    }

    #[test]
    fn update_area_shows_escaped_notice() {
        let html = update_area(&[], Some("too <long>"));
        assert!(html.contains(r#"<p class="form-error">too &lt;long&gt;</p>"#));
    }

    #[test]
    fn empty_page_has_form_and_empty_list() {
        let html = page(&[], &Limits::default());
        assert!(html.starts_with("<!doctype html>"));
        assert!(html.contains("<title>Simple Guestbook</title>"));
        assert!(html.contains(r#"<form id="message-form" hx-post="/submit-message""#));
        assert!(html.contains(r#"name="name""#));
        assert!(html.contains(r#"name="message""#));
        assert!(html.contains(r#"maxlength="15""#));
        assert!(html.contains(r#"maxlength="50""#));
        assert!(html.contains("0 guests have said hi so far"));
        assert!(html.contains("No messages yet."));
    }
}
