//! The question form.

use axum::{extract::State, response::Html};
use serde_json::json;

use biomechqa_common::Topic;
use crate::state::SharedState;

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");

/// GET /: topic selector, question box, answer and references.
pub async fn index_page(State(state): State<SharedState>) -> Html<String> {
    Html(render_index(state.public.api_url.as_deref()))
}

pub fn render_index(api_url: Option<&str>) -> String {
    let options: String = Topic::ALL
        .iter()
        .map(|t| {
            let selected = if *t == Topic::default() { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape_html(t.key()), selected, escape_html(t.label())
            )
        })
        .collect::<Vec<_>>()
        .join("\n                ");

    let client_config = json!({ "apiUrl": api_url.unwrap_or("") }).to_string();

    INDEX_TEMPLATE
        .replace("{{TOPIC_OPTIONS}}", &options)
        .replace("{{CLIENT_CONFIG}}", &client_config.replace("</", "<\\/"))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
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
