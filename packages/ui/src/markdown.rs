//! Markdown rendering for long-form descriptions.
//!
//! Service and seminar descriptions are written with the admin editor's
//! markdown subset. Raw HTML in the source is shown as text, never injected.

use dioxus::prelude::*;
use pulldown_cmark::{Event, Options, Parser};

fn parser_options() -> Options {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_STRIKETHROUGH);
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_TASKLISTS);
    opts
}

pub fn render_markdown(source: &str) -> String {
    let parser = Parser::new_ext(source, parser_options()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut html = String::with_capacity(source.len() * 3 / 2);
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

#[component]
pub fn Markdown(source: String, #[props(default = "prose".to_string())] class: String) -> Element {
    let html = use_memo(use_reactive!(|(source,)| render_markdown(&source)));
    rsx! {
        div {
            class: "{class}",
            dangerous_inner_html: "{html}",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_formatting() {
        let html = render_markdown("**Scope**\n\n- audits\n- ~~training~~");
        assert!(html.contains("<strong>Scope</strong>"));
        assert!(html.contains("<li>audits</li>"));
        assert!(html.contains("<del>training</del>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_markdown("hello <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
