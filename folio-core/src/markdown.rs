use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd, html};

/// Render a markdown-valued content field (bio paragraphs, long
/// descriptions) to HTML. Fenced code blocks come out escaped and plain;
/// the page has no use for syntax highlighting.
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, Options::all());

    let events: Vec<Event> = parser.collect();
    let mut processed_events = Vec::new();
    let mut i = 0;

    while i < events.len() {
        match &events[i] {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(_) | CodeBlockKind::Indented)) => {
                let mut code_content = String::new();
                i += 1; // Skip the start event

                while i < events.len() {
                    match &events[i] {
                        Event::End(TagEnd::CodeBlock) => break,
                        Event::Text(text) => code_content.push_str(text),
                        _ => {}
                    }
                    i += 1;
                }

                processed_events.push(Event::Html(
                    format!(
                        "<pre><code>{}</code></pre>",
                        html_escape::encode_text(&code_content)
                    )
                    .into(),
                ));
            }
            _ => {
                processed_events.push(events[i].clone());
            }
        }
        i += 1;
    }

    let mut out = String::new();
    html::push_html(&mut out, processed_events.into_iter());

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emphasis_and_links_render() {
        let out = render_markdown("I build **data-driven** apps, see [GitHub](https://github.com).");
        assert!(out.contains("<strong>data-driven</strong>"));
        assert!(out.contains("<a href=\"https://github.com\">GitHub</a>"));
    }

    #[test]
    fn fenced_code_is_escaped_not_highlighted() {
        let out = render_markdown("```\nlet x = \"<script>\";\n```");
        assert!(out.contains("&lt;script&gt;"));
        assert!(!out.contains("<script>"));
    }
}
