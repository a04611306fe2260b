//! Markdown splitting and rendering
//!
//! An index document is parsed once. The first fenced code block whose
//! argument string contains [`META_MARKER`] is lifted out as the metadata
//! block; the remaining events are the post body and are rendered to HTML.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashSet;

/// Token identifying the metadata block in a fenced code block's arguments
pub const META_MARKER: &str = "meta";

/// A parsed index document with its metadata block removed
#[derive(Debug, Clone)]
pub struct MarkdownDocument<'a> {
    /// Raw inner text of the metadata block, if one was found
    pub metadata: Option<String>,
    events: Vec<Event<'a>>,
}

impl MarkdownDocument<'_> {
    /// Whether nothing is left once the metadata block is removed
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Markdown renderer producing highlight-ready HTML
///
/// Code blocks are emitted as `<pre><code class="language-xx">` so the
/// language hint survives for client-side highlighting.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownRenderer {
    options: Options,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_DEFINITION_LIST
            | Options::ENABLE_GFM;
        Self { options }
    }

    /// Parse `markdown` and lift out the metadata block. Never fails.
    pub fn split<'a>(&self, markdown: &'a str) -> MarkdownDocument<'a> {
        let mut events: Vec<Event<'a>> = Vec::new();
        let mut metadata: Option<String> = None;
        let mut in_metadata = false;

        for event in Parser::new_ext(markdown, self.options) {
            if in_metadata {
                match event {
                    Event::End(TagEnd::CodeBlock) => in_metadata = false,
                    Event::Text(text) => {
                        if let Some(meta) = metadata.as_mut() {
                            meta.push_str(&text);
                        }
                    }
                    _ => {}
                }
                continue;
            }

            if metadata.is_none() {
                if let Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) = &event {
                    if is_metadata_fence(info) {
                        metadata = Some(String::new());
                        in_metadata = true;
                        continue;
                    }
                }
            }

            events.push(event);
        }

        MarkdownDocument { metadata, events }
    }

    /// Render a document body to HTML
    pub fn render(&self, document: &MarkdownDocument<'_>) -> String {
        // Explicit `{#id}` anchors are claimed before any id is generated
        let mut ids = HeadingIds::default();
        for event in &document.events {
            if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
                ids.reserve(id);
            }
        }

        let mut events: Vec<Event> = Vec::with_capacity(document.events.len());
        let mut source = document.events.iter().cloned();

        while let Some(event) = source.next() {
            match event {
                Event::Start(Tag::Heading {
                    level,
                    id,
                    classes,
                    attrs,
                }) => {
                    let mut inner = Vec::new();
                    for event in source.by_ref() {
                        if matches!(event, Event::End(TagEnd::Heading(_))) {
                            break;
                        }
                        inner.push(event);
                    }

                    let id = id.unwrap_or_else(|| {
                        CowStr::from(ids.assign(&heading_text(&inner)))
                    });

                    events.push(Event::Start(Tag::Heading {
                        level,
                        id: Some(id),
                        classes,
                        attrs,
                    }));
                    events.extend(inner);
                    events.push(Event::End(TagEnd::Heading(level)));
                }
                other => events.push(other),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// The marker is looked for in the arguments after the language word
fn is_metadata_fence(info: &str) -> bool {
    info.trim()
        .split_once(char::is_whitespace)
        .map(|(_, arguments)| arguments.contains(META_MARKER))
        .unwrap_or(false)
}

fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

/// Unique heading anchors within one document
#[derive(Default)]
struct HeadingIds {
    used: HashSet<String>,
}

impl HeadingIds {
    fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_string());
    }

    fn assign(&mut self, text: &str) -> String {
        let mut base = slug::slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }

        let mut id = base.clone();
        let mut n = 1;
        while self.used.contains(&id) {
            id = format!("{}-{}", base, n);
            n += 1;
        }
        self.used.insert(id.clone());
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(markdown: &str) -> String {
        let renderer = MarkdownRenderer::new();
        renderer.render(&renderer.split(markdown))
    }

    #[test]
    fn test_split_extracts_metadata() {
        let markdown = r#"# Post Title

```json meta
{
  "title": "Post Title"
}
```

Post content
"#;
        let renderer = MarkdownRenderer::new();
        let doc = renderer.split(markdown);
        assert_eq!(doc.metadata.as_deref(), Some("{\n  \"title\": \"Post Title\"\n}\n"));
        assert!(!doc.is_empty());
        assert_eq!(
            renderer.render(&doc),
            "<h1 id=\"post-title\">Post Title</h1>\n<p>Post content</p>\n"
        );
    }

    #[test]
    fn test_split_without_metadata() {
        let renderer = MarkdownRenderer::new();
        let doc = renderer.split("# Post Title\n\nPost content");
        assert!(doc.metadata.is_none());
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_split_metadata_only_is_empty() {
        let renderer = MarkdownRenderer::new();
        let doc = renderer.split("```json meta\n{\"title\": \"Post Title\"}\n```\n");
        assert!(doc.metadata.is_some());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_split_empty_input() {
        let doc = MarkdownRenderer::new().split("");
        assert!(doc.metadata.is_none());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_marker_matches_arguments_only() {
        let renderer = MarkdownRenderer::new();

        // Marker in the content, not the fence
        let doc = renderer.split("```json\n{\"meta\": true}\n```\n");
        assert!(doc.metadata.is_none());

        // Marker as the language word
        let doc = renderer.split("```meta\n{}\n```\n");
        assert!(doc.metadata.is_none());

        // Case sensitive
        let doc = renderer.split("```json META\n{}\n```\n");
        assert!(doc.metadata.is_none());

        // Substring of the arguments
        let doc = renderer.split("```json metadata\n{}\n```\n\ntext");
        assert_eq!(doc.metadata.as_deref(), Some("{}\n"));
    }

    #[test]
    fn test_only_first_metadata_block_is_lifted() {
        let markdown = "```json meta\n{\"title\": \"first\"}\n```\n\n```json meta\n{\"title\": \"second\"}\n```\n";
        let renderer = MarkdownRenderer::new();
        let doc = renderer.split(markdown);
        assert_eq!(doc.metadata.as_deref(), Some("{\"title\": \"first\"}\n"));

        let html = renderer.render(&doc);
        assert!(html.contains("<pre><code class=\"language-json\">"));
        assert!(html.contains("second"));
        assert!(!html.contains("first"));
    }

    #[test]
    fn test_metadata_found_anywhere() {
        let markdown = "> quoted\n>\n> ```yaml meta\n> {\"title\": \"nested\"}\n> ```\n";
        let doc = MarkdownRenderer::new().split(markdown);
        assert_eq!(doc.metadata.as_deref(), Some("{\"title\": \"nested\"}\n"));
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_render_code_block_keeps_language() {
        let html = render("```python\ndef greet(name):\n  print(name)\n```");
        assert!(html.contains("<pre><code class=\"language-python\">def greet(name):"));
    }

    #[test]
    fn test_render_extensions() {
        let html = render("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~\n\nNote[^1]\n\n[^1]: A footnote.\n");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
        assert!(html.contains("footnote-reference"));
    }

    #[test]
    fn test_heading_ids() {
        let html = render("# Text Formatting\n\n## Text Formatting\n\n## `code` *here*\n\n### Custom {#mine}\n\n#### !!!");
        assert!(html.contains("<h1 id=\"text-formatting\">"));
        assert!(html.contains("<h2 id=\"text-formatting-1\">"));
        assert!(html.contains("<h2 id=\"code-here\">"));
        assert!(html.contains("<h3 id=\"mine\">Custom</h3>"));
        assert!(html.contains("<h4 id=\"section\">"));
    }

    #[test]
    fn test_generated_ids_avoid_later_explicit_ids() {
        let html = render("# A\n\n# A\n\n# X {#a-1}");
        assert_eq!(html.matches("id=\"a-1\"").count(), 1);
        assert!(html.contains("<h1 id=\"a\">A</h1>"));
        assert!(html.contains("<h1 id=\"a-2\">A</h1>"));
        assert!(html.contains("<h1 id=\"a-1\">X</h1>"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::new();
        let doc = renderer.split("# A\n\n# A\n\ntext");
        assert_eq!(renderer.render(&doc), renderer.render(&doc));
    }
}
