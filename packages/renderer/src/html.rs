//! HTML serialization of rendered pages.

use crate::renderer::RenderedPage;
use hearth_components::VNode;
use hearth_document::{BackgroundKind, PageDocument};

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Emit `style` attributes
    pub inline_styles: bool,
    /// Pretty print HTML
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            inline_styles: true,
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

impl HtmlOptions {
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }
}

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line(&mut self, text: &str) {
        if self.options.pretty {
            self.add_indent();
        }
        self.add(text);
        self.newline();
    }

    fn add_indent(&mut self) {
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if self.options.pretty {
            self.add("\n");
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

/// Serialize nodes as an HTML fragment
pub fn to_html(nodes: &[VNode], options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);
    for node in nodes {
        write_block(node, &mut ctx);
    }
    ctx.get_output()
}

/// Full HTML document for `page` around already rendered content
pub fn render_document_html(page: &PageDocument, rendered: &RenderedPage, options: &HtmlOptions) -> String {
    let mut ctx = Context::new(options);

    ctx.add_line("<!DOCTYPE html>");
    ctx.add_line("<html lang=\"en\">");
    ctx.indent();

    ctx.add_line("<head>");
    ctx.indent();
    ctx.add_line("<meta charset=\"UTF-8\">");
    ctx.add_line("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">");
    ctx.add_line(&format!("<title>{}</title>", escape_html(&page.metadata.title)));
    if !page.metadata.description.is_empty() {
        ctx.add_line(&format!(
            "<meta name=\"description\" content=\"{}\">",
            escape_html(&page.metadata.description)
        ));
    }
    if let Some(keywords) = page.metadata.keywords.as_ref().filter(|k| !k.is_empty()) {
        ctx.add_line(&format!(
            "<meta name=\"keywords\" content=\"{}\">",
            escape_html(&keywords.join(", "))
        ));
    }
    if let Some(image) = &page.metadata.og_image {
        ctx.add_line(&format!("<meta property=\"og:image\" content=\"{}\">", escape_html(image)));
    }
    if page.metadata.no_index.unwrap_or(false) {
        ctx.add_line("<meta name=\"robots\" content=\"noindex\">");
    }
    ctx.dedent();
    ctx.add_line("</head>");

    ctx.add_line(&format!("<body{}>", body_style(page, options)));
    ctx.indent();
    ctx.add_line(&format!(
        "<main class=\"hearth-page hearth-layout-{}\"{}>",
        layout_name(page),
        main_style(page, options)
    ));
    ctx.indent();
    for node in &rendered.nodes {
        write_block(node, &mut ctx);
    }
    ctx.dedent();
    ctx.add_line("</main>");
    ctx.dedent();
    ctx.add_line("</body>");

    ctx.dedent();
    ctx.add_line("</html>");

    ctx.get_output()
}

fn layout_name(page: &PageDocument) -> &'static str {
    match page.settings.layout {
        hearth_document::LayoutVariant::Full => "full",
        hearth_document::LayoutVariant::Contained => "contained",
        hearth_document::LayoutVariant::Narrow => "narrow",
    }
}

fn main_style(page: &PageDocument, options: &HtmlOptions) -> String {
    match page.settings.layout.max_width() {
        Some(width) if options.inline_styles => {
            format!(" style=\"max-width: {}; margin: 0 auto;\"", width)
        }
        _ => String::new(),
    }
}

fn body_style(page: &PageDocument, options: &HtmlOptions) -> String {
    let Some(background) = page.settings.background.as_ref().filter(|_| options.inline_styles) else {
        return String::new();
    };
    let value = escape_html(&background.value);
    let style = match background.kind {
        BackgroundKind::Color => format!("background-color: {};", value),
        BackgroundKind::Image => format!("background-image: url('{}'); background-size: cover;", value),
        BackgroundKind::Gradient => format!("background: {};", value),
    };
    format!(" style=\"{}\"", style)
}

/// Write a node on its own line(s)
fn write_block(node: &VNode, ctx: &mut Context) {
    if ctx.options.pretty {
        ctx.add_indent();
    }
    write_node(node, ctx);
    ctx.newline();
}

fn write_node(node: &VNode, ctx: &mut Context) {
    match node {
        VNode::Text { content } => ctx.add(&escape_html(content)),
        VNode::Error {
            message,
            component_id,
        } => {
            ctx.add("<div class=\"hearth-error\" role=\"alert\"");
            if let Some(id) = component_id {
                ctx.add(&format!(" data-component-id=\"{}\"", escape_html(id)));
            }
            ctx.add(">");
            ctx.add(&escape_html(message));
            ctx.add("</div>");
        }
        VNode::Element {
            tag,
            attributes,
            styles,
            children,
            ..
        } => {
            ctx.add(&format!("<{}", tag));
            for (name, value) in attributes {
                ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
            }
            if ctx.options.inline_styles && !styles.is_empty() {
                let declarations: Vec<String> = styles
                    .iter()
                    .map(|(key, value)| format!("{}: {};", key, value))
                    .collect();
                ctx.add(&format!(" style=\"{}\"", escape_html(&declarations.join(" "))));
            }

            if children.is_empty() && is_self_closing(tag) {
                ctx.add(" />");
                return;
            }
            ctx.add(">");

            if has_element_children(children) && ctx.options.pretty {
                ctx.newline();
                ctx.indent();
                for child in children {
                    write_block(child, ctx);
                }
                ctx.dedent();
                ctx.add_indent();
            } else {
                for child in children {
                    write_node(child, ctx);
                }
            }

            ctx.add(&format!("</{}>", tag));
        }
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img" | "input" | "br" | "hr" | "meta" | "link" | "source" | "wbr"
    )
}

fn has_element_children(children: &[VNode]) -> bool {
    children
        .iter()
        .any(|child| !matches!(child, VNode::Text { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_document::{create_page, PageDraft, SequentialIds};

    #[test]
    fn test_compact_fragment() {
        let node = VNode::element("p")
            .with_attr("class", "lead")
            .with_style("color", "#333")
            .with_child(VNode::text("Rye & <spelt>"));
        let html = to_html(&[node], &HtmlOptions::compact());
        assert_eq!(
            html,
            "<p class=\"lead\" style=\"color: #333;\">Rye &amp; &lt;spelt&gt;</p>"
        );
    }

    #[test]
    fn test_pretty_nesting_and_void_tags() {
        let node = VNode::element("div")
            .with_child(VNode::element("img").with_attr("src", "/a.jpg"))
            .with_child(VNode::element("span").with_child(VNode::text("hi")));
        let html = to_html(&[node], &HtmlOptions::default());
        assert_eq!(
            html,
            "<div>\n  <img src=\"/a.jpg\" />\n  <span>hi</span>\n</div>\n"
        );
    }

    #[test]
    fn test_styles_can_be_omitted() {
        let options = HtmlOptions {
            inline_styles: false,
            ..HtmlOptions::compact()
        };
        let html = to_html(&[VNode::element("div").with_style("gap", "1rem")], &options);
        assert_eq!(html, "<div></div>");
    }

    #[test]
    fn test_error_placeholder_markup() {
        let html = to_html(
            &[VNode::error("Unknown component: Marquee", Some("x".to_string()))],
            &HtmlOptions::compact(),
        );
        assert!(html.contains("role=\"alert\""));
        assert!(html.contains("data-component-id=\"x\""));
    }

    #[test]
    fn test_document_head() {
        let mut ids = SequentialIds::new("p");
        let mut page = create_page(&mut ids, PageDraft::titled("Bread & Butter"));
        page.metadata.description = "Fresh daily".to_string();
        page.metadata.no_index = Some(true);

        let html = render_document_html(&page, &RenderedPage::default(), &HtmlOptions::default());
        assert!(html.starts_with("<!DOCTYPE html>\n"));
        assert!(html.contains("<title>Bread &amp; Butter</title>"));
        assert!(html.contains("content=\"Fresh daily\""));
        assert!(html.contains("noindex"));
        assert!(html.contains("max-width: 1200px"));
    }
}
