use super::{bool_prop, str_or, str_prop};
use crate::registry::{Category, RegistryEntry, ViewError};
use crate::schema::PropDefinition;
use crate::vdom::VNode;
use hearth_document::Props;

const ALIGN: &[(&str, &str)] = &[("Left", "left"), ("Center", "center"), ("Right", "right")];

pub(super) fn entries() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry::new("Title", Category::Content, title)
            .icon("heading")
            .description("Heading text")
            .prop(
                "text",
                PropDefinition::string("Text")
                    .with_default("Freshly baked every morning")
                    .required()
                    .max_length(160),
            )
            .prop(
                "level",
                PropDefinition::select(
                    "Level",
                    &[("H1", "h1"), ("H2", "h2"), ("H3", "h3"), ("H4", "h4")],
                )
                .with_default("h2"),
            )
            .prop("align", PropDefinition::select("Alignment", ALIGN).with_default("left"))
            .prop("color", PropDefinition::color("Color")),
        RegistryEntry::new("Paragraph", Category::Content, paragraph)
            .icon("text")
            .description("Body text")
            .prop(
                "text",
                PropDefinition::string("Text")
                    .with_default("Our sourdough rests for 36 hours before it meets the oven.")
                    .required(),
            )
            .prop("align", PropDefinition::select("Alignment", ALIGN).with_default("left")),
        RegistryEntry::new("Image", Category::Content, image)
            .icon("image")
            .description("Single picture")
            .prop(
                "src",
                PropDefinition::image("Image path")
                    .with_default("/images/placeholder.jpg")
                    .required(),
            )
            .prop("alt", PropDefinition::string("Alternative text").with_default(""))
            .prop("width", PropDefinition::dimension("Width").with_default("100%"))
            .prop("rounded", PropDefinition::boolean("Rounded corners").with_default(false)),
        RegistryEntry::new("Hero", Category::Content, hero)
            .icon("star")
            .description("Large banner with heading and call to action")
            .prop(
                "heading",
                PropDefinition::string("Heading")
                    .with_default("Bread worth waking up for")
                    .required(),
            )
            .prop("subheading", PropDefinition::string("Subheading").with_default(""))
            .prop("backgroundImage", PropDefinition::image("Background image"))
            .prop("ctaLabel", PropDefinition::string("Button label").with_default("Order now"))
            .prop(
                "ctaHref",
                PropDefinition::string("Button link").with_default("/order"),
            )
            .prop("overlay", PropDefinition::boolean("Darken image").with_default(true)),
    ]
}

fn title(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    let level = match str_or(props, "level", "h2") {
        tag @ ("h1" | "h2" | "h3" | "h4") => tag,
        other => {
            return Err(ViewError::InvalidProp {
                prop: "level".to_string(),
                message: format!("unsupported heading level '{}'", other),
            })
        }
    };

    Ok(VNode::element(level)
        .with_attr("class", "hearth-title")
        .with_optional_style("text-align", str_prop(props, "align"))
        .with_optional_style("color", str_prop(props, "color"))
        .with_child(VNode::text(str_or(props, "text", ""))))
}

fn paragraph(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    Ok(VNode::element("p")
        .with_attr("class", "hearth-paragraph")
        .with_optional_style("text-align", str_prop(props, "align"))
        .with_child(VNode::text(str_or(props, "text", ""))))
}

fn image(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    let node = VNode::element("img")
        .with_attr("class", "hearth-image")
        .with_attr("src", str_or(props, "src", ""))
        .with_attr("alt", str_or(props, "alt", ""))
        .with_optional_style("width", str_prop(props, "width"));
    Ok(if bool_prop(props, "rounded") {
        node.with_style("border-radius", "12px")
    } else {
        node
    })
}

fn hero(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    let mut node = VNode::element("header")
        .with_attr("class", "hearth-hero")
        .with_style("padding", "6rem 1rem")
        .with_style("text-align", "center");

    if let Some(src) = str_prop(props, "backgroundImage").filter(|s| !s.is_empty()) {
        let overlay = if bool_prop(props, "overlay") {
            "linear-gradient(rgba(0, 0, 0, 0.35), rgba(0, 0, 0, 0.35)), "
        } else {
            ""
        };
        node = node
            .with_style("background-image", format!("{}url(\"{}\")", overlay, src))
            .with_style("background-size", "cover");
    }

    node = node.with_child(VNode::element("h1").with_child(VNode::text(str_or(props, "heading", ""))));

    if let Some(sub) = str_prop(props, "subheading").filter(|s| !s.is_empty()) {
        node = node.with_child(VNode::element("p").with_child(VNode::text(sub)));
    }

    if let Some(label) = str_prop(props, "ctaLabel").filter(|s| !s.is_empty()) {
        node = node.with_child(
            VNode::element("a")
                .with_attr("class", "hearth-button hearth-button-primary")
                .with_attr("href", str_or(props, "ctaHref", "#"))
                .with_child(VNode::text(label)),
        );
    }

    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title_level() {
        let mut props = Props::new();
        props.insert("text".into(), json!("Croissants"));
        props.insert("level".into(), json!("h1"));

        let node = title(&props, vec![]).unwrap();
        assert_eq!(node.tag(), Some("h1"));
        assert_eq!(node.text_content(), "Croissants");
    }

    #[test]
    fn test_title_rejects_unknown_level() {
        let mut props = Props::new();
        props.insert("level".into(), json!("h9"));
        assert!(title(&props, vec![]).is_err());
    }

    #[test]
    fn test_hero_skips_empty_parts() {
        let mut props = Props::new();
        props.insert("heading".into(), json!("Hello"));
        let node = hero(&props, vec![]).unwrap();

        assert_eq!(node.children().len(), 1);
        assert_eq!(node.style("background-image"), None);
    }
}
