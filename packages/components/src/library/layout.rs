use super::{bool_prop, num_prop, str_or, str_prop};
use crate::registry::{Category, RegistryEntry, ViewError};
use crate::schema::{EditorHint, PropDefinition};
use crate::vdom::VNode;
use hearth_document::Props;

pub(super) fn entries() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry::new("Section", Category::Layout, section)
            .display_name("Section")
            .icon("layout")
            .description("Full-width band that groups related content")
            .container()
            .prop(
                "background",
                PropDefinition::select("Background", &[("Color", "color"), ("Image", "image")])
                    .with_default("color"),
            )
            .prop(
                "backgroundColor",
                PropDefinition::color("Background color")
                    .with_default("#fff8f0")
                    .visible_when("background", "color"),
            )
            .prop(
                "backgroundImage",
                PropDefinition::image("Background image").visible_when("background", "image"),
            )
            .prop("padding", PropDefinition::dimension("Padding").with_default("3rem 1rem")),
        RegistryEntry::new("Container", Category::Layout, container)
            .icon("box")
            .description("Centers its content within a maximum width")
            .container()
            .prop("maxWidth", PropDefinition::dimension("Max width").with_default("1200px")),
        RegistryEntry::new("FlexRow", Category::Layout, flex_row)
            .display_name("Flexible row")
            .icon("columns")
            .description("Places children side by side in adjustable proportions")
            .container()
            .prop(
                "ratio",
                PropDefinition::string("Proportions")
                    .with_default("1:1")
                    .with_editor(EditorHint::Ratio)
                    .describe("Relative widths of the children, e.g. 1:2:1"),
            )
            .prop("gap", PropDefinition::dimension("Gap").with_default("1.5rem"))
            .prop(
                "align",
                PropDefinition::select(
                    "Vertical alignment",
                    &[("Top", "flex-start"), ("Center", "center"), ("Bottom", "flex-end")],
                )
                .with_default("flex-start"),
            ),
        RegistryEntry::new("Grid", Category::Layout, grid)
            .icon("grid")
            .description("Even grid of cards or images")
            .container()
            .prop(
                "columns",
                PropDefinition::number("Columns").with_default(3).range(1.0, 6.0).step(1.0),
            )
            .prop("gap", PropDefinition::dimension("Gap").with_default("1rem")),
        RegistryEntry::new("Card", Category::Layout, card)
            .icon("square")
            .description("Padded surface with an optional shadow")
            .container()
            .prop("shadow", PropDefinition::boolean("Shadow").with_default(true))
            .prop("padding", PropDefinition::dimension("Padding").with_default("1.5rem")),
    ]
}

fn section(props: &Props, children: Vec<VNode>) -> Result<VNode, ViewError> {
    let node = VNode::element("section")
        .with_attr("class", "hearth-section")
        .with_optional_style("padding", str_prop(props, "padding"));

    let node = match str_or(props, "background", "color") {
        "image" => match str_prop(props, "backgroundImage") {
            Some(src) if !src.is_empty() => node
                .with_style("background-image", format!("url(\"{}\")", src))
                .with_style("background-size", "cover"),
            _ => node,
        },
        _ => node.with_optional_style("background-color", str_prop(props, "backgroundColor")),
    };

    Ok(node.with_children(children))
}

fn container(props: &Props, children: Vec<VNode>) -> Result<VNode, ViewError> {
    Ok(VNode::element("div")
        .with_attr("class", "hearth-container")
        .with_style("margin", "0 auto")
        .with_optional_style("max-width", str_prop(props, "maxWidth"))
        .with_children(children))
}

fn flex_row(props: &Props, children: Vec<VNode>) -> Result<VNode, ViewError> {
    let raw = str_or(props, "ratio", "1:1");
    let ratio = parse_ratio(raw).ok_or_else(|| ViewError::InvalidProp {
        prop: "ratio".to_string(),
        message: format!("'{}' is not a ratio like 1:2", raw),
    })?;

    let children = children
        .into_iter()
        .enumerate()
        .map(|(index, child)| {
            // children beyond the declared ratio share the last weight
            let weight = ratio.get(index).or(ratio.last()).copied().unwrap_or(1);
            child.with_style("flex", format!("{} 1 0", weight))
        })
        .collect();

    Ok(VNode::element("div")
        .with_attr("class", "hearth-flex-row")
        .with_style("display", "flex")
        .with_optional_style("gap", str_prop(props, "gap"))
        .with_optional_style("align-items", str_prop(props, "align"))
        .with_children(children))
}

fn grid(props: &Props, children: Vec<VNode>) -> Result<VNode, ViewError> {
    let columns = num_prop(props, "columns").unwrap_or(3.0).clamp(1.0, 6.0) as u32;
    Ok(VNode::element("div")
        .with_attr("class", "hearth-grid")
        .with_style("display", "grid")
        .with_style("grid-template-columns", format!("repeat({}, minmax(0, 1fr))", columns))
        .with_optional_style("gap", str_prop(props, "gap"))
        .with_children(children))
}

fn card(props: &Props, children: Vec<VNode>) -> Result<VNode, ViewError> {
    let node = VNode::element("div")
        .with_attr("class", "hearth-card")
        .with_style("border-radius", "12px")
        .with_optional_style("padding", str_prop(props, "padding"));
    let node = if bool_prop(props, "shadow") {
        node.with_style("box-shadow", "0 2px 12px rgba(0, 0, 0, 0.08)")
    } else {
        node
    };
    Ok(node.with_children(children))
}

/// Parse "1:2:1" into positive integer weights
pub fn parse_ratio(raw: &str) -> Option<Vec<u32>> {
    let weights: Option<Vec<u32>> = raw
        .split(':')
        .map(|part| part.trim().parse::<u32>().ok().filter(|w| *w > 0))
        .collect();
    weights.filter(|w| !w.is_empty())
}

pub fn format_ratio(weights: &[u32]) -> String {
    weights
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_ratio() {
        assert_eq!(parse_ratio("1:2:1"), Some(vec![1, 2, 1]));
        assert_eq!(parse_ratio(" 3 : 1 "), Some(vec![3, 1]));
        assert_eq!(parse_ratio("1:0"), None);
        assert_eq!(parse_ratio("a:b"), None);
        assert_eq!(parse_ratio(""), None);
        assert_eq!(format_ratio(&[2, 1]), "2:1");
    }

    #[test]
    fn test_flex_row_applies_weights() {
        let mut props = Props::new();
        props.insert("ratio".into(), json!("2:1"));
        let node = flex_row(
            &props,
            vec![VNode::element("div"), VNode::element("div"), VNode::element("div")],
        )
        .unwrap();

        let flex: Vec<Option<&str>> = node.children().iter().map(|c| c.style("flex")).collect();
        assert_eq!(flex, vec![Some("2 1 0"), Some("1 1 0"), Some("1 1 0")]);
    }

    #[test]
    fn test_flex_row_rejects_bad_ratio() {
        let mut props = Props::new();
        props.insert("ratio".into(), json!("wide"));
        assert!(matches!(
            flex_row(&props, vec![]),
            Err(ViewError::InvalidProp { .. })
        ));
    }

    #[test]
    fn test_section_background_image() {
        let mut props = Props::new();
        props.insert("background".into(), json!("image"));
        props.insert("backgroundImage".into(), json!("/img/flour.jpg"));
        let node = section(&props, vec![]).unwrap();
        assert_eq!(node.style("background-image"), Some("url(\"/img/flour.jpg\")"));
        assert_eq!(node.style("background-color"), None);
    }
}
