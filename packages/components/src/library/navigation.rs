use super::{array_prop, str_or};
use crate::registry::{Category, RegistryEntry, ViewError};
use crate::schema::PropDefinition;
use crate::vdom::VNode;
use hearth_document::Props;
use serde_json::{json, Value};

pub(super) fn entries() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry::new("NavLinks", Category::Navigation, nav_links)
            .display_name("Navigation links")
            .icon("menu")
            .description("Row or column of links")
            .prop(
                "links",
                PropDefinition::array("Links").with_default(json!([
                    { "label": "Breads", "href": "/products" },
                    { "label": "Contact", "href": "/contact" }
                ])),
            )
            .prop(
                "orientation",
                PropDefinition::select(
                    "Orientation",
                    &[("Horizontal", "horizontal"), ("Vertical", "vertical")],
                )
                .with_default("horizontal"),
            ),
        RegistryEntry::new("Breadcrumbs", Category::Navigation, breadcrumbs)
            .icon("chevrons-right")
            .description("Trail of parent pages")
            .prop(
                "items",
                PropDefinition::array("Items").with_default(json!([
                    { "label": "Home", "href": "/" }
                ])),
            )
            .prop("separator", PropDefinition::string("Separator").with_default("/")),
    ]
}

fn link_parts(item: &Value, index: usize) -> Result<(&str, &str), ViewError> {
    let label = item.get("label").and_then(Value::as_str);
    let href = item.get("href").and_then(Value::as_str);
    match (label, href) {
        (Some(label), Some(href)) => Ok((label, href)),
        _ => Err(ViewError::InvalidProp {
            prop: format!("links[{}]", index),
            message: "each link needs a label and an href".to_string(),
        }),
    }
}

fn nav_links(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    let direction = match str_or(props, "orientation", "horizontal") {
        "vertical" => "column",
        _ => "row",
    };

    let mut list = VNode::element("ul")
        .with_attr("class", "hearth-nav-links")
        .with_style("display", "flex")
        .with_style("flex-direction", direction)
        .with_style("gap", "1rem")
        .with_style("list-style", "none");

    for (index, item) in array_prop(props, "links").iter().enumerate() {
        let (label, href) = link_parts(item, index)?;
        list = list.with_child(
            VNode::element("li").with_child(
                VNode::element("a")
                    .with_attr("href", href)
                    .with_child(VNode::text(label)),
            ),
        );
    }

    Ok(VNode::element("nav").with_child(list))
}

fn breadcrumbs(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    let separator = str_or(props, "separator", "/");
    let items = array_prop(props, "items");
    let mut nav = VNode::element("nav")
        .with_attr("class", "hearth-breadcrumbs")
        .with_attr("aria-label", "Breadcrumb");

    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            nav = nav.with_child(
                VNode::element("span")
                    .with_attr("class", "hearth-breadcrumbs-separator")
                    .with_child(VNode::text(separator)),
            );
        }
        let (label, href) = link_parts(item, index)?;
        nav = nav.with_child(
            VNode::element("a")
                .with_attr("href", href)
                .with_child(VNode::text(label)),
        );
    }

    Ok(nav)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_links_render_items() {
        let mut props = Props::new();
        props.insert(
            "links".into(),
            json!([{ "label": "Cakes", "href": "/cakes" }, { "label": "Bread", "href": "/bread" }]),
        );
        let node = nav_links(&props, vec![]).unwrap();
        assert_eq!(node.text_content(), "CakesBread");
    }

    #[test]
    fn test_nav_links_reject_malformed_item() {
        let mut props = Props::new();
        props.insert("links".into(), json!([{ "label": "No href" }]));
        let err = nav_links(&props, vec![]).unwrap_err();
        assert!(err.to_string().contains("links[0]"));
    }

    #[test]
    fn test_breadcrumbs_separators() {
        let mut props = Props::new();
        props.insert(
            "items".into(),
            json!([{ "label": "Home", "href": "/" }, { "label": "Cakes", "href": "/cakes" }]),
        );
        props.insert("separator".into(), json!(">"));
        let node = breadcrumbs(&props, vec![]).unwrap();
        assert_eq!(node.text_content(), "Home>Cakes");
    }
}
