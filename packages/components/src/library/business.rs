use super::{array_prop, bool_prop, num_prop, str_or};
use crate::registry::{Category, RegistryEntry, ViewError};
use crate::schema::PropDefinition;
use crate::vdom::VNode;
use hearth_document::Props;
use serde_json::{json, Value};

// Catalog data lives in the storefront; these components render mount points
// carrying their configuration for the storefront to hydrate.

pub(super) fn entries() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry::new("ProductGrid", Category::Business, product_grid)
            .display_name("Product grid")
            .icon("shopping-bag")
            .description("Products from the catalog, filtered by category")
            .prop(
                "category",
                PropDefinition::select(
                    "Category",
                    &[
                        ("All", "all"),
                        ("Bread", "bread"),
                        ("Pastry", "pastry"),
                        ("Cakes", "cake"),
                    ],
                )
                .with_default("all"),
            )
            .prop(
                "limit",
                PropDefinition::number("Products shown")
                    .with_default(8)
                    .range(1.0, 24.0)
                    .step(1.0),
            )
            .prop("showPrices", PropDefinition::boolean("Show prices").with_default(true)),
        RegistryEntry::new("Testimonials", Category::Business, testimonials)
            .icon("message-circle")
            .description("Customer quotes")
            .prop(
                "limit",
                PropDefinition::number("Quotes shown")
                    .with_default(3)
                    .range(1.0, 12.0)
                    .step(1.0),
            )
            .prop(
                "layout",
                PropDefinition::select("Layout", &[("Grid", "grid"), ("Carousel", "carousel")])
                    .with_default("grid"),
            ),
        RegistryEntry::new("OpeningHours", Category::Business, opening_hours)
            .display_name("Opening hours")
            .icon("clock")
            .prop(
                "hours",
                PropDefinition::array("Hours").with_default(json!([
                    { "day": "Mon-Fri", "open": "07:00", "close": "18:00" },
                    { "day": "Sat", "open": "08:00", "close": "14:00" }
                ])),
            )
            .prop("note", PropDefinition::string("Note").with_default("")),
    ]
}

fn product_grid(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    let limit = num_prop(props, "limit").unwrap_or(8.0);
    if limit < 1.0 {
        return Err(ViewError::InvalidProp {
            prop: "limit".to_string(),
            message: "must be at least 1".to_string(),
        });
    }

    Ok(VNode::element("div")
        .with_attr("class", "hearth-product-grid")
        .with_attr("data-category", str_or(props, "category", "all"))
        .with_attr("data-limit", (limit as u32).to_string())
        .with_attr("data-show-prices", bool_prop(props, "showPrices").to_string()))
}

fn testimonials(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    let limit = num_prop(props, "limit").unwrap_or(3.0).max(1.0) as u32;
    Ok(VNode::element("div")
        .with_attr("class", "hearth-testimonials")
        .with_attr("data-layout", str_or(props, "layout", "grid"))
        .with_attr("data-limit", limit.to_string()))
}

fn opening_hours(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    let mut table = VNode::element("table").with_attr("class", "hearth-opening-hours");

    for (index, row) in array_prop(props, "hours").iter().enumerate() {
        let field = |key: &str| -> Result<String, ViewError> {
            row.get(key)
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or_else(|| ViewError::InvalidProp {
                    prop: format!("hours[{}].{}", index, key),
                    message: "missing".to_string(),
                })
        };
        let (day, open, close) = (field("day")?, field("open")?, field("close")?);
        table = table.with_child(
            VNode::element("tr")
                .with_child(VNode::element("th").with_child(VNode::text(day)))
                .with_child(
                    VNode::element("td").with_child(VNode::text(format!("{} - {}", open, close))),
                ),
        );
    }

    let mut node = VNode::element("div").with_child(table);
    let note = str_or(props, "note", "");
    if !note.is_empty() {
        node = node.with_child(VNode::element("p").with_child(VNode::text(note)));
    }
    Ok(node)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_grid_mount_point() {
        let mut props = Props::new();
        props.insert("category".into(), json!("bread"));
        props.insert("limit".into(), json!(4));
        let node = product_grid(&props, vec![]).unwrap();

        assert_eq!(node.attr("data-category"), Some("bread"));
        assert_eq!(node.attr("data-limit"), Some("4"));
        assert_eq!(node.attr("data-show-prices"), Some("false"));
    }

    #[test]
    fn test_opening_hours_missing_field() {
        let mut props = Props::new();
        props.insert("hours".into(), json!([{ "day": "Sun" }]));
        let err = opening_hours(&props, vec![]).unwrap_err();
        assert!(err.to_string().contains("hours[0].open"));
    }
}
