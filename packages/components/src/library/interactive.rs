use super::{array_prop, bool_prop, str_or};
use crate::registry::{Category, RegistryEntry, ViewError};
use crate::schema::PropDefinition;
use crate::vdom::VNode;
use hearth_document::Props;
use serde_json::json;

pub(super) fn entries() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry::new("Button", Category::Interactive, button)
            .icon("mouse-pointer")
            .description("Link styled as a button")
            .prop(
                "label",
                PropDefinition::string("Label").with_default("Order now").required(),
            )
            .prop("href", PropDefinition::string("Link").with_default("/order"))
            .prop(
                "variant",
                PropDefinition::select(
                    "Style",
                    &[("Primary", "primary"), ("Secondary", "secondary"), ("Outline", "outline")],
                )
                .with_default("primary"),
            ),
        RegistryEntry::new("Accordion", Category::Interactive, accordion)
            .icon("list")
            .description("Collapsible questions and answers")
            .allow_children(&["AccordionItem"]),
        RegistryEntry::new("AccordionItem", Category::Interactive, accordion_item)
            .display_name("Accordion item")
            .icon("chevron-down")
            .container()
            .prop(
                "title",
                PropDefinition::string("Question")
                    .with_default("Do you bake gluten-free?")
                    .required(),
            )
            .prop("open", PropDefinition::boolean("Open by default").with_default(false)),
        RegistryEntry::new("ContactForm", Category::Form, contact_form)
            .display_name("Contact form")
            .icon("mail")
            .description("Name, email and message form")
            .prop("title", PropDefinition::string("Title").with_default("Get in touch"))
            .prop(
                "fields",
                PropDefinition::array("Fields").with_default(json!(["name", "email", "message"])),
            )
            .prop(
                "submitLabel",
                PropDefinition::string("Submit label").with_default("Send").required(),
            )
            .prop(
                "successMessage",
                PropDefinition::string("Success message")
                    .with_default("Thanks! We will reply within a day."),
            ),
    ]
}

fn button(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    let variant = str_or(props, "variant", "primary");
    Ok(VNode::element("a")
        .with_attr("class", format!("hearth-button hearth-button-{}", variant))
        .with_attr("href", str_or(props, "href", "#"))
        .with_child(VNode::text(str_or(props, "label", ""))))
}

fn accordion(_props: &Props, children: Vec<VNode>) -> Result<VNode, ViewError> {
    Ok(VNode::element("div")
        .with_attr("class", "hearth-accordion")
        .with_children(children))
}

fn accordion_item(props: &Props, children: Vec<VNode>) -> Result<VNode, ViewError> {
    let node = VNode::element("details").with_attr("class", "hearth-accordion-item");
    let node = if bool_prop(props, "open") {
        node.with_attr("open", "")
    } else {
        node
    };
    Ok(node
        .with_child(VNode::element("summary").with_child(VNode::text(str_or(props, "title", ""))))
        .with_children(children))
}

fn contact_form(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    let mut form = VNode::element("form")
        .with_attr("class", "hearth-contact-form")
        .with_attr("method", "post")
        .with_attr("data-success-message", str_or(props, "successMessage", ""))
        .with_child(VNode::element("h3").with_child(VNode::text(str_or(props, "title", ""))));

    for (index, field) in array_prop(props, "fields").iter().enumerate() {
        let name = field.as_str().ok_or_else(|| ViewError::InvalidProp {
            prop: format!("fields[{}]", index),
            message: "field names must be strings".to_string(),
        })?;
        form = form.with_child(contact_field(name)?);
    }

    Ok(form.with_child(
        VNode::element("button")
            .with_attr("type", "submit")
            .with_child(VNode::text(str_or(props, "submitLabel", "Send"))),
    ))
}

fn contact_field(name: &str) -> Result<VNode, ViewError> {
    let (label, input) = match name {
        "name" => ("Name", VNode::element("input").with_attr("type", "text")),
        "email" => ("Email", VNode::element("input").with_attr("type", "email")),
        "phone" => ("Phone", VNode::element("input").with_attr("type", "tel")),
        "message" => ("Message", VNode::element("textarea").with_attr("rows", "5")),
        other => {
            return Err(ViewError::InvalidProp {
                prop: "fields".to_string(),
                message: format!("unknown field '{}'", other),
            })
        }
    };

    Ok(VNode::element("label")
        .with_child(VNode::text(label))
        .with_child(input.with_attr("name", name).with_attr("required", "")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_variant_class() {
        let mut props = Props::new();
        props.insert("label".into(), json!("Buy"));
        props.insert("variant".into(), json!("outline"));
        let node = button(&props, vec![]).unwrap();
        assert_eq!(node.attr("class"), Some("hearth-button hearth-button-outline"));
    }

    #[test]
    fn test_contact_form_unknown_field() {
        let mut props = Props::new();
        props.insert("fields".into(), json!(["name", "fax"]));
        assert!(contact_form(&props, vec![]).is_err());
    }

    #[test]
    fn test_accordion_item_open() {
        let mut props = Props::new();
        props.insert("title".into(), json!("Q"));
        props.insert("open".into(), json!(true));
        let node = accordion_item(&props, vec![VNode::text("A")]).unwrap();
        assert_eq!(node.attr("open"), Some(""));
        assert_eq!(node.text_content(), "QA");
    }
}
