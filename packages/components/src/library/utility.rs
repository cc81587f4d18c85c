use super::{bool_prop, num_prop, str_or, str_prop};
use crate::registry::{Category, RegistryEntry, ViewError};
use crate::schema::PropDefinition;
use crate::vdom::VNode;
use hearth_document::Props;

pub(super) fn entries() -> Vec<RegistryEntry> {
    vec![
        RegistryEntry::new("Spacer", Category::Utility, spacer)
            .icon("move-vertical")
            .description("Empty vertical space")
            .prop("height", PropDefinition::dimension("Height").with_default("2rem")),
        RegistryEntry::new("Divider", Category::Utility, divider)
            .icon("minus")
            .prop("color", PropDefinition::color("Color").with_default("#e5d5c5"))
            .prop(
                "thickness",
                PropDefinition::number("Thickness")
                    .with_default(1)
                    .range(1.0, 8.0)
                    .step(1.0),
            ),
        RegistryEntry::new("Animate", Category::Utility, animate)
            .icon("sparkles")
            .description("Animates the wrapped component when it scrolls into view")
            .modifier()
            .prop(
                "animation",
                PropDefinition::select(
                    "Animation",
                    &[("Fade", "fade"), ("Slide up", "slide-up"), ("Zoom", "zoom")],
                )
                .with_default("fade"),
            )
            .prop(
                "duration",
                PropDefinition::number("Duration (ms)")
                    .with_default(600)
                    .range(100.0, 5000.0)
                    .step(50.0),
            ),
        RegistryEntry::new("LinkWrapper", Category::Utility, link_wrapper)
            .display_name("Link")
            .icon("link")
            .description("Makes the wrapped component clickable")
            .modifier()
            .prop("href", PropDefinition::string("Link").with_default("/").required())
            .prop("newTab", PropDefinition::boolean("Open in new tab").with_default(false)),
    ]
}

fn spacer(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    Ok(VNode::element("div")
        .with_attr("class", "hearth-spacer")
        .with_attr("aria-hidden", "true")
        .with_optional_style("height", str_prop(props, "height")))
}

fn divider(props: &Props, _children: Vec<VNode>) -> Result<VNode, ViewError> {
    let thickness = num_prop(props, "thickness").unwrap_or(1.0).max(1.0) as u32;
    Ok(VNode::element("hr")
        .with_attr("class", "hearth-divider")
        .with_style("border", "none")
        .with_style(
            "border-top",
            format!("{}px solid {}", thickness, str_or(props, "color", "currentColor")),
        ))
}

fn animate(props: &Props, children: Vec<VNode>) -> Result<VNode, ViewError> {
    let duration = num_prop(props, "duration").unwrap_or(600.0).max(0.0) as u32;
    Ok(VNode::element("div")
        .with_attr("class", "hearth-animate")
        .with_attr("data-animation", str_or(props, "animation", "fade"))
        .with_style("animation-duration", format!("{}ms", duration))
        .with_children(children))
}

fn link_wrapper(props: &Props, children: Vec<VNode>) -> Result<VNode, ViewError> {
    let node = VNode::element("a")
        .with_attr("class", "hearth-link-wrapper")
        .with_attr("href", str_or(props, "href", "#"))
        .with_style("display", "block");
    let node = if bool_prop(props, "newTab") {
        node.with_attr("target", "_blank").with_attr("rel", "noopener")
    } else {
        node
    };
    Ok(node.with_children(children))
}
