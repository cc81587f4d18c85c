//! # Hearth Renderer
//!
//! Turns a [`PageDocument`](hearth_document::PageDocument) into virtual DOM
//! nodes using the component registry, either as visitors see it
//! ([`RenderMode::Preview`]) or framed with editing affordances
//! ([`RenderMode::Editing`]).
//!
//! A component that fails to render never fails the page: it is replaced by
//! an error placeholder and reported in [`RenderedPage::errors`].

mod html;
mod renderer;
pub mod spacing;

pub use html::{render_document_html, to_html, HtmlOptions};
pub use renderer::{Overlay, RenderError, RenderMode, RenderedPage, Renderer};
