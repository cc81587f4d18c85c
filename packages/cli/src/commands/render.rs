use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use hearth_components::bakery_registry;
use hearth_renderer::{render_document_html, HtmlOptions, Overlay, RenderMode, Renderer};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Page id or slug
    pub page: String,

    /// Include editing frames and drop affordances
    #[arg(long)]
    pub editing: bool,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Single-line output (overrides config)
    #[arg(long)]
    pub compact: bool,
}

pub async fn render(args: RenderArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let service = super::page_service(&config, cwd)?;
    let page = super::find_page(&service, &args.page).await?;

    let registry = bakery_registry();
    let mode = if args.editing {
        RenderMode::Editing(Overlay::default())
    } else {
        RenderMode::Preview
    };
    let rendered = Renderer::new(&registry, mode).render_page(&page);

    for error in &rendered.errors {
        eprintln!("  {} {}", "⚠️".yellow(), error.to_string().yellow());
    }

    let options = if args.compact {
        HtmlOptions {
            pretty: false,
            ..config.html_options()
        }
    } else {
        config.html_options()
    };
    let html = render_document_html(&page, &rendered, &options);

    match args.out {
        Some(path) => {
            let path = PathBuf::from(cwd).join(path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, html)?;
            println!(
                "  {} /{} → {}",
                "✓".green(),
                page.slug,
                path.display()
            );
        }
        None => println!("{}", html),
    }
    Ok(())
}
