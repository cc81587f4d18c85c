use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use hearth_persistence::OverrideStore;
use serde::Serialize;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PageSummary {
    id: String,
    slug: String,
    title: String,
    version: u64,
    components: usize,
    local: bool,
}

pub async fn list(args: ListArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let service = super::page_service(&config, cwd)?;

    let mut summaries = Vec::new();
    for page in service.get_all_pages().await? {
        summaries.push(PageSummary {
            local: service.store().load(&page.id)?.is_some(),
            components: page.component_count(),
            id: page.id,
            slug: page.slug,
            title: page.metadata.title,
            version: page.version,
        });
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    if summaries.is_empty() {
        println!("{}", "⚠️  No pages found".yellow());
        return Ok(());
    }

    println!("{}", "📄 Pages".bright_blue().bold());
    for page in &summaries {
        println!(
            "  {} {} {} {}{}",
            format!("/{}", page.slug).cyan(),
            page.title.bright_white(),
            format!("v{}", page.version).dimmed(),
            format!("{} components", page.components).dimmed(),
            if page.local {
                format!(" {}", "(local)".yellow())
            } else {
                String::new()
            }
        );
    }
    Ok(())
}
