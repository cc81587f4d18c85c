use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Page id or slug
    pub page: String,
}

/// Remove the local copy of a page; bundled defaults come back
pub async fn delete(args: DeleteArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let service = super::page_service(&config, cwd)?;
    let page = super::find_page(&service, &args.page).await?;

    if service.delete_page(&page.id).await? {
        println!("  {} Removed local copy of /{}", "✓".green(), page.slug);
        if let Some(bundled) = service.bundled().get(&page.id) {
            println!("    Bundled /{} is active again", bundled.slug);
        }
    } else {
        println!("{} /{} has no local copy", "⚠️".yellow(), page.slug);
    }
    Ok(())
}
