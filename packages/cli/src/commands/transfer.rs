use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use hearth_components::bakery_registry;
use hearth_document::UuidGenerator;
use hearth_editor::validate_page;
use hearth_persistence::{export_page_as_json, import_page_from_json, PersistenceError};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Page id or slug
    pub page: String,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct ImportArgs {
    /// Exported page JSON file
    pub file: PathBuf,

    /// Replace the slug from the file
    #[arg(long)]
    pub slug: Option<String>,
}

pub async fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let service = super::page_service(&config, cwd)?;
    let page = super::find_page(&service, &args.page).await?;
    let json = export_page_as_json(&page)?;

    match args.out {
        Some(path) => {
            let path = PathBuf::from(cwd).join(path);
            fs::write(&path, json)?;
            println!("  {} /{} → {}", "✓".green(), page.slug, path.display());
        }
        None => println!("{}", json),
    }
    Ok(())
}

pub async fn import(args: ImportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let service = super::page_service(&config, cwd)?;
    let json = fs::read_to_string(PathBuf::from(cwd).join(&args.file))?;

    let mut page = match import_page_from_json(&json, &mut UuidGenerator) {
        Ok(page) => page,
        Err(PersistenceError::Import(issues)) => {
            for issue in &issues {
                eprintln!("  {} {}", "✗".red(), issue.to_string().red());
            }
            return Err(anyhow!("{} could not be imported", args.file.display()));
        }
        Err(e) => return Err(e.into()),
    };
    if let Some(slug) = args.slug {
        page.slug = slug;
    }

    let errors = validate_page(&bakery_registry(), &page);
    for error in &errors {
        println!("  {} {}", "⚠️".yellow(), error.to_string().yellow());
    }

    let saved = service.save_page(&page, false).await?;
    println!(
        "  {} Imported /{} as {}",
        "✓".green(),
        saved.slug,
        saved.id.bright_white()
    );
    Ok(())
}
