use crate::config::Config;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use hearth_components::bakery_registry;
use hearth_document::PageDocument;
use hearth_editor::validate_page;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Page id or slug; every page when omitted
    pub page: Option<String>,

    /// Validate page JSON files under a file or directory instead
    #[arg(short, long, conflicts_with = "page")]
    pub path: Option<PathBuf>,
}

pub async fn validate(args: ValidateArgs, cwd: &str) -> Result<()> {
    println!("🔍 {} pages", "Validating".green().bold());

    let pages = match (&args.path, &args.page) {
        (Some(path), _) => load_files(&PathBuf::from(cwd).join(path))?,
        (None, Some(key)) => {
            let config = Config::load(cwd)?;
            let service = super::page_service(&config, cwd)?;
            vec![super::find_page(&service, key).await?]
        }
        (None, None) => {
            let config = Config::load(cwd)?;
            super::page_service(&config, cwd)?.get_all_pages().await?
        }
    };

    let registry = bakery_registry();
    let mut total_errors = 0;
    for page in &pages {
        let errors = validate_page(&registry, page);
        if errors.is_empty() {
            println!("  {} /{}", "✓".green(), page.slug);
            continue;
        }
        total_errors += errors.len();
        println!("  {} /{}", "✗".red(), page.slug);
        for error in errors {
            println!(
                "      {} {}: {}",
                error.component_id.dimmed(),
                error.field.cyan(),
                error.message.red()
            );
        }
    }

    println!();
    if total_errors > 0 {
        return Err(anyhow!(
            "{} validation error(s) in {} page(s)",
            total_errors,
            pages.len()
        ));
    }
    println!("{} {} page(s) valid", "✅".green(), pages.len());
    Ok(())
}

fn load_files(input: &Path) -> Result<Vec<PageDocument>> {
    let files: Vec<PathBuf> = if input.is_file() {
        vec![input.to_path_buf()]
    } else if input.is_dir() {
        WalkDir::new(input)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .map(|e| e.into_path())
            .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect()
    } else {
        return Err(anyhow!("Input path does not exist: {}", input.display()));
    };

    files
        .iter()
        .map(|file| {
            let content = fs::read_to_string(file)?;
            serde_json::from_str(&content)
                .map_err(|e| anyhow!("{}: {}", file.display(), e))
        })
        .collect()
}
