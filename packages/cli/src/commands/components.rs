use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use hearth_components::{bakery_registry, Category, RegistryEntry};

#[derive(Debug, Args)]
pub struct ComponentsArgs {
    /// Only show one category (layout, content, navigation, ...)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Show prop schemas
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn components(args: ComponentsArgs, _cwd: &str) -> Result<()> {
    let registry = bakery_registry();

    let categories = match &args.category {
        Some(name) => vec![parse_category(name)?],
        None => registry.get_categories(),
    };

    println!("{}", "🧁 Component library".bright_blue().bold());
    for category in categories {
        let entries = registry.get_by_category(category);
        if entries.is_empty() {
            continue;
        }
        println!();
        println!("{}", category.label().bold());
        for entry in entries {
            print_entry(entry, args.verbose);
        }
    }
    Ok(())
}

fn parse_category(name: &str) -> Result<Category> {
    Category::ALL
        .iter()
        .copied()
        .find(|c| c.label().eq_ignore_ascii_case(name))
        .ok_or_else(|| anyhow!("Unknown category: {}", name))
}

fn print_entry(entry: &RegistryEntry, verbose: bool) {
    let mut flags = Vec::new();
    if entry.is_modifier {
        flags.push("modifier");
    } else if entry.accepts_children {
        flags.push("container");
    }
    println!(
        "  {} {} {}",
        entry.component_type.cyan(),
        entry.description.dimmed(),
        flags.join(",").yellow()
    );

    if verbose {
        for (name, definition) in &entry.props_schema {
            println!(
                "      {}: {:?}{}",
                name,
                definition.kind,
                if definition.required { " (required)" } else { "" }
            );
        }
    }
}
