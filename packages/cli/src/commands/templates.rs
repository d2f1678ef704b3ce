use crate::commands::{read_page, write_page};
use crate::config::Config;
use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use pagecraft_editor::{DocumentStore, TemplateLibrary};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    #[command(subcommand)]
    pub command: TemplatesCommand,

    /// Load templates from a JSON file instead of the built-in library
    #[arg(long, global = true)]
    pub library: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum TemplatesCommand {
    /// List available templates
    List {
        /// Only show templates in this category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Append a template to a page file (created if missing)
    Add {
        /// Template id
        template: String,

        /// Page file, relative to the current directory
        page: String,
    },
}

pub fn templates(args: TemplatesArgs, cwd: &str) -> Result<()> {
    let library = match &args.library {
        Some(path) => {
            let json = fs::read_to_string(PathBuf::from(cwd).join(path))?;
            TemplateLibrary::from_json(&json)?
        }
        None => TemplateLibrary::builtin()?,
    };

    match args.command {
        TemplatesCommand::List { category } => {
            list(&library, category.as_deref());
            Ok(())
        }
        TemplatesCommand::Add { template, page } => add(&library, &template, &page, cwd),
    }
}

fn list(library: &TemplateLibrary, category: Option<&str>) {
    for name in library.categories() {
        if category.is_some_and(|wanted| wanted != name) {
            continue;
        }
        println!("{}", name.bright_blue().bold());
        for template in library.iter().filter(|t| t.category == name) {
            println!(
                "  {} {}",
                template.id.bright_white(),
                template.name.dimmed()
            );
        }
    }
}

fn add(library: &TemplateLibrary, template_id: &str, page: &str, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let template = library.require(template_id)?;
    let path = PathBuf::from(cwd).join(page);

    let mut store = DocumentStore::with_tree(read_page(&path)?, config.editor);
    let inserted = store.insert_template(template)?;
    write_page(&path, store.tree())?;

    println!(
        "  {} Added {} to {} ({} elements)",
        "✓".green(),
        template.name.bright_white(),
        page,
        inserted.len()
    );
    Ok(())
}
