use crate::commands::write_page;
use crate::config::{Config, Target, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagecraft_editor::{DocumentStore, EditorConfig, TemplateLibrary};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Export format written to the config
    #[arg(short, long, value_enum, default_value = "html")]
    pub target: Target,

    /// Pages directory
    #[arg(short, long, default_value = "pages")]
    pub pages_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Pagecraft project...".bright_blue().bold()
    );

    let config = Config {
        pages_dir: args.pages_dir.clone(),
        emit: vec![args.target],
        editor: EditorConfig::with_session(project_name(cwd)),
        ..Config::default()
    };

    // Create pages directory if it doesn't exist
    let pages_dir = config.get_pages_dir(cwd);
    if !pages_dir.exists() {
        fs::create_dir_all(&pages_dir)?;
        println!("  {} Created {}/", "✓".green(), args.pages_dir);
    }

    // Create example page from the hero template
    let example_page = pages_dir.join("home.json");
    if !example_page.exists() {
        let library = TemplateLibrary::builtin()?;
        let mut store = DocumentStore::new(config.editor.clone());
        store.insert_template(library.require("hero-1")?)?;
        write_page(&example_page, store.tree())?;
        println!("  {} Created home.json", "✓".green());
    }

    // Write config file
    let config_json = serde_json::to_string_pretty(&config)?;
    fs::write(&config_path, config_json)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: pagecraft templates add features-1 {}/home.json", args.pages_dir);
    println!("  2. Run: pagecraft export");
    println!("  3. Check output in {}/", config.out_dir);

    Ok(())
}

/// Directory name of the project, used as the id session
fn project_name(cwd: &str) -> String {
    PathBuf::from(cwd)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("pagecraft")
        .to_string()
}
