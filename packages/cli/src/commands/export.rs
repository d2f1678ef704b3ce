use crate::commands::read_page;
use crate::config::{Config, Target};
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use pagecraft_compiler_html::{
    compile_to_document, compile_to_markup, CompileOptions as HtmlOptions,
};
use pagecraft_compiler_react::{compile_to_react, component_name, CompileOptions as ReactOptions};
use pagecraft_editor::ElementTree;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Page file or directory to export (defaults to the configured pages directory)
    pub path: Option<String>,

    /// Target format (overrides config)
    #[arg(short, long, value_enum)]
    pub target: Option<Target>,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Output directory (overrides config)
    #[arg(short, long)]
    pub out_dir: Option<String>,

    /// Emit TypeScript (.tsx) for the react target
    #[arg(long)]
    pub typescript: bool,

    /// Compact HTML without indentation
    #[arg(long)]
    pub compact: bool,
}

/// One file produced by an export
#[derive(Debug, PartialEq)]
pub struct Output {
    pub file_name: String,
    pub contents: String,
}

pub fn export(args: ExportArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let source = match &args.path {
        Some(path) => PathBuf::from(cwd).join(path),
        None => config.get_pages_dir(cwd),
    };

    if !source.exists() {
        return Err(anyhow!("Page path does not exist: {:?}", source));
    }

    println!("{}", "🔨 Exporting pages...".bright_blue().bold());

    let (root, pages) = if source.is_file() {
        let root = source.parent().map(Path::to_path_buf).unwrap_or_default();
        (root, vec![source.clone()])
    } else {
        (source.clone(), find_page_files(&source))
    };

    if pages.is_empty() {
        println!("{}", "⚠️  No page files found".yellow());
        return Ok(());
    }

    println!("Found {} pages", pages.len());

    let targets = match args.target {
        Some(target) => vec![target],
        None => config.emit.clone(),
    };
    let out_dir = match &args.out_dir {
        Some(out) => PathBuf::from(cwd).join(out),
        None => config.get_out_dir(cwd),
    };

    let mut success_count = 0;
    let mut error_count = 0;

    for page in &pages {
        let relative_path = page.strip_prefix(&root).unwrap_or(page);
        match export_page(page, relative_path, &targets, &args, &config, &out_dir) {
            Ok(written) => {
                success_count += 1;
                for output in written {
                    println!(
                        "  {} {} → {}",
                        "✓".green(),
                        relative_path.display(),
                        output
                    );
                }
            }
            Err(e) => {
                error_count += 1;
                eprintln!(
                    "  {} {} - {}",
                    "✗".red(),
                    relative_path.display(),
                    e.to_string().red()
                );
            }
        }
    }

    println!();
    if error_count == 0 {
        println!(
            "{} Exported {} pages successfully",
            "✅".green(),
            success_count
        );
    } else {
        println!(
            "{} Exported {} pages, {} errors",
            "⚠️".yellow(),
            success_count,
            error_count
        );
    }

    Ok(())
}

fn find_page_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
        .collect();
    files.sort();
    files
}

fn export_page(
    page: &Path,
    relative_path: &Path,
    targets: &[Target],
    args: &ExportArgs,
    config: &Config,
    out_dir: &Path,
) -> Result<Vec<String>> {
    let tree = read_page(page)?;
    let stem = relative_path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("Page file has no name: {}", page.display()))?;

    let mut written = Vec::new();
    for target in targets {
        for output in render(&tree, stem, *target, args, config) {
            if args.stdout {
                println!("{}", output.contents);
                written.push("stdout".to_string());
                continue;
            }

            let output_file = match relative_path.parent() {
                Some(parent) => out_dir.join(parent).join(&output.file_name),
                None => out_dir.join(&output.file_name),
            };
            if let Some(parent) = output_file.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&output_file, output.contents)?;
            tracing::debug!(page = %page.display(), file = %output_file.display(), "Wrote export");
            written.push(output_file.display().to_string());
        }
    }

    Ok(written)
}

/// Compile one page for one target
pub fn render(
    tree: &ElementTree,
    stem: &str,
    target: Target,
    args: &ExportArgs,
    config: &Config,
) -> Vec<Output> {
    let html_options = HtmlOptions {
        pretty: !args.compact,
        title: config.title.clone(),
        ..HtmlOptions::default()
    };

    match target {
        Target::Html => {
            let document = compile_to_document(tree, &html_options);
            vec![
                Output {
                    file_name: format!("{}.html", stem),
                    contents: document.html,
                },
                Output {
                    file_name: format!("{}.css", stem),
                    contents: document.styles,
                },
            ]
        }
        Target::Markup => vec![Output {
            file_name: format!("{}.fragment.html", stem),
            contents: compile_to_markup(tree, &html_options),
        }],
        Target::React => {
            let name = component_name(stem);
            let extension = if args.typescript { "tsx" } else { "jsx" };
            let options = ReactOptions {
                component_name: name.clone(),
                use_typescript: args.typescript,
                ..ReactOptions::default()
            };
            vec![Output {
                file_name: format!("{}.{}", name, extension),
                contents: compile_to_react(tree, &options),
            }]
        }
    }
}
