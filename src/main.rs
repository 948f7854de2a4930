use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

mod bookmark;
mod dedupe;
mod error;
mod merge;
mod netscape;
mod options;
mod progress;
mod report;
mod ui;

use merge::MergeEngine;
use options::{MergeOptions, DEFAULT_DOCUMENT_TITLE};
use ui::{MergerApp, NativeDialogs};

#[derive(Parser)]
#[command(name = "bookmark-merger")]
#[command(about = "Merge Netscape bookmark HTML exports into one deduplicated file", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbose output (log every skipped duplicate)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick files with native dialogs (default when no command is given)
    Gui {
        /// Files to preselect
        #[arg(value_name = "FILE")]
        files: Vec<PathBuf>,
    },

    /// Merge bookmark files without any dialogs
    Merge {
        /// Bookmark HTML files, merged in the order given
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Where to write the merged bookmark file
        #[arg(short, long)]
        output: PathBuf,

        /// Keep bookmarks whose URL was already seen
        #[arg(long)]
        keep_duplicates: bool,

        /// Dry run - show what would be merged without writing anything
        #[arg(short, long)]
        dry_run: bool,

        /// Title of the generated bookmark file
        #[arg(long, default_value = DEFAULT_DOCUMENT_TITLE)]
        title: String,

        /// Also write the merge report as JSON
        #[arg(long, value_name = "JSON")]
        report: Option<PathBuf>,
    },

    /// Show the bookmarks found in one export file
    List {
        /// Bookmark HTML file
        file: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so `list --json` stays pipeable
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Gui { files: Vec::new() }) {
        Commands::Gui { files } => {
            info!("🪟 Starting bookmark merger");
            let mut app = MergerApp::new(NativeDialogs::new(), MergeOptions::default()).with_files(files);
            app.run();
        }

        Commands::Merge { files, output, keep_duplicates, dry_run, title, report } => {
            let options = MergeOptions {
                deduplicate: !keep_duplicates,
                dry_run,
                document_title: title,
            };
            options.validate(&files, &output)?;

            info!("🔀 Merging {} files into {:?}", files.len(), output);
            let merge_report = MergeEngine::new(options)
                .with_progress(true)
                .run(&files, &output)?;
            println!("{}", merge_report.format(cli.verbose));

            if let Some(path) = report {
                let json = serde_json::to_string_pretty(&merge_report)?;
                fs::write(&path, json).with_context(|| format!("Failed to write report {:?}", path))?;
                info!("📝 Report written to {:?}", path);
            }
        }

        Commands::List { file, json } => {
            let bookmarks = netscape::parse_file(&file)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&bookmarks)?);
            } else {
                println!("\n🔖 {} bookmarks in {}", bookmarks.len(), file.display());
                println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
                for bookmark in &bookmarks {
                    let added = bookmark
                        .added_at()
                        .map(|d| d.format("%Y-%m-%d").to_string())
                        .unwrap_or_else(|| "----------".to_string());
                    println!("  {}  {}", added, bookmark.title);
                    println!("              {}", bookmark.url);
                }
                println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
            }
        }
    }

    Ok(())
}
