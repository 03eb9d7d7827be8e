//! pdfdoc CLI tool
//!
//! A command-line inspector for PDF documents: format version, page count,
//! page mode, Info metadata and the bookmark outline.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process;

use pdfdoc::{Document, Outline};

/// pdfdoc - Inspect PDF documents
#[derive(Parser)]
#[command(name = "pdfdoc")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Show metadata
    pdfdoc info report.pdf

    # Show metadata of an encrypted document
    pdfdoc info --password secret report.pdf

    # Print the bookmark tree
    pdfdoc outline book.pdf")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show document metadata (version, page count, page mode, Info entries)
    Info {
        /// Input PDF file
        input: PathBuf,

        /// Password for encrypted documents
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Print the bookmark outline tree
    Outline {
        /// Input PDF file
        input: PathBuf,

        /// Password for encrypted documents
        #[arg(short, long)]
        password: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Info { input, password } => {
            let doc = open_document(&input, password.as_deref())?;
            println!("Version:   PDF {}", doc.pdf_version());
            println!("Pages:     {}", doc.page_count());
            println!("Page mode: {:?}", doc.page_mode());
            for key in doc.info_keys() {
                println!("{key}: {}", doc.info_value(&key));
            }
        }
        Commands::Outline { input, password } => {
            let doc = open_document(&input, password.as_deref())?;
            match doc.outline() {
                Some(root) => print_outline(&root.children, 0),
                None => println!("(no outline)"),
            }
        }
    }
    Ok(())
}

fn open_document(path: &Path, password: Option<&str>) -> anyhow::Result<Document> {
    let mut doc = Document::new();
    doc.open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    if doc.is_locked() {
        let password = password.context("document is encrypted; pass --password")?;
        doc.unlock(password).context("failed to unlock document")?;
    }
    Ok(doc)
}

fn print_outline(items: &[Outline], depth: usize) {
    for item in items {
        let title = item.title.as_deref().unwrap_or("(untitled)");
        match &item.link {
            Some(link) => println!("{:indent$}{title} -> {link}", "", indent = depth * 2),
            None => println!("{:indent$}{title}", "", indent = depth * 2),
        }
        print_outline(&item.children, depth + 1);
    }
}
