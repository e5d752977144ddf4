//! rtlfix - Main Entry Point

mod edit;
mod fix_xml;
mod shape;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Fix Arabic text for renderers without right-to-left support
#[derive(Debug, Parser)]
#[command(name = "rtlfix", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Reshape one attribute of every XML file in a directory
    FixXml(fix_xml::FixXmlArgs),
    /// Reshape text given as an argument or on stdin
    Shape(shape::ShapeArgs),
    /// Line-oriented editor session
    Edit(edit::EditArgs),
}

fn main() -> Result<()> {
    // Initialize logging on stderr; stdout carries the reports
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("{:?}", cli.command);

    match cli.command {
        Command::FixXml(args) => fix_xml::run(args),
        Command::Shape(args) => shape::run(args),
        Command::Edit(args) => edit::run(args),
    }
}

/// Directory holding the running executable
fn program_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".")))
}
