//! `shape` subcommand

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Args;
use rtlfix_editor::{ClipboardSink, SystemClipboard};
use rtlfix_text::{JoinPolicy, LineProcessor, ShapingOptions, ShapingService};

#[derive(Debug, Args)]
pub struct ShapeArgs {
    /// Text to reshape (read from stdin when omitted)
    pub text: Option<String>,

    /// Remove harakat
    #[arg(long)]
    pub delete_harakat: bool,

    /// Keep line breaks between processed lines
    #[arg(long)]
    pub newline: bool,

    /// Also copy the result to the clipboard
    #[arg(long)]
    pub copy: bool,
}

pub fn run(args: ShapeArgs) -> Result<()> {
    let text = match args.text {
        Some(text) => text,
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            text
        }
    };

    let output = shape(&text, args.delete_harakat, args.newline)?;
    println!("{output}");

    if args.copy {
        SystemClipboard::new()
            .write_text(&output)
            .context("Failed to copy output")?;
        tracing::info!("Output copied to clipboard");
    }

    Ok(())
}

fn shape(text: &str, delete_harakat: bool, newline: bool) -> Result<String> {
    let ctx = ShapingService::detect().prepare(ShapingOptions { delete_harakat })?;
    let policy = if newline {
        JoinPolicy::Newline
    } else {
        JoinPolicy::Concatenate
    };
    Ok(LineProcessor::new(policy).process_text(text, &ctx))
}
