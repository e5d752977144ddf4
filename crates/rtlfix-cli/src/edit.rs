//! `edit` subcommand
//!
//! A line-oriented terminal front-end for the interactive session. Plain
//! lines are appended to the input buffer, each one counting as an input
//! change; lines starting with `:` are commands.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Args;
use rtlfix_editor::{ClipboardSink, InteractiveSession, Notice, SessionConfig, SystemClipboard};
use rtlfix_text::{JoinPolicy, ShapingService};

const HELP: &str = "\
Commands:
  :process         reprocess the input now
  :live on|off     toggle live processing
  :harakat on|off  toggle harakat deletion
  :swap            exchange input and output
  :clear           empty both buffers
  :copy            copy the output to the clipboard
  :show            print both buffers
  :help            show this help
  :quit            leave";

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Start with harakat deletion on
    #[arg(long)]
    pub delete_harakat: bool,

    /// Start with live processing off
    #[arg(long)]
    pub no_live: bool,

    /// Keep line breaks between processed lines
    #[arg(long)]
    pub newline: bool,
}

impl EditArgs {
    fn config(&self) -> SessionConfig {
        SessionConfig {
            delete_harakat: self.delete_harakat,
            live: !self.no_live,
            join_policy: if self.newline {
                JoinPolicy::Newline
            } else {
                JoinPolicy::Concatenate
            },
        }
    }
}

/// Parsed command line of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EditCommand {
    Process,
    Live(bool),
    Harakat(bool),
    Swap,
    Clear,
    Copy,
    Show,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Option<std::result::Result<EditCommand, String>> {
    let rest = line.strip_prefix(':')?;
    let mut words = rest.split_whitespace();
    let name = words.next().unwrap_or_default();
    let arg = words.next();

    let toggle = |arg: Option<&str>| match arg {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        _ => Err(format!("Expected on|off after :{name}")),
    };

    let command = match name {
        "process" | "p" => Ok(EditCommand::Process),
        "live" => toggle(arg).map(EditCommand::Live),
        "harakat" => toggle(arg).map(EditCommand::Harakat),
        "swap" => Ok(EditCommand::Swap),
        "clear" => Ok(EditCommand::Clear),
        "copy" => Ok(EditCommand::Copy),
        "show" => Ok(EditCommand::Show),
        "help" | "h" => Ok(EditCommand::Help),
        "quit" | "q" => Ok(EditCommand::Quit),
        other => Err(format!("Unknown command :{other} (try :help)")),
    };
    Some(command)
}

pub fn run(args: EditArgs) -> Result<()> {
    let mut session = InteractiveSession::new(ShapingService::detect(), args.config());
    let mut clipboard = SystemClipboard::new();
    let stdin = io::stdin();
    drive(&mut session, &mut clipboard, stdin.lock(), io::stdout().lock())?;
    Ok(())
}

/// Feed `input` line by line into the session, echoing results to `out`
fn drive(
    session: &mut InteractiveSession,
    clipboard: &mut dyn ClipboardSink,
    input: impl BufRead,
    mut out: impl Write,
) -> io::Result<()> {
    print_notices(session, &mut out)?;
    writeln!(out, "[{}]", session.status())?;

    for line in input.lines() {
        let line = line?;

        // Errors are already reflected in the status line and notices
        let result = match parse_command(&line) {
            None => {
                let mut text = session.input().to_string();
                if !text.is_empty() {
                    text.push('\n');
                }
                text.push_str(&line);
                session.input_changed(text).map_err(|e| e.to_string())
            }
            Some(Err(message)) => {
                writeln!(out, "{message}")?;
                continue;
            }
            Some(Ok(EditCommand::Quit)) => break,
            Some(Ok(EditCommand::Help)) => {
                writeln!(out, "{HELP}")?;
                continue;
            }
            Some(Ok(EditCommand::Show)) => {
                writeln!(out, "input:\n{}", session.input())?;
                writeln!(out, "output:\n{}", session.output())?;
                continue;
            }
            Some(Ok(EditCommand::Process)) => session.process_now().map_err(|e| e.to_string()),
            Some(Ok(EditCommand::Live(on))) => {
                session.set_live(on);
                Ok(())
            }
            Some(Ok(EditCommand::Harakat(delete))) => {
                session.toggle_diacritics(delete).map_err(|e| e.to_string())
            }
            Some(Ok(EditCommand::Swap)) => {
                session.swap();
                Ok(())
            }
            Some(Ok(EditCommand::Clear)) => {
                session.clear();
                Ok(())
            }
            Some(Ok(EditCommand::Copy)) => session.copy_output(clipboard).map_err(|e| e.to_string()),
        };

        if let Err(e) = result {
            tracing::debug!("Session event failed: {}", e);
        }

        print_notices(session, &mut out)?;
        writeln!(out, "> {}", session.output())?;
        writeln!(out, "[{}]", session.status())?;
    }

    Ok(())
}

fn print_notices(session: &mut InteractiveSession, out: &mut impl Write) -> io::Result<()> {
    for notice in session.take_notices() {
        match notice {
            Notice::MissingCapability { title, message } => writeln!(out, "warning: {title}: {message}")?,
            Notice::ErrorDialog { title, message } => writeln!(out, "{title}: {message}")?,
        }
    }
    Ok(())
}
