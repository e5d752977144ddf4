//! `fix-xml` subcommand

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use rtlfix_text::ShapingService;
use rtlfix_xml::{BatchReport, BatchXmlFixer, FileOutcome, FixerConfig};

#[derive(Debug, Args)]
pub struct FixXmlArgs {
    /// Directory to scan (defaults to the directory of this program)
    pub dir: Option<PathBuf>,

    /// Attribute to reshape
    #[arg(long, default_value = "Value")]
    pub attribute: String,

    /// Suffix appended to each output file's stem
    #[arg(long, default_value = "_fixed")]
    pub suffix: String,

    /// Keep directory-listing order instead of sorting by file name
    #[arg(long)]
    pub no_sort: bool,

    /// Skip files whose name already ends in the suffix
    #[arg(long)]
    pub skip_outputs: bool,
}

impl FixXmlArgs {
    fn config(&self) -> FixerConfig {
        FixerConfig {
            attribute: self.attribute.clone(),
            suffix: self.suffix.clone(),
            sort: !self.no_sort,
            skip_outputs: self.skip_outputs,
        }
    }
}

pub fn run(args: FixXmlArgs) -> Result<()> {
    let dir = match &args.dir {
        Some(dir) => dir.clone(),
        None => super::program_dir().context("Could not locate the program directory")?,
    };

    let fixer = BatchXmlFixer::new(&ShapingService::detect(), args.config())
        .context("Cannot start the XML fixer")?;
    let report = fixer
        .run(&dir)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    print_report(&report, &mut io::stdout().lock())?;
    Ok(())
}

/// One line per file, or a single line when nothing was found
fn print_report(report: &BatchReport, out: &mut impl Write) -> io::Result<()> {
    if report.is_empty() {
        return writeln!(out, "No XML files found in {}", report.directory.display());
    }

    for path in &report.skipped {
        writeln!(out, "{}: skipped (earlier output)", path.display())?;
    }

    for outcome in &report.outcomes {
        match outcome {
            FileOutcome::Fixed(file) => writeln!(
                out,
                "{}: {} attribute(s) changed -> {}",
                file.source.display(),
                file.changed,
                file.output.display()
            )?,
            FileOutcome::Failed { path, error } => {
                writeln!(out, "{}: skipped ({})", path.display(), error)?
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn report_for(dir: &std::path::Path) -> BatchReport {
        BatchXmlFixer::new(&ShapingService::detect(), FixerConfig::default())
            .unwrap()
            .run(dir)
            .unwrap()
    }

    fn render(report: &BatchReport) -> String {
        let mut out = Vec::new();
        print_report(report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_report_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let text = render(&report_for(dir.path()));
        assert!(text.starts_with("No XML files found in "));
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_report_per_file_lines() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.xml"), r#"<r><i Value="مرحبا"/><i Value="hello"/></r>"#).unwrap();
        fs::write(dir.path().join("b.xml"), "<r>").unwrap();

        let text = render(&report_for(dir.path()));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("a.xml: 1 attribute(s) changed -> "));
        assert!(lines[0].ends_with("a_fixed.xml"));
        assert!(lines[1].contains("b.xml: skipped ("));
    }

    #[test]
    fn test_config_from_flags() {
        let args = FixXmlArgs {
            dir: None,
            attribute: "Text".to_string(),
            suffix: "_rtl".to_string(),
            no_sort: true,
            skip_outputs: true,
        };
        let config = args.config();
        assert_eq!(config.attribute, "Text");
        assert!(!config.sort);
        assert!(config.skip_outputs);
    }

    #[test]
    fn test_report_lists_skipped_outputs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("menu_fixed.xml"), r#"<r><i Value="مرحبا"/></r>"#).unwrap();

        let config = FixerConfig {
            skip_outputs: true,
            ..FixerConfig::default()
        };
        let report = BatchXmlFixer::new(&ShapingService::detect(), config)
            .unwrap()
            .run(dir.path())
            .unwrap();
        let text = render(&report);

        assert!(!text.starts_with("No XML files found"));
        assert!(text.trim_end().ends_with("menu_fixed.xml: skipped (earlier output)"));
    }
}
