//! Batch fixing of a directory of XML files

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use rtlfix_text::{ShapingContext, ShapingOptions, ShapingService};

use crate::document::fix_document;
use crate::encoding::decode_xml_bytes;
use crate::{FixError, FixerConfig, Result};

/// A file that was fixed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Elements whose attribute value changed
    pub changed: usize,
}

/// What happened to one input file
#[derive(Debug)]
pub enum FileOutcome {
    Fixed(FileReport),
    Failed { path: PathBuf, error: FixError },
}

impl FileOutcome {
    pub fn path(&self) -> &Path {
        match self {
            FileOutcome::Fixed(report) => &report.source,
            FileOutcome::Failed { path, .. } => path,
        }
    }
}

/// Result of one batch run
#[derive(Debug, Default)]
pub struct BatchReport {
    pub directory: PathBuf,
    /// One entry per processed file, in processing order
    pub outcomes: Vec<FileOutcome>,
    /// Earlier outputs that were left alone
    pub skipped: Vec<PathBuf>,
}

impl BatchReport {
    /// No XML files were found, processed or skipped
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty() && self.skipped.is_empty()
    }

    pub fn fixed(&self) -> impl Iterator<Item = &FileReport> {
        self.outcomes.iter().filter_map(|o| match o {
            FileOutcome::Fixed(report) => Some(report),
            FileOutcome::Failed { .. } => None,
        })
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Failed { .. }))
            .count()
    }

    /// Changed attributes across all fixed files
    pub fn total_changed(&self) -> usize {
        self.fixed().map(|r| r.changed).sum()
    }
}

/// Rewrites one attribute on every element of every XML file in a directory
#[derive(Debug, Clone)]
pub struct BatchXmlFixer {
    ctx: ShapingContext,
    config: FixerConfig,
}

impl BatchXmlFixer {
    /// Build a fixer. Batch mode always keeps diacritics.
    pub fn new(service: &ShapingService, config: FixerConfig) -> Result<Self> {
        let ctx = service.prepare(ShapingOptions::preserve_diacritics())?;
        Self::with_context(ctx, config)
    }

    /// Build a fixer around an existing context
    pub fn with_context(ctx: ShapingContext, config: FixerConfig) -> Result<Self> {
        if config.suffix.is_empty() {
            return Err(FixError::InvalidConfig(
                "output suffix must not be empty".to_string(),
            ));
        }
        if config.attribute.is_empty() {
            return Err(FixError::InvalidConfig(
                "attribute name must not be empty".to_string(),
            ));
        }
        Ok(Self { ctx, config })
    }

    pub fn config(&self) -> &FixerConfig {
        &self.config
    }

    /// Path of the output written for `source`
    pub fn output_path(&self, source: &Path) -> PathBuf {
        let stem = source.file_stem().unwrap_or_default().to_string_lossy();
        source.with_file_name(format!("{}{}.xml", stem, self.config.suffix))
    }

    fn is_output(&self, path: &Path) -> bool {
        path.file_stem()
            .map(|s| s.to_string_lossy().ends_with(&self.config.suffix))
            .unwrap_or(false)
    }

    /// List the `.xml` files (any case) of `directory`.
    ///
    /// Returns the files to process and the earlier outputs that were skipped.
    pub fn xml_files(&self, directory: &Path) -> Result<(Vec<PathBuf>, Vec<PathBuf>)> {
        let read_dir_err = |source| FixError::ReadDir {
            path: directory.to_path_buf(),
            source,
        };

        let mut files = Vec::new();
        let mut skipped = Vec::new();

        for entry in fs::read_dir(directory).map_err(read_dir_err)? {
            let path = entry.map_err(read_dir_err)?.path();
            if !path.is_file() || !has_xml_extension(&path) {
                continue;
            }

            if self.config.skip_outputs && self.is_output(&path) {
                skipped.push(path);
            } else {
                files.push(path);
            }
        }

        if self.config.sort {
            files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        }

        Ok((files, skipped))
    }

    /// Fix one file, writing its sibling output
    pub fn fix_file(&self, path: &Path) -> Result<FileReport> {
        let io_err = |source| FixError::Io {
            path: path.to_path_buf(),
            source,
        };

        let bytes = fs::read(path).map_err(io_err)?;
        let text = decode_xml_bytes(&bytes).map_err(|encoding| FixError::Encoding {
            path: path.to_path_buf(),
            encoding: encoding.name(),
        })?;

        let fixed = fix_document(&text, &self.config.attribute, &self.ctx).map_err(|source| {
            FixError::MalformedDocument {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let output = self.output_path(path);
        fs::write(&output, fixed.xml).map_err(|source| FixError::Io {
            path: output.clone(),
            source,
        })?;

        tracing::debug!(
            "{}: {} of {} '{}' attribute(s) changed",
            path.display(),
            fixed.changed,
            fixed.visited,
            self.config.attribute
        );

        Ok(FileReport {
            source: path.to_path_buf(),
            output,
            changed: fixed.changed,
        })
    }

    /// Fix every XML file in `directory`.
    ///
    /// A file that cannot be read or parsed is reported and skipped; only
    /// an unreadable directory fails the whole run.
    pub fn run(&self, directory: &Path) -> Result<BatchReport> {
        let (files, skipped) = self.xml_files(directory)?;
        tracing::info!("Found {} XML file(s) in {}", files.len(), directory.display());

        for path in &skipped {
            tracing::debug!("Skipping earlier output {}", path.display());
        }

        let outcomes = files
            .into_iter()
            .map(|path| match self.fix_file(&path) {
                Ok(report) => FileOutcome::Fixed(report),
                Err(error) => {
                    tracing::warn!("Skipping {}: {}", path.display(), error);
                    FileOutcome::Failed { path, error }
                }
            })
            .collect();

        Ok(BatchReport {
            directory: directory.to_path_buf(),
            outcomes,
            skipped,
        })
    }
}

fn has_xml_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"))
}
