//! Batch fixer configuration

/// Batch fixer configuration options
#[derive(Debug, Clone)]
pub struct FixerConfig {
    /// Attribute whose value is reshaped
    pub attribute: String,

    /// Appended to the file stem to name the output file
    pub suffix: String,

    /// Process files in file-name order instead of directory-listing order
    pub sort: bool,

    /// Skip files whose stem already ends in `suffix`, so a re-run does
    /// not reshape earlier outputs a second time
    pub skip_outputs: bool,
}

impl Default for FixerConfig {
    fn default() -> Self {
        Self {
            attribute: "Value".to_string(),
            suffix: "_fixed".to_string(),
            sort: true,
            skip_outputs: false,
        }
    }
}
