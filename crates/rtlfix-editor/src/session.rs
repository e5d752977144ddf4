//! Interactive session
//!
//! Input and output buffers plus the toggles of the editor, with every UI
//! event mapped to a named transition. A front-end forwards events here and
//! renders `input()`, `output()`, `status()` and any queued notices.

use rtlfix_text::{
    JoinPolicy, LineProcessor, Result, ShapingContext, ShapingOptions, ShapingService, TextError,
};

use crate::clipboard::{ClipboardError, ClipboardSink};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No context built yet
    #[default]
    Idle,
    /// A shaping context is built and the last operation succeeded
    Ready,
    /// Capability missing or the last operation failed
    Error,
}

/// Message the front-end should show to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Shown once at startup when shaping is unavailable
    MissingCapability { title: String, message: String },
    /// Blocking error dialog
    ErrorDialog { title: String, message: String },
}

/// Session configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Strip harakat from the output
    pub delete_harakat: bool,
    /// Reprocess on every input change
    pub live: bool,
    /// How processed lines are rejoined
    pub join_policy: JoinPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            delete_harakat: false,
            live: true,
            join_policy: JoinPolicy::Concatenate,
        }
    }
}

/// Editor session state machine
#[derive(Debug)]
pub struct InteractiveSession {
    service: ShapingService,
    config: SessionConfig,
    processor: LineProcessor,
    context: Option<ShapingContext>,
    state: SessionState,
    input: String,
    output: String,
    status: String,
    notices: Vec<Notice>,
}

impl InteractiveSession {
    /// Start a session. A missing capability puts the session in `Error`
    /// and queues a one-time warning.
    pub fn new(service: ShapingService, config: SessionConfig) -> Self {
        let mut session = Self {
            service,
            config,
            processor: LineProcessor::new(config.join_policy),
            context: None,
            state: SessionState::Idle,
            input: String::new(),
            output: String::new(),
            status: "Ready".to_string(),
            notices: Vec::new(),
        };

        if let Some(err) = session.service.missing() {
            tracing::warn!("Starting without shaping support: {}", err);
            session.state = SessionState::Error;
            session.status = "Missing dependencies".to_string();
            session.notices.push(Notice::MissingCapability {
                title: "Missing dependencies".to_string(),
                message: format!("{err}. Then restart the app."),
            });
        }

        session
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> SessionConfig {
        self.config
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Last computed output. Only the session writes it.
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Status line text
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Drain notices queued since the last call
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Set the delete-harakat toggle.
    ///
    /// The context is always rebuilt so the new option takes effect now. In
    /// live mode the input is reprocessed as by [`process_now`](Self::process_now).
    pub fn toggle_diacritics(&mut self, delete_harakat: bool) -> Result<()> {
        self.config.delete_harakat = delete_harakat;

        if self.config.live {
            return self.process_now();
        }

        match self.context(true) {
            Ok(_) => {
                self.state = SessionState::Ready;
                Ok(())
            }
            Err(e) => {
                self.fail_inline(&e);
                Err(e)
            }
        }
    }

    /// Set the live-processing toggle
    pub fn set_live(&mut self, live: bool) {
        self.config.live = live;
    }

    /// Input buffer changed (fires on every keystroke).
    ///
    /// A no-op beyond storing the text unless live mode is on. Failures
    /// only reach the status line so typing is never interrupted.
    pub fn input_changed(&mut self, text: impl Into<String>) -> Result<()> {
        self.input = text.into();

        if !self.config.live {
            return Ok(());
        }

        match self.run_pipeline(false) {
            Ok(()) => {
                self.state = SessionState::Ready;
                self.status = "Live".to_string();
                Ok(())
            }
            Err(e) => {
                self.fail_inline(&e);
                Err(e)
            }
        }
    }

    /// Explicit processing: rebuild the context and run the pipeline.
    ///
    /// Failures queue an error dialog.
    pub fn process_now(&mut self) -> Result<()> {
        match self.run_pipeline(true) {
            Ok(()) => {
                self.state = SessionState::Ready;
                self.status = "Processed".to_string();
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Error;
                self.status = "Error".to_string();
                self.notices.push(Notice::ErrorDialog {
                    title: "Error".to_string(),
                    message: e.to_string(),
                });
                Err(e)
            }
        }
    }

    /// Exchange the buffers verbatim
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.input, &mut self.output);
        self.status = "Swapped input/output".to_string();
    }

    /// Empty both buffers
    pub fn clear(&mut self) {
        self.input.clear();
        self.output.clear();
        self.status = "Cleared".to_string();
    }

    /// Put the output buffer on the clipboard
    pub fn copy_output(&mut self, sink: &mut dyn ClipboardSink) -> std::result::Result<(), ClipboardError> {
        match sink.write_text(&self.output) {
            Ok(()) => {
                self.status = "Output copied to clipboard".to_string();
                Ok(())
            }
            Err(e) => {
                self.status = format!("Error: {e}");
                Err(e)
            }
        }
    }

    fn options(&self) -> ShapingOptions {
        ShapingOptions {
            delete_harakat: self.config.delete_harakat,
        }
    }

    /// Current context, built first if missing or `rebuild` is set
    fn context(&mut self, rebuild: bool) -> Result<ShapingContext> {
        let ctx = match self.context.take() {
            Some(ctx) if !rebuild => ctx,
            _ => self.service.prepare(self.options())?,
        };
        self.context = Some(ctx.clone());
        Ok(ctx)
    }

    fn run_pipeline(&mut self, rebuild: bool) -> Result<()> {
        let ctx = self.context(rebuild)?;
        self.output = self.processor.process_text(&self.input, &ctx);
        Ok(())
    }

    fn fail_inline(&mut self, err: &TextError) {
        tracing::debug!("Processing failed: {}", err);
        self.state = SessionState::Error;
        self.status = format!("Error: {err}");
    }
}
