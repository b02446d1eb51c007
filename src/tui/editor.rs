use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::model::config::Config;

use super::app::{App, EditRequest};
use super::surface::Surface;

/// Editor used when neither `$EDITOR` nor the config names one
pub const DEFAULT_EDITOR: &str = "vi";

/// The external program tasks are edited with, plus any leading arguments
/// (`EDITOR="code --wait"`). The task path is always appended last.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    program: String,
    args: Vec<String>,
}

impl Editor {
    pub fn new(program: impl Into<String>) -> Self {
        Editor {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn with_args<I, A>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Editor {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a command line such as `code --wait` on whitespace
    pub fn parse(command: &str) -> Option<Self> {
        let mut words = command.split_whitespace();
        let program = words.next()?;
        Some(Editor::with_args(program, words))
    }

    /// `$EDITOR`, then the config's `editor`, then `vi`
    pub fn from_env(config: &Config) -> Self {
        Self::resolve(std::env::var("EDITOR").ok(), config.editor.as_deref())
    }

    fn resolve(env: Option<String>, configured: Option<&str>) -> Self {
        env.as_deref()
            .and_then(Editor::parse)
            .or_else(|| configured.and_then(Editor::parse))
            .unwrap_or_else(|| Editor::new(DEFAULT_EDITOR))
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the editor on `path` and wait for it to exit
    pub fn run(&self, path: &Path) -> io::Result<ExitStatus> {
        Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .status()
    }
}

/// Hand the terminal to the editor for `request`, then take it back and
/// reload.
///
/// Whatever the editor's exit status, the app resumes and reloads. A spawn
/// failure is shown in the status row once the terminal is restored; only
/// failing to suspend or resume the terminal itself is returned as an error.
pub fn hand_off<S: Surface>(
    surface: &mut S,
    editor: &Editor,
    app: &mut App,
    request: EditRequest,
) -> io::Result<()> {
    tracing::info!(
        editor = editor.program(),
        path = %request.path().display(),
        "opening editor"
    );
    surface.suspend()?;
    let outcome = editor.run(request.path());
    surface.resume()?;

    match outcome {
        Ok(status) => tracing::info!(%status, "editor exited"),
        Err(e) => app.report_error(&format!("could not start {}", editor.program()), e),
    }

    // Keep the spawn error visible past the reload
    let status = app.status.take();
    app.finish_edit(&request);
    if app.status.is_none() {
        app.status = status;
    }
    Ok(())
}
