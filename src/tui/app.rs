use std::fmt::Display;
use std::io;
use std::path::{Path, PathBuf};

use ratatui::Frame;

use crate::io::config_io;
use crate::io::logging;
use crate::io::task_store::{StoreError, TaskStore};
use crate::model::task::Task;

use super::editor::{self, Editor};
use super::event::{Input, Pointer, ScrollDirection};
use super::input;
use super::render::{self, RenderScratch};
use super::surface::{CrosstermSurface, Surface};
use super::theme::Theme;

/// Which view is currently displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// Table of all tasks
    TaskList,
    /// The active task in an overlay above the table
    TaskDetails,
}

/// A file waiting to be opened in the external editor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    /// A new task at a freshly allocated path
    Create(PathBuf),
    /// The task currently shown in the details overlay
    Edit(PathBuf),
}

impl EditRequest {
    pub fn path(&self) -> &Path {
        match self {
            EditRequest::Create(path) | EditRequest::Edit(path) => path,
        }
    }
}

/// One-line message in the status row, cleared by the next key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub is_error: bool,
}

/// Lines moved per PageUp/PageDown in the details block
pub const DETAILS_PAGE: u16 = 10;

/// Main application state
pub struct App {
    pub store: TaskStore,
    /// Tasks in display order, rebuilt on every reload
    pub tasks: Vec<Task>,
    /// Index into `tasks`; always 0 when there are none
    pub selected: usize,
    pub layout: Layout,
    /// Detached copy of the task shown in `TaskDetails`
    pub active: Option<Task>,
    pub details_scroll: u16,
    pub should_quit: bool,
    pub status: Option<StatusMessage>,
    /// Mouse position for the next frame only
    pub pointer: Option<Pointer>,
    pub pending_edit: Option<EditRequest>,
    pub theme: Theme,
}

impl App {
    /// Build the app and load the store's tasks
    pub fn new(store: TaskStore, theme: Theme) -> Result<Self, StoreError> {
        let mut app = App {
            store,
            tasks: Vec::new(),
            selected: 0,
            layout: Layout::TaskList,
            active: None,
            details_scroll: 0,
            should_quit: false,
            status: None,
            pointer: None,
            pending_edit: None,
            theme,
        };
        app.reload()?;
        Ok(app)
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    /// Drop every loaded task along with the active copy
    pub fn clear(&mut self) {
        self.tasks.clear();
        self.active = None;
    }

    /// Rebuild the task list from disk. The active task is cleared; callers
    /// that want to keep it must resolve it again by path.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        self.clear();
        let loaded = self.store.load();
        let result = loaded.map(|tasks| self.tasks = tasks);
        self.clamp_selection();
        result
    }

    pub fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
    }

    pub fn select_next(&mut self) {
        self.selected = self.selected.saturating_add(1);
        self.clamp_selection();
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.clamp_selection();
    }

    /// Enter `TaskDetails` with a copy of the selected task
    pub fn open_selected(&mut self) {
        if let Some(task) = self.selected_task().cloned() {
            self.active = Some(task);
            self.details_scroll = 0;
            self.layout = Layout::TaskDetails;
        }
    }

    /// Back to `TaskList`
    pub fn close_details(&mut self) {
        self.active = None;
        self.details_scroll = 0;
        self.layout = Layout::TaskList;
    }

    /// `TaskDetails` is only valid with an active task; fall back to the list
    /// instead of drawing an empty overlay.
    pub fn settle_layout(&mut self) {
        if self.layout == Layout::TaskDetails && self.active.is_none() {
            tracing::warn!("details layout without an active task; returning to list");
            self.close_details();
        }
    }

    pub fn scroll_details(&mut self, direction: ScrollDirection, lines: u16) {
        let max = self.active.as_ref().map_or(0, |task| {
            u16::try_from(task.details.lines().count().saturating_sub(1)).unwrap_or(u16::MAX)
        });
        self.details_scroll = match direction {
            ScrollDirection::Up => self.details_scroll.saturating_sub(lines),
            ScrollDirection::Down => self.details_scroll.saturating_add(lines).min(max),
        };
    }

    /// Move the selected task's file into `completed/` and reload
    pub fn complete_selected(&mut self) {
        let Some(task) = self.selected_task().cloned() else {
            return;
        };
        if let Err(e) = self.store.complete(&task) {
            self.report_error("could not complete task", e);
            return;
        }
        if let Err(e) = self.reload() {
            self.report_error("could not reload tasks", e);
            return;
        }
        self.set_status(format!("completed \"{}\"", task.title));
    }

    /// Allocate the next task file and queue it for the editor
    pub fn request_create(&mut self) {
        match self.store.next_task_path() {
            Ok(path) => self.pending_edit = Some(EditRequest::Create(path)),
            Err(e) => self.report_error("could not allocate a new task", e),
        }
    }

    /// Queue the active task's file for the editor
    pub fn request_edit(&mut self) {
        if let Some(task) = &self.active {
            tracing::debug!(file = task.file_name(), "edit requested");
            self.pending_edit = Some(EditRequest::Edit(task.file_path.clone()));
        }
    }

    /// Reload after the editor exits and find the edited task again.
    ///
    /// An edited task that still exists stays open in details with its new
    /// content; one that vanished drops the app back to the list. A newly
    /// created task becomes the selection.
    pub fn finish_edit(&mut self, request: &EditRequest) {
        let keep_details = matches!(request, EditRequest::Edit(_));
        if let Err(e) = self.reload() {
            self.report_error("could not reload tasks", e);
            self.close_details();
            return;
        }

        let found = self.tasks.iter().position(|t| t.is_backed_by(request.path()));
        if let Some(idx) = found {
            self.selected = idx;
        }

        match (keep_details, found) {
            (true, Some(idx)) => {
                self.active = Some(self.tasks[idx].clone());
                self.layout = Layout::TaskDetails;
            }
            (true, None) => {
                tracing::info!(path = %request.path().display(), "edited task is gone");
                self.close_details();
            }
            (false, _) => self.close_details(),
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            is_error: false,
        });
    }

    /// Log a failure and show it in the status row
    pub fn report_error(&mut self, context: &str, err: impl Display) {
        tracing::error!(error = %err, "{context}");
        self.status = Some(StatusMessage {
            text: format!("{context}: {err}"),
            is_error: true,
        });
    }
}

/// Route one input to the state machine
pub fn dispatch<S: Surface>(surface: &mut S, app: &mut App, input: Input) -> io::Result<()> {
    app.settle_layout();
    match input {
        Input::Key(key) => input::handle_key(app, key),
        Input::Pointer(pointer) => app.pointer = Some(pointer),
        Input::Scroll(direction) => {
            if app.layout == Layout::TaskDetails {
                app.scroll_details(direction, 1);
            }
        }
        Input::Resize(width, height) => surface.resize(width, height)?,
        Input::Ignored => {}
    }
    Ok(())
}

/// Run the TUI against the given storage directory
pub fn run(dir: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = config_io::load_config()?;
    let root = config_io::resolve_storage_dir(dir)?;
    let store = TaskStore::open(&root)?;

    let _log = logging::init(&store.logs_dir());
    tracing::info!(root = %store.root().display(), "starting");

    let editor = Editor::from_env(&config);
    let mut app = App::new(store, Theme::from_config(&config.ui))?;

    let mut surface = CrosstermSurface::enter()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            io::stdout(),
            crossterm::event::DisableMouseCapture,
            crossterm::terminal::LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut surface, &mut app, &editor);

    surface.leave()?;
    tracing::info!("exiting");

    result.map_err(Into::into)
}

/// Block for input, drain the queue, redraw; until a pass ends with a quit.
pub fn run_event_loop<S: Surface>(
    surface: &mut S,
    app: &mut App,
    editor: &Editor,
) -> io::Result<()> {
    let mut scratch = RenderScratch::default();
    while !app.should_quit {
        let mut next = Some(surface.next_event()?);
        while let Some(input) = next {
            dispatch(surface, app, input)?;
            if let Some(request) = app.pending_edit.take() {
                // No editor once the user has asked to leave
                if !app.should_quit {
                    editor::hand_off(surface, editor, app, request)?;
                }
            }
            next = surface.poll_event()?;
        }

        if app.should_quit {
            break;
        }
        surface.draw(&mut |frame: &mut Frame| render::render(frame, app, &mut scratch))?;
        app.pointer = None;
    }
    Ok(())
}
