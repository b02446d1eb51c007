use std::collections::VecDeque;
use std::fs;
use std::io;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tempfile::TempDir;

use crate::io::task_store::TaskStore;
use crate::tui::app::App;
use crate::tui::editor::Editor;
use crate::tui::event::Input;
use crate::tui::surface::Surface;
use crate::tui::theme::Theme;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// In-memory surface fed from a fixed list of inputs.
///
/// `next_event` and `poll_event` both pop from the same queue, so a test can
/// script one drain pass per `Input`. Running dry is an error, which ends an
/// event loop that never saw a quit key.
pub struct ScriptedSurface {
    pub terminal: Terminal<TestBackend>,
    pub inputs: VecDeque<Input>,
    /// Inputs handed to `poll_event` are limited to this many per pass
    pub batch: usize,
    polled: usize,
    pub calls: Vec<&'static str>,
    pub frames: usize,
}

impl ScriptedSurface {
    pub fn new(inputs: Vec<Input>) -> Self {
        ScriptedSurface {
            terminal: Terminal::new(TestBackend::new(TERM_W, TERM_H)).unwrap(),
            inputs: inputs.into(),
            batch: usize::MAX,
            polled: 0,
            calls: Vec::new(),
            frames: 0,
        }
    }

    /// Screen contents after the last draw, as plain text
    pub fn screen(&self) -> String {
        buffer_to_string(self.terminal.backend().buffer())
    }
}

impl Surface for ScriptedSurface {
    fn next_event(&mut self) -> io::Result<Input> {
        self.polled = 0;
        self.inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn poll_event(&mut self) -> io::Result<Option<Input>> {
        if self.polled >= self.batch {
            return Ok(None);
        }
        self.polled += 1;
        Ok(self.inputs.pop_front())
    }

    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.calls.push("resize");
        self.terminal.backend_mut().resize(width, height);
        self.terminal.resize(Rect::new(0, 0, width, height))
    }

    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()> {
        self.frames += 1;
        self.terminal.draw(|frame| render(frame))?;
        Ok(())
    }

    fn suspend(&mut self) -> io::Result<()> {
        self.calls.push("suspend");
        Ok(())
    }

    fn resume(&mut self) -> io::Result<()> {
        self.calls.push("resume");
        self.terminal.clear()
    }
}

/// A store in a temp dir seeded with `files`, and an app loaded from it.
///
/// The store lives in a `todo/` subdirectory so tests can keep other files
/// next to it without them being loaded as tasks.
pub fn app_with_files(files: &[(&str, &str)]) -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().join("todo");
    fs::create_dir_all(&root).unwrap();
    for (name, content) in files {
        fs::write(root.join(name), content).unwrap();
    }
    let store = TaskStore::open(&root).unwrap();
    let app = App::new(store, Theme::default()).unwrap();
    (tmp, app)
}

/// An editor that runs `script` through `sh -c`, with the task path as `$0`
pub fn shell_editor(script: &str) -> Editor {
    Editor::with_args("sh", ["-c", script])
}

pub fn key(code: KeyCode) -> Input {
    Input::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

pub fn ch(c: char) -> Input {
    key(KeyCode::Char(c))
}

pub fn ctrl(c: char) -> Input {
    Input::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
}

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();
    buffer_to_string(terminal.backend().buffer())
}

fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}
