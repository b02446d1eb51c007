use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};

use super::event::Input;

/// The terminal as seen by the event loop: a source of input and a place to
/// draw frames, which can be handed over to another process and taken back.
pub trait Surface {
    /// Block until the next input arrives
    fn next_event(&mut self) -> io::Result<Input>;
    /// Return an already queued input without blocking
    fn poll_event(&mut self) -> io::Result<Option<Input>>;
    /// Recompute the drawable area after a resize
    fn resize(&mut self, width: u16, height: u16) -> io::Result<()>;
    /// Draw and flush one full frame
    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()>;
    /// Stop input delivery and give the terminal back to normal stdio
    fn suspend(&mut self) -> io::Result<()>;
    /// Take the terminal back after `suspend`; the next draw repaints everything
    fn resume(&mut self) -> io::Result<()>;
}

/// Real terminal backed by crossterm and ratatui
pub struct CrosstermSurface {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// The first `next_event` reports the initial size as a resize
    pending_startup_resize: bool,
}

impl CrosstermSurface {
    /// Switch the terminal into raw mode on the alternate screen
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(CrosstermSurface {
            terminal,
            pending_startup_resize: true,
        })
    }

    /// Restore the terminal to the state it was in before `enter`
    pub fn leave(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        self.terminal.show_cursor()
    }
}

impl Surface for CrosstermSurface {
    fn next_event(&mut self) -> io::Result<Input> {
        if self.pending_startup_resize {
            self.pending_startup_resize = false;
            let size = self.terminal.size()?;
            return Ok(Input::Resize(size.width, size.height));
        }
        Ok(Input::from(event::read()?))
    }

    fn poll_event(&mut self) -> io::Result<Option<Input>> {
        if event::poll(Duration::ZERO)? {
            Ok(Some(Input::from(event::read()?)))
        } else {
            Ok(None)
        }
    }

    fn resize(&mut self, width: u16, height: u16) -> io::Result<()> {
        self.terminal.resize(Rect::new(0, 0, width, height))
    }

    fn draw(&mut self, render: &mut dyn FnMut(&mut Frame)) -> io::Result<()> {
        self.terminal.draw(|frame| render(frame))?;
        Ok(())
    }

    fn suspend(&mut self) -> io::Result<()> {
        self.terminal.show_cursor()?;
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            DisableMouseCapture,
            LeaveAlternateScreen
        )
    }

    fn resume(&mut self) -> io::Result<()> {
        execute!(
            self.terminal.backend_mut(),
            EnterAlternateScreen,
            EnableMouseCapture
        )?;
        enable_raw_mode()?;
        // Keystrokes typed while the editor ran belong to the editor
        while event::poll(Duration::ZERO)? {
            event::read()?;
        }
        self.terminal.clear()?;
        self.terminal.hide_cursor()
    }
}
