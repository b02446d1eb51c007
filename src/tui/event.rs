use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEventKind};

/// A terminal position reported by the mouse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub column: u16,
    pub row: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// Everything the dispatcher reacts to. Terminal events that the app has no
/// use for arrive as `Ignored` so the dispatcher can match exhaustively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Key(KeyEvent),
    /// Mouse moved or left button pressed at a position
    Pointer(Pointer),
    /// Mouse wheel
    Scroll(ScrollDirection),
    Resize(u16, u16),
    Ignored,
}

impl From<Event> for Input {
    fn from(event: Event) -> Self {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => Input::Key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Down(MouseButton::Left) => {
                    Input::Pointer(Pointer {
                        column: mouse.column,
                        row: mouse.row,
                    })
                }
                MouseEventKind::ScrollUp => Input::Scroll(ScrollDirection::Up),
                MouseEventKind::ScrollDown => Input::Scroll(ScrollDirection::Down),
                _ => Input::Ignored,
            },
            Event::Resize(width, height) => Input::Resize(width, height),
            _ => Input::Ignored,
        }
    }
}
