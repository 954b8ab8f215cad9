//! Input mode: where keystrokes go.
//!
//! The screen itself lives in [`ViewState`](super::view::ViewState); the mode
//! only decides whether printable keys edit the query or act as commands.
//!
//! | screen | `Typing` | `Browsing` |
//! |---|---|---|
//! | canvas | always | never |
//! | results | `/` opened the query bar | `j/k`, `1-4`, `Enter`, ... |
//! | focus | `/` opened the query bar | `o`, `Esc`, ... |

/// Current input handling mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InputMode {
    /// Keys edit the query input.
    #[default]
    Typing,

    /// Keys are navigation and filter commands.
    Browsing,
}
