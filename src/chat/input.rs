//! Keyboard handling for the input line.
//!
//! Enter submits the message.  Enter with Shift or Alt held (or Ctrl-J, which terminals
//! send for a bare line feed) inserts a newline instead so multi-line messages can be
//! composed.

use rustyline::{Cmd, Editor, EventHandler, KeyCode, KeyEvent, Modifiers};

/// What pressing Enter should do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EnterAction {
    /// Send the current input.
    Submit,
    /// Insert a line break into the input.
    InsertNewline,
}

/// Decides what Enter does given the modifiers held with it.
pub fn classify_enter(modifiers: Modifiers) -> EnterAction {
    if modifiers.intersects(Modifiers::SHIFT | Modifiers::ALT) {
        EnterAction::InsertNewline
    } else {
        EnterAction::Submit
    }
}

fn command_for(action: EnterAction) -> Cmd {
    match action {
        EnterAction::Submit => Cmd::AcceptLine,
        EnterAction::InsertNewline => Cmd::Newline,
    }
}

/// Installs the Enter bindings on a line editor.
pub fn bind_enter_keys<H: rustyline::Helper, I: rustyline::history::History>(
    editor: &mut Editor<H, I>,
) {
    for modifiers in [Modifiers::SHIFT, Modifiers::ALT] {
        let handler = EventHandler::Simple(command_for(classify_enter(modifiers)));
        editor.bind_sequence(KeyEvent(KeyCode::Enter, modifiers), handler);
    }
    editor.bind_sequence(
        KeyEvent::ctrl('J'),
        EventHandler::Simple(command_for(EnterAction::InsertNewline)),
    );
}
