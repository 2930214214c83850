//! Crossterm-backed keyboard input and frame display.

use std::{
    io::{self, Stdout, Write},
    time::Duration,
};

use anyhow::{Context, Result as AnyResult};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::Print,
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::warn;
use sword_arena_rendering::{DisplaySink, Frame, InputSource};

/// Raw-mode session on the alternate screen, restored when dropped.
pub(crate) struct TerminalSession {
    stdout: Stdout,
}

impl TerminalSession {
    /// Switches the terminal into raw mode on the alternate screen.
    pub(crate) fn start() -> AnyResult<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, Hide, Clear(ClearType::All))
            .context("failed to enter the alternate screen")?;
        Ok(Self { stdout })
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(error) = execute!(self.stdout, Show, LeaveAlternateScreen) {
            warn!("failed to leave the alternate screen: {error}");
        }
        if let Err(error) = disable_raw_mode() {
            warn!("failed to disable raw mode: {error}");
        }
    }
}

/// What a single key event means to the game loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyAction {
    Press(char),
    Interrupt,
    Ignore,
}

fn translate(key: KeyEvent) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::Ignore;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyAction::Interrupt
        }
        KeyCode::Char(key) => KeyAction::Press(key),
        _ => KeyAction::Ignore,
    }
}

/// Non-blocking keyboard reader.
#[derive(Debug, Default)]
pub(crate) struct KeyboardInput {
    interrupted: bool,
}

impl KeyboardInput {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Reports whether Ctrl-C has been read.
    pub(crate) const fn interrupted(&self) -> bool {
        self.interrupted
    }
}

impl InputSource for KeyboardInput {
    fn poll_key(&mut self) -> AnyResult<Option<char>> {
        while event::poll(Duration::ZERO)? {
            let TermEvent::Key(key) = event::read()? else {
                continue;
            };
            match translate(key) {
                KeyAction::Press(key) => return Ok(Some(key)),
                KeyAction::Interrupt => {
                    self.interrupted = true;
                    return Ok(None);
                }
                KeyAction::Ignore => {}
            }
        }
        Ok(None)
    }
}

/// Draws frames at the top-left corner of the terminal.
pub(crate) struct TerminalDisplay {
    stdout: Stdout,
}

impl TerminalDisplay {
    pub(crate) fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl DisplaySink for TerminalDisplay {
    fn present(&mut self, frame: &Frame) -> AnyResult<()> {
        for (index, row) in frame.rows().enumerate() {
            let line = u16::try_from(index).context("frame taller than the terminal")?;
            queue!(self.stdout, MoveTo(0, line), Print(row))?;
        }
        self.stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presses_yield_their_character() {
        let key = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(translate(key), KeyAction::Press('w'));
    }

    #[test]
    fn control_c_interrupts() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(translate(key), KeyAction::Interrupt);
    }

    #[test]
    fn releases_and_special_keys_are_ignored() {
        let release =
            KeyEvent::new_with_kind(KeyCode::Char('w'), KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(translate(release), KeyAction::Ignore);

        let arrow = KeyEvent::new(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(translate(arrow), KeyAction::Ignore);
    }
}
