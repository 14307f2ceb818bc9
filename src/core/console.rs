//! Console setup, notices and the pause before exit.
//!
//! The window title goes through `crossterm`, which uses the WinAPI on consoles
//! without VT support and an escape sequence everywhere else.

use crossterm::execute;
use crossterm::terminal::SetTitle;
use std::io::{self, BufRead, IsTerminal, Write};

use super::messages;

/// The user-facing side of the launcher: notices, window setup and the pause.
pub trait Console {
    /// Switch the console to UTF-8 output and set the window title. Best effort.
    fn prepare(&mut self, title: &str);

    fn say(&mut self, line: &str);

    /// Block until the user acknowledges.
    fn pause(&mut self);
}

impl<C: Console + ?Sized> Console for &mut C {
    fn prepare(&mut self, title: &str) {
        (**self).prepare(title)
    }

    fn say(&mut self, line: &str) {
        (**self).say(line)
    }

    fn pause(&mut self) {
        (**self).pause()
    }
}

/// The real terminal: stdout for text, a line read from stdin for the pause.
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl TerminalConsole {
    #[cfg(windows)]
    fn enable_utf8(&self) {
        // Children such as pip and the application write through the console
        // code page, not through our UTF-16 stdout.
        let status = std::process::Command::new("cmd")
            .args(["/C", "chcp", "65001"])
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status();
        if let Err(err) = status {
            debug!("could not switch console code page: {}", err);
        }
    }

    #[cfg(not(windows))]
    fn enable_utf8(&self) {}

    fn set_title(&self, title: &str) {
        let mut stdout = io::stdout();
        if !stdout.is_terminal() {
            return;
        }
        if let Err(err) = execute!(stdout, SetTitle(title)) {
            debug!("could not set window title: {}", err);
        }
    }
}

impl Console for TerminalConsole {
    fn prepare(&mut self, title: &str) {
        self.enable_utf8();
        self.set_title(title);
    }

    fn say(&mut self, line: &str) {
        println!("{}", line);
    }

    fn pause(&mut self) {
        print!("{}", messages::PAUSE_PROMPT);
        let _ = io::stdout().flush();

        // EOF counts as an acknowledgment.
        let mut buf = String::new();
        let _ = io::stdin().lock().read_line(&mut buf);
        println!();
    }
}
