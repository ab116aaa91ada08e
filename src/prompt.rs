use std::io::{self, BufRead, Write};

use log::*;

use crate::dmenu;

/// Blocking confirmation and notification, as the user sees them.
pub trait Prompt {
    /// Ask a yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, message: &str) -> bool;

    /// Show a message until the user acknowledges it.
    fn notify(&mut self, message: &str);
}

/// Prompts on stderr, answers read from stdin.
#[derive(Debug, Default)]
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        eprint!("{} [y/N] ", message);
        let _ = io::stderr().flush();
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(e) => {
                warn!("Unable to read confirmation: {}", e);
                false
            }
        }
    }

    fn notify(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

const YES: &str = "Yes";
const NO: &str = "No";
const OK: &str = "OK";

/// Prompts through dmenu. A cancelled menu counts as "no".
#[derive(Debug, Default)]
pub struct DmenuPrompt;

impl Prompt for DmenuPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        match dmenu::select(&format!("{}\n{}", NO, YES), message) {
            Ok(Some(choice)) => choice == YES,
            Ok(None) => false,
            Err(e) => {
                error!("Unable to run dmenu: {}", e);
                false
            }
        }
    }

    fn notify(&mut self, message: &str) {
        if let Err(e) = dmenu::select(OK, message) {
            error!("Unable to run dmenu: {}", e);
        }
    }
}

fn is_yes(answer: &str) -> bool {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        _ => false,
    }
}

/// Answers every confirmation the same way and keeps what it was shown.
#[derive(Debug, Default)]
pub struct RecordingPrompt {
    pub answer: bool,
    pub confirmations: Vec<String>,
    pub notifications: Vec<String>,
}

impl RecordingPrompt {
    pub fn answering(answer: bool) -> Self {
        RecordingPrompt { answer, ..Self::default() }
    }

    pub fn last_notification(&self) -> Option<&str> {
        self.notifications.last().map(String::as_str)
    }
}

impl Prompt for RecordingPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.confirmations.push(message.to_owned());
        self.answer
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_owned());
    }
}
