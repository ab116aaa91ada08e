use std::io::{self, Write};
use std::process::{Command, Stdio};

use log::*;

/// One dmenu invocation. Menus sit at the bottom of the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    args: Vec<String>,
}

impl Menu {
    pub fn new(prompt: &str) -> Self {
        Menu { args: vec!["-b".to_owned(), "-p".to_owned(), prompt.to_owned()] }
    }

    /// Vertical list, matched case-insensitively.
    pub fn list(mut self, lines: usize) -> Self {
        self.args.extend(vec!["-i".to_owned(), "-l".to_owned(), lines.to_string()]);
        self
    }

    /// Black on black, so typed input stays unreadable.
    pub fn hidden(mut self) -> Self {
        self.args.extend(["-nb", "black", "-nf", "black"].iter().map(|a| (*a).to_owned()));
        self
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Offer `choices`, one per line. `None` when the user escapes out.
    pub fn run(&self, choices: &str) -> io::Result<Option<String>> {
        let mut child = Command::new("dmenu")
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(choices.as_bytes())?,
            None => return Err(io::Error::new(io::ErrorKind::BrokenPipe, "dmenu stdin unavailable")),
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            warn!("Dmenu process cancelled with exit code {:?}", output.status.code());
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_owned()))
    }
}

pub fn select(choices: &str, prompt: &str) -> io::Result<Option<String>> {
    Menu::new(prompt).list(20).run(choices)
}

pub fn prompt_hidden(prompt: &str) -> io::Result<Option<String>> {
    Menu::new(prompt).hidden().run("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_menu_is_a_list() {
        let menu = Menu::new("Delete?").list(20);
        assert_eq!(menu.args(), ["-b", "-p", "Delete?", "-i", "-l", "20"]);
    }

    #[test]
    fn hidden_menu_blacks_out_input() {
        let menu = Menu::new("Password:").hidden();
        assert_eq!(menu.args(), ["-b", "-p", "Password:", "-nb", "black", "-nf", "black"]);
    }
}
