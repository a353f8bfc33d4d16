//! Terminal prompts for the catalog session.

use catalog_client::Dialogs;
use catalog_core::AlbumView;
use std::io::{self, BufRead, Write};

/// Dialogs over stdin/stderr.
///
/// A title given on the command line answers the title prompt without
/// reading stdin, and `assume_yes` answers every delete confirmation.
pub struct TerminalDialogs {
    assume_yes: bool,
    title: Option<String>,
}

impl TerminalDialogs {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            title: None,
        }
    }

    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    fn ask(&self, question: &str) -> Option<String> {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{}", question);
        let _ = stderr.flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

impl Dialogs for TerminalDialogs {
    fn prompt_title(&mut self, current: &str) -> Option<String> {
        if let Some(title) = self.title.take() {
            return Some(title);
        }
        self.ask(&format!("New title [{}]: ", current))
            .filter(|answer| !answer.trim().is_empty())
    }

    fn confirm_delete(&mut self, album: &AlbumView) -> bool {
        if self.assume_yes {
            return true;
        }
        let question = format!(
            "Delete \"{}\" by {}? [y/N] ",
            album.album.title, album.album.band
        );
        self.ask(&question).is_some_and(|answer| is_yes(&answer))
    }

    fn alert(&mut self, message: &str) {
        eprintln!("{}", message);
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
