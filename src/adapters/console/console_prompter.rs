use std::io::{BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crate::core::errors::Result;
use crate::core::traits::prompter::Prompter;

/// Real console prompter reading from stdin.
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    fn prompt_text(&mut self, prompt: &str) -> Result<String> {
        print!("{prompt}");
        std::io::stdout().flush()?;
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn prompt_yes_no(&mut self, prompt: &str, timeout: Duration) -> Result<Option<bool>> {
        print!("{prompt}");
        std::io::stdout().flush()?;

        // Reading happens on a helper thread so the wait can be bounded.
        // If the timeout fires the thread stays parked on stdin; that is
        // acceptable for a process that exits right after the flow ends.
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut line = String::new();
            let _ = std::io::stdin().lock().read_line(&mut line);
            let _ = tx.send(line);
        });

        match rx.recv_timeout(timeout) {
            Ok(line) => {
                let answer = line.trim().to_ascii_lowercase();
                Ok(Some(answer == "y" || answer == "yes"))
            }
            Err(_) => Ok(None),
        }
    }
}
