use std::time::Duration;

use crate::core::errors::Result;

/// Port for interactive input, kept out of the flow logic so tests can
/// script answers instead of driving a real console.
pub trait Prompter {
    /// Ask for a line of text. The returned string is trimmed.
    fn prompt_text(&mut self, prompt: &str) -> Result<String>;

    /// Ask a yes/no question with a bounded wait.
    ///
    /// Returns `None` when the wait expires; the caller decides what a
    /// timeout means (for the GitHub verification gate it means "skip").
    fn prompt_yes_no(&mut self, prompt: &str, timeout: Duration) -> Result<Option<bool>>;
}
