// simplelogin-client/src/prompt.rs
use std::io;

/// Interactive input needed by login, alias creation and deletion
pub trait Prompt {
    /// Ask for the one-time code of the MFA step
    fn one_time_code(&self) -> io::Result<String>;

    fn confirm(&self, message: &str) -> io::Result<bool>;

    /// Index of the chosen option
    fn select(&self, message: &str, options: &[String]) -> io::Result<usize>;

    /// Indices of the chosen options
    fn multi_select(&self, message: &str, options: &[String]) -> io::Result<Vec<usize>>;
}
