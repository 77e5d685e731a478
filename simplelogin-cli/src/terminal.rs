// simplelogin-cli/src/terminal.rs
use dialoguer::{Confirm, Input, MultiSelect, Password, Select};
use simplelogin_client::Prompt;
use std::io;

fn io_error(err: dialoguer::Error) -> io::Error {
    io::Error::other(err)
}

pub fn ask_email() -> io::Result<String> {
    Input::<String>::new()
        .with_prompt("Enter your email")
        .interact_text()
        .map_err(io_error)
}

pub fn ask_password() -> io::Result<String> {
    Password::new()
        .with_prompt("Enter your password")
        .interact()
        .map_err(io_error)
}

/// Prompts backed by the controlling terminal
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn one_time_code(&self) -> io::Result<String> {
        Password::new()
            .with_prompt("Enter your OTP")
            .interact()
            .map_err(io_error)
    }

    fn confirm(&self, message: &str) -> io::Result<bool> {
        Confirm::new()
            .with_prompt(message)
            .default(false)
            .interact()
            .map_err(io_error)
    }

    fn select(&self, message: &str, options: &[String]) -> io::Result<usize> {
        Select::new()
            .with_prompt(message)
            .items(options)
            .default(0)
            .interact()
            .map_err(io_error)
    }

    fn multi_select(&self, message: &str, options: &[String]) -> io::Result<Vec<usize>> {
        MultiSelect::new()
            .with_prompt(message)
            .items(options)
            .interact()
            .map_err(io_error)
    }
}
