// simplelogin-client/src/testing.rs
//! In-memory stand-ins for the keyring and the terminal.

use crate::credentials::{CredentialError, CredentialStore};
use crate::prompt::Prompt;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::sync::Mutex;

#[derive(Default)]
pub(crate) struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
}

impl MemoryStore {
    pub(crate) fn with_entry(account: &str, secret: &str) -> Self {
        let store = Self::default();
        store
            .entries
            .lock()
            .unwrap()
            .insert(account.to_string(), secret.to_string());
        store
    }

    /// Every `set` call, in order
    pub(crate) fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, account: &str) -> Result<Option<String>, CredentialError> {
        Ok(self.entries.lock().unwrap().get(account).cloned())
    }

    fn set(&self, account: &str, secret: &str) -> Result<(), CredentialError> {
        self.writes
            .lock()
            .unwrap()
            .push((account.to_string(), secret.to_string()));
        self.entries
            .lock()
            .unwrap()
            .insert(account.to_string(), secret.to_string());
        Ok(())
    }

    fn delete(&self, account: &str) -> Result<bool, CredentialError> {
        Ok(self.entries.lock().unwrap().remove(account).is_some())
    }
}

/// Answers prompts from queues; an unexpected prompt is an error
#[derive(Default)]
pub(crate) struct ScriptedPrompt {
    codes: Mutex<VecDeque<String>>,
    confirms: Mutex<VecDeque<bool>>,
    selects: Mutex<VecDeque<usize>>,
    multi_selects: Mutex<VecDeque<Vec<usize>>>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedPrompt {
    pub(crate) fn with_code(self, code: &str) -> Self {
        self.codes.lock().unwrap().push_back(code.to_string());
        self
    }

    pub(crate) fn with_confirm(self, answer: bool) -> Self {
        self.confirms.lock().unwrap().push_back(answer);
        self
    }

    pub(crate) fn with_select(self, index: usize) -> Self {
        self.selects.lock().unwrap().push_back(index);
        self
    }

    pub(crate) fn with_multi_select(self, indices: Vec<usize>) -> Self {
        self.multi_selects.lock().unwrap().push_back(indices);
        self
    }

    /// Messages shown so far
    pub(crate) fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }

    fn record(&self, message: &str) {
        self.asked.lock().unwrap().push(message.to_string());
    }
}

fn unexpected(kind: &str) -> io::Error {
    io::Error::new(io::ErrorKind::UnexpectedEof, format!("unexpected {} prompt", kind))
}

impl Prompt for ScriptedPrompt {
    fn one_time_code(&self) -> io::Result<String> {
        self.record("one-time code");
        self.codes.lock().unwrap().pop_front().ok_or_else(|| unexpected("code"))
    }

    fn confirm(&self, message: &str) -> io::Result<bool> {
        self.record(message);
        self.confirms
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| unexpected("confirm"))
    }

    fn select(&self, message: &str, _options: &[String]) -> io::Result<usize> {
        self.record(message);
        self.selects
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| unexpected("select"))
    }

    fn multi_select(&self, message: &str, _options: &[String]) -> io::Result<Vec<usize>> {
        self.record(message);
        self.multi_selects
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| unexpected("multi-select"))
    }
}
