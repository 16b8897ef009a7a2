//! Test harness for integration tests.

// Allow dead code since this is a test utility with methods for future tests
#![allow(dead_code)]

use assert_cmd::Command;
use garden::domain::{Note, NoteId};
use garden::store::{JsonStore, NewNote, NoteStore, NoteUpdate};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ===========================================
// Test Environment
// ===========================================

/// Isolated test environment with a temporary garden file.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Provides methods for seeding notes and building CLI commands.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the garden file
    garden_file: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let garden_file = temp_dir.path().join("garden.json");
        Self {
            _temp_dir: temp_dir,
            garden_file,
        }
    }

    /// Returns the path to the garden file.
    pub fn garden_file(&self) -> &Path {
        &self.garden_file
    }

    /// Returns the path where uploaded files are stored.
    pub fn uploads_dir(&self) -> PathBuf {
        self._temp_dir.path().join("uploads")
    }

    /// Seeds a note with the given title, returning the created record.
    pub fn add_note(&self, title: &str) -> Note {
        self.add_note_with(NewNote::titled(title))
    }

    /// Seeds a note from full creation fields, returning the created record.
    pub fn add_note_with(&self, new: NewNote) -> Note {
        let mut store = JsonStore::open(&self.garden_file).expect("Failed to open garden file");
        store.create_note(new).expect("Failed to seed note")
    }

    /// Rewrites a seeded note's content, re-deriving its links.
    pub fn update_content(&self, id: &NoteId, content: &str) -> Note {
        let mut store = JsonStore::open(&self.garden_file).expect("Failed to open garden file");
        store
            .update_note(
                id,
                NoteUpdate {
                    content: Some(content.to_string()),
                    ..NoteUpdate::default()
                },
            )
            .expect("Failed to update note")
    }

    /// Writes a file into the temp directory and returns its path.
    pub fn write_file(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self._temp_dir.path().join(name);
        std::fs::write(&path, bytes).expect("Failed to write file");
        path
    }

    /// Creates a GardenCommand configured for this test environment.
    pub fn cmd(&self) -> GardenCommand {
        GardenCommand::new().file(&self.garden_file)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================
// Command Wrapper
// ===========================================

/// Fluent wrapper around `assert_cmd::Command` for the `garden` binary.
pub struct GardenCommand {
    args: Vec<String>,
    envs: Vec<(String, String)>,
}

impl GardenCommand {
    /// Creates a new command for the `garden` binary.
    pub fn new() -> Self {
        Self {
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Sets the `--file` option to specify the garden file.
    pub fn file(mut self, path: &Path) -> Self {
        self.args.push("--file".to_string());
        self.args.push(path.to_string_lossy().to_string());
        self
    }

    /// Adds arguments to the command.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.args
            .extend(args.into_iter().map(|s| s.as_ref().to_string()));
        self
    }

    /// Sets an environment variable for the command.
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Runs the command and returns an Assert for making assertions.
    pub fn assert(self) -> assert_cmd::assert::Assert {
        let mut cmd = Command::cargo_bin("garden").expect("Failed to find garden binary");
        cmd.args(&self.args);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        cmd.assert()
    }

    /// Runs the command, expects success, and returns stdout as a string.
    pub fn output_success(self) -> String {
        let output = self.assert().success().get_output().stdout.clone();
        String::from_utf8(output).expect("Output was not valid UTF-8")
    }

    /// Runs the command, expects success, and parses stdout as JSON.
    pub fn output_json<T: DeserializeOwned>(self) -> T {
        let output = self.output_success();
        serde_json::from_str(&output).expect("Failed to parse output as JSON")
    }

    // ===========================================
    // Command Shortcuts
    // ===========================================

    /// Configures for the `new` command with a title.
    pub fn new_note(self, title: &str) -> Self {
        self.args(["new", title])
    }

    /// Configures for the `ls` command.
    pub fn ls(self) -> Self {
        self.args(["ls"])
    }

    /// Configures for the `tree` command.
    pub fn tree(self) -> Self {
        self.args(["tree"])
    }

    /// Configures for the `show` command with an identifier.
    pub fn show(self, note: &str) -> Self {
        self.args(["show", note])
    }

    /// Configures for the `rm` command with an identifier.
    pub fn rm(self, note: &str) -> Self {
        self.args(["rm", note])
    }

    /// Configures for the `search` command with a query.
    pub fn search(self, query: &str) -> Self {
        self.args(["search", query])
    }

    /// Configures for the `backlinks` command with an identifier.
    pub fn backlinks(self, note: &str) -> Self {
        self.args(["backlinks", note])
    }

    /// Configures for the `graph` command.
    pub fn graph(self) -> Self {
        self.args(["graph"])
    }

    /// Adds `--format json` to the command.
    pub fn format_json(self) -> Self {
        self.args(["--format", "json"])
    }
}

impl Default for GardenCommand {
    fn default() -> Self {
        Self::new()
    }
}
