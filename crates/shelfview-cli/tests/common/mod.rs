#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use serde_json::json;
use tempfile::TempDir;
use url::Url;

/// A temp directory holding a small catalog and no config file.
pub struct Fixture {
    pub dir: TempDir,
    pub catalog: PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let catalog = dir.path().join("catalog.json");
        let docs = json!({
            "numFound": 5,
            "docs": [
                {
                    "title": "The Hobbit",
                    "author_name": ["J.R.R. Tolkien"],
                    "first_publish_year": 1937,
                    "ratings_average": 4.3,
                    "subject": ["Fantasy", "Dragons"]
                },
                {
                    "title": "The Silmarillion",
                    "author_name": ["J.R.R. Tolkien"],
                    "first_publish_year": 1977
                },
                {
                    "title": "Farmer Giles of Ham",
                    "author_name": ["J.R.R. Tolkien"],
                    "first_publish_year": 1949,
                    "ratings_average": 3.8
                },
                { "title": "Emma", "author_name": ["Jane Austen"], "first_publish_year": 1815 },
                { "title": "Persuasion", "author_name": ["Jane Austen"] }
            ]
        });
        std::fs::write(&catalog, serde_json::to_vec_pretty(&docs).unwrap()).unwrap();
        Self { dir, catalog }
    }

    pub fn source_url(&self) -> String {
        Url::from_file_path(&self.catalog)
            .expect("Failed to convert path to file URL")
            .to_string()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_shelfview"));
        cmd.args(args);
        cmd.current_dir(self.dir.path());
        cmd.env("SHELFVIEW_CONFIG", self.path("config.json"));
        cmd.env("SHELFVIEW_SOURCE", self.source_url());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("RUST_LOG");
        cmd
    }

    /// Run the CLI with arguments.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args).output().expect("Failed to execute CLI")
    }

    /// Run the CLI and expect success.
    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert_success(args, &output);
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    /// Run the CLI with `input` piped to stdin and expect success.
    pub fn run_with_input(&self, args: &[&str], input: &str) -> String {
        let mut child = self
            .command(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to execute CLI");
        child
            .stdin
            .take()
            .unwrap()
            .write_all(input.as_bytes())
            .unwrap();
        let output = child.wait_with_output().unwrap();
        assert_success(args, &output);
        String::from_utf8_lossy(&output.stdout).to_string()
    }
}

fn assert_success(args: &[&str], output: &Output) {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}
