//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use git2::{Oid, Repository, RepositoryInitOptions, Signature};

use commitski::{ChoicePrompt, CommandError, CommandRunner, CommandSpec, ReviewError, SystemRunner};

/// A scratch git repository on branch `main` with a bare `origin` remote.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub remote_dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a repository with one initial commit that has not been pushed.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to open repo config");
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        config.set_bool("commit.gpgsign", false).unwrap();

        let remote_dir = tempfile::tempdir().expect("Failed to create remote dir");
        Repository::init_bare(remote_dir.path()).expect("Failed to init bare repo");
        repo.remote(
            "origin",
            remote_dir.path().to_str().expect("Invalid remote path"),
        )
        .expect("Failed to add origin remote");

        let test_repo = Self {
            dir,
            remote_dir,
            repo,
        };
        test_repo.write_file("README.md", "# scratch\n");
        test_repo.commit_all("chore: initial commit");
        test_repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_file(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write test file");
    }

    /// Commit every file in the working tree through git2.
    pub fn commit_all(&self, message: &str) -> Oid {
        let sig = Signature::now("Test User", "test@example.com").expect("Failed to create signature");
        let mut index = self.repo.index().expect("Failed to get index");
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .expect("Failed to stage files");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    pub fn head_message(&self) -> String {
        let commit = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to read HEAD commit");
        commit.message().unwrap_or_default().to_string()
    }

    pub fn head_id(&self) -> Oid {
        self.repo.head().unwrap().target().unwrap()
    }

    pub fn commit_count(&self) -> usize {
        let mut walk = self.repo.revwalk().unwrap();
        walk.push_head().unwrap();
        walk.count()
    }

    /// Tip of `main` on the bare remote, if it was ever pushed.
    pub fn remote_main(&self) -> Option<Oid> {
        let remote = Repository::open_bare(self.remote_dir.path()).unwrap();
        remote
            .find_reference("refs/heads/main")
            .ok()
            .and_then(|r| r.target())
    }
}

/// Answers the review question with a fixed string.
pub struct Scripted(pub &'static str);

impl ChoicePrompt for Scripted {
    fn ask(&self, _question: &str) -> Result<String, ReviewError> {
        Ok(self.0.to_string())
    }
}

/// Real subprocesses, except `ollama`, which prints a canned reply instead.
///
/// The reply goes through `printf` so it is captured and trimmed exactly like
/// real model output.
pub struct FakeOllama {
    reply: &'static str,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeOllama {
    pub fn new(reply: &'static str) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CommandRunner for FakeOllama {
    async fn run(&self, spec: &CommandSpec) -> Result<Option<String>, CommandError> {
        if spec.program != "ollama" {
            return SystemRunner.run(spec).await;
        }

        self.prompts
            .lock()
            .unwrap()
            .push(spec.args.last().cloned().unwrap_or_default());
        SystemRunner
            .run(&CommandSpec::new("printf", ["%s", self.reply]))
            .await
    }
}

/// Write an executable editor script that replaces the file it is given.
#[cfg(unix)]
pub fn editor_script(dir: &Path, content: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-editor.sh");
    let script = format!("#!/bin/sh\nprintf '%s' '{content}' > \"$1\"\n");
    std::fs::write(&path, script).expect("Failed to write editor script");
    let mut perms = std::fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(&path, perms).unwrap();
    path
}
