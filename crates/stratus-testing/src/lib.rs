//! Test fixtures for exercising the CLI against a scripted platform CLI.
//!
//! Integration tests run the real binary but point `PATH` at a directory
//! containing a fake `aws` executable, so every platform call is observable
//! and deterministic.

use std::fs;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use tempfile::TempDir;

/// An isolated home directory plus a bin directory that shadows the real
/// platform CLI. Dropping the fixture removes everything.
pub struct TestFixture {
    home: TempDir,
    bin: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().expect("create home dir"),
            bin: TempDir::new().expect("create bin dir"),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    /// `PATH` value that resolves `aws` to the fixture's fake before
    /// anything on the real path.
    pub fn path_env(&self) -> String {
        let real = std::env::var("PATH").unwrap_or_default();
        format!("{}:{}", self.bin.path().display(), real)
    }

    /// Installs a fake executable that runs the given shell body. The body
    /// sees the original arguments in `"$@"` and can log them by appending
    /// to the call log.
    pub fn install_fake_bin(&self, name: &str, body: &str) -> PathBuf {
        let path = self.bin.path().join(name);
        fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write fake bin");
        #[cfg(unix)]
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("mark fake bin executable");
        path
    }

    /// Installs a fake `aws`, the binary every cloud operation shells out to.
    pub fn install_fake_aws(&self, body: &str) -> PathBuf {
        self.install_fake_bin("aws", body)
    }

    /// Location of the call log the fake can append to.
    pub fn call_log(&self) -> PathBuf {
        self.bin.path().join("calls.log")
    }

    pub fn read_call_log(&self) -> String {
        fs::read_to_string(self.call_log()).unwrap_or_default()
    }

    /// Writes a `~/.stratus/config.toml` under the fixture home.
    pub fn write_config(&self, content: &str) -> PathBuf {
        let dir = self.home.path().join(".stratus");
        fs::create_dir_all(&dir).expect("create config dir");
        let path = dir.join("config.toml");
        fs::write(&path, content).expect("write config file");
        path
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A fake that fails every call the way the platform CLI reports missing
/// credentials.
pub fn no_credentials_body() -> &'static str {
    "echo 'Unable to locate credentials. You can configure credentials by running \"aws configure\".' >&2\nexit 255"
}
