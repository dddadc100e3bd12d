//! Configuration for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the Calibre-based converter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Path to the ebook-convert binary.
    #[serde(default = "default_ebook_convert_path")]
    pub ebook_convert_path: PathBuf,

    /// Path to the xvfb-run wrapper used for rendering-dependent targets.
    #[serde(default = "default_xvfb_run_path")]
    pub xvfb_run_path: PathBuf,

    /// Base directory that all relative request paths resolve against.
    #[serde(default = "default_library_dir")]
    pub library_dir: PathBuf,

    /// Hard wall-clock ceiling for a single conversion, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_ebook_convert_path() -> PathBuf {
    PathBuf::from("ebook-convert")
}

fn default_xvfb_run_path() -> PathBuf {
    PathBuf::from("xvfb-run")
}

fn default_library_dir() -> PathBuf {
    PathBuf::from("/books")
}

fn default_timeout() -> u64 {
    300 // 5 minutes
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            ebook_convert_path: default_ebook_convert_path(),
            xvfb_run_path: default_xvfb_run_path(),
            library_dir: default_library_dir(),
            timeout_secs: default_timeout(),
        }
    }
}

impl ConverterConfig {
    /// Creates a config rooted at the given library directory.
    pub fn with_library_dir(library_dir: PathBuf) -> Self {
        Self {
            library_dir,
            ..Default::default()
        }
    }

    /// Sets the ebook-convert binary path.
    pub fn with_converter_path(mut self, path: PathBuf) -> Self {
        self.ebook_convert_path = path;
        self
    }

    /// Sets the xvfb-run wrapper path.
    pub fn with_xvfb_path(mut self, path: PathBuf) -> Self {
        self.xvfb_run_path = path;
        self
    }

    /// Sets the timeout in seconds.
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}
