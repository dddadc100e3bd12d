//! Calibre-based converter implementation.
//!
//! Orchestrates one `ebook-convert` subprocess per request: resolve paths
//! against the library directory, encode options into argument tokens, wrap
//! rendering-dependent targets in a virtual display, run under a timeout and
//! classify the outcome.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use super::config::ConverterConfig;
use super::display::{requires_display, RENDERER_FLAGS, RENDERER_FLAGS_ENV};
use super::error::ConverterError;
use super::traits::Converter;
use super::types::{ConversionRequest, ConversionResult, ConvertOptions, FormatList};

/// Sentinel returned when the version query faults.
const UNKNOWN_VERSION: &str = "unknown";

/// Calibre-based converter implementation.
pub struct CalibreConverter {
    config: ConverterConfig,
}

impl CalibreConverter {
    /// Creates a new Calibre converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Resolves a caller-supplied relative path against the library
    /// directory. A plain join: no normalization, no traversal rejection;
    /// existence checks downstream surface bad paths.
    fn resolve(&self, relative: &str) -> PathBuf {
        self.config.library_dir.join(relative)
    }

    /// Composes the program and argument vector for one conversion.
    ///
    /// Every argument is a discrete token; paths and option values are never
    /// passed through a shell. Targets that need the rendering engine get the
    /// `xvfb-run -a` prefix.
    fn build_command(
        &self,
        source: &Path,
        target: &Path,
        options: &ConvertOptions,
    ) -> (PathBuf, Vec<String>) {
        let mut args = Vec::new();

        let program = if requires_display(target) {
            // -a picks a free X server number, so concurrent wraps don't clash
            args.push("-a".to_string());
            args.push(self.config.ebook_convert_path.to_string_lossy().to_string());
            self.config.xvfb_run_path.clone()
        } else {
            self.config.ebook_convert_path.clone()
        };

        args.push(source.to_string_lossy().to_string());
        args.push(target.to_string_lossy().to_string());
        args.extend(options.to_args());

        (program, args)
    }

    /// Runs ebook-convert with a single query flag and returns its stdout.
    async fn query(&self, flag: &str) -> Result<String, ConverterError> {
        let output = Command::new(&self.config.ebook_convert_path)
            .arg(flag)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.map_spawn_error(e, &self.config.ebook_convert_path))?;

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    fn map_spawn_error(&self, error: std::io::Error, program: &Path) -> ConverterError {
        if error.kind() == std::io::ErrorKind::NotFound {
            ConverterError::ConverterNotFound {
                path: program.to_path_buf(),
            }
        } else {
            ConverterError::Io(error)
        }
    }

    async fn run_conversion(
        &self,
        request: &ConversionRequest,
    ) -> Result<ConversionResult, ConverterError> {
        let start = Instant::now();

        if request.source_path.is_empty() || request.target_path.is_empty() {
            return Err(ConverterError::invalid_request(
                "source_path and target_path are required",
            ));
        }

        let full_source = self.resolve(&request.source_path);
        let full_target = self.resolve(&request.target_path);

        // Short-circuit before spawning anything
        if !full_source.exists() {
            return Err(ConverterError::SourceNotFound {
                path: request.source_path.clone(),
            });
        }

        // Ensure the target directory exists
        if let Some(parent) = full_target.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|_| {
                ConverterError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                }
            })?;
        }

        let (program, args) = self.build_command(&full_source, &full_target, &request.options);
        debug!(program = %program.display(), ?args, "running ebook-convert");

        let mut command = Command::new(&program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        if requires_display(&full_target) {
            command.env(RENDERER_FLAGS_ENV, RENDERER_FLAGS);
        }

        let child = command
            .spawn()
            .map_err(|e| self.map_spawn_error(e, &program))?;

        let timeout_duration = Duration::from_secs(self.config.timeout_secs);
        let output = match timeout(timeout_duration, child.wait_with_output()).await {
            Ok(result) => result?,
            Err(_) => {
                // Dropping the wait future kills the child (kill_on_drop);
                // no partial output is salvaged.
                warn!(
                    source = %request.source_path,
                    timeout_secs = self.config.timeout_secs,
                    "conversion timed out"
                );
                return Err(ConverterError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                });
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if !output.status.success() {
            warn!(
                source = %request.source_path,
                code = ?output.status.code(),
                "ebook-convert exited with error"
            );
            return Err(ConverterError::conversion_failed(stderr, stdout));
        }

        // Zero exit with no output file is a silent converter failure
        let metadata = tokio::fs::metadata(&full_target).await.map_err(|_| {
            ConverterError::OutputMissing {
                path: full_target.clone(),
            }
        })?;

        info!(
            source = %request.source_path,
            target = %request.target_path,
            file_size = metadata.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "conversion completed"
        );

        Ok(ConversionResult {
            source_path: request.source_path.clone(),
            target_path: request.target_path.clone(),
            file_size: metadata.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[async_trait]
impl Converter for CalibreConverter {
    fn name(&self) -> &str {
        "calibre"
    }

    async fn convert(&self, request: ConversionRequest) -> Result<ConversionResult, ConverterError> {
        self.run_conversion(&request).await
    }

    async fn version(&self) -> String {
        match self.query("--version").await {
            Ok(stdout) => stdout
                .lines()
                .next()
                .map(|line| line.trim().to_string())
                .filter(|line| !line.is_empty())
                .unwrap_or_else(|| UNKNOWN_VERSION.to_string()),
            Err(_) => UNKNOWN_VERSION.to_string(),
        }
    }

    async fn formats(&self) -> Result<FormatList, ConverterError> {
        let input_formats = self.query("--input-fmts").await?;
        let output_formats = self.query("--output-fmts").await?;

        Ok(FormatList {
            input_formats: input_formats
                .split_whitespace()
                .map(str::to_string)
                .collect(),
            output_formats: output_formats
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        })
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        self.query("--version").await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::converter::types::OptionValue;

    fn converter_at(library_dir: &str) -> CalibreConverter {
        CalibreConverter::new(ConverterConfig::with_library_dir(PathBuf::from(library_dir)))
    }

    #[test]
    fn test_resolve_joins_library_dir() {
        let converter = converter_at("/books");
        assert_eq!(
            converter.resolve("author/title.epub"),
            PathBuf::from("/books/author/title.epub")
        );
    }

    #[test]
    fn test_build_command_plain_target() {
        let converter = converter_at("/books");
        let (program, args) = converter.build_command(
            Path::new("/books/in.epub"),
            Path::new("/books/out.mobi"),
            &ConvertOptions::new(),
        );

        assert_eq!(program, PathBuf::from("ebook-convert"));
        assert_eq!(args, vec!["/books/in.epub", "/books/out.mobi"]);
    }

    #[test]
    fn test_build_command_pdf_target_gets_display_wrapper() {
        let converter = converter_at("/books");
        let (program, args) = converter.build_command(
            Path::new("/books/in.epub"),
            Path::new("/books/out.pdf"),
            &ConvertOptions::new(),
        );

        assert_eq!(program, PathBuf::from("xvfb-run"));
        assert_eq!(
            args,
            vec!["-a", "ebook-convert", "/books/in.epub", "/books/out.pdf"]
        );
    }

    #[test]
    fn test_build_command_appends_options_in_order() {
        let converter = converter_at("/books");
        let mut options = ConvertOptions::new();
        options.push("format", OptionValue::Text("epub".to_string()));
        options.push("verbose", OptionValue::Bool(true));

        let (_, args) = converter.build_command(
            Path::new("/books/in.epub"),
            Path::new("/books/out.azw3"),
            &options,
        );

        assert_eq!(
            args,
            vec![
                "/books/in.epub",
                "/books/out.azw3",
                "--format",
                "epub",
                "--verbose"
            ]
        );
    }

    #[test]
    fn test_build_command_keeps_spaced_values_as_one_token() {
        let converter = converter_at("/books");
        let mut options = ConvertOptions::new();
        options.push("title", OptionValue::Text("War and Peace".to_string()));

        let (_, args) = converter.build_command(
            Path::new("/books/a book.epub"),
            Path::new("/books/a book.mobi"),
            &options,
        );

        assert!(args.contains(&"/books/a book.epub".to_string()));
        assert!(args.contains(&"War and Peace".to_string()));
    }

    #[tokio::test]
    async fn test_empty_paths_rejected_before_any_io() {
        // The configured binary does not exist; an InvalidRequest proves we
        // never got as far as touching the filesystem or spawning.
        let converter = CalibreConverter::new(
            ConverterConfig::with_library_dir(PathBuf::from("/nonexistent"))
                .with_converter_path(PathBuf::from("/nonexistent/ebook-convert")),
        );

        let result = converter.convert(ConversionRequest::new("", "out.epub")).await;
        assert!(matches!(result, Err(ConverterError::InvalidRequest { .. })));

        let result = converter.convert(ConversionRequest::new("in.epub", "")).await;
        assert!(matches!(result, Err(ConverterError::InvalidRequest { .. })));
    }

    #[tokio::test]
    async fn test_missing_source_short_circuits_before_spawn() {
        let temp_dir = tempfile::tempdir().unwrap();
        let converter = CalibreConverter::new(
            ConverterConfig::with_library_dir(temp_dir.path().to_path_buf())
                .with_converter_path(PathBuf::from("/nonexistent/ebook-convert")),
        );

        let result = converter
            .convert(ConversionRequest::new("absent.epub", "absent.mobi"))
            .await;

        // SourceNotFound, not ConverterNotFound: nothing was spawned.
        match result {
            Err(ConverterError::SourceNotFound { path }) => assert_eq!(path, "absent.epub"),
            other => panic!("expected SourceNotFound, got {:?}", other.map(|_| ())),
        }
    }
}
