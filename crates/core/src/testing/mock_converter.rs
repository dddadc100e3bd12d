//! Mock converter for testing.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::converter::{
    ConversionRequest, ConversionResult, Converter, ConverterError, FormatList,
};

/// Mock implementation of the Converter trait.
///
/// Provides controllable behavior for testing the HTTP layer without Calibre:
/// - Records every conversion request for assertions (including that none
///   happened at all for rejected requests)
/// - Queues scripted errors for upcoming conversions
/// - Configurable version string and format lists
///
/// # Example
///
/// ```rust,ignore
/// use bindery_core::testing::MockConverter;
///
/// let converter = MockConverter::new();
/// converter
///     .push_error(ConverterError::Timeout { timeout_secs: 300 })
///     .await;
///
/// let result = converter.convert(request).await;
/// assert!(result.is_err());
/// assert_eq!(converter.conversion_count().await, 1);
/// ```
#[derive(Debug)]
pub struct MockConverter {
    /// Recorded conversion requests, in arrival order.
    requests: Arc<RwLock<Vec<ConversionRequest>>>,
    /// Scripted errors consumed by upcoming conversions, FIFO.
    scripted_errors: Arc<RwLock<VecDeque<ConverterError>>>,
    /// File size reported for successful conversions.
    file_size: Arc<RwLock<u64>>,
    /// Version string reported by `version()`.
    version: Arc<RwLock<String>>,
    /// Format lists reported by `formats()`.
    input_formats: Arc<RwLock<Vec<String>>>,
    output_formats: Arc<RwLock<Vec<String>>>,
    /// If set, `formats()` fails with an Io error.
    fail_formats: Arc<RwLock<bool>>,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// Create a new mock converter.
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            scripted_errors: Arc::new(RwLock::new(VecDeque::new())),
            file_size: Arc::new(RwLock::new(1024)),
            version: Arc::new(RwLock::new("ebook-convert (calibre 7.0)".to_string())),
            input_formats: Arc::new(RwLock::new(vec![
                "epub".to_string(),
                "mobi".to_string(),
                "azw3".to_string(),
            ])),
            output_formats: Arc::new(RwLock::new(vec![
                "epub".to_string(),
                "mobi".to_string(),
                "pdf".to_string(),
            ])),
            fail_formats: Arc::new(RwLock::new(false)),
        }
    }

    /// Get all recorded conversion requests.
    pub async fn recorded_requests(&self) -> Vec<ConversionRequest> {
        self.requests.read().await.clone()
    }

    /// Get the number of conversions attempted.
    pub async fn conversion_count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Queue an error for the next conversion.
    pub async fn push_error(&self, error: ConverterError) {
        self.scripted_errors.write().await.push_back(error);
    }

    /// Set the file size reported on success.
    pub async fn set_file_size(&self, size: u64) {
        *self.file_size.write().await = size;
    }

    /// Set the reported version string.
    pub async fn set_version(&self, version: impl Into<String>) {
        *self.version.write().await = version.into();
    }

    /// Make `formats()` fail.
    pub async fn set_fail_formats(&self, fail: bool) {
        *self.fail_formats.write().await = fail;
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(&self, request: ConversionRequest) -> Result<ConversionResult, ConverterError> {
        self.requests.write().await.push(request.clone());

        if let Some(error) = self.scripted_errors.write().await.pop_front() {
            return Err(error);
        }

        Ok(ConversionResult {
            source_path: request.source_path,
            target_path: request.target_path,
            file_size: *self.file_size.read().await,
            duration_ms: 0,
        })
    }

    async fn version(&self) -> String {
        self.version.read().await.clone()
    }

    async fn formats(&self) -> Result<FormatList, ConverterError> {
        if *self.fail_formats.read().await {
            return Err(ConverterError::Io(std::io::Error::other(
                "format query failed",
            )));
        }

        Ok(FormatList {
            input_formats: self.input_formats.read().await.clone(),
            output_formats: self.output_formats.read().await.clone(),
        })
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_requests() {
        let converter = MockConverter::new();
        converter
            .convert(ConversionRequest::new("a.epub", "a.mobi"))
            .await
            .unwrap();
        converter
            .convert(ConversionRequest::new("b.epub", "b.pdf"))
            .await
            .unwrap();

        let requests = converter.recorded_requests().await;
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].source_path, "a.epub");
        assert_eq!(requests[1].target_path, "b.pdf");
    }

    #[tokio::test]
    async fn test_scripted_error_consumed_in_order() {
        let converter = MockConverter::new();
        converter
            .push_error(ConverterError::Timeout { timeout_secs: 300 })
            .await;

        let first = converter
            .convert(ConversionRequest::new("a.epub", "a.mobi"))
            .await;
        assert!(matches!(first, Err(ConverterError::Timeout { .. })));

        // Next conversion succeeds again
        let second = converter
            .convert(ConversionRequest::new("a.epub", "a.mobi"))
            .await;
        assert!(second.is_ok());
        assert_eq!(converter.conversion_count().await, 2);
    }

    #[tokio::test]
    async fn test_reported_file_size() {
        let converter = MockConverter::new();
        converter.set_file_size(4096).await;

        let result = converter
            .convert(ConversionRequest::new("a.epub", "a.mobi"))
            .await
            .unwrap();
        assert_eq!(result.file_size, 4096);
    }
}
