//! Trait definitions for the converter module.

use async_trait::async_trait;

use super::error::ConverterError;
use super::types::{ConversionRequest, ConversionResult, FormatList};

/// A converter that can transform ebook files between formats.
///
/// Implementations hold no mutable state; concurrent calls are independent.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Runs one conversion to completion.
    async fn convert(&self, request: ConversionRequest) -> Result<ConversionResult, ConverterError>;

    /// Returns the converter's version string, or `"unknown"` if the
    /// version query itself faults.
    async fn version(&self) -> String;

    /// Lists the input and output formats the converter supports.
    async fn formats(&self) -> Result<FormatList, ConverterError>;

    /// Validates that the converter is properly configured and ready.
    async fn validate(&self) -> Result<(), ConverterError>;
}
