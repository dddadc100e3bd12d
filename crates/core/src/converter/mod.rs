//! Converter module for ebook format conversion.
//!
//! Provides the `Converter` trait and the Calibre-backed implementation that
//! orchestrates `ebook-convert` subprocesses: path resolution against a
//! library directory, option encoding, headless display selection for PDF
//! output, timeout-bounded execution and outcome classification.
//!
//! # Example
//!
//! ```ignore
//! use bindery_core::converter::{CalibreConverter, Converter, ConversionRequest};
//!
//! let converter = CalibreConverter::with_defaults();
//!
//! let request = ConversionRequest::new("author/book.epub", "author/book.mobi");
//! let result = converter.convert(request).await?;
//! println!("wrote {} bytes", result.file_size);
//! ```

mod calibre;
mod config;
mod display;
mod error;
mod traits;
mod types;

pub use calibre::CalibreConverter;
pub use config::ConverterConfig;
pub use display::{requires_display, RENDERER_FLAGS, RENDERER_FLAGS_ENV};
pub use error::ConverterError;
pub use traits::Converter;
pub use types::{
    ConversionRequest, ConversionResult, ConvertOptions, FormatList, OptionValue,
};
