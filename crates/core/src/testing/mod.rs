//! Testing utilities and mock implementations for E2E tests.
//!
//! Provides a mock `Converter` so the HTTP layer can be exercised without a
//! Calibre installation.

mod mock_converter;

pub use mock_converter::MockConverter;
