//! Headless display selection for rendering-dependent output formats.
//!
//! Calibre drives Qt WebEngine when producing PDF, which needs an X display
//! and refuses to sandbox when running as root in a container. Such targets
//! get wrapped in `xvfb-run` with the sandbox and GPU disabled; every other
//! format runs the converter directly with the inherited environment.

use std::path::Path;

/// Environment variable read by Calibre's embedded Chromium renderer.
pub const RENDERER_FLAGS_ENV: &str = "QTWEBENGINE_CHROMIUM_FLAGS";

/// Flags required when the renderer runs as root without a GPU.
pub const RENDERER_FLAGS: &str = "--no-sandbox --disable-gpu";

/// Whether the target format needs the rendering engine, and therefore a
/// virtual display. PDF is the only such format handled today.
pub fn requires_display(target: &Path) -> bool {
    target
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_requires_display() {
        assert!(requires_display(Path::new("books/novel.pdf")));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(requires_display(Path::new("books/NOVEL.PDF")));
        assert!(requires_display(Path::new("books/novel.Pdf")));
    }

    #[test]
    fn test_other_formats_run_directly() {
        assert!(!requires_display(Path::new("books/novel.epub")));
        assert!(!requires_display(Path::new("books/novel.mobi")));
        assert!(!requires_display(Path::new("books/novel.azw3")));
    }

    #[test]
    fn test_no_extension_runs_directly() {
        assert!(!requires_display(Path::new("books/novel")));
        assert!(!requires_display(Path::new("books/pdf")));
    }
}
