//! Text extraction pipeline: load an image, binarize it, locate candidate
//! text regions through dilation and contour detection, then fan the
//! regions out to an external Tesseract binary for recognition.
//!
//! Every stage is a near-pure transformation executed once per run.
//! Per-region recognition failures are logged and dropped; only
//! configuration, load, and output I/O errors are fatal.

mod config;
mod engine;
mod region;
mod render;

pub use config::{ImageConfig, OcrConfig};
pub use engine::{TextExtractor, extract_text};
pub use region::{Region, RegionText};
pub use render::{annotate, format_results, save_debug_binary, save_image, write_results};

/// Crate-wide result type.
pub type OcrResult<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::Rect;
    use std::path::PathBuf;

    #[test]
    fn region_converts_from_rect() {
        let region: Region = Rect::new(5, 10, 20, 30).into();
        assert_eq!(region, Region::new(5, 10, 25, 40));
        assert_eq!(region.width(), 20);
        assert_eq!(region.height(), 30);
    }

    #[test]
    fn region_shrinks_at_negative_origin() {
        // The part above/left of the image is cut off, not shifted inside.
        let region: Region = Rect::new(-4, -2, 20, 30).into();
        assert_eq!(region, Region::new(0, 0, 16, 28));
        assert_eq!(region.width(), 16);
        assert_eq!(region.height(), 28);
    }

    #[test]
    fn configs_apply_defaults() {
        let ocr = OcrConfig::default();
        assert_eq!(ocr.languages, vec!["eng".to_string()]);
        assert_eq!(ocr.oem, 3);
        assert_eq!(ocr.psm, 6);
        assert_eq!((ocr.min_width, ocr.min_height), (20, 20));
        assert!(ocr.worker_threads.is_none());

        let image = ImageConfig::default();
        assert_eq!(image.block_size, 11);
        assert_eq!(image.threshold_c, 2.0);
    }

    #[test]
    fn bare_engine_name_is_accepted() {
        assert!(TextExtractor::new(OcrConfig::default()).is_ok());
    }

    #[test]
    fn missing_engine_path_fails_fast() {
        let config = OcrConfig {
            tesseract_cmd: PathBuf::from("/nonexistent/bin/tesseract"),
            ..OcrConfig::default()
        };
        assert!(TextExtractor::new(config).is_err());
    }

    #[test]
    fn format_results_writes_coordinate_blocks() {
        let results = vec![RegionText::new(
            Region::new(0, 0, 50, 20),
            "Hello".to_string(),
        )];
        assert_eq!(
            format_results(&results),
            "Coordinates: (0, 0, 50, 20)\nText: Hello\n\n"
        );
    }

    #[test]
    fn format_results_on_empty_input_is_empty() {
        assert_eq!(format_results(&[]), "");
    }

    #[test]
    fn write_results_honors_requested_encoding() {
        let results = vec![RegionText::new(
            Region::new(0, 0, 50, 20),
            "café".to_string(),
        )];
        let dir = tempfile::tempdir().expect("tempdir");

        let utf8_path = dir.path().join("utf8.txt");
        write_results(&results, &utf8_path, encoding_rs::UTF_8).expect("utf-8 write");
        assert_eq!(
            std::fs::read(&utf8_path).expect("read back"),
            "Coordinates: (0, 0, 50, 20)\nText: café\n\n".as_bytes()
        );

        let latin_path = dir.path().join("latin1.txt");
        write_results(&results, &latin_path, encoding_rs::WINDOWS_1252)
            .expect("windows-1252 write");
        let bytes = std::fs::read(&latin_path).expect("read back");
        assert!(
            bytes.contains(&0xE9),
            "expected a single-byte e-acute, got {bytes:?}"
        );
        assert!(std::str::from_utf8(&bytes).is_err(), "output was not re-encoded");
    }
}
