use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use encoding_rs::Encoding;
use opencv::core::{Mat, Scalar, Vector};
use opencv::imgcodecs;
use opencv::imgproc;
use opencv::prelude::*;

use crate::region::RegionText;
use crate::OcrResult;

/// Draw a green rectangle per result on a copy of the image. The input
/// buffer is never mutated.
pub fn annotate(image: &Mat, results: &[RegionText]) -> OcrResult<Mat> {
    let mut annotated = image
        .try_clone()
        .context("failed to copy image for annotation")?;
    for result in results {
        imgproc::rectangle(
            &mut annotated,
            result.region.to_rect(),
            Scalar::new(0.0, 255.0, 0.0, 0.0),
            2,
            imgproc::LINE_8,
            0,
        )?;
    }
    Ok(annotated)
}

/// Write an image to disk, creating the parent directory on demand.
pub fn save_image(image: &Mat, path: impl AsRef<Path>) -> OcrResult<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let written = imgcodecs::imwrite(&path.to_string_lossy(), image, &Vector::<i32>::new())
        .with_context(|| format!("failed to save image {}", path.display()))?;
    anyhow::ensure!(written, "OpenCV failed to write image {}", path.display());
    Ok(())
}

/// Persist the intermediate binarized buffer as `debug_binary.jpg` inside
/// `dir` for troubleshooting; returns the written path.
pub fn save_debug_binary(binary: &Mat, dir: impl AsRef<Path>) -> OcrResult<PathBuf> {
    let path = dir.as_ref().join("debug_binary.jpg");
    save_image(binary, &path)?;
    Ok(path)
}

/// One block per result: a coordinates line, a text line, and a blank
/// separator line.
pub fn format_results(results: &[RegionText]) -> String {
    let mut out = String::new();
    for result in results {
        let r = result.region;
        out.push_str(&format!(
            "Coordinates: ({}, {}, {}, {})\nText: {}\n\n",
            r.x0, r.y0, r.x1, r.y1, result.text
        ));
    }
    out
}

/// Serialize results to a text file in the requested encoding (pass
/// `encoding_rs::UTF_8` for the default). Characters the encoding cannot
/// represent are written as replacements.
pub fn write_results(
    results: &[RegionText],
    path: impl AsRef<Path>,
    encoding: &'static Encoding,
) -> OcrResult<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let formatted = format_results(results);
    let (bytes, _, _) = encoding.encode(&formatted);
    fs::write(path, bytes)
        .with_context(|| format!("failed to write results to {}", path.display()))
}

fn ensure_parent(path: &Path) -> OcrResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}
