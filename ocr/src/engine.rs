use std::path::Path;
use std::process::Command;

use anyhow::Context;
use opencv::core::{Mat, Vector};
use opencv::imgcodecs::{self, IMREAD_COLOR};
use opencv::prelude::*;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::config::{ImageConfig, OcrConfig};
use crate::region::{Region, RegionText};
use crate::OcrResult;

/// Text-region extraction pipeline around an external Tesseract binary.
///
/// Holds the two configuration bundles so the same parameters are applied
/// across every stage of a run. Stages are exposed individually; see
/// [`TextExtractor::extract`] for the full chain.
pub struct TextExtractor {
    ocr: OcrConfig,
    image: ImageConfig,
}

impl TextExtractor {
    /// Build an extractor with default preprocessing parameters.
    pub fn new(ocr: OcrConfig) -> OcrResult<Self> {
        Self::with_image_config(ocr, ImageConfig::default())
    }

    /// Build an extractor, failing fast when the configured engine binary
    /// is an explicit path that does not exist.
    pub fn with_image_config(ocr: OcrConfig, image: ImageConfig) -> OcrResult<Self> {
        // A bare command name is resolved on PATH when the engine runs;
        // only an explicit path can be checked up front.
        if ocr.tesseract_cmd.components().count() > 1 && !ocr.tesseract_cmd.exists() {
            anyhow::bail!(
                "tesseract binary not found at {}",
                ocr.tesseract_cmd.display()
            );
        }
        Ok(Self { ocr, image })
    }

    /// Read an image from disk as BGR.
    pub fn load_image(&self, path: impl AsRef<Path>) -> OcrResult<Mat> {
        let path = path.as_ref();
        anyhow::ensure!(path.exists(), "image not found at {}", path.display());
        let image = imgcodecs::imread(&path.to_string_lossy(), IMREAD_COLOR)
            .with_context(|| format!("failed to read image at {}", path.display()))?;
        anyhow::ensure!(!image.empty(), "could not decode image at {}", path.display());
        Ok(image)
    }

    /// Grayscale, denoise, and binarize an image for region detection.
    ///
    /// The output is inverted so dark strokes become white foreground,
    /// which is what dilation and contour extraction operate on.
    pub fn preprocess(&self, image: &Mat) -> OcrResult<Mat> {
        let gray = image_prep::grayscale(image).context("grayscale conversion failed")?;
        let denoised = image_prep::denoise(
            &gray,
            self.image.denoise_strength,
            self.image.template_window,
            self.image.search_window,
        )
        .context("denoising failed")?;
        image_prep::adaptive_binarize(&denoised, self.image.block_size, self.image.threshold_c)
            .context("adaptive thresholding failed")
    }

    /// Find candidate text regions in a binarized image. Ordering follows
    /// contour traversal and carries no meaning.
    pub fn detect_regions(&self, binary: &Mat) -> OcrResult<Vec<Region>> {
        let dilated = image_prep::dilate_rect(
            binary,
            self.ocr.kernel_width,
            self.ocr.kernel_height,
            self.ocr.dilate_iterations,
        )
        .context("dilation failed")?;
        let rects =
            image_prep::external_bounding_rects(&dilated).context("contour extraction failed")?;

        let regions: Vec<Region> = rects
            .into_iter()
            .filter(|rect| rect.width > self.ocr.min_width && rect.height > self.ocr.min_height)
            .map(Region::from)
            .collect();
        debug!(count = regions.len(), "detected candidate text regions");
        Ok(regions)
    }

    /// Run the engine over every region concurrently. Blank recognitions
    /// and per-region failures are dropped; a failure never aborts the
    /// batch. Result order is not related to region order.
    pub fn recognize_regions(
        &self,
        image: &Mat,
        regions: &[Region],
    ) -> OcrResult<Vec<RegionText>> {
        let crops = self.crop_regions(image, regions);

        let recognize_all = || {
            crops
                .into_par_iter()
                .filter_map(|(region, crop)| self.recognize_one(region, &crop))
                .collect::<Vec<_>>()
        };

        let results = match self.ocr.worker_threads {
            Some(threads) => rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("failed to build recognition worker pool")?
                .install(recognize_all),
            None => recognize_all(),
        };
        Ok(results)
    }

    /// Convenience: load, preprocess, detect, and recognize in one call.
    pub fn extract(&self, path: impl AsRef<Path>) -> OcrResult<Vec<RegionText>> {
        let image = self.load_image(path)?;
        let binary = self.preprocess(&image)?;
        let regions = self.detect_regions(&binary)?;
        self.recognize_regions(&image, &regions)
    }

    // Crops are owned copies of each ROI so recognition tasks never share
    // the source buffer across threads. A region that does not fit the
    // image is logged and dropped, like any other per-region failure.
    fn crop_regions(&self, image: &Mat, regions: &[Region]) -> Vec<(Region, Mat)> {
        regions
            .iter()
            .filter_map(|&region| {
                match Mat::roi(image, region.to_rect()).and_then(|roi| roi.try_clone()) {
                    Ok(crop) => Some((region, crop)),
                    Err(err) => {
                        warn!(
                            x0 = region.x0,
                            y0 = region.y0,
                            x1 = region.x1,
                            y1 = region.y1,
                            error = %err,
                            "failed to crop region, dropping it"
                        );
                        None
                    }
                }
            })
            .collect()
    }

    fn recognize_one(&self, region: Region, crop: &Mat) -> Option<RegionText> {
        match self.run_engine(crop) {
            Ok(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    debug!(?region, "engine returned no text, dropping region");
                    None
                } else {
                    Some(RegionText::new(region, trimmed.to_string()))
                }
            }
            Err(err) => {
                warn!(
                    x0 = region.x0,
                    y0 = region.y0,
                    x1 = region.x1,
                    y1 = region.y1,
                    error = %err,
                    "recognition failed, dropping region"
                );
                None
            }
        }
    }

    // The engine only reads files, so each crop goes through a temp PNG.
    fn run_engine(&self, crop: &Mat) -> OcrResult<String> {
        let tmp = tempfile::Builder::new()
            .prefix("ocr-region-")
            .suffix(".png")
            .tempfile()
            .context("failed to create temp file for engine input")?;
        let tmp_path = tmp.path().to_string_lossy().into_owned();
        let written = imgcodecs::imwrite(&tmp_path, crop, &Vector::<i32>::new())
            .context("failed to encode region crop")?;
        anyhow::ensure!(written, "OpenCV failed to write region crop to {tmp_path}");

        let output = Command::new(&self.ocr.tesseract_cmd)
            .arg(&tmp_path)
            .arg("stdout")
            .arg("-l")
            .arg(self.ocr.languages.join("+"))
            .arg("--oem")
            .arg(self.ocr.oem.to_string())
            .arg("--psm")
            .arg(self.ocr.psm.to_string())
            .output()
            .with_context(|| {
                format!(
                    "failed to run {} (is it installed?)",
                    self.ocr.tesseract_cmd.display()
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            anyhow::bail!("engine exited with {}: {}", output.status, stderr.trim());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Convenience function to run the whole pipeline without keeping the
/// extractor around.
pub fn extract_text(
    ocr: OcrConfig,
    image_path: impl AsRef<Path>,
    image: Option<ImageConfig>,
) -> OcrResult<Vec<RegionText>> {
    let extractor = match image {
        Some(cfg) => TextExtractor::with_image_config(ocr, cfg)?,
        None => TextExtractor::new(ocr)?,
    };
    extractor.extract(image_path)
}
