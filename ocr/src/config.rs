use std::path::PathBuf;

/// Settings for region detection and the external recognition engine.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Tesseract binary to invoke. A bare name is resolved on PATH at
    /// invocation time; an explicit path must exist when the extractor
    /// is built.
    pub tesseract_cmd: PathBuf,
    /// Languages handed to the engine (joined with `+`).
    pub languages: Vec<String>,
    /// OCR engine mode (`--oem`).
    pub oem: u32,
    /// Page segmentation mode (`--psm`).
    pub psm: u32,
    /// Detected regions narrower than this are discarded.
    pub min_width: i32,
    /// Detected regions shorter than this are discarded.
    pub min_height: i32,
    /// Width of the rectangular structuring element used for dilation.
    pub kernel_width: i32,
    /// Height of the rectangular structuring element used for dilation.
    pub kernel_height: i32,
    /// Dilation passes used to merge nearby strokes into blocks.
    pub dilate_iterations: i32,
    /// Recognition worker pool size; `None` uses the host parallelism.
    pub worker_threads: Option<usize>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_cmd: PathBuf::from("tesseract"),
            languages: vec!["eng".to_string()],
            oem: 3,
            psm: 6,
            min_width: 20,
            min_height: 20,
            kernel_width: 5,
            kernel_height: 5,
            dilate_iterations: 3,
            worker_threads: None,
        }
    }
}

/// Preprocessing parameters, passed verbatim to the vision primitives.
#[derive(Debug, Clone, Copy)]
pub struct ImageConfig {
    /// Non-local-means filter strength.
    pub denoise_strength: f32,
    /// Template window size for denoising (odd).
    pub template_window: i32,
    /// Search window size for denoising (odd).
    pub search_window: i32,
    /// Neighborhood size for adaptive thresholding (odd).
    pub block_size: i32,
    /// Constant subtracted from the local mean when thresholding.
    pub threshold_c: f64,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            denoise_strength: 10.0,
            template_window: 7,
            search_window: 21,
            block_size: 11,
            threshold_c: 2.0,
        }
    }
}
