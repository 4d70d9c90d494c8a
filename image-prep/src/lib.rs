//! Thin wrappers over the OpenCV primitives used to turn a color image
//! into a binary buffer suitable for contour-based text region detection.
//!
//! Every function is a single library call with its parameters passed
//! through verbatim; no custom numerical work happens here.

use opencv::core::{Mat, Point, Rect, Size, Vector, BORDER_CONSTANT};
use opencv::imgproc;
use opencv::photo;

/// Convert a BGR image to single-channel grayscale.
pub fn grayscale(image: &Mat) -> opencv::Result<Mat> {
    let mut gray = Mat::default();
    imgproc::cvt_color(
        image,
        &mut gray,
        imgproc::COLOR_BGR2GRAY,
        0,
    )?;
    Ok(gray)
}

/// Non-local-means denoising of a grayscale image. `strength` is the
/// filter parameter `h`; the window sizes must be odd.
pub fn denoise(
    image: &Mat,
    strength: f32,
    template_window: i32,
    search_window: i32,
) -> opencv::Result<Mat> {
    let mut denoised = Mat::default();
    photo::fast_nl_means_denoising(image, &mut denoised, strength, template_window, search_window)?;
    Ok(denoised)
}

/// Adaptive Gaussian threshold producing an inverted two-level buffer:
/// dark strokes become 255 (foreground), background becomes 0.
pub fn adaptive_binarize(image: &Mat, block_size: i32, c: f64) -> opencv::Result<Mat> {
    let mut binary = Mat::default();
    imgproc::adaptive_threshold(
        image,
        &mut binary,
        255.0,
        imgproc::ADAPTIVE_THRESH_GAUSSIAN_C,
        imgproc::THRESH_BINARY_INV,
        block_size,
        c,
    )?;
    Ok(binary)
}

/// Dilate a binary buffer with a rectangular structuring element to merge
/// nearby strokes into connected blobs.
pub fn dilate_rect(
    image: &Mat,
    kernel_width: i32,
    kernel_height: i32,
    iterations: i32,
) -> opencv::Result<Mat> {
    let kernel = imgproc::get_structuring_element(
        imgproc::MORPH_RECT,
        Size::new(kernel_width, kernel_height),
        Point::new(-1, -1),
    )?;
    let mut dilated = Mat::default();
    imgproc::dilate(
        image,
        &mut dilated,
        &kernel,
        Point::new(-1, -1),
        iterations,
        BORDER_CONSTANT,
        imgproc::morphology_default_border_value()?,
    )?;
    Ok(dilated)
}

/// Bounding rectangles of the external contours of a binary buffer.
/// Nested contours are ignored; the returned order follows contour
/// traversal and carries no meaning.
pub fn external_bounding_rects(binary: &Mat) -> opencv::Result<Vec<Rect>> {
    let mut contours = Vector::<Vector<Point>>::new();
    imgproc::find_contours(
        binary,
        &mut contours,
        imgproc::RETR_EXTERNAL,
        imgproc::CHAIN_APPROX_SIMPLE,
        Point::new(0, 0),
    )?;

    let mut rects = Vec::with_capacity(contours.len());
    for contour in contours.iter() {
        rects.push(imgproc::bounding_rect(&contour)?);
    }
    Ok(rects)
}
