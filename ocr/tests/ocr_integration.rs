use ocr::{OcrConfig, TextExtractor};
use opencv::core::{Mat, Point, Scalar, CV_8UC3};
use opencv::imgproc;

// Heavy test that shells out to a real engine; run with:
// cargo test -p ocr -- --ignored
#[test]
#[ignore = "requires a tesseract installation on PATH"]
fn recognizes_rendered_text_end_to_end() {
    let mut image = Mat::new_rows_cols_with_default(
        200,
        600,
        CV_8UC3,
        Scalar::new(255.0, 255.0, 255.0, 0.0),
    )
    .unwrap();
    imgproc::put_text(
        &mut image,
        "HELLO WORLD",
        Point::new(40, 120),
        imgproc::FONT_HERSHEY_SIMPLEX,
        2.0,
        Scalar::new(0.0, 0.0, 0.0, 0.0),
        4,
        imgproc::LINE_8,
        false,
    )
    .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("hello.png");
    ocr::save_image(&image, &input).expect("input image persists");

    let extractor = TextExtractor::new(OcrConfig::default()).expect("extractor builds");
    let results = extractor.extract(&input).expect("pipeline runs");

    assert!(!results.is_empty(), "expected at least one recognized region");
    for result in &results {
        assert!(
            !result.text.trim().is_empty(),
            "blank text should have been dropped: {result:?}"
        );
    }
    let combined = results
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
        .to_uppercase();
    assert!(combined.contains("HELLO"), "got: {combined}");
}
