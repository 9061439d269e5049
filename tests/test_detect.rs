mod common;

use std::fs;

use autolabel::detect::{ContourDetector, Detector};
use autolabel::pipeline::{select_previews, PREVIEW_LIMIT};
use common::write_test_image;

#[test]
fn contour_detector_finds_high_contrast_rectangle() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let source = dir.path().join("source");
    let results = dir.path().join("results");
    fs::create_dir_all(&source)?;

    write_test_image(&source, "rect.png");

    let run = ContourDetector::new().run(&source, &results)?;

    assert_eq!(run.processed.len(), 1);
    assert!(run.annotated_dir.join("rect.jpg").is_file());

    let label = fs::read_to_string(run.labels_dir.join("rect.txt"))?;
    for line in label.lines() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[0], "0");
        for field in &fields[1..] {
            let value: f64 = field.parse()?;
            assert!((0.0..=1.0).contains(&value), "out of range: {line}");
        }
    }

    // At least one box roughly over the drawn rectangle
    let centered = label.lines().any(|line| {
        let fields: Vec<f64> = line
            .split_whitespace()
            .skip(1)
            .map(|f| f.parse().unwrap())
            .collect();
        (0.3..=0.7).contains(&fields[0]) && (0.3..=0.7).contains(&fields[1])
    });
    assert!(centered, "no detection near the rectangle: {label}");
    Ok(())
}

#[test]
fn non_image_files_are_skipped() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let source = dir.path().join("source");
    let results = dir.path().join("results");
    fs::create_dir_all(&source)?;

    write_test_image(&source, "rect.png");
    fs::write(source.join("readme.txt"), "not an image")?;

    let run = ContourDetector::new().run(&source, &results)?;
    assert_eq!(run.processed.len(), 1);
    Ok(())
}

#[test]
fn previews_prefer_predict_dir_and_cap_at_limit() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let results = dir.path().join("results");
    let predict = results.join("predict");
    fs::create_dir_all(&predict)?;
    fs::write(results.join("stray.jpg"), b"root level")?;
    for i in 0..7 {
        fs::write(predict.join(format!("img{i}.jpg")), format!("jpeg {i}"))?;
    }

    let before: Vec<Vec<u8>> = (0..7)
        .map(|i| fs::read(predict.join(format!("img{i}.jpg"))).unwrap())
        .collect();

    let previews = select_previews(&results, PREVIEW_LIMIT)?;

    assert_eq!(previews.len(), PREVIEW_LIMIT);
    for path in &previews {
        assert!(path.starts_with(&predict));
    }

    // Selection must not mutate what it reads
    let after: Vec<Vec<u8>> = (0..7)
        .map(|i| fs::read(predict.join(format!("img{i}.jpg"))).unwrap())
        .collect();
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn previews_fall_back_to_results_root() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let results = dir.path().join("results");
    fs::create_dir_all(&results)?;
    fs::write(results.join("only.jpg"), b"jpeg")?;
    fs::write(results.join("ignored.png"), b"png")?;

    let previews = select_previews(&results, PREVIEW_LIMIT)?;

    assert_eq!(previews.len(), 1);
    assert!(previews[0].ends_with("only.jpg"));
    Ok(())
}

#[test]
fn missing_results_dir_yields_no_previews() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let previews = select_previews(&dir.path().join("nowhere"), PREVIEW_LIMIT)?;
    assert!(previews.is_empty());
    Ok(())
}
