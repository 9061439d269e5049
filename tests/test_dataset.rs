mod common;

use std::fs;

use autolabel::dataset;
use autolabel::detect::Detector;
use common::{write_test_image, StubDetector};

#[test]
fn assemble_filters_extensions_case_insensitively() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let source = dir.path().join("source");
    let labels = dir.path().join("detector_labels");
    let output = dir.path().join("output");
    fs::create_dir_all(&source)?;
    fs::create_dir_all(&labels)?;
    fs::create_dir_all(&output)?;

    write_test_image(&source, "a.JPG");
    write_test_image(&source, "b.PnG");
    fs::write(source.join("notes.txt"), "not an image")?;
    fs::write(labels.join("a.txt"), "0 0.5 0.5 0.5 0.5\n")?;

    let dirs = dataset::assemble(&source, &labels, &output)?;

    assert!(dirs.images_dir.join("a.JPG").is_file());
    assert!(dirs.images_dir.join("b.PnG").is_file());
    assert!(!dirs.images_dir.join("notes.txt").exists());
    assert_eq!(dirs.image_count, 2);

    // Labels are moved, not copied
    assert!(dirs.labels_dir.join("a.txt").is_file());
    assert!(!labels.join("a.txt").exists());
    assert_eq!(dirs.label_count, 1);

    // Originals stay in place
    assert!(source.join("a.JPG").is_file());
    Ok(())
}

#[test]
fn every_processed_image_gets_a_matching_label() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let source = dir.path().join("source");
    let output = dir.path().join("output");
    fs::create_dir_all(&source)?;
    fs::create_dir_all(&output)?;

    write_test_image(&source, "one.jpg");
    write_test_image(&source, "two.png");

    let run = StubDetector.run(&source, &output.join("results"))?;
    let dirs = dataset::assemble(&source, &run.labels_dir, &output)?;

    for image in &run.processed {
        let stem = image.file_stem().unwrap().to_string_lossy();
        assert!(
            dirs.labels_dir.join(format!("{stem}.txt")).is_file(),
            "missing label for {stem}"
        );
    }
    Ok(())
}

#[test]
fn empty_source_yields_empty_dataset() -> anyhow::Result<()> {
    let dir = tempfile::TempDir::new()?;
    let source = dir.path().join("source");
    let output = dir.path().join("output");
    fs::create_dir_all(&source)?;
    fs::create_dir_all(&output)?;

    let dirs = dataset::assemble(&source, &output.join("results/labels"), &output)?;

    assert_eq!(dirs.image_count, 0);
    assert_eq!(dirs.label_count, 0);
    assert!(dirs.images_dir.is_dir());
    assert!(dirs.labels_dir.is_dir());
    Ok(())
}
