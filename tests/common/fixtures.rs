use std::fs::{self, File};
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use autolabel::detect::{DetectionRun, Detector, LABELS_DIR_NAME, PREDICT_DIR_NAME};
use autolabel::workspace::UploadFile;
use image::{ImageBuffer, Rgb};
use zip::write::SimpleFileOptions;

/// Bytes of a 96x96 PNG: light background with a filled dark rectangle,
/// high-contrast enough for the built-in detector to find.
pub fn test_image_bytes() -> Vec<u8> {
    let img = ImageBuffer::from_fn(96, 96, |x, y| {
        if (24..72).contains(&x) && (30..66).contains(&y) {
            Rgb([20u8, 20, 20])
        } else {
            Rgb([245u8, 245, 245])
        }
    });
    let mut bytes = Cursor::new(Vec::new());
    img.write_to(&mut bytes, image::ImageFormat::Png)
        .expect("Failed to encode test image");
    bytes.into_inner()
}

/// An upload carrying the standard test image under the given name.
pub fn upload(name: &str) -> UploadFile {
    UploadFile {
        name: name.to_string(),
        bytes: test_image_bytes(),
    }
}

/// An upload carrying a zip archive with one test image per entry name.
pub fn zip_upload(archive_name: &str, entries: &[&str]) -> UploadFile {
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut cursor);
        let options = SimpleFileOptions::default();
        for entry in entries {
            writer
                .start_file(entry.to_string(), options)
                .expect("Failed to start zip entry");
            writer
                .write_all(&test_image_bytes())
                .expect("Failed to write zip entry");
        }
        writer.finish().expect("Failed to finish fixture zip");
    }
    UploadFile {
        name: archive_name.to_string(),
        bytes: cursor.into_inner(),
    }
}

/// Names of all entries in a zip archive, directory entries included.
pub fn zip_entry_names(path: &Path) -> Vec<String> {
    let file = File::open(path).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Failed to read archive");
    (0..archive.len())
        .map(|i| {
            archive
                .by_index(i)
                .expect("Failed to read archive entry")
                .name()
                .to_string()
        })
        .collect()
}

/// Deterministic detector: every accepted image gets an annotated JPEG copy
/// and a single fixed label line, regardless of content.
pub struct StubDetector;

impl Detector for StubDetector {
    fn name(&self) -> &str {
        "stub"
    }

    fn run(&self, image_dir: &Path, results_dir: &Path) -> anyhow::Result<DetectionRun> {
        let annotated_dir = results_dir.join(PREDICT_DIR_NAME);
        let labels_dir = results_dir.join(LABELS_DIR_NAME);
        fs::create_dir_all(&annotated_dir)?;
        fs::create_dir_all(&labels_dir)?;

        let mut entries: Vec<_> = fs::read_dir(image_dir)?.collect::<Result<Vec<_>, _>>()?;
        entries.sort_by_key(|entry| entry.file_name());

        let mut processed = Vec::new();
        for entry in entries {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
                continue;
            };
            if !["jpg", "jpeg", "png"]
                .iter()
                .any(|e| ext.eq_ignore_ascii_case(e))
            {
                continue;
            }
            let stem = path
                .file_stem()
                .expect("image file has a stem")
                .to_string_lossy()
                .into_owned();

            let img = image::ImageReader::open(&path)?
                .with_guessed_format()?
                .decode()?;
            img.to_rgb8().save(annotated_dir.join(format!("{stem}.jpg")))?;

            let mut label = File::create(labels_dir.join(format!("{stem}.txt")))?;
            writeln!(label, "0 0.500000 0.500000 0.500000 0.375000")?;

            processed.push(path);
        }

        Ok(DetectionRun {
            results_dir: results_dir.to_path_buf(),
            annotated_dir,
            labels_dir,
            processed,
        })
    }
}

/// Write the standard test image into `dir` under the given name.
pub fn write_test_image(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, test_image_bytes()).expect("Failed to write test image");
    path
}
