use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::workspace::{has_extension, sorted_entries, IMAGE_EXTENSIONS};

const IMAGES_DIR_NAME: &str = "images";
const LABELS_DIR_NAME: &str = "labels";

/// The canonical dataset layout after assembly.
#[derive(Debug, Clone)]
pub struct DatasetDirs {
    pub images_dir: PathBuf,
    pub labels_dir: PathBuf,
    pub image_count: usize,
    pub label_count: usize,
}

/// Build the canonical `images/` + `labels/` pairing under `output_root`.
///
/// Originals with an accepted extension are copied first; label files are
/// then moved out of the detector's results tree. A failed label move aborts
/// the run partway with no rollback.
pub fn assemble(
    image_source: &Path,
    detector_labels: &Path,
    output_root: &Path,
) -> anyhow::Result<DatasetDirs> {
    let images_dir = output_root.join(IMAGES_DIR_NAME);
    let labels_dir = output_root.join(LABELS_DIR_NAME);
    fs::create_dir_all(&images_dir)
        .with_context(|| format!("Failed to create {:?}", images_dir))?;
    fs::create_dir_all(&labels_dir)
        .with_context(|| format!("Failed to create {:?}", labels_dir))?;

    let mut image_count = 0;
    for entry in sorted_entries(image_source)? {
        let path = entry.path();
        if !path.is_file() || !has_extension(&path, IMAGE_EXTENSIONS) {
            continue;
        }
        let dest = images_dir.join(entry.file_name());
        fs::copy(&path, &dest)
            .with_context(|| format!("Failed to copy image {:?} to {:?}", path, dest))?;
        image_count += 1;
    }

    let mut label_count = 0;
    if detector_labels.is_dir() {
        for entry in sorted_entries(detector_labels)? {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let dest = labels_dir.join(entry.file_name());
            fs::rename(&path, &dest)
                .with_context(|| format!("Failed to move label {:?} to {:?}", path, dest))?;
            label_count += 1;
        }
    }

    Ok(DatasetDirs {
        images_dir,
        labels_dir,
        image_count,
        label_count,
    })
}
