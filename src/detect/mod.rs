pub mod annotate;
pub mod regions;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::DynamicImage;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;

use crate::models::Detection;
use crate::workspace::{has_extension, sorted_entries, IMAGE_EXTENSIONS};

pub const PREDICT_DIR_NAME: &str = "predict";
pub const LABELS_DIR_NAME: &str = "labels";

/// Where a detection pass left its outputs, plus the images it processed.
#[derive(Debug, Clone)]
pub struct DetectionRun {
    pub results_dir: PathBuf,
    pub annotated_dir: PathBuf,
    pub labels_dir: PathBuf,
    pub processed: Vec<PathBuf>,
}

/// Narrow seam to the detection model: a directory of images in, annotated
/// previews and YOLO label files out. Lets tests substitute a deterministic
/// stub for the real pass.
pub trait Detector {
    fn name(&self) -> &str;

    /// Run detection over every accepted image directly under `image_dir`,
    /// writing annotated previews and label files under `results_dir`.
    fn run(&self, image_dir: &Path, results_dir: &Path) -> anyhow::Result<DetectionRun>;
}

/// Built-in classical detector: Canny edges grouped into connected regions,
/// each surviving region reported as one class-0 bounding box.
pub struct ContourDetector {
    pub blur_sigma: f32,
    pub low_threshold: f32,
    pub high_threshold: f32,
    pub min_region_area: u32,
    pub max_detections: usize,
    pub verbose: bool,
}

impl ContourDetector {
    pub fn new() -> Self {
        Self {
            blur_sigma: 1.5,
            low_threshold: 50.0,
            high_threshold: 100.0,
            min_region_area: 40,
            max_detections: 25,
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Propose bounding boxes for a single decoded image.
    pub fn detect_image(&self, img: &DynamicImage) -> Vec<Detection> {
        let gray = img.to_luma8();
        let blurred = gaussian_blur_f32(&gray, self.blur_sigma);
        let edges = canny(&blurred, self.low_threshold, self.high_threshold);

        let mut regions = regions::find_regions(&edges, self.min_region_area);
        regions.retain(|region| !region.spans_frame(img.width(), img.height()));
        regions.sort_by(|a, b| b.pixel_count.cmp(&a.pixel_count));
        regions.truncate(self.max_detections);

        regions
            .into_iter()
            .map(|region| Detection::from_region(0, &region))
            .collect()
    }
}

impl Default for ContourDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl Detector for ContourDetector {
    fn name(&self) -> &str {
        "contour"
    }

    fn run(&self, image_dir: &Path, results_dir: &Path) -> anyhow::Result<DetectionRun> {
        let annotated_dir = results_dir.join(PREDICT_DIR_NAME);
        let labels_dir = results_dir.join(LABELS_DIR_NAME);
        fs::create_dir_all(&annotated_dir)
            .with_context(|| format!("Failed to create {:?}", annotated_dir))?;
        fs::create_dir_all(&labels_dir)
            .with_context(|| format!("Failed to create {:?}", labels_dir))?;

        let mut processed = Vec::new();
        for entry in sorted_entries(image_dir)? {
            let path = entry.path();
            if !path.is_file() || !has_extension(&path, IMAGE_EXTENSIONS) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let img =
                image::open(&path).with_context(|| format!("Failed to open image {:?}", path))?;
            let detections = self.detect_image(&img);

            if self.verbose {
                println!(
                    "  {}: {} object(s)",
                    entry.file_name().to_string_lossy(),
                    detections.len()
                );
            }

            let preview_path = annotated_dir.join(format!("{stem}.jpg"));
            annotate::draw_detections(&img, &detections)
                .save(&preview_path)
                .with_context(|| format!("Failed to save preview {:?}", preview_path))?;

            // Label files only for images with at least one detection
            if !detections.is_empty() {
                let mut lines = String::new();
                for detection in &detections {
                    lines.push_str(&detection.yolo_line(img.width(), img.height()));
                }
                let label_path = labels_dir.join(format!("{stem}.txt"));
                fs::write(&label_path, lines)
                    .with_context(|| format!("Failed to write label file {:?}", label_path))?;
            }

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
