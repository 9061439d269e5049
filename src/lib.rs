//! Auto image annotation: run an object detector over uploaded images (or a
//! zip of images) and package the results as a YOLO `images/` + `labels/`
//! dataset with annotated previews.

pub mod archive;
pub mod dataset;
pub mod detect;
pub mod models;
pub mod pipeline;
pub mod workspace;

// Re-export commonly used types and functions
pub use detect::{ContourDetector, DetectionRun, Detector};
pub use models::{Detection, Region};
pub use pipeline::{run_annotation, select_previews, RunOutput, RunStage, PREVIEW_LIMIT};
pub use workspace::{RunWorkspace, UploadFile};

#[cfg(feature = "gui")]
pub mod gui;
