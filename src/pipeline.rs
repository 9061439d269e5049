use std::path::{Path, PathBuf};

use crate::archive;
use crate::dataset;
use crate::detect::{Detector, PREDICT_DIR_NAME};
use crate::workspace::{has_extension, sorted_entries, RunWorkspace, UploadFile};

/// How many annotated images the preview stage surfaces.
pub const PREVIEW_LIMIT: usize = 5;

/// Stages of one annotation run. Every run walks these in order; any I/O
/// failure aborts the run at the stage it occurred in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    Idle,
    ReceivedUpload,
    Expanded,
    Detected,
    Assembled,
    Packaged,
    ReadyForDownload,
}

/// Everything a finished run hands back. Owns the scratch workspace, so the
/// previews and the archive stay readable until this is dropped; dropping it
/// (e.g. when a new run starts) removes all scratch state.
pub struct RunOutput {
    workspace: RunWorkspace,
    pub previews: Vec<PathBuf>,
    pub archive_path: PathBuf,
    pub image_count: usize,
    pub label_count: usize,
    pub processed: usize,
}

impl std::fmt::Debug for RunOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunOutput")
            .field("workspace", &self.workspace)
            .field("archive_path", &self.archive_path)
            .field("previews", &self.previews)
            .field("image_count", &self.image_count)
            .field("label_count", &self.label_count)
            .field("processed", &self.processed)
            .finish()
    }
}

impl RunOutput {
    pub fn workspace(&self) -> &RunWorkspace {
        &self.workspace
    }
}

/// Run the whole upload → expand → detect → assemble → package pipeline.
pub fn run_annotation(
    files: &[UploadFile],
    detector: &dyn Detector,
    verbose: bool,
) -> anyhow::Result<RunOutput> {
    run_annotation_with_progress(files, detector, verbose, |_| {})
}

/// Same as [`run_annotation`], reporting each stage transition as it happens.
pub fn run_annotation_with_progress(
    files: &[UploadFile],
    detector: &dyn Detector,
    verbose: bool,
    mut on_stage: impl FnMut(RunStage),
) -> anyhow::Result<RunOutput> {
    let workspace = RunWorkspace::new()?;
    on_stage(RunStage::Idle);

    workspace.save_uploads(files)?;
    on_stage(RunStage::ReceivedUpload);
    if verbose {
        println!("Saved {} uploaded file(s)", files.len());
    }

    let expanded = workspace.expand_archives(files)?;
    on_stage(RunStage::Expanded);
    if verbose && expanded {
        println!("Expanded archive(s) into {:?}", workspace.extracted_dir());
    }

    let image_source = workspace.image_source(files);

    if verbose {
        println!(
            "Running {} detector on {:?}...",
            detector.name(),
            image_source
        );
    }
    let detection = detector.run(&image_source, &workspace.results_dir())?;
    on_stage(RunStage::Detected);
    if verbose {
        println!("Processed {} image(s)", detection.processed.len());
    }

    let dirs = dataset::assemble(&image_source, &detection.labels_dir, &workspace.output_dir())?;
    on_stage(RunStage::Assembled);

    let archive_path = workspace.archive_path();
    archive::pack_dir(&workspace.output_dir(), &archive_path)?;
    on_stage(RunStage::Packaged);

    let previews = select_previews(&detection.results_dir, PREVIEW_LIMIT)?;
    on_stage(RunStage::ReadyForDownload);
    if verbose {
        println!(
            "Dataset ready: {:?} ({} images, {} labels)",
            archive_path, dirs.image_count, dirs.label_count
        );
    }

    Ok(RunOutput {
        workspace,
        previews,
        archive_path,
        image_count: dirs.image_count,
        label_count: dirs.label_count,
        processed: detection.processed.len(),
    })
}

/// Pick up to `limit` annotated previews, preferring the detector's
/// `predict/` subdirectory when it exists. Purely observational.
pub fn select_previews(results_dir: &Path, limit: usize) -> anyhow::Result<Vec<PathBuf>> {
    let predict_dir = results_dir.join(PREDICT_DIR_NAME);
    let dir = if predict_dir.is_dir() {
        predict_dir
    } else {
        results_dir.to_path_buf()
    };
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    Ok(sorted_entries(&dir)?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path, &["jpg"]))
        .take(limit)
        .collect())
}
