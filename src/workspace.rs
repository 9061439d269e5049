use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempdir::TempDir;

use crate::archive;

/// Extensions accepted from the upload surface.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];
pub const ARCHIVE_EXTENSION: &str = "zip";

const UPLOAD_DIR_NAME: &str = "uploads";
const OUTPUT_DIR_NAME: &str = "output";
const EXTRACTED_DIR_NAME: &str = "extracted";
const RESULTS_DIR_NAME: &str = "results";
const ARCHIVE_NAME: &str = "dataset.zip";

/// A user-submitted file: original filename plus raw bytes.
#[derive(Debug, Clone)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn from_path<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(str::to_owned)
            .ok_or_else(|| anyhow::anyhow!("Input path has no usable filename: {:?}", path))?;
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read input file {:?}", path))?;
        Ok(Self { name, bytes })
    }

    pub fn is_archive(&self) -> bool {
        has_extension(Path::new(&self.name), &[ARCHIVE_EXTENSION])
    }
}

/// Case-insensitive extension check.
pub fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Directory entries sorted by filename, so traversal order is stable.
pub fn sorted_entries(dir: &Path) -> anyhow::Result<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {:?}", dir))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to list directory {:?}", dir))?;
    entries.sort_by_key(|entry| entry.file_name());
    Ok(entries)
}

/// Scratch storage for one annotation run. Every run gets a fresh unique
/// temporary root, so two runs can never see each other's files; dropping
/// the workspace removes everything under it.
pub struct RunWorkspace {
    root: TempDir,
}

impl std::fmt::Debug for RunWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunWorkspace")
            .field("root", &self.root.path())
            .finish()
    }
}

impl RunWorkspace {
    pub fn new() -> anyhow::Result<Self> {
        let root = TempDir::new("autolabel_run").context("Failed to create run workspace")?;
        let workspace = Self { root };
        fs::create_dir_all(workspace.upload_dir())
            .with_context(|| format!("Failed to create {:?}", workspace.upload_dir()))?;
        fs::create_dir_all(workspace.output_dir())
            .with_context(|| format!("Failed to create {:?}", workspace.output_dir()))?;
        Ok(workspace)
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Raw uploads land here.
    pub fn upload_dir(&self) -> PathBuf {
        self.root.path().join(UPLOAD_DIR_NAME)
    }

    /// Archive contents are expanded here.
    pub fn extracted_dir(&self) -> PathBuf {
        self.upload_dir().join(EXTRACTED_DIR_NAME)
    }

    /// Dataset, detector results and the final archive live under here.
    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join(OUTPUT_DIR_NAME)
    }

    pub fn results_dir(&self) -> PathBuf {
        self.output_dir().join(RESULTS_DIR_NAME)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.output_dir().join(ARCHIVE_NAME)
    }

    /// Write each uploaded file under its original name. A same-named file
    /// overwrites the previous one.
    pub fn save_uploads(&self, files: &[UploadFile]) -> anyhow::Result<()> {
        for file in files {
            let dest = self.upload_dir().join(&file.name);
            fs::write(&dest, &file.bytes)
                .with_context(|| format!("Failed to write upload {:?}", dest))?;
        }
        Ok(())
    }

    /// Expand every uploaded `.zip` into the extraction directory. Returns
    /// whether anything was expanded. A corrupt archive is fatal for the run.
    pub fn expand_archives(&self, files: &[UploadFile]) -> anyhow::Result<bool> {
        let mut expanded = false;
        for file in files.iter().filter(|file| file.is_archive()) {
            if !expanded {
                fs::create_dir_all(self.extracted_dir())
                    .with_context(|| format!("Failed to create {:?}", self.extracted_dir()))?;
                expanded = true;
            }
            let src = self.upload_dir().join(&file.name);
            archive::extract_zip(&src, &self.extracted_dir())?;
        }
        Ok(expanded)
    }

    /// Directory the detector reads images from. Any archive in the batch
    /// selects the extraction directory, even when plain images were uploaded
    /// alongside it; those plain images are excluded from detection.
    pub fn image_source(&self, files: &[UploadFile]) -> PathBuf {
        if files.iter().any(|file| file.is_archive()) {
            self.extracted_dir()
        } else {
            self.upload_dir()
        }
    }
}
