use std::fs::{self, File};
use std::io;
use std::path::Path;

use anyhow::Context;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Extract a zip archive into `dest`, creating the directory if needed.
pub fn extract_zip(archive_path: &Path, dest: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dest).with_context(|| format!("Failed to create {:?}", dest))?;

    let file = File::open(archive_path)
        .with_context(|| format!("Failed to open archive {:?}", archive_path))?;
    let mut archive = ZipArchive::new(file)
        .with_context(|| format!("Invalid zip archive {:?}", archive_path))?;
    archive
        .extract(dest)
        .with_context(|| format!("Failed to extract {:?} into {:?}", archive_path, dest))?;
    Ok(())
}

/// Recursively pack `src_root` into a zip archive at `dest`. The destination
/// file itself is skipped when it lives inside `src_root`, since the archive
/// is written into the directory being packed.
pub fn pack_dir(src_root: &Path, dest: &Path) -> anyhow::Result<()> {
    let out =
        File::create(dest).with_context(|| format!("Failed to create archive {:?}", dest))?;
    let mut writer = ZipWriter::new(out);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    add_dir_entries(&mut writer, src_root, src_root, dest, options)?;

    writer
        .finish()
        .with_context(|| format!("Failed to finalize archive {:?}", dest))?;
    Ok(())
}

fn add_dir_entries(
    writer: &mut ZipWriter<File>,
    root: &Path,
    dir: &Path,
    skip: &Path,
    options: SimpleFileOptions,
) -> anyhow::Result<()> {
    let mut entries = fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {:?}", dir))?
        .collect::<Result<Vec<_>, _>>()
        .with_context(|| format!("Failed to list directory {:?}", dir))?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        if path == skip {
            continue;
        }
        let rel = path
            .strip_prefix(root)
            .with_context(|| format!("Entry {:?} escapes archive root {:?}", path, root))?;
        let name = rel.to_string_lossy().replace('\\', "/");

        if path.is_dir() {
            writer
                .add_directory(name, options)
                .with_context(|| format!("Failed to add directory entry for {:?}", path))?;
            add_dir_entries(writer, root, &path, skip, options)?;
        } else {
            writer
                .start_file(name, options)
                .with_context(|| format!("Failed to start archive entry for {:?}", path))?;
            let mut file =
                File::open(&path).with_context(|| format!("Failed to open {:?}", path))?;
            io::copy(&mut file, writer)
                .with_context(|| format!("Failed to archive {:?}", path))?;
        }
    }
    Ok(())
}
