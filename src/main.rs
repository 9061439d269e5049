use clap::Parser;
use std::path::PathBuf;

use anyhow::Context;
use autolabel::detect::ContourDetector;
use autolabel::pipeline::run_annotation;
use autolabel::workspace::UploadFile;

#[derive(Parser)]
#[command(name = "autolabel")]
#[command(about = "Auto-annotate images with an object detector and package a YOLO dataset")]
struct Cli {
    /// Image or zip files to annotate (launches the GUI when omitted)
    #[arg(value_name = "FILES")]
    inputs: Vec<PathBuf>,

    /// Where to write the packaged dataset
    #[arg(short, long, value_name = "PATH", default_value = "dataset.zip")]
    out: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    if args.inputs.is_empty() {
        #[cfg(feature = "gui")]
        {
            autolabel::gui::run()?;
            return Ok(());
        }
        #[cfg(not(feature = "gui"))]
        anyhow::bail!("No input files given and this build has no GUI; pass image or zip files");
    }

    let mut files = Vec::with_capacity(args.inputs.len());
    for path in &args.inputs {
        files.push(UploadFile::from_path(path)?);
    }

    let detector = ContourDetector::new().with_verbose(args.verbose);
    let output = run_annotation(&files, &detector, args.verbose)?;

    std::fs::copy(&output.archive_path, &args.out)
        .with_context(|| format!("Failed to write dataset archive to {:?}", args.out))?;

    println!(
        "Wrote {:?} ({} images, {} labels, {} processed by the detector)",
        args.out, output.image_count, output.label_count, output.processed
    );
    for preview in &output.previews {
        println!("  preview: {}", preview.display());
    }

    Ok(())
}
