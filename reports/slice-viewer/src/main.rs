//! 读取 nifti 分割标签, 沿某一坐标轴等距选取切片并拼接为一张图片.

use anyhow::Context;
use clap::Parser;
use kits_berry::consts::{files, SLICE_VIEW_DPI};
use kits_berry::viewer::{self, SliceViewConfig, DEFAULT_NUM_SLICES};
use kits_berry::{RenderOptions, VolumeAxis};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "slice-viewer")]
#[command(about = "Evenly spaced slices of a NIfTI segmentation in one image", version)]
struct Cli {
    /// Segmentation volume (.nii or .nii.gz). Falls back to $KITS_SEGMENTATION,
    /// then $HOME/dataset/kits23/case_00000/segmentation.nii.gz
    #[arg(long)]
    volume: Option<PathBuf>,

    /// Slicing axis: x, y or z
    #[arg(short, long, default_value = "z")]
    axis: String,

    /// Number of slices
    #[arg(short = 'n', long, default_value_t = DEFAULT_NUM_SLICES)]
    slices: usize,

    /// Composite image path
    #[arg(short, long, default_value = files::SLICE_VIEW)]
    output: PathBuf,

    /// Image resolution
    #[arg(long, default_value_t = SLICE_VIEW_DPI)]
    dpi: u32,

    /// Also save every selected slice into this directory
    #[arg(long)]
    dump_slices: Option<PathBuf>,

    /// Skip titles (for hosts without fonts)
    #[arg(long)]
    no_labels: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> anyhow::Result<SliceViewConfig> {
        let axis: VolumeAxis = self.axis.parse()?;
        let volume = match self.volume {
            Some(v) => v,
            None => utils::loader::segmentation_from_env_or_home()
                .context("no --volume given and the home directory is unknown")?,
        };
        Ok(SliceViewConfig {
            volume,
            axis,
            num_slices: self.slices,
            output: self.output,
            dump_dir: self.dump_slices,
            render: RenderOptions {
                dpi: self.dpi,
                labels: !self.no_labels,
            },
        })
    }
}

/// 实际运行.
fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.into_config()?;
    let stdout = std::io::stdout();
    let view = viewer::run(&config, &mut stdout.lock())
        .with_context(|| format!("cannot view `{}`", config.volume.display()))?;
    log::info!("slices {:?} along {}", view.indices, config.axis);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    utils::init_logger(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
