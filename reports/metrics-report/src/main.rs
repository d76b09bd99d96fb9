//! 读取逐病例几何指标表格, 输出统计结果并绘制统计图.

mod result;
mod runner;

use clap::Parser;
use kits_berry::report::ReportConfig;
use kits_berry::{RenderOptions, TableSchema};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "metrics-report")]
#[command(about = "Statistics and charts for per-case reconstruction metrics", version)]
struct Cli {
    /// Metrics table (.csv, .xlsx, .xls or .ods).
    /// Falls back to $KITS_METRICS_TABLE, then ./volume.xlsx
    #[arg(short, long)]
    table: Option<PathBuf>,

    /// Directory the charts are written into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Chart resolution
    #[arg(long, default_value_t = kits_berry::consts::REPORT_DPI)]
    dpi: u32,

    /// Also draw the left/right box plot (side_comparison.png)
    #[arg(long)]
    side_comparison: bool,

    /// Skip titles, ticks and legends (for hosts without fonts)
    #[arg(long)]
    no_labels: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn into_config(self) -> ReportConfig {
        ReportConfig {
            table: self
                .table
                .unwrap_or_else(utils::loader::table_from_env_or_default),
            schema: TableSchema::default(),
            output_dir: self.output_dir,
            render: RenderOptions {
                dpi: self.dpi,
                labels: !self.no_labels,
            },
            side_comparison: self.side_comparison,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    utils::init_logger(cli.verbose);

    match runner::run(&cli.into_config()) {
        Ok(result) => {
            result.analyze();
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}
