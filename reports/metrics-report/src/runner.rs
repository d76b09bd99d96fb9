//! 程序运行函数.

use crate::result::ReportResult;
use anyhow::Context;
use kits_berry::report::{self, ReportConfig};
use kits_berry::CaseTable;
use std::io::Write;

/// 实际运行.
pub fn run(config: &ReportConfig) -> anyhow::Result<ReportResult> {
    let table = CaseTable::open(&config.table, &config.schema)
        .with_context(|| format!("cannot load metrics table `{}`", config.table.display()))?;
    log::info!(
        "{} case(s) loaded from `{}`",
        table.len(),
        config.table.display()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let report = report::generate(&table, config, &mut out).with_context(|| {
        format!("cannot write report into `{}`", config.output_dir.display())
    })?;
    out.flush()?;

    Ok(ReportResult::new(report))
}
