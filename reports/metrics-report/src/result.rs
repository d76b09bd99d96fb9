//! 报告结果.

use kits_berry::report::Report;
use std::io::{self, Write};

/// 将生成的图片与未定义的相关系数写进 `w` 中.
fn describe_into<W: Write>(r: &ReportResult, w: &mut W) -> io::Result<()> {
    const S4: &str = "    ";

    let s = &r.report.summary;
    writeln!(w, "Cases: {}", s.cases)?;
    if s.depth.uncategorized > 0 {
        writeln!(
            w,
            "{S4}{} case(s) outside every depth group",
            s.depth.uncategorized
        )?;
    }
    for (name, c) in [
        ("Chamfer", &s.chamfer_vs_ratio),
        ("Hausdorff", &s.hausdorff_vs_ratio),
        ("Scale", &s.scale_vs_ratio),
    ] {
        if !c.is_defined() {
            writeln!(w, "{S4}correlation of {name} is undefined")?;
        }
    }
    writeln!(w, "Charts:")?;
    for path in r.report.charts.iter() {
        writeln!(w, "{S4}{}", path.display())?;
    }
    Ok(())
}

/// 一次报告的最终结果.
pub struct ReportResult {
    report: Report,
}

impl ReportResult {
    pub fn new(report: Report) -> Self {
        Self { report }
    }

    /// 分析运行结果.
    pub fn analyze(&self) {
        utils::sep();
        let mut buf = Vec::with_capacity(512);
        if describe_into(self, &mut buf).is_ok() {
            print!("{}", String::from_utf8_lossy(&buf));
        }
        utils::sep();
    }
}
