//! 指标报告流水线: 读取表格 → 统计 → 输出文本 → 绘图.

mod text;

pub use text::describe_into;

use crate::consts::files;
use crate::plot::{self, RenderOptions};
use crate::stats::{self, Correlation, GroupMeans, SideComparison, Summary};
use crate::table::{CaseTable, Metric, TableSchema};
use crate::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

/// 报告的全部统计结果.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsSummary {
    /// 病例数.
    pub cases: usize,

    /// 体积误差比, 含 95 分位点.
    pub ratio: Summary,

    /// Chamfer 距离.
    pub chamfer: Summary,

    /// Hausdorff 距离.
    pub hausdorff: Summary,

    /// Chamfer 与体积误差比的相关性.
    pub chamfer_vs_ratio: Correlation,

    /// Hausdorff 与体积误差比的相关性.
    pub hausdorff_vs_ratio: Correlation,

    /// 各深度分组的平均体积误差比.
    pub depth: GroupMeans,

    /// 缩放系数与体积误差比的相关性.
    pub scale_vs_ratio: Correlation,

    /// 左右肾对比.
    pub sides: SideComparison,
}

impl MetricsSummary {
    /// 计算全部统计量.
    pub fn compute(table: &CaseTable) -> Self {
        let ratio = table.metric(Metric::Ratio);
        let chamfer = table.metric(Metric::Chamfer);
        let hausdorff = table.metric(Metric::Hausdorff);
        let scale = table.scale();

        Self {
            cases: table.len(),
            ratio: stats::describe(ratio.view(), &stats::RATIO_PERCENTILES),
            chamfer: stats::describe(chamfer.view(), &stats::DEFAULT_PERCENTILES),
            hausdorff: stats::describe(hausdorff.view(), &stats::DEFAULT_PERCENTILES),
            chamfer_vs_ratio: stats::pearson(chamfer.view(), ratio.view()),
            hausdorff_vs_ratio: stats::pearson(hausdorff.view(), ratio.view()),
            depth: GroupMeans::compute(table),
            scale_vs_ratio: stats::pearson(scale.view(), ratio.view()),
            sides: SideComparison::compute(table),
        }
    }
}

/// 报告配置.
#[derive(Clone, Debug, PartialEq)]
pub struct ReportConfig {
    /// 表格路径, csv 或电子表格.
    pub table: PathBuf,

    /// 列名约定.
    pub schema: TableSchema,

    /// 图片输出目录.
    pub output_dir: PathBuf,

    /// 绘图参数.
    pub render: RenderOptions,

    /// 是否额外绘制左右肾对比箱线图.
    pub side_comparison: bool,
}

impl ReportConfig {
    /// 以默认列名、默认绘图参数, 将图片输出到当前目录.
    pub fn new<P: Into<PathBuf>>(table: P) -> Self {
        Self {
            table: table.into(),
            schema: TableSchema::default(),
            output_dir: PathBuf::from("."),
            render: RenderOptions::default(),
            side_comparison: false,
        }
    }

    /// 报告将要写出的全部图片路径, 按生成顺序.
    pub fn chart_paths(&self) -> Vec<PathBuf> {
        let mut names = files::REPORT_CHARTS.to_vec();
        if self.side_comparison {
            names.push(files::SIDE_COMPARISON);
        }
        names.into_iter().map(|n| self.output_dir.join(n)).collect()
    }
}

/// 一次报告的产出.
#[derive(Clone, Debug)]
pub struct Report {
    /// 统计结果.
    pub summary: MetricsSummary,

    /// 写出的图片.
    pub charts: Vec<PathBuf>,
}

type ChartFn = fn(&Path, &CaseTable, &MetricsSummary, &RenderOptions) -> Result<()>;

/// 与 [`files::REPORT_CHARTS`] 一一对应.
const CHARTS: [ChartFn; 5] = [
    |p, t, _, o| plot::overview_chart(p, t, o),
    |p, t, _, o| plot::geo_distribution_chart(p, t, o),
    |p, t, _, o| plot::correlation_chart(p, t, o),
    |p, _, s, o| plot::depth_chart(p, &s.depth, o),
    |p, t, _, o| plot::scale_chart(p, t, o),
];

/// 在已经加载好的表格上生成报告: 文本写进 `w`, 图片写进 `config.output_dir`.
///
/// 任何一张图失败都会立即返回错误, 已写出的图片保留.
pub fn generate<W: Write>(table: &CaseTable, config: &ReportConfig, w: &mut W) -> Result<Report> {
    let summary = MetricsSummary::compute(table);
    describe_into(&summary, w)?;

    std::fs::create_dir_all(&config.output_dir)?;
    let paths = config.chart_paths();
    for (path, draw) in paths.iter().zip(CHARTS) {
        draw(path, table, &summary, &config.render)?;
        log::info!("chart written to `{}`", path.display());
    }
    if config.side_comparison {
        let path = config.output_dir.join(files::SIDE_COMPARISON);
        plot::side_comparison_chart(&path, table, &config.render)?;
        log::info!("chart written to `{}`", path.display());
    }

    writeln!(
        w,
        "\nAnalysis completed. All charts saved in `{}`.",
        config.output_dir.display()
    )?;
    Ok(Report {
        summary,
        charts: paths,
    })
}

/// 完整的报告流水线: 读取 `config.table` 后调用 [`generate`].
pub fn run<W: Write>(config: &ReportConfig, w: &mut W) -> Result<Report> {
    let table = CaseTable::open(&config.table, &config.schema)?;
    log::debug!("{} case(s) loaded", table.len());
    generate(&table, config, w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CaseRecord;

    fn record(id: &str, ratio: f64, chamfer: f64, depth: u32) -> CaseRecord {
        CaseRecord {
            id: id.to_owned(),
            ratio,
            chamfer,
            hausdorff: chamfer * 3.0,
            depth,
            scale: 1.3 + ratio,
        }
    }

    fn table() -> CaseTable {
        CaseTable::new(vec![
            record("a_L", 0.05, 1.0, 7),
            record("b_L", 0.10, 1.4, 9),
            record("c_R", 0.08, 1.1, 10),
            record("d_R", 0.12, 1.9, 11),
        ])
    }

    #[test]
    fn test_summary() {
        let s = MetricsSummary::compute(&table());
        assert_eq!(s.cases, 4);
        assert_eq!(s.ratio.percentiles.len(), 4);
        assert_eq!(s.chamfer.percentiles.len(), 3);
        // hausdorff 是 chamfer 的倍数, 两者与 ratio 的相关系数相同.
        assert!((s.chamfer_vs_ratio.r - s.hausdorff_vs_ratio.r).abs() < 1e-12);
        // scale 是 ratio 的线性函数.
        assert!((s.scale_vs_ratio.r - 1.0).abs() < 1e-12);

        let ratio = s.sides.row(Metric::Ratio).unwrap();
        assert!((ratio.left_mean - 0.075).abs() < 1e-12);
        assert!((ratio.right_mean - 0.10).abs() < 1e-12);
        assert!(ratio.p.is_finite());
    }

    #[test]
    fn test_text_sections() {
        let s = MetricsSummary::compute(&table());
        let mut buf = Vec::new();
        describe_into(&s, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        for section in [
            "=== Volume Error Statistics ===",
            "=== Global Geometric Accuracy Statistics ===",
            "Chamfer Mean: ",
            "Correlation (Chamfer vs. Volume Error): r=",
            "Mean Volume Error by Depth Group:",
            "12 layers",
            "Correlation (Scale vs. Volume Error): r=1.00",
            "Comparison of Metrics between Left and Right Kidneys:",
        ] {
            assert!(text.contains(section), "missing `{section}`");
        }
    }

    #[test]
    fn test_chart_paths() {
        let mut cfg = ReportConfig::new("volume.xlsx");
        cfg.output_dir = PathBuf::from("out");
        assert_eq!(cfg.chart_paths().len(), 5);
        cfg.side_comparison = true;
        let paths = cfg.chart_paths();
        assert_eq!(paths.len(), 6);
        assert_eq!(paths[5], Path::new("out").join("side_comparison.png"));
    }
}
