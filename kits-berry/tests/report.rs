use kits_berry::consts::files;
use kits_berry::report::{self, ReportConfig};
use kits_berry::stats::DepthGroup;
use kits_berry::{Metric, RenderOptions};
use std::path::Path;

const FIXTURE: &str = "\
ID,ratio,Chamfer,Hausdorff,depth,scale
case_00000_L,5.0%,1.10,4.2,7,1.30
case_00000_R,8.0%,1.35,5.1,7,1.45
case_00001_L,10.0%,1.80,6.3,8,1.42
case_00001_R,12.0%,2.05,6.8,9,1.50
case_00002_L,6.5%,1.20,4.9,9,1.38
case_00002_R,9.5%,1.60,5.7,10,1.47
case_00003_L,7.0%,1.25,5.0,11,1.41
case_00003_R,11.0%,1.95,6.6,12,1.55
";

fn write_fixture(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("volume.csv");
    std::fs::write(&path, FIXTURE).unwrap();
    path
}

fn config(dir: &Path) -> ReportConfig {
    let mut cfg = ReportConfig::new(write_fixture(dir));
    cfg.output_dir = dir.join("charts");
    cfg.render = RenderOptions {
        dpi: 20,
        labels: false,
    };
    cfg
}

#[test]
fn report_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = config(dir.path());

    let mut out = Vec::new();
    let report = report::run(&cfg, &mut out).unwrap();

    let written: Vec<String> = std::fs::read_dir(&cfg.output_dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(written.len(), 5);
    for name in files::REPORT_CHARTS {
        assert!(written.iter().any(|w| w == name), "missing `{name}`");
        let img = image::open(cfg.output_dir.join(name)).unwrap();
        assert!(img.width() > 0 && img.height() > 0);
    }
    assert_eq!(report.charts.len(), 5);

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("=== Volume Error Statistics ==="));
    assert!(text.contains("count    8.000000"));
    assert!(text.contains("Analysis completed."));

    let s = &report.summary;
    assert_eq!(s.cases, 8);
    // 百分数已被转换为小数.
    assert!((s.ratio.min - 0.05).abs() < 1e-12);
    assert!((s.ratio.max - 0.12).abs() < 1e-12);
    // 深度 12 不属于任何分组.
    assert_eq!(s.depth.uncategorized, 1);
    assert!((s.depth.mean_of(DepthGroup::Seven) - 0.065).abs() < 1e-12);

    let ratio = s.sides.row(Metric::Ratio).unwrap();
    assert!((ratio.left_mean - 0.07125).abs() < 1e-12);
    assert!((ratio.right_mean - 0.10125).abs() < 1e-12);
    assert!(ratio.p > 0.0 && ratio.p < 1.0);
}

#[test]
fn report_with_side_comparison() {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = config(dir.path());
    cfg.side_comparison = true;

    let report = report::run(&cfg, &mut std::io::sink()).unwrap();
    assert_eq!(report.charts.len(), 6);
    assert!(cfg.output_dir.join(files::SIDE_COMPARISON).is_file());
}

#[test]
fn report_missing_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.csv");
    std::fs::write(&path, "ID,ratio,Chamfer\ncase_00000_L,0.1,1.0\n").unwrap();

    let mut cfg = ReportConfig::new(&path);
    cfg.output_dir = dir.path().join("charts");
    let err = report::run(&cfg, &mut std::io::sink()).unwrap_err();
    assert!(matches!(err, kits_berry::Error::MissingColumns(ref c) if c.len() == 3));
    assert!(!cfg.output_dir.exists());
}
