//! 指标报告中的统计图.

use super::{chart_builder, padded_range, plot_err, rgb, Colormap, RenderOptions};
use crate::consts::color::*;
use crate::consts::{OPTIMAL_SCALE_RANGE, RATIO_HISTOGRAM_BINS};
use crate::stats::{self, auto_bin_count, gaussian_kde, linear_fit, linspace};
use crate::stats::{GroupMeans, Histogram};
use crate::table::{CaseTable, Metric, Side};
use crate::Result;
use itertools::Itertools;
use ndarray::ArrayView1;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::f64::consts::PI;
use std::path::Path;

/// 核密度曲线的采样点数.
const KDE_POINTS: usize = 200;

/// 回归置信带的采样点数.
const BAND_POINTS: usize = 100;

/// 散点面积范围, 以平方磅为单位.
const POINT_AREA: (f64, f64) = (20.0, 200.0);

/// 置信水平.
const LEVEL: f64 = 0.95;

/// 绘制图例 (仅在绘制文字时).
macro_rules! draw_legend {
    ($chart: expr, $opts: expr, $pos: expr) => {
        if $opts.labels {
            $chart
                .configure_series_labels()
                .position($pos)
                .label_font($opts.label_font())
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(plot_err)?;
        }
    };
}

/// 面积 (平方磅) 转圆的像素半径.
#[inline]
fn radius(opts: &RenderOptions, area_pt2: f64) -> i32 {
    (opts.pt((area_pt2 / PI).sqrt()).round() as i32).max(1)
}

/// 按 `[lo, hi]` 线性映射到散点面积.
#[inline]
fn point_area(v: f64, lo: f64, hi: f64) -> f64 {
    let (a, b) = POINT_AREA;
    if hi > lo {
        a + (v - lo) / (hi - lo) * (b - a)
    } else {
        (a + b) / 2.0
    }
}

fn finite_range(x: ArrayView1<f64>) -> (f64, f64) {
    x.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        })
}

/// 直方图 + 核密度曲线 (缩放到计数), 可选虚线中位数.
#[allow(clippy::too_many_arguments)]
fn hist_kde_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    opts: &RenderOptions,
    title: &str,
    x_desc: &str,
    values: ArrayView1<f64>,
    bins: usize,
    color: RGBColor,
    with_median: bool,
) -> Result<()> {
    let hist = Histogram::new(values, bins);
    let (lo, hi) = (hist.edges[0], hist.edges[hist.len()]);
    let grid = linspace(lo, hi, KDE_POINTS);
    let to_counts = values.len() as f64 * hist.bin_width();
    let kde: Vec<(f64, f64)> = gaussian_kde(values, &grid)
        .map(|d| grid.iter().zip(d).map(|(&x, y)| (x, y * to_counts)).collect())
        .unwrap_or_default();
    let y_max = kde
        .iter()
        .map(|p| p.1)
        .fold(hist.max_count() as f64, f64::max)
        .max(1.0)
        * 1.1;
    let (x0, x1) = padded_range([lo, hi], 0.02);

    let mut chart = chart_builder(area, opts, title)
        .build_cartesian_2d(x0..x1, 0.0..y_max)
        .map_err(plot_err)?;
    if opts.labels {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(x_desc)
            .y_desc("Count")
            .label_style(opts.label_font())
            .axis_desc_style(opts.label_font())
            .draw()
            .map_err(plot_err)?;
    }

    chart
        .draw_series(hist.iter().map(|(l, r, c)| {
            Rectangle::new([(l, 0.0), (r, c as f64)], color.mix(0.6).filled())
        }))
        .map_err(plot_err)?;
    chart
        .draw_series(
            hist.iter()
                .map(|(l, r, c)| Rectangle::new([(l, 0.0), (r, c as f64)], BLACK.mix(0.4))),
        )
        .map_err(plot_err)?;
    if !kde.is_empty() {
        chart
            .draw_series(LineSeries::new(kde, color.stroke_width(opts.stroke(1.5))))
            .map_err(plot_err)?;
    }

    if with_median {
        let m = stats::median(values);
        let red = rgb(MARKER_RED).stroke_width(opts.stroke(1.5));
        let dash = y_max / 40.0;
        let n = (y_max / (2.0 * dash)).ceil() as usize;
        let lw = opts.px(0.3) as i32;
        chart
            .draw_series((0..n).map(|i| {
                let y = 2.0 * dash * i as f64;
                PathElement::new(vec![(m, y), (m, (y + dash).min(y_max))], red)
            }))
            .map_err(plot_err)?
            .label("Median")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + lw, y)], red));
        draw_legend!(chart, opts, SeriesLabelPosition::UpperRight);
    }
    Ok(())
}

/// 按 `hue` 着色并按 `hue` 决定点大小的散点图.
fn hue_size_scatter_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    opts: &RenderOptions,
    title: &str,
    (x_desc, y_desc, hue_desc): (&str, &str, &str),
    xs: ArrayView1<f64>,
    ys: ArrayView1<f64>,
    hue: ArrayView1<f64>,
) -> Result<()> {
    let (x0, x1) = padded_range(xs.iter().copied(), 0.05);
    let (y0, y1) = padded_range(ys.iter().copied(), 0.05);
    let (hlo, hhi) = finite_range(hue);
    let cmap = Colormap::Viridis;

    let mut chart = chart_builder(area, opts, title)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(plot_err)?;
    if opts.labels {
        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .label_style(opts.label_font())
            .axis_desc_style(opts.label_font())
            .draw()
            .map_err(plot_err)?;
    }

    chart
        .draw_series(xs.iter().zip(ys.iter()).zip(hue.iter()).map(|((&x, &y), &h)| {
            Circle::new(
                (x, y),
                radius(opts, point_area(h, hlo, hhi)),
                cmap.eval_in(h, hlo, hhi).mix(0.85).filled(),
            )
        }))
        .map_err(plot_err)?;

    // 图例: 取最小、中间、最大三个代表值.
    if hlo.is_finite() {
        let samples = [hlo, (hlo + hhi) / 2.0, hhi];
        for (i, v) in samples.iter().copied().dedup().enumerate() {
            let color = cmap.eval_in(v, hlo, hhi);
            let r = radius(opts, point_area(v, hlo, hhi));
            let label = if i == 0 {
                format!("{hue_desc} {v:.2}")
            } else {
                format!("{v:.2}")
            };
            chart
                .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())
                .map_err(plot_err)?
                .label(label)
                .legend(move |(x, y)| Circle::new((x, y), r, color.filled()));
        }
        draw_legend!(chart, opts, SeriesLabelPosition::UpperLeft);
    }
    Ok(())
}

/// 散点 + 最小二乘直线 + 95% 置信带.
fn regression_panel(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    opts: &RenderOptions,
    title: &str,
    (x_desc, y_desc): (&str, &str),
    xs: ArrayView1<f64>,
    ys: ArrayView1<f64>,
) -> Result<()> {
    let fit = linear_fit(xs, ys);
    let (xmin, xmax) = finite_range(xs);
    let grid = if xmin.is_finite() {
        linspace(xmin, xmax, BAND_POINTS)
    } else {
        Vec::new()
    };
    let band: Vec<(f64, f64, f64)> = fit
        .map(|f| {
            grid.iter()
                .filter_map(|&x| f.confidence_band(x, LEVEL).map(|(lo, hi)| (x, lo, hi)))
                .collect()
        })
        .unwrap_or_default();

    let (x0, x1) = padded_range(xs.iter().copied(), 0.05);
    let (y0, y1) = padded_range(
        ys.iter()
            .copied()
            .chain(band.iter().flat_map(|&(_, lo, hi)| [lo, hi])),
        0.05,
    );

    let mut chart = chart_builder(area, opts, title)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(plot_err)?;
    if opts.labels {
        chart
            .configure_mesh()
            .x_desc(x_desc)
            .y_desc(y_desc)
            .label_style(opts.label_font())
            .axis_desc_style(opts.label_font())
            .draw()
            .map_err(plot_err)?;
    }

    let red = rgb(MARKER_RED);
    if !band.is_empty() {
        let outline: Vec<(f64, f64)> = band
            .iter()
            .map(|&(x, _, hi)| (x, hi))
            .chain(band.iter().rev().map(|&(x, lo, _)| (x, lo)))
            .collect();
        chart
            .draw_series(std::iter::once(Polygon::new(outline, red.mix(0.15).filled())))
            .map_err(plot_err)?;
    }

    let r = radius(opts, 36.0);
    chart
        .draw_series(
            xs.iter()
                .zip(ys.iter())
                .map(|(&x, &y)| Circle::new((x, y), r, rgb(DEFAULT_BLUE).mix(0.8).filled())),
        )
        .map_err(plot_err)?;

    if let Some(f) = fit {
        chart
            .draw_series(LineSeries::new(
                [xmin, xmax].map(|x| (x, f.predict(x))),
                red.stroke_width(opts.stroke(1.5)),
            ))
            .map_err(plot_err)?;
    }
    Ok(())
}

/// `overview_error_analysis.png`: 18 x 12 英寸, 上半部分左侧 2/3 为体积误差直方图,
/// 右侧 1/3 为 Chamfer 与体积误差散点.
pub fn overview_chart<P: AsRef<Path>>(
    path: P,
    table: &CaseTable,
    opts: &RenderOptions,
) -> Result<()> {
    let ratio = table.metric(Metric::Ratio);
    let chamfer = table.metric(Metric::Chamfer);
    let hausdorff = table.metric(Metric::Hausdorff);

    let root = BitMapBackend::new(path.as_ref(), opts.size((18.0, 12.0))).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let rows = root.split_evenly((2, 1));
    let (w, _) = rows[0].dim_in_pixel();
    let (left, right) = rows[0].split_horizontally((w * 2 / 3) as i32);

    let title = format!(
        "Volume Error Distribution (Mean={:.2}%)",
        stats::mean(ratio.view()) * 100.0
    );
    hist_kde_panel(
        &left,
        opts,
        &title,
        "Volume Error Ratio",
        ratio.view(),
        RATIO_HISTOGRAM_BINS,
        rgb(DEFAULT_BLUE),
        true,
    )?;
    hue_size_scatter_panel(
        &right,
        opts,
        "Chamfer Distance vs. Volume Error",
        ("Chamfer", "ratio", "Hausdorff"),
        chamfer.view(),
        ratio.view(),
        hausdorff.view(),
    )?;

    root.present().map_err(plot_err)?;
    Ok(())
}

/// `geo_distribution.png`: Chamfer 与 Hausdorff 距离的分布.
pub fn geo_distribution_chart<P: AsRef<Path>>(
    path: P,
    table: &CaseTable,
    opts: &RenderOptions,
) -> Result<()> {
    let root = BitMapBackend::new(path.as_ref(), opts.size((12.0, 5.0))).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let panels = root.split_evenly((1, 2));

    let specs = [
        (Metric::Chamfer, "Chamfer Distance Distribution", SKY_BLUE),
        (Metric::Hausdorff, "Hausdorff Distance Distribution", SALMON),
    ];
    for (panel, (metric, title, color)) in panels.iter().zip(specs) {
        let values = table.metric(metric);
        let bins = auto_bin_count(values.view());
        hist_kde_panel(
            panel,
            opts,
            title,
            metric.label(),
            values.view(),
            bins,
            rgb(color),
            false,
        )?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}

/// `correlation_analysis.png`: 两个几何距离分别对体积误差的回归.
pub fn correlation_chart<P: AsRef<Path>>(
    path: P,
    table: &CaseTable,
    opts: &RenderOptions,
) -> Result<()> {
    let root = BitMapBackend::new(path.as_ref(), opts.size((12.0, 5.0))).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let panels = root.split_evenly((1, 2));

    let ratio = table.metric(Metric::Ratio);
    let specs = [
        (Metric::Chamfer, "Chamfer vs. Volume Error"),
        (Metric::Hausdorff, "Hausdorff vs. Volume Error"),
    ];
    for (panel, (metric, title)) in panels.iter().zip(specs) {
        let xs = table.metric(metric);
        regression_panel(
            panel,
            opts,
            title,
            (metric.label(), Metric::Ratio.label()),
            xs.view(),
            ratio.view(),
        )?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}

/// 横轴为类别下标时的刻度文字.
fn category_label(v: f64, names: &[&str]) -> String {
    let i = v.round();
    if (v - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < names.len() {
        names[i as usize].to_owned()
    } else {
        String::new()
    }
}

/// `depth_analysis.png`: 各深度分组的平均体积误差 (百分数) 及 95% 置信区间.
pub fn depth_chart<P: AsRef<Path>>(
    path: P,
    groups: &GroupMeans,
    opts: &RenderOptions,
) -> Result<()> {
    let names: Vec<&str> = groups.groups.iter().map(|g| g.group.label()).collect();
    let bars: Vec<(f64, Option<(f64, f64)>)> = groups
        .groups
        .iter()
        .map(|g| (g.mean * 100.0, g.ci.map(|(lo, hi)| (lo * 100.0, hi * 100.0))))
        .collect();

    let extremes = bars
        .iter()
        .flat_map(|&(m, ci)| [Some(m), ci.map(|c| c.0), ci.map(|c| c.1)])
        .flatten()
        .chain([0.0]);
    let (y0, y1) = padded_range(extremes, 0.08);
    let y0 = y0.min(0.0);
    let n = bars.len() as f64;

    let root = BitMapBackend::new(path.as_ref(), opts.size((8.0, 5.0))).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let mut chart = chart_builder(&root, opts, "Volume Error by Network Depth")
        .build_cartesian_2d(-0.5..(n - 0.5), y0..y1)
        .map_err(plot_err)?;
    if opts.labels {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(bars.len() + 1)
            .x_label_formatter(&|v| category_label(*v, &names))
            .x_desc("depth_group")
            .y_desc("Volume Error (%)")
            .label_style(opts.label_font())
            .axis_desc_style(opts.label_font())
            .draw()
            .map_err(plot_err)?;
    }

    chart
        .draw_series(
            bars.iter()
                .enumerate()
                .filter(|(_, (m, _))| m.is_finite())
                .map(|(i, &(m, _))| {
                    let x = i as f64;
                    let color = rgb(BLUES[i % BLUES.len()]);
                    Rectangle::new([(x - 0.4, 0.0), (x + 0.4, m)], color.filled())
                }),
        )
        .map_err(plot_err)?;

    let whisker = BLACK.mix(0.8).stroke_width(opts.stroke(1.5));
    for (i, &(_, ci)) in bars.iter().enumerate() {
        let Some((lo, hi)) = ci else { continue };
        let x = i as f64;
        chart
            .draw_series([
                PathElement::new(vec![(x, lo), (x, hi)], whisker),
                PathElement::new(vec![(x - 0.1, lo), (x + 0.1, lo)], whisker),
                PathElement::new(vec![(x - 0.1, hi), (x + 0.1, hi)], whisker),
            ])
            .map_err(plot_err)?;
    }

    root.present().map_err(plot_err)?;
    Ok(())
}

/// `scale_analysis.png`: 缩放系数与体积误差的散点, 按网络深度着色,
/// 并以阴影标出最优区间.
pub fn scale_chart<P: AsRef<Path>>(path: P, table: &CaseTable, opts: &RenderOptions) -> Result<()> {
    let scale = table.scale();
    let ratio = table.metric(Metric::Ratio);
    let depth = table.depth();
    let (dlo, dhi) = finite_range(depth.view());
    let (band_lo, band_hi) = OPTIMAL_SCALE_RANGE;

    let (x0, x1) = padded_range(scale.iter().copied().chain([band_lo, band_hi]), 0.05);
    let (y0, y1) = padded_range(ratio.iter().copied(), 0.05);

    let root = BitMapBackend::new(path.as_ref(), opts.size((8.0, 5.0))).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let mut chart = chart_builder(&root, opts, "Scale vs. Volume Error")
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(plot_err)?;
    if opts.labels {
        chart
            .configure_mesh()
            .x_desc("scale")
            .y_desc("ratio")
            .label_style(opts.label_font())
            .axis_desc_style(opts.label_font())
            .draw()
            .map_err(plot_err)?;
    }

    let green = rgb(BAND_GREEN).mix(0.1);
    let lw = opts.px(0.3) as i32;
    chart
        .draw_series(std::iter::once(Rectangle::new(
            [(band_lo, y0), (band_hi, y1)],
            green.filled(),
        )))
        .map_err(plot_err)?
        .label("Optimal Range")
        .legend(move |(x, y)| {
            Rectangle::new([(x, y - lw / 3), (x + lw, y + lw / 3)], green.filled())
        });

    let cmap = Colormap::Viridis;
    let r = radius(opts, 36.0);
    chart
        .draw_series(table.iter().map(|rec| {
            let color = cmap.eval_in(rec.depth as f64, dlo, dhi);
            Circle::new((rec.scale, rec.ratio), r, color.filled())
        }))
        .map_err(plot_err)?;

    // 每个出现过的深度一个图例项.
    let depths: Vec<u32> = table.iter().map(|rec| rec.depth).sorted().dedup().collect();
    for d in depths {
        let color = cmap.eval_in(d as f64, dlo, dhi);
        chart
            .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())
            .map_err(plot_err)?
            .label(format!("depth {d}"))
            .legend(move |(x, y)| Circle::new((x, y), r, color.filled()));
    }
    draw_legend!(chart, opts, SeriesLabelPosition::UpperRight);

    root.present().map_err(plot_err)?;
    Ok(())
}

/// 箱线图所需的五数概括与离群点.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BoxStats {
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    /// 1.5 倍四分位距内的最小值.
    pub low: f64,
    /// 1.5 倍四分位距内的最大值.
    pub high: f64,
    pub outliers: Vec<f64>,
}

impl BoxStats {
    /// 空输入返回 `None`.
    pub(crate) fn compute(x: ArrayView1<f64>) -> Option<Self> {
        if x.is_empty() {
            return None;
        }
        let q1 = stats::quantile(x, 0.25);
        let median = stats::quantile(x, 0.5);
        let q3 = stats::quantile(x, 0.75);
        let iqr = q3 - q1;
        let fence = (q1 - 1.5 * iqr)..=(q3 + 1.5 * iqr);

        let (mut low, mut high) = (f64::INFINITY, f64::NEG_INFINITY);
        let mut outliers = Vec::new();
        for &v in x.iter() {
            if fence.contains(&v) {
                low = low.min(v);
                high = high.max(v);
            } else {
                outliers.push(v);
            }
        }
        Some(Self {
            q1,
            median,
            q3,
            low,
            high,
            outliers,
        })
    }
}

/// `side_comparison.png`: 三个指标按左右肾分组的箱线图.
pub fn side_comparison_chart<P: AsRef<Path>>(
    path: P,
    table: &CaseTable,
    opts: &RenderOptions,
) -> Result<()> {
    let names: Vec<&str> = Metric::ALL.iter().map(Metric::label).collect();
    let all = Metric::ALL
        .iter()
        .flat_map(|&m| table.metric(m).to_vec());
    let (y0, y1) = padded_range(all, 0.05);

    let root = BitMapBackend::new(path.as_ref(), opts.size((10.0, 6.0))).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;
    let title = "Comparison of Errors between Left and Right Kidneys";
    let mut chart = chart_builder(&root, opts, title)
        .build_cartesian_2d(-0.5..(Metric::ALL.len() as f64 - 0.5), y0..y1)
        .map_err(plot_err)?;
    if opts.labels {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(Metric::ALL.len() + 1)
            .x_label_formatter(&|v| category_label(*v, &names))
            .x_desc("Metric")
            .y_desc("Value")
            .label_style(opts.label_font())
            .axis_desc_style(opts.label_font())
            .draw()
            .map_err(plot_err)?;
    }

    let edge = BLACK.mix(0.8).stroke_width(opts.stroke(1.0));
    let (half, cap) = (0.18, 0.09);
    let lw = opts.px(0.3) as i32;
    for (j, side) in Side::BOTH.into_iter().enumerate() {
        let color = rgb(SET2[j]);
        let offset = (j as f64 - 0.5) * 0.4;
        for (i, metric) in Metric::ALL.into_iter().enumerate() {
            let values = table.metric_of_side(metric, side);
            let Some(b) = BoxStats::compute(values.view()) else {
                continue;
            };
            let x = i as f64 + offset;
            chart
                .draw_series([
                    Rectangle::new([(x - half, b.q1), (x + half, b.q3)], color.filled()),
                    Rectangle::new([(x - half, b.q1), (x + half, b.q3)], edge),
                ])
                .map_err(plot_err)?;
            chart
                .draw_series([
                    PathElement::new(vec![(x - half, b.median), (x + half, b.median)], edge),
                    PathElement::new(vec![(x, b.q3), (x, b.high)], edge),
                    PathElement::new(vec![(x, b.q1), (x, b.low)], edge),
                    PathElement::new(vec![(x - cap, b.high), (x + cap, b.high)], edge),
                    PathElement::new(vec![(x - cap, b.low), (x + cap, b.low)], edge),
                ])
                .map_err(plot_err)?;
            chart
                .draw_series(
                    b.outliers
                        .iter()
                        .map(|&v| Circle::new((x, v), radius(opts, 16.0), edge)),
                )
                .map_err(plot_err)?;
        }
        chart
            .draw_series(std::iter::empty::<Circle<(f64, f64), i32>>())
            .map_err(plot_err)?
            .label(side.name())
            .legend(move |(x, y)| {
                Rectangle::new([(x, y - lw / 3), (x + lw, y + lw / 3)], color.filled())
            });
    }
    draw_legend!(chart, opts, SeriesLabelPosition::UpperRight);

    root.present().map_err(plot_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_box_stats() {
        let x = array![1.0, 2.0, 3.0, 4.0, 100.0];
        let b = BoxStats::compute(x.view()).unwrap();
        assert_eq!((b.q1, b.median, b.q3), (2.0, 3.0, 4.0));
        assert_eq!(b.low, 1.0);
        assert_eq!(b.high, 4.0);
        assert_eq!(b.outliers, [100.0]);
        assert!(BoxStats::compute(ndarray::Array1::<f64>::zeros(0).view()).is_none());
    }

    #[test]
    fn test_category_label() {
        let names = ["a", "b", "c"];
        assert_eq!(category_label(1.0, &names), "b");
        assert_eq!(category_label(0.5, &names), "");
        assert_eq!(category_label(-1.0, &names), "");
        assert_eq!(category_label(3.0, &names), "");
    }

    #[test]
    fn test_point_area() {
        assert_eq!(point_area(0.0, 0.0, 1.0), 20.0);
        assert_eq!(point_area(1.0, 0.0, 1.0), 200.0);
        assert_eq!(point_area(5.0, 5.0, 5.0), 110.0);
    }
}
