//! 基于 `plotters` 的静态绘图.
//!
//! 图片尺寸以英寸给出, 乘以 [`RenderOptions::dpi`] 得到像素. 字号以磅给出,
//! 同样随 dpi 缩放.
//!
//! # 注意
//!
//! `plotters` 绘制文字依赖系统字体. 在没有字体的环境 (如容器) 中,
//! 将 [`RenderOptions::labels`] 设为 `false` 可跳过所有文字,
//! 只绘制图形本身.

use crate::consts::REPORT_DPI;
use crate::Error;
use plotters::coord::Shift;
use plotters::prelude::*;

mod charts;
mod colormap;
mod strip;

pub use charts::{
    correlation_chart, depth_chart, geo_distribution_chart, overview_chart, scale_chart,
    side_comparison_chart,
};
pub use colormap::Colormap;
pub use strip::{render_strip, save_strip};

/// 绘图参数.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// 每英寸像素数.
    pub dpi: u32,

    /// 是否绘制标题、刻度、图例等文字.
    pub labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            dpi: REPORT_DPI,
            labels: true,
        }
    }
}

impl RenderOptions {
    /// 指定 dpi, 绘制文字.
    #[inline]
    pub const fn with_dpi(dpi: u32) -> Self {
        Self { dpi, labels: true }
    }

    /// 英寸转像素, 至少为 1.
    #[inline]
    pub fn px(&self, inches: f64) -> u32 {
        ((inches * self.dpi as f64).round() as u32).max(1)
    }

    /// 图片像素尺寸.
    #[inline]
    pub fn size(&self, (w, h): (f64, f64)) -> (u32, u32) {
        (self.px(w), self.px(h))
    }

    /// 磅转像素.
    #[inline]
    pub fn pt(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }

    /// 线宽, 以磅给出, 至少 1 像素.
    #[inline]
    pub fn stroke(&self, points: f64) -> u32 {
        (self.pt(points).round() as u32).max(1)
    }

    /// 标题字体.
    #[inline]
    pub(crate) fn title_font(&self) -> (&'static str, f64) {
        ("sans-serif", self.pt(14.0))
    }

    /// 刻度与图例字体.
    #[inline]
    pub(crate) fn label_font(&self) -> (&'static str, f64) {
        ("sans-serif", self.pt(10.0))
    }
}

/// 将 `plotters` 的错误转成 [`Error::Plot`].
#[inline]
pub(crate) fn plot_err<E: std::fmt::Display>(e: E) -> Error {
    Error::Plot(e.to_string())
}

/// (u8, u8, u8) 常量转 `plotters` 颜色.
#[inline]
pub(crate) const fn rgb((r, g, b): (u8, u8, u8)) -> RGBColor {
    RGBColor(r, g, b)
}

/// 统一的坐标系构造: 外边距, 以及 (若绘制文字) 标题和坐标轴标签区域.
pub(crate) fn chart_builder<'a, 'b, DB: DrawingBackend>(
    area: &'a DrawingArea<DB, Shift>,
    opts: &RenderOptions,
    title: &str,
) -> ChartBuilder<'a, 'b, DB> {
    let mut builder = ChartBuilder::on(area);
    builder.margin(opts.px(0.12));
    if opts.labels {
        builder
            .caption(title, opts.title_font())
            .x_label_area_size(opts.px(0.45))
            .y_label_area_size(opts.px(0.65));
    }
    builder
}

/// 包含 `values` 中全部有限值的区间, 两端各留 `pad` 比例的空白.
/// 没有有限值或所有值相同时, 退化为 `[v - 0.5, v + 0.5]`.
pub(crate) fn padded_range<I: IntoIterator<Item = f64>>(values: I, pad: f64) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    let margin = (hi - lo) * pad;
    (lo - margin, hi + margin)
}
