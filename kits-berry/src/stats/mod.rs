//! 描述统计与假设检验.
//!
//! 所有函数都接受 `ArrayView1<f64>`, 不修改输入. 无法定义的统计量
//! (样本不足、方差为零等) 以 `NaN` 表示, 而不是 panic.

use ndarray::ArrayView1;
use ordered_float::OrderedFloat;
use statrs::distribution::StudentsT;

mod correlation;
mod density;
mod group;
mod regression;
mod ttest;

pub use correlation::{pearson, Correlation};
pub use density::{auto_bin_count, gaussian_kde, linspace, Histogram, MAX_AUTO_BINS};
pub use group::{DepthGroup, GroupMeans, GroupStat, SideComparison, SideRow};
pub use regression::{linear_fit, LinearFit};
pub use ttest::{mean_confidence_interval, ttest_ind, TTest};

/// `describe` 默认输出的分位点.
pub const DEFAULT_PERCENTILES: [f64; 3] = [0.25, 0.5, 0.75];

/// 体积误差比额外关注 95 分位点.
pub const RATIO_PERCENTILES: [f64; 4] = [0.25, 0.5, 0.75, 0.95];

/// 一列数据的描述统计.
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    /// 样本量.
    pub count: usize,
    /// 均值.
    pub mean: f64,
    /// 无偏标准差 (ddof = 1).
    pub std: f64,
    /// 最小值.
    pub min: f64,
    /// (分位点, 分位数), 按分位点升序.
    pub percentiles: Vec<(f64, f64)>,
    /// 最大值.
    pub max: f64,
}

impl Summary {
    /// 获取分位点 `q` 处的分位数 (必须是 `describe` 时给出的分位点之一).
    pub fn percentile(&self, q: f64) -> Option<f64> {
        self.percentiles
            .iter()
            .find(|(p, _)| (p - q).abs() < 1e-12)
            .map(|(_, v)| *v)
    }

    /// 中位数, 不要求 `describe` 时给出 0.5.
    #[inline]
    pub fn median(&self) -> Option<f64> {
        self.percentile(0.5)
    }
}

/// 计算描述统计. `percentiles` 取值于 `[0, 1]`.
///
/// 空输入的各统计量均为 `NaN`.
pub fn describe(x: ArrayView1<f64>, percentiles: &[f64]) -> Summary {
    let sorted = sorted(x);
    let mut qs = percentiles.to_vec();
    qs.sort_by_key(|q| OrderedFloat(*q));
    Summary {
        count: x.len(),
        mean: mean(x),
        std: std(x),
        min: sorted.first().copied().unwrap_or(f64::NAN),
        percentiles: qs.iter().map(|&q| (q, quantile_sorted(&sorted, q))).collect(),
        max: sorted.last().copied().unwrap_or(f64::NAN),
    }
}

/// 均值. 空输入返回 `NaN`.
#[inline]
pub fn mean(x: ArrayView1<f64>) -> f64 {
    x.mean().unwrap_or(f64::NAN)
}

/// 无偏标准差 (ddof = 1). 少于两个样本返回 `NaN`.
#[inline]
pub fn std(x: ArrayView1<f64>) -> f64 {
    if x.len() < 2 {
        f64::NAN
    } else {
        x.std(1.0)
    }
}

/// 无偏方差 (ddof = 1). 少于两个样本返回 `NaN`.
#[inline]
pub fn var(x: ArrayView1<f64>) -> f64 {
    if x.len() < 2 {
        f64::NAN
    } else {
        x.var(1.0)
    }
}

/// 分位数, 线性插值. 空输入返回 `NaN`.
#[inline]
pub fn quantile(x: ArrayView1<f64>, q: f64) -> f64 {
    quantile_sorted(&sorted(x), q)
}

/// 中位数.
#[inline]
pub fn median(x: ArrayView1<f64>) -> f64 {
    quantile(x, 0.5)
}

/// 升序排列的副本.
pub(crate) fn sorted(x: ArrayView1<f64>) -> Vec<f64> {
    let mut v = x.to_vec();
    v.sort_by_key(|f| OrderedFloat(*f));
    v
}

/// 在已排序数据上求分位数: 位置 `q * (n - 1)`, 相邻两点线性插值.
pub(crate) fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// 自由度为 `df` 的标准 t 分布. `df` 非正或非有限时返回 `None`.
#[inline]
pub(crate) fn students_t(df: f64) -> Option<StudentsT> {
    if df.is_finite() && df > 0.0 {
        StudentsT::new(0.0, 1.0, df).ok()
    } else {
        None
    }
}

/// 双侧 p 值: `2 * P(T <= -|t|)`.
pub(crate) fn two_tailed_p(t: f64, df: f64) -> f64 {
    use statrs::distribution::ContinuousCDF;

    if t.is_nan() {
        return f64::NAN;
    }
    match students_t(df) {
        Some(dist) => (2.0 * dist.cdf(-t.abs())).min(1.0),
        None => f64::NAN,
    }
}
