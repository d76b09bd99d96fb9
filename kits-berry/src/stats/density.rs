//! 直方图与高斯核密度估计.

use super::{quantile_sorted, sorted};
use ndarray::ArrayView1;
use std::f64::consts::PI;

/// 等宽直方图.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    /// 分箱边界, 长度为 `counts.len() + 1`.
    pub edges: Vec<f64>,

    /// 每个分箱的样本数.
    pub counts: Vec<usize>,
}

impl Histogram {
    /// 在数据范围 `[min, max]` 上划分 `bins` 个等宽分箱.
    ///
    /// 每个分箱左闭右开, 最后一个分箱右闭. 数据范围退化为一个点时,
    /// 使用 `[v - 0.5, v + 0.5]`. 非有限值被忽略.
    pub fn new(x: ArrayView1<f64>, bins: usize) -> Self {
        let bins = bins.max(1);
        let finite: Vec<f64> = x.iter().copied().filter(|v| v.is_finite()).collect();
        let (lo, hi) = match range(&finite) {
            Some((lo, hi)) if lo < hi => (lo, hi),
            Some((v, _)) => (v - 0.5, v + 0.5),
            None => (0.0, 1.0),
        };

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        let mut counts = vec![0; bins];
        for v in finite {
            let idx = (((v - lo) / width) as usize).min(bins - 1);
            counts[idx] += 1;
        }
        Self { edges, counts }
    }

    /// 分箱个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// 是否没有分箱. 由构造方式保证总是 `false`.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 分箱宽度.
    #[inline]
    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// 最大计数.
    #[inline]
    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// 迭代 `(左边界, 右边界, 计数)`.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(w, &c)| (w[0], w[1], c))
    }
}

fn range(x: &[f64]) -> Option<(f64, f64)> {
    let mut it = x.iter().copied();
    let first = it.next()?;
    Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// [`auto_bin_count`] 返回的分箱数上限.
pub const MAX_AUTO_BINS: usize = 1000;

/// "auto" 分箱规则: Sturges 与 Freedman-Diaconis 两者中分箱更多的一个.
///
/// 四分位距为零时退回 Sturges. 结果不超过 [`MAX_AUTO_BINS`].
pub fn auto_bin_count(x: ArrayView1<f64>) -> usize {
    let n = x.len();
    if n < 2 {
        return 1;
    }
    let sturges = (n as f64).log2().ceil() as usize + 1;

    let s = sorted(x);
    let span = s[n - 1] - s[0];
    let iqr = quantile_sorted(&s, 0.75) - quantile_sorted(&s, 0.25);
    if iqr <= 0.0 || span <= 0.0 {
        return sturges;
    }
    let fd_width = 2.0 * iqr / (n as f64).cbrt();
    let fd = (span / fd_width).ceil() as usize;
    sturges.max(fd).clamp(1, MAX_AUTO_BINS)
}

/// Scott 规则带宽系数: `n^(-1/5)`, 乘以样本标准差即为核宽度.
#[inline]
fn scott_factor(n: usize) -> f64 {
    (n as f64).powf(-0.2)
}

/// 高斯核密度估计, 带宽按 Scott 规则选取. 返回 `grid` 上各点的概率密度.
///
/// 少于两个样本或样本标准差为零时, 密度无定义, 返回 `None`.
pub fn gaussian_kde(x: ArrayView1<f64>, grid: &[f64]) -> Option<Vec<f64>> {
    let n = x.len();
    let sd = super::std(x);
    if n < 2 || !(sd > 0.0) {
        return None;
    }

    let bw = sd * scott_factor(n);
    let norm = 1.0 / (n as f64 * bw * (2.0 * PI).sqrt());
    let density = grid
        .iter()
        .map(|&g| {
            x.iter()
                .map(|&v| {
                    let z = (g - v) / bw;
                    (-0.5 * z * z).exp()
                })
                .sum::<f64>()
                * norm
        })
        .collect();
    Some(density)
}

/// 在 `[lo, hi]` 上生成 `n` 个等距点, 包含两端.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n).map(|i| lo + step * i as f64).collect()
        }
    }
}
