//! 独立双样本 t 检验与均值置信区间.

use super::{mean, students_t, two_tailed_p, var};
use ndarray::ArrayView1;
use statrs::distribution::ContinuousCDF;

/// t 检验结果.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TTest {
    /// t 统计量.
    pub t: f64,

    /// 自由度.
    pub df: f64,

    /// 双侧 p 值.
    pub p: f64,
}

/// 独立双样本 t 检验, 假定两组方差相等 (合并方差, Student's t-test).
///
/// 自由度为 `n1 + n2 - 2`. 自由度不为正或合并方差为零时, t 与 p 为 `NaN`.
pub fn ttest_ind(a: ArrayView1<f64>, b: ArrayView1<f64>) -> TTest {
    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let df = n1 + n2 - 2.0;
    if n1 < 1.0 || n2 < 1.0 || df <= 0.0 {
        return TTest {
            t: f64::NAN,
            df,
            p: f64::NAN,
        };
    }

    // 单样本组的方差贡献为 0.
    let ss = |x: ArrayView1<f64>, n: f64| if n < 2.0 { 0.0 } else { var(x) * (n - 1.0) };
    let pooled = (ss(a, n1) + ss(b, n2)) / df;
    let se = (pooled * (1.0 / n1 + 1.0 / n2)).sqrt();
    let t = if se > 0.0 {
        (mean(a) - mean(b)) / se
    } else {
        f64::NAN
    };
    TTest {
        t,
        df,
        p: two_tailed_p(t, df),
    }
}

/// 均值的 `level` 置信区间 (基于 t 分布), 返回 `(下限, 上限)`.
///
/// 少于两个样本时返回 `None`.
pub fn mean_confidence_interval(x: ArrayView1<f64>, level: f64) -> Option<(f64, f64)> {
    let n = x.len();
    if n < 2 {
        return None;
    }
    let dist = students_t((n - 1) as f64)?;
    let q = dist.inverse_cdf(0.5 + level / 2.0);
    let m = mean(x);
    let half = q * (var(x) / n as f64).sqrt();
    Some((m - half, m + half))
}
