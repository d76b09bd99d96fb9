//! 一元最小二乘回归.

use super::{mean, students_t};
use itertools::izip;
use ndarray::ArrayView1;
use statrs::distribution::ContinuousCDF;

/// 最小二乘直线 `y = slope * x + intercept`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LinearFit {
    /// 斜率.
    pub slope: f64,

    /// 截距.
    pub intercept: f64,

    n: usize,
    x_mean: f64,
    sxx: f64,
    /// 残差标准误 `sqrt(SSE / (n - 2))`.
    resid_std: f64,
}

impl LinearFit {
    /// 拟合值.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// 拟合均值在 `x` 处的 `level` 置信区间, 返回 `(下限, 上限)`.
    ///
    /// 样本少于三个时残差自由度为零, 返回 `None`.
    pub fn confidence_band(&self, x: f64, level: f64) -> Option<(f64, f64)> {
        if self.n < 3 {
            return None;
        }
        let t = students_t((self.n - 2) as f64)?.inverse_cdf(0.5 + level / 2.0);
        let dx = x - self.x_mean;
        let se = self.resid_std * (1.0 / self.n as f64 + dx * dx / self.sxx).sqrt();
        let y = self.predict(x);
        Some((y - t * se, y + t * se))
    }
}

/// 拟合 `y` 关于 `x` 的最小二乘直线.
///
/// 长度不一致、少于两个样本或 `x` 为常数时返回 `None`.
pub fn linear_fit(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Option<LinearFit> {
    let n = x.len();
    if n != y.len() || n < 2 {
        return None;
    }
    let (mx, my) = (mean(x), mean(y));
    let (mut sxx, mut sxy) = (0.0, 0.0);
    for (&a, &b) in izip!(x.iter(), y.iter()) {
        sxx += (a - mx) * (a - mx);
        sxy += (a - mx) * (b - my);
    }
    if sxx == 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = my - slope * mx;
    let sse: f64 = izip!(x.iter(), y.iter())
        .map(|(&a, &b)| {
            let r = b - (slope * a + intercept);
            r * r
        })
        .sum();
    let resid_std = if n > 2 {
        (sse / (n - 2) as f64).sqrt()
    } else {
        0.0
    };
    Some(LinearFit {
        slope,
        intercept,
        n,
        x_mean: mx,
        sxx,
        resid_std,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_exact_line() {
        let x = array![1.0, 2.0, 3.0, 4.0];
        let y = array![3.0, 5.0, 7.0, 9.0];
        let fit = linear_fit(x.view(), y.view()).unwrap();
        assert!((fit.slope - 2.0).abs() < 1e-12);
        assert!((fit.intercept - 1.0).abs() < 1e-12);
        assert!((fit.predict(10.0) - 21.0).abs() < 1e-12);

        // 无残差, 置信带退化为直线本身.
        let (lo, hi) = fit.confidence_band(2.5, 0.95).unwrap();
        assert!((lo - 6.0).abs() < 1e-9 && (hi - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_band_widens_away_from_mean() {
        let x = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = array![2.0, 4.0, 5.0, 4.0, 5.0];
        let fit = linear_fit(x.view(), y.view()).unwrap();
        assert!((fit.slope - 0.6).abs() < 1e-12);
        assert!((fit.intercept - 2.2).abs() < 1e-12);

        let width = |v: f64| {
            let (lo, hi) = fit.confidence_band(v, 0.95).unwrap();
            assert!(lo <= fit.predict(v) && fit.predict(v) <= hi);
            hi - lo
        };
        assert!(width(3.0) < width(1.0));
        assert!(width(3.0) < width(6.0));
    }

    #[test]
    fn test_undefined_fits() {
        assert!(linear_fit(array![1.0, 1.0].view(), array![1.0, 2.0].view()).is_none());
        assert!(linear_fit(array![1.0].view(), array![1.0].view()).is_none());

        let fit = linear_fit(array![1.0, 2.0].view(), array![1.0, 3.0].view()).unwrap();
        assert!(fit.confidence_band(1.5, 0.95).is_none());
    }
}
