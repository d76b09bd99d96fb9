//! Pearson 相关系数.

use super::two_tailed_p;
use itertools::izip;
use ndarray::ArrayView1;

/// 相关系数及其双侧 p 值.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Correlation {
    /// Pearson r, 取值于 `[-1, 1]`.
    pub r: f64,

    /// 零假设 "r = 0" 下的双侧 p 值.
    pub p: f64,
}

impl Correlation {
    const UNDEFINED: Self = Self {
        r: f64::NAN,
        p: f64::NAN,
    };

    /// 相关系数是否有定义.
    #[inline]
    pub fn is_defined(&self) -> bool {
        !self.r.is_nan()
    }
}

/// 计算 `x` 与 `y` 的 Pearson 相关系数与双侧 p 值.
///
/// p 值基于 `t = r * sqrt((n - 2) / (1 - r^2))`, 自由度 `n - 2`.
///
/// # 未定义情形
///
/// 1. 长度不一致或少于两个样本: r 与 p 均为 `NaN`.
/// 2. 任一列方差为零 (常数列): r 与 p 均为 `NaN`.
/// 3. 恰好两个样本: r 为 ±1, p 为 1.
pub fn pearson(x: ArrayView1<f64>, y: ArrayView1<f64>) -> Correlation {
    let n = x.len();
    if n != y.len() || n < 2 {
        return Correlation::UNDEFINED;
    }

    let (mx, my) = (super::mean(x), super::mean(y));
    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&a, &b) in izip!(x.iter(), y.iter()) {
        let (dx, dy) = (a - mx, b - my);
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return Correlation::UNDEFINED;
    }

    let r = (sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0);
    if n == 2 {
        return Correlation { r, p: 1.0 };
    }

    let df = (n - 2) as f64;
    let p = if r.abs() == 1.0 {
        0.0
    } else {
        two_tailed_p(r * (df / (1.0 - r * r)).sqrt(), df)
    };
    Correlation { r, p }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_perfect_correlation() {
        let x = array![1.0, 2.0, 3.0, 4.0];
        let c = pearson(x.view(), (&x * 2.0 + 1.0).view());
        assert!((c.r - 1.0).abs() < 1e-12);
        assert!(c.p < 1e-10);

        let c = pearson(x.view(), (-&x).view());
        assert!((c.r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_value() {
        // r = 0.7745966692, p = 0.1241
        let x = array![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = array![2.0, 4.0, 5.0, 4.0, 5.0];
        let c = pearson(x.view(), y.view());
        assert!((c.r - 0.774_596_669_2).abs() < 1e-9);
        assert!((c.p - 0.124_1).abs() < 1e-3);
    }

    #[test]
    fn test_constant_columns_are_nan() {
        let x = array![0.3, 0.3, 0.3];
        let c = pearson(x.view(), x.view());
        assert!(c.r.is_nan());
        assert!(c.p.is_nan());
        assert!(!c.is_defined());
    }

    #[test]
    fn test_short_inputs() {
        let c = pearson(array![1.0].view(), array![2.0].view());
        assert!(c.r.is_nan());

        let c = pearson(array![1.0, 2.0].view(), array![3.0, 1.0].view());
        assert!((c.r + 1.0).abs() < 1e-12);
        assert_eq!(c.p, 1.0);

        let c = pearson(array![1.0, 2.0].view(), array![1.0, 2.0, 3.0].view());
        assert!(!c.is_defined());
    }
}
