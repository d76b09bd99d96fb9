//! 连续色图.

use once_cell::sync::Lazy;
use plotters::style::RGBColor;

/// 查找表的长度.
const LUT_SIZE: usize = 256;

/// `nipy_spectral` 的控制点, 在 `[0, 1]` 上以 0.05 等距分布.
const NIPY_SPECTRAL: [(f64, f64, f64); 21] = [
    (0.0, 0.0, 0.0),
    (0.4667, 0.0, 0.5333),
    (0.5333, 0.0, 0.6),
    (0.0, 0.0, 0.6667),
    (0.0, 0.0, 0.8667),
    (0.0, 0.4667, 0.8667),
    (0.0, 0.6, 0.8667),
    (0.0, 0.6667, 0.6667),
    (0.0, 0.6667, 0.5333),
    (0.0, 0.6, 0.0),
    (0.0, 0.7333, 0.0),
    (0.0, 0.8667, 0.0),
    (0.0, 1.0, 0.0),
    (0.7333, 1.0, 0.0),
    (0.9333, 0.9333, 0.0),
    (1.0, 0.8, 0.0),
    (1.0, 0.6, 0.0),
    (1.0, 0.0, 0.0),
    (0.8667, 0.0, 0.0),
    (0.8, 0.0, 0.0),
    (0.8, 0.8, 0.8),
];

/// `viridis` 的等距色标.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (0x44, 0x01, 0x54),
    (0x47, 0x2c, 0x7a),
    (0x3b, 0x52, 0x8b),
    (0x2c, 0x72, 0x8e),
    (0x21, 0x91, 0x8c),
    (0x28, 0xae, 0x80),
    (0x5e, 0xc9, 0x62),
    (0xad, 0xdc, 0x30),
    (0xfd, 0xe7, 0x25),
];

static NIPY_LUT: Lazy<Vec<RGBColor>> = Lazy::new(|| {
    let stops: Vec<(f64, f64, f64)> = NIPY_SPECTRAL
        .iter()
        .map(|&(r, g, b)| (r * 255.0, g * 255.0, b * 255.0))
        .collect();
    build_lut(&stops)
});

static VIRIDIS_LUT: Lazy<Vec<RGBColor>> = Lazy::new(|| {
    let stops: Vec<(f64, f64, f64)> = VIRIDIS
        .iter()
        .map(|&(r, g, b)| (r as f64, g as f64, b as f64))
        .collect();
    build_lut(&stops)
});

/// 在等距控制点之间线性插值, 生成 [`LUT_SIZE`] 项查找表.
fn build_lut(stops: &[(f64, f64, f64)]) -> Vec<RGBColor> {
    let segments = (stops.len() - 1) as f64;
    (0..LUT_SIZE)
        .map(|i| {
            let pos = i as f64 / (LUT_SIZE - 1) as f64 * segments;
            let lo = (pos.floor() as usize).min(stops.len() - 2);
            let frac = pos - lo as f64;
            let (a, b) = (stops[lo], stops[lo + 1]);
            let mix = |u: f64, v: f64| (u + (v - u) * frac).round().clamp(0.0, 255.0) as u8;
            RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
        })
        .collect()
}

/// 支持的色图.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Colormap {
    /// 分割标签切片.
    NipySpectral,

    /// 按网络深度着色的散点.
    Viridis,
}

impl Colormap {
    #[inline]
    fn lut(&self) -> &'static [RGBColor] {
        match self {
            Self::NipySpectral => &NIPY_LUT,
            Self::Viridis => &VIRIDIS_LUT,
        }
    }

    /// `t` 取值于 `[0, 1]`, 越界截断, `NaN` 视为 0.
    pub fn eval(&self, t: f64) -> RGBColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let lut = self.lut();
        lut[(t * (lut.len() - 1) as f64).round() as usize]
    }

    /// 将 `v` 按 `[lo, hi]` 归一化后取色. `lo == hi` 时取色图起点.
    #[inline]
    pub fn eval_in(&self, v: f64, lo: f64, hi: f64) -> RGBColor {
        if hi > lo {
            self.eval((v - lo) / (hi - lo))
        } else {
            self.eval(0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(Colormap::NipySpectral.eval(0.0), RGBColor(0, 0, 0));
        assert_eq!(Colormap::NipySpectral.eval(1.0), RGBColor(204, 204, 204));
        assert_eq!(Colormap::Viridis.eval(0.0), RGBColor(0x44, 0x01, 0x54));
        assert_eq!(Colormap::Viridis.eval(1.0), RGBColor(0xfd, 0xe7, 0x25));
    }

    #[test]
    fn test_clamp_and_degenerate_range() {
        let cm = Colormap::NipySpectral;
        assert_eq!(cm.eval(-3.0), cm.eval(0.0));
        assert_eq!(cm.eval(7.0), cm.eval(1.0));
        assert_eq!(cm.eval(f64::NAN), cm.eval(0.0));
        assert_eq!(cm.eval_in(5.0, 5.0, 5.0), cm.eval(0.0));
        assert_eq!(cm.eval_in(3.0, 1.0, 3.0), cm.eval(1.0));
    }

    #[test]
    fn test_distinct_labels() {
        // 0..=3 四个标签归一化后应得到四种不同颜色.
        let cm = Colormap::NipySpectral;
        let colors: Vec<_> = (0..=3).map(|l| cm.eval_in(l as f64, 0.0, 3.0)).collect();
        for i in 0..colors.len() {
            for j in i + 1..colors.len() {
                assert_ne!(colors[i], colors[j]);
            }
        }
    }
}
