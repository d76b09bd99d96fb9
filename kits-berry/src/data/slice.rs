//! 二维标签切片与等距选片.

use crate::plot::Colormap;
use crate::{Error, Idx2d, Result};
use ndarray::ArrayView2;
use std::ops::Index;
use std::path::Path;

/// 不可变、借用的二维标签切片.
#[derive(Copy, Clone, Debug)]
pub struct LabelSlice<'a> {
    /// 借用于 [`crate::SegVolume`].
    data: ArrayView2<'a, u8>,
}

impl Index<Idx2d> for LabelSlice<'_> {
    type Output = u8;

    #[inline]
    fn index(&self, index: Idx2d) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a> LabelSlice<'a> {
    #[inline]
    pub(crate) fn new(data: ArrayView2<'a, u8>) -> Self {
        Self { data }
    }

    /// 切片形状 (行, 列).
    #[inline]
    pub fn shape(&self) -> Idx2d {
        self.data.dim()
    }

    /// 按行优先迭代 `((行, 列), 像素)`.
    #[inline]
    pub fn indexed_iter(&self) -> impl Iterator<Item = (Idx2d, &u8)> {
        self.data.indexed_iter()
    }

    /// 切片中的最小与最大标签. 空切片返回 `None`.
    pub fn value_range(&self) -> Option<(u8, u8)> {
        let mut it = self.data.iter().copied();
        let first = it.next()?;
        Some(it.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
    }

    /// 按本切片自身的最小最大值归一化, 经 `cmap` 映射为 RGB 图像.
    pub fn to_rgb(&self, cmap: Colormap) -> image::RgbImage {
        let (height, width) = self.shape();
        let (lo, hi) = self.value_range().unwrap_or((0, 0));
        let mut buf = image::RgbImage::new(width as u32, height as u32);
        for ((h, w), &pix) in self.indexed_iter() {
            let c = cmap.eval_in(pix as f64, lo as f64, hi as f64);
            buf.put_pixel(w as u32, h as u32, image::Rgb([c.0, c.1, c.2]));
        }
        buf
    }
}

/// 在 `0..=extent-1` 上等距选取 `count` 个下标 (含两端), 四舍五入到最近整数.
///
/// `count > extent` 时会出现重复下标. `count` 或 `extent` 为 0 时返回错误.
pub fn pick_indices(extent: usize, count: usize) -> Result<Vec<usize>> {
    if count == 0 || extent == 0 {
        return Err(Error::InvalidSliceCount { count, extent });
    }
    if count == 1 {
        return Ok(vec![0]);
    }
    let last = (extent - 1) as f64;
    let step = last / (count - 1) as f64;
    Ok((0..count)
        .map(|i| ((step * i as f64).round() as usize).min(extent - 1))
        .collect())
}

/// 表明一个可以通过 **可视化友好** 模式持久化存储的图像对象.
///
/// 对于标签切片, 各标签值在保存时被映射到彼此容易区分的颜色.
pub trait ImgWriteVis {
    /// 按照一定的可视化规则将图片保存到 `path` 路径.
    fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()>;
}

/// 经 `nipy_spectral` 着色, 与拼图中的颜色一致.
impl ImgWriteVis for LabelSlice<'_> {
    fn save<P: AsRef<Path>>(&self, path: P) -> image::ImageResult<()> {
        self.to_rgb(Colormap::NipySpectral).save(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_pick_indices() {
        assert_eq!(pick_indices(20, 6).unwrap(), [0, 4, 8, 11, 15, 19]);
        assert_eq!(pick_indices(5, 5).unwrap(), [0, 1, 2, 3, 4]);
        assert_eq!(pick_indices(10, 1).unwrap(), [0]);
        assert_eq!(pick_indices(1, 3).unwrap(), [0, 0, 0]);
        // 多于轴长时允许重复.
        assert_eq!(pick_indices(2, 4).unwrap(), [0, 0, 1, 1]);
    }

    #[test]
    fn test_pick_indices_invalid() {
        assert!(matches!(
            pick_indices(0, 3),
            Err(Error::InvalidSliceCount { count: 3, extent: 0 })
        ));
        assert!(pick_indices(10, 0).is_err());
    }

    #[test]
    fn test_slice_accessors() {
        let a = array![[0u8, 1, 2], [3, 0, 1]];
        let s = LabelSlice::new(a.view());
        assert_eq!(s.shape(), (2, 3));
        assert_eq!(s[(1, 0)], 3);
        assert_eq!(s.value_range(), Some((0, 3)));
    }

    #[test]
    fn test_constant_slice_to_rgb() {
        let a = Array2::<u8>::from_elem((4, 5), 2);
        let img = LabelSlice::new(a.view()).to_rgb(Colormap::NipySpectral);
        assert_eq!(img.dimensions(), (5, 4));
        let first = Colormap::NipySpectral.eval(0.0);
        assert!(img.pixels().all(|p| p.0 == [first.0, first.1, first.2]));
    }

    #[test]
    fn test_save() {
        let dir = tempfile::tempdir().unwrap();
        let a = array![[0u8, 1], [2, 3]];
        let s = LabelSlice::new(a.view());

        let vis = dir.path().join("vis.png");
        s.save(&vis).unwrap();
        assert_eq!(image::open(&vis).unwrap().to_rgb8().dimensions(), (2, 2));
    }
}
