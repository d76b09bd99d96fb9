use std::collections::BTreeSet;
use std::ops::Index;
use std::path::Path;

use ndarray::{Array3, ArrayD, Axis, Ix3};
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};

use crate::{Error, Idx3d, Result};

mod axis;
mod slice;

pub use axis::VolumeAxis;
pub use slice::{pick_indices, ImgWriteVis, LabelSlice};

/// `NiftiHeader` 是栈上大对象, 移动该对象的开销很可观.
/// 因此我们将其分配到堆上.
type BoxedHeader = Box<NiftiHeader>;

/// nii 文件 header 的共用属性.
pub trait NiftiHeaderAttr {
    /// 获取 header 部分.
    fn header(&self) -> &NiftiHeader;

    /// 获取单个体素分辨率, 以毫米为单位, 按 `(Z, Y, X)` 顺序.
    #[inline]
    fn pix_dim(&self) -> [f64; 3] {
        let [_, x, y, z, ..] = self.header().pixdim;
        [z as f64, y as f64, x as f64]
    }

    /// 获取体素的实际体积值, 以立方毫米为单位.
    #[inline]
    fn voxel(&self) -> f64 {
        self.pix_dim().iter().product()
    }
}

/// nii 格式 3D 分割标签, 包括 header 和标签. 标签值以 `u8` 保存,
/// 数据按 `(Z, Y, X)` 组织.
#[derive(Debug, Clone)]
pub struct SegVolume {
    header: BoxedHeader,
    data: Array3<u8>,
}

impl NiftiHeaderAttr for SegVolume {
    #[inline]
    fn header(&self) -> &NiftiHeader {
        &self.header
    }
}

impl Index<Idx3d> for SegVolume {
    type Output = u8;

    #[inline]
    fn index(&self, index: Idx3d) -> &Self::Output {
        &self.data[index]
    }
}

/// 去掉第三维之后长度为 1 的维度, 如 `(W, H, Z, 1)`.
fn squeeze_trailing(mut data: ArrayD<f32>) -> ArrayD<f32> {
    while data.ndim() > 3 && data.shape()[data.ndim() - 1] == 1 {
        let last = Axis(data.ndim() - 1);
        data = data.index_axis_move(last, 0);
    }
    data
}

impl SegVolume {
    /// 打开 `.nii` 或 `.nii.gz` 格式的 3D 分割标签.
    ///
    /// 体素值先按 header 的缩放参数转为 `f32`, 再截断为 `u8`:
    /// 小数部分舍去, 负数变为 0, 超过 255 的变为 255.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let obj = ReaderOptions::new().read_file(path.as_ref())?;
        let header = Box::new(obj.header().clone());

        let data = squeeze_trailing(obj.into_volume().into_ndarray::<f32>()?);
        let ndim = data.ndim();
        let data = data
            .into_dimensionality::<Ix3>()
            .map_err(|_| Error::NotAVolume(ndim))?;

        // [X, Y, Z] -> [Z, Y, X].
        let data = data.permuted_axes([2, 1, 0]).mapv(|v| v as u8);
        let ans = Self { header, data };
        log::debug!(
            "loaded `{}`: shape {:?}, spacing {:?} mm, voxel {:.3} mm^3",
            path.as_ref().display(),
            ans.shape(),
            ans.pix_dim(),
            ans.voxel()
        );
        Ok(ans)
    }

    /// 由 `(Z, Y, X)` 组织的标签直接创建, header 只填写维度信息.
    pub fn from_array(data: Array3<u8>) -> Self {
        let (z, y, x) = data.dim();
        let mut header = Box::<NiftiHeader>::default();
        header.dim = [3, x as u16, y as u16, z as u16, 1, 1, 1, 1];
        header.pixdim = [1.0; 8];
        Self { header, data }
    }

    /// 数据形状 `(Z, Y, X)`.
    #[inline]
    pub fn shape(&self) -> Idx3d {
        self.data.dim()
    }

    /// 沿 `axis` 的切片个数.
    #[inline]
    pub fn extent(&self, axis: VolumeAxis) -> usize {
        self.data.len_of(axis.ndarray_axis())
    }

    /// 出现过的所有标签值, 升序.
    pub fn unique_labels(&self) -> Vec<u8> {
        self.data
            .iter()
            .copied()
            .collect::<BTreeSet<u8>>()
            .into_iter()
            .collect()
    }

    /// 沿 `axis` 取第 `index` 个切片.
    ///
    /// 当 `index` 越界时 panic.
    #[inline]
    pub fn slice(&self, axis: VolumeAxis, index: usize) -> LabelSlice<'_> {
        LabelSlice::new(self.data.index_axis(axis.ndarray_axis(), index))
    }

    /// 沿 `axis` 等距选取 `count` 个切片, 返回 `(下标, 切片)`.
    pub fn pick_slices(
        &self,
        axis: VolumeAxis,
        count: usize,
    ) -> Result<Vec<(usize, LabelSlice<'_>)>> {
        Ok(pick_indices(self.extent(axis), count)?
            .into_iter()
            .map(|i| (i, self.slice(axis, i)))
            .collect())
    }
}
