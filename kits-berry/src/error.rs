//! 运行时错误.

use std::path::PathBuf;
use thiserror::Error;

/// 本 crate 统一的错误类型.
#[derive(Error, Debug)]
pub enum Error {
    /// 底层 I/O 错误.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// csv 解析错误.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// 电子表格 (xlsx/xls/ods) 解析错误.
    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    /// nifti 文件读取错误.
    #[error("NIfTI error: {0}")]
    Nifti(#[from] nifti::NiftiError),

    /// 图片编码或写入错误.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// 不认识的表格文件扩展名.
    #[error("unsupported table format: `{}`", .0.display())]
    UnsupportedFormat(PathBuf),

    /// 表格缺少必需的列. 包含所有缺失的列名.
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    /// 单元格内容无法按列的类型解析.
    ///
    /// `row` 为从 1 开始计数的数据行 (不含表头).
    #[error("invalid value `{value}` in column `{column}` at row {row}")]
    InvalidCell {
        /// 数据行号, 从 1 开始.
        row: usize,
        /// 列名.
        column: String,
        /// 原始内容.
        value: String,
    },

    /// 表格没有任何数据行.
    #[error("table has no data rows")]
    EmptyTable,

    /// 坐标轴只能是 `x`, `y` 或 `z`.
    #[error("invalid axis `{0}`, expected one of `x`, `y`, `z`")]
    InvalidAxis(String),

    /// 切片个数或轴长度为 0.
    #[error("cannot pick {count} slice(s) from an axis of extent {extent}")]
    InvalidSliceCount {
        /// 需要的切片个数.
        count: usize,
        /// 轴长度.
        extent: usize,
    },

    /// nifti 数据不是三维的.
    #[error("expected a 3D volume, found {0} dimension(s)")]
    NotAVolume(usize),

    /// 绘图后端错误.
    #[error("plotting error: {0}")]
    Plot(String),
}

/// 本 crate 统一的返回类型.
pub type Result<T> = std::result::Result<T, Error>;
