#![warn(missing_docs)] // <= 合适时移除它.

//! 核心库. 评估 KiTS 数据集肾脏三维重建 / 分割结果的统计与可视化工具.
//!
//! 该 crate 由两条互不相关的流水线组成:
//!
//! 1. **指标报告**: 读取逐病例的几何指标表格 (体积误差比、Chamfer 距离、
//!   Hausdorff 距离、网络深度、缩放系数), 清洗后按左右肾分组,
//!   输出描述统计、相关性与显著性检验, 并绘制统计图.
//! 2. **切片查看**: 读取一个 nifti 格式的 3D 分割标签, 沿某一坐标轴等距选取切片,
//!   拼接成一张横向排列的图片.
//!
//! # 注意
//!
//! 1. 两条流水线都是单线程、一次性的: 读取 → 计算 → 绘图 → 写文件.
//! 2. 所有输入错误都以 [`Error`] 的形式返回, 由调用者决定如何终止程序.
//!
//! # 开发计划
//!
//! ### 表格读取与列校验 ✅
//!
//! 支持 csv 和 xlsx/xls/ods. 加载时一次性校验所需列是否存在.
//!
//! 实现位于 `kits-berry/src/table`.
//!
//! ### 描述统计、Pearson 相关、独立样本 t 检验 ✅
//!
//! 分位数采用线性插值, 标准差采用无偏估计 (ddof = 1).
//! t 分布由 `statrs` 提供.
//!
//! 实现位于 `kits-berry/src/stats`.
//!
//! ### 统计图 ✅
//!
//! 直方图 + 核密度、散点、回归、柱状图、箱线图. 基于 `plotters`.
//!
//! 实现位于 `kits-berry/src/plot`.
//!
//! ### nifti 分割标签切片 ✅
//!
//! 实现位于 `kits-berry/src/data`, 流水线位于 `kits-berry/src/viewer.rs`.

/// 二维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx2d = (usize, usize);

/// 三维索引, 同时也可一定程度上用作非负整数向量.
pub type Idx3d = (usize, usize, usize);

mod error;

pub use error::{Error, Result};

pub mod consts;

/// 3D 分割 nii 文件基础数据结构.
pub mod data;

pub use data::{ImgWriteVis, LabelSlice, SegVolume, VolumeAxis};

pub mod table;

pub use table::{CaseRecord, CaseTable, Metric, Side, TableSchema};

pub mod stats;

pub mod plot;

pub use plot::RenderOptions;

pub mod report;

pub mod viewer;

pub mod dataset;

pub mod prelude;
