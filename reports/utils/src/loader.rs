//! 对 `kits-berry::dataset` 的更一层封装. 提供输入文件的默认位置.

use kits_berry::dataset;
use std::env;
use std::path::PathBuf;

/// 指标表格路径的环境变量.
pub const TABLE_ENV: &str = "KITS_METRICS_TABLE";

/// 分割标签路径的环境变量.
pub const SEGMENTATION_ENV: &str = "KITS_SEGMENTATION";

/// 没有任何配置时使用的指标表格.
pub const DEFAULT_TABLE: &str = "volume.xlsx";

/// 读取非空的环境变量.
fn non_empty_var(key: &str) -> Option<PathBuf> {
    env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// 获取指标表格路径.
///
/// 1. 若环境变量 `$KITS_METRICS_TABLE` 非空, 则返回其值;
/// 2. 否则, 返回当前目录下的 `volume.xlsx`.
pub fn table_from_env_or_default() -> PathBuf {
    non_empty_var(TABLE_ENV).unwrap_or_else(|| PathBuf::from(DEFAULT_TABLE))
}

/// 获取分割标签路径.
///
/// 1. 若环境变量 `$KITS_SEGMENTATION` 非空, 则返回其值;
/// 2. 否则, 返回 `$HOME/dataset/kits23/case_00000/segmentation.nii.gz`;
/// 3. 无法确定用户主目录时返回 `None`.
pub fn segmentation_from_env_or_home() -> Option<PathBuf> {
    non_empty_var(SEGMENTATION_ENV).or_else(|| dataset::home_segmentation_path(0))
}
