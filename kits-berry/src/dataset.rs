//! 数据集路径.

use std::path::{Path, PathBuf};

/// KiTS 数据集在 `{用户主目录}/dataset` 下的目录名.
pub const KITS_DIR: &str = "kits23";

/// 获取 `{用户主目录}/dataset` 目录.
pub fn home_dataset_dir() -> Option<PathBuf> {
    let mut ans = dirs::home_dir()?;
    ans.push("dataset");
    Some(ans)
}

/// 获取 `{用户主目录}/dataset` 目录下给定继续项组成的全路径.
pub fn home_dataset_dir_with<P: AsRef<Path>, I: IntoIterator<Item = P>>(it: I) -> Option<PathBuf> {
    let mut ans = home_dataset_dir()?;
    ans.extend(it);
    Some(ans)
}

/// 第 `case` 个病例的分割标签: `{用户主目录}/dataset/kits23/case_{case:05}/segmentation.nii.gz`.
pub fn home_segmentation_path(case: u32) -> Option<PathBuf> {
    home_dataset_dir_with([
        KITS_DIR.to_owned(),
        format!("case_{case:05}"),
        "segmentation.nii.gz".to_owned(),
    ])
}
