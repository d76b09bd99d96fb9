//! 按网络深度分组与左右肾对比.

use super::{mean, mean_confidence_interval, ttest_ind};
use crate::table::{CaseTable, Metric, Side};
use ndarray::Array1;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 网络深度分组. 分箱左闭右开: `[7, 8)`, `[8, 10)`, `[10, 12)`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DepthGroup {
    /// 7 层.
    Seven,

    /// 8 到 9 层.
    EightToTen,

    /// 10 到 11 层 (名称沿用原始数据表的 "12 layers").
    Twelve,
}

impl DepthGroup {
    /// 全部分组, 按分箱顺序.
    pub const ALL: [DepthGroup; 3] = [Self::Seven, Self::EightToTen, Self::Twelve];

    /// 分箱边界.
    pub const EDGES: [u32; 4] = [7, 8, 10, 12];

    /// 由深度确定分组. 不落入任何分箱时返回 `None`.
    pub fn from_depth(depth: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .zip(Self::EDGES.windows(2))
            .find(|(_, w)| (w[0]..w[1]).contains(&depth))
            .map(|(g, _)| g)
    }

    /// 展示用名称.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Seven => "7 layers",
            Self::EightToTen => "8-10 layers",
            Self::Twelve => "12 layers",
        }
    }
}

impl fmt::Display for DepthGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 单个深度分组的体积误差比统计.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupStat {
    /// 分组.
    pub group: DepthGroup,

    /// 组内样本数.
    pub count: usize,

    /// 组内均值. 空组为 `NaN`.
    pub mean: f64,

    /// 均值的 95% 置信区间. 少于两个样本时为 `None`.
    pub ci: Option<(f64, f64)>,
}

/// 各深度分组的体积误差比均值, 按分箱顺序.
#[derive(Clone, Debug, PartialEq)]
pub struct GroupMeans {
    /// 每个分组一项, 包括空组.
    pub groups: Vec<GroupStat>,

    /// 不属于任何分组而被丢弃的行数.
    pub uncategorized: usize,
}

impl GroupMeans {
    /// 置信区间的置信水平.
    pub const LEVEL: f64 = 0.95;

    /// 计算各分组的均值.
    pub fn compute(table: &CaseTable) -> Self {
        let mut buckets: [Vec<f64>; 3] = Default::default();
        let mut uncategorized = 0;
        for r in table {
            match DepthGroup::from_depth(r.depth) {
                Some(g) => buckets[g as usize].push(r.ratio),
                None => uncategorized += 1,
            }
        }

        let groups = DepthGroup::ALL
            .into_iter()
            .zip(buckets)
            .map(|(group, values)| {
                let values = Array1::from(values);
                GroupStat {
                    group,
                    count: values.len(),
                    mean: mean(values.view()),
                    ci: mean_confidence_interval(values.view(), Self::LEVEL),
                }
            })
            .collect();
        Self {
            groups,
            uncategorized,
        }
    }

    /// 某个分组的均值.
    pub fn mean_of(&self, group: DepthGroup) -> f64 {
        self.groups
            .iter()
            .find(|s| s.group == group)
            .map_or(f64::NAN, |s| s.mean)
    }
}

/// 左右肾对比表的一行.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SideRow {
    /// 指标.
    pub metric: Metric,

    /// 左肾均值.
    pub left_mean: f64,

    /// 右肾均值.
    pub right_mean: f64,

    /// 合并方差 t 检验的双侧 p 值.
    pub p: f64,
}

/// 左右肾在三个指标上的对比.
#[derive(Clone, Debug, PartialEq)]
pub struct SideComparison {
    /// 按 [`Metric::ALL`] 的顺序.
    pub rows: Vec<SideRow>,
}

impl SideComparison {
    /// 计算左右肾对比.
    pub fn compute(table: &CaseTable) -> Self {
        let rows = Metric::ALL
            .into_iter()
            .map(|metric| {
                let left = table.metric_of_side(metric, Side::Left);
                let right = table.metric_of_side(metric, Side::Right);
                SideRow {
                    metric,
                    left_mean: mean(left.view()),
                    right_mean: mean(right.view()),
                    p: ttest_ind(left.view(), right.view()).p,
                }
            })
            .collect();
        Self { rows }
    }

    /// 某个指标的对比结果.
    pub fn row(&self, metric: Metric) -> Option<&SideRow> {
        self.rows.iter().find(|r| r.metric == metric)
    }
}
