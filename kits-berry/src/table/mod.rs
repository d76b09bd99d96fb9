//! 逐病例几何指标表格.
//!
//! 每行对应一个肾脏样本. 加载时一次性完成列校验与体积误差比的规范化,
//! 之后的统计与绘图只面对强类型的 [`CaseRecord`].

mod cell;
mod reader;

pub use cell::{RatioEncoding, RawCell};
pub use reader::RawTable;

use crate::consts::LEFT_MARKER;
use crate::{Error, Result};
use cell::CellAt;
use ndarray::Array1;
use std::fmt;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 左右肾.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// 左肾.
    Left,

    /// 右肾.
    Right,
}

impl Side {
    /// 两侧, 按左、右顺序.
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    /// 从病例 ID 推断: 含有 `_L` 子串为左肾, 否则为右肾.
    #[inline]
    pub fn from_id(id: &str) -> Self {
        if id.contains(LEFT_MARKER) {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// 展示用名称.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 左右肾对比中用到的三个指标.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Metric {
    /// 体积误差比.
    Ratio,

    /// Chamfer 距离.
    Chamfer,

    /// Hausdorff 距离.
    Hausdorff,
}

impl Metric {
    /// 全部指标, 按报告中的顺序.
    pub const ALL: [Metric; 3] = [Metric::Ratio, Metric::Chamfer, Metric::Hausdorff];

    /// 报告中使用的列名.
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ratio => "ratio",
            Self::Chamfer => "Chamfer",
            Self::Hausdorff => "Hausdorff",
        }
    }

    /// 从记录中取出该指标.
    #[inline]
    pub fn of(&self, r: &CaseRecord) -> f64 {
        match self {
            Self::Ratio => r.ratio,
            Self::Chamfer => r.chamfer,
            Self::Hausdorff => r.hausdorff,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 单个病例的几何指标.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CaseRecord {
    /// 病例 ID, 编码了左右侧信息.
    pub id: String,

    /// 体积误差比, 小数形式.
    pub ratio: f64,

    /// Chamfer 距离.
    pub chamfer: f64,

    /// Hausdorff 距离.
    pub hausdorff: f64,

    /// 网络深度 (层数).
    pub depth: u32,

    /// 缩放系数.
    pub scale: f64,
}

impl CaseRecord {
    /// 该病例属于哪一侧.
    #[inline]
    pub fn side(&self) -> Side {
        Side::from_id(&self.id)
    }
}

/// 表格的列名约定. 默认值与原始数据表一致.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TableSchema {
    /// 病例 ID 列.
    pub id: String,
    /// 体积误差比列.
    pub ratio: String,
    /// Chamfer 距离列.
    pub chamfer: String,
    /// Hausdorff 距离列.
    pub hausdorff: String,
    /// 网络深度列.
    pub depth: String,
    /// 缩放系数列.
    pub scale: String,
}

impl Default for TableSchema {
    fn default() -> Self {
        Self {
            id: "ID".to_owned(),
            ratio: "ratio".to_owned(),
            chamfer: "Chamfer".to_owned(),
            hausdorff: "Hausdorff".to_owned(),
            depth: "depth".to_owned(),
            scale: "scale".to_owned(),
        }
    }
}

/// 各必需列在表头中的位置.
#[derive(Copy, Clone, Debug)]
struct Columns {
    id: usize,
    ratio: usize,
    chamfer: usize,
    hausdorff: usize,
    depth: usize,
    scale: usize,
}

impl TableSchema {
    /// 校验表头, 找出每个必需列的位置. 缺失的列会一并报告.
    fn resolve(&self, raw: &RawTable) -> Result<Columns> {
        let names = [
            &self.id,
            &self.ratio,
            &self.chamfer,
            &self.hausdorff,
            &self.depth,
            &self.scale,
        ];
        let found = names.map(|n| raw.position(n));
        let missing: Vec<String> = names
            .iter()
            .zip(found.iter())
            .filter(|(_, pos)| pos.is_none())
            .map(|(n, _)| n.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingColumns(missing));
        }

        let [id, ratio, chamfer, hausdorff, depth, scale] = found.map(Option::unwrap_or_default);
        Ok(Columns {
            id,
            ratio,
            chamfer,
            hausdorff,
            depth,
            scale,
        })
    }
}

/// 有序的病例集合. 不保证 ID 唯一.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CaseTable {
    records: Vec<CaseRecord>,
}

impl CaseTable {
    /// 直接由记录构造.
    #[inline]
    pub fn new(records: Vec<CaseRecord>) -> Self {
        Self { records }
    }

    /// 打开 csv 或电子表格文件, 按 `schema` 校验并解析.
    pub fn open<P: AsRef<Path>>(path: P, schema: &TableSchema) -> Result<Self> {
        let raw = RawTable::open(path.as_ref())?;
        log::debug!(
            "read {} row(s) x {} column(s) from `{}`",
            raw.rows.len(),
            raw.headers.len(),
            path.as_ref().display()
        );
        Self::from_raw(&raw, schema)
    }

    /// 从未经解释的表格解析.
    pub fn from_raw(raw: &RawTable, schema: &TableSchema) -> Result<Self> {
        let cols = schema.resolve(raw)?;
        if raw.rows.is_empty() {
            return Err(Error::EmptyTable);
        }

        let encoding = RatioEncoding::detect(raw.column(cols.ratio));
        if encoding == RatioEncoding::Percent {
            log::debug!("column `{}` holds percentages, converting to fractions", schema.ratio);
        }

        let mut records = Vec::with_capacity(raw.rows.len());
        for (i, row) in raw.rows.iter().enumerate() {
            let row_no = i + 1;
            records.push(CaseRecord {
                id: cell::parse_id(&row[cols.id], CellAt::new(row_no, &schema.id))?,
                ratio: cell::normalize_ratio(
                    &row[cols.ratio],
                    encoding,
                    CellAt::new(row_no, &schema.ratio),
                )?,
                chamfer: cell::parse_number(
                    &row[cols.chamfer],
                    CellAt::new(row_no, &schema.chamfer),
                )?,
                hausdorff: cell::parse_number(
                    &row[cols.hausdorff],
                    CellAt::new(row_no, &schema.hausdorff),
                )?,
                depth: cell::parse_count(&row[cols.depth], CellAt::new(row_no, &schema.depth))?,
                scale: cell::parse_number(&row[cols.scale], CellAt::new(row_no, &schema.scale))?,
            });
        }
        Ok(Self { records })
    }

    /// 病例个数.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// 是否为空.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 所有记录.
    #[inline]
    pub fn records(&self) -> &[CaseRecord] {
        &self.records
    }

    /// 迭代所有记录.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, CaseRecord> {
        self.records.iter()
    }

    /// 按 `f` 取出一列.
    pub fn column_by<F: Fn(&CaseRecord) -> f64>(&self, f: F) -> Array1<f64> {
        self.records.iter().map(f).collect()
    }

    /// 取出某个指标列.
    #[inline]
    pub fn metric(&self, m: Metric) -> Array1<f64> {
        self.column_by(|r| m.of(r))
    }

    /// 网络深度列 (转为浮点数).
    #[inline]
    pub fn depth(&self) -> Array1<f64> {
        self.column_by(|r| r.depth as f64)
    }

    /// 缩放系数列.
    #[inline]
    pub fn scale(&self) -> Array1<f64> {
        self.column_by(|r| r.scale)
    }

    /// 取出某一侧的某个指标列.
    pub fn metric_of_side(&self, m: Metric, side: Side) -> Array1<f64> {
        self.records
            .iter()
            .filter(|r| r.side() == side)
            .map(|r| m.of(r))
            .collect()
    }
}

impl<'a> IntoIterator for &'a CaseTable {
    type Item = &'a CaseRecord;
    type IntoIter = std::slice::Iter<'a, CaseRecord>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
