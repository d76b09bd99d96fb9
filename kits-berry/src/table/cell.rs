//! 原始单元格与按列的数值解析.

use crate::{Error, Result};

/// 表格读取后未经解释的单元格.
#[derive(Clone, Debug, PartialEq)]
pub enum RawCell {
    /// 数值单元格 (电子表格中的数字, 或 csv 中能解析为浮点数的文本).
    Number(f64),

    /// 文本单元格.
    Text(String),

    /// 空单元格.
    Empty,
}

impl RawCell {
    /// 从 csv 字段构造. 首尾空白已由读取器去除.
    pub fn from_field(s: &str) -> Self {
        if s.is_empty() {
            Self::Empty
        } else if let Ok(v) = s.parse::<f64>() {
            Self::Number(v)
        } else {
            Self::Text(s.to_owned())
        }
    }

    /// 是否是文本单元格.
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Text(_))
    }

    /// 用于错误信息的原始内容.
    pub fn display(&self) -> String {
        match self {
            Self::Number(v) => v.to_string(),
            Self::Text(s) => s.clone(),
            Self::Empty => String::new(),
        }
    }
}

/// 单元格所在位置, 仅用于构造错误.
#[derive(Copy, Clone, Debug)]
pub(crate) struct CellAt<'a> {
    pub row: usize,
    pub column: &'a str,
}

impl<'a> CellAt<'a> {
    #[inline]
    pub const fn new(row: usize, column: &'a str) -> Self {
        Self { row, column }
    }

    fn invalid(&self, cell: &RawCell) -> Error {
        Error::InvalidCell {
            row: self.row,
            column: self.column.to_owned(),
            value: cell.display(),
        }
    }
}

/// 解析数值列的单元格.
pub(crate) fn parse_number(cell: &RawCell, at: CellAt) -> Result<f64> {
    match cell {
        RawCell::Number(v) if v.is_finite() => Ok(*v),
        _ => Err(at.invalid(cell)),
    }
}

/// 解析整数列的单元格. `8` 和 `8.0` 都视为合法.
pub(crate) fn parse_count(cell: &RawCell, at: CellAt) -> Result<u32> {
    match cell {
        RawCell::Number(v) if v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(v) => {
            Ok(*v as u32)
        }
        _ => Err(at.invalid(cell)),
    }
}

/// 解析 ID 列的单元格. 数值 ID 会转成文本.
pub(crate) fn parse_id(cell: &RawCell, at: CellAt) -> Result<String> {
    match cell {
        RawCell::Text(s) => Ok(s.clone()),
        RawCell::Number(v) if v.fract() == 0.0 => Ok(format!("{}", *v as i64)),
        RawCell::Number(v) => Ok(v.to_string()),
        RawCell::Empty => Err(at.invalid(cell)),
    }
}

/// 体积误差比的存储形式.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RatioEncoding {
    /// 已经是小数, 如 `0.125`.
    Fraction,

    /// 百分数文本, 如 `"12.5%"`.
    Percent,
}

impl RatioEncoding {
    /// 根据整列内容判断存储形式: 只要存在文本单元格, 整列即视为百分数.
    pub fn detect<'a, I: IntoIterator<Item = &'a RawCell>>(column: I) -> Self {
        if column.into_iter().any(RawCell::is_text) {
            Self::Percent
        } else {
            Self::Fraction
        }
    }
}

/// 将单元格规范化为小数形式的体积误差比.
///
/// 百分数列会先去掉末尾所有的 `%`, 再除以 100. 小数列保持不变.
///
/// 百分数列中的数值单元格 (如电子表格里以百分比格式存储的 `0.05`) 无法判断是否已经
/// 是小数, 一律视为 [`Error::InvalidCell`].
pub(crate) fn normalize_ratio(
    cell: &RawCell,
    encoding: RatioEncoding,
    at: CellAt,
) -> Result<f64> {
    match encoding {
        RatioEncoding::Fraction => parse_number(cell, at),
        RatioEncoding::Percent => {
            let value = match cell {
                RawCell::Text(s) => s
                    .trim_end_matches('%')
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| at.invalid(cell))?,
                RawCell::Number(_) | RawCell::Empty => return Err(at.invalid(cell)),
            };
            if value.is_finite() {
                Ok(value / 100.0)
            } else {
                Err(at.invalid(cell))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AT: CellAt = CellAt {
        row: 1,
        column: "ratio",
    };

    fn text(s: &str) -> RawCell {
        RawCell::Text(s.to_owned())
    }

    #[test]
    fn test_from_field() {
        assert_eq!(RawCell::from_field(""), RawCell::Empty);
        assert_eq!(RawCell::from_field("0.5"), RawCell::Number(0.5));
        assert_eq!(RawCell::from_field("7"), RawCell::Number(7.0));
        assert_eq!(RawCell::from_field("12%"), text("12%"));
    }

    #[test]
    fn test_percent_string() {
        let v = normalize_ratio(&text("12.5%"), RatioEncoding::Percent, AT).unwrap();
        assert!((v - 0.125).abs() < 1e-12);

        // rstrip 语义: 去掉末尾所有的 '%'.
        let v = normalize_ratio(&text("50%%"), RatioEncoding::Percent, AT).unwrap();
        assert!((v - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_number_in_percent_column() {
        match normalize_ratio(&RawCell::Number(0.05), RatioEncoding::Percent, AT) {
            Err(Error::InvalidCell { row, column, value }) => {
                assert_eq!(row, 1);
                assert_eq!(column, "ratio");
                assert_eq!(value, "0.05");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_fraction_is_untouched() {
        for v in [0.0, 0.05, 0.125, 1.5] {
            let cell = RawCell::Number(v);
            assert_eq!(normalize_ratio(&cell, RatioEncoding::Fraction, AT).unwrap(), v);
        }
    }

    #[test]
    fn test_detect_encoding() {
        let frac = [RawCell::Number(0.1), RawCell::Number(0.2)];
        assert_eq!(RatioEncoding::detect(&frac), RatioEncoding::Fraction);

        let pct = [RawCell::Number(10.0), text("20%")];
        assert_eq!(RatioEncoding::detect(&pct), RatioEncoding::Percent);
    }

    #[test]
    fn test_bad_cells() {
        assert!(matches!(
            normalize_ratio(&text("abc%"), RatioEncoding::Percent, AT),
            Err(Error::InvalidCell { row: 1, .. })
        ));
        assert!(parse_number(&RawCell::Empty, AT).is_err());
        assert!(parse_number(&text("n/a"), AT).is_err());
        assert!(parse_count(&RawCell::Number(7.5), AT).is_err());
        assert!(parse_count(&RawCell::Number(-1.0), AT).is_err());
        assert_eq!(parse_count(&RawCell::Number(8.0), AT).unwrap(), 8);
    }

    #[test]
    fn test_numeric_id() {
        assert_eq!(parse_id(&RawCell::Number(12.0), AT).unwrap(), "12");
        assert_eq!(parse_id(&text("case_1_L"), AT).unwrap(), "case_1_L");
        assert!(parse_id(&RawCell::Empty, AT).is_err());
    }
}
