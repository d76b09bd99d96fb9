//! 把 csv / 电子表格文件读成未经解释的单元格网格.

use super::cell::RawCell;
use crate::{Error, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// 未经解释的表格: 表头 + 按行存储的单元格.
#[derive(Clone, Debug)]
pub struct RawTable {
    /// 表头, 已去除首尾空白.
    pub headers: Vec<String>,

    /// 数据行. 每行长度与表头一致 (不足补 `Empty`).
    pub rows: Vec<Vec<RawCell>>,
}

impl RawTable {
    /// 根据扩展名选择读取器.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Self::open_csv(path),
            Some("xlsx" | "xlsm" | "xls" | "ods") => Self::open_spreadsheet(path),
            _ => Err(Error::UnsupportedFormat(path.to_owned())),
        }
    }

    /// 读取 csv 文件. 第一行为表头.
    pub fn open_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path.as_ref())?;
        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(pad_row(
                record.iter().map(RawCell::from_field).collect(),
                headers.len(),
            ));
        }
        Ok(Self { headers, rows })
    }

    /// 读取电子表格的第一张工作表. 第一行为表头.
    pub fn open_spreadsheet<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut workbook = open_workbook_auto(path.as_ref())?;
        let range = match workbook.worksheet_range_at(0) {
            Some(range) => range?,
            None => return Err(Error::EmptyTable),
        };

        let mut it = range.rows();
        let headers: Vec<String> = match it.next() {
            Some(head) => head.iter().map(|c| c.to_string().trim().to_owned()).collect(),
            None => return Err(Error::EmptyTable),
        };
        let rows = it
            .map(|r| pad_row(r.iter().map(from_sheet_cell).collect(), headers.len()))
            .collect();
        Ok(Self { headers, rows })
    }

    /// 列名在表头中的位置.
    #[inline]
    pub fn position(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// 第 `index` 列的所有单元格.
    pub fn column(&self, index: usize) -> impl Iterator<Item = &RawCell> {
        self.rows.iter().map(move |r| &r[index])
    }
}

fn pad_row(mut row: Vec<RawCell>, width: usize) -> Vec<RawCell> {
    if row.len() < width {
        row.resize(width, RawCell::Empty);
    }
    row
}

fn from_sheet_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Int(v) => RawCell::Number(*v as f64),
        Data::Float(v) => RawCell::Number(*v),
        Data::Empty => RawCell::Empty,
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                RawCell::Empty
            } else {
                RawCell::Text(s.to_owned())
            }
        }
        other => RawCell::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{CaseTable, TableSchema};
    use rust_xlsxwriter::{Format, Workbook};
    use std::io::Write;

    #[test]
    fn test_csv_grid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.csv");
        let mut f = std::fs::File::create(&path).unwrap();
        writeln!(f, "ID, ratio ,depth").unwrap();
        writeln!(f, "a_L,12%,7").unwrap();
        writeln!(f, "b_R,,8").unwrap();
        writeln!(f, "c_R,0.1").unwrap();
        drop(f);

        let t = RawTable::open(&path).unwrap();
        assert_eq!(t.headers, ["ID", "ratio", "depth"]);
        assert_eq!(t.rows.len(), 3);
        assert_eq!(t.rows[0][1], RawCell::Text("12%".to_owned()));
        assert_eq!(t.rows[1][1], RawCell::Empty);
        assert_eq!(t.rows[2][2], RawCell::Empty);
        assert_eq!(t.position("depth"), Some(2));
        assert_eq!(t.column(2).count(), 3);
    }

    #[test]
    fn test_unsupported_extension() {
        assert!(matches!(
            RawTable::open("metrics.parquet"),
            Err(Error::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(RawTable::open("/nonexistent/metrics.csv"), Err(Error::Csv(_))));
    }

    #[test]
    fn test_sheet_cell() {
        assert_eq!(from_sheet_cell(&Data::Int(8)), RawCell::Number(8.0));
        assert_eq!(from_sheet_cell(&Data::Float(0.05)), RawCell::Number(0.05));
        assert_eq!(from_sheet_cell(&Data::Empty), RawCell::Empty);
        assert_eq!(from_sheet_cell(&Data::String("   ".to_owned())), RawCell::Empty);
        assert_eq!(
            from_sheet_cell(&Data::String(" 5.0% ".to_owned())),
            RawCell::Text("5.0%".to_owned())
        );
        assert_eq!(
            from_sheet_cell(&Data::Bool(true)),
            RawCell::Text("true".to_owned())
        );
    }

    const HEADERS: [&str; 6] = [" ID ", "ratio", "Chamfer", "Hausdorff", "depth", "scale"];

    fn write_sheet(path: &Path, ratios: &[(&str, f64)], percent_ratio: bool) {
        let mut wb = Workbook::new();
        let percent = Format::new().set_num_format("0.0%");
        let ws = wb.add_worksheet();
        for (c, h) in HEADERS.iter().enumerate() {
            ws.write_string(0, c as u16, *h).unwrap();
        }
        for (i, (text, value)) in ratios.iter().enumerate() {
            let r = i as u32 + 1;
            ws.write_string(r, 0, format!("case_{i:05}_L")).unwrap();
            if percent_ratio {
                ws.write_number_with_format(r, 1, *value, &percent).unwrap();
            } else {
                ws.write_string(r, 1, *text).unwrap();
            }
            ws.write_number(r, 2, 1.25).unwrap();
            ws.write_number(r, 3, 4.5).unwrap();
            ws.write_number(r, 4, 7 + i as u32).unwrap();
            ws.write_number(r, 5, 1.4).unwrap();
        }
        wb.save(path).unwrap();
    }

    #[test]
    fn test_xlsx_percent_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volume.xlsx");
        write_sheet(&path, &[("5.0%", 0.0), (" 12% ", 0.0)], false);

        let raw = RawTable::open(&path).unwrap();
        assert_eq!(raw.headers[0], "ID");
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[1][1], RawCell::Text("12%".to_owned()));
        assert_eq!(raw.rows[0][4], RawCell::Number(7.0));

        let table = CaseTable::from_raw(&raw, &TableSchema::default()).unwrap();
        let r = table.records();
        assert_eq!(r[0].id, "case_00000_L");
        assert!((r[0].ratio - 0.05).abs() < 1e-12);
        assert!((r[1].ratio - 0.12).abs() < 1e-12);
        assert_eq!(r[1].depth, 8);
        assert!((r[1].scale - 1.4).abs() < 1e-12);
    }

    #[test]
    fn test_xlsx_percent_format() {
        // 以百分比格式显示的数字按原值读出, 不再除以 100.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volume.xlsx");
        write_sheet(&path, &[("", 0.05), ("", 0.125)], true);

        let table = CaseTable::open(&path, &TableSchema::default()).unwrap();
        assert_eq!(table.len(), 2);
        assert!((table.records()[0].ratio - 0.05).abs() < 1e-12);
        assert!((table.records()[1].ratio - 0.125).abs() < 1e-12);
    }
}
