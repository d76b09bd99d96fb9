//! 报告的控制台文本.

use super::MetricsSummary;
use crate::stats::{Correlation, Summary};
use std::io::{self, Write};

const SEP: &str = "========================================";

#[inline]
fn f6(v: f64) -> String {
    format!("{v:.6}")
}

/// `0.25` -> `"25%"`.
fn percent_key(q: f64) -> String {
    format!("{}%", (q * 100.0).round())
}

/// 描述统计的行, 顺序为 count, mean, std, min, 各分位数, max.
fn summary_rows(s: &Summary) -> Vec<(String, f64)> {
    let mut rows = vec![
        ("count".to_owned(), s.count as f64),
        ("mean".to_owned(), s.mean),
        ("std".to_owned(), s.std),
        ("min".to_owned(), s.min),
    ];
    rows.extend(s.percentiles.iter().map(|&(q, v)| (percent_key(q), v)));
    rows.push(("max".to_owned(), s.max));
    rows
}

/// 按行号、表头对齐输出一张表. 第一列左对齐, 其余右对齐.
fn write_table<W: Write>(
    w: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
) -> io::Result<()> {
    let widths: Vec<usize> = (0..headers.len())
        .map(|c| {
            rows.iter()
                .map(|r| r[c].chars().count())
                .chain([headers[c].chars().count()])
                .max()
                .unwrap_or(0)
        })
        .collect();
    let index_width = rows.len().saturating_sub(1).to_string().len();

    write!(w, "{:index_width$}", "")?;
    for (h, width) in headers.iter().zip(&widths) {
        write!(w, "  {h:>width$}")?;
    }
    writeln!(w)?;
    for (i, row) in rows.iter().enumerate() {
        write!(w, "{i:<index_width$}")?;
        for (cell, width) in row.iter().zip(&widths) {
            write!(w, "  {cell:>width$}")?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// 带名称的一列: 索引左对齐, 数值右对齐.
fn write_series<W: Write>(
    w: &mut W,
    index_name: Option<&str>,
    rows: &[(String, f64)],
    name: &str,
) -> io::Result<()> {
    let key_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let values: Vec<String> = rows.iter().map(|(_, v)| f6(*v)).collect();
    let value_width = values.iter().map(String::len).max().unwrap_or(0) + 4;

    if let Some(index_name) = index_name {
        writeln!(w, "{index_name}")?;
    }
    for ((k, _), v) in rows.iter().zip(&values) {
        writeln!(w, "{k:<key_width$}{v:>value_width$}")?;
    }
    writeln!(w, "Name: {name}, dtype: float64")
}

/// 多列描述统计并排输出.
fn write_describe_frame<W: Write>(w: &mut W, columns: &[(&str, &Summary)]) -> io::Result<()> {
    let rows: Vec<Vec<(String, f64)>> = columns.iter().map(|(_, s)| summary_rows(s)).collect();
    let Some(first) = rows.first() else {
        return Ok(());
    };
    let key_width = first.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    let widths: Vec<usize> = columns
        .iter()
        .zip(&rows)
        .map(|((name, _), col)| {
            col.iter()
                .map(|(_, v)| f6(*v).len())
                .chain([name.len()])
                .max()
                .unwrap_or(0)
                + 2
        })
        .collect();

    write!(w, "{:key_width$}", "")?;
    for ((name, _), width) in columns.iter().zip(&widths) {
        write!(w, "{name:>width$}")?;
    }
    writeln!(w)?;
    for (r, (key, _)) in first.iter().enumerate() {
        write!(w, "{key:<key_width$}")?;
        for (col, width) in rows.iter().zip(&widths) {
            write!(w, "{:>width$}", f6(col[r].1))?;
        }
        writeln!(w)?;
    }
    Ok(())
}

fn write_correlation<W: Write>(w: &mut W, what: &str, c: &Correlation) -> io::Result<()> {
    writeln!(w, "Correlation ({what} vs. Volume Error): r={:.2}, p={:.2}", c.r, c.p)
}

/// 将统计结果按报告的分节写进 `w` 中. 不包含最后的完成提示.
pub fn describe_into<W: Write>(s: &MetricsSummary, w: &mut W) -> io::Result<()> {
    writeln!(w, "{SEP}")?;
    writeln!(w, "=== Volume Error Statistics ===")?;
    write_series(w, None, &summary_rows(&s.ratio), "ratio")?;

    writeln!(w, "\n=== Global Geometric Accuracy Statistics ===")?;
    write_describe_frame(w, &[("Chamfer", &s.chamfer), ("Hausdorff", &s.hausdorff)])?;

    writeln!(w, "\n=== 4.3.2 Global Geometric Similarity Metrics ===")?;
    writeln!(w, "Chamfer Mean: {:.4} ± {:.4}", s.chamfer.mean, s.chamfer.std)?;
    writeln!(w, "Hausdorff Mean: {:.4} ± {:.4}", s.hausdorff.mean, s.hausdorff.std)?;

    writeln!(w)?;
    write_correlation(w, "Chamfer", &s.chamfer_vs_ratio)?;
    write_correlation(w, "Hausdorff", &s.hausdorff_vs_ratio)?;

    writeln!(w, "\n=== 4.3.3 Parameter Sensitivity Analysis ===")?;
    writeln!(w, "\nMean Volume Error by Depth Group:")?;
    let depth_rows: Vec<(String, f64)> = s
        .depth
        .groups
        .iter()
        .map(|g| (g.group.label().to_owned(), g.mean))
        .collect();
    write_series(w, Some("depth_group"), &depth_rows, "ratio")?;
    writeln!(w)?;
    write_correlation(w, "Scale", &s.scale_vs_ratio)?;

    writeln!(w, "\n=== 4.3.4 Error Distribution between Left and Right Kidneys ===")?;
    writeln!(w, "\nComparison of Metrics between Left and Right Kidneys:")?;
    let rows: Vec<Vec<String>> = s
        .sides
        .rows
        .iter()
        .map(|r| {
            vec![
                r.metric.label().to_owned(),
                f6(r.left_mean),
                f6(r.right_mean),
                f6(r.p),
            ]
        })
        .collect();
    write_table(w, &["Metric", "Left Mean", "Right Mean", "p-value"], &rows)
}
