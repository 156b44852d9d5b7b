use std::fmt::Write;

use super::{Analysis, AnalysisReport, Outcome};

/// 見出しの下に罫線を引いた左寄せの表
fn table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{:<w$}", c, w = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = String::new();
    out.push_str(&line(headers));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    out.push_str(&line(&rule));
    out.push('\n');
    for row in rows {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

fn headers(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

/// セクションの本文、または本文がない理由を出力
fn section<T>(out: &mut String, analysis: Analysis, outcome: &Outcome<T>, body: impl Fn(&T) -> String) {
    let status = match outcome {
        Outcome::Skipped => return,
        Outcome::Computed(value) => body(value),
        Outcome::NoData { reason } => format!("no data: {}\n", reason),
        Outcome::Failed { reason } => format!("failed: {}\n", reason),
    };
    let _ = writeln!(out, "\n{}", analysis.title());
    out.push_str(&status);
}

pub(super) fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();
    let o = &report.overview;
    let _ = writeln!(out, "Rows: {}", o.row_count);
    let _ = writeln!(out, "Numeric Columns: {}", o.numeric_column_count);
    let _ = writeln!(out, "Total Columns: {}", o.column_count);

    if !report.preview.rows.is_empty() {
        let _ = writeln!(out, "\nPreview (first {} rows)", report.preview.rows.len());
        let rows: Vec<Vec<String>> = report
            .preview
            .rows
            .iter()
            .map(|r| r.iter().map(|v| v.clone().unwrap_or_default()).collect())
            .collect();
        out.push_str(&table(&report.preview.columns, &rows));
    }

    section(&mut out, Analysis::Stats, &report.descriptive, |stats| {
        let rows: Vec<Vec<String>> = stats
            .iter()
            .map(|(c, s)| {
                vec![
                    c.to_string(),
                    s.min.to_string(),
                    s.max.to_string(),
                    format!("{:.2}", s.mean),
                    format!("{:.2}", s.median),
                    format!("{:.2}", s.std),
                ]
            })
            .collect();
        table(
            &headers(&["Column", "Min", "Max", "Mean", "Median", "Std"]),
            &rows,
        )
    });

    section(&mut out, Analysis::Correlation, &report.correlation, |matrix| {
        let mut head = vec![String::new()];
        head.extend(matrix.columns().iter().cloned());
        let rows: Vec<Vec<String>> = matrix
            .columns()
            .iter()
            .map(|r| {
                let mut row = vec![r.clone()];
                for c in matrix.columns() {
                    match (matrix.get(r, c), matrix.strength(r, c)) {
                        (Some(v), Some(s)) => row.push(format!("{:.2} ({})", v, s)),
                        _ => row.push(String::new()),
                    }
                }
                row
            })
            .collect();
        table(&head, &rows)
    });

    section(&mut out, Analysis::Outliers, &report.outliers, |counts| {
        let rows: Vec<Vec<String>> = counts
            .iter()
            .map(|(c, n)| vec![c.to_string(), n.to_string()])
            .collect();
        table(&headers(&["Column", "Outliers"]), &rows)
    });

    section(&mut out, Analysis::Missing, &report.missing, |counts| {
        let rows: Vec<Vec<String>> = counts
            .iter()
            .map(|(c, n)| vec![c.to_string(), n.to_string()])
            .collect();
        table(&headers(&["Column", "Missing Count"]), &rows)
    });

    out
}
