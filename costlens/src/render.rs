//! Plain-text table rendering of a derived view

use crate::data::Value;
use crate::processor::DerivedView;
use std::fmt::Write;

/// Render `view` as an aligned text table. For row views, `columns` picks
/// and orders the fields shown; an empty slice shows every field.
pub fn render_table(view: &DerivedView, columns: &[&str]) -> String {
    let (header, cells) = match view {
        DerivedView::Rows(rows) => {
            let header: Vec<String> = if columns.is_empty() {
                let mut names: Vec<String> = Vec::new();
                for record in rows {
                    for name in record.field_names() {
                        if !names.iter().any(|n| n == name) {
                            names.push(name.to_string());
                        }
                    }
                }
                names
            } else {
                columns.iter().map(|c| c.to_string()).collect()
            };
            let cells = rows
                .iter()
                .map(|r| header.iter().map(|h| cell(r.get(h))).collect())
                .collect::<Vec<Vec<String>>>();
            (header, cells)
        }
        DerivedView::Groups(groups) => {
            let mut header = vec!["key".to_string(), "count".to_string()];
            if let Some(first) = groups.first() {
                header.extend(first.sums.iter().map(|s| format!("sum({})", s.field)));
            }
            let cells = groups
                .iter()
                .map(|g| {
                    let mut row = vec![cell(Some(&g.key)), g.count.to_string()];
                    row.extend(g.sums.iter().map(|s| cell(Some(&s.total))));
                    row
                })
                .collect::<Vec<Vec<String>>>();
            (header, cells)
        }
    };

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (w, c) in widths.iter_mut().zip(row) {
            *w = (*w).max(c.chars().count());
        }
    }

    let mut out = String::new();
    write_line(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    write_line(&mut out, &rule, &widths);
    for row in &cells {
        write_line(&mut out, row, &widths);
    }
    out
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "-".to_string(),
        Some(Value::Float64(v)) => format!("{:.2}", v),
        Some(v) => v.to_string_value(),
    }
}

fn write_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect::<Vec<_>>()
        .join("  ");
    let _ = writeln!(out, "{}", line.trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;
    use crate::query::{FieldSum, GroupSummary};

    #[test]
    fn test_render_rows() {
        let view = DerivedView::Rows(vec![
            Record::new().with("name", "ETL_WH").with("cost", 1284.6),
            Record::new().with("name", "BI_WH"),
        ]);
        let text = render_table(&view, &["name", "cost"]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "name    cost");
        assert_eq!(lines[1], "------  -------");
        assert_eq!(lines[2], "ETL_WH  1284.60");
        assert_eq!(lines[3], "BI_WH   -");
    }

    #[test]
    fn test_render_groups() {
        let view = DerivedView::Groups(vec![GroupSummary {
            key: Value::from("A"),
            count: 2,
            sums: vec![FieldSum { field: "cost".into(), total: Value::Int64(17) }],
        }]);
        let text = render_table(&view, &[]);
        assert_eq!(text.lines().next(), Some("key  count  sum(cost)"));
        assert_eq!(text.lines().nth(2), Some("A    2      17"));
    }
}
