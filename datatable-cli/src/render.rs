//! Plain-text rendering of the current page.
//!
//! ```text
//! [-] | Name ▲ |    Amount
//! ----+--------+----------
//! [x] | Acme   | $1,204.00
//! [ ] | Globex |    $99.00
//!
//! pages: [1] 2 3
//! showing 1–2 of 23
//! ```

use datatable_lib::{Alignment, CheckState, Column, DataTable, Row, SortDirection, ViewState};
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = " | ";
const RULE_SEPARATOR: &str = "-+-";

/// Checkbox glyph for a tri-state checkbox.
fn checkbox(state: CheckState) -> &'static str {
    match state {
        CheckState::Checked => "[x]",
        CheckState::Indeterminate => "[-]",
        CheckState::Unchecked => "[ ]",
    }
}

/// Pad `text` to `width` terminal columns.
fn pad(text: &str, width: usize, align: Alignment) -> String {
    let fill = width.saturating_sub(text.width());
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(fill)),
        Alignment::Right => format!("{}{}", " ".repeat(fill), text),
        Alignment::Center => {
            let left = fill / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(fill - left))
        }
    }
}

fn header_label<R: Row>(table: &DataTable<R>, column: &Column<R>) -> String {
    match table.sort() {
        Some(sort) if sort.key == column.key => {
            let arrow = match sort.direction {
                SortDirection::Asc => "▲",
                SortDirection::Desc => "▼",
            };
            format!("{} {}", column.label, arrow)
        }
        _ => column.label.clone(),
    }
}

fn join_cells(cells: &[String], widths: &[usize], columns: &[Column<impl Row>]) -> String {
    cells
        .iter()
        .zip(widths)
        .zip(columns)
        .map(|((cell, &width), column)| pad(cell, width, column.align))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Page buttons, with the current page in brackets.
fn pager<R: Row>(table: &DataTable<R>) -> String {
    let current = table.current_page();
    let buttons: Vec<String> = table
        .page_window()
        .into_iter()
        .map(|page| {
            if page == current {
                format!("[{}]", page)
            } else {
                page.to_string()
            }
        })
        .collect();
    format!("pages: {}", buttons.join(" "))
}

/// Render the header, the current page and the footer.
pub fn render<R: Row>(table: &DataTable<R>) -> String {
    let columns = table.columns();
    let rows = table.page_rows();

    let headers: Vec<String> = columns.iter().map(|c| header_label(table, c)).collect();
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| columns.iter().map(|c| c.display(row)).collect())
        .collect();
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            cells
                .iter()
                .map(|row| row[i].width())
                .chain([header.width()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut lines = Vec::new();
    lines.push(format!(
        "{}{}{}",
        checkbox(table.header_state()),
        SEPARATOR,
        join_cells(&headers, &widths, columns)
    ));
    let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    lines.push(format!("---{}{}", RULE_SEPARATOR, rule.join(RULE_SEPARATOR)));

    match table.view_state() {
        ViewState::Loading => lines.push("loading…".to_string()),
        ViewState::Empty if table.query().trim().is_empty() => {
            lines.push("no rows".to_string())
        }
        ViewState::Empty => lines.push(format!("no rows match {:?}", table.query().trim())),
        ViewState::Rows => {
            for (i, row_cells) in cells.iter().enumerate() {
                let state = if table.is_selected_at(i) {
                    CheckState::Checked
                } else {
                    CheckState::Unchecked
                };
                lines.push(format!(
                    "{}{}{}",
                    checkbox(state),
                    SEPARATOR,
                    join_cells(row_cells, &widths, columns)
                ));
            }
        }
    }

    lines.push(String::new());
    lines.push(pager(table));
    if let Some((first, last, total)) = table.page_range() {
        lines.push(format!("showing {}–{} of {}", first, last, total));
    }
    if !table.selected_keys().is_empty() {
        lines.push(format!("selected: {}", table.selected_keys().join(", ")));
    }

    let mut out = lines
        .iter()
        .map(|line| line.trim_end())
        .collect::<Vec<_>>()
        .join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use datatable_lib::{CellFormat, Record, RowIdentity};

    use super::*;

    fn invoices() -> DataTable<Record> {
        let rows = vec![
            Record::new().set("id", 1i64).set("name", "Acme").set("amount", 1204i64),
            Record::new().set("id", 2i64).set("name", "Globex").set("amount", 99i64),
            Record::new().set("id", 3i64).set("name", "Initech").set("amount", 5i64),
        ];
        DataTable::new(vec![
            Column::new("name", "Name").sortable(),
            Column::new("amount", "Amount")
                .align(Alignment::Right)
                .format(CellFormat::Currency {
                    symbol: "$".into(),
                    decimals: 2,
                }),
        ])
        .with_rows(rows)
        .with_page_size(2)
        .with_identity(RowIdentity::field("id"))
    }

    #[test]
    fn test_pad_uses_display_width() {
        assert_eq!(pad("ab", 4, Alignment::Left), "ab  ");
        assert_eq!(pad("ab", 4, Alignment::Right), "  ab");
        assert_eq!(pad("ab", 5, Alignment::Center), " ab  ");
        assert_eq!(pad("日本", 6, Alignment::Left), "日本  ");
        assert_eq!(pad("too long", 3, Alignment::Left), "too long");
    }

    #[test]
    fn test_render_page() {
        let mut table = invoices();
        table.toggle_sort("name");
        table.toggle_select_at(0);

        let expected = "\
[-] | Name ▲ |    Amount
----+--------+----------
[x] | Acme   | $1,204.00
[ ] | Globex |    $99.00

pages: [1] 2
showing 1–2 of 3
selected: 1
";
        assert_eq!(render(&table), expected);
    }

    #[test]
    fn test_render_empty_state() {
        let mut table = invoices();
        table.set_query("nobody");
        let out = render(&table);
        assert!(out.contains("no rows match \"nobody\""));
        assert!(out.starts_with("[ ] | Name"));
        assert!(out.contains("pages: [1]"));
        assert!(!out.contains("showing"));
    }
}
