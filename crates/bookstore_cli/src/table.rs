//! Plain-text table rendering for catalogue rows.

use bookstore_core::BookRecord;

const HEADERS: [&str; 4] = ["ID", "TITLE", "AUTHOR", "QUANTITY"];
// Numeric columns are right-aligned.
const RIGHT_ALIGNED: [bool; 4] = [true, false, false, true];

/// Renders `books` under the `ID TITLE AUTHOR QUANTITY` headers.
///
/// Every column is padded to its widest cell; the header row is followed by
/// a dashed rule. An empty slice renders the headers only.
pub fn render_books(books: &[BookRecord]) -> String {
    let rows: Vec<[String; 4]> = books
        .iter()
        .map(|book| {
            [
                book.id.to_string(),
                book.title.clone(),
                book.author.clone(),
                book.quantity.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|header| header.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    push_line(&mut out, &widths.map(|width| "-".repeat(width)), &widths);
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    let mut line = String::new();
    for (index, cell) in cells.iter().enumerate() {
        if index > 0 {
            line.push_str("  ");
        }
        let pad = widths[index].saturating_sub(cell.chars().count());
        if RIGHT_ALIGNED[index] {
            line.push_str(&" ".repeat(pad));
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&" ".repeat(pad));
        }
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
