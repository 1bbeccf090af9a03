//! Small text helpers for help output and diagnostics.

/// Column width used when wrapping descriptions.
pub const WRAP_WIDTH: usize = 80;

/// Greedy word wrap. Words longer than `width` get a line of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_width = 0;
        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count();
            if !line.is_empty() && line_width + 1 + word_width > width {
                lines.push(std::mem::take(&mut line));
                line_width = 0;
            }
            if !line.is_empty() {
                line.push(' ');
                line_width += 1;
            }
            line.push_str(word);
            line_width += word_width;
        }
        lines.push(line);
    }
    lines
}

/// Prefix every line of `text` with `width` spaces.
pub fn indent_lines(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .map(|l| format!("{pad}{l}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render rows of multi-line cells as aligned columns.
///
/// A column that is empty in every row is dropped together with its
/// separator. The last column is never padded.
pub fn columns(rows: &[Vec<Vec<String>>]) -> Vec<String> {
    let ncols = rows.iter().map(Vec::len).max().unwrap_or(0);
    let widths: Vec<usize> = (0..ncols)
        .map(|c| {
            rows.iter()
                .filter_map(|r| r.get(c))
                .flatten()
                .map(|cell| cell.chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();
    let visible: Vec<usize> = (0..ncols).filter(|&c| widths[c] > 0).collect();
    let last = visible.last().copied();

    let mut out = Vec::new();
    for row in rows {
        let height = row.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for i in 0..height {
            let cells: Vec<String> = visible
                .iter()
                .map(|&c| {
                    let cell = row.get(c).and_then(|lines| lines.get(i)).map_or("", String::as_str);
                    if Some(c) == last {
                        cell.to_string()
                    } else {
                        format!("{cell:width$}", width = widths[c])
                    }
                })
                .collect();
            out.push(cells.join(" ").trim_end().to_string());
        }
    }
    out
}
