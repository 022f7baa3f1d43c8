/// The literal slide separator
pub const SLIDE_SEPARATOR: &str = "---";

/// Split a document body into raw slide chunks.
///
/// A separator is a line holding only `---` (trailing whitespace allowed) whose
/// neighbouring lines are blank. The start and end of the body count as blank.
/// Chunks are returned untrimmed and may be empty.
pub fn split_slides(body: &str) -> Vec<&str> {
    let lines = line_spans(body);
    let mut chunks = Vec::new();
    let mut chunk_start = 0;

    for (i, &(start, end)) in lines.iter().enumerate() {
        if is_separator(body, &lines, i) {
            chunks.push(&body[chunk_start..start]);
            chunk_start = end;
        }
    }

    chunks.push(&body[chunk_start..]);
    chunks
}

fn is_separator(body: &str, lines: &[(usize, usize)], i: usize) -> bool {
    let is_blank = |j: usize| {
        lines
            .get(j)
            .is_none_or(|&(start, end)| body[start..end].trim().is_empty())
    };
    let (start, end) = lines[i];
    let line = body[start..end].trim_end_matches(['\n', '\r', ' ', '\t']);

    line == SLIDE_SEPARATOR && (i == 0 || is_blank(i - 1)) && is_blank(i + 1)
}

/// Byte ranges of each line, including the trailing newline
fn line_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = 0;
    for line in text.split_inclusive('\n') {
        spans.push((start, start + line.len()));
        start += line.len();
    }
    spans
}
