use crate::extraction::Table;
use crate::lookup::FINAL_BALANCE_HEADER;
use crate::parsing::normalize::normalize_text;

/// Reconstruct table grids from pdftotext -layout output.
///
/// pdftotext -layout preserves column alignment using spaces. A table is a
/// run of non-blank lines that starts at a line with at least two columns;
/// the first line of the run is the header. A line carrying a "Saldo Final"
/// column always starts a new run, so title lines printed directly above
/// it never become the header. Every following line is split the same way
/// and each piece is placed under the header column it sits beneath. Runs
/// with fewer than two lines are not tables.
pub fn detect_tables(lines: &[&str]) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut block: Vec<Vec<Segment<'_>>> = Vec::new();

    for line in lines {
        let segments = split_by_whitespace_gaps(line);

        // End of table: blank line
        if segments.is_empty() {
            flush_block(&mut block, &mut tables);
            continue;
        }

        if !block.is_empty() && is_final_balance_header(&segments) {
            flush_block(&mut block, &mut tables);
        }

        if block.is_empty() && segments.len() < 2 {
            continue;
        }
        block.push(segments);
    }
    flush_block(&mut block, &mut tables);

    tables
}

/// A piece of a layout line, with the character columns it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

fn is_final_balance_header(segments: &[Segment<'_>]) -> bool {
    segments
        .iter()
        .any(|s| normalize_text(s.text) == FINAL_BALANCE_HEADER)
}

fn flush_block(block: &mut Vec<Vec<Segment<'_>>>, tables: &mut Vec<Table>) {
    if block.len() >= 2 {
        tables.push(build_table(block));
    }
    block.clear();
}

fn build_table(block: &[Vec<Segment<'_>>]) -> Table {
    let header = &block[0];
    let mut rows = Vec::with_capacity(block.len());
    rows.push(header.iter().map(|s| s.text.to_string()).collect());

    for line in &block[1..] {
        let mut cells = vec![String::new(); header.len()];
        for segment in line {
            let cell = &mut cells[column_for(header, segment)];
            if !cell.is_empty() {
                cell.push(' ');
            }
            cell.push_str(segment.text);
        }
        rows.push(cells);
    }

    Table::new(rows)
}

/// Header column with the largest horizontal overlap, or the nearest centre
/// when the segment overlaps none. Ties go to the leftmost column.
fn column_for(header: &[Segment<'_>], segment: &Segment<'_>) -> usize {
    let overlap = |h: &Segment<'_>| {
        h.end
            .min(segment.end)
            .saturating_sub(h.start.max(segment.start))
    };

    let mut best = 0;
    let mut best_overlap = 0;
    for (i, h) in header.iter().enumerate() {
        let o = overlap(h);
        if o > best_overlap {
            best = i;
            best_overlap = o;
        }
    }
    if best_overlap > 0 {
        return best;
    }

    // Doubled centres keep the arithmetic in integers
    let centre = segment.start + segment.end;
    header
        .iter()
        .enumerate()
        .min_by_key(|(_, h)| (h.start + h.end).abs_diff(centre))
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Split a line by gaps of 2+ whitespace characters.
fn split_by_whitespace_gaps(line: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    // (byte offset, char column) where the current segment began
    let mut start: Option<(usize, usize)> = None;
    // Just past the last non-whitespace char: (byte offset, char column)
    let mut last_end = (0, 0);
    let mut space_count = 0;

    for (col, (i, c)) in line.char_indices().enumerate() {
        if c.is_whitespace() {
            space_count += 1;
            if space_count == 2 {
                if let Some((byte, column)) = start.take() {
                    segments.push(Segment {
                        start: column,
                        end: last_end.1,
                        text: &line[byte..last_end.0],
                    });
                }
            }
        } else {
            if start.is_none() {
                start = Some((i, col));
            }
            last_end = (i + c.len_utf8(), col + 1);
            space_count = 0;
        }
    }

    if let Some((byte, column)) = start {
        segments.push(Segment {
            start: column,
            end: last_end.1,
            text: &line[byte..last_end.0],
        });
    }

    segments
}
