use crate::domain::{Error, ImageRecord, ImageTableHeaders, Result};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Repository,
    Tag,
    ImageId,
    Created,
    Size,
}

#[derive(Debug, Default)]
struct Row {
    repository: String,
    tag: String,
    image_id: String,
    created: String,
    size: String,
}

impl Row {
    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Repository => &mut self.repository,
            Field::Tag => &mut self.tag,
            Field::ImageId => &mut self.image_id,
            Field::Created => &mut self.created,
            Field::Size => &mut self.size,
        }
    }
}

/// Parse the runtime's fixed-width `images` table.
///
/// Column boundaries come from where each header literal starts in the header row; values may
/// contain single spaces ("3 weeks ago") so this is not a whitespace split. A row that drifts
/// off the header grid is re-read by its padding runs (two or more spaces).
///
/// Rows with an empty repository or image id are dropped. Non-empty output without a
/// recognizable header row is an error.
pub fn parse_image_table(output: &str, headers: &ImageTableHeaders) -> Result<Vec<ImageRecord>> {
    if output.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut lines = output.lines();
    let columns = loop {
        let Some(line) = lines.next() else {
            return Err(Error::Parse(format!(
                "image table has no header row containing {:?} and {:?}",
                headers.repository, headers.image_id
            )));
        };
        if let Some(columns) = header_columns(line, headers) {
            break columns;
        }
    };

    let mut images = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }

        let row = read_row(line, &columns);
        if row.repository.is_empty() || row.image_id.is_empty() {
            debug!("dropping image row without repository/id: {:?}", line);
            continue;
        }

        images.push(ImageRecord {
            id: format!("{}-{}", row.image_id, images.len()),
            repository: row.repository,
            tag: row.tag,
            image_id: row.image_id,
            size: row.size,
            created: row.created,
        });
    }

    Ok(images)
}

/// Start offsets (in chars) of every column, ordered left to right
fn header_columns(line: &str, headers: &ImageTableHeaders) -> Option<Vec<(Field, usize)>> {
    let literals = [
        (Field::Repository, headers.repository.as_str()),
        (Field::Tag, headers.tag.as_str()),
        (Field::ImageId, headers.image_id.as_str()),
        (Field::Created, headers.created.as_str()),
        (Field::Size, headers.size.as_str()),
    ];

    let mut columns = Vec::with_capacity(literals.len());
    for (field, literal) in literals {
        columns.push((field, find_word(line, literal)?));
    }
    columns.sort_by_key(|(_, start)| *start);
    Some(columns)
}

/// Char offset of `literal` in `line` where it stands as a whole word
fn find_word(line: &str, literal: &str) -> Option<usize> {
    if literal.is_empty() {
        return None;
    }

    line.match_indices(literal).find_map(|(byte_idx, _)| {
        let before = line[..byte_idx].chars().next_back();
        let after = line[byte_idx + literal.len()..].chars().next();
        let bounded = before.is_none_or(char::is_whitespace) && after.is_none_or(char::is_whitespace);
        bounded.then(|| line[..byte_idx].chars().count())
    })
}

/// Rows off the header grid are split on padding; a single-spaced row off the grid stays one cell
fn read_row(line: &str, columns: &[(Field, usize)]) -> Row {
    let chars: Vec<char> = line.trim_end().chars().collect();
    let mut row = Row::default();

    if is_aligned(&chars, columns) {
        for (i, (field, start)) in columns.iter().enumerate() {
            let end = columns.get(i + 1).map_or(chars.len(), |(_, next)| *next);
            *row.slot(*field) = slice(&chars, *start, end);
        }
        return row;
    }

    let cells = padded_cells(&chars);
    if cells.len() == columns.len() {
        for ((field, _), (_, text)) in columns.iter().zip(cells) {
            *row.slot(*field) = text;
        }
        return row;
    }

    for (cell_start, text) in cells {
        let Some((field, _)) = columns
            .iter()
            .min_by_key(|(_, start)| start.abs_diff(cell_start))
        else {
            continue;
        };
        let slot = row.slot(*field);
        if !slot.is_empty() {
            slot.push(' ');
        }
        slot.push_str(&text);
    }
    row
}

/// A row is on the header grid when no value straddles a column start
fn is_aligned(chars: &[char], columns: &[(Field, usize)]) -> bool {
    columns
        .iter()
        .filter(|(_, start)| *start > 0)
        .all(|(_, start)| *start > chars.len() || chars[*start - 1].is_whitespace())
}

fn slice(chars: &[char], start: usize, end: usize) -> String {
    let start = start.min(chars.len());
    let end = end.clamp(start, chars.len());
    chars[start..end].iter().collect::<String>().trim().to_string()
}

/// Cells separated by two or more blanks (or a tab), with their start offsets
fn padded_cells(chars: &[char]) -> Vec<(usize, String)> {
    let mut cells = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }

        let start = i;
        while i < chars.len() {
            let c = chars[i];
            if c == '\t' {
                break;
            }
            if c.is_whitespace() && chars.get(i + 1).is_none_or(|n| n.is_whitespace()) {
                break;
            }
            i += 1;
        }

        let text: String = chars[start..i].iter().collect();
        cells.push((start, text.trim().to_string()));
    }

    cells
}
