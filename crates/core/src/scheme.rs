use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;

use crate::color::ColorPair;
use crate::error::{Error, Result};
use crate::render::normalize_key;

/// Read a color table from CSV rows of `name,fill,text`.
///
/// Loading is best-effort: rows with fewer than three fields, an empty
/// text color, or a leading `#` are comments and get skipped, as does
/// anything the CSV parser rejects. Names are normalized the same way
/// drawing normalizes them, so table entries line up with drawn keys.
pub fn parse_color_table(input: impl Read) -> IndexMap<String, ColorPair> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);
    let mut table = IndexMap::new();
    for record in reader.records() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                tracing::debug!(%err, "skipping unparseable color table row");
                continue;
            }
        };
        if record.len() < 3 || record[2].is_empty() || record[0].starts_with('#') {
            tracing::debug!(row = ?record, "skipping color table row");
            continue;
        }
        let Some(key) = normalize_key(&record[0]) else {
            tracing::debug!(row = ?record, "skipping color table row with unusable name");
            continue;
        };
        table.insert(
            key,
            ColorPair {
                fill: record[1].to_string(),
                text: record[2].to_string(),
            },
        );
    }
    table
}

/// Load a color table from a file. A missing file degrades to an empty
/// table with a warning; any other failure is fatal.
pub fn read_color_table(path: &Path) -> Result<IndexMap<String, ColorPair>> {
    match std::fs::File::open(path) {
        Ok(file) => Ok(parse_color_table(std::io::BufReader::new(file))),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "color table not found, colors will be generated");
            Ok(IndexMap::new())
        }
        Err(source) => Err(Error::ReadInput {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Load a user style sheet. Missing files degrade to `None` with a
/// warning, which re-enables generated color rules.
pub fn read_style_sheet(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(css) => Ok(Some(css)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "style sheet not found, colors will be generated");
            Ok(None)
        }
        Err(source) => Err(Error::ReadInput {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Color table as CSS rules, two per category. `fill` styles text as
/// well as shapes in SVG, so the text color needs its own rule.
pub fn to_css(table: &IndexMap<String, ColorPair>) -> Vec<String> {
    let mut rules = Vec::with_capacity(table.len() * 2);
    for (key, pair) in table {
        rules.push(format!(".{} {{ fill: {}; }}", key, pair.fill));
        rules.push(format!(".{} text {{ fill: {}; }}", key, pair.text));
    }
    rules
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_and_skips_comments() {
        let csv = "\
# category,background,text
animals,#454532,white
vegetables,green,black
short row
empty text,blue,
";
        let table = parse_color_table(csv.as_bytes());
        assert_eq!(table.len(), 2);
        assert_eq!(table["animals"].fill, "#454532");
        assert_eq!(table["vegetables"].text, "black");
    }

    #[test]
    fn names_are_normalized_on_load() {
        let table = parse_color_table("Ice Cream,mintcream,black\n".as_bytes());
        assert_eq!(table["Ice_Cream"].fill, "mintcream");
    }

    #[test]
    fn missing_color_table_degrades_to_empty() {
        let table = read_color_table(Path::new("/no/such/color/table.csv")).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn missing_style_sheet_degrades_to_none() {
        let sheet = read_style_sheet(Path::new("/no/such/style.css")).unwrap();
        assert!(sheet.is_none());
    }

    #[test]
    fn css_rules_come_in_pairs() {
        let table = parse_color_table("animals,#454532,white\n".as_bytes());
        let rules = to_css(&table);
        assert_eq!(
            rules,
            [
                ".animals { fill: #454532; }",
                ".animals text { fill: white; }"
            ]
        );
    }
}
