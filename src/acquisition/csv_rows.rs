//! Numeric CSV row parsing
//!
//! Flight logs are plain comma-separated numbers, optionally preceded by a
//! header row. The header is detected, not declared: a first line with any
//! non-numeric field is a header, later non-numeric lines are errors.

use super::LoadError;

/// One data row with the 1-based line it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct CsvRow {
    pub line: usize,
    pub fields: Vec<f64>,
}

/// Result of splitting a flight log into numeric rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedRows {
    /// Column names, when the first line was a header
    pub header: Option<Vec<String>>,
    /// Data rows in file order, at most `max_rows`
    pub rows: Vec<CsvRow>,
    /// Non-empty lines past `max_rows` that were not parsed
    pub dropped: usize,
}

/// Split a CSV line respecting quoted fields (handles commas inside quotes).
/// Returns owned strings because quoted fields need unquoting.
fn csv_split(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Escaped quote ("")
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}

fn parse_field(field: &str, line: usize, column: usize) -> Result<f64, LoadError> {
    if field.is_empty() {
        return Err(LoadError::malformed(
            line,
            format!("missing value in column {}", column + 1),
        ));
    }
    let value: f64 = field.parse().map_err(|_| {
        LoadError::malformed(
            line,
            format!("non-numeric value '{field}' in column {}", column + 1),
        )
    })?;
    if !value.is_finite() {
        return Err(LoadError::malformed(
            line,
            format!("non-finite value '{field}' in column {}", column + 1),
        ));
    }
    Ok(value)
}

/// Parse up to `max_rows` numeric rows from CSV text.
///
/// Blank lines are skipped. Every data row must have the same number of
/// columns as the first one.
pub fn parse_rows(input: &str, max_rows: usize) -> Result<ParsedRows, LoadError> {
    let mut parsed = ParsedRows::default();
    let mut expected_columns: Option<usize> = None;
    let mut seen_first = false;
    let input = input.strip_prefix('\u{feff}').unwrap_or(input);

    for (idx, raw_line) in input.lines().enumerate() {
        let line_num = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if parsed.rows.len() >= max_rows {
            parsed.dropped += 1;
            continue;
        }

        let fields = csv_split(line);

        if !seen_first {
            seen_first = true;
            let is_header = fields
                .iter()
                .any(|f| !f.is_empty() && f.parse::<f64>().is_err());
            if is_header {
                tracing::debug!(line = line_num, columns = ?fields, "Skipping header row");
                parsed.header = Some(fields);
                continue;
            }
        }

        match expected_columns {
            None => expected_columns = Some(fields.len()),
            Some(n) if n != fields.len() => {
                return Err(LoadError::malformed(
                    line_num,
                    format!("expected {n} columns, found {}", fields.len()),
                ));
            }
            Some(_) => {}
        }

        let values = fields
            .iter()
            .enumerate()
            .map(|(col, f)| parse_field(f, line_num, col))
            .collect::<Result<Vec<f64>, _>>()?;

        parsed.rows.push(CsvRow {
            line: line_num,
            fields: values,
        });
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_split_trims_and_unquotes() {
        assert_eq!(csv_split(" 1.5 , 2"), vec!["1.5", "2"]);
        assert_eq!(csv_split("\"Raw\",\"G,Force\""), vec!["Raw", "G,Force"]);
        assert_eq!(csv_split("a,\"b\"\"c\""), vec!["a", "b\"c"]);
    }

    #[test]
    fn test_parse_rows_without_header() {
        let parsed = parse_rows("349,0.0\n350,0.015\n", 1024).unwrap();
        assert!(parsed.header.is_none());
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[1].line, 2);
        assert_eq!(parsed.rows[1].fields, vec![350.0, 0.015]);
    }

    #[test]
    fn test_parse_rows_detects_header() {
        let parsed = parse_rows("Time,Raw,G_Force\r\n0.00,349,0.0\r\n0.01,350,0.01\r\n", 1024)
            .unwrap();
        assert_eq!(
            parsed.header,
            Some(vec!["Time".to_string(), "Raw".to_string(), "G_Force".to_string()])
        );
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].line, 2);
    }

    #[test]
    fn test_byte_order_mark_is_not_a_header() {
        let parsed = parse_rows("\u{feff}349,0.5\n349,0.0\n349,0.0\n", 1024).unwrap();
        assert!(parsed.header.is_none());
        assert_eq!(parsed.rows.len(), 3);
        assert_eq!(parsed.rows[0].fields, vec![349.0, 0.5]);
    }

    #[test]
    fn test_parse_rows_skips_blank_lines() {
        let parsed = parse_rows("\n1,2\n\n   \n3,4\n", 1024).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[1].line, 5);
    }

    #[test]
    fn test_non_numeric_after_header_is_malformed() {
        let err = parse_rows("raw,accel\n1,2\n3,oops\n", 1024).unwrap_err();
        match err {
            LoadError::MalformedInput { line, reason } => {
                assert_eq!(line, 3);
                assert!(reason.contains("oops"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let err = parse_rows("1,,3\n", 1024).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { line: 1, .. }));
    }

    #[test]
    fn test_non_finite_is_malformed() {
        let err = parse_rows("1,2\n3,NaN\n", 1024).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { line: 2, .. }));
        let err = parse_rows("1,2\n3,inf\n", 1024).unwrap_err();
        assert!(matches!(err, LoadError::MalformedInput { line: 2, .. }));
    }

    #[test]
    fn test_inconsistent_columns_is_malformed() {
        let err = parse_rows("1,2\n3,4,5\n", 1024).unwrap_err();
        match err {
            LoadError::MalformedInput { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("expected 2 columns"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_rows_past_limit_are_dropped_unparsed() {
        // The garbage on line 4 is past the limit and never inspected
        let parsed = parse_rows("1,2\n3,4\n5,6\ngarbage\n", 3).unwrap();
        assert_eq!(parsed.rows.len(), 3);
        assert_eq!(parsed.dropped, 1);
    }
}
