//! Tests for the output sinks

use super::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use test_case::test_case;

/// Minimal CSV line parser for read-back assertions: handles quoted fields
/// with escaped quotes, which is everything the sink emits.
fn parse_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);
    fields
}

const COLUMNS: &[&str] = &["anomaly", "anomaly_count", "farm_name", "inspection_id"];

#[test]
fn test_csv_sink_writes_header_up_front() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let sink = CsvSink::create(&path, COLUMNS).unwrap();
    drop(sink);

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        content.trim_end(),
        "anomaly,anomaly_count,farm_name,inspection_id"
    );
}

#[test]
fn test_csv_round_trip_preserves_declared_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let mut sink = CsvSink::create(&path, COLUMNS).unwrap();
    sink.append_record(&json!({
        "anomaly": "Hot Spot",
        "anomaly_count": 3,
        "farm_name": "Alpha, West",
        "inspection_id": 17,
        "extra_field": "ignored",
    }))
    .unwrap();
    let rows = sink.finish().unwrap();
    assert_eq!(rows, 1);

    let content = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);

    let fields = parse_csv_line(lines[1]);
    assert_eq!(fields, vec!["Hot Spot", "3", "Alpha, West", "17"]);
}

#[test]
fn test_csv_missing_and_null_fields_are_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let mut sink = CsvSink::create(&path, COLUMNS).unwrap();
    sink.append_record(&json!({
        "anomaly": "Diode",
        "anomaly_count": serde_json::Value::Null,
        "inspection_id": 9,
    }))
    .unwrap();
    sink.finish().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let fields = parse_csv_line(content.lines().nth(1).unwrap());
    assert_eq!(fields, vec!["Diode", "", "", "9"]);
}

#[test]
fn test_csv_append_records_counts_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let mut sink = CsvSink::create(&path, COLUMNS).unwrap();
    let records = vec![json!({"anomaly": "a"}), json!({"anomaly": "b"})];
    let written = sink.append_records(&records).unwrap();

    assert_eq!(written, 2);
    assert_eq!(sink.rows_written(), 2);
}

#[test_case("plain", "plain"; "plain field untouched")]
#[test_case("a,b", "\"a,b\""; "delimiter quoted")]
#[test_case("say \"hi\"", "\"say \"\"hi\"\"\""; "quotes doubled")]
#[test_case("line\nbreak", "\"line\nbreak\""; "newline quoted")]
fn test_csv_escaping(input: &str, expected: &str) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let mut sink = CsvSink::create(&path, &["value"]).unwrap();
    sink.append_record(&json!({ "value": input })).unwrap();
    sink.finish().unwrap();

    let content = std::fs::read_to_string(&path).unwrap();
    let data = content.strip_prefix("value\n").unwrap();
    assert_eq!(data.trim_end_matches('\n'), expected);
}

#[test]
fn test_file_sink_names_blobs_by_id_and_extension() {
    let dir = tempfile::tempdir().unwrap();

    let mut sink = FileSink::new(dir.path().join("exports"), "zip").unwrap();
    let path = sink.write_blob(4711u64, b"PK\x03\x04archive").unwrap();

    assert_eq!(path.file_name().unwrap(), "4711.zip");
    assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04archive");
    assert_eq!(sink.files_written(), 1);
}

#[test]
fn test_file_sink_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");

    let sink = FileSink::new(&nested, "zip").unwrap();
    assert!(nested.is_dir());
    assert_eq!(sink.files_written(), 0);
}
