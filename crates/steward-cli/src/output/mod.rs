use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

use table::{TableOptions, render_table};

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_as_table(
            &serde_json::to_value(value)?,
            table_options(),
        )),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> TableOptions {
    let prefs = ui::prefs();
    TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

fn render_as_table(value: &Value, options: TableOptions) -> String {
    match value {
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            render_records(items, options)
        }
        Value::Array(items) => {
            let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
            render_table(&["value"], &rows, options)
        }
        Value::Object(map) => {
            let mut rows = Vec::new();
            flatten_into(&mut rows, "", map);
            render_table(&["field", "value"], &rows, options)
        }
        scalar => render_table(&["value"], &[vec![cell(scalar)]], options),
    }
}

/// One row per record, one column per field seen in any record.
fn render_records(items: &[Value], options: TableOptions) -> String {
    let mut headers: Vec<&str> = Vec::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(*header).map_or_else(|| String::from("-"), cell))
                .collect()
        })
        .collect::<Vec<Vec<String>>>();

    render_table(&headers, &rows, options)
}

/// Nested objects become dotted field paths (`cdes.pending`).
fn flatten_into(rows: &mut Vec<Vec<String>>, prefix: &str, map: &Map<String, Value>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => flatten_into(rows, &path, inner),
            other => rows.push(vec![path, cell(other)]),
        }
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(Value::is_string) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(", "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::{render, render_as_table};
    use crate::cli::OutputFormat;
    use crate::output::table::TableOptions;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[derive(Serialize)]
    struct Report {
        gate: &'static str,
        passed: bool,
        blocking_ids: Vec<&'static str>,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Report {
            gate: "ownership",
            passed: false,
            blocking_ids: vec!["cde-2"],
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["gate"], "ownership");
        assert_eq!(parsed["blocking_ids"][0], "cde-2");
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Report {
            gate: "ownership",
            passed: true,
            blocking_ids: Vec::new(),
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn nested_object_flattens_to_dotted_fields() {
        let value = json!({ "cycle_id": "Q3", "cdes": { "pending": 2, "total": 6 } });
        let out = render_as_table(&value, PLAIN);
        let lines: Vec<&str> = out.lines().collect();

        assert!(lines[0].starts_with("field"));
        assert!(lines.iter().any(|l| l.starts_with("cdes.pending") && l.ends_with('2')));
        assert!(lines.iter().any(|l| l.starts_with("cycle_id") && l.contains("Q3")));
    }

    #[test]
    fn records_get_sorted_columns_and_joined_id_lists() {
        let value = json!([
            { "gate": "ownership", "passed": false, "blocking_ids": ["cde-2", "cde-3"] },
            { "gate": "triage_complete", "passed": true, "blocking_ids": [] }
        ]);
        let out = render_as_table(&value, PLAIN);
        let lines: Vec<&str> = out.lines().collect();

        let header: Vec<&str> = lines[0].split_whitespace().collect();
        assert_eq!(header, vec!["blocking_ids", "gate", "passed"]);
        assert!(lines[2].contains("cde-2, cde-3"));
    }

    #[test]
    fn empty_array_has_placeholder() {
        assert_eq!(render_as_table(&json!([]), PLAIN), "(no rows)");
    }
}
