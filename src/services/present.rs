use std::collections::HashMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Opaque bar record as handed over by a source adapter: raw field labels,
/// uninterpreted values.
pub type Record = Map<String, Value>;

/// Default relabeling from the source's raw field names into the generic
/// OHLC vocabulary. Labels that already match (open/high/low/close/datetime)
/// need no entry.
pub fn ohlc_mapping() -> HashMap<&'static str, &'static str> {
    HashMap::from([("vol", "volume"), ("amount", "turnover")])
}

/// Rename record fields according to `mapping`, leaving unmapped labels
/// untouched. Pure relabeling; values are never inspected.
pub fn relabel(records: Vec<Record>, mapping: &HashMap<&str, &str>) -> Vec<Record> {
    records
        .into_iter()
        .map(|record| {
            record
                .into_iter()
                .map(|(label, value)| {
                    let label = match mapping.get(label.as_str()) {
                        Some(renamed) => (*renamed).to_string(),
                        None => label,
                    };
                    (label, value)
                })
                .collect()
        })
        .collect()
}

/// Columnar view over a batch of records.
#[derive(Clone, Debug, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Pivot row-shaped records into a columnar table. Column set comes from the
/// first record; fields missing from later records become nulls.
pub fn columnar(records: &[Record]) -> Table {
    let columns: Vec<String> = match records.first() {
        Some(first) => first.keys().cloned().collect(),
        None => Vec::new(),
    };

    let rows = records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|column| record.get(column).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Table { columns, rows }
}
