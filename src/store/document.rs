//! On-disk representation of the shift store.
//!
//! Canonical shape (written by this crate):
//!
//! ```json
//! { "data": { "0001": { "Date": "...", "Model ID": "...", ... } } }
//! ```
//!
//! Older releases wrote a top-level array instead, with rows that are either
//! positional arrays or objects keyed by column header. Those are converted
//! on load by [`decode`] and reported as [`Shape::Legacy`].

use crate::errors::{AppError, AppResult};
use crate::models::shift::lenient_text;
use crate::models::{Amount, ShiftId, ShiftRecord};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One record as stored under its id key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShiftEntry {
    #[serde(rename = "Date", default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(rename = "Model ID", default, deserialize_with = "lenient_text")]
    pub model_id: String,
    #[serde(rename = "Project ID", default, deserialize_with = "lenient_text")]
    pub project_id: String,
    #[serde(rename = "In (hh:mm)", default, deserialize_with = "lenient_text")]
    pub time_in: String,
    #[serde(rename = "Out (hh:mm)", default, deserialize_with = "lenient_text")]
    pub time_out: String,
    #[serde(rename = "Duration (hrs)", default)]
    pub duration_hours: Amount,
    #[serde(rename = "Hourly rate", default)]
    pub hourly_rate: Amount,
    #[serde(rename = "Gross pay", default)]
    pub gross_pay: Amount,
    #[serde(
        rename = "Tasks completed",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_count"
    )]
    pub tasks_completed: Option<u32>,
}

impl ShiftEntry {
    pub fn into_record(self, id: ShiftId) -> ShiftRecord {
        ShiftRecord {
            id,
            date: self.date,
            model_id: self.model_id,
            project_id: self.project_id,
            time_in: self.time_in,
            time_out: self.time_out,
            duration_hours: self.duration_hours,
            hourly_rate: self.hourly_rate,
            gross_pay: self.gross_pay,
            tasks_completed: self.tasks_completed,
        }
    }
}

impl From<&ShiftRecord> for ShiftEntry {
    fn from(r: &ShiftRecord) -> Self {
        Self {
            date: r.date.clone(),
            model_id: r.model_id.clone(),
            project_id: r.project_id.clone(),
            time_in: r.time_in.clone(),
            time_out: r.time_out.clone(),
            duration_hours: r.duration_hours.clone(),
            hourly_rate: r.hourly_rate.clone(),
            gross_pay: r.gross_pay.clone(),
            tasks_completed: r.tasks_completed,
        }
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
    Ok(count_from_value(&Value::deserialize(deserializer)?))
}

/// "N/A", empty strings and other non-integers mean "not recorded".
fn count_from_value(v: &Value) -> Option<u32> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

#[derive(Serialize)]
struct DocumentOut {
    data: BTreeMap<ShiftId, ShiftEntry>,
}

#[derive(Deserialize)]
struct DocumentIn {
    #[serde(default)]
    data: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Canonical,
    Legacy,
}

#[derive(Debug)]
pub struct Decoded {
    pub records: BTreeMap<ShiftId, ShiftRecord>,
    pub shape: Shape,
    /// Rows that had no usable id and received a fresh one.
    pub renumbered: usize,
}

impl Decoded {
    /// Whether the file should be rewritten in canonical form.
    pub fn needs_rewrite(&self) -> bool {
        self.shape == Shape::Legacy || self.renumbered > 0
    }
}

/// Serialize the records as the canonical document, 4-space indented.
pub fn encode(records: &BTreeMap<ShiftId, ShiftRecord>) -> AppResult<Vec<u8>> {
    let doc = DocumentOut {
        data: records
            .iter()
            .map(|(id, r)| (*id, ShiftEntry::from(r)))
            .collect(),
    };

    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    doc.serialize(&mut ser)?;
    out.push(b'\n');
    Ok(out)
}

/// Parse a document of either shape.
pub fn decode(bytes: &[u8]) -> AppResult<Decoded> {
    let root: Value =
        serde_json::from_slice(bytes).map_err(|e| AppError::Load(format!("invalid JSON: {e}")))?;

    match root {
        Value::Object(_) => decode_canonical(root),
        Value::Array(rows) => decode_legacy(rows),
        other => Err(AppError::Load(format!(
            "unexpected top-level value: {}",
            kind_of(&other)
        ))),
    }
}

fn decode_canonical(root: Value) -> AppResult<Decoded> {
    let doc: DocumentIn = serde_json::from_value(root)
        .map_err(|e| AppError::Load(format!("invalid document: {e}")))?;

    let mut rows = Vec::with_capacity(doc.data.len());
    for (key, value) in doc.data {
        let entry: ShiftEntry = serde_json::from_value(value)
            .map_err(|e| AppError::Load(format!("invalid record '{key}': {e}")))?;
        rows.push((key.parse::<ShiftId>().ok(), entry));
    }

    let (records, renumbered) = assign_ids(rows)?;
    Ok(Decoded {
        records,
        shape: Shape::Canonical,
        renumbered,
    })
}

/// Column order of the positional rows.
const LEGACY_HEADERS: [&str; 10] = [
    "ID",
    "Date",
    "Model ID",
    "Project ID",
    "In (hh:mm)",
    "Out (hh:mm)",
    "Duration (hrs)",
    "Hourly rate",
    "Gross pay",
    "Tasks completed",
];

fn decode_legacy(rows: Vec<Value>) -> AppResult<Decoded> {
    let mut converted = Vec::with_capacity(rows.len());

    for (idx, row) in rows.into_iter().enumerate() {
        let object = match row {
            Value::Object(map) => map,
            Value::Array(cells) => LEGACY_HEADERS
                .iter()
                .zip(cells)
                .map(|(h, v)| (h.to_string(), v))
                .collect(),
            other => {
                warn!(row = idx, kind = kind_of(&other), "skipping invalid legacy row");
                continue;
            }
        };

        let id = object
            .get("ID")
            .and_then(|v| match v {
                Value::String(s) => s.parse::<ShiftId>().ok(),
                Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()).map(ShiftId::new),
                _ => None,
            })
            .filter(|id| id.value() > 0);

        // a task list takes precedence over a stale counter
        let tasks = object.get("Tasks").and_then(|t| match t {
            Value::Array(items) => u32::try_from(items.len()).ok(),
            Value::String(s) => serde_json::from_str::<Vec<Value>>(s)
                .ok()
                .and_then(|items| u32::try_from(items.len()).ok()),
            _ => None,
        });

        let mut entry: ShiftEntry = match serde_json::from_value(Value::Object(object)) {
            Ok(e) => e,
            Err(e) => {
                warn!(row = idx, error = %e, "skipping unreadable legacy row");
                continue;
            }
        };
        if tasks.is_some() {
            entry.tasks_completed = tasks;
        }

        converted.push((id, entry));
    }

    let (records, renumbered) = assign_ids(converted)?;
    debug!(count = records.len(), renumbered, "converted legacy rows");

    Ok(Decoded {
        records,
        shape: Shape::Legacy,
        renumbered,
    })
}

/// Keep valid unique ids; give the rest fresh ids after the highest one.
fn assign_ids(
    rows: Vec<(Option<ShiftId>, ShiftEntry)>,
) -> AppResult<(BTreeMap<ShiftId, ShiftRecord>, usize)> {
    let mut records = BTreeMap::new();
    let mut orphans = Vec::new();

    for (id, entry) in rows {
        match id {
            Some(id) if id.value() > 0 && !records.contains_key(&id) => {
                records.insert(id, entry.into_record(id));
            }
            _ => orphans.push(entry),
        }
    }

    let renumbered = orphans.len();
    let mut next = match records.keys().next_back() {
        Some(last) => last.next(),
        None => Some(ShiftId::new(1)),
    };

    for entry in orphans {
        let id = next.ok_or_else(|| {
            AppError::Load(format!("no shift id left for {renumbered} records without id"))
        })?;
        records.insert(id, entry.into_record(id));
        next = id.next();
    }

    Ok((records, renumbered))
}

fn kind_of(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
