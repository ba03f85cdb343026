use crate::errors::{AppError, AppResult};
use crate::utils::time::{self, round2};
use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Identifier of a shift: a positive integer rendered zero-padded ("0042").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShiftId(u32);

impl ShiftId {
    /// Minimum number of digits in the rendered id.
    pub const WIDTH: usize = 4;

    pub fn new(n: u32) -> Self {
        Self(n)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// The id following `self`, `None` once the id space is used up.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for ShiftId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:0width$}", self.0, width = Self::WIDTH)
    }
}

impl FromStr for ShiftId {
    type Err = AppError;

    /// Accepts both padded ("0007") and bare ("7") forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::NotFound(format!("'{s}' is not a shift id")));
        }
        s.parse::<u32>()
            .map(ShiftId)
            .map_err(|_| AppError::NotFound(format!("'{s}' is not a shift id")))
    }
}

impl Serialize for ShiftId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ShiftId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A duration or money value as persisted: text with 2 decimals.
///
/// Stored values are kept verbatim so that hand-edited or partially corrupt
/// records survive a load/save cycle; `value()` is `None` for anything that
/// is not a finite number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Amount(String);

impl Amount {
    pub fn from_value(v: f64) -> Self {
        Self(format!("{:.2}", round2(v)))
    }

    pub fn value(&self) -> Option<f64> {
        self.0.trim().parse::<f64>().ok().filter(|v| v.is_finite())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        lenient_text(deserializer).map(Amount)
    }
}

/// Deserialize any scalar JSON value as text; `null` becomes "".
/// Older files sometimes carry numbers where text is expected.
pub fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}

/// One logged work shift.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftRecord {
    pub id: ShiftId,
    pub date: String,
    pub model_id: String,
    pub project_id: String,
    pub time_in: String,
    pub time_out: String,
    pub duration_hours: Amount,
    pub hourly_rate: Amount,
    pub gross_pay: Amount,
    pub tasks_completed: Option<u32>,
}

impl ShiftRecord {
    /// Build a record from validated input and the worked duration in hours.
    /// Pay uses the exact duration; only the stored values are rounded.
    pub fn from_valid(
        id: ShiftId,
        valid: &ValidShift,
        duration_hours: f64,
        tasks_completed: Option<u32>,
    ) -> Self {
        Self {
            id,
            date: valid.date.clone(),
            model_id: valid.model_id.clone(),
            project_id: valid.project_id.clone(),
            time_in: time::format_hhmm(valid.time_in),
            time_out: time::format_hhmm(valid.time_out),
            duration_hours: Amount::from_value(duration_hours),
            hourly_rate: Amount::from_value(valid.hourly_rate),
            gross_pay: Amount::from_value(duration_hours * valid.hourly_rate),
            tasks_completed,
        }
    }

    /// Current values as editable fields (used by `edit` to keep
    /// unspecified values).
    pub fn fields(&self) -> ShiftFields {
        ShiftFields {
            date: self.date.clone(),
            model_id: self.model_id.clone(),
            project_id: self.project_id.clone(),
            time_in: self.time_in.clone(),
            time_out: self.time_out.clone(),
            hourly_rate: self.hourly_rate.to_string(),
        }
    }
}

/// Raw user input for a shift, as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShiftFields {
    pub date: String,
    pub model_id: String,
    pub project_id: String,
    pub time_in: String,
    pub time_out: String,
    pub hourly_rate: String,
}

/// Input that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidShift {
    pub date: String,
    pub model_id: String,
    pub project_id: String,
    pub time_in: NaiveTime,
    pub time_out: NaiveTime,
    pub hourly_rate: f64,
}

impl ValidShift {
    /// Worked hours between in and out, wrapping past midnight.
    pub fn duration_hours(&self) -> f64 {
        time::duration_hours(self.time_in, self.time_out)
    }
}

impl ShiftFields {
    /// Check the fields in order: presence, time format, then rate.
    /// Identifiers are upper-cased, every value is trimmed.
    pub fn validate(&self) -> AppResult<ValidShift> {
        let required = [
            ("date", &self.date),
            ("model id", &self.model_id),
            ("project id", &self.project_id),
            ("time in", &self.time_in),
            ("time out", &self.time_out),
            ("hourly rate", &self.hourly_rate),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "all fields must be filled out (missing: {})",
                missing.join(", ")
            )));
        }

        let time_in = time::parse_hhmm(&self.time_in)?;
        let time_out = time::parse_hhmm(&self.time_out)?;

        let rate_str = self.hourly_rate.trim();
        let hourly_rate = rate_str
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "invalid hourly rate '{rate_str}': please enter a numerical value"
                ))
            })?;

        if hourly_rate < 0.0 {
            return Err(AppError::Validation(format!(
                "hourly rate must not be negative (got {rate_str})"
            )));
        }

        Ok(ValidShift {
            date: self.date.trim().to_string(),
            model_id: self.model_id.trim().to_uppercase(),
            project_id: self.project_id.trim().to_uppercase(),
            time_in,
            time_out,
            hourly_rate,
        })
    }
}
