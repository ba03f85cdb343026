use super::shift::ShiftRecord;
use crate::utils::time::round2;
use serde::Serialize;

/// Flat estimate applied to gross pay for reporting.
pub const TAX_RATE: f64 = 0.27;

/// Aggregates over every stored shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub count: usize,
    pub total_hours: f64,
    pub total_gross_pay: f64,
    pub tax_liability: f64,
    pub net_income: f64,
}

impl Totals {
    /// Non-numeric stored values count as zero.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a ShiftRecord>) -> Self {
        let mut totals = Totals::default();

        for r in records {
            totals.count += 1;
            totals.total_hours += r.duration_hours.value().unwrap_or(0.0);
            totals.total_gross_pay += r.gross_pay.value().unwrap_or(0.0);
        }

        totals.total_hours = round2(totals.total_hours);
        totals.total_gross_pay = round2(totals.total_gross_pay);
        totals.tax_liability = round2(totals.total_gross_pay * TAX_RATE);
        totals.net_income = round2(totals.total_gross_pay - totals.tax_liability);
        totals
    }
}
