pub mod shift;
pub mod task;
pub mod totals;

pub use shift::{Amount, ShiftFields, ShiftId, ShiftRecord, ValidShift};
pub use task::{Rank, Task};
pub use totals::{TAX_RATE, Totals};
