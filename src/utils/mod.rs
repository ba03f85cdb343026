pub mod formatting;
pub mod logging;
pub mod runtime;
pub mod table;
pub mod time;
