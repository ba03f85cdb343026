pub mod autolog;
pub mod backup;
pub mod clock;
pub mod stopwatch;
pub mod ticker;
