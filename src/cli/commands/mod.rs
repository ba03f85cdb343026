pub mod add;
pub mod auto;
pub mod backup;
pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod logs;
pub mod timer;
pub mod totals;
