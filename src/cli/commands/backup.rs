use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::core::backup::BackupLogic;
use crate::errors::AppResult;
use std::path::Path;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Backup { file, compress } = cmd {
        BackupLogic::backup(&ctx.data_file(), &ctx.archive(), Path::new(file), *compress)?;
    }

    Ok(())
}
