use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Logs { show } = cmd {
        let archive = ctx.archive();

        if let Some(name) = show {
            print!("{}", archive.read(name)?);
            return Ok(());
        }

        let names = archive.list()?;
        if names.is_empty() {
            info(format!("No notes in {}", archive.dir().display()));
            return Ok(());
        }

        println!("📜 Notes ({}):\n", archive.dir().display());
        for name in names {
            println!("  {name}");
        }
    }

    Ok(())
}
