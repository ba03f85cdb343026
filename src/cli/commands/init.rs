use crate::context::AppContext;
use crate::errors::AppResult;
use crate::config::Config;

/// Handle the `init` command
///
/// This initializes:
///  - the app directory (if missing)
///  - the configuration file (skipped in test mode)
///  - an empty data file when none exists
///  - the notes directory
pub fn handle(ctx: &AppContext) -> AppResult<()> {
    println!("⚙️  Initializing Shyft…");
    println!("📄 Config file : {}", Config::config_file().display());

    ctx.config.init_all(ctx.is_test)?;

    // Writing an empty store creates the data file in canonical form.
    let store = ctx.open_store();
    if !store.path().exists() {
        store.save()?;
    }

    println!("🎉 Shyft initialization completed! ({} shifts)", store.len());
    Ok(())
}
