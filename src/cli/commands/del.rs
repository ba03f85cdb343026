use crate::cli::parser::Commands;
use crate::cli::prompt::confirm;
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::models::ShiftId;
use crate::ui::messages::{info, success};

pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let id: ShiftId = id.parse()?;
        let store = ctx.open_store();

        // fail early on unknown ids, before asking anything
        let shift = store.get(id)?;

        //
        // Confirmation prompt
        //
        let prompt = format!(
            "Delete shift {} ({} {}/{})? This action is irreversible.",
            shift.id, shift.date, shift.model_id, shift.project_id
        );
        if !*yes && !confirm(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        store.delete(id)?;
        success(format!("Shift {} has been deleted.", id));
    }

    Ok(())
}
