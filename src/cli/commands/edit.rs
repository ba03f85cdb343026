use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::models::ShiftId;
use crate::ui::messages::success;

/// Edit a shift. Unspecified fields keep their stored value; duration and
/// pay are recomputed.
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Edit {
        id,
        date,
        model,
        project,
        time_in,
        time_out,
        rate,
    } = cmd
    {
        let id: ShiftId = id.parse()?;
        let store = ctx.open_store();

        let mut fields = store.get(id)?.fields();
        let overrides = [
            (&mut fields.date, date),
            (&mut fields.model_id, model),
            (&mut fields.project_id, project),
            (&mut fields.time_in, time_in),
            (&mut fields.time_out, time_out),
            (&mut fields.hourly_rate, rate),
        ];
        for (field, value) in overrides {
            if let Some(v) = value {
                *field = v.clone();
            }
        }

        let record = store.update(id, &fields)?;
        success(format!(
            "Shift {} updated: {} h × {} = {}",
            record.id, record.duration_hours, record.hourly_rate, record.gross_pay
        ));
    }

    Ok(())
}
