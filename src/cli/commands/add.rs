use crate::cli::parser::Commands;
use crate::context::AppContext;
use crate::errors::AppResult;
use crate::models::ShiftFields;
use crate::ui::messages::success;
use chrono::Local;

/// Log a shift from the command line.
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Add {
        date,
        model,
        project,
        time_in,
        time_out,
        rate,
    } = cmd
    {
        // Missing values stay empty: the store reports every missing field.
        let fields = ShiftFields {
            date: date
                .clone()
                .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string()),
            model_id: model.clone().unwrap_or_default(),
            project_id: project.clone().unwrap_or_default(),
            time_in: time_in.clone().unwrap_or_default(),
            time_out: time_out.clone().unwrap_or_default(),
            hourly_rate: rate.clone().unwrap_or_default(),
        };

        let store = ctx.open_store();
        let record = store.create(&fields)?;

        success(format!(
            "Shift {} logged: {} {}→{} = {} h × {} = {}",
            record.id,
            record.date,
            record.time_in,
            record.time_out,
            record.duration_hours,
            record.hourly_rate,
            record.gross_pay
        ));
    }

    Ok(())
}
