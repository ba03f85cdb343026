use crate::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::table::{Column, Table};

pub fn handle(ctx: &AppContext) -> AppResult<()> {
    let store = ctx.open_store();
    let shifts = store.list();

    if shifts.is_empty() {
        info("No shifts logged yet.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::left("ID"),
        Column::left("Date"),
        Column::left("Model ID"),
        Column::left("Project ID"),
        Column::left("In"),
        Column::left("Out"),
        Column::right("Hours"),
        Column::right("Rate"),
        Column::right("Gross"),
        Column::right("Tasks"),
    ]);

    for s in &shifts {
        table.add_row(vec![
            s.id.to_string(),
            s.date.clone(),
            s.model_id.clone(),
            s.project_id.clone(),
            s.time_in.clone(),
            s.time_out.clone(),
            s.duration_hours.to_string(),
            s.hourly_rate.to_string(),
            s.gross_pay.to_string(),
            s.tasks_completed.map(|n| n.to_string()).unwrap_or_default(),
        ]);
    }

    println!("📋 Logged shifts:\n");
    print!("{}", table.render(&ctx.config.separator_char));
    Ok(())
}
