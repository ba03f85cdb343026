use crate::context::AppContext;
use crate::errors::AppResult;
use crate::models::TAX_RATE;
use crate::utils::formatting::money;
use crate::utils::table::{Column, Table};

pub fn handle(ctx: &AppContext) -> AppResult<()> {
    let totals = ctx.open_store().totals();

    let mut table = Table::new(vec![Column::left("Description"), Column::right("Value")]);
    table.add_row(vec!["Shifts Worked".into(), totals.count.to_string()]);
    table.add_row(vec![
        "Total Hours Worked".into(),
        format!("{:.2}", totals.total_hours),
    ]);
    table.add_row(vec!["Total Gross Pay".into(), money(totals.total_gross_pay)]);
    table.add_row(vec![
        format!("Estimated Tax Liability ({:.0}%)", TAX_RATE * 100.0),
        money(totals.tax_liability),
    ]);
    table.add_row(vec!["Estimated Net Income".into(), money(totals.net_income)]);

    println!("📊 Totals:\n");
    print!("{}", table.render(&ctx.config.separator_char));
    Ok(())
}
