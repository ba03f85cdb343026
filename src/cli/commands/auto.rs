use super::timer::terminal_sink;
use crate::cli::parser::Commands;
use crate::cli::prompt::{InputLines, ask_async, ask_block, stdin_lines};
use crate::context::AppContext;
use crate::core::autolog::{AutologSession, SessionMeta};
use crate::core::stopwatch::Stopwatch;
use crate::core::ticker::spawn_ticker;
use crate::errors::{AppError, AppResult};
use crate::models::{Rank, Task};
use crate::ui::messages::{error, info, success, warning};
use crate::utils::runtime::single_thread_runtime;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

const MENU: &str = "[t] add task  [n] note  [d] divider  [p] pause/resume  [w] watch  [f] finish  [c] cancel";

/// Interactive autologger.
pub fn handle(cmd: &Commands, ctx: &AppContext) -> AppResult<()> {
    if let Commands::Auto {
        model,
        project,
        rate,
    } = cmd
    {
        single_thread_runtime()?.block_on(run(ctx, model.clone(), project.clone(), rate.clone()))?;
    }
    Ok(())
}

async fn value_or_ask(
    lines: &mut InputLines,
    given: Option<String>,
    label: &str,
) -> AppResult<Option<String>> {
    match given {
        Some(v) => Ok(Some(v)),
        None => ask_async(lines, label).await,
    }
}

async fn run(
    ctx: &AppContext,
    model: Option<String>,
    project: Option<String>,
    rate: Option<String>,
) -> AppResult<()> {
    let mut lines = stdin_lines();

    //
    // 1. Metadata; an empty answer or closed input aborts before timing
    //
    let mut answers = Vec::with_capacity(3);
    for (given, label) in [(model, "Model ID"), (project, "Project ID"), (rate, "Hourly rate")] {
        match value_or_ask(&mut lines, given, label).await? {
            Some(v) if !v.is_empty() => answers.push(v),
            _ => {
                info("Autologger aborted.");
                return Ok(());
            }
        }
    }
    let hourly_rate = answers.pop().unwrap_or_default();
    let project_id = answers.pop().unwrap_or_default();
    let model_id = answers.pop().unwrap_or_default();

    let handle = ctx.open_handle();
    let stopwatch = Arc::new(Stopwatch::new());

    //
    // 2. Start timing
    //
    let mut session = AutologSession::begin(
        SessionMeta {
            model_id,
            project_id,
            hourly_rate,
        },
        Arc::clone(&stopwatch),
    )?;
    success(format!(
        "Timing {} / {} ...",
        session.meta().model_id,
        session.meta().project_id
    ));

    //
    // 3. Command loop
    //
    loop {
        println!("\n{MENU}");
        let Some(choice) = ask_async(&mut lines, &format!("[{}]", stopwatch.display())).await?
        else {
            match session.stored().map(|r| r.id) {
                Some(id) => warning(format!("Input closed: shift {id} kept without a note.")),
                None => warning("Input closed: session cancelled, nothing was logged."),
            }
            session.cancel();
            return Ok(());
        };

        // once the shift is stored only the note is left to write
        if let Some(id) = session.stored().map(|r| r.id)
            && !matches!(choice.as_str(), "f" | "c")
        {
            warning(format!("Shift {id} is already stored; [f] retries its note, [c] closes."));
            continue;
        }

        match choice.as_str() {
            "t" => match read_task(&mut lines).await {
                Ok(Some(task)) => match session.add_task(task) {
                    Ok(n) => success(format!("Task added ({n} so far).")),
                    Err(e) => warning(e),
                },
                Ok(None) => warning("Task discarded."),
                Err(e) => warning(e),
            },
            "n" => {
                if let Some(text) = ask_block(&mut lines, "Note").await? {
                    session.add_note(&text);
                }
            }
            "d" => session.insert_divider(),
            "p" => {
                if stopwatch.toggle() {
                    info("Resumed.");
                } else {
                    info(format!("Paused at {}.", stopwatch.display()));
                }
            }
            "w" => watch(ctx, &stopwatch, &mut lines).await?,
            "f" => match session.finish_async(&handle).await {
                Ok(outcome) => {
                    success(format!(
                        "Autologger shift {} added: {} h × {} = {} ({} tasks).",
                        outcome.record.id,
                        outcome.record.duration_hours,
                        outcome.record.hourly_rate,
                        outcome.record.gross_pay,
                        outcome.record.tasks_completed.unwrap_or(0)
                    ));
                    info(format!("Note: {}", outcome.note.display()));
                    return Ok(());
                }
                Err(e) => match session.stored().map(|r| r.id) {
                    Some(id) => {
                        error(format!("Shift {id} stored, but its note failed: {e}"));
                        info("[f] retries the note, [c] keeps the shift without it.");
                    }
                    None => {
                        error(format!("Failed to log shift: {e}"));
                        info("The session is paused; [p] resumes, [f] retries, [c] cancels.");
                    }
                },
            },
            "c" => {
                match session.stored().map(|r| r.id) {
                    Some(id) => info(format!("Autologger closed, shift {id} kept without a note.")),
                    None => info("Autologger cancelled, nothing was logged."),
                }
                session.cancel();
                return Ok(());
            }
            "" => {}
            other => warning(format!("Unknown choice '{other}'")),
        }
    }
}

/// Live display until the next Enter.
async fn watch(
    ctx: &AppContext,
    stopwatch: &Arc<Stopwatch>,
    lines: &mut InputLines,
) -> AppResult<()> {
    println!("(press Enter to return)");
    let cancel = CancellationToken::new();
    let ticker = spawn_ticker(
        Arc::clone(stopwatch),
        ctx.tick_period(),
        cancel.clone(),
        terminal_sink(),
    );

    let _ = lines.next_line().await?;
    cancel.cancel();
    let _ = ticker.await;
    println!();
    Ok(())
}

async fn read_task(lines: &mut InputLines) -> AppResult<Option<Task>> {
    let closed = || AppError::Validation("input closed while entering a task".into());

    let platform_id = ask_async(lines, "Platform ID").await?.ok_or_else(closed)?;
    let permalink = ask_async(lines, "Permalink").await?.ok_or_else(closed)?;
    let response1_id = ask_async(lines, "Response #1 ID").await?.ok_or_else(closed)?;
    let response2_id = ask_async(lines, "Response #2 ID").await?.ok_or_else(closed)?;

    for (i, rank) in Rank::ALL.iter().enumerate() {
        println!("  {}. {}", i + 1, rank);
    }
    let choice = ask_async(lines, "Rank [1-6]").await?.ok_or_else(closed)?;
    let Some(rank) = choice.parse::<usize>().ok().and_then(Rank::from_choice) else {
        warning(format!("'{choice}' is not a rank between 1 and 6"));
        return Ok(None);
    };

    let justification = ask_block(lines, "Justification").await?.ok_or_else(closed)?;

    Ok(Some(Task {
        platform_id,
        permalink,
        response1_id,
        response2_id,
        rank,
        justification,
    }))
}
