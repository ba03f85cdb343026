use crate::cli::prompt::stdin_lines;
use crate::context::AppContext;
use crate::core::stopwatch::Stopwatch;
use crate::core::ticker::spawn_ticker;
use crate::errors::AppResult;
use crate::utils::runtime::single_thread_runtime;
use std::io::{self, Write};
use std::ops::ControlFlow;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Standalone stopwatch: Enter toggles start/stop, `r` resets, `q` quits.
pub fn handle(ctx: &AppContext) -> AppResult<()> {
    single_thread_runtime()?.block_on(run(ctx))
}

async fn run(ctx: &AppContext) -> AppResult<()> {
    let stopwatch = Arc::new(Stopwatch::new());
    let cancel = CancellationToken::new();

    println!("⏱  Stopwatch: [Enter] start/stop, [r] reset, [q] quit");
    stopwatch.start();

    let ticker = spawn_ticker(
        Arc::clone(&stopwatch),
        ctx.tick_period(),
        cancel.clone(),
        terminal_sink(),
    );

    let mut lines = stdin_lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" => {
                stopwatch.toggle();
            }
            "r" => stopwatch.reset(),
            "q" => break,
            _ => {}
        }
    }

    stopwatch.stop();
    cancel.cancel();
    let _ = ticker.await;
    println!("\nTotal: {}", stopwatch.display());
    Ok(())
}

/// Redraw the elapsed time in place; stops once stdout is gone.
pub(crate) fn terminal_sink() -> impl FnMut(&str) -> ControlFlow<()> + Send + 'static {
    |text: &str| {
        let mut out = io::stdout();
        match write!(out, "\r⏱  {text} ").and_then(|_| out.flush()) {
            Ok(()) => ControlFlow::Continue(()),
            Err(_) => ControlFlow::Break(()),
        }
    }
}
