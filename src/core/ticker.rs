use super::clock::Clock;
use super::stopwatch::Stopwatch;
use std::ops::ControlFlow;
use std::sync::Arc;
use std::time::Duration;
use tokio::select;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Periodically render the stopwatch into `sink`.
///
/// The task ends when `cancel` fires or when `sink` answers
/// `ControlFlow::Break`, meaning the view it draws on is gone. Neither
/// touches the stopwatch itself.
pub fn spawn_ticker<C, F>(
    stopwatch: Arc<Stopwatch<C>>,
    period: Duration,
    cancel: CancellationToken,
    mut sink: F,
) -> JoinHandle<()>
where
    C: Clock,
    F: FnMut(&str) -> ControlFlow<()> + Send + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period.max(Duration::from_millis(10)));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    if sink(&stopwatch.display()).is_break() {
                        debug!("display closed, ticker stops");
                        break;
                    }
                }
            }
        }
    })
}
