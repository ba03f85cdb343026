use chrono::{Local, TimeDelta, TimeZone};
use shyft::core::clock::ManualClock;
use shyft::core::stopwatch::Stopwatch;
use shyft::core::ticker::spawn_ticker;
use std::ops::ControlFlow;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn manual() -> (Arc<ManualClock>, Stopwatch<Arc<ManualClock>>) {
    let start = Local.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).single().unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let sw = Stopwatch::with_clock(Arc::clone(&clock));
    (clock, sw)
}

#[test]
fn test_new_stopwatch_is_idle_and_zero() {
    let (_, sw) = manual();
    assert!(!sw.is_running());
    assert_eq!(sw.current_elapsed(), TimeDelta::zero());
    assert_eq!(sw.last_start(), None);
    assert_eq!(sw.display(), "00:00:00");
}

#[test]
fn test_elapsed_accumulates_over_cycles() {
    let (clock, sw) = manual();

    sw.start();
    clock.advance(TimeDelta::minutes(10));
    sw.stop();

    // idle time is not counted
    clock.advance(TimeDelta::hours(1));
    assert_eq!(sw.current_elapsed(), TimeDelta::minutes(10));

    sw.start();
    clock.advance(TimeDelta::seconds(30));
    assert_eq!(sw.current_elapsed(), TimeDelta::seconds(630));
    sw.stop();

    assert_eq!(sw.display(), "00:10:30");
}

#[test]
fn test_start_while_running_keeps_first_start() {
    let (clock, sw) = manual();

    sw.start();
    let first = sw.last_start();
    clock.advance(TimeDelta::seconds(5));
    sw.start();

    assert_eq!(sw.last_start(), first);
    assert_eq!(sw.current_elapsed(), TimeDelta::seconds(5));
}

#[test]
fn test_stop_when_idle_is_a_no_op() {
    let (clock, sw) = manual();
    sw.stop();
    clock.advance(TimeDelta::seconds(5));
    sw.stop();
    assert_eq!(sw.current_elapsed(), TimeDelta::zero());
}

#[test]
fn test_reset_returns_to_idle_zero() {
    let (clock, sw) = manual();
    sw.start();
    clock.advance(TimeDelta::minutes(3));

    sw.reset();

    assert!(!sw.is_running());
    assert_eq!(sw.current_elapsed(), TimeDelta::zero());
    assert_eq!(sw.last_start(), None);
}

#[test]
fn test_toggle_flips_state() {
    let (clock, sw) = manual();
    assert!(sw.toggle());
    clock.advance(TimeDelta::seconds(2));
    assert!(!sw.toggle());
    assert_eq!(sw.current_elapsed(), TimeDelta::seconds(2));
}

#[test]
fn test_concurrent_toggles_pair_up() {
    let (_, sw) = manual();

    // an even number of toggles in total must leave the stopwatch idle
    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for _ in 0..1000 {
                    sw.toggle();
                }
            });
        }
    });

    assert!(!sw.is_running());
}

#[test]
fn test_clock_going_backwards_never_goes_negative() {
    let (clock, sw) = manual();
    sw.start();
    clock.advance(TimeDelta::seconds(-30));
    assert_eq!(sw.current_elapsed(), TimeDelta::zero());
    sw.stop();
    assert_eq!(sw.current_elapsed(), TimeDelta::zero());
}

#[test]
fn test_display_keeps_counting_hours_past_a_day() {
    let (clock, sw) = manual();
    sw.start();
    clock.advance(TimeDelta::hours(25) + TimeDelta::seconds(61));
    assert_eq!(sw.display(), "25:01:01");
}

#[test]
fn test_real_clock_measures_a_short_sleep() {
    let sw = Stopwatch::new();
    sw.start();
    std::thread::sleep(Duration::from_millis(100));
    sw.stop();

    let elapsed = sw.current_elapsed();
    assert!(elapsed >= TimeDelta::milliseconds(100), "{elapsed:?}");
    assert!(elapsed < TimeDelta::seconds(2), "{elapsed:?}");
}

#[tokio::test]
async fn test_ticker_stops_when_sink_breaks() {
    let (clock, sw) = manual();
    let sw = Arc::new(sw);
    sw.start();
    clock.advance(TimeDelta::seconds(42));

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink_seen = Arc::clone(&seen);
    let handle = spawn_ticker(
        Arc::clone(&sw),
        Duration::from_millis(10),
        CancellationToken::new(),
        move |text| {
            let mut seen = sink_seen.lock().unwrap();
            seen.push(text.to_string());
            if seen.len() >= 3 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        },
    );

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("ticker should stop")
        .unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 3);
    assert!(seen.iter().all(|s| s == "00:00:42"));
    // the stopwatch keeps its own state
    assert!(sw.is_running());
}

#[tokio::test]
async fn test_ticker_stops_on_cancel() {
    let sw = Arc::new(Stopwatch::new());
    let cancel = CancellationToken::new();
    let handle = spawn_ticker(
        Arc::clone(&sw),
        Duration::from_millis(10),
        cancel.clone(),
        |_| ControlFlow::Continue(()),
    );

    tokio::time::sleep(Duration::from_millis(30)).await;
    cancel.cancel();

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("ticker should stop")
        .unwrap();
    assert!(!sw.is_running());
}
