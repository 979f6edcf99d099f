use std::sync::mpsc;
use std::time::{Duration, Instant};

use countdown::{
    preset::Preset,
    runtime::{Runner, TestEventSource, TimerEvent},
    session_log::SESSION_LOG_CAPACITY,
    timer::{TimerEngine, TimerStatus},
};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

// Headless integration using the internal runtime + TimerEngine without a TTY.
// The tick cadence is shortened so a whole countdown runs in milliseconds;
// every tick still removes one second.
fn drive(engine: &mut TimerEngine, runner: &Runner<TestEventSource>, max_steps: u32) {
    for _ in 0..max_steps {
        match runner.step(engine.time_until_tick(Instant::now())) {
            TimerEvent::Tick => {
                engine.poll(Instant::now());
            }
            TimerEvent::Resize => {}
            TimerEvent::Key(key) => match key.code {
                KeyCode::Char('s') => {
                    engine.start();
                }
                KeyCode::Char('p') => {
                    engine.pause();
                }
                KeyCode::Char('r') => engine.reset(),
                KeyCode::Esc => break,
                _ => {}
            },
        }
        if engine.status() == TimerStatus::Finished {
            break;
        }
    }
}

fn key(c: char) -> TimerEvent {
    TimerEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

#[test]
fn headless_countdown_runs_to_completion() {
    let mut engine = TimerEngine::with_tick_interval(Duration::from_millis(1));
    engine.select_preset(Preset::Three);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::with_idle_poll(TestEventSource::new(rx), Duration::from_millis(5));
    tx.send(key('s')).unwrap();

    drive(&mut engine, &runner, 10_000);

    assert_eq!(engine.status(), TimerStatus::Finished);
    assert_eq!(engine.display(), "00:00");
    let entry = engine.log().newest().expect("completion logged");
    assert_eq!(entry.elapsed_ms(), 180_000);
    assert_eq!(entry.planned_ms(), 180_000);
    assert_eq!(engine.log().len(), 1);
}

#[test]
fn headless_pause_stops_ticking() {
    let mut engine = TimerEngine::with_tick_interval(Duration::from_millis(2));
    engine.select_preset(Preset::Thirty);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::with_idle_poll(TestEventSource::new(rx), Duration::from_millis(2));
    tx.send(key('s')).unwrap();

    // let some ticks land, then pause
    drive(&mut engine, &runner, 20);
    tx.send(key('p')).unwrap();
    drive(&mut engine, &runner, 1);
    assert!(!engine.is_running());

    let frozen = engine.remaining_ms();
    let entry = engine.log().newest().cloned().expect("pause logged");
    assert_eq!(entry.planned_ms(), 1_800_000);
    assert_eq!(entry.elapsed_ms(), 1_800_000 - frozen);

    // nothing moves while paused
    drive(&mut engine, &runner, 20);
    assert_eq!(engine.remaining_ms(), frozen);
    assert_eq!(engine.log().len(), 1);
}

#[test]
fn headless_reset_cancels_without_logging() {
    let mut engine = TimerEngine::with_tick_interval(Duration::from_millis(1));
    engine.select_preset(Preset::Fifteen);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::with_idle_poll(TestEventSource::new(rx), Duration::from_millis(2));
    tx.send(key('s')).unwrap();
    drive(&mut engine, &runner, 10);
    tx.send(key('r')).unwrap();
    drive(&mut engine, &runner, 1);

    assert_eq!(engine.status(), TimerStatus::Idle);
    assert_eq!(engine.remaining_ms(), 300_000);
    assert_eq!(engine.original_duration_ms(), 300_000);
    assert!(engine.log().is_empty());

    drive(&mut engine, &runner, 10);
    assert_eq!(engine.remaining_ms(), 300_000);
}

#[test]
fn session_log_keeps_only_latest_sessions() {
    let mut engine = TimerEngine::new();
    let t0 = Instant::now();

    for i in 0..(SESSION_LOG_CAPACITY as u64 + 5) {
        engine.reset();
        engine.start_at(t0);
        engine.poll(t0 + Duration::from_secs(i + 1));
        engine.pause();
    }

    let log = engine.log();
    assert_eq!(log.len(), SESSION_LOG_CAPACITY);
    assert_eq!(log.newest().map(|e| e.elapsed_ms()), Some(25_000));
    assert_eq!(log.get(SESSION_LOG_CAPACITY - 1).map(|e| e.elapsed_ms()), Some(6_000));
}

#[test]
fn resume_after_pause_plans_the_remainder() {
    let mut engine = TimerEngine::new();
    let t0 = Instant::now();

    engine.start_at(t0);
    engine.poll(t0 + Duration::from_secs(120));
    engine.pause();

    let t1 = t0 + Duration::from_secs(500);
    engine.start_at(t1);
    engine.poll(t1 + Duration::from_secs(180));

    assert_eq!(engine.status(), TimerStatus::Finished);
    let entries: Vec<(u64, u64)> = engine
        .log()
        .entries()
        .map(|e| (e.elapsed_ms(), e.planned_ms()))
        .collect();
    assert_eq!(entries, vec![(180_000, 180_000), (120_000, 300_000)]);
}
