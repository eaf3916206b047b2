use anyhow::Result;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::broadcast;
use windowwatch_core::models::{Config, WindowState};
use windowwatch_core::ManualClock;
use windowwatch_daemon::{
    load_config, read_config, CountdownField, DisplayState, Indicator, LoggingAction, WindowEngine,
    WindowEventType,
};

fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
}

#[test]
fn test_full_window_lifecycle() -> Result<()> {
    let clock = Arc::new(ManualClock::new(utc(2025, 9, 23, 15)));
    let (tx, mut rx) = broadcast::channel(256);
    let mut engine = WindowEngine::from_config(clock.clone(), &Config::default(), tx)?;
    let mut display = DisplayState::new();
    let mut action = LoggingAction::new();

    engine.clock_tick(&mut display);
    let update = engine.countdown_tick(&mut display);
    assert_eq!(update.state, WindowState::PreOpen);
    assert_eq!(display.state_view.label, "OPENS IN");
    assert_eq!(display.field(CountdownField::Hours), "01");
    assert_eq!(display.description, "Opens Sep 23, 2025 • 12:00 PM ET");
    assert_eq!(display.local_time, "Tue, Sep 23, 2025, 11:00:00 AM EDT");

    clock.set(utc(2025, 9, 25, 16));
    engine.countdown_tick(&mut display);
    assert_eq!(display.state_view.indicator, Indicator::Open);
    assert!(display.state_view.show_progress);
    assert_eq!(display.progress_label, "29% of window elapsed");
    assert_eq!(display.field(CountdownField::Days), "05");
    assert!(engine.trigger_action(&mut action)?);

    clock.set(utc(2025, 10, 1, 0));
    engine.countdown_tick(&mut display);
    assert_eq!(display.state_view.label, "CLOSED");
    assert!(!display.state_view.show_action);
    assert_eq!(display.description, "Migration window has closed");
    for field in CountdownField::ALL {
        assert_eq!(display.field(field), "00");
    }

    let mut transitions = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let WindowEventType::StateChanged { from, to } = event.event_type {
            transitions.push((from, to));
        }
    }
    assert_eq!(
        transitions,
        vec![
            (WindowState::PreOpen, WindowState::Open),
            (WindowState::Open, WindowState::Closed),
        ]
    );

    Ok(())
}

#[test]
fn test_countdown_counts_down_each_second() -> Result<()> {
    let clock = Arc::new(ManualClock::new(utc(2025, 9, 22, 16)));
    let (tx, _) = broadcast::channel(16);
    let mut engine = WindowEngine::from_config(clock.clone(), &Config::default(), tx)?;
    let mut display = DisplayState::new();

    engine.countdown_tick(&mut display);
    assert_eq!(display.field(CountdownField::Days), "01");
    assert_eq!(display.field(CountdownField::Seconds), "00");

    clock.advance(Duration::seconds(1));
    engine.countdown_tick(&mut display);
    assert_eq!(display.field(CountdownField::Days), "00");
    assert_eq!(display.field(CountdownField::Hours), "23");
    assert_eq!(display.field(CountdownField::Minutes), "59");
    assert_eq!(display.field(CountdownField::Seconds), "59");

    Ok(())
}

#[test]
fn test_load_config_with_overrides() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("window.json");

    let config = load_config(
        Some(path.clone()),
        Some("2026-01-01T00:00:00Z"),
        Some("2026-01-08T00:00:00-05:00"),
    )?;
    assert_eq!(config.window.opens_at, utc(2026, 1, 1, 0));
    assert_eq!(config.window.closes_at, utc(2026, 1, 8, 5));
    assert!(path.exists());

    let reversed = load_config(Some(path), Some("2026-02-01T00:00:00Z"), None);
    assert!(reversed.is_err());

    Ok(())
}

#[test]
fn test_overrides_repair_invalid_file() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("window.json");

    let mut broken = Config::default();
    broken.window.closes_at = broken.window.opens_at;
    std::fs::write(&path, serde_json::to_string_pretty(&broken)?)?;

    assert!(load_config(Some(path.clone()), None, None).is_err());

    let config = load_config(
        Some(path.clone()),
        Some("2026-01-01T00:00:00Z"),
        Some("2026-01-08T00:00:00Z"),
    )?;
    assert_eq!(config.window.opens_at, utc(2026, 1, 1, 0));
    assert_eq!(config.window.closes_at, utc(2026, 1, 8, 0));

    let config = read_config(Some(path), None, Some("2026-01-08T00:00:00Z"))?;
    assert_eq!(config.window.closes_at, utc(2026, 1, 8, 0));

    Ok(())
}

#[test]
fn test_read_config_leaves_filesystem_alone() -> Result<()> {
    let temp = TempDir::new()?;
    let path = temp.path().join("missing").join("window.json");

    let config = read_config(Some(path.clone()), None, Some("2026-01-01T00:00:00Z"))?;
    assert_eq!(config.window.opens_at, Config::default().window.opens_at);
    assert_eq!(config.window.closes_at, utc(2026, 1, 1, 0));
    assert!(!path.exists());
    assert!(!temp.path().join("missing").exists());

    Ok(())
}
