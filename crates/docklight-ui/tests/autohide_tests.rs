//! Autohide state machine scenarios.

use std::time::Duration;

use docklight_ui::{AutohideFsm, AutohideState, DockConfig, Transient};

fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

fn fsm(hide_delay: u32, unhide_delay: u32, hide_time: u32) -> AutohideFsm {
    let config = DockConfig::default()
        .with_autohide(true)
        .with_hide_timing(hide_delay, unhide_delay, hide_time);
    let mut fsm = AutohideFsm::new(&config);
    fsm.pointer_entered(ms(0));
    fsm.drain_changes();
    fsm
}

#[test]
fn test_leave_hides_within_hide_time() {
    let mut fsm = fsm(0, 0, 250);
    fsm.pointer_left(ms(0));
    assert_eq!(fsm.state(), AutohideState::Hiding);

    let mut last = 0.0;
    for t in (0..250).step_by(25) {
        fsm.update(ms(t));
        let p = fsm.progress(ms(t));
        assert!((0.0..=1.0).contains(&p));
        assert!(p >= last);
        last = p;
    }
    fsm.update(ms(250));
    assert_eq!(fsm.progress(ms(250)), 1.0);
    assert_eq!(fsm.state(), AutohideState::Hidden);
    assert_eq!(fsm.last_transition(), ms(250));
}

#[test]
fn test_reversal_continues_from_current_progress() {
    let mut fsm = fsm(0, 0, 250);
    fsm.pointer_left(ms(0));
    fsm.update(ms(200));
    let p = fsm.progress(ms(200));
    assert!((p - 0.8).abs() < 1e-4);

    fsm.pointer_entered(ms(200));
    assert_eq!(fsm.state(), AutohideState::Showing);
    assert!((fsm.progress(ms(200)) - p).abs() < 1e-6);
    fsm.update(ms(250));
    assert_eq!(fsm.state(), AutohideState::Showing);
    assert!(fsm.progress(ms(250)) > p);

    // Leaving again mid-show reverses once more without a jump.
    let offset = fsm.hide_offset(ms(250));
    assert!(offset > 0.0);
    fsm.pointer_left(ms(250));
    assert_eq!(fsm.state(), AutohideState::Hiding);
    assert!((fsm.hide_offset(ms(250)) - offset).abs() < 1e-6);
}

#[test]
fn test_reversal_takes_as_long_as_the_distance_back() {
    let mut fsm = fsm(0, 0, 250);
    fsm.pointer_left(ms(0));
    fsm.update(ms(200));
    // Cubic ease-in: 0.8 of the way through is 0.512 hidden.
    let offset = fsm.hide_offset(ms(200));
    assert!((offset - 0.512).abs() < 1e-4);

    fsm.pointer_entered(ms(200));
    let back = (250.0 * offset) as u64;
    fsm.update(ms(200 + back - 2));
    assert_eq!(fsm.state(), AutohideState::Showing);
    fsm.update(ms(200 + back + 3));
    assert_eq!(fsm.state(), AutohideState::Visible);
}

#[test]
fn test_hide_offset_is_continuous_through_a_run() {
    let mut fsm = fsm(0, 0, 300);
    fsm.pointer_left(ms(0));
    let mut last = fsm.hide_offset(ms(0));
    for t in 1..=300 {
        fsm.update(ms(t));
        let offset = fsm.hide_offset(ms(t));
        assert!(offset >= last - 1e-6);
        assert!(offset - last < 0.05, "jump at {} ms", t);
        last = offset;
    }
    assert_eq!(last, 1.0);
}

#[test]
fn test_change_notifications_are_reported_once() {
    let mut fsm = fsm(0, 0, 100);
    fsm.pointer_left(ms(0));
    fsm.update(ms(100));
    fsm.update(ms(200));
    fsm.pointer_entered(ms(300));
    fsm.update(ms(400));

    let states: Vec<_> = fsm.drain_changes().map(|c| (c.from, c.to)).collect();
    assert_eq!(
        states,
        vec![
            (AutohideState::Visible, AutohideState::Hiding),
            (AutohideState::Hiding, AutohideState::Hidden),
            (AutohideState::Hidden, AutohideState::Showing),
            (AutohideState::Showing, AutohideState::Visible),
        ]
    );
    assert_eq!(fsm.drain_changes().count(), 0);
    assert!(fsm.is_settled(ms(400)));
}

#[test]
fn test_disabling_while_hiding_shows_immediately() {
    let mut fsm = fsm(0, 0, 250);
    fsm.pointer_left(ms(0));
    fsm.update(ms(50));
    fsm.set_enabled(false, ms(60));
    assert_eq!(fsm.state(), AutohideState::Visible);
    assert_eq!(fsm.hide_offset(ms(60)), 0.0);
}

#[test]
fn test_backwards_clock_does_not_rewind_progress() {
    let mut fsm = fsm(0, 0, 250);
    fsm.pointer_left(ms(100));
    // A sample from before the run started reads as the run's start.
    assert_eq!(fsm.progress(ms(50)), 0.0);
    assert_eq!(fsm.hide_offset(ms(50)), 0.0);
}
