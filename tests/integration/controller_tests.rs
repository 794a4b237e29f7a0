//! Integration tests: config → PositionController → servo.

use super::mock_hw::{LogSink, MockClock, MockServo, NoDelay};

use pumpkinpi::adapters::env_config::EnvConfigAdapter;
use pumpkinpi::app::commands::{ServoCommand, Side};
use pumpkinpi::app::controller::{MoveOutcome, PositionController};
use pumpkinpi::app::events::{AppEvent, SkipReason, Trigger};
use pumpkinpi::app::ports::ConfigPort;
use pumpkinpi::config::MotionConfig;

type TestController = PositionController<MockServo, NoDelay, MockClock>;

/// left 20, center 29, right 40, no delay, window as given.
fn make(window: Option<(u8, u8)>, hour: u8) -> (TestController, MockServo, MockClock, LogSink) {
    let mut vars = vec![
        ("PUMPKINPI_SERVO_LEFT", "20".to_string()),
        ("PUMPKINPI_SERVO_CENTER", "29".to_string()),
        ("PUMPKINPI_SERVO_RIGHT", "40".to_string()),
        ("PUMPKINPI_SERVO_ROTATE_DELAY", "0s".to_string()),
    ];
    if let Some((start, end)) = window {
        vars.push(("PUMPKINPI_MOTION_TIMES_ENABLED", "true".to_string()));
        vars.push(("PUMPKINPI_MOTION_TIME_START", start.to_string()));
        vars.push(("PUMPKINPI_MOTION_TIME_END", end.to_string()));
    }
    let config = EnvConfigAdapter::from_vars(vars).load().unwrap();

    let servo = MockServo::new();
    let clock = MockClock::at(hour);
    let sink = LogSink::new();
    let controller = PositionController::new(
        MotionConfig::from(&config),
        servo.clone(),
        NoDelay,
        clock.clone(),
    );
    (controller, servo, clock, sink)
}

// ── Full walkthrough ─────────────────────────────────────────

#[test]
fn init_right_right_reset_walkthrough() {
    let (mut c, servo, _clock, mut sink) = make(None, 12);

    c.start(&mut sink);
    assert_eq!(servo.moves(), vec![29]);
    assert_eq!(c.position(), 29);

    servo.clear();
    c.handle_motion(Side::Right, &mut sink);
    assert_eq!(servo.moves(), (29..=40).collect::<Vec<_>>());
    assert_eq!(c.position(), 40);

    servo.clear();
    let again = c.handle_motion(Side::Right, &mut sink);
    assert_eq!(again, MoveOutcome::Skipped(SkipReason::AlreadyAtTarget));
    assert!(servo.moves().is_empty());

    servo.clear();
    c.reset_to_center(&mut sink);
    assert_eq!(servo.moves(), (29..=40).rev().collect::<Vec<_>>());
    assert_eq!(c.position(), 29);
    assert!(!c.is_moving());
}

#[test]
fn left_then_reset_converges_both_ways() {
    let (mut c, servo, _clock, mut sink) = make(None, 12);

    c.handle_motion(Side::Left, &mut sink);
    assert_eq!(servo.moves(), vec![29, 28, 27, 26, 25, 24, 23, 22, 21, 20]);

    servo.clear();
    c.reset_to_center(&mut sink);
    assert_eq!(servo.moves(), (20..=29).collect::<Vec<_>>());
}

#[test]
fn left_at_left_bound_is_idempotent() {
    let (mut c, servo, _clock, mut sink) = make(None, 12);
    c.handle_motion(Side::Left, &mut sink);
    servo.clear();

    for _ in 0..3 {
        c.handle_motion(Side::Left, &mut sink);
    }
    assert!(servo.moves().is_empty());
    assert_eq!(c.position(), 20);
}

// ── Active window ─────────────────────────────────────────────

#[test]
fn window_gates_motion_but_not_reset() {
    let (mut c, servo, clock, mut sink) = make(Some((18, 22)), 17);

    assert_eq!(
        c.handle_motion(Side::Left, &mut sink),
        MoveOutcome::Skipped(SkipReason::OutsideActiveWindow { hour: 17 })
    );
    assert!(servo.moves().is_empty());

    clock.set_hour(18);
    assert!(!c.handle_motion(Side::Left, &mut sink).is_skipped());
    assert_eq!(c.position(), 20);

    clock.set_hour(22);
    assert!(c.handle_motion(Side::Right, &mut sink).is_skipped());
    assert_eq!(c.position(), 20);

    // Reset runs at any hour.
    assert!(!c.reset_to_center(&mut sink).is_skipped());
    assert_eq!(c.position(), 29);
}

// ── Events ────────────────────────────────────────────────────

#[test]
fn sequence_emits_started_and_finished() {
    let (mut c, _servo, _clock, mut sink) = make(None, 12);
    c.handle_command(ServoCommand::Motion(Side::Right), &mut sink);

    assert_eq!(
        sink.events(),
        vec![
            AppEvent::MovementStarted {
                trigger: Trigger::Motion(Side::Right),
                from: 29,
                to: 40
            },
            AppEvent::MovementFinished {
                trigger: Trigger::Motion(Side::Right),
                position: 40,
                steps: 12,
                failed_steps: 0
            },
        ]
    );
}

#[test]
fn failing_steps_do_not_stop_the_sequence() {
    let (mut c, servo, _clock, mut sink) = make(None, 12);
    servo.fail_at(33);
    servo.fail_at(40);

    let outcome = c.handle_motion(Side::Right, &mut sink);
    assert_eq!(
        outcome,
        MoveOutcome::Completed {
            from: 29,
            to: 40,
            steps: 12,
            failed_steps: 2
        }
    );
    assert_eq!(c.position(), 40);
    assert!(!c.is_moving());
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::StepFailed { .. })),
        2
    );
}
