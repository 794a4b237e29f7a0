//! Integration tests: triggers → CommandQueue → servo worker thread.

use std::time::{Duration, Instant};

use std::sync::atomic::Ordering;

use super::mock_hw::{
    LogSink, MockClock, MockServo, NoDelay, PulseSensor, ScriptedSensor, SleepDelay,
};

use embedded_hal::delay::DelayNs;
use pumpkinpi::app::commands::{ServoCommand, Side};
use pumpkinpi::app::controller::PositionController;
use pumpkinpi::app::events::AppEvent;
use pumpkinpi::config::{MotionConfig, ServoLimits};
use pumpkinpi::error::SensorError;
use pumpkinpi::runtime::{
    CommandQueue, SubmitOutcome, request_shutdown, spawn_controller_worker, spawn_sensor_watcher,
    spawn_sensor_watcher_with_backoff,
};
use pumpkinpi::scheduler::{CENTER_RESET_LABEL, Schedule, Scheduler};
use pumpkinpi::window::ActiveWindow;

fn motion_config(step_delay: Duration) -> MotionConfig {
    MotionConfig {
        limits: ServoLimits {
            left: 20,
            center: 29,
            right: 40,
        },
        step_delay,
        window: ActiveWindow::ALWAYS,
    }
}

fn make<D: DelayNs>(
    delay: D,
    step_delay: Duration,
) -> (PositionController<MockServo, D, MockClock>, MockServo, CommandQueue) {
    let servo = MockServo::new();
    let controller = PositionController::new(
        motion_config(step_delay),
        servo.clone(),
        delay,
        MockClock::at(20),
    );
    let queue = CommandQueue::new(controller.moving_lock());
    (controller, servo, queue)
}

/// Poll `cond` every millisecond for up to two seconds.
fn wait_until(mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    false
}

// ── Worker ────────────────────────────────────────────────────

#[test]
fn worker_runs_commands_in_fifo_order_until_shutdown() {
    let (controller, servo, queue) = make(NoDelay, Duration::ZERO);

    for cmd in [
        ServoCommand::Motion(Side::Left),
        ServoCommand::ResetToCenter,
        ServoCommand::Motion(Side::Right),
        ServoCommand::Shutdown,
    ] {
        assert_eq!(queue.submit(cmd), SubmitOutcome::Queued);
    }

    let worker = spawn_controller_worker(controller, queue.clone(), LogSink::new()).unwrap();
    let controller = worker.join().unwrap();

    let mut expected: Vec<u8> = (20..=29).rev().collect();
    expected.extend(20..=29);
    expected.extend(29..=40);
    assert_eq!(servo.moves(), expected);
    assert_eq!(controller.position(), 40);
    assert!(queue.is_empty());
}

#[test]
fn commands_after_shutdown_are_left_in_the_queue() {
    let (controller, servo, queue) = make(NoDelay, Duration::ZERO);
    queue.submit(ServoCommand::Shutdown);
    queue.submit(ServoCommand::Motion(Side::Right));

    let worker = spawn_controller_worker(controller, queue.clone(), LogSink::new()).unwrap();
    let controller = worker.join().unwrap();

    assert!(servo.moves().is_empty());
    assert_eq!(controller.position(), 29);
    assert_eq!(queue.try_receive(), Some(ServoCommand::Motion(Side::Right)));
}

#[test]
fn triggers_during_a_sequence_are_discarded() {
    let (controller, servo, queue) = make(SleepDelay, Duration::from_millis(20));
    let lock = controller.moving_lock();
    let sink = LogSink::new();

    let worker = spawn_controller_worker(controller, queue.clone(), sink.clone()).unwrap();
    assert_eq!(
        queue.submit(ServoCommand::Motion(Side::Right)),
        SubmitOutcome::Queued
    );
    assert!(wait_until(|| lock.is_moving()), "sequence never started");

    assert_eq!(
        queue.submit(ServoCommand::Motion(Side::Left)),
        SubmitOutcome::DiscardedWhileMoving
    );
    assert_eq!(
        queue.submit(ServoCommand::ResetToCenter),
        SubmitOutcome::DiscardedWhileMoving
    );

    request_shutdown(&queue);
    let controller = worker.join().unwrap();

    assert_eq!(servo.moves(), (29..=40).collect::<Vec<_>>());
    assert_eq!(controller.position(), 40);
    assert!(!lock.is_moving());
    assert_eq!(
        sink.count(|e| matches!(e, AppEvent::MovementFinished { .. })),
        1
    );
}

// ── Sensor watcher ────────────────────────────────────────────

#[test]
fn pir_detection_turns_the_servo() {
    let (controller, servo, queue) = make(NoDelay, Duration::ZERO);
    let (pulse, sensor) = PulseSensor::pair();

    let worker = spawn_controller_worker(controller, queue.clone(), LogSink::new()).unwrap();
    let _watcher = spawn_sensor_watcher(Side::Left, sensor, queue.clone()).unwrap();

    pulse.send(()).unwrap();
    assert!(
        wait_until(|| servo.moves().last() == Some(&20)),
        "servo never reached the left bound"
    );

    request_shutdown(&queue);
    let controller = worker.join().unwrap();
    assert_eq!(controller.position(), 20);
}

#[test]
fn watcher_recovers_after_a_sensor_error() {
    let (controller, servo, queue) = make(NoDelay, Duration::ZERO);
    let (sensor, reads) = ScriptedSensor::new(vec![Err(SensorError::EventReadFailed), Ok(())]);

    let worker = spawn_controller_worker(controller, queue.clone(), LogSink::new()).unwrap();
    let _watcher = spawn_sensor_watcher_with_backoff(
        Side::Right,
        sensor,
        queue.clone(),
        Duration::from_millis(10),
    )
    .unwrap();

    assert!(
        wait_until(|| servo.moves().last() == Some(&40)),
        "motion after the failed read never reached the worker"
    );
    assert_eq!(reads.load(Ordering::SeqCst), 2);

    request_shutdown(&queue);
    let controller = worker.join().unwrap();
    assert_eq!(controller.position(), 40);
    assert_eq!(servo.moves(), (29..=40).collect::<Vec<_>>());
}

// ── Scheduler ─────────────────────────────────────────────────

#[test]
fn center_reset_schedule_returns_servo_to_center() {
    let (controller, servo, queue) = make(NoDelay, Duration::ZERO);
    let mut sched = Scheduler::new();
    sched
        .add(Schedule {
            label: CENTER_RESET_LABEL,
            interval: Duration::from_secs(300),
            enabled: true,
        })
        .unwrap();

    queue.submit(ServoCommand::Motion(Side::Right));
    let mut delegate = queue.clone();
    sched.tick(Duration::from_secs(299), &mut delegate);
    assert_eq!(queue.len(), 1);
    sched.tick(Duration::from_secs(1), &mut delegate);
    assert_eq!(queue.len(), 2);
    queue.submit(ServoCommand::Shutdown);

    let worker = spawn_controller_worker(controller, queue.clone(), LogSink::new()).unwrap();
    let controller = worker.join().unwrap();

    assert_eq!(controller.position(), 29);
    assert_eq!(servo.moves().last(), Some(&29));
}
