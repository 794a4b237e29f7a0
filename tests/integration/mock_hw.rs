//! Mock hardware adapters for integration tests.
//!
//! Every mock records into shared state (`Arc<Mutex<..>>`) so tests can
//! keep a handle after the adapter has been moved into the controller or
//! onto the worker thread.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex};

use embedded_hal::delay::DelayNs;
use pumpkinpi::app::events::AppEvent;
use pumpkinpi::app::ports::{ClockPort, EventSink, MotionSensorPort, ServoPort};
use pumpkinpi::error::{ActuatorError, SensorError};

// ── MockServo ─────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockServo {
    moves: Arc<Mutex<Vec<u8>>>,
    fail_at: Arc<Mutex<Vec<u8>>>,
}

#[allow(dead_code)]
impl MockServo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every position commanded so far.
    pub fn moves(&self) -> Vec<u8> {
        self.moves.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.moves.lock().unwrap().clear();
    }

    /// Make `move_to(position)` fail from now on.
    pub fn fail_at(&self, position: u8) {
        self.fail_at.lock().unwrap().push(position);
    }
}

impl ServoPort for MockServo {
    fn move_to(&mut self, position: u8) -> Result<(), ActuatorError> {
        self.moves.lock().unwrap().push(position);
        if self.fail_at.lock().unwrap().contains(&position) {
            return Err(ActuatorError::PwmWriteFailed);
        }
        Ok(())
    }
}

// ── MockClock ─────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockClock(Arc<AtomicU8>);

#[allow(dead_code)]
impl MockClock {
    pub fn at(hour: u8) -> Self {
        Self(Arc::new(AtomicU8::new(hour)))
    }

    pub fn set_hour(&self, hour: u8) {
        self.0.store(hour, Ordering::SeqCst);
    }
}

impl ClockPort for MockClock {
    fn current_hour(&self) -> u8 {
        self.0.load(Ordering::SeqCst)
    }
}

// ── Delays ────────────────────────────────────────────────────

/// Returns immediately.
#[derive(Clone, Copy, Default)]
pub struct NoDelay;

impl DelayNs for NoDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}

/// Really sleeps, so a sequence holds the lock for a measurable time.
#[derive(Clone, Copy, Default)]
pub struct SleepDelay;

impl DelayNs for SleepDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

// ── PulseSensor ───────────────────────────────────────────────

/// PIR stand-in: each `()` sent through the paired [`Sender`] is one
/// detection. A dropped sender turns into read errors.
pub struct PulseSensor(Receiver<()>);

#[allow(dead_code)]
impl PulseSensor {
    pub fn pair() -> (Sender<()>, Self) {
        let (tx, rx) = channel();
        (tx, Self(rx))
    }
}

impl MotionSensorPort for PulseSensor {
    fn wait_for_motion(&mut self) -> Result<(), SensorError> {
        self.0.recv().map_err(|_| SensorError::EventReadFailed)
    }
}

// ── ScriptedSensor ────────────────────────────────────────────

/// PIR stand-in that replays a fixed list of read results, then blocks
/// forever.
pub struct ScriptedSensor {
    script: VecDeque<Result<(), SensorError>>,
    reads: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl ScriptedSensor {
    /// Returns the sensor and a counter of reads taken from the script.
    pub fn new(script: Vec<Result<(), SensorError>>) -> (Self, Arc<AtomicUsize>) {
        let reads = Arc::new(AtomicUsize::new(0));
        let sensor = Self {
            script: script.into(),
            reads: Arc::clone(&reads),
        };
        (sensor, reads)
    }
}

impl MotionSensorPort for ScriptedSensor {
    fn wait_for_motion(&mut self) -> Result<(), SensorError> {
        match self.script.pop_front() {
            Some(result) => {
                self.reads.fetch_add(1, Ordering::SeqCst);
                result
            }
            None => loop {
                std::thread::park();
            },
        }
    }
}

// ── LogSink ───────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct LogSink {
    events: Arc<Mutex<Vec<AppEvent>>>,
}

#[allow(dead_code)]
impl LogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<AppEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.lock().unwrap().iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for LogSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
