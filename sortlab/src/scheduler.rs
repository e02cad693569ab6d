//! Pacing, pausing and cancelling one animated run at a time.
//!
//! The scheduler owns the run state machine. A worker thread pulls one
//! operation from the stepper per step, applies it to the shared array
//! under a mutex held only for that apply, and delivers the operation over
//! a bounded channel to whatever thread is rendering. Every suspension
//! point stays responsive to cancellation: the inter-operation delay and
//! the paused wait sit on a condvar, and delivery to a full channel
//! re-checks for a cancel between bounded waits, so a cancelled worker
//! always exits within one step even when the consumer stopped draining.
//!
//! Delivery order is the emission order: single producer, single consumer,
//! one event at a time, never batched.

use crate::algorithm::Algorithm;
use crate::dataset::{self, Distribution, DEFAULT_SIZE};
use crate::error::Error;
use crate::lock::{recover, recover_lock};
use crate::stepper::{Operation, Stepper};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Capacity of the event channel between the worker and the render thread.
///
/// Bounded so a stalled renderer applies backpressure instead of letting
/// the worker run arbitrarily far ahead of what has been drawn.
const EVENT_QUEUE_DEPTH: usize = 256;

/// How long a worker blocked on a full channel waits between cancel
/// re-checks.
const SEND_RETRY_INTERVAL: Duration = Duration::from_millis(10);

/// Lifecycle of an animated run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run has started.
    Idle,
    /// The worker is delivering operations.
    Running,
    /// The worker is suspended between two operations.
    Paused,
    /// The run was stopped; terminal. The array keeps whatever prefix of
    /// operations was applied before the worker observed the cancel.
    Cancelled,
    /// The stepper was exhausted; terminal.
    Completed,
}

impl RunState {
    /// Whether the run can still make progress.
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Running | Self::Paused)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Paused => "paused",
            Self::Cancelled => "cancelled",
            Self::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Animation speed on the visualizer's 1..=200 slider scale.
///
/// The inter-operation delay is `201 - speed` milliseconds, so the delay
/// is always at least one millisecond and strictly decreases as the speed
/// rises. The current value is re-read before every delay, which is what
/// makes mid-run speed changes take effect immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speed(u8);

impl Speed {
    /// Slowest setting.
    pub const MIN: Speed = Speed(1);
    /// Fastest setting.
    pub const MAX: Speed = Speed(200);
    /// The slider's initial mid-range position.
    pub const DEFAULT: Speed = Speed(50);

    /// Creates a speed, clamping into `1..=200`.
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// The raw slider value.
    #[must_use]
    pub fn value(self) -> u8 {
        self.0
    }

    /// The delay inserted after each delivered operation.
    #[must_use]
    pub fn delay(self) -> Duration {
        Duration::from_millis(201 - u64::from(self.0))
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// One delivery to the render thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// An operation that has already been applied to the shared array.
    Op(Operation),
    /// The run state changed.
    State(RunState),
}

/// Callback surface consumed by the rendering layer.
///
/// [`RunHandle::forward_to`] drains the event channel into these
/// callbacks on the caller's thread, which is how the UI keeps all of its
/// drawing on one thread while the worker stays free of rendering
/// concerns.
pub trait Renderer {
    /// Two indices were compared.
    fn on_compare(&mut self, i: usize, j: usize) {
        let _ = (i, j);
    }
    /// Two indices were exchanged.
    fn on_swap(&mut self, i: usize, j: usize) {
        let _ = (i, j);
    }
    /// An index was overwritten with a new value.
    fn on_overwrite(&mut self, i: usize, value: i32) {
        let _ = (i, value);
    }
    /// The run state changed.
    fn on_state_change(&mut self, state: RunState) {
        let _ = state;
    }
    /// The run completed after the given wall-clock milliseconds.
    fn on_done(&mut self, elapsed_ms: f64) {
        let _ = elapsed_ms;
    }
}

/// State shared between the worker, the scheduler and run handles.
struct Shared {
    state: Mutex<RunState>,
    cond: Condvar,
    speed: AtomicU8,
    // Set by every cancel, even after the run reached a terminal state,
    // so a worker blocked delivering trailing events can still be told
    // to give up.
    abort: AtomicBool,
    data: Arc<Mutex<Vec<i32>>>,
}

impl Shared {
    fn new(data: Arc<Mutex<Vec<i32>>>, speed: Speed) -> Self {
        Self {
            state: Mutex::new(RunState::Running),
            cond: Condvar::new(),
            speed: AtomicU8::new(speed.value()),
            abort: AtomicBool::new(false),
            data,
        }
    }

    fn state(&self) -> RunState {
        *recover_lock(&self.state)
    }

    fn speed(&self) -> Speed {
        Speed::new(self.speed.load(Ordering::Relaxed))
    }

    /// Moves an active run to `Cancelled` and wakes the worker, wherever
    /// it is suspended.
    fn cancel(&self) {
        self.abort.store(true, Ordering::Release);
        let mut state = recover_lock(&self.state);
        if state.is_active() {
            *state = RunState::Cancelled;
        }
        self.cond.notify_all();
    }
}

/// Control and observation handle for one animated run.
///
/// The handle's event receiver is the single consumer of the run's
/// deliveries; keep it on the rendering thread and drain it promptly. A
/// worker blocked on a full channel is released by cancelling the run or
/// by dropping the handle.
pub struct RunHandle {
    shared: Arc<Shared>,
    events: Receiver<Event>,
}

impl RunHandle {
    /// Current run state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.shared.state()
    }

    /// Suspends delivery between two operations. No-op unless `Running`.
    pub fn pause(&self) {
        let mut state = recover_lock(&self.shared.state);
        if *state == RunState::Running {
            *state = RunState::Paused;
            self.shared.cond.notify_all();
        }
    }

    /// Resumes a paused run. No-op unless `Paused`.
    pub fn resume(&self) {
        let mut state = recover_lock(&self.shared.state);
        if *state == RunState::Paused {
            *state = RunState::Running;
            self.shared.cond.notify_all();
        }
    }

    /// Stops the run. The worker exits within one step; the array keeps
    /// exactly the operations delivered so far.
    pub fn cancel(&self) {
        self.shared.cancel();
    }

    /// Changes the animation speed; takes effect on the current delay.
    pub fn set_speed(&self, speed: Speed) {
        self.shared.speed.store(speed.value(), Ordering::Relaxed);
        // Wake a sleeping worker so the new delay applies immediately.
        self.shared.cond.notify_all();
    }

    /// The run's event channel.
    #[must_use]
    pub fn events(&self) -> &Receiver<Event> {
        &self.events
    }

    /// A copy of the shared array as of the last applied operation.
    ///
    /// The render thread reads values to redraw; only the worker mutates.
    #[must_use]
    pub fn snapshot(&self) -> Vec<i32> {
        recover_lock(&self.shared.data).clone()
    }

    /// Drains events into `renderer` until the run reaches a terminal
    /// state and the worker hangs up. Returns the terminal state.
    pub fn forward_to(&self, renderer: &mut dyn Renderer) -> RunState {
        while let Ok(event) = self.events.recv() {
            match event {
                Event::Op(Operation::Compare(i, j)) => renderer.on_compare(i, j),
                Event::Op(Operation::Swap(i, j)) => renderer.on_swap(i, j),
                Event::Op(Operation::Overwrite(i, value)) => renderer.on_overwrite(i, value),
                Event::Op(Operation::Done(elapsed_ms)) => renderer.on_done(elapsed_ms),
                Event::State(state) => renderer.on_state_change(state),
            }
        }
        self.state()
    }
}

/// Outcome of one gate check inside the worker loop.
enum Gate {
    Proceed,
    Exit,
}

/// Pacing loop for a single run, executed on the worker thread.
struct Worker {
    shared: Arc<Shared>,
    tx: SyncSender<Event>,
    started: Instant,
}

impl Worker {
    /// Delivers an event, treating a hung-up receiver as cancellation.
    ///
    /// A full channel is a suspension point like any other: the worker
    /// waits for the consumer to drain, but re-checks for a cancel on a
    /// bounded interval and drops the event instead of blocking a join
    /// forever behind a consumer that stopped reading.
    fn send(&self, event: Event) -> Gate {
        loop {
            match self.tx.try_send(event) {
                Ok(()) => return Gate::Proceed,
                Err(TrySendError::Disconnected(_)) => {
                    self.shared.cancel();
                    return Gate::Exit;
                }
                Err(TrySendError::Full(_)) => {
                    if self.shared.abort.load(Ordering::Acquire) {
                        return Gate::Exit;
                    }
                    let state = recover_lock(&self.shared.state);
                    let _ = recover_wait(
                        self.shared.cond.wait_timeout(state, SEND_RETRY_INTERVAL),
                    );
                }
            }
        }
    }

    /// Blocks while paused; announces pause/resume transitions. Returns
    /// `Exit` once cancellation is observed.
    fn wait_while_paused(&self) -> Gate {
        let observed = *recover_lock(&self.shared.state);
        match observed {
            RunState::Running => Gate::Proceed,
            RunState::Paused => {
                // Announce the pause without holding the state lock,
                // then sleep until the state moves on.
                if matches!(self.send(Event::State(RunState::Paused)), Gate::Exit) {
                    return Gate::Exit;
                }
                {
                    let mut state = recover_lock(&self.shared.state);
                    while *state == RunState::Paused {
                        state = recover(self.shared.cond.wait(state));
                    }
                    if *state != RunState::Running {
                        drop(state);
                        let _ = self.tx.try_send(Event::State(RunState::Cancelled));
                        return Gate::Exit;
                    }
                }
                self.send(Event::State(RunState::Running))
            }
            _ => {
                let _ = self.tx.try_send(Event::State(RunState::Cancelled));
                Gate::Exit
            }
        }
    }

    /// Serves the current speed's inter-operation delay, waking early on
    /// cancel, pause or a speed change.
    ///
    /// Time spent paused does not count toward the delay: the unserved
    /// remainder is carried across the pause, so the first operation
    /// after a resume keeps the same pacing gap as every other one.
    fn delay(&self) -> Gate {
        let mut served = Duration::ZERO;
        let mut state = recover_lock(&self.shared.state);
        loop {
            match *state {
                RunState::Cancelled => {
                    drop(state);
                    let _ = self.tx.try_send(Event::State(RunState::Cancelled));
                    return Gate::Exit;
                }
                RunState::Paused => {
                    drop(state);
                    if matches!(self.wait_while_paused(), Gate::Exit) {
                        return Gate::Exit;
                    }
                    state = recover_lock(&self.shared.state);
                    continue;
                }
                _ => {}
            }
            // Re-read on every wake so set_speed applies mid-sleep.
            let target = self.shared.speed().delay();
            if served >= target {
                return Gate::Proceed;
            }
            let leg = Instant::now();
            let (guard, _timeout) =
                recover_wait(self.shared.cond.wait_timeout(state, target - served));
            served += leg.elapsed();
            state = guard;
        }
    }

    /// Runs the step loop to a terminal state.
    fn run(self, mut stepper: Stepper) {
        if matches!(self.send(Event::State(RunState::Running)), Gate::Exit) {
            return;
        }

        loop {
            if matches!(self.wait_while_paused(), Gate::Exit) {
                return;
            }

            // Apply exactly one operation with the array lock held, then
            // release before delivering so the render thread can read.
            let op = {
                let mut data = recover_lock(&self.shared.data);
                stepper.advance(&mut data)
            };

            let Some(op) = op else {
                let elapsed_ms = self.started.elapsed().as_secs_f64() * 1_000.0;
                {
                    let mut state = recover_lock(&self.shared.state);
                    if *state == RunState::Cancelled {
                        drop(state);
                        let _ = self.tx.try_send(Event::State(RunState::Cancelled));
                        return;
                    }
                    *state = RunState::Completed;
                }
                if matches!(self.send(Event::State(RunState::Completed)), Gate::Exit) {
                    return;
                }
                let _ = self.send(Event::Op(Operation::Done(elapsed_ms)));
                tracing::debug!(elapsed_ms, "run completed");
                return;
            };

            if matches!(self.send(Event::Op(op)), Gate::Exit) {
                return;
            }

            if matches!(self.delay(), Gate::Exit) {
                return;
            }
        }
    }
}

/// Recovers a poisoned condvar wait result.
fn recover_wait<'a, T>(
    result: Result<
        (std::sync::MutexGuard<'a, T>, std::sync::WaitTimeoutResult),
        std::sync::PoisonError<(std::sync::MutexGuard<'a, T>, std::sync::WaitTimeoutResult)>,
    >,
) -> (std::sync::MutexGuard<'a, T>, std::sync::WaitTimeoutResult) {
    result.unwrap_or_else(|poison| {
        tracing::warn!("recovering from poisoned lock");
        poison.into_inner()
    })
}

/// Runs one animated sort at a time.
///
/// Starting a new run while one is active forces the prior run to
/// `Cancelled` and joins its worker before the new worker spawns, so two
/// step loops can never mutate the same array concurrently.
#[derive(Default)]
pub struct Scheduler {
    active: Option<ActiveRun>,
}

struct ActiveRun {
    shared: Arc<Shared>,
    worker: JoinHandle<()>,
}

impl Scheduler {
    /// Creates a scheduler with no active run.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts an animated run over `data`.
    ///
    /// The array is owned by the run context: only the worker mutates it,
    /// and the render thread reads it through [`RunHandle::snapshot`].
    pub fn start(
        &mut self,
        data: Arc<Mutex<Vec<i32>>>,
        algorithm: Algorithm,
        speed: Speed,
    ) -> RunHandle {
        self.cancel_active();

        let len = recover_lock(&data).len();
        let stepper = Stepper::new(algorithm, len);
        let shared = Arc::new(Shared::new(data, speed));
        let (tx, rx) = sync_channel(EVENT_QUEUE_DEPTH);

        tracing::debug!(%algorithm, len, speed = speed.value(), "starting run");
        let worker_shared = Arc::clone(&shared);
        let worker = thread::spawn(move || {
            Worker {
                shared: worker_shared,
                tx,
                started: Instant::now(),
            }
            .run(stepper);
        });

        self.active = Some(ActiveRun {
            shared: Arc::clone(&shared),
            worker,
        });

        RunHandle {
            shared,
            events: rx,
        }
    }

    /// State of the active run, if any.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.active
            .as_ref()
            .map_or(RunState::Idle, |run| run.shared.state())
    }

    /// Cancels the active run and waits for its worker to observe the
    /// cancellation and exit.
    pub fn cancel_active(&mut self) {
        if let Some(run) = self.active.take() {
            run.shared.cancel();
            if run.worker.join().is_err() {
                tracing::warn!("run worker panicked");
            }
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_active();
    }
}

/// Configuration surface and single-run front door for the engine.
///
/// Mirrors what a controller exposes to the user: distribution, array
/// size, speed, and exactly one selected algorithm, with a freshly
/// generated dataset per reset. Nothing is persisted across runs.
pub struct Engine {
    scheduler: Scheduler,
    data: Arc<Mutex<Vec<i32>>>,
    size: usize,
    mode: Distribution,
    speed: Speed,
    algorithm: Option<Algorithm>,
    seed: Option<u64>,
}

impl Engine {
    /// Creates an engine with the given dataset shape and generates the
    /// initial array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] when `size` is zero.
    pub fn new(size: usize, mode: Distribution, seed: Option<u64>) -> Result<Self, Error> {
        let data = dataset::generate(size, mode, seed)?;
        Ok(Self {
            scheduler: Scheduler::new(),
            data: Arc::new(Mutex::new(data)),
            size,
            mode,
            speed: Speed::DEFAULT,
            algorithm: None,
            seed,
        })
    }

    /// Creates an engine with the default size and a random dataset.
    ///
    /// # Errors
    ///
    /// Never fails in practice; kept fallible for uniformity with
    /// [`Engine::new`].
    pub fn with_defaults() -> Result<Self, Error> {
        Self::new(DEFAULT_SIZE, Distribution::Random, None)
    }

    /// Selects the algorithm for subsequent runs.
    pub fn select_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = Some(algorithm);
    }

    /// The currently selected algorithm.
    #[must_use]
    pub fn selected_algorithm(&self) -> Option<Algorithm> {
        self.algorithm
    }

    /// Sets the animation speed for subsequent runs.
    pub fn set_speed(&mut self, speed: Speed) {
        self.speed = speed;
    }

    /// A copy of the current array.
    #[must_use]
    pub fn snapshot(&self) -> Vec<i32> {
        recover_lock(&self.data).clone()
    }

    /// Starts an animated run over the current array.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoAlgorithmSelected`] when no algorithm has been
    /// selected; the prior state is left unchanged.
    pub fn start(&mut self) -> Result<RunHandle, Error> {
        let algorithm = self.algorithm.ok_or(Error::NoAlgorithmSelected)?;
        Ok(self
            .scheduler
            .start(Arc::clone(&self.data), algorithm, self.speed))
    }

    /// Cancels any active run and regenerates a fresh dataset, returning
    /// the engine to idle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSize`] if the configured size became zero
    /// via [`Engine::set_size`].
    pub fn reset(&mut self) -> Result<(), Error> {
        self.scheduler.cancel_active();
        let fresh = dataset::generate(self.size, self.mode, self.seed)?;
        *recover_lock(&self.data) = fresh;
        Ok(())
    }

    /// Sets the array size used by the next [`Engine::reset`].
    pub fn set_size(&mut self, size: usize) {
        self.size = size;
    }

    /// Sets the distribution used by the next [`Engine::reset`].
    pub fn set_mode(&mut self, mode: Distribution) {
        self.mode = mode;
    }
}
