//! `WorldClock`: background ticker over a shared world.

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, select};
use parking_lot::Mutex;
use tracing::{error, info, trace};

use fleet_core::Tick;
use fleet_world::WorldSim;

use crate::{ClockError, ClockResult, TickSignal};

/// What a `start`/`stop` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClockState {
    Started,
    AlreadyRunning,
    Stopped,
    NotRunning,
}

struct Running {
    shutdown: Sender<()>,
    thread:   JoinHandle<()>,
}

/// Advances a world at a fixed wall-clock period.
///
/// Dropping a running clock stops and joins its thread.
pub struct WorldClock<W: WorldSim> {
    world:   Arc<W>,
    period:  Duration,
    signal:  Arc<TickSignal>,
    running: Mutex<Option<Running>>,
}

impl<W: WorldSim> WorldClock<W> {
    pub fn new(world: Arc<W>, period: Duration) -> Self {
        Self {
            world,
            period,
            signal: Arc::new(TickSignal::new()),
            running: Mutex::new(None),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn signal(&self) -> Arc<TickSignal> {
        Arc::clone(&self.signal)
    }

    pub fn current_tick(&self) -> Tick {
        self.signal.current()
    }

    pub fn is_running(&self) -> bool {
        self.running.lock().is_some()
    }

    /// Start the background loop.  A second call while running is a no-op.
    pub fn start(&self) -> ClockResult<ClockState> {
        let mut running = self.running.lock();
        if running.is_some() {
            return Ok(ClockState::AlreadyRunning);
        }

        let (shutdown, shutdown_rx) = crossbeam_channel::bounded(1);
        let world = Arc::clone(&self.world);
        let signal = Arc::clone(&self.signal);
        let period = self.period;
        let thread = thread::Builder::new()
            .name("world-clock".into())
            .spawn(move || run_loop(&*world, &signal, period, &shutdown_rx))?;

        *running = Some(Running { shutdown, thread });
        info!(period_ms = period.as_millis() as u64, tick = %self.signal.current(), "clock started");
        Ok(ClockState::Started)
    }

    /// Stop the background loop and wait for it to exit.  A call while not
    /// running is a no-op.
    pub fn stop(&self) -> ClockState {
        let mut running = self.running.lock();
        let Some(Running { shutdown, thread }) = running.take() else {
            return ClockState::NotRunning;
        };
        // A full channel or a gone receiver both mean the loop is already
        // on its way out.
        let _ = shutdown.try_send(());
        drop(shutdown);
        if thread.join().is_err() {
            error!("clock thread panicked");
        }
        info!(tick = %self.signal.current(), "clock stopped");
        ClockState::Stopped
    }

    /// Advance exactly one tick on the calling thread.
    pub fn step(&self) -> ClockResult<Tick> {
        let running = self.running.lock();
        if running.is_some() {
            return Err(ClockError::Running);
        }
        // Holding the lock keeps `start` out until the step completes.
        let tick = advance_once(&*self.world, &self.signal);
        drop(running);
        Ok(tick)
    }

    /// `step` repeated `n` times.  Returns the last tick reached.
    pub fn step_n(&self, n: u64) -> ClockResult<Tick> {
        let mut tick = self.current_tick();
        for _ in 0..n {
            tick = self.step()?;
        }
        Ok(tick)
    }
}

impl<W: WorldSim> Drop for WorldClock<W> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn advance_once<W: WorldSim + ?Sized>(world: &W, signal: &TickSignal) -> Tick {
    world.advance();
    let tick = signal.current().next();
    signal.publish(tick);
    trace!(%tick, "tick");
    tick
}

fn run_loop<W: WorldSim + ?Sized>(
    world: &W,
    signal: &TickSignal,
    period: Duration,
    shutdown: &Receiver<()>,
) {
    let ticker = crossbeam_channel::tick(period);
    loop {
        select! {
            recv(shutdown) -> _ => break,
            recv(ticker) -> _ => {
                advance_once(world, signal);
            }
        }
    }
}
