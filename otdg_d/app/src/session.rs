use crate::glove::{ContactBank, GloveError};
use crate::sampler::{self, SamplerSettings};
use common::{OrientationCell, RecognitionSink, SignDictionary};
use log::{error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

/// Cooperative cancellation for the sampling loop. The controller owns
/// the token and signals it; the loop checks it once per tick boundary.
#[derive(Debug, Clone, Default)]
pub struct StopToken {
    flag: Arc<AtomicBool>,
}

impl StopToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_stopped(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Arming,
    Sampling,
    Stopping,
    Closed,
}

struct Inner {
    state: SessionState,
    stop: Option<StopToken>,
    worker: Option<JoinHandle<()>>,
}

struct Shared {
    bank: Mutex<Box<dyn ContactBank>>,
    sink: Mutex<Box<dyn RecognitionSink>>,
    orientation: OrientationCell,
    dictionary: Arc<SignDictionary>,
    settings: SamplerSettings,
    inner: Mutex<Inner>,
}

/// Owns the sampling session lifecycle. One session at a time: `start`
/// arms the hardware and spawns the sampling thread, `request_stop`
/// signals the token, and the thread itself releases the hardware and
/// falls back to idle on its way out. `close` is the terminal shutdown
/// path.
#[derive(Clone)]
pub struct SessionController {
    shared: Arc<Shared>,
}

impl SessionController {
    pub fn new(
        bank: Box<dyn ContactBank>,
        sink: Box<dyn RecognitionSink>,
        orientation: OrientationCell,
        dictionary: Arc<SignDictionary>,
        settings: SamplerSettings,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                bank: Mutex::new(bank),
                sink: Mutex::new(sink),
                orientation,
                dictionary,
                settings,
                inner: Mutex::new(Inner {
                    state: SessionState::Idle,
                    stop: None,
                    worker: None,
                }),
            }),
        }
    }

    pub fn state(&self) -> SessionState {
        self.shared.inner.lock().unwrap().state
    }

    /// Starts a session. Returns `Ok(true)` when sampling was started,
    /// `Ok(false)` when a session is already active or stopping (the
    /// request is a no-op), and `Err` when the hardware could not be
    /// acquired.
    pub fn start(&self) -> Result<bool, GloveError> {
        let mut inner = self.shared.inner.lock().unwrap();
        match inner.state {
            SessionState::Idle => {}
            SessionState::Closed => {
                info!("session start ignored: controller is closed");
                return Ok(false);
            }
            state => {
                info!("session start ignored: already {:?}", state);
                return Ok(false);
            }
        }
        // The previous worker set the state back to Idle on its way out,
        // so joining here cannot block for a tick.
        if let Some(worker) = inner.worker.take() {
            let _ = worker.join();
        }

        inner.state = SessionState::Arming;
        if let Err(e) = self.shared.bank.lock().unwrap().acquire() {
            error!("hardware acquisition failed: {}", e);
            inner.state = SessionState::Idle;
            return Err(e);
        }

        let stop = StopToken::new();
        let shared = self.shared.clone();
        let worker_stop = stop.clone();
        let worker = thread::Builder::new()
            .name("sampler".to_string())
            .spawn(move || {
                sampler::run(
                    &shared.bank,
                    &shared.orientation,
                    &shared.dictionary,
                    &shared.sink,
                    &worker_stop,
                    &shared.settings,
                );
                shared.bank.lock().unwrap().release();
                let mut inner = shared.inner.lock().unwrap();
                if inner.state != SessionState::Closed {
                    inner.state = SessionState::Idle;
                }
                inner.stop = None;
            })
            .expect("failed to spawn sampler thread");

        inner.stop = Some(stop);
        inner.worker = Some(worker);
        inner.state = SessionState::Sampling;
        Ok(true)
    }

    /// Signals the sampling loop to exit at its next tick boundary. The
    /// loop releases the hardware itself; this never blocks on it.
    pub fn request_stop(&self) {
        let mut inner = self.shared.inner.lock().unwrap();
        if inner.state == SessionState::Sampling {
            inner.state = SessionState::Stopping;
            if let Some(stop) = &inner.stop {
                stop.stop();
            }
        }
    }

    /// Terminal shutdown: stops any active session, waits for the loop to
    /// exit, and releases the hardware. Release is idempotent, so it is
    /// safe when the loop already released on its way out. Further starts
    /// are refused.
    pub fn close(&self) {
        let worker = {
            let mut inner = self.shared.inner.lock().unwrap();
            if inner.state == SessionState::Sampling {
                inner.state = SessionState::Stopping;
            }
            if let Some(stop) = inner.stop.take() {
                stop.stop();
            }
            inner.worker.take()
        };
        if let Some(worker) = worker {
            let _ = worker.join();
        }
        self.shared.bank.lock().unwrap().release();
        self.shared.inner.lock().unwrap().state = SessionState::Closed;
        info!("session controller closed");
    }
}
