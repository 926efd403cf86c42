//! Recording session doubles shared by the unit tests.

use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tracing::subscriber::DefaultGuard;

use crate::core::domain::transaction::{SessionRegistry, ToSql, TransactionError, TransactionHandle};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Begin,
    Commit,
    Rollback,
    Close,
    Reset,
    Execute(String),
}

/// Failures to inject, checked before the matching event is recorded.
#[derive(Debug, Default, Clone)]
pub struct Faults {
    pub begin: Option<TransactionError>,
    pub commit: Option<TransactionError>,
    pub rollback: Option<TransactionError>,
    pub execute: Option<TransactionError>,
}

#[derive(Debug, Default)]
struct Shared {
    events: Vec<Event>,
    faults: Faults,
}

pub struct RecordingSession {
    shared: Arc<Mutex<Shared>>,
    level: Mutex<usize>,
}

#[async_trait]
impl TransactionHandle for RecordingSession {
    async fn is_active(&self) -> bool {
        *self.level.lock().unwrap() > 0
    }

    async fn begin(&self) -> Result<(), TransactionError> {
        self.record(Event::Begin, |f| f.begin.clone())?;
        *self.level.lock().unwrap() += 1;
        Ok(())
    }

    async fn commit(&self) -> Result<(), TransactionError> {
        self.record(Event::Commit, |f| f.commit.clone())?;
        self.leave()
    }

    async fn rollback(&self) -> Result<(), TransactionError> {
        self.record(Event::Rollback, |f| f.rollback.clone())?;
        self.leave()
    }

    async fn close(&self) -> Result<(), TransactionError> {
        self.record(Event::Close, |_| None)?;
        *self.level.lock().unwrap() = 0;
        Ok(())
    }

    async fn execute(
        &self,
        query: &str,
        _params: Vec<Box<dyn ToSql>>,
    ) -> Result<(), TransactionError> {
        self.record(Event::Execute(query.to_string()), |f| f.execute.clone())
    }
}

impl RecordingSession {
    fn record(
        &self,
        event: Event,
        fault: impl FnOnce(&Faults) -> Option<TransactionError>,
    ) -> Result<(), TransactionError> {
        let mut shared = self.shared.lock().unwrap();
        if let Some(err) = fault(&shared.faults) {
            return Err(err);
        }
        shared.events.push(event);
        Ok(())
    }

    fn leave(&self) -> Result<(), TransactionError> {
        let mut level = self.level.lock().unwrap();
        if *level == 0 {
            return Err(TransactionError::NoActiveTransaction);
        }
        *level -= 1;
        Ok(())
    }
}

/// Registry over [`RecordingSession`]s. Every session it hands out shares one
/// event log.
pub struct RecordingRegistry {
    shared: Arc<Mutex<Shared>>,
    current: Mutex<Arc<RecordingSession>>,
}

impl RecordingRegistry {
    pub fn new() -> Arc<Self> {
        Self::with_level(0)
    }

    /// A registry whose current session already has an open transaction.
    /// The opening `begin` is not recorded.
    pub fn with_active_transaction() -> Arc<Self> {
        Self::with_level(1)
    }

    fn with_level(level: usize) -> Arc<Self> {
        let shared = Arc::new(Mutex::new(Shared::default()));
        let session = RecordingSession {
            shared: shared.clone(),
            level: Mutex::new(level),
        };
        Arc::new(Self {
            shared,
            current: Mutex::new(Arc::new(session)),
        })
    }

    pub fn inject(&self, faults: Faults) {
        self.shared.lock().unwrap().faults = faults;
    }

    pub fn events(&self) -> Vec<Event> {
        self.shared.lock().unwrap().events.clone()
    }

    pub fn current_level(&self) -> usize {
        let session = self.current.lock().unwrap().clone();
        let level = *session.level.lock().unwrap();
        level
    }
}

#[async_trait]
impl SessionRegistry for RecordingRegistry {
    async fn session(&self) -> Arc<dyn TransactionHandle> {
        let session: Arc<dyn TransactionHandle> = self.current.lock().unwrap().clone();
        session
    }

    async fn reset(&self) -> Result<(), TransactionError> {
        self.shared.lock().unwrap().events.push(Event::Reset);
        let fresh = RecordingSession {
            shared: self.shared.clone(),
            level: Mutex::new(0),
        };
        *self.current.lock().unwrap() = Arc::new(fresh);
        Ok(())
    }
}

/// Formatted `tracing` output collected for the current thread.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    /// Routes every event up to DEBUG into this buffer until the guard drops.
    pub fn install(&self) -> DefaultGuard {
        let logs = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || logs.clone())
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn lines(&self) -> Vec<String> {
        let text = String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned();
        text.lines().map(str::to_string).collect()
    }

    pub fn lines_at(&self, level: &str) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|line| line.trim_start().starts_with(level))
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
