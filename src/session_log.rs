//! Session log: engine events as line-delimited JSON.
//!
//! Each record is one JSON object per line:
//!
//! ```text
//! {"event":"spawned","ts_ms":16,"kind":"t","design":"purple","x":4}
//! {"event":"lines_cleared","ts_ms":5120,"count":2,"score":200}
//! {"event":"game_over","ts_ms":90311,"score":1200,"lines":12}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::SessionEvent;

/// Wire form of a [`SessionEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventRecord {
    Started { ts_ms: u64, seed: u32 },
    Spawned {
        ts_ms: u64,
        kind: &'static str,
        design: &'static str,
        x: i8,
    },
    LinesCleared { ts_ms: u64, count: u32, score: u32 },
    GameOver { ts_ms: u64, score: u32, lines: u32 },
}

impl EventRecord {
    pub fn from_event(event: SessionEvent, ts_ms: u64) -> Self {
        match event {
            SessionEvent::Spawned { kind, x } => EventRecord::Spawned {
                ts_ms,
                kind: kind.as_str(),
                design: kind.design().name(),
                x,
            },
            SessionEvent::LinesCleared { count, score } => {
                EventRecord::LinesCleared { ts_ms, count, score }
            }
            SessionEvent::GameOver { score, lines } => EventRecord::GameOver { ts_ms, score, lines },
        }
    }
}

/// Appends records to a file, one per line.
///
/// After the first write error the log disables itself; the game keeps running.
pub struct SessionLog<W: Write = BufWriter<File>> {
    out: Option<W>,
    buf: Vec<u8>,
}

impl SessionLog {
    /// Open (or create) `path` for appending.
    pub fn open(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening session log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> SessionLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Some(out),
            buf: Vec::with_capacity(256),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.out.is_some()
    }

    pub fn record(&mut self, record: &EventRecord) {
        let Some(out) = self.out.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, record).is_err() {
            return;
        }
        self.buf.push(b'\n');
        if out.write_all(&self.buf).is_err() {
            self.out = None;
        }
    }

    pub fn record_event(&mut self, event: SessionEvent, ts_ms: u64) {
        self.record(&EventRecord::from_event(event, ts_ms));
    }

    pub fn flush(&mut self) {
        if let Some(out) = self.out.as_mut() {
            if out.flush().is_err() {
                self.out = None;
            }
        }
    }

    /// Give back the writer (tests inspect what was written).
    pub fn into_inner(mut self) -> Option<W> {
        self.flush();
        self.out.take()
    }
}
