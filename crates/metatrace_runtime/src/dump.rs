//! Trace dump serialization using `MessagePack`.
//!
//! A dump is the produced frames plus the terminal outcome; replaying one
//! drives a session through the exact event sequence the original engine
//! reported, with no engine attached.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use metatrace_debug::DebugSession;
use metatrace_foundation::{Error, ErrorKind, Frame, Outcome, Result};
use metatrace_trace::ScriptedSource;
use serde::{Deserialize, Serialize};

/// A complete recorded trace, replayable offline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceDump {
    frames: Vec<Frame>,
    outcome: Outcome,
}

impl TraceDump {
    /// Captures the session's full trace.
    ///
    /// The caller must have driven evaluation to its end first (see
    /// [`DebugSession::complete_trace`]); only retained frames can be saved.
    ///
    /// # Errors
    ///
    /// Returns a trace-dump error if caching is disabled (the trace was not
    /// retained) or evaluation has not terminated.
    pub fn capture(session: &DebugSession) -> Result<Self> {
        let store = session.store();
        if !store.caching_enabled() {
            return Err(Error::new(ErrorKind::TraceDump(
                "caching is disabled; the trace was not retained".to_string(),
            )));
        }
        let outcome = store.outcome().cloned().ok_or_else(|| {
            Error::new(ErrorKind::TraceDump(
                "evaluation has not terminated yet".to_string(),
            ))
        })?;

        let mut frames = Vec::with_capacity(store.len());
        for position in 0..store.len() {
            frames.push(store.get(position)?.clone());
        }
        Ok(Self { frames, outcome })
    }

    /// The number of recorded frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if the dump holds no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The recorded terminal outcome.
    #[must_use]
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// An event source that replays this dump.
    #[must_use]
    pub fn replay_source(&self) -> ScriptedSource {
        ScriptedSource::from_events(self.frames.iter().cloned(), self.outcome.clone())
    }

    /// Serializes the dump to `MessagePack` bytes.
    ///
    /// Uses named serialization to preserve struct field names.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec_named(self)
            .map_err(|e| Error::new(ErrorKind::TraceDump(e.to_string())))
    }

    /// Deserializes a dump from `MessagePack` bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes)
            .map_err(|e| Error::new(ErrorKind::TraceDump(e.to_string())))
    }

    /// Saves the dump to a file, creating or overwriting it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written to, or if
    /// serialization fails.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref()).map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to create file '{}': {e}",
                path.as_ref().display()
            )))
        })?;

        let mut writer = BufWriter::new(file);
        let bytes = self.to_bytes()?;

        writer.write_all(&bytes).map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to write to file '{}': {e}",
                path.as_ref().display()
            )))
        })?;

        writer.flush().map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to flush file '{}': {e}",
                path.as_ref().display()
            )))
        })
    }

    /// Loads a dump from a `MessagePack` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if deserialization
    /// fails.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to open file '{}': {e}",
                path.as_ref().display()
            )))
        })?;

        let mut reader = BufReader::new(file);
        let mut bytes = Vec::new();

        reader.read_to_end(&mut bytes).map_err(|e| {
            Error::new(ErrorKind::Io(format!(
                "failed to read file '{}': {e}",
                path.as_ref().display()
            )))
        })?;

        Self::from_bytes(&bytes)
    }
}
