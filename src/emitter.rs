//! NDJSON export and import of merged traces.
//!
//! Each line holds one [`TraceEvent`] object tagged with its kind:
//! ```json
//! {"kind":"symbol","step":1,"symbol":"a","from_states":[0,2],"to_states":[0,1],"accepted":true}
//! {"kind":"epsilon","step":1,"from_states":[0,1],"to_states":[0,1,2],"accepted":true}
//! ```

use crate::error::{Error, ReplayError};
use crate::trace::TraceEvent;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Writes trace events as newline-delimited JSON.
pub struct TraceEmitter<W: Write> {
    writer: W,
    count: usize,
}

impl TraceEmitter<BufWriter<File>> {
    /// Create an emitter writing to a new file at `path`.
    pub fn create(path: &Path) -> Result<Self, Error> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> TraceEmitter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }

    /// Write one event as a single line.
    pub fn emit(&mut self, event: &TraceEvent) -> Result<(), Error> {
        serde_json::to_writer(&mut self.writer, event)?;
        self.writer.write_all(b"\n")?;
        self.count += 1;
        Ok(())
    }

    pub fn emit_all<'a>(
        &mut self,
        events: impl IntoIterator<Item = &'a TraceEvent>,
    ) -> Result<(), Error> {
        for event in events {
            self.emit(event)?;
        }
        Ok(())
    }

    /// Flush buffered output and return the number of events emitted.
    pub fn finish(mut self) -> Result<usize, Error> {
        self.writer.flush()?;
        Ok(self.count)
    }

    /// Get the number of events emitted so far.
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Parse NDJSON trace events. Blank lines are skipped.
pub fn read_trace<R: BufRead>(reader: R) -> Result<Vec<TraceEvent>, Error> {
    let mut events = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let event = serde_json::from_str(line).map_err(|e| ReplayError::InvalidJson {
            line: i + 1,
            reason: e.to_string(),
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Load NDJSON trace events from a file.
pub fn load_trace(path: &Path) -> Result<Vec<TraceEvent>, Error> {
    read_trace(BufReader::new(File::open(path)?))
}
