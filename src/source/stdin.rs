//! Stdin-based document source for piped input.
//!
//! A background thread reads stdin line by line and hands the text to the
//! UI thread over a channel, so polling never blocks the event loop. Data
//! keeps arriving for as long as the writer keeps the pipe open
//! (`tail -f log | vpager`).

use crate::model::error::InputError;
use std::io::{self, BufRead, BufReader, IsTerminal, Read};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use tracing::{debug, warn};

/// What the reader thread sends.
#[derive(Debug)]
enum Chunk {
    Text(String),
    Failed(io::Error),
}

/// Stdin source for piped input.
#[derive(Debug)]
pub struct StdinSource {
    rx: Receiver<Chunk>,
    complete: bool,
    /// Read failure held back until the text before it has been returned.
    failed: Option<io::Error>,
}

impl StdinSource {
    /// Start reading stdin.
    ///
    /// # Errors
    ///
    /// Returns `InputError::NoInput` if stdin is a TTY (interactive
    /// terminal); the pager would otherwise wait for the user to type.
    pub fn new() -> Result<Self, InputError> {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            return Err(InputError::NoInput);
        }
        Ok(Self::from_reader(stdin))
    }

    /// Start reading from any reader on a background thread.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut reader = BufReader::new(reader);
            let mut line = Vec::new();
            loop {
                line.clear();
                match reader.read_until(b'\n', &mut line) {
                    Ok(0) => break,
                    Ok(_) => {
                        let text = String::from_utf8_lossy(&line).into_owned();
                        if tx.send(Chunk::Text(text)).is_err() {
                            break;
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => {
                        let _ = tx.send(Chunk::Failed(e));
                        break;
                    }
                }
            }
            debug!("stdin reader finished");
        });
        Self {
            rx,
            complete: false,
            failed: None,
        }
    }

    /// Collect everything read since the last poll.
    ///
    /// Non-blocking. Returns `Ok(None)` when nothing new arrived. Marks the
    /// source complete once the reader thread has finished.
    ///
    /// # Errors
    ///
    /// Returns `InputError::Io` if reading stdin failed. Text received
    /// before the failure is returned first and the error by the poll after
    /// it.
    pub fn poll(&mut self) -> Result<Option<String>, InputError> {
        if let Some(e) = self.failed.take() {
            self.complete = true;
            return Err(InputError::Io(e));
        }
        let mut text = String::new();
        loop {
            match self.rx.try_recv() {
                Ok(Chunk::Text(chunk)) => text.push_str(&chunk),
                Ok(Chunk::Failed(e)) => {
                    warn!(error = %e, "stdin read failed");
                    if text.is_empty() {
                        self.complete = true;
                        return Err(InputError::Io(e));
                    }
                    self.failed = Some(e);
                    break;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.complete = true;
                    break;
                }
            }
        }
        Ok((!text.is_empty()).then_some(text))
    }

    /// Check if EOF has been reached (no more data will arrive).
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}
