//! Pass-through reader that reports every chunk it hands out.
//!
//! `ProgressReader` sits between the file and the HTTP body. Bytes flow
//! through untouched; after each successful `read` the number of bytes
//! returned is tallied and forwarded to a [`ProgressSink`].

use std::io::{self, Read};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Receives the size of each chunk that passed through the reader.
pub trait ProgressSink {
    fn advance(&mut self, bytes: u64);

    /// Called once the wrapped reader reports end of stream.
    fn finish(&mut self) {}
}

impl ProgressSink for ProgressBar {
    fn advance(&mut self, bytes: u64) {
        self.inc(bytes);
    }

    fn finish(&mut self) {
        ProgressBar::finish(self);
    }
}

/// Byte tally for one stream. `read` never exceeds `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressState {
    total: u64,
    read: u64,
}

impl ProgressState {
    pub fn new(total: u64) -> Self {
        ProgressState { total, read: 0 }
    }

    pub fn read(&self) -> u64 {
        self.read
    }

    /// Add `bytes` to the tally, clamped at the total known up front.
    /// Returns how much was actually counted.
    fn record(&mut self, bytes: u64) -> u64 {
        let counted = bytes.min(self.total - self.read);
        self.read += counted;
        counted
    }
}

pub struct ProgressReader<R, S> {
    inner: R,
    sink: S,
    state: ProgressState,
    finished: bool,
}

impl<R: Read, S: ProgressSink> ProgressReader<R, S> {
    /// Wrap `inner`, which is expected to yield `total` bytes.
    pub fn new(inner: R, total: u64, sink: S) -> Self {
        ProgressReader {
            inner,
            sink,
            state: ProgressState::new(total),
            finished: false,
        }
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

impl<R: Read, S: ProgressSink> Read for ProgressReader<R, S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        if n == 0 {
            if !buf.is_empty() && !self.finished {
                self.finished = true;
                self.sink.finish();
            }
            return Ok(0);
        }

        let counted = self.state.record(n as u64);
        if counted > 0 {
            self.sink.advance(counted);
        }
        Ok(n)
    }
}

/// Byte-scaled bar used while a document is uploading.
pub fn upload_bar(total: u64, target: ProgressDrawTarget) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(total), target);
    pb.set_style(
        ProgressStyle::with_template(
            "{prefix} {percent:>3}% [{bar:40.cyan/blue}] ({bytes}/{total_bytes}, {binary_bytes_per_sec}) [{elapsed}:{eta}]",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-"),
    );
    pb.set_prefix("uploading");
    pb
}
