// Console reporting. Status lines are best effort: a closed stdout is
// logged but never turns a finished upload into a failure.

use std::fmt;
use std::io::Write;
use std::path::Path;

use tracing::warn;

pub struct Reporter<W> {
    out: W,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Reporter { out }
    }

    /// Announce the upload. `size` is only known when the file was
    /// measured for the progress bar.
    pub fn sending(&mut self, path: &Path, size: Option<u64>, recipient: i64) {
        match size {
            Some(size) => self.line(format_args!(
                "Sending file {} ({} bytes) to user {}...",
                path.display(),
                size,
                recipient
            )),
            None => self.line(format_args!(
                "Sending file {} to user {}...",
                path.display(),
                recipient
            )),
        }
    }

    /// Move off the line the progress bar was drawn on.
    pub fn progress_done(&mut self) {
        self.line(format_args!(""));
    }

    pub fn sent(&mut self, message_id: i64) {
        self.line(format_args!(
            "File sent successfully! Message ID: {}",
            message_id
        ));
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, args: fmt::Arguments<'_>) {
        if let Err(e) = writeln!(self.out, "{}", args).and_then(|_| self.out.flush()) {
            warn!(error = %e, "Failed to write status line");
        }
    }
}
