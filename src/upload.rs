//! The upload pipeline.
//!
//! Runs the steps of one upload in a fixed order: open the file, connect
//! the sender, announce, stream, report. Any step failing ends the run;
//! nothing is retried. The sender is produced by a caller-supplied
//! connector so the pipeline runs the same against the real Bot API and
//! against a test double.

use std::io::Write;

use indicatif::ProgressDrawTarget;
use tracing::debug;

use crate::api::{Attachment, DocumentSender};
use crate::args::UploadRequest;
use crate::error::Result;
use crate::file::LocalFile;
use crate::progress::{upload_bar, ProgressReader};
use crate::report::Reporter;

/// How the file reaches the sender.
pub enum Mode {
    /// Stream through a [`ProgressReader`] and draw a bar on `target`.
    Progress(ProgressDrawTarget),
    /// Hand the path to the sender, no feedback while uploading.
    Plain,
}

/// Upload `request.file_path` to `request.recipient_id` and return the
/// id of the message that carries it.
pub fn run<S, C, W>(request: &UploadRequest, mode: Mode, connect: C, out: W) -> Result<i64>
where
    S: DocumentSender,
    C: FnOnce(&str) -> Result<S>,
    W: Write,
{
    let mut reporter = Reporter::new(out);

    let file = LocalFile::open(&request.file_path)?;
    let sender = connect(&request.token)?;
    let caption = request.caption.as_deref();

    let message_id = match mode {
        Mode::Progress(target) => {
            let size = file.size();
            reporter.sending(file.path(), Some(size), request.recipient_id);

            let bar = upload_bar(size, target);
            let name = file.name().to_string();
            let reader = ProgressReader::new(file.into_file(), size, bar.clone());
            let attachment = Attachment::from_reader(name, reader, size);

            let result = sender.send_document(request.recipient_id, attachment, caption);
            match &result {
                Ok(_) => bar.finish(),
                Err(_) => bar.abandon(),
            }
            reporter.progress_done();
            result?
        }
        Mode::Plain => {
            reporter.sending(file.path(), None, request.recipient_id);

            let attachment = Attachment::from_path(file.name(), file.path());
            // The sender reopens the path itself.
            drop(file);
            sender.send_document(request.recipient_id, attachment, caption)?
        }
    };

    debug!(message_id, "Upload finished");
    reporter.sent(message_id);
    Ok(message_id)
}
