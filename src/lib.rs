// Library root
// -----------
// This crate exposes the pieces of the uploader so the binary stays a
// thin shell and each step can be tested on its own.
//
// Module responsibilities:
// - `args`: command-line flags and their validation into an
//   `UploadRequest`.
// - `file`: opening the local file, its size and attachment name.
// - `progress`: the pass-through reader that drives the progress bar.
// - `api`: the Bot API client and the `DocumentSender` seam.
// - `report`: status lines printed to the console.
// - `upload`: the pipeline tying the steps together.
pub mod api;
pub mod args;
pub mod error;
pub mod file;
pub mod progress;
pub mod report;
pub mod upload;

pub use api::{Attachment, AttachmentContent, BotClient, DocumentSender};
pub use args::{Args, UploadRequest};
pub use error::{Error, Result};
pub use upload::{run, Mode};
