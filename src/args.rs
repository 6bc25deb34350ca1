use std::path::PathBuf;

use clap::Parser;

use crate::error::{Error, Result};

/// Send a local file to a Telegram user or chat as a document.
// The required flags default to empty values so a missing flag is
// reported the same way as an empty one.
#[derive(Parser, Debug, Default)]
#[command(author, version, long_about = None)]
pub struct Args {
    /// Telegram bot token.
    #[arg(long, default_value = "")]
    pub token: String,

    /// Target user ID (chat ID).
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub user: i64,

    /// Path to the file to send.
    #[arg(long, default_value = "")]
    pub file: String,

    /// Optional caption attached to the document.
    #[arg(long)]
    pub caption: Option<String>,

    /// Hand the path to the uploader directly and skip the progress bar.
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

/// Validated input for one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub token: String,
    pub recipient_id: i64,
    pub file_path: PathBuf,
    pub caption: Option<String>,
}

impl Args {
    /// Checks that token, user and file are all set, in that order.
    pub fn validate(self) -> Result<UploadRequest> {
        if self.token.is_empty() {
            return Err(Error::MissingArgument("token"));
        }
        if self.user == 0 {
            return Err(Error::MissingArgument("user"));
        }
        if self.file.is_empty() {
            return Err(Error::MissingArgument("file"));
        }

        Ok(UploadRequest {
            token: self.token,
            recipient_id: self.user,
            file_path: PathBuf::from(self.file),
            caption: self.caption.filter(|c| !c.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("tg-sendfile").chain(argv.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_all_flags_present() {
        let req = parse(&["--token", "123:abc", "--user", "12345", "--file", "notes.txt"])
            .validate()
            .unwrap();
        assert_eq!(req.token, "123:abc");
        assert_eq!(req.recipient_id, 12345);
        assert_eq!(req.file_path, PathBuf::from("notes.txt"));
        assert_eq!(req.caption, None);
    }

    #[test]
    fn test_missing_flags_report_first_absent() {
        let cases: [(&[&str], &str); 7] = [
            (&[], "token"),
            (&["--user", "1", "--file", "f"], "token"),
            (&["--token", "t", "--file", "f"], "user"),
            (&["--token", "t", "--user", "1"], "file"),
            (&["--token", "", "--user", "1", "--file", "f"], "token"),
            (&["--token", "t", "--user", "0", "--file", "f"], "user"),
            (&["--token", "t", "--user", "1", "--file", ""], "file"),
        ];

        for (argv, flag) in cases {
            match parse(argv).validate() {
                Err(Error::MissingArgument(name)) => assert_eq!(name, flag, "argv: {argv:?}"),
                other => panic!("expected missing --{flag} for {argv:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_negative_chat_id_is_accepted() {
        let req = parse(&["--token", "t", "--user", "-1001234567890", "--file", "f"])
            .validate()
            .unwrap();
        assert_eq!(req.recipient_id, -1001234567890);
    }

    #[test]
    fn test_non_numeric_user_is_rejected_by_parser() {
        let res = Args::try_parse_from(["tg-sendfile", "--token", "t", "--user", "abc"]);
        assert!(res.is_err());
    }

    #[test]
    fn test_optional_flags() {
        let args = parse(&[
            "--token", "t", "--user", "7", "--file", "a.bin", "--caption", "weekly report",
            "--no-progress",
        ]);
        assert!(args.no_progress);
        let req = args.validate().unwrap();
        assert_eq!(req.caption.as_deref(), Some("weekly report"));
    }

    #[test]
    fn test_help_uses_command_description() {
        use clap::CommandFactory;

        let help = Args::command().render_help().to_string();
        assert!(help.contains("Send a local file to a Telegram user or chat as a document."));
        assert!(help.contains("--token"));
        assert!(!help.contains("reported the same way"));
    }

    #[test]
    fn test_empty_caption_is_dropped() {
        let req = parse(&["--token", "t", "--user", "7", "--file", "a", "--caption", ""])
            .validate()
            .unwrap();
        assert_eq!(req.caption, None);
    }
}
