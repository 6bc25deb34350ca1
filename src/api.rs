// Bot API client: a small blocking HTTP client that talks to the Telegram
// Bot API. Only the two methods the uploader needs are implemented:
// `getMe` to check the token and `sendDocument` to upload the file.

use std::io::Read;
use std::path::PathBuf;

use reqwest::blocking::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Environment variable overriding [`DEFAULT_API_URL`], e.g. for a
/// self-hosted Bot API server.
pub const API_URL_ENV: &str = "TELEGRAM_API_URL";

/// Where the document bytes come from.
pub enum AttachmentContent {
    /// A stream of exactly `length` bytes.
    Reader {
        reader: Box<dyn Read + Send>,
        length: u64,
    },
    /// A path the sender opens itself.
    Path(PathBuf),
}

/// A document as it will appear in the chat.
pub struct Attachment {
    pub name: String,
    pub content: AttachmentContent,
}

impl Attachment {
    pub fn from_reader<R>(name: impl Into<String>, reader: R, length: u64) -> Self
    where
        R: Read + Send + 'static,
    {
        Attachment {
            name: name.into(),
            content: AttachmentContent::Reader {
                reader: Box::new(reader),
                length,
            },
        }
    }

    pub fn from_path(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Attachment {
            name: name.into(),
            content: AttachmentContent::Path(path.into()),
        }
    }
}

/// Anything that can deliver a document to a chat and report the id of
/// the resulting message.
pub trait DocumentSender {
    fn send_document(
        &self,
        chat_id: i64,
        attachment: Attachment,
        caption: Option<&str>,
    ) -> Result<i64>;
}

impl<T: DocumentSender + ?Sized> DocumentSender for &T {
    fn send_document(
        &self,
        chat_id: i64,
        attachment: Attachment,
        caption: Option<&str>,
    ) -> Result<i64> {
        (**self).send_document(chat_id, attachment, caption)
    }
}

/// Envelope every Bot API method replies with.
#[derive(Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    /// Unwrap the result or describe why the platform refused the call.
    fn into_result(self) -> std::result::Result<T, String> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err("response is missing a result".to_string()),
            (false, _) => {
                let description = self.description.unwrap_or_else(|| "unknown error".into());
                Err(match self.error_code {
                    Some(code) => format!("{description} (error code {code})"),
                    None => description,
                })
            }
        }
    }
}

/// The bot account behind a token, as returned by `getMe`.
#[derive(Deserialize, Debug, Clone)]
pub struct BotUser {
    pub id: i64,
    pub first_name: String,
    pub username: Option<String>,
}

/// The part of a sent `Message` the uploader cares about.
#[derive(Deserialize, Debug)]
pub struct Message {
    pub message_id: i64,
}

/// Blocking Bot API client bound to one token.
pub struct BotClient {
    client: Client,
    base_url: String,
    token: String,
    me: BotUser,
}

impl BotClient {
    /// Connect using the base URL from `TELEGRAM_API_URL`, or the public
    /// Bot API when unset.
    pub fn from_env(token: &str) -> Result<Self> {
        let base_url = std::env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_API_URL.into());
        Self::connect_with_base_url(token, &base_url)
    }

    /// Build the HTTP client and verify the token with `getMe`.
    pub fn connect_with_base_url(token: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(None)
            .build()
            .map_err(|e| Error::AuthInit(format!("failed to build HTTP client: {e}")))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        let res = client
            .get(format!("{base_url}/bot{token}/getMe"))
            .send()
            .map_err(|e| Error::AuthInit(redact(e)))?;
        let me = decode::<BotUser>(res).map_err(Error::AuthInit)?;

        let bot = BotClient {
            client,
            base_url,
            token: token.to_string(),
            me,
        };

        info!(
            bot_id = bot.me.id,
            username = bot.me.username.as_deref().unwrap_or(""),
            "Authorized bot"
        );
        Ok(bot)
    }

    /// The account the token belongs to.
    pub fn me(&self) -> &BotUser {
        &self.me
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }
}

impl DocumentSender for BotClient {
    fn send_document(
        &self,
        chat_id: i64,
        attachment: Attachment,
        caption: Option<&str>,
    ) -> Result<i64> {
        let part = match attachment.content {
            AttachmentContent::Reader { reader, length } => {
                multipart::Part::reader_with_length(reader, length)
            }
            AttachmentContent::Path(path) => multipart::Part::file(&path).map_err(|e| {
                Error::RemoteSend(format!("failed to read {}: {e}", path.display()))
            })?,
        }
        .file_name(attachment.name.clone());

        let mut form = multipart::Form::new().text("chat_id", chat_id.to_string());
        if let Some(caption) = caption {
            form = form.text("caption", caption.to_string());
        }
        let form = form.part("document", part);

        debug!(chat_id, name = %attachment.name, "Sending document");
        let res = self
            .client
            .post(self.method_url("sendDocument"))
            .multipart(form)
            .send()
            .map_err(|e| Error::RemoteSend(redact(e)))?;

        let message = decode::<Message>(res).map_err(Error::RemoteSend)?;
        info!(chat_id, message_id = message.message_id, "Document sent");
        Ok(message.message_id)
    }
}

/// reqwest puts the request URL, and with it the token, into its error
/// messages.
fn redact(err: reqwest::Error) -> String {
    err.without_url().to_string()
}

/// Parse a Bot API reply. The API answers with the JSON envelope even
/// on 4xx, so the body is read regardless of status.
fn decode<T: DeserializeOwned>(res: Response) -> std::result::Result<T, String> {
    let status = res.status();
    let text = res.text().unwrap_or_default();
    match serde_json::from_str::<ApiResponse<T>>(&text) {
        Ok(envelope) => envelope.into_result(),
        Err(_) if !status.is_success() => Err(format!("{status} - {text}")),
        Err(e) => Err(format!("unexpected response: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_ok() {
        let env: ApiResponse<Message> =
            serde_json::from_str(r#"{"ok":true,"result":{"message_id":42,"date":0}}"#).unwrap();
        assert_eq!(env.into_result().unwrap().message_id, 42);
    }

    #[test]
    fn test_envelope_error_includes_code() {
        let env: ApiResponse<Message> = serde_json::from_str(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        )
        .unwrap();
        let err = env.into_result().unwrap_err();
        assert!(err.contains("chat not found"));
        assert!(err.contains("400"));
    }

    #[test]
    fn test_envelope_ok_without_result() {
        let env: ApiResponse<Message> = serde_json::from_str(r#"{"ok":true}"#).unwrap();
        assert!(env.into_result().is_err());
    }

    #[test]
    fn test_bot_user_optional_username() {
        let user: BotUser =
            serde_json::from_str(r#"{"id":1,"is_bot":true,"first_name":"Uploader"}"#).unwrap();
        assert_eq!(user.first_name, "Uploader");
        assert!(user.username.is_none());
    }

    #[test]
    fn test_attachment_constructors() {
        let a = Attachment::from_path("report.pdf", "/a/b/report.pdf");
        assert_eq!(a.name, "report.pdf");
        assert!(matches!(a.content, AttachmentContent::Path(ref p) if p.ends_with("report.pdf")));

        let b = Attachment::from_reader("notes.txt", std::io::Cursor::new(vec![1u8, 2, 3]), 3);
        assert!(matches!(b.content, AttachmentContent::Reader { length: 3, .. }));
    }
}
