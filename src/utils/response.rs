use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use std::io;

/// Normalized response produced exactly once per invocation
///
/// Shape:
/// ```json
/// {
///   "statusCode": 200,
///   "body": "{\"message\": \"PagerDuty incident created\"}"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessorResponse {
    pub status_code: u16,
    /// JSON document with a single `message` field, kept as a string
    pub body: String,
}

/// Body document carried inside [`ProcessorResponse::body`]
#[derive(Debug, Serialize, Deserialize)]
struct MessageBody {
    message: String,
}

impl ProcessorResponse {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        let body = MessageBody {
            message: message.into(),
        };

        Self {
            status_code,
            body: encode_body(&body).unwrap_or_default(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(200, message)
    }

    /// Decode the `message` field back out of the body
    pub fn message(&self) -> Option<String> {
        serde_json::from_str::<MessageBody>(&self.body)
            .ok()
            .map(|b| b.message)
    }
}

/// Body encoding: `", "` and `": "` separators, and every character outside
/// printable ASCII escaped as `\uXXXX`.
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        for c in fragment.chars() {
            if matches!(c, ' '..='~') {
                writer.write_all(&[c as u8])?;
            } else {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn encode_body(body: &MessageBody) -> Result<String, serde_json::Error> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, AsciiFormatter);
    body.serialize(&mut ser)?;

    // Output is pure ASCII.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// HTTP status mirrors `status_code`; the JSON body is the response itself
impl IntoResponse for ProcessorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self)).into_response()
    }
}
