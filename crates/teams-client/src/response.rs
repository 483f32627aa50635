//! Response validation and decoding.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::diagnostics::DiagnosticSink;
use crate::error::{Error, Result};
use crate::transport::HttpResponse;

/// How unknown response fields are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecodeMode {
    /// Unknown fields are kept in `extra` and otherwise ignored.
    #[default]
    Lenient,
    /// Any unknown field fails the decode.
    Strict,
}

/// Response types that can report the fields they did not model.
pub trait StrictDecode: DeserializeOwned {
    /// Name reported in [`Error::UnknownFields`].
    const TYPE_NAME: &'static str;

    /// Append the dotted path of every unknown field, each prefixed with `prefix`.
    fn unknown_fields(&self, prefix: &str, out: &mut Vec<String>);
}

/// Fail unless the response carries exactly the expected status.
pub fn expect_status(response: &HttpResponse, expected: u16) -> Result<()> {
    if response.status == expected {
        return Ok(());
    }
    tracing::warn!(expected, actual = response.status, "unexpected response status");
    Err(Error::UnexpectedStatus {
        expected,
        actual: response.status,
    })
}

/// Decode a successful response body.
///
/// When `capture` is set the raw body is handed to `sink` first, so it is
/// available even if decoding fails.
pub fn decode<T: StrictDecode>(
    response: &HttpResponse,
    mode: DecodeMode,
    sink: &dyn DiagnosticSink,
    capture: bool,
) -> Result<T> {
    if capture {
        sink.capture(&response.body);
    }

    let value: T = serde_json::from_slice(&response.body).map_err(Error::Decode)?;

    if mode == DecodeMode::Strict {
        let mut fields = Vec::new();
        value.unknown_fields("", &mut fields);
        if !fields.is_empty() {
            return Err(Error::UnknownFields {
                type_name: T::TYPE_NAME,
                fields,
            });
        }
    }

    Ok(value)
}
