//! Response normalization
//!
//! Turns a raw CGI reply into a [`NormalizedResult`] or a normalized
//! [`CommandError`]. Image replies pass through untouched; status replies
//! are parsed as `CGI_Result` documents:
//!
//! ```text
//! <CGI_Result>
//!     <result>0</result>
//! </CGI_Result>
//! ```

use actuator_core::{CommandError, CommandResult, NormalizedResult};
use bytes::Bytes;
use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;
use tracing::{debug, error};

use crate::command::ResponseKind;
use crate::result_code::{ResultCode, UNKNOWN_ERROR};

/// Message for a status body that is not a well-formed document.
///
/// The wording is kept as-is for callers that match on it.
pub const PARSE_ERROR: &str = "JSON Parsing error with command response";

/// Message for a well-formed document without a `CGI_Result` root
pub const NO_CGI_RESULT: &str = "No CGI Result";

const ROOT_ELEMENT: &[u8] = b"CGI_Result";
const RESULT_ELEMENT: &[u8] = b"result";

/// Normalize a complete response body.
///
/// Exactly one of success or error comes back; parse failures never
/// escape as anything but [`CommandError::Protocol`].
pub fn normalize(kind: ResponseKind, body: Bytes) -> CommandResult<NormalizedResult> {
    match kind {
        ResponseKind::Binary => Ok(NormalizedResult::image_jpeg(body)),
        ResponseKind::Status => normalize_status(&body),
    }
}

fn normalize_status(body: &[u8]) -> CommandResult<NormalizedResult> {
    let document = match parse_status_document(body) {
        Ok(document) => document,
        Err(e) => {
            error!(error = %e, body = %String::from_utf8_lossy(body), "Failed to parse CGI response");
            return Err(CommandError::protocol(PARSE_ERROR));
        }
    };

    let Some(cgi_result) = document else {
        return Err(CommandError::protocol(NO_CGI_RESULT));
    };
    debug!(result = ?cgi_result.result, "Parsed CGI_Result");

    match cgi_result.result {
        Some(value) => {
            let code = ResultCode::from(value);
            if code.is_success() {
                Ok(NormalizedResult::text_plain(code.message()))
            } else {
                Err(CommandError::vendor(Some(value), code.message()))
            }
        }
        None => Err(CommandError::vendor(None, UNKNOWN_ERROR)),
    }
}

/// Contents of a `CGI_Result` root element
#[derive(Debug, Clone, PartialEq, Eq)]
struct CgiResult {
    /// `None` when `<result>` is missing or not an integer
    result: Option<i32>,
}

#[derive(Debug, Error)]
enum DocumentError {
    #[error("body is not UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::Error),

    #[error("element <{0}> is never closed")]
    Unclosed(String),

    #[error("closing tag without matching open tag")]
    UnexpectedEnd,

    #[error("more than one root element")]
    MultipleRoots,

    #[error("text outside the root element")]
    StrayText,
}

/// Parse a status body.
///
/// `Ok(None)` means the document is well formed but its root is not
/// `CGI_Result` (an empty body included).
fn parse_status_document(body: &[u8]) -> Result<Option<CgiResult>, DocumentError> {
    let text = std::str::from_utf8(body)?;
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut open: Vec<Vec<u8>> = Vec::new();
    let mut root: Option<Vec<u8>> = None;
    let mut result_text: Option<String> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = e.name().as_ref().to_vec();
                if open.is_empty() {
                    if root.is_some() {
                        return Err(DocumentError::MultipleRoots);
                    }
                    root = Some(name.clone());
                }
                open.push(name);
            }
            Event::Empty(e) => {
                if open.is_empty() {
                    if root.is_some() {
                        return Err(DocumentError::MultipleRoots);
                    }
                    root = Some(e.name().as_ref().to_vec());
                }
            }
            Event::End(_) => {
                if open.pop().is_none() {
                    return Err(DocumentError::UnexpectedEnd);
                }
            }
            Event::Text(t) => {
                let value = t.unescape()?;
                if open.is_empty() {
                    if !value.trim().is_empty() {
                        return Err(DocumentError::StrayText);
                    }
                } else if open.len() == 2 && open[0] == ROOT_ELEMENT && open[1] == RESULT_ELEMENT {
                    result_text = Some(value.trim().to_string());
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(name) = open.pop() {
        return Err(DocumentError::Unclosed(
            String::from_utf8_lossy(&name).into_owned(),
        ));
    }

    Ok(match root {
        Some(name) if name == ROOT_ELEMENT => Some(CgiResult {
            result: result_text.and_then(|s| s.parse().ok()),
        }),
        _ => None,
    })
}
