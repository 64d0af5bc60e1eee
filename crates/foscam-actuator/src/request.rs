//! CGI request construction

use reqwest::Method;
use url::form_urlencoded;

use crate::command::{Command, ResponseKind};
use crate::config::Protocol;
use crate::credentials::Credentials;

/// How the response body is to be treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Keep raw bytes, never decode
    Binary,
    /// Body is a text document
    Text,
}

impl From<ResponseKind> for Encoding {
    fn from(kind: ResponseKind) -> Self {
        match kind {
            ResponseKind::Binary => Encoding::Binary,
            ResponseKind::Status => Encoding::Text,
        }
    }
}

/// A fully formed CGI request. Built fresh for every invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Absolute URL. Not validated; a bad address fails in the transport.
    pub url: String,
    pub encoding: Encoding,
}

impl RequestDescriptor {
    /// The URL with the `pwd` value masked, for logging
    pub fn redacted_url(&self) -> String {
        let Some((base, query)) = self.url.split_once('?') else {
            return self.url.clone();
        };
        let query: Vec<&str> = query
            .split('&')
            .map(|pair| if pair.starts_with("pwd=") { "pwd=***" } else { pair })
            .collect();
        format!("{}?{}", base, query.join("&"))
    }

    /// Value of a query parameter, as sent
    pub fn query_param(&self, name: &str) -> Option<&str> {
        let (_, query) = self.url.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }
}

/// Compose the request for `command` against `address`.
///
/// Produces
/// `<protocol>://<address>/<cgi_path>?cmd=<token>&usr=<user>&pwd=<pass>[&<extra>]`.
/// Credentials are form-encoded; the command's extra query is appended as is.
pub fn build_request(
    protocol: Protocol,
    cgi_path: &str,
    address: &str,
    credentials: &Credentials,
    command: Command,
) -> RequestDescriptor {
    let (token, kind) = command.resolve();

    let mut query = format!(
        "cmd={}&usr={}&pwd={}",
        token,
        encode(&credentials.user),
        encode(&credentials.password)
    );
    if let Some(extra) = command.extra_query() {
        query.push('&');
        query.push_str(extra);
    }

    let url = format!(
        "{}://{}/{}?{}",
        protocol.scheme(),
        address,
        cgi_path.trim_start_matches('/'),
        query
    );

    RequestDescriptor {
        method: Method::GET,
        url,
        encoding: kind.into(),
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}
