//! Output formatting for foscam-cli (text, json)

use actuator_core::{CommandResponse, Content};
use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tabled::{Table, Tabled};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable status lines and tables (default)
    #[default]
    Text,
    /// JSON format
    Json,
}

/// Context for output rendering
pub struct OutputContext {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl OutputContext {
    pub fn new(format: OutputFormat, no_color: bool, quiet: bool) -> Self {
        if no_color {
            colored::control::set_override(false);
        }
        Self { format, quiet }
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Print a success message (unless in quiet mode)
    pub fn success(&self, msg: &str) {
        if !self.quiet {
            println!("{}", msg.green());
        }
    }

    /// Print an error message
    pub fn error(&self, msg: &str) {
        eprintln!("{}", msg.red());
    }

    /// Print rows in the configured format
    pub fn print<T: Tabled + Serialize>(&self, data: &[T]) {
        match self.format {
            OutputFormat::Text => {
                if data.is_empty() {
                    if !self.quiet {
                        println!("No data");
                    }
                } else {
                    println!("{}", Table::new(data));
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(data).unwrap_or_else(|_| "[]".to_string())
                );
            }
        }
    }

    /// Print key-value pairs (for info command)
    pub fn print_kv(&self, pairs: &[(&str, String)]) {
        match self.format {
            OutputFormat::Text => {
                for (key, value) in pairs {
                    println!("{}: {}", key.bold(), value);
                }
            }
            OutputFormat::Json => {
                let map: serde_json::Map<String, Value> = pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), Value::String(v.clone())))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&map).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
    }

    /// Print a command's completion pair as JSON
    pub fn print_response(&self, response: &CommandResponse) {
        println!(
            "{}",
            serde_json::to_string_pretty(&response_json(response))
                .unwrap_or_else(|_| "{}".to_string())
        );
    }
}

/// JSON view of a completion pair. Binary content is reported by length only.
pub fn response_json(response: &CommandResponse) -> Value {
    let result = response.result.as_ref().map(|result| {
        let content = match &result.content {
            Content::Text(text) => Value::String(text.clone()),
            Content::Binary(bytes) => json!({ "bytes": bytes.len() }),
        };
        json!({ "contentType": result.content_type, "content": content })
    });

    json!({
        "error": response.error,
        "result": result,
    })
}

// =============================================================================
// Display types for various commands
// =============================================================================

/// Command display for the commands command
#[derive(Debug, Tabled, Serialize)]
pub struct CommandRow {
    #[tabled(rename = "Command")]
    pub command: String,
    #[tabled(rename = "CGI cmd")]
    pub vendor_token: String,
    #[tabled(rename = "Response")]
    pub response: String,
    #[tabled(rename = "Extra query")]
    pub extra_query: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use actuator_core::{NormalizedResult, RpcError};
    use bytes::Bytes;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_binary_content_reported_by_length() {
        let response = CommandResponse::success(NormalizedResult::image_jpeg(
            Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xD9]),
        ));
        assert_eq!(
            response_json(&response),
            json!({
                "error": null,
                "result": { "contentType": "image/jpeg", "content": { "bytes": 4 } }
            })
        );
    }

    #[test]
    fn test_text_and_error_responses() {
        let ok = CommandResponse::success(NormalizedResult::text_plain("Success"));
        assert_eq!(response_json(&ok)["result"]["content"], "Success");

        let failed = CommandResponse::failure(RpcError::new("Access deny"));
        assert_eq!(
            response_json(&failed),
            json!({
                "error": { "code": -32000, "message": "Access deny" },
                "result": null
            })
        );
    }
}
