//! Command table: abstract command name to vendor token and response kind

use std::fmt;
use std::str::FromStr;

use actuator_core::CommandError;

/// Shape of the reply a command produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Raw image bytes
    Binary,
    /// `CGI_Result` status document
    Status,
}

/// Commands a Foscam camera accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    SnapPicture,
    GotoPresetDefault,
    ResetPosition,
    Reboot,
}

impl Command {
    pub const ALL: [Command; 4] = [
        Command::SnapPicture,
        Command::GotoPresetDefault,
        Command::ResetPosition,
        Command::Reboot,
    ];

    /// Abstract name used by callers
    pub fn name(&self) -> &'static str {
        match self {
            Command::SnapPicture => "snapPicture",
            Command::GotoPresetDefault => "gotoPresetDefault",
            Command::ResetPosition => "resetPosition",
            Command::Reboot => "reboot",
        }
    }

    /// Value of the `cmd` query parameter
    pub fn vendor_token(&self) -> &'static str {
        match self {
            // snapPicture2 returns the image itself rather than an HTML page
            Command::SnapPicture => "snapPicture2",
            Command::GotoPresetDefault => "ptzGotoPresetPoint",
            Command::ResetPosition => "ptzReset",
            Command::Reboot => "rebootSystem",
        }
    }

    pub fn response_kind(&self) -> ResponseKind {
        match self {
            Command::SnapPicture => ResponseKind::Binary,
            _ => ResponseKind::Status,
        }
    }

    /// Fixed parameters appended after the credentials
    pub fn extra_query(&self) -> Option<&'static str> {
        match self {
            Command::GotoPresetDefault => Some("name=default"),
            _ => None,
        }
    }

    /// `(vendor token, response kind)` in one lookup
    pub fn resolve(&self) -> (&'static str, ResponseKind) {
        (self.vendor_token(), self.response_kind())
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| CommandError::Unsupported(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_tokens() {
        assert_eq!(Command::SnapPicture.vendor_token(), "snapPicture2");
        assert_eq!(Command::GotoPresetDefault.vendor_token(), "ptzGotoPresetPoint");
        assert_eq!(Command::ResetPosition.vendor_token(), "ptzReset");
        assert_eq!(Command::Reboot.vendor_token(), "rebootSystem");
    }

    #[test]
    fn test_only_snap_is_binary() {
        for command in Command::ALL {
            let expected = if command == Command::SnapPicture {
                ResponseKind::Binary
            } else {
                ResponseKind::Status
            };
            assert_eq!(command.response_kind(), expected, "{}", command);
        }
    }

    #[test]
    fn test_extra_query() {
        assert_eq!(Command::GotoPresetDefault.extra_query(), Some("name=default"));
        assert_eq!(Command::Reboot.extra_query(), None);
    }

    #[test]
    fn test_parse_names() {
        for command in Command::ALL {
            assert_eq!(command.name().parse::<Command>().unwrap(), command);
        }
        let err = "snapPicture2".parse::<Command>().unwrap_err();
        assert!(matches!(err, CommandError::Unsupported(name) if name == "snapPicture2"));
    }
}
