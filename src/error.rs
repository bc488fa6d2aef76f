/*
    Types:
    * PluginError - The failure taxonomy shared by every parser, provider and builder in the crate.

    Functions are expected to return crate::imports::Result (anyhow) and build a PluginError at the
    failure site, callers that care about the kind recover it with `err.downcast_ref::<PluginError>()`.
*/

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginError {
    /// Malformed text, `position` is the 0-based character index of the offending character.
    InvalidCharacter { text: String, position: usize },
    /// A structural rule was violated after an otherwise well formed parse.
    InvalidArgument(String),
    /// A provider was asked for a name it does not publish.
    UnknownPlugin { kind: &'static str, name: String },
    /// A required input was never supplied.
    NullArgument(&'static str),
}

impl PluginError {
    pub fn invalid_character(text: &str, position: usize) -> Self {
        PluginError::InvalidCharacter {
            text: text.to_string(),
            position,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        PluginError::InvalidArgument(message.into())
    }

    pub fn unknown(kind: &'static str, name: impl std::fmt::Display) -> Self {
        PluginError::UnknownPlugin {
            kind,
            name: name.to_string(),
        }
    }

    pub fn is_unknown_plugin(&self) -> bool {
        matches!(self, PluginError::UnknownPlugin { .. })
    }

    /// Renders the text with a caret under the offending character, `None` for other kinds.
    pub fn caret(&self) -> Option<String> {
        match self {
            PluginError::InvalidCharacter { text, position } => {
                Some(format!("{}\n{}^", text, " ".repeat(*position)))
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for PluginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PluginError::InvalidCharacter { text, position } => {
                match text.chars().nth(*position) {
                    Some(c) => write!(f, "Invalid character {:?} at {} in {:?}", c, position, text),
                    None => write!(f, "Invalid character at {} in {:?}", position, text),
                }
            }
            PluginError::InvalidArgument(message) => write!(f, "{}", message),
            PluginError::UnknownPlugin { kind, name } => write!(f, "Unknown {} {}", kind, name),
            PluginError::NullArgument(what) => write!(f, "Missing {}", what),
        }
    }
}

impl std::error::Error for PluginError {}

/// Pulls the PluginError back out of an anyhow chain, used by providers that need to tell
/// unknown-plugin failures apart from everything else.
pub fn plugin_error(error: &anyhow::Error) -> Option<&PluginError> {
    error.downcast_ref::<PluginError>()
}
