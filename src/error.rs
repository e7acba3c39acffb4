use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the gas model.
///
/// The physics itself never fails: degenerate numbers propagate as NaN/inf.
/// Errors only come from the edges of the crate (domain invariants, color
/// parsing, configuration loading).
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// A color string that is not `#RGB` or `#RRGGBB` hex.
    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    /// Malformed YAML settings or configuration delta.
    #[error("configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    /// Propagated I/O errors (e.g., reading a settings file).
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_is_informative() {
        let e = Error::InvalidParam("width must be > 0".to_string());
        let msg = format!("{e}");
        assert!(msg.contains("invalid parameter"));
        assert!(msg.contains("width"));
    }

    #[test]
    fn invalid_color_quotes_input() {
        let e = Error::InvalidColor("#12".into());
        assert_eq!(e.to_string(), "invalid color: \"#12\"");
    }

    #[test]
    fn yaml_errors_convert() {
        let err: Error = serde_yaml::from_str::<u32>("[").unwrap_err().into();
        assert!(err.to_string().starts_with("configuration error"));
    }
}
