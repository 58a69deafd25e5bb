use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("missing replacements for: {}", .0.join(", "))]
    MissingPlaceholder(Vec<String>),

    #[error("invalid placeholder pattern: {0}")]
    InvalidPattern(String),
}

#[derive(Debug, thiserror::Error)]
pub enum NyaiError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("llm error: {0}")]
    Llm(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("timeout_secs must be 1-600".into());
        assert_eq!(
            err.to_string(),
            "config validation error: timeout_secs must be 1-600"
        );
    }

    #[test]
    fn template_error_lists_every_missing_name() {
        let err = TemplateError::MissingPlaceholder(vec!["city".into(), "name".into()]);
        assert_eq!(err.to_string(), "missing replacements for: city, name");
    }

    #[test]
    fn nyai_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: NyaiError = config_err.into();
        assert!(matches!(err, NyaiError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn nyai_error_from_template() {
        let err: NyaiError = TemplateError::MissingPlaceholder(vec!["x".into()]).into();
        assert!(matches!(err, NyaiError::Template(_)));
        assert!(err.to_string().contains("x"));
    }

    #[test]
    fn nyai_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: NyaiError = io_err.into();
        assert!(matches!(err, NyaiError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn nyai_error_other_variants() {
        let err = NyaiError::Llm("model unavailable".into());
        assert_eq!(err.to_string(), "llm error: model unavailable");

        let err = NyaiError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
