use std::env;
use std::path::PathBuf;

use crate::error::ServiceError;

pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";
pub const DEFAULT_HTTP_PORT: u16 = 5000;
pub const DEFAULT_VECTORIZER_PATH: &str = "tfidf_vectorizer.pkl";
pub const DEFAULT_MODEL_PATH: &str = "logreg_model.pkl";

#[derive(Debug, Clone)]
pub struct Settings {
    pub http_host: String,
    pub http_port: u16,
    /// Fitted TF-IDF vectorizer written by the `train` binary
    pub vectorizer_path: PathBuf,
    /// Fitted logistic regression written by the `train` binary
    pub model_path: PathBuf,
}

impl Settings {
    /// Validates the settings and returns an error if invalid.
    pub fn validate(&self) -> Result<(), ServiceError> {
        validate_host(&self.http_host)?;
        validate_port(self.http_port)?;
        validate_path("VECTORIZER_PATH", &self.vectorizer_path)?;
        validate_path("MODEL_PATH", &self.model_path)?;
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.http_host, self.http_port)
    }
}

/// Validates that the host is not empty or whitespace-only.
fn validate_host(host: &str) -> Result<(), ServiceError> {
    if host.trim().is_empty() {
        return Err(ServiceError::Config("Host cannot be empty".into()));
    }
    Ok(())
}

/// Validates that the port is in valid range (1-65535).
fn validate_port(port: u16) -> Result<(), ServiceError> {
    if port == 0 {
        return Err(ServiceError::Config("Port cannot be 0".into()));
    }
    Ok(())
}

fn validate_path(name: &str, path: &std::path::Path) -> Result<(), ServiceError> {
    if path.as_os_str().is_empty() {
        return Err(ServiceError::Config(format!("{name} cannot be empty")));
    }
    Ok(())
}

/// Build settings from an arbitrary variable lookup, falling back to defaults.
pub fn settings_from_lookup<F>(lookup: F) -> Result<Settings, ServiceError>
where
    F: Fn(&str) -> Option<String>,
{
    let http_host = lookup("HTTP_HOST").unwrap_or_else(|| DEFAULT_HTTP_HOST.to_string());
    let http_port = match lookup("HTTP_PORT") {
        Some(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|e| ServiceError::Config(format!("Invalid HTTP_PORT {raw:?}: {e}")))?,
        None => DEFAULT_HTTP_PORT,
    };
    let vectorizer_path = lookup("VECTORIZER_PATH")
        .unwrap_or_else(|| DEFAULT_VECTORIZER_PATH.to_string())
        .into();
    let model_path = lookup("MODEL_PATH")
        .unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string())
        .into();

    let settings = Settings {
        http_host,
        http_port,
        vectorizer_path,
        model_path,
    };

    // Validate settings before returning
    settings.validate()?;

    Ok(settings)
}

pub fn get_configuration() -> Result<Settings, ServiceError> {
    settings_from_lookup(|name| env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_validate_port_zero_fails() {
        let result = validate_port(0);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("Port cannot be 0"));
    }

    #[test]
    fn test_validate_host_whitespace_fails() {
        let result = validate_host("   ");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Host cannot be empty"));
    }

    #[test]
    fn test_defaults_apply_when_nothing_is_set() {
        let settings = settings_from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.http_host, "0.0.0.0");
        assert_eq!(settings.http_port, 5000);
        assert_eq!(settings.vectorizer_path, PathBuf::from("tfidf_vectorizer.pkl"));
        assert_eq!(settings.model_path, PathBuf::from("logreg_model.pkl"));
        assert_eq!(settings.bind_address(), "0.0.0.0:5000");
    }

    #[test]
    fn test_overrides_are_read() {
        let settings = settings_from_lookup(lookup_from(&[
            ("HTTP_HOST", "127.0.0.1"),
            ("HTTP_PORT", "8080"),
            ("VECTORIZER_PATH", "/models/vec.bin"),
            ("MODEL_PATH", "/models/model.bin"),
        ]))
        .unwrap();
        assert_eq!(settings.bind_address(), "127.0.0.1:8080");
        assert_eq!(settings.vectorizer_path, PathBuf::from("/models/vec.bin"));
        assert_eq!(settings.model_path, PathBuf::from("/models/model.bin"));
    }

    #[test]
    fn test_unparseable_port_fails() {
        let result = settings_from_lookup(lookup_from(&[("HTTP_PORT", "http")]));
        assert!(result.unwrap_err().to_string().contains("Invalid HTTP_PORT"));
    }

    #[test]
    fn test_zero_port_fails() {
        assert!(settings_from_lookup(lookup_from(&[("HTTP_PORT", "0")])).is_err());
    }

    #[test]
    fn test_empty_model_path_fails() {
        let result = settings_from_lookup(lookup_from(&[("MODEL_PATH", "")]));
        assert!(result.unwrap_err().to_string().contains("MODEL_PATH cannot be empty"));
    }
}
