use std::fs;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error};

pub const DEFAULT_ENDPOINT: &str = "0.0.0.0:50051";
pub const DEFAULT_ENGINE_ENDPOINT: &str = "localhost:5000";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub endpoint: String,
    pub engine_endpoint: String,
    #[serde(default)]
    pub tls: Option<Tls>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tls {
    pub cert: String,
    pub key: String,
}

impl Config {
    pub fn load(file: &str) -> Result<Self, Error> {
        let contents = fs::read_to_string(file).map_err(Error::StdIoErr)?;
        serde_yaml::from_str(&contents).map_err(|_| Error::Config(ConfigError::FailedToLoad))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            engine_endpoint: DEFAULT_ENGINE_ENDPOINT.to_string(),
            tls: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn works_serde_yaml_from_str() {
        let yaml_str = r"endpoint: 0.0.0.0:50051
engine_endpoint: localhost:5000
tls:
  cert: cert.pem
  key: key.pem
";
        let conf: Config = serde_yaml::from_str(yaml_str).unwrap();
        assert_eq!(conf.endpoint, "0.0.0.0:50051");
        assert_eq!(conf.engine_endpoint, "localhost:5000");
        let tls = conf.tls.unwrap();
        assert_eq!(tls.cert, "cert.pem");
        assert_eq!(tls.key, "key.pem");
    }

    #[test]
    fn works_serde_yaml_from_str_without_tls() {
        let yaml_str = r"endpoint: 127.0.0.1:50052
engine_endpoint: localhost:5000
";
        let conf: Config = serde_yaml::from_str(yaml_str).unwrap();
        assert!(conf.tls.is_none());
    }
}
