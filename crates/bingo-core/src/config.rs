use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{BingoError, Result};

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_CONFIG_PATH: &str = "bingo.toml";
pub const DEFAULT_DIST_DIR: &str = "frontend/dist";
pub const MAX_PAYLOAD_BYTES: usize = 16 * 1024; // inbound WS frame cap
pub const OUTBOUND_CAPACITY: usize = 64; // per-connection send queue
pub const SECRET_ENV: &str = "BINGO_SESSION__SECRET_ID";

/// Top-level config (bingo.toml + BINGO_* env overrides, plus bare HOST/PORT).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BingoConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub tts: TtsConfig,
    #[serde(default)]
    pub frontend: FrontendConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Empty means any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Value the master must submit to `POST /start_session`.
    #[serde(default)]
    pub secret_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// Google Translate top-level domain, picks the accent ("us", "co.uk", ...).
    #[serde(default = "default_tld")]
    pub tld: String,
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,
    /// Full endpoint override, mostly for tests and proxies.
    pub base_url: Option<String>,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            tld: default_tld(),
            timeout_secs: default_tts_timeout(),
            base_url: None,
        }
    }
}

impl TtsConfig {
    pub fn endpoint(&self) -> String {
        self.base_url
            .clone()
            .unwrap_or_else(|| format!("https://translate.google.{}/translate_tts", self.tld))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrontendConfig {
    #[serde(default = "default_dist_dir")]
    pub dist_dir: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            dist_dir: default_dist_dir(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_tld() -> String {
    "us".to_string()
}
fn default_tts_timeout() -> u64 {
    10
}
fn default_dist_dir() -> String {
    DEFAULT_DIST_DIR.to_string()
}

impl BingoConfig {
    /// Load config, later sources winning:
    ///   1. TOML file (explicit path, else `bingo.toml` in the working dir)
    ///   2. `HOST` / `PORT` (what PaaS hosts inject)
    ///   3. `BINGO_*` env, nested with `__` (e.g. `BINGO_SESSION__SECRET_ID`)
    ///
    /// The secret env var is taken verbatim: figment would read `13122025` as
    /// an integer and `0042` as `42`.
    ///
    /// Fails when no session secret is configured.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);

        let mut figment = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::raw().only(&["HOST", "PORT"]).map(|key| {
                if key.as_str().eq_ignore_ascii_case("host") {
                    "gateway.bind".into()
                } else {
                    "gateway.port".into()
                }
            }))
            .merge(
                Env::prefixed("BINGO_")
                    .split("__")
                    .filter(|key| !key.as_str().eq_ignore_ascii_case("session.secret_id")),
            );
        if let Ok(secret) = std::env::var(SECRET_ENV) {
            figment = figment.merge(Serialized::default("session.secret_id", secret));
        }

        let config: BingoConfig = figment
            .extract()
            .map_err(|e| BingoError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.session.secret_id.trim().is_empty() {
            return Err(BingoError::Config(
                "session.secret_id is not set (use BINGO_SESSION__SECRET_ID)".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn missing_secret_is_a_config_error() {
        Jail::expect_with(|_jail| {
            let err = BingoConfig::load(None).unwrap_err();
            assert!(matches!(err, BingoError::Config(_)));
            Ok(())
        });
    }

    #[test]
    fn env_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.set_env("BINGO_SESSION__SECRET_ID", "13122025");
            jail.set_env("PORT", "9100");
            let cfg = BingoConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.session.secret_id, "13122025");
            assert_eq!(cfg.gateway.port, 9100);
            assert_eq!(cfg.gateway.bind, DEFAULT_BIND);
            assert_eq!(cfg.frontend.dist_dir, DEFAULT_DIST_DIR);
            Ok(())
        });
    }

    #[test]
    fn numeric_secret_stays_verbatim() {
        for secret in ["13122025", "0042"] {
            Jail::expect_with(|jail| {
                jail.set_env(SECRET_ENV, secret);
                let cfg = BingoConfig::load(None).map_err(|e| e.to_string())?;
                assert_eq!(cfg.session.secret_id, secret);
                Ok(())
            });
        }
    }

    #[test]
    fn secret_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("bingo.toml", "[session]\nsecret_id = \"from-file\"\n")?;
            jail.set_env(SECRET_ENV, "0042");
            let cfg = BingoConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.session.secret_id, "0042");
            Ok(())
        });
    }

    #[test]
    fn toml_file_then_prefixed_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "bingo.toml",
                r#"
                [gateway]
                bind = "127.0.0.1"
                port = 7000

                [session]
                secret_id = "from-file"

                [tts]
                tld = "co.uk"
                "#,
            )?;
            jail.set_env("BINGO_GATEWAY__PORT", "7001");
            let cfg = BingoConfig::load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.gateway.bind, "127.0.0.1");
            assert_eq!(cfg.gateway.port, 7001);
            assert_eq!(cfg.session.secret_id, "from-file");
            assert_eq!(
                cfg.tts.endpoint(),
                "https://translate.google.co.uk/translate_tts"
            );
            Ok(())
        });
    }
}
