use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
    value::Uncased,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, sync::LazyLock, time::Duration};
use url::Url;

/// Flat environment names and the config paths they populate.
const ENV_KEYS: &[(&str, &str)] = &[
    ("LISTEN_ADDR", "basic.listen_addr"),
    ("LOGLEVEL", "basic.loglevel"),
    ("BACKEND_URL", "backend.url"),
    ("BACKEND_ANON_KEY", "backend.anon_key"),
    ("BACKEND_SERVICE_ROLE_KEY", "backend.service_role_key"),
    ("BACKEND_TIMEOUT_SECS", "backend.timeout_secs"),
    ("PAYMENTS_SECRET_KEY", "payments.secret_key"),
    ("PAYMENTS_API_BASE", "payments.api_base"),
    ("PAYMENTS_CURRENCY", "payments.currency"),
    ("ADMIN_BOOTSTRAP_EMAIL", "admin.bootstrap_email"),
];

pub static CONFIG: LazyLock<Config> = LazyLock::new(|| {
    Config::figment()
        .extract()
        .unwrap_or_else(|e| panic!("FATAL: invalid gateway configuration: {e}"))
});

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub backend: BackendConfig,
    pub payments: PaymentsConfig,
    pub admin: AdminConfig,
}

impl Config {
    /// Defaults, then `config.toml`, then the recognized environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::raw().filter_map(|key| {
                ENV_KEYS
                    .iter()
                    .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
                    .map(|(_, path)| Uncased::from(*path))
            }))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: SocketAddr,
    pub loglevel: String,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8000)),
            loglevel: "info".to_string(),
        }
    }
}

/// Backend-as-a-service endpoint and keys. A missing URL means unconfigured mode.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    pub url: Option<Url>,
    pub anon_key: Option<String>,
    pub service_role_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            service_role_key: None,
            timeout_secs: 10,
        }
    }
}

impl BackendConfig {
    pub fn is_live(&self) -> bool {
        self.url.is_some() && (self.anon_key.is_some() || self.service_role_key.is_some())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PaymentsConfig {
    pub secret_key: Option<String>,
    pub api_base: Url,
    pub currency: String,
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            api_base: Url::parse("https://api.stripe.com")
                .expect("static payments base url is valid"),
            currency: "usd".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// The account that `grant_admin_if_primary` may promote.
    pub bootstrap_email: Option<String>,
}
