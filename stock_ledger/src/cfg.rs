use config::{Config, ConfigError, Environment};
use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Cfg {
    pub database_url: String,
    pub jwt_secret: String,
    pub recommendation_url: String,
    pub bind_addr: String,
    pub token_ttl_secs: i64,
}

pub static CONFIG: Lazy<Cfg> = Lazy::new(|| load().expect("invalid configuration"));

fn load() -> Result<Cfg, ConfigError> {
    Config::builder()
        .set_default(
            "recommendation_url",
            "https://stock-bot-9kw6.onrender.com/api/signal/recommendation",
        )?
        .set_default("bind_addr", "127.0.0.1:3009")?
        .set_default("token_ttl_secs", 3600)?
        .add_source(Environment::default())
        .build()?
        .try_deserialize()
}
