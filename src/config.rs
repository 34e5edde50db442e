use crate::error::{Error, Result};
use dotenvy::dotenv;
use std::env;
use std::sync::OnceLock;

pub const DEFAULT_API_URL: &str = "http://localhost:3000/";

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub unidraft_api_url: String,
    pub jwt_secret: Option<String>,
    pub dashboard_rps: u32,
    pub public_rps: u32,
    pub http_timeout_secs: u64,
    pub allowed_origin: Option<String>,
    pub cookie_secure: bool,
}

pub static CONFIG: OnceLock<Config> = OnceLock::new();

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        Ok(Self {
            server_address: get_env("SERVER_ADDRESS")?,
            unidraft_api_url: env::var("UNIDRAFT_API_URL")
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            jwt_secret: get_env_optional("JWT_SECRET"),
            dashboard_rps: get_env_parse("DASHBOARD_RPS")?,
            public_rps: get_env_parse("PUBLIC_RPS")?,
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", 30)?,
            allowed_origin: get_env_optional("ALLOWED_ORIGIN"),
            cookie_secure: get_env_parse_or("COOKIE_SECURE", true)?,
        })
    }
}

fn get_env(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("Missing environment variable: {}", name)))
}

fn get_env_optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_parse<T>(name: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = get_env(name)?;
    raw.parse()
        .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e)))
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_env_optional(name) {
        Some(_) => get_env_parse(name),
        None => Ok(default),
    }
}

pub fn init_config() -> Result<()> {
    let config = Config::from_env()?;
    CONFIG
        .set(config)
        .map_err(|_| Error::Config("Configuration has already been initialized".to_string()))?;
    Ok(())
}

pub fn get_config() -> &'static Config {
    CONFIG
        .get()
        .expect("Configuration has not been initialized")
}
