use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;

use crate::error::{AppError, Result};

pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_JWT_SECRET: &str = "dev-secret";
pub const DEFAULT_TOKEN_TTL_DAYS: i64 = 7;
pub const DEFAULT_BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub seed_demo_data: bool,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `*` allows any origin
    pub cors_origin: String,
    /// Directory holding the built front end, served when present
    pub static_dir: String,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub enabled: bool,
    pub jwt_secret: String,
    pub token_ttl_days: i64,
    pub bcrypt_cost: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
                cors_origin: DEFAULT_CORS_ORIGIN.to_string(),
                static_dir: "build".to_string(),
            },
            auth: AuthConfig {
                enabled: true,
                jwt_secret: DEFAULT_JWT_SECRET.to_string(),
                token_ttl_days: DEFAULT_TOKEN_TTL_DAYS,
                bcrypt_cost: DEFAULT_BCRYPT_COST,
            },
            seed_demo_data: true,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();

        let port = match env::var("SERVER_PORT").or_else(|_| env::var("PORT")) {
            Ok(raw) => parse_var("SERVER_PORT", &raw)?,
            Err(_) => DEFAULT_PORT,
        };

        let cors_origin = env::var("CORS_ORIGIN")
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        validate_origin(&cors_origin)?;

        let bcrypt_cost = optional_var("BCRYPT_COST")?.unwrap_or(DEFAULT_BCRYPT_COST);
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(AppError::InvalidConfiguration(format!(
                "BCRYPT_COST must be between 4 and 31, got {}",
                bcrypt_cost
            )));
        }

        Ok(Self {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port,
                cors_origin,
                static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "build".to_string()),
            },
            auth: AuthConfig {
                enabled: optional_var("AUTH_ENABLED")?.unwrap_or(true),
                jwt_secret: env::var("JWT_SECRET")
                    .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
                token_ttl_days: optional_var("TOKEN_TTL_DAYS")?
                    .unwrap_or(DEFAULT_TOKEN_TTL_DAYS),
                bcrypt_cost,
            },
            seed_demo_data: optional_var("SEED_DEMO_DATA")?.unwrap_or(true),
        })
    }

    pub fn bind_address(&self) -> SocketAddr {
        let ip_addr = self.parse_host_to_ipv4();
        SocketAddr::from((ip_addr.octets(), self.server.port))
    }

    fn parse_host_to_ipv4(&self) -> Ipv4Addr {
        if let Ok(addr) = self.server.host.parse::<IpAddr>() {
            match addr {
                IpAddr::V4(ipv4) => return ipv4,
                IpAddr::V6(_) => {
                    tracing::warn!(
                        host = %self.server.host,
                        "IPv6 address provided but only IPv4 supported, using 0.0.0.0"
                    );
                    return Ipv4Addr::UNSPECIFIED;
                }
            }
        }

        match self.server.host.as_str() {
            "localhost" => Ipv4Addr::LOCALHOST,
            "" | "0.0.0.0" => Ipv4Addr::UNSPECIFIED,
            _ => {
                tracing::warn!(
                    host = %self.server.host,
                    "Unable to parse host as IPv4, using 0.0.0.0"
                );
                Ipv4Addr::UNSPECIFIED
            }
        }
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim().parse().map_err(|_| {
        AppError::InvalidConfiguration(format!("{} has an invalid value: {:?}", key, raw))
    })
}

fn optional_var<T: FromStr>(key: &str) -> Result<Option<T>> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => parse_var(key, &raw).map(Some),
        _ => Ok(None),
    }
}

fn validate_origin(origin: &str) -> Result<()> {
    let authority = origin
        .strip_prefix("http://")
        .or_else(|| origin.strip_prefix("https://"));

    if origin == "*" || authority.map_or(false, |a| !a.is_empty() && !a.contains('/')) {
        Ok(())
    } else {
        Err(AppError::InvalidConfiguration(format!(
            "CORS_ORIGIN must be `*` or an http(s) origin, got {:?}",
            origin
        )))
    }
}
