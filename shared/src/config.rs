use anyhow::{bail, Context, Result};
use std::str::FromStr;

pub struct AppConfig {
    pub database: DatabaseConfig,
    pub redis: RedisConfig,
    pub auth: AuthConfig,
    pub server: ServerConfig,
    pub mail: Option<MailConfig>,
    pub scheduler: SchedulerConfig,
}

impl AppConfig {
    pub fn new() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // 環境変数以外（テストの HashMap など）からも読み込めるようにしておく
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig {
            host: required(&lookup, "DB_HOST")?,
            port: parsed_or(&lookup, "DB_PORT", 5432)?,
            username: required(&lookup, "DB_USER")?,
            password: required(&lookup, "DB_PASSWORD")?,
            database: required(&lookup, "DB_NAME")?,
        };
        let redis = RedisConfig {
            host: required(&lookup, "REDIS_HOST")?,
            port: parsed_or(&lookup, "REDIS_PORT", 6379)?,
        };
        let auth = AuthConfig {
            ttl: parsed_or(&lookup, "AUTH_TOKEN_TTL", 86_400)?,
        };
        let server = ServerConfig {
            port: parsed_or(&lookup, "PORT", 5000)?,
        };
        let mail = MailConfig::from_lookup(&lookup)?;

        let notify_hour: u32 = parsed_or(&lookup, "NOTIFY_HOUR", 2)?;
        if notify_hour > 23 {
            bail!("NOTIFY_HOUR must be between 0 and 23, got {notify_hour}");
        }
        let scheduler = SchedulerConfig {
            enabled: parsed_or(&lookup, "SCHEDULER_ENABLED", true)?,
            notify_hour,
        };

        Ok(Self {
            database,
            redis,
            auth,
            server,
            mail,
            scheduler,
        })
    }
}

pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
}

pub struct RedisConfig {
    pub host: String,
    pub port: u16,
}

pub struct AuthConfig {
    // seconds
    pub ttl: u64,
}

pub struct ServerConfig {
    pub port: u16,
}

#[derive(Clone, Debug)]
pub struct MailConfig {
    pub sender: String,
    pub client_secret_path: String,
    pub token_path: String,
}

impl MailConfig {
    // 3 つすべて揃っているか、すべて未設定のどちらかのみ許す
    fn from_lookup<F>(lookup: &F) -> Result<Option<Self>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let sender = lookup("EMAIL_USER");
        let client_secret_path = lookup("GMAIL_CLIENT_SECRET_PATH");
        let token_path = lookup("GMAIL_TOKEN_PATH");

        match (sender, client_secret_path, token_path) {
            (None, None, None) => Ok(None),
            (Some(sender), Some(client_secret_path), Some(token_path)) => Ok(Some(Self {
                sender,
                client_secret_path,
                token_path,
            })),
            _ => bail!(
                "EMAIL_USER, GMAIL_CLIENT_SECRET_PATH and GMAIL_TOKEN_PATH must be set together"
            ),
        }
    }
}

pub struct SchedulerConfig {
    pub enabled: bool,
    pub notify_hour: u32,
}

fn required<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).with_context(|| format!("environment variable {key} is not set"))
}

fn parsed_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .with_context(|| format!("environment variable {key} has an invalid value: {raw}")),
    }
}
