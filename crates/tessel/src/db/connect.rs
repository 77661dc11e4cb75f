use crate::{Error, Result};

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use tessel_core::Engine;
use url::Url;

/// Where and how to connect the engine.
///
/// Either a connection URL or the discrete `database` / `username` /
/// `password` / `host` / `port` fields. When both are present the URL wins.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectOptions {
    #[serde(alias = "url")]
    pub database_url: Option<String>,

    pub database: Option<String>,
    pub username: Option<String>,

    #[serde(alias = "pass")]
    pub password: Option<String>,

    pub host: Option<String>,
    pub port: Option<u16>,

    /// Engine configuration passed through untouched (`dialect`, `logging`, `pool`, ...)
    pub config: IndexMap<String, Value>,
}

/// Resolved connection target.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Url(Url),
    Database {
        database: String,
        username: Option<String>,
        password: Option<String>,
        host: Option<String>,
        port: Option<u16>,
    },
}

/// Creates an engine from connection options.
pub trait Driver {
    fn connect(&self, options: &ConnectOptions) -> Result<Box<dyn Engine>>;
}

impl ConnectOptions {
    /// Options for a connection URL. The URL is validated immediately.
    pub fn url(url: &str) -> Result<ConnectOptions> {
        Url::parse(url)?;

        Ok(ConnectOptions {
            database_url: Some(url.to_string()),
            ..ConnectOptions::default()
        })
    }

    /// Read options from `DATABASE_URL`, or from `DATABASE`, `USERNAME`,
    /// `PASSWORD`, `HOST` and `PORT`. `DIALECT` is stored in `config`.
    pub fn from_env() -> Result<ConnectOptions> {
        ConnectOptions::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<ConnectOptions> {
        let port = match lookup("PORT") {
            Some(port) => Some(
                port.parse::<u16>().map_err(|_| {
                    Error::invalid_connect_options("port", format!("`{port}` is not a port number"))
                })?,
            ),
            None => None,
        };

        let mut options = ConnectOptions {
            database_url: lookup("DATABASE_URL"),
            database: lookup("DATABASE"),
            username: lookup("USERNAME"),
            password: lookup("PASSWORD"),
            host: lookup("HOST"),
            port,
            config: IndexMap::new(),
        };

        if let Some(dialect) = lookup("DIALECT") {
            options.config.insert("dialect".to_string(), Value::String(dialect));
        }

        options.target()?;
        Ok(options)
    }

    /// Parse options from a JSON record.
    pub fn from_json(value: Value) -> Result<ConnectOptions> {
        let options: ConnectOptions = serde_json::from_value(value)?;
        options.target()?;
        Ok(options)
    }

    /// Validates the options and picks the connection target.
    pub fn target(&self) -> Result<Target> {
        if let Some(url) = &self.database_url {
            return Ok(Target::Url(Url::parse(url)?));
        }

        let Some(database) = &self.database else {
            return Err(Error::invalid_connect_options(
                "database",
                "either a connection url or a database name is required",
            ));
        };

        Ok(Target::Database {
            database: database.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            host: self.host.clone(),
            port: self.port,
        })
    }
}
