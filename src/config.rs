use std::net::{Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

use crate::files::Root;

const MIN_PORT: u16 = 1024;

/// Server configuration.
///
/// Built from defaults, then an optional YAML file named by `CONFIG`, then the
/// `PORT`, `ROOT` and `LOCAL_ONLY` environment variables.
///
/// ```yaml
/// server:
///   port: 8080
///   local_only: true
///   name: HttpMiniServer
/// static_files:
///   root: /srv/www
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub static_files: StaticFilesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    /// Bind to loopback only.
    pub local_only: bool,
    /// Sent in the `Server` header.
    pub name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            local_only: false,
            name: "HttpMiniServer".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Directory to serve; the working directory when unset.
    pub root: Option<PathBuf>,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::load`], reading variables through `lookup` instead of the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = match lookup("CONFIG") {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(port) = lookup("PORT") {
            cfg.server.port = port
                .trim()
                .parse()
                .with_context(|| format!("invalid PORT: {port:?}"))?;
        }

        if let Some(root) = lookup("ROOT") {
            cfg.static_files.root = Some(PathBuf::from(root));
        }

        if let Some(flag) = lookup("LOCAL_ONLY") {
            cfg.server.local_only = parse_flag(&flag)
                .with_context(|| format!("invalid LOCAL_ONLY: {flag:?}"))?;
        }

        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.port < MIN_PORT {
            anyhow::bail!("Incorrect port, please set port from range [1024-65535]!");
        }
        Ok(())
    }

    pub fn listen_addr(&self) -> SocketAddr {
        let ip = if self.server.local_only {
            Ipv4Addr::LOCALHOST
        } else {
            Ipv4Addr::UNSPECIFIED
        };
        SocketAddr::from((ip, self.server.port))
    }

    /// Canonical served directory.
    pub fn root(&self) -> anyhow::Result<Root> {
        match &self.static_files.root {
            Some(path) => Root::new(path),
            None => Root::new(std::env::current_dir().context("reading working directory")?),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
