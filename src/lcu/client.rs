use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::{
    config::ClientConfig,
    error::{RerollError, Result},
};

const LCU_USERNAME: &str = "riot";

/// Raw reply from the client API
#[derive(Debug, Clone, PartialEq)]
pub struct LcuResponse {
    pub status: u16,
    pub body: String,
}

impl LcuResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Session with the local client API.
///
/// Implementations fail only when the request never produced a response;
/// non-ok statuses are returned to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LcuTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<LcuResponse>;
    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<LcuResponse>;
}

/// Connection details the client writes to its lockfile
#[derive(Debug, Clone, PartialEq)]
pub struct Lockfile {
    pub process: String,
    pub pid: u32,
    pub port: u16,
    pub password: String,
    pub protocol: String,
}

impl Lockfile {
    /// Parse `name:pid:port:password:protocol`
    pub fn parse(contents: &str) -> Result<Self> {
        let parts: Vec<&str> = contents.trim().split(':').collect();
        if parts.len() != 5 {
            return Err(RerollError::Lockfile(format!(
                "expected 5 fields, found {}",
                parts.len()
            )));
        }

        let pid = parts[1]
            .parse()
            .map_err(|e| RerollError::Lockfile(format!("invalid pid '{}': {}", parts[1], e)))?;
        let port = parts[2]
            .parse()
            .map_err(|e| RerollError::Lockfile(format!("invalid port '{}': {}", parts[2], e)))?;

        if parts[3].is_empty() {
            return Err(RerollError::Lockfile("empty password".to_string()));
        }

        Ok(Self {
            process: parts[0].to_string(),
            pid,
            port,
            password: parts[3].to_string(),
            protocol: parts[4].to_string(),
        })
    }

    pub fn read(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }
}

/// HTTPS client for the local game client API
pub struct LcuClient {
    base_url: String,
    password: String,
    client: reqwest::Client,
}

impl LcuClient {
    pub fn new(host: &str, lockfile: &Lockfile, timeout: Duration) -> Result<Self> {
        // The client serves a self-signed certificate on loopback
        let client = reqwest::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            base_url: format!("{}://{}:{}", lockfile.protocol, host, lockfile.port),
            password: lockfile.password.clone(),
            client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let lockfile = Lockfile::read(Path::new(&config.lockfile_path))?;
        debug!(
            "Connecting to {} (pid {}) on port {}",
            lockfile.process, lockfile.pid, lockfile.port
        );
        Self::new(
            &config.host,
            &lockfile,
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn read_response(response: reqwest::Response) -> Result<LcuResponse> {
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(LcuResponse { status, body })
    }
}

#[async_trait]
impl LcuTransport for LcuClient {
    async fn get(&self, path: &str) -> Result<LcuResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!("GET {}", path);

        let response = self
            .client
            .get(&url)
            .basic_auth(LCU_USERNAME, Some(&self.password))
            .send()
            .await?;

        Self::read_response(response).await
    }

    async fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<LcuResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {} {}", path, body);

        let response = self
            .client
            .post(&url)
            .basic_auth(LCU_USERNAME, Some(&self.password))
            .json(body)
            .send()
            .await?;

        Self::read_response(response).await
    }
}
