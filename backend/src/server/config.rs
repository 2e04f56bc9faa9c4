//! HTTP server configuration sourced from the environment.

use std::env;
use std::net::SocketAddr;

use actix_web::cookie::{Key, SameSite};
use tracing::warn;

/// Configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration from explicit values.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }

    /// Build configuration from the environment.
    ///
    /// - `SESSION_KEY_FILE`: path to at least 32 bytes of key material. When
    ///   unreadable, debug builds (or `SESSION_ALLOW_EPHEMERAL=1`) fall back
    ///   to an ephemeral key with a warning; release builds refuse to start.
    /// - `SESSION_COOKIE_SECURE`: set to `0` to allow plain-HTTP cookies.
    /// - `BIND_ADDR`: listen address, default `0.0.0.0:8080`.
    pub fn from_env() -> std::io::Result<Self> {
        let key_path =
            env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
        let key = match std::fs::read(&key_path) {
            Ok(bytes) if bytes.len() >= 32 => Key::derive_from(&bytes),
            Ok(_) => {
                return Err(std::io::Error::other(format!(
                    "session key at {key_path} is shorter than 32 bytes"
                )));
            }
            Err(e) => {
                let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                    Key::generate()
                } else {
                    return Err(std::io::Error::other(format!(
                        "failed to read session key at {key_path}: {e}"
                    )));
                }
            }
        };

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".into())
            .parse::<SocketAddr>()
            .map_err(std::io::Error::other)?;

        Ok(Self::new(key, cookie_secure, SameSite::Lax, bind_addr))
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
