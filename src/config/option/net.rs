//! URL and socket address options.

use super::{ConfigOption, OptionContext, expect_str};
use crate::config::{ConfigValue, ValidationError};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

// ============================================================================
// Url
// ============================================================================

/// An absolute URL with scheme and host. The empty string is allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Url {
    is_dir: bool,
}

impl Url {
    pub const fn new() -> Self {
        Self { is_dir: false }
    }

    /// URL of a directory: the path always ends with `/`.
    pub const fn dir() -> Self {
        Self { is_dir: true }
    }
}

impl ConfigOption for Url {
    fn validate(
        &self,
        value: ConfigValue,
        _ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        let raw = expect_str(&value)?;
        if raw.is_empty() {
            return Ok(value);
        }

        let mut url = url::Url::parse(raw).map_err(|err| {
            ValidationError::new(format!("Unable to parse the URL: {err}"))
                .with_hint("include the scheme, e.g. https://example.com/")
        })?;

        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(ValidationError::new(
                "The URL isn't valid, it should include the http:// (scheme)",
            ));
        }

        if self.is_dir && !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        Ok(ConfigValue::from(url.as_str()))
    }
}

// ============================================================================
// IpAddress
// ============================================================================

/// A `host:port` pair. `localhost` is accepted as `127.0.0.1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IpAddress;

impl IpAddress {
    pub const fn new() -> Self {
        Self
    }

    /// Parse `host:port`; IPv6 hosts may be bracketed.
    pub fn parse(raw: &str) -> Option<SocketAddr> {
        if let Ok(addr) = raw.parse::<SocketAddr>() {
            return Some(addr);
        }
        let (host, port) = raw.rsplit_once(':')?;
        let port: u16 = port.parse().ok()?;
        let host = host.trim_start_matches('[').trim_end_matches(']');
        let ip = if host.eq_ignore_ascii_case("localhost") {
            IpAddr::V4(Ipv4Addr::LOCALHOST)
        } else {
            host.parse().ok()?
        };
        Some(SocketAddr::new(ip, port))
    }
}

impl ConfigOption for IpAddress {
    fn validate(
        &self,
        value: ConfigValue,
        ctx: &mut OptionContext<'_>,
    ) -> Result<ConfigValue, ValidationError> {
        let raw = expect_str(&value)?;
        let addr = Self::parse(raw)
            .ok_or_else(|| ValidationError::new("Must be a string of format 'IP:PORT'"))?;

        if addr.ip().is_unspecified() {
            ctx.warn(format!(
                "The server will listen on all interfaces ({addr}); use 127.0.0.1 to restrict it to this machine."
            ));
        }
        Ok(ConfigValue::from(addr.to_string().as_str()))
    }
}
