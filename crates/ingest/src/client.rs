//! Originating client address.

use std::net::IpAddr;

/// Address of the client that sent a request, as reported in audit logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientAddr(String);

impl ClientAddr {
    /// Resolves the client address.
    ///
    /// Prefers the first entry of an `X-Forwarded-For` header, then the
    /// peer address of the connection, then `"unknown"`.
    pub fn resolve(forwarded_for: Option<&str>, peer: Option<IpAddr>) -> Self {
        let forwarded = forwarded_for
            .and_then(|raw| raw.split(',').next())
            .map(str::trim)
            .filter(|first| !first.is_empty());

        match (forwarded, peer) {
            (Some(first), _) => Self(first.to_string()),
            (None, Some(ip)) => Self(ip.to_string()),
            (None, None) => Self::unknown(),
        }
    }

    pub fn unknown() -> Self {
        Self("unknown".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ClientAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
