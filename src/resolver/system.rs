//! Operating system resolver.

use async_trait::async_trait;

use super::dedup_in_order;
use crate::error::ResolveError;
use crate::traits::Resolver;

/// Resolves through the platform resolver (`getaddrinfo`).
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemResolver;

impl SystemResolver {
    /// Create a system resolver.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Resolver for SystemResolver {
    async fn resolve(&self, hostname: &str) -> Result<Vec<String>, ResolveError> {
        // Port 0: only the addresses matter
        let addrs = tokio::net::lookup_host((hostname, 0))
            .await
            .map_err(|e| ResolveError::Lookup {
                hostname: hostname.to_string(),
                message: e.to_string(),
            })?;

        Ok(dedup_in_order(addrs.map(|a| a.ip().to_string())))
    }

    fn name(&self) -> &'static str {
        "system"
    }
}
