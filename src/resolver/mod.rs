//! Resolution strategies.
//!
//! - [`SystemResolver`]: the operating system resolver via `getaddrinfo`
//! - [`CommandResolver`]: an external lookup tool such as `dig +short`
//!
//! Both implement [`Resolver`], so the probe loop never knows which one
//! it is driving. Use [`build_resolver`] to pick one from [`Config`].

mod command;
mod system;

pub use command::{parse_lookup_output, CommandResolver};
pub use system::SystemResolver;

use std::sync::Arc;

use crate::config::{Config, ResolverStrategy};
use crate::traits::Resolver;

/// Build the resolver selected by the configuration.
#[must_use]
pub fn build_resolver(config: &Config) -> Arc<dyn Resolver> {
    match config.resolver {
        ResolverStrategy::System => Arc::new(SystemResolver::new()),
        ResolverStrategy::Command => Arc::new(CommandResolver::from_command_line(
            &config.lookup_command,
        )),
    }
}

/// Drop repeated addresses, keeping first occurrence order.
pub(crate) fn dedup_in_order(addresses: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    addresses
        .into_iter()
        .filter(|addr| seen.insert(addr.clone()))
        .collect()
}
