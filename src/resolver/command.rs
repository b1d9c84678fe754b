//! External lookup command resolver.
//!
//! Runs a tool such as `dig +short` and collects every token of its
//! standard output that parses as an IP address. `{host}` in the command
//! line is replaced with the hostname; without a placeholder the hostname
//! is appended as the last argument.

use std::net::IpAddr;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use super::dedup_in_order;
use crate::error::ResolveError;
use crate::traits::Resolver;

const HOST_PLACEHOLDER: &str = "{host}";

/// Resolves by running an external lookup command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResolver {
    program: String,
    args: Vec<String>,
}

impl CommandResolver {
    /// Create a resolver from a program and argument template.
    #[must_use]
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Split a whitespace separated command line into program and arguments.
    ///
    /// An empty line falls back to `dig +short`.
    #[must_use]
    pub fn from_command_line(line: &str) -> Self {
        let mut parts = line.split_whitespace().map(String::from);
        match parts.next() {
            Some(program) => Self::new(program, parts.collect()),
            None => Self::new("dig", vec!["+short".to_string()]),
        }
    }

    /// Program that gets executed.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments for one lookup of `hostname`.
    #[must_use]
    pub fn args_for(&self, hostname: &str) -> Vec<String> {
        let mut substituted = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains(HOST_PLACEHOLDER) {
                    substituted = true;
                    arg.replace(HOST_PLACEHOLDER, hostname)
                } else {
                    arg.clone()
                }
            })
            .collect();
        if !substituted {
            args.push(hostname.to_string());
        }
        args
    }
}

/// Extract IP addresses from lookup tool output, in order, without repeats.
///
/// Tokens may carry trailing dots or commas; anything that is not an
/// address (CNAME targets, labels, comments) is skipped.
#[must_use]
pub fn parse_lookup_output(output: &str) -> Vec<String> {
    let addresses = output
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with(';'))
        .flat_map(str::split_whitespace)
        .map(|token| token.trim_end_matches(['.', ',']))
        .filter_map(|token| token.parse::<IpAddr>().ok())
        .map(|ip| ip.to_string());
    dedup_in_order(addresses)
}

#[async_trait]
impl Resolver for CommandResolver {
    async fn resolve(&self, hostname: &str) -> Result<Vec<String>, ResolveError> {
        let output = Command::new(&self.program)
            .args(self.args_for(hostname))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| ResolveError::Spawn {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ResolveError::CommandFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let addresses = parse_lookup_output(&String::from_utf8_lossy(&output.stdout));
        if addresses.is_empty() {
            return Err(ResolveError::NoAddresses {
                hostname: hostname.to_string(),
            });
        }
        Ok(addresses)
    }

    fn name(&self) -> &'static str {
        "command"
    }
}
