//! CLI configuration, with environment-variable fallbacks for running under
//! a container orchestrator without rewriting the invocation.

use clap::Parser;

/// A thin WebSocket front end for `catterm`: one connection, one dictionary,
/// one machine.
#[derive(Debug, Parser)]
#[command(name = "catterm-worker", version, about)]
pub struct Config {
    /// Address to bind the WebSocket listener on.
    #[arg(long, env = "CATTERM_BIND", default_value = "127.0.0.1:8787")]
    pub bind: std::net::SocketAddr,

    /// Step budget handed to `evaluate` for every request on every
    /// connection, unless a request overrides it.
    #[arg(long, env = "CATTERM_GAS", default_value_t = catterm::DEFAULT_GAS)]
    pub gas: u64,

    /// `tracing-subscriber` `EnvFilter` directive, e.g. `info` or
    /// `catterm=trace,catterm_worker=debug`.
    #[arg(long = "log-filter", env = "RUST_LOG", default_value = "info")]
    pub log_filter: String,
}
