use std::env;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Base URL used when running outside a browser with no public base URL set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Environment variable carrying the public base URL for non-browser callers.
pub const PUBLIC_BASE_URL_VAR: &str = "PUBLIC_BASE_URL";

/// Where the client code is running, which decides how API paths are prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionContext {
    /// Inside a browser page: requests go to the page's own origin, given to
    /// `ListClient::with_origin`.
    Browser,
    /// Anywhere else: requests need an absolute base URL.
    Server,
}

impl ExecutionContext {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Browser
        } else {
            Self::Server
        }
    }
}

/// Resolves the prefix prepended to every `/api/...` path.
///
/// Browser callers always get an empty prefix so requests stay same-origin.
/// Server callers get `public_base_url`, falling back to [`DEFAULT_BASE_URL`].
/// A trailing slash is dropped so the result joins with `/api/...` cleanly.
pub fn resolve_base_url(context: ExecutionContext, public_base_url: Option<&str>) -> String {
    match context {
        ExecutionContext::Browser => String::new(),
        ExecutionContext::Server => public_base_url
            .unwrap_or(DEFAULT_BASE_URL)
            .trim_end_matches('/')
            .to_string(),
    }
}

/// [`resolve_base_url`] for the current context, reading `PUBLIC_BASE_URL`.
pub fn base_url_from_env() -> String {
    let public_base_url = env::var(PUBLIC_BASE_URL_VAR).ok();
    resolve_base_url(ExecutionContext::current(), public_base_url.as_deref())
}

/// Arguments for the list API server.
#[derive(Parser, Debug)]
#[clap(name = "grocery-server")]
#[clap(about = "Serves a single shared grocery list over HTTP", long_about = None)]
pub struct ServerArgs {
    /// Port to serve the HTTP API on
    #[clap(short, long, default_value = "8080")]
    pub port: u16,

    /// Address to bind to
    #[clap(long, default_value = "0.0.0.0")]
    pub bind_address: String,

    /// Directory holding the JSON store files
    #[clap(short, long, value_name = "DIR", default_value = "db")]
    pub data_dir: PathBuf,

    /// Name of the list to serve; created if missing
    #[clap(long, default_value = "Groceries")]
    pub list_name: String,
}

/// Arguments for the command-line client.
#[derive(Parser, Debug)]
#[clap(name = "grocery-cli")]
#[clap(about = "Reads and edits the shared grocery list", long_about = None)]
pub struct CliArgs {
    /// Base URL of the list API
    #[clap(long, env = PUBLIC_BASE_URL_VAR, value_name = "URL")]
    pub base_url: Option<String>,

    #[clap(subcommand)]
    pub command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
    /// Print the list
    List {
        /// Print the response body as-is instead of one line per item
        #[clap(long)]
        raw: bool,
    },
    /// Add an item by name
    Add { name: String },
    /// Remove an item by id
    Remove { id: String },
    /// Mark an item as checked, or unchecked with --unchecked
    Check {
        id: String,
        #[clap(long)]
        unchecked: bool,
    },
}
