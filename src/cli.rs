use clap::Parser;

/// Register an HTTP monitoring target.
///
/// On success prints `inserted`; on any failure prints `error: <message>`
/// and exits non-zero.
#[derive(Parser, Debug)]
#[command(name = "targetctl", version, about)]
pub struct Cli {
    /// Store username
    #[arg(long)]
    pub uname: String,

    /// Store password
    #[arg(long = "pass")]
    pub password: String,

    /// Store contact point; port 9042 is used
    #[arg(long, default_value = "localhost")]
    pub node: String,

    /// Keyspace holding the target table
    #[arg(long, default_value = "upmon")]
    pub keyspace: String,

    /// Human label for the target
    #[arg(long)]
    pub name: String,

    /// HTTP or HTTPS URI to probe
    #[arg(long)]
    pub target: String,

    /// HTTP method
    #[arg(long)]
    pub method: String,

    /// Probe interval in seconds
    #[arg(long)]
    pub interval: i32,

    /// Minimum HTTP status counted as success
    #[arg(long, default_value_t = 200)]
    pub success_min: u16,

    /// Maximum HTTP status counted as success
    #[arg(long, default_value_t = 299)]
    pub success_max: u16,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Follow redirects
    #[arg(long)]
    pub redirect: bool,

    /// Maximum redirects to follow, only meaningful with --redirect
    #[arg(long, default_value_t = 5)]
    pub redirect_max: u32,

    /// Request body
    #[arg(long)]
    pub body: Option<String>,

    /// Request header as NAME=VALUE, repeatable
    #[arg(long = "header")]
    pub headers: Vec<String>,

    /// Request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u32>,
}
