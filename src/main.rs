mod cli;
mod db;
mod error;
mod model;
mod validate;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::Cli;
use db::StoreOptions;
use error::RegisterError;
use model::{HttpMetadata, Target};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries only the outcome line.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "targetctl=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(&cli).await {
        Ok(()) => println!("inserted"),
        Err(e) => {
            println!("error: {e}");
            std::process::exit(1);
        }
    }
}

async fn run(cli: &Cli) -> Result<(), RegisterError> {
    let (input, config) = validate::validate(cli)?;
    let metadata = HttpMetadata::from_config(&config).encode()?;
    let record = Target::create(input.name, input.address, input.interval, metadata);

    tracing::debug!("built target record {}", record.id);

    let store = StoreOptions {
        node: cli.node.clone(),
        keyspace: cli.keyspace.clone(),
        username: cli.uname.clone(),
        password: cli.password.clone(),
    };

    db::insert_target(&store, &record)
        .await
        .map_err(RegisterError::Persistence)
}
