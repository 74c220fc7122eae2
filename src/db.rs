use anyhow::Context;
use scylla::client::{session::Session, session_builder::SessionBuilder};
use scylla::statement::prepared::PreparedStatement;

use crate::model::Target;

/// Store connection settings, taken straight from the CLI.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub node: String,
    pub keyspace: String,
    pub username: String,
    pub password: String,
}

async fn open_conn(opts: &StoreOptions) -> anyhow::Result<Session> {
    SessionBuilder::new()
        .known_node(format!("{}:9042", opts.node))
        .use_keyspace(opts.keyspace.as_str(), false)
        .user(opts.username.as_str(), opts.password.as_str())
        .build()
        .await
        .context("failed to connect to the store")
}

/// Inserts one target row. The insert is a single atomic row write and the
/// session lives only for this call, so it is released on every path.
pub async fn insert_target(opts: &StoreOptions, target: &Target) -> anyhow::Result<()> {
    let session = open_conn(opts).await?;

    let prepared: PreparedStatement = session
        .prepare(
            r#"
                INSERT INTO target (
                    target_id,
                    target_enabled,
                    target_name,
                    target_address,
                    target_ping_type,
                    target_interval,
                    target_state,
                    target_created_at,
                    target_updated_at,
                    target_metadata
                ) VALUES (
                    ?, ?, ?, ?, ?, ?, ?, ?, ?, ?
                )
            "#,
        )
        .await
        .context("failed to prepare the target insert")?;

    session
        .execute_unpaged(
            &prepared,
            (
                target.id,
                target.enabled,
                target.name.as_str(),
                target.address.as_str(),
                target.ping_type,
                target.interval,
                target.state,
                target.created_at,
                target.updated_at,
                target.metadata.as_str(),
            ),
        )
        .await
        .context("the store rejected the target insert")?;

    tracing::info!(
        "registered target; id: {}, target: '{}', interval: {}",
        target.id,
        target.address,
        target.interval
    );

    Ok(())
}
