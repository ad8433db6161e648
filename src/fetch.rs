use crate::error::CatalogError;
use crate::intent::Intent;
use crate::record::{Record, parse_records};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub fn build_client() -> Result<reqwest::Client, CatalogError> {
    let client = reqwest::Client::builder()
        .user_agent(concat!("link-catalog/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

/// Single GET against the endpoint, expecting a JSON array of records.
pub async fn fetch_records(
    client: &reqwest::Client,
    endpoint: &str,
) -> Result<Vec<Record>, CatalogError> {
    info!(endpoint, "fetching records");
    let response = client.get(endpoint).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status {
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    let records = parse_records(&body)?;
    info!(count = records.len(), "records loaded");
    Ok(records)
}

/// Run the fetch on a background task and hand the outcome back to the UI
/// loop as an intent.
pub fn spawn_fetch(
    client: reqwest::Client,
    endpoint: String,
    tx: UnboundedSender<Intent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = fetch_records(&client, &endpoint).await;
        if let Err(ref e) = result {
            warn!(error = %e, "fetch failed");
        }
        // Receiver gone means the UI already quit.
        let _ = tx.send(Intent::FetchFinished(result));
    })
}
