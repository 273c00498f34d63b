//! CLI command implementations.

pub mod browse;
pub mod lines;

use anyhow::{Context, Result};
use busline_client::BuslineClient;
use busline_view::Providers;
use std::sync::Arc;

use crate::Settings;

/// Build one HTTP client and hand it out as every page collaborator.
pub(crate) fn http_client(settings: &Settings) -> Result<Arc<BuslineClient>> {
    let client = BuslineClient::new(&settings.client)
        .with_context(|| format!("invalid backend settings for {}", settings.client.base_url))?;
    tracing::debug!(api_root = %client.api_root(), "backend client ready");
    Ok(Arc::new(client))
}

pub(crate) fn http_providers(client: &Arc<BuslineClient>) -> Providers {
    Providers {
        categories: client.clone(),
        records: client.clone(),
        deleter: client.clone(),
    }
}
