//! Category-specific probe strategies.

use reqwest::header::{ACCEPT, USER_AGENT};
use vigil_core::probe::{ProbeSpec, ProbeStatus};

/// Some health endpoints reject non-browser clients, so the frontend
/// strategy presents itself as one.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36";

/// Execute the strategy a spec describes, classifying any failure as
/// Inactive.
pub(crate) async fn run(client: &reqwest::Client, spec: &ProbeSpec) -> ProbeStatus {
    match spec {
        ProbeSpec::Frontend { health_check_url } => {
            probe_frontend(client, health_check_url).await
        }
        ProbeSpec::Api { health_check_url } => probe_api(client, health_check_url).await,
        ProbeSpec::Database { db_url, db_key } => probe_database(client, db_url, db_key).await,
    }
}

/// Frontend: browser-like GET, Active iff the final response after
/// redirects is in the success range.
async fn probe_frontend(client: &reqwest::Client, url: &str) -> ProbeStatus {
    let response = client
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .header(ACCEPT, "text/html")
        .send()
        .await;

    match response {
        Ok(response) if response.status().is_success() => ProbeStatus::Active,
        Ok(response) => {
            tracing::debug!(%url, status = %response.status(), "Frontend probe failed");
            ProbeStatus::Inactive
        }
        Err(err) => {
            tracing::debug!(%url, error = %err, "Frontend probe errored");
            ProbeStatus::Inactive
        }
    }
}

/// API: plain GET, Active iff the status is exactly 200 and the body
/// is non-empty JSON.
async fn probe_api(client: &reqwest::Client, url: &str) -> ProbeStatus {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(err) => {
            tracing::debug!(%url, error = %err, "API probe errored");
            return ProbeStatus::Inactive;
        }
    };

    if response.status() != reqwest::StatusCode::OK {
        tracing::debug!(%url, status = %response.status(), "API probe failed");
        return ProbeStatus::Inactive;
    }

    match response.json::<serde_json::Value>().await {
        Ok(body) if !body.is_null() => ProbeStatus::Active,
        Ok(_) => {
            tracing::debug!(%url, "API probe returned an empty body");
            ProbeStatus::Inactive
        }
        Err(err) => {
            tracing::debug!(%url, error = %err, "API probe body was not JSON");
            ProbeStatus::Inactive
        }
    }
}

/// Database: invoke the trivial `now` RPC through the project's REST
/// endpoint (Supabase-style PostgREST), Active iff the call succeeds
/// with a non-empty result.
async fn probe_database(client: &reqwest::Client, db_url: &str, db_key: &str) -> ProbeStatus {
    let rpc_url = format!("{db_url}/rest/v1/rpc/now");

    let response = match client
        .post(&rpc_url)
        .header("apikey", db_key)
        .bearer_auth(db_key)
        .json(&serde_json::json!({}))
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            tracing::debug!(url = %rpc_url, error = %err, "Database probe errored");
            return ProbeStatus::Inactive;
        }
    };

    if !response.status().is_success() {
        tracing::debug!(url = %rpc_url, status = %response.status(), "Database probe failed");
        return ProbeStatus::Inactive;
    }

    match response.json::<serde_json::Value>().await {
        Ok(body) if !body.is_null() => ProbeStatus::Active,
        _ => {
            tracing::debug!(url = %rpc_url, "Database probe returned no data");
            ProbeStatus::Inactive
        }
    }
}
