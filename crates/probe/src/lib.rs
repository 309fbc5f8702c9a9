//! Liveness probe engine.
//!
//! Executes one category-specific health check per project and
//! normalizes every outcome to Active/Inactive. A probe makes exactly
//! one attempt: failures, timeouts, and missing preconditions all
//! classify as Inactive and never abort a batch.

mod strategy;

use std::time::Duration;

use futures::future::join_all;
use vigil_core::probe::{ProbeOutcome, ProbeStatus};
use vigil_db::models::project::Project;

/// Default per-probe timeout. A stalled health check classifies as
/// Inactive instead of holding the request open.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Build the shared HTTP client used for all outbound probes.
///
/// Redirects are followed (frontend health URLs commonly 301 to a
/// canonical host) and the timeout bounds every strategy.
pub fn build_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .expect("probe HTTP client construction cannot fail with static options")
}

/// Probe one project using the strategy for its category.
///
/// A project missing the fields its strategy needs (no health-check
/// URL, incomplete database credentials) is reported Inactive with a
/// warning, not an error.
pub async fn probe_project(client: &reqwest::Client, project: &Project) -> ProbeOutcome {
    let status = match project.probe_spec() {
        Ok(spec) => strategy::run(client, &spec).await,
        Err(err) => {
            tracing::warn!(
                project_id = project.id,
                name = %project.name,
                error = %err,
                "Probe preconditions unmet"
            );
            ProbeStatus::Inactive
        }
    };

    ProbeOutcome {
        project_id: project.id,
        name: project.name.clone(),
        status,
    }
}

/// Probe a batch of projects concurrently.
///
/// Results come back in input order, but the probes themselves run
/// unordered and independently; one slow or failing probe never
/// cancels its siblings.
pub async fn probe_all(client: &reqwest::Client, projects: &[Project]) -> Vec<ProbeOutcome> {
    join_all(projects.iter().map(|p| probe_project(client, p))).await
}
