//! Blocking client for the Ensembl VEP REST service.
//!
//! This module provides the [`VepClient`] type and its builder. The client speaks
//! to the HGVS endpoints only: a batched POST used by the annotator, and a single
//! notation GET useful for spot checks.

use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use log::{debug, warn};
use serde_json::{Value, json};

use super::consts::{DEFAULT_SPECIES, DEFAULT_TIMEOUT_SECS, MAX_BATCH_SIZE};
use super::result::EnrichmentResult;
use super::service::EnrichmentService;
use super::utils::get_default_vep_api;

/// Builder for constructing a [`VepClient`] with custom configuration.
///
/// # Examples
///
/// ```rust,no_run
/// use varanno_vep::client::VepClient;
/// use std::time::Duration;
///
/// # fn main() -> anyhow::Result<()> {
/// let client = VepClient::builder()
///     .with_api("https://rest.ensembl.org".to_string())
///     .with_timeout(Duration::from_secs(30))
///     .finish()?;
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct VepClientBuilder {
    api: Option<String>,
    species: Option<String>,
    timeout: Option<Duration>,
}

impl VepClientBuilder {
    /// Creates a new, empty VepClientBuilder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the VEP REST API base URL.
    pub fn with_api(mut self, api: String) -> Self {
        self.api = Some(api);
        self
    }

    pub fn with_species(mut self, species: String) -> Self {
        self.species = Some(species);
        self
    }

    /// Sets the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Consumes the builder and creates a VepClient.
    pub fn finish(self) -> Result<VepClient> {
        let api = self.api.unwrap_or_else(get_default_vep_api);
        let api = api.trim_end_matches('/').to_string();
        if api.is_empty() {
            bail!("VEP api url must not be empty");
        }

        let species = self
            .species
            .unwrap_or_else(|| DEFAULT_SPECIES.to_string());
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));

        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Ok(VepClient {
            api,
            species,
            agent,
        })
    }
}

/// Client for the VEP HGVS endpoints.
pub struct VepClient {
    pub api: String,
    pub species: String,
    agent: ureq::Agent,
}

impl VepClient {
    /// Creates a new [`VepClientBuilder`] for configuring a client.
    pub fn builder() -> VepClientBuilder {
        VepClientBuilder::new()
    }

    /// URL of the batched HGVS endpoint.
    pub fn hgvs_url(&self) -> String {
        format!("{}/vep/{}/hgvs", self.api, self.species)
    }

    /// Annotate a list of HGVS notations in one request.
    ///
    /// # Arguments
    /// - notations: at most [MAX_BATCH_SIZE] genomic HGVS strings
    ///
    /// # Returns
    /// - the result objects in the order the service sent them
    pub fn hgvs_post(&self, notations: &[String]) -> Result<Vec<EnrichmentResult>> {
        if notations.is_empty() {
            return Ok(Vec::new());
        }
        if notations.len() > MAX_BATCH_SIZE {
            bail!(
                "Cannot send {} notations in one request; the limit is {}",
                notations.len(),
                MAX_BATCH_SIZE
            );
        }

        let url = self.hgvs_url();
        let body = hgvs_request_body(notations).to_string();
        debug!("POST {} ({} notations)", url, notations.len());

        let response = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .send_string(&body);

        let text = read_response(response, &url)?;
        parse_hgvs_response(&text)
    }

    /// Annotate a single HGVS notation.
    pub fn hgvs_get(&self, notation: &str) -> Result<EnrichmentResult> {
        let url = format!("{}/{}", self.hgvs_url(), notation);
        debug!("GET {}", url);

        let response = self
            .agent
            .get(&url)
            .set("Content-Type", "application/json")
            .call();

        let text = read_response(response, &url)?;
        let result = first_hgvs_result(&text)?;

        if let Some(error) = result.error() {
            warn!("VEP could not annotate {}: {}", notation, error);
        }
        Ok(result)
    }
}

impl EnrichmentService for VepClient {
    fn enrich(&self, notations: &[String]) -> Result<Vec<EnrichmentResult>> {
        self.hgvs_post(notations)
    }
}

/// JSON body of a batched HGVS request.
pub fn hgvs_request_body(notations: &[String]) -> Value {
    json!({ "hgvs_notations": notations })
}

/// Split a VEP HGVS response body into its result objects.
///
/// A top-level object carrying `error` means the whole request was refused.
pub fn parse_hgvs_response(body: &str) -> Result<Vec<EnrichmentResult>> {
    let value: Value = serde_json::from_str(body).context("VEP response is not valid JSON")?;

    match value {
        Value::Array(items) => Ok(items.into_iter().map(EnrichmentResult::new).collect()),
        Value::Object(ref fields) if fields.contains_key("error") => {
            Err(anyhow!("VEP request was rejected: {}", fields["error"]))
        }
        other => Err(anyhow!("Unexpected VEP response: {}", other)),
    }
}

/// First result object of a VEP HGVS response; the no-data placeholder when the
/// list is empty.
pub fn first_hgvs_result(body: &str) -> Result<EnrichmentResult> {
    Ok(parse_hgvs_response(body)?
        .into_iter()
        .next()
        .unwrap_or_else(EnrichmentResult::no_data))
}

fn read_response(response: Result<ureq::Response, ureq::Error>, url: &str) -> Result<String> {
    match response {
        Ok(response) => response
            .into_string()
            .with_context(|| format!("Failed to read VEP response from {}", url)),
        Err(ureq::Error::Status(code, response)) => {
            let body = response.into_string().unwrap_or_default();
            Err(anyhow!(
                "VEP request to {} failed with status {}: {}",
                url,
                code,
                body
            ))
        }
        Err(err) => Err(err).with_context(|| format!("VEP request to {} failed", url)),
    }
}
