//! Stateless client for the Epidata API.
//!
//! # Design
//! `Epidata` holds only the base URL and the injected transport. Each call is
//! split the same way: `build_request` validates a `Query` and produces an
//! `HttpRequest`; the executor runs it and `parse_response` turns the body
//! into a `ResponseEnvelope`. Hosts that do their own I/O can use the two
//! halves directly; everyone else calls the per-endpoint methods, which
//! return `Err` before any I/O when validation fails and otherwise deliver
//! exactly one callback.

use std::sync::Arc;

use serde_json::Value as Json;

use crate::catalog::{
    AfhsbParams, CdcParams, CovidcastParams, DelphiParams, EcdcIliParams, FlusurvParams,
    FluviewClinicalParams, FluviewParams, GftParams, GhtParams, MetaAfhsbParams,
    MetaNorostatParams, NidssDengueParams, NidssFluParams, NorostatParams, NowcastParams, Query,
    QuidelParams, SensorsParams, TwitterParams, WikiParams,
};
use crate::config::{ClientConfig, DEFAULT_BASE_URL};
use crate::envelope::ResponseEnvelope;
use crate::error::ValidationError;
use crate::executor;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Client for the Epidata API.
#[derive(Clone)]
pub struct Epidata {
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl Epidata {
    pub fn new(base_url: &str, transport: impl Transport + 'static) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport: Arc::new(transport),
        }
    }

    /// Client against the public API.
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self::new(DEFAULT_BASE_URL, transport)
    }

    pub fn from_config(config: &ClientConfig, transport: impl Transport + 'static) -> Self {
        Self::new(&config.base_url, transport)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_request(&self, query: &Query) -> Result<HttpRequest, ValidationError> {
        Ok(HttpRequest {
            base_url: self.base_url.clone(),
            params: query.build_params()?,
        })
    }

    pub fn parse_response(&self, response: HttpResponse) -> ResponseEnvelope {
        ResponseEnvelope::from_transport(Ok(response))
    }

    /// Validate `query` and send it. `callback` receives
    /// `(result, message, epidata)` exactly once unless this returns `Err`,
    /// in which case it is never called.
    pub fn request<F>(&self, callback: F, query: impl Into<Query>) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        let request = self.build_request(&query.into())?;
        executor::execute(self.transport.as_ref(), request, Box::new(callback));
        Ok(())
    }

    pub fn fluview<F>(&self, callback: F, params: FluviewParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn fluview_clinical<F>(&self, callback: F, params: FluviewClinicalParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn flusurv<F>(&self, callback: F, params: FlusurvParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn ecdc_ili<F>(&self, callback: F, params: EcdcIliParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn gft<F>(&self, callback: F, params: GftParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn ght<F>(&self, callback: F, params: GhtParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn twitter<F>(&self, callback: F, params: TwitterParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn wiki<F>(&self, callback: F, params: WikiParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn cdc<F>(&self, callback: F, params: CdcParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn quidel<F>(&self, callback: F, params: QuidelParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn norostat<F>(&self, callback: F, params: NorostatParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn meta_norostat<F>(&self, callback: F, params: MetaNorostatParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn afhsb<F>(&self, callback: F, params: AfhsbParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn meta_afhsb<F>(&self, callback: F, params: MetaAfhsbParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn nidss_flu<F>(&self, callback: F, params: NidssFluParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn nidss_dengue<F>(&self, callback: F, params: NidssDengueParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn delphi<F>(&self, callback: F, params: DelphiParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn sensors<F>(&self, callback: F, params: SensorsParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn nowcast<F>(&self, callback: F, params: NowcastParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn covidcast<F>(&self, callback: F, params: CovidcastParams) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, params)
    }

    pub fn covidcast_meta<F>(&self, callback: F) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, Query::CovidcastMeta)
    }

    /// API metadata. Takes no data parameters and cannot fail validation.
    pub fn meta<F>(&self, callback: F) -> Result<(), ValidationError>
    where
        F: FnOnce(i64, String, Option<Vec<Json>>) + Send + 'static,
    {
        self.request(callback, Query::Meta)
    }
}
