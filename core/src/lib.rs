//! Client core for the Delphi Epidata API.
//!
//! # Overview
//! A fixed catalog of endpoints, each mapping typed parameters onto one GET
//! request and normalizing the JSON reply into a `(result, message, epidata)`
//! triple delivered to a callback.
//!
//! # Design
//! - `Epidata` is stateless: it holds the base URL and an injected
//!   `Transport`.
//! - Validation happens before any request exists. Invalid calls return
//!   `ValidationError`; transport and decoding failures never surface as
//!   errors and reach the callback as `(0, "unknown error", None)`.
//! - `build_request` / `parse_response` expose the I/O boundary so hosts can
//!   run the round-trip themselves (see the `epidata-ffi` crate).
//!
//! ```no_run
//! use epidata_core::{range, Epidata, FluviewParams, UreqTransport};
//!
//! let epidata = Epidata::with_transport(UreqTransport::new());
//! epidata.fluview(
//!     |result, message, epidata| println!("{result} {message} {epidata:?}"),
//!     FluviewParams {
//!         regions: Some("nat".into()),
//!         epiweeks: Some(range(201440, 201501).into()),
//!         ..Default::default()
//!     },
//! )?;
//! # Ok::<(), epidata_core::ValidationError>(())
//! ```

pub mod catalog;
pub mod client;
pub mod codec;
pub mod config;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod http;
pub mod params;
pub mod transport;

pub use catalog::{
    AfhsbParams, CdcParams, CovidcastParams, DelphiParams, EcdcIliParams, Endpoint,
    EndpointParams, FlusurvParams, FluviewClinicalParams, FluviewParams, GftParams, GhtParams,
    MetaAfhsbParams, MetaNorostatParams, NidssDengueParams, NidssFluParams, NorostatParams,
    NowcastParams, ParameterSpec, Query, QuidelParams, SensorsParams, TwitterParams, WikiParams,
};
pub use client::Epidata;
pub use codec::{range, serialize_list, serialize_value, Range, Value, ValueList};
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use envelope::ResponseEnvelope;
pub use error::{TransportError, ValidationError};
pub use executor::Callback;
pub use http::{HttpRequest, HttpResponse};
pub use params::RequestParams;
pub use transport::{Done, Transport, TransportResult};

#[cfg(feature = "ureq")]
pub use transport::UreqTransport;
