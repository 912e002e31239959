//! The endpoint catalog: one parameter struct and one `ParameterSpec` per
//! data source.
//!
//! # Design
//! Validation is table-driven. Each parameter struct lists its arguments in
//! the positional order of the remote call; the shared `assemble` function
//! checks them against the endpoint's `ParameterSpec` and only then
//! serializes. A `RequestParams` therefore never exists for an invalid call.
//!
//! List-capable arguments are typed `ValueList` and always go through the
//! list codec, even for one value. Scalar arguments (tokens, free text,
//! single epiweeks, `lag`) are typed `String` / `i64` and pass through as
//! their plain string form.

use serde::Deserialize;

use crate::codec::ValueList;
use crate::error::ValidationError;
use crate::params::RequestParams;

/// Static validation rules for one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Value of the `source` query parameter. Unique within the catalog.
    pub source: &'static str,
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
    /// Pairs of which at most one may be present.
    pub exclusive: &'static [(&'static str, &'static str)],
    /// A pair of which exactly one must be present.
    pub exactly_one: Option<(&'static str, &'static str)>,
    /// Wording of the missing-required error when it departs from the
    /// generated one.
    pub required_message: Option<&'static str>,
}

const ISSUES_LAG: (&str, &str) = ("issues", "lag");
const DATES_EPIWEEKS: (&str, &str) = ("dates", "epiweeks");

const FLUVIEW: ParameterSpec = ParameterSpec {
    source: "fluview",
    required: &["regions", "epiweeks"],
    optional: &["issues", "lag", "auth"],
    exclusive: &[ISSUES_LAG],
    exactly_one: None,
    required_message: None,
};

const FLUVIEW_CLINICAL: ParameterSpec = ParameterSpec {
    source: "fluview_clinical",
    required: &["regions", "epiweeks"],
    optional: &["issues", "lag"],
    exclusive: &[ISSUES_LAG],
    exactly_one: None,
    required_message: None,
};

const FLUSURV: ParameterSpec = ParameterSpec {
    source: "flusurv",
    required: &["locations", "epiweeks"],
    optional: &["issues", "lag"],
    exclusive: &[ISSUES_LAG],
    exactly_one: None,
    required_message: None,
};

const ECDC_ILI: ParameterSpec = ParameterSpec {
    source: "ecdc_ili",
    required: &["regions", "epiweeks"],
    optional: &["issues", "lag"],
    exclusive: &[ISSUES_LAG],
    exactly_one: None,
    required_message: None,
};

const GFT: ParameterSpec = ParameterSpec {
    source: "gft",
    required: &["locations", "epiweeks"],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

const GHT: ParameterSpec = ParameterSpec {
    source: "ght",
    required: &["auth", "locations", "epiweeks", "query"],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

const TWITTER: ParameterSpec = ParameterSpec {
    source: "twitter",
    required: &["auth", "locations"],
    optional: &["dates", "epiweeks"],
    exclusive: &[],
    exactly_one: Some(DATES_EPIWEEKS),
    required_message: None,
};

const WIKI: ParameterSpec = ParameterSpec {
    source: "wiki",
    required: &["articles"],
    optional: &["dates", "epiweeks", "hours"],
    exclusive: &[],
    exactly_one: Some(DATES_EPIWEEKS),
    required_message: None,
};

const CDC: ParameterSpec = ParameterSpec {
    source: "cdc",
    required: &["auth", "epiweeks", "locations"],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

const QUIDEL: ParameterSpec = ParameterSpec {
    source: "quidel",
    required: &["auth", "epiweeks", "locations"],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

const NOROSTAT: ParameterSpec = ParameterSpec {
    source: "norostat",
    required: &["auth", "location", "epiweeks"],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

const META_NOROSTAT: ParameterSpec = ParameterSpec {
    source: "meta_norostat",
    required: &["auth"],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

const AFHSB: ParameterSpec = ParameterSpec {
    source: "afhsb",
    required: &["auth", "locations", "epiweeks", "flu_types"],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: Some("`auth`, `locations`, `epiweeks` and `flu_types` are all required"),
};

const META_AFHSB: ParameterSpec = ParameterSpec {
    source: "meta_afhsb",
    required: &["auth"],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

const NIDSS_FLU: ParameterSpec = ParameterSpec {
    source: "nidss_flu",
    required: &["regions", "epiweeks"],
    optional: &["issues", "lag"],
    exclusive: &[ISSUES_LAG],
    exactly_one: None,
    required_message: None,
};

const NIDSS_DENGUE: ParameterSpec = ParameterSpec {
    source: "nidss_dengue",
    required: &["locations", "epiweeks"],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

const DELPHI: ParameterSpec = ParameterSpec {
    source: "delphi",
    required: &["system", "epiweek"],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

const SENSORS: ParameterSpec = ParameterSpec {
    source: "sensors",
    required: &["auth", "names", "locations", "epiweeks"],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

const NOWCAST: ParameterSpec = ParameterSpec {
    source: "nowcast",
    required: &["locations", "epiweeks"],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

const COVIDCAST: ParameterSpec = ParameterSpec {
    source: "covidcast",
    required: &["data_source", "signals", "time_type", "geo_type", "time_values", "geo_value"],
    optional: &["as_of", "issues", "lag"],
    exclusive: &[ISSUES_LAG],
    exactly_one: None,
    required_message: None,
};

const COVIDCAST_META: ParameterSpec = ParameterSpec {
    source: "covidcast_meta",
    required: &[],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

const META: ParameterSpec = ParameterSpec {
    source: "meta",
    required: &[],
    optional: &[],
    exclusive: &[],
    exactly_one: None,
    required_message: None,
};

/// Every data source in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Fluview,
    FluviewClinical,
    Flusurv,
    EcdcIli,
    Gft,
    Ght,
    Twitter,
    Wiki,
    Cdc,
    Quidel,
    Norostat,
    MetaNorostat,
    Afhsb,
    MetaAfhsb,
    NidssFlu,
    NidssDengue,
    Delphi,
    Sensors,
    Nowcast,
    Covidcast,
    CovidcastMeta,
    Meta,
}

impl Endpoint {
    pub const ALL: [Endpoint; 22] = [
        Endpoint::Fluview,
        Endpoint::FluviewClinical,
        Endpoint::Flusurv,
        Endpoint::EcdcIli,
        Endpoint::Gft,
        Endpoint::Ght,
        Endpoint::Twitter,
        Endpoint::Wiki,
        Endpoint::Cdc,
        Endpoint::Quidel,
        Endpoint::Norostat,
        Endpoint::MetaNorostat,
        Endpoint::Afhsb,
        Endpoint::MetaAfhsb,
        Endpoint::NidssFlu,
        Endpoint::NidssDengue,
        Endpoint::Delphi,
        Endpoint::Sensors,
        Endpoint::Nowcast,
        Endpoint::Covidcast,
        Endpoint::CovidcastMeta,
        Endpoint::Meta,
    ];

    pub const fn spec(self) -> &'static ParameterSpec {
        match self {
            Endpoint::Fluview => &FLUVIEW,
            Endpoint::FluviewClinical => &FLUVIEW_CLINICAL,
            Endpoint::Flusurv => &FLUSURV,
            Endpoint::EcdcIli => &ECDC_ILI,
            Endpoint::Gft => &GFT,
            Endpoint::Ght => &GHT,
            Endpoint::Twitter => &TWITTER,
            Endpoint::Wiki => &WIKI,
            Endpoint::Cdc => &CDC,
            Endpoint::Quidel => &QUIDEL,
            Endpoint::Norostat => &NOROSTAT,
            Endpoint::MetaNorostat => &META_NOROSTAT,
            Endpoint::Afhsb => &AFHSB,
            Endpoint::MetaAfhsb => &META_AFHSB,
            Endpoint::NidssFlu => &NIDSS_FLU,
            Endpoint::NidssDengue => &NIDSS_DENGUE,
            Endpoint::Delphi => &DELPHI,
            Endpoint::Sensors => &SENSORS,
            Endpoint::Nowcast => &NOWCAST,
            Endpoint::Covidcast => &COVIDCAST,
            Endpoint::CovidcastMeta => &COVIDCAST_META,
            Endpoint::Meta => &META,
        }
    }

    /// The `source` discriminator, which doubles as the endpoint name.
    pub const fn source(self) -> &'static str {
        self.spec().source
    }

    pub fn from_source(source: &str) -> Option<Endpoint> {
        Endpoint::ALL.into_iter().find(|e| e.source() == source)
    }
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// One argument value in the form it goes on the wire.
#[derive(Debug, Clone, Copy)]
enum Wire<'a> {
    List(&'a ValueList),
    Text(&'a str),
    Int(i64),
}

impl Wire<'_> {
    fn render(self) -> String {
        match self {
            Wire::List(values) => values.to_string(),
            Wire::Text(s) => s.to_string(),
            Wire::Int(n) => n.to_string(),
        }
    }
}

type Argument<'a> = (&'static str, Option<Wire<'a>>);

fn list<'a>(name: &'static str, value: &'a Option<ValueList>) -> Argument<'a> {
    (name, value.as_ref().map(Wire::List))
}

fn text<'a>(name: &'static str, value: &'a Option<String>) -> Argument<'a> {
    (name, value.as_deref().map(Wire::Text))
}

fn int(name: &'static str, value: Option<i64>) -> Argument<'static> {
    (name, value.map(Wire::Int))
}

fn assemble(spec: &'static ParameterSpec, args: &[Argument<'_>]) -> Result<RequestParams, ValidationError> {
    let present = |name: &str| args.iter().any(|(n, v)| *n == name && v.is_some());

    if !spec.required.iter().all(|name| present(name)) {
        return Err(ValidationError::MissingRequired {
            required: spec.required.to_vec(),
            message: spec.required_message,
        });
    }
    for &(a, b) in spec.exclusive {
        if present(a) && present(b) {
            return Err(ValidationError::MutuallyExclusive(a, b));
        }
    }
    if let Some((a, b)) = spec.exactly_one {
        if present(a) == present(b) {
            return Err(ValidationError::ExactlyOneOf(a, b));
        }
    }

    let mut params = RequestParams::new(spec.source);
    for &(name, value) in args {
        if let Some(value) = value {
            params.push(name, value.render());
        }
    }
    Ok(params)
}

/// Parameters of one endpoint, in the positional order of the remote call.
pub trait EndpointParams {
    const ENDPOINT: Endpoint;

    /// Validate against the endpoint's `ParameterSpec` and serialize.
    fn build_params(&self) -> Result<RequestParams, ValidationError>;
}

macro_rules! endpoint_params {
    ($ty:ty, $endpoint:expr, |$p:ident| [$($arg:expr),* $(,)?]) => {
        impl EndpointParams for $ty {
            const ENDPOINT: Endpoint = $endpoint;

            fn build_params(&self) -> Result<RequestParams, ValidationError> {
                let $p = self;
                assemble(Self::ENDPOINT.spec(), &[$($arg),*])
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Parameter structs
// ---------------------------------------------------------------------------

/// ILINet and WHO/NREVSS influenza surveillance.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FluviewParams {
    pub regions: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
    pub issues: Option<ValueList>,
    pub lag: Option<i64>,
    pub auth: Option<String>,
}

endpoint_params!(FluviewParams, Endpoint::Fluview, |p| [
    list("regions", &p.regions),
    list("epiweeks", &p.epiweeks),
    list("issues", &p.issues),
    int("lag", p.lag),
    text("auth", &p.auth),
]);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FluviewClinicalParams {
    pub regions: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
    pub issues: Option<ValueList>,
    pub lag: Option<i64>,
}

endpoint_params!(FluviewClinicalParams, Endpoint::FluviewClinical, |p| [
    list("regions", &p.regions),
    list("epiweeks", &p.epiweeks),
    list("issues", &p.issues),
    int("lag", p.lag),
]);

/// FluSurv-NET hospitalization rates.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlusurvParams {
    pub locations: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
    pub issues: Option<ValueList>,
    pub lag: Option<i64>,
}

endpoint_params!(FlusurvParams, Endpoint::Flusurv, |p| [
    list("locations", &p.locations),
    list("epiweeks", &p.epiweeks),
    list("issues", &p.issues),
    int("lag", p.lag),
]);

/// ECDC influenza-like illness incidence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EcdcIliParams {
    pub regions: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
    pub issues: Option<ValueList>,
    pub lag: Option<i64>,
}

endpoint_params!(EcdcIliParams, Endpoint::EcdcIli, |p| [
    list("regions", &p.regions),
    list("epiweeks", &p.epiweeks),
    list("issues", &p.issues),
    int("lag", p.lag),
]);

/// Google Flu Trends.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GftParams {
    pub locations: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
}

endpoint_params!(GftParams, Endpoint::Gft, |p| [
    list("locations", &p.locations),
    list("epiweeks", &p.epiweeks),
]);

/// Google Health Trends.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GhtParams {
    pub auth: Option<String>,
    pub locations: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
    pub query: Option<String>,
}

endpoint_params!(GhtParams, Endpoint::Ght, |p| [
    text("auth", &p.auth),
    list("locations", &p.locations),
    list("epiweeks", &p.epiweeks),
    text("query", &p.query),
]);

/// HealthTweets. Exactly one of `dates` and `epiweeks`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TwitterParams {
    pub auth: Option<String>,
    pub locations: Option<ValueList>,
    pub dates: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
}

endpoint_params!(TwitterParams, Endpoint::Twitter, |p| [
    text("auth", &p.auth),
    list("locations", &p.locations),
    list("dates", &p.dates),
    list("epiweeks", &p.epiweeks),
]);

/// Wikipedia access counts. Exactly one of `dates` and `epiweeks`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WikiParams {
    pub articles: Option<ValueList>,
    pub dates: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
    pub hours: Option<ValueList>,
}

endpoint_params!(WikiParams, Endpoint::Wiki, |p| [
    list("articles", &p.articles),
    list("dates", &p.dates),
    list("epiweeks", &p.epiweeks),
    list("hours", &p.hours),
]);

/// CDC page hits.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CdcParams {
    pub auth: Option<String>,
    pub epiweeks: Option<ValueList>,
    pub locations: Option<ValueList>,
}

endpoint_params!(CdcParams, Endpoint::Cdc, |p| [
    text("auth", &p.auth),
    list("epiweeks", &p.epiweeks),
    list("locations", &p.locations),
]);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuidelParams {
    pub auth: Option<String>,
    pub epiweeks: Option<ValueList>,
    pub locations: Option<ValueList>,
}

endpoint_params!(QuidelParams, Endpoint::Quidel, |p| [
    text("auth", &p.auth),
    list("epiweeks", &p.epiweeks),
    list("locations", &p.locations),
]);

/// NoroSTAT. Takes a single `location`, not a list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NorostatParams {
    pub auth: Option<String>,
    pub location: Option<String>,
    pub epiweeks: Option<ValueList>,
}

endpoint_params!(NorostatParams, Endpoint::Norostat, |p| [
    text("auth", &p.auth),
    text("location", &p.location),
    list("epiweeks", &p.epiweeks),
]);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaNorostatParams {
    pub auth: Option<String>,
}

endpoint_params!(MetaNorostatParams, Endpoint::MetaNorostat, |p| [text("auth", &p.auth)]);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AfhsbParams {
    pub auth: Option<String>,
    pub locations: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
    pub flu_types: Option<ValueList>,
}

endpoint_params!(AfhsbParams, Endpoint::Afhsb, |p| [
    text("auth", &p.auth),
    list("locations", &p.locations),
    list("epiweeks", &p.epiweeks),
    list("flu_types", &p.flu_types),
]);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaAfhsbParams {
    pub auth: Option<String>,
}

endpoint_params!(MetaAfhsbParams, Endpoint::MetaAfhsb, |p| [text("auth", &p.auth)]);

/// Taiwan NIDSS influenza.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NidssFluParams {
    pub regions: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
    pub issues: Option<ValueList>,
    pub lag: Option<i64>,
}

endpoint_params!(NidssFluParams, Endpoint::NidssFlu, |p| [
    list("regions", &p.regions),
    list("epiweeks", &p.epiweeks),
    list("issues", &p.issues),
    int("lag", p.lag),
]);

/// Taiwan NIDSS dengue.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NidssDengueParams {
    pub locations: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
}

endpoint_params!(NidssDengueParams, Endpoint::NidssDengue, |p| [
    list("locations", &p.locations),
    list("epiweeks", &p.epiweeks),
]);

/// Delphi forecasts. `epiweek` is a single week, not a list.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DelphiParams {
    pub system: Option<String>,
    pub epiweek: Option<i64>,
}

endpoint_params!(DelphiParams, Endpoint::Delphi, |p| [
    text("system", &p.system),
    int("epiweek", p.epiweek),
]);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SensorsParams {
    pub auth: Option<String>,
    pub names: Option<ValueList>,
    pub locations: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
}

endpoint_params!(SensorsParams, Endpoint::Sensors, |p| [
    text("auth", &p.auth),
    list("names", &p.names),
    list("locations", &p.locations),
    list("epiweeks", &p.epiweeks),
]);

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NowcastParams {
    pub locations: Option<ValueList>,
    pub epiweeks: Option<ValueList>,
}

endpoint_params!(NowcastParams, Endpoint::Nowcast, |p| [
    list("locations", &p.locations),
    list("epiweeks", &p.epiweeks),
]);

/// COVIDcast signals. At most one of `as_of`, `issues` and `lag`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CovidcastParams {
    pub data_source: Option<String>,
    pub signals: Option<ValueList>,
    pub time_type: Option<String>,
    pub geo_type: Option<String>,
    pub time_values: Option<ValueList>,
    pub geo_value: Option<ValueList>,
    pub as_of: Option<i64>,
    pub issues: Option<ValueList>,
    pub lag: Option<i64>,
}

endpoint_params!(CovidcastParams, Endpoint::Covidcast, |p| [
    text("data_source", &p.data_source),
    list("signals", &p.signals),
    text("time_type", &p.time_type),
    text("geo_type", &p.geo_type),
    list("time_values", &p.time_values),
    list("geo_value", &p.geo_value),
    int("as_of", p.as_of),
    list("issues", &p.issues),
    int("lag", p.lag),
]);

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// A complete call to one endpoint.
///
/// Deserializes from JSON tagged by `endpoint`, e.g.
/// `{"endpoint": "fluview", "regions": "nat", "epiweeks": [201440]}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "endpoint", rename_all = "snake_case")]
pub enum Query {
    Fluview(FluviewParams),
    FluviewClinical(FluviewClinicalParams),
    Flusurv(FlusurvParams),
    EcdcIli(EcdcIliParams),
    Gft(GftParams),
    Ght(GhtParams),
    Twitter(TwitterParams),
    Wiki(WikiParams),
    Cdc(CdcParams),
    Quidel(QuidelParams),
    Norostat(NorostatParams),
    MetaNorostat(MetaNorostatParams),
    Afhsb(AfhsbParams),
    MetaAfhsb(MetaAfhsbParams),
    NidssFlu(NidssFluParams),
    NidssDengue(NidssDengueParams),
    Delphi(DelphiParams),
    Sensors(SensorsParams),
    Nowcast(NowcastParams),
    Covidcast(CovidcastParams),
    CovidcastMeta,
    Meta,
}

impl Query {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            Query::Fluview(_) => Endpoint::Fluview,
            Query::FluviewClinical(_) => Endpoint::FluviewClinical,
            Query::Flusurv(_) => Endpoint::Flusurv,
            Query::EcdcIli(_) => Endpoint::EcdcIli,
            Query::Gft(_) => Endpoint::Gft,
            Query::Ght(_) => Endpoint::Ght,
            Query::Twitter(_) => Endpoint::Twitter,
            Query::Wiki(_) => Endpoint::Wiki,
            Query::Cdc(_) => Endpoint::Cdc,
            Query::Quidel(_) => Endpoint::Quidel,
            Query::Norostat(_) => Endpoint::Norostat,
            Query::MetaNorostat(_) => Endpoint::MetaNorostat,
            Query::Afhsb(_) => Endpoint::Afhsb,
            Query::MetaAfhsb(_) => Endpoint::MetaAfhsb,
            Query::NidssFlu(_) => Endpoint::NidssFlu,
            Query::NidssDengue(_) => Endpoint::NidssDengue,
            Query::Delphi(_) => Endpoint::Delphi,
            Query::Sensors(_) => Endpoint::Sensors,
            Query::Nowcast(_) => Endpoint::Nowcast,
            Query::Covidcast(_) => Endpoint::Covidcast,
            Query::CovidcastMeta => Endpoint::CovidcastMeta,
            Query::Meta => Endpoint::Meta,
        }
    }

    /// Validate and serialize into the flat parameter set.
    pub fn build_params(&self) -> Result<RequestParams, ValidationError> {
        match self {
            Query::Fluview(p) => p.build_params(),
            Query::FluviewClinical(p) => p.build_params(),
            Query::Flusurv(p) => p.build_params(),
            Query::EcdcIli(p) => p.build_params(),
            Query::Gft(p) => p.build_params(),
            Query::Ght(p) => p.build_params(),
            Query::Twitter(p) => p.build_params(),
            Query::Wiki(p) => p.build_params(),
            Query::Cdc(p) => p.build_params(),
            Query::Quidel(p) => p.build_params(),
            Query::Norostat(p) => p.build_params(),
            Query::MetaNorostat(p) => p.build_params(),
            Query::Afhsb(p) => p.build_params(),
            Query::MetaAfhsb(p) => p.build_params(),
            Query::NidssFlu(p) => p.build_params(),
            Query::NidssDengue(p) => p.build_params(),
            Query::Delphi(p) => p.build_params(),
            Query::Sensors(p) => p.build_params(),
            Query::Nowcast(p) => p.build_params(),
            Query::Covidcast(p) => p.build_params(),
            Query::CovidcastMeta => assemble(&COVIDCAST_META, &[]),
            Query::Meta => assemble(&META, &[]),
        }
    }
}

macro_rules! query_from_params {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Query {
                fn from(params: $ty) -> Self {
                    Query::$variant(params)
                }
            }
        )*
    };
}

query_from_params!(
    FluviewParams => Fluview,
    FluviewClinicalParams => FluviewClinical,
    FlusurvParams => Flusurv,
    EcdcIliParams => EcdcIli,
    GftParams => Gft,
    GhtParams => Ght,
    TwitterParams => Twitter,
    WikiParams => Wiki,
    CdcParams => Cdc,
    QuidelParams => Quidel,
    NorostatParams => Norostat,
    MetaNorostatParams => MetaNorostat,
    AfhsbParams => Afhsb,
    MetaAfhsbParams => MetaAfhsb,
    NidssFluParams => NidssFlu,
    NidssDengueParams => NidssDengue,
    DelphiParams => Delphi,
    SensorsParams => Sensors,
    NowcastParams => Nowcast,
    CovidcastParams => Covidcast,
);
