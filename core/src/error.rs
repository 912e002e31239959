//! Error types for the epidata client.
//!
//! # Design
//! Two disjoint channels. `ValidationError` is returned synchronously before
//! any request is built, so a caller can always tell a malformed call apart
//! from a remote failure. `TransportError` never reaches the caller: the
//! executor logs it and delivers the `(0, "unknown error", None)` triple
//! through the callback instead.

use thiserror::Error;

/// A call that cannot be sent as given. Never retried; the caller must fix
/// the arguments.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// At least one required parameter is absent. Carries every required
    /// name of the endpoint, in declaration order, and the endpoint's own
    /// wording when it has one.
    #[error("{}", required_message(.required, *.message))]
    MissingRequired {
        required: Vec<&'static str>,
        message: Option<&'static str>,
    },

    /// Both members of an at-most-one-of pair are present.
    #[error("`{0}` and `{1}` are mutually exclusive")]
    MutuallyExclusive(&'static str, &'static str),

    /// Neither or both members of an exactly-one-of pair are present.
    #[error("exactly one of `{0}` and `{1}` is required")]
    ExactlyOneOf(&'static str, &'static str),
}

impl ValidationError {
    /// Missing-required error with the generated wording.
    pub fn missing_required(required: &[&'static str]) -> Self {
        ValidationError::MissingRequired {
            required: required.to_vec(),
            message: None,
        }
    }
}

fn required_message(names: &[&'static str], message: Option<&'static str>) -> String {
    if let Some(message) = message {
        return message.to_string();
    }
    let quoted: Vec<String> = names.iter().map(|name| format!("`{name}`")).collect();
    match quoted.as_slice() {
        [] => String::from("missing required parameters"),
        [only] => format!("{only} is required"),
        [first, second] => format!("{first} and {second} are both required"),
        [init @ .., last] => format!("{}, and {last} are all required", init.join(", ")),
    }
}

/// Failure between the transport and the executor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or no response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The configured timeout elapsed before the response completed.
    #[error("request timed out after {0} ms")]
    Timeout(u64),

    /// A response arrived but its body could not be read as text.
    #[error("could not read response body: {0}")]
    Body(String),
}
