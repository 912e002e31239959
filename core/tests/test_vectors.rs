//! Verify query building against JSON test vectors stored in `test-vectors/`.
//!
//! Each case is a JSON query plus either the expected ordered parameter list
//! (and optionally the exact encoded query string) or the expected
//! validation message.

use std::collections::HashSet;

use epidata_core::{Endpoint, Epidata, Query, Transport};

/// The vectors never reach the network; any dispatch is a test bug.
struct Unreachable;

impl Transport for Unreachable {
    fn get(&self, request: epidata_core::HttpRequest, _done: epidata_core::Done) {
        panic!("unexpected request to {}", request.url());
    }
}

fn vectors() -> serde_json::Value {
    let raw = include_str!("../../test-vectors/queries.json");
    serde_json::from_str(raw).unwrap()
}

#[test]
fn query_test_vectors() {
    let vectors = vectors();
    let base_url = vectors["base_url"].as_str().unwrap();
    let client = Epidata::new(base_url, Unreachable);

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let query: Query = serde_json::from_value(case["query"].clone())
            .unwrap_or_else(|e| panic!("{name}: query does not decode: {e}"));

        match client.build_request(&query) {
            Ok(req) => {
                let expected = case["expected_params"]
                    .as_array()
                    .unwrap_or_else(|| panic!("{name}: built params but expected an error"));
                let expected: Vec<(String, String)> = expected
                    .iter()
                    .map(|pair| {
                        let pair = pair.as_array().unwrap();
                        (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
                    })
                    .collect();
                let actual: Vec<(String, String)> = req
                    .params
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();
                assert_eq!(actual, expected, "{name}: params");

                if let Some(query_string) = case["expected_query"].as_str() {
                    assert_eq!(req.url(), format!("{base_url}?{query_string}"), "{name}: url");
                }
            }
            Err(err) => {
                let expected = case["expected_error"]
                    .as_str()
                    .unwrap_or_else(|| panic!("{name}: unexpected validation error: {err}"));
                assert_eq!(err.to_string(), expected, "{name}: error message");
            }
        }
    }
}

#[test]
fn vectors_cover_every_endpoint() {
    let vectors = vectors();
    let covered: HashSet<&str> = vectors["cases"]
        .as_array()
        .unwrap()
        .iter()
        .map(|case| case["query"]["endpoint"].as_str().unwrap())
        .collect();

    for endpoint in Endpoint::ALL {
        assert!(covered.contains(endpoint.source()), "no vector for {}", endpoint.source());
    }
}
