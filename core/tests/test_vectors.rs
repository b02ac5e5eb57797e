//! Verify build/parse of `find_users` against JSON vectors in `test-vectors/`.
//!
//! Query parameters are compared as decoded key/value pairs, not as raw
//! strings, so encoding and ordering details do not cause false negatives.

use std::collections::BTreeMap;

use search_core::{
    ClientConfig, HttpResponse, SearchClient, SearchError, SearchRequest, SearchResponse,
    ACCESS_TOKEN_HEADER,
};

const BASE_URL: &str = "http://localhost:3000";
const TOKEN: &str = "abc";

fn client() -> SearchClient {
    SearchClient::new(ClientConfig::new(BASE_URL, TOKEN))
}

fn vectors() -> serde_json::Value {
    serde_json::from_str(include_str!("../../test-vectors/find_users.json")).unwrap()
}

fn kind(err: &SearchError) -> &'static str {
    match err {
        SearchError::BadRequestParams(_) => "BadRequestParams",
        SearchError::InvalidOrderField(_) => "InvalidOrderField",
        SearchError::Unauthorized => "Unauthorized",
        SearchError::Timeout(_) => "Timeout",
        SearchError::NetworkFailure(_) => "NetworkFailure",
        SearchError::UnexpectedServerResponse { .. } => "UnexpectedServerResponse",
        SearchError::InternalServerFailure(_) => "InternalServerFailure",
    }
}

#[test]
fn build_error_vectors() {
    let c = client();
    for case in vectors()["build_errors"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let request: SearchRequest = serde_json::from_value(case["request"].clone()).unwrap();

        let err = c.build_find_users(&request).unwrap_err();
        assert_eq!(kind(&err), case["expected_error"].as_str().unwrap(), "{name}: kind");
        assert_eq!(
            err.to_string(),
            format!("bad request params: {}", case["expected_message"].as_str().unwrap()),
            "{name}: message"
        );
    }
}

#[test]
fn find_users_vectors() {
    let c = client();
    for case in vectors()["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let request: SearchRequest = serde_json::from_value(case["request"].clone()).unwrap();
        let expected_req = &case["expected_request"];

        // Verify build
        let req = c.build_find_users(&request).unwrap();
        let (path, query) = req.url.split_once('?').unwrap();
        assert_eq!(
            path,
            format!("{BASE_URL}{}", expected_req["path"].as_str().unwrap()),
            "{name}: path"
        );
        let sent: BTreeMap<String, String> = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        let expected_query: BTreeMap<String, String> =
            serde_json::from_value(expected_req["query"].clone()).unwrap();
        assert_eq!(sent, expected_query, "{name}: query");
        assert_eq!(req.header(ACCESS_TOKEN_HEADER), Some(TOKEN), "{name}: token");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = c.parse_find_users(&request, response);

        match case.get("expected_error") {
            Some(expected) => {
                let err = result.unwrap_err();
                assert_eq!(kind(&err), expected.as_str().unwrap(), "{name}: error kind");
            }
            None => {
                let resp = result.unwrap();
                let expected: SearchResponse =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(resp, expected, "{name}: parsed result");
            }
        }
    }
}
