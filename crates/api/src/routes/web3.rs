//! Web3 voting routes.
//!
//! Pure route table: each handler hands its input to the voting service and
//! relays whatever comes back.

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    routing::{get, post},
};
use civica_core::voting::{VotingError, VotingReply};
use serde_json::Value;

use crate::{ApiResponse, AppState};

/// Creates the voting routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/vote", post(cast_vote))
        .route("/candidate", post(add_candidate))
        .route("/{id}/candidate", get(get_candidate))
        .route("/mint", post(mint_vote_proof))
}

/// Empty bodies become `null` and are refused by the service.
fn json_body(body: &[u8]) -> Result<Value, VotingError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|e| VotingError::Validation(format!("Invalid request body: {e}")))
}

/// POST `/web3/vote`
async fn cast_vote(State(state): State<AppState>, body: Bytes) -> ApiResponse {
    match json_body(&body) {
        Ok(request) => state.voting.cast_vote(request).await.into(),
        Err(err) => ApiResponse::from(Err::<VotingReply, _>(err)),
    }
}

/// POST `/web3/candidate`
async fn add_candidate(State(state): State<AppState>, body: Bytes) -> ApiResponse {
    match json_body(&body) {
        Ok(request) => state.voting.add_candidate(request).await.into(),
        Err(err) => ApiResponse::from(Err::<VotingReply, _>(err)),
    }
}

/// GET `/web3/{id}/candidate`
async fn get_candidate(State(state): State<AppState>, Path(id): Path<String>) -> ApiResponse {
    state.voting.get_candidate(&id).await.into()
}

/// POST `/web3/mint`
async fn mint_vote_proof(State(state): State<AppState>, body: Bytes) -> ApiResponse {
    match json_body(&body) {
        Ok(request) => state.voting.mint_vote_proof(request).await.into(),
        Err(err) => ApiResponse::from(Err::<VotingReply, _>(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{body_json, test_state};
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use rstest::rstest;
    use serde_json::json;
    use tower::ServiceExt;

    #[rstest]
    #[case("/vote", "cast_vote")]
    #[case("/candidate", "add_candidate")]
    #[case("/mint", "mint_vote_proof")]
    #[tokio::test]
    async fn test_post_routes_relay_body(#[case] uri: &str, #[case] op: &str) {
        let (state, fakes) = test_state();
        let app = Router::new().merge(routes()).with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(r#"{"voterId":"v-1","candidateId":"c-7"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let input = json!({ "voterId": "v-1", "candidateId": "c-7" });
        assert_eq!(json, json!({ "op": op, "input": input }));
        assert_eq!(fakes.voting.calls(), vec![(op.to_string(), input)]);
    }

    #[tokio::test]
    async fn test_get_candidate_passes_path_id() {
        let (state, fakes) = test_state();
        let app = Router::new().merge(routes()).with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/c-7/candidate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            fakes.voting.calls(),
            vec![("get_candidate".to_string(), json!("c-7"))]
        );
    }

    #[tokio::test]
    async fn test_gateway_failure_returns_envelope() {
        let (state, _) = test_state();
        let app = Router::new().merge(routes()).with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/broken/candidate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["status"], 500);
        assert!(json["message"].as_str().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected_before_gateway() {
        let (state, fakes) = test_state();
        let app = Router::new().merge(routes()).with_state(state);

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/vote")
                    .body(Body::from("{oops"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(fakes.voting.calls().is_empty());
    }

    #[test]
    fn test_empty_body_is_null() {
        assert_eq!(json_body(b"  ").unwrap(), Value::Null);
    }
}
