//! HTTP API tests driving the router in-process

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use proptest::prelude::*;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tower::ServiceExt;

use core_kernel::{Identity, PolicyKind};
use interface_api::{auth::create_token, config::ApiConfig, create_router};
use test_utils::{RecordingRail, TestNetwork, TestNetworkBuilder};

const SECRET: &str = "test-secret";

struct TestApi {
    app: Router,
    t: TestNetwork,
    rail: Arc<RecordingRail>,
}

impl TestApi {
    async fn new() -> Self {
        let rail = Arc::new(RecordingRail::new());
        let t = TestNetworkBuilder::new().build(rail.clone()).await;
        let config = ApiConfig {
            jwt_secret: SECRET.to_string(),
            authority: Some(t.authority.to_string()),
            ..ApiConfig::default()
        };

        Self {
            app: create_router(t.network.clone(), config),
            t,
            rail,
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        caller: Option<Identity>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(caller) = caller {
            let token = create_token(caller, SECRET, 60).unwrap();
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, value)
    }

    async fn onboard(&self, policy_kind: &str) -> Identity {
        let customer = Identity::new();
        let (status, _) = self
            .send(
                Method::POST,
                "/api/v1/customers",
                Some(self.t.authority),
                Some(json!({
                    "identity": customer,
                    "name": "Morgan Motorist",
                    "policy_kind": policy_kind,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        customer
    }

    async fn fund(&self, amount: &str) {
        let (status, _) = self
            .send(
                Method::POST,
                "/api/v1/pool/deposits",
                Some(Identity::new()),
                Some(json!({ "amount": amount })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }
}

// ============================================================================
// Authentication
// ============================================================================

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_is_public() {
        let api = TestApi::new().await;

        let (status, body) = api.send(Method::GET, "/health", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_readiness_reports_garage() {
        let api = TestApi::new().await;

        let (status, body) = api.send(Method::GET, "/health/ready", None, None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["garage_enabled"], true);
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected() {
        let api = TestApi::new().await;

        let (status, body) = api.send(Method::GET, "/api/v1/pool", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_token_with_wrong_secret_is_rejected() {
        let api = TestApi::new().await;
        let token = create_token(Identity::new(), "some-other-secret", 60).unwrap();
        let request = Request::builder()
            .uri("/api/v1/pool")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap();

        let response = api.app.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_non_authority_cannot_onboard() {
        let api = TestApi::new().await;

        let (status, body) = api
            .send(
                Method::POST,
                "/api/v1/customers",
                Some(Identity::new()),
                Some(json!({
                    "identity": Identity::new(),
                    "name": "Mallory",
                    "policy_kind": "third_party",
                })),
            )
            .await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["error"], "forbidden");
    }
}

// ============================================================================
// Settlement flow
// ============================================================================

mod settlement_tests {
    use super::*;

    #[tokio::test]
    async fn test_third_party_claim_over_http() {
        let api = TestApi::new().await;
        let customer = api.onboard("third_party").await;
        api.fund("1000").await;

        let (status, claim) = api
            .send(
                Method::POST,
                "/api/v1/claims/third-party",
                Some(customer),
                Some(json!({ "percentage": 25 })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(claim["status"], "approved");
        assert_eq!(claim["id"], 1);

        let (status, paid) = api
            .send(Method::POST, "/api/v1/claims/1/pay-third-party", Some(api.t.authority), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(paid["status"], "paid_to_third_party");
        assert_eq!(api.rail.transfers_to(customer).len(), 1);

        let (status, body) = api
            .send(Method::POST, "/api/v1/claims/CLM-1/pay-third-party", Some(api.t.authority), None)
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "conflict");
    }

    #[tokio::test]
    async fn test_all_risk_claim_and_repair_over_http() {
        let api = TestApi::new().await;
        let customer = api.onboard("all_risk").await;
        let workshop = Identity::new();
        api.fund("1000").await;

        let (status, claim) = api
            .send(
                Method::POST,
                "/api/v1/claims/all-risk",
                Some(customer),
                Some(json!({ "damage": 75 })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(claim["status"], "garage_authorized");

        let (status, order) = api
            .send(Method::POST, "/api/v1/repairs/1/complete", Some(workshop), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(order["completed"], true);
        assert_eq!(order["claim_id"], 1);

        let (status, paid) = api
            .send(
                Method::POST,
                "/api/v1/claims/1/pay-garage",
                Some(api.t.authority),
                Some(json!({ "garage_recipient": workshop })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(paid["status"], "paid_to_garage");
        assert_eq!(api.rail.transfers_to(workshop).len(), 1);
    }

    #[tokio::test]
    async fn test_policy_mismatch_is_unprocessable() {
        let api = TestApi::new().await;
        let customer = api.onboard("all_risk").await;

        let (status, _) = api
            .send(
                Method::POST,
                "/api/v1/claims/third-party",
                Some(customer),
                Some(json!({ "percentage": 10 })),
            )
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(api.t.network.claims_of(customer).await.is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_funds_is_conflict() {
        let api = TestApi::new().await;
        let customer = api.onboard("third_party").await;
        api.send(
            Method::POST,
            "/api/v1/claims/third-party",
            Some(customer),
            Some(json!({ "percentage": 25 })),
        )
        .await;

        let (status, body) = api
            .send(Method::POST, "/api/v1/claims/1/pay-third-party", Some(api.t.authority), None)
            .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert!(body["message"].as_str().unwrap().contains("Insufficient funds"));
    }

    #[tokio::test]
    async fn test_failed_transfer_is_bad_gateway() {
        let api = TestApi::new().await;
        let customer = api.onboard("third_party").await;
        api.fund("1000").await;
        api.send(
            Method::POST,
            "/api/v1/claims/third-party",
            Some(customer),
            Some(json!({ "percentage": 25 })),
        )
        .await;
        api.rail.refuse(customer);

        let (status, _) = api
            .send(Method::POST, "/api/v1/claims/1/pay-third-party", Some(api.t.authority), None)
            .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }
}

// ============================================================================
// Queries and input handling
// ============================================================================

mod query_tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_claim_is_not_found() {
        let api = TestApi::new().await;

        let (status, body) = api.send(Method::GET, "/api/v1/claims/42", Some(Identity::new()), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_reserved_claim_id_is_bad_request() {
        let api = TestApi::new().await;

        let (status, _) = api.send(Method::GET, "/api/v1/claims/0", Some(Identity::new()), None).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_customer_lifecycle() {
        let api = TestApi::new().await;
        let customer = api.onboard("third_party").await;
        let path = format!("/api/v1/customers/{customer}");

        let (status, body) = api.send(Method::GET, &path, Some(customer), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], true);
        assert_eq!(body["policy_kind"], "third_party");

        let (status, body) = api
            .send(Method::POST, &format!("{path}/deactivate"), Some(api.t.authority), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);

        let (status, _) = api
            .send(
                Method::POST,
                "/api/v1/claims/third-party",
                Some(customer),
                Some(json!({ "percentage": 10 })),
            )
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_blank_name_is_unprocessable() {
        let api = TestApi::new().await;

        let (status, _) = api
            .send(
                Method::POST,
                "/api/v1/customers",
                Some(api.t.authority),
                Some(json!({
                    "identity": Identity::new(),
                    "name": "",
                    "policy_kind": "all_risk",
                })),
            )
            .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_pool_reports_unit_and_balance() {
        let api = TestApi::new().await;
        api.fund("250.50").await;

        let (status, body) = api.send(Method::GET, "/api/v1/pool", Some(Identity::new()), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["balance"], "250.50");
        assert_eq!(body["currency"], "USD");
        assert_eq!(body["unit"], "100");
        assert_eq!(api.t.network.pool_balance().await.amount(), dec!(250.50));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn percentages_above_one_hundred_are_unprocessable(percentage in 101u32..10_000u32) {
        let status = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(async {
                let api = TestApi::new().await;
                let customer = api.onboard("third_party").await;
                let (status, _) = api
                    .send(
                        Method::POST,
                        "/api/v1/claims/third-party",
                        Some(customer),
                        Some(json!({ "percentage": percentage })),
                    )
                    .await;
                status
            });

        prop_assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

#[test]
fn policy_kinds_use_snake_case_on_the_wire() {
    assert_eq!(serde_json::to_value(PolicyKind::ThirdParty).unwrap(), "third_party");
    assert_eq!(serde_json::to_value(PolicyKind::AllRisk).unwrap(), "all_risk");
}
