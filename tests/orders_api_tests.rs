//! End-to-end tests for the order HTTP API
//!
//! These tests drive the real router through `axum_test::TestServer` and check:
//! - the `{"data": ...}` envelope and status codes of each operation
//! - that the first failing check decides the error
//! - that rejected writes leave the store unchanged

use axum::http::StatusCode;
use axum_test::TestServer;
use orders::prelude::*;
use serde_json::{Value, json};

// =============================================================================
// Helpers
// =============================================================================

fn create_test_server() -> TestServer {
    let app = ServerBuilder::new()
        .with_id_generator(SequentialIdGenerator::new())
        .build()
        .expect("Failed to build app");

    TestServer::new(app)
}

fn seeded_test_server() -> TestServer {
    let seed = Order {
        id: "f6069a542257054114138301947672ba".to_string(),
        deliver_to: "1600 Pennsylvania Avenue NW, Washington, DC 20500".to_string(),
        mobile_number: "(202) 456-1111".to_string(),
        status: OrderStatus::OutForDelivery,
        dishes: vec![DishLineItem::new("90c3d873684bf381dfab29034b5bba73", 2)],
    };

    let app = ServerBuilder::new()
        .with_id_generator(SequentialIdGenerator::new())
        .with_seed_orders([seed])
        .build()
        .expect("Failed to build app");

    TestServer::new(app)
}

fn valid_order() -> Value {
    json!({
        "deliverTo": "123 Main",
        "mobileNumber": "555-0100",
        "dishes": [{ "id": "d1", "quantity": 2 }]
    })
}

async fn create(server: &TestServer, data: Value) -> Value {
    let response = server.post("/orders").json(&json!({ "data": data })).await;
    response.assert_status(StatusCode::CREATED);
    response.json::<Value>()["data"].clone()
}

async fn order_count(server: &TestServer) -> usize {
    let body: Value = server.get("/orders").await.json();
    body["data"].as_array().map(Vec::len).unwrap_or_default()
}

async fn expect_error(response: axum_test::TestResponse, status: StatusCode, code: &str) -> Value {
    response.assert_status(status);
    let body: Value = response.json();
    assert_eq!(body["code"], code, "unexpected error body: {}", body);
    body
}

// =============================================================================
// Health Check Tests
// =============================================================================

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_endpoint() {
        let server = create_test_server();

        let response = server.get("/health").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_unknown_path() {
        let server = create_test_server();

        let response = server.get("/dishes").await;
        let body = expect_error(response, StatusCode::NOT_FOUND, "PATH_NOT_FOUND").await;
        assert_eq!(body["error"], "Path not found: /dishes");
    }

    #[tokio::test]
    async fn test_unsupported_method() {
        let server = create_test_server();

        let response = server.patch("/orders").await;
        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    }
}

// =============================================================================
// Create Tests
// =============================================================================

mod create_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_order() {
        let server = create_test_server();

        let order = create(&server, valid_order()).await;

        assert_eq!(order["id"], "1");
        assert_eq!(order["status"], "pending");
        assert_eq!(order["deliverTo"], "123 Main");
        assert_eq!(order["mobileNumber"], "555-0100");
        assert_eq!(order["dishes"], json!([{ "id": "d1", "quantity": 2 }]));
    }

    #[tokio::test]
    async fn test_create_forces_pending_and_system_id() {
        let server = create_test_server();

        let mut data = valid_order();
        data["status"] = json!("delivered");
        data["id"] = json!("client-id");

        let order = create(&server, data).await;
        assert_eq!(order["status"], "pending");
        assert_eq!(order["id"], "1");
    }

    #[tokio::test]
    async fn test_create_keeps_dish_details() {
        let server = create_test_server();

        let data = json!({
            "deliverTo": "308 Negra Arroyo Lane",
            "mobileNumber": "(505) 143-3369",
            "dishes": [{
                "id": "d351db2b49b69679504652ea1cf38241",
                "name": "Dolcelatte and chickpea spaghetti",
                "description": "Spaghetti topped with a blend of dolcelatte and fresh chickpeas",
                "image_url": "https://images.pexels.com/photos/1279330/pexels-photo-1279330.jpeg",
                "price": 19,
                "quantity": 2
            }]
        });

        let order = create(&server, data.clone()).await;
        assert_eq!(order["dishes"], data["dishes"]);
    }

    #[tokio::test]
    async fn test_create_skips_seeded_ids() {
        let seed = Order {
            id: "1".to_string(),
            deliver_to: "Seeded".to_string(),
            mobile_number: "555-0199".to_string(),
            status: OrderStatus::Delivered,
            dishes: vec![DishLineItem::new("d9", 1)],
        };
        let app = ServerBuilder::new()
            .with_id_generator(SequentialIdGenerator::new())
            .with_seed_orders([seed])
            .build()
            .expect("Failed to build app");
        let server = TestServer::new(app);

        let order = create(&server, valid_order()).await;
        assert_eq!(order["id"], "2");

        let body: Value = server.get("/orders/1").await.json();
        assert_eq!(body["data"]["deliverTo"], "Seeded");
        assert_eq!(order_count(&server).await, 2);
    }

    #[tokio::test]
    async fn test_create_ids_are_unique() {
        let server = create_test_server();

        let first = create(&server, valid_order()).await;
        let second = create(&server, valid_order()).await;

        assert_ne!(first["id"], second["id"]);
        assert_eq!(order_count(&server).await, 2);
    }

    #[tokio::test]
    async fn test_create_missing_fields() {
        let server = create_test_server();

        for (field, message) in [
            ("deliverTo", "Order must include a deliverTo"),
            ("mobileNumber", "Order must include a mobileNumber"),
            ("dishes", "Order must include a dish"),
        ] {
            let mut data = valid_order();
            data.as_object_mut().unwrap().remove(field);

            let response = server.post("/orders").json(&json!({ "data": data })).await;
            let body = expect_error(response, StatusCode::BAD_REQUEST, "INVALID_FIELD").await;
            assert_eq!(body["error"], message);
            assert_eq!(body["details"]["field"], field);
        }

        assert_eq!(order_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_create_empty_strings() {
        let server = create_test_server();

        let mut data = valid_order();
        data["mobileNumber"] = json!("");

        let response = server.post("/orders").json(&json!({ "data": data })).await;
        let body = expect_error(response, StatusCode::BAD_REQUEST, "INVALID_FIELD").await;
        assert_eq!(body["details"]["field"], "mobileNumber");
    }

    #[tokio::test]
    async fn test_create_dishes_not_a_sequence() {
        let server = create_test_server();

        for dishes in [json!([]), json!("spaghetti"), json!({ "id": "d1", "quantity": 1 })] {
            let mut data = valid_order();
            data["dishes"] = dishes;

            let response = server.post("/orders").json(&json!({ "data": data })).await;
            let body = expect_error(response, StatusCode::BAD_REQUEST, "INVALID_FIELD").await;
            assert_eq!(body["error"], "Order must include at least one dish");
        }

        assert_eq!(order_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_create_invalid_quantity() {
        let server = create_test_server();

        let mut data = valid_order();
        data["dishes"] = json!([{ "id": "d1", "quantity": 0 }]);

        let response = server.post("/orders").json(&json!({ "data": data })).await;
        let body = expect_error(response, StatusCode::BAD_REQUEST, "INVALID_DISH").await;
        assert_eq!(body["details"]["index"], 0);
        assert_eq!(
            body["error"],
            "Dish 0 must have a quantity that is an integer greater than 0"
        );
    }

    #[tokio::test]
    async fn test_create_reports_first_bad_dish() {
        let server = create_test_server();

        let mut data = valid_order();
        data["dishes"] = json!([
            { "id": "d1", "quantity": 1 },
            { "id": "d2", "quantity": "2" },
            { "id": "d3", "quantity": -1 }
        ]);

        let response = server.post("/orders").json(&json!({ "data": data })).await;
        let body = expect_error(response, StatusCode::BAD_REQUEST, "INVALID_DISH").await;
        assert_eq!(body["details"]["index"], 1);
        assert_eq!(order_count(&server).await, 0);
    }

    #[tokio::test]
    async fn test_create_without_data_envelope() {
        let server = create_test_server();

        let response = server.post("/orders").json(&valid_order()).await;
        let body = expect_error(response, StatusCode::BAD_REQUEST, "INVALID_FIELD").await;
        assert_eq!(body["details"]["field"], "deliverTo");
    }

    #[tokio::test]
    async fn test_create_malformed_json() {
        let server = create_test_server();

        let response = server.post("/orders").text("{ not json").await;
        expect_error(response, StatusCode::BAD_REQUEST, "INVALID_JSON").await;
        assert_eq!(order_count(&server).await, 0);
    }
}

// =============================================================================
// Read & List Tests
// =============================================================================

mod read_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_empty() {
        let server = create_test_server();

        let response = server.get("/orders").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"], json!([]));
    }

    #[tokio::test]
    async fn test_list_in_creation_order() {
        let server = create_test_server();

        for address in ["a", "b", "c"] {
            let mut data = valid_order();
            data["deliverTo"] = json!(address);
            create(&server, data).await;
        }

        let body: Value = server.get("/orders").await.json();
        let addresses: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["deliverTo"].as_str().unwrap())
            .collect();
        assert_eq!(addresses, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_create_then_read_round_trip() {
        let server = create_test_server();

        let created = create(&server, valid_order()).await;
        let id = created["id"].as_str().unwrap();

        let response = server.get(&format!("/orders/{}", id)).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"], created);
    }

    #[tokio::test]
    async fn test_read_seeded_order() {
        let server = seeded_test_server();

        let response = server.get("/orders/f6069a542257054114138301947672ba").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["status"], "out-for-delivery");
    }

    #[tokio::test]
    async fn test_read_missing_order() {
        let server = create_test_server();

        let response = server.get("/orders/42").await;
        let body = expect_error(response, StatusCode::NOT_FOUND, "ORDER_NOT_FOUND").await;
        assert_eq!(body["details"]["orderId"], "42");
        assert!(body["error"].as_str().unwrap().contains("42"));
    }
}

// =============================================================================
// Update Tests
// =============================================================================

mod update_tests {
    use super::*;

    const SEED_ID: &str = "f6069a542257054114138301947672ba";

    fn update_body(id: Option<&str>, status: &str) -> Value {
        let mut data = json!({
            "deliverTo": "Rick Sanchez (C-132)",
            "mobileNumber": "(202) 456-1111",
            "status": status,
            "dishes": [{ "id": "d1", "quantity": 3 }]
        });
        if let Some(id) = id {
            data["id"] = json!(id);
        }
        json!({ "data": data })
    }

    async fn current(server: &TestServer) -> Value {
        let body: Value = server.get(&format!("/orders/{}", SEED_ID)).await.json();
        body["data"].clone()
    }

    #[tokio::test]
    async fn test_update_order() {
        let server = seeded_test_server();

        let response = server
            .put(&format!("/orders/{}", SEED_ID))
            .json(&update_body(Some(SEED_ID), "delivered"))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["data"]["id"], SEED_ID);
        assert_eq!(body["data"]["status"], "delivered");
        assert_eq!(body["data"]["deliverTo"], "Rick Sanchez (C-132)");
        assert_eq!(body["data"]["dishes"][0]["quantity"], 3);

        assert_eq!(current(&server).await, body["data"]);
        assert_eq!(order_count(&server).await, 1);
    }

    #[tokio::test]
    async fn test_update_without_payload_id() {
        let server = seeded_test_server();

        for id in [None, Some("")] {
            let response = server
                .put(&format!("/orders/{}", SEED_ID))
                .json(&update_body(id, "preparing"))
                .await;
            response.assert_status_ok();
        }

        assert_eq!(current(&server).await["id"], SEED_ID);
    }

    #[tokio::test]
    async fn test_update_id_mismatch() {
        let server = seeded_test_server();
        let before = current(&server).await;

        let response = server
            .put(&format!("/orders/{}", SEED_ID))
            .json(&update_body(Some("someone-else"), "preparing"))
            .await;
        let body = expect_error(response, StatusCode::BAD_REQUEST, "ID_MISMATCH").await;

        assert_eq!(body["details"]["payloadId"], "someone-else");
        assert_eq!(body["details"]["routeId"], SEED_ID);
        assert_eq!(current(&server).await, before);
    }

    #[tokio::test]
    async fn test_update_numeric_id_never_matches() {
        let server = create_test_server();
        create(&server, valid_order()).await;

        let mut body = update_body(None, "delivered");
        body["data"]["id"] = json!(1);

        let response = server.put("/orders/1").json(&body).await;
        let body = expect_error(response, StatusCode::BAD_REQUEST, "ID_MISMATCH").await;
        assert_eq!(body["details"]["payloadId"], "1");
        assert_eq!(body["details"]["routeId"], "1");

        let order: Value = server.get("/orders/1").await.json();
        assert_eq!(order["data"]["status"], "pending");
    }

    #[tokio::test]
    async fn test_update_invalid_status() {
        let server = seeded_test_server();
        let before = current(&server).await;

        for status in ["invalid", "", "cancelled"] {
            let response = server
                .put(&format!("/orders/{}", SEED_ID))
                .json(&update_body(None, status))
                .await;
            let body = expect_error(response, StatusCode::BAD_REQUEST, "INVALID_STATUS").await;
            assert_eq!(
                body["error"],
                "Order must have a status of pending, preparing, out-for-delivery, delivered"
            );
        }

        assert_eq!(current(&server).await, before);
    }

    #[tokio::test]
    async fn test_update_missing_status() {
        let server = seeded_test_server();

        let mut body = update_body(None, "pending");
        body["data"].as_object_mut().unwrap().remove("status");

        let response = server.put(&format!("/orders/{}", SEED_ID)).json(&body).await;
        expect_error(response, StatusCode::BAD_REQUEST, "INVALID_STATUS").await;
    }

    #[tokio::test]
    async fn test_update_field_checks_run_before_status() {
        let server = seeded_test_server();

        let mut body = update_body(None, "bogus");
        body["data"]["dishes"] = json!([{ "id": "d1", "quantity": 1.5 }]);

        let response = server.put(&format!("/orders/{}", SEED_ID)).json(&body).await;
        let body = expect_error(response, StatusCode::BAD_REQUEST, "INVALID_DISH").await;
        assert_eq!(body["details"]["index"], 0);
    }

    #[tokio::test]
    async fn test_update_missing_order() {
        let server = seeded_test_server();

        let response = server
            .put("/orders/nope")
            .json(&update_body(Some("other"), "bogus"))
            .await;
        expect_error(response, StatusCode::NOT_FOUND, "ORDER_NOT_FOUND").await;
    }
}

// =============================================================================
// Delete Tests
// =============================================================================

mod delete_tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_order() {
        let server = create_test_server();

        let first = create(&server, valid_order()).await;
        let second = create(&server, valid_order()).await;
        let first_id = first["id"].as_str().unwrap();

        let response = server.delete(&format!("/orders/{}", first_id)).await;
        response.assert_status(StatusCode::NO_CONTENT);
        assert!(response.text().is_empty());

        let response = server.get(&format!("/orders/{}", first_id)).await;
        expect_error(response, StatusCode::NOT_FOUND, "ORDER_NOT_FOUND").await;

        let body: Value = server.get("/orders").await.json();
        assert_eq!(body["data"], json!([second]));
    }

    #[tokio::test]
    async fn test_delete_missing_order() {
        let server = seeded_test_server();

        let response = server.delete("/orders/ghost").await;
        expect_error(response, StatusCode::NOT_FOUND, "ORDER_NOT_FOUND").await;
        assert_eq!(order_count(&server).await, 1);
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let server = seeded_test_server();
        let path = "/orders/f6069a542257054114138301947672ba";

        server.delete(path).await.assert_status(StatusCode::NO_CONTENT);
        let response = server.delete(path).await;
        expect_error(response, StatusCode::NOT_FOUND, "ORDER_NOT_FOUND").await;
    }
}
