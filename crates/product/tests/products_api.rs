mod common;

use common::{FRONTEND_URL, TestServer};
use reqwest::{Client, StatusCode, header::ORIGIN};
use serde_json::{Value, json};

async fn create(client: &Client, srv: &TestServer, body: Value) -> Value {
    let res = client
        .post(srv.url("/api/products"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await.unwrap();
    assert!(body.get("errors").is_none());
    body["data"].clone()
}

fn messages(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["msg"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn create_returns_the_stored_product() {
    let srv = TestServer::spawn().await;
    let client = Client::new();

    let product = create(
        &client,
        &srv,
        json!({ "name": "Monitor curvo 49 pulgadas", "price": 500 }),
    )
    .await;

    assert_eq!(product["id"], 1);
    assert_eq!(product["name"], "Monitor curvo 49 pulgadas");
    assert_eq!(product["price"].as_f64(), Some(500.0));
    assert_eq!(product["availability"], true);
    assert!(product["createdAt"].is_string());
    assert!(product["updatedAt"].is_string());
}

#[tokio::test]
async fn create_with_empty_body_reports_four_errors() {
    let srv = TestServer::spawn().await;
    let client = Client::new();

    let res = client
        .post(srv.url("/api/products"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(messages(&body).len(), 4);
    assert_eq!(body["errors"][0]["param"], "name");
    assert_eq!(body["errors"][0]["location"], "body");
    assert_eq!(body["errors"][0]["type"], "field");
}

#[tokio::test]
async fn create_checks_price_rules() {
    let srv = TestServer::spawn().await;
    let client = Client::new();

    let res = client
        .post(srv.url("/api/products"))
        .json(&json!({ "name": "Monitor", "price": "Text" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(messages(&body), ["Valor no valido", "Precio no valido"]);

    let res = client
        .post(srv.url("/api/products"))
        .json(&json!({ "name": "Monitor", "price": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(messages(&body), ["Precio no valido"]);
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let srv = TestServer::spawn().await;

    let res = Client::new()
        .post(srv.url("/api/products"))
        .header("content-type", "application/json")
        .body("{ \"name\": ")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "JSON no valido");
}

#[tokio::test]
async fn list_returns_newest_first() {
    let srv = TestServer::spawn().await;
    let client = Client::new();

    let res = client.get(srv.url("/api/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()["content-type"]
            .to_str()
            .unwrap()
            .contains("json")
    );
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "data": [] }));

    create(&client, &srv, json!({ "name": "Teclado", "price": 30 })).await;
    create(&client, &srv, json!({ "name": "Mouse", "price": 15.5 })).await;

    let body: Value = client
        .get(srv.url("/api/products"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Mouse", "Teclado"]);
}

#[tokio::test]
async fn get_by_id_distinguishes_invalid_and_missing() {
    let srv = TestServer::spawn().await;
    let client = Client::new();

    let res = client
        .get(srv.url("/api/products/not-valid-url"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(messages(&body), ["Id no valido"]);

    let res = client
        .get(srv.url("/api/products/2000"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Producto no encontrado" }));

    let created = create(&client, &srv, json!({ "name": "Monitor", "price": 300 })).await;
    let res = client
        .get(srv.url(&format!("/api/products/{}", created["id"])))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"], created);
}

#[tokio::test]
async fn update_replaces_all_fields() {
    let srv = TestServer::spawn().await;
    let client = Client::new();
    let created = create(&client, &srv, json!({ "name": "Monitor", "price": 300 })).await;

    let res = client
        .put(srv.url(&format!("/api/products/{}", created["id"])))
        .json(&json!({ "name": "Monitor curvo", "price": 350, "availability": false }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["data"]["name"], "Monitor curvo");
    assert_eq!(body["data"]["price"].as_f64(), Some(350.0));
    assert_eq!(body["data"]["availability"], false);
}

#[tokio::test]
async fn update_rejects_bad_input_and_missing_products_with_400() {
    let srv = TestServer::spawn().await;
    let client = Client::new();
    create(&client, &srv, json!({ "name": "Monitor", "price": 300 })).await;

    let res = client
        .put(srv.url("/api/products/1"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(messages(&body).len(), 5);
    assert!(body.get("data").is_none());

    let res = client
        .put(srv.url("/api/products/2000"))
        .json(&json!({ "name": "Monitor", "price": 300, "availability": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Producto no encontrado" }));
}

#[tokio::test]
async fn toggling_twice_restores_availability() {
    let srv = TestServer::spawn().await;
    let client = Client::new();
    let created = create(&client, &srv, json!({ "name": "Monitor", "price": 300 })).await;
    let url = srv.url(&format!("/api/products/{}", created["id"]));

    let first: Value = client.patch(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(first["data"]["availability"], false);

    let second: Value = client.patch(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(second["data"]["availability"], true);

    let res = client
        .patch(srv.url("/api/products/2000"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleted_products_are_gone() {
    let srv = TestServer::spawn().await;
    let client = Client::new();
    let created = create(&client, &srv, json!({ "name": "Monitor", "price": 300 })).await;
    let url = srv.url(&format!("/api/products/{}", created["id"]));

    let res = client.delete(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "data": "Producto eliminado" }));

    let res = client.get(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client.delete(&url).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Producto no encontrado");
}

#[tokio::test]
async fn store_failures_do_not_leak_details() {
    let srv = TestServer::spawn_broken().await;
    let client = Client::new();

    let res = client.get(srv.url("/api/products")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Error interno del servidor" }));

    let res = client
        .post(srv.url("/api/products"))
        .json(&json!({ "name": "Monitor", "price": 300 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn foreign_origins_are_forbidden() {
    let srv = TestServer::spawn().await;
    let client = Client::new();

    let res = client
        .get(srv.url("/api/products"))
        .header(ORIGIN, "http://evil.example")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Error de Cors" }));

    let res = client
        .get(srv.url("/api/products"))
        .header(ORIGIN, FRONTEND_URL)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        res.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some(FRONTEND_URL)
    );
}

#[tokio::test]
async fn openapi_document_lists_product_routes() {
    let srv = TestServer::spawn().await;

    let res = Client::new()
        .get(srv.url("/api-docs/openapi.json"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let doc: Value = res.json().await.unwrap();
    let paths = doc["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/products"));
    assert!(paths.contains_key("/api/products/{id}"));
}

#[tokio::test]
async fn metrics_count_handled_requests() {
    let srv = TestServer::spawn().await;
    let client = Client::new();

    client.get(srv.url("/api/products")).send().await.unwrap();

    let res = client.get(srv.url("/metrics")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let text = res.text().await.unwrap();
    assert!(text.contains("product_query_service_requests"));
}

#[tokio::test]
async fn write_routes_reject_non_integer_ids() {
    let srv = TestServer::spawn().await;
    let client = Client::new();
    let url = srv.url("/api/products/not-valid-url");

    for res in [
        client.patch(&url).send().await.unwrap(),
        client.delete(&url).send().await.unwrap(),
        client
            .put(&url)
            .json(&json!({ "name": "Monitor", "price": 300, "availability": true }))
            .send()
            .await
            .unwrap(),
    ] {
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = res.json().await.unwrap();
        assert_eq!(messages(&body), ["Id no valido"]);
    }
}

#[tokio::test]
async fn ids_of_deleted_products_are_not_reused() {
    let srv = TestServer::spawn().await;
    let client = Client::new();

    let first = create(&client, &srv, json!({ "name": "Monitor", "price": 300 })).await;
    let res = client
        .delete(srv.url(&format!("/api/products/{}", first["id"])))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let second = create(&client, &srv, json!({ "name": "Monitor", "price": 300 })).await;
    assert!(second["id"].is_i64());
    assert_ne!(second["id"], first["id"]);
}

#[tokio::test]
async fn long_names_are_stored_as_sent() {
    let srv = TestServer::spawn().await;
    let client = Client::new();
    let name = "a".repeat(101);

    let created = create(&client, &srv, json!({ "name": &name, "price": 10 })).await;
    assert_eq!(created["name"], name.as_str());

    let res = client
        .put(srv.url(&format!("/api/products/{}", created["id"])))
        .json(&json!({ "name": "b".repeat(300), "price": 10, "availability": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
