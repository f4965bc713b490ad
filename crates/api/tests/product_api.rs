//! Integration tests for the `/api/productos` resource.
//!
//! The app runs over an in-memory store, so no database is needed.

mod common;

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use axum::Router;
use common::{
    build_test_app, build_test_app_with, create_product, delete, get, post_json, product_body,
    put_json, send,
};
use forestal_db::InMemoryProductStore;
use serde_json::{json, Value};

/// Seven chainsaws and two other products. Five chainsaws fall in 100..=500.
async fn seeded_app() -> Router {
    let app = build_test_app();
    let rows = [
        product_body("Motosierra A", "motosierra", "Stihl", 450.0),
        product_body("Motosierra B", "motosierra", "Husqvarna", 120.0),
        product_body("Hacha forestal", "hacha", "Fiskars", 60.0),
        product_body("Motosierra C", "motosierra", "Stihl", 490.0),
        product_body("Motosierra D", "motosierra", "Echo", 300.0),
        product_body("Motosierra E", "motosierra", "Husqvarna", 150.0),
        product_body("Motosierra Pro", "motosierra", "Stihl", 1200.0),
        product_body("Motosierra Mini", "motosierra", "Echo", 80.0),
        product_body("Desbrozadora", "desbrozadora", "Stihl", 320.0),
    ];
    for row in rows {
        create_product(&app, row).await;
    }
    app
}

fn prices(json: &Value) -> Vec<f64> {
    json["data"]["productos"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["precio"].as_f64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_returns_201_with_id_and_message() {
    let app = build_test_app();
    let (status, json) = post_json(
        &app,
        "/api/productos",
        product_body("Casco", "proteccion", "Stihl", 89.5),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["id"], 1);
    assert_eq!(json["message"], "Producto creado correctamente");
}

#[tokio::test]
async fn created_product_is_readable_by_id() {
    let app = build_test_app();
    let body = product_body("Casco", "proteccion", "Stihl", 89.5);
    let id = create_product(&app, body.clone()).await;

    let (status, json) = get(&app, &format!("/api/productos/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    let product = &json["data"];
    assert_eq!(product["id"], id);
    for field in ["nombre", "tipo", "marca", "descripcion", "precio", "stock", "imagen"] {
        assert_eq!(product[field], body[field], "field {field}");
    }
    assert!(json.get("message").is_none());
}

#[tokio::test]
async fn create_with_missing_fields_lists_them() {
    let app = build_test_app();
    let mut body = product_body("Casco", "proteccion", "Stihl", 89.5);
    let object = body.as_object_mut().unwrap();
    object.remove("nombre");
    object.remove("precio");

    let (status, json) = post_json(&app, "/api/productos", body).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Faltan campos obligatorios: nombre, precio");

    let (_, list) = get(&app, "/api/productos").await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn create_with_non_object_body_is_rejected() {
    let app = build_test_app();
    let (status, json) = post_json(&app, "/api/productos", json!(["nombre"])).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn create_with_malformed_json_uses_error_envelope() {
    let app = build_test_app();
    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/productos")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{\"nombre\": "))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = common::body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn create_with_negative_price_is_rejected() {
    let app = build_test_app();
    let (status, json) = post_json(
        &app,
        "/api/productos",
        product_body("Casco", "proteccion", "Stihl", -5.0),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn get_missing_product_returns_404() {
    let app = build_test_app();
    let (status, json) = get(&app, "/api/productos/77").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Producto no encontrado");
}

#[tokio::test]
async fn list_returns_all_products_in_id_order() {
    let app = seeded_app().await;
    let (status, json) = get(&app, "/api/productos").await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, (1..=9).collect::<Vec<_>>());
}

// ---------------------------------------------------------------------------
// Update / delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn update_overwrites_product() {
    let app = seeded_app().await;
    let (status, json) = put_json(
        &app,
        "/api/productos/2",
        product_body("Motosierra B2", "motosierra", "Echo", 135.0),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["id"], 2);
    assert_eq!(json["message"], "Producto actualizado correctamente");

    let (_, product) = get(&app, "/api/productos/2").await;
    assert_eq!(product["data"]["nombre"], "Motosierra B2");
    assert_eq!(product["data"]["precio"], 135.0);
}

#[tokio::test]
async fn update_missing_product_returns_404() {
    let app = build_test_app();
    let (status, json) = put_json(
        &app,
        "/api/productos/5",
        product_body("X", "x", "x", 1.0),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No se encontró el producto para actualizar");
}

#[tokio::test]
async fn update_requires_every_field() {
    let app = seeded_app().await;
    let (status, json) = put_json(&app, "/api/productos/1", json!({ "precio": 10.0 })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Faltan campos obligatorios: nombre, tipo, marca, descripcion, stock, imagen"
    );
}

#[tokio::test]
async fn delete_twice_returns_200_then_404() {
    let app = seeded_app().await;

    let (status, json) = delete(&app, "/api/productos/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["id"], 3);
    assert_eq!(json["message"], "Producto eliminado correctamente");

    let (status, json) = delete(&app, "/api/productos/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "No se encontró el producto para eliminar");

    let (status, _) = get(&app, "/api/productos/3").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_id_uses_error_envelope() {
    let app = seeded_app().await;
    let message = "El identificador del producto debe ser un número entero.";

    let (status, json) = get(&app, "/api/productos/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], message);

    let (status, json) = put_json(
        &app,
        "/api/productos/abc",
        product_body("X", "x", "x", 1.0),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");

    let (status, json) = delete(&app, "/api/productos/1.5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], message);

    let (status, _) = get(&app, "/api/productos/1").await;
    assert_eq!(status, StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn search_matches_brand_case_insensitively() {
    let app = seeded_app().await;
    let (status, json) = get(&app, "/api/productos/buscar?termino=husqvarna").await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["nombre"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Motosierra B", "Motosierra E"]);
}

#[tokio::test]
async fn search_matches_type() {
    let app = seeded_app().await;
    let (status, json) = get(&app, "/api/productos/buscar?termino=hacha").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn search_without_term_is_rejected() {
    let app = seeded_app().await;

    for uri in ["/api/productos/buscar", "/api/productos/buscar?termino=%20%20"] {
        let (status, json) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

// ---------------------------------------------------------------------------
// Filter + pagination
// ---------------------------------------------------------------------------

#[tokio::test]
async fn filter_worked_example() {
    let app = seeded_app().await;
    let (status, json) = get(
        &app,
        "/api/productos/filtrar?tipo=motosierra&precio_min=100&precio_max=500&ordenar=asc&pagina=1&por_pagina=2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(prices(&json), vec![120.0, 150.0]);
    assert_eq!(json["data"]["total_resultados"], 5);
    assert_eq!(json["data"]["total_paginas"], 3);
    assert_eq!(json["data"]["pagina_actual"], 1);
}

#[tokio::test]
async fn filter_clamps_page_past_the_end() {
    let app = seeded_app().await;
    let (status, json) = get(
        &app,
        "/api/productos/filtrar?tipo=motosierra&precio_min=100&precio_max=500&ordenar=desc&pagina=50&por_pagina=2",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["pagina_actual"], 3);
    assert_eq!(prices(&json), vec![120.0]);
}

#[tokio::test]
async fn filter_defaults_to_first_page_of_ten() {
    let app = seeded_app().await;
    let (status, json) = get(&app, "/api/productos/filtrar").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total_resultados"], 9);
    assert_eq!(json["data"]["total_paginas"], 1);
    assert_eq!(json["data"]["pagina_actual"], 1);
    assert_eq!(json["data"]["productos"].as_array().unwrap().len(), 9);
}

#[tokio::test]
async fn filter_with_largest_page_size_returns_one_page() {
    let app = seeded_app().await;
    let (status, json) = get(
        &app,
        "/api/productos/filtrar?tipo=motosierra&pagina=3&por_pagina=9223372036854775807",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total_resultados"], 7);
    assert_eq!(json["data"]["total_paginas"], 1);
    assert_eq!(json["data"]["pagina_actual"], 1);
}

#[tokio::test]
async fn filter_with_no_matches_echoes_requested_page() {
    let app = seeded_app().await;
    let (status, json) = get(&app, "/api/productos/filtrar?marca=Makita&pagina=3").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["productos"], json!([]));
    assert_eq!(json["data"]["total_resultados"], 0);
    assert_eq!(json["data"]["total_paginas"], 0);
    assert_eq!(json["data"]["pagina_actual"], 3);
}

#[tokio::test]
async fn filter_by_brand_and_min_price() {
    let app = seeded_app().await;
    let (status, json) =
        get(&app, "/api/productos/filtrar?marca=Stihl&precio_min=320&ordenar=asc").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(prices(&json), vec![320.0, 450.0, 490.0, 1200.0]);
}

#[tokio::test]
async fn filter_empty_params_count_as_absent() {
    let app = seeded_app().await;
    let (status, json) =
        get(&app, "/api/productos/filtrar?tipo=&marca=&precio_min=&ordenar=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["total_resultados"], 9);
}

#[tokio::test]
async fn filter_rejects_invalid_parameters() {
    let app = seeded_app().await;
    let cases = [
        "/api/productos/filtrar?ordenar=precio",
        "/api/productos/filtrar?pagina=0",
        "/api/productos/filtrar?pagina=dos",
        "/api/productos/filtrar?por_pagina=-1",
        "/api/productos/filtrar?precio_min=barato",
        "/api/productos/filtrar?precio_max=NaN",
    ];

    for uri in cases {
        let (status, json) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["code"], "VALIDATION_ERROR", "{uri}");
    }
}

// ---------------------------------------------------------------------------
// Store failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unreachable_store_returns_database_error() {
    let app = build_test_app_with(Arc::new(InMemoryProductStore::offline()));

    for uri in [
        "/api/productos",
        "/api/productos/1",
        "/api/productos/buscar?termino=hacha",
        "/api/productos/filtrar",
    ] {
        let response = send(&app, Method::GET, uri, None).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        let json = common::body_json(response).await;
        assert_eq!(json["code"], "DATABASE_ERROR");
        assert!(json["details"].is_string());
    }
}
