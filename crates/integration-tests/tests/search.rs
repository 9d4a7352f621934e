//! Search filtering and its equivalence with the plain listing.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use brocante_integration_tests::{app, create_category, create_product, register, send};

#[tokio::test]
async fn search_all_equals_unfiltered_listing() {
    let app = app();
    let token = register(&app, "ada@example.com", "Ada").await;
    let category = create_category(&app, &token, "Furniture").await;

    for i in 0..12 {
        create_product(&app, &token, &format!("item {i}"), "1.00", &category).await;
    }

    let (_, listing) = send(&app, "GET", "/products?page=2", None, None).await;
    let (_, searched) = send(&app, "GET", "/search/all?page=2", None, None).await;

    assert_eq!(searched["totalItems"], listing["totalItems"]);
    let listed: Vec<_> = listing["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].clone())
        .collect();
    let found: Vec<_> = searched["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].clone())
        .collect();
    assert_eq!(found, listed);
}

#[tokio::test]
async fn search_matches_substring_case_insensitively() {
    let app = app();
    let token = register(&app, "ada@example.com", "Ada").await;
    let category = create_category(&app, &token, "Furniture").await;

    create_product(&app, &token, "Wooden Table", "50.00", &category).await;
    create_product(&app, &token, "Chair", "20.00", &category).await;

    let (status, body) = send(&app, "GET", "/search/tAbLe", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 1);
    assert_eq!(body["products"][0]["name"], "Wooden Table");
    // Owner resolved, like the listing.
    assert_eq!(body["products"][0]["owner"]["name"], "Ada");
}

#[tokio::test]
async fn search_combines_term_and_category() {
    let app = app();
    let token = register(&app, "ada@example.com", "Ada").await;
    let tables = create_category(&app, &token, "Tables").await;
    let chairs = create_category(&app, &token, "Chairs").await;

    create_product(&app, &token, "Oak table", "50.00", &tables).await;
    create_product(&app, &token, "Oak chair", "20.00", &chairs).await;

    let (_, body) = send(&app, "GET", &format!("/search/oak?category={chairs}"), None, None).await;
    assert_eq!(body["totalItems"], 1);
    assert_eq!(body["products"][0]["name"], "Oak chair");

    // "all" with a category keeps only the category filter.
    let (_, body) = send(&app, "GET", &format!("/search/all?category={tables}"), None, None).await;
    assert_eq!(body["totalItems"], 1);
    assert_eq!(body["products"][0]["name"], "Oak table");
}

#[tokio::test]
async fn search_with_no_match_returns_empty_page() {
    let app = app();
    let token = register(&app, "ada@example.com", "Ada").await;
    let category = create_category(&app, &token, "Furniture").await;
    create_product(&app, &token, "Table", "50.00", &category).await;

    let (status, body) = send(&app, "GET", "/search/submarine", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["totalItems"], 0);
    assert!(body["products"].as_array().unwrap().is_empty());
}
