//! Integration tests for the car service.
//!
//! Each test starts the full router on an ephemeral port and talks to it
//! with a real HTTP client.

use std::net::SocketAddr;
use std::path::Path;

use car_service::api::{self, create_router, swagger_ui_router, AppState};
use car_service::carstore::{Car, CarStore, InMemoryCarStore};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;

/// Start a server over `store`, serving Swagger UI files from `ui_dir`.
async fn spawn_server(store: InMemoryCarStore, ui_dir: &Path) -> String {
    let router = create_router(AppState::new(store)).merge(swagger_ui_router(ui_dir));
    let listener = api::bind(0).await.expect("bind ephemeral port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        api::serve(listener, router).await.unwrap();
    });

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    format!("http://{}", addr)
}

fn camry(id: &str) -> Car {
    Car {
        make: "Toyota".to_string(),
        model: "Camry".to_string(),
        package: "SE".to_string(),
        color: "Silver".to_string(),
        year: 2022,
        category: "Sedan".to_string(),
        mileage: 1000,
        price: 2999000,
        id: id.to_string(),
    }
}

#[tokio::test]
async fn test_create_get_update_flow() {
    let ui_dir = tempfile::tempdir().unwrap();
    let store = InMemoryCarStore::new();
    let base = spawn_server(store.clone(), ui_dir.path()).await;
    let client = reqwest::Client::new();

    // Empty listing
    let response = client.get(format!("{}/cars", base)).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );
    let cars: Vec<Car> = response.json().await.unwrap();
    assert!(cars.is_empty());

    // Create
    let response = client
        .post(format!("{}/cars", base))
        .json(&camry("Xyz1234"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Car = response.json().await.unwrap();
    assert_eq!(created, camry("Xyz1234"));

    // Fetch
    let response = client
        .get(format!("{}/cars/Xyz1234", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Car = response.json().await.unwrap();
    assert_eq!(fetched, camry("Xyz1234"));

    // Partial update
    let response = client
        .put(format!("{}/cars/Xyz1234", base))
        .body(r#"{"Color":"Gold","Mileage":3000}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Car = response.json().await.unwrap();
    assert_eq!(
        updated,
        Car {
            color: "Gold".to_string(),
            mileage: 3000,
            ..camry("Xyz1234")
        }
    );

    // Identifiers may contain slashes
    let response = client
        .post(format!("{}/cars", base))
        .body(r#"{"ID":"lot/7","Make":"Kia"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let response = client
        .get(format!("{}/cars/lot/7", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Car = response.json().await.unwrap();
    assert_eq!(fetched.make, "Kia");
    assert_eq!(store.get("lot/7"), Some(fetched));

    // The store behind the server saw the same writes
    assert_eq!(store.get("Xyz1234"), Some(updated));
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_rejected_requests_leave_store_untouched() {
    let ui_dir = tempfile::tempdir().unwrap();
    let store = InMemoryCarStore::seeded();
    let base = spawn_server(store.clone(), ui_dir.path()).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/cars", base))
        .body("{malformed...string}")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/cars", base))
        .body(r#"{"Make":"Kia"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .put(format!("{}/cars/JHk290Xj", base))
        .body("{malformed...string}")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .put(format!("{}/cars/missing", base))
        .body(r#"{"Color":"Gold"}"#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .get(format!("{}/cars/missing", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let placeholder: Car = response.json().await.unwrap();
    assert_eq!(placeholder, Car::default());

    let response = client
        .delete(format!("{}/cars/JHk290Xj", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);

    assert_eq!(store.len(), 2);
    assert_eq!(store.get("JHk290Xj").unwrap().color, "Silver");
}

#[tokio::test]
async fn test_swagger_ui_files_are_served() {
    let ui_dir = tempfile::tempdir().unwrap();
    std::fs::write(ui_dir.path().join("index.html"), "<html>docs</html>").unwrap();
    let base = spawn_server(InMemoryCarStore::new(), ui_dir.path()).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/swagger-ui/index.html", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "<html>docs</html>");

    let response = client
        .get(format!("{}/swagger-ui/missing.js", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client
        .get(format!("{}/swagger.json", base))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let doc: serde_json::Value = response.json().await.unwrap();
    assert!(doc["paths"]["/cars"].is_object());
}
