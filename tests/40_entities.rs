//! Create/read/update/delete through the generic entity routes.

mod common;

use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{create, db_app, db_app_with_connections, delete, get, post, put, unique};

async fn client_and_project(app: &axum::Router) -> (String, String) {
    let client = create(app, "clients", json!({ "name": unique("Cliente") })).await;
    let project = create(
        app,
        "projects",
        json!({
            "name": unique("Obra"),
            "client_id": client,
            "address": "Av. Paulista, 1000",
            "start_date": "2024-02-01",
            "end_date": "2025-06-30",
            "budget": 250000.5
        }),
    )
    .await;
    (client, project)
}

fn number(value: &Value) -> f64 {
    value.as_f64().unwrap_or_else(|| panic!("not a number: {value}"))
}

#[tokio::test]
async fn project_round_trip_applies_defaults() {
    let Some(app) = db_app().await else { return };
    let (client, project) = client_and_project(&app).await;

    let (status, body) = get(&app, &format!("/projects/{project}")).await;
    assert_eq!(status, StatusCode::OK);
    let record = &body["data"];
    assert_eq!(record["id"], json!(project));
    assert_eq!(record["client_id"], json!(client));
    assert_eq!(record["address"], json!("Av. Paulista, 1000"));
    assert_eq!(record["start_date"], json!("2024-02-01"));
    assert_eq!(record["status"], json!("Planning"));
    assert_eq!(number(&record["budget"]), 250000.5);
    assert!(record["client_name"].as_str().unwrap().starts_with("Cliente-"));
    assert!(record.get("created_at").is_some());
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let Some(app) = db_app().await else { return };
    let (_, project) = client_and_project(&app).await;
    let uri = format!("/projects/{project}");

    let (status, body) = put(&app, &uri, json!({ "status": "In Progress", "budget": "300000" })).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["id"], json!(project));

    let (_, body) = get(&app, &uri).await;
    assert_eq!(body["data"]["status"], json!("In Progress"));
    assert_eq!(number(&body["data"]["budget"]), 300000.0);
    assert_eq!(body["data"]["address"], json!("Av. Paulista, 1000"));

    // Rejected updates leave the row alone
    let (status, _) = put(&app, &uri, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = put(&app, &uri, json!({ "status": "Done", "owner": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, body) = get(&app, &uri).await;
    assert_eq!(body["data"]["status"], json!("In Progress"));
}

#[tokio::test]
async fn missing_rows_are_not_found() {
    let Some(app) = db_app().await else { return };
    let ghost = uuid::Uuid::new_v4();

    let (status, _) = get(&app, &format!("/suppliers/{ghost}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = put(&app, &format!("/suppliers/{ghost}"), json!({ "notes": "x" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, body) = delete(&app, &format!("/suppliers/{ghost}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("NOT_FOUND"));
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let Some(app) = db_app().await else { return };
    let supplier = create(
        &app,
        "suppliers",
        json!({ "name": unique("Cimento"), "contact": "Carlos", "payment_terms": "30 dias" }),
    )
    .await;

    let (status, body) = delete(&app, &format!("/suppliers/{supplier}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], json!(supplier));

    let (status, _) = get(&app, &format!("/suppliers/{supplier}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unique_names_conflict() {
    let Some(app) = db_app().await else { return };
    let name = unique("Mão de obra");

    create(&app, "cost_categories", json!({ "name": name })).await;
    let (status, body) = post(&app, "/cost_categories", json!({ "name": name })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!("CONFLICT"));
}

#[tokio::test]
async fn missing_parent_is_a_validation_error() {
    let Some(app) = db_app().await else { return };
    let (status, body) = post(
        &app,
        "/daily_logs",
        json!({ "project_id": uuid::Uuid::new_v4(), "log_date": "2024-03-10" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("VALIDATION_ERROR"));
}

#[tokio::test]
async fn document_type_alias_and_version_order() {
    let Some(app) = db_app().await else { return };
    let (_, project) = client_and_project(&app).await;
    let member = create(
        &app,
        "team_members",
        json!({ "name": "Paula", "email": format!("{}@obra.test", unique("paula")) }),
    )
    .await;

    let document = create(
        &app,
        "project_documents",
        json!({
            "project_id": project,
            "name": "Planta baixa",
            "doc_type": "Plan",
            "file_url": "https://files.obra.test/planta.pdf",
            "uploaded_by": member
        }),
    )
    .await;

    let (_, body) = get(&app, &format!("/project_documents/{document}")).await;
    assert_eq!(body["data"]["type"], json!("Plan"));
    assert_eq!(body["data"]["uploaded_by"], json!(member));
    assert!(body["data"]["upload_date"].is_string());

    let (status, _) = put(
        &app,
        &format!("/project_documents/{document}"),
        json!({ "doc_type": "Contract" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get(&app, &format!("/project_documents/{document}")).await;
    assert_eq!(body["data"]["type"], json!("Contract"));

    for version in [1, 3, 2] {
        create(
            &app,
            "document_versions",
            json!({
                "document_id": document,
                "version_number": version,
                "file_url": format!("https://files.obra.test/planta-v{version}.pdf")
            }),
        )
        .await;
    }
    let (status, body) = get(&app, &format!("/document_versions?document_id={document}")).await;
    assert_eq!(status, StatusCode::OK);
    let versions: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["version_number"].as_i64().unwrap())
        .collect();
    assert_eq!(versions, vec![3, 2, 1]);

    // Removing the uploader keeps the document
    let (status, _) = delete(&app, &format!("/team_members/{member}")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get(&app, &format!("/project_documents/{document}")).await;
    assert_eq!(body["data"]["uploaded_by"], Value::Null);
}

#[tokio::test]
async fn service_progress_defaults_to_zero() {
    let Some(app) = db_app().await else { return };
    let (_, project) = client_and_project(&app).await;

    let service = create(
        &app,
        "project_services",
        json!({
            "project_id": project,
            "name": "Fundação",
            "start_date": "2024-02-05",
            "end_date": "2024-03-20",
            "cost": 48000
        }),
    )
    .await;

    let (_, body) = get(&app, &format!("/project_services/{service}")).await;
    assert_eq!(number(&body["data"]["progress"]), 0.0);
    assert_eq!(body["data"]["measure"], Value::Null);
}

#[tokio::test]
async fn lists_are_ordered_by_name() {
    let Some(app) = db_app().await else { return };
    let (_, project) = client_and_project(&app).await;

    for name in ["Reboco", "Alvenaria", "Pintura"] {
        create(
            &app,
            "project_services",
            json!({
                "project_id": project,
                "name": name,
                "start_date": "2024-04-01",
                "end_date": "2024-04-30",
                "cost": 1000
            }),
        )
        .await;
    }

    let (_, body) = get(&app, &format!("/project_services?project_id={project}&page=2")).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alvenaria", "Pintura", "Reboco"]);
}

#[tokio::test]
async fn null_then_typed_writes_share_one_connection() {
    // One pooled connection, so every statement below reuses its cache
    let Some(app) = db_app_with_connections(1).await else { return };
    let (_, project) = client_and_project(&app).await;

    let service = |measure: Value| {
        json!({
            "project_id": project,
            "name": unique("Contrapiso"),
            "start_date": "2024-05-01",
            "end_date": "2024-05-15",
            "cost": 3200,
            "measure": measure
        })
    };
    let empty = create(&app, "project_services", service(Value::Null)).await;
    let measured = create(&app, "project_services", service(json!(5))).await;

    let (_, body) = get(&app, &format!("/project_services/{empty}")).await;
    assert_eq!(body["data"]["measure"], Value::Null);
    let (_, body) = get(&app, &format!("/project_services/{measured}")).await;
    assert_eq!(number(&body["data"]["measure"]), 5.0);

    let member = create(
        &app,
        "team_members",
        json!({
            "name": "Rita",
            "email": format!("{}@obra.test", unique("rita")),
            "hiring_date": null
        }),
    )
    .await;
    let (status, _) = put(
        &app,
        &format!("/team_members/{member}"),
        json!({ "hiring_date": "2022-11-03" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let document = create(
        &app,
        "project_documents",
        json!({
            "project_id": project,
            "name": "Memorial descritivo",
            "file_url": "https://files.obra.test/memorial.pdf",
            "uploaded_by": null
        }),
    )
    .await;
    let uri = format!("/project_documents/{document}");
    let (status, _) = put(&app, &uri, json!({ "uploaded_by": null })).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = put(&app, &uri, json!({ "uploaded_by": member })).await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, body) = get(&app, &uri).await;
    assert_eq!(body["data"]["uploaded_by"], json!(member));
    let (_, body) = get(&app, &format!("/team_members/{member}")).await;
    assert_eq!(body["data"]["hiring_date"], json!("2022-11-03"));
}
