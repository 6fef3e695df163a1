use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use formforge::adapters::registry::DescriptorRegistry;
use formforge::domain::{
    ControlAnnotation, DynamicSectionAnnotation, FieldDescriptor, FormDescriptor, ValueType,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;

fn demo_registry() -> Arc<DescriptorRegistry> {
    let registry = DescriptorRegistry::new();
    registry.register(FormDescriptor {
        name: "user_profile".to_string(),
        title: Some("User Profile".to_string()),
        description: None,
        layout: None,
        fields: vec![
            FieldDescriptor::control(
                "username",
                ValueType::String,
                ControlAnnotation {
                    label: Some("Username".to_string()),
                    required: true,
                    min_length: Some(3),
                    ..Default::default()
                },
            ),
            FieldDescriptor::control(
                "active",
                ValueType::Boolean,
                ControlAnnotation {
                    label: Some("Is Active".to_string()),
                    ..Default::default()
                },
            ),
        ],
    });
    registry.register(FormDescriptor {
        name: "training_status".to_string(),
        title: None,
        description: None,
        layout: None,
        fields: vec![FieldDescriptor::control(
            "completed",
            ValueType::Boolean,
            ControlAnnotation {
                label: Some("Completed".to_string()),
                required: true,
                ..Default::default()
            },
        )],
    });
    registry.register(FormDescriptor {
        name: "employee_training".to_string(),
        title: Some("Employee Training Completion".to_string()),
        description: None,
        layout: None,
        fields: vec![
            FieldDescriptor::control(
                "courseName",
                ValueType::String,
                ControlAnnotation {
                    label: Some("Course Name".to_string()),
                    required: true,
                    ..Default::default()
                },
            ),
            FieldDescriptor {
                name: "employees".to_string(),
                value_type: ValueType::Object,
                control: None,
                group: None,
                dynamic: Some(DynamicSectionAnnotation {
                    item_type: "training_status".to_string(),
                    key_field: "employeeId".to_string(),
                    label_field: "employeeName".to_string(),
                    key_prefix: "emp_".to_string(),
                }),
                rule: None,
            },
        ],
    });
    Arc::new(registry)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = formforge::create_app(demo_registry());

    for uri in ["/health", "/health/ready", "/health/live"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "uri {}", uri);
    }
}

#[tokio::test]
async fn test_list_forms() {
    let app = formforge::create_app(demo_registry());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/forms")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        vec!["employee_training", "training_status", "user_profile"]
    );
}

#[tokio::test]
async fn test_get_form_returns_schema_and_uischema() {
    let app = formforge::create_app(demo_registry());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/forms/user_profile")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["schema"]["type"], "object");
    assert_eq!(json["schema"]["title"], "User Profile");
    assert_eq!(json["schema"]["properties"]["username"]["minLength"], 3);
    assert_eq!(json["schema"]["required"], json!(["username"]));
    assert_eq!(json["uischema"]["type"], "VerticalLayout");
    assert_eq!(
        json["uischema"]["elements"][0]["scope"],
        "#/properties/username"
    );
}

#[tokio::test]
async fn test_unknown_form_is_not_found() {
    let app = formforge::create_app(demo_registry());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/forms/missing")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn test_generate_with_dynamic_section() {
    let app = formforge::create_app(demo_registry());

    let body = json!({
        "employees": {
            "data": [
                {"employeeId": "101", "employeeName": "Alice Smith"},
                {"employeeId": "102", "employeeName": "Bob Johnson"}
            ]
        }
    });
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/forms/employee_training")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(
        json["schema"]["properties"]["emp_101"]["title"],
        "Alice Smith"
    );
    assert_eq!(
        json["schema"]["properties"]["emp_102"]["properties"]["completed"]["type"],
        "boolean"
    );

    let groups = json["uischema"]["elements"].as_array().unwrap();
    assert_eq!(groups.len(), 3);
    assert_eq!(groups[1]["type"], "Group");
    assert_eq!(groups[1]["label"], "Alice Smith");
    assert_eq!(
        groups[1]["elements"][0]["scope"],
        "#/properties/emp_101/properties/completed"
    );
    assert_eq!(
        groups[2]["elements"][0]["scope"],
        "#/properties/emp_102/properties/completed"
    );
}

#[tokio::test]
async fn test_generate_with_overlay_metadata() {
    let app = formforge::create_app(demo_registry());

    let body = json!({
        "username": {"label": "Login Name"},
        "active": {"description": "Whether the account is enabled"}
    });
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/forms/user_profile")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["schema"]["properties"]["username"]["title"], "Login Name");
    assert_eq!(
        json["uischema"]["elements"][0]["label"],
        "Login Name"
    );
    assert_eq!(
        json["schema"]["properties"]["active"]["description"],
        "Whether the account is enabled"
    );
}
