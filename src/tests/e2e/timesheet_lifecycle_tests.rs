use axum::http::StatusCode;
use serde_json::json;

use crate::tests::fixtures::app::{
    BUDI_MARCH, app, create_timesheet, empty_request, json_request, make_test_state, send,
    send_raw,
};

#[tokio::test]
async fn fills_exports_and_removes_a_monthly_timesheet() {
    let app = app(make_test_state());
    let id = create_timesheet(&app, BUDI_MARCH).await;
    let entries_uri = format!("/timesheets/{id}/entries");

    let bodies = [
        r#"{"date":"2024-03-13","start_time":"08.00","end_time":"12.00"}"#,
        r#"{"date":"2024-03-11","total_hours":8,"overtime_hours":1,"remarks":"release"}"#,
        r#"{"date":"2024-03-12","remarks":"sick leave"}"#,
    ];
    let mut entry_ids = Vec::new();
    for body in bodies {
        let (status, json) = send(&app, json_request("POST", &entries_uri, body)).await;
        assert_eq!(status, StatusCode::CREATED);
        entry_ids.push(json["data"]["id"].as_i64().unwrap());
    }

    let (status, json) = send(&app, empty_request("GET", &format!("/timesheets/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    let data = &json["data"];
    let dates: Vec<_> = data["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["date"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(dates, ["2024-03-11", "2024-03-12", "2024-03-13"]);
    assert_eq!(
        data["summary"],
        json!({"days_filled": 2, "total_hours": 12.0, "overtime_hours": 1.0})
    );

    let export = format!("/timesheets/{id}/export");
    let (status, body) = send_raw(&app, empty_request("GET", &export)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with(b"%PDF-"));

    let (status, _) = send(&app, empty_request("DELETE", &format!("/timesheets/{id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        json_request("PUT", &format!("/entries/{}", entry_ids[0]), r#"{"remarks":"gone"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, json) = send(&app, empty_request("GET", "/timesheets")).await;
    assert_eq!(json["meta"]["total"], json!(0));
}
