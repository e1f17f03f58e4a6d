use super::*;
use serde_json::json;

#[test]
fn outbound_step_payload_has_no_wait_time() {
    let request = AnalyzeRequest {
        process_name: "Assembly".to_string(),
        steps: vec![StepPayload {
            name: "Weld".to_string(),
            cycle_time: 2.5,
            cost: 100.0,
            value_added: true,
            depends_on: vec!["Cut".to_string()],
        }],
    };

    let body = serde_json::to_value(&request).expect("serialize");
    let step = &body["steps"][0];
    assert_eq!(step["name"], "Weld");
    assert_eq!(step["depends_on"], json!(["Cut"]));
    assert!(step.get("wait_time").is_none());
    assert_eq!(body["process_name"], "Assembly");
}

#[test]
fn truthy_error_field_classifies_as_failure() {
    let response = AnalyzeResponse::from_value(json!({ "error": "bad input" })).expect("parse");
    assert_eq!(response, AnalyzeResponse::Failed(ApiError::new("bad input")));
}

#[test]
fn error_wins_over_result_fields() {
    let response = AnalyzeResponse::from_value(json!({
        "error": "duplicate step name: A",
        "summary": { "lead_time": 1.0, "va_ratio": 2.0 }
    }))
    .expect("parse");
    assert!(matches!(response, AnalyzeResponse::Failed(_)));
}

#[test]
fn falsy_error_field_is_ignored() {
    for error in [json!(""), json!(null), json!(false), json!(0)] {
        let response = AnalyzeResponse::from_value(json!({
            "error": error,
            "summary": { "lead_time": 3.0, "va_ratio": 50.0 }
        }))
        .expect("parse");
        assert!(
            matches!(response, AnalyzeResponse::Completed(_)),
            "error={error} should not count as a failure"
        );
    }
}

#[test]
fn minimal_success_body_fills_defaults() {
    let response = AnalyzeResponse::from_value(json!({
        "summary": { "lead_time": 12.5, "va_ratio": 40 }
    }))
    .expect("parse");

    let AnalyzeResponse::Completed(result) = response else {
        panic!("expected completed analysis");
    };
    assert_eq!(result.summary.total_wait_time, 0.0);
    assert!(result.steps.is_empty());
    assert!(result.timeline.is_empty());
    assert!(result.alerts.is_empty());
    assert_eq!(result.ai_report, "");
}

#[test]
fn missing_summary_is_a_decode_error() {
    assert!(AnalyzeResponse::from_value(json!({ "timeline": [] })).is_err());
}

#[test]
fn scheduled_wait_prefers_start_time_then_wait_time_then_wait() {
    let echo: StepEcho =
        serde_json::from_value(json!({ "start_time": 2, "wait_time": 5, "wait": 9 })).expect("echo");
    assert_eq!(echo.scheduled_wait(), 2.0);

    let echo: StepEcho = serde_json::from_value(json!({ "wait_time": 5, "wait": 9 })).expect("echo");
    assert_eq!(echo.scheduled_wait(), 5.0);

    let echo: StepEcho = serde_json::from_value(json!({ "wait": 9 })).expect("echo");
    assert_eq!(echo.scheduled_wait(), 9.0);

    assert_eq!(StepEcho::default().scheduled_wait(), 0.0);
}

#[test]
fn backend_echo_extra_fields_are_tolerated() {
    let echo: StepEcho = serde_json::from_value(json!({
        "name": "Paint",
        "cycle_time": 1.0,
        "cost": 250.0,
        "value_added": false,
        "depends_on": ["Weld"],
        "end_time": 4.0,
        "_predicted_wait": false
    }))
    .expect("echo");
    assert_eq!(echo.name.as_deref(), Some("Paint"));
    assert_eq!(echo.cost, Some(250.0));
}

#[test]
fn step_prediction_error_body_is_a_failure() {
    let response =
        StepPredictionResponse::from_value(json!({ "error": "no step supplied" })).expect("parse");
    assert_eq!(
        response,
        StepPredictionResponse::Failed(ApiError::new("no step supplied"))
    );

    let response = StepPredictionResponse::from_value(json!({
        "step": "Weld",
        "predicted_wait_time": 1.5
    }))
    .expect("parse");
    assert_eq!(
        response,
        StepPredictionResponse::Predicted(StepPrediction {
            step: "Weld".to_string(),
            predicted_wait_time: 1.5,
        })
    );
}

#[test]
fn chat_response_without_field_defaults_to_empty() {
    let response: ChatResponse = serde_json::from_value(json!({})).expect("parse");
    assert_eq!(response.response, "");
}
