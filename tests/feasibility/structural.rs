use allotment::feasibility::{FeasibilityErrorKind, evaluate};
use serde_json::json;

#[test]
fn given_list_shaped_request_when_evaluate_then_structural_error_at_its_index() {
    let err = evaluate(&json!({"cpu": 5}), &[json!({"cpu": 2}), json!(["mem", 1])])
        .expect_err("list request must be rejected");

    assert_eq!(err.kind, FeasibilityErrorKind::Structural);
    assert_eq!(err.index, Some(1));
    assert!(err.message.contains("array"), "unexpected message: {err}");
}

#[test]
fn given_scalar_and_null_requests_when_evaluate_then_first_one_is_reported() {
    let err = evaluate(
        &json!({"cpu": 5}),
        &[json!({}), json!(null), json!(7), json!("cpu")],
    )
    .expect_err("null request must be rejected");

    assert_eq!(err.kind, FeasibilityErrorKind::Structural);
    assert_eq!(err.index, Some(1));
    assert!(err.to_string().ends_with("(index=1)"));
}

#[test]
fn given_earlier_request_already_infeasible_when_later_is_malformed_then_error_wins() {
    let err = evaluate(
        &json!({"cpu": 5}),
        &[json!({"cpu": 50}), json!({"gpu": 1}), json!([])],
    )
    .expect_err("malformed request must win over infeasibility");

    assert_eq!(err.kind, FeasibilityErrorKind::Structural);
    assert_eq!(err.index, Some(2));
}

#[test]
fn given_negative_capacity_when_a_request_is_malformed_then_error_wins() {
    let err = evaluate(&json!({"cpu": -5}), &[json!(true)])
        .expect_err("malformed request must win over negative capacity");
    assert_eq!(err.kind, FeasibilityErrorKind::Structural);
    assert_eq!(err.index, Some(0));
}

#[test]
fn given_string_amount_when_evaluate_then_type_error_names_request_and_resource() {
    let err = evaluate(&json!({"cpu": 5}), &[json!({"cpu": 1}), json!({"cpu": "2"})])
        .expect_err("string amount must be rejected");

    assert_eq!(err.kind, FeasibilityErrorKind::TypeKind);
    assert_eq!(err.index, Some(1));
    assert_eq!(err.resource.as_deref(), Some("cpu"));
}

#[test]
fn given_non_numeric_capacity_when_evaluate_then_type_error() {
    let err = evaluate(&json!({"cpu": "ten"}), &[json!({"cpu": 1})])
        .expect_err("string capacity must be rejected");

    assert_eq!(err.kind, FeasibilityErrorKind::TypeKind);
    assert_eq!(err.index, None);
    assert_eq!(err.resource.as_deref(), Some("cpu"));
}

#[test]
fn given_capacities_that_are_not_a_mapping_when_evaluate_then_structural_error() {
    let err = evaluate(&json!(10), &[json!({"cpu": 1})]).expect_err("scalar capacities");
    assert_eq!(err.kind, FeasibilityErrorKind::Structural);
    assert_eq!(err.index, None);
}
