//! Server Error Mapping Tests
//!
//! Statement failures reported in a response body surface as
//! `Error::Transaction`, carrying the first error's code and message.

use crate::common::*;

fn execute_against(body: serde_json::Value) -> Error {
    let (mut tx, transport) = transaction();
    transport.respond_json(body);
    tx.append("RETURN 1", None).unwrap();
    tx.execute().unwrap_err()
}

#[test]
fn first_error_wins() {
    let err = execute_against(errors_body(&[
        ("Neo.ClientError.Schema.ConstraintViolation", "m1"),
        ("Neo.ClientError.Statement.SyntaxError", "m2"),
    ]));

    match err {
        Error::Transaction(e) => {
            assert_eq!(e.code, ErrorCode::ConstraintViolation);
            assert_eq!(e.message, "m1");
        }
        other => panic!("expected statement failure, got {:?}", other),
    }
}

#[test]
fn later_errors_are_not_surfaced() {
    let err = execute_against(errors_body(&[
        ("Neo.ClientError.Schema.ConstraintViolation", "m1"),
        ("X", "m2"),
    ]));

    assert!(!err.to_string().contains("m2"));
}

#[test]
fn unknown_code_is_preserved() {
    let err = execute_against(errors_body(&[("Neo.ClientError.Made.Up", "odd")]));

    let code = err.code().unwrap();
    assert_eq!(code, &ErrorCode::Other("Neo.ClientError.Made.Up".into()));
    assert_eq!(code.as_str(), "Neo.ClientError.Made.Up");
}

#[test]
fn common_codes_map_to_variants() {
    let cases = [
        ("Neo.ClientError.Statement.InvalidSyntax", ErrorCode::InvalidSyntax),
        ("Neo.ClientError.Statement.EntityNotFound", ErrorCode::EntityNotFound),
        ("Neo.ClientError.Statement.ParameterMissing", ErrorCode::ParameterMissing),
        ("Neo.ClientError.Transaction.UnknownId", ErrorCode::UnknownTransaction),
        ("Neo.DatabaseError.Statement.ExecutionFailure", ErrorCode::ExecutionFailure),
    ];

    for (wire, expected) in cases {
        let err = execute_against(errors_body(&[(wire, "")]));
        assert_eq!(err.code(), Some(&expected), "code {}", wire);
    }
}

#[test]
fn transient_errors_are_retryable() {
    let deadlock = execute_against(errors_body(&[(
        "Neo.TransientError.Transaction.DeadlockDetected",
        "deadlock",
    )]));
    let syntax = execute_against(errors_body(&[(
        "Neo.ClientError.Statement.SyntaxError",
        "bad",
    )]));

    assert!(deadlock.is_retryable());
    assert!(!syntax.is_retryable());
}

#[test]
fn errors_discard_partial_results() {
    let mut body = results_body(vec![(vec!["x"], vec![vec![1.into()]])]);
    body["errors"] = serde_json::json!([
        {"code": "Neo.ClientError.Statement.ArithmeticError", "message": "/ by zero"}
    ]);

    let err = execute_against(body);

    assert_eq!(err.code(), Some(&ErrorCode::ArithmeticError));
    assert_eq!(err.to_string(), "ArithmeticError: / by zero");
}

#[test]
fn error_without_code_still_consumes_the_batch() {
    let (mut tx, transport) = transaction();
    let body = serde_json::json!({
        "commit": commit_uri(2),
        "errors": [{"message": "something went wrong"}],
    });
    transport.respond(Response::ok(body.to_string()).with_location(execute_uri(2)));

    tx.append("RETURN 1", None).unwrap();
    let err = tx.execute().unwrap_err();

    assert_eq!(err.code(), Some(&ErrorCode::Other(String::new())));
    assert_eq!(tx.pending_len(), 0);
    assert_eq!(tx.commit_uri(), Some(commit_uri(2).as_str()));
}
