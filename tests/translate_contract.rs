//! Purpose: Contract tests for the public translation API.
//! Exports: Integration tests only.
//! Role: Pin the REST envelope and GraphQL pass-through wire shapes.
//! Invariants: REST mode always yields a parseable envelope, even for malformed data.

use std::sync::{Arc, Mutex};
use std::thread;

use gqlrest::api::{
    ExecutionError, ExecutionResult, FALLBACK_MESSAGE, PathSegment, Printer, RawJson,
    ResponseMode, RestEnvelope, Translator,
};
use serde_json::{Value, json};

#[derive(Default)]
struct CountingPrinter {
    lines: Mutex<Vec<String>>,
}

impl Printer for CountingPrinter {
    fn println(&self, line: &str) {
        self.lines.lock().unwrap().push(line.to_string());
    }

    fn printf(&self, args: std::fmt::Arguments<'_>) {
        self.lines.lock().unwrap().push(args.to_string());
    }
}

fn rest_json(result: &ExecutionResult) -> Value {
    let bytes = Translator::new()
        .translate(result, ResponseMode::Rest)
        .expect("rest translation");
    serde_json::from_slice(&bytes).expect("valid json")
}

#[test]
fn single_field_value_is_unwrapped_regardless_of_name() {
    for name in ["user", "createOrder", "_private", "x"] {
        let data = format!(r#"{{"{name}":{{"id":42,"tags":["a","b"]}}}}"#);
        let value = rest_json(&ExecutionResult::from_data(data));
        assert_eq!(value, json!({"code": 0, "data": {"id": 42, "tags": ["a", "b"]}}));
    }
}

#[test]
fn envelope_round_trips_through_serde() {
    let bytes = Translator::new()
        .translate(
            &ExecutionResult::from_data(r#"{"items":[1,2,3]}"#),
            ResponseMode::Rest,
        )
        .unwrap();
    let envelope: RestEnvelope = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(envelope.code, 0);
    assert!(envelope.message.is_empty());
    assert_eq!(envelope.data, RawJson::from("[1,2,3]"));
}

#[test]
fn coded_errors_resolve_last_wins() {
    let result = ExecutionResult {
        data: RawJson::from(r#"{"account":null}"#),
        errors: vec![
            ExecutionError::new("token expired").with_code("401"),
            ExecutionError::new("account locked")
                .with_path(
                    [PathSegment::from("account"), PathSegment::from("status")]
                        .into_iter()
                        .collect(),
                )
                .with_code("423"),
        ],
        ..ExecutionResult::default()
    };
    assert_eq!(
        rest_json(&result),
        json!({
            "code": 423,
            "message": "token expired; account locked account.status",
            "data": null
        })
    );
}

#[test]
fn emit_error_matches_documented_envelope() {
    let mut out = Vec::new();
    Translator::new()
        .write_json_error(&mut out, 404, ResponseMode::from_restful(true), "not found")
        .unwrap();
    let value: Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value, json!({"code": 404, "message": "not found", "data": null}));
}

#[test]
fn malformed_data_is_contained_only_in_rest_mode() {
    let printer = Arc::new(CountingPrinter::default());
    let translator = Translator::new().with_printer(printer.clone());
    let result = ExecutionResult::from_data("not json at all");

    let bytes = translator.translate(&result, ResponseMode::Rest).unwrap();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["code"], 500);
    assert_eq!(value["message"], FALLBACK_MESSAGE);
    assert_eq!(printer.lines.lock().unwrap().len(), 1);

    assert!(translator.translate(&result, ResponseMode::GraphQl).is_err());
    assert_eq!(printer.lines.lock().unwrap().len(), 1);
}

#[test]
fn concurrent_calls_match_sequential_output() {
    let printer = Arc::new(CountingPrinter::default());
    let translator = Translator::new().with_printer(printer.clone());
    let inputs: Vec<ExecutionResult> = (0..32i64)
        .map(|i| match i % 3 {
            0 => ExecutionResult::from_data(format!(r#"{{"n":{i}}}"#)),
            1 => ExecutionResult::from_errors(vec![
                ExecutionError::new(format!("failure {i}")).with_code(400 + i),
            ]),
            _ => ExecutionResult::from_data("[broken"),
        })
        .collect();

    let sequential: Vec<Vec<u8>> = inputs
        .iter()
        .map(|result| translator.translate(result, ResponseMode::Rest).unwrap())
        .collect();

    let concurrent: Vec<Vec<u8>> = thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|result| {
                let translator = translator.clone();
                scope.spawn(move || translator.translate(result, ResponseMode::Rest).unwrap())
            })
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().expect("thread"))
            .collect()
    });

    assert_eq!(sequential, concurrent);
    let broken = inputs.len() / 3;
    assert_eq!(printer.lines.lock().unwrap().len(), broken * 2);
}
