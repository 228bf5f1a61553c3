//! End-to-end dispatch against in-process resources

use resource_cli::command::{CommandSchema, OptionSpec, ResourceCommand, ValueType};
use resource_cli::resource::{ActionFailure, ActionOutcome, Params, Router};
use serde_json::Value;

const GREETING_URI: &str = "app://self/greeting";
const STATUS_URI: &str = "app://self/status";

fn greeting_schema() -> CommandSchema {
    CommandSchema::builder("greeting")
        .description("Say hello in multiple languages")
        .version("1.2.0")
        .uri(GREETING_URI)
        .output("greeting")
        .option(
            OptionSpec::new("name")
                .with_short("n")
                .with_description("Name to greet")
                .with_required(true),
        )
        .option(
            OptionSpec::new("lang")
                .with_short("l")
                .with_description("Language (en, ja, fr)")
                .with_default("en"),
        )
        .build()
        .unwrap()
}

fn greeting_router() -> Router {
    Router::new().get(GREETING_URI, |params: &Params| {
        let name = params.get("name").and_then(Value::as_str).unwrap_or_default();
        let hello = match params.get("lang").and_then(Value::as_str) {
            Some("ja") => "こんにちは",
            Some("fr") => "Bonjour",
            _ => "Hello",
        };
        Ok(ActionOutcome::from_fields(
            200,
            [
                ("greeting", Value::from(format!("{hello} {name}"))),
                ("lang", params.get("lang").cloned().unwrap_or(Value::Null)),
            ],
        ))
    })
}

fn status_schema() -> CommandSchema {
    CommandSchema::builder("status")
        .uri(STATUS_URI)
        .output("message")
        .option(
            OptionSpec::new("code")
                .with_short("c")
                .with_type(ValueType::Integer)
                .with_default(200),
        )
        .build()
        .unwrap()
}

fn status_router() -> Router {
    Router::new().get(STATUS_URI, |params: &Params| {
        let code = params
            .get("code")
            .and_then(Value::as_u64)
            .and_then(|code| u16::try_from(code).ok())
            .unwrap_or(200);
        let message = match code {
            200 => "OK",
            400 => "Bad Request",
            404 => "Not Found",
            500 => "Internal Server Error",
            _ => "Unknown",
        };
        Ok(ActionOutcome::from_fields(code, [("code", Value::from(code)), ("message", Value::from(message))]))
    })
}

#[test]
fn test_greeting_text_output() {
    let router = greeting_router();
    let command = ResourceCommand::new(greeting_schema(), &router);

    let result = command.invoke(&["greeting", "--name", "Ada"]);
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.message, "Hello Ada");

    let result = command.invoke(&["greeting", "-n", "Ada", "-l", "ja"]);
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.message, "こんにちは Ada");

    let result = command.invoke(&["greeting", "--name=Ada", "--lang=fr"]);
    assert_eq!(result.message, "Bonjour Ada");
}

#[test]
fn test_long_name_beats_short_alias() {
    let router = greeting_router();
    let command = ResourceCommand::new(greeting_schema(), &router);

    let result = command.invoke(&["greeting", "-n", "Short", "--name", "Long"]);
    assert_eq!(result.message, "Hello Long");
}

#[test]
fn test_json_format_prints_full_body() {
    let router = greeting_router();
    let command = ResourceCommand::new(greeting_schema(), &router);

    let result = command.invoke(&["greeting", "--name", "Ada", "--format", "json"]);
    assert_eq!(result.exit_code, 0);

    let body: Value = serde_json::from_str(&result.message).unwrap();
    assert_eq!(body["greeting"], "Hello Ada");
    assert_eq!(body["lang"], "en");
    assert!(result.message.find("greeting").unwrap() < result.message.find("lang").unwrap());
}

#[test]
fn test_unknown_format_falls_back_to_text() {
    let router = greeting_router();
    let command = ResourceCommand::new(greeting_schema(), &router);

    let result = command.invoke(&["greeting", "--name", "Ada", "--format", "yaml"]);
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.message, "Hello Ada");
}

#[test]
fn test_missing_required_option() {
    let router = greeting_router();
    let command = ResourceCommand::new(greeting_schema(), &router);

    let result = command.invoke(&["greeting", "--lang", "ja"]);
    assert_eq!(result.exit_code, 1);
    assert_eq!(result.message, "Error: Option --name is required");
}

#[test]
fn test_undeclared_options_are_ignored() {
    let router = greeting_router();
    let command = ResourceCommand::new(greeting_schema(), &router);

    let result = command.invoke(&["greeting", "--invalid-option", "--name", "Ada"]);
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.message, "Hello Ada");
}

#[test]
fn test_help_short_circuits() {
    let router = greeting_router();
    let command = ResourceCommand::new(greeting_schema(), &router);

    for argv in [
        vec!["greeting", "--help"],
        vec!["greeting", "-h"],
        vec!["greeting", "stray", "--name", "-h"],
    ] {
        let result = command.invoke(argv.as_slice());
        assert_eq!(result.exit_code, 0);
        assert!(result.message.starts_with("Say hello in multiple languages\n\nUsage: greeting [options]"));
        assert!(result.message.contains("  --name, -n\tName to greet (required)\n"));
        assert!(result.message.contains("  --lang, -l\tLanguage (en, ja, fr) (default: en)\n"));
    }
}

#[test]
fn test_version_short_circuits() {
    let router = greeting_router();
    let command = ResourceCommand::new(greeting_schema(), &router);

    let result = command.invoke(&["greeting", "-v"]);
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.message, "greeting version 1.2.0");

    let result = command.invoke(&["greeting", "--version", "--format=json"]);
    assert_eq!(result.message, "greeting version 1.2.0");
}

#[test]
fn test_help_wins_over_version() {
    let router = greeting_router();
    let command = ResourceCommand::new(greeting_schema(), &router);

    let result = command.invoke(&["greeting", "--version", "--help"]);
    assert!(result.message.contains("Usage: greeting [options]"));
}

#[test]
fn test_status_codes_map_to_exit_codes() {
    let router = status_router();
    let command = ResourceCommand::new(status_schema(), &router);

    for (code, exit_code) in [("200", 0), ("400", 1), ("404", 1), ("500", 2)] {
        let result = command.invoke(&["status", "--code", code]);
        assert_eq!(result.exit_code, exit_code, "status {code}");
    }
}

#[test]
fn test_failure_message_is_the_body() {
    let router = status_router();
    let command = ResourceCommand::new(status_schema(), &router);

    let result = command.invoke(&["status", "-c", "404"]);
    let body: Value = serde_json::from_str(&result.message).unwrap();
    assert_eq!(body["code"], 404);
    assert_eq!(body["message"], "Not Found");
    assert!(!result.message.starts_with("Error"));
}

#[test]
fn test_required_status_code() {
    let schema = CommandSchema::builder("status")
        .uri(STATUS_URI)
        .output("message")
        .option(
            OptionSpec::new("code")
                .with_short("c")
                .with_type(ValueType::Integer)
                .with_required(true),
        )
        .build()
        .unwrap();
    let router = status_router();
    let command = ResourceCommand::new(schema, &router);

    let result = command.invoke(&["status"]);
    assert_eq!(result.exit_code, 1);
    assert_eq!(result.message, "Error: Option --code is required");

    for (code, exit_code) in [("200", 0), ("400", 1), ("404", 1), ("500", 2)] {
        let result = command.invoke(&["status", "-c", code]);
        assert_eq!(result.exit_code, exit_code, "status {code}");
    }
}

#[test]
fn test_format_value_is_case_sensitive() {
    let router = greeting_router();
    let command = ResourceCommand::new(greeting_schema(), &router);

    let result = command.invoke(&["greeting", "--name", "Ada", "--format", "JSON"]);
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.message, "Hello Ada");
}

#[test]
fn test_invalid_integer_value() {
    let router = status_router();
    let command = ResourceCommand::new(status_schema(), &router);

    let result = command.invoke(&["status", "--code", "teapot"]);
    assert_eq!(result.exit_code, 1);
    assert_eq!(result.message, "Error: Option --code expects an integer, got 'teapot'");
}

#[test]
fn test_default_applies_when_absent() {
    let router = status_router();
    let command = ResourceCommand::new(status_schema(), &router);

    let result = command.invoke(&["status"]);
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.message, "OK");
}

#[test]
fn test_non_string_output_field_renders_as_json() {
    let schema = CommandSchema::builder("count")
        .uri("app://self/count")
        .output("items")
        .build()
        .unwrap();
    let router = Router::new().get("app://self/count", |_params: &Params| {
        Ok(ActionOutcome::from_fields(200, [("items", serde_json::json!([1, 2, 3]))]))
    });
    let command = ResourceCommand::new(schema, &router);

    assert_eq!(command.invoke(&["count"]).message, "[1,2,3]");
}

#[test]
fn test_missing_output_field_renders_body() {
    let schema = CommandSchema::builder("count")
        .uri("app://self/count")
        .output("total")
        .build()
        .unwrap();
    let router = Router::new().get("app://self/count", |_params: &Params| {
        Ok(ActionOutcome::from_fields(200, [("items", 3)]))
    });
    let command = ResourceCommand::new(schema, &router);

    let result = command.invoke(&["count"]);
    assert_eq!(result.exit_code, 0);
    let body: Value = serde_json::from_str(&result.message).unwrap();
    assert_eq!(body["items"], 3);
}

#[test]
fn test_action_failure_is_unexpected() {
    let router = Router::new().get(GREETING_URI, |_params: &Params| {
        Err(ActionFailure::new("RuntimeError", "database unreachable"))
    });
    let command = ResourceCommand::new(greeting_schema(), &router);

    let result = command.invoke(&["greeting", "--name", "Ada"]);
    assert_eq!(result.exit_code, 2);
    assert_eq!(result.message, "Error: RuntimeError(database unreachable)");
}

#[test]
fn test_unrouted_resource_is_unexpected() {
    let router = Router::new();
    let command = ResourceCommand::new(greeting_schema(), &router);

    let result = command.invoke(&["greeting", "--name", "Ada"]);
    assert_eq!(result.exit_code, 2);
    assert_eq!(result.message, "Error: ResourceNotFound(get app://self/greeting)");
}
