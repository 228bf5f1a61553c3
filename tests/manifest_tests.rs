//! Manifest loading through the System abstraction

use std::path::Path;

use resource_cli::cli::Args;
use resource_cli::config::Manifest;
use resource_cli::config::yaml::parse_manifest;
use resource_cli::error::CliError;
use resource_cli::resource::Verb;
use resource_cli::system::mock::MockSystem;

const MANIFEST: &str = r#"
version: "1.0.0"
commands:
  - name: greeting
    description: Say hello in multiple languages
    uri: app://self/greeting
    output: greeting
    run: printf '{"greeting":"Hello %s"}' "$CLI_PARAM_NAME"
    options:
      - name: name
        short: n
        required: true
      - name: lang
        short: l
        default: en
  - name: deploy
    description: Deploy a build
    method: post
    uri: app://self/deploy
    run: echo deployed
"#;

fn system() -> MockSystem {
    MockSystem::new()
        .with_current_dir("/work")
        .unwrap()
        .with_file("/work/commands.yaml", MANIFEST.as_bytes())
        .unwrap()
}

fn args(argv: &[&str]) -> Args {
    Args {
        manifest: None,
        verbose: false,
        list: false,
        command: argv.iter().map(|arg| (*arg).to_owned()).collect(),
    }
}

#[test]
fn test_load_valid_manifest() {
    let manifest = Manifest::load_from_file(&system(), Path::new("/work/commands.yaml")).unwrap();

    assert_eq!(manifest.version.as_deref(), Some("1.0.0"));
    assert_eq!(manifest.commands.len(), 2);
    assert_eq!(manifest.commands[1].method, Verb::Post);
    assert_eq!(manifest.find("greeting").unwrap().options.len(), 2);
    assert!(manifest.find("missing").is_none());
}

#[test]
fn test_load_nonexistent_file() {
    let err = Manifest::load_from_file(&MockSystem::new(), Path::new("/nope.yaml")).unwrap_err();
    assert!(err.to_string().contains("Manifest file not found"));
    assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 1);
}

#[test]
fn test_invalid_yaml() {
    let err = parse_manifest("commands: [unclosed").unwrap_err();
    assert!(err.to_string().contains("Failed to parse YAML"));
}

#[test]
fn test_schema_violation() {
    let err = parse_manifest(
        "commands:\n  - name: ping\n    uri: app://self/ping\n    method: fetch\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("Manifest does not match schema"));
}

#[test]
fn test_semantic_violation() {
    let err = parse_manifest(
        "commands:\n  - name: ping\n    uri: app://self/ping\n    options:\n      - name: verbose\n        short: v\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("'-v' is reserved"));
}

#[test]
fn test_default_checked_against_type() {
    let err = parse_manifest(
        "commands:\n  - name: ping\n    uri: app://self/ping\n    options:\n      - name: count\n        type: integer\n        default: abc\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("is not an integer"));

    let manifest = parse_manifest(
        "commands:\n  - name: ping\n    uri: app://self/ping\n    options:\n      - name: count\n        type: integer\n        default: \"7\"\n",
    )
    .unwrap();
    let schema = manifest.schema_for("ping").unwrap();
    assert_eq!(
        schema.option("count").unwrap().default_value(),
        Some(&serde_json::Value::from(7))
    );
}

#[test]
fn test_commands_sharing_a_shell_route() {
    let err = parse_manifest(
        "commands:\n  - name: alpha\n    uri: app://self/x\n    run: printf alpha\n  - name: beta\n    uri: app://self/x\n    run: printf beta\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("Command #2"));
    assert!(err.to_string().contains("already served by 'alpha'"));
}

#[test]
fn test_run_unknown_command() {
    let err = resource_cli::run(&args(&["missing"]), &system()).unwrap_err();
    assert_eq!(err.downcast_ref::<CliError>().unwrap().exit_code(), 127);
}

#[test]
fn test_run_help_and_validation_without_shell() {
    let result = resource_cli::run(&args(&["greeting", "--help"]), &system()).unwrap();
    assert_eq!(result.exit_code, 0);
    assert!(result.message.contains("Usage: greeting [options]"));

    let result = resource_cli::run(&args(&["greeting", "-v"]), &system()).unwrap();
    assert_eq!(result.message, "greeting version 1.0.0");

    let result = resource_cli::run(&args(&["greeting", "-l", "ja"]), &system()).unwrap();
    assert_eq!(result.exit_code, 1);
    assert_eq!(result.message, "Error: Option --name is required");
}

#[test]
fn test_run_list() {
    let mut list_args = args(&[]);
    list_args.list = true;

    let listing = resource_cli::run_list(&list_args, &system()).unwrap();
    assert_eq!(
        listing,
        "greeting\tSay hello in multiple languages\ndeploy\tDeploy a build"
    );
}

#[test]
fn test_explicit_manifest_path() {
    let system = MockSystem::new()
        .with_current_dir("/work")
        .unwrap()
        .with_file("/etc/tools/ops.yaml", MANIFEST.as_bytes())
        .unwrap();

    let mut explicit = args(&["deploy", "--version"]);
    explicit.manifest = Some("/etc/tools/ops.yaml".to_owned());
    let result = resource_cli::run(&explicit, &system).unwrap();
    assert_eq!(result.message, "deploy version 1.0.0");

    let err = resource_cli::run(&args(&["deploy"]), &system).unwrap_err();
    assert!(err.to_string().contains("No manifest found"));
}

#[test]
fn test_user_config_manifest() {
    let system = MockSystem::new()
        .with_current_dir("/work")
        .unwrap()
        .with_config_dir("/home/ada/.config")
        .unwrap()
        .with_file("/home/ada/.config/resource-cli/commands.yaml", MANIFEST.as_bytes())
        .unwrap();

    let result = resource_cli::run(&args(&["greeting", "--version"]), &system).unwrap();
    assert_eq!(result.exit_code, 0);
}
