//! Behavioural tests for CLI configuration loading.

use gitlab_warden::config::LEGACY_TOKEN_ENV;
use gitlab_warden::{WardenConfig, WardenError};
use ortho_config::MergeComposer;
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};
use serde_json::{Value, json};

/// State for CLI configuration scenarios.
///
/// Layers are kept as JSON because `MergeComposer` is not `Clone`; the
/// composer is rebuilt in `build_config`. The legacy variable is only
/// applied while a token is resolved, under the process-wide env lock.
#[derive(ScenarioState, Default)]
struct ConfigState {
    env_layer: Slot<Value>,
    cli_layer: Slot<Value>,
    config: Slot<WardenConfig>,
    legacy_token: Slot<Option<String>>,
}

#[fixture]
fn config_state() -> ConfigState {
    ConfigState::default()
}

fn unquote(value: &str) -> &str {
    value.trim_matches('"')
}

fn build_config(state: &ConfigState) -> Result<(), WardenError> {
    let defaults =
        serde_json::to_value(WardenConfig::default()).map_err(|error| WardenError::Configuration {
            message: error.to_string(),
        })?;
    let mut composer = MergeComposer::new();
    composer.push_defaults(defaults);

    if let Some(env) = state.env_layer.get() {
        composer.push_environment(env);
    }
    if let Some(cli) = state.cli_layer.get() {
        composer.push_cli(cli);
    }

    let config = WardenConfig::merge_from_layers(composer.layers()).map_err(|error| {
        WardenError::Configuration {
            message: error.to_string(),
        }
    })?;
    state.config.set(config);
    Ok(())
}

fn built(state: &ConfigState) -> Result<WardenConfig, WardenError> {
    state.config.get().ok_or_else(|| WardenError::Configuration {
        message: "configuration not built".to_owned(),
    })
}

/// Resolves the token with the legacy variable pinned to the scenario's value.
fn resolve_token(state: &ConfigState) -> Result<Result<String, WardenError>, WardenError> {
    let config = built(state)?;
    let legacy = state.legacy_token.get().flatten();
    let _guard = env_lock::lock_env([(LEGACY_TOKEN_ENV, legacy.as_deref())]);
    Ok(config
        .resolve_token()
        .map(|token| token.value().to_owned()))
}

// --- Given steps ---

#[given("a configuration with no username set")]
fn no_username_set(config_state: &ConfigState) {
    config_state.env_layer.set(json!({}));
}

#[given("a configuration with no token set")]
fn no_token_set(config_state: &ConfigState) {
    config_state.env_layer.set(json!({}));
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a configuration with environment username {username}")]
fn env_username_set(config_state: &ConfigState, username: String) {
    config_state
        .env_layer
        .set(json!({"username": unquote(&username)}));
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a configuration with environment token {token}")]
fn env_token_set(config_state: &ConfigState, token: String) {
    config_state.env_layer.set(json!({"token": unquote(&token)}));
}

#[given("no GITLAB_PRIVATE_TOKEN environment variable")]
fn no_legacy_token(config_state: &ConfigState) {
    config_state.legacy_token.set(None);
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[given("a GITLAB_PRIVATE_TOKEN environment variable set to {token}")]
fn legacy_token_set(config_state: &ConfigState, token: String) {
    config_state
        .legacy_token
        .set(Some(unquote(&token).to_owned()));
}

// --- When steps ---

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[when("the CLI receives username {username}")]
fn cli_receives_username(config_state: &ConfigState, username: String) -> Result<(), WardenError> {
    config_state
        .cli_layer
        .set(json!({"username": unquote(&username)}));
    build_config(config_state)
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[when("the CLI receives token {token}")]
fn cli_receives_token(config_state: &ConfigState, token: String) -> Result<(), WardenError> {
    config_state.cli_layer.set(json!({"token": unquote(&token)}));
    build_config(config_state)
}

#[when("the CLI receives no token")]
fn cli_receives_no_token(config_state: &ConfigState) -> Result<(), WardenError> {
    build_config(config_state)
}

// --- Then steps ---

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the configuration username is {expected}")]
fn assert_username(config_state: &ConfigState, expected: String) -> Result<(), WardenError> {
    let config = built(config_state)?;
    assert_eq!(config.username.as_deref(), Some(unquote(&expected)));
    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("the resolved token is {expected}")]
fn assert_resolved_token(config_state: &ConfigState, expected: String) -> Result<(), WardenError> {
    let resolved = resolve_token(config_state)?;
    assert_eq!(resolved, Ok(unquote(&expected).to_owned()));
    Ok(())
}

#[then("resolving token returns an error")]
fn assert_token_error(config_state: &ConfigState) -> Result<(), WardenError> {
    let resolved = resolve_token(config_state)?;
    assert_eq!(resolved, Err(WardenError::MissingCredential));
    Ok(())
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "rstest-bdd passes owned step arguments"
)]
#[then("building the membership request fails mentioning {flag}")]
fn assert_membership_request_error(
    config_state: &ConfigState,
    flag: String,
) -> Result<(), WardenError> {
    let result = built(config_state)?.membership_request();
    assert!(
        matches!(
            &result,
            Err(WardenError::Configuration { message }) if message.contains(unquote(&flag))
        ),
        "expected a configuration error mentioning the flag, got {result:?}"
    );
    Ok(())
}

// --- Scenario bindings ---

#[scenario(path = "tests/features/cli_config.feature", index = 0)]
fn load_username_from_cli(config_state: ConfigState) {
    let _ = config_state;
}

#[scenario(path = "tests/features/cli_config.feature", index = 1)]
fn load_token_from_cli(config_state: ConfigState) {
    let _ = config_state;
}

#[scenario(path = "tests/features/cli_config.feature", index = 2)]
fn cli_username_overrides_env(config_state: ConfigState) {
    let _ = config_state;
}

#[scenario(path = "tests/features/cli_config.feature", index = 3)]
fn cli_token_overrides_env(config_state: ConfigState) {
    let _ = config_state;
}

#[scenario(path = "tests/features/cli_config.feature", index = 4)]
fn env_token_used_when_cli_not_provided(config_state: ConfigState) {
    let _ = config_state;
}

#[scenario(path = "tests/features/cli_config.feature", index = 5)]
fn missing_entity_is_reported(config_state: ConfigState) {
    let _ = config_state;
}

#[scenario(path = "tests/features/cli_config.feature", index = 6)]
fn missing_token_error(config_state: ConfigState) {
    let _ = config_state;
}

#[scenario(path = "tests/features/cli_config.feature", index = 7)]
fn legacy_token_fallback(config_state: ConfigState) {
    let _ = config_state;
}

#[scenario(path = "tests/features/cli_config.feature", index = 8)]
fn configured_token_precedence(config_state: ConfigState) {
    let _ = config_state;
}
