use std::process::Command;

use assert_cmd::assert::OutputAssertExt;
use assert_cmd::cargo::CargoError;
use assert_cmd::cargo::CommandCargoExt;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use predicates::str::starts_with;

#[test]
fn test_cli_request() -> Result<(), CargoError> {
  let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME"))?;
  cmd.args(["--no-static", "-t", "1704110400", "-X", "POST"]);
  cmd.args(["-H", "X-Custom-Header: custom value", "http://example.com:8080/path?query=value"]);
  cmd
    .assert()
    .success()
    .stdout(contains("REQUEST_TIME=1704110400\n"))
    .stdout(contains("REQUEST_TIME_FLOAT=1704110400\n"))
    .stdout(contains("REQUEST_METHOD=POST\n"))
    .stdout(contains("REQUEST_URI=/path?query=value\n"))
    .stdout(contains("HTTP_HOST=example.com:8080\n"))
    .stdout(contains("REMOTE_PORT=8080\n"))
    .stdout(contains("HTTP_X_CUSTOM_HEADER=custom value\n"))
    .stdout(contains("SERVER_SOFTWARE").not());

  Ok(())
}

#[test]
fn test_cli_server_file() -> Result<(), CargoError> {
  let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME"))?;
  cmd.args(["--server", "tests/fixtures/server.toml", "/index.php"]);
  cmd
    .assert()
    .success()
    .stdout(contains("DOCUMENT_ROOT=/srv/app/public\n"))
    .stdout(contains("SERVER_NAME=localhost\n"))
    .stdout(contains("SERVER_PORT=8080\n"))
    .stdout(contains("SERVER_SOFTWARE=Boson Runtime\n"))
    .stdout(contains("HTTPS=\n"));

  Ok(())
}

#[test]
fn test_cli_json() -> Result<(), CargoError> {
  let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME"))?;
  cmd.args(["--json", "--no-static", "/"]);
  cmd.assert().success().stdout(starts_with("{")).stdout(contains(r#""PATH_INFO": "/""#));

  Ok(())
}

#[test]
fn test_cli_invalid_header() -> Result<(), CargoError> {
  let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME"))?;
  cmd.args(["-H", "no-colon"]);
  cmd.assert().failure().stderr(contains("Name: value"));

  Ok(())
}

#[test]
fn test_cli_missing_server_file() -> Result<(), CargoError> {
  let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME"))?;
  cmd.args(["--server", "tests/fixtures/missing.toml"]);
  cmd.assert().failure().stderr(contains("Failed to read server globals file"));

  Ok(())
}
