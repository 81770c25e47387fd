use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use clap_verbosity_flag::InfoLevel;
use clap_verbosity_flag::Verbosity;
use globals_provider::CompoundServerGlobalsProvider;
use globals_provider::DefaultServerGlobalsProvider;
use globals_provider::FixedClock;
use globals_provider::ServerGlobals;
use globals_provider::ServerGlobalsProvider;
use globals_provider::StaticServerGlobalsProvider;
use hyper::Method;
use hyper::Request;
use hyper::Uri;
use hyper::header::HeaderName;
use hyper::header::HeaderValue;
use tracing::debug;

#[derive(Clone, Debug, clap::Parser)]
#[command(version, about, author)]
pub struct Cli {
  #[arg(default_value = "/", value_parser = parse_uri)]
  url: Uri,
  #[arg(short = 'X', long, env = "GLOBALS_METHOD", default_value = "GET", value_parser = parse_method)]
  method: Method,
  #[arg(short = 'H', long = "header", help = "Add header 'Name: value' to the request", value_name = "NAME: VALUE", value_parser = parse_header)]
  headers: Vec<(HeaderName, HeaderValue)>,
  #[arg(short, long, env = "GLOBALS_SERVER", help = "TOML file of static server globals, defaults to the process environment")]
  server: Option<PathBuf>,
  #[arg(long, help = "Skip the static server globals", conflicts_with = "server")]
  no_static: bool,
  #[arg(short, long, env = "GLOBALS_TIME", help = "Fixed request time in seconds since the Unix epoch", value_parser = parse_time)]
  time: Option<FixedClock>,
  #[arg(long, help = "Print the globals as a JSON object")]
  json: bool,
  #[command(flatten)]
  verbosity: Verbosity<InfoLevel>,
}

impl Cli {
  pub(crate) fn verbosity(&self) -> Verbosity<InfoLevel> {
    self.verbosity
  }

  pub(crate) fn execute(self) -> anyhow::Result<()> {
    let provider = self.provider()?;
    let request = self.request();
    debug!(method = %request.method(), uri = %request.uri(), providers = provider.len(), "computing server globals");

    let globals = provider.server_globals(&request);
    self.print(&globals, &mut std::io::stdout().lock())
  }

  fn provider(&self) -> anyhow::Result<CompoundServerGlobalsProvider> {
    let mut providers: Vec<Box<dyn ServerGlobalsProvider>> = Vec::with_capacity(2);

    if !self.no_static {
      let provider = match &self.server {
        Some(path) => StaticServerGlobalsProvider::from_file(path)?,
        None => StaticServerGlobalsProvider::from_env(),
      };
      providers.push(Box::new(provider));
    }

    let provider = match self.time {
      Some(clock) => DefaultServerGlobalsProvider::with_clock(clock),
      None => DefaultServerGlobalsProvider::new(),
    };
    providers.push(Box::new(provider));

    Ok(CompoundServerGlobalsProvider::new(providers))
  }

  fn request(&self) -> Request<()> {
    let mut request = Request::new(());
    *request.method_mut() = self.method.clone();
    *request.uri_mut() = self.url.clone();
    for (name, value) in &self.headers {
      request.headers_mut().append(name.clone(), value.clone());
    }
    request
  }

  fn print<W: Write>(&self, globals: &ServerGlobals, out: &mut W) -> anyhow::Result<()> {
    if self.json {
      serde_json::to_writer_pretty(&mut *out, globals)?;
      writeln!(out)?;
      return Ok(());
    }

    for (key, value) in globals {
      writeln!(out, "{key}={value}")?;
    }
    Ok(())
  }
}

fn parse_uri(arg: &str) -> anyhow::Result<Uri> {
  Uri::from_str(arg).with_context(|| format!("invalid url `{arg}`"))
}

fn parse_method(arg: &str) -> anyhow::Result<Method> {
  Method::from_str(arg).with_context(|| format!("invalid method `{arg}`"))
}

fn parse_header(arg: &str) -> anyhow::Result<(HeaderName, HeaderValue)> {
  let Some((name, value)) = arg.split_once(':') else {
    anyhow::bail!("header must look like `Name: value`");
  };
  Ok((HeaderName::from_str(name.trim())?, HeaderValue::from_str(value.trim())?))
}

fn parse_time(arg: &str) -> anyhow::Result<FixedClock> {
  let secs = f64::from_str(arg)?;
  FixedClock::from_unix_secs_f64(secs).with_context(|| format!("time out of range: {arg}"))
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use clap::Parser;
  use clap_verbosity_flag::Verbosity;
  use clap_verbosity_flag::VerbosityFilter;
  use globals_provider::Clock;
  use globals_provider::ServerGlobals;
  use globals_provider::ServerGlobalsProvider;
  use globals_provider::ServerValue;
  use hyper::Method;
  use proptest::prelude::*;
  use rstest::rstest;

  use crate::cli::Cli;
  use crate::cli::parse_header;
  use crate::cli::parse_time;

  fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from([env!("CARGO_PKG_NAME")].iter().chain(args)).unwrap()
  }

  proptest! {
    #[test]
    fn test_verbosity(verbose in 0..3u8, quiet in 0..=3u8) {
      let mut cli = cli(&[]);
      cli.verbosity = Verbosity::new(verbose, quiet);

      let expected = match (verbose as i16) - (quiet as i16) {
        -3 => VerbosityFilter::Off,
        -2 => VerbosityFilter::Error,
        -1 => VerbosityFilter::Warn,
        0 => VerbosityFilter::Info,
        1 => VerbosityFilter::Debug,
        2 => VerbosityFilter::Trace,
        _ => unreachable!(),
      };
      prop_assert_eq!(cli.verbosity().filter(), expected);
    }
  }

  #[rstest]
  #[case("Host: example.com", "host", "example.com")]
  #[case("X-Custom-Header:custom value", "x-custom-header", "custom value")]
  #[case("  Accept :  */*  ", "accept", "*/*")]
  #[case("X-Time: 12:00", "x-time", "12:00")]
  fn test_parse_header(#[case] arg: &str, #[case] name: &str, #[case] value: &str) {
    let (header_name, header_value) = parse_header(arg).unwrap();
    assert_eq!(header_name, name);
    assert_eq!(header_value, value);
  }

  #[rstest]
  #[case::no_colon("Host")]
  #[case::invalid_name("Bad Name: value")]
  #[case::empty_name(": value")]
  fn test_parse_header_invalid(#[case] arg: &str) {
    assert!(parse_header(arg).is_err());
  }

  #[test]
  fn test_parse_time() {
    let clock = parse_time("1704110400.5").unwrap();
    assert_eq!(
      clock.now().duration_since(std::time::SystemTime::UNIX_EPOCH).unwrap().as_millis(),
      1_704_110_400_500
    );
    assert!(parse_time("noon").is_err());
    assert!(parse_time("inf").is_err());
  }

  #[test]
  fn test_request() {
    let cli = cli(&[
      "-X",
      "POST",
      "-H",
      "Host: example.com",
      "-H",
      "Accept: */*",
      "http://example.com/path?query=value",
    ]);

    let request = cli.request();

    assert_eq!(request.method(), Method::POST);
    assert_eq!(request.uri().path(), "/path");
    assert_eq!(request.headers().get("host").unwrap(), "example.com");
    assert_eq!(request.headers().len(), 2);
  }

  #[test]
  fn test_provider() {
    let cli = cli(&["--server", "tests/fixtures/server.toml", "--time", "1704110400", "/foo"]);

    let globals = cli.provider().unwrap().server_globals(&cli.request());

    assert_eq!(globals.get("SERVER_NAME"), Some(&"localhost".into()));
    assert_eq!(globals.get("REQUEST_TIME"), Some(&ServerValue::Int(1_704_110_400)));
    assert_eq!(globals.get("PATH_INFO"), Some(&"/foo".into()));
  }

  #[test]
  fn test_provider_without_static() {
    let cli = cli(&["--no-static"]);

    let globals = cli.provider().unwrap().server_globals(&cli.request());

    assert!(!globals.contains_key("SERVER_SOFTWARE"));
    assert!(globals.contains_key("REQUEST_TIME"));
  }

  #[test]
  fn test_provider_missing_file() {
    let cli = cli(&["--server", "tests/fixtures/missing.toml"]);
    assert!(cli.provider().is_err());
    assert_eq!(cli.server, Some(PathBuf::from("tests/fixtures/missing.toml")));
  }

  #[test]
  fn test_print() {
    let globals = ServerGlobals::from_iter([
      ("REQUEST_METHOD", ServerValue::from("GET")),
      ("REMOTE_PORT", ServerValue::from(80)),
    ]);

    let mut out = Vec::new();
    cli(&[]).print(&globals, &mut out).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "REMOTE_PORT=80\nREQUEST_METHOD=GET\n");

    let mut out = Vec::new();
    cli(&["--json"]).print(&globals, &mut out).unwrap();
    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["REMOTE_PORT"], 80);
    assert_eq!(json["REQUEST_METHOD"], "GET");
  }
}
