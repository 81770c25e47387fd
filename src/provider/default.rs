use std::fmt::Debug;
use std::fmt::Formatter;
use std::time::SystemTime;

use tracing::trace;

use crate::clock::Clock;
use crate::clock::unix_timestamp;
use crate::globals::ServerGlobals;
use crate::provider::ServerGlobalsProvider;
use crate::request::RequestHead;
use crate::variables::HTTP_HOST;
use crate::variables::HTTP_PREFIX;
use crate::variables::PATH_INFO;
use crate::variables::QUERY_STRING;
use crate::variables::REMOTE_ADDR;
use crate::variables::REMOTE_PORT;
use crate::variables::REQUEST_METHOD;
use crate::variables::REQUEST_TIME;
use crate::variables::REQUEST_TIME_FLOAT;
use crate::variables::REQUEST_URI;

const DEFAULT_REMOTE_ADDR: &str = "127.0.0.1";
const DEFAULT_REMOTE_PORT: u16 = 80;

/// Returns the request-aware globals: request time, request line and headers.
///
/// Without a clock the system time is sampled on every call, so only the presence of the
/// `REQUEST_TIME*` keys is stable. Inject a [`Clock`] to get fully deterministic output.
#[derive(Default)]
pub struct DefaultServerGlobalsProvider {
  clock: Option<Box<dyn Clock>>,
}

impl DefaultServerGlobalsProvider {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_clock<C: Clock + 'static>(clock: C) -> Self {
    Self { clock: Some(Box::new(clock)) }
  }

  fn request_time(&self) -> ServerGlobals {
    let mut globals = ServerGlobals::new();

    match &self.clock {
      Some(clock) => {
        let (secs, micros) = unix_timestamp(clock.now());
        globals.insert(REQUEST_TIME_FLOAT, secs as f64 + 0.000_001 * f64::from(micros));
        globals.insert(REQUEST_TIME, secs);
      }
      None => {
        let microtime = match SystemTime::UNIX_EPOCH.elapsed() {
          Ok(elapsed) => elapsed.as_secs_f64(),
          Err(err) => -err.duration().as_secs_f64(),
        };
        globals.insert(REQUEST_TIME_FLOAT, microtime);
        globals.insert(REQUEST_TIME, microtime as i64);
      }
    }

    globals
  }

  fn request_info(request: &dyn RequestHead) -> ServerGlobals {
    let uri = request.uri();
    let query = uri.query().unwrap_or_default();
    let path = match uri.path() {
      "" => "/",
      path => path,
    };
    let host = uri.host().unwrap_or(DEFAULT_REMOTE_ADDR);
    let port = uri.port_u16().unwrap_or(DEFAULT_REMOTE_PORT);

    let request_uri = match query {
      "" => path.to_string(),
      query => format!("{path}?{query}"),
    };

    let mut globals = ServerGlobals::new();
    globals.insert(REQUEST_METHOD, request.method().as_str());
    globals.insert(QUERY_STRING, query);
    globals.insert(PATH_INFO, path);
    globals.insert(REMOTE_ADDR, host);
    globals.insert(REMOTE_PORT, port);
    globals.insert(REQUEST_URI, request_uri);
    globals.insert(HTTP_HOST, format!("{host}:{port}"));
    globals
  }

  fn request_headers(request: &dyn RequestHead) -> ServerGlobals {
    request
      .headers()
      .iter()
      .map(|(name, value)| {
        (header_variable_name(name.as_str()), String::from_utf8_lossy(value.as_bytes()).into_owned())
      })
      .collect()
  }
}

impl ServerGlobalsProvider for DefaultServerGlobalsProvider {
  fn server_globals(&self, request: &dyn RequestHead) -> ServerGlobals {
    let mut globals = self.request_time();
    globals.merge(Self::request_info(request));
    globals.merge(Self::request_headers(request));
    trace!(count = globals.len(), "request globals computed");
    globals
  }
}

impl Debug for DefaultServerGlobalsProvider {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("DefaultServerGlobalsProvider").field("clock", &self.clock.is_some()).finish()
  }
}

/// Maps a header name to its `$_SERVER` key, `x-custom-header` becomes `HTTP_X_CUSTOM_HEADER`.
pub(crate) fn header_variable_name(name: &str) -> String {
  let mut variable = String::with_capacity(HTTP_PREFIX.len() + name.len());
  variable.push_str(HTTP_PREFIX);
  variable.extend(name.chars().map(|c| match c {
    '-' => '_',
    c => c.to_ascii_uppercase(),
  }));
  variable
}
