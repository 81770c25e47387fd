//! PHP `$_SERVER` globals derived from HTTP requests.
//!
//! A [`ServerGlobalsProvider`] turns a request into a flat map of CGI-style metadata. The usual
//! setup merges a [`StaticServerGlobalsProvider`] (server-wide values) with a
//! [`DefaultServerGlobalsProvider`] (request time, request line and headers):
//!
//! ```
//! use globals_provider::CompoundServerGlobalsProvider;
//! use globals_provider::DefaultServerGlobalsProvider;
//! use globals_provider::ServerGlobalsProvider;
//! use globals_provider::StaticServerGlobalsProvider;
//! use hyper::Request;
//!
//! let provider = CompoundServerGlobalsProvider::new([
//!   Box::new(StaticServerGlobalsProvider::new([("SERVER_NAME", "example.com")]))
//!     as Box<dyn ServerGlobalsProvider>,
//!   Box::new(DefaultServerGlobalsProvider::new()),
//! ]);
//!
//! let request = Request::builder().uri("/index.php?page=1").body(()).unwrap();
//! let globals = provider.server_globals(&request);
//!
//! assert_eq!(globals.get("REQUEST_URI").and_then(|v| v.as_str()), Some("/index.php?page=1"));
//! assert_eq!(globals.get("SERVER_NAME").and_then(|v| v.as_str()), Some("example.com"));
//! ```

pub mod clock;
pub mod error;
mod globals;
pub mod provider;
mod request;
pub mod service;
mod value;
pub mod variables;

pub use clock::Clock;
pub use clock::FixedClock;
pub use clock::SystemClock;
pub use error::Error;
pub use globals::ServerGlobals;
pub use provider::CompoundServerGlobalsProvider;
pub use provider::DefaultServerGlobalsProvider;
pub use provider::EmptyServerGlobalsProvider;
pub use provider::ServerGlobalsProvider;
pub use provider::SourceValue;
pub use provider::StaticServerGlobalsProvider;
pub use request::RequestHead;
pub use service::ServerGlobalsExt;
pub use service::ServerGlobalsLayer;
pub use service::ServerGlobalsService;
pub use value::ServerValue;
