/// `$_SERVER` keys set by the providers of this crate.
/// https://www.php.net/manual/en/reserved.variables.server.php
pub const DOCUMENT_ROOT: &str = "DOCUMENT_ROOT";
pub const HTTP_HOST: &str = "HTTP_HOST";
pub const PATH_INFO: &str = "PATH_INFO";
pub const QUERY_STRING: &str = "QUERY_STRING";
pub const REMOTE_ADDR: &str = "REMOTE_ADDR";
pub const REMOTE_PORT: &str = "REMOTE_PORT";
pub const REQUEST_METHOD: &str = "REQUEST_METHOD";
pub const REQUEST_TIME: &str = "REQUEST_TIME";
pub const REQUEST_TIME_FLOAT: &str = "REQUEST_TIME_FLOAT";
pub const REQUEST_URI: &str = "REQUEST_URI";
pub const SCRIPT_FILENAME: &str = "SCRIPT_FILENAME";
pub const SERVER_NAME: &str = "SERVER_NAME";
pub const SERVER_PORT: &str = "SERVER_PORT";
pub const SERVER_SOFTWARE: &str = "SERVER_SOFTWARE";

/// Prefix of header-derived keys.
pub const HTTP_PREFIX: &str = "HTTP_";
