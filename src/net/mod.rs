pub mod http;

pub use http::{HttpClient, HttpError, ReqwestClient, RetryPolicy, TlsMode, get_with_retry};
