//! HTTP transport layer for the document-AI client.

mod http;
mod error;
mod reqwest;
pub mod endpoints;
mod multipart;
mod request;
mod response;

pub use http::{ChunkedStream, HttpMethod, HttpRequest, HttpResponse, HttpTransport, StreamingResponse};
pub use error::TransportError;
pub use self::reqwest::ReqwestTransport;
pub use multipart::MultipartForm;
pub use request::RequestBuilder;
pub use response::ResponseParser;
