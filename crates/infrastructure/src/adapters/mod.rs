//! HTTP adapters

mod reqwest_auth_api;
mod reqwest_transport;

pub use reqwest_auth_api::ReqwestAuthApi;
pub use reqwest_transport::ReqwestTransport;
