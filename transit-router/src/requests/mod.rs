//! JSON request flows.
//!
//! `make_base` turns a network description into a saved base;
//! `process_requests` loads that base and answers stop, bus and route
//! queries without rebuilding anything.

mod dto;
mod error;
mod handler;

pub use dto::{
    BaseRequest, MakeBaseInput, ProcessRequestsInput, ResponseBody, RouteItem,
    SerializationSettings, StatQuery, StatRequest, StatResponse,
};
pub use error::RequestError;
pub use handler::{RequestHandler, build_catalogue, make_base, process_requests};
