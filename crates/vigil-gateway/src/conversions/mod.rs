//! Engine outcomes ↔ boundary responses.
//!
//! Every response is camelCase JSON with a `success` flag; failures carry an
//! `errorType` tag and the error text in `errors`.

pub mod error_types;
pub mod recommendation_types;
pub mod response_types;
