//! Boundary calls, one module per area. Every call returns a response
//! value, never an error: failures are folded into the response.

pub mod flow;
pub mod health;
pub mod recommendations;
