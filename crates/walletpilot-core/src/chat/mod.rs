//! Chat request handling for the `/agent` endpoint.
//!
//! `ChatRequestHandler` checks the request, resolves an agent through the
//! session cache and returns the agent's aggregated reply.

pub mod handler;
