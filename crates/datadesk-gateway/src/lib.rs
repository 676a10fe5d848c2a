//! # DataDesk Gateway
//!
//! HTTP and WebSocket surface over the master-data store, the keyword RAG
//! core, and the configured LLM provider.
//!
//! ## Endpoints
//! ```text
//! GET  /                  service banner
//! GET  /health            liveness probe
//! GET  /api/master-data   current blob
//! POST /api/master-data   replace blob, broadcast to WS clients
//! POST /api/chat          context-grounded chat
//! POST /api/rag-search    direct segment search
//! GET  /ws                live master-data push channel
//! ```
//!
//! Handlers are thin: validation and wire shaping live here, everything else
//! is delegated to the retrieval core, the store, and the provider held in
//! [`AppState`].

pub mod error;
pub mod routes;
pub mod server;
pub mod ws;

pub use error::ApiError;
pub use server::{AppState, build_router, start};
