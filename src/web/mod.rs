//! HTTP upload endpoint.
//!
//! This module exposes the processor over HTTP using Axum. It is a thin
//! caller of the core: uploads are checked for filename and content
//! hygiene, then handed to [`FileProcessor`](crate::processing::FileProcessor).
//!
//! ## Starting the Server
//!
//! ```text
//! # Start on default port 8080
//! lab-ingest serve
//!
//! # Custom port with a config file
//! lab-ingest serve --port 3000 --config ingest.json
//!
//! # Bind to all interfaces
//! lab-ingest serve --address 0.0.0.0
//! ```
//!
//! ## API Endpoints
//!
//! - `POST /api/process` - Process the upload in multipart field `file`
//! - `GET /api/formats` - Active allow-list and size limit

pub mod server;
