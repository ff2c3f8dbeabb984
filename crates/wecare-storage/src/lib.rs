// MongoDB storage layer
//
// This crate provides the shared `Database` handle the API handlers use for
// all collection access. It is constructed once at startup and cloned into
// request state; the driver manages pooling underneath.

pub mod repositories;

pub use repositories::Database;
