//! Inkpost - a minimal self-hosted backend for blog content.
//!
//! Posts are stored as JSON documents behind storage traits, thumbnails live
//! in a pluggable image store, and a small HTTP API exposes the usual CRUD
//! operations plus a bounded "featured posts" registry.

pub mod api;
pub mod build_info;
pub mod config;
pub mod handlers;
pub mod image;
pub mod post;
pub mod server;
pub mod store;
