//! End-to-End Integration Tests
//!
//! These tests exercise the PostgreSQL storage backend and the manager on
//! top of it, using testcontainers for ephemeral PostgreSQL instances.

mod common;
mod manager;
mod repository;
