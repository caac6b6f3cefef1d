// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module
//!
//! - `composition_laws`: right-to-left composition and sequence transforms
//! - `collection_queries`: `find_by`, `index_by` and `includes` over a store

mod collection_queries;
mod composition_laws;
mod strategies;
