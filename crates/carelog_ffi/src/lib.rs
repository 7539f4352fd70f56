//! Flutter bridge for Carelog core use cases.

pub mod api;
