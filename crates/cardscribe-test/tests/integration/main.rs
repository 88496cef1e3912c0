//! Integration tests for the public cardscribe API.

mod adapter;
mod dispatch;
mod field_set;
mod helpers;
mod settings;
