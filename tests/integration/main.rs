//! HTTP-level integration tests against the in-memory store.

mod admin_test;
mod helpers;
mod registration_test;
mod slot_test;
mod user_test;
