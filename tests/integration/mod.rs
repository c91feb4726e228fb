//! Integration tests for homeplan

mod fingerprint_verification;
mod gemini_client;
mod record_store;
mod test_utils;
