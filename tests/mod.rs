//! Test module organization
//!
//! This module re-exports test helpers for use in test files.

mod helpers;

#[allow(unused_imports)]
pub use helpers::{
    build_test_config, create_test_api_server, message_patch, new_signature, post_signature,
    DUMMY_MESSAGE, DUMMY_NAME, DUMMY_NAME_OTHER, DUMMY_UNKNOWN_EPOCH_ID,
};
