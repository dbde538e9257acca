//! Fuzz target for introspection and response decoding.
//!
//! Tests that arbitrary bytes don't cause panics when parsed as a schema
//! dump or a response envelope, and that any schema that does parse can be
//! turned into queries.

#![no_main]

use graphfuzz::protocol::QueryEnvelope;
use graphfuzz::query::fuzz_queries;
use graphfuzz::schema::parse_schema;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Response bodies arrive as raw bytes
    if let Ok(envelope) = serde_json::from_slice::<QueryEnvelope>(data) {
        let _ = envelope.to_string();
    }

    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(types) = parse_schema(s) {
            let words = vec![String::new()];
            for case in fuzz_queries(&types, &words) {
                assert!(case.query.starts_with("{ "));
                assert!(case.query.ends_with(" } }"));
            }
        }
    }
});
