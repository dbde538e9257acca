//! graphfuzz — GraphQL argument fuzzer
//!
//! Reads a saved introspection response, generates a query for every field
//! of every object type with each argument bound to a wordlist entry, and
//! reports how the endpoint answers.

// Error documentation is deferred - the errors are self-explanatory from types
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod client;
pub mod fuzzer;
pub mod protocol;
pub mod query;
pub mod schema;
pub mod testing;
pub mod wordlist;

pub use cli::{Cli, Config, ConfigError};
pub use client::{Client, ClientError};
pub use fuzzer::{run, FuzzError, RunSummary};
pub use protocol::{QueryEnvelope, QueryRequest};
pub use query::{build_query, fuzz_queries, is_fuzz_target, FuzzCase};
pub use schema::{load_schema, parse_schema, Arg, Field, FieldType, SchemaError, Type};
pub use testing::{MockEndpoint, MockReply, RecordedRequest, TestError};
pub use wordlist::{load_wordlist, Wordlist, WordlistError};
