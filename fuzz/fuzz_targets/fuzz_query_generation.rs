//! Fuzz target for query generation.
//!
//! Uses arbitrary to build schema types and wordlists, and checks that every
//! fuzz-target field is emitted once per word.

#![no_main]

use arbitrary::Arbitrary;
use graphfuzz::query::{fuzz_queries, is_fuzz_target};
use graphfuzz::schema::{Arg, Field, FieldType, Type};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzType {
    object: bool,
    name: String,
    fields: Vec<(String, Vec<String>)>,
}

#[derive(Debug, Arbitrary)]
struct Input {
    types: Vec<FuzzType>,
    words: Vec<String>,
}

fuzz_target!(|input: Input| {
    let types: Vec<Type> = input
        .types
        .into_iter()
        .map(|t| Type {
            kind: if t.object { "OBJECT" } else { "SCALAR" }.to_string(),
            name: t.name,
            fields: t
                .fields
                .into_iter()
                .map(|(name, args)| Field {
                    name,
                    args: args
                        .into_iter()
                        .map(|name| Arg {
                            name,
                            ty: FieldType::default(),
                        })
                        .collect(),
                    ty: FieldType::default(),
                })
                .collect(),
        })
        .collect();

    let expected: usize = types
        .iter()
        .filter(|t| is_fuzz_target(t))
        .map(|t| t.fields.len() * input.words.len())
        .sum();

    assert_eq!(fuzz_queries(&types, &input.words).count(), expected);
});
