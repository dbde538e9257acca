//! Fuzzed query generation.
//!
//! Every field of every object type (other than the root `Query` and
//! `Mutation` types) is queried once per word, with the word bound to all of
//! the field's arguments as a string literal. The word is not escaped.

use crate::schema::{Field, Type};

const OBJECT_KIND: &str = "OBJECT";
const ROOT_TYPES: [&str; 2] = ["Query", "Mutation"];

/// One generated query and the schema position it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzCase<'a> {
    pub type_name: &'a str,
    pub field_name: &'a str,
    pub word: &'a str,
    pub query: String,
}

/// Whether queries are generated for `ty`.
#[must_use]
pub fn is_fuzz_target(ty: &Type) -> bool {
    ty.kind == OBJECT_KIND && !ROOT_TYPES.contains(&ty.name.as_str())
}

/// Format a single query.
///
/// A field without arguments still gets `()`.
#[must_use]
pub fn build_query(type_name: &str, field: &Field, word: &str) -> String {
    let args = field
        .args
        .iter()
        .map(|arg| format!("{}: \"{word}\"", arg.name))
        .collect::<Vec<_>>()
        .join(", ");

    format!("{{ {type_name}({args}) {{ {} }} }}", field.name)
}

/// Lazily enumerate every (type, field, word) case in schema order.
pub fn fuzz_queries<'a>(
    types: &'a [Type],
    words: &'a [String],
) -> impl Iterator<Item = FuzzCase<'a>> + 'a {
    types
        .iter()
        .filter(|ty| is_fuzz_target(ty))
        .flat_map(move |ty| {
            ty.fields.iter().flat_map(move |field| {
                words.iter().map(move |word| FuzzCase {
                    type_name: &ty.name,
                    field_name: &field.name,
                    word,
                    query: build_query(&ty.name, field, word),
                })
            })
        })
}
