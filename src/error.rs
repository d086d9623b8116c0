use thiserror::Error;

/// Problems with the schema document or its bindings. These are fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse schema document: {0}")]
    Parse(String),
    #[error("field `{type_name}.{field_name}` is bound more than once")]
    DuplicateBinding {
        type_name: String,
        field_name: String,
    },
    #[error("`{type_name}.{field_name}` has a resolver but is not declared in the schema")]
    UnknownField {
        type_name: String,
        field_name: String,
    },
    #[error("type `{0}` is defined more than once")]
    DuplicateType(String),
    #[error("unsupported schema definition: {0}")]
    UnsupportedDefinition(String),
    #[error("invalid schema: {0}")]
    Schema(String),
}

/// A single field failed to resolve. Reported in the response, siblings are unaffected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("missing required argument `{0}`")]
    MissingArgument(&'static str),
    #[error("argument `{0}` must be a string")]
    InvalidArgument(&'static str),
    #[error("expected a {expected} as the parent value")]
    UnexpectedSource { expected: &'static str },
}
