use async_graphql::dynamic::Schema;
use async_graphql::{Request, Response};

use super::binding::build_schema;
use super::context::RequestContext;
use super::resolvers::library_bindings;
use crate::error::ConfigError;

pub static LIBRARY_SDL: &str = include_str!("../../schemas/library.graphql");

pub fn library_schema() -> Result<Schema, ConfigError> {
    let bindings = library_bindings()?;
    build_schema(LIBRARY_SDL, &bindings)
}

/// Runs a single query with the given request context attached.
pub async fn execute(schema: &Schema, query: &str, context: RequestContext) -> Response {
    schema.execute(Request::new(query).data(context)).await
}
