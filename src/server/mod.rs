use async_graphql::dynamic::Schema;
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::Router;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::{Html, IntoResponse};
use axum::routing::get;

pub mod binding;
pub mod context;
pub mod resolvers;
pub mod schema;

pub use context::{RequestContext, USER_ID_HEADER};
pub use schema::{execute, library_schema};

use binding::{Bindings, build_schema};
use resolvers::library_bindings;
use schema::LIBRARY_SDL;

use crate::error::ConfigError;

pub const GRAPHQL_PATH: &str = "/graphql";
pub const GRAPHIQL_PATH: &str = "/graphiql";

#[derive(Clone, Copy, Debug)]
pub struct AppOptions {
    pub graphiql: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self { graphiql: true }
    }
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

#[axum::debug_handler]
async fn graphql_handler(
    State(schema): State<Schema>,
    headers: HeaderMap,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let context = RequestContext::from_headers(&headers);
    tracing::debug!(user_id = ?context.user_id, "executing GraphQL request");

    let req = req.into_inner().data(context);
    schema.execute(req).await.into()
}

pub fn make_app(options: AppOptions) -> Result<Router, ConfigError> {
    make_app_from(LIBRARY_SDL, &library_bindings()?, options)
}

/// Fails with the schema's [`ConfigError`] before any route exists.
pub fn make_app_from(
    sdl: &str,
    bindings: &Bindings,
    options: AppOptions,
) -> Result<Router, ConfigError> {
    let schema = build_schema(sdl, bindings)?;

    let mut router = Router::new().route(GRAPHQL_PATH, get(graphql_handler).post(graphql_handler));
    if options.graphiql {
        router = router.route(GRAPHIQL_PATH, get(graphiql));
    }
    Ok(router.with_state(schema))
}
