use cynic::QueryBuilder as _;
use serde_json::{Value, json};

use crate::client::{BookById, BookByIdVariables, Client, Greetings};
use crate::error::ConfigError;
use crate::server::binding::Bindings;
use crate::server::resolvers::{Resolver, library_bindings};
use crate::server::schema::LIBRARY_SDL;
use crate::server::{AppOptions, RequestContext, USER_ID_HEADER, make_app, make_app_from};


fn book_by_id(id: &str) -> cynic::Operation<BookById, BookByIdVariables> {
    BookById::build(BookByIdVariables {
        id: Some(id.into()),
    })
}

async fn post_query(server: &testserver::Server, query: &str, user_id: Option<&str>) -> Value {
    let mut request = reqwest::Client::new()
        .post(server.graphql_url())
        .json(&json!({ "query": query }));
    if let Some(user_id) = user_id {
        request = request.header(USER_ID_HEADER, user_id);
    }
    request.send().await.unwrap().json().await.unwrap()
}

#[tokio::test]
async fn test_greetings() {
    let app = make_app(AppOptions::default()).unwrap();
    let server = testserver::Server::with_router(app);

    let client = Client::new(server.graphql_url());
    let res = client.query(Greetings::build(())).await.unwrap();

    assert!(res.errors.is_none());
    let greetings = res.data.unwrap();
    assert_eq!(greetings.hello.as_deref(), Some("world"));
    assert_eq!(greetings.banana.as_deref(), Some("eat me"));
}

#[tokio::test]
async fn test_book_without_user() {
    let app = make_app(AppOptions::default()).unwrap();
    let server = testserver::Server::with_router(app);

    let client = Client::new(server.graphql_url());
    let res = client.query(book_by_id("book-2")).await.unwrap();

    assert!(res.errors.is_none());
    let book = res.data.unwrap().book_by_id.unwrap();
    assert_eq!(book.id.unwrap().inner(), "book-2");
    assert_eq!(book.name.as_deref(), Some("Moby Dick"));
    assert_eq!(book.page_count.as_deref(), Some("635"));
    assert_eq!(book.user, None);

    let author = book.author.unwrap();
    assert_eq!(author.id.unwrap().inner(), "author-2");
    assert_eq!(author.first_name.as_deref(), Some("Herman"));
    assert_eq!(author.last_name.as_deref(), Some("Melville"));
}

#[tokio::test]
async fn test_book_with_user_header() {
    let app = make_app(AppOptions::default()).unwrap();
    let server = testserver::Server::with_router(app);

    let client = Client::new(server.graphql_url()).with_user_id("123-i-do-it-like-a-track");
    let res = client.query(book_by_id("book-1")).await.unwrap();

    assert!(res.errors.is_none());
    let book = res.data.unwrap().book_by_id.unwrap();
    assert_eq!(book.user.as_deref(), Some("123-i-do-it-like-a-track"));
    assert_eq!(book.page_count.as_deref(), Some("223"));
}

#[tokio::test]
async fn test_unknown_book_over_http() {
    let app = make_app(AppOptions::default()).unwrap();
    let server = testserver::Server::with_router(app);

    let client = Client::new(server.graphql_url());
    let res = client.query(book_by_id("nope")).await.unwrap();

    assert!(res.errors.is_none());
    assert!(res.data.unwrap().book_by_id.is_none());
}

#[tokio::test]
async fn test_raw_json_responses() {
    let app = make_app(AppOptions::default()).unwrap();
    let server = testserver::Server::with_router(app);

    assert_eq!(
        post_query(&server, "{hello}", None).await,
        json!({ "data": { "hello": "world" } })
    );
    assert_eq!(
        post_query(&server, r#"{bookById(id:"book-1"){name}}"#, None).await,
        json!({ "data": { "bookById": { "name": "Harry Potter and the Philosopher's Stone" } } })
    );
    assert_eq!(
        post_query(&server, r#"{bookById(id:"book-3"){user}}"#, Some("reader-7")).await,
        json!({ "data": { "bookById": { "user": "reader-7" } } })
    );
}

#[tokio::test]
async fn test_get_request() {
    let app = make_app(AppOptions::default()).unwrap();
    let server = testserver::Server::with_router(app);

    let mut url = server.graphql_url();
    url.query_pairs_mut()
        .append_pair("query", r#"{bookById(id:"book-2"){name}}"#);
    let res = reqwest::Client::new()
        .get(url)
        .header(USER_ID_HEADER, "reader-3")
        .send()
        .await
        .unwrap();

    assert!(res.status().is_success());
    assert_eq!(
        res.json::<Value>().await.unwrap(),
        json!({ "data": { "bookById": { "name": "Moby Dick" } } })
    );
}

#[test]
fn test_bad_configuration_is_not_served() {
    let mut bindings = library_bindings().unwrap();
    bindings
        .bind("Book", "isbn", Resolver::Static("978"))
        .unwrap();
    let Err(err) = make_app_from(LIBRARY_SDL, &bindings, AppOptions::default()) else {
        panic!("served a schema with an undeclared binding");
    };
    assert!(matches!(err, ConfigError::UnknownField { .. }));

    let Err(err) = make_app_from("type Query {", &Bindings::new(), AppOptions::default()) else {
        panic!("served an unparsable schema");
    };
    assert!(matches!(err, ConfigError::Parse(_)));

    assert!(make_app_from(LIBRARY_SDL, &library_bindings().unwrap(), AppOptions::default()).is_ok());
}

#[tokio::test]
async fn test_graphiql() {
    let app = make_app(AppOptions::default()).unwrap();
    let server = testserver::Server::with_router(app);

    let res = reqwest::get(server.url("/graphiql")).await.unwrap();
    assert!(res.status().is_success());
    assert!(res.text().await.unwrap().contains("/graphql"));

    let app = make_app(AppOptions { graphiql: false }).unwrap();
    let server = testserver::Server::with_router(app);

    let res = reqwest::get(server.url("/graphiql")).await.unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::NOT_FOUND);
}

#[test]
fn test_request_context_from_headers() {
    use axum::http::{HeaderMap, HeaderValue};

    let mut headers = HeaderMap::new();
    assert_eq!(RequestContext::from_headers(&headers).user_id, None);

    headers.insert(USER_ID_HEADER, HeaderValue::from_static("123-abc"));
    assert_eq!(
        RequestContext::from_headers(&headers).user_id.as_deref(),
        Some("123-abc")
    );

    headers.insert(USER_ID_HEADER, HeaderValue::from_bytes(b"\xff\xfe").unwrap());
    assert_eq!(RequestContext::from_headers(&headers).user_id, None);
}
