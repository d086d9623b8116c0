use anyhow::Context as _;
use clap::Parser as _;
use cynic::QueryBuilder as _;
use tracing_subscriber::EnvFilter;

use config::{Command, Config, ServeArgs};
use server::{AppOptions, RequestContext, make_app};

mod client;
mod config;
mod datamodel;
mod error;
mod server;

#[cfg(test)]
mod tests;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match config.command {
        Command::Serve(args) => serve(args).await,
        Command::Exec { query, user_id } => {
            let schema = server::library_schema()?;
            let context = RequestContext { user_id };
            let response = server::execute(&schema, &query, context).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Command::Schema => {
            let schema = server::library_schema()?;
            print!("{}", schema.sdl());
            Ok(())
        }
        Command::FetchBook { id, url, user_id } => {
            let mut client = client::Client::new(url);
            if let Some(user_id) = user_id {
                client = client.with_user_id(user_id);
            }
            let op = client::BookById::build(client::BookByIdVariables {
                id: Some(id.clone()),
            });
            let response = client.query(op).await.context("failed to query the server")?;
            for error in response.errors.iter().flatten() {
                tracing::warn!(?error, "server reported an error");
            }
            match response.data.and_then(|data| data.book_by_id) {
                Some(book) => print_book(&book),
                None => println!("no book with id `{id}`"),
            }
            Ok(())
        }
    }
}

fn print_book(book: &client::Book) {
    let or_null = |value: &Option<String>| value.clone().unwrap_or_else(|| "null".into());

    println!("{}", or_null(&book.name));
    println!("  id:         {}", or_null(&book.id.as_ref().map(|id| id.inner().to_owned())));
    println!("  page count: {}", or_null(&book.page_count));
    println!("  asked by:   {}", or_null(&book.user));
    if let Some(author) = &book.author {
        println!(
            "  author:     {} {} ({})",
            or_null(&author.first_name),
            or_null(&author.last_name),
            or_null(&author.id.as_ref().map(|id| id.inner().to_owned())),
        );
    }
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    let app = make_app(AppOptions {
        graphiql: !args.no_graphiql,
    })?;

    let listener = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    tracing::info!(address = %listener.local_addr()?, "up and running");

    axum::serve(listener, app).await?;
    Ok(())
}
