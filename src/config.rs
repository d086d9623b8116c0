use std::net::SocketAddr;

use clap::{Args, Parser, Subcommand};
use reqwest::Url;

#[derive(Debug, Parser)]
#[command(version, about = "A GraphQL service over a small library of books and authors")]
pub struct Config {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the GraphQL endpoint over HTTP.
    Serve(ServeArgs),
    /// Execute a single query in-process and print the JSON response.
    Exec {
        query: String,
        /// Run the query as this user, as if the user header had been sent.
        #[arg(long)]
        user_id: Option<String>,
    },
    /// Print the schema in SDL form.
    Schema,
    /// Fetch a book from a running server.
    FetchBook {
        id: String,
        #[arg(long, env = "LIBRARY_URL", default_value = "http://localhost:8090/graphql")]
        url: Url,
        #[arg(long)]
        user_id: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    #[arg(long, env = "LIBRARY_LISTEN", default_value = "0.0.0.0:8090")]
    pub listen: SocketAddr,
    /// Do not serve the GraphiQL IDE.
    #[arg(long)]
    pub no_graphiql: bool,
}
