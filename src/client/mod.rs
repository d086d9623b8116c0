use cynic::http::{CynicReqwestError, ReqwestExt};
use cynic::serde;
use reqwest::Url;

use crate::server::USER_ID_HEADER;

pub struct Client {
    client: reqwest::Client,
    url: Url,
    user_id: Option<String>,
}

impl Client {
    pub fn new(url: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
            user_id: None,
        }
    }

    /// Sends the user header with every request.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub async fn query<Query, Input>(
        &self,
        op: cynic::Operation<Query, Input>,
    ) -> Result<cynic::GraphQlResponse<Query>, CynicReqwestError>
    where
        Input: serde::Serialize,
        Query: serde::de::DeserializeOwned + 'static,
    {
        let mut request = self.client.post(self.url.clone());
        if let Some(user_id) = &self.user_id {
            request = request.header(USER_ID_HEADER, user_id);
        }
        request.run_graphql(op).await
    }
}

#[cynic::schema("library")]
mod schema {}

#[cfg(test)]
#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query")]
pub struct Greetings {
    pub hello: Option<String>,
    pub banana: Option<String>,
}

#[derive(cynic::QueryVariables, Debug)]
pub struct BookByIdVariables {
    pub id: Option<String>,
}

#[derive(cynic::QueryFragment, Debug)]
#[cynic(graphql_type = "Query", variables = "BookByIdVariables")]
pub struct BookById {
    #[arguments(id: $id)]
    pub book_by_id: Option<Book>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Book {
    pub id: Option<cynic::Id>,
    pub name: Option<String>,
    pub page_count: Option<String>,
    pub user: Option<String>,
    pub author: Option<Author>,
}

#[derive(cynic::QueryFragment, Debug)]
pub struct Author {
    pub id: Option<cynic::Id>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}
