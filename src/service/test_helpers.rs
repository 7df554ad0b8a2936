use std::time::Duration;

use httpmock::prelude::*;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};

use crate::{
    config::{DatabaseConfig, OAuthConfig},
    data::pool::DatabasePool,
    service::{oauth::IvaoOAuthClient, token::TokenService},
};

pub fn pool(db: &DatabaseConnection) -> DatabasePool {
    DatabasePool::from_connection(
        DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            min_connections: 1,
            max_connections: 1,
            max_lifetime: Duration::from_secs(3600),
        },
        db.clone(),
    )
}

pub fn tokens(server: &MockServer) -> TokenService {
    let config = OAuthConfig {
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        token_url: server.url("/v2/oauth/token"),
        profile_url: server.url("/v2/users/me"),
    };
    let oauth = IvaoOAuthClient::new(reqwest::Client::new(), &config)
        .unwrap()
        .with_retry_base(Duration::from_millis(1));

    TokenService::new(oauth)
}

pub fn profile_body(vid: &str, first: Option<&str>, last: Option<&str>) -> Value {
    json!({
        "id": vid,
        "firstName": first,
        "lastName": last,
        "divisionId": "XM",
        "isStaff": false,
        "userStaffPositions": []
    })
}
