use mongodb::{Client, bson::doc};

/// Run `{ ping: 1 }` against the admin database.
pub(crate) async fn ping(client: &Client) -> mongodb::error::Result<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
}

/// Readiness probe: `Ok` when the server answers a ping.
pub async fn check_health(client: &Client) -> Result<(), String> {
    ping(client).await.map_err(|e| e.to_string())
}
