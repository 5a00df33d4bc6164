use mongodb::{Client, bson::doc};

use crate::common::{DatabaseError, DatabaseResult};

/// Pings the deployment through the `admin` database.
pub async fn ping(client: &Client) -> DatabaseResult<()> {
    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map(|_| ())
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}
