//! Client reads. Clients are created by the seed and never modified here.

use crate::{
    entities::{Client, client},
    errors::Result,
};
use sea_orm::{QueryOrder, prelude::*};

/// Retrieves all clients, ordered by name.
pub async fn get_all_clients<C>(db: &C) -> Result<Vec<client::Model>>
where
    C: ConnectionTrait,
{
    Client::find()
        .order_by_asc(client::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds a client by its id.
pub async fn get_client_by_id<C>(db: &C, client_id: &str) -> Result<Option<client::Model>>
where
    C: ConnectionTrait,
{
    Client::find_by_id(client_id.to_string())
        .one(db)
        .await
        .map_err(Into::into)
}
