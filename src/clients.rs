//! Client actions shared by the REST handlers and the tool dispatcher.

use serde_json::Value;

use crate::{
    error::{GatewayError, Result},
    models::ClientRecord,
    normalize::{normalize, single_record, ListBody},
    upstream::ClientStore,
};

pub async fn list_clients(store: &dyn ClientStore) -> Result<Vec<ClientRecord>> {
    let body = store.list_all().await?;
    let records = ListBody::classify(body)?.into_records();
    Ok(records.into_iter().map(normalize).collect())
}

/// `.` and `..` collapse as URL path segments and would address the collection itself.
fn check_record_id(id: &str) -> Result<()> {
    if matches!(id, "." | "..") {
        return Err(GatewayError::validation(format!(
            "id '{id}' cannot address a single client"
        )));
    }
    Ok(())
}

pub async fn get_client(store: &dyn ClientStore, id: &str) -> Result<ClientRecord> {
    check_record_id(id)?;
    let body = store.get_one(id).await?;
    Ok(normalize(single_record(body)))
}

pub async fn update_client(store: &dyn ClientStore, id: &str, data: &Value) -> Result<ClientRecord> {
    check_record_id(id)?;
    let body = store.update_one(id, data).await?;
    Ok(normalize(single_record(body)))
}
