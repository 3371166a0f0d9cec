pub mod operations;
pub mod records;
pub mod transport;

pub use operations::Operation;
pub use transport::{HttpTransport, Transport};

use crate::error::ClientError;
use serde::de::DeserializeOwned;

/// Decodes `data[field]` into `T`. A missing field or a shape mismatch is a
/// server failure, same as a network error.
pub fn decode_field<T: DeserializeOwned>(
    data: &serde_json::Value,
    field: &str,
) -> Result<T, ClientError> {
    let Some(v) = data.get(field) else {
        return Err(ClientError::server(format!("response is missing `{field}`")));
    };
    serde_json::from_value(v.clone())
        .map_err(|e| ClientError::server(format!("cannot decode `{field}`: {e}")))
}

/// First element of a list-valued root field. Detail reads come back as
/// lists filtered server-side; an empty list means the record is gone.
pub fn decode_first<T: DeserializeOwned>(
    data: &serde_json::Value,
    field: &str,
) -> Result<T, ClientError> {
    let mut items: Vec<T> = decode_field(data, field)?;
    if items.is_empty() {
        return Err(ClientError::server(format!("no `{field}` record matched")));
    }
    Ok(items.swap_remove(0))
}
