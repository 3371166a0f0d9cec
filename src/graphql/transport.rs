use crate::error::ClientError;
use crate::graphql::operations::Operation;
use reqwest::blocking::Client;
use serde::Deserialize;
use std::time::Duration;

/// Executes one operation and yields its `data` object.
pub trait Transport: Send + Sync {
    fn execute(&self, op: &Operation) -> Result<serde_json::Value, ClientError>;
}

#[derive(Debug, Deserialize)]
struct GraphqlResponse {
    #[serde(default)]
    data: Option<serde_json::Value>,
    #[serde(default)]
    errors: Vec<GraphqlErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct GraphqlErrorEntry {
    #[serde(default)]
    message: String,
}

/// Any reported error discards `data`, partial or not.
pub fn decode_response(body: &[u8]) -> Result<serde_json::Value, ClientError> {
    let resp: GraphqlResponse = serde_json::from_slice(body)
        .map_err(|e| ClientError::server(format!("malformed response: {e}")))?;
    if !resp.errors.is_empty() {
        let messages = resp
            .errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(ClientError::server(messages));
    }
    match resp.data {
        Some(data) if !data.is_null() => Ok(data),
        _ => Err(ClientError::server("response has no data")),
    }
}

pub struct HttpTransport {
    endpoint: String,
    token: Option<String>,
    client: Client,
}

impl HttpTransport {
    pub fn new(endpoint: &str, token: Option<String>, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            token,
            client,
        })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, op: &Operation) -> Result<serde_json::Value, ClientError> {
        let mut req = self.client.post(&self.endpoint).json(op);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        let resp = req
            .send()
            .map_err(|e| ClientError::server(format!("{}: {e}", op.name)))?;
        let status = resp.status();
        let body = resp
            .bytes()
            .map_err(|e| ClientError::server(format!("{}: {e}", op.name)))?;
        // GraphQL servers put validation errors in a 400 body; prefer those messages.
        match decode_response(&body) {
            Ok(data) if status.is_success() => Ok(data),
            Ok(_) => Err(ClientError::server(format!("{}: http {status}", op.name))),
            Err(e) => {
                tracing::debug!(operation = op.name, %status, "graphql call failed");
                Err(e)
            }
        }
    }
}
