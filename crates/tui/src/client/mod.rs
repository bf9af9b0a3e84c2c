use std::time::Duration;

use api_types::transaction::Transaction as TransactionRecord;
use engine::Transaction;
use reqwest::Url;

use crate::error::{AppError, Result};

/// Why a fetch produced no transactions. Never fatal: the app turns every
/// variant into the same error overlay.
#[derive(Debug)]
pub enum ClientError {
    Status(u16),
    Decode(String),
    Transport(reqwest::Error),
}

#[derive(Debug, Clone)]
pub struct Client {
    endpoint: Url,
    http: reqwest::Client,
}

impl Client {
    /// `timeout` of `None` lets a request hang indefinitely.
    pub fn new(endpoint: &str, timeout: Option<Duration>) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| AppError::Invalid(format!("invalid endpoint: {err}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            endpoint,
            http: builder.build()?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// One `GET` against the endpoint, no retry.
    pub async fn fetch_transactions(&self) -> std::result::Result<Vec<Transaction>, ClientError> {
        tracing::debug!(url = %self.endpoint, "fetching transactions");

        let res = self
            .http
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        let records = res
            .json::<Vec<TransactionRecord>>()
            .await
            .map_err(|err| {
                if err.is_decode() {
                    ClientError::Decode(err.to_string())
                } else {
                    ClientError::Transport(err)
                }
            })?;

        records.into_iter().map(into_domain).collect()
    }
}

fn into_domain(record: TransactionRecord) -> std::result::Result<Transaction, ClientError> {
    Transaction::from_source(&record.id, &record.date, &record.description, record.amount)
        .map_err(|err| ClientError::Decode(format!("record {}: {err}", record.id)))
}

pub fn error_message(err: &ClientError) -> String {
    match err {
        ClientError::Status(status) => format!("server answered HTTP {status}"),
        ClientError::Decode(message) => format!("unexpected payload: {message}"),
        ClientError::Transport(err) if err.is_timeout() => "request timed out".to_string(),
        ClientError::Transport(err) => format!("server unreachable: {err}"),
    }
}
