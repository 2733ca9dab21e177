use std::time::Duration;

use async_trait::async_trait;
use corelib::{BookingMutation, NewRoundRequest, OwnerStanding, RoundInfo, Seat};
use reqwest::{Client, Response};
use tracing::{debug, instrument};

use super::{BookingApi, ClientError, SubmitReport};

const ROSTER_PATH: &str = "/api/booking";
const OWNERS_PATH: &str = "/api/booking/owners";
const SUBMIT_PATH: &str = "/api/makeBookings";
const NEW_ROUND_PATH: &str = "/api/newRound";

#[derive(Clone)]
pub struct BookingClient {
    http: Client,
    base_url: String,
}

impl BookingClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .pool_idle_timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(30))
            .build()?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Non-2xx answers become [`ClientError::Status`].
fn ensure_success(resp: Response) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        Ok(resp)
    } else {
        Err(ClientError::Status {
            status: status.as_u16(),
            url: resp.url().to_string(),
        })
    }
}

#[async_trait]
impl BookingApi for BookingClient {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_roster(&self) -> Result<Vec<Seat>, ClientError> {
        let resp = self.http.get(self.url(ROSTER_PATH)).send().await?;
        let seats: Vec<Seat> = ensure_success(resp)?.json().await?;

        debug!(seats = seats.len(), "roster fetched");

        Ok(seats)
    }

    #[instrument(skip(self, batch), fields(mutations = batch.len()), level = "debug")]
    async fn submit_batch(&self, batch: &[BookingMutation]) -> Result<SubmitReport, ClientError> {
        let resp = self
            .http
            .post(self.url(SUBMIT_PATH))
            .json(batch)
            .send()
            .await?;
        let body = ensure_success(resp)?.text().await?;

        let report = SubmitReport::from_body(&body);
        debug!(
            accepted = report.accepted(),
            rejected = report.rejected(),
            "batch submitted"
        );

        Ok(report)
    }

    #[instrument(skip(self), fields(rows = req.rows, cols = req.cols), level = "debug")]
    async fn new_round(&self, req: NewRoundRequest) -> Result<RoundInfo, ClientError> {
        let resp = self
            .http
            .post(self.url(NEW_ROUND_PATH))
            .json(&req)
            .send()
            .await?;

        Ok(ensure_success(resp)?.json().await?)
    }

    #[instrument(skip(self), level = "debug")]
    async fn fetch_owners(&self) -> Result<Vec<OwnerStanding>, ClientError> {
        let resp = self.http.get(self.url(OWNERS_PATH)).send().await?;

        Ok(ensure_success(resp)?.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped() {
        let client = BookingClient::new("http://booking:3000/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "http://booking:3000");
        assert_eq!(client.url(ROSTER_PATH), "http://booking:3000/api/booking");
    }
}
