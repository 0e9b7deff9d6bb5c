//! Liveness pinger
//!
//! Fires a GET request at the configured URL on a fixed interval so the
//! hosting environment does not idle the process out. Failures are ignored;
//! the pinger has no state and no effect on the rest of the system.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::config::PingConfig;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct LivenessPinger {
    client: Client,
    url: Option<Url>,
    interval: Duration,
}

impl LivenessPinger {
    pub fn new(url: Option<Url>, interval: Duration, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("SweepBot/0.1")
            .build()?;

        Ok(Self {
            client,
            url,
            interval,
        })
    }

    pub fn from_settings(config: &PingConfig) -> Result<Self> {
        let url = config.url.as_deref().map(Url::parse).transpose()?;
        Self::new(
            url,
            Duration::from_secs(config.interval_seconds),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    /// Issue one ping. Outcome is logged and discarded.
    pub async fn ping_once(&self) {
        let Some(url) = &self.url else {
            return;
        };

        match self.client.get(url.clone()).send().await {
            Ok(response) => {
                debug!(url = %url, status = %response.status(), "Liveness ping sent");
            }
            Err(e) => {
                debug!(url = %url, error = %e, "Liveness ping failed, ignoring");
            }
        }
    }

    /// Run the ping loop until the task is dropped.
    pub async fn run(self) {
        if self.url.is_none() {
            info!("No ping URL configured, liveness pinger disabled");
            return;
        }

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.ping_once().await;
        }
    }

    /// Spawn the ping loop as a background task.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }
}
