use serde::{Deserialize, Serialize};
use std::{future::Future, time::Duration};

use crate::advisory::{Phase, SignalPrediction};
use crate::error::{Error, Result};

/// Source of phase / time-to-change predictions for a junction.
pub trait SignalPredictor: Send + Sync {
    fn predict(
        &self,
        junction_id: &str,
        timestamp: f64,
    ) -> impl Future<Output = Result<SignalPrediction>> + Send;
}

#[derive(Serialize, Debug)]
struct PredictRequest<'a> {
    junction_id: &'a str,
    timestamp: f64,
}

#[derive(Deserialize, Debug)]
pub(crate) struct PredictResponse {
    current_status: String,
    seconds_to_change: f64,
}

impl PredictResponse {
    pub(crate) fn into_prediction(self) -> Result<SignalPrediction> {
        let phase: Phase = self.current_status.parse()?;
        SignalPrediction::new(phase, self.seconds_to_change)
    }
}

/// Client for the external prediction service (`POST {base}/predict`).
#[derive(Clone, Debug)]
pub struct HttpPredictor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPredictor {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Predictor(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            endpoint: format!("{}/predict", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl SignalPredictor for HttpPredictor {
    async fn predict(&self, junction_id: &str, timestamp: f64) -> Result<SignalPrediction> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { junction_id, timestamp })
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::Predictor(e.to_string()))?;

        let body: PredictResponse = resp
            .json()
            .await
            .map_err(|e| Error::Predictor(format!("malformed prediction: {}", e)))?;
        body.into_prediction()
            .map_err(|e| Error::Predictor(format!("invalid prediction: {}", e)))
    }
}
