use serde::Deserialize;
use std::{fs, path::{Path, PathBuf}, time::Duration};

use crate::error::{Error, Result};

/// Product-level constants for the speed advisory. Every field is optional in
/// the JSON form; missing ones fall back to [`AdvisoryConfig::default`].
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AdvisoryConfig {
    /// Lowest speed ever recommended (crawl).
    pub min_speed_kmh: f64,
    /// Highest speed ever recommended; also the cruising ceiling on green.
    pub max_speed_kmh: f64,
    /// Target speed when the driver is told to slow down or prepare to stop.
    pub approach_speed_kmh: f64,
    /// At or below this distance the vehicle is considered at the stop line.
    pub at_junction_m: f64,
    /// Time-to-change values below this are too small to divide by.
    pub min_time_to_change_s: f64,
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            min_speed_kmh: 10.0,
            max_speed_kmh: 80.0,
            approach_speed_kmh: 30.0,
            at_junction_m: 5.0,
            min_time_to_change_s: 1.0,
        }
    }
}

impl AdvisoryConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        let cfg: Self = serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("min_speed_kmh", self.min_speed_kmh),
            ("max_speed_kmh", self.max_speed_kmh),
            ("approach_speed_kmh", self.approach_speed_kmh),
            ("at_junction_m", self.at_junction_m),
            ("min_time_to_change_s", self.min_time_to_change_s),
        ];
        for (name, v) in fields {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::Config(format!("{} must be finite and >= 0, got {}", name, v)));
            }
        }
        if self.max_speed_kmh <= 0.0 {
            return Err(Error::Config("max_speed_kmh must be > 0".into()));
        }
        if self.min_time_to_change_s <= 0.0 {
            return Err(Error::Config("min_time_to_change_s must be > 0".into()));
        }
        if !(self.min_speed_kmh <= self.approach_speed_kmh
            && self.approach_speed_kmh <= self.max_speed_kmh)
        {
            return Err(Error::Config(format!(
                "expected min <= approach <= max, got {} / {} / {}",
                self.min_speed_kmh, self.approach_speed_kmh, self.max_speed_kmh
            )));
        }
        Ok(())
    }

    pub(crate) fn clamp_speed(&self, kmh: f64) -> f64 {
        kmh.max(self.min_speed_kmh).min(self.max_speed_kmh)
    }
}

/// Process-level settings, read from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub ai_service_url: String,
    pub junctions_path: PathBuf,
    pub predictor_timeout: Duration,
    pub advisory_config: Option<PathBuf>,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but with an injectable lookup.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match get("PORT") {
            Some(s) => s
                .parse()
                .map_err(|_| Error::Config(format!("PORT is not a valid port: {}", s)))?,
            None => 5000,
        };
        let timeout_ms: u64 = match get("PREDICTOR_TIMEOUT_MS") {
            Some(s) => s
                .parse()
                .map_err(|_| Error::Config(format!("PREDICTOR_TIMEOUT_MS is not a number: {}", s)))?,
            None => 3000,
        };

        Ok(Self {
            port,
            ai_service_url: get("AI_SERVICE_URL").unwrap_or_else(|| "http://localhost:8000".to_string()),
            junctions_path: get("JUNCTIONS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(resolve_junctions_path),
            predictor_timeout: Duration::from_millis(timeout_ms),
            advisory_config: get("ADVISORY_CONFIG").map(PathBuf::from),
        })
    }
}

fn resolve_junctions_path() -> PathBuf {
    let candidates = [
        PathBuf::from("data/junctions.json"),
        {
            let mut p = std::env::current_exe().unwrap_or_else(|_| PathBuf::from("."));
            p.pop(); // exe dir
            p.push("data/junctions.json");
            p
        },
    ];

    for c in candidates {
        if c.exists() {
            return c;
        }
    }

    // Fallback to default relative path; loading will report it
    PathBuf::from("data/junctions.json")
}
