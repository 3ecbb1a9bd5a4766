use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::config::AdvisoryConfig;
use crate::error::{Error, Result};

const MPS_TO_KMH: f64 = 3.6;

/// Current state of the traffic signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Phase {
    Red,
    Green,
    Amber,
}

impl FromStr for Phase {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RED" => Ok(Phase::Red),
            "GREEN" => Ok(Phase::Green),
            "AMBER" | "YELLOW" => Ok(Phase::Amber),
            _ => Err(Error::invalid(format!("unrecognized signal phase {:?}", s))),
        }
    }
}

impl TryFrom<String> for Phase {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Phase::Red => "RED",
            Phase::Green => "GREEN",
            Phase::Amber => "AMBER",
        })
    }
}

/// Phase and time-to-change as issued by the predictor. The time is an
/// estimate valid only at the instant it was produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalPrediction {
    pub phase: Phase,
    pub seconds_to_change: f64,
}

impl SignalPrediction {
    pub fn new(phase: Phase, seconds_to_change: f64) -> Result<Self> {
        check_seconds(seconds_to_change)?;
        Ok(Self { phase, seconds_to_change })
    }
}

/// Message class of an [`Advisory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryKind {
    AtJunction,
    ArriveOnGreen,
    ProceedOnChange,
    ExpectWait,
    MaintainSpeed,
    PrepareToStop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Advisory {
    pub recommended_speed_kmh: f64,
    pub message: String,
    pub kind: AdvisoryKind,
}

impl Advisory {
    fn new(kind: AdvisoryKind, speed_kmh: f64, message: String) -> Self {
        Self { recommended_speed_kmh: speed_kmh, message, kind }
    }
}

fn check_seconds(seconds_to_change: f64) -> Result<()> {
    if !seconds_to_change.is_finite() || seconds_to_change < 0.0 {
        return Err(Error::invalid(format!(
            "seconds to change must be finite and >= 0, got {}",
            seconds_to_change
        )));
    }
    Ok(())
}

/// Recommends a speed for a vehicle `distance_m` meters from the stop line.
///
/// The returned speed is always within
/// `[cfg.min_speed_kmh, cfg.max_speed_kmh]` and the message is never empty.
/// Negative or non-finite inputs are rejected with [`Error::InvalidInput`].
pub fn advise(
    distance_m: f64,
    seconds_to_change: f64,
    phase: Phase,
    cfg: &AdvisoryConfig,
) -> Result<Advisory> {
    if !distance_m.is_finite() || distance_m < 0.0 {
        return Err(Error::invalid(format!(
            "distance must be finite and >= 0, got {}",
            distance_m
        )));
    }
    check_seconds(seconds_to_change)?;

    if distance_m <= cfg.at_junction_m {
        return Ok(Advisory::new(
            AdvisoryKind::AtJunction,
            cfg.min_speed_kmh,
            format!("At junction: obey the {} signal", phase.to_string().to_lowercase()),
        ));
    }

    let advisory = match phase {
        Phase::Red => on_red(distance_m, seconds_to_change, cfg),
        Phase::Green => on_green(distance_m, seconds_to_change, cfg),
        Phase::Amber => Advisory::new(
            AdvisoryKind::PrepareToStop,
            cfg.approach_speed_kmh,
            format!(
                "Amber signal: slow to {:.0} km/h and prepare to stop",
                cfg.approach_speed_kmh
            ),
        ),
    };
    Ok(advisory)
}

pub fn advise_for(
    prediction: &SignalPrediction,
    distance_m: f64,
    cfg: &AdvisoryConfig,
) -> Result<Advisory> {
    advise(distance_m, prediction.seconds_to_change, prediction.phase, cfg)
}

fn on_red(distance_m: f64, seconds: f64, cfg: &AdvisoryConfig) -> Advisory {
    let required = distance_m / seconds * MPS_TO_KMH;
    if seconds < cfg.min_time_to_change_s || !required.is_finite() {
        return Advisory::new(
            AdvisoryKind::ProceedOnChange,
            cfg.approach_speed_kmh,
            format!(
                "Signal about to turn green: proceed at {:.0} km/h",
                cfg.approach_speed_kmh
            ),
        );
    }

    if required > cfg.max_speed_kmh {
        Advisory::new(
            AdvisoryKind::ExpectWait,
            cfg.max_speed_kmh,
            format!(
                "Green in {:.0}s needs {:.0} km/h, above the {:.0} km/h limit: drive at {:.0} km/h and expect to wait",
                seconds, required, cfg.max_speed_kmh, cfg.max_speed_kmh
            ),
        )
    } else if required < cfg.min_speed_kmh {
        Advisory::new(
            AdvisoryKind::ExpectWait,
            cfg.min_speed_kmh,
            format!(
                "Red for {:.0}s more: crawl at {:.0} km/h and expect to wait at the stop line",
                seconds, cfg.min_speed_kmh
            ),
        )
    } else {
        let speed = cfg.clamp_speed(required);
        Advisory::new(
            AdvisoryKind::ArriveOnGreen,
            speed,
            format!("Drive at {:.0} km/h to arrive as the light turns green", speed),
        )
    }
}

fn on_green(distance_m: f64, seconds: f64, cfg: &AdvisoryConfig) -> Advisory {
    let required = distance_m / seconds * MPS_TO_KMH;
    if seconds < cfg.min_time_to_change_s || !required.is_finite() {
        return Advisory::new(
            AdvisoryKind::PrepareToStop,
            cfg.approach_speed_kmh,
            format!(
                "Green about to end: slow to {:.0} km/h and prepare to stop",
                cfg.approach_speed_kmh
            ),
        );
    }

    if required <= cfg.max_speed_kmh {
        let speed = cfg.clamp_speed(required);
        Advisory::new(
            AdvisoryKind::MaintainSpeed,
            speed,
            format!("Maintain {:.0} km/h to pass on green", speed),
        )
    } else {
        Advisory::new(
            AdvisoryKind::PrepareToStop,
            cfg.approach_speed_kmh,
            format!(
                "Cannot clear before red (needs {:.0} km/h): slow to {:.0} km/h and prepare to stop",
                required, cfg.approach_speed_kmh
            ),
        )
    }
}
