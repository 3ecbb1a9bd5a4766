use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use crate::error::{Error, Result};
use crate::geo::GeoPoint;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Junction {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Junction {
    pub fn position(&self) -> Result<GeoPoint> {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Lookup of junctions by identifier.
pub trait JunctionRegistry: Send + Sync {
    fn get(&self, id: &str) -> Option<&Junction>;
    fn all(&self) -> &[Junction];
}

/// Fixed table of junctions, usually read once at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticJunctionRegistry {
    junctions: Vec<Junction>,
}

impl StaticJunctionRegistry {
    pub fn new(junctions: Vec<Junction>) -> Result<Self> {
        for j in &junctions {
            j.position()
                .map_err(|e| Error::Config(format!("junction {}: {}", j.id, e)))?;
        }
        Ok(Self { junctions })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        let junctions: Vec<Junction> = serde_json::from_str(&data)
            .map_err(|e| Error::Config(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::new(junctions)
    }
}

impl JunctionRegistry for StaticJunctionRegistry {
    fn get(&self, id: &str) -> Option<&Junction> {
        self.junctions.iter().find(|j| j.id == id)
    }

    fn all(&self) -> &[Junction] {
        &self.junctions
    }
}
