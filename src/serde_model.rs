//! Layered net serialization/deserialization (feature: `serde`).
//!
//! A versioned JSON format for `LayeredNet`, richer than the plain-text format in
//! [`crate::persist`]: it keeps every layer width, so nets with several hidden layers
//! round-trip.
//!
//! Design notes:
//! - The internal graph matrices are not serialized directly. The file stores the layer
//!   widths and the full row-major weight matrix; topology is rebuilt from the widths.
//! - Deserialization validates the version, the widths, the weight count and that every
//!   weight is finite.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, LayeredNet, Result};

pub const NET_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SerializedNet {
    pub format_version: u32,
    pub layers: Vec<usize>,
    /// Row-major (neuron_count, neuron_count), zeros at non-edges.
    pub weights: Vec<f32>,
}

impl SerializedNet {
    pub fn validate(&self) -> Result<()> {
        if self.format_version != NET_FORMAT_VERSION {
            return Err(Error::InvalidData(format!(
                "unsupported net format_version {}; expected {}",
                self.format_version, NET_FORMAT_VERSION
            )));
        }
        if self.layers.len() < 2 || self.layers.contains(&0) {
            return Err(Error::InvalidData(format!(
                "layers must hold at least two non-zero widths, got {:?}",
                self.layers
            )));
        }

        let n = crate::layered::total_neurons(&self.layers)
            .map_err(|e| Error::InvalidData(format!("invalid layer widths: {e}")))?;
        let expected = n
            .checked_mul(n)
            .ok_or_else(|| Error::InvalidData("weight matrix shape overflow".to_owned()))?;
        if self.weights.len() != expected {
            return Err(Error::InvalidData(format!(
                "weights length {} does not match neuron_count^2 ({n} * {n})",
                self.weights.len()
            )));
        }
        if self.weights.iter().any(|w| !w.is_finite()) {
            return Err(Error::InvalidData(
                "weights must contain only finite values".to_owned(),
            ));
        }
        Ok(())
    }
}

impl From<&LayeredNet> for SerializedNet {
    fn from(net: &LayeredNet) -> Self {
        Self {
            format_version: NET_FORMAT_VERSION,
            layers: net.layers().to_vec(),
            weights: net.weights().to_vec(),
        }
    }
}

impl TryFrom<SerializedNet> for LayeredNet {
    type Error = Error;

    fn try_from(value: SerializedNet) -> std::result::Result<Self, Self::Error> {
        value.validate()?;

        let mut net = LayeredNet::from_layer_sizes(&value.layers)?;
        let n = net.neuron_count();
        let graph = net.graph_mut();
        for (c, &w) in value.weights.iter().enumerate() {
            let (from, to) = (c / n, c % n);
            if graph.connected(from, to) {
                graph.set_weight(from, to, w);
            } else if w != 0.0 {
                return Err(Error::InvalidData(format!(
                    "non-zero weight {w} at ({from}, {to}) where the layout has no edge"
                )));
            }
        }
        Ok(net)
    }
}

impl LayeredNet {
    /// Serialize the net to a pretty-printed JSON string.
    pub fn to_json_string_pretty(&self) -> Result<String> {
        let ser = SerializedNet::from(self);
        serde_json::to_string_pretty(&ser)
            .map_err(|e| Error::InvalidData(format!("failed to serialize net: {e}")))
    }

    /// Serialize the net to a compact JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        let ser = SerializedNet::from(self);
        serde_json::to_string(&ser)
            .map_err(|e| Error::InvalidData(format!("failed to serialize net: {e}")))
    }

    /// Parse a net from a JSON string.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let ser: SerializedNet = serde_json::from_str(s)
            .map_err(|e| Error::InvalidData(format!("failed to parse net json: {e}")))?;
        ser.try_into()
    }

    /// Save the net to a JSON file (pretty-printed).
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let s = self.to_json_string_pretty()?;
        let p = path.as_ref();
        std::fs::write(p, s)
            .map_err(|e| Error::InvalidData(format!("failed to write {}: {e}", p.display())))?;
        log::debug!("saved {:?} net to {}", self.layers(), p.display());
        Ok(())
    }

    /// Load a net from a JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let p = path.as_ref();
        let s = std::fs::read_to_string(p)
            .map_err(|e| Error::InvalidData(format!("failed to read {}: {e}", p.display())))?;
        Self::from_json_str(&s)
    }
}
