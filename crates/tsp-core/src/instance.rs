use crate::error::{InstanceError, InvalidInput};
use crate::matrix::CostMatrix;
use serde::{Deserialize, Serialize};

/// Interchange form of a problem: labelled nodes, a cost matrix where
/// `null` means "no edge", and the start node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    #[serde(default)]
    pub labels: Vec<String>,
    pub costs: Vec<Vec<Option<f64>>>,
    #[serde(default)]
    pub start: usize,
}

impl Instance {
    pub fn new(labels: Vec<String>, matrix: &CostMatrix, start: usize) -> Self {
        Instance { labels, costs: matrix.to_rows(), start }
    }

    pub fn from_json_str(json: &str) -> Result<Self, InstanceError> {
        let instance: Instance = serde_json::from_str(json)?;
        instance.matrix()?;
        Ok(instance)
    }

    pub fn to_json_string(&self) -> Result<String, InstanceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validates the costs, the start node and the label count.
    pub fn matrix(&self) -> Result<CostMatrix, InvalidInput> {
        let matrix = CostMatrix::from_options(self.costs.clone())?;
        matrix.check_start(self.start)?;
        if !self.labels.is_empty() && self.labels.len() != matrix.n() {
            return Err(InvalidInput::LabelCount { labels: self.labels.len(), n: matrix.n() });
        }
        Ok(matrix)
    }

    /// Node labels, falling back to the node indices when none were given.
    pub fn labels(&self) -> Vec<String> {
        if self.labels.is_empty() {
            (0..self.costs.len()).map(|i| i.to_string()).collect()
        } else {
            self.labels.clone()
        }
    }
}
