use napi_derive::napi;

#[napi(object)]
#[derive(Clone, Debug)]
pub struct MatrixInput {
    /// Row-major costs; `null` marks a blocked edge.
    pub costs: Vec<Vec<Option<f64>>>,
    pub labels: Option<Vec<String>>,
    pub start: u32,
}

#[napi(object)]
#[derive(Clone, Debug, Default)]
pub struct SolverOptions {
    pub workers: Option<u32>,
    pub max_nodes: Option<u32>,
    pub time_budget_ms: Option<u32>,
}

#[napi(object)]
#[derive(Clone, Debug, Default)]
pub struct TourOutput {
    pub feasible: bool,
    pub total_cost: Option<f64>,
    pub path: Vec<u32>,
    pub labels: Vec<String>,
}
