pub mod config;
pub mod error;
pub mod routes;

use analysis_core::Analyzer;
use incident_registry::IncidentRecord;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub history: Arc<Vec<IncidentRecord>>,
}

impl AppState {
    pub fn new(analyzer: Analyzer, history: Vec<IncidentRecord>) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            history: Arc::new(history),
        }
    }
}
