use std::sync::Arc;

use crate::{history::HistoryStore, pipeline::Pipeline, translator::TranslationSettings};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub history: HistoryStore,
    pub defaults: Arc<TranslationSettings>,
}

impl AppState {
    pub fn new(pipeline: Pipeline, history: HistoryStore, defaults: TranslationSettings) -> Self {
        Self {
            pipeline,
            history,
            defaults: Arc::new(defaults),
        }
    }
}
