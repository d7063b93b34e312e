//! Process-wide cache for the merged dataset and the trained trend models
//!
//! Initialization is check-then-populate without holding a lock during the
//! build. Two callers racing on a cold cache both load and train; the results
//! are pure functions of the source data, so whichever write lands last is
//! identical to the other and nothing is lost but the duplicated work.

use crate::analysis::forecast::TrendModels;
use crate::data::loader::RecordSource;
use crate::data::records::IndustryYearRecord;
use crate::error::Result;
use log::info;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct AnalysisCache {
    dataset: RwLock<Option<Arc<Vec<IndustryYearRecord>>>>,
    models: RwLock<Option<Arc<TrendModels>>>,
}

impl AnalysisCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Historical rows, loaded from `source` on first use.
    pub fn dataset(&self, source: &dyn RecordSource) -> Result<Arc<Vec<IndustryYearRecord>>> {
        if let Some(cached) = self.dataset.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Ok(Arc::clone(cached));
        }

        let loaded = Arc::new(source.load()?);
        *self.dataset.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&loaded));
        Ok(loaded)
    }

    /// Trend models, trained from `records` on first use.
    pub fn models(&self, records: &[IndustryYearRecord]) -> Result<Arc<TrendModels>> {
        if let Some(cached) = self.models.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Ok(Arc::clone(cached));
        }

        info!("Training trend models on {} historical rows", records.len());
        let trained = Arc::new(TrendModels::train(records)?);
        *self.models.write().unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&trained));
        Ok(trained)
    }

    pub fn is_warm(&self) -> bool {
        self.dataset.read().unwrap_or_else(PoisonError::into_inner).is_some()
            && self.models.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        loads: AtomicUsize,
        rows: Vec<IndustryYearRecord>,
    }

    impl RecordSource for CountingSource {
        fn load(&self) -> Result<Vec<IndustryYearRecord>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(self.rows.clone())
        }
    }

    fn row(year: i32) -> IndustryYearRecord {
        IndustryYearRecord {
            industry: "IT".to_string(),
            year,
            interns_intake: 100.0 + year as f64,
            conversion_rate: 0.5,
            attrition_rate: 0.1,
            growth_rate: 0.05,
            top_skills: None,
        }
    }

    #[test]
    fn test_dataset_loaded_once() {
        let source = CountingSource {
            loads: AtomicUsize::new(0),
            rows: vec![row(2023), row(2024)],
        };
        let cache = AnalysisCache::new();

        let first = cache.dataset(&source).unwrap();
        let second = cache.dataset(&source).unwrap();

        assert_eq!(source.loads.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert!(!cache.is_warm());

        let models = cache.models(&first).unwrap();
        assert!(Arc::ptr_eq(&models, &cache.models(&first).unwrap()));
        assert!(cache.is_warm());
    }
}
