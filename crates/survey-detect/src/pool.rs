//! Candidate pool of columns not yet bound to a role.

use survey_model::{Column, ColumnKind, Dataset};

/// Which pool columns a detector may consider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolFilter {
    /// Every unbound column.
    AllColumns,
    /// Unbound columns holding string data.
    TextColumns,
}

/// Unbound columns of one detection run, in dataset order.
///
/// The pool only shrinks. Detectors receive snapshots from [`Self::view`]
/// and never mutate the pool themselves.
#[derive(Debug, Clone)]
pub struct CandidatePool<'a> {
    available: Vec<&'a Column>,
}

impl<'a> CandidatePool<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            available: dataset.columns().iter().collect(),
        }
    }

    /// Snapshot of the unbound columns passing `filter`.
    pub fn view(&self, filter: PoolFilter) -> Vec<&'a Column> {
        self.available
            .iter()
            .copied()
            .filter(|column| match filter {
                PoolFilter::AllColumns => true,
                PoolFilter::TextColumns => column.kind().holds_text(),
            })
            .collect()
    }

    /// Removes a column from the pool; returns false if it was not available.
    pub fn claim(&mut self, name: &str) -> bool {
        let before = self.available.len();
        self.available.retain(|column| column.name() != name);
        self.available.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.available.iter().any(|column| column.name() == name)
    }

    pub fn len(&self) -> usize {
        self.available.len()
    }

    pub fn is_empty(&self) -> bool {
        self.available.is_empty()
    }
}

/// Columns of `candidates` whose non-missing cells are all numbers.
pub fn numeric_typed<'a>(candidates: &[&'a Column]) -> Vec<&'a Column> {
    candidates
        .iter()
        .copied()
        .filter(|column| column.kind() == ColumnKind::Numeric)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Column::from_numbers("score", &[Some(1.0), Some(2.0)]),
            Column::from_text("comment", &[Some("fine"), Some("great")]),
            Column::from_text("country", &[Some("Chile"), Some("India")]),
        ])
        .unwrap()
    }

    #[test]
    fn view_preserves_dataset_order() {
        let data = dataset();
        let pool = CandidatePool::new(&data);
        let names: Vec<_> = pool
            .view(PoolFilter::AllColumns)
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(names, vec!["score", "comment", "country"]);

        let text: Vec<_> = pool
            .view(PoolFilter::TextColumns)
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(text, vec!["comment", "country"]);
    }

    #[test]
    fn claim_shrinks_pool_once() {
        let data = dataset();
        let mut pool = CandidatePool::new(&data);
        assert!(pool.claim("comment"));
        assert!(!pool.claim("comment"));
        assert!(!pool.contains("comment"));
        assert_eq!(pool.len(), 2);
    }
}
