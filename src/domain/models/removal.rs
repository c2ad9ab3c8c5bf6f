use crate::domain::{errors::StorageError, value_objects::ImageFilename};

/// Outcome of a best-effort removal of one image
#[derive(Debug, Clone, PartialEq)]
pub struct RemovalOutcome {
    pub filename: ImageFilename,
    pub result: Result<(), StorageError>,
}

/// Per-filename results of a best-effort removal. Failures are kept so a
/// caller can reconcile storage later instead of losing them to a log line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RemovalReport {
    pub outcomes: Vec<RemovalOutcome>,
}

impl RemovalReport {
    pub fn record(&mut self, filename: ImageFilename, result: Result<(), StorageError>) {
        self.outcomes.push(RemovalOutcome { filename, result });
    }

    pub fn removed(&self) -> impl Iterator<Item = &ImageFilename> {
        self.outcomes
            .iter()
            .filter(|o| o.result.is_ok())
            .map(|o| &o.filename)
    }

    pub fn failed(&self) -> impl Iterator<Item = (&ImageFilename, &StorageError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.filename, e)))
    }

    pub fn is_complete(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}
