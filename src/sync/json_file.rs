//! Snapshot source backed by exported JSON files.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::domain::types::CustomerId;
use crate::sync::snapshot::AccountSnapshot;
use crate::sync::{AdsDataSource, SourceError};

/// Reads `<dir>/<customer id>.json`, one file per exported account.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    fn snapshot_path(&self, customer_id: &CustomerId) -> PathBuf {
        self.dir.join(format!("{}.json", customer_id.as_str()))
    }
}

impl AdsDataSource for JsonFileSource {
    fn fetch_snapshot(&self, customer_id: &CustomerId) -> Result<AccountSnapshot, SourceError> {
        let path = self.snapshot_path(customer_id);
        if !path.is_file() {
            return Err(SourceError::NotFound(customer_id.to_string()));
        }

        let file = File::open(path)?;
        let snapshot = serde_json::from_reader(BufReader::new(file))?;
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_snapshot_file_named_after_customer_id() {
        let dir = tempfile::tempdir().unwrap();
        let customer_id = CustomerId::new("123-456-7890").unwrap();

        let mut file = File::create(dir.path().join("123-456-7890.json")).unwrap();
        write!(
            file,
            r#"{{"customer_id": "123-456-7890", "campaigns": []}}"#
        )
        .unwrap();

        let source = JsonFileSource::new(dir.path());
        let snapshot = source.fetch_snapshot(&customer_id).unwrap();
        assert_eq!(snapshot.customer_id, "123-456-7890");
        assert!(snapshot.campaigns.is_empty());
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let customer_id = CustomerId::new("111-222-3333").unwrap();

        let source = JsonFileSource::new(dir.path());
        let err = source.fetch_snapshot(&customer_id).unwrap_err();
        assert!(matches!(err, SourceError::NotFound(_)));
    }

    #[test]
    fn malformed_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let customer_id = CustomerId::new("123-456-7890").unwrap();

        let mut file = File::create(dir.path().join("123-456-7890.json")).unwrap();
        write!(file, "not json").unwrap();

        let source = JsonFileSource::new(dir.path());
        let err = source.fetch_snapshot(&customer_id).unwrap_err();
        assert!(matches!(err, SourceError::Malformed(_)));
    }
}
