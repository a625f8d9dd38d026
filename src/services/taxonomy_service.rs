use std::path::PathBuf;

use super::document::JsonDocument;
use crate::errors::validation::require;
use crate::errors::StoreResult;
use crate::models::{TaxonomyDocument, TaxonomyField};

#[derive(Clone)]
pub struct TaxonomyService {
    document: JsonDocument<TaxonomyDocument>,
}

impl TaxonomyService {
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let document: JsonDocument<TaxonomyDocument> = JsonDocument::new(path, || Ok(TaxonomyDocument::seeded()));
        document.ensure()?;
        Ok(Self { document })
    }

    pub fn list_values(&self, field: TaxonomyField) -> StoreResult<Vec<String>> {
        Ok(self.document.read()?.values(field).to_vec())
    }

    /// Appends `value` to the end of the list. Returns `false` if it was
    /// already present.
    pub fn add_value(&self, field: TaxonomyField, value: &str) -> StoreResult<bool> {
        require(field.label(), value)?;
        let value = value.trim();

        let added = self.document.update(|doc| {
            let values = doc.values_mut(field);
            if values.iter().any(|v| v == value) {
                return Ok(false);
            }
            values.push(value.to_string());
            Ok(true)
        })?;

        if added {
            tracing::info!("Added '{}' to {}", value, field);
        }
        Ok(added)
    }

    /// Returns `false` if the value was not present.
    pub fn remove_value(&self, field: TaxonomyField, value: &str) -> StoreResult<bool> {
        let value = value.trim();
        let removed = self.document.update(|doc| {
            let values = doc.values_mut(field);
            let before = values.len();
            values.retain(|v| v != value);
            Ok(values.len() != before)
        })?;

        if removed {
            tracing::info!("Removed '{}' from {}", value, field);
        }
        Ok(removed)
    }

    pub fn preferred_default(&self, field: TaxonomyField) -> StoreResult<Option<String>> {
        Ok(self.document.read()?.preferred_default(field).map(str::to_string))
    }

    pub fn snapshot(&self) -> StoreResult<TaxonomyDocument> {
        self.document.read()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open(dir: &TempDir) -> TaxonomyService {
        TaxonomyService::open(dir.path().join("config.json")).unwrap()
    }

    #[test]
    fn add_and_remove_preserve_order() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir);

        assert!(service.add_value(TaxonomyField::CostCenter, "Ground").unwrap());
        assert!(service.add_value(TaxonomyField::CostCenter, "Flight").unwrap());
        assert!(!service.add_value(TaxonomyField::CostCenter, "Ground").unwrap());
        assert_eq!(
            service.list_values(TaxonomyField::CostCenter).unwrap(),
            vec!["Launch", "Ground", "Flight"]
        );

        assert!(service.remove_value(TaxonomyField::CostCenter, "Ground").unwrap());
        assert!(!service.remove_value(TaxonomyField::CostCenter, "Ground").unwrap());
        assert_eq!(
            service.list_values(TaxonomyField::CostCenter).unwrap(),
            vec!["Launch", "Flight"]
        );
    }

    #[test]
    fn padded_values_are_added_and_removed_alike() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir);

        assert!(service.add_value(TaxonomyField::CostCenter, " Ground ").unwrap());
        assert!(!service.add_value(TaxonomyField::CostCenter, "Ground").unwrap());
        assert!(service.remove_value(TaxonomyField::CostCenter, " Ground ").unwrap());
        assert_eq!(service.list_values(TaxonomyField::CostCenter).unwrap(), vec!["Launch"]);
    }

    #[test]
    fn duplicate_add_does_not_rewrite_document() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir);
        let path = dir.path().join("config.json");
        let before = std::fs::metadata(&path).unwrap().modified().unwrap();
        let bytes = std::fs::read(&path).unwrap();

        assert!(!service.add_value(TaxonomyField::Projects, "VK-IU").unwrap());
        assert_eq!(std::fs::read(&path).unwrap(), bytes);
        assert_eq!(std::fs::metadata(&path).unwrap().modified().unwrap(), before);
    }

    #[test]
    fn blank_value_is_rejected() {
        let dir = TempDir::new().unwrap();
        let service = open(&dir);
        assert!(service.add_value(TaxonomyField::Departments, "  ").is_err());
        assert_eq!(service.list_values(TaxonomyField::Departments).unwrap(), vec!["Avionics"]);
    }
}
