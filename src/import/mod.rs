//! Import of externally produced report documents.
//!
//! A report exported by another tool arrives as `{"data": "<html>..."}`.
//! Its content region is moved into the viewer's own document.

pub mod dom;
pub mod importer;

pub use importer::{ContentImporter, HostDocument, ImportSummary, Selector};

use serde::{Deserialize, Serialize};

use crate::error::ImportError;

/// An imported report: the foreign document's HTML text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportedReport {
    pub data: String,
}

impl ImportedReport {
    pub fn from_json(text: &str) -> Result<Self, ImportError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Import this report into `host` with `importer`.
    pub fn import_into(
        &self,
        importer: &ContentImporter,
        host: &mut HostDocument,
    ) -> Result<ImportSummary, ImportError> {
        importer.import(&self.data, host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_imported_report_from_json() {
        let report = ImportedReport::from_json(r#"{"data": "<div id=\"content\"></div>"}"#).unwrap();
        assert!(report.data.contains("content"));

        let err = ImportedReport::from_json("{}").unwrap_err();
        assert!(matches!(err, ImportError::Payload(_)));
    }
}
