// src/reconcile.rs

//! Checks that every proposal in the program listing has been looked up
//! in the status table.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use crate::dataset::Dataset;
use crate::error::DatasetError;

pub const ID_COLUMN: &str = "ID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Coverage {
    Complete,
    Missing(BTreeSet<String>),
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        matches!(self, Coverage::Complete)
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coverage::Complete => write!(f, "All checked"),
            Coverage::Missing(ids) => {
                let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
                write!(f, "Not all checked, missing: {{{}}}", ids.join(", "))
            }
        }
    }
}

/// IDs of `expected` that do not appear in `checked`.
pub fn reconcile(expected: &BTreeSet<String>, checked: &BTreeSet<String>) -> Coverage {
    if expected.is_subset(checked) {
        Coverage::Complete
    } else {
        Coverage::Missing(expected.difference(checked).cloned().collect())
    }
}

pub fn reconcile_datasets(
    expected: &Dataset,
    checked: &Dataset,
) -> Result<Coverage, DatasetError> {
    let ids = |ds: &Dataset, name: &str| {
        ds.column_values(ID_COLUMN)
            .ok_or_else(|| DatasetError::MissingColumn {
                path: name.to_string(),
                column: ID_COLUMN.to_string(),
            })
    };
    Ok(reconcile(&ids(expected, "expected")?, &ids(checked, "checked")?))
}

pub fn reconcile_files(
    expected: impl AsRef<Path>,
    checked: impl AsRef<Path>,
) -> Result<Coverage, DatasetError> {
    let load = |path: &Path| -> Result<BTreeSet<String>, DatasetError> {
        Dataset::load(path)?
            .column_values(ID_COLUMN)
            .ok_or_else(|| DatasetError::MissingColumn {
                path: path.display().to_string(),
                column: ID_COLUMN.to_string(),
            })
    };
    Ok(reconcile(
        &load(expected.as_ref())?,
        &load(checked.as_ref())?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reports_missing_ids() {
        let coverage = reconcile(&set(&["1", "2", "3"]), &set(&["1", "2"]));
        assert_eq!(coverage, Coverage::Missing(set(&["3"])));
        assert_eq!(coverage.to_string(), "Not all checked, missing: {3}");
    }

    #[test]
    fn superset_is_complete() {
        let coverage = reconcile(&set(&["1", "2"]), &set(&["1", "2", "4"]));
        assert!(coverage.is_complete());
        assert_eq!(coverage.to_string(), "All checked");
        assert!(reconcile(&set(&[]), &set(&[])).is_complete());
    }

    #[test]
    fn files_are_compared_by_id_column() {
        let dir = tempdir().unwrap();
        let basic = dir.path().join("basic.csv");
        let status = dir.path().join("status.csv");
        fs::write(&basic, "ID,PI\n1180,Smith\n1181,Jones\n1182,Lee\n").unwrap();
        fs::write(&status, "ID,Visit,Template\n1180,1:1,x\n1180,2:1,x\n1182,1:1,x\n").unwrap();

        assert_eq!(
            reconcile_files(&basic, &status).unwrap(),
            Coverage::Missing(set(&["1181"]))
        );
        assert!(reconcile_files(&status, &basic).unwrap().is_complete());
    }

    #[test]
    fn missing_id_column_is_an_error() {
        let dir = tempdir().unwrap();
        let basic = dir.path().join("basic.csv");
        let other = dir.path().join("other.csv");
        fs::write(&basic, "ID\n1\n").unwrap();
        fs::write(&other, "Program\n1\n").unwrap();

        match reconcile_files(&basic, &other) {
            Err(DatasetError::MissingColumn { path, column }) => {
                assert!(path.ends_with("other.csv"));
                assert_eq!(column, "ID");
            }
            res => panic!("unexpected {:?}", res),
        }
    }
}
