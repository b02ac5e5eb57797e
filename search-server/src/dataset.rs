//! User dataset backing the search endpoint.
//!
//! The dataset location is part of `ServerConfig`, and a file-backed dataset
//! is re-read on every request, so a test can point the server at a missing
//! file to provoke an internal failure.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One row as stored in the dataset file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub about: String,
    pub gender: String,
}

impl Row {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Empty queries match every row.
    pub fn matches(&self, query: &str) -> bool {
        query.is_empty() || self.full_name().contains(query) || self.about.contains(query)
    }
}

/// A user as returned on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub age: i64,
    pub about: String,
    pub gender: String,
}

impl From<&Row> for User {
    fn from(row: &Row) -> Self {
        User {
            id: row.id,
            name: row.full_name(),
            age: row.age,
            about: row.about.clone(),
            gender: row.gender.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the rows come from.
#[derive(Debug, Clone)]
pub enum Dataset {
    /// JSON array of `Row` objects.
    File(PathBuf),
    Rows(Arc<Vec<Row>>),
}

impl Dataset {
    pub fn from_rows(rows: Vec<Row>) -> Self {
        Dataset::Rows(Arc::new(rows))
    }

    pub async fn load(&self) -> Result<Arc<Vec<Row>>, DatasetError> {
        match self {
            Dataset::File(path) => {
                let bytes = tokio::fs::read(path).await.map_err(|source| DatasetError::Read {
                    path: path.clone(),
                    source,
                })?;
                let rows: Vec<Row> = serde_json::from_slice(&bytes)?;
                Ok(Arc::new(rows))
            }
            Dataset::Rows(rows) => Ok(Arc::clone(rows)),
        }
    }
}
