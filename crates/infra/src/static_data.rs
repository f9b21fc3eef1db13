use std::path::{Path, PathBuf};

use dataset_search_core::domain::dimensions::DimensionsDoc;
use dataset_search_core::domain::taxonomy::{Taxonomy, TaxonomyDefinition};
use dataset_search_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StaticDataError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid taxonomy in {}: {source}", .path.display())]
    Taxonomy {
        path: PathBuf,
        source: CoreError,
    },
}

pub fn load_taxonomy(path: impl AsRef<Path>) -> Result<Taxonomy, StaticDataError> {
    let path = path.as_ref();
    let contents = read(path)?;
    parse_taxonomy(&contents, path)
}

pub fn load_dimensions(path: impl AsRef<Path>) -> Result<DimensionsDoc, StaticDataError> {
    let path = path.as_ref();
    let contents = read(path)?;
    parse_dimensions(&contents, path)
}

fn parse_taxonomy(contents: &str, path: &Path) -> Result<Taxonomy, StaticDataError> {
    let definition: TaxonomyDefinition =
        serde_json::from_str(contents).map_err(|source| StaticDataError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Taxonomy::build(definition).map_err(|source| StaticDataError::Taxonomy {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_dimensions(contents: &str, path: &Path) -> Result<DimensionsDoc, StaticDataError> {
    let doc: DimensionsDoc =
        serde_json::from_str(contents).map_err(|source| StaticDataError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    if doc.total_count == 0 && !doc.dimensions.is_empty() {
        return Ok(DimensionsDoc::new(doc.dimensions));
    }
    Ok(doc)
}

fn read(path: &Path) -> Result<String, StaticDataError> {
    std::fs::read_to_string(path).map_err(|source| StaticDataError::Io {
        path: path.to_path_buf(),
        source,
    })
}
