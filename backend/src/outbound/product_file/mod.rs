//! Product catalogue mirrored to a JSON file.
//!
//! The whole catalogue is held in memory and rewritten to disk after every
//! change. A change is committed to memory only once the file write has
//! succeeded, so the two never disagree.
//!
//! New ids come from a high-water mark seeded with the largest id in the
//! file, so an id freed by a delete is never handed out again while the
//! process runs.

mod atomic_io;

use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::ports::{ProductRepository, ProductRepositoryError};
use crate::domain::{Product, ProductDetails};

use self::atomic_io::write_atomic;

const INDENT: &[u8] = b"    ";

/// Failures while opening the catalogue file.
#[derive(Debug, Error)]
pub enum ProductFileError {
    /// The path has no usable file name.
    #[error("product file path '{path}' must name a UTF-8 file")]
    InvalidPath {
        /// Offending path.
        path: PathBuf,
    },
    /// The file or its directory could not be read.
    #[error("failed to read product file '{path}': {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not a JSON array of products.
    #[error("product file '{path}' is malformed: {source}")]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Product store backed by a JSON array file.
#[derive(Debug)]
pub struct JsonFileProductRepository {
    dir: Dir,
    file_name: String,
    path: PathBuf,
    catalogue: Mutex<Catalogue>,
}

#[derive(Debug)]
struct Catalogue {
    products: Vec<Product>,
    last_id: u64,
}

impl Catalogue {
    fn new(products: Vec<Product>) -> Self {
        let last_id = max_id(&products);
        Self { products, last_id }
    }

    const fn next_id(&self) -> u64 {
        self.last_id.saturating_add(1)
    }
}

impl JsonFileProductRepository {
    /// Load the catalogue at `path`.
    ///
    /// A missing file yields an empty catalogue; the file is created on the
    /// first change. The parent directory must exist.
    ///
    /// # Errors
    ///
    /// Returns [`ProductFileError`] when the directory cannot be opened, the
    /// file cannot be read, or its contents are not a product array.
    pub fn open(path: &Path) -> Result<Self, ProductFileError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| ProductFileError::InvalidPath {
                path: path.to_path_buf(),
            })?
            .to_owned();
        let parent = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let io_error = |source| ProductFileError::Io {
            path: path.to_path_buf(),
            source,
        };
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;

        let products = match dir.read_to_string(&file_name) {
            Ok(raw) => serde_json::from_str::<Vec<Product>>(&raw).map_err(|source| {
                ProductFileError::Parse {
                    path: path.to_path_buf(),
                    source,
                }
            })?,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "product file missing; starting empty");
                Vec::new()
            }
            Err(err) => return Err(io_error(err)),
        };
        info!(path = %path.display(), count = products.len(), "product catalogue loaded");

        Ok(Self {
            dir,
            file_name,
            path: path.to_path_buf(),
            catalogue: Mutex::new(Catalogue::new(products)),
        })
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, Catalogue>, ProductRepositoryError> {
        self.catalogue
            .lock()
            .map_err(|err| ProductRepositoryError::unavailable(err.to_string()))
    }

    /// Write `next` to disk, then swap it into `current`.
    fn commit(
        &self,
        current: &mut Catalogue,
        next: Vec<Product>,
    ) -> Result<(), ProductRepositoryError> {
        let bytes = render(&next)?;
        write_atomic(&self.dir, &self.file_name, &bytes).map_err(|err| {
            ProductRepositoryError::storage(format!("{}: {err}", self.path.display()))
        })?;
        debug!(path = %self.path.display(), count = next.len(), "product file rewritten");
        current.last_id = current.last_id.max(max_id(&next));
        current.products = next;
        Ok(())
    }
}

fn render(products: &[Product]) -> Result<Vec<u8>, ProductRepositoryError> {
    let mut buffer = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    products
        .serialize(&mut serializer)
        .map_err(|err| ProductRepositoryError::storage(err.to_string()))?;
    Ok(buffer)
}

fn max_id(products: &[Product]) -> u64 {
    products
        .iter()
        .map(|product| product.id)
        .max()
        .unwrap_or(0)
}

#[async_trait]
impl ProductRepository for JsonFileProductRepository {
    async fn create(&self, details: ProductDetails) -> Result<Product, ProductRepositoryError> {
        let mut catalogue = self.lock()?;
        let product = Product {
            id: catalogue.next_id(),
            details,
        };
        let mut next = catalogue.products.clone();
        next.push(product.clone());
        self.commit(&mut catalogue, next)?;
        Ok(product)
    }

    async fn list(&self) -> Result<Vec<Product>, ProductRepositoryError> {
        Ok(self.lock()?.products.clone())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Product>, ProductRepositoryError> {
        Ok(self
            .lock()?
            .products
            .iter()
            .find(|product| product.id == id)
            .cloned())
    }

    async fn update(
        &self,
        id: u64,
        details: ProductDetails,
    ) -> Result<Option<Product>, ProductRepositoryError> {
        let mut catalogue = self.lock()?;
        let mut next = catalogue.products.clone();
        let Some(slot) = next.iter_mut().find(|product| product.id == id) else {
            return Ok(None);
        };
        slot.details = details;
        let updated = slot.clone();
        self.commit(&mut catalogue, next)?;
        Ok(Some(updated))
    }

    async fn delete(&self, id: u64) -> Result<bool, ProductRepositoryError> {
        let mut catalogue = self.lock()?;
        if !catalogue.products.iter().any(|product| product.id == id) {
            return Ok(false);
        }
        let next: Vec<Product> = catalogue
            .products
            .iter()
            .filter(|product| product.id != id)
            .cloned()
            .collect();
        self.commit(&mut catalogue, next)?;
        Ok(true)
    }
}
