//! File-backed content repository.
//!
//! The content root holds one flat JSON array per [`ContentKind`]
//! (`towns.json`, `beaches.json`, `attractions.json`, `food-and-drink.json`)
//! and a `towns/<name>/` directory per town with `info.json`,
//! `activities.json`, `beaches.json` and `food-and-drink.json`.
//!
//! Files are re-read on every call, so edits to the content are visible
//! without restarting. All reads go through a `cap-std` directory capability
//! rooted at the content directory; town names cannot address files outside
//! it.

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::fs_utf8::Dir;
use capecod_core::{
    Beach, ContentError, ContentItem, ContentKind, ContentRepository, Listing, TownBundle,
    TownInfo,
};
use capecod_fs::{open_dir, read_in_dir};
use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors raised while opening a content root.
#[derive(Debug, Error)]
pub enum ContentStoreError {
    /// The content directory could not be opened.
    #[error("failed to open content directory {path}")]
    OpenRoot {
        /// Requested directory.
        path: Utf8PathBuf,
        /// Source error from std I/O.
        #[source]
        source: std::io::Error,
    },
}

/// One of the per-town documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TownDocument {
    Info,
    Activities,
    Beaches,
    FoodAndDrink,
}

impl TownDocument {
    const fn file_name(self) -> &'static str {
        match self {
            Self::Info => "info.json",
            Self::Activities => "activities.json",
            Self::Beaches => "beaches.json",
            Self::FoodAndDrink => "food-and-drink.json",
        }
    }

    /// Key wrapping the list inside the document, if any.
    const fn list_key(self) -> &'static str {
        match self {
            Self::Info => "",
            Self::Activities => "activities",
            Self::Beaches => "beaches",
            Self::FoodAndDrink => "food_and_drink",
        }
    }
}

/// [`ContentRepository`] reading JSON documents beneath a directory.
///
/// # Examples
///
/// ```no_run
/// use camino::Utf8Path;
/// use capecod_core::{ContentKind, ContentRepository};
/// use capecod_data::FsContentRepository;
///
/// let repo = FsContentRepository::open(Utf8Path::new("public/data"))?;
/// let hits = repo.search("lighthouse", Some(ContentKind::Attractions))?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct FsContentRepository {
    root: Utf8PathBuf,
    dir: Dir,
}

impl FsContentRepository {
    /// Open the content directory at `root`.
    ///
    /// # Errors
    /// Returns [`ContentStoreError::OpenRoot`] when the directory cannot be
    /// opened.
    pub fn open(root: &Utf8Path) -> Result<Self, ContentStoreError> {
        let dir = open_dir(root).map_err(|source| ContentStoreError::OpenRoot {
            path: root.to_path_buf(),
            source,
        })?;
        Ok(Self {
            root: root.to_path_buf(),
            dir,
        })
    }

    /// Directory the repository reads from.
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    fn read_json<T: DeserializeOwned>(&self, relative: &Utf8Path) -> Result<T, ContentError> {
        let text = read_in_dir(&self.dir, relative).map_err(|err| ContentError::Unavailable {
            source_name: relative.to_string(),
            message: err.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|err| ContentError::Malformed {
            source_name: relative.to_string(),
            message: err.to_string(),
        })
    }

    fn kind_file(kind: ContentKind) -> Utf8PathBuf {
        Utf8PathBuf::from(format!("{}.json", kind.as_str()))
    }

    fn town_file(town: &str, document: TownDocument) -> Utf8PathBuf {
        Utf8Path::new("towns").join(town).join(document.file_name())
    }

    fn town_info(&self, town: &str) -> Result<TownInfo, ContentError> {
        self.read_json(&Self::town_file(town, TownDocument::Info))
    }

    fn town_list(&self, town: &str, document: TownDocument) -> Result<Vec<Listing>, ContentError> {
        let path = Self::town_file(town, document);
        let raw: Value = self.read_json(&path)?;
        unwrap_list(raw, document.list_key()).map_err(|message| ContentError::Malformed {
            source_name: path.to_string(),
            message,
        })
    }

    /// Load the bundle for `town` without failing.
    ///
    /// The name is lowercased to match the directory layout. Each document
    /// that is missing or malformed is replaced by an empty default, so a
    /// town without a directory yields an empty bundle.
    pub fn town_bundle_lenient(&self, town: &str) -> TownBundle {
        let key = town.to_lowercase();
        let info = self.town_info(&key).unwrap_or_else(|err| {
            debug!("using default info for {town}: {err}");
            TownInfo::default()
        });
        let list = |document: TownDocument| {
            self.town_list(&key, document).unwrap_or_else(|err| {
                debug!("using empty {} for {town}: {err}", document.list_key());
                Vec::new()
            })
        };
        TownBundle {
            info,
            activities: list(TownDocument::Activities),
            beaches: list(TownDocument::Beaches),
            food_and_drink: list(TownDocument::FoodAndDrink),
        }
    }
}

/// Extract the list stored under `key`, accepting a bare array too.
fn unwrap_list(raw: Value, key: &str) -> Result<Vec<Listing>, String> {
    let list = match raw {
        Value::Array(_) => raw,
        Value::Object(mut object) => object.remove(key).unwrap_or(Value::Array(Vec::new())),
        other => return Err(format!("expected an array or an object with '{key}', found {other}")),
    };
    serde_json::from_value(list).map_err(|err| err.to_string())
}

impl ContentRepository for FsContentRepository {
    fn list(&self, kind: ContentKind) -> Result<Vec<ContentItem>, ContentError> {
        self.read_json(&Self::kind_file(kind))
    }

    fn beaches(&self) -> Result<Vec<Beach>, ContentError> {
        self.read_json(&Self::kind_file(ContentKind::Beaches))
    }

    fn town_bundle(&self, town: &str) -> Result<TownBundle, ContentError> {
        Ok(TownBundle {
            info: self.town_info(town)?,
            activities: self.town_list(town, TownDocument::Activities)?,
            beaches: self.town_list(town, TownDocument::Beaches)?,
            food_and_drink: self.town_list(town, TownDocument::FoodAndDrink)?,
        })
    }

    fn town_bundle_or_default(&self, town: &str) -> TownBundle {
        self.town_bundle_lenient(town)
    }
}
