//! In-memory `ContentRepository` used by unit and behaviour tests.

use std::collections::BTreeMap;

use crate::{Beach, ContentError, ContentItem, ContentKind, ContentRepository, TownBundle};

/// In-memory `ContentRepository`.
///
/// Beaches added with [`MemoryContentRepository::with_beach`] are listed under
/// [`ContentKind::Beaches`] as well as returned by `beaches()`.
#[derive(Default, Debug, Clone)]
pub struct MemoryContentRepository {
    items: BTreeMap<ContentKind, Vec<ContentItem>>,
    beaches: Vec<Beach>,
    towns: BTreeMap<String, TownBundle>,
}

impl MemoryContentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a non-beach item.
    #[must_use]
    pub fn with_item(mut self, kind: ContentKind, item: ContentItem) -> Self {
        self.items.entry(kind).or_default().push(item);
        self
    }

    /// Add a rated beach.
    #[must_use]
    pub fn with_beach(mut self, beach: Beach) -> Self {
        self.beaches.push(beach);
        self
    }

    /// Register a town bundle under `name` (matched exactly).
    #[must_use]
    pub fn with_town(mut self, name: impl Into<String>, bundle: TownBundle) -> Self {
        self.towns.insert(name.into(), bundle);
        self
    }
}

impl ContentRepository for MemoryContentRepository {
    fn list(&self, kind: ContentKind) -> Result<Vec<ContentItem>, ContentError> {
        if kind == ContentKind::Beaches {
            return Ok(self.beaches.iter().cloned().map(ContentItem::from).collect());
        }
        Ok(self.items.get(&kind).cloned().unwrap_or_default())
    }

    fn beaches(&self) -> Result<Vec<Beach>, ContentError> {
        Ok(self.beaches.clone())
    }

    fn town_bundle(&self, town: &str) -> Result<TownBundle, ContentError> {
        self.towns
            .get(town)
            .cloned()
            .ok_or_else(|| ContentError::Unavailable {
                source_name: format!("towns/{town}"),
                message: "no such town".to_owned(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn lists_beaches_alongside_other_kinds() {
        let repo = MemoryContentRepository::new()
            .with_beach(Beach::new("1", "Nauset Beach"))
            .with_item(
                ContentKind::Towns,
                ContentItem::new("orleans", "Orleans", "Gateway to Nauset"),
            );
        let hits = repo.search("nauset", None).expect("search");
        let kinds: Vec<ContentKind> = hits.iter().map(|hit| hit.category).collect();
        assert_eq!(kinds, vec![ContentKind::Towns, ContentKind::Beaches]);
        assert_eq!(
            repo.get(ContentKind::Beaches, "1")
                .expect("lookup")
                .map(|item| item.name),
            Some("Nauset Beach".to_owned())
        );
    }
}
