//! Test helpers for building content directories on disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// A temporary content directory with beaches, a rating schema and one town.
#[derive(Debug)]
pub(super) struct ContentDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ContentDir {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let content = Self { _dir: dir, root };
        content.write(
            "beaches.json",
            r#"[
                {"id": "mayo", "name": "Mayo Beach",
                 "ratings": {"environmental_factors": {"water_quality": 1}}},
                {"id": "craigville", "name": "Craigville Beach", "description": "Warm water",
                 "ratings": {"environmental_factors": {"water_quality": 5.5},
                             "crowding_and_atmosphere": {"family_friendliness": 80}}},
                {"id": 7, "name": "Nauset Beach",
                 "ratings": {"environmental_factors": {"water_quality": 10}}}
            ]"#,
        );
        content.write(
            "rating_schema.json",
            r#"{"water_quality": {"min": 1, "max": 10},
                "family_friendliness": {"min": 0, "max": 100}}"#,
        );
        content.write(
            "towns.json",
            r#"[{"id": "chatham", "name": "Chatham", "description": "Lighthouse and fish pier"}]"#,
        );
        content.write("attractions.json", "[]");
        content.write(
            "food-and-drink.json",
            r#"[{"id": "squire", "name": "The Squire", "description": "Pub by the beach"}]"#,
        );
        content.write(
            "towns/chatham/info.json",
            r#"{"name": "Chatham", "description": "Elbow of the Cape", "population": 6594}"#,
        );
        content.write("towns/chatham/activities.json", r#"{"activities": []}"#);
        content.write("towns/chatham/beaches.json", r#"{"beaches": []}"#);
        content.write("towns/chatham/food-and-drink.json", r#"{"food_and_drink": []}"#);
        content
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn write(&self, relative: &str, contents: &str) {
        write_utf8(&self.root.join(relative), contents.as_bytes());
    }
}

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write file");
}
