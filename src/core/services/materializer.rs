use std::path::{Path, PathBuf};

use log::debug;

use crate::core::errors::Result;
use crate::core::models::environment::EnvTag;
use crate::core::models::report::{MaterializeEntry, MaterializeReport, Outcome};
use crate::core::traits::file_store::{CopyResult, FileStore};

/// Base names managed when no manifest overrides them.
pub const DEFAULT_BASE_NAMES: &[&str] = &[
    "cluster", "config", "mysql", "redis", "sdk", "servers", "apps",
];

/// Extension shared by templates and their environment variants.
pub const DEFAULT_EXTENSION: &str = "yaml";

/// Copies `<base>.<ext>` templates to `<base><env>.<ext>` for each base name.
///
/// A template is only copied when it exists and its environment variant
/// does not. Existing files are never modified or removed, so running the
/// same environment twice is a no-op the second time.
pub struct Materializer<S> {
    store: S,
    names: Vec<String>,
    extension: String,
}

impl<S: FileStore> Materializer<S> {
    pub fn new(store: S, names: Vec<String>, extension: impl Into<String>) -> Self {
        Self {
            store,
            names,
            extension: extension.into(),
        }
    }

    /// Materializer over the built-in base names and `.yaml` extension.
    #[allow(dead_code)]
    pub fn with_defaults(store: S) -> Self {
        Self::new(
            store,
            DEFAULT_BASE_NAMES.iter().map(|n| n.to_string()).collect(),
            DEFAULT_EXTENSION,
        )
    }

    /// Template path for `base`, e.g. `config.yaml`.
    pub fn source_path(&self, base: &str) -> PathBuf {
        PathBuf::from(format!("{base}.{}", self.extension))
    }

    /// Environment variant path for `base`, e.g. `configprod.yaml`.
    pub fn destination_path(&self, base: &str, env: &EnvTag) -> PathBuf {
        PathBuf::from(format!("{base}{env}.{}", self.extension))
    }

    /// Materialize every base name for `env`, in list order.
    ///
    /// Stops at the first copy failure and returns it; files copied before
    /// the failure are kept. With `dry_run` nothing is written and the
    /// report lists the copies that would have been made.
    pub fn materialize(&self, env: &EnvTag, dry_run: bool) -> Result<MaterializeReport> {
        let mut entries = Vec::with_capacity(self.names.len());

        for base in &self.names {
            let source = self.source_path(base);
            let destination = self.destination_path(base, env);
            let outcome = self.materialize_one(&source, &destination, dry_run)?;

            debug!(
                "{base}: {} -> {} ({outcome:?})",
                source.display(),
                destination.display()
            );

            entries.push(MaterializeEntry {
                base: base.clone(),
                source,
                destination,
                outcome,
            });
        }

        Ok(MaterializeReport {
            env: env.clone(),
            dry_run,
            entries,
        })
    }

    fn materialize_one(
        &self,
        source: &Path,
        destination: &Path,
        dry_run: bool,
    ) -> Result<Outcome> {
        if !self.store.exists(source) {
            return Ok(Outcome::SkippedMissingSource);
        }
        if self.store.exists(destination) {
            return Ok(Outcome::SkippedDestinationExists);
        }
        if dry_run {
            return Ok(Outcome::Copied);
        }

        // The destination can still appear between the check and the copy.
        match self.store.copy_new(source, destination)? {
            CopyResult::Created => Ok(Outcome::Copied),
            CopyResult::AlreadyExists => Ok(Outcome::SkippedDestinationExists),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::{BTreeMap, BTreeSet};

    use super::*;
    use crate::core::errors::CreateConfigError;

    /// In-memory store that can be told to fail copies to given paths.
    #[derive(Default)]
    struct MemoryStore {
        files: RefCell<BTreeMap<PathBuf, String>>,
        failing: BTreeSet<PathBuf>,
    }

    impl MemoryStore {
        fn with_files(files: &[(&str, &str)]) -> Self {
            let store = Self::default();
            for (name, content) in files {
                store
                    .files
                    .borrow_mut()
                    .insert(PathBuf::from(name), content.to_string());
            }
            store
        }

        fn names(&self) -> Vec<String> {
            self.files
                .borrow()
                .keys()
                .map(|p| p.display().to_string())
                .collect()
        }

        fn content(&self, name: &str) -> Option<String> {
            self.files.borrow().get(Path::new(name)).cloned()
        }
    }

    impl FileStore for &MemoryStore {
        fn exists(&self, path: &Path) -> bool {
            self.files.borrow().contains_key(path)
        }

        fn copy_new(&self, from: &Path, to: &Path) -> Result<CopyResult> {
            if self.failing.contains(to) {
                return Err(CreateConfigError::CopyFailed {
                    from: from.to_path_buf(),
                    to: to.to_path_buf(),
                    source: std::io::Error::new(
                        std::io::ErrorKind::PermissionDenied,
                        "permission denied",
                    ),
                });
            }
            let mut files = self.files.borrow_mut();
            if files.contains_key(to) {
                return Ok(CopyResult::AlreadyExists);
            }
            let content = files[from].clone();
            files.insert(to.to_path_buf(), content);
            Ok(CopyResult::Created)
        }
    }

    /// Store whose `exists` misses files created after the check, as when
    /// another process writes the destination in between.
    struct LateWriterStore<'a> {
        inner: &'a MemoryStore,
        unseen: BTreeSet<PathBuf>,
    }

    impl FileStore for LateWriterStore<'_> {
        fn exists(&self, path: &Path) -> bool {
            !self.unseen.contains(path) && self.inner.files.borrow().contains_key(path)
        }

        fn copy_new(&self, from: &Path, to: &Path) -> Result<CopyResult> {
            self.inner.copy_new(from, to)
        }
    }

    fn prod() -> EnvTag {
        EnvTag::new("prod").unwrap()
    }

    #[test]
    fn default_names_in_fixed_order() {
        let store = MemoryStore::default();
        let mat = Materializer::with_defaults(&store);
        let report = mat.materialize(&prod(), false).unwrap();
        let bases: Vec<&str> = report.entries.iter().map(|e| e.base.as_str()).collect();
        assert_eq!(
            bases,
            ["cluster", "config", "mysql", "redis", "sdk", "servers", "apps"]
        );
    }

    #[test]
    fn builds_source_and_destination_paths() {
        let store = MemoryStore::default();
        let mat = Materializer::with_defaults(&store);
        assert_eq!(mat.source_path("config"), PathBuf::from("config.yaml"));
        assert_eq!(
            mat.destination_path("config", &prod()),
            PathBuf::from("configprod.yaml")
        );
    }

    #[test]
    fn copies_existing_templates_only() {
        let store = MemoryStore::with_files(&[("config.yaml", "a: 1"), ("redis.yaml", "b: 2")]);
        let mat = Materializer::with_defaults(&store);

        let report = mat.materialize(&EnvTag::new("staging").unwrap(), false).unwrap();

        assert_eq!(report.copied(), 2);
        assert_eq!(report.outcome_of("config"), Some(Outcome::Copied));
        assert_eq!(report.outcome_of("redis"), Some(Outcome::Copied));
        assert_eq!(report.outcome_of("mysql"), Some(Outcome::SkippedMissingSource));
        assert_eq!(store.content("configstaging.yaml").as_deref(), Some("a: 1"));
        assert_eq!(store.content("redisstaging.yaml").as_deref(), Some("b: 2"));
        assert_eq!(store.names().len(), 4);
    }

    #[test]
    fn second_run_copies_nothing() {
        let store = MemoryStore::with_files(&[("sdk.yaml", "x")]);
        let mat = Materializer::with_defaults(&store);

        assert_eq!(mat.materialize(&prod(), false).unwrap().copied(), 1);
        let before = store.names();

        let again = mat.materialize(&prod(), false).unwrap();
        assert_eq!(again.copied(), 0);
        assert_eq!(again.outcome_of("sdk"), Some(Outcome::SkippedDestinationExists));
        assert_eq!(store.names(), before);
    }

    #[test]
    fn existing_destination_is_left_alone() {
        let store = MemoryStore::with_files(&[("apps.yaml", "template"), ("appsprod.yaml", "mine")]);
        let mat = Materializer::with_defaults(&store);

        let report = mat.materialize(&prod(), false).unwrap();

        assert_eq!(report.outcome_of("apps"), Some(Outcome::SkippedDestinationExists));
        assert_eq!(store.content("appsprod.yaml").as_deref(), Some("mine"));
    }

    #[test]
    fn destination_created_after_check_is_skipped() {
        let store = MemoryStore::with_files(&[("redis.yaml", "template"), ("redisprod.yaml", "theirs")]);
        let racing = LateWriterStore {
            inner: &store,
            unseen: BTreeSet::from([PathBuf::from("redisprod.yaml")]),
        };
        let mat = Materializer::with_defaults(racing);

        let report = mat.materialize(&prod(), false).unwrap();

        assert_eq!(report.outcome_of("redis"), Some(Outcome::SkippedDestinationExists));
        assert_eq!(report.copied(), 0);
        assert_eq!(store.content("redisprod.yaml").as_deref(), Some("theirs"));
    }

    #[test]
    fn names_outside_the_list_are_ignored() {
        let store = MemoryStore::with_files(&[("other.yaml", "x")]);
        let mat = Materializer::with_defaults(&store);

        let report = mat.materialize(&prod(), false).unwrap();

        assert_eq!(report.copied(), 0);
        assert_eq!(report.outcome_of("other"), None);
        assert_eq!(store.names(), vec!["other.yaml"]);
    }

    #[test]
    fn injected_names_and_extension() {
        let store = MemoryStore::with_files(&[("alpha.yml", "1"), ("config.yaml", "2")]);
        let mat = Materializer::new(&store, vec!["alpha".into(), "beta".into()], "yml");

        let report = mat.materialize(&prod(), false).unwrap();

        assert_eq!(report.entries.len(), 2);
        assert_eq!(report.outcome_of("alpha"), Some(Outcome::Copied));
        assert_eq!(report.outcome_of("beta"), Some(Outcome::SkippedMissingSource));
        assert!(store.content("alphaprod.yml").is_some());
        assert!(store.content("configprod.yaml").is_none());
    }

    #[test]
    fn dry_run_writes_nothing() {
        let store = MemoryStore::with_files(&[("mysql.yaml", "m")]);
        let mat = Materializer::with_defaults(&store);

        let report = mat.materialize(&prod(), true).unwrap();

        assert!(report.dry_run);
        assert_eq!(report.outcome_of("mysql"), Some(Outcome::Copied));
        assert_eq!(store.names(), vec!["mysql.yaml"]);
    }

    #[test]
    fn copy_failure_stops_the_run() {
        let mut store = MemoryStore::with_files(&[
            ("cluster.yaml", "c"),
            ("config.yaml", "cfg"),
            ("mysql.yaml", "m"),
        ]);
        store.failing.insert(PathBuf::from("configprod.yaml"));
        let mat = Materializer::with_defaults(&store);

        let err = mat.materialize(&prod(), false).unwrap_err();

        match err {
            CreateConfigError::CopyFailed { from, to, .. } => {
                assert_eq!(from, PathBuf::from("config.yaml"));
                assert_eq!(to, PathBuf::from("configprod.yaml"));
            }
            other => panic!("unexpected error: {other}"),
        }
        // Earlier copy kept, later names untouched.
        assert!(store.content("clusterprod.yaml").is_some());
        assert!(store.content("mysqlprod.yaml").is_none());
    }
}
