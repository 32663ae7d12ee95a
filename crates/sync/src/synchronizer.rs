//! The catalog synchronizer.
//!
//! A run is strictly sequential:
//!
//! 1. Refuse to start unless the store holds no characters and no
//!    transformations.
//! 2. Fetch listing pages from page 1 until the page count reported by
//!    page 1 is exhausted. Any failed page aborts the run.
//! 3. Keep Saiyans only. For Z Fighters, fetch the detail record and keep
//!    its transformations.
//! 4. Write everything in one transaction at the end.
//!
//! Nothing is written unless every page was fetched. An in-process mutex
//! spans the whole check-fetch-write sequence, so two runs on the same
//! [`Synchronizer`] can never interleave; the second one fails fast.

use std::fmt;

use dbz_catalog::models::ExternalCharacter;
use dbz_catalog::CatalogSource;
use dbz_core::catalog::{is_mirrored_race, needs_detail, NewCharacter, NewTransformation};
use tokio::sync::Mutex;

use crate::store::SyncStore;

/// Page size requested from the catalog.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;

/// Outcome of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncReport {
    /// Every page was fetched but no Saiyans were found; the store was not touched.
    NothingToSave,
    /// Rows were written.
    Saved {
        characters: usize,
        transformations: usize,
    },
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncReport::NothingToSave => f.write_str(
                "Synchronization complete. No Saiyans or relevant transformations found to save.",
            ),
            SyncReport::Saved {
                characters,
                transformations,
            } => write!(
                f,
                "Synchronization successful. Saved {characters} Saiyans and \
                 {transformations} transformations."
            ),
        }
    }
}

/// Why a run did not complete.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// The store already holds data; clear it first.
    #[error(
        "Database already contains data. Please clear existing characters and \
         transformations before syncing."
    )]
    StoreNotEmpty,

    /// Another run on this synchronizer has not finished yet.
    #[error("A synchronization is already in progress.")]
    AlreadyRunning,

    /// The catalog could not deliver a listing page.
    #[error("Error fetching data from external API on page {page}.")]
    SourceUnavailable { page: u32 },

    /// Reading from or writing to the store failed, or a row broke a column limit.
    #[error("An error occurred during synchronization: {0}")]
    Persistence(String),
}

/// Rows accumulated during one run. Owned by the run, dropped on abort.
#[derive(Debug, Default)]
struct SyncBatch {
    characters: Vec<NewCharacter>,
    transformations: Vec<NewTransformation>,
}

/// Mirrors Saiyans (and Z Fighter transformations) from a [`CatalogSource`]
/// into a [`SyncStore`].
pub struct Synchronizer<S, T> {
    source: S,
    store: T,
    page_limit: u32,
    running: Mutex<()>,
}

impl<S, T> Synchronizer<S, T>
where
    S: CatalogSource,
    T: SyncStore,
{
    pub fn new(source: S, store: T) -> Self {
        Self {
            source,
            store,
            page_limit: DEFAULT_PAGE_LIMIT,
            running: Mutex::new(()),
        }
    }

    /// Override the page size requested from the catalog.
    pub fn with_page_limit(mut self, page_limit: u32) -> Self {
        self.page_limit = page_limit.max(1);
        self
    }

    /// Run one full synchronization.
    pub async fn synchronize(&self) -> Result<SyncReport, SyncError> {
        let _guard = self.running.try_lock().map_err(|_| {
            tracing::warn!("Synchronization rejected, another run is in progress");
            SyncError::AlreadyRunning
        })?;

        tracing::info!("Starting synchronization");
        self.ensure_store_empty().await?;

        let batch = self.collect().await?;
        tracing::info!(
            characters = batch.characters.len(),
            transformations = batch.transformations.len(),
            "Finished fetching from catalog",
        );

        if batch.characters.is_empty() {
            tracing::info!("No Saiyans found, nothing to save");
            return Ok(SyncReport::NothingToSave);
        }

        self.persist(&batch).await?;

        let report = SyncReport::Saved {
            characters: batch.characters.len(),
            transformations: batch.transformations.len(),
        };
        tracing::info!(%report, "Synchronization completed");
        Ok(report)
    }

    async fn ensure_store_empty(&self) -> Result<(), SyncError> {
        let has_characters = self
            .store
            .has_characters()
            .await
            .map_err(|e| failed(Stage::EmptinessCheck, e))?;
        let has_transformations = self
            .store
            .has_transformations()
            .await
            .map_err(|e| failed(Stage::EmptinessCheck, e))?;

        if has_characters || has_transformations {
            tracing::warn!("Synchronization aborted, store is not empty");
            return Err(SyncError::StoreNotEmpty);
        }
        Ok(())
    }

    /// Walk every listing page and build the rows to insert.
    async fn collect(&self) -> Result<SyncBatch, SyncError> {
        let mut batch = SyncBatch::default();
        let mut page: u32 = 1;
        let mut total_pages: u32 = 1;

        loop {
            tracing::info!(page, "Fetching catalog page");
            let listing = self
                .source
                .list_page(page, self.page_limit)
                .await
                .ok_or_else(|| {
                    tracing::error!(page, "Catalog page unavailable, aborting");
                    SyncError::SourceUnavailable { page }
                })?;

            if page == 1 {
                total_pages = listing.meta.total_pages;
                tracing::info!(total_pages, "Catalog page count");
            }

            let saiyans: Vec<ExternalCharacter> = listing
                .items
                .into_iter()
                .filter(|c| is_mirrored_race(&c.race))
                .collect();
            tracing::debug!(page, count = saiyans.len(), "Saiyans on page");

            for character in saiyans {
                self.add_character(&mut batch, character).await;
            }

            page += 1;
            if page > total_pages {
                break;
            }
        }

        Ok(batch)
    }

    async fn add_character(&self, batch: &mut SyncBatch, character: ExternalCharacter) {
        if needs_detail(&character.affiliation) {
            tracing::debug!(
                character_id = character.id,
                name = %character.name,
                "Fetching detail for Z Fighter",
            );
            match self.source.get_by_id(character.id).await {
                Some(detail) if !detail.transformations.is_empty() => {
                    tracing::debug!(
                        character_id = character.id,
                        count = detail.transformations.len(),
                        "Transformations found",
                    );
                    batch
                        .transformations
                        .extend(detail.transformations.into_iter().map(|t| NewTransformation {
                            id: t.id,
                            name: t.name,
                            ki: t.ki,
                            character_id: character.id,
                        }));
                }
                _ => {
                    tracing::debug!(character_id = character.id, "No transformations found");
                }
            }
        }

        batch.characters.push(NewCharacter {
            id: character.id,
            name: character.name,
            ki: character.ki,
            race: character.race,
            gender: character.gender,
            description: character.description,
            affiliation: character.affiliation,
        });
    }

    async fn persist(&self, batch: &SyncBatch) -> Result<(), SyncError> {
        for c in &batch.characters {
            c.check().map_err(|e| failed(Stage::Validation, e))?;
        }
        for t in &batch.transformations {
            t.check().map_err(|e| failed(Stage::Validation, e))?;
        }

        tracing::info!(
            characters = batch.characters.len(),
            transformations = batch.transformations.len(),
            "Saving catalog rows",
        );
        self.store
            .insert_all(&batch.characters, &batch.transformations)
            .await
            .map_err(|e| failed(Stage::Write, e))
    }
}

/// Where a run failed outside the catalog.
#[derive(Debug, Clone, Copy)]
enum Stage {
    EmptinessCheck,
    Validation,
    Write,
}

impl Stage {
    fn as_str(self) -> &'static str {
        match self {
            Stage::EmptinessCheck => "checking whether the store is empty",
            Stage::Validation => "checking rows against column limits",
            Stage::Write => "writing rows",
        }
    }
}

fn failed(stage: Stage, err: impl fmt::Display) -> SyncError {
    tracing::error!(stage = stage.as_str(), error = %err, "Synchronization failed");
    SyncError::Persistence(err.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex as StdMutex};

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use dbz_catalog::models::{CatalogPage, ExternalTransformation, PageMeta};
    use dbz_core::types::DbId;
    use tokio::sync::Notify;

    use super::*;

    // -----------------------------------------------------------------------
    // Fakes
    // -----------------------------------------------------------------------

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Page(u32),
        Detail(DbId),
    }

    /// Catalog double. A page mapped to `None` fails; unmapped pages fail too.
    #[derive(Default)]
    struct FakeSource {
        pages: HashMap<u32, Option<CatalogPage>>,
        details: HashMap<DbId, ExternalCharacter>,
        calls: Arc<StdMutex<Vec<Call>>>,
        gate: Option<(Arc<Notify>, Arc<Notify>)>,
    }

    #[async_trait]
    impl CatalogSource for FakeSource {
        async fn list_page(&self, page: u32, _limit: u32) -> Option<CatalogPage> {
            self.calls.lock().unwrap().push(Call::Page(page));
            if let Some((entered, release)) = &self.gate {
                entered.notify_one();
                release.notified().await;
            }
            self.pages.get(&page).cloned().flatten()
        }

        async fn get_by_id(&self, id: DbId) -> Option<ExternalCharacter> {
            self.calls.lock().unwrap().push(Call::Detail(id));
            self.details.get(&id).cloned()
        }
    }

    #[derive(Default)]
    struct Stored {
        characters: Vec<NewCharacter>,
        transformations: Vec<NewTransformation>,
        insert_calls: usize,
    }

    #[derive(Default)]
    struct FakeStore {
        rows: Arc<StdMutex<Stored>>,
        fail_read: bool,
        fail_insert: bool,
    }

    #[async_trait]
    impl SyncStore for FakeStore {
        async fn has_characters(&self) -> Result<bool, sqlx::Error> {
            if self.fail_read {
                return Err(sqlx::Error::PoolTimedOut);
            }
            Ok(!self.rows.lock().unwrap().characters.is_empty())
        }

        async fn has_transformations(&self) -> Result<bool, sqlx::Error> {
            Ok(!self.rows.lock().unwrap().transformations.is_empty())
        }

        async fn insert_all(
            &self,
            characters: &[NewCharacter],
            transformations: &[NewTransformation],
        ) -> Result<(), sqlx::Error> {
            let mut rows = self.rows.lock().unwrap();
            rows.insert_calls += 1;
            if self.fail_insert {
                return Err(sqlx::Error::Protocol("connection reset".into()));
            }
            rows.characters.extend_from_slice(characters);
            rows.transformations.extend_from_slice(transformations);
            Ok(())
        }
    }

    fn character(id: DbId, name: &str, race: &str, affiliation: &str) -> ExternalCharacter {
        ExternalCharacter {
            id,
            name: name.into(),
            ki: Some("1.000".into()),
            race: race.into(),
            gender: "Male".into(),
            description: format!("{name} description"),
            affiliation: affiliation.into(),
            transformations: vec![],
        }
    }

    fn transformation(id: DbId, name: &str) -> ExternalTransformation {
        ExternalTransformation {
            id,
            name: name.into(),
            ki: Some("3 Billion".into()),
        }
    }

    fn page(items: Vec<ExternalCharacter>, total_pages: u32) -> Option<CatalogPage> {
        Some(CatalogPage {
            items,
            meta: PageMeta {
                total_pages,
                ..PageMeta::default()
            },
            ..CatalogPage::default()
        })
    }

    fn goku_detail() -> ExternalCharacter {
        let mut goku = character(1, "Goku", "Saiyan", "Z Fighter");
        goku.transformations = vec![transformation(10, "Goku SSJ"), transformation(11, "Goku SSJ2")];
        goku
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn saves_z_fighter_saiyan_with_transformations() {
        let source = FakeSource {
            pages: HashMap::from([(1, page(vec![character(1, "Goku", "Saiyan", "Z Fighter")], 1))]),
            details: HashMap::from([(1, goku_detail())]),
            ..FakeSource::default()
        };
        let store = FakeStore::default();
        let rows = Arc::clone(&store.rows);

        let report = Synchronizer::new(source, store).synchronize().await.unwrap();

        assert_eq!(
            report,
            SyncReport::Saved {
                characters: 1,
                transformations: 2
            }
        );
        let rows = rows.lock().unwrap();
        assert_eq!(rows.characters.len(), 1);
        assert_eq!(rows.transformations.len(), 2);
        assert!(rows.transformations.iter().all(|t| t.character_id == 1));
        assert_eq!(rows.insert_calls, 1);
    }

    #[tokio::test]
    async fn non_empty_store_is_rejected_without_calling_source() {
        let source = FakeSource::default();
        let calls = Arc::clone(&source.calls);
        let store = FakeStore::default();
        store.rows.lock().unwrap().transformations.push(NewTransformation {
            id: 1,
            name: "Leftover".into(),
            ki: None,
            character_id: 1,
        });

        let result = Synchronizer::new(source, store).synchronize().await;

        assert_matches!(result, Err(SyncError::StoreNotEmpty));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failure_on_later_page_persists_nothing() {
        let source = FakeSource {
            pages: HashMap::from([
                (1, page(vec![character(4, "Vegeta", "Saiyan", "Z Fighter")], 3)),
                (2, None),
                (3, page(vec![character(5, "Gohan", "Saiyan", "Z Fighter")], 3)),
            ]),
            ..FakeSource::default()
        };
        let calls = Arc::clone(&source.calls);
        let store = FakeStore::default();
        let rows = Arc::clone(&store.rows);

        let result = Synchronizer::new(source, store).synchronize().await;

        let err = result.unwrap_err();
        assert_matches!(err, SyncError::SourceUnavailable { page: 2 });
        assert_eq!(
            err.to_string(),
            "Error fetching data from external API on page 2."
        );
        let rows = rows.lock().unwrap();
        assert_eq!(rows.insert_calls, 0);
        assert!(rows.characters.is_empty());
        assert!(!calls.lock().unwrap().contains(&Call::Page(3)));
    }

    #[tokio::test]
    async fn race_filter_ignores_case() {
        let source = FakeSource {
            pages: HashMap::from([(
                1,
                page(
                    vec![
                        character(1, "Goku", "saiyan", "Other"),
                        character(2, "Piccolo", "Namekian", "Z Fighter"),
                        character(3, "Bardock", "SAIYAN", "Other"),
                    ],
                    1,
                ),
            )]),
            ..FakeSource::default()
        };
        let calls = Arc::clone(&source.calls);
        let store = FakeStore::default();
        let rows = Arc::clone(&store.rows);

        let report = Synchronizer::new(source, store).synchronize().await.unwrap();

        assert_eq!(
            report,
            SyncReport::Saved {
                characters: 2,
                transformations: 0
            }
        );
        let ids: Vec<_> = rows.lock().unwrap().characters.iter().map(|c| c.id).collect();
        assert_eq!(ids, [1, 3]);
        // Piccolo is a Z Fighter but not a Saiyan, so no detail lookup happens.
        assert!(!calls.lock().unwrap().contains(&Call::Detail(2)));
    }

    #[tokio::test]
    async fn missing_detail_still_saves_character() {
        let source = FakeSource {
            pages: HashMap::from([(1, page(vec![character(1, "Goku", "Saiyan", "z fighter")], 1))]),
            ..FakeSource::default()
        };
        let calls = Arc::clone(&source.calls);
        let store = FakeStore::default();
        let rows = Arc::clone(&store.rows);

        let report = Synchronizer::new(source, store).synchronize().await.unwrap();

        assert_eq!(
            report,
            SyncReport::Saved {
                characters: 1,
                transformations: 0
            }
        );
        assert_eq!(rows.lock().unwrap().characters.len(), 1);
        assert_eq!(*calls.lock().unwrap(), [Call::Page(1), Call::Detail(1)]);
    }

    #[tokio::test]
    async fn non_z_fighters_skip_detail_lookup() {
        let source = FakeSource {
            pages: HashMap::from([(1, page(vec![character(7, "Raditz", "Saiyan", "Army of Frieza")], 1))]),
            ..FakeSource::default()
        };
        let calls = Arc::clone(&source.calls);

        Synchronizer::new(source, FakeStore::default())
            .synchronize()
            .await
            .unwrap();

        assert_eq!(*calls.lock().unwrap(), [Call::Page(1)]);
    }

    #[tokio::test]
    async fn fetches_every_page_in_order() {
        let source = FakeSource {
            pages: HashMap::from([
                (1, page(vec![character(1, "Goku", "Saiyan", "Other")], 3)),
                (2, page(vec![], 3)),
                (3, page(vec![character(9, "Kale", "Saiyan", "Other")], 3)),
            ]),
            ..FakeSource::default()
        };
        let calls = Arc::clone(&source.calls);
        let store = FakeStore::default();
        let rows = Arc::clone(&store.rows);

        Synchronizer::new(source, store).synchronize().await.unwrap();

        assert_eq!(
            *calls.lock().unwrap(),
            [Call::Page(1), Call::Page(2), Call::Page(3)]
        );
        assert_eq!(rows.lock().unwrap().characters.len(), 2);
    }

    #[tokio::test]
    async fn no_saiyans_leaves_store_untouched() {
        let source = FakeSource {
            pages: HashMap::from([(1, page(vec![character(2, "Piccolo", "Namekian", "Z Fighter")], 1))]),
            ..FakeSource::default()
        };
        let store = FakeStore::default();
        let rows = Arc::clone(&store.rows);

        let report = Synchronizer::new(source, store).synchronize().await.unwrap();

        assert_eq!(report, SyncReport::NothingToSave);
        assert_eq!(
            report.to_string(),
            "Synchronization complete. No Saiyans or relevant transformations found to save."
        );
        assert_eq!(rows.lock().unwrap().insert_calls, 0);
    }

    #[tokio::test]
    async fn zero_total_pages_stops_after_first_page() {
        let source = FakeSource {
            pages: HashMap::from([(1, page(vec![], 0))]),
            ..FakeSource::default()
        };
        let calls = Arc::clone(&source.calls);

        let report = Synchronizer::new(source, FakeStore::default())
            .synchronize()
            .await
            .unwrap();

        assert_eq!(report, SyncReport::NothingToSave);
        assert_eq!(*calls.lock().unwrap(), [Call::Page(1)]);
    }

    #[tokio::test]
    async fn insert_failure_reports_message() {
        let source = FakeSource {
            pages: HashMap::from([(1, page(vec![character(1, "Goku", "Saiyan", "Other")], 1))]),
            ..FakeSource::default()
        };
        let store = FakeStore {
            fail_insert: true,
            ..FakeStore::default()
        };

        let err = Synchronizer::new(source, store)
            .synchronize()
            .await
            .unwrap_err();

        assert_matches!(err, SyncError::Persistence(ref msg) if msg.contains("connection reset"));
        assert!(err
            .to_string()
            .starts_with("An error occurred during synchronization: "));
    }

    #[tokio::test]
    async fn store_read_failure_stops_before_fetching() {
        let source = FakeSource {
            pages: HashMap::from([(1, page(vec![character(1, "Goku", "Saiyan", "Other")], 1))]),
            ..FakeSource::default()
        };
        let calls = Arc::clone(&source.calls);
        let store = FakeStore {
            fail_read: true,
            ..FakeStore::default()
        };
        let rows = Arc::clone(&store.rows);

        let err = Synchronizer::new(source, store)
            .synchronize()
            .await
            .unwrap_err();

        assert_matches!(err, SyncError::Persistence(ref msg) if msg.contains("timed out"));
        assert!(calls.lock().unwrap().is_empty());
        assert_eq!(rows.lock().unwrap().insert_calls, 0);
    }

    #[tokio::test]
    async fn overlong_field_fails_before_writing() {
        let mut long = character(1, "Goku", "Saiyan", "Other");
        long.gender = "G".repeat(21);
        let source = FakeSource {
            pages: HashMap::from([(1, page(vec![long], 1))]),
            ..FakeSource::default()
        };
        let store = FakeStore::default();
        let rows = Arc::clone(&store.rows);

        let result = Synchronizer::new(source, store).synchronize().await;

        assert_matches!(
            result,
            Err(SyncError::Persistence(ref msg)) if msg.contains("character 1")
        );
        assert_eq!(rows.lock().unwrap().insert_calls, 0);
    }

    #[test]
    fn page_limit_is_clamped_to_one() {
        let sync = Synchronizer::new(FakeSource::default(), FakeStore::default()).with_page_limit(0);
        assert_eq!(sync.page_limit, 1);
    }

    #[tokio::test]
    async fn concurrent_run_is_rejected() {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let source = FakeSource {
            pages: HashMap::from([(1, page(vec![character(1, "Goku", "Saiyan", "Other")], 1))]),
            gate: Some((Arc::clone(&entered), Arc::clone(&release))),
            ..FakeSource::default()
        };
        let store = FakeStore::default();
        let rows = Arc::clone(&store.rows);
        let sync = Arc::new(Synchronizer::new(source, store));

        let first = tokio::spawn({
            let sync = Arc::clone(&sync);
            async move { sync.synchronize().await }
        });
        entered.notified().await;

        assert_matches!(sync.synchronize().await, Err(SyncError::AlreadyRunning));

        release.notify_one();
        let report = first.await.unwrap().unwrap();
        assert_eq!(
            report,
            SyncReport::Saved {
                characters: 1,
                transformations: 0
            }
        );
        assert_eq!(rows.lock().unwrap().insert_calls, 1);
    }
}
