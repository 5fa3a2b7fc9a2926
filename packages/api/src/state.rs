//! Process-wide server state, initialized lazily and shared for the process
//! lifetime (OnceCell pattern).
//!
//! The credential store is the one shared *mutable* resource and sits behind
//! an `RwLock`. The classifier and label tables are loaded once and never
//! mutated afterwards, so they are handed out as plain shared references.

use std::path::PathBuf;

use tokio::sync::{OnceCell, RwLock};

use model::{Classifier, LabelTables};
use store::UserStore;

static USERS: OnceCell<RwLock<UserStore>> = OnceCell::const_new();
static ENGINE: OnceCell<Engine> = OnceCell::const_new();

/// Read-only inference state: the loaded (or degraded) classifier plus the
/// class-index lookup tables.
pub struct Engine {
    pub classifier: Classifier,
    pub tables: LabelTables,
}

/// Base directory for the credential file, label tables and model artifacts.
/// `CROPSENSE_DATA_DIR` overrides the default `data/`.
pub fn data_dir() -> PathBuf {
    dotenvy::dotenv().ok();
    std::env::var("CROPSENSE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

/// Get or initialize the shared credential store.
pub async fn users() -> &'static RwLock<UserStore> {
    USERS
        .get_or_init(|| async {
            let path = data_dir().join("users.json");
            RwLock::new(UserStore::open(path))
        })
        .await
}

/// Get or initialize the classifier and label tables. Model loading blocks,
/// so it runs on the blocking pool.
pub async fn engine() -> &'static Engine {
    ENGINE
        .get_or_init(|| async {
            let dir = data_dir();
            tokio::task::spawn_blocking(move || {
                let tables = LabelTables::load(
                    &dir.join("class_indices.json"),
                    &dir.join("disease_info.json"),
                );
                tracing::info!("label tables loaded with {} class(es)", tables.class_count());
                let classifier = Classifier::load(&dir);
                Engine { classifier, tables }
            })
            .await
            .expect("classifier loading task panicked")
        })
        .await
}
