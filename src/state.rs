use crate::i18n::Language;
use crate::progress::ProgressRepository;
use crate::storage::FileStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: FileStore,
    pub progress: Arc<Mutex<ProgressRepository<FileStore>>>,
    pub language: Arc<Mutex<Language>>,
}

impl AppState {
    pub fn new(store: FileStore, progress: ProgressRepository<FileStore>, language: Language) -> Self {
        Self {
            store,
            progress: Arc::new(Mutex::new(progress)),
            language: Arc::new(Mutex::new(language)),
        }
    }
}
