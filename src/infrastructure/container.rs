use std::sync::Arc;

use crate::{
    application::{
        ports::{FileStorage, GenerativeModel},
        services::ContentAnalyzer,
        use_cases::{
            GetAnalyticsUseCase, GetFileUseCase, ListFilesUseCase, SearchFilesUseCase,
            StatusCheckUseCase, UploadFileUseCase,
        },
    },
    domain::repositories::{FileRecordRepository, StatusCheckRepository},
    infrastructure::{
        config::AppConfig,
        database::{
            create_connection_pool, get_database_connection,
            repositories::{PostgresFileRecordRepository, PostgresStatusCheckRepository},
            run_migrations,
        },
        external_services::GeminiClient,
        file_system::LocalFileStorage,
        memory::{InMemoryFileRecordRepository, InMemoryStatusCheckRepository},
    },
    presentation::http::{
        HttpServer, ServerSettings,
        handlers::{AnalyticsHandler, FileHandler, SearchHandler, StatusHandler},
    },
};

/// Handlers wired over the configured adapters, ready to be served.
pub struct AppContainer {
    file_handler: Arc<FileHandler>,
    search_handler: Arc<SearchHandler>,
    analytics_handler: Arc<AnalyticsHandler>,
    status_handler: Arc<StatusHandler>,
    server_settings: ServerSettings,
}

impl AppContainer {
    pub async fn new(config: &AppConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let (file_repository, status_check_repository): (
            Arc<dyn FileRecordRepository>,
            Arc<dyn StatusCheckRepository>,
        ) = match &config.database_url {
            Some(database_url) => {
                let db_pool = create_connection_pool(database_url, config.db_pool_size)?;
                let mut conn = get_database_connection(database_url)
                    .map_err(|e| format!("Failed to create database connection: {}", e))?;
                run_migrations(&mut conn)
                    .map_err(|e| format!("Failed to run database migrations: {}", e))?;
                tracing::info!("Connected to PostgreSQL with a pool of {}", config.db_pool_size);

                let file_repository: Arc<dyn FileRecordRepository> =
                    Arc::new(PostgresFileRecordRepository::new(db_pool.clone()));
                let status_check_repository: Arc<dyn StatusCheckRepository> =
                    Arc::new(PostgresStatusCheckRepository::new(db_pool));
                (file_repository, status_check_repository)
            }
            None => {
                tracing::warn!("DATABASE_URL is not set, records are kept in memory only");
                let file_repository: Arc<dyn FileRecordRepository> =
                    Arc::new(InMemoryFileRecordRepository::new());
                let status_check_repository: Arc<dyn StatusCheckRepository> =
                    Arc::new(InMemoryStatusCheckRepository::new());
                (file_repository, status_check_repository)
            }
        };

        let local_storage = LocalFileStorage::new(config.upload_dir.clone());
        local_storage
            .ensure_directory_exists()
            .await
            .map_err(|e| format!("Failed to create upload directory: {}", e))?;
        tracing::info!("Storing uploads under {}", local_storage.base_path().display());
        let file_storage: Arc<dyn FileStorage> = Arc::new(local_storage);

        if config.gemini.api_key.is_none() {
            tracing::warn!("GEMINI_API_KEY is not set, uploads will be stored without AI analysis");
        }
        let generative_model: Arc<dyn GenerativeModel> =
            Arc::new(GeminiClient::new(config.gemini.clone())?);

        Ok(Self::with_components(
            file_repository,
            status_check_repository,
            file_storage,
            generative_model,
            ServerSettings::from(config),
        ))
    }

    /// Wires use cases and handlers on top of already built adapters.
    pub fn with_components(
        file_repository: Arc<dyn FileRecordRepository>,
        status_check_repository: Arc<dyn StatusCheckRepository>,
        file_storage: Arc<dyn FileStorage>,
        generative_model: Arc<dyn GenerativeModel>,
        server_settings: ServerSettings,
    ) -> Self {
        // Create application services
        let content_analyzer = Arc::new(ContentAnalyzer::new(generative_model));

        // Create use cases
        let upload_file_use_case = Arc::new(UploadFileUseCase::new(
            file_repository.clone(),
            file_storage,
            content_analyzer,
        ));
        let list_files_use_case = Arc::new(ListFilesUseCase::new(file_repository.clone()));
        let get_file_use_case = Arc::new(GetFileUseCase::new(file_repository.clone()));
        let search_files_use_case = Arc::new(SearchFilesUseCase::new(file_repository.clone()));
        let get_analytics_use_case = Arc::new(GetAnalyticsUseCase::new(file_repository));
        let status_check_use_case =
            Arc::new(StatusCheckUseCase::new(status_check_repository));

        // Create HTTP handlers
        let file_handler = Arc::new(FileHandler::new(
            upload_file_use_case,
            list_files_use_case,
            get_file_use_case,
        ));
        let search_handler = Arc::new(SearchHandler::new(search_files_use_case));
        let analytics_handler = Arc::new(AnalyticsHandler::new(get_analytics_use_case));
        let status_handler = Arc::new(StatusHandler::new(status_check_use_case));

        Self {
            file_handler,
            search_handler,
            analytics_handler,
            status_handler,
            server_settings,
        }
    }

    pub fn http_server(&self) -> HttpServer {
        HttpServer::new(
            self.file_handler.clone(),
            self.search_handler.clone(),
            self.analytics_handler.clone(),
            self.status_handler.clone(),
            self.server_settings.clone(),
        )
    }
}
