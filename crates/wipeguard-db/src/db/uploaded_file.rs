use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;
use wipeguard_core::models::{
    NewUploadedFile, RiskLevel, UploadedFile, WipeOutcome, WipeStatus, WipeType,
};
use wipeguard_core::AppError;

/// File records of wipe sessions. Postgres in production, in-memory in tests.
#[async_trait::async_trait]
pub trait UploadedFileRepositoryTrait: Send + Sync {
    async fn insert(&self, file: NewUploadedFile) -> Result<UploadedFile, AppError>;

    /// All files of a session in upload order.
    async fn list_by_session(&self, session_id: &str) -> Result<Vec<UploadedFile>, AppError>;

    /// Store the classifier result. An already stored label is kept, and the returned row
    /// carries whichever label is now persisted.
    async fn record_scan(&self, id: Uuid, risk_level: RiskLevel)
        -> Result<UploadedFile, AppError>;

    /// Scanned files of a session whose blob has not been wiped successfully yet, in upload
    /// order.
    async fn list_wipe_candidates(&self, session_id: &str)
        -> Result<Vec<UploadedFile>, AppError>;

    async fn record_wipe(&self, id: Uuid, outcome: &WipeOutcome) -> Result<(), AppError>;

    /// Delete metadata rows of successfully wiped files. Returns the number of rows removed.
    async fn purge_wiped(&self, session_id: &str) -> Result<u64, AppError>;

    async fn health_check(&self) -> Result<(), AppError>;
}

#[derive(sqlx::FromRow)]
struct UploadedFileRow {
    id: Uuid,
    session_id: String,
    file_name: String,
    file_path: String,
    file_size: i64,
    content_type: String,
    upload_timestamp: DateTime<Utc>,
    risk_level: Option<RiskLevel>,
    scan_timestamp: Option<DateTime<Utc>>,
    scan_completed: bool,
    wipe_completed: bool,
    wipe_timestamp: Option<DateTime<Utc>>,
    wipe_type: Option<WipeType>,
    wipe_status: Option<WipeStatus>,
    wipe_error: Option<String>,
}

impl From<UploadedFileRow> for UploadedFile {
    fn from(row: UploadedFileRow) -> Self {
        UploadedFile {
            id: row.id,
            session_id: row.session_id,
            file_name: row.file_name,
            file_path: row.file_path,
            file_size: row.file_size,
            content_type: row.content_type,
            upload_timestamp: row.upload_timestamp,
            risk_level: row.risk_level,
            scan_timestamp: row.scan_timestamp,
            scan_completed: row.scan_completed,
            wipe_completed: row.wipe_completed,
            wipe_timestamp: row.wipe_timestamp,
            wipe_type: row.wipe_type,
            wipe_status: row.wipe_status,
            wipe_error: row.wipe_error,
        }
    }
}

#[derive(Clone)]
pub struct PostgresUploadedFileRepository {
    pool: PgPool,
}

impl PostgresUploadedFileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

pub type UploadedFileRepository = PostgresUploadedFileRepository;

#[async_trait::async_trait]
impl UploadedFileRepositoryTrait for PostgresUploadedFileRepository {
    #[tracing::instrument(skip(self, file), fields(
        db.system = "postgresql",
        db.table = "uploaded_files",
        db.operation = "insert",
        session_id = %file.session_id
    ))]
    async fn insert(&self, file: NewUploadedFile) -> Result<UploadedFile, AppError> {
        let row = sqlx::query_as::<Postgres, UploadedFileRow>(
            r#"
            INSERT INTO uploaded_files (session_id, file_name, file_path, file_size, content_type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, session_id, file_name, file_path, file_size, content_type,
                      upload_timestamp, risk_level, scan_timestamp, scan_completed,
                      wipe_completed, wipe_timestamp, wipe_type, wipe_status, wipe_error
            "#,
        )
        .bind(&file.session_id)
        .bind(&file.file_name)
        .bind(&file.file_path)
        .bind(file.file_size)
        .bind(&file.content_type)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(
                error = ?e,
                file_path = %file.file_path,
                "Failed to insert uploaded file"
            );
            e
        })?;

        Ok(row.into())
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "uploaded_files",
        db.operation = "select"
    ))]
    async fn list_by_session(&self, session_id: &str) -> Result<Vec<UploadedFile>, AppError> {
        let rows = sqlx::query_as::<Postgres, UploadedFileRow>(
            r#"
            SELECT id, session_id, file_name, file_path, file_size, content_type,
                   upload_timestamp, risk_level, scan_timestamp, scan_completed,
                   wipe_completed, wipe_timestamp, wipe_type, wipe_status, wipe_error
            FROM uploaded_files
            WHERE session_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UploadedFile::from).collect())
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "uploaded_files",
        db.operation = "update"
    ))]
    async fn record_scan(
        &self,
        id: Uuid,
        risk_level: RiskLevel,
    ) -> Result<UploadedFile, AppError> {
        let row = sqlx::query_as::<Postgres, UploadedFileRow>(
            r#"
            UPDATE uploaded_files
            SET risk_level = COALESCE(risk_level, $2),
                scan_timestamp = COALESCE(scan_timestamp, NOW()),
                scan_completed = TRUE
            WHERE id = $1
            RETURNING id, session_id, file_name, file_path, file_size, content_type,
                      upload_timestamp, risk_level, scan_timestamp, scan_completed,
                      wipe_completed, wipe_timestamp, wipe_type, wipe_status, wipe_error
            "#,
        )
        .bind(id)
        .bind(risk_level)
        .fetch_optional(&self.pool)
        .await?;

        row.map(UploadedFile::from)
            .ok_or_else(|| AppError::NotFound(format!("Uploaded file {} not found", id)))
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "uploaded_files",
        db.operation = "select"
    ))]
    async fn list_wipe_candidates(
        &self,
        session_id: &str,
    ) -> Result<Vec<UploadedFile>, AppError> {
        let rows = sqlx::query_as::<Postgres, UploadedFileRow>(
            r#"
            SELECT id, session_id, file_name, file_path, file_size, content_type,
                   upload_timestamp, risk_level, scan_timestamp, scan_completed,
                   wipe_completed, wipe_timestamp, wipe_type, wipe_status, wipe_error
            FROM uploaded_files
            WHERE session_id = $1
              AND scan_completed = TRUE
              AND wipe_status IS DISTINCT FROM 'success'
            ORDER BY seq ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UploadedFile::from).collect())
    }

    #[tracing::instrument(skip(self, outcome), fields(
        db.system = "postgresql",
        db.table = "uploaded_files",
        db.operation = "update",
        wipe_status = %outcome.status
    ))]
    async fn record_wipe(&self, id: Uuid, outcome: &WipeOutcome) -> Result<(), AppError> {
        let result = sqlx::query(
            r#"
            UPDATE uploaded_files
            SET wipe_completed = TRUE,
                wipe_timestamp = NOW(),
                wipe_type = $2,
                wipe_status = $3,
                wipe_error = $4
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(outcome.wipe_type)
        .bind(outcome.status)
        .bind(&outcome.error)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Uploaded file {} not found", id)));
        }

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "uploaded_files",
        db.operation = "delete"
    ))]
    async fn purge_wiped(&self, session_id: &str) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            DELETE FROM uploaded_files
            WHERE session_id = $1 AND wipe_status = 'success'
            "#,
        )
        .bind(session_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
