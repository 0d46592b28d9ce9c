use sqlx::postgres::PgRow;
use sqlx::{Connection, Executor, PgConnection, Row};

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{IntakeRecord, NewIntakeRecord};

use super::credentials::CredentialSource;
use super::schema::{CREATE_TABLE_SQL, INSERT_SQL, SELECT_ALL_SQL};

/// Mediates all reads and writes against the intake table.
///
/// Holds one lazily established connection for the lifetime of the session.
/// A fatal transport error drops the cached connection, and the next
/// operation performs a fresh credential exchange; there is no retry loop
/// beyond that reconnect-on-demand.
pub struct RecordStore {
    database: DatabaseConfig,
    credentials: CredentialSource,
    conn: Option<PgConnection>,
    schema_ready: bool,
}

impl RecordStore {
    /// No I/O happens here; the connection is opened on first use.
    pub fn new(database: DatabaseConfig, credentials: CredentialSource) -> Self {
        Self {
            database,
            credentials,
            conn: None,
            schema_ready: false,
        }
    }

    /// Insert one intake record. `id` and `created_at` are assigned by the
    /// database; all field values are bound as statement parameters.
    pub async fn insert(&mut self, record: &NewIntakeRecord) -> Result<()> {
        self.ensure_schema().await?;

        let conn = self.connection().await?;
        let result = sqlx::query(INSERT_SQL)
            .bind(&record.full_name)
            .bind(&record.pet_id)
            .bind(record.date_of_birth)
            .bind(&record.phone)
            .bind(&record.email)
            .bind(&record.address)
            .bind(record.visit_date)
            .bind(&record.department)
            .bind(&record.symptoms)
            .bind(&record.allergies)
            .bind(&record.additional_notes)
            .execute(&mut *conn)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                self.invalidate_on_fatal(&err);
                Err(err.into())
            }
        }
    }

    /// Every record, most recent first. An empty table yields an empty Vec.
    pub async fn fetch_all(&mut self) -> Result<Vec<IntakeRecord>> {
        self.ensure_schema().await?;

        let conn = self.connection().await?;
        let rows = sqlx::query(SELECT_ALL_SQL).fetch_all(&mut *conn).await;

        let rows = match rows {
            Ok(rows) => rows,
            Err(err) => {
                self.invalidate_on_fatal(&err);
                return Err(err.into());
            }
        };

        rows.iter().map(record_from_row).collect()
    }

    /// Create the destination table if it does not exist yet. The DDL runs
    /// at most once per store; a poisoned transaction left over from an
    /// earlier failure is rolled back and the DDL retried once.
    pub async fn ensure_schema(&mut self) -> Result<()> {
        if self.schema_ready {
            return Ok(());
        }

        let conn = self.connection().await?;
        if let Err(first) = (&mut *conn).execute(CREATE_TABLE_SQL).await {
            tracing::warn!("Schema setup failed, rolling back and retrying: {first}");
            let _ = (&mut *conn).execute("ROLLBACK").await;

            if let Err(err) = (&mut *conn).execute(CREATE_TABLE_SQL).await {
                self.invalidate_on_fatal(&err);
                return Err(err.into());
            }
        }

        self.schema_ready = true;
        Ok(())
    }

    async fn connection(&mut self) -> Result<&mut PgConnection> {
        if self.conn.is_none() {
            let secret = self.credentials.resolve()?;
            let options = self.database.connect_options(&secret);

            tracing::debug!(
                host = %self.database.host,
                dbname = %self.database.dbname,
                "Connecting to database"
            );
            let conn = PgConnection::connect_with(&options).await?;
            self.conn = Some(conn);
        }

        Ok(self.conn.as_mut().expect("connection was just established"))
    }

    /// Drop the cached connection after errors that indicate the session is
    /// gone, so the next operation reconnects. The table itself persists
    /// server-side, so `schema_ready` stays set.
    fn invalidate_on_fatal(&mut self, err: &sqlx::Error) {
        if is_fatal(err) {
            tracing::warn!("Database connection lost: {err}");
            self.conn = None;
        }
    }
}

fn is_fatal(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Protocol(_)
            | sqlx::Error::WorkerCrashed
    )
}

fn record_from_row(row: &PgRow) -> Result<IntakeRecord> {
    Ok(IntakeRecord {
        id: row.try_get("id")?,
        full_name: row.try_get("full_name")?,
        pet_id: row.try_get("pet_id")?,
        date_of_birth: row.try_get("date_of_birth")?,
        phone: row.try_get("phone")?,
        email: row.try_get("email")?,
        address: row.try_get("address")?,
        visit_date: row.try_get("visit_date")?,
        department: row.try_get("department")?,
        symptoms: row.try_get("symptoms")?,
        allergies: row.try_get("allergies")?,
        additional_notes: row.try_get("additional_notes")?,
        created_at: row.try_get("created_at")?,
    })
}
