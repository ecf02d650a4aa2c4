//! Event and attendance storage backed by `PostgreSQL`.

use chrono::{DateTime, Utc};
use eventmaker_core::code::EventCode;
use eventmaker_core::repository::{
    EventRepository, JoinOutcome, RepositoryError, RepositoryFuture,
};
use eventmaker_core::types::{
    Attendance, AttendanceCount, AttendanceId, AttendanceStatus, Event, EventDetails, EventId,
    NewEvent, UserId, UserSummary,
};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

/// Name of the unique constraint on `events.code`.
const EVENT_CODE_CONSTRAINT: &str = "events_code_key";

const EVENT_COLUMNS: &str = "id, title, description, location, start_date, end_date, \
     capacity, is_public, code, creator_id, created_at, updated_at";

const ATTENDANCE_COLUMNS: &str = "id, event_id, user_id, status, created_at, updated_at";

/// `PostgreSQL` event repository.
#[derive(Clone, Debug)]
pub struct PostgresEventRepository {
    pool: PgPool,
}

impl PostgresEventRepository {
    /// Wrap an existing connection pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Borrow the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    fn row_to_event(row: &PgRow) -> Result<Event, RepositoryError> {
        Ok(Event {
            id: EventId(row.try_get("id").map_err(decode_error)?),
            title: row.try_get("title").map_err(decode_error)?,
            description: row.try_get("description").map_err(decode_error)?,
            location: row.try_get("location").map_err(decode_error)?,
            start_date: row.try_get("start_date").map_err(decode_error)?,
            end_date: row.try_get("end_date").map_err(decode_error)?,
            capacity: row.try_get("capacity").map_err(decode_error)?,
            is_public: row.try_get("is_public").map_err(decode_error)?,
            code: EventCode::from_trusted(row.try_get("code").map_err(decode_error)?),
            creator_id: UserId(row.try_get("creator_id").map_err(decode_error)?),
            created_at: row.try_get("created_at").map_err(decode_error)?,
            updated_at: row.try_get("updated_at").map_err(decode_error)?,
        })
    }

    fn row_to_attendance(row: &PgRow) -> Result<Attendance, RepositoryError> {
        let status: String = row.try_get("status").map_err(decode_error)?;
        Ok(Attendance {
            id: AttendanceId(row.try_get("id").map_err(decode_error)?),
            event_id: EventId(row.try_get("event_id").map_err(decode_error)?),
            user_id: UserId(row.try_get("user_id").map_err(decode_error)?),
            status: status
                .parse::<AttendanceStatus>()
                .map_err(RepositoryError::Database)?,
            created_at: row.try_get("created_at").map_err(decode_error)?,
            updated_at: row.try_get("updated_at").map_err(decode_error)?,
        })
    }
}

fn decode_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::Database(format!("Failed to decode row: {e}"))
}

fn query_error(context: &str, e: &sqlx::Error) -> RepositoryError {
    RepositoryError::Database(format!("{context}: {e}"))
}

impl EventRepository for PostgresEventRepository {
    fn find_user_by_email<'a>(
        &'a self,
        email: &'a str,
    ) -> RepositoryFuture<'a, Option<UserSummary>> {
        Box::pin(async move {
            let row = sqlx::query("SELECT id, email, name FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| query_error("Failed to load user", &e))?;

            row.map(|row| -> Result<UserSummary, RepositoryError> {
                Ok(UserSummary {
                    id: UserId(row.try_get("id").map_err(decode_error)?),
                    email: row.try_get("email").map_err(decode_error)?,
                    name: row.try_get("name").map_err(decode_error)?,
                })
            })
            .transpose()
        })
    }

    fn insert_event(&self, event: NewEvent) -> RepositoryFuture<'_, Event> {
        Box::pin(async move {
            let sql = format!(
                "INSERT INTO events ({EVENT_COLUMNS}) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11) \
                 RETURNING {EVENT_COLUMNS}"
            );
            let result = sqlx::query(&sql)
                .bind(event.id.0)
                .bind(&event.title)
                .bind(&event.description)
                .bind(&event.location)
                .bind(event.start_date)
                .bind(event.end_date)
                .bind(event.capacity)
                .bind(event.is_public)
                .bind(event.code.as_str())
                .bind(event.creator_id.0)
                .bind(event.created_at)
                .fetch_one(&self.pool)
                .await;

            match result {
                Ok(row) => Self::row_to_event(&row),
                Err(sqlx::Error::Database(db_err))
                    if db_err.is_unique_violation()
                        && db_err.constraint() == Some(EVENT_CODE_CONSTRAINT) =>
                {
                    Err(RepositoryError::DuplicateCode(event.code))
                }
                Err(e) => Err(query_error("Failed to insert event", &e)),
            }
        })
    }

    fn find_event_details_by_code<'a>(
        &'a self,
        code: &'a EventCode,
    ) -> RepositoryFuture<'a, Option<EventDetails>> {
        Box::pin(async move {
            let row = sqlx::query(
                r"
                SELECT
                    e.id, e.title, e.description, e.location, e.start_date, e.end_date,
                    e.is_public, e.code, e.capacity, e.created_at,
                    u.id AS creator_id, u.email AS creator_email, u.name AS creator_name,
                    (SELECT COUNT(*) FROM attendances a WHERE a.event_id = e.id) AS attendances
                FROM events e
                JOIN users u ON u.id = e.creator_id
                WHERE e.code = $1
                ",
            )
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| query_error("Failed to load event by code", &e))?;

            let Some(row) = row else {
                return Ok(None);
            };

            Ok(Some(EventDetails {
                id: EventId(row.try_get("id").map_err(decode_error)?),
                title: row.try_get("title").map_err(decode_error)?,
                description: row.try_get("description").map_err(decode_error)?,
                location: row.try_get("location").map_err(decode_error)?,
                start_date: row.try_get("start_date").map_err(decode_error)?,
                end_date: row.try_get("end_date").map_err(decode_error)?,
                is_public: row.try_get("is_public").map_err(decode_error)?,
                code: EventCode::from_trusted(row.try_get("code").map_err(decode_error)?),
                capacity: row.try_get("capacity").map_err(decode_error)?,
                created_at: row.try_get("created_at").map_err(decode_error)?,
                creator: UserSummary {
                    id: UserId(row.try_get("creator_id").map_err(decode_error)?),
                    email: row.try_get("creator_email").map_err(decode_error)?,
                    name: row.try_get("creator_name").map_err(decode_error)?,
                },
                count: AttendanceCount {
                    attendances: row.try_get("attendances").map_err(decode_error)?,
                },
            }))
        })
    }

    fn join_event(
        &self,
        event_id: EventId,
        user_id: UserId,
        now: DateTime<Utc>,
    ) -> RepositoryFuture<'_, JoinOutcome> {
        Box::pin(async move {
            // The event row lock serializes concurrent joins, so the count
            // read below stays valid until commit.
            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| query_error("Failed to start transaction", &e))?;

            let locked = sqlx::query("SELECT capacity FROM events WHERE id = $1 FOR UPDATE")
                .bind(event_id.0)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| query_error("Failed to lock event", &e))?;

            let Some(locked) = locked else {
                let _ = tx.rollback().await;
                return Ok(JoinOutcome::EventNotFound);
            };
            let capacity: Option<i32> = locked.try_get("capacity").map_err(decode_error)?;

            let (attendees,): (i64,) =
                sqlx::query_as("SELECT COUNT(*) FROM attendances WHERE event_id = $1")
                    .bind(event_id.0)
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| query_error("Failed to count attendances", &e))?;

            if capacity.is_some_and(|capacity| attendees >= i64::from(capacity)) {
                let _ = tx.rollback().await;
                return Ok(JoinOutcome::AtCapacity);
            }

            let (exists,): (bool,) = sqlx::query_as(
                "SELECT EXISTS(SELECT 1 FROM attendances WHERE event_id = $1 AND user_id = $2)",
            )
            .bind(event_id.0)
            .bind(user_id.0)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| query_error("Failed to check attendance", &e))?;

            if exists {
                let _ = tx.rollback().await;
                return Ok(JoinOutcome::AlreadyJoined);
            }

            let attendance = Attendance::confirmed(event_id, user_id, now);
            let sql = format!(
                "INSERT INTO attendances ({ATTENDANCE_COLUMNS}) \
                 VALUES ($1, $2, $3, $4, $5, $5) \
                 ON CONFLICT (event_id, user_id) DO NOTHING \
                 RETURNING {ATTENDANCE_COLUMNS}"
            );
            let inserted = sqlx::query(&sql)
                .bind(attendance.id.0)
                .bind(event_id.0)
                .bind(user_id.0)
                .bind(attendance.status.as_str())
                .bind(now)
                .fetch_optional(&mut *tx)
                .await
                .map_err(|e| query_error("Failed to insert attendance", &e))?;

            let Some(row) = inserted else {
                let _ = tx.rollback().await;
                return Ok(JoinOutcome::AlreadyJoined);
            };
            let attendance = Self::row_to_attendance(&row)?;

            tx.commit()
                .await
                .map_err(|e| query_error("Failed to commit join", &e))?;

            Ok(JoinOutcome::Joined(attendance))
        })
    }

    fn find_attendance(
        &self,
        event_id: EventId,
        user_id: UserId,
    ) -> RepositoryFuture<'_, Option<Attendance>> {
        Box::pin(async move {
            let sql = format!(
                "SELECT {ATTENDANCE_COLUMNS} FROM attendances WHERE event_id = $1 AND user_id = $2"
            );
            let row = sqlx::query(&sql)
                .bind(event_id.0)
                .bind(user_id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| query_error("Failed to load attendance", &e))?;

            row.as_ref().map(Self::row_to_attendance).transpose()
        })
    }
}
