use diesel::prelude::*;
use diesel_async::{
    pooled_connection::{
        deadpool::{Object, Pool, PoolError},
        AsyncDieselConnectionManager, ManagerConfig,
    },
    AsyncPgConnection, RunQueryDsl,
};
use uuid::Uuid;

use crate::models::{CalendarEventRow, CalendarRow, UserRow};
use shared::models::{Calendar, CalendarEvent, DateRange};

pub type DbPool = Pool<AsyncPgConnection>;
pub type DbConnection = Object<AsyncPgConnection>;

async fn establish_tls_connection(config: String) -> diesel::ConnectionResult<AsyncPgConnection> {
    // Set up rustls TLS configuration
    let root_store =
        rustls::RootCertStore::from_iter(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());
    let tls_config = rustls::ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();
    let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);

    // Parse the connection string and connect with TLS
    let (client, connection) = tokio_postgres::connect(&config, tls)
        .await
        .map_err(|e| diesel::ConnectionError::BadConnection(e.to_string()))?;

    // Spawn the connection task
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            tracing::error!("Connection error: {}", e);
        }
    });

    // Build the async connection from the tokio-postgres client
    AsyncPgConnection::try_from(client).await
}

pub fn establish_connection_pool(database_url: &str) -> anyhow::Result<DbPool> {
    let mut manager_config = ManagerConfig::default();
    manager_config.custom_setup =
        Box::new(|url| Box::pin(establish_tls_connection(url.to_string())));

    let config = AsyncDieselConnectionManager::<AsyncPgConnection>::new_with_config(
        database_url,
        manager_config,
    );
    let pool = Pool::builder(config).build()?;

    Ok(pool)
}

pub async fn get_conn(pool: &DbPool) -> Result<DbConnection, PoolError> {
    pool.get().await
}

// User database operations
pub mod users {
    use super::*;

    pub async fn get_by_email(
        conn: &mut AsyncPgConnection,
        user_email: &str,
    ) -> anyhow::Result<Option<UserRow>> {
        use crate::schema::users::dsl::*;

        let user = users
            .filter(email.eq(user_email))
            .select(UserRow::as_select())
            .first::<UserRow>(conn)
            .await
            .optional()?;

        Ok(user)
    }

    pub async fn create(
        conn: &mut AsyncPgConnection,
        user_email: &str,
        display_name: Option<&str>,
    ) -> anyhow::Result<UserRow> {
        use crate::schema::users::dsl::*;

        let new_user = diesel::insert_into(users)
            .values((email.eq(user_email), name.eq(display_name)))
            .get_result::<UserRow>(conn)
            .await?;

        Ok(new_user)
    }
}

// Calendar database operations
pub mod calendars {
    use super::*;

    pub async fn list_for_user(
        conn: &mut AsyncPgConnection,
        owner_id: Uuid,
    ) -> anyhow::Result<Vec<Calendar>> {
        use crate::schema::calendars::dsl::*;

        let rows = calendars
            .filter(user_id.eq(owner_id))
            .order_by(name.asc())
            .select(CalendarRow::as_select())
            .load::<CalendarRow>(conn)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// Calendar event database operations
pub mod events {
    use super::*;

    /// Events for the given calendars that overlap the window.
    ///
    /// An event overlaps when it starts before the exclusive end bound and
    /// ends at or after the start bound, so multi-day events spanning the
    /// window edges are included.
    pub async fn list_in_range(
        conn: &mut AsyncPgConnection,
        owner_id: Uuid,
        ids: &[Uuid],
        window: DateRange,
    ) -> anyhow::Result<Vec<CalendarEvent>> {
        use crate::schema::calendar_events::dsl::*;

        if ids.is_empty() {
            return Ok(vec![]);
        }

        let rows = calendar_events
            .filter(user_id.eq(owner_id))
            .filter(calendar_id.eq_any(ids))
            .filter(start_date.lt(window.end_utc_exclusive()))
            .filter(end_date.ge(window.start_utc()))
            .order_by(start_date.asc())
            .select(CalendarEventRow::as_select())
            .load::<CalendarEventRow>(conn)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}
