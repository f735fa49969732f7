//! `SQLite` implementation of [`LightStore`].

use std::future::Future;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use signalhub_app::ports::LightStore;
use signalhub_domain::address::Address;
use signalhub_domain::color::Color;
use signalhub_domain::durations::Durations;
use signalhub_domain::error::SignalHubError;
use signalhub_domain::light::{Mode, TrafficLight};

use crate::error::StorageError;

/// Raw `traffic_lights` row, decoded without interpretation.
struct Record {
    address: String,
    active_color: String,
    mode: String,
    red_secs: Option<f64>,
    yellow_secs: Option<f64>,
    green_secs: Option<f64>,
    next_change_at: Option<String>,
}

impl<'r> FromRow<'r, SqliteRow> for Record {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            address: row.try_get("address")?,
            active_color: row.try_get("active_color")?,
            mode: row.try_get("mode")?,
            red_secs: row.try_get("red_secs")?,
            yellow_secs: row.try_get("yellow_secs")?,
            green_secs: row.try_get("green_secs")?,
            next_change_at: row.try_get("next_change_at")?,
        })
    }
}

impl Record {
    /// Interpret the row, replacing damaged fields with safe values.
    ///
    /// Returns `None` only when the address itself is unusable.
    fn into_light(self) -> Option<TrafficLight> {
        let address = match Address::parse(&self.address) {
            Ok(address) => address,
            Err(err) => {
                tracing::warn!(%err, address = %self.address, "skipping stored light with invalid address");
                return None;
            }
        };

        let active_color = self.active_color.parse::<Color>().unwrap_or_else(|err| {
            tracing::warn!(%err, %address, "unknown stored color, using off");
            Color::Off
        });

        let mode = self.mode.parse::<Mode>().unwrap_or_else(|err| {
            tracing::warn!(%err, %address, "unknown stored mode, using manual");
            Mode::Manual
        });

        let durations =
            Durations::with_fallbacks(self.red_secs, self.yellow_secs, self.green_secs);
        let stored = [self.red_secs, self.yellow_secs, self.green_secs];
        if stored
            .iter()
            .any(|value| !value.is_some_and(|v| v.is_finite() && v > 0.0))
        {
            tracing::warn!(%address, ?stored, "invalid stored duration, using fallback");
        }

        let next_change_at = self.next_change_at.and_then(|value| {
            DateTime::parse_from_rfc3339(&value)
                .map(|at| at.with_timezone(&Utc))
                .inspect_err(|err| {
                    tracing::warn!(%err, %address, %value, "invalid stored deadline, dropping it");
                })
                .ok()
        });

        Some(TrafficLight {
            address,
            active_color,
            mode,
            durations,
            next_change_at,
        })
    }
}

const SELECT_ALL: &str = "SELECT * FROM traffic_lights ORDER BY address";
const DELETE_ALL: &str = "DELETE FROM traffic_lights";
const INSERT: &str = "INSERT INTO traffic_lights (address, active_color, mode, red_secs, yellow_secs, green_secs, next_change_at) VALUES (?, ?, ?, ?, ?, ?, ?)";

/// `SQLite`-backed light store.
#[derive(Clone)]
pub struct SqliteLightStore {
    pool: SqlitePool,
}

impl SqliteLightStore {
    /// Create a new store using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl LightStore for SqliteLightStore {
    fn load(&self) -> impl Future<Output = Result<Vec<TrafficLight>, SignalHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let rows: Vec<Record> = sqlx::query_as(SELECT_ALL)
                .fetch_all(&pool)
                .await
                .map_err(StorageError::from)?;

            Ok(rows.into_iter().filter_map(Record::into_light).collect())
        }
    }

    fn save(
        &self,
        lights: Vec<TrafficLight>,
    ) -> impl Future<Output = Result<(), SignalHubError>> + Send {
        let pool = self.pool.clone();
        async move {
            let mut tx = pool.begin().await.map_err(StorageError::from)?;

            sqlx::query(DELETE_ALL)
                .execute(&mut *tx)
                .await
                .map_err(StorageError::from)?;

            for light in &lights {
                sqlx::query(INSERT)
                    .bind(light.address.as_str())
                    .bind(light.active_color.as_str())
                    .bind(light.mode.as_str())
                    .bind(light.durations.red)
                    .bind(light.durations.yellow)
                    .bind(light.durations.green)
                    .bind(
                        light
                            .next_change_at
                            .map(|at| at.to_rfc3339_opts(SecondsFormat::Millis, true)),
                    )
                    .execute(&mut *tx)
                    .await
                    .map_err(StorageError::from)?;
            }

            tx.commit().await.map_err(StorageError::from)?;
            tracing::debug!(count = lights.len(), "traffic lights saved");
            Ok(())
        }
    }
}
