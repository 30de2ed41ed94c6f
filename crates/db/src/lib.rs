use std::time::Duration;

use db_migration::Migrator;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

pub mod entities;
pub mod models;

pub use sea_orm::DbErr;

#[derive(Clone)]
pub struct DBService {
    pub pool: DatabaseConnection,
}

impl DBService {
    /// Connects to `database_url` and brings the schema up to date. For
    /// SQLite file databases pass `?mode=rwc` so the file is created on
    /// first run.
    pub async fn new(database_url: &str) -> Result<DBService, DbErr> {
        let mut options = ConnectOptions::new(database_url.to_owned());
        options
            .max_connections(5)
            .connect_timeout(Duration::from_secs(8))
            .sqlx_logging(false);
        let pool = Database::connect(options).await?;
        Migrator::up(&pool, None).await?;
        Ok(DBService { pool })
    }

    pub async fn close(self) -> Result<(), DbErr> {
        self.pool.close().await
    }
}
