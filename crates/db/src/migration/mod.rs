//! Database migrations.

use sea_orm_migration::prelude::*;

mod m20260115_000001_initial;

/// Migration runner for all Tradewind migrations.
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20260115_000001_initial::Migration)]
    }
}
