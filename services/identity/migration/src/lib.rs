use sea_orm_migration::prelude::*;

mod m20260401_000001_create_users;
mod m20260401_000002_create_videos;
mod m20260401_000003_create_subscriptions;
mod m20260401_000004_create_watch_history;
mod m20260401_000005_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260401_000001_create_users::Migration),
            Box::new(m20260401_000002_create_videos::Migration),
            Box::new(m20260401_000003_create_subscriptions::Migration),
            Box::new(m20260401_000004_create_watch_history::Migration),
            Box::new(m20260401_000005_add_lookup_indexes::Migration),
        ]
    }
}
