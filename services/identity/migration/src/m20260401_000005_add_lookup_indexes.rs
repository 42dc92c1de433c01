use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The composite PK covers subscriber-side scans; channel-side scans
        // (subscriber listings, profile counts) need their own index.
        manager
            .create_index(
                Index::create()
                    .table(Subscriptions::Table)
                    .col(Subscriptions::ChannelId)
                    .name("idx_subscriptions_channel_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(WatchHistory::Table)
                    .col(WatchHistory::UserId)
                    .name("idx_watch_history_user_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Videos::Table)
                    .col(Videos::OwnerId)
                    .name("idx_videos_owner_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_videos_owner_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_watch_history_user_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_subscriptions_channel_id")
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum Subscriptions {
    Table,
    ChannelId,
}

#[derive(Iden)]
enum WatchHistory {
    Table,
    UserId,
}

#[derive(Iden)]
enum Videos {
    Table,
    OwnerId,
}
