use sea_orm::entity::prelude::*;

/// Directed subscription edge: `subscriber_id` follows `channel_id`.
///
/// The composite primary key is the uniqueness constraint the toggle
/// operation relies on — at most one edge per ordered pair.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscriptions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub subscriber_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub channel_id: Uuid,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::SubscriberId",
        to = "super::users::Column::Id"
    )]
    Subscriber,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ChannelId",
        to = "super::users::Column::Id"
    )]
    Channel,
}

impl ActiveModelBehavior for ActiveModel {}
