use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "rank_cooldown")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_discord_id: String,
    pub rank: String,
    pub cooldown_until: DateTimeUtc,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
