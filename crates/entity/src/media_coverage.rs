use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Press coverage of the association.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "media_coverages")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    /// Publication or channel name.
    pub outlet: String,

    pub article_url: Option<String>,

    pub image_url: Option<String>,

    pub published_on: Date,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
