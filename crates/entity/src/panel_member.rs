use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An office bearer / executive panel entry.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "panel_members")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    pub designation: String,

    pub district: Option<String>,

    pub photo_url: Option<String>,

    /// Sort key for the public listing, ascending.
    pub display_order: i32,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
