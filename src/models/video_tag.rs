//! Video tag entity model

use super::ml_output::Entity as MlOutput;
use sea_orm::ActiveModelBehavior;
use sea_orm::entity::prelude::*;
use sea_orm::prelude::DateTimeWithTimeZone;

/// A single tag string produced for an ML output
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "video_tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub video_tag: String,

    pub ml_output_id: String,

    pub tenant_id: String,

    pub created_at_utc: DateTimeWithTimeZone,

    pub updated_at_utc: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "MlOutput",
        from = "Column::MlOutputId",
        to = "super::ml_output::Column::Id"
    )]
    MlOutput,
}

impl Related<MlOutput> for Entity {
    fn to() -> RelationDef {
        Relation::MlOutput.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
