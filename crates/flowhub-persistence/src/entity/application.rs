//! `SeaORM` Entity for application table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "application")]
pub struct Model {
    /// Assigned by the submission workflow, never reassigned
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,
    pub team_id: i64,
    pub project_id: Option<i64>,
    pub job_name: Option<String>,
    /// Numeric deploy mode, see `model::DeployMode`
    pub deploy_mode: i32,
    /// Transient administrative-operation flag, see `model::OptionState`
    pub option_state: i32,
    pub k8s_namespace: Option<String>,
    pub k8s_cluster_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub k8s_pod_template: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub k8s_jm_pod_template: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub k8s_tm_pod_template: Option<String>,
    pub jm_memory: Option<i32>,
    pub tm_memory: Option<i32>,
    pub total_task: Option<i32>,
    pub total_tm: Option<i32>,
    pub total_slot: Option<i32>,
    pub available_slot: Option<i32>,
    pub gmt_create: DateTime,
    pub gmt_modified: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
