//! SQL-based persistence backend (MySQL/PostgreSQL via SeaORM)
//!
//! This module implements the persistence traits with direct SeaORM queries
//! against the `application` table. The service is stateless; it holds only
//! the connection pool handle, and every operation is a bounded number of
//! single statements, so concurrent callers never observe a partially
//! applied write.

use async_trait::async_trait;
use sea_orm::{prelude::Expr, sea_query::Asterisk, *};

use flowhub_common::FlowhubError;

use crate::entity::application;
use crate::model::*;
use crate::traits::*;

/// External database persistence service
///
/// Wraps a SeaORM `DatabaseConnection` and implements all persistence traits
/// by delegating to direct database queries.
pub struct ExternalDbPersistService {
    db: DatabaseConnection,
}

impl ExternalDbPersistService {
    /// Create a new ExternalDbPersistService with the given database connection
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Get a reference to the underlying database connection
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Distinct non-empty values of one column, ordered by the latest
    /// modification of any row carrying that value.
    async fn recent_distinct_values(
        &self,
        select: Select<application::Entity>,
        column: application::Column,
        limit: i64,
    ) -> anyhow::Result<Vec<String>> {
        if limit <= 0 {
            return Ok(Vec::new());
        }
        let values = select
            .select_only()
            .column(column)
            .filter(column.is_not_null())
            .filter(column.ne(""))
            .group_by(column)
            .order_by(application::Column::GmtModified.max(), Order::Desc)
            .limit(limit as u64)
            .into_tuple::<String>()
            .all(&self.db)
            .await?;
        Ok(values)
    }
}

#[async_trait]
impl PersistenceService for ExternalDbPersistService {
    async fn health_check(&self) -> anyhow::Result<()> {
        application::Entity::find()
            .select_only()
            .column_as(Expr::cust("1"), "health")
            .into_tuple::<i32>()
            .one(&self.db)
            .await?;
        Ok(())
    }
}

/// Escape SQL wildcard characters and convert user wildcards to SQL LIKE pattern.
#[inline]
fn escape_sql_like_pattern(input: &str) -> String {
    input
        .replace('%', "\\%")
        .replace('_', "\\_")
        .replace('*', "%")
}

fn entity_to_info(model: application::Model) -> ApplicationInfo {
    ApplicationInfo {
        id: model.id,
        team_id: model.team_id,
        project_id: model.project_id,
        job_name: model.job_name.unwrap_or_default(),
        deploy_mode: model.deploy_mode,
        option_state: model.option_state,
        k8s_namespace: model.k8s_namespace.unwrap_or_default(),
        k8s_cluster_id: model.k8s_cluster_id.unwrap_or_default(),
        k8s_pod_template: model.k8s_pod_template.unwrap_or_default(),
        k8s_jm_pod_template: model.k8s_jm_pod_template.unwrap_or_default(),
        k8s_tm_pod_template: model.k8s_tm_pod_template.unwrap_or_default(),
        metrics: ApplicationMetrics {
            jm_memory: model.jm_memory.unwrap_or_default(),
            tm_memory: model.tm_memory.unwrap_or_default(),
            total_task: model.total_task.unwrap_or_default(),
            total_tm: model.total_tm.unwrap_or_default(),
            total_slot: model.total_slot.unwrap_or_default(),
            available_slot: model.available_slot.unwrap_or_default(),
        },
        created_time: model.gmt_create.and_utc().timestamp_millis(),
        modified_time: model.gmt_modified.and_utc().timestamp_millis(),
    }
}

#[async_trait]
impl ApplicationPersistence for ExternalDbPersistService {
    async fn application_search_page(
        &self,
        page_no: u64,
        page_size: u64,
        filter: &ApplicationFilter,
    ) -> anyhow::Result<Page<ApplicationInfo>> {
        if page_no == 0 || page_size == 0 {
            return Err(FlowhubError::IllegalArgument(format!(
                "invalid page request: page_no={}, page_size={}",
                page_no, page_size
            ))
            .into());
        }

        let mut base_select = application::Entity::find();

        if let Some(team_id) = filter.team_id {
            base_select = base_select.filter(application::Column::TeamId.eq(team_id));
        }
        if let Some(project_id) = filter.project_id {
            base_select = base_select.filter(application::Column::ProjectId.eq(project_id));
        }
        if let Some(deploy_mode) = filter.deploy_mode {
            base_select =
                base_select.filter(application::Column::DeployMode.eq(deploy_mode.as_i32()));
        }
        if !filter.job_name.is_empty() {
            if filter.job_name.contains('*') {
                let pattern = escape_sql_like_pattern(&filter.job_name);
                base_select = base_select.filter(application::Column::JobName.like(&pattern));
            } else {
                base_select =
                    base_select.filter(application::Column::JobName.contains(&filter.job_name));
            }
        }
        if !filter.k8s_namespace.is_empty() {
            base_select =
                base_select.filter(application::Column::K8sNamespace.eq(&filter.k8s_namespace));
        }

        // Count query
        let total_count = base_select
            .clone()
            .select_only()
            .column_as(Expr::col(Asterisk).count(), "count")
            .into_tuple::<i64>()
            .one(&self.db)
            .await?
            .unwrap_or_default() as u64;

        // A page past the last row has no items; skip the fetch. Also covers
        // page numbers whose offset would not fit in u64.
        let offset = match (page_no - 1).checked_mul(page_size) {
            Some(offset) if offset < total_count => offset,
            _ => return Ok(Page::new(total_count, page_no, page_size, Vec::new())),
        };

        let items = base_select
            .order_by_desc(application::Column::Id)
            .offset(offset)
            .limit(page_size)
            .all(&self.db)
            .await?
            .into_iter()
            .map(entity_to_info)
            .collect();

        Ok(Page::new(total_count, page_no, page_size, items))
    }

    async fn application_find_by_id(&self, id: i64) -> anyhow::Result<ApplicationInfo> {
        let result = application::Entity::find_by_id(id).one(&self.db).await?;
        result
            .map(entity_to_info)
            .ok_or_else(|| FlowhubError::ApplicationNotExist(id).into())
    }

    async fn application_find_by_team(
        &self,
        team_id: i64,
    ) -> anyhow::Result<Vec<ApplicationInfo>> {
        let result = application::Entity::find()
            .filter(application::Column::TeamId.eq(team_id))
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(entity_to_info).collect())
    }

    async fn application_find_by_project(
        &self,
        project_id: i64,
    ) -> anyhow::Result<Vec<ApplicationInfo>> {
        let result = application::Entity::find()
            .filter(application::Column::ProjectId.eq(project_id))
            .all(&self.db)
            .await?;
        Ok(result.into_iter().map(entity_to_info).collect())
    }

    async fn application_persist_metrics(
        &self,
        id: i64,
        metrics: &ApplicationMetrics,
    ) -> anyhow::Result<bool> {
        // gmt_modified is deliberately left alone so a retried snapshot is a
        // true no-op and does not disturb the recency projections.
        let result = application::Entity::update_many()
            .filter(application::Column::Id.eq(id))
            .col_expr(application::Column::JmMemory, Expr::value(metrics.jm_memory))
            .col_expr(application::Column::TmMemory, Expr::value(metrics.tm_memory))
            .col_expr(
                application::Column::TotalTask,
                Expr::value(metrics.total_task),
            )
            .col_expr(application::Column::TotalTm, Expr::value(metrics.total_tm))
            .col_expr(
                application::Column::TotalSlot,
                Expr::value(metrics.total_slot),
            )
            .col_expr(
                application::Column::AvailableSlot,
                Expr::value(metrics.available_slot),
            )
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn application_update_mapping(
        &self,
        mapping: &DeploymentMapping,
    ) -> anyhow::Result<bool> {
        let now = chrono::Utc::now().naive_utc();

        let result = application::Entity::update_many()
            .filter(application::Column::Id.eq(mapping.id))
            .col_expr(
                application::Column::K8sNamespace,
                Expr::value(mapping.k8s_namespace.clone()),
            )
            .col_expr(
                application::Column::K8sClusterId,
                Expr::value(mapping.k8s_cluster_id.clone()),
            )
            .col_expr(
                application::Column::K8sPodTemplate,
                Expr::value(mapping.k8s_pod_template.clone()),
            )
            .col_expr(
                application::Column::K8sJmPodTemplate,
                Expr::value(mapping.k8s_jm_pod_template.clone()),
            )
            .col_expr(
                application::Column::K8sTmPodTemplate,
                Expr::value(mapping.k8s_tm_pod_template.clone()),
            )
            .col_expr(application::Column::GmtModified, Expr::value(now))
            .exec(&self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn recent_k8s_namespaces(&self, limit: i64) -> anyhow::Result<Vec<String>> {
        self.recent_distinct_values(
            application::Entity::find(),
            application::Column::K8sNamespace,
            limit,
        )
        .await
    }

    async fn recent_k8s_cluster_ids(
        &self,
        deploy_mode: DeployMode,
        limit: i64,
    ) -> anyhow::Result<Vec<String>> {
        self.recent_distinct_values(
            application::Entity::find()
                .filter(application::Column::DeployMode.eq(deploy_mode.as_i32())),
            application::Column::K8sClusterId,
            limit,
        )
        .await
    }

    async fn recent_k8s_pod_templates(&self, limit: i64) -> anyhow::Result<Vec<String>> {
        self.recent_distinct_values(
            application::Entity::find(),
            application::Column::K8sPodTemplate,
            limit,
        )
        .await
    }

    async fn recent_k8s_jm_pod_templates(&self, limit: i64) -> anyhow::Result<Vec<String>> {
        self.recent_distinct_values(
            application::Entity::find(),
            application::Column::K8sJmPodTemplate,
            limit,
        )
        .await
    }

    async fn recent_k8s_tm_pod_templates(&self, limit: i64) -> anyhow::Result<Vec<String>> {
        self.recent_distinct_values(
            application::Entity::find(),
            application::Column::K8sTmPodTemplate,
            limit,
        )
        .await
    }

    async fn reset_option_state(&self) -> anyhow::Result<()> {
        application::Entity::update_many()
            .col_expr(
                application::Column::OptionState,
                Expr::value(OptionState::IDLE_VALUE),
            )
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
