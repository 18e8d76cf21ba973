//! Application persistence trait
//!
//! Defines the interface for application storage operations: paged search,
//! scoped lookups, metrics/mapping write-back, recent-value suggestions, and
//! the startup option-state reset.

use async_trait::async_trait;

use crate::model::{
    ApplicationFilter, ApplicationInfo, ApplicationMetrics, DeployMode, DeploymentMapping, Page,
};

/// Application persistence operations
///
/// Implementations hold no mutable state of their own; every call maps to a
/// bounded number of statements against the backing store, and writes are
/// atomic at the row level.
#[async_trait]
pub trait ApplicationPersistence: Send + Sync {
    /// Search applications with pagination and filters
    ///
    /// Results are ordered by id descending. Fails with
    /// `FlowhubError::IllegalArgument` when `page_no` or `page_size` is zero.
    async fn application_search_page(
        &self,
        page_no: u64,
        page_size: u64,
        filter: &ApplicationFilter,
    ) -> anyhow::Result<Page<ApplicationInfo>>;

    /// Find a single application by id
    ///
    /// Fails with `FlowhubError::ApplicationNotExist` when no row matches.
    async fn application_find_by_id(&self, id: i64) -> anyhow::Result<ApplicationInfo>;

    /// Find all applications owned by a team (empty vec when the team has none)
    async fn application_find_by_team(&self, team_id: i64)
    -> anyhow::Result<Vec<ApplicationInfo>>;

    /// Find all applications belonging to a project
    async fn application_find_by_project(
        &self,
        project_id: i64,
    ) -> anyhow::Result<Vec<ApplicationInfo>>;

    /// Overwrite the metrics snapshot of one application
    ///
    /// Returns whether a row matched; a missing id is a no-op returning
    /// `false`, never an error. Re-applying an identical snapshot leaves the
    /// stored row unchanged.
    async fn application_persist_metrics(
        &self,
        id: i64,
        metrics: &ApplicationMetrics,
    ) -> anyhow::Result<bool>;

    /// Update the deployment-mapping fields of one application
    ///
    /// Returns whether a row matched; a missing id is a no-op returning
    /// `false` and creates no row.
    async fn application_update_mapping(&self, mapping: &DeploymentMapping)
    -> anyhow::Result<bool>;

    /// Distinct Kubernetes namespaces, most recently used first
    ///
    /// Capped at `limit`; a non-positive limit yields an empty vec without
    /// touching the store.
    async fn recent_k8s_namespaces(&self, limit: i64) -> anyhow::Result<Vec<String>>;

    /// Distinct Kubernetes cluster ids for one deploy mode, most recent first
    async fn recent_k8s_cluster_ids(
        &self,
        deploy_mode: DeployMode,
        limit: i64,
    ) -> anyhow::Result<Vec<String>>;

    /// Distinct pod templates, most recently used first
    async fn recent_k8s_pod_templates(&self, limit: i64) -> anyhow::Result<Vec<String>>;

    /// Distinct job-manager pod templates, most recently used first
    async fn recent_k8s_jm_pod_templates(&self, limit: i64) -> anyhow::Result<Vec<String>>;

    /// Distinct task-manager pod templates, most recently used first
    async fn recent_k8s_tm_pod_templates(&self, limit: i64) -> anyhow::Result<Vec<String>>;

    /// Force every application's option state back to idle
    ///
    /// Single bulk statement, called once by the owning service's startup
    /// sequence to clear state left behind by a dead process.
    async fn reset_option_state(&self) -> anyhow::Result<()>;
}
