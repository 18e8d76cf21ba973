//! Domain model types for the persistence abstraction layer
//!
//! These types are used as parameters and return values of the persistence
//! traits, decoupled from specific storage backends.

use serde::{Deserialize, Serialize};

/// Generic paginated result
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: u64,
    pub page_number: u64,
    pub pages_available: u64,
    pub page_items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total_count: u64, page_number: u64, page_size: u64, page_items: Vec<T>) -> Self {
        Self {
            total_count,
            page_number,
            pages_available: if page_size > 0 {
                (total_count as f64 / page_size as f64).ceil() as u64
            } else {
                0
            },
            page_items,
        }
    }
}

/// Where an application's runtime is launched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeployMode {
    /// Attach to a standalone cluster
    Remote,
    YarnPerJob,
    YarnSession,
    YarnApplication,
    KubernetesSession,
    KubernetesApplication,
}

impl DeployMode {
    pub fn as_i32(&self) -> i32 {
        match self {
            DeployMode::Remote => 1,
            DeployMode::YarnPerJob => 2,
            DeployMode::YarnSession => 3,
            DeployMode::YarnApplication => 4,
            DeployMode::KubernetesSession => 5,
            DeployMode::KubernetesApplication => 6,
        }
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(DeployMode::Remote),
            2 => Some(DeployMode::YarnPerJob),
            3 => Some(DeployMode::YarnSession),
            4 => Some(DeployMode::YarnApplication),
            5 => Some(DeployMode::KubernetesSession),
            6 => Some(DeployMode::KubernetesApplication),
            _ => None,
        }
    }
}

impl std::fmt::Display for DeployMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeployMode::Remote => write!(f, "remote"),
            DeployMode::YarnPerJob => write!(f, "yarn_per_job"),
            DeployMode::YarnSession => write!(f, "yarn_session"),
            DeployMode::YarnApplication => write!(f, "yarn_application"),
            DeployMode::KubernetesSession => write!(f, "kubernetes_session"),
            DeployMode::KubernetesApplication => write!(f, "kubernetes_application"),
        }
    }
}

impl std::str::FromStr for DeployMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "remote" => Ok(DeployMode::Remote),
            "yarn_per_job" => Ok(DeployMode::YarnPerJob),
            "yarn_session" => Ok(DeployMode::YarnSession),
            "yarn_application" => Ok(DeployMode::YarnApplication),
            "kubernetes_session" => Ok(DeployMode::KubernetesSession),
            "kubernetes_application" => Ok(DeployMode::KubernetesApplication),
            _ => Err(format!("Invalid deploy mode: {}", s)),
        }
    }
}

/// Whether an administrative operation (stop/start) is in flight for a record
///
/// A process restart can leave rows stuck at `Running`; the owning service
/// clears them with `reset_option_state` during startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionState {
    Idle,
    Running,
    /// Stored value not produced by any current writer
    Unknown,
}

impl OptionState {
    pub const IDLE_VALUE: i32 = 0;

    pub fn as_i32(&self) -> i32 {
        match self {
            OptionState::Idle => Self::IDLE_VALUE,
            OptionState::Running => 1,
            OptionState::Unknown => -1,
        }
    }

    pub fn from_i32(value: i32) -> Self {
        match value {
            0 => OptionState::Idle,
            1 => OptionState::Running,
            _ => OptionState::Unknown,
        }
    }
}

/// Runtime metrics snapshot persisted for an application
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationMetrics {
    pub jm_memory: i32,
    pub tm_memory: i32,
    pub total_task: i32,
    pub total_tm: i32,
    pub total_slot: i32,
    pub available_slot: i32,
}

/// Deployment-mapping fields written back after a (re)deployment
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentMapping {
    pub id: i64,
    pub k8s_namespace: Option<String>,
    pub k8s_cluster_id: Option<String>,
    pub k8s_pod_template: Option<String>,
    pub k8s_jm_pod_template: Option<String>,
    pub k8s_tm_pod_template: Option<String>,
}

/// Search filter for the paged application query
///
/// `None`/empty fields are not filtered on. `job_name` matches as a substring
/// and supports `*` wildcards.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFilter {
    pub team_id: Option<i64>,
    pub project_id: Option<i64>,
    pub deploy_mode: Option<DeployMode>,
    pub job_name: String,
    pub k8s_namespace: String,
}

/// Application read model returned from persistence
///
/// `deploy_mode` is kept raw; the set of modes is owned by the submission
/// workflow and unrecognized values must round-trip unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationInfo {
    pub id: i64,
    pub team_id: i64,
    pub project_id: Option<i64>,
    pub job_name: String,
    pub deploy_mode: i32,
    pub option_state: i32,
    pub k8s_namespace: String,
    pub k8s_cluster_id: String,
    pub k8s_pod_template: String,
    pub k8s_jm_pod_template: String,
    pub k8s_tm_pod_template: String,
    pub metrics: ApplicationMetrics,
    pub created_time: i64,
    pub modified_time: i64,
}

impl ApplicationInfo {
    pub fn option_state(&self) -> OptionState {
        OptionState::from_i32(self.option_state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deploy_mode_display() {
        assert_eq!(DeployMode::Remote.to_string(), "remote");
        assert_eq!(
            DeployMode::KubernetesApplication.to_string(),
            "kubernetes_application"
        );
    }

    #[test]
    fn test_deploy_mode_from_str() {
        assert_eq!(
            "yarn_session".parse::<DeployMode>().unwrap(),
            DeployMode::YarnSession
        );
        assert_eq!(
            "kubernetes_session".parse::<DeployMode>().unwrap(),
            DeployMode::KubernetesSession
        );
        assert!("local".parse::<DeployMode>().is_err());
    }

    #[test]
    fn test_deploy_mode_i32_round_trip() {
        for mode in [
            DeployMode::Remote,
            DeployMode::YarnPerJob,
            DeployMode::YarnSession,
            DeployMode::YarnApplication,
            DeployMode::KubernetesSession,
            DeployMode::KubernetesApplication,
        ] {
            assert_eq!(DeployMode::from_i32(mode.as_i32()), Some(mode));
        }
        assert_eq!(DeployMode::from_i32(0), None);
        assert_eq!(DeployMode::from_i32(99), None);
    }

    #[test]
    fn test_option_state_from_i32() {
        assert_eq!(OptionState::from_i32(0), OptionState::Idle);
        assert_eq!(OptionState::from_i32(1), OptionState::Running);
        assert_eq!(OptionState::from_i32(42), OptionState::Unknown);
    }

    #[test]
    fn test_page_pages_available() {
        let page = Page::<i32>::new(10, 1, 3, vec![]);
        assert_eq!(page.pages_available, 4);

        let page = Page::<i32>::new(9, 1, 3, vec![]);
        assert_eq!(page.pages_available, 3);

        // A zero-match result keeps the requested page number
        let empty = Page::<i32>::new(0, 2, 3, vec![]);
        assert_eq!(empty.total_count, 0);
        assert_eq!(empty.page_number, 2);
        assert_eq!(empty.pages_available, 0);
        assert!(empty.page_items.is_empty());
    }
}
