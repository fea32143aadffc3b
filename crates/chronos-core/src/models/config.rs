use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockifyConfig {
    pub api_key: String,
    /// Workspace-scoped API root, e.g. `https://api.clockify.me/api/v1/workspaces/<id>`.
    pub base_url: String,
    pub user_url: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinearConfig {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitlabConfig {
    pub api_key: String,
    pub base_url: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChronosConfig {
    pub clockify: ClockifyConfig,
    /// Project every new entry is billed to.
    pub default_project: String,
    pub linear: Option<LinearConfig>,
    pub gitlab: Option<GitlabConfig>,
    pub request_timeout: Duration,
}
