//! Cluster context from a kube config file.
//!
//! Only `current-context` and each context's `namespace` are read. The display
//! token also depends on the active cloud profile taken from the environment.

use promptline_core::AppResult;
use serde::Deserialize;
use std::path::Path;

/// The subset of a kube config this crate reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KubeConfig {
    #[serde(rename = "current-context", default)]
    pub current_context: Option<String>,

    #[serde(default)]
    pub contexts: Option<Vec<NamedContext>>,
}

/// One entry of the `contexts` list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamedContext {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub context: Option<ContextDetails>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContextDetails {
    #[serde(default)]
    pub namespace: Option<String>,
}

impl KubeConfig {
    /// Namespace of the named context, empty when absent.
    pub fn namespace_of(&self, context_name: &str) -> &str {
        if context_name.is_empty() {
            return "";
        }

        self.contexts
            .iter()
            .flatten()
            .find(|c| c.name.as_deref() == Some(context_name))
            .and_then(|c| c.context.as_ref())
            .and_then(|d| d.namespace.as_deref())
            .unwrap_or("")
    }
}

/// Inputs to the display token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterContextState {
    pub current_context: String,

    /// May be empty
    pub namespace: String,

    /// Active profile from the environment, may be empty
    pub external_profile: String,
}

impl ClusterContextState {
    pub fn new(
        current_context: impl Into<String>,
        namespace: impl Into<String>,
        external_profile: impl Into<String>,
    ) -> Self {
        Self {
            current_context: current_context.into(),
            namespace: namespace.into(),
            external_profile: external_profile.into(),
        }
    }

    /// Display token. First matching row wins:
    ///
    /// | context | namespace | context == profile | token |
    /// |---|---|---|---|
    /// | empty | | | `""` |
    /// | set | set | yes | `context\|namespace` |
    /// | set | empty | yes | `context` |
    /// | set | | no | `[a]profile[k]context` |
    ///
    /// Contexts listed in `exempt` always count as matching the profile.
    pub fn token(&self, exempt: &[String]) -> String {
        let context = self.current_context.as_str();

        if context.is_empty() {
            return String::new();
        }

        let matches_profile =
            context == self.external_profile || exempt.iter().any(|name| name == context);

        match (matches_profile, self.namespace.is_empty()) {
            (true, false) => format!("{}|{}", context, self.namespace),
            (true, true) => context.to_string(),
            (false, _) => format!("[a]{}[k]{}", self.external_profile, context),
        }
    }
}

/// Parse kube config YAML.
pub fn parse_kube_config(contents: &str) -> AppResult<KubeConfig> {
    if contents.trim().is_empty() {
        return Ok(KubeConfig::default());
    }

    Ok(serde_yaml::from_str(contents)?)
}

/// Read the cluster context state from the kube config at `path`.
pub fn read_cluster_context(path: &Path, active_profile: &str) -> AppResult<ClusterContextState> {
    let contents = std::fs::read_to_string(path)?;
    let config = parse_kube_config(&contents)?;

    let current_context = config.current_context.clone().unwrap_or_default();
    let namespace = config.namespace_of(&current_context).to_string();

    tracing::debug!(
        "Cluster context {:?} (namespace {:?}) from {:?}",
        current_context,
        namespace,
        path
    );

    Ok(ClusterContextState::new(
        current_context,
        namespace,
        active_profile,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptline_core::AppError;
    use std::fs;
    use tempfile::TempDir;

    const KUBE_CONFIG: &str = r#"
apiVersion: v1
kind: Config
clusters:
  - name: prod
    cluster:
      server: https://prod.example.com
contexts:
  - name: prod
    context:
      cluster: prod
      namespace: billing
  - name: staging
    context:
      cluster: staging
  - name: bare
    context:
current-context: prod
preferences: {}
"#;

    fn no_exempt() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn test_token_empty_context() {
        let state = ClusterContextState::new("", "billing", "prod");
        assert_eq!(state.token(&no_exempt()), "");
    }

    #[test]
    fn test_token_matching_profile_with_namespace() {
        let state = ClusterContextState::new("prod", "billing", "prod");
        assert_eq!(state.token(&no_exempt()), "prod|billing");
    }

    #[test]
    fn test_token_matching_profile_without_namespace() {
        let state = ClusterContextState::new("prod", "", "prod");
        assert_eq!(state.token(&no_exempt()), "prod");
    }

    #[test]
    fn test_token_profile_mismatch() {
        let state = ClusterContextState::new("staging", "", "other");
        assert_eq!(state.token(&no_exempt()), "[a]other[k]staging");

        let state = ClusterContextState::new("staging", "web", "other");
        assert_eq!(state.token(&no_exempt()), "[a]other[k]staging");
    }

    #[test]
    fn test_token_unset_profile() {
        let state = ClusterContextState::new("staging", "web", "");
        assert_eq!(state.token(&no_exempt()), "[a][k]staging");
    }

    #[test]
    fn test_token_exempt_context_bypasses_profile() {
        let exempt = vec!["rancher2".to_string()];

        let state = ClusterContextState::new("rancher2", "fleet", "prod");
        assert_eq!(state.token(&exempt), "rancher2|fleet");

        let state = ClusterContextState::new("rancher2", "", "prod");
        assert_eq!(state.token(&exempt), "rancher2");

        // Without the exemption the general table applies
        assert_eq!(state.token(&no_exempt()), "[a]prod[k]rancher2");
    }

    #[test]
    fn test_namespace_lookup() {
        let config = parse_kube_config(KUBE_CONFIG).unwrap();
        assert_eq!(config.current_context.as_deref(), Some("prod"));
        assert_eq!(config.namespace_of("prod"), "billing");
        assert_eq!(config.namespace_of("staging"), "");
        assert_eq!(config.namespace_of("bare"), "");
        assert_eq!(config.namespace_of("missing"), "");
        assert_eq!(config.namespace_of(""), "");
    }

    #[test]
    fn test_read_cluster_context() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config");
        fs::write(&path, KUBE_CONFIG).unwrap();

        let state = read_cluster_context(&path, "prod").unwrap();
        assert_eq!(state, ClusterContextState::new("prod", "billing", "prod"));
        assert_eq!(state.token(&no_exempt()), "prod|billing");
    }

    #[test]
    fn test_no_current_context() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config");
        fs::write(&path, "contexts: []\n").unwrap();

        let state = read_cluster_context(&path, "prod").unwrap();
        assert_eq!(state.token(&no_exempt()), "");
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = read_cluster_context(&temp.path().join("config"), "prod");
        assert!(matches!(result, Err(AppError::Io(_))));
    }

    #[test]
    fn test_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config");
        fs::write(&path, "contexts: {broken: [").unwrap();

        let result = read_cluster_context(&path, "prod");
        assert!(matches!(result, Err(AppError::Serialization(_))));
    }
}
