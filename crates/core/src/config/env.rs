//! Process-environment boundary
//!
//! Reading settings and exporting build metadata both go through small
//! capability traits so the decisions about *what* to read or export can be
//! tested against an in-memory map instead of the real environment.

use std::collections::{BTreeMap, HashMap};

use super::PluginConfig;

/// Prefix for the variables exported to Bazel workspace-status scripts
pub const EXPORT_PREFIX: &str = "DRONE_ECR";

/// Variable names the AWS SDKs (and the ECR credential helper) read
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";

/// Drone sets this to the name of the pipeline step being executed
pub const STEP_NAME_VAR: &str = "DRONE_STEP_NAME";

/// Read access to environment variables
pub trait EnvSource {
    fn var(&self, key: &str) -> Option<String>;
}

/// Write access to environment variables
pub trait EnvWriter {
    fn set(&mut self, key: &str, value: &str);
}

/// The environment of the current process
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvWriter for ProcessEnv {
    fn set(&mut self, key: &str, value: &str) {
        // SAFETY: the CLI publishes before starting the async runtime or any
        // other thread, so nothing can be reading the environment concurrently.
        unsafe { std::env::set_var(key, value) }
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvSource for BTreeMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl EnvWriter for BTreeMap<String, String> {
    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }
}

/// Build an exported variable name, e.g. `DRONE_ECR_TAG`
pub fn export_var(name: &str) -> String {
    format!("{EXPORT_PREFIX}_{name}")
}

/// Export build metadata and credentials for the build tool's children.
///
/// Registry, repository and tag are exported when non-empty. The credential
/// pair is exported only when both halves are present.
pub fn publish<W: EnvWriter + ?Sized>(config: &PluginConfig, writer: &mut W) {
    let metadata = [
        ("REGISTRY", &config.registry),
        ("REPOSITORY", &config.repository),
        ("TAG", &config.tag),
    ];

    for (name, value) in metadata {
        if value.is_empty() {
            continue;
        }
        let key = export_var(name);
        tracing::debug!("Exporting {}={}", key, value);
        writer.set(&key, value);
    }

    if config.has_credentials() {
        tracing::debug!("Exporting AWS credentials for the credential helper");
        writer.set(AWS_ACCESS_KEY_ID, &config.access_key);
        writer.set(AWS_SECRET_ACCESS_KEY, &config.secret_key);
    }
}

/// The current CI step name, if the platform provided a non-empty one
pub fn step_name<S: EnvSource + ?Sized>(source: &S) -> Option<String> {
    source.var(STEP_NAME_VAR).filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PluginConfig {
        PluginConfig {
            target: "//app:push".to_string(),
            registry: "0123456789.dkr.ecr.us-east-1.amazonaws.com".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_publishes_non_empty_metadata() {
        let config = PluginConfig {
            repository: "app".to_string(),
            tag: "1.2.3".to_string(),
            ..config()
        };
        let mut exported = BTreeMap::<String, String>::new();

        publish(&config, &mut exported);

        assert_eq!(
            exported.get("DRONE_ECR_REGISTRY").map(String::as_str),
            Some("0123456789.dkr.ecr.us-east-1.amazonaws.com")
        );
        assert_eq!(exported.get("DRONE_ECR_REPOSITORY").map(String::as_str), Some("app"));
        assert_eq!(exported.get("DRONE_ECR_TAG").map(String::as_str), Some("1.2.3"));
        assert_eq!(exported.len(), 3);
    }

    #[test]
    fn test_skips_empty_metadata() {
        let mut exported = BTreeMap::<String, String>::new();

        publish(&config(), &mut exported);

        assert_eq!(exported.keys().collect::<Vec<_>>(), vec!["DRONE_ECR_REGISTRY"]);
    }

    #[test]
    fn test_exports_credentials_only_as_a_pair() {
        let half = PluginConfig {
            access_key: "AKIAEXAMPLE".to_string(),
            ..config()
        };
        let mut exported = BTreeMap::<String, String>::new();
        publish(&half, &mut exported);
        assert!(!exported.contains_key(AWS_ACCESS_KEY_ID));
        assert!(!exported.contains_key(AWS_SECRET_ACCESS_KEY));

        let both = PluginConfig {
            secret_key: "s3cr3t".to_string(),
            ..half
        };
        let mut exported = BTreeMap::<String, String>::new();
        publish(&both, &mut exported);
        assert_eq!(exported.get(AWS_ACCESS_KEY_ID).map(String::as_str), Some("AKIAEXAMPLE"));
        assert_eq!(exported.get(AWS_SECRET_ACCESS_KEY).map(String::as_str), Some("s3cr3t"));
    }

    #[test]
    fn test_step_name_ignores_empty_value() {
        let mut source = BTreeMap::<String, String>::new();
        assert_eq!(step_name(&source), None);

        source.insert(STEP_NAME_VAR.to_string(), String::new());
        assert_eq!(step_name(&source), None);

        source.insert(STEP_NAME_VAR.to_string(), "publish".to_string());
        assert_eq!(step_name(&source).as_deref(), Some("publish"));
    }
}
