//! Per-project configuration for sub-build orchestration.
//!
//! The host persists this alongside its own project configuration; this
//! crate only defines the shape and the fold from a submitted configuration
//! form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Form section under which the sub-build options are submitted.
const FORM_SECTION: &str = "multijob";

/// Orchestration-related configuration for one parent project.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Fold downstream dependents' poll results into this project's own
    /// change detection.
    #[serde(default)]
    pub poll_subjobs: bool,
    /// Environment variables to restore when resuming a parent run.
    /// Persisted but not otherwise interpreted by the engine.
    #[serde(default)]
    pub resume_env_vars: Option<String>,
}

impl ProjectConfig {
    /// Whether resume environment variables are configured (present and
    /// not blank).
    pub fn check_resume_env_vars(&self) -> bool {
        self.resume_env_vars
            .as_deref()
            .is_some_and(|s| !s.trim().is_empty())
    }

    /// Parse a persisted configuration document.
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Fold a submitted configuration form into this config.
    ///
    /// The form is a JSON object with an optional `"multijob"` section:
    ///
    /// ```json
    /// { "multijob": {
    ///     "pollSubjobs": true,
    ///     "resumeEnvVars": { "resumeEnvVars": "FOO=bar" }
    /// } }
    /// ```
    ///
    /// Without the section the config is left untouched; a section that is
    /// not a JSON object is rejected as a malformed form. Inside the section,
    /// a present `pollSubjobs` key sets the flag, coercing anything but
    /// `true` to `false` (checkbox semantics), while an absent
    /// `resumeEnvVars` block clears the stored value (an unticked checkbox
    /// submits no block).
    pub fn apply_form(&mut self, form: &Value) -> Result<()> {
        let Some(section) = form.get(FORM_SECTION) else {
            return Ok(());
        };
        if !section.is_object() {
            return Err(Error::Config(format!(
                "malformed form: `{FORM_SECTION}` section is not an object"
            )));
        }

        if let Some(poll) = section.get("pollSubjobs") {
            self.poll_subjobs = poll.as_bool().unwrap_or(false);
        }

        self.resume_env_vars = section
            .get("resumeEnvVars")
            .and_then(|block| block.get("resumeEnvVars"))
            .and_then(Value::as_str)
            .map(str::to_owned);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_are_off() {
        let config = ProjectConfig::default();
        assert!(!config.poll_subjobs);
        assert!(config.resume_env_vars.is_none());
        assert!(!config.check_resume_env_vars());
    }

    #[test]
    fn check_resume_env_vars_rejects_blank() {
        let config = ProjectConfig {
            poll_subjobs: false,
            resume_env_vars: Some("   ".to_string()),
        };
        assert!(!config.check_resume_env_vars());

        let config = ProjectConfig {
            poll_subjobs: false,
            resume_env_vars: Some("CI=true".to_string()),
        };
        assert!(config.check_resume_env_vars());
    }

    #[test]
    fn apply_form_reads_nested_section() {
        let mut config = ProjectConfig::default();
        config
            .apply_form(&json!({
                "multijob": {
                    "pollSubjobs": true,
                    "resumeEnvVars": { "resumeEnvVars": "FOO=bar" }
                }
            }))
            .unwrap();
        assert!(config.poll_subjobs);
        assert_eq!(config.resume_env_vars.as_deref(), Some("FOO=bar"));
    }

    #[test]
    fn apply_form_without_section_is_a_no_op() {
        let mut config = ProjectConfig {
            poll_subjobs: true,
            resume_env_vars: Some("FOO=bar".to_string()),
        };
        config.apply_form(&json!({ "unrelated": 1 })).unwrap();
        assert!(config.poll_subjobs);
        assert_eq!(config.resume_env_vars.as_deref(), Some("FOO=bar"));
    }

    #[test]
    fn apply_form_rejects_non_object_section() {
        let mut config = ProjectConfig::default();
        let err = config
            .apply_form(&json!({ "multijob": "not-a-form" }))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(config, ProjectConfig::default());
    }

    #[test]
    fn apply_form_missing_resume_block_clears_value() {
        let mut config = ProjectConfig {
            poll_subjobs: false,
            resume_env_vars: Some("FOO=bar".to_string()),
        };
        config
            .apply_form(&json!({ "multijob": { "pollSubjobs": false } }))
            .unwrap();
        assert!(config.resume_env_vars.is_none());
    }

    #[test]
    fn apply_form_keeps_poll_flag_when_key_absent() {
        let mut config = ProjectConfig {
            poll_subjobs: true,
            resume_env_vars: None,
        };
        config.apply_form(&json!({ "multijob": {} })).unwrap();
        assert!(config.poll_subjobs);
    }

    #[test]
    fn apply_form_coerces_non_boolean_poll_flag_to_false() {
        let mut config = ProjectConfig {
            poll_subjobs: true,
            resume_env_vars: None,
        };
        config
            .apply_form(&json!({ "multijob": { "pollSubjobs": "yes" } }))
            .unwrap();
        assert!(!config.poll_subjobs);
    }

    #[test]
    fn from_json_parses_persisted_document() {
        let config =
            ProjectConfig::from_json(r#"{ "poll_subjobs": true, "resume_env_vars": "A=1" }"#)
                .unwrap();
        assert!(config.poll_subjobs);
        assert_eq!(config.resume_env_vars.as_deref(), Some("A=1"));
    }

    #[test]
    fn from_json_surfaces_parse_errors() {
        let err = ProjectConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn serde_round_trip() {
        let config = ProjectConfig {
            poll_subjobs: true,
            resume_env_vars: Some("A=1\nB=2".to_string()),
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: ProjectConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
