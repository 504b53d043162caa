use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::statement::StatementDef;

/// A workflow definition as authored: initial variables plus a root statement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDef {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub workflow_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  /// Initial content of the bindings store.
  #[serde(default)]
  pub variables: HashMap<String, String>,
  #[serde(default)]
  pub root: StatementDef,
}

impl WorkflowDef {
  pub fn from_json(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_json::from_str(content)?)
  }

  pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
  }

  /// Load a definition from disk. Files ending in `.json` are parsed as JSON,
  /// everything else as YAML.
  pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    let is_json = path
      .extension()
      .and_then(|ext| ext.to_str())
      .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
      Self::from_json(&content)
    } else {
      Self::from_yaml(&content)
    }
  }
}

#[cfg(test)]
mod tests {
  use std::io::Write;

  use super::*;

  const SAMPLE_YAML: &str = r#"
variables:
  arg1: value1
  arg2: value2

root:
  sequence:
    elements:
      - activity:
          name: SampleActivity1
          arguments: [arg1]
          result: result1
      - parallel:
          branches:
            - invocation:
                name: SampleActivity2
                arguments: [result1]
                result: result2
            - invocation:
                name: SampleActivity3
                arguments: [arg2]
                result: result3
                timeout_ms: 250
"#;

  #[test]
  fn test_from_yaml() {
    let def = WorkflowDef::from_yaml(SAMPLE_YAML).unwrap();

    assert_eq!(def.workflow_id, None);
    assert_eq!(def.variables.get("arg1").map(String::as_str), Some("value1"));

    let sequence = def.root.sequence.expect("root should be a sequence");
    assert_eq!(sequence.elements.len(), 2);

    let parallel = sequence.elements[1]
      .parallel
      .as_ref()
      .expect("second element should be parallel");
    assert_eq!(parallel.branches.len(), 2);
    assert_eq!(
      parallel.branches[1].invocation.as_ref().unwrap().timeout_ms,
      Some(250)
    );
  }

  #[test]
  fn test_from_json() {
    let def = WorkflowDef::from_json(
      r#"{
        "workflow_id": "wf-1",
        "name": "Json Workflow",
        "root": { "invocation": { "name": "A", "arguments": ["x"] } }
      }"#,
    )
    .unwrap();

    assert_eq!(def.workflow_id.as_deref(), Some("wf-1"));
    assert!(def.variables.is_empty());
    assert_eq!(def.root.invocation.unwrap().result, None);
  }

  #[test]
  fn test_missing_root_is_empty_statement() {
    let def = WorkflowDef::from_yaml("variables: { a: b }").unwrap();
    assert_eq!(def.root.variant_count(), 0);
  }

  #[test]
  fn test_invalid_yaml() {
    let err = WorkflowDef::from_yaml("root: 42").unwrap_err();
    assert!(matches!(err, ConfigError::Yaml(_)));
  }

  #[test]
  fn test_load_by_extension() {
    let dir = tempfile::tempdir().unwrap();

    let yaml_path = dir.path().join("workflow.yaml");
    std::fs::write(&yaml_path, SAMPLE_YAML).unwrap();
    let from_yaml = WorkflowDef::load(&yaml_path).unwrap();

    let json_path = dir.path().join("workflow.json");
    let mut file = std::fs::File::create(&json_path).unwrap();
    file
      .write_all(serde_json::to_string(&from_yaml).unwrap().as_bytes())
      .unwrap();
    let from_json = WorkflowDef::load(&json_path).unwrap();

    assert_eq!(from_yaml, from_json);
  }

  #[test]
  fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = WorkflowDef::load(dir.path().join("missing.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
  }
}
