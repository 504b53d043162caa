//! Statement definitions as authored.
//!
//! A statement is written as a map with exactly one of `invocation`,
//! `sequence` or `parallel`. The definition types keep every variant optional
//! so that the resolver can report ambiguous statements with a location and
//! treat an empty statement as a no-op, instead of failing inside the parser.
//!
//! ```yaml
//! sequence:
//!   elements:
//!     - invocation:
//!         name: fetch
//!         arguments: [user_id]
//!         result: profile
//!     - parallel:
//!         branches:
//!           - activity: { name: notify, arguments: [profile] }
//!           - {}
//! ```

use serde::{Deserialize, Serialize};

/// A single node of the authored statement tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementDef {
  /// Call a named unit of work. `activity` is accepted as an alias.
  #[serde(
    default,
    alias = "activity",
    skip_serializing_if = "Option::is_none"
  )]
  pub invocation: Option<InvocationDef>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub sequence: Option<SequenceDef>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub parallel: Option<ParallelDef>,
}

impl StatementDef {
  /// Number of populated variants. Anything other than 0 or 1 is rejected
  /// during resolution.
  pub fn variant_count(&self) -> usize {
    usize::from(self.invocation.is_some())
      + usize::from(self.sequence.is_some())
      + usize::from(self.parallel.is_some())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InvocationDef {
  /// Registered name of the unit of work.
  pub name: String,

  /// Binding names resolved into positional inputs at invocation time.
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub arguments: Vec<String>,

  /// Binding the result is written to. Empty or absent discards the result.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub result: Option<String>,

  /// Overrides the runtime's default invocation timeout.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub timeout_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SequenceDef {
  #[serde(default)]
  pub elements: Vec<StatementDef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParallelDef {
  #[serde(default)]
  pub branches: Vec<StatementDef>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_activity_alias() {
    let stmt: StatementDef = serde_yaml::from_str(
      r#"
activity:
  name: SampleActivity1
  arguments: [arg1]
  result: result1
"#,
    )
    .unwrap();

    let invocation = stmt.invocation.expect("invocation should be set");
    assert_eq!(invocation.name, "SampleActivity1");
    assert_eq!(invocation.arguments, vec!["arg1".to_string()]);
    assert_eq!(invocation.result.as_deref(), Some("result1"));
    assert_eq!(invocation.timeout_ms, None);
  }

  #[test]
  fn test_empty_statement_has_no_variant() {
    let stmt: StatementDef = serde_yaml::from_str("{}").unwrap();
    assert_eq!(stmt.variant_count(), 0);
    assert_eq!(stmt, StatementDef::default());
  }

  #[test]
  fn test_variant_count_counts_every_populated_field() {
    let stmt: StatementDef = serde_json::from_str(
      r#"{
        "invocation": { "name": "a" },
        "sequence": { "elements": [] },
        "parallel": {}
      }"#,
    )
    .unwrap();
    assert_eq!(stmt.variant_count(), 3);
    assert!(stmt.parallel.unwrap().branches.is_empty());
  }

  #[test]
  fn test_serialize_skips_unset_variants() {
    let stmt = StatementDef {
      invocation: Some(InvocationDef {
        name: "a".to_string(),
        ..Default::default()
      }),
      ..Default::default()
    };
    let json = serde_json::to_value(&stmt).unwrap();
    assert_eq!(json, serde_json::json!({ "invocation": { "name": "a" } }));
  }
}
