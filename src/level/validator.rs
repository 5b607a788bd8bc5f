//! Manifest validation.
//!
//! Each [`ManifestRule`] inspects a parsed manifest and reports
//! [`ManifestIssue`]s. Most issues are warnings because the registry
//! tolerates them at resolve time (dangling indices are skipped, empty
//! requirements are no-ops); only ambiguous identities are errors.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use serde::Serialize;

use crate::error::{PuzzleReqError, Result};
use crate::level::manifest::{ChildSpec, LevelManifest, PuzzleSpec};

/// Severity of a manifest issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Resolves, but part of the manifest will have no effect.
    Warning,
    /// The manifest is ambiguous and should not be used.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A problem found in a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestIssue {
    /// Identifier of the rule that produced the issue.
    pub rule: &'static str,
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for ManifestIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.rule, self.message)
    }
}

/// A check over a whole manifest.
pub trait ManifestRule {
    /// Unique identifier for this rule.
    fn id(&self) -> &'static str;

    /// Severity of the issues this rule reports.
    fn severity(&self) -> Severity;

    /// Check the manifest and return any issues.
    fn check(&self, manifest: &LevelManifest) -> Vec<ManifestIssue>;

    fn issue(&self, message: String) -> ManifestIssue {
        ManifestIssue {
            rule: self.id(),
            severity: self.severity(),
            message,
        }
    }
}

/// Ids must identify exactly one puzzle or cluster.
pub struct DuplicateIdRule;

impl ManifestRule for DuplicateIdRule {
    fn id(&self) -> &'static str {
        "duplicate-id"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn check(&self, manifest: &LevelManifest) -> Vec<ManifestIssue> {
        let ids = manifest
            .all_puzzles()
            .map(|p| p.id.as_str())
            .chain(manifest.clusters.iter().map(|c| c.id.as_str()));

        let mut seen = HashSet::new();
        let mut reported = HashSet::new();
        let mut issues = Vec::new();
        for id in ids {
            if !seen.insert(id) && reported.insert(id) {
                issues.push(self.issue(format!("Id '{}' is used more than once", id)));
            }
        }
        issues
    }
}

/// Movable puzzles are looked up by sensor, so sensors must be unique.
///
/// Only puzzles that end up with items are indexed, so puzzles that
/// declare nothing never collide.
pub struct SensorCollisionRule;

impl ManifestRule for SensorCollisionRule {
    fn id(&self) -> &'static str {
        "sensor-collision"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, manifest: &LevelManifest) -> Vec<ManifestIssue> {
        let mut owners: HashMap<u64, Vec<&str>> = HashMap::new();
        for (spec, sensor) in manifest.sensor_assignments() {
            if spec.movable && declares_items(manifest, spec) {
                owners.entry(sensor.0).or_default().push(spec.id.as_str());
            }
        }

        let mut collisions: Vec<(u64, Vec<&str>)> = owners
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .collect();
        collisions.sort();

        collisions
            .into_iter()
            .map(|(sensor, ids)| {
                self.issue(format!(
                    "Movable puzzles {} share sensor {}; only whichever resolves first will be found by lookup",
                    ids.iter()
                        .map(|id| format!("'{}'", id))
                        .collect::<Vec<_>>()
                        .join(", "),
                    sensor
                ))
            })
            .collect()
    }
}

/// Required item indices must name a listed item.
pub struct DanglingIndexRule;

impl ManifestRule for DanglingIndexRule {
    fn id(&self) -> &'static str {
        "dangling-index"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, manifest: &LevelManifest) -> Vec<ManifestIssue> {
        let count = manifest.items.len() as u32;
        let owners = manifest
            .all_puzzles()
            .map(|p| (p.id.as_str(), &p.required_items))
            .chain(
                manifest
                    .clusters
                    .iter()
                    .map(|c| (c.id.as_str(), &c.required_items)),
            );

        let mut issues = Vec::new();
        for (id, indices) in owners {
            let dangling: Vec<u32> = indices
                .iter()
                .copied()
                .filter(|&index| index == 0 || index > count)
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();
            for index in dangling {
                issues.push(self.issue(format!(
                    "'{}' requires item index {}, but only {} item(s) are listed",
                    id, index, count
                )));
            }
        }
        issues
    }
}

/// Declarations that can never attach anything.
pub struct NoEffectRule;

impl ManifestRule for NoEffectRule {
    fn id(&self) -> &'static str {
        "no-effect"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn check(&self, manifest: &LevelManifest) -> Vec<ManifestIssue> {
        let mut issues = Vec::new();
        for cluster in &manifest.clusters {
            let has_puzzle = cluster
                .children
                .iter()
                .any(|child| matches!(child, ChildSpec::Puzzle(_)));
            if !cluster.required_items.is_empty() && !has_puzzle {
                issues.push(self.issue(format!(
                    "Cluster '{}' requires items but has no puzzle children",
                    cluster.id
                )));
            }
        }
        for puzzle in manifest.all_puzzles() {
            if puzzle.movable
                && puzzle.required_items.is_empty()
                && !in_requiring_cluster(manifest, &puzzle.id)
            {
                issues.push(self.issue(format!(
                    "Movable puzzle '{}' requires no items and will not be indexed by sensor",
                    puzzle.id
                )));
            }
        }
        issues
    }
}

fn declares_items(manifest: &LevelManifest, puzzle: &PuzzleSpec) -> bool {
    !puzzle.required_items.is_empty() || in_requiring_cluster(manifest, &puzzle.id)
}

fn in_requiring_cluster(manifest: &LevelManifest, id: &str) -> bool {
    manifest.clusters.iter().any(|cluster| {
        !cluster.required_items.is_empty()
            && cluster
                .children
                .iter()
                .any(|child| matches!(child, ChildSpec::Puzzle(p) if p.id == id))
    })
}

/// All built-in rules.
pub fn default_rules() -> Vec<Box<dyn ManifestRule>> {
    vec![
        Box::new(DuplicateIdRule),
        Box::new(SensorCollisionRule),
        Box::new(DanglingIndexRule),
        Box::new(NoEffectRule),
    ]
}

/// Run every built-in rule and return the issues, errors first.
pub fn validate(manifest: &LevelManifest) -> Vec<ManifestIssue> {
    let mut issues: Vec<ManifestIssue> = default_rules()
        .iter()
        .flat_map(|rule| rule.check(manifest))
        .collect();
    issues.sort_by(|a, b| b.severity.cmp(&a.severity));
    issues
}

/// Whether any issue is an error.
pub fn has_errors(issues: &[ManifestIssue]) -> bool {
    issues.iter().any(|i| i.severity == Severity::Error)
}

/// Fail with `ConfigValidationError` if the manifest has error-level issues.
pub fn ensure_valid(manifest: &LevelManifest) -> Result<()> {
    let errors: Vec<String> = validate(manifest)
        .into_iter()
        .filter(|issue| issue.severity == Severity::Error)
        .map(|issue| issue.message)
        .collect();
    if errors.is_empty() {
        return Ok(());
    }
    Err(PuzzleReqError::ConfigValidationError {
        message: errors.join("; "),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest(yaml: &str) -> LevelManifest {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn clean_manifest_has_no_issues() {
        let m = manifest(
            r#"
items:
  - name: Cell
puzzles:
  - id: door
    movable: true
    required_items: [1]
"#,
        );
        assert!(validate(&m).is_empty());
    }

    #[test]
    fn detects_duplicate_ids_across_clusters() {
        let m = manifest(
            r#"
puzzles:
  - id: a
clusters:
  - id: team
    children:
      - puzzle: { id: a }
"#,
        );
        let issues = DuplicateIdRule.check(&m);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'a'"));
        assert_eq!(issues[0].severity, Severity::Error);
    }

    #[test]
    fn duplicate_id_reported_once() {
        let m = manifest("puzzles:\n  - id: a\n  - id: a\n  - id: a\n");
        assert_eq!(DuplicateIdRule.check(&m).len(), 1);
    }

    #[test]
    fn detects_movable_sensor_collision() {
        let m = manifest(
            r#"
puzzles:
  - id: first
    movable: true
    sensor: 9
    required_items: [1]
  - id: second
    movable: true
    sensor: 9
    required_items: [1]
  - id: fixed
    sensor: 9
    required_items: [1]
"#,
        );
        let issues = SensorCollisionRule.check(&m);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'first', 'second'"));
        assert!(issues[0].message.contains("whichever resolves first"));
        assert!(!issues[0].message.contains("fixed"));
    }

    #[test]
    fn sensor_collision_ignores_puzzles_without_items() {
        let m = manifest(
            r#"
puzzles:
  - id: idle
    movable: true
    sensor: 9
  - id: lift
    movable: true
    sensor: 9
    required_items: [1]
"#,
        );
        assert!(SensorCollisionRule.check(&m).is_empty());
    }

    #[test]
    fn sensor_collision_counts_cluster_requirements() {
        let m = manifest(
            r#"
puzzles:
  - id: lift
    movable: true
    sensor: 9
    required_items: [1]
clusters:
  - id: team
    required_items: [1]
    children:
      - puzzle: { id: c1, movable: true, sensor: 9 }
  - id: quiet
    children:
      - puzzle: { id: c2, movable: true, sensor: 9 }
"#,
        );
        let issues = SensorCollisionRule.check(&m);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("'lift', 'c1'"));
        assert!(!issues[0].message.contains("c2"));
    }

    #[test]
    fn detects_dangling_indices() {
        let m = manifest(
            r#"
items:
  - name: Cell
puzzles:
  - id: door
    required_items: [0, 1, 3, 3]
"#,
        );
        let issues = DanglingIndexRule.check(&m);
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("index 0"));
        assert!(messages[1].contains("index 3"));
    }

    #[test]
    fn detects_cluster_without_puzzle_children() {
        let m = manifest(
            r#"
items:
  - name: Cell
clusters:
  - id: team
    required_items: [1]
    children:
      - other: sustained
"#,
        );
        let issues = NoEffectRule.check(&m);
        assert_eq!(issues.len(), 1);
        assert!(issues[0].message.contains("team"));
    }

    #[test]
    fn movable_child_of_requiring_cluster_is_fine() {
        let m = manifest(
            r#"
items:
  - name: Cell
clusters:
  - id: team
    required_items: [1]
    children:
      - puzzle: { id: c1, movable: true }
"#,
        );
        assert!(NoEffectRule.check(&m).is_empty());
    }

    #[test]
    fn ensure_valid_rejects_errors_only() {
        let warned = manifest("puzzles:\n  - id: a\n    required_items: [2]\n");
        assert!(ensure_valid(&warned).is_ok());

        let broken = manifest("puzzles:\n  - id: a\n  - id: a\n");
        let err = ensure_valid(&broken).unwrap_err();
        assert!(matches!(err, PuzzleReqError::ConfigValidationError { .. }));
        assert!(err.to_string().contains("'a'"));
    }

    #[test]
    fn errors_sort_first() {
        let m = manifest(
            r#"
puzzles:
  - id: a
    required_items: [4]
  - id: a
"#,
        );
        let issues = validate(&m);
        assert_eq!(issues[0].severity, Severity::Error);
        assert!(has_errors(&issues));
    }

    #[test]
    fn issue_display_format() {
        let issue = ManifestIssue {
            rule: "dangling-index",
            severity: Severity::Warning,
            message: "bad".into(),
        };
        assert_eq!(issue.to_string(), "warning[dangling-index]: bad");
    }
}
