//! Precondition checking for chemical additions.

use crate::catalog::experiment::PreconditionRule;

/// A rejected addition: `target` was added before all of `missing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleViolation {
    pub target: String,
    pub missing: Vec<String>,
}

impl RuleViolation {
    /// Warning text shown to the student.
    pub fn message(&self) -> String {
        format!("Add {} before adding {}.", self.missing.join(" and "), self.target)
    }
}

/// Check whether `target` may be added given what is already in the vessel.
/// Rules only constrain their own target; unrelated ids always pass.
pub fn check(
    rules: &[PreconditionRule],
    contents: &[String],
    target: &str,
) -> Result<(), RuleViolation> {
    for rule in rules {
        if rule.target != target {
            continue;
        }
        let missing: Vec<String> = rule
            .requires
            .iter()
            .filter(|req| !contents.iter().any(|c| c == *req))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(RuleViolation {
                target: target.to_string(),
                missing,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oxalic_rule() -> Vec<PreconditionRule> {
        vec![PreconditionRule {
            target: "oxalic-acid".to_string(),
            requires: vec!["h2so4".to_string()],
        }]
    }

    #[test]
    fn target_without_prerequisite_is_rejected() {
        let contents = vec!["kmno4".to_string()];
        let err = check(&oxalic_rule(), &contents, "oxalic-acid").unwrap_err();
        assert_eq!(err.missing, vec!["h2so4".to_string()]);
        assert!(err.message().contains("h2so4"));
    }

    #[test]
    fn target_with_prerequisite_passes() {
        let contents = vec!["kmno4".to_string(), "h2so4".to_string()];
        assert!(check(&oxalic_rule(), &contents, "oxalic-acid").is_ok());
    }

    #[test]
    fn unrelated_id_always_passes() {
        let contents = vec![];
        assert!(check(&oxalic_rule(), &contents, "kmno4").is_ok());
        assert!(check(&oxalic_rule(), &contents, "h2so4").is_ok());
    }

    #[test]
    fn multiple_missing_prerequisites_all_reported() {
        let rules = vec![PreconditionRule {
            target: "c".to_string(),
            requires: vec!["a".to_string(), "b".to_string()],
        }];
        let err = check(&rules, &[], "c").unwrap_err();
        assert_eq!(err.missing.len(), 2);
    }
}
