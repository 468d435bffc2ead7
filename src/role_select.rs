//! Role-selection indirection for the resolve stage (spec §4.3, §9).
//!
//! The resolve stage looks up the chosen role, not the task's stored role,
//! to locate the worker configuration and tag logs. Selection is behind a
//! single-method interface so an LLM-backed selector can be swapped in
//! without touching the stage executor.

/// Chooses a role for a resolve-stage attempt given the available registry.
pub trait RoleSelector {
    /// Returns the chosen role and a short rationale for the audit log.
    fn invoke(&self, available_roles: &[String], task_id: &str) -> (String, String);
}

/// Deterministic stub: always returns the first available role. Sufficient
/// for every test in spec §8, which only exercises the resolve stage's
/// write-back behavior, not role-selection quality.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstAvailableRoleSelector;

impl RoleSelector for FirstAvailableRoleSelector {
    fn invoke(&self, available_roles: &[String], _task_id: &str) -> (String, String) {
        let role = available_roles.first().cloned().unwrap_or_else(|| "implementer".to_string());
        (role, "deterministic first-available selection".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_available_selector_picks_first_role() {
        let selector = FirstAvailableRoleSelector;
        let roles = vec!["reviewer".to_string(), "implementer".to_string()];
        let (role, _) = selector.invoke(&roles, "T-1");
        assert_eq!(role, "reviewer");
    }

    #[test]
    fn first_available_selector_falls_back_when_registry_empty() {
        let selector = FirstAvailableRoleSelector;
        let (role, _) = selector.invoke(&[], "T-1");
        assert_eq!(role, "implementer");
    }
}
