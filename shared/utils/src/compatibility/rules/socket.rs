use buildcheck_models::{issue_codes, ComponentCategory, ComponentsMap, ValidationIssue};

use crate::compatibility::rule::{spec_text, ValidationRule};
use crate::error::BuildCheckResult;

/// CPU and motherboard must share a socket.
#[derive(Debug, Default, Clone, Copy)]
pub struct SocketCompatibilityRule;

impl SocketCompatibilityRule {
    pub const NAME: &'static str = "SocketCompatibility";
}

/// "LGA 1700", "lga-1700" and "LGA1700" all compare equal.
pub fn normalize_socket(socket: &str) -> String {
    socket
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect::<String>()
        .to_lowercase()
}

impl ValidationRule for SocketCompatibilityRule {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn validate(&self, components: &ComponentsMap) -> BuildCheckResult<Vec<ValidationIssue>> {
        let Some((cpu, motherboard)) =
            components.pair(ComponentCategory::Cpu, ComponentCategory::Motherboard)
        else {
            return Ok(Vec::new());
        };

        let cpu_socket = spec_text(cpu, &["socket"]);
        let board_socket = spec_text(motherboard, &["socket"]);

        let (cpu_socket, board_socket) = match (cpu_socket, board_socket) {
            (Some(a), Some(b))
                if !normalize_socket(&a).is_empty() && !normalize_socket(&b).is_empty() =>
            {
                (a, b)
            }
            _ => {
                return Ok(vec![ValidationIssue::warning(
                    issue_codes::UNKNOWN_SOCKET,
                    "Could not determine socket compatibility",
                )
                .with_details(format!(
                    "Socket information is missing for '{}' or '{}'. \
                     Verify manually that the CPU fits the motherboard.",
                    cpu.name, motherboard.name
                ))
                .between(&cpu.name, &motherboard.name)]);
            }
        };

        if normalize_socket(&cpu_socket) == normalize_socket(&board_socket) {
            return Ok(Vec::new());
        }

        Ok(vec![ValidationIssue::error(
            issue_codes::SOCKET_MISMATCH,
            format!(
                "CPU socket {} does not match motherboard socket {}",
                cpu_socket, board_socket
            ),
        )
        .with_details(format!(
            "'{}' needs a {} motherboard; '{}' is {}. \
             Pick a CPU and motherboard with the same socket.",
            cpu.name, cpu_socket, motherboard.name, board_socket
        ))
        .between(&cpu.name, &motherboard.name)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::rules::test_fixtures::product;
    use buildcheck_models::Severity;

    fn build(cpu_socket: Option<&str>, board_socket: Option<&str>) -> ComponentsMap {
        ComponentsMap::new()
            .with(ComponentCategory::Cpu, product("Ryzen 5 7600", &[("socket", cpu_socket)]))
            .with(
                ComponentCategory::Motherboard,
                product("B650M DS3H", &[("socket", board_socket)]),
            )
    }

    #[test]
    fn test_matching_sockets() {
        let issues = SocketCompatibilityRule.validate(&build(Some("AM5"), Some("AM5"))).unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_normalization_ignores_case_spaces_and_hyphens() {
        assert_eq!(normalize_socket("LGA 1700"), normalize_socket("lga-1700"));
        let issues = SocketCompatibilityRule.validate(&build(Some("AM5"), Some("am-5"))).unwrap();
        assert!(issues.is_empty());
    }

    #[test]
    fn test_mismatch_is_error() {
        let issues = SocketCompatibilityRule
            .validate(&build(Some("AM5"), Some("LGA 1700")))
            .unwrap();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].code, issue_codes::SOCKET_MISMATCH);
        assert_eq!(issues[0].severity, Severity::Error);
        assert_eq!(issues[0].component_a.as_deref(), Some("Ryzen 5 7600"));
        assert_eq!(issues[0].component_b.as_deref(), Some("B650M DS3H"));
        assert!(issues[0].message.contains("LGA 1700"));
    }

    #[test]
    fn test_missing_socket_is_warning() {
        for (cpu, board) in [(None, Some("AM5")), (Some("AM5"), None), (Some(" "), Some("AM5"))] {
            let issues = SocketCompatibilityRule.validate(&build(cpu, board)).unwrap();
            assert_eq!(issues.len(), 1);
            assert_eq!(issues[0].code, issue_codes::UNKNOWN_SOCKET);
            assert_eq!(issues[0].severity, Severity::Warning);
        }
    }

    #[test]
    fn test_skips_partial_build() {
        let cpu_only = ComponentsMap::new()
            .with(ComponentCategory::Cpu, product("Ryzen 5 7600", &[("socket", Some("AM5"))]));
        assert!(SocketCompatibilityRule.validate(&cpu_only).unwrap().is_empty());

        let board_only = ComponentsMap::new()
            .with(ComponentCategory::Motherboard, product("B650M", &[]));
        assert!(SocketCompatibilityRule.validate(&board_only).unwrap().is_empty());
    }
}
