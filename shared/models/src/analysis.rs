//! Analysis result models.
//!
//! A [`BuildAnalysis`] is what the compatibility engine hands back to its
//! callers: an overall status, an estimated power draw and the graded issues
//! found by each rule, in rule-execution order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recommended issue codes. Rules may emit others; consumers should treat
/// unknown codes as generic issues.
pub mod issue_codes {
    pub const SOCKET_MISMATCH: &str = "SOCKET_MISMATCH";
    pub const UNKNOWN_SOCKET: &str = "UNKNOWN_SOCKET";
    pub const INSUFFICIENT_WATTAGE: &str = "INSUFFICIENT_WATTAGE";
    pub const LOW_WATTAGE_HEADROOM: &str = "LOW_WATTAGE_HEADROOM";
    pub const UNKNOWN_POWER: &str = "UNKNOWN_POWER";
    pub const MEMORY_TYPE_MISMATCH: &str = "MEMORY_TYPE_MISMATCH";
    pub const UNKNOWN_MEMORY_TYPE: &str = "UNKNOWN_MEMORY_TYPE";
    pub const GPU_TOO_LONG: &str = "GPU_TOO_LONG";
    pub const COOLER_TOO_TALL: &str = "COOLER_TOO_TALL";
    pub const INTERNAL_VALIDATION_ERROR: &str = "INTERNAL_VALIDATION_ERROR";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Overall verdict for a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildStatus {
    Valid,
    Warning,
    Incompatible,
}

impl BuildStatus {
    /// Any error makes the build incompatible; otherwise any warning makes it
    /// a warning. Info-only and empty lists are valid.
    pub fn from_issues(issues: &[ValidationIssue]) -> Self {
        if issues.iter().any(|i| i.severity == Severity::Error) {
            Self::Incompatible
        } else if issues.iter().any(|i| i.severity == Severity::Warning) {
            Self::Warning
        } else {
            Self::Valid
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Valid => "valid",
            Self::Warning => "warning",
            Self::Incompatible => "incompatible",
        }
    }
}

impl std::fmt::Display for BuildStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BuildStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "valid" => Ok(Self::Valid),
            "warning" => Ok(Self::Warning),
            "incompatible" => Ok(Self::Incompatible),
            other => Err(format!("Unknown build status: {}", other)),
        }
    }
}

/// One problem detected in a build.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub code: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_a: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component_b: Option<String>,
}

impl ValidationIssue {
    pub fn new(code: impl Into<String>, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            severity,
            message: message.into(),
            details: None,
            component_a: None,
            component_b: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Error, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Warning, message)
    }

    pub fn info(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(code, Severity::Info, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Names the implicated products so clients can highlight them.
    pub fn between(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.component_a = Some(a.into());
        self.component_b = Some(b.into());
        self
    }

    pub fn involving(mut self, a: impl Into<String>) -> Self {
        self.component_a = Some(a.into());
        self
    }
}

/// Result of running the compatibility engine over a components map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildAnalysis {
    pub status: BuildStatus,
    pub estimated_wattage: u32,
    pub issues: Vec<ValidationIssue>,
    pub analyzed_at: DateTime<Utc>,
}

impl BuildAnalysis {
    /// Assembles an analysis, deriving the status from the issues.
    pub fn new(estimated_wattage: u32, issues: Vec<ValidationIssue>) -> Self {
        Self {
            status: BuildStatus::from_issues(&issues),
            estimated_wattage,
            issues,
            analyzed_at: Utc::now(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.issues.iter().any(|i| i.code == code)
    }

    pub fn is_compatible(&self) -> bool {
        self.status != BuildStatus::Incompatible
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }
}
