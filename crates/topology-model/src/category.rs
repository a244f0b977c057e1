use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Role of a node in the topology
///
/// Resolved once from the free-form kind label of a node. Service nodes form
/// the operational backbone of the graph, expression and constant nodes are
/// the auxiliary compute nodes that feed them.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    #[display("service")]
    Service,
    #[display("expression")]
    Expression,
    #[display("constant")]
    Constant,
}

impl NodeCategory {
    /// Classify a kind label, ignoring case. Unknown labels are services.
    pub fn from_kind(kind: &str) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "expr" | "expression" => Self::Expression,
            "const" | "constant" | "pmf" => Self::Constant,
            _ => Self::Service,
        }
    }

    pub fn is_service(self) -> bool {
        self == Self::Service
    }

    /// Expression and constant nodes
    pub fn is_auxiliary(self) -> bool {
        !self.is_service()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_labels() {
        assert_eq!(NodeCategory::from_kind("expr"), NodeCategory::Expression);
        assert_eq!(NodeCategory::from_kind("Expression"), NodeCategory::Expression);
        assert_eq!(NodeCategory::from_kind("CONST"), NodeCategory::Constant);
        assert_eq!(NodeCategory::from_kind("constant"), NodeCategory::Constant);
        assert_eq!(NodeCategory::from_kind("Pmf"), NodeCategory::Constant);
        assert_eq!(NodeCategory::from_kind("service"), NodeCategory::Service);
        assert_eq!(NodeCategory::from_kind("queue"), NodeCategory::Service);
        assert_eq!(NodeCategory::from_kind(""), NodeCategory::Service);
    }

    #[test]
    fn test_auxiliary() {
        assert!(NodeCategory::Expression.is_auxiliary());
        assert!(NodeCategory::Constant.is_auxiliary());
        assert!(NodeCategory::Service.is_service());
        assert!(!NodeCategory::Service.is_auxiliary());
    }

    #[test]
    fn test_display_matches_serde() {
        assert_eq!(NodeCategory::Constant.to_string(), "constant");
        assert_eq!(
            serde_json::to_string(&NodeCategory::Expression).unwrap(),
            "\"expression\""
        );
    }
}
