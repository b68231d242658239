//! Predicate tree structures
//!
//! A predicate is a tagged variant over attribute comparisons, LIKE
//! patterns, spatial relations and logical combinators, plus the two
//! constant predicates `MatchAll` and `MatchNone`. The serde form is a
//! tagged JSON object, which is what crosses the HTTP boundary — there
//! is no textual query language here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geometry::{DistanceUnit, Geometry};

/// Attribute comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonOp {
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl ComparisonOp {
    /// Operator symbol as rendered by `Display`
    pub fn symbol(&self) -> &'static str {
        match self {
            ComparisonOp::Eq => "=",
            ComparisonOp::Lt => "<",
            ComparisonOp::Le => "<=",
            ComparisonOp::Gt => ">",
            ComparisonOp::Ge => ">=",
        }
    }
}

/// Spatial relation kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpatialOp {
    Contains,
    Intersects,
    DWithin,
    Beyond,
    Bbox,
}

impl SpatialOp {
    /// Relation name as rendered by `Display`
    pub fn name(&self) -> &'static str {
        match self {
            SpatialOp::Contains => "CONTAINS",
            SpatialOp::Intersects => "INTERSECTS",
            SpatialOp::DWithin => "DWITHIN",
            SpatialOp::Beyond => "BEYOND",
            SpatialOp::Bbox => "BBOX",
        }
    }

    /// True for the distance-based relations, which require a threshold
    pub fn requires_distance(&self) -> bool {
        matches!(self, SpatialOp::DWithin | SpatialOp::Beyond)
    }
}

/// An attribute comparison node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    /// Attribute name
    pub attr: String,
    /// Comparison operator
    pub op: ComparisonOp,
    /// Literal to compare against
    pub value: Value,
    /// Whether string comparison respects case
    pub case_sensitive: bool,
}

/// A LIKE pattern node
///
/// Pattern wildcards are SQL-style: `%` matches any sequence, `_` a
/// single character. Matching semantics belong to the evaluator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Like {
    pub attr: String,
    pub pattern: String,
}

/// A spatial relation node
///
/// The reference geometry is opaque to this module: it is carried
/// through to the evaluator unmodified. `distance` and `units` are
/// present exactly for DWITHIN/BEYOND; `srs` only for BBOX.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpatialRelation {
    /// Geometry attribute name
    pub attr: String,
    /// Relation kind
    pub op: SpatialOp,
    /// Reference geometry
    pub geometry: Geometry,
    /// Distance threshold (DWITHIN/BEYOND only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Threshold units (DWITHIN/BEYOND only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub units: Option<DistanceUnit>,
    /// Spatial reference identifier, carried verbatim (BBOX only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub srs: Option<String>,
}

/// Logical combinator kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalOp {
    And,
    Or,
    Not,
}

impl LogicalOp {
    pub fn name(&self) -> &'static str {
        match self {
            LogicalOp::And => "AND",
            LogicalOp::Or => "OR",
            LogicalOp::Not => "NOT",
        }
    }
}

/// A logical combinator node with ordered operands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Logical {
    pub op: LogicalOp,
    pub operands: Vec<Predicate>,
}

/// A boolean-valued expression evaluated per feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Predicate {
    Comparison(Comparison),
    Spatial(SpatialRelation),
    Like(Like),
    Logical(Logical),
    /// Matches every feature; what a filterless query carries
    MatchAll,
    /// Matches nothing; the empty-IN sentinel
    MatchNone,
}

impl Predicate {
    /// Number of direct operands (1 for leaf nodes)
    pub fn operand_count(&self) -> usize {
        match self {
            Predicate::Logical(l) => l.operands.len(),
            _ => 1,
        }
    }

    /// True if this predicate can never match any feature
    pub fn is_exclusive(&self) -> bool {
        matches!(self, Predicate::MatchNone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comparison_op_symbols() {
        assert_eq!(ComparisonOp::Ge.symbol(), ">=");
        assert_eq!(ComparisonOp::Eq.symbol(), "=");
    }

    #[test]
    fn test_requires_distance() {
        assert!(SpatialOp::DWithin.requires_distance());
        assert!(SpatialOp::Beyond.requires_distance());
        assert!(!SpatialOp::Contains.requires_distance());
        assert!(!SpatialOp::Bbox.requires_distance());
    }

    #[test]
    fn test_serde_tagged_form() {
        let pred = Predicate::Comparison(Comparison {
            attr: "KIND".into(),
            op: ComparisonOp::Ge,
            value: json!(160100),
            case_sensitive: true,
        });

        let encoded = serde_json::to_value(&pred).unwrap();
        assert_eq!(encoded["kind"], "comparison");
        assert_eq!(encoded["attr"], "KIND");
        assert_eq!(encoded["op"], "ge");

        let decoded: Predicate = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, pred);
    }

    #[test]
    fn test_constant_predicates_roundtrip() {
        for pred in [Predicate::MatchAll, Predicate::MatchNone] {
            let encoded = serde_json::to_string(&pred).unwrap();
            let decoded: Predicate = serde_json::from_str(&encoded).unwrap();
            assert_eq!(decoded, pred);
        }
    }
}
