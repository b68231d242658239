//! Predicate construction
//!
//! The whole builder surface lives here as associated functions on
//! [`Predicate`]: there is no factory object and no shared state, so
//! calls are independent pure functions safe to invoke from any thread.
//! Reference geometries arrive already parsed; WKT reading is the
//! caller's explicit step (`geometry::wkt::parse`).

use serde_json::Value;

use crate::geometry::{BoundingBox, DistanceUnit, Geometry};

use super::ast::{
    Comparison, ComparisonOp, Like, Logical, LogicalOp, Predicate, SpatialOp, SpatialRelation,
};
use super::errors::{FilterError, FilterResult};

impl Predicate {
    /// Build an attribute comparison
    pub fn comparison(
        attr: impl Into<String>,
        op: ComparisonOp,
        value: impl Into<Value>,
        case_sensitive: bool,
    ) -> FilterResult<Self> {
        let attr = non_empty_attr(attr)?;
        Ok(Predicate::Comparison(Comparison {
            attr,
            op,
            value: value.into(),
            case_sensitive,
        }))
    }

    /// Case-sensitive equality comparison
    pub fn equal(attr: impl Into<String>, value: impl Into<Value>) -> FilterResult<Self> {
        Self::comparison(attr, ComparisonOp::Eq, value, true)
    }

    /// Build a LIKE pattern predicate (`%` and `_` wildcards)
    pub fn like(attr: impl Into<String>, pattern: impl Into<String>) -> FilterResult<Self> {
        let attr = non_empty_attr(attr)?;
        Ok(Predicate::Like(Like {
            attr,
            pattern: pattern.into(),
        }))
    }

    /// Build a spatial relation predicate
    ///
    /// `distance` and `units` are required for DWITHIN and BEYOND and
    /// forbidden for every other relation.
    pub fn spatial(
        attr: impl Into<String>,
        op: SpatialOp,
        geometry: Geometry,
        distance: Option<f64>,
        units: Option<&str>,
    ) -> FilterResult<Self> {
        let attr = non_empty_attr(attr)?;

        let (distance, units) = if op.requires_distance() {
            let d = distance.ok_or_else(|| {
                FilterError::invalid(format!("{} requires a distance", op.name()))
            })?;
            if !d.is_finite() || d < 0.0 {
                return Err(FilterError::invalid(format!(
                    "{} distance must be a non-negative number",
                    op.name()
                )));
            }
            let unit_name = units.ok_or_else(|| {
                FilterError::invalid(format!("{} requires distance units", op.name()))
            })?;
            let unit = DistanceUnit::parse(unit_name)
                .ok_or_else(|| FilterError::invalid(format!("unknown distance unit: {unit_name}")))?;
            (Some(d), Some(unit))
        } else {
            if distance.is_some() || units.is_some() {
                return Err(FilterError::invalid(format!(
                    "{} does not take a distance",
                    op.name()
                )));
            }
            (None, None)
        };

        Ok(Predicate::Spatial(SpatialRelation {
            attr,
            op,
            geometry,
            distance,
            units,
            srs: None,
        }))
    }

    /// Build an axis-aligned bounding-box predicate
    pub fn bbox(
        attr: impl Into<String>,
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
        srs: impl Into<String>,
    ) -> FilterResult<Self> {
        let attr = non_empty_attr(attr)?;
        if min_x > max_x || min_y > max_y {
            return Err(FilterError::invalid(format!(
                "inverted bounding box: ({min_x}, {min_y}) .. ({max_x}, {max_y})"
            )));
        }
        Ok(Predicate::Spatial(SpatialRelation {
            attr,
            op: SpatialOp::Bbox,
            geometry: Geometry::Envelope(BoundingBox::new(min_x, min_y, max_x, max_y)),
            distance: None,
            units: None,
            srs: Some(srs.into()),
        }))
    }

    /// Build the IN predicate: an OR over one equality per match value
    ///
    /// Operand order follows the input order. An empty value sequence
    /// yields [`Predicate::MatchNone`] rather than an OR of zero
    /// operands, which evaluators reject.
    pub fn in_set<S: Into<Value>>(
        attr: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> FilterResult<Self> {
        let attr = non_empty_attr(attr)?;
        let operands = values
            .into_iter()
            .map(|v| {
                Predicate::Comparison(Comparison {
                    attr: attr.clone(),
                    op: ComparisonOp::Eq,
                    value: v.into(),
                    case_sensitive: true,
                })
            })
            .collect::<Vec<_>>();

        if operands.is_empty() {
            return Ok(Predicate::MatchNone);
        }
        Ok(Predicate::Logical(Logical {
            op: LogicalOp::Or,
            operands,
        }))
    }

    /// Conjunction of all operands
    pub fn and(operands: Vec<Predicate>) -> FilterResult<Self> {
        combine(LogicalOp::And, operands)
    }

    /// Disjunction of all operands
    pub fn or(operands: Vec<Predicate>) -> FilterResult<Self> {
        combine(LogicalOp::Or, operands)
    }

    /// Negation
    pub fn negate(operand: Predicate) -> Self {
        Predicate::Logical(Logical {
            op: LogicalOp::Not,
            operands: vec![operand],
        })
    }
}

fn combine(op: LogicalOp, operands: Vec<Predicate>) -> FilterResult<Predicate> {
    if operands.is_empty() {
        return Err(FilterError::invalid(format!(
            "{} requires at least one operand",
            op.name()
        )));
    }
    Ok(Predicate::Logical(Logical { op, operands }))
}

fn non_empty_attr(attr: impl Into<String>) -> FilterResult<String> {
    let attr = attr.into();
    if attr.trim().is_empty() {
        return Err(FilterError::invalid("attribute name must not be empty"));
    }
    Ok(attr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comparison_rejects_empty_attr() {
        let result = Predicate::comparison("", ComparisonOp::Eq, json!(1), true);
        assert!(matches!(result, Err(FilterError::InvalidArgument(_))));
    }

    #[test]
    fn test_spatial_distance_rules() {
        let point = Geometry::point(108.0, 35.5);

        // required for DWITHIN
        let missing = Predicate::spatial("the_geom", SpatialOp::DWithin, point.clone(), None, None);
        assert!(matches!(missing, Err(FilterError::InvalidArgument(_))));

        // forbidden for CONTAINS
        let extra = Predicate::spatial(
            "the_geom",
            SpatialOp::Contains,
            point.clone(),
            Some(10.0),
            Some("meters"),
        );
        assert!(matches!(extra, Err(FilterError::InvalidArgument(_))));

        // unknown unit
        let bad_unit = Predicate::spatial(
            "the_geom",
            SpatialOp::DWithin,
            point.clone(),
            Some(10.0),
            Some("cubits"),
        );
        assert!(matches!(bad_unit, Err(FilterError::InvalidArgument(_))));

        let ok = Predicate::spatial("the_geom", SpatialOp::DWithin, point, Some(10.0), Some("km"));
        assert!(ok.is_ok());
    }

    #[test]
    fn test_bbox_rejects_inverted_box() {
        let result = Predicate::bbox("the_geom", 2.0, 2.0, 1.0, 1.0, "EPSG:4326");
        assert!(matches!(result, Err(FilterError::InvalidArgument(_))));
    }

    #[test]
    fn test_in_set_preserves_order() {
        let pred = Predicate::in_set("KIND", ["110304", "110303", "130201"]).unwrap();
        match pred {
            Predicate::Logical(Logical {
                op: LogicalOp::Or,
                operands,
            }) => {
                assert_eq!(operands.len(), 3);
                let values: Vec<_> = operands
                    .iter()
                    .map(|p| match p {
                        Predicate::Comparison(c) => c.value.as_str().unwrap().to_string(),
                        other => panic!("expected comparison, got {other:?}"),
                    })
                    .collect();
                assert_eq!(values, ["110304", "110303", "130201"]);
            }
            other => panic!("expected OR, got {other:?}"),
        }
    }

    #[test]
    fn test_in_set_empty_is_match_none() {
        let pred = Predicate::in_set("KIND", Vec::<String>::new()).unwrap();
        assert_eq!(pred, Predicate::MatchNone);
        assert!(pred.is_exclusive());
    }

    #[test]
    fn test_and_or_reject_zero_operands() {
        assert!(matches!(
            Predicate::and(vec![]),
            Err(FilterError::InvalidArgument(_))
        ));
        assert!(matches!(
            Predicate::or(vec![]),
            Err(FilterError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_negate_wraps_single_operand() {
        let inner = Predicate::equal("NAME", "x").unwrap();
        let negated = Predicate::negate(inner);
        assert_eq!(negated.operand_count(), 1);
    }
}
