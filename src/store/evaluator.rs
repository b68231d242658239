//! Predicate evaluation
//!
//! Evaluates predicate trees against features, strictly: no type
//! coercion, missing attributes and null values never match, a feature
//! without geometry never matches a spatial relation.

use std::cmp::Ordering;

use serde_json::Value;

use crate::feature::Feature;
use crate::filter::{Comparison, ComparisonOp, Like, Logical, LogicalOp, Predicate, SpatialOp, SpatialRelation};

/// Evaluates predicates against features
pub struct PredicateEvaluator;

impl PredicateEvaluator {
    /// Checks if a feature matches the predicate
    pub fn matches(feature: &Feature, predicate: &Predicate) -> bool {
        match predicate {
            Predicate::Comparison(c) => Self::matches_comparison(feature, c),
            Predicate::Like(l) => Self::matches_like(feature, l),
            Predicate::Spatial(s) => Self::matches_spatial(feature, s),
            Predicate::Logical(l) => Self::matches_logical(feature, l),
            Predicate::MatchAll => true,
            Predicate::MatchNone => false,
        }
    }

    fn matches_logical(feature: &Feature, logical: &Logical) -> bool {
        match logical.op {
            LogicalOp::And => logical
                .operands
                .iter()
                .all(|p| Self::matches(feature, p)),
            LogicalOp::Or => logical
                .operands
                .iter()
                .any(|p| Self::matches(feature, p)),
            LogicalOp::Not => logical
                .operands
                .first()
                .is_some_and(|p| !Self::matches(feature, p)),
        }
    }

    fn matches_comparison(feature: &Feature, comparison: &Comparison) -> bool {
        let actual = match feature.attribute(&comparison.attr) {
            Some(v) if !v.is_null() => v,
            _ => return false,
        };

        let ordering = match compare_values(actual, &comparison.value, comparison.case_sensitive) {
            Some(o) => o,
            None => return false, // incomparable types never match
        };

        match comparison.op {
            ComparisonOp::Eq => ordering == Ordering::Equal,
            ComparisonOp::Lt => ordering == Ordering::Less,
            ComparisonOp::Le => ordering != Ordering::Greater,
            ComparisonOp::Gt => ordering == Ordering::Greater,
            ComparisonOp::Ge => ordering != Ordering::Less,
        }
    }

    fn matches_like(feature: &Feature, like: &Like) -> bool {
        match feature.attribute(&like.attr).and_then(Value::as_str) {
            Some(s) => like_match(s, &like.pattern),
            None => false,
        }
    }

    fn matches_spatial(feature: &Feature, relation: &SpatialRelation) -> bool {
        let geometry = match &feature.geometry {
            Some(g) => g,
            None => return false,
        };

        match relation.op {
            SpatialOp::Contains => geometry.contains(&relation.geometry),
            SpatialOp::Intersects => geometry.intersects(&relation.geometry),
            SpatialOp::Bbox => geometry
                .bounding_box()
                .overlaps(&relation.geometry.bounding_box()),
            SpatialOp::DWithin | SpatialOp::Beyond => {
                // Construction guarantees distance and units are present.
                let threshold = match (relation.distance, relation.units) {
                    (Some(d), Some(u)) => u.to_base(d),
                    _ => return false,
                };
                let distance = geometry.distance(&relation.geometry);
                if relation.op == SpatialOp::DWithin {
                    distance <= threshold
                } else {
                    distance > threshold
                }
            }
        }
    }
}

/// Compare two JSON values for ordering (no coercion)
///
/// Numbers compare with numbers, strings with strings, booleans with
/// booleans. Everything else is incomparable.
fn compare_values(actual: &Value, expected: &Value, case_sensitive: bool) -> Option<Ordering> {
    match (actual, expected) {
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(ai), Some(bi)) = (a.as_i64(), b.as_i64()) {
                return Some(ai.cmp(&bi));
            }
            let af = a.as_f64()?;
            let bf = b.as_f64()?;
            af.partial_cmp(&bf)
        }
        (Value::String(a), Value::String(b)) => {
            if case_sensitive {
                Some(a.cmp(b))
            } else {
                Some(a.to_lowercase().cmp(&b.to_lowercase()))
            }
        }
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// SQL LIKE matching: `%` any sequence, `_` exactly one character
fn like_match(value: &str, pattern: &str) -> bool {
    let value: Vec<char> = value.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();
    like_match_at(&value, &pattern)
}

fn like_match_at(value: &[char], pattern: &[char]) -> bool {
    match pattern.first() {
        None => value.is_empty(),
        Some('%') => {
            // Try the rest of the pattern at every position.
            (0..=value.len()).any(|i| like_match_at(&value[i..], &pattern[1..]))
        }
        Some('_') => !value.is_empty() && like_match_at(&value[1..], &pattern[1..]),
        Some(c) => value.first() == Some(c) && like_match_at(&value[1..], &pattern[1..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::FeatureBuilder;
    use crate::filter::Predicate;
    use crate::geometry::Geometry;
    use serde_json::json;

    fn school() -> Feature {
        FeatureBuilder::new()
            .attribute("NAME", "西安博纳影视培训学校")
            .attribute("KIND", 160100)
            .geometry(Geometry::point(108.0, 35.5))
            .build()
    }

    #[test]
    fn test_equality_match() {
        let feature = school();
        let pred = Predicate::equal("NAME", "西安博纳影视培训学校").unwrap();
        assert!(PredicateEvaluator::matches(&feature, &pred));

        let pred = Predicate::equal("NAME", "别的学校").unwrap();
        assert!(!PredicateEvaluator::matches(&feature, &pred));
    }

    #[test]
    fn test_no_type_coercion() {
        let feature = school();
        // String "160100" does not match integer 160100
        let pred = Predicate::equal("KIND", "160100").unwrap();
        assert!(!PredicateEvaluator::matches(&feature, &pred));
    }

    #[test]
    fn test_range_comparison() {
        let feature = school();
        let ge = Predicate::comparison("KIND", ComparisonOp::Ge, json!(160100), true).unwrap();
        let gt = Predicate::comparison("KIND", ComparisonOp::Gt, json!(160100), true).unwrap();
        let lt = Predicate::comparison("KIND", ComparisonOp::Lt, json!(200000), true).unwrap();

        assert!(PredicateEvaluator::matches(&feature, &ge));
        assert!(!PredicateEvaluator::matches(&feature, &gt));
        assert!(PredicateEvaluator::matches(&feature, &lt));
    }

    #[test]
    fn test_case_insensitive_comparison() {
        let feature = FeatureBuilder::new().attribute("code", "ABC").build();
        let sensitive = Predicate::comparison("code", ComparisonOp::Eq, json!("abc"), true).unwrap();
        let insensitive =
            Predicate::comparison("code", ComparisonOp::Eq, json!("abc"), false).unwrap();

        assert!(!PredicateEvaluator::matches(&feature, &sensitive));
        assert!(PredicateEvaluator::matches(&feature, &insensitive));
    }

    #[test]
    fn test_missing_and_null_never_match() {
        let feature = FeatureBuilder::new().attribute("a", json!(null)).build();
        let on_null = Predicate::equal("a", json!(null)).unwrap();
        let on_missing = Predicate::equal("b", "x").unwrap();

        assert!(!PredicateEvaluator::matches(&feature, &on_null));
        assert!(!PredicateEvaluator::matches(&feature, &on_missing));
    }

    #[test]
    fn test_like_wildcards() {
        let feature = school();
        assert!(PredicateEvaluator::matches(
            &feature,
            &Predicate::like("NAME", "%学校").unwrap()
        ));
        assert!(PredicateEvaluator::matches(
            &feature,
            &Predicate::like("NAME", "西安%").unwrap()
        ));
        assert!(!PredicateEvaluator::matches(
            &feature,
            &Predicate::like("NAME", "%医院").unwrap()
        ));
        // _ is exactly one character
        assert!(PredicateEvaluator::matches(
            &FeatureBuilder::new().attribute("c", "ab").build(),
            &Predicate::like("c", "a_").unwrap()
        ));
        assert!(!PredicateEvaluator::matches(
            &FeatureBuilder::new().attribute("c", "abc").build(),
            &Predicate::like("c", "a_").unwrap()
        ));
    }

    #[test]
    fn test_not_combinator() {
        let feature = school();
        let pred = Predicate::negate(Predicate::equal("NAME", "别的学校").unwrap());
        assert!(PredicateEvaluator::matches(&feature, &pred));
    }

    #[test]
    fn test_spatial_without_geometry_never_matches() {
        let feature = FeatureBuilder::new().attribute("NAME", "no geom").build();
        let pred = Predicate::bbox("the_geom", 0.0, 0.0, 180.0, 90.0, "EPSG:4326").unwrap();
        assert!(!PredicateEvaluator::matches(&feature, &pred));
    }

    #[test]
    fn test_bbox_match() {
        let feature = school();
        let inside = Predicate::bbox("the_geom", 106.0, 35.0, 109.0, 36.0, "EPSG:4326").unwrap();
        let outside = Predicate::bbox("the_geom", 116.0, 39.0, 117.0, 40.0, "EPSG:4326").unwrap();

        assert!(PredicateEvaluator::matches(&feature, &inside));
        assert!(!PredicateEvaluator::matches(&feature, &outside));
    }

    #[test]
    fn test_dwithin_and_beyond() {
        let feature = school();
        let origin = Geometry::point(108.0, 35.5);

        let near = Predicate::spatial(
            "the_geom",
            SpatialOp::DWithin,
            origin.clone(),
            Some(1.0),
            Some("meters"),
        )
        .unwrap();
        let beyond = Predicate::spatial(
            "the_geom",
            SpatialOp::Beyond,
            origin,
            Some(1.0),
            Some("meters"),
        )
        .unwrap();

        assert!(PredicateEvaluator::matches(&feature, &near));
        assert!(!PredicateEvaluator::matches(&feature, &beyond));
    }

    #[test]
    fn test_in_set_evaluation() {
        let feature = school();
        let hit = Predicate::in_set("KIND", [json!(110304), json!(160100)]).unwrap();
        let miss = Predicate::in_set("KIND", [json!(110304), json!(110303)]).unwrap();

        assert!(PredicateEvaluator::matches(&feature, &hit));
        assert!(!PredicateEvaluator::matches(&feature, &miss));
    }
}
