//! Predicate rendering
//!
//! Deterministic, human-readable text for logging and diagnostics.
//! Rendering loses nothing: attribute, operator and value are all
//! reproduced verbatim. This is output only — nothing here parses.

use std::fmt;

use serde_json::Value;

use super::ast::{Comparison, Like, Logical, LogicalOp, Predicate, SpatialRelation};

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Comparison(c) => c.fmt(f),
            Predicate::Spatial(s) => s.fmt(f),
            Predicate::Like(l) => l.fmt(f),
            Predicate::Logical(l) => l.fmt(f),
            Predicate::MatchAll => f.write_str("INCLUDE"),
            Predicate::MatchNone => f.write_str("EXCLUDE"),
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.attr, self.op.symbol())?;
        write_literal(f, &self.value)
    }
}

impl fmt::Display for Like {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} LIKE '{}'", self.attr, self.pattern)
    }
}

impl fmt::Display for SpatialRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({}, {}", self.op.name(), self.attr, self.geometry)?;
        if let (Some(distance), Some(units)) = (self.distance, self.units) {
            write!(f, ", {distance}, {units}")?;
        }
        if let Some(srs) = &self.srs {
            write!(f, ", {srs}")?;
        }
        f.write_str(")")
    }
}

impl fmt::Display for Logical {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.op {
            LogicalOp::Not => {
                f.write_str("NOT (")?;
                if let Some(operand) = self.operands.first() {
                    operand.fmt(f)?;
                }
                f.write_str(")")
            }
            op => {
                f.write_str("(")?;
                for (i, operand) in self.operands.iter().enumerate() {
                    if i > 0 {
                        write!(f, " {} ", op.name())?;
                    }
                    operand.fmt(f)?;
                }
                f.write_str(")")
            }
        }
    }
}

fn write_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(s) => write!(f, "'{s}'"),
        other => write!(f, "{other}"),
    }
}

#[cfg(test)]
mod tests {
    use crate::filter::{ComparisonOp, Predicate};
    use serde_json::json;

    #[test]
    fn test_comparison_rendering_is_lossless() {
        let pred = Predicate::comparison("KIND", ComparisonOp::Ge, json!(160100), true).unwrap();
        assert_eq!(pred.to_string(), "KIND >= 160100");
        // deterministic
        assert_eq!(pred.to_string(), pred.to_string());
    }

    #[test]
    fn test_string_literal_is_quoted() {
        let pred = Predicate::equal("NAME", "西安博纳影视培训学校").unwrap();
        assert_eq!(pred.to_string(), "NAME = '西安博纳影视培训学校'");
    }

    #[test]
    fn test_like_rendering() {
        let pred = Predicate::like("NAME", "%学校").unwrap();
        assert_eq!(pred.to_string(), "NAME LIKE '%学校'");
    }

    #[test]
    fn test_in_set_rendering() {
        let pred = Predicate::in_set("KIND", ["a", "b"]).unwrap();
        assert_eq!(pred.to_string(), "(KIND = 'a' OR KIND = 'b')");
    }

    #[test]
    fn test_spatial_rendering() {
        let geom = crate::geometry::wkt::parse("POINT (108 35.5)").unwrap();
        let pred = Predicate::spatial(
            "the_geom",
            crate::filter::SpatialOp::DWithin,
            geom,
            Some(1000.0),
            Some("meters"),
        )
        .unwrap();
        assert_eq!(
            pred.to_string(),
            "DWITHIN(the_geom, POINT (108 35.5), 1000, meters)"
        );
    }

    #[test]
    fn test_bbox_rendering() {
        let pred = Predicate::bbox("the_geom", 106.5, 35.0, 107.5, 36.0, "EPSG:4326").unwrap();
        assert_eq!(
            pred.to_string(),
            "BBOX(the_geom, ENVELOPE (106.5, 107.5, 35, 36), EPSG:4326)"
        );
    }

    #[test]
    fn test_constants_render_as_constants() {
        assert_eq!(Predicate::MatchAll.to_string(), "INCLUDE");
        assert_eq!(Predicate::MatchNone.to_string(), "EXCLUDE");
    }
}
