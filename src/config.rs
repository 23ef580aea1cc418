use serde::{Deserialize, Serialize};
use std::str::FromStr;

const DEFAULT_EPSILON: f64 = 1e-9;

/// Floating-point comparison policy used by [`crate::Matrix::approx_eq`].
///
/// Epsilons must be non-negative and not NaN, whether the value is parsed
/// with `FromStr` or deserialized.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(try_from = "ToleranceRepr", into = "ToleranceRepr")]
pub enum Tolerance {
    /// Plain IEEE-754 `==`.
    Exact,
    /// `|a - b| <= epsilon`
    Absolute { epsilon: f64 },
    /// `|a - b| <= epsilon * max(|a|, |b|)`
    Relative { epsilon: f64 },
}

#[derive(Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum ToleranceRepr {
    Exact,
    Absolute { epsilon: f64 },
    Relative { epsilon: f64 },
}

impl TryFrom<ToleranceRepr> for Tolerance {
    type Error = String;

    fn try_from(repr: ToleranceRepr) -> Result<Self, Self::Error> {
        match repr {
            ToleranceRepr::Exact => Ok(Tolerance::Exact),
            ToleranceRepr::Absolute { epsilon } => Ok(Tolerance::Absolute {
                epsilon: check_epsilon(epsilon)?,
            }),
            ToleranceRepr::Relative { epsilon } => Ok(Tolerance::Relative {
                epsilon: check_epsilon(epsilon)?,
            }),
        }
    }
}

impl From<Tolerance> for ToleranceRepr {
    fn from(tolerance: Tolerance) -> Self {
        match tolerance {
            Tolerance::Exact => ToleranceRepr::Exact,
            Tolerance::Absolute { epsilon } => ToleranceRepr::Absolute { epsilon },
            Tolerance::Relative { epsilon } => ToleranceRepr::Relative { epsilon },
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Tolerance::Absolute {
            epsilon: DEFAULT_EPSILON,
        }
    }
}

impl Tolerance {
    /// Returns true when `a` and `b` are equal under this tolerance.
    ///
    /// Equal infinities always match and NaN never does.
    pub fn within(&self, a: f64, b: f64) -> bool {
        if a == b {
            return true;
        }
        if !a.is_finite() || !b.is_finite() {
            return false;
        }
        let diff = (a - b).abs();
        match *self {
            Tolerance::Exact => false,
            Tolerance::Absolute { epsilon } => diff <= epsilon,
            Tolerance::Relative { epsilon } => diff <= epsilon * a.abs().max(b.abs()),
        }
    }
}

fn parse_epsilon(raw: Option<&str>) -> Result<f64, String> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_EPSILON);
    };
    let epsilon: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("Invalid epsilon '{}': {}", raw, e))?;
    check_epsilon(epsilon)
}

fn check_epsilon(epsilon: f64) -> Result<f64, String> {
    if !(epsilon >= 0.0) {
        return Err(format!(
            "Epsilon must be a non-negative number, got {}",
            epsilon
        ));
    }
    Ok(epsilon)
}

impl FromStr for Tolerance {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, epsilon) = match s.split_once(':') {
            Some((kind, eps)) => (kind, Some(eps)),
            None => (s, None),
        };
        match kind.trim().to_lowercase().as_str() {
            "exact" if epsilon.is_none() => Ok(Tolerance::Exact),
            "exact" => Err("Exact tolerance does not take an epsilon".to_string()),
            "absolute" | "abs" => Ok(Tolerance::Absolute {
                epsilon: parse_epsilon(epsilon)?,
            }),
            "relative" | "rel" => Ok(Tolerance::Relative {
                epsilon: parse_epsilon(epsilon)?,
            }),
            _ => Err(format!(
                "Unknown tolerance: {}. Expected one of `exact`, `absolute[:eps]`, `relative[:eps]`",
                s
            )),
        }
    }
}
