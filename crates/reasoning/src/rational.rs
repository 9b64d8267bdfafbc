//! `owl:rational` lexical handling (the extension regime's numeric datatype
//! beyond the core XSD family).
//!
//! Grounded on `OWLRLExtras.py`'s `_strToRational`: a rational literal is
//! `"numerator/denominator"` with an optional sign on the numerator, and two
//! rationals are value-equal when cross-multiplication agrees, not merely
//! when their lexical forms match (`3/4` and `6/8` denote the same value).

use rdf_model::vocab::owl;

/// A parsed `owl:rational` value, kept as an unreduced numerator/denominator
/// pair so lexical round-tripping stays exact; value comparisons cross-
/// multiply rather than relying on a reduced form.
#[derive(Debug, Clone, Copy)]
pub struct Rational {
    pub numerator: i64,
    pub denominator: i64,
}

impl Rational {
    /// Parse `"numerator/denominator"`, rejecting a zero or missing
    /// denominator and non-integer parts.
    pub fn parse(lexical: &str) -> Result<Self, String> {
        let (num_str, den_str) = lexical
            .split_once('/')
            .ok_or_else(|| format!("'{lexical}' is not a valid owl:rational (missing '/')"))?;
        let numerator: i64 = num_str
            .trim()
            .parse()
            .map_err(|_| format!("'{lexical}' has a non-integer numerator"))?;
        let denominator: i64 = den_str
            .trim()
            .parse()
            .map_err(|_| format!("'{lexical}' has a non-integer denominator"))?;
        if denominator == 0 {
            return Err(format!("'{lexical}' has a zero denominator"));
        }
        Ok(Rational { numerator, denominator })
    }

    /// Value equality by cross-multiplication, so `3/4` and `6/8` compare
    /// equal without either side being reduced first.
    pub fn value_eq(&self, other: &Rational) -> bool {
        i128::from(self.numerator) * i128::from(other.denominator)
            == i128::from(other.numerator) * i128::from(self.denominator)
    }
}

/// Validate a lexical form against `owl:rational`'s grammar, for use from
/// [`crate::datatypes::validate_lexical`]-style call sites once the
/// extension regime has registered the datatype.
pub fn validate_lexical(lexical: &str) -> Result<(), String> {
    Rational::parse(lexical).map(|_| ())
}

/// `owl:rational`'s IRI, for registration into the extension regime's
/// recognised-datatype set.
pub fn datatype_iri() -> &'static str {
    owl::RATIONAL
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_signed_fraction() {
        let r = Rational::parse("-3/4").unwrap();
        assert_eq!(r.numerator, -3);
        assert_eq!(r.denominator, 4);
    }

    #[test]
    fn rejects_zero_denominator() {
        assert!(Rational::parse("1/0").is_err());
    }

    #[test]
    fn rejects_missing_slash() {
        assert!(Rational::parse("5").is_err());
    }

    #[test]
    fn cross_multiplication_equates_equivalent_fractions() {
        let a = Rational::parse("3/4").unwrap();
        let b = Rational::parse("6/8").unwrap();
        assert!(a.value_eq(&b));
    }

    #[test]
    fn distinct_values_are_not_equal() {
        let a = Rational::parse("1/2").unwrap();
        let b = Rational::parse("1/3").unwrap();
        assert!(!a.value_eq(&b));
    }
}
