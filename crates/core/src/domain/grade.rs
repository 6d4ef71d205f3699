use std::fmt;

use super::DomainError;

/// A single criterion grade on the 0..=5 scale.
///
/// `0` is reserved for "could not be assessed" and is what every fallback path
/// produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grade(u8);

impl Grade {
    pub const MIN: u8 = 0;
    pub const MAX: u8 = 5;

    pub const NOT_ASSESSED: Grade = Grade(Self::MIN);

    pub fn new(value: i64) -> Result<Self, DomainError> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::InvalidGrade(value))
        }
    }

    /// Compile-time constructor for policy constants.
    pub(crate) const fn constant(value: u8) -> Self {
        assert!(value <= Self::MAX);
        Self(value)
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_assessed(self) -> bool {
        self != Self::NOT_ASSESSED
    }
}

impl Default for Grade {
    fn default() -> Self {
        Self::NOT_ASSESSED
    }
}

impl TryFrom<i64> for Grade {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Grade> for u8 {
    fn from(value: Grade) -> Self {
        value.value()
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.0, Self::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::Grade;
    use crate::domain::DomainError;

    #[test]
    fn valid_grade_is_created() {
        let grade = Grade::new(5).expect("5 should be valid");

        assert_eq!(grade.value(), 5);
        assert!(grade.is_assessed());
    }

    #[test]
    fn zero_means_not_assessed() {
        let grade = Grade::new(0).expect("0 should be valid");

        assert_eq!(grade, Grade::NOT_ASSESSED);
        assert_eq!(grade, Grade::default());
        assert!(!grade.is_assessed());
    }

    #[test]
    fn out_of_range_grades_are_rejected() {
        let err = Grade::new(6).expect_err("6 should be rejected");
        assert_eq!(err.to_string(), "invalid grade: 6. grade must be in [0, 5]");

        let err = Grade::try_from(-1).expect_err("-1 should be rejected");
        assert_eq!(err, DomainError::InvalidGrade(-1));
    }

    #[test]
    fn grade_displays_against_scale() {
        assert_eq!(Grade::new(3).expect("3 should be valid").to_string(), "3/5");
    }
}
