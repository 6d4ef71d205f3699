use std::fmt;

/// The four fixed grading criteria, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Criterion {
    Originality,
    Correctness,
    Optimality,
    Style,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::Originality,
        Criterion::Correctness,
        Criterion::Optimality,
        Criterion::Style,
    ];

    /// Criteria graded by the reviewer model.
    pub const REVIEWED: [Criterion; 3] = [
        Criterion::Correctness,
        Criterion::Optimality,
        Criterion::Style,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Criterion::Originality => "originality",
            Criterion::Correctness => "correctness",
            Criterion::Optimality => "optimality",
            Criterion::Style => "style",
        }
    }

    /// Key the reviewer model must use for this criterion in its JSON answer.
    ///
    /// Originality is measured, not reviewed, so it has no key.
    pub fn review_key(self) -> Option<&'static str> {
        match self {
            Criterion::Originality => None,
            Criterion::Correctness => Some("Правильность"),
            Criterion::Optimality => Some("Оптимальность"),
            Criterion::Style => Some("Стиль"),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Criterion;

    #[test]
    fn only_reviewed_criteria_have_review_keys() {
        assert_eq!(Criterion::Originality.review_key(), None);
        for criterion in Criterion::REVIEWED {
            assert!(criterion.review_key().is_some(), "{criterion} needs a key");
        }
    }

    #[test]
    fn report_order_starts_with_originality() {
        assert_eq!(Criterion::ALL[0], Criterion::Originality);
        assert_eq!(&Criterion::ALL[1..], &Criterion::REVIEWED);
    }
}
