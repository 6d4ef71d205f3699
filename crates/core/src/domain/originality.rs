//! Anti-plagiarism policy: maps template similarity to an originality grade.

use std::fmt;

use super::{Criterion, CriterionGrade, Grade};

/// Outcome of a similarity measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Similarity {
    Measured(f64),
    Unavailable,
}

impl Similarity {
    /// Non-finite scores carry no signal and collapse to `Unavailable`.
    pub fn from_score(score: f64) -> Self {
        if score.is_finite() {
            Self::Measured(score)
        } else {
            Self::Unavailable
        }
    }

    pub fn score(self) -> Option<f64> {
        match self {
            Self::Measured(score) => Some(score),
            Self::Unavailable => None,
        }
    }
}

impl fmt::Display for Similarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Measured(score) => write!(f, "{score:.4}"),
            Self::Unavailable => f.write_str("N/A"),
        }
    }
}

/// Above this similarity a submission is treated as a copy of the template.
pub const PLAGIARISM_THRESHOLD: f64 = 0.95;
/// Above this similarity a submission is treated as a superficial rename.
pub const HIGH_SIMILARITY_THRESHOLD: f64 = 0.80;

pub const PLAGIARISM_GRADE: Grade = Grade::constant(1);
pub const HIGH_SIMILARITY_GRADE: Grade = Grade::constant(2);
pub const ORIGINAL_GRADE: Grade = Grade::constant(5);

pub const PLAGIARISM_COMMENT: &str = "Code is practically identical to the template (plagiarism).";
pub const HIGH_SIMILARITY_COMMENT: &str = "Very high similarity, most likely a simple rename.";
pub const ORIGINAL_COMMENT: &str = "Code structure is sufficiently original.";
pub const NOT_PERFORMED_COMMENT: &str = "Originality assessment was not performed.";

/// A similarity band: applies when the score is strictly above `above`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OriginalityBand {
    pub above: f64,
    pub grade: Grade,
    pub comment: &'static str,
}

/// Bands checked in order; the first match wins.
pub const ORIGINALITY_BANDS: [OriginalityBand; 2] = [
    OriginalityBand {
        above: PLAGIARISM_THRESHOLD,
        grade: PLAGIARISM_GRADE,
        comment: PLAGIARISM_COMMENT,
    },
    OriginalityBand {
        above: HIGH_SIMILARITY_THRESHOLD,
        grade: HIGH_SIMILARITY_GRADE,
        comment: HIGH_SIMILARITY_COMMENT,
    },
];

pub fn score_originality(similarity: Similarity) -> CriterionGrade {
    let Some(score) = similarity.score().filter(|score| score.is_finite()) else {
        return CriterionGrade::not_assessed(Criterion::Originality, NOT_PERFORMED_COMMENT);
    };

    let (grade, comment) = ORIGINALITY_BANDS
        .iter()
        .find(|band| score > band.above)
        .map_or((ORIGINAL_GRADE, ORIGINAL_COMMENT), |band| {
            (band.grade, band.comment)
        });

    CriterionGrade::new(Criterion::Originality, grade, comment)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade_for(score: f64) -> u8 {
        score_originality(Similarity::Measured(score)).grade().value()
    }

    #[test]
    fn near_identical_code_is_plagiarism() {
        for score in [0.951, 0.97, 0.99, 1.0] {
            assert_eq!(grade_for(score), 1, "similarity {score}");
        }
        assert_eq!(
            score_originality(Similarity::Measured(0.99)).comment(),
            PLAGIARISM_COMMENT
        );
    }

    #[test]
    fn high_similarity_is_a_rename() {
        for score in [0.8001, 0.85, 0.9, 0.95] {
            assert_eq!(grade_for(score), 2, "similarity {score}");
        }
    }

    #[test]
    fn low_similarity_is_original() {
        for score in [0.0, 0.25, 0.5, 0.79, 0.8] {
            assert_eq!(grade_for(score), 5, "similarity {score}");
        }
    }

    #[test]
    fn scores_outside_unit_range_still_compare() {
        assert_eq!(grade_for(-0.3), 5);
        assert_eq!(grade_for(1.7), 1);
    }

    #[test]
    fn unavailable_similarity_is_not_assessed() {
        let entry = score_originality(Similarity::Unavailable);

        assert_eq!(entry.criterion(), Criterion::Originality);
        assert_eq!(entry.grade(), Grade::NOT_ASSESSED);
        assert_eq!(entry.comment(), NOT_PERFORMED_COMMENT);
    }

    #[test]
    fn non_finite_scores_are_unavailable() {
        assert_eq!(Similarity::from_score(f64::NAN), Similarity::Unavailable);
        assert_eq!(Similarity::from_score(f64::INFINITY), Similarity::Unavailable);
        for score in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let entry = score_originality(Similarity::Measured(score));
            assert_eq!(entry.grade(), Grade::NOT_ASSESSED, "similarity {score}");
            assert_eq!(entry.comment(), NOT_PERFORMED_COMMENT);
            assert_eq!(entry, score_originality(Similarity::from_score(score)));
        }
    }

    #[test]
    fn similarity_displays_like_the_report() {
        assert_eq!(Similarity::Measured(0.97312).to_string(), "0.9731");
        assert_eq!(Similarity::Unavailable.to_string(), "N/A");
    }
}
