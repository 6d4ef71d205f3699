use super::{Criterion, Grade, Similarity};

/// One graded criterion with its rationale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionGrade {
    criterion: Criterion,
    grade: Grade,
    comment: String,
}

impl CriterionGrade {
    pub fn new(criterion: Criterion, grade: Grade, comment: impl Into<String>) -> Self {
        Self {
            criterion,
            grade,
            comment: comment.into(),
        }
    }

    pub fn not_assessed(criterion: Criterion, comment: impl Into<String>) -> Self {
        Self::new(criterion, Grade::NOT_ASSESSED, comment)
    }

    pub fn criterion(&self) -> Criterion {
        self.criterion
    }

    pub fn grade(&self) -> Grade {
        self.grade
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }
}

/// The three reviewer-graded criteria. Always complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewGrades {
    correctness: CriterionGrade,
    optimality: CriterionGrade,
    style: CriterionGrade,
}

impl ReviewGrades {
    /// Builds the set by asking `entry` for the grade and comment of every
    /// reviewed criterion, so no criterion can be skipped or mislabelled.
    pub fn from_fn(mut entry: impl FnMut(Criterion) -> (Grade, String)) -> Self {
        let mut build = |criterion| {
            let (grade, comment) = entry(criterion);
            CriterionGrade::new(criterion, grade, comment)
        };

        Self {
            correctness: build(Criterion::Correctness),
            optimality: build(Criterion::Optimality),
            style: build(Criterion::Style),
        }
    }

    /// Uniform fallback used when the review could not be obtained or decoded.
    pub fn not_assessed(comment: &str) -> Self {
        Self::from_fn(|_| (Grade::NOT_ASSESSED, comment.to_string()))
    }

    pub fn correctness(&self) -> &CriterionGrade {
        &self.correctness
    }

    pub fn optimality(&self) -> &CriterionGrade {
        &self.optimality
    }

    pub fn style(&self) -> &CriterionGrade {
        &self.style
    }

    pub fn get(&self, criterion: Criterion) -> Option<&CriterionGrade> {
        match criterion {
            Criterion::Originality => None,
            Criterion::Correctness => Some(&self.correctness),
            Criterion::Optimality => Some(&self.optimality),
            Criterion::Style => Some(&self.style),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &CriterionGrade> {
        [&self.correctness, &self.optimality, &self.style].into_iter()
    }
}

/// Complete four-criterion report of one evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationReport {
    similarity: Similarity,
    originality: CriterionGrade,
    review: ReviewGrades,
}

impl EvaluationReport {
    pub const CRITERIA_COUNT: usize = Criterion::ALL.len();

    pub fn new(similarity: Similarity, originality: CriterionGrade, review: ReviewGrades) -> Self {
        debug_assert_eq!(originality.criterion(), Criterion::Originality);
        Self {
            similarity,
            originality,
            review,
        }
    }

    /// Raw similarity the originality grade was derived from.
    pub fn similarity(&self) -> Similarity {
        self.similarity
    }

    pub fn originality(&self) -> &CriterionGrade {
        &self.originality
    }

    pub fn review(&self) -> &ReviewGrades {
        &self.review
    }

    pub fn correctness(&self) -> &CriterionGrade {
        self.review.correctness()
    }

    pub fn optimality(&self) -> &CriterionGrade {
        self.review.optimality()
    }

    pub fn style(&self) -> &CriterionGrade {
        self.review.style()
    }

    pub fn get(&self, criterion: Criterion) -> &CriterionGrade {
        match criterion {
            Criterion::Originality => &self.originality,
            Criterion::Correctness => self.correctness(),
            Criterion::Optimality => self.optimality(),
            Criterion::Style => self.style(),
        }
    }

    /// Entries in report order: originality, correctness, optimality, style.
    pub fn iter(&self) -> impl Iterator<Item = &CriterionGrade> {
        std::iter::once(&self.originality).chain(self.review.iter())
    }

    /// Arithmetic mean over all four criteria, ungraded ones counting as zero.
    pub fn mean_grade(&self) -> f64 {
        let total: u32 = self
            .iter()
            .map(|entry| u32::from(entry.grade().value()))
            .sum();
        f64::from(total) / Self::CRITERIA_COUNT as f64
    }
}
