use super::{EvaluationReport, Grade};

/// Correctness grades strictly above this pass the submission.
pub const PASS_THRESHOLD: Grade = Grade::constant(3);

/// Derived summary of a report: the single authoritative pass decision plus
/// the numbers shown to the student.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateResult {
    pub mean_grade: f64,
    pub correctness_grade: Grade,
    pub passed: bool,
}

impl AggregateResult {
    pub fn from_report(report: &EvaluationReport) -> Self {
        let correctness_grade = report.correctness().grade();
        Self {
            mean_grade: report.mean_grade(),
            correctness_grade,
            passed: correctness_grade > PASS_THRESHOLD,
        }
    }

    /// Points credited for a task worth `task_points`; nothing unless passed.
    pub fn awarded_points(&self, task_points: u32) -> u32 {
        if self.passed { task_points } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Criterion, CriterionGrade, ReviewGrades, Similarity};

    fn report_with_correctness(value: i64) -> EvaluationReport {
        let correctness = Grade::new(value).expect("test grade should be valid");
        EvaluationReport::new(
            Similarity::Measured(0.5),
            CriterionGrade::new(Criterion::Originality, Grade::constant(5), "original"),
            ReviewGrades::from_fn(|criterion| match criterion {
                Criterion::Correctness => (correctness, "correctness".to_string()),
                _ => (Grade::constant(4), "fine".to_string()),
            }),
        )
    }

    #[test]
    fn correctness_above_three_passes() {
        let result = AggregateResult::from_report(&report_with_correctness(4));

        assert!(result.passed);
        assert_eq!(result.correctness_grade.value(), 4);
        assert_eq!(result.mean_grade, 4.25);
        assert_eq!(result.awarded_points(20), 20);
    }

    #[test]
    fn correctness_of_three_fails_closed() {
        let result = AggregateResult::from_report(&report_with_correctness(3));

        assert!(!result.passed);
        assert_eq!(result.awarded_points(20), 0);
    }

    #[test]
    fn unassessed_correctness_fails() {
        let result = AggregateResult::from_report(&report_with_correctness(0));

        assert!(!result.passed);
        assert_eq!(result.correctness_grade, Grade::NOT_ASSESSED);
    }
}
