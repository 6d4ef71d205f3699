use code_grader_api_types::{CriterionView, EvaluateResponse};
use code_grader_evaluator::Evaluation;

pub fn to_response(evaluation: &Evaluation, task_points: Option<u32>) -> EvaluateResponse {
    let report = evaluation.report();

    EvaluateResponse {
        evaluation_id: evaluation.id().to_string(),
        mean_grade: evaluation.mean_grade(),
        correctness_grade: evaluation.correctness_grade(),
        passed: evaluation.passed(),
        similarity: report.similarity().to_string(),
        criteria: report
            .iter()
            .map(|entry| CriterionView {
                criterion: entry.criterion().to_string(),
                grade: entry.grade().value(),
                comment: entry.comment().to_string(),
            })
            .collect(),
        awarded_points: task_points.map(|points| evaluation.awarded_points(points)),
    }
}
