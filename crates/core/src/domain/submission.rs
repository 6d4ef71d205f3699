/// Immutable input of a single evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub template_code: String,
    pub submitted_code: String,
    pub algorithm_name: String,
}

impl Submission {
    pub fn new(
        template_code: impl Into<String>,
        submitted_code: impl Into<String>,
        algorithm_name: impl Into<String>,
    ) -> Self {
        Self {
            template_code: template_code.into(),
            submitted_code: submitted_code.into(),
            algorithm_name: algorithm_name.into(),
        }
    }
}
