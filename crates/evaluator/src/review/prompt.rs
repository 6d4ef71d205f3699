use code_grader_core::domain::Criterion;

/// Builds the reviewer prompt for one submission.
///
/// The answer keys are taken from [`Criterion::review_key`] so the prompt and
/// the parser can never disagree.
pub fn build_review_prompt(submitted_code: &str, algorithm_name: &str) -> String {
    let answer_format = Criterion::REVIEWED
        .iter()
        .filter_map(|criterion| criterion.review_key())
        .map(|key| format!("  \"{key}\": {{ \"grade\": <оценка от 1 до 5>, \"comment\": \"<обоснование>\" }}"))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        r#"Ты — опытный тимлид и проводишь код-ревью. Проанализируй код ниже.

ПРАВИЛА ОЦЕНКИ:
1. Код должен реализовывать алгоритм "{algorithm_name}". Оценивай правильность реализации именно этого алгоритма. Если "{algorithm_name}" реализован верно, ставь 5 за Правильность, даже если сам алгоритм медленный. Оптимальность оценивай, сравнивая сложность решения с эталонной сложностью "{algorithm_name}".
2. Не снижай оценки за наличие, отсутствие или стиль комментариев.
3. Стиль оценивай только по читаемости кода.

ЗАДАЧА:
Оцени код по трём критериям: Правильность, Оптимальность, Стиль.
Ответь СТРОГО одним JSON-объектом такого вида, без лишних слов:
{{
{answer_format}
}}

Код для анализа:
---
{submitted_code}
---
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_the_algorithm_and_embeds_the_code() {
        let prompt = build_review_prompt("def q(data):\n    return data", "Bubble Sort");

        assert!(prompt.contains("\"Bubble Sort\""));
        assert!(prompt.contains("def q(data):\n    return data"));
    }

    #[test]
    fn prompt_requests_every_reviewed_key() {
        let prompt = build_review_prompt("pass", "Binary Search");

        for key in ["Правильность", "Оптимальность", "Стиль"] {
            assert!(
                prompt.contains(&format!("\"{key}\": {{ \"grade\"")),
                "missing key {key}"
            );
        }
    }

    #[test]
    fn unknown_algorithm_names_pass_through() {
        let prompt = build_review_prompt("pass", "Definitely Not An Algorithm {}");

        assert!(prompt.contains("Definitely Not An Algorithm {}"));
    }
}
