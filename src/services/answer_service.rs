use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::models::question::{Conditional, Question, QuestionKind};
use crate::models::response::{AnswerValue, Answers};

/// Visibility and answer-shape rules for submitted assessments.
pub struct AnswerService;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerIssue {
    pub question_id: String,
    pub message: String,
}

impl std::fmt::Display for AnswerIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.question_id, self.message)
    }
}

impl AnswerService {
    /// Whether a recorded answer satisfies a conditional.
    ///
    /// Text answers compare by exact equality, numbers by their shortest
    /// decimal rendering, and multi-choice selections match when they
    /// contain the expected value.
    pub fn conditional_matches(conditional: &Conditional, answer: Option<&AnswerValue>) -> bool {
        match answer {
            None => false,
            Some(AnswerValue::Text(text)) => *text == conditional.value,
            Some(AnswerValue::Number(n)) => n.to_string() == conditional.value,
            Some(AnswerValue::Choices(items)) => items.iter().any(|i| *i == conditional.value),
        }
    }

    /// A question is active when every conditional on its dependency chain
    /// is satisfied. Broken chains (missing dependee, cycles) are inactive.
    pub fn is_active(assessment: &Assessment, question: &Question, answers: &Answers) -> bool {
        Self::activity(&assessment.question_index(), answers)
            .get(question.id.as_str())
            .copied()
            .unwrap_or(false)
    }

    /// Activity of every indexed question. Each chain is walked once: the
    /// walk stops at the first question whose activity is already known, and
    /// every question on the walked path shares the outcome.
    pub fn activity<'a>(
        index: &HashMap<&'a str, &'a Question>,
        answers: &Answers,
    ) -> HashMap<&'a str, bool> {
        let mut known: HashMap<&'a str, bool> = HashMap::with_capacity(index.len());
        for &start in index.keys() {
            if known.contains_key(start) {
                continue;
            }
            let mut path: Vec<&'a str> = Vec::new();
            let mut on_path: HashSet<&'a str> = HashSet::new();
            let mut current = start;
            let outcome = loop {
                if let Some(&active) = known.get(current) {
                    break active;
                }
                if !on_path.insert(current) {
                    break false;
                }
                path.push(current);
                let Some(&question) = index.get(current) else {
                    break false;
                };
                let Some(conditional) = &question.conditional else {
                    break true;
                };
                if !Self::conditional_matches(conditional, answers.get(&conditional.question_id)) {
                    break false;
                }
                let dependee = conditional.question_id.as_str();
                if !index.contains_key(dependee) {
                    break false;
                }
                current = dependee;
            };
            for id in path {
                known.insert(id, outcome);
            }
        }
        known
    }

    pub fn active_question_ids(assessment: &Assessment, answers: &Answers) -> Vec<String> {
        let index = assessment.question_index();
        let activity = Self::activity(&index, answers);
        assessment
            .questions()
            .filter(|q| activity.get(q.id.as_str()).copied().unwrap_or(false))
            .map(|q| q.id.clone())
            .collect()
    }

    /// Checks one answer against its question's kind.
    pub fn check_answer(question: &Question, answer: &AnswerValue) -> Option<String> {
        match (&question.kind, answer) {
            (QuestionKind::SingleChoice { options }, AnswerValue::Text(choice)) => {
                if options.contains(choice) {
                    None
                } else {
                    Some(format!("'{}' is not one of the options", choice))
                }
            }
            (QuestionKind::SingleChoice { .. }, _) => {
                Some("expects a single option".to_string())
            }
            (QuestionKind::MultiChoice { options }, AnswerValue::Choices(items)) => {
                let mut seen = HashSet::new();
                for item in items {
                    if !options.contains(item) {
                        return Some(format!("'{}' is not one of the options", item));
                    }
                    if !seen.insert(item) {
                        return Some(format!("'{}' selected more than once", item));
                    }
                }
                None
            }
            (QuestionKind::MultiChoice { .. }, _) => {
                Some("expects a list of options".to_string())
            }
            (
                QuestionKind::ShortText { max_length } | QuestionKind::LongText { max_length },
                AnswerValue::Text(text),
            ) => match max_length {
                Some(max) if text.chars().count() > *max => {
                    Some(format!("must be at most {} characters", max))
                }
                _ => None,
            },
            (QuestionKind::ShortText { .. } | QuestionKind::LongText { .. }, _) => {
                Some("expects text".to_string())
            }
            (QuestionKind::Numeric { range }, answer) => {
                let value = match answer {
                    AnswerValue::Number(n) => Some(*n),
                    AnswerValue::Text(text) => text.trim().parse::<f64>().ok(),
                    AnswerValue::Choices(_) => None,
                };
                match value {
                    Some(v) if v.is_finite() => match range {
                        Some(r) if !r.contains(v) => {
                            Some(format!("must be between {} and {}", r.min, r.max))
                        }
                        _ => None,
                    },
                    _ => Some("expects a number".to_string()),
                }
            }
            (QuestionKind::FileUpload {}, AnswerValue::Text(_)) => None,
            (QuestionKind::FileUpload {}, _) => Some("expects a file reference".to_string()),
        }
    }

    /// Collects every problem with a submission. Hidden questions are skipped
    /// entirely, including their `required` flag.
    pub fn collect_issues(assessment: &Assessment, answers: &Answers) -> Vec<AnswerIssue> {
        let mut issues = Vec::new();
        let index = assessment.question_index();
        let activity = Self::activity(&index, answers);

        for key in answers.keys() {
            if !index.contains_key(key.as_str()) {
                issues.push(AnswerIssue {
                    question_id: key.clone(),
                    message: "unknown question".to_string(),
                });
            }
        }

        for question in assessment.questions() {
            if !activity.get(question.id.as_str()).copied().unwrap_or(false) {
                continue;
            }
            match answers.get(&question.id) {
                Some(answer) if !answer.is_empty() => {
                    if let Some(message) = Self::check_answer(question, answer) {
                        issues.push(AnswerIssue {
                            question_id: question.id.clone(),
                            message,
                        });
                    }
                }
                _ if question.required => issues.push(AnswerIssue {
                    question_id: question.id.clone(),
                    message: "answer is required".to_string(),
                }),
                _ => {}
            }
        }

        issues
    }

    pub fn validate_submission(assessment: &Assessment, answers: &Answers) -> Result<()> {
        let issues = Self::collect_issues(assessment, answers);
        if issues.is_empty() {
            return Ok(());
        }
        let message = issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(Error::BadRequest(format!("Invalid answers: {}", message)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assessment::Section;
    use crate::models::question::NumericRange;
    use chrono::Utc;
    use serde_json::json;

    fn question(id: &str, required: bool, kind: QuestionKind) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {id}"),
            required,
            points: None,
            conditional: None,
            kind,
        }
    }

    fn when(mut q: Question, dependee: &str, value: &str) -> Question {
        q.conditional = Some(Conditional {
            question_id: dependee.to_string(),
            value: value.to_string(),
        });
        q
    }

    fn yes_no() -> QuestionKind {
        QuestionKind::SingleChoice {
            options: vec!["Yes".into(), "No".into()],
        }
    }

    fn assessment(questions: Vec<Question>) -> Assessment {
        Assessment {
            id: 1,
            job_id: 1,
            title: "Screening".into(),
            description: None,
            sections: vec![Section {
                id: "s1".into(),
                title: "General".into(),
                questions,
            }],
            due_date: None,
            time_limit: None,
            passing_score: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn answers(value: serde_json::Value) -> Answers {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn hidden_required_question_is_not_enforced() {
        let a = assessment(vec![
            question("Q1", true, yes_no()),
            when(question("Q2", true, QuestionKind::ShortText { max_length: None }), "Q1", "Yes"),
        ]);

        assert!(AnswerService::validate_submission(&a, &answers(json!({ "Q1": "No" }))).is_ok());

        let err = AnswerService::validate_submission(&a, &answers(json!({ "Q1": "Yes" })));
        assert!(matches!(err, Err(Error::BadRequest(msg)) if msg.contains("Q2")));

        assert!(AnswerService::validate_submission(
            &a,
            &answers(json!({ "Q1": "Yes", "Q2": "Because" }))
        )
        .is_ok());
    }

    #[test]
    fn visibility_is_transitive() {
        let a = assessment(vec![
            question("Q1", true, yes_no()),
            when(question("Q2", false, yes_no()), "Q1", "Yes"),
            when(question("Q3", true, QuestionKind::FileUpload {}), "Q2", "Yes"),
        ]);

        // Q2 still holds a stale "Yes" but is hidden, so Q3 stays hidden too.
        let stale = answers(json!({ "Q1": "No", "Q2": "Yes" }));
        assert_eq!(
            AnswerService::active_question_ids(&a, &stale),
            vec!["Q1".to_string()]
        );
        assert!(AnswerService::validate_submission(&a, &stale).is_ok());
    }

    #[test]
    fn multi_choice_and_numeric_dependees() {
        let a = assessment(vec![
            question(
                "langs",
                false,
                QuestionKind::MultiChoice {
                    options: vec!["Rust".into(), "Go".into()],
                },
            ),
            question("years", false, QuestionKind::Numeric { range: None }),
            when(question("rust", true, QuestionKind::LongText { max_length: None }), "langs", "Rust"),
            when(question("senior", true, QuestionKind::LongText { max_length: None }), "years", "10"),
        ]);

        let given = answers(json!({ "langs": ["Go", "Rust"], "years": 10 }));
        let active = AnswerService::active_question_ids(&a, &given);
        assert!(active.contains(&"rust".to_string()));
        assert!(active.contains(&"senior".to_string()));

        let given = answers(json!({ "langs": ["Go"], "years": 9.5 }));
        let active = AnswerService::active_question_ids(&a, &given);
        assert_eq!(active, vec!["langs".to_string(), "years".to_string()]);
    }

    #[test]
    fn enforces_per_type_contracts() {
        let a = assessment(vec![
            question("choice", false, yes_no()),
            question(
                "many",
                false,
                QuestionKind::MultiChoice {
                    options: vec!["A".into(), "B".into()],
                },
            ),
            question("short", false, QuestionKind::ShortText { max_length: Some(5) }),
            question(
                "num",
                false,
                QuestionKind::Numeric {
                    range: Some(NumericRange { min: 1.0, max: 10.0 }),
                },
            ),
        ]);

        let bad = answers(json!({
            "choice": "Maybe",
            "many": ["A", "C"],
            "short": "too long",
            "num": 11
        }));
        let issues = AnswerService::collect_issues(&a, &bad);
        let ids: Vec<&str> = issues.iter().map(|i| i.question_id.as_str()).collect();
        assert_eq!(ids, vec!["choice", "many", "short", "num"]);

        let good = answers(json!({
            "choice": "Yes",
            "many": ["B", "A"],
            "short": "fine",
            "num": "7"
        }));
        assert!(AnswerService::collect_issues(&a, &good).is_empty());
    }

    #[test]
    fn rejects_unknown_question_ids() {
        let a = assessment(vec![question("Q1", false, yes_no())]);
        let issues = AnswerService::collect_issues(&a, &answers(json!({ "Q9": "Yes" })));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].question_id, "Q9");
    }

    #[test]
    fn cyclic_conditionals_are_never_active() {
        let a = assessment(vec![
            when(question("A", true, yes_no()), "B", "Yes"),
            when(question("B", true, yes_no()), "A", "Yes"),
        ]);
        let given = answers(json!({ "A": "Yes", "B": "Yes" }));
        assert!(AnswerService::active_question_ids(&a, &given).is_empty());
    }

    #[test]
    fn long_conditional_chain_resolves_quickly() {
        let depth = 5000;
        let mut questions = vec![question("q0", true, yes_no())];
        for i in 1..depth {
            questions.push(when(
                question(&format!("q{i}"), true, yes_no()),
                &format!("q{}", i - 1),
                "Yes",
            ));
        }
        let a = assessment(questions);
        let all_yes: Answers = (0..depth)
            .map(|i| (format!("q{i}"), AnswerValue::Text("Yes".into())))
            .collect();

        let started = std::time::Instant::now();
        assert_eq!(AnswerService::active_question_ids(&a, &all_yes).len(), depth);
        assert!(AnswerService::collect_issues(&a, &all_yes).is_empty());

        // Breaking the chain halfway hides everything after it.
        let mut broken = all_yes.clone();
        broken.insert("q2500".into(), AnswerValue::Text("No".into()));
        assert_eq!(AnswerService::active_question_ids(&a, &broken).len(), 2501);
        assert!(started.elapsed() < std::time::Duration::from_secs(2));
    }
}
