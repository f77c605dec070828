use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::assessment::{Assessment, Section};
use crate::models::question::{Conditional, Question, QuestionKind};

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Gives every section and question without an id a fresh random one.
pub fn assign_ids(assessment: &mut Assessment) {
    for section in &mut assessment.sections {
        if section.id.trim().is_empty() {
            section.id = new_id();
        }
        for question in &mut section.questions {
            if question.id.trim().is_empty() {
                question.id = new_id();
            }
        }
    }
}

/// Structural edits on a draft assessment. Every edit keeps question ids
/// unique and never leaves a conditional pointing at a missing question.
#[derive(Debug, Clone)]
pub struct AssessmentBuilder {
    draft: Assessment,
}

impl AssessmentBuilder {
    pub fn new(mut draft: Assessment) -> Self {
        assign_ids(&mut draft);
        Self { draft }
    }

    pub fn assessment(&self) -> &Assessment {
        &self.draft
    }

    pub fn add_section(&mut self, title: impl Into<String>) -> String {
        let id = new_id();
        self.draft.sections.push(Section {
            id: id.clone(),
            title: title.into(),
            questions: Vec::new(),
        });
        id
    }

    /// Removes a section and its questions. Returns the ids of questions
    /// elsewhere whose conditionals were cleared as a result.
    pub fn remove_section(&mut self, section_id: &str) -> Result<Vec<String>> {
        let idx = self
            .draft
            .sections
            .iter()
            .position(|s| s.id == section_id)
            .ok_or_else(|| Error::NotFound(format!("Section {} not found", section_id)))?;
        let removed = self.draft.sections.remove(idx);
        let removed_ids: HashSet<String> = removed.questions.into_iter().map(|q| q.id).collect();
        Ok(clear_conditionals(&mut self.draft, |c| {
            removed_ids.contains(&c.question_id)
        }))
    }

    pub fn add_question(&mut self, section_id: &str, mut question: Question) -> Result<String> {
        if question.id.trim().is_empty() {
            question.id = new_id();
        }
        if self.draft.question(&question.id).is_some() {
            return Err(Error::BadRequest(format!(
                "Question id {} already exists",
                question.id
            )));
        }
        let id = question.id.clone();
        let conditional = question.conditional.take();

        let section = self
            .draft
            .sections
            .iter_mut()
            .find(|s| s.id == section_id)
            .ok_or_else(|| Error::NotFound(format!("Section {} not found", section_id)))?;
        section.questions.push(question);

        if conditional.is_some() {
            if let Err(err) = self.set_conditional(&id, conditional) {
                for section in &mut self.draft.sections {
                    section.questions.retain(|q| q.id != id);
                }
                return Err(err);
            }
        }
        Ok(id)
    }

    /// Removes a question and clears every conditional that depended on it.
    pub fn remove_question(&mut self, question_id: &str) -> Result<Vec<String>> {
        let mut found = false;
        for section in &mut self.draft.sections {
            let before = section.questions.len();
            section.questions.retain(|q| q.id != question_id);
            found |= section.questions.len() != before;
        }
        if !found {
            return Err(Error::NotFound(format!("Question {} not found", question_id)));
        }
        Ok(clear_conditionals(&mut self.draft, |c| c.question_id == question_id))
    }

    pub fn add_option(&mut self, question_id: &str, option: impl Into<String>) -> Result<()> {
        let option = option.into();
        if option.trim().is_empty() {
            return Err(Error::BadRequest("Option text is required".into()));
        }
        let options = self.choice_options_mut(question_id)?;
        if options.contains(&option) {
            return Err(Error::BadRequest(format!("Option '{}' already exists", option)));
        }
        options.push(option);
        Ok(())
    }

    /// Removes an option and clears conditionals that were waiting for it.
    pub fn remove_option(&mut self, question_id: &str, option: &str) -> Result<Vec<String>> {
        let options = self.choice_options_mut(question_id)?;
        let idx = options
            .iter()
            .position(|o| o == option)
            .ok_or_else(|| Error::NotFound(format!("Option '{}' not found", option)))?;
        options.remove(idx);
        Ok(clear_conditionals(&mut self.draft, |c| {
            c.question_id == question_id && c.value == option
        }))
    }

    pub fn set_conditional(
        &mut self,
        question_id: &str,
        conditional: Option<Conditional>,
    ) -> Result<()> {
        let mut candidate = self.draft.clone();
        let question = candidate
            .question_mut(question_id)
            .ok_or_else(|| Error::NotFound(format!("Question {} not found", question_id)))?;
        question.conditional = conditional;

        let issues = conditional_issues(&candidate);
        if !issues.is_empty() {
            return Err(Error::BadRequest(issues.join("; ")));
        }
        self.draft = candidate;
        Ok(())
    }

    pub fn finish(self) -> Result<Assessment> {
        validate_structure(&self.draft)?;
        Ok(self.draft)
    }

    fn choice_options_mut(&mut self, question_id: &str) -> Result<&mut Vec<String>> {
        let question = self
            .draft
            .question_mut(question_id)
            .ok_or_else(|| Error::NotFound(format!("Question {} not found", question_id)))?;
        let label = question.kind.label();
        question.kind.options_mut().ok_or_else(|| {
            Error::BadRequest(format!("{} questions have no options", label))
        })
    }
}

fn clear_conditionals<F>(assessment: &mut Assessment, mut matches: F) -> Vec<String>
where
    F: FnMut(&Conditional) -> bool,
{
    let mut cleared = Vec::new();
    for question in assessment.questions_mut() {
        if question.conditional.as_ref().is_some_and(&mut matches) {
            question.conditional = None;
            cleared.push(question.id.clone());
        }
    }
    if !cleared.is_empty() {
        tracing::debug!(?cleared, "cleared conditionals referencing removed content");
    }
    cleared
}

fn conditional_issues(assessment: &Assessment) -> Vec<String> {
    let mut issues = Vec::new();
    let index = assessment.question_index();

    for question in assessment.questions() {
        let Some(conditional) = &question.conditional else {
            continue;
        };
        if conditional.question_id == question.id {
            issues.push(format!("question {} cannot depend on itself", question.id));
            continue;
        }
        match index.get(conditional.question_id.as_str()) {
            None => issues.push(format!(
                "question {} depends on unknown question {}",
                question.id, conditional.question_id
            )),
            Some(dependee) => {
                if let Some(options) = dependee.kind.options() {
                    if !options.contains(&conditional.value) {
                        issues.push(format!(
                            "question {} waits for '{}', which is not an option of {}",
                            question.id, conditional.value, dependee.id
                        ));
                    }
                }
            }
        }
    }

    let cyclic = cycle_members(&index);
    for question in assessment.questions() {
        if cyclic.get(question.id.as_str()).copied().unwrap_or(false) {
            issues.push(format!("question {} is part of a conditional cycle", question.id));
        }
    }

    issues
}

/// Flags every question whose dependency chain runs into a cycle.
fn cycle_members<'a>(index: &HashMap<&'a str, &'a Question>) -> HashMap<&'a str, bool> {
    let mut resolved: HashMap<&'a str, bool> = HashMap::with_capacity(index.len());
    for &start in index.keys() {
        if resolved.contains_key(start) {
            continue;
        }
        let mut path: Vec<&'a str> = Vec::new();
        let mut on_path: HashSet<&'a str> = HashSet::new();
        let mut current = start;
        let cyclic = loop {
            if let Some(&cyclic) = resolved.get(current) {
                break cyclic;
            }
            if !on_path.insert(current) {
                break true;
            }
            path.push(current);
            match index
                .get(current)
                .and_then(|&q| q.conditional.as_ref())
                .map(|c| c.question_id.as_str())
            {
                Some(next) if index.contains_key(next) => current = next,
                _ => break false,
            }
        };
        for id in path {
            resolved.insert(id, cyclic);
        }
    }
    resolved
}

/// Boundary check for a whole assessment payload.
pub fn validate_structure(assessment: &Assessment) -> Result<()> {
    let mut issues = Vec::new();

    if assessment.title.trim().is_empty() {
        issues.push("title is required".to_string());
    }

    let mut seen = HashSet::new();
    for section in &assessment.sections {
        for (idx, question) in section.questions.iter().enumerate() {
            if question.id.trim().is_empty() {
                issues.push(format!(
                    "question {} in section '{}' has no id",
                    idx + 1,
                    section.title
                ));
                continue;
            }
            if !seen.insert(question.id.as_str()) {
                issues.push(format!("duplicate question id {}", question.id));
            }
            issues.extend(kind_issues(question));
        }
    }

    issues.extend(conditional_issues(assessment));

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::BadRequest(format!(
            "Invalid assessment structure: {}",
            issues.join("; ")
        )))
    }
}

fn kind_issues(question: &Question) -> Vec<String> {
    let mut issues = Vec::new();
    match &question.kind {
        QuestionKind::SingleChoice { options } | QuestionKind::MultiChoice { options } => {
            if options.is_empty() {
                issues.push(format!("question {} needs at least one option", question.id));
            }
            let mut seen = HashSet::new();
            for option in options {
                if !seen.insert(option) {
                    issues.push(format!(
                        "question {} lists option '{}' twice",
                        question.id, option
                    ));
                }
            }
        }
        QuestionKind::ShortText { max_length } | QuestionKind::LongText { max_length } => {
            if *max_length == Some(0) {
                issues.push(format!("question {} has maxLength 0", question.id));
            }
        }
        QuestionKind::Numeric { range: Some(range) } => {
            if !range.min.is_finite() || !range.max.is_finite() || range.min > range.max {
                issues.push(format!("question {} has an invalid range", question.id));
            }
        }
        QuestionKind::Numeric { range: None } | QuestionKind::FileUpload {} => {}
    }
    issues
}
