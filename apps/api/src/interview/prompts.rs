//! All LLM prompt text for the interviewer.
//! Templates declare their placeholders; rendering fails fast when one is not supplied.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("template '{template}' requires placeholder '{placeholder}' but no value was supplied")]
    MissingPlaceholder {
        template: &'static str,
        placeholder: &'static str,
    },
}

/// A prompt template with `{name}` placeholders and the list of names it requires.
#[derive(Debug)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub text: &'static str,
    pub variables: &'static [&'static str],
}

impl PromptTemplate {
    /// Fills every declared placeholder in a single pass.
    ///
    /// Values are inserted verbatim: a candidate answer containing `{question}`
    /// is never re-expanded. Braces that do not name a declared variable are left as-is.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, PromptError> {
        for &placeholder in self.variables {
            if !values.iter().any(|(name, _)| *name == placeholder) {
                return Err(PromptError::MissingPlaceholder {
                    template: self.name,
                    placeholder,
                });
            }
        }

        let mut out = String::with_capacity(self.text.len());
        let mut rest = self.text;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let substituted = after.find('}').and_then(|close| {
                let name = &after[..close];
                if !self.variables.iter().any(|v| *v == name) {
                    return None;
                }
                values
                    .iter()
                    .find(|(n, _)| *n == name)
                    .map(|(_, value)| (close, *value))
            });
            match substituted {
                Some((close, value)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        Ok(out)
    }
}

/// System persona for every interviewer call.
pub const INTERVIEWER_SYSTEM: &str = "You are a senior staff engineer conducting a system design interview. \
    You have spent more than fifteen years building large-scale distributed systems and have run hundreds of interviews. \
    Guide the candidate through the interview one step at a time: problem understanding, clarifying questions, \
    functional and non-functional requirements, high-level design, then a deep dive into components. \
    Be professional and encouraging. Keep replies short, ask one focused question at a time, \
    and explain the reasoning behind your feedback. \
    Evaluate the candidate's thought process, trade-off analysis, scalability thinking and communication, \
    not their knowledge of specific products.";

/// Reply used when the current phase has no LLM template.
pub const NO_TEMPLATE_FALLBACK: &str =
    "I'm not sure how to proceed. Let's continue with the discussion.";

pub static INTRODUCTION_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "introduction",
    text: r#"Introduce the following system design question to the candidate.

Question: {question}

Present the question briefly and professionally, then invite the candidate to clarify assumptions
or ask about requirements before designing anything. Set a collaborative tone and keep it short."#,
    variables: &["question"],
};

pub static CLARIFICATIONS_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "clarifications",
    text: r#"The candidate is clarifying the problem.

Question: {question}
Candidate's clarifications and assumptions: {candidate_input}

Recent conversation:
{conversation_history}

Evaluate the clarifications:
1. Assessment, rated as N/5: relevance of their questions, quality of assumptions,
   attention to scale, data volume and constraints.
2. Feedback: what went well, what they missed, how to improve.
3. Guidance: further questions worth asking and constraints to keep in mind.

Finish by moving the candidate on to defining functional and non-functional requirements."#,
    variables: &["question", "candidate_input", "conversation_history"],
};

pub static REQUIREMENTS_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "requirements",
    text: r#"The candidate has proposed functional and non-functional requirements.

Question: {question}
Candidate's requirements: {candidate_input}

Recent conversation:
{conversation_history}

Evaluate the requirements:
1. Assessment, rated as N/5: completeness of functional requirements, realism of
   scale/performance/reliability targets, awareness of constraints and trade-offs.
2. Feedback: well-chosen requirements, critical omissions, unnecessary ones.
3. Guidance: missing requirements, scale estimates and availability expectations.

Finish by asking the candidate to sketch the main components of a high-level design and how they interact."#,
    variables: &["question", "candidate_input", "conversation_history"],
};

pub static SECTION_EVALUATION_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "section_evaluation",
    text: r#"Evaluate this section of the candidate's design document.

Section: {section}
Content: {content}
Question: {question}

Everything the candidate has written so far:
{context_summary}

Recent conversation:
{conversation_history}

Reply with:
1. A concise evaluation (2-3 sentences).
2. Key strengths and areas for improvement, taking earlier sections into account.
3. A score written exactly as N/5 (5 is excellent).

Judge completeness, depth of thinking, realism and clarity. Keep it actionable."#,
    variables: &[
        "section",
        "content",
        "question",
        "context_summary",
        "conversation_history",
    ],
};

pub static HINT_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "hint",
    text: r#"The candidate is struggling with the {section} section for the question: {question}

What they have so far:
{context_summary}

Give one or two sentences of encouragement with a hint that points them toward the right
way of thinking about this section without giving away the answer."#,
    variables: &["section", "question", "context_summary"],
};

pub static TRANSITION_TEMPLATE: PromptTemplate = PromptTemplate {
    name: "transition",
    text: "Great progress on {current}. Let's now move to {next}. \
        Based on what we've discussed so far, what would you like to explore next?",
    variables: &["current", "next"],
};

/// Message returned when an explicit advance is requested at the final phase.
pub const WRAP_UP_MESSAGE: &str =
    "We've reached the end of the interview. Thanks for walking me through your design.";
