// SPDX-License-Identifier: MPL-2.0
//! Instruction template for the animation backend.
//!
//! The backend asks a language model to write a Manim Community Edition
//! script and renders it. The template carries two placeholders:
//! `{QUESTION}` is filled here, `{SCENE_NAME}` is left for the backend.

use super::Query;

/// Placeholder replaced with the user's question.
pub const QUESTION_PLACEHOLDER: &str = "{QUESTION}";

/// Placeholder the generation backend substitutes with its scene class name.
pub const SCENE_NAME_PLACEHOLDER: &str = "{SCENE_NAME}";

/// Scene class the backend renders.
pub const SCENE_CLASS: &str = "GeneratedScene";

const TEMPLATE: &str = "You're an expert educator and Manim CE developer. \
Create a **complete and runnable Manim CE script** that visually explains the following math \
question in a clear, step-by-step animation: **Question:** \"{QUESTION}\"\n\
Goals:\n\
- Define a class called GeneratedScene that inherits from Scene\n\
- Break the explanation into 3-6 short steps\n\
- Use `Text()` to explain each step simply (one sentence max)\n\
- Use `MathTex()` for all math (equations, fractions, dot products)\n\
- If applicable, use `Matrix()` objects to show matrix or vector layout\n\
- Use `Write`, `Create`, and `FadeOut` to animate content\n\
- Pause with `wait(1)` or `wait(2)` after each step\n\
- Show the final answer at the end of the scene\n\
Constraints:\n\
- Don't use `.dot()`, `.T`, or real math operations\n\
- Don't use numpy, sympy, or external math libraries\n\
- Keep all math symbolic and visually instructive\n\
- Keep visuals uncluttered: when several elements share the screen, space them with \
`.next_to()` or `.shift()`; when an element replaces the previous one, center it at \
`ORIGIN`, `UP` or `DOWN`\n\
- Everything on screen must stay centered and inside the frame\n\
- No unnecessary comments in the script\n\
Output:\n\
- Respond ONLY with valid Python code\n\
- The script must run with `manim -pql script.py {SCENE_NAME}` without errors";

/// The fixed animation-script instruction with a question substituted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPrompt(String);

impl GenerationPrompt {
    /// Fills the question placeholder with `query`.
    ///
    /// Only the first occurrence is replaced and `{SCENE_NAME}` is kept
    /// verbatim for the backend.
    #[must_use]
    pub fn render(query: &Query) -> Self {
        Self(TEMPLATE.replacen(QUESTION_PLACEHOLDER, query.as_str(), 1))
    }

    /// The raw template, placeholders included.
    #[must_use]
    pub fn template() -> &'static str {
        TEMPLATE
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(text: &str) -> Query {
        Query::parse(text).expect("valid query")
    }

    #[test]
    fn template_contains_both_placeholders_once() {
        assert_eq!(TEMPLATE.matches(QUESTION_PLACEHOLDER).count(), 1);
        assert_eq!(TEMPLATE.matches(SCENE_NAME_PLACEHOLDER).count(), 1);
        assert!(TEMPLATE.contains(SCENE_CLASS));
    }

    #[test]
    fn render_substitutes_question() {
        let prompt = GenerationPrompt::render(&query("matrix multiplication"));
        assert!(prompt
            .as_str()
            .contains("**Question:** \"matrix multiplication\""));
        assert!(!prompt.as_str().contains(QUESTION_PLACEHOLDER));
    }

    #[test]
    fn render_keeps_scene_placeholder_for_backend() {
        let prompt = GenerationPrompt::render(&query("limits"));
        assert!(prompt.as_str().contains(SCENE_NAME_PLACEHOLDER));
    }

    #[test]
    fn question_containing_placeholder_text_is_not_expanded_again() {
        let prompt = GenerationPrompt::render(&query("what is {QUESTION}?"));
        assert_eq!(prompt.as_str().matches(QUESTION_PLACEHOLDER).count(), 1);
    }
}
