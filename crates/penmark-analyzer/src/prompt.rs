//! LLM prompt engineering for authorship analysis

use penmark_domain::AnalysisOptions;

/// Word count below which the model is told to prefer "Uncertain"
///
/// Advisory only: the threshold is communicated to the model and never
/// enforced locally.
pub const UNCERTAIN_WORD_THRESHOLD: usize = 120;

/// Builds the instruction prompt sent to the model
pub struct PromptBuilder<'a> {
    text: &'a str,
    options: &'a AnalysisOptions,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(text: &'a str, options: &'a AnalysisOptions) -> Self {
        Self { text, options }
    }

    /// Build the complete analysis prompt
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(
            ROLE_INSTRUCTIONS.len() + ANALYSIS_RULES.len() + TASK_INSTRUCTIONS.len() + self.text.len() + 128,
        );

        // 1. Role and analysis rules
        prompt.push_str(ROLE_INSTRUCTIONS);
        prompt.push_str("\n\n");
        prompt.push_str(ANALYSIS_RULES);
        prompt.push_str("\n\n");

        // 2. The text to analyze, verbatim
        prompt.push_str(&format!(
            "Input Text (Language: {}):\n",
            self.options.language_label()
        ));
        prompt.push_str("```\n");
        prompt.push_str(self.text);
        prompt.push_str("\n```\n\n");

        // 3. Output contract
        prompt.push_str(TASK_INSTRUCTIONS);

        prompt
    }
}

/// Build the analysis prompt for `text`
///
/// Pure and deterministic: the same input always yields the same prompt,
/// and the input text appears in it unmodified.
pub fn build_prompt(text: &str, options: &AnalysisOptions) -> String {
    PromptBuilder::new(text, options).build()
}

const ROLE_INSTRUCTIONS: &str = "You are a senior ML/NLP engineer. Analyze the text below and decide whether it was written by an AI or by a human.";

const ANALYSIS_RULES: &str = r#"Analysis Rules:
1. Burstiness & Rhythm: human writers mix short and long sentences; AI text tends to keep sentence length uniform.
2. Perplexity: AI text is often overly predictable or "smooth".
3. Stylometry: consider vocabulary complexity, punctuation diversity, and "textbook" transitions (e.g. "moreover", "in conclusion").
4. AI Templates: look for repetitive, formulaic structure (intro-body-conclusion in every paragraph) and a lack of concrete detail (times, places, numbers).
5. Personal Experience: human writing often carries small personal observations, emotions and sensory detail; AI writing is often detached and generic.
6. Decision Logic:
   - Conclude "AI Written" only with strong, consistent evidence.
   - Conclude "Human Written" when there are clear signs of human authorship (burstiness, personal voice, minor natural errors).
   - Conclude "Uncertain" when signals are mixed, the text is too short (fewer than 120 words), or it appears heavily edited."#;

const TASK_INSTRUCTIONS: &str = r#"Your Task:
Provide a detailed analysis based on the rules above. Write your answer in the language of the input text and follow the provided JSON schema.
- conclusion: one of "AI Written", "Human Written" or "Uncertain".
- aiProbability: a percentage from 0 to 100.
- evidence: the 3-5 strongest signals behind your conclusion, each with a signal name and an explanation.
- suspiciousExcerpts: quote 1-3 exact excerpts from the text and explain why each is suspicious.
- humanizeSuggestions: 5 concrete, actionable suggestions to make the text sound more human, each with (1) problem, (2) fix, (3) a rewritten example, and (4) why it works.
- limitations: note any limitations of this analysis, especially if the text is short.

Return ONLY the JSON object. Do not add any explanatory text before or after it."#;
