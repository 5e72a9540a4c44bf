//! Output schema declared to the model backend
//!
//! Expressed in the OpenAPI subset the Gemini structured-output feature
//! accepts (upper-case type names).

use penmark_domain::Conclusion;
use serde_json::{json, Value};

/// Top-level fields every result must carry
pub(crate) const REQUIRED_FIELDS: [&str; 6] = [
    "conclusion",
    "aiProbability",
    "evidence",
    "suspiciousExcerpts",
    "humanizeSuggestions",
    "limitations",
];

/// JSON schema describing an `AnalysisResult`
pub fn analysis_response_schema() -> Value {
    let conclusions: Vec<&str> = Conclusion::ALL.iter().map(Conclusion::as_str).collect();

    json!({
        "type": "OBJECT",
        "properties": {
            "conclusion": {
                "type": "STRING",
                "enum": conclusions,
                "description": "The final classification of the text."
            },
            "aiProbability": {
                "type": "NUMBER",
                "description": "Estimated probability (0-100) that the text is AI-written."
            },
            "evidence": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "signal": {
                            "type": "STRING",
                            "description": "Name of the detected feature, e.g. 'Sentence Rhythm'."
                        },
                        "explanation": {
                            "type": "STRING",
                            "description": "Why this feature points towards the conclusion."
                        }
                    },
                    "required": ["signal", "explanation"]
                }
            },
            "suspiciousExcerpts": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "excerpt": {
                            "type": "STRING",
                            "description": "Exact quote from the text that is suspicious."
                        },
                        "reason": {
                            "type": "STRING",
                            "description": "Why this excerpt is suspicious."
                        }
                    },
                    "required": ["excerpt", "reason"]
                }
            },
            "humanizeSuggestions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "problem": {
                            "type": "STRING",
                            "description": "The issue identified in the text."
                        },
                        "fix": {
                            "type": "STRING",
                            "description": "The specific way to fix the issue."
                        },
                        "example": {
                            "type": "STRING",
                            "description": "A rewritten sentence or two illustrating the fix."
                        },
                        "why": {
                            "type": "STRING",
                            "description": "Why this fix makes the text read as more human."
                        }
                    },
                    "required": ["problem", "fix", "example", "why"]
                }
            },
            "limitations": {
                "type": "STRING",
                "description": "A brief note on the confidence of the analysis and any limiting factors (e.g. short text)."
            }
        },
        "required": REQUIRED_FIELDS
    })
}
