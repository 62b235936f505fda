//! Response schemas in the Gemini OpenAPI subset.

use serde_json::{json, Value};

pub fn text_post() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "caption": { "type": "STRING" },
            "hashtags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "safetyAnalysis": {
                "type": "OBJECT",
                "properties": {
                    "isSafe": { "type": "BOOLEAN" },
                    "reasoning": { "type": "STRING" }
                },
                "required": ["isSafe", "reasoning"]
            }
        },
        "required": ["caption", "hashtags", "safetyAnalysis"]
    })
}

pub fn vqa() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "question": { "type": "STRING" },
            "answer": { "type": "STRING" },
            "reasoning": { "type": "STRING" }
        },
        "required": ["question", "answer", "reasoning"]
    })
}

pub fn strategy() -> Value {
    let strings = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
    json!({
        "type": "OBJECT",
        "properties": {
            "content_strategy": {
                "type": "OBJECT",
                "properties": {
                    "relevance_score": { "type": "NUMBER" },
                    "engagement_rate": { "type": "NUMBER" },
                    "content_types": strings,
                    "topics": strings
                }
            },
            "messaging": {
                "type": "OBJECT",
                "properties": {
                    "response_time": { "type": "NUMBER" },
                    "call_to_actions": strings
                }
            },
            "posting_schedule": {
                "type": "OBJECT",
                "properties": {
                    "peak_hours": strings,
                    "weekend_hours": strings,
                    "timezone": { "type": "STRING" }
                }
            },
            "audience": {
                "type": "OBJECT",
                "properties": {
                    "age_range": { "type": "STRING" },
                    "top_countries": strings,
                    "interests": strings
                }
            },
            "metrics_to_track": strings
        }
    })
}

pub fn voice_dialog() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "dialog": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "speaker": { "type": "STRING", "enum": ["User", "Stella"] },
                        "line": { "type": "STRING" }
                    },
                    "required": ["speaker", "line"]
                }
            }
        },
        "required": ["dialog"]
    })
}

pub fn comment_analysis() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "overall_sentiment": {
                "type": "STRING",
                "enum": ["Positive", "Negative", "Mixed", "Neutral"]
            },
            "sentiment_score": { "type": "NUMBER" },
            "key_themes": { "type": "ARRAY", "items": { "type": "STRING" } },
            "frequent_questions": { "type": "ARRAY", "items": { "type": "STRING" } },
            "actionable_insights": { "type": "ARRAY", "items": { "type": "STRING" } }
        }
    })
}

pub fn page_performance() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "strategic_summary": { "type": "STRING" },
            "recommendations": { "type": "ARRAY", "items": { "type": "STRING" } },
            "top_post_insight": { "type": "STRING" }
        }
    })
}

pub fn brand_alignment() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "score": { "type": "NUMBER" },
            "rationale": { "type": "STRING" },
            "suggestions": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["score", "rationale", "suggestions"]
    })
}

pub fn brand_voice() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "brandSummary": { "type": "STRING" },
            "coreKeywords": { "type": "ARRAY", "items": { "type": "STRING" } },
            "personaInANutshell": { "type": "STRING" }
        },
        "required": ["brandSummary", "coreKeywords", "personaInANutshell"]
    })
}

pub fn engagement_hooks() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "hooks": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["hooks"]
    })
}

pub fn automated_responder() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "welcomeMessage": { "type": "STRING" },
            "quickReplies": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "label": { "type": "STRING" },
                        "response": { "type": "STRING" }
                    },
                    "required": ["label", "response"]
                }
            },
            "fallbackMessage": { "type": "STRING" }
        },
        "required": ["welcomeMessage", "quickReplies", "fallbackMessage"]
    })
}

pub fn whatsapp_responder() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "system_prompt": { "type": "STRING" },
            "welcome_message": { "type": "STRING" },
            "common_questions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "question_pattern": { "type": "STRING" },
                        "response": { "type": "STRING" }
                    },
                    "required": ["question_pattern", "response"]
                }
            },
            "fallback_message": { "type": "STRING" }
        },
        "required": ["system_prompt", "welcome_message", "common_questions", "fallback_message"]
    })
}

pub fn post_engagement_strategist() -> Value {
    let comment_kind = json!({ "type": "STRING", "enum": ["Positive", "Negative", "Question"] });
    json!({
        "type": "OBJECT",
        "properties": {
            "basePost": {
                "type": "OBJECT",
                "properties": {
                    "caption": { "type": "STRING" },
                    "hashtags": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "safetyAnalysis": {
                        "type": "OBJECT",
                        "properties": {
                            "isSafe": { "type": "BOOLEAN" },
                            "reasoning": { "type": "STRING" }
                        }
                    }
                }
            },
            "engagementStrategy": {
                "type": "OBJECT",
                "properties": {
                    "simulatedComments": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "username": { "type": "STRING" },
                                "comment": { "type": "STRING" },
                                "type": comment_kind
                            }
                        }
                    },
                    "suggestedReplies": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "type": comment_kind,
                                "reply": { "type": "STRING" }
                            }
                        }
                    },
                    "boostStrategy": {
                        "type": "OBJECT",
                        "properties": {
                            "recommendation": { "type": "STRING" },
                            "simulatedOutcome": { "type": "STRING" }
                        }
                    },
                    "followUpPostIdea": { "type": "STRING" }
                }
            }
        },
        "required": ["basePost", "engagementStrategy"]
    })
}
