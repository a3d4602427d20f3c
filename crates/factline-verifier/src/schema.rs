//! JSON Schema sent with every verification call

use factline_domain::StructuredSchema;
use serde_json::json;

/// Schema name reported to providers
pub const SCHEMA_NAME: &str = "claim_verification";

/// The verification output contract
///
/// Every property is required for strict structured-output modes; `suggestedFix`
/// is nullable instead of optional.
pub fn verification_schema() -> StructuredSchema {
    let score = |description: &str| {
        json!({
            "type": "integer",
            "minimum": 0,
            "maximum": 100,
            "description": description
        })
    };

    StructuredSchema::new(
        SCHEMA_NAME,
        json!({
            "type": "object",
            "properties": {
                "status": {
                    "type": "string",
                    "enum": ["supported", "contradicted", "debated", "insufficient information"]
                },
                "confidence": score("Overall certainty in the verdict"),
                "explanation": {
                    "type": "string",
                    "description": "Reasoning with {{n}} markers citing sources by sourceNumber"
                },
                "suggestedFix": {
                    "type": ["string", "null"],
                    "description": "Neutral corrected claim; required when status is contradicted"
                },
                "citedSources": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "sourceNumber": {"type": "integer", "minimum": 1},
                            "stance": {
                                "type": "string",
                                "enum": ["support", "contradict", "not relevant", "unclear"]
                            },
                            "agreementPercentage": score("How strongly this source agrees with the claim"),
                            "pertinence": score("Topical relevance of this source regardless of stance"),
                            "relevantSnippet": {
                                "type": "string",
                                "description": "Verbatim quote from the source"
                            }
                        },
                        "required": ["sourceNumber", "stance", "agreementPercentage", "pertinence", "relevantSnippet"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["status", "confidence", "explanation", "suggestedFix", "citedSources"],
            "additionalProperties": false
        }),
    )
}
