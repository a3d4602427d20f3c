//! JSON Schema sent with every extraction call

use factline_domain::StructuredSchema;
use serde_json::json;

/// Schema name reported to providers
pub const SCHEMA_NAME: &str = "extracted_claims";

/// The extraction output contract: `{ "claims": [{claim, exactText, searchQuery}] }`
///
/// The root is an object because strict structured-output modes reject array roots.
pub fn extraction_schema() -> StructuredSchema {
    StructuredSchema::new(
        SCHEMA_NAME,
        json!({
            "type": "object",
            "properties": {
                "claims": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "claim": {
                                "type": "string",
                                "description": "Self-contained, independently verifiable restatement of the claim"
                            },
                            "exactText": {
                                "type": "string",
                                "description": "Exact continuous substring of the input text containing the claim"
                            },
                            "searchQuery": {
                                "type": "string",
                                "description": "Question that retrieves evidence for or against the claim"
                            }
                        },
                        "required": ["claim", "exactText", "searchQuery"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["claims"],
            "additionalProperties": false
        }),
    )
}
