//! Fixed text and schema sent to the AI service.

use serde_json::{json, Value};

pub const MEDICINE_INFO_PROMPT: &str = "Analyze the provided information and identify the medicine. Provide its name, a brief description, its active chemical ingredients, drugs it should not be mixed with, and a typical dosage frequency. Respond in the requested JSON format.";

pub const CHAT_SYSTEM_INSTRUCTION: &str = "You are a helpful AI assistant specializing in pharmacology named Pill Papa AI. You have been provided with the user's current list of medications and their weekly reminder schedule in the chat history. Refer to this information to answer questions about their regimen. For instance, if they ask about their schedule for a specific day, use the provided reminder data. Be conversational and helpful. Always advise users to consult their doctor or pharmacist for definitive medical advice.";

pub const CONTEXT_ACKNOWLEDGEMENT: &str =
    "Understood. I have your medication and reminder schedule. How can I help you today?";

pub const CHAT_GREETING: &str = "Hello! I'm your Pill Papa AI assistant. I can see your dashboard and weekly view. Ask me anything about your medications or schedule. Please remember to consult a healthcare professional for medical advice.";

pub const CHAT_APOLOGY: &str = "Sorry, I encountered an error. Please try again.";

pub const LOOKUP_FAILED: &str = "Could not retrieve medicine information. Please try again.";

/// Prompt for a lookup by drug name.
pub fn name_lookup_prompt(drug_name: &str) -> String {
    format!("{MEDICINE_INFO_PROMPT} The medicine name is: {drug_name}")
}

/// First user turn of every conversation.
pub fn context_preamble(context_snapshot: &str) -> String {
    format!(
        "Here is my current medication and reminder schedule. Use this as context for our conversation:\n\n{context_snapshot}"
    )
}

/// Response schema requiring every `MedicineFields` property.
pub fn medicine_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "name": {
                "type": "STRING",
                "description": "The common brand or generic name of the medicine."
            },
            "description": {
                "type": "STRING",
                "description": "A brief, one-paragraph summary of what the medicine is used for."
            },
            "activeIngredients": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of the primary active chemical ingredients."
            },
            "interactions": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of substances or other drugs this medicine should not be mixed with."
            },
            "dosage": {
                "type": "STRING",
                "description": "A typical dosage recommendation, e.g., \"One tablet twice a day\"."
            }
        },
        "required": ["name", "description", "activeIngredients", "interactions", "dosage"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_prompt_appends_the_drug_name() {
        let prompt = name_lookup_prompt("Ibuprofen");
        assert!(prompt.starts_with(MEDICINE_INFO_PROMPT));
        assert!(prompt.ends_with(" The medicine name is: Ibuprofen"));
    }

    #[test]
    fn schema_requires_all_medicine_fields() {
        let schema = medicine_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec!["name", "description", "activeIngredients", "interactions", "dosage"]
        );
        for field in required {
            assert!(schema["properties"][field].is_object());
        }
    }
}
