// ABOUTME: Tool declarations offered to the concierge model
// ABOUTME: The qualifyLead function and its typed arguments

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::types::{FunctionDeclaration, Tool};

pub const QUALIFY_LEAD_TOOL: &str = "qualifyLead";

/// Arguments the model supplies when qualifying a lead
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualifyLeadArgs {
    pub name: String,
    pub budget: String,
}

pub fn qualify_lead_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: QUALIFY_LEAD_TOOL.to_string(),
        description: "Update the lead status to qualified when a user provides their name and budget."
            .to_string(),
        parameters: json!({
            "type": "OBJECT",
            "properties": {
                "name": {
                    "type": "STRING",
                    "description": "The full name of the potential client."
                },
                "budget": {
                    "type": "STRING",
                    "description": "The property budget or price range mentioned by the client (e.g., \"$2M\", \"around 5 million\")."
                }
            },
            "required": ["name", "budget"]
        }),
    }
}

/// Tool set declared on every concierge request
pub fn concierge_tools() -> Vec<Tool> {
    vec![Tool {
        function_declarations: vec![qualify_lead_declaration()],
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_requires_name_and_budget() {
        let declaration = qualify_lead_declaration();
        assert_eq!(declaration.name, "qualifyLead");
        assert_eq!(declaration.parameters["required"], json!(["name", "budget"]));
    }

    #[test]
    fn test_args_parse_from_model_json() {
        let args: QualifyLeadArgs =
            serde_json::from_value(json!({"name": "Jane Doe", "budget": "$3M"})).unwrap();
        assert_eq!(args.name, "Jane Doe");
        assert_eq!(args.budget, "$3M");

        let missing = serde_json::from_value::<QualifyLeadArgs>(json!({"name": "Jane Doe"}));
        assert!(missing.is_err());
    }
}
