//! 재난 대비 체크리스트 프롬프트

use super::template::PromptTemplate;

pub const TEMPLATE: PromptTemplate = PromptTemplate::new(
    "checklistPrompt",
    r#"You are an expert in disaster preparedness. Generate a checklist of essential items for the following disaster type: {{{disasterType}}}. The checklist should be comprehensive but concise, providing practical and actionable steps to ensure safety and preparedness. Each item should be a single actionable step.

Return a JSON object with exactly one field:
- checklistItems: an array of strings, one actionable step per entry, in the order they should be done.

Do not include any explanations or additional text. Only include the JSON.

Example Output:
{
  "checklistItems": [
    "Assemble a disaster supply kit with water, food, and first-aid supplies",
    "Develop a family communication plan",
    "Identify safe spots in your home during a disaster"
  ]
}"#,
);
