//! 재난 대비 퀴즈 생성 프롬프트

use super::template::PromptTemplate;

pub const TEMPLATE: PromptTemplate = PromptTemplate::new(
    "generateQuizPrompt",
    r#"You are a quiz generator for disaster preparedness education.

Generate a quiz with {{numberOfQuestions}} questions about {{disasterType}} at the {{difficulty}} difficulty level.

Each question should have 4 answer options, with one correct answer.

Format the output as a JSON object with a 'quiz' array of exactly {{numberOfQuestions}} entries. Each object in the array should have these fields:
- question: the quiz question
- options: an array of 4 strings, the answer options
- correctAnswer: the correct answer to the question, which must be one of the options, copied exactly.

Do not include any explanations or additional text. Only include the JSON. Make sure the JSON is valid and parsable.
Example:
{
  "quiz": [
    {
      "question": "What is the first step you should take during an earthquake?",
      "options": ["Run outside immediately", "Drop, cover, and hold on", "Hide under a table", "Call emergency services"],
      "correctAnswer": "Drop, cover, and hold on"
    },
    {
      "question": "What is a sign that a flood is likely to occur?",
      "options": ["Clear skies", "Heavy rainfall", "Low humidity", "Rising temperatures"],
      "correctAnswer": "Heavy rainfall"
    }
  ]
}"#,
);
