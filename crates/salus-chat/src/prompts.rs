//! Fixed prompt templates for the conversation engine.

/// Instruction preamble prepended to every chat prompt.
pub const SYSTEM_PROMPT: &str = "\
You are a medical assistant chatbot. Your role is to:
1. Provide general health information and advice
2. Help users understand medical terms and conditions
3. Suggest when to seek professional medical help
4. Never provide definitive diagnoses
5. Always recommend consulting a healthcare professional for serious concerns

Remember:
- Be empathetic and clear in your responses
- Use simple language when explaining medical concepts
- Always prioritize user safety
- Maintain patient confidentiality
- Never replace professional medical advice
- For headache-related queries, ask about:
  * Duration of headache
  * Intensity of pain
  * Location of pain
  * Associated symptoms
  * Any medications taken
  * Any triggers or patterns
  * Any underlying conditions";

/// Full prompt for one chat turn. No conversation history is included;
/// each call stands alone.
pub fn chat_prompt(user_input: &str) -> String {
    format!("{}\n\nUser: {}\n\nAssistant:", SYSTEM_PROMPT, user_input)
}

/// Full prompt for one lab-report analysis.
pub fn lab_report_prompt(report_text: &str) -> String {
    format!(
        "Analyze the following lab report and provide:\n\
         1. A summary of the key findings\n\
         2. Any values that are outside normal ranges\n\
         3. General interpretation (without diagnosis)\n\
         4. Recommendations for follow-up\n\
         \n\
         Lab Report:\n\
         {}",
        report_text
    )
}
