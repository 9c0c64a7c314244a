use crate::domain::value_objects::PromptType;

/// Assembles system prompts and greetings for conversation sessions.
///
/// Each prompt type carries its own persona and instructions; the retrieved
/// context block is appended to whichever persona is active so the model
/// answers from the equipment's knowledge base rather than from memory.
pub struct PromptService;

impl PromptService {
    pub fn new() -> Self {
        Self
    }

    /// System prompt for a turn, with retrieved context folded in.
    /// An empty context block tells the model to say so instead of guessing.
    pub fn system_prompt(
        &self,
        prompt_type: PromptType,
        equipment_name: &str,
        context: &str,
    ) -> String {
        let persona = Self::persona(prompt_type, equipment_name);
        if context.trim().is_empty() {
            format!(
                "{}\n\nNo documentation matched this question. Say you could not \
                 find the answer in the available documents and suggest the caller \
                 rephrase or contact support. Do not invent specifications, part \
                 numbers, or procedures.",
                persona
            )
        } else {
            format!(
                "{}\n\nAnswer using only the documentation excerpts below. If the \
                 excerpts do not cover the question, say so plainly. Keep answers \
                 short and speakable; this is a voice conversation.\n\n\
                 Documentation excerpts:\n{}",
                persona, context
            )
        }
    }

    /// Opening line the assistant speaks when a client attaches.
    pub fn greeting(&self, prompt_type: PromptType, equipment_name: &str) -> String {
        match prompt_type {
            PromptType::CallCenter => format!(
                "Hello, thank you for calling. I can help you with questions about \
                 the {}. What can I do for you today?",
                equipment_name
            ),
            PromptType::Technical => format!(
                "Hi, I'm the technical assistant for the {}. Ask me about \
                 specifications, procedures, or troubleshooting.",
                equipment_name
            ),
            PromptType::CustomerService => format!(
                "Hello! I'm here to help with your {}. How can I assist you?",
                equipment_name
            ),
            PromptType::Sales => format!(
                "Hi there! Happy to tell you all about the {}. What would you \
                 like to know?",
                equipment_name
            ),
            PromptType::Emergency => format!(
                "This is the emergency support line for the {}. Please describe \
                 the situation. If anyone is in danger, stop the equipment and \
                 call your local emergency number first.",
                equipment_name
            ),
            PromptType::DocumentQna => format!(
                "Ready to answer questions from the {} documentation. Go ahead.",
                equipment_name
            ),
        }
    }

    fn persona(prompt_type: PromptType, equipment_name: &str) -> String {
        match prompt_type {
            PromptType::CallCenter => format!(
                "You are a friendly call center agent supporting callers who use \
                 the {}. Be polite and efficient. Confirm you understood the \
                 question before answering when it is ambiguous.",
                equipment_name
            ),
            PromptType::Technical => format!(
                "You are a senior technician for the {}. Give precise, \
                 step-by-step guidance. Quote exact values such as torques, \
                 pressures, and part numbers when the documentation provides them.",
                equipment_name
            ),
            PromptType::CustomerService => format!(
                "You are a customer service representative for owners of the {}. \
                 Be warm and reassuring. Explain things in plain language without \
                 jargon.",
                equipment_name
            ),
            PromptType::Sales => format!(
                "You are a sales specialist for the {}. Highlight capabilities \
                 and benefits accurately; never promise features the \
                 documentation does not describe.",
                equipment_name
            ),
            PromptType::Emergency => format!(
                "You are an emergency support operator for the {}. Safety comes \
                 first: lead with shutdown and isolation steps, keep instructions \
                 short, and tell the caller to contact emergency services for any \
                 danger to people.",
                equipment_name
            ),
            PromptType::DocumentQna => format!(
                "You answer questions strictly from the {} documentation. Cite \
                 the source file of each fact you use.",
                equipment_name
            ),
        }
    }
}

impl Default for PromptService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_folded_into_prompt() {
        let service = PromptService::new();
        let prompt = service.system_prompt(
            PromptType::Technical,
            "Press B7",
            "[Source: manual.txt]\nTorque the bolts to 35 Nm.",
        );

        assert!(prompt.contains("Press B7"));
        assert!(prompt.contains("Torque the bolts to 35 Nm."));
        assert!(prompt.contains("Documentation excerpts:"));
    }

    #[test]
    fn test_empty_context_forbids_guessing() {
        let service = PromptService::new();
        let prompt = service.system_prompt(PromptType::CallCenter, "Press B7", "  ");

        assert!(prompt.contains("could not"));
        assert!(!prompt.contains("Documentation excerpts:"));
    }

    #[test]
    fn test_each_type_has_distinct_persona() {
        let service = PromptService::new();
        let types = [
            PromptType::CallCenter,
            PromptType::Technical,
            PromptType::CustomerService,
            PromptType::Sales,
            PromptType::Emergency,
            PromptType::DocumentQna,
        ];

        let prompts: Vec<String> = types
            .iter()
            .map(|t| service.system_prompt(*t, "Press B7", "context"))
            .collect();

        for (i, a) in prompts.iter().enumerate() {
            for b in prompts.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_greeting_names_equipment() {
        let service = PromptService::new();
        for prompt_type in [PromptType::CallCenter, PromptType::Emergency] {
            let greeting = service.greeting(prompt_type, "Crane 12");
            assert!(greeting.contains("Crane 12"));
        }
    }
}
