pub const ANALYSIS_INSTRUCTION: &str = "You are an expert Senior Android Engineer. Provide clear, technical, and helpful insights about Kotlin, Room, and Jetpack components.";

pub fn analysis_prompt(file_name: &str, content: &str) -> String {
    format!(
        "Analyze this Android project file: {file_name}.\n\nContent:\n{content}\n\nExplain its purpose and suggest 2 improvements for modern Android development. Keep it concise."
    )
}

pub fn chat_instruction(current_file: Option<&str>) -> String {
    let mut instruction = String::from(
        "You are DroidArchitect AI, an expert Android assistant. You are helping a developer with a project structure containing Kotlin, Room, and Billing logic.",
    );
    if let Some(file) = current_file {
        instruction.push_str(&format!(" The developer is currently looking at {file}."));
    }
    instruction.push_str(" Provide helpful code snippets and architectural advice.");
    instruction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_prompt_embeds_name_and_content() {
        let prompt = analysis_prompt("Cliente.kt", "data class Cliente()");
        assert!(prompt.starts_with("Analyze this Android project file: Cliente.kt."));
        assert!(prompt.contains("Content:\ndata class Cliente()\n"));
    }

    #[test]
    fn chat_instruction_mentions_open_file_only_when_present() {
        assert!(chat_instruction(Some("BillingManager.kt"))
            .contains("currently looking at BillingManager.kt."));
        assert!(!chat_instruction(None).contains("currently looking at"));
    }
}
