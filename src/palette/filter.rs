use crate::store::Prompt;

/// Query literals that open an empty editor when nothing matches.
pub const CREATE_COMMANDS: [&str; 2] = ["new", "新建"];

/// Case-insensitive substring match against the title or any tag.
pub fn matches(prompt: &Prompt, query: &str) -> bool {
    let needle = query.to_lowercase();
    prompt.title.to_lowercase().contains(&needle)
        || prompt
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&needle))
}

pub fn filter<'a>(prompts: &'a [Prompt], query: &str) -> Vec<&'a Prompt> {
    prompts
        .iter()
        .filter(|prompt| matches(prompt, query))
        .collect()
}

pub fn is_create_command(query: &str) -> bool {
    query.to_lowercase() == CREATE_COMMANDS[0] || query == CREATE_COMMANDS[1]
}
