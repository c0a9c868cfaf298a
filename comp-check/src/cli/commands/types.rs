//! Types command: list accepted component types

use comp_check_core::ComponentType;

/// Execute the types command
pub fn execute() {
    for line in lines() {
        println!("{}", line);
    }
}

fn lines() -> Vec<String> {
    ComponentType::ALL
        .iter()
        .map(|kind| match kind.model_keywords() {
            Some(keywords) => format!("{:<14} model must mention one of: {}", kind, keywords.join(", ")),
            None => kind.to_string(),
        })
        .collect()
}
