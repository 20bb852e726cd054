use serde::Serialize;

use super::{MAX_TOKENS, MODEL, STREAM, TEMPERATURE, TOP_P, prompts};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One role-tagged entry of the conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            name: None,
        }
    }

    fn user(content: impl Into<String>, name: Option<&'static str>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            name,
        }
    }
}

/// Body of a chat-completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub model: &'static str,
    pub max_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub n: u32,
    pub stream: bool,
}

/// Build the five-message conversation asking for a commit message.
///
/// The order is fixed: system instructions, the staged changes, the author's
/// recent subjects, the repository's recent subjects, then a format reminder.
pub fn conversation(diff: &str, user_commits: &[String], repo_commits: &[String]) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(prompts::SYSTEM_INSTRUCTIONS),
        ChatMessage::user(
            format!("{}\n```\n{diff}\n```", prompts::CHANGES_HEADING),
            Some("changes"),
        ),
        ChatMessage::user(
            commit_list(prompts::USER_COMMITS_HEADING, user_commits),
            Some("user-commits"),
        ),
        ChatMessage::user(
            commit_list(prompts::REPO_COMMITS_HEADING, repo_commits),
            Some("recent-commits"),
        ),
        ChatMessage::user(prompts::FORMAT_REMINDER, None),
    ]
}

/// Wrap the conversation with the fixed model parameters.
pub fn chat_request(messages: Vec<ChatMessage>) -> ChatRequest {
    ChatRequest {
        messages,
        model: MODEL,
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
        top_p: TOP_P,
        n: 1,
        stream: STREAM,
    }
}

fn commit_list(heading: &str, subjects: &[String]) -> String {
    let blocks = subjects
        .iter()
        .map(|s| format!("```text\n{s}\n```"))
        .collect::<Vec<_>>()
        .join("\n");
    format!("{heading}\n{blocks}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subjects(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn always_five_messages_in_order() {
        for (diff, commits) in [
            ("", vec![]),
            ("+ added comment", subjects(&["fix: typo", "feat: init"])),
        ] {
            let msgs = conversation(diff, &commits, &commits);
            let shape: Vec<_> = msgs.iter().map(|m| (m.role, m.name)).collect();
            assert_eq!(
                shape,
                vec![
                    (Role::System, None),
                    (Role::User, Some("changes")),
                    (Role::User, Some("user-commits")),
                    (Role::User, Some("recent-commits")),
                    (Role::User, None),
                ]
            );
        }
    }

    #[test]
    fn diff_is_fenced() {
        let msgs = conversation("+ added comment", &[], &[]);
        assert_eq!(msgs[1].content, "# CODE CHANGES:\n```\n+ added comment\n```");
    }

    #[test]
    fn each_subject_gets_its_own_block() {
        let msgs = conversation(
            "",
            &subjects(&["mine"]),
            &subjects(&["fix: typo", "feat: init"]),
        );
        assert_eq!(msgs[2].content, "# RECENT USER COMMITS:\n```text\nmine\n```");
        assert_eq!(
            msgs[3].content,
            "# RECENT REPOSITORY COMMITS:\n```text\nfix: typo\n```\n```text\nfeat: init\n```"
        );
    }

    #[test]
    fn system_instructions_are_sent_verbatim() {
        let msgs = conversation("", &[], &[]);
        let system = &msgs[0].content;
        assert!(system.starts_with("You are an AI programming assistant, helping"));
        assert!(system.contains(
            "It MUST follow the the established writing conventions. 5. Remove any meta information"
        ));
        assert!(system.ends_with("Keep your answers short and impersonal."));
        assert!(msgs[4].content.ends_with("```text\ncommit message goes here\n```"));
    }

    #[test]
    fn empty_history_keeps_heading() {
        let msgs = conversation("", &[], &[]);
        assert_eq!(msgs[2].content, "# RECENT USER COMMITS:\n");
    }

    #[test]
    fn request_serializes_fixed_parameters() {
        let req = chat_request(conversation("d", &[], &[]));
        let json = serde_json::to_value(&req).unwrap();

        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["max_tokens"], 4096);
        assert_eq!(json["temperature"], 0.2);
        assert_eq!(json["top_p"], 1.0);
        assert_eq!(json["n"], 1);
        assert_eq!(json["stream"], true);
        assert_eq!(json["messages"][0]["role"], "system");
        assert!(json["messages"][0].get("name").is_none());
        assert_eq!(json["messages"][1]["name"], "changes");
    }
}
