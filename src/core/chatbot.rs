use serde::Serialize;

pub const WELCOME_MESSAGE: &str =
    "Hi there! I'm Pi, your friendly AI companion. How can I help you today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Play,
    Story,
    Song,
    Fallback,
}

impl Intent {
    pub fn response(self) -> &'static str {
        match self {
            Intent::Greeting => {
                "Hello there! I'm Pi. I love talking with kids! What would you like to play today?"
            }
            Intent::Play => {
                "I know lots of games! How about I Spy, Simon Says, or we could make up a story together? What would you like to do?"
            }
            Intent::Story => {
                "Once upon a time, there was a brave little explorer who discovered a magical playground. Would you like to hear what happened next?"
            }
            Intent::Song => {
                "I love singing! 🎵 Twinkle twinkle little star, how I wonder what you are! 🎵 Do you know this song?"
            }
            Intent::Fallback => {
                "That sounds interesting! Tell me more about it or ask me to play a game with you!"
            }
        }
    }
}

/// Words an intent answers to. `exact` must equal a whole word; `stems`
/// match any word that starts with them ("singing", "playground").
struct Keywords {
    exact: &'static [&'static str],
    stems: &'static [&'static str],
}

impl Keywords {
    fn matches(&self, word: &str) -> bool {
        self.exact.contains(&word) || self.stems.iter().any(|stem| word.starts_with(stem))
    }
}

/// 依序比對，先命中的意圖優先
const DISPATCH_TABLE: &[(Intent, Keywords)] = &[
    (
        Intent::Greeting,
        Keywords {
            exact: &["hello", "hi"],
            stems: &[],
        },
    ),
    (
        Intent::Play,
        Keywords {
            exact: &[],
            stems: &["game", "play"],
        },
    ),
    (
        Intent::Story,
        Keywords {
            exact: &[],
            stems: &["story", "stori"],
        },
    ),
    (
        Intent::Song,
        Keywords {
            exact: &[],
            stems: &["song", "sing"],
        },
    ),
];

/// Picks the first intent in table order that matches one of the message's
/// words. Words are split on non-alphanumerics, so "this" is not a greeting
/// and "history" is not a story.
pub fn classify(message: &str) -> Intent {
    let lowered = message.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    DISPATCH_TABLE
        .iter()
        .find(|(_, keywords)| words.iter().any(|word| keywords.matches(word)))
        .map(|(intent, _)| *intent)
        .unwrap_or(Intent::Fallback)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Scripted conversation with the "Pi" companion.
#[derive(Debug, Clone)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: Role::Assistant,
                content: WELCOME_MESSAGE.to_string(),
            }],
        }
    }

    /// Returns `None` for blank input, which is not recorded.
    pub fn send(&mut self, text: &str) -> Option<&str> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let intent = classify(text);
        tracing::debug!("Chat message classified as {:?}", intent);

        self.messages.push(ChatMessage {
            role: Role::User,
            content: text.to_string(),
        });
        self.messages.push(ChatMessage {
            role: Role::Assistant,
            content: intent.response().to_string(),
        });

        self.messages.last().map(|m| m.content.as_str())
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_each_intent() {
        assert_eq!(classify("Hello Pi!"), Intent::Greeting);
        assert_eq!(classify("can we PLAY something"), Intent::Play);
        assert_eq!(classify("tell me a story"), Intent::Story);
        assert_eq!(classify("let's sing"), Intent::Song);
        assert_eq!(classify("what is a dinosaur"), Intent::Fallback);
    }

    #[test]
    fn test_table_order_decides_ties() {
        assert_eq!(classify("hi, tell me a story"), Intent::Greeting);
        assert_eq!(classify("a story about a game"), Intent::Play);
    }

    #[test]
    fn test_inflected_words_match() {
        assert_eq!(classify("I like singing"), Intent::Song);
        assert_eq!(classify("can we go playing outside"), Intent::Play);
        assert_eq!(classify("playground time"), Intent::Play);
        assert_eq!(classify("more games please"), Intent::Play);
        assert_eq!(classify("read me some stories"), Intent::Story);
        assert_eq!(classify("storytime!"), Intent::Story);
    }

    #[test]
    fn test_greetings_need_the_whole_word() {
        assert_eq!(classify("hi!"), Intent::Greeting);
        assert_eq!(classify("hiking is fun"), Intent::Fallback);
        assert_eq!(classify("hellos"), Intent::Fallback);
    }

    #[test]
    fn test_whole_word_matching() {
        assert_eq!(classify("this is nothing"), Intent::Fallback);
        assert_eq!(classify("history"), Intent::Fallback);
    }

    #[test]
    fn test_session_records_turns() {
        let mut session = ChatSession::new();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, WELCOME_MESSAGE);

        let reply = session.send("Sing me a song").map(str::to_string);
        assert_eq!(reply.as_deref(), Some(Intent::Song.response()));
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[1].role, Role::User);
        assert_eq!(session.messages()[2].role, Role::Assistant);
    }

    #[test]
    fn test_blank_message_is_ignored() {
        let mut session = ChatSession::new();
        assert!(session.send("   ").is_none());
        assert_eq!(session.messages().len(), 1);
    }
}
