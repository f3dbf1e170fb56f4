/// Response fragments — the ordered pieces of output a handler appends during
/// a turn. The core keeps rich content opaque: cards, lists, and carousels
/// travel as `Directive` payloads and are rendered by the external serializer.
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResponseFragment {
    /// Spoken text with an optional distinct display text.
    Simple {
        speech: String,
        text: Option<String>,
    },
    /// Raw SSML markup, spoken as-is.
    Ssml { markup: String },
    /// Suggestion chips shown below the response on screen surfaces.
    Suggestions { chips: Vec<String> },
    /// Opaque rich-content payload (card, list, carousel, media object, ...).
    Directive { payload: serde_json::Value },
}

impl ResponseFragment {
    pub fn text(speech: impl Into<String>) -> Self {
        ResponseFragment::Simple {
            speech: speech.into(),
            text: None,
        }
    }

    pub fn text_with_display(speech: impl Into<String>, text: impl Into<String>) -> Self {
        ResponseFragment::Simple {
            speech: speech.into(),
            text: Some(text.into()),
        }
    }

    pub fn ssml(markup: impl Into<String>) -> Self {
        ResponseFragment::Ssml {
            markup: markup.into(),
        }
    }

    pub fn suggestions(chips: impl IntoIterator<Item = impl Into<String>>) -> Self {
        ResponseFragment::Suggestions {
            chips: chips.into_iter().map(Into::into).collect(),
        }
    }

    pub fn directive(payload: serde_json::Value) -> Self {
        ResponseFragment::Directive { payload }
    }
}
