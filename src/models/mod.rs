use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Longest title the backend accepts (the title fields also carry `maxlength`).
pub(crate) const TITLE_MAX_CHARS: usize = 120;

/// Node (board) metadata returned by `/api/get-node`.
///
/// casnode returns the whole node row; only `id` and `name` matter here,
/// everything else is ignored on deserialize.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum EditorKind {
    #[default]
    Markdown,
    RichText,
}

impl EditorKind {
    pub const ALL: [EditorKind; 2] = [EditorKind::Markdown, EditorKind::RichText];

    /// Catalog key for the switcher label.
    pub fn label_key(self) -> &'static str {
        match self {
            EditorKind::Markdown => "new:markdown",
            EditorKind::RichText => "new:richtext",
        }
    }
}

/// Topic body tagged with the editor that owns it.
///
/// Switching editors moves the content across unchanged, so flipping
/// markdown -> richtext -> markdown never loses what was typed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum EditorBody {
    Markdown(String),
    RichText(String),
}

impl Default for EditorBody {
    fn default() -> Self {
        EditorBody::Markdown(String::new())
    }
}

impl EditorBody {
    pub fn kind(&self) -> EditorKind {
        match self {
            EditorBody::Markdown(_) => EditorKind::Markdown,
            EditorBody::RichText(_) => EditorKind::RichText,
        }
    }

    pub fn content(&self) -> &str {
        match self {
            EditorBody::Markdown(s) | EditorBody::RichText(s) => s,
        }
    }

    pub fn set_content(&mut self, value: String) {
        match self {
            EditorBody::Markdown(s) | EditorBody::RichText(s) => *s = value,
        }
    }

    pub fn switch_to(self, kind: EditorKind) -> Self {
        let content = match self {
            EditorBody::Markdown(s) | EditorBody::RichText(s) => s,
        };
        match kind {
            EditorKind::Markdown => EditorBody::Markdown(content),
            EditorKind::RichText => EditorBody::RichText(content),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct TopicDraft {
    pub title: String,
    pub body: EditorBody,
    pub node_id: String,
    pub node_name: String,
}

impl TopicDraft {
    pub fn for_node(node_id: &str) -> Self {
        Self {
            node_id: node_id.to_string(),
            ..Default::default()
        }
    }

    pub fn editor_kind(&self) -> EditorKind {
        self.body.kind()
    }

    pub fn to_request(&self) -> AddTopicRequest {
        AddTopicRequest {
            title: self.title.clone(),
            body: self.body.content().to_string(),
            editor_type: self.editor_kind().to_string(),
            node_id: self.node_id.clone(),
            node_name: self.node_name.clone(),
        }
    }
}

/// Wire body for `/api/add-topic` (casnode uses camelCase keys).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddTopicRequest {
    pub title: String,
    pub body: String,
    pub editor_type: String,
    pub node_id: String,
    pub node_name: String,
}

/// A file the backend stored for us, ready to be linked from the body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct UploadedFile {
    pub name: String,
    pub url: String,
    pub is_image: bool,
}

impl UploadedFile {
    pub fn to_markdown(&self) -> String {
        if self.is_image {
            format!("![{}]({})", self.name, self.url)
        } else {
            format!("[{}]({})", self.name, self.url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_editor_kind_wire_names() {
        assert_eq!(EditorKind::Markdown.to_string(), "markdown");
        assert_eq!(EditorKind::RichText.to_string(), "richtext");
        assert_eq!(EditorKind::from_str("richtext").ok(), Some(EditorKind::RichText));
        assert_eq!(EditorKind::default(), EditorKind::Markdown);
    }

    #[test]
    fn test_switching_editor_keeps_content() {
        let body = EditorBody::Markdown("# hello".to_string());
        let rich = body.switch_to(EditorKind::RichText);
        assert_eq!(rich.kind(), EditorKind::RichText);
        assert_eq!(rich.content(), "# hello");

        let back = rich.switch_to(EditorKind::Markdown);
        assert_eq!(back, EditorBody::Markdown("# hello".to_string()));
    }

    #[test]
    fn test_add_topic_request_uses_camel_case_keys() {
        let mut draft = TopicDraft::for_node("qa");
        draft.title = "Hello".to_string();
        draft.node_name = "Q&A".to_string();
        draft.body.set_content("body text".to_string());

        let v = serde_json::to_value(draft.to_request()).expect("should serialize");
        assert_eq!(v["title"], "Hello");
        assert_eq!(v["body"], "body text");
        assert_eq!(v["editorType"], "markdown");
        assert_eq!(v["nodeId"], "qa");
        assert_eq!(v["nodeName"], "Q&A");
    }

    #[test]
    fn test_node_info_ignores_extra_fields() {
        let json = r#"{"id": "golang", "name": "Go", "desc": "gophers", "topicNum": 12}"#;
        let node: NodeInfo = serde_json::from_str(json).expect("node should parse");
        assert_eq!(node.id, "golang");
        assert_eq!(node.name, "Go");
    }

    #[test]
    fn test_uploaded_file_markdown_link() {
        let img = UploadedFile {
            name: "cat.png".to_string(),
            url: "https://cdn/cat.png".to_string(),
            is_image: true,
        };
        assert_eq!(img.to_markdown(), "![cat.png](https://cdn/cat.png)");

        let doc = UploadedFile {
            is_image: false,
            ..img
        };
        assert_eq!(doc.to_markdown(), "[cat.png](https://cdn/cat.png)");
    }
}
