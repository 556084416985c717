//! New-topic form state machine.
//!
//! Everything the composer page does goes through [`ComposerState::apply`]:
//! an action comes in, a new state comes out, plus at most one command the
//! page has to carry out (start the create call, or navigate). The state has
//! no DOM or network handles, so the whole flow is testable natively.
//!
//! Phases: `Idle` (nothing typed) -> `Editing` -> `Submitting` ->
//! `Published`, or back to `Editing` when the backend refuses the topic.

use crate::api::{ApiErrorKind, ApiResult};
use crate::i18n::I18n;
use crate::models::{AddTopicRequest, EditorKind, NodeInfo, TopicDraft, UploadedFile, TITLE_MAX_CHARS};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) enum ComposerPhase {
    #[default]
    Idle,
    Editing,
    /// A create call is in flight. Further submits are dropped.
    Submitting,
    Published {
        topic_id: String,
    },
}

/// Local validation findings, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Problem {
    EmptyTitle,
}

impl Problem {
    pub fn key(self) -> &'static str {
        match self {
            Problem::EmptyTitle => "error:Topic title cannot be empty",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum DraftField {
    Title(String),
    Body(String),
}

#[derive(Clone, Debug)]
pub(crate) enum ComposerAction {
    UpdateField(DraftField),
    SwitchEditor(EditorKind),
    TogglePreview,
    Submit,
    ClearMessage,
    NodeLoaded(ApiResult<NodeInfo>),
    CreateFinished(ApiResult<String>),
    UploadFinished(ApiResult<UploadedFile>),
    TitleWidthMeasured(i32),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ComposerCommand {
    CreateTopic(AddTopicRequest),
    Navigate(String),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct ComposerState {
    pub draft: TopicDraft,
    pub phase: ComposerPhase,

    /// Fetched once per mount; never replaced afterwards.
    pub node: Option<NodeInfo>,

    pub preview_enabled: bool,

    pub problems: Vec<Problem>,
    /// Last backend message (create or upload failure), shown after `problems`.
    pub server_message: Option<String>,

    /// Title field width in px, measured once by the large layout.
    pub layout_width: Option<i32>,
}

/// Looked up in the `error` namespace like any backend message.
pub(crate) const UPLOAD_NEEDS_MARKDOWN: &str =
    "Uploaded files can only be inserted in the Markdown editor";

pub(crate) fn topic_review_path(topic_id: &str) -> String {
    format!("/t/{}/review", urlencoding::encode(topic_id))
}

fn clamp_title(value: String) -> String {
    if value.chars().count() <= TITLE_MAX_CHARS {
        value
    } else {
        value.chars().take(TITLE_MAX_CHARS).collect()
    }
}

impl ComposerState {
    pub fn new(node_id: &str) -> Self {
        Self {
            draft: TopicDraft::for_node(node_id),
            ..Default::default()
        }
    }

    pub fn is_typing_started(&self) -> bool {
        self.phase != ComposerPhase::Idle
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == ComposerPhase::Submitting
    }

    pub fn node_name(&self) -> Option<&str> {
        self.node.as_ref().map(|n| n.name.as_str())
    }

    /// Title rules only. Whether a submit may go ahead also depends on
    /// typing having started, see [`ComposerAction::Submit`].
    pub fn validate(&self) -> Vec<Problem> {
        let mut problems = Vec::new();
        if self.draft.title.trim().is_empty() {
            problems.push(Problem::EmptyTitle);
        }
        problems
    }

    pub fn has_messages(&self) -> bool {
        !self.problems.is_empty() || self.server_message.is_some()
    }

    /// Problems first, then the server message, all localized.
    pub fn visible_messages(&self, i18n: &I18n) -> Vec<String> {
        let mut out: Vec<String> = self.problems.iter().map(|p| i18n.t(p.key())).collect();
        if let Some(msg) = &self.server_message {
            out.push(i18n.t_error(msg));
        }
        out
    }

    fn mark_typing(&mut self) {
        if self.phase == ComposerPhase::Idle {
            self.phase = ComposerPhase::Editing;
        }
    }

    pub fn apply(mut self, action: ComposerAction) -> (Self, Option<ComposerCommand>) {
        match action {
            ComposerAction::UpdateField(field) => {
                match field {
                    DraftField::Title(v) => self.draft.title = clamp_title(v),
                    DraftField::Body(v) => self.draft.body.set_content(v),
                }
                self.mark_typing();
                (self, None)
            }

            ComposerAction::SwitchEditor(kind) => {
                self.draft.body = std::mem::take(&mut self.draft.body).switch_to(kind);
                self.mark_typing();
                (self, None)
            }

            ComposerAction::TogglePreview => {
                self.preview_enabled = !self.preview_enabled;
                (self, None)
            }

            ComposerAction::Submit => self.submit(),

            ComposerAction::ClearMessage => {
                self.problems.clear();
                self.server_message = None;
                (self, None)
            }

            ComposerAction::NodeLoaded(Ok(node)) => {
                if self.node.is_some() {
                    log::debug!("node metadata already loaded; ignoring {}", node.id);
                } else {
                    self.node = Some(node);
                }
                (self, None)
            }

            ComposerAction::NodeLoaded(Err(e)) => {
                log::warn!("failed to load node {}: {}", self.draft.node_id, e);
                (self, None)
            }

            ComposerAction::CreateFinished(result) => {
                if self.phase != ComposerPhase::Submitting {
                    log::debug!("create result arrived outside of a submit; ignoring");
                    return (self, None);
                }
                match result {
                    Ok(topic_id) => {
                        log::info!("topic {} published in node {}", topic_id, self.draft.node_id);
                        let path = topic_review_path(&topic_id);
                        self.phase = ComposerPhase::Published { topic_id };
                        (self, Some(ComposerCommand::Navigate(path)))
                    }
                    Err(e) => {
                        log::warn!("add topic failed: {}", e);
                        self.phase = ComposerPhase::Editing;
                        self.server_message = Some(match e.kind {
                            ApiErrorKind::Unauthorized => "Please sign in first".to_string(),
                            _ => e.message,
                        });
                        (self, None)
                    }
                }
            }

            ComposerAction::UploadFinished(Ok(file)) => {
                // The rich surface only reads the body when it mounts, so a link
                // appended behind it would be overwritten by the next keystroke.
                if self.draft.editor_kind() != EditorKind::Markdown {
                    log::warn!("upload of {} finished outside the markdown editor", file.name);
                    self.server_message = Some(UPLOAD_NEEDS_MARKDOWN.to_string());
                    return (self, None);
                }
                let link = file.to_markdown();
                let body = self.draft.body.content();
                let next = if body.is_empty() {
                    link
                } else if body.ends_with('\n') {
                    format!("{body}{link}")
                } else {
                    format!("{body}\n{link}")
                };
                self.draft.body.set_content(next);
                self.mark_typing();
                (self, None)
            }

            ComposerAction::UploadFinished(Err(e)) => {
                log::warn!("upload failed: {}", e);
                self.server_message = Some(e.message);
                (self, None)
            }

            ComposerAction::TitleWidthMeasured(width) => {
                if self.layout_width.is_none() && width > 0 {
                    self.layout_width = Some(width);
                }
                (self, None)
            }
        }
    }

    fn submit(mut self) -> (Self, Option<ComposerCommand>) {
        match self.phase {
            // Untouched form: silently rejected, no problems shown.
            ComposerPhase::Idle => return (self, None),
            ComposerPhase::Submitting => {
                log::debug!("submit ignored: create call already in flight");
                return (self, None);
            }
            ComposerPhase::Published { .. } => return (self, None),
            ComposerPhase::Editing => {}
        }

        let problems = self.validate();
        if !problems.is_empty() {
            self.problems = problems;
            return (self, None);
        }

        self.problems.clear();
        self.server_message = None;
        if let Some(node) = &self.node {
            self.draft.node_id = node.id.clone();
            self.draft.node_name = node.name.clone();
        }
        self.phase = ComposerPhase::Submitting;

        log::info!("publishing topic in node {}", self.draft.node_id);
        let req = self.draft.to_request();
        (self, Some(ComposerCommand::CreateTopic(req)))
    }
}
