//! Localized UI strings.
//!
//! Keys keep the `namespace:Message` shape the forum's i18next bundles use,
//! so backend messages (`error:{msg}`) and page strings share one lookup.

use crate::storage::load_language;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Locale {
    #[default]
    En,
    Zh,
}

impl Locale {
    /// `zh`, `zh-CN`, `zh_TW` ... map to Chinese; anything else is English.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim().to_ascii_lowercase();
        if tag == "zh" || tag.starts_with("zh-") || tag.starts_with("zh_") {
            Locale::Zh
        } else {
            Locale::En
        }
    }

    /// Stored i18next choice first, then the browser language.
    pub fn detect() -> Self {
        if let Some(lang) = load_language() {
            return Self::from_tag(&lang);
        }
        web_sys::window()
            .and_then(|w| w.navigator().language())
            .map(|lang| Self::from_tag(&lang))
            .unwrap_or_default()
    }

    fn catalog(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Locale::En => EN,
            Locale::Zh => ZH,
        }
    }
}

const EN: &[(&str, &str)] = &[
    ("new:New Topic", "New Topic"),
    ("new:Switch editor", "Switch editor"),
    ("new:markdown", "Markdown"),
    ("new:richtext", "Rich text"),
    ("new:Already enabled Markdown", "Markdown enabled"),
    ("new:Content Preview", "Content Preview"),
    ("new:Topic title", "Topic title"),
    (
        "new:Please input the topic title. The body can be empty if the title expresses the full idea",
        "Please input the topic title. The body can be empty if the title expresses the full idea",
    ),
    ("new:Uploading", "Uploading..."),
    ("newNodeTopic:Preview", "Preview"),
    ("newNodeTopic:Publish", "Publish"),
    ("newNodeTopic:Publishing", "Publishing..."),
    ("node:Ignore this node", "Ignore this node"),
    (
        "node:Topics in the ignored nodes will not appear on the homepage.",
        "Topics in the ignored nodes will not appear on the homepage.",
    ),
    ("error:Topic title cannot be empty", "Topic title cannot be empty"),
    (
        "error:Please resolve the following issues before creating a new topic",
        "Please resolve the following issues before creating a new topic",
    ),
    ("error:Please sign in first", "Please sign in first"),
    (
        "error:Uploaded files can only be inserted in the Markdown editor",
        "Uploaded files can only be inserted in the Markdown editor",
    ),
    ("review:Topic submitted", "Topic submitted"),
    (
        "review:Your topic has been published",
        "Your topic has been published.",
    ),
    ("review:View topic", "View topic"),
    ("general:Not found", "Not found"),
];

const ZH: &[(&str, &str)] = &[
    ("new:New Topic", "创作新主题"),
    ("new:Switch editor", "切换编辑器"),
    ("new:markdown", "Markdown"),
    ("new:richtext", "富文本"),
    ("new:Already enabled Markdown", "已启用 Markdown"),
    ("new:Content Preview", "内容预览"),
    ("new:Topic title", "主题标题"),
    (
        "new:Please input the topic title. The body can be empty if the title expresses the full idea",
        "请输入主题标题，如果标题能够表达完整内容，则正文可以为空",
    ),
    ("new:Uploading", "上传中..."),
    ("newNodeTopic:Preview", "预览"),
    ("newNodeTopic:Publish", "发布主题"),
    ("newNodeTopic:Publishing", "发布中..."),
    ("node:Ignore this node", "忽略这个节点"),
    (
        "node:Topics in the ignored nodes will not appear on the homepage.",
        "被忽略的节点中的主题将不会出现在首页上。",
    ),
    ("error:Topic title cannot be empty", "主题标题不能为空"),
    (
        "error:Please resolve the following issues before creating a new topic",
        "请解决以下问题然后再提交：",
    ),
    ("error:Please sign in first", "请先登录"),
    (
        "error:Uploaded files can only be inserted in the Markdown editor",
        "上传的文件只能插入到 Markdown 编辑器中",
    ),
    ("review:Topic submitted", "主题已提交"),
    ("review:Your topic has been published", "你的主题已发布。"),
    ("review:View topic", "查看主题"),
    ("general:Not found", "未找到"),
];

fn lookup(catalog: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    catalog.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

/// Synchronous string lookup; never fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct I18n {
    pub locale: Locale,
}

impl I18n {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// Active catalog, then English, then the key minus its namespace
    /// (what i18next renders for a missing key).
    pub fn t(&self, key: &str) -> String {
        lookup(self.locale.catalog(), key)
            .or_else(|| lookup(EN, key))
            .map(str::to_string)
            .unwrap_or_else(|| match key.split_once(':') {
                Some((_, rest)) if !rest.is_empty() => rest.to_string(),
                _ => key.to_string(),
            })
    }

    /// Backend messages live in the `error` namespace.
    pub fn t_error(&self, msg: &str) -> String {
        self.t(&format!("error:{msg}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_from_tag() {
        assert_eq!(Locale::from_tag("zh"), Locale::Zh);
        assert_eq!(Locale::from_tag("zh-CN"), Locale::Zh);
        assert_eq!(Locale::from_tag("ZH_tw"), Locale::Zh);
        assert_eq!(Locale::from_tag("en-US"), Locale::En);
        assert_eq!(Locale::from_tag("zhx"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
    }

    #[test]
    fn test_lookup_active_catalog() {
        let zh = I18n::new(Locale::Zh);
        assert_eq!(zh.t("error:Topic title cannot be empty"), "主题标题不能为空");

        let en = I18n::new(Locale::En);
        assert_eq!(en.t("new:richtext"), "Rich text");
    }

    #[test]
    fn test_missing_key_strips_namespace() {
        let en = I18n::new(Locale::En);
        assert_eq!(en.t("error:Something odd happened"), "Something odd happened");
        assert_eq!(en.t("no-namespace"), "no-namespace");
        assert_eq!(en.t("error:"), "error:");
    }

    #[test]
    fn test_server_messages_render_verbatim_when_unknown() {
        let zh = I18n::new(Locale::Zh);
        assert_eq!(zh.t_error("You have been banned"), "You have been banned");
        assert_eq!(zh.t_error("Please sign in first"), "请先登录");
    }

    #[test]
    fn test_catalogs_have_same_keys() {
        for (k, _) in EN {
            assert!(lookup(ZH, k).is_some(), "zh catalog is missing {k}");
        }
        assert_eq!(EN.len(), ZH.len());
    }
}
