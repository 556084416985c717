/// Viewports narrower than this get the small composer.
pub(crate) const SMALL_SCREEN_MAX_WIDTH: f64 = 768.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum LayoutSize {
    #[default]
    Large,
    Small,
}

impl LayoutSize {
    /// An explicit `size` wins (`"small"` vs anything else); without one the
    /// viewport decides. Unknown viewport width means desktop.
    pub fn select(size: Option<&str>, viewport_width: Option<f64>) -> Self {
        match size.map(str::trim).filter(|s| !s.is_empty()) {
            Some("small") => LayoutSize::Small,
            Some(_) => LayoutSize::Large,
            None => match viewport_width {
                Some(w) if w < SMALL_SCREEN_MAX_WIDTH => LayoutSize::Small,
                _ => LayoutSize::Large,
            },
        }
    }
}

pub(crate) fn viewport_width() -> Option<f64> {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
}
