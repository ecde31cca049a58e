#![forbid(unsafe_code)]

//! Light/dark theme with a persisted preference.

use folio_core::{Effect, Effects, LayoutProbe, NodeId, PreferenceStore, Signal, class};

use crate::context::PageContext;
use crate::dispatch::Flow;

/// The page theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Interpret a stored preference. Anything but `"dark"` means light.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("dark") => Self::Dark,
            _ => Self::Light,
        }
    }

    /// Value written to storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Current theme and where it is rendered and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeState {
    body: NodeId,
    toggle: Option<NodeId>,
    key: String,
    theme: Theme,
}

impl ThemeState {
    /// Read the stored preference and render it on `body`.
    pub(crate) fn load(
        body: NodeId,
        toggle: Option<NodeId>,
        key: &str,
        prefs: &dyn PreferenceStore,
        effects: &mut Effects,
    ) -> Self {
        let stored = prefs.get(key);
        let theme = Theme::from_stored(stored.as_deref());
        if theme.is_dark() {
            effects.add_class(body, class::DARK_THEME);
        }
        tracing::debug!(
            target: "folio.theme",
            stored = stored.as_deref().unwrap_or("<unset>"),
            theme = theme.as_str(),
            "theme loaded"
        );
        Self {
            body,
            toggle,
            key: key.to_owned(),
            theme,
        }
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    #[must_use]
    pub fn toggle_button(&self) -> Option<NodeId> {
        self.toggle
    }

    fn flip(&mut self, effects: &mut Effects) {
        self.theme = self.theme.toggled();
        effects.set_class(self.body, class::DARK_THEME, self.theme.is_dark());
        effects.push(Effect::Persist {
            key: self.key.clone(),
            value: self.theme.as_str().to_owned(),
        });
        tracing::debug!(target: "folio.theme", theme = self.theme.as_str(), "theme toggled");
    }
}

/// `Click`: flip the theme when the toggle is clicked.
pub(crate) fn on_click(
    signal: &Signal,
    ctx: &mut PageContext,
    _probe: &dyn LayoutProbe,
    effects: &mut Effects,
) -> Flow {
    let Signal::Click(click) = signal else {
        return Flow::Continue;
    };
    let Some(toggle) = ctx.theme.toggle else {
        return Flow::Continue;
    };
    if click.within(toggle) {
        ctx.theme.flip(effects);
    }
    Flow::Continue
}
