//! Missing-permission banner state.
//!
//! Frontends render this as an inline banner with an explanation and a
//! primary "Grant" action; the optional secondary action covers flows
//! like "skip this source". Purely presentational state, no behavior.

/// An auxiliary action next to the grant button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BannerAction {
    pub label: String,

    /// Frontend-defined command dispatched when the action is chosen.
    pub action_id: String,
}

/// Banner shown when a data source is missing a platform permission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPermissionBanner {
    text: String,
    secondary_action: Option<BannerAction>,
}

impl MissingPermissionBanner {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            secondary_action: None,
        }
    }

    pub fn with_secondary_action(mut self, action: BannerAction) -> Self {
        self.secondary_action = Some(action);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn grant_label(&self) -> &'static str {
        "Grant"
    }

    pub fn secondary_action(&self) -> Option<&BannerAction> {
        self.secondary_action.as_ref()
    }
}
