//! Action button loading state
//!
//! A button that wraps a long-running action stashes its label while the
//! action runs and shows a spinner instead. The state lives in an
//! explicit object owned by the caller. A button that never started
//! loading has an empty stash.

use dioxus::prelude::*;

/// Markup shown inside a button while its action runs
pub const LOADING_MARKUP: &str = r#"<span class="spinner spinner-sm"></span> Loading..."#;

/// Presentation state of a button wrapping a long-running action
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ButtonState {
    content: String,
    disabled: bool,
    original_content: Option<String>,
}

impl ButtonState {
    /// Create an enabled button displaying `content`
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            disabled: false,
            original_content: None,
        }
    }

    /// Stash the current content, block interaction, and show the
    /// loading indicator
    ///
    /// The stash is overwritten on every call, even when the button is
    /// already loading.
    pub fn begin_loading(&mut self) {
        self.original_content = Some(self.content.clone());
        self.disabled = true;
        self.content = LOADING_MARKUP.to_string();
    }

    /// Unblock interaction and restore the stashed content
    ///
    /// A button that never started loading restores to empty content.
    /// The stash is read here, not consumed.
    pub fn finish_loading(&mut self) {
        self.disabled = false;
        self.content = self.original_content.clone().unwrap_or_default();
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// Button that renders a caller-owned [`ButtonState`]
///
/// The caller flips the state around its action:
/// `begin_loading` before the request, `finish_loading` after.
#[component]
pub fn ActionButton(props: ActionButtonProps) -> Element {
    let ActionButtonProps {
        state,
        onclick,
        class,
    } = props;

    rsx! {
        button {
            class: "btn {class}",
            disabled: state.read().is_disabled(),
            onclick: move |event| onclick.call(event),
            dangerous_inner_html: "{state.read().content()}",
        }
    }
}

#[derive(Props, Clone, PartialEq)]
pub struct ActionButtonProps {
    /// Caller-owned loading state
    pub state: Signal<ButtonState>,
    pub onclick: EventHandler<MouseEvent>,
    #[props(default = String::new())]
    pub class: String,
}
