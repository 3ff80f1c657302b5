//! Overlay for notices and confirmations
//!
//! A single [`Modal`] drives any [`Surface`] backend. The contract is the
//! same for every caller: content is shown, confirmations resolve `true`
//! only on an explicit Yes, and closing always fades before hiding.

mod terminal;

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub use terminal::TerminalSurface;

/// What the overlay displays
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Plain text message
    Message(String),
    /// Pre-rendered fragment (a table, a summary block)
    Markup(String),
}

impl Content {
    pub fn as_str(&self) -> &str {
        match self {
            Content::Message(s) | Content::Markup(s) => s,
        }
    }
}

/// Visual flavour of the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Info,
    Error,
    Confirm,
}

/// How the user left the overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
    /// Clicked outside the overlay or otherwise dismissed it
    Dismissed,
}

/// Drawing backend for the overlay
#[async_trait]
pub trait Surface: Send + Sync {
    /// Draw the overlay with the given content
    async fn render(&self, kind: ModalKind, content: &Content);

    /// Wait until the user answers or dismisses the overlay
    async fn wait_for_choice(&self, kind: ModalKind) -> Choice;

    /// Start the fade-out animation
    async fn begin_fade(&self);

    /// Remove the overlay
    async fn hide(&self);
}

/// The overlay component shared by every view
pub struct Modal<S: Surface> {
    surface: S,
    fade: Duration,
}

impl<S: Surface> Modal<S> {
    pub fn new(surface: S, fade: Duration) -> Self {
        Self { surface, fade }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Show content and leave it open until [`Modal::close`]
    pub async fn show(&self, content: Content) {
        self.surface.render(ModalKind::Info, &content).await;
    }

    /// Show a message and close once the user dismisses it
    pub async fn notify(&self, message: impl Into<String>) {
        self.present(ModalKind::Info, Content::Message(message.into())).await;
    }

    /// Show a pre-rendered fragment and close once the user dismisses it
    pub async fn notify_markup(&self, markup: impl Into<String>) {
        self.present(ModalKind::Info, Content::Markup(markup.into())).await;
    }

    /// Show an error notice and close once the user dismisses it
    pub async fn error(&self, message: impl Into<String>) {
        self.present(ModalKind::Error, Content::Message(message.into())).await;
    }

    /// Ask a yes/no question; anything but Yes counts as a refusal
    pub async fn confirm(&self, question: impl Into<String>) -> bool {
        let content = Content::Message(question.into());
        self.surface.render(ModalKind::Confirm, &content).await;
        let choice = self.surface.wait_for_choice(ModalKind::Confirm).await;
        self.close().await;
        debug!(?choice, "confirmation answered");
        choice == Choice::Yes
    }

    /// Fade the overlay out, then hide it
    pub async fn close(&self) {
        self.surface.begin_fade().await;
        if !self.fade.is_zero() {
            tokio::time::sleep(self.fade).await;
        }
        self.surface.hide().await;
    }

    async fn present(&self, kind: ModalKind, content: Content) {
        self.surface.render(kind, &content).await;
        self.surface.wait_for_choice(kind).await;
        self.close().await;
    }
}
