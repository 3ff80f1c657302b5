#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use bar_pos_client::config::ClientOptions;
use bar_pos_client::modal::{Choice, Content, Modal, ModalKind, Surface};
use bar_pos_client::PosClient;

/// Surface that answers from a script and remembers what it was shown
#[derive(Default)]
pub struct RecordingSurface {
    answers: Mutex<VecDeque<Choice>>,
    shown: Mutex<Vec<(ModalKind, String)>>,
}

impl RecordingSurface {
    pub fn answering(choices: &[Choice]) -> Self {
        Self {
            answers: Mutex::new(choices.iter().copied().collect()),
            shown: Mutex::default(),
        }
    }

    pub fn shown(&self) -> Vec<(ModalKind, String)> {
        self.shown.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.shown()
            .into_iter()
            .filter(|(kind, _)| *kind == ModalKind::Error)
            .map(|(_, text)| text)
            .collect()
    }
}

#[async_trait]
impl Surface for RecordingSurface {
    async fn render(&self, kind: ModalKind, content: &Content) {
        self.shown.lock().unwrap().push((kind, content.as_str().to_string()));
    }

    async fn wait_for_choice(&self, _kind: ModalKind) -> Choice {
        self.answers.lock().unwrap().pop_front().unwrap_or(Choice::Dismissed)
    }

    async fn begin_fade(&self) {}

    async fn hide(&self) {}
}

pub fn modal(choices: &[Choice]) -> Modal<RecordingSurface> {
    Modal::new(RecordingSurface::answering(choices), Duration::ZERO)
}

pub fn client(uri: &str) -> PosClient {
    PosClient::new_with_options(
        ClientOptions::default()
            .with_server_endpoint(uri)
            .with_modal_fade(Duration::ZERO),
    )
    .unwrap()
}
