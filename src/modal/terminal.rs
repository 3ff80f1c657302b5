//! Terminal backend for the overlay

use async_trait::async_trait;
use std::io::{self, BufRead, Write};

use super::{Choice, Content, ModalKind, Surface};

/// Draws the overlay as a framed block on stdout and reads answers from stdin
#[derive(Debug, Default, Clone)]
pub struct TerminalSurface;

impl TerminalSurface {
    pub fn new() -> Self {
        Self
    }
}

fn frame(kind: ModalKind, content: &Content) -> String {
    let title = match kind {
        ModalKind::Info => "Info",
        ModalKind::Error => "Chyba",
        ModalKind::Confirm => "Potvrzení",
    };
    let body = content.as_str();
    let width = body
        .lines()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.chars().count())
        + 2;

    let mut out = format!("┌{}┐\n", "─".repeat(width));
    out.push_str(&format!("│ {:<w$}│\n", title, w = width - 1));
    out.push_str(&format!("├{}┤\n", "─".repeat(width)));
    for line in body.lines() {
        out.push_str(&format!("│ {:<w$}│\n", line, w = width - 1));
    }
    out.push_str(&format!("└{}┘", "─".repeat(width)));
    out
}

fn read_line() -> Option<String> {
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_lowercase()),
    }
}

#[async_trait]
impl Surface for TerminalSurface {
    async fn render(&self, kind: ModalKind, content: &Content) {
        println!("{}", frame(kind, content));
    }

    async fn wait_for_choice(&self, kind: ModalKind) -> Choice {
        let prompt = match kind {
            ModalKind::Confirm => "[a]no / [n]e: ",
            _ => "[Enter] zavřít: ",
        };
        print!("{}", prompt);
        let _ = io::stdout().flush();

        let answer = tokio::task::spawn_blocking(read_line).await.ok().flatten();
        match (kind, answer.as_deref()) {
            (ModalKind::Confirm, Some("a" | "ano" | "y" | "yes")) => Choice::Yes,
            (ModalKind::Confirm, Some("n" | "ne" | "no")) => Choice::No,
            _ => Choice::Dismissed,
        }
    }

    async fn begin_fade(&self) {}

    async fn hide(&self) {
        println!();
    }
}
