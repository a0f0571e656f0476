use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationKind {
    Locked,
    Win,
    Lose,
    Timeout,
    CampaignComplete,
}

impl NotificationKind {
    pub const fn title(self) -> &'static str {
        use NotificationKind::*;
        match self {
            Locked => "Locked",
            Win => "YOU WIN!",
            Lose => "YOU LOSE!",
            Timeout => "Time's up!",
            CampaignComplete => "Congratulations!",
        }
    }
}

/// Modal message for the player. How it is shown and dismissed is up to the presenter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

/// Output side of the game, driven by [`GameController`].
pub trait Presenter {
    fn render_cells(&mut self, cells: &[Cell]);
    fn render_prompt(&mut self, text: &str);
    fn render_score(&mut self, score: Score);
    fn render_timer(&mut self, remaining: Seconds);
    fn show_notification(&mut self, notification: Notification);
}
