use std::collections::VecDeque;

use huematch_core::{
    Cell, GRID_CELLS, Input, Notification, NotificationKind, Presenter, Score, Seconds,
};

/// What the page currently shows, as last rendered by the controller.
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct Screen {
    pub cells: [Cell; GRID_CELLS],
    pub prompt: String,
    pub score: Score,
    pub timer: Option<Seconds>,
    notifications: VecDeque<Notification>,
}

impl Screen {
    pub(crate) fn notification(&self) -> Option<&Notification> {
        self.notifications.front()
    }

    pub(crate) fn is_blocked(&self) -> bool {
        !self.notifications.is_empty()
    }

    /// Whether `input` may reach the controller. An open dialog swallows clicks on the board, and only a pending
    /// win holds the clock, since the next round is already laid out behind it.
    pub(crate) fn admits(&self, input: Input) -> bool {
        match input {
            Input::Tick => !self
                .notifications
                .iter()
                .any(|notification| notification.kind == NotificationKind::Win),
            Input::Guess(_) | Input::SelectDifficulty(_) => !self.is_blocked(),
        }
    }

    /// Closes the front notification, returns whether there was one.
    pub(crate) fn dismiss(&mut self) -> bool {
        self.notifications.pop_front().is_some()
    }

    pub(crate) fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub(crate) fn timer_text(&self) -> String {
        match self.timer {
            Some(remaining) => format!("Time: {} sec", remaining),
            None => String::new(),
        }
    }
}

impl Presenter for Screen {
    fn render_cells(&mut self, cells: &[Cell]) {
        let mut padded = cells.iter().copied().chain(std::iter::repeat(Cell::Empty));
        for slot in &mut self.cells {
            *slot = padded.next().unwrap_or_default();
        }
        if cells.len() > GRID_CELLS {
            log::warn!("{} cells do not fit the grid", cells.len());
        }
    }

    fn render_prompt(&mut self, text: &str) {
        self.prompt = text.to_string();
    }

    fn render_score(&mut self, score: Score) {
        self.score = score;
    }

    fn render_timer(&mut self, remaining: Seconds) {
        self.timer = Some(remaining);
    }

    fn show_notification(&mut self, notification: Notification) {
        log::debug!("{}: {}", notification.title(), notification.message);
        self.notifications.push_back(notification);
    }
}
