use alloc::format;
use alloc::string::ToString;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    RoundActive,
    Won,
    Lost,
    Expired,
    CampaignComplete,
}

impl Phase {
    pub const fn is_round_active(self) -> bool {
        matches!(self, Self::RoundActive)
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::CampaignComplete)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// A cell click, carrying the clicked color and the tier of the round it was rendered for.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Guess {
    pub color: Color,
    pub tier: DifficultyTier,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    SelectDifficulty(DifficultyTier),
    Guess(Guess),
    Tick,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    NoChange,
    Ticked(Seconds),
    Locked(UnlockRequirement),
    RoundStarted(DifficultyTier),
    Won { score: Score, progress: WinOutcome },
    Lost,
    TimedOut,
    CampaignComplete,
}

impl Outcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Everything the timer callbacks may touch: owned by the controller, lent to the timer on each tick.
#[derive(Debug)]
pub struct Session<P> {
    presenter: P,
    progression: Progression,
    score: ScoreKeeper,
    phase: Phase,
    round: Option<Round>,
    first_round_played: bool,
}

impl<P: Presenter> Session<P> {
    fn new(presenter: P) -> Self {
        Self {
            presenter,
            progression: Progression::new(),
            score: ScoreKeeper::default(),
            phase: Phase::Idle,
            round: None,
            first_round_played: false,
        }
    }

    fn notify(&mut self, kind: NotificationKind, message: impl Into<alloc::string::String>) {
        self.presenter
            .show_notification(Notification::new(kind, message));
    }

    fn clear_cells(&mut self) {
        self.presenter.render_cells(&[Cell::Empty; GRID_CELLS]);
    }

    fn on_timer_tick(&mut self, remaining: Seconds) {
        log::trace!("{}s left", remaining);
        self.presenter.render_timer(remaining);
    }

    fn on_timer_expire(&mut self) {
        if !self.phase.is_round_active() {
            log::warn!("timer expired outside of a round ({:?})", self.phase);
            return;
        }
        log::debug!("time is up with score {}", self.score.current());
        self.phase = Phase::Expired;
        self.clear_cells();
        let message = format!("Final Score: {}", self.score.current());
        self.notify(NotificationKind::Timeout, message);
    }
}

/// Round and progression state machine.
///
/// Reacts to difficulty selection, guesses and one-second ticks, and drives a [`Presenter`] with the result. At
/// most one round and one countdown are live at any time.
#[derive(Debug)]
pub struct GameController<P, G = RandomRoundGenerator> {
    session: Session<P>,
    generator: G,
    timer: Timer<Session<P>>,
    active_timer: Option<TimerHandle>,
}

impl<P: Presenter + 'static> GameController<P> {
    pub fn new(presenter: P, seed: u64) -> Self {
        Self::with_generator(presenter, RandomRoundGenerator::new(seed))
    }
}

impl<P: Presenter + 'static, G: RoundGenerator> GameController<P, G> {
    pub fn with_generator(presenter: P, generator: G) -> Self {
        Self {
            session: Session::new(presenter),
            generator,
            timer: Timer::new(),
            active_timer: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.session.phase
    }

    pub fn round(&self) -> Option<&Round> {
        self.session.round.as_ref()
    }

    pub fn progression(&self) -> &Progression {
        &self.session.progression
    }

    pub fn score(&self) -> Score {
        self.session.score.current()
    }

    pub fn remaining_time(&self) -> Option<Seconds> {
        self.active_timer
            .and_then(|handle| self.timer.remaining(handle))
    }

    pub fn presenter(&self) -> &P {
        &self.session.presenter
    }

    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.session.presenter
    }

    pub fn handle(&mut self, input: Input) -> Outcome {
        match input {
            Input::SelectDifficulty(tier) => self.select_difficulty(tier),
            Input::Guess(guess) => self.guess(guess),
            Input::Tick => self.tick(),
        }
    }

    pub fn select_difficulty(&mut self, tier: DifficultyTier) -> Outcome {
        if self.session.phase.is_terminal() {
            log::warn!("campaign complete, ignoring selection of {}", tier);
            return Outcome::NoChange;
        }

        let requirement = self.session.progression.required_rounds_to_unlock(tier);
        if !requirement.is_satisfied() {
            log::debug!("{} is locked", tier);
            self.session
                .notify(NotificationKind::Locked, requirement.to_string());
            return Outcome::Locked(requirement);
        }

        self.start_round(tier)
    }

    pub fn guess(&mut self, guess: Guess) -> Outcome {
        let Some(round) = self.session.round.as_ref() else {
            log::warn!("guess {:?} without a round", guess);
            return Outcome::NoChange;
        };
        if !self.session.phase.is_round_active() {
            log::warn!("guess {:?} while {:?}", guess, self.session.phase);
            return Outcome::NoChange;
        }
        if round.tier() != guess.tier {
            log::warn!("stale guess for {} during a {} round", guess.tier, round.tier());
            return Outcome::NoChange;
        }

        let matched = round.is_match(guess.color);
        self.stop_timer();
        self.session.clear_cells();

        if matched {
            self.on_win(guess.tier)
        } else {
            self.on_loss()
        }
    }

    pub fn tick(&mut self) -> Outcome {
        let Some(handle) = self.active_timer else {
            return Outcome::NoChange;
        };

        self.timer.tick(&mut self.session);

        match self.timer.remaining(handle) {
            Some(remaining) => Outcome::Ticked(remaining),
            None => {
                self.active_timer = None;
                if matches!(self.session.phase, Phase::Expired) {
                    Outcome::TimedOut
                } else {
                    Outcome::NoChange
                }
            }
        }
    }

    fn on_win(&mut self, tier: DifficultyTier) -> Outcome {
        let session = &mut self.session;
        session.score.add(tier.params().score_increment);
        let score = session.score.current();
        session.presenter.render_score(score);

        let progress = session.progression.record_win(tier);
        log::debug!("won at {} ({:?}), score {}", tier, progress, score);

        if progress == WinOutcome::CampaignComplete {
            session.phase = Phase::CampaignComplete;
            session.notify(
                NotificationKind::CampaignComplete,
                "You have completed all difficulty levels.",
            );
            return Outcome::CampaignComplete;
        }

        session.phase = Phase::Won;
        session.notify(NotificationKind::Win, format!("Score: {}", score));

        let next = session.progression.highest_unlocked();
        if !self.start_round(next).has_update() {
            log::warn!("no round to follow the win, back to idle");
            self.session.phase = Phase::Idle;
        }
        Outcome::Won { score, progress }
    }

    fn on_loss(&mut self) -> Outcome {
        let session = &mut self.session;
        session.score.reset();
        session.progression.record_loss();
        session.phase = Phase::Lost;
        session.presenter.render_score(session.score.current());
        log::debug!("lost, score reset");
        let message = format!("Score: {}", session.score.current());
        session.notify(NotificationKind::Lose, message);
        Outcome::Lost
    }

    fn start_round(&mut self, tier: DifficultyTier) -> Outcome {
        let round = match self.generator.generate(tier) {
            Ok(round) => round,
            Err(err) => {
                log::error!("failed to generate a {} round: {}", tier, err);
                return Outcome::NoChange;
            }
        };

        self.stop_timer();

        let session = &mut self.session;
        if !session.first_round_played {
            session.score.reset();
            session.first_round_played = true;
        }

        let time_limit = round.time_limit();
        session.presenter.render_cells(&round.grid());
        session.presenter.render_prompt(&round.target().to_string());
        session.presenter.render_score(session.score.current());
        session.presenter.render_timer(time_limit);
        session.round = Some(round);
        session.phase = Phase::RoundActive;
        log::debug!("round started at {} ({}s)", tier, time_limit);

        self.active_timer = Some(self.timer.start(
            time_limit,
            Session::on_timer_tick,
            Session::on_timer_expire,
        ));
        Outcome::RoundStarted(tier)
    }

    fn stop_timer(&mut self) {
        if let Some(handle) = self.active_timer.take() {
            self.timer.cancel(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;
    use DifficultyTier::*;

    #[derive(Debug, Default)]
    struct RecordingPresenter {
        cells: Vec<Cell>,
        prompt: String,
        score: Option<Score>,
        timer: Vec<Seconds>,
        notifications: Vec<Notification>,
    }

    impl RecordingPresenter {
        fn kinds(&self) -> Vec<NotificationKind> {
            self.notifications.iter().map(|n| n.kind).collect()
        }
    }

    impl Presenter for RecordingPresenter {
        fn render_cells(&mut self, cells: &[Cell]) {
            self.cells = cells.to_vec();
        }

        fn render_prompt(&mut self, text: &str) {
            self.prompt = text.into();
        }

        fn render_score(&mut self, score: Score) {
            self.score = Some(score);
        }

        fn render_timer(&mut self, remaining: Seconds) {
            self.timer.push(remaining);
        }

        fn show_notification(&mut self, notification: Notification) {
            self.notifications.push(notification);
        }
    }

    /// Predictable rounds: cell `i` of a tier is `rgb(i, tier, 7)` and the target is always the second cell.
    #[derive(Debug, Default)]
    struct FixedGenerator {
        generated: u32,
        /// Fails every round after this many.
        limit: Option<u32>,
    }

    impl FixedGenerator {
        fn cell(tier: DifficultyTier, i: usize) -> Color {
            Color::new(i as u8, tier as u8, 7)
        }
    }

    impl RoundGenerator for FixedGenerator {
        fn generate(&mut self, tier: DifficultyTier) -> Result<Round> {
            if self.limit.is_some_and(|limit| self.generated >= limit) {
                return Err(GameError::EmptyRound);
            }
            self.generated += 1;
            let cells = (0..tier.params().cell_count)
                .map(|i| Self::cell(tier, i))
                .collect::<Vec<_>>();
            let target = cells[1];
            Round::new(tier, cells, target)
        }
    }

    type TestController = GameController<RecordingPresenter, FixedGenerator>;

    fn controller() -> TestController {
        GameController::with_generator(RecordingPresenter::default(), FixedGenerator::default())
    }

    fn hit(controller: &TestController) -> Guess {
        let round = controller.round().unwrap();
        Guess {
            color: round.cells()[1],
            tier: round.tier(),
        }
    }

    fn miss(controller: &TestController) -> Guess {
        let round = controller.round().unwrap();
        Guess {
            color: round.cells()[0],
            tier: round.tier(),
        }
    }

    #[test]
    fn easy_win_scores_and_starts_next_easy_round() {
        let mut game = controller();
        assert_eq!(game.select_difficulty(Easy), Outcome::RoundStarted(Easy));
        assert_eq!(game.presenter().prompt, "rgb(1, 0, 7)");
        assert_eq!(game.remaining_time(), Some(40));

        let outcome = game.guess(hit(&game));

        assert_eq!(
            outcome,
            Outcome::Won {
                score: 10,
                progress: WinOutcome::Counted { wins: 1 }
            }
        );
        assert_eq!(game.score(), 10);
        assert_eq!(game.progression().consecutive_wins(), 1);
        assert_eq!(game.phase(), Phase::RoundActive);
        assert_eq!(game.round().unwrap().tier(), Easy);
        assert_eq!(game.presenter().kinds(), [NotificationKind::Win]);
        assert_eq!(game.presenter().notifications[0].message, "Score: 10");
    }

    #[test]
    fn two_easy_wins_move_the_next_round_to_normal() {
        let mut game = controller();
        game.select_difficulty(Easy);
        game.guess(hit(&game));
        let outcome = game.guess(hit(&game));

        assert_eq!(
            outcome,
            Outcome::Won {
                score: 20,
                progress: WinOutcome::Promoted { to: Normal }
            }
        );
        assert_eq!(game.progression().highest_unlocked(), Normal);
        assert_eq!(game.progression().consecutive_wins(), 0);

        let round = game.round().unwrap();
        assert_eq!(round.tier(), Normal);
        assert_eq!(round.cells().len(), 6);
        assert_eq!(game.remaining_time(), Some(30));
        assert_eq!(
            game.presenter()
                .cells
                .iter()
                .filter(|cell| cell.is_clickable())
                .count(),
            6
        );
    }

    #[test]
    fn win_without_a_next_round_falls_back_to_idle() {
        let generator = FixedGenerator {
            limit: Some(1),
            ..Default::default()
        };
        let mut game = GameController::with_generator(RecordingPresenter::default(), generator);
        game.select_difficulty(Easy);

        let outcome = game.guess(hit(&game));

        assert!(matches!(outcome, Outcome::Won { score: 10, .. }));
        assert_eq!(game.phase(), Phase::Idle);
        assert_eq!(game.remaining_time(), None);
        assert_eq!(game.guess(hit(&game)), Outcome::NoChange);
        assert_eq!(game.select_difficulty(Easy), Outcome::NoChange);
    }

    #[test]
    fn loss_after_promotion_keeps_the_unlocked_tier() {
        let mut game = controller();
        game.select_difficulty(Easy);
        for _ in 0..4 {
            game.guess(hit(&game));
        }
        assert_eq!(game.progression().highest_unlocked(), Hard);
        assert_eq!(game.round().unwrap().tier(), Hard);

        assert_eq!(game.guess(miss(&game)), Outcome::Lost);

        assert_eq!(game.score(), 0);
        assert_eq!(game.progression().highest_unlocked(), Hard);
        assert_eq!(game.select_difficulty(Hard), Outcome::RoundStarted(Hard));
        assert_eq!(game.round().unwrap().cells().len(), 9);
        assert_eq!(game.remaining_time(), Some(20));
    }

    #[test]
    fn wrong_guess_resets_score_and_waits_for_reselect() {
        let mut game = controller();
        game.select_difficulty(Easy);
        game.guess(hit(&game));
        assert_eq!(game.score(), 10);

        assert_eq!(game.guess(miss(&game)), Outcome::Lost);

        assert_eq!(game.score(), 0);
        assert_eq!(game.phase(), Phase::Lost);
        assert_eq!(game.progression().highest_unlocked(), Easy);
        assert_eq!(game.progression().consecutive_wins(), 1);
        assert_eq!(game.remaining_time(), None);
        assert!(game.presenter().cells.iter().all(|&cell| cell == Cell::Empty));
        let last = game.presenter().notifications.last().unwrap();
        assert_eq!((last.kind, last.message.as_str()), (NotificationKind::Lose, "Score: 0"));

        assert_eq!(game.guess(hit(&game)), Outcome::NoChange);
        assert_eq!(game.select_difficulty(Easy), Outcome::RoundStarted(Easy));
    }

    #[test]
    fn color_absent_from_grid_is_a_loss() {
        let mut game = controller();
        game.select_difficulty(Easy);
        let guess = Guess {
            color: Color::new(200, 200, 200),
            tier: Easy,
        };

        assert_eq!(game.guess(guess), Outcome::Lost);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn locked_tier_only_notifies() {
        let mut game = controller();

        let outcome = game.select_difficulty(Hard);

        let Outcome::Locked(requirement) = outcome else {
            panic!("expected locked, got {:?}", outcome);
        };
        assert_eq!(requirement.prerequisite, Normal);
        assert_eq!(game.phase(), Phase::Idle);
        assert!(game.round().is_none());
        assert_eq!(game.remaining_time(), None);
        assert_eq!(game.presenter().kinds(), [NotificationKind::Locked]);
        assert_eq!(
            game.presenter().notifications[0].message,
            "You need to complete 1 round of NORMAL mode to unlock HARD mode."
        );
    }

    #[test]
    fn locked_selection_keeps_running_round() {
        let mut game = controller();
        game.select_difficulty(Easy);
        game.tick();

        assert!(matches!(game.select_difficulty(Normal), Outcome::Locked(_)));
        assert_eq!(game.phase(), Phase::RoundActive);
        assert_eq!(game.remaining_time(), Some(39));
    }

    #[test]
    fn expiry_reports_time_up_without_touching_progress() {
        let mut game = controller();
        game.select_difficulty(Easy);
        game.guess(hit(&game));

        for _ in 0..39 {
            assert!(matches!(game.tick(), Outcome::Ticked(_)));
        }
        assert_eq!(game.tick(), Outcome::TimedOut);

        assert_eq!(game.phase(), Phase::Expired);
        assert_eq!(game.score(), 10);
        assert_eq!(game.progression().consecutive_wins(), 1);
        assert_eq!(game.presenter().timer.last(), Some(&0));
        let last = game.presenter().notifications.last().unwrap();
        assert_eq!(
            (last.kind, last.message.as_str()),
            (NotificationKind::Timeout, "Final Score: 10")
        );

        assert_eq!(game.tick(), Outcome::NoChange);
        assert_eq!(game.guess(hit(&game)), Outcome::NoChange);
    }

    #[test]
    fn guess_cancels_the_countdown() {
        let mut game = controller();
        game.select_difficulty(Easy);
        game.guess(miss(&game));

        for _ in 0..60 {
            assert_eq!(game.tick(), Outcome::NoChange);
        }
        assert!(!game.presenter().kinds().contains(&NotificationKind::Timeout));
    }

    #[test]
    fn reselecting_restarts_the_countdown() {
        let mut game = controller();
        game.select_difficulty(Easy);
        for _ in 0..10 {
            game.tick();
        }
        game.select_difficulty(Easy);

        assert_eq!(game.remaining_time(), Some(40));
        assert_eq!(game.timer.active_count(), 1);
    }

    #[test]
    fn score_resets_only_on_first_round() {
        let mut game = controller();
        game.select_difficulty(Easy);
        game.guess(hit(&game));
        game.select_difficulty(Easy);

        assert_eq!(game.score(), 10);
        assert_eq!(game.presenter().score, Some(10));
    }

    #[test]
    fn hard_campaign_completes_once() {
        let mut game = controller();
        game.select_difficulty(Easy);
        for _ in 0..5 {
            game.guess(hit(&game));
        }
        assert_eq!(game.round().unwrap().tier(), Hard);

        assert_eq!(game.guess(hit(&game)), Outcome::CampaignComplete);

        assert_eq!(game.phase(), Phase::CampaignComplete);
        assert_eq!(game.score(), 10 + 10 + 20 + 20 + 30 + 30);
        assert_eq!(game.remaining_time(), None);
        let completions = game
            .presenter()
            .kinds()
            .into_iter()
            .filter(|&kind| kind == NotificationKind::CampaignComplete)
            .count();
        assert_eq!(completions, 1);

        for _ in 0..30 {
            assert_eq!(game.tick(), Outcome::NoChange);
        }
        assert_eq!(game.select_difficulty(Easy), Outcome::NoChange);
        assert_eq!(game.guess(hit(&game)), Outcome::NoChange);
    }

    #[test]
    fn stale_tier_guess_is_ignored() {
        let mut game = controller();
        game.select_difficulty(Easy);
        let guess = Guess {
            tier: Normal,
            ..hit(&game)
        };

        assert_eq!(game.guess(guess), Outcome::NoChange);
        assert_eq!(game.phase(), Phase::RoundActive);
        assert_eq!(game.remaining_time(), Some(40));
    }

    #[test]
    fn lower_tier_stays_playable_after_promotion() {
        let mut game = controller();
        game.select_difficulty(Easy);
        game.guess(hit(&game));
        game.guess(hit(&game));

        assert_eq!(game.select_difficulty(Easy), Outcome::RoundStarted(Easy));
        assert_eq!(
            game.guess(hit(&game)),
            Outcome::Won {
                score: 30,
                progress: WinOutcome::NotCounted
            }
        );
        assert_eq!(game.round().unwrap().tier(), Normal);
    }

    #[test]
    fn inputs_dispatch_to_handlers() {
        let mut game = controller();

        assert_eq!(game.handle(Input::Tick), Outcome::NoChange);
        assert_eq!(
            game.handle(Input::SelectDifficulty(Easy)),
            Outcome::RoundStarted(Easy)
        );
        assert_eq!(game.handle(Input::Tick), Outcome::Ticked(39));
        let guess = hit(&game);
        assert!(matches!(game.handle(Input::Guess(guess)), Outcome::Won { .. }));
        assert_eq!(game.generator.generated, 2);
    }

    #[test]
    fn random_rounds_can_be_won() {
        let mut game = GameController::new(RecordingPresenter::default(), 99);
        game.select_difficulty(Easy);
        let round = game.round().unwrap();
        let guess = Guess {
            color: round.target(),
            tier: round.tier(),
        };

        assert!(matches!(game.guess(guess), Outcome::Won { score: 10, .. }));
        assert_eq!(game.presenter().prompt, game.round().unwrap().target().to_string());
    }
}
