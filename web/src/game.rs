use crate::notification::NotificationView;
use crate::screen::Screen;
use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Interval;
use huematch_core::{Cell, DifficultyTier, GameController, Guess, Input, Outcome};
use yew::prelude::*;

const TICK_MILLIS: u32 = 1000;

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Input(Input),
    Dismiss,
}

/// Hands `input` to the controller unless the screen holds it back.
fn route(controller: &mut GameController<Screen>, input: Input) -> Option<Outcome> {
    controller
        .presenter()
        .admits(input)
        .then(|| controller.handle(input))
}

#[derive(Properties, Clone, PartialEq)]
struct CellProps {
    cell: Cell,
    tier: Option<DifficultyTier>,
    callback: Callback<Guess>,
}

#[function_component(CellView)]
fn cell_component(props: &CellProps) -> Html {
    let CellProps {
        cell,
        tier,
        callback,
    } = props.clone();

    let style = match cell.color() {
        Some(color) => format!("background-color: {}", color),
        None => "background-color: transparent".to_string(),
    };
    let guess = cell
        .color()
        .zip(tier)
        .map(|(color, tier)| Guess { color, tier });

    let onclick = Callback::from(move |_: MouseEvent| {
        if let Some(guess) = guess {
            log::trace!("cell clicked: {:?}", guess);
            callback.emit(guess);
        }
    });

    html! {
        <button {style} {onclick} disabled={guess.is_none()}/>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct TierButtonProps {
    tier: DifficultyTier,
    selected: bool,
    unlocked: bool,
    callback: Callback<DifficultyTier>,
}

#[function_component(TierButton)]
fn tier_button(props: &TierButtonProps) -> Html {
    let TierButtonProps {
        tier,
        selected,
        unlocked,
        callback,
    } = props.clone();

    let class = classes!(
        selected.then_some("selected"),
        (!unlocked).then_some("locked")
    );
    let onclick = Callback::from(move |_: MouseEvent| callback.emit(tier));

    html! {
        <button {class} {onclick} data-difficulty={tier.key()}>{tier.label()}</button>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct GameView {
    controller: GameController<Screen>,
    selected: Option<DifficultyTier>,
    _tick_interval: Interval,
}

impl GameView {
    fn create_ticker(ctx: &Context<Self>) -> Interval {
        let link = ctx.link().clone();
        Interval::new(TICK_MILLIS, move || link.send_message(Msg::Input(Input::Tick)))
    }

    fn select(&mut self, tier: DifficultyTier) -> bool {
        self.selected.replace(tier) != Some(tier)
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let seed = ctx.props().seed.unwrap_or_else(js_random_seed);
        log::debug!("seed: {}", seed);

        Self {
            controller: GameController::new(Screen::default(), seed),
            selected: None,
            _tick_interval: GameView::create_ticker(ctx),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Input(input) => {
                let Some(outcome) = route(&mut self.controller, input) else {
                    log::trace!("{:?} held back by an open dialog", input);
                    return false;
                };
                let reselected = match input {
                    Input::SelectDifficulty(tier) => self.select(tier),
                    _ => false,
                };
                log::trace!("{:?} -> {:?}", input, outcome);
                reselected || outcome.has_update()
            }
            Msg::Dismiss => self.controller.presenter_mut().dismiss(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let screen = self.controller.presenter();
        let progression = self.controller.progression();
        let round_tier = self
            .controller
            .phase()
            .is_round_active()
            .then(|| self.controller.round().map(|round| round.tier()))
            .flatten();

        let cb_select = ctx
            .link()
            .callback(|tier: DifficultyTier| Msg::Input(Input::SelectDifficulty(tier)));
        let cb_guess = ctx.link().callback(|guess: Guess| Msg::Input(Input::Guess(guess)));
        let cb_dismiss = ctx.link().callback(|_: ()| Msg::Dismiss);

        html! {
            <div class="huematch">
                <nav class="buttons">
                    {
                        for DifficultyTier::ALL.into_iter().map(|tier| html! {
                            <TierButton
                                {tier}
                                selected={self.selected == Some(tier)}
                                unlocked={progression.is_unlocked(tier)}
                                callback={cb_select.clone()}
                            />
                        })
                    }
                </nav>
                <h2 id="color-prompt">{screen.prompt.clone()}</h2>
                <aside id="score">{screen.score_text()}</aside>
                <aside id="timer">{screen.timer_text()}</aside>
                <div class="color-grid">
                    {
                        for screen.cells.iter().map(|&cell| html! {
                            <CellView {cell} tier={round_tier} callback={cb_guess.clone()}/>
                        })
                    }
                </div>
                <NotificationView
                    notification={screen.notification().cloned()}
                    ondismiss={cb_dismiss}
                />
            </div>
        }
    }
}
