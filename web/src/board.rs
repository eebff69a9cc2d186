use bingo_core as bingo;
use bingo::{Counter, CounterKind, SquareState, Step};
use std::rc::Rc;
use yew::prelude::*;

use crate::args;
use crate::history::BrowserUrl;
use crate::utils::js_random_seed;

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    ToggleSquare(usize),
    StepCounter(CounterKind, Step),
    NewBoard,
}

#[derive(Properties, Clone, PartialEq)]
struct SquareProps {
    pos: usize,
    label: AttrValue,
    state: SquareState,
    callback: Callback<usize>,
}

#[function_component(SquareView)]
fn square_component(props: &SquareProps) -> Html {
    let SquareProps {
        pos,
        label,
        state,
        callback,
    } = props.clone();

    let class = classes!(SquareState::BASE_CLASS, state.class_name());
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("square {} clicked ({:?})", pos, state);
        callback.emit(pos);
    });

    html! {
        <div {class} {onclick}>{label.to_string()}</div>
    }
}

#[derive(Properties, Clone, PartialEq)]
struct CounterProps {
    kind: CounterKind,
    value: Counter,
    callback: Callback<(CounterKind, Step)>,
}

#[function_component(CounterView)]
fn counter_component(props: &CounterProps) -> Html {
    let CounterProps {
        kind,
        value,
        callback,
    } = props.clone();
    let name = kind.label();

    let on_inc = callback.reform(move |_: MouseEvent| (kind, Step::Up));
    let on_dec = callback.reform(move |_: MouseEvent| (kind, Step::Down));

    html! {
        <div class={classes!("counter", name)}>
            <button onclick={on_inc}>{format!("inc {}", name)}</button>
            <button onclick={on_dec}>{format!("dec {}", name)}</button>
            <div>{name}</div>
            <div id={format!("{}_counter", name)}>{value.to_string()}</div>
        </div>
    }
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct BingoProps {
    pub pool: Rc<bingo::SquarePool>,
    pub segment: u32,
    #[prop_or_default]
    pub seed: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct BingoView {
    config: bingo::BoardConfig,
    layout: bingo::BoardLayout,
    state: bingo::BoardState,
    seed: u64,
    url: BrowserUrl,
}

impl BingoView {
    fn generate_layout(props: &BingoProps, config: bingo::BoardConfig, seed: u64) -> bingo::BoardLayout {
        bingo::BoardLayout::generate(&props.pool, props.segment, config, seed).unwrap_or_else(|err| {
            log::error!("could not fill board: {}", err);
            bingo::BoardLayout::blank(config.size)
        })
    }

    /// Writes segment and seed into the fragment so a shared link rebuilds the
    /// same squares.
    fn pin_layout(&mut self, segment: u32) {
        let fragment = args::with_board_args(&self.url.fragment(), segment, self.seed);
        if let Err(err) = self.url.replace_fragment(&fragment) {
            log::error!("failed to pin layout: {}", err);
        }
    }

    fn sync_url(&mut self) {
        if let Err(err) = bingo::store(&self.state, &mut self.url) {
            log::error!("failed to store board state: {}", err);
        }
    }
}

impl Component for BingoView {
    type Message = Msg;
    type Properties = BingoProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let config = bingo::BoardConfig::default();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        let url = BrowserUrl;

        let bingo::Decoded {
            state, restored, ..
        } = bingo::load(&url, config.size);
        if restored {
            log::debug!("board restored from url");
        }

        let mut view = Self {
            config,
            layout: Self::generate_layout(props, config, seed),
            state,
            seed,
            url,
        };
        view.pin_layout(props.segment);
        view
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        let props = ctx.props();
        if props.segment == old_props.segment && props.pool == old_props.pool {
            return false;
        }

        log::debug!("segment changed to {}", props.segment);
        self.layout = Self::generate_layout(props, self.config, self.seed);
        self.state = bingo::BoardState::new(self.config.size);
        self.pin_layout(props.segment);
        self.sync_url();
        true
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            ToggleSquare(pos) => match self.state.board.toggle(pos) {
                Ok(state) => {
                    log::debug!("square {} is now {}", pos, state.class_name());
                    true
                }
                Err(err) => {
                    log::warn!("ignoring click: {}", err);
                    false
                }
            },
            StepCounter(kind, step) => {
                let counter = &mut self.state.counters[kind];
                let before = *counter;
                counter.step(step);
                log::debug!("{} counter: {} -> {}", kind.label(), before, counter);
                before != *counter
            }
            NewBoard => {
                self.seed = js_random_seed();
                log::debug!("new board, seed: {}", self.seed);
                self.layout = Self::generate_layout(ctx.props(), self.config, self.seed);
                self.state = bingo::BoardState::new(self.config.size);
                self.pin_layout(ctx.props().segment);
                true
            }
        };

        if updated {
            self.sync_url();
        }
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let (cols, rows) = self.config.size;
        let square_callback = ctx.link().callback(Msg::ToggleSquare);
        let counter_callback = ctx
            .link()
            .callback(|(kind, step): (CounterKind, Step)| Msg::StepCounter(kind, step));
        let on_new_board = ctx.link().callback(|_: MouseEvent| Msg::NewBoard);

        html! {
            <div class="bingo">
                <nav>
                    <CounterView kind={CounterKind::Miab} value={self.state.counters.miab} callback={counter_callback.clone()}/>
                    <CounterView kind={CounterKind::Deaths} value={self.state.counters.deaths} callback={counter_callback}/>
                    <button class="new-board" onclick={on_new_board}>{"new board"}</button>
                </nav>
                <div class="bingo_grid">
                    {
                        for (0..cols).map(|col| html! {
                            <div class="bingo_col">
                                {
                                    for (0..rows).map(|row| {
                                        let coords = (col, row);
                                        let pos = usize::from(col) * usize::from(rows) + usize::from(row);
                                        let state = self.state.board[coords];
                                        let label = AttrValue::from(self.layout.label(coords).to_string());
                                        let callback = square_callback.clone();
                                        html! {
                                            <SquareView {pos} {label} {state} {callback}/>
                                        }
                                    })
                                }
                            </div>
                        })
                    }
                </div>
            </div>
        }
    }
}
