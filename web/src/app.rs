use bingo_core as bingo;
use std::rc::Rc;
use yew::prelude::*;

use crate::args::Args;
use crate::board::BingoView;

const BUNDLED_POOL: &str = include_str!("squares.json");

fn bundled_pool() -> bingo::SquarePool {
    bingo::SquarePool::from_json(BUNDLED_POOL).unwrap_or_else(|err| {
        log::error!("bundled square pool is broken: {}", err);
        bingo::SquarePool::default()
    })
}

#[derive(Properties, Clone, PartialEq)]
pub(crate) struct AppProps {
    #[prop_or_default]
    pub seed: Option<u64>,
    #[prop_or_default]
    pub segment: Option<u32>,
}

impl From<Args> for AppProps {
    fn from(args: Args) -> Self {
        Self {
            seed: args.seed,
            segment: args.segment,
        }
    }
}

#[derive(Properties, PartialEq)]
struct SegmentListProps {
    segments: Vec<u32>,
    onselect: Callback<u32>,
}

#[function_component(SegmentList)]
fn segment_list(props: &SegmentListProps) -> Html {
    html! {
        <ul class="segments">
            {
                for props.segments.iter().map(|&segment| {
                    let onclick = props.onselect.reform(move |e: MouseEvent| {
                        e.prevent_default();
                        segment
                    });
                    html! {
                        <li><a href="#" {onclick}>{format!("Segment {}", segment)}</a></li>
                    }
                })
            }
        </ul>
    }
}

#[function_component(App)]
pub(crate) fn app(props: &AppProps) -> Html {
    let pool = use_memo((), |_| bundled_pool());
    let segment = {
        let pool = pool.clone();
        let requested = props.segment;
        use_state(move || {
            requested.or_else(|| match pool.segments().as_slice() {
                [only] => Some(*only),
                _ => None,
            })
        })
    };

    match *segment {
        Some(segment) => html! {
            <BingoView pool={Rc::clone(&pool)} {segment} seed={props.seed}/>
        },
        None if pool.entries().is_empty() => html! {
            <p class="error">{"No squares available"}</p>
        },
        None => {
            let onselect = {
                let segment = segment.clone();
                Callback::from(move |choice: u32| {
                    log::debug!("segment chosen: {}", choice);
                    segment.set(Some(choice));
                })
            };
            html! {
                <SegmentList segments={pool.segments()} {onselect}/>
            }
        }
    }
}
