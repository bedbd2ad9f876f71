use clap::Args;
use rand::SeedableRng;
use rand::rngs::StdRng;
use trivia_core::{self as trivia, BoardConfig, CluePos, GameModel, GameStore, SnapshotStorage};
use yew::prelude::*;

use crate::source::{DEFAULT_API_URL, HttpCategorySource};
use crate::storage::BrowserStorage;

const START_LABEL: &str = "Start the Game!";
const RESET_LABEL: &str = "Reset Game";

/// Seed built from two draws of JavaScript's `Math.random`.
fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let half = || (random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}

const fn play_label(has_game: bool) -> &'static str {
    if has_game { RESET_LABEL } else { START_LABEL }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Base URL of the category API
    #[arg(long, default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// How many categories to put on the board
    #[arg(long, default_value_t = BoardConfig::DEFAULT.categories)]
    pub categories: usize,

    /// How many clues to show per category
    #[arg(long, default_value_t = BoardConfig::DEFAULT.clues_per_category)]
    pub clues: usize,

    /// How many candidate categories to choose from
    #[arg(long, default_value_t = BoardConfig::DEFAULT.candidate_pool)]
    pub candidates: usize,

    /// Force a seed instead of random
    #[arg(short, long)]
    pub seed: Option<u64>,
}

impl GameProps {
    pub(crate) fn board_config(&self) -> BoardConfig {
        BoardConfig::new(self.categories, self.clues, self.candidates)
    }
}

#[derive(Properties, Clone, PartialEq)]
struct ClueProps {
    pos: CluePos,
    text: String,
    interactive: bool,
    callback: Callback<CluePos>,
}

#[function_component(ClueView)]
fn clue_component(props: &ClueProps) -> Html {
    let ClueProps {
        pos,
        text,
        interactive,
        callback,
    } = props.clone();

    let class = classes!("clue", (!interactive).then_some("disabled"));
    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("{:?} click", pos);
        if interactive {
            callback.emit(pos);
        }
    });

    html! {
        <div {class} {onclick} data-cat-index={pos.0.to_string()} data-clue-index={pos.1.to_string()}>
            {text}
        </div>
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum PlayOutcome {
    Ignored,
    Reset,
    Build,
}

/// Game store plus the transient state of fetching a new board.
#[derive(Debug)]
pub(crate) struct GameSession<S> {
    store: GameStore<S>,
    loading: bool,
    error: Option<String>,
}

impl<S: SnapshotStorage> GameSession<S> {
    fn new(storage: S) -> Self {
        let mut store = GameStore::new(storage);
        store.restore();
        Self {
            store,
            loading: false,
            error: None,
        }
    }

    fn has_game(&self) -> bool {
        self.store.has_game()
    }

    /// Primary button: ignored while fetching, resets a running game, otherwise asks for a board.
    fn play(&mut self) -> PlayOutcome {
        if self.loading {
            return PlayOutcome::Ignored;
        }

        if self.store.has_game() {
            log::debug!("reset game");
            self.store.reset();
            self.error = None;
            PlayOutcome::Reset
        } else {
            self.loading = true;
            self.error = None;
            PlayOutcome::Build
        }
    }

    /// A failed build keeps whatever board is already there and only records the error.
    fn board_built(&mut self, result: trivia::Result<GameModel>) -> bool {
        self.loading = false;
        match result {
            Ok(model) => {
                if let Err(err) = self.store.replace(model) {
                    log::error!("Could not save new game: {}", err);
                }
            }
            Err(err) => {
                log::error!("Could not build board: {}", err);
                self.error = Some(err.to_string());
            }
        }
        true
    }

    fn reveal(&mut self, pos: CluePos) -> bool {
        match self.store.reveal_next(pos) {
            Ok(outcome) => outcome.has_update(),
            Err(err) => {
                log::warn!("Ignoring click at {:?}: {}", pos, err);
                false
            }
        }
    }

    fn score_text(&self) -> String {
        self.store
            .model()
            .map_or_else(String::new, |model| trivia::score_label(model.score()))
    }
}

#[derive(Debug)]
pub(crate) enum Msg {
    Play,
    BoardBuilt(trivia::Result<GameModel>),
    Reveal(CluePos),
}

#[derive(Debug)]
pub(crate) struct GameView {
    session: GameSession<BrowserStorage>,
}

impl GameView {
    fn spawn_build(ctx: &Context<Self>) {
        let props = ctx.props();
        let source = HttpCategorySource::new(&props.api_url);
        let config = props.board_config();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("building board with seed {}", seed);

        ctx.link().send_future(async move {
            let mut rng = StdRng::seed_from_u64(seed);
            Msg::BoardBuilt(trivia::build_board(&source, &config, &mut rng).await)
        });
    }

    fn play(&mut self, ctx: &Context<Self>) -> bool {
        match self.session.play() {
            PlayOutcome::Ignored => false,
            PlayOutcome::Reset => true,
            PlayOutcome::Build => {
                Self::spawn_build(ctx);
                true
            }
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let mut view = Self {
            session: GameSession::new(BrowserStorage),
        };
        if !view.session.has_game() {
            log::info!("No saved game, starting a new one");
            view.play(ctx);
        }
        view
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Play => self.play(ctx),
            BoardBuilt(result) => self.session.board_built(result),
            Reveal(pos) => self.session.reveal(pos),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let session = &self.session;
        let columns = session
            .store
            .model()
            .map(trivia::board_view)
            .unwrap_or_default();
        let label = play_label(session.has_game());
        let score = session.score_text();

        let cb_play = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Play
        });
        let cb_reveal = ctx.link().callback(Msg::Reveal);

        html! {
            <div class="trivia">
                <nav>
                    <button id="play" onclick={cb_play} disabled={session.loading}>{label}</button>
                    <span id="spinner" class={classes!("spinner", (!session.loading).then_some("disabled"))}/>
                    <output id="active-clue">{score}</output>
                </nav>
                if let Some(error) = &session.error {
                    <p class="error">{format!("Could not load a new board: {}", error)}</p>
                }
                <table id="jeopardy">
                    <thead>
                        <tr id="categories">
                            {
                                for columns.iter().enumerate().map(|(cat_index, column)| html! {
                                    <th class={column.completed.then_some("viewed")} data-cat-index={cat_index.to_string()}>
                                        {column.title.to_string()}
                                    </th>
                                })
                            }
                        </tr>
                    </thead>
                    <tbody>
                        <tr id="clues">
                            {
                                for columns.iter().enumerate().map(|(cat_index, column)| html! {
                                    <td>
                                        {
                                            for column.clues.iter().enumerate().map(|(clue_index, face)| html! {
                                                <ClueView
                                                    pos={(cat_index, clue_index)}
                                                    text={face.text.to_string()}
                                                    interactive={face.interactive}
                                                    callback={cb_reveal.clone()}
                                                />
                                            })
                                        }
                                    </td>
                                })
                            }
                        </tr>
                    </tbody>
                </table>
            </div>
        }
    }
}
