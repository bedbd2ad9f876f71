use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod source;
mod storage;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

/// Parses `#-v&--categories=4` style location hashes, the leading empty segment stands in for the
/// binary name.
fn parse_args(location_hash: &str) -> Result<Args, clap::Error> {
    Args::try_parse_from(location_hash.split(['#', '&']))
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = parse_args(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args.game);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_hash_uses_defaults() {
        let args = parse_args("").unwrap();

        assert_eq!(args.game.board_config(), trivia_core::BoardConfig::DEFAULT);
        assert_eq!(args.game.seed, None);
    }

    #[test]
    fn hash_overrides_board_shape_and_seed() {
        let args = parse_args("#-vv&--categories=4&--clues=3&--seed=42").unwrap();

        let config = args.game.board_config();
        assert_eq!(config.categories, 4);
        assert_eq!(config.clues_per_category, 3);
        assert_eq!(args.game.seed, Some(42));
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(parse_args("#--lives=3").is_err());
    }
}
