//! Command-line options for the game window.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use dungeon::PlayerClass;
use dungeon::rng::mix_seed_stream;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaunchOptions {
    pub seed: SeedChoice,
    /// `None` lets the new game roll a class.
    pub class: Option<PlayerClass>,
}

static GENERATED_SEED_COUNTER: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let now_nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |duration| duration.as_nanos());
    let counter = GENERATED_SEED_COUNTER.fetch_add(1, Ordering::Relaxed);
    let entropy = (now_nanos as u64) ^ ((now_nanos >> 64) as u64) ^ u64::from(process::id()).rotate_left(17);
    mix_seed_stream(entropy, counter)
}

/// Parses `--seed <n>`, `--seed=<n>`, `--class <name>` and `--class=<name>`.
/// Unknown arguments are ignored.
pub fn parse_launch_args(args: &[String], generated_seed: u64) -> Result<LaunchOptions, String> {
    let mut seed = None;
    let mut class = None;
    let mut rest = args.iter().skip(1);

    while let Some(argument) = rest.next() {
        let (flag, inline) = match argument.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (argument.as_str(), None),
        };
        if flag != "--seed" && flag != "--class" {
            continue;
        }
        let value = match inline {
            Some(value) => value,
            None => rest.next().map(String::as_str).ok_or_else(|| format!("missing value for {flag}"))?,
        };
        if flag == "--seed" {
            if seed.is_some() {
                return Err("seed provided more than once".to_string());
            }
            seed = Some(value.parse::<u64>().map_err(|_| format!("seed value '{value}' must be a number"))?);
        } else {
            class = Some(parse_class(value)?);
        }
    }

    Ok(LaunchOptions {
        seed: seed.map_or(SeedChoice::Generated(generated_seed), SeedChoice::Cli),
        class,
    })
}

fn parse_class(value: &str) -> Result<PlayerClass, String> {
    let wanted = value.to_ascii_lowercase();
    PlayerClass::ALL
        .into_iter()
        .find(|class| {
            let name = class.profile().name.to_ascii_lowercase();
            name == wanted || name.split_whitespace().next() == Some(wanted.as_str())
        })
        .ok_or_else(|| format!("unknown class '{value}' (try solidity, meme, rug or whale)"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn uses_generated_seed_when_seed_flag_is_absent() {
        let options = parse_launch_args(&as_args(&["dungeon"]), 9_876_543).expect("no flags is valid");
        assert_eq!(options.seed, SeedChoice::Generated(9_876_543));
        assert_eq!(options.class, None);
    }

    #[test]
    fn parses_separate_and_inline_values() {
        let options = parse_launch_args(&as_args(&["dungeon", "--seed", "4242", "--class=whale"]), 1)
            .expect("valid flags should parse");
        assert_eq!(options.seed, SeedChoice::Cli(4_242));
        assert_eq!(options.class, Some(PlayerClass::WhaleApprentice));

        let options = parse_launch_args(&as_args(&["dungeon", "--seed=2026", "--class", "Rug Survivor"]), 1)
            .expect("valid flags should parse");
        assert_eq!(options.seed.value(), 2_026);
        assert_eq!(options.class, Some(PlayerClass::RugSurvivor));
    }

    #[test]
    fn errors_when_a_flag_has_no_value() {
        let err = parse_launch_args(&as_args(&["dungeon", "--seed"]), 1).expect_err("missing value");
        assert!(err.contains("missing"), "error should explain missing value: {err}");
    }

    #[test]
    fn errors_on_bad_values() {
        let err = parse_launch_args(&as_args(&["dungeon", "--seed=abc"]), 1).expect_err("bad seed");
        assert!(err.contains("number"), "{err}");
        let err = parse_launch_args(&as_args(&["dungeon", "--class=wizard"]), 1).expect_err("bad class");
        assert!(err.contains("unknown class"), "{err}");
        let err = parse_launch_args(&as_args(&["dungeon", "--seed=1", "--seed", "2"]), 1).expect_err("dup");
        assert!(err.contains("more than once"), "{err}");
    }

    #[test]
    fn generated_seed_changes_between_calls() {
        assert_ne!(generate_runtime_seed(), generate_runtime_seed());
    }
}
