use anyhow::{Context, bail};
use mines_core::Difficulty;
use mines_protocol::Command;
use mines_service::DefaultGame;

/// One line typed by the player.
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    Command(Command),
    SwitchPlayer(String),
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  new                       start a game with the default board
  new <preset>              beginner, intermediate or expert
  new <rows> <cols> <mines> start a custom game
  reveal <row> <col>        open a cell (also: r)
  show                      print the current board
  stats                     print your results
  abandon                   drop the current game
  player <id>               act as another player
  quit                      save and exit";

fn number(word: Option<&str>, name: &str) -> anyhow::Result<usize> {
    let word = word.with_context(|| format!("missing {name}"))?;
    word.parse()
        .with_context(|| format!("{name} must be a number, got {word:?}"))
}

fn default_command(default_game: DefaultGame) -> Command {
    match default_game {
        DefaultGame::Preset(difficulty) => Command::Preset { difficulty },
        DefaultGame::Custom {
            rows,
            cols,
            hazards,
        } => Command::NewGame {
            rows,
            cols,
            hazards,
        },
    }
}

/// `Ok(None)` for blank lines.
pub fn parse_line(line: &str, default_game: DefaultGame) -> anyhow::Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(keyword) = words.next() else {
        return Ok(None);
    };

    let input = match keyword.to_ascii_lowercase().as_str() {
        "new" | "n" => {
            let args: Vec<&str> = words.by_ref().collect();
            match args.as_slice() {
                [] => Input::Command(default_command(default_game)),
                [preset] => Input::Command(Command::Preset {
                    difficulty: preset.parse::<Difficulty>()?,
                }),
                [rows, cols, hazards] => Input::Command(Command::NewGame {
                    rows: number(Some(*rows), "rows")?,
                    cols: number(Some(*cols), "cols")?,
                    hazards: number(Some(*hazards), "mines")?,
                }),
                _ => bail!("usage: new [preset | rows cols mines]"),
            }
        }
        "reveal" | "r" => Input::Command(Command::Reveal {
            row: number(words.next(), "row")?,
            col: number(words.next(), "col")?,
        }),
        "show" => Input::Command(Command::Show),
        "stats" => Input::Command(Command::Stats),
        "abandon" => Input::Command(Command::Abandon),
        "player" => Input::SwitchPlayer(words.next().context("missing player id")?.to_owned()),
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => bail!("unknown command {other:?}, try help"),
    };

    if words.next().is_some() {
        bail!("too many arguments for {keyword}");
    }
    Ok(Some(input))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> anyhow::Result<Option<Input>> {
        parse_line(line, DefaultGame::default())
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn parses_new_game_forms() {
        assert_eq!(
            parse("new").unwrap(),
            Some(Input::Command(Command::Preset {
                difficulty: Difficulty::Beginner
            }))
        );
        assert_eq!(
            parse("new Expert").unwrap(),
            Some(Input::Command(Command::Preset {
                difficulty: Difficulty::Expert
            }))
        );
        assert_eq!(
            parse("new 5 6 7").unwrap(),
            Some(Input::Command(Command::NewGame {
                rows: 5,
                cols: 6,
                hazards: 7
            }))
        );
        let custom = DefaultGame::Custom {
            rows: 3,
            cols: 3,
            hazards: 1,
        };
        assert_eq!(
            parse_line("n", custom).unwrap(),
            Some(Input::Command(Command::NewGame {
                rows: 3,
                cols: 3,
                hazards: 1
            }))
        );
    }

    #[test]
    fn parses_reveal_and_misc() {
        assert_eq!(
            parse("r 2 3").unwrap(),
            Some(Input::Command(Command::Reveal { row: 2, col: 3 }))
        );
        assert_eq!(
            parse("player 1234").unwrap(),
            Some(Input::SwitchPlayer("1234".into()))
        );
        assert_eq!(parse("QUIT").unwrap(), Some(Input::Quit));
        assert_eq!(parse("stats").unwrap(), Some(Input::Command(Command::Stats)));
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse("reveal 2").is_err());
        assert!(parse("reveal a b").is_err());
        assert!(parse("reveal 1 2 3").is_err());
        assert!(parse("new 3 3").is_err());
        assert!(parse("new nightmare").is_err());
        assert!(parse("flag 1 1").is_err());
    }
}
