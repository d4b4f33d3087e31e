use std::io::{BufRead, Write};

use anyhow::{Context, Result, anyhow, bail};

use lol_match_stats::pipeline::PlayerSelector;
use lol_match_stats::registry::KnownPlayer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Known(usize),
    ByRiotId,
}

/// Menu entries are 1-based; the entry after the known players asks for a Riot ID.
fn parse_menu_choice(input: &str, known: usize) -> Option<MenuChoice> {
    let n = input.trim().parse::<usize>().ok()?;
    if n == known + 1 {
        return Some(MenuChoice::ByRiotId);
    }
    if (1..=known).contains(&n) {
        return Some(MenuChoice::Known(n - 1));
    }
    None
}

/// Asks for a player and a match count on `output`, reading answers from `input`.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    players: &[KnownPlayer],
) -> Result<(PlayerSelector, u32)> {
    writeln!(output, "Select player to analyze:")?;
    for (idx, player) in players.iter().enumerate() {
        writeln!(output, " {}: {}", idx + 1, player.name)?;
    }
    writeln!(
        output,
        " {}: Enter player by Riot ID (gameName and tagLine)",
        players.len() + 1
    )?;

    let answer = read_answer(input, output, "Enter player number: ")?;
    let selector = match parse_menu_choice(&answer, players.len()) {
        Some(MenuChoice::Known(idx)) => PlayerSelector::Known {
            name: players[idx].name.clone(),
        },
        Some(MenuChoice::ByRiotId) => PlayerSelector::RiotId {
            game_name: read_answer(input, output, "Enter gameName: ")?,
            tag_line: read_answer(input, output, "Enter tagLine: ")?,
        },
        None => bail!("invalid choice {answer:?}"),
    };
    selector.validate()?;

    let count = read_answer(input, output, "How many recent games to analyze?: ")?;
    let count = count
        .parse::<u32>()
        .map_err(|_| anyhow!("not a number: {count:?}"))?;
    Ok((selector, count))
}

fn read_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;
    let mut line = String::new();
    let read = input.read_line(&mut line).context("read answer")?;
    if read == 0 {
        bail!("input closed");
    }
    Ok(line.trim().to_string())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn players() -> Vec<KnownPlayer> {
        vec![
            KnownPlayer {
                name: "Alpha".to_string(),
                puuid: Some("puuid-alpha".to_string()),
            },
            KnownPlayer {
                name: "Bravo".to_string(),
                puuid: Some("puuid-bravo".to_string()),
            },
        ]
    }

    #[test]
    fn menu_choice_bounds() {
        assert_eq!(parse_menu_choice("1", 2), Some(MenuChoice::Known(0)));
        assert_eq!(parse_menu_choice(" 2 ", 2), Some(MenuChoice::Known(1)));
        assert_eq!(parse_menu_choice("3", 2), Some(MenuChoice::ByRiotId));
        assert_eq!(parse_menu_choice("0", 2), None);
        assert_eq!(parse_menu_choice("4", 2), None);
        assert_eq!(parse_menu_choice("x", 2), None);
    }

    #[test]
    fn picks_known_player() {
        let mut input = Cursor::new("2\n5\n");
        let mut output = Vec::new();
        let (selector, count) = ask(&mut input, &mut output, &players()).unwrap();
        assert_eq!(
            selector,
            PlayerSelector::Known {
                name: "Bravo".to_string()
            }
        );
        assert_eq!(count, 5);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains(" 3: Enter player by Riot ID"));
    }

    #[test]
    fn asks_for_riot_id_parts() {
        let mut input = Cursor::new("3\nSome Name\nEUW\n10\n");
        let mut output = Vec::new();
        let (selector, count) = ask(&mut input, &mut output, &players()).unwrap();
        assert_eq!(
            selector,
            PlayerSelector::RiotId {
                game_name: "Some Name".to_string(),
                tag_line: "EUW".to_string()
            }
        );
        assert_eq!(count, 10);
    }

    #[test]
    fn empty_tag_line_is_rejected_before_count() {
        let mut input = Cursor::new("3\nSome Name\n\n");
        let mut output = Vec::new();
        assert!(ask(&mut input, &mut output, &players()).is_err());
    }
}
