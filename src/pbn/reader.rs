use crate::error::ParseError;
use crate::model::Deal;
use nom::{
    bytes::complete::{tag, take_until},
    character::complete::char,
    sequence::terminated,
    IResult, Parser,
};
use std::path::Path;

/// Literal that opens a PBN deal line
pub const PBN_DEAL_PREFIX: &str = "[Deal \"";

/// Parse the opening `[Deal "` of a PBN deal tag
fn deal_tag_open(input: &str) -> IResult<&str, &str> {
    tag(PBN_DEAL_PREFIX).parse(input)
}

/// Parse the tag value up to and including the closing quote
fn deal_tag_value(input: &str) -> IResult<&str, &str> {
    terminated(take_until("\""), char('"')).parse(input)
}

/// Parse one line of deal input.
///
/// Two notations are accepted:
///
/// * PBN: `[Deal "N:762.KQ.QJ6.J9632 Q543.9874.T5.K75 ..."]`
/// * GIB: `W:T5.K4.652.A98542 K6.QJT976.QT7.Q6 ...` (the line is the deal)
///
/// Returns `Ok(None)` for lines that carry no deal: blank lines, and
/// non-PBN lines when `pbn_only` is set.
pub fn parse_deal_line(line: &str, pbn_only: bool) -> Result<Option<Deal>, ParseError> {
    let line = line.trim_start_matches('\u{feff}').trim();
    if line.is_empty() {
        return Ok(None);
    }

    match deal_tag_open(line) {
        Ok((rest, _)) => {
            let (_, value) = deal_tag_value(rest).map_err(|_| ParseError::MissingTerminator)?;
            Deal::from_pbn(value).map(Some)
        }
        Err(_) if pbn_only => Ok(None),
        Err(_) => Deal::from_pbn(line).map(Some),
    }
}

/// Whether a file name calls for PBN-only parsing
pub fn is_pbn_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("pbn"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Card, Direction, CARD_SLOTS};

    const HANDS: &str = "T5.K4.652.A98542 K6.QJT976.QT7.Q6 432.A.AKJ93.JT73 AQJ987.8532.84.K";

    fn partition(deal: &Deal) -> Vec<Option<Direction>> {
        let mut owners = vec![None; CARD_SLOTS];
        for dir in Direction::ALL {
            for card in deal.hand(dir).cards() {
                assert!(owners[card.index()].is_none(), "{} dealt twice", card);
                owners[card.index()] = Some(dir);
            }
        }
        owners
    }

    #[test]
    fn test_parse_deal_tag() {
        let (rest, _) = deal_tag_open("[Deal \"N:AKQ\"]").unwrap();
        let (rest, value) = deal_tag_value(rest).unwrap();
        assert_eq!(value, "N:AKQ");
        assert_eq!(rest, "]");
    }

    #[test]
    fn test_gib_line() {
        let deal = parse_deal_line(&format!("W:{}", HANDS), false).unwrap().unwrap();
        assert_eq!(deal.hand(Direction::West).to_pbn(), "T5.K4.652.A98542");
        assert_eq!(deal.hand(Direction::North).to_pbn(), "K6.QJT976.QT7.Q6");
        assert_eq!(deal.hand(Direction::South).to_pbn(), "AQJ987.8532.84.K");
    }

    #[test]
    fn test_pbn_line() {
        let line = format!("[Deal \"N:{}\"]", HANDS);
        let deal = parse_deal_line(&line, false).unwrap().unwrap();
        assert_eq!(deal.hand(Direction::North).to_pbn(), "T5.K4.652.A98542");
        assert_eq!(deal.hand(Direction::West).to_pbn(), "AQJ987.8532.84.K");
    }

    #[test]
    fn test_both_dialects_round_trip() {
        let gib = parse_deal_line(&format!("S:{}", HANDS), false).unwrap().unwrap();
        let pbn = parse_deal_line(&format!("[Deal \"S:{}\"]", HANDS), true).unwrap().unwrap();
        assert_eq!(gib, pbn);

        for deal in [&gib, &pbn] {
            let owners = partition(deal);
            assert!(Card::deck().all(|c| owners[c.index()].is_some()));
            let reparsed = parse_deal_line(&deal.to_pbn(Direction::South), false)
                .unwrap()
                .unwrap();
            assert_eq!(partition(&reparsed), owners);
            assert_eq!(deal.to_pbn(Direction::South), format!("S:{}", HANDS));
        }
    }

    #[test]
    fn test_missing_seat_defaults_to_west() {
        let bare = parse_deal_line(HANDS, false).unwrap().unwrap();
        let west = parse_deal_line(&format!("W:{}", HANDS), false).unwrap().unwrap();
        assert_eq!(bare, west);

        let bare_pbn = parse_deal_line(&format!("[Deal \"{}\"]", HANDS), false).unwrap().unwrap();
        assert_eq!(bare_pbn, west);
    }

    #[test]
    fn test_trailing_text_ignored() {
        let line = format!("W:{} 8786 5565 8786 5565 7675", HANDS);
        let deal = parse_deal_line(&line, false).unwrap().unwrap();
        assert_eq!(deal.to_pbn(Direction::West), format!("W:{}", HANDS));
    }

    #[test]
    fn test_missing_terminator() {
        let line = format!("[Deal \"N:{}]", HANDS);
        assert_eq!(parse_deal_line(&line, false), Err(ParseError::MissingTerminator));
    }

    #[test]
    fn test_malformed_hand() {
        // Twelve cards in the first hand
        let line = "W:T5.K4.652.A9854 K6.QJT976.QT7.Q6 432.A.AKJ93.JT73 AQJ987.8532.84.K";
        assert!(matches!(
            parse_deal_line(line, false),
            Err(ParseError::MalformedHand(_))
        ));

        // Thirteen cards each, but the club 2 appears twice and the club 3 never
        let line = "W:T5.K4.652.A98542 K6.QJT976.QT7.Q6 432.A.AKJ93.JT72 AQJ987.8532.84.K";
        assert!(matches!(
            parse_deal_line(line, false),
            Err(ParseError::MalformedHand(_))
        ));
    }

    #[test]
    fn test_blank_and_skipped_lines() {
        assert_eq!(parse_deal_line("", false), Ok(None));
        assert_eq!(parse_deal_line("   \t", false), Ok(None));
        assert_eq!(parse_deal_line(&format!("W:{}", HANDS), true), Ok(None));
        assert_eq!(parse_deal_line("[Board \"1\"]", true), Ok(None));
    }

    #[test]
    fn test_non_deal_tag_in_gib_mode_is_malformed() {
        assert!(parse_deal_line("[Board \"1\"]", false).is_err());
    }

    #[test]
    fn test_byte_order_mark_ignored() {
        let deal = "N:K843.T542.J6.863 AQJ7.K.Q75.AT942 962.AJ7.KT82.J75 T5.Q9863.A943.KQ";
        let line = format!("\u{feff}[Deal \"{}\"]", deal);
        let parsed = parse_deal_line(&line, true).unwrap();
        assert_eq!(parsed, Some(Deal::from_pbn(deal).unwrap()));
        assert_eq!(parse_deal_line("\u{feff}", false).unwrap(), None);
    }

    #[test]
    fn test_is_pbn_path() {
        assert!(is_pbn_path(Path::new("deals.pbn")));
        assert!(is_pbn_path(Path::new("DEALS.PBN")));
        assert!(!is_pbn_path(Path::new("deals.txt")));
        assert!(!is_pbn_path(Path::new("pbn")));
    }
}
