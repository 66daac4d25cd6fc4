//! Integration tests for the console grammar

use key_illumination::{BlinkRequest, KeyIndex, ParseError, parse};

#[test]
fn every_valid_command_decodes_to_its_key_and_duration() {
    for row in 0..4u8 {
        for col in 0..4u8 {
            for secs in 0..=30u8 {
                let line = format!("blink [{row}][{col}] {secs}");
                let request = parse(line.as_bytes()).unwrap();
                assert_eq!(request.key.get(), row * 4 + col, "{line}");
                assert_eq!(request.duration_seconds, secs, "{line}");
            }
        }
    }
}

#[test]
fn display_output_parses_back() {
    let request = BlinkRequest::new(KeyIndex::from_position(3, 1).unwrap(), 27);
    let line = request.to_string();
    assert_eq!(line, "blink [3][1] 27");
    assert_eq!(parse(line.as_bytes()), Ok(request));
}

#[test]
fn documented_malformed_commands_are_rejected() {
    for line in [
        "blink [4][0] 10",
        "blink [0][0] 31",
        "blin [0][0] 5",
        "blink [0][0] 5x",
    ] {
        assert_eq!(parse(line.as_bytes()), Err(ParseError::InvalidSyntax), "{line}");
    }
}

#[test]
fn deviations_at_every_position_are_rejected() {
    let valid = b"blink [2][3] 17";
    assert!(parse(valid).is_ok());

    for position in 0..valid.len() {
        let mut corrupted = *valid;
        corrupted[position] = b'#';
        assert_eq!(
            parse(&corrupted),
            Err(ParseError::InvalidSyntax),
            "corrupted byte {position}"
        );
    }

    // truncated at any point
    for end in 0..valid.len() - 1 {
        assert_eq!(parse(&valid[..end]), Err(ParseError::InvalidSyntax), "prefix {end}");
    }
}

#[test]
fn single_digit_seconds_have_no_upper_bound_check() {
    assert_eq!(parse(b"blink [0][0] 9").unwrap().duration_seconds, 9);
    assert_eq!(parse(b"blink [0][0] 0").unwrap().duration_seconds, 0);
}

#[test]
fn terminators_are_not_part_of_the_grammar() {
    assert!(parse(b"blink [0][0] 5\n").is_err());
    assert!(parse(b"blink [0][0] 5\r").is_err());
    assert!(parse(b" blink [0][0] 5").is_err());
}

#[test]
fn str_and_byte_conversions_match_parse() {
    let from_str: BlinkRequest = "blink [0][3] 4".parse().unwrap();
    let from_bytes = BlinkRequest::try_from(&b"blink [0][3] 4"[..]).unwrap();
    assert_eq!(from_str, from_bytes);
    assert_eq!(from_str.key.get(), 3);
}
