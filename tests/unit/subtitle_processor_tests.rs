/*!
 * Tests for MicroDVD cue parsing
 */

use subdialogs::subtitle_processor::{MicroDvdParser, SubtitleCue};

#[test]
fn test_parse_withValidLine_shouldConvertFramesToSeconds() {
    let parser = MicroDvdParser::new(25).unwrap();
    let cue = parser.parse("{100}{200}Hello").unwrap();

    assert_eq!(cue.start_seconds, 4);
    assert_eq!(cue.stop_seconds, 8);
    assert_eq!(cue.text, "Hello");
}

#[test]
fn test_parse_withSquareBrackets_shouldMatchCurlyBrackets() {
    let parser = MicroDvdParser::new(1).unwrap();
    assert_eq!(
        parser.parse("[12601][12673]Dobrze i to słyszeć. Jeszcze raz."),
        parser.parse("{12601}{12673}Dobrze i to słyszeć. Jeszcze raz.")
    );
}

#[test]
fn test_parse_withMetadataLines_shouldSkipThem() {
    let parser = MicroDvdParser::new(25).unwrap();
    for line in ["", "{1}{1}", "Movie info", "{DEFAULT}{}{}text", "{1}{2"] {
        assert!(parser.parse(line).is_none(), "{:?} should not parse", line);
    }
}

#[test]
fn test_parse_withTextContainingBrackets_shouldKeepThemInText() {
    let parser = MicroDvdParser::new(1).unwrap();
    assert_eq!(
        parser.parse("{1}{2}{3} razy"),
        Some(SubtitleCue::new(1, 2, "{3} razy"))
    );
}

#[test]
fn test_cue_display_shouldShowTimesAndText() {
    let cue = SubtitleCue::new(4, 8, "Hello");
    assert_eq!(cue.to_string(), "[4s-8s] Hello");
}
