//! Best-effort extraction of a room list from free text.
//!
//! Language services wrap their JSON in prose. We take everything from the
//! first `[` to the last `]` and hand it to the JSON parser; no attempt is
//! made to repair anything else.

use crate::error::LayoutError;
use crate::room::{parse_raw_rooms, RawRoom};

/// Slice of `text` from the first `[` to the last `]`, inclusive.
pub fn extract_json_array(text: &str) -> Result<&str, LayoutError> {
    let start = text.find('[');
    let end = text.rfind(']');
    match (start, end) {
        (Some(s), Some(e)) if e > s => Ok(&text[s..=e]),
        _ => Err(LayoutError::MalformedSpec(
            "no JSON array found in upstream text".to_string(),
        )),
    }
}

/// Extract and parse the room list. An empty list is a failure too.
pub fn parse_room_text(text: &str) -> Result<Vec<RawRoom>, LayoutError> {
    let rooms = parse_raw_rooms(extract_json_array(text)?)?;
    if rooms.is_empty() {
        return Err(LayoutError::MalformedSpec("room list is empty".to_string()));
    }
    Ok(rooms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_array_from_prose() {
        let text = "Here is your plan:\n[{\"name\": \"Hall\", \"dx\": 4, \"dy\": 5}]\nEnjoy!";
        assert_eq!(
            extract_json_array(text).unwrap(),
            "[{\"name\": \"Hall\", \"dx\": 4, \"dy\": 5}]"
        );
    }

    #[test]
    fn test_nested_brackets_span_first_to_last() {
        let text = "x [1, [2, 3]] y";
        assert_eq!(extract_json_array(text).unwrap(), "[1, [2, 3]]");
    }

    #[test]
    fn test_no_array_is_malformed() {
        assert!(matches!(
            extract_json_array("I cannot help with that."),
            Err(LayoutError::MalformedSpec(_))
        ));
    }

    #[test]
    fn test_reversed_brackets_is_malformed() {
        assert!(extract_json_array("] oops [").is_err());
    }

    #[test]
    fn test_empty_array_rejected() {
        assert!(matches!(
            parse_room_text("Sure: []"),
            Err(LayoutError::MalformedSpec(_))
        ));
    }

    #[test]
    fn test_parse_room_text() {
        let text = r#"```json
[
  {"name": "Hall", "x": 0, "y": 0, "dx": 4, "dy": 5, "color": "Beige", "floor": 0},
  {"name": "Kitchen", "dx": 3, "dy": 3, "floor": 1}
]
```"#;
        let rooms = parse_room_text(text).unwrap();
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[1].floor, Some(1));
        assert_eq!(rooms[0].color.as_deref(), Some("Beige"));
    }
}
