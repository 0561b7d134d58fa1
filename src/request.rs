//! Typed requests parsed from form-encoded parameters.

use std::num::IntErrorKind;

use thiserror::Error;

use crate::board::Square;

/// Errors rejecting a request before it reaches the game.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("no route for '{0}'")]
    NotFound(String),
    #[error("method {method} not allowed on '{path}'")]
    MethodNotAllowed { method: String, path: String },
    #[error("missing form field '{0}'")]
    MissingField(&'static str),
    #[error("form field '{field}' is not an integer: '{value}'")]
    InvalidNumber { field: &'static str, value: String },
}

/// One request against the shared game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    /// Select a piece or move the selected one.
    Click(Square),
    /// A click whose coordinates fall outside the board.
    ClickOutOfRange { row: i64, col: i64 },
    /// Back to the starting position.
    Reset,
    /// Current state, unchanged.
    Read,
}

impl Request {
    /// Route a request by method and path, decoding `row`/`col` from the
    /// form body for clicks.
    ///
    /// Routes: `GET /` reads, `POST /move` clicks, `/reset` resets.
    pub fn parse(method: &str, path: &str, body: &str) -> Result<Self, RequestError> {
        match path {
            "/" => Ok(Request::Read),
            "/reset" => Ok(Request::Reset),
            "/move" if method.eq_ignore_ascii_case("POST") => Self::parse_click(body),
            "/move" => Err(RequestError::MethodNotAllowed {
                method: method.to_string(),
                path: path.to_string(),
            }),
            _ => Err(RequestError::NotFound(path.to_string())),
        }
    }

    /// Decode a `row=<int>&col=<int>` form body into a click.
    ///
    /// The first occurrence of a repeated field wins. Integers too large for
    /// `i64` saturate and end up as [`Request::ClickOutOfRange`].
    pub fn parse_click(body: &str) -> Result<Self, RequestError> {
        let mut row = None;
        let mut col = None;
        for (key, value) in form_urlencoded::parse(body.as_bytes()) {
            match &*key {
                "row" if row.is_none() => row = Some(parse_int("row", &value)?),
                "col" if col.is_none() => col = Some(parse_int("col", &value)?),
                _ => {}
            }
        }

        let row = row.ok_or(RequestError::MissingField("row"))?;
        let col = col.ok_or(RequestError::MissingField("col"))?;
        Ok(match Square::from_coords(row, col) {
            Some(square) => Request::Click(square),
            None => Request::ClickOutOfRange { row, col },
        })
    }
}

fn parse_int(field: &'static str, value: &str) -> Result<i64, RequestError> {
    match value.trim().parse::<i64>() {
        Ok(n) => Ok(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Ok(i64::MAX),
            IntErrorKind::NegOverflow => Ok(i64::MIN),
            _ => Err(RequestError::InvalidNumber {
                field,
                value: value.to_string(),
            }),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_click() {
        assert_eq!(
            Request::parse("POST", "/move", "row=6&col=4"),
            Ok(Request::Click(Square::new(6, 4).unwrap()))
        );
    }

    #[test]
    fn test_parse_click_ignores_extra_fields_and_order() {
        assert_eq!(
            Request::parse_click("col=0&token=x&row=7"),
            Ok(Request::Click(Square::new(7, 0).unwrap()))
        );
    }

    #[test]
    fn test_parse_click_decodes_percent_encoding() {
        assert_eq!(
            Request::parse_click("row=%201&col=+2"),
            Ok(Request::Click(Square::new(1, 2).unwrap()))
        );
    }

    #[test_case("row=8&col=0", 8, 0)]
    #[test_case("row=-1&col=3", -1, 3)]
    #[test_case("row=2&col=100", 2, 100)]
    fn test_out_of_range_is_not_an_error(body: &str, row: i64, col: i64) {
        assert_eq!(
            Request::parse_click(body),
            Ok(Request::ClickOutOfRange { row, col })
        );
    }

    #[test_case("row=6&row=1&col=4", 6, 4; "repeated row")]
    #[test_case("row=6&col=4&col=0", 6, 4; "repeated col")]
    fn test_first_value_wins(body: &str, row: u8, col: u8) {
        assert_eq!(
            Request::parse_click(body),
            Ok(Request::Click(Square::new(row, col).unwrap()))
        );
    }

    #[test]
    fn test_repeated_field_ignores_later_garbage() {
        assert_eq!(
            Request::parse_click("row=1&row=x&col=2"),
            Ok(Request::Click(Square::new(1, 2).unwrap()))
        );
    }

    #[test_case("row=99999999999999999999&col=1", i64::MAX, 1; "positive overflow")]
    #[test_case("row=2&col=-99999999999999999999", 2, i64::MIN; "negative overflow")]
    fn test_overflow_is_out_of_range(body: &str, row: i64, col: i64) {
        assert_eq!(
            Request::parse_click(body),
            Ok(Request::ClickOutOfRange { row, col })
        );
    }

    #[test_case("col=1", RequestError::MissingField("row"))]
    #[test_case("row=1", RequestError::MissingField("col"))]
    #[test_case("", RequestError::MissingField("row"))]
    fn test_missing_field(body: &str, expected: RequestError) {
        assert_eq!(Request::parse_click(body), Err(expected));
    }

    #[test]
    fn test_invalid_number() {
        assert_eq!(
            Request::parse_click("row=e&col=2"),
            Err(RequestError::InvalidNumber {
                field: "row",
                value: "e".to_string()
            })
        );
    }

    #[test_case("GET", "/", Request::Read)]
    #[test_case("POST", "/reset", Request::Reset)]
    #[test_case("GET", "/reset", Request::Reset)]
    fn test_routes(method: &str, path: &str, expected: Request) {
        assert_eq!(Request::parse(method, path, ""), Ok(expected));
    }

    #[test]
    fn test_move_requires_post() {
        assert_eq!(
            Request::parse("GET", "/move", "row=6&col=4"),
            Err(RequestError::MethodNotAllowed {
                method: "GET".to_string(),
                path: "/move".to_string()
            })
        );
    }

    #[test]
    fn test_unknown_route() {
        assert_eq!(
            Request::parse("GET", "/favicon.ico", ""),
            Err(RequestError::NotFound("/favicon.ico".to_string()))
        );
    }
}
