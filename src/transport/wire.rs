use crate::domain::{CATEGORY_ERROR, CATEGORY_MESSAGE, LiveUpdateResponse, ResponseCode};

const DEFAULT_MESSAGE: &str = "Unknown Error";

/// Parse a `CATEGORY;CODE;MESSAGE;PARAM1,PARAM2` body.
///
/// The body is split into at most four fields, so `;` inside the params field
/// is kept verbatim. Only a trailing line break is stripped. Missing fields take
/// their defaults (`ERROR`, `0`, `Unknown Error`, no params), while a present
/// but empty field is kept as is. The code is read from its leading integer
/// (`"13abc"` reads as 13, `"abc"` as 0).
pub fn decode_wire_response(raw: &str) -> LiveUpdateResponse {
    let body = raw.trim_end_matches(['\r', '\n']);
    if body.is_empty() {
        return synthesize_local(false, CATEGORY_ERROR, 0, DEFAULT_MESSAGE, Vec::new());
    }

    let mut fields = body.splitn(4, ';');
    let category = fields.next().unwrap_or(CATEGORY_ERROR);
    let code = fields.next().map(leading_int).unwrap_or(0);
    let message = fields.next().unwrap_or(DEFAULT_MESSAGE);
    let params = non_empty(fields.next())
        .map(|params| params.split(',').map(str::to_owned).collect())
        .unwrap_or_default();

    LiveUpdateResponse {
        status: category == CATEGORY_MESSAGE,
        category: category.to_owned(),
        code: ResponseCode::new(code),
        message: message.to_owned(),
        params,
    }
}

/// Serialize a response back into the wire grammar.
pub fn encode_wire_response(response: &LiveUpdateResponse) -> String {
    format!(
        "{};{};{};{}",
        response.category,
        response.code.as_i32(),
        response.message,
        response.params.join(",")
    )
}

/// Build a response that never crossed the network.
///
/// Empty `category`/`message` fall back to the same defaults as
/// [`decode_wire_response`].
pub fn synthesize_local(
    status: bool,
    category: &str,
    code: i32,
    message: &str,
    params: Vec<String>,
) -> LiveUpdateResponse {
    LiveUpdateResponse {
        status,
        category: non_empty(Some(category))
            .unwrap_or(CATEGORY_ERROR)
            .to_owned(),
        code: ResponseCode::new(code),
        message: non_empty(Some(message)).unwrap_or(DEFAULT_MESSAGE).to_owned(),
        params,
    }
}

/// Failed response for a request rejected before it was sent.
pub fn local_error(message: &str) -> LiveUpdateResponse {
    synthesize_local(false, CATEGORY_ERROR, 0, message, Vec::new())
}

/// Wire body standing in for a failed HTTP exchange: `ERROR;0;<reason>`.
///
/// `;` in the reason is replaced with `,` so it stays in the message field.
pub fn synthesize_error_body(reason: &str) -> String {
    format!("{CATEGORY_ERROR};0;{}", reason.replace(';', ","))
}

fn non_empty(field: Option<&str>) -> Option<&str> {
    field.filter(|value| !value.is_empty())
}

/// Leading optionally-signed integer, saturating at the `i32` bounds.
fn leading_int(field: &str) -> i32 {
    let field = field.trim_start();
    let (negative, digits) = match field.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, field.strip_prefix('+').unwrap_or(field)),
    };
    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, digit| {
            acc.saturating_mul(10)
                .saturating_add(i64::from(digit - b'0'))
                .min(i64::from(i32::MAX) + 1)
        });
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn decodes_success_without_params() {
        let parsed = decode_wire_response("MESSAGE;14;Not blacklisted;");
        assert!(parsed.status);
        assert_eq!(parsed.category, "MESSAGE");
        assert_eq!(parsed.code, ResponseCode::new(14));
        assert_eq!(parsed.message, "Not blacklisted");
        assert!(parsed.params.is_empty());
    }

    #[test]
    fn decodes_error_with_params() {
        let parsed = decode_wire_response("ERROR;30;Permission denied;a,b,c");
        assert!(!parsed.status);
        assert_eq!(parsed.category, "ERROR");
        assert_eq!(parsed.code.as_i32(), 30);
        assert_eq!(parsed.message, "Permission denied");
        assert_eq!(parsed.params, vec!["a", "b", "c"]);
    }

    #[test]
    fn decodes_empty_body_to_defaults() {
        let parsed = decode_wire_response("");
        assert_eq!(
            parsed,
            LiveUpdateResponse {
                status: false,
                category: "ERROR".to_owned(),
                code: ResponseCode::new(0),
                message: "Unknown Error".to_owned(),
                params: Vec::new(),
            }
        );
    }

    #[test]
    fn decodes_partial_bodies() {
        let parsed = decode_wire_response("MESSAGE;12");
        assert!(parsed.status);
        assert_eq!(parsed.code.as_i32(), 12);
        assert_eq!(parsed.message, "Unknown Error");
        assert!(parsed.params.is_empty());

        let parsed = decode_wire_response("MESSAGE;abc;Done");
        assert_eq!(parsed.code.as_i32(), 0);
        assert_eq!(parsed.message, "Done");
    }

    #[test]
    fn present_empty_fields_are_kept() {
        let parsed = decode_wire_response("MESSAGE;14;;");
        assert!(parsed.status);
        assert_eq!(parsed.code.as_i32(), 14);
        assert_eq!(parsed.message, "");
        assert!(parsed.params.is_empty());

        let parsed = decode_wire_response(";;");
        assert_eq!(parsed.category, "");
        assert!(!parsed.status);
        assert_eq!(parsed.code.as_i32(), 0);
        assert_eq!(parsed.message, "");
    }

    #[test]
    fn code_reads_leading_integer() {
        assert_eq!(decode_wire_response("MESSAGE;13abc;x").code.as_i32(), 13);
        assert_eq!(decode_wire_response("ERROR; -7 ;x").code.as_i32(), -7);
        assert_eq!(decode_wire_response("ERROR;+5;x").code.as_i32(), 5);
        assert_eq!(decode_wire_response("ERROR;;x").code.as_i32(), 0);
        assert_eq!(
            decode_wire_response("ERROR;99999999999;x").code.as_i32(),
            i32::MAX
        );
        assert_eq!(
            decode_wire_response("ERROR;-99999999999;x").code.as_i32(),
            i32::MIN
        );
    }

    #[test]
    fn decode_strips_only_trailing_line_break() {
        let parsed = decode_wire_response("MESSAGE;13;Blacklisted;1;2\r\n");
        assert_eq!(parsed.category, "MESSAGE");
        assert_eq!(parsed.params, vec!["1;2"]);

        let parsed = decode_wire_response(" MESSAGE;13; padded ;1,2 \n");
        assert_eq!(parsed.category, " MESSAGE");
        assert!(!parsed.status);
        assert_eq!(parsed.message, " padded ");
        assert_eq!(parsed.params, vec!["1", "2 "]);
    }

    #[test]
    fn line_break_only_body_decodes_to_defaults() {
        assert_eq!(decode_wire_response("\r\n"), decode_wire_response(""));
    }

    #[test]
    fn status_requires_exact_message_category() {
        assert!(!decode_wire_response("message;1;lowercase").status);
        assert!(!decode_wire_response("WARNING;1;other").status);
    }

    fn field() -> impl Strategy<Value = String> {
        "[^;,\r\n]{0,12}"
    }

    prop_compose! {
        fn wire_response()(
            category in prop_oneof![
                Just(CATEGORY_MESSAGE.to_owned()),
                Just(CATEGORY_ERROR.to_owned()),
                field(),
            ],
            code in any::<i32>(),
            message in "[^;\r\n]{0,24}",
            params in prop::collection::vec(field(), 0..5),
        ) -> LiveUpdateResponse {
            // A lone empty param encodes exactly like no params at all.
            let params = if params.len() == 1 && params[0].is_empty() {
                Vec::new()
            } else {
                params
            };
            LiveUpdateResponse {
                status: category == CATEGORY_MESSAGE,
                category,
                code: ResponseCode::new(code),
                message,
                params,
            }
        }
    }

    proptest! {
        #[test]
        fn encode_then_decode_preserves_every_field(response in wire_response()) {
            let raw = encode_wire_response(&response);
            prop_assert_eq!(decode_wire_response(&raw), response);
        }
    }

    #[test]
    fn blank_message_and_padded_params_survive_encode_then_decode() {
        for response in [
            synthesize_local(true, "MESSAGE", 13, "x", vec!["1".to_owned(), "2 ".to_owned()]),
            LiveUpdateResponse {
                status: true,
                category: "MESSAGE".to_owned(),
                code: ResponseCode::new(14),
                message: String::new(),
                params: Vec::new(),
            },
        ] {
            let raw = encode_wire_response(&response);
            assert_eq!(decode_wire_response(&raw), response);
        }
    }

    #[test]
    fn synthesize_local_applies_defaults() {
        let resp = synthesize_local(false, "", 7, "", vec!["x".to_owned()]);
        assert!(!resp.status);
        assert_eq!(resp.category, "ERROR");
        assert_eq!(resp.code.as_i32(), 7);
        assert_eq!(resp.message, "Unknown Error");
        assert_eq!(resp.params, vec!["x"]);

        let resp = local_error("Invalid Phone Number.");
        assert!(resp.is_error());
        assert_eq!(resp.code.as_i32(), 0);
        assert!(resp.params.is_empty());
    }

    #[test]
    fn synthesized_error_bodies_decode_as_errors() {
        let body = synthesize_error_body("Unexpected HTTP code 503");
        assert_eq!(body, "ERROR;0;Unexpected HTTP code 503");

        let body = synthesize_error_body("dns error; host not found");
        let parsed = decode_wire_response(&body);
        assert!(!parsed.status);
        assert_eq!(parsed.message, "dns error, host not found");
        assert!(parsed.params.is_empty());
    }
}
