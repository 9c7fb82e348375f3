//! Ship selection from the page URL (`?ship=imperial&faction=amarr`).

use catalog::ShipParams;

/// Splits a query string into decoded key/value pairs, in order.
///
/// A leading `?` is ignored. Keys without `=` get an empty value.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .strip_prefix('?')
        .unwrap_or(query)
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (percent_decode(k), percent_decode(v)),
            None => (percent_decode(pair), String::new()),
        })
        .collect()
}

/// First non-empty value for `key`, like `URLSearchParams::get` with a
/// falsy-value fallback.
pub fn query_value<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .filter(|v| !v.is_empty())
}

pub fn ship_params_from_query(query: &str, defaults: &ShipParams) -> ShipParams {
    let pairs = parse_query(query);
    ShipParams {
        ship_id: query_value(&pairs, "ship")
            .unwrap_or(defaults.ship_id.as_str())
            .to_string(),
        faction_id: query_value(&pairs, "faction")
            .unwrap_or(defaults.faction_id.as_str())
            .to_string(),
    }
}

/// Decodes `+` and `%XX` escapes. Malformed escapes are kept literally and
/// invalid UTF-8 is replaced.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                match (hex_val(bytes[i + 1]), hex_val(bytes[i + 2])) {
                    (Some(hi), Some(lo)) => {
                        out.push((hi << 4) | lo);
                        i += 2;
                    }
                    _ => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

fn hex_val(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}
