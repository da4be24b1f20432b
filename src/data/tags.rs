use std::iter::Peekable;
use std::str::Chars;

// ---------------------------------------------------------------------------
// Tag field parser
// ---------------------------------------------------------------------------

/// Parse a raw `tags` cell into normalized tag names.
///
/// The cell holds a textual mapping of tag name → vote weight, e.g.
/// `{'Puzzle': 1025, "Open World": 300}`. Keys are returned lowercased and
/// trimmed, in their original order. Anything that is not a well-formed
/// mapping literal yields an empty list.
pub fn parse_tags(raw: &str) -> Vec<String> {
    parse_mapping_keys(raw).unwrap_or_default()
}

/// Lowercase + trim, the form every tag comparison works on.
pub fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase()
}

fn parse_mapping_keys(raw: &str) -> Option<Vec<String>> {
    let mut cur = Cursor::new(raw);

    cur.skip_ws();
    cur.expect('{')?;

    let mut keys: Vec<String> = Vec::new();
    loop {
        cur.skip_ws();
        if cur.eat('}') {
            break;
        }

        let key = normalize_tag(&cur.key()?);
        cur.skip_ws();
        cur.expect(':')?;
        cur.skip_ws();
        cur.value()?;
        cur.skip_ws();

        // A repeated key keeps its first position, as in a mapping.
        if !keys.contains(&key) {
            keys.push(key);
        }

        if cur.eat(',') {
            continue;
        }
        cur.expect('}')?;
        break;
    }

    cur.skip_ws();
    cur.at_end().then_some(keys)
}

/// Character cursor over the mapping literal.
struct Cursor<'a> {
    chars: Peekable<Chars<'a>>,
}

impl<'a> Cursor<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            chars: s.chars().peekable(),
        }
    }

    fn skip_ws(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    fn eat(&mut self, c: char) -> bool {
        self.chars.next_if_eq(&c).is_some()
    }

    fn expect(&mut self, c: char) -> Option<()> {
        self.eat(c).then_some(())
    }

    fn at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    /// A key is a quoted string, a number or `True`/`False`/`None`. Numbers come
    /// back in canonical form (`1_000` → `1000`, `0x1F` → `31`, `1.50` → `1.5`).
    fn key(&mut self) -> Option<String> {
        match *self.chars.peek()? {
            '\'' | '"' => self.quoted(),
            'T' | 'F' | 'N' => self.keyword(),
            _ => self.number(),
        }
    }

    fn value(&mut self) -> Option<()> {
        match *self.chars.peek()? {
            '\'' | '"' => self.quoted().map(|_| ()),
            'T' | 'F' | 'N' => self.keyword().map(|_| ()),
            _ => self.number().map(|_| ()),
        }
    }

    fn quoted(&mut self) -> Option<String> {
        let quote = self.chars.next()?;
        let mut out = String::new();
        loop {
            match self.chars.next()? {
                c if c == quote => return Some(out),
                '\\' => match self.chars.next()? {
                    'n' => out.push('\n'),
                    't' => out.push('\t'),
                    'r' => out.push('\r'),
                    c @ ('\\' | '\'' | '"') => out.push(c),
                    other => {
                        out.push('\\');
                        out.push(other);
                    }
                },
                '\n' => return None,
                c => out.push(c),
            }
        }
    }

    fn number(&mut self) -> Option<String> {
        let mut text = String::new();
        while let Some(c) = self
            .chars
            .next_if(|c| c.is_ascii_alphanumeric() || matches!(*c, '.' | '-' | '+' | '_'))
        {
            text.push(c);
        }
        canonical_number(&text)
    }

    fn keyword(&mut self) -> Option<String> {
        let mut word = String::new();
        while let Some(c) = self.chars.next_if(|c| c.is_ascii_alphabetic()) {
            word.push(c);
        }
        matches!(word.as_str(), "True" | "False" | "None").then_some(word)
    }
}

/// Validate a numeric literal and render it in canonical form.
///
/// Accepts an optional sign, `_` digit separators, `0x`/`0o`/`0b` integers,
/// decimal integers without leading zeros, and decimal floats.
fn canonical_number(text: &str) -> Option<String> {
    let (negative, body) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    if body.is_empty()
        || body.starts_with('_')
        || body.ends_with('_')
        || body.contains("__")
    {
        return None;
    }
    let body = body.replace('_', "").to_ascii_lowercase();

    let radix = match body.get(..2) {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    let signed = |value: i128| if negative { -value } else { value };

    if let Some(radix) = radix {
        let digits = &body[2..];
        if !digits.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return None;
        }
        let value = i128::from_str_radix(digits, radix).ok()?;
        return Some(signed(value).to_string());
    }

    if body.bytes().all(|b| b.is_ascii_digit()) {
        // `0` and `000` are fine, `007` is not.
        if body.starts_with('0') && body.bytes().any(|b| b != b'0') {
            return None;
        }
        let value: i128 = body.parse().ok()?;
        return Some(signed(value).to_string());
    }

    let is_float_text = body.bytes().any(|b| b.is_ascii_digit())
        && body
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'+' | b'-'));
    if !is_float_text {
        return None;
    }
    let value: f64 = body.parse().ok()?;
    let value = if negative { -value } else { value };
    if value.fract() == 0.0 && value.abs() < 1e16 {
        Some(format!("{value:.1}"))
    } else {
        Some(value.to_string())
    }
}
