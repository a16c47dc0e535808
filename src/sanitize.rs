use lazy_static::lazy_static;
use rand::RngCore;
use regex::Regex;

pub const DEFAULT_TOKEN_BYTES: usize = 32;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

// Escape the five html-significant characters
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

// Shape check only, no mx lookup
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

// Length in chars, empty strings never pass
pub fn is_valid_length(text: &str, min: usize, max: usize) -> bool {
    let len = text.chars().count();
    len > 0 && len >= min && len <= max
}

// `len_bytes` random bytes as lowercase hex (2 chars per byte)
pub fn generate_secure_token(len_bytes: usize) -> String {
    let mut bytes = vec![0u8; len_bytes];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
