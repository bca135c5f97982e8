//! HTML escaping for user-supplied code
//!
//! User code is interpolated into history cards as markup, so every
//! metacharacter must be neutralized before it reaches the view layer.

/// Escape the full HTML entity set.
///
/// `&` is replaced first so already-escaped entities are not double-broken.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tags_are_neutralized() {
        assert_eq!(
            escape_html("<script>alert(1)</script>"),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn quotes_and_ampersands_are_escaped() {
        assert_eq!(escape_html(r#"a < b && c > "d""#), "a &lt; b &amp;&amp; c &gt; &quot;d&quot;");
        assert_eq!(escape_html("it's"), "it&#x27;s");
    }

    #[test]
    fn plain_code_is_untouched() {
        assert_eq!(escape_html("print(42)"), "print(42)");
    }
}
