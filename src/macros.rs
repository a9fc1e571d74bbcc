/// Compile a literal pattern once and hand out a `&'static Regex`.
macro_rules! regex {
    ($pat:literal) => {{
        static RE: once_cell::sync::Lazy<regex::Regex> =
            once_cell::sync::Lazy::new(|| regex::Regex::new($pat).unwrap());
        &*RE
    }};
}

/// Evaluate fallback steps in order and stop at the first `Some`.
///
/// ```text
/// first_some!(a, b, c)  ==  a.or_else(|| b).or_else(|| c)
/// ```
macro_rules! first_some {
    ($first:expr $(, $rest:expr)* $(,)?) => {{
        let found = $first;
        $(let found = found.or_else(|| $rest);)*
        found
    }};
}
