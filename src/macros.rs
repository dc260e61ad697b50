// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression — works for literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // String-type concatenation shorthand!
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

#[macro_export]
macro_rules! opt_s {
    // Optional-string shorthand: trimmed, None when blank.
    ($expr:expr) => {{
        let v = &$expr;
        let t: &str = ::std::convert::AsRef::<str>::as_ref(v).trim();
        if t.is_empty() { None } else { Some(::std::string::String::from(t)) }
    }};
}
