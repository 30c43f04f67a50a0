//! Names with a fixed meaning in formulas: Greek letter spellings, function names and constants.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Maps the spelled-out names of Greek letters to their LaTeX symbols.
///
/// Both the English and the Italian spellings are accepted (`theta` and `teta`, `xi` and `csi`).
/// Capital letters that look identical to a Latin capital map to that Latin letter, since LaTeX
/// has no separate symbol for them.
pub static GREEK: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("alfa", r"\alpha"), ("alpha", r"\alpha"),
        ("beta", r"\beta"),
        ("gamma", r"\gamma"),
        ("delta", r"\delta"),
        ("epsilon", r"\epsilon"),
        ("zeta", r"\zeta"),
        ("eta", r"\eta"),
        ("teta", r"\theta"), ("theta", r"\theta"),
        ("iota", r"\iota"),
        ("kappa", r"\kappa"),
        ("lambda", r"\lambda"),
        ("mi", r"\mu"), ("mu", r"\mu"),
        ("ni", r"\nu"), ("nu", r"\nu"),
        ("csi", r"\xi"), ("xi", r"\xi"),
        ("omicron", "o"),
        ("pi", r"\pi"),
        ("rho", r"\rho"),
        ("sigma", r"\sigma"),
        ("tau", r"\tau"),
        ("ipsilon", r"\upsilon"), ("upsilon", r"\upsilon"),
        ("fi", r"\phi"), ("phi", r"\phi"),
        ("chi", r"\chi"),
        ("psi", r"\psi"),
        ("omega", r"\omega"),

        ("Alfa", "A"), ("Alpha", "A"),
        ("Beta", "B"),
        ("Gamma", r"\Gamma"),
        ("Delta", r"\Delta"),
        ("Epsilon", "E"),
        ("Zeta", "Z"),
        ("Eta", "H"),
        ("Teta", r"\Theta"), ("Theta", r"\Theta"),
        ("Iota", "I"),
        ("Kappa", "K"),
        ("Lambda", r"\Lambda"),
        ("Mi", "M"), ("Mu", "M"),
        ("Ni", "N"), ("Nu", "N"),
        ("Csi", r"\Xi"), ("Xi", r"\Xi"),
        ("Omicron", "O"),
        ("Pi", r"\Pi"),
        ("Rho", "P"),
        ("Sigma", r"\Sigma"),
        ("Tau", "T"),
        ("Ipsilon", r"\Upsilon"), ("Upsilon", r"\Upsilon"),
        ("Fi", r"\Phi"), ("Phi", r"\Phi"),
        ("Chi", "X"),
        ("Psi", r"\Psi"),
        ("Omega", r"\Omega"),
    ])
});

/// Functions that are typeset as LaTeX operators. Matching is case-insensitive.
pub const FUNCTIONS: [&str; 5] = ["sin", "cos", "tan", "log", "ln"];

/// Returns the LaTeX symbol of the given Greek letter spelling, if it is one.
pub fn greek(name: &str) -> Option<&'static str> {
    GREEK.get(name).copied()
}

/// Returns true if the name is one of the [`FUNCTIONS`].
pub fn is_function(name: &str) -> bool {
    FUNCTIONS.iter().any(|func| func.eq_ignore_ascii_case(name))
}

/// Returns the value of a built-in constant, matched case-insensitively.
pub fn constant(name: &str) -> Option<&'static str> {
    if name.eq_ignore_ascii_case("pi") {
        Some(r"\pi")
    } else if name.eq_ignore_ascii_case("e") {
        Some("e")
    } else {
        None
    }
}

/// Returns how a variable name is displayed in LaTeX: its Greek symbol if it spells one,
/// otherwise the name itself.
pub fn display_name(name: &str) -> &str {
    greek(name).unwrap_or(name)
}
