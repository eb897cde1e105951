//! Textual markers recognised in source files.
//!
//! Every pattern is applied to one line at a time. Calls split across lines are
//! not recognised.

use std::sync::OnceLock;

use regex::Regex;

fn bundle_class_reference() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\\(\w+Asset)").expect("invalid bundle class regex"))
}

fn render_call() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"render\((.*?)(\)|,)").expect("invalid render regex"))
}

fn asset_register_call() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(\w+Asset)::register").expect("invalid asset register regex")
    })
}

/// Returns true when a source root names a bundle class (`yii\web\YiiAsset`)
/// rather than a file or directory.
pub fn is_bundle_class_reference(value: &str) -> bool {
    bundle_class_reference().is_match(value)
}

/// View name passed to the first `render(...)` call on the line.
///
/// The argument must be longer than two characters; its surrounding quotes are
/// dropped, so `render('index', [...])` yields `index`. Calls with a variable or
/// empty string argument yield nothing useful and are ignored.
pub fn rendered_view(line: &str) -> Option<String> {
    let caps = render_call().captures(line)?;
    let argument = caps.get(1)?.as_str();
    if argument.len() <= 2 {
        return None;
    }

    let trimmed = argument.trim();
    let mut chars = trimmed.chars();
    chars.next()?;
    chars.next_back()?;
    let view = chars.as_str();
    (!view.is_empty()).then(|| view.to_string())
}

/// Short class name of the first `<Name>Asset::register` call on the line.
pub fn registered_bundle(line: &str) -> Option<&str> {
    asset_register_call()
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
