//! Fuzz target: `ScriptLine::parse`
//!
//! Feeds arbitrary UTF-8 lines to the tokenizer and verifies:
//! - No panics on any input
//! - A parsed line re-tokenizes from its own `Display` form to the same
//!   command and word count
//!
//! cargo fuzz run fuzz_script_line

#![no_main]

use libfuzzer_sys::fuzz_target;

use cncconf::adapters::script::ScriptLine;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Some(line) = text.lines().next() else {
        return;
    };
    let Ok(Some(parsed)) = ScriptLine::parse(line) else {
        return;
    };
    // Over-long digit runs parse to infinity, which has no numeric form.
    let infinite = parsed
        .args
        .words()
        .iter()
        .any(|w| w.value.is_some_and(|v| !v.is_finite()));
    if parsed.text.is_some() || infinite {
        return;
    }

    let shown = parsed.to_string();
    if let Ok(Some(again)) = ScriptLine::parse(&shown) {
        assert_eq!((again.letter, again.code), (parsed.letter, parsed.code));
        assert_eq!(again.args.words().len(), parsed.args.words().len(), "{shown:?}");
    }
});
