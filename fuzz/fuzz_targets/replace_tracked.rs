#![no_main]

use libfuzzer_sys::fuzz_target;
use redline::{Paragraph, RenderMode, replace_tracked};

// Input layout: runs separated by '|', then a NUL, the target, a NUL and
// the replacement.
fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let mut parts = input.splitn(3, '\0');
    let runs = parts.next().unwrap_or_default();
    let target = parts.next().unwrap_or_default();
    let replacement = parts.next();

    let mut paragraph = Paragraph::with_runs(runs.split('|'));
    let original = paragraph.render(RenderMode::Original);
    let _ = replace_tracked(&mut paragraph, target, replacement);
    assert_eq!(paragraph.render(RenderMode::Original), original);
});
