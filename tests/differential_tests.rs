use proptest::collection::vec;
use proptest::prelude::*;
use redline::{Paragraph, RenderMode, ReplaceConfig, RunSplitter, replace_tracked_with};
use redline_naive_oracle::{first_hit, replace_first, split_chars};

// Runs padded with whitespace, and a target cut from anywhere in their
// joined text, so it may start and end in different runs.
fn spanning_case() -> impl Strategy<Value = (Vec<String>, String)> {
    (
        vec("[ ]{0,2}[a-z ,]{0,6}[ ]{0,3}", 1..6),
        any::<prop::sample::Index>(),
        1usize..14,
    )
        .prop_filter("paragraph has text", |(texts, _, _)| {
            texts.iter().any(|text| !text.is_empty())
        })
        .prop_map(|(texts, from, len)| {
            let joined = texts.concat();
            let a = from.index(joined.len());
            let b = (a + len).min(joined.len());
            let target = joined[a..b].to_string();
            (texts, target)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(proptest_config::cases()))]

    #[test]
    fn differential_replacement(
        (texts, target) in spanning_case(),
        replacement in proptest::option::of("[A-Z]{0,4}"),
        exact in any::<bool>(),
    ) {
        let runs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let config = if exact { ReplaceConfig::exact() } else { ReplaceConfig::default() };

        let mut paragraph = Paragraph::with_runs(runs.iter().copied());
        let ids: Vec<_> = paragraph.runs().map(|run| run.id).collect();
        let outcome = replace_tracked_with(&mut paragraph, &target, replacement.as_deref(), &config);
        let expected = replace_first(&runs, &target, replacement.as_deref());

        prop_assert_eq!(Some(paragraph.text()), expected, "current text should match the naive oracle");
        prop_assert_eq!(paragraph.render(RenderMode::Original), runs.concat());

        let ((start_run, start_offset), (end_run, end_offset)) = first_hit(&runs, &target).unwrap();
        let start = outcome.span.start.unwrap();
        let end = outcome.span.end.unwrap();
        prop_assert_eq!((start.run, start.offset), (ids[start_run], start_offset));
        prop_assert_eq!((end.run, end.offset), (ids[end_run], end_offset));
    }

    #[test]
    fn differential_split_on_char_boundaries(text in "\\PC{0,12}", a in 0usize..13, b in 0usize..13) {
        let chars: Vec<char> = text.chars().collect();
        let b = b.min(chars.len());
        let a = a.min(b);
        let byte_a: usize = chars[..a].iter().map(|c| c.len_utf8()).sum();
        let byte_b: usize = chars[..b].iter().map(|c| c.len_utf8()).sum();

        let pieces = RunSplitter::pieces(&text, byte_a, byte_b);
        let (before, matched, after) = split_chars(&text, a, b);
        prop_assert_eq!(pieces.before, before);
        prop_assert_eq!(pieces.matched, matched);
        prop_assert_eq!(pieces.after, after);
    }
}
