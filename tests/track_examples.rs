use redline::{
    Node, Paragraph, RenderMode, Run, RunFormat, replace_tracked, text_ends_in_paragraph,
    text_starts_in_paragraph,
};

fn shape(paragraph: &Paragraph) -> Vec<String> {
    paragraph
        .children()
        .iter()
        .map(|node| match node {
            Node::Run(run) => format!("run:{}", run.text()),
            Node::Insertion(insertion) => format!("ins:{}", insertion.text()),
            Node::Deletion(deletion) => format!("del:{}", deletion.deleted_text()),
            Node::Opaque(opaque) => format!("opaque:{}", opaque.tag),
        })
        .collect()
}

#[test]
fn test_replace_second_run() {
    let mut paragraph = Paragraph::with_runs(["Hello ", "world"]);
    replace_tracked(&mut paragraph, "world", Some("earth"));

    assert_eq!(paragraph.text(), "Hello earth");
    assert_eq!(paragraph.render(RenderMode::Original), "Hello world");
    assert_eq!(shape(&paragraph), vec!["run:Hello ", "ins:earth", "del:world"]);
}

#[test]
fn test_replace_span_across_runs_reports_offsets() {
    let mut paragraph = Paragraph::with_runs(["The quick ", "brown fox"]);
    let ids: Vec<_> = paragraph.runs().map(|run| run.id).collect();
    let outcome = replace_tracked(&mut paragraph, "quick brown", Some("slow"));

    let start = outcome.span.start.unwrap();
    let end = outcome.span.end.unwrap();
    assert_eq!((start.run, start.offset), (ids[0], 4));
    assert_eq!((end.run, end.offset), (ids[1], 4));

    assert_eq!(paragraph.text(), "The slow fox");
    let deletion = paragraph.deletion(outcome.deletion).unwrap();
    let deleted: Vec<_> = deletion.runs().iter().map(Run::text).collect();
    assert_eq!(deleted, vec!["quick ", "brown"]);
    assert_eq!(paragraph.run(ids[0]).unwrap().text(), "The ");
    assert_eq!(paragraph.run(ids[1]).unwrap().text(), " fox");
}

#[test]
fn test_starts_in_paragraph_via_suffix() {
    let paragraph = Paragraph::with_runs(["Look at ", "the fox"]);
    assert!(text_starts_in_paragraph(&paragraph, "fox jumps"));
    assert!(!text_starts_in_paragraph(&paragraph, "dog jumps"));
}

#[test]
fn test_ends_in_paragraph_via_prefix() {
    let paragraph = Paragraph::with_runs(["Start here", " and more"]);
    assert!(text_ends_in_paragraph(&paragraph, "the end. Start here"));
    assert!(!text_ends_in_paragraph(&paragraph, "the end. Finish here"));
}

#[test]
fn test_absent_target_prepends_deletion() {
    let mut paragraph = Paragraph::with_runs(["nothing ", "to see"]);
    let before: Vec<Run> = paragraph.runs().cloned().collect();

    let outcome = replace_tracked(&mut paragraph, "elephant", Some("mouse"));

    assert!(outcome.is_degenerate());
    assert_eq!(outcome.insertion, None);
    assert!(matches!(paragraph.children()[0], Node::Deletion(_)));
    let after: Vec<Run> = paragraph.runs().cloned().collect();
    assert_eq!(before, after);
    assert_eq!(paragraph.text(), "nothing to see");
}

#[test]
fn test_fragments_keep_independent_formatting() {
    let mut paragraph = Paragraph::new();
    let id = paragraph.append(Run::with_format(
        "emphasised words here",
        Some(RunFormat {
            italic: Some(true),
            ..RunFormat::default()
        }),
    ));
    let outcome = replace_tracked(&mut paragraph, "words", Some("terms"));

    // Changing the source run afterwards must not leak into the fragments.
    paragraph.run_mut(id).unwrap().set_italic(Some(false));

    let deletion = paragraph.deletion(outcome.deletion).unwrap();
    assert_eq!(deletion.runs()[0].italic(), Some(true));
    let insertion = paragraph.insertion(outcome.insertion.unwrap()).unwrap();
    assert_eq!(insertion.runs()[0].italic(), Some(true));
    let trailing = paragraph.runs().last().unwrap();
    assert_eq!(trailing.text(), " here");
    assert_eq!(trailing.italic(), Some(true));
}

#[test]
fn test_sequential_replacements_in_one_paragraph() {
    let mut paragraph = Paragraph::with_runs(["red green blue"]);
    replace_tracked(&mut paragraph, "red", Some("cyan"));
    replace_tracked(&mut paragraph, "blue", Some("yellow"));

    assert_eq!(paragraph.text(), "cyan green yellow");
    assert_eq!(paragraph.render(RenderMode::Original), "red green blue");
    assert_eq!(
        paragraph.render(RenderMode::Redline),
        "{+cyan+}[-red-] green {+yellow+}[-blue-]"
    );
}

#[test]
fn test_opaque_children_survive_replacement() {
    let mut paragraph = Paragraph::new();
    paragraph.append(Run::new("before "));
    paragraph.append(redline::Opaque::new("bookmarkStart"));
    paragraph.append(Run::new("target after"));

    replace_tracked(&mut paragraph, "target", Some("goal"));

    assert_eq!(paragraph.text(), "before goal after");
    assert_eq!(
        shape(&paragraph),
        vec![
            "run:before ",
            "opaque:bookmarkStart",
            "ins:goal",
            "del:target",
            "run: after"
        ]
    );
}
