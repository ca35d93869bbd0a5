// Extraction from captured chord pages, through to the rendered view

use chord_reflow::extract::FixtureDocument;
use chord_reflow::{extract, view, ReflowConfig, Section};

const CHORDS_PAGE: &str = include_str!("fixtures/chords_page.xhtml");
const UNLABELED_PAGE: &str = include_str!("fixtures/unlabeled_page.xhtml");
const TAB_PAGE: &str = include_str!("fixtures/tab_page.xhtml");

#[test]
fn test_chords_page_metadata() {
    let doc = FixtureDocument::parse(CHORDS_PAGE).expect("fixture should parse");
    let song = extract(&doc, &ReflowConfig::default()).expect("chords page should be applicable");

    assert_eq!(song.title, "Fast Car");
    assert_eq!(song.artist, "Tracy Chapman");
}

#[test]
fn test_chords_page_sections() {
    let doc = FixtureDocument::parse(CHORDS_PAGE).unwrap();
    let song = extract(&doc, &ReflowConfig::default()).unwrap();

    let titles: Vec<&str> = song.sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["", "Intro", "Verse 1", "Chorus", "Outro"]);

    // Chord definitions before the first label
    assert!(song.sections[0].content.starts_with(r#"<span data-name="Cmaj7">Cmaj7</span>"#));
    assert!(!song.sections[0].content.contains("[Intro]"));

    // A bracketed chord is content, not a label
    assert!(song.sections[3].content.ends_with(r#"[<span data-name="Em">Em</span>]"#));

    // Trailing label with nothing after it
    assert_eq!(song.sections[4], Section::new("Outro", ""));
}

#[test]
fn test_chord_spans_survive_into_view() {
    let config = ReflowConfig::default();
    let doc = FixtureDocument::parse(CHORDS_PAGE).unwrap();
    let song = extract(&doc, &config).unwrap();
    let html = view::build(&song, &config).expect("view should render");

    assert_eq!(html.matches("<section class=\"reflow-section\">").count(), 5);
    assert_eq!(
        html.matches(r#"<span data-name="Cmaj7">"#).count(),
        CHORDS_PAGE.matches(r#"<span data-name="Cmaj7">"#).count()
    );
    assert!(html.contains(r#"<h2 class="reflow-section-title">Verse 1</h2>"#));
    assert!(html.contains(r#"<h1 class="reflow-title">Fast Car</h1>"#));
}

#[test]
fn test_unlabeled_page_splits_on_blank_lines() {
    let doc = FixtureDocument::parse(UNLABELED_PAGE).unwrap();
    let song = extract(&doc, &ReflowConfig::default()).unwrap();

    assert_eq!(song.title, "Old Folk Song");
    assert_eq!(song.artist, "Unknown");
    assert_eq!(song.sections.len(), 3);
    assert!(song.sections.iter().all(|s| s.title.is_empty()));
    assert!(song.sections[1].content.ends_with("Where the water runs cold"));
    assert!(song.sections[2].content.ends_with("And the night is long"));
}

#[test]
fn test_page_without_chord_block_is_not_applicable() {
    let doc = FixtureDocument::parse(TAB_PAGE).unwrap();
    assert!(extract(&doc, &ReflowConfig::default()).is_none());
}

#[test]
fn test_custom_selectors() {
    let config = ReflowConfig {
        markup_selector: "pre.tablature".to_string(),
        title_suffixes: vec![" Tab".to_string()],
        ..ReflowConfig::default()
    };
    let doc = FixtureDocument::parse(TAB_PAGE).unwrap();
    let song = extract(&doc, &config).unwrap();

    assert_eq!(song.title, "Fast Car");
    assert_eq!(song.sections, vec![Section::untitled("e|---0---|")]);
}
