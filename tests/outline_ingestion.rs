use slidecanvas_lib::{build_outline, tokenize, AppError, OutlinePage};

fn row(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}

#[test]
fn row_count_matches_lines_without_quotes() {
    let text = "a,b,c\nd,e,f\ng,h,i\n";
    assert_eq!(tokenize(text).len(), 3);

    let text = "one\ntwo";
    assert_eq!(tokenize(text).len(), 2);
}

#[test]
fn quoted_value_with_delimiter_is_one_field() {
    let value = "Revenue, costs, and margin";
    let rows = tokenize(&format!("\"{}\"", value));
    assert_eq!(rows, vec![row(&[value])]);
}

#[test]
fn doubled_quote_decodes_to_one_quote() {
    let rows = tokenize("\"a \"\"quoted\"\" word\"");
    assert_eq!(rows[0][0], "a \"quoted\" word");
}

#[test]
fn mixed_line_endings_segment_like_lf() {
    let mixed = "1,A,a\r\n2,B,b\r3,C,c\n4,D,d";
    let lf = "1,A,a\n2,B,b\n3,C,c\n4,D,d";
    assert_eq!(tokenize(mixed), tokenize(lf));
}

#[test]
fn japanese_header_row_is_dropped() {
    let pages = build_outline(&tokenize("スライド番号,タイトル,本文\n1,Intro,Welcome")).unwrap();
    assert_eq!(pages, vec![OutlinePage::new(1, "Intro", "Welcome")]);
}

#[test]
fn two_columns_without_header() {
    let pages = build_outline(&tokenize("A,B\nC,D")).unwrap();
    assert_eq!(
        pages,
        vec![OutlinePage::new(1, "A", "B"), OutlinePage::new(2, "C", "D")]
    );
}

#[test]
fn single_blank_line_is_malformed() {
    assert!(matches!(
        build_outline(&tokenize("\n")),
        Err(AppError::MalformedInput(_))
    ));
}

#[test]
fn single_column_becomes_content() {
    let pages = build_outline(&tokenize("Only content line")).unwrap();
    assert_eq!(pages, vec![OutlinePage::new(1, "", "Only content line")]);
}

#[test]
fn explicit_page_number_is_kept() {
    let pages = build_outline(&tokenize("5,Foo,Bar")).unwrap();
    assert_eq!(pages[0].page_number, 5);
}

#[test]
fn blank_rows_are_excluded() {
    let pages = build_outline(&tokenize("A,B\n  ,  \nC,D")).unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].page_number, 2);
}

#[test]
fn ingested_pages_have_empty_cues() {
    let pages = build_outline(&tokenize("1,Intro,Welcome")).unwrap();
    assert!(pages[0].visual_cue.is_empty());
    assert!(pages[0].emphasis.is_empty());
    assert!(pages[0].mood.is_empty());
}
