use std::io::Write;

use quiz_core::model::{Grade, GradeFilter, Language, TermId};
use storage::{JsonFileSource, StorageError, TermSource};

#[test]
fn bundled_glossary_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/glossary.json");
    let corpus = JsonFileSource::new(path).load().expect("load bundled glossary");

    assert!(corpus.len() >= 20);
    for grade in Grade::all() {
        assert!(
            corpus.count_by_grade(GradeFilter::Only(grade)) > 0,
            "no terms for {grade}"
        );
    }
    let allegro = corpus.get(TermId::new(1)).expect("allegro");
    assert_eq!(allegro.term_text(Language::En), "Allegro");
    assert!(allegro.example(Language::Zh).is_some());
}

#[test]
fn file_source_reads_from_disk() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(
        file,
        r#"[{{"id": "3", "term": "Forte", "definition": "Loud", "category": "Dynamics",
             "grade": 1, "termChinese": "强", "definitionChinese": "响亮地"}}]"#
    )
    .expect("write glossary");

    let source = JsonFileSource::new(file.path());
    let corpus = source.load().expect("load");
    assert_eq!(corpus.len(), 1);
    assert_eq!(
        corpus.get(TermId::new(3)).map(|t| t.definition(Language::Zh)),
        Some("响亮地")
    );
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let source = JsonFileSource::new(dir.path().join("absent.json"));
    assert!(matches!(source.load(), Err(StorageError::Io(_))));
}

#[test]
fn skip_invalid_keeps_good_records() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    write!(
        file,
        r#"[{{"id": "1", "term": "Forte", "definition": "Loud", "category": "Dynamics", "grade": 1}},
            {{"id": "x", "term": "Piano", "definition": "Soft", "category": "Dynamics", "grade": 1}}]"#
    )
    .expect("write glossary");

    assert!(JsonFileSource::new(file.path()).load().is_err());
    let corpus = JsonFileSource::new(file.path())
        .with_skip_invalid(true)
        .load()
        .expect("lenient load");
    assert_eq!(corpus.len(), 1);
}
