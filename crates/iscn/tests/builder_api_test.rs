//! Integration tests for the KaryotypeParser API

use iscn::{
    IscnError, KaryotypeParser,
    chromosome::Chromosome,
    config::{AppConfig, ParserConfig, ReportConfig, ReportFormat},
    semantic::{CloneRole, CopyChange},
};

#[test]
fn test_parser_api_exists() {
    let _parser = KaryotypeParser::default();
}

#[test]
fn test_parse_simple_karyotype() {
    let parser = KaryotypeParser::default();
    let result = parser.parse("46,XY,t(9;22)(q34;q11.2)");
    assert!(
        result.is_ok(),
        "Should parse valid karyotype: {:?}",
        result.err()
    );

    let analysis = result.unwrap();
    assert!(analysis.is_clean());
    assert_eq!(analysis.normalized(), "46,XY,t(9;22)(q34;q11.2)");
    assert_eq!(analysis.karyotype.clones[0].aberrations[0].id, "t");
}

#[test]
fn test_corrections_are_reported_not_failed() {
    let parser = KaryotypeParser::default();
    let analysis = parser
        .parse("47,XX+21")
        .expect("Corrected karyotype should parse");

    assert!(!analysis.is_clean());
    assert_eq!(analysis.annotations(), vec!["8|Missing a comma before '+21'"]);
    assert_eq!(analysis.normalized(), "47,XX,+21");
    assert_eq!(
        analysis.karyotype.clones[0].gains,
        vec![CopyChange::single(Chromosome::Numbered(21))]
    );
}

#[test]
fn test_rejected_input_returns_error() {
    let parser = KaryotypeParser::default();
    let err = parser.parse("this is not a karyotype").unwrap_err();

    assert!(err.is_rejection());
    match err {
        IscnError::Parse { err, src } => {
            assert_eq!(src, "this is not a karyotype");
            assert_eq!(err.diagnostics().len(), 1);
            assert_eq!(
                err.diagnostics()[0].annotation(),
                "-1|This is an incorrect input for karyotype parsing."
            );
        }
        IscnError::Io(_) => panic!("Expected Parse error"),
    }
}

#[test]
fn test_strict_mode_fails_on_corrections() {
    let config = AppConfig::new(ParserConfig::new(true, true, 4096), ReportConfig::default());
    let parser = KaryotypeParser::new(config);

    assert!(parser.parse("46,XX").is_ok());

    let err = parser.parse("46XX").unwrap_err();
    assert!(!err.is_rejection());
    assert_eq!(err.to_string(), "warning[E300]: Missing a comma before 'XX'");
}

#[test]
fn test_input_length_limit() {
    let config = AppConfig::new(ParserConfig::new(false, true, 8), ReportConfig::default());
    let parser = KaryotypeParser::new(config);

    assert!(parser.parse("46,XX").is_ok());
    assert!(parser.parse("46,XX,t(9;22)(q34;q11.2)").is_err());
}

#[test]
fn test_memoization_off_gives_same_analysis() {
    let source = "46,XX,der(22)t(9;22)(q34;q11.2)/47,idem,+8";
    let cached = KaryotypeParser::default().parse(source).unwrap();
    let uncached = KaryotypeParser::new(AppConfig::new(
        ParserConfig::new(false, false, 4096),
        ReportConfig::new(ReportFormat::Summary),
    ))
    .parse(source)
    .unwrap();

    assert_eq!(cached.row, uncached.row);
    assert_eq!(cached.karyotype, uncached.karyotype);
}

#[test]
fn test_stemline_and_sidelines() {
    let analysis = KaryotypeParser::default()
        .parse("46,XX,+8[10]/47,sl,+9[5]/48,sdl,+10[3]")
        .expect("Failed to parse");

    let roles: Vec<_> = analysis
        .karyotype
        .clones
        .iter()
        .map(|clone| clone.role)
        .collect();
    assert_eq!(
        roles,
        vec![CloneRole::Stemline, CloneRole::Sideline, CloneRole::Sideline]
    );
    assert_eq!(analysis.karyotype.total_cells(), 18);
}

#[test]
fn test_parser_reusability() {
    let parser = KaryotypeParser::default();

    let first = parser.parse("46,XX").expect("Failed to parse first");
    let second = parser.parse("45,X").expect("Failed to parse second");

    assert_eq!(first.karyotype.clones[0].gender.as_deref(), Some("XX"));
    assert_eq!(second.karyotype.clones[0].gender.as_deref(), Some("X"));
}
