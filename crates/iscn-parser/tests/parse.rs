use iscn_core::{
    chromosome::{Chromosome, SexChromosome},
    semantic::CloneRole,
};
use iscn_parser::{
    ErrorCode, ParseOptions, Row, Severity, Visitor, parse, parse_strict,
    tree::{Aberration, GainLoss, NumericalChange, RegEventType},
};

/// Collects the chromosomes named by aberrations and numerical changes.
#[derive(Default)]
struct ChromosomeCollector {
    aberrations: Vec<(String, Vec<Chromosome>, Vec<String>)>,
    gains: Vec<Chromosome>,
    losses: Vec<Chromosome>,
}

impl Visitor for ChromosomeCollector {
    fn visit_aberration(&mut self, aberration: &Aberration) {
        let breakpoints = match aberration {
            Aberration::Basic(basic) | Aberration::BasicMisplacedComma(basic) => basic
                .location
                .breakpoints()
                .iter()
                .map(ToString::to_string)
                .collect(),
            _ => Vec::new(),
        };
        self.aberrations.push((
            aberration.keyword().to_string(),
            aberration.chromosomes(),
            breakpoints,
        ));
    }

    fn visit_gain_loss(&mut self, gain_loss: &GainLoss) {
        let Some(chromosome) = &gain_loss.chromosome else {
            return;
        };
        match gain_loss.change {
            NumericalChange::Gain => self.gains.push(**chromosome),
            NumericalChange::Loss => self.losses.push(**chromosome),
            NumericalChange::Undetermined(_) => {}
        }
    }
}

fn collect(row: &Row) -> ChromosomeCollector {
    let mut collector = ChromosomeCollector::default();
    collector.visit_row(row);
    collector
}

#[test]
fn test_canonical_karyotypes_are_clean() {
    let sources = [
        "46,XX",
        "46,XY",
        "47,XY,+21",
        "45,X",
        "46,XY,t(9;22)(q34;q11.2)",
        "46,XX,t(2;5;7)(p21;q23;q22)",
        "46,XX,del(5)(q13q33)",
        "46,XX,inv(9)(p11q13)",
        "47,XXY",
        "46,XX,der(22)t(9;22)(q34;q11.2)",
        "mos 45,X[15]/46,XX[5]",
        "46,XX[20]/47,XX,+8[5]",
        "46,XX,t(9;22)(q34;q11.2)[20]/47,idem,+8[5]",
    ];
    let options = ParseOptions::default();
    for source in sources {
        let outcome = parse(source, &options);
        assert!(
            outcome.is_clean(),
            "`{source}` produced {:?}",
            outcome.annotations()
        );
        assert_eq!(outcome.row.to_string(), source);
    }
}

#[test]
fn test_missing_comma_between_count_and_gender() {
    let outcome = parse("46XX", &ParseOptions::default());

    assert_eq!(outcome.diagnostics.len(), 1);
    let diagnostic = &outcome.diagnostics[0];
    assert_eq!(diagnostic.severity(), Severity::Warning);
    assert_eq!(diagnostic.code(), Some(ErrorCode::E300));
    assert_eq!(diagnostic.offset(), 2);
    assert_eq!(diagnostic.length(), 2);
    assert_eq!(diagnostic.annotation(), "4|Missing a comma before 'XX'");
    assert_eq!(outcome.row.to_string(), "46,XX");
}

#[test]
fn test_deletion_notations_expose_same_parts() {
    let options = ParseOptions::default();
    let short = collect(&parse("46,XX,del(5)(q13q33)", &options).row);
    let detailed = collect(&parse("46,XX,del(5q13q33)", &options).row);

    assert_eq!(short.aberrations, detailed.aberrations);
    let (keyword, chromosomes, breakpoints) = &short.aberrations[0];
    assert_eq!(keyword, "del");
    assert_eq!(chromosomes, &vec![Chromosome::Numbered(5)]);
    assert_eq!(breakpoints, &vec!["q13".to_string(), "q33".to_string()]);
}

#[test]
fn test_three_way_translocation() {
    let outcome = parse("46,XX,t(2;5;7)(p21;q23;q22)", &ParseOptions::default());
    assert!(outcome.is_clean());

    let collected = collect(&outcome.row);
    assert_eq!(
        collected.aberrations[0].1,
        vec![
            Chromosome::Numbered(2),
            Chromosome::Numbered(5),
            Chromosome::Numbered(7)
        ]
    );
}

#[test]
fn test_sex_chromosome_loss_does_not_need_gender() {
    let options = ParseOptions::default();
    for source in ["45,X,-X", "45,-X"] {
        let outcome = parse(source, &options);
        assert!(
            outcome.is_clean(),
            "`{source}` produced {:?}",
            outcome.annotations()
        );
    }

    let outcome = parse("45,-X", &options);
    let collected = collect(&outcome.row);
    assert_eq!(collected.losses, vec![Chromosome::Sex(SexChromosome::X)]);
    assert!(outcome.row.clones()[0].sex_chromosomes.contains(SexChromosome::X));
}

#[test]
fn test_missing_gender_is_reported_for_autosomes() {
    let outcome = parse("46,+8", &ParseOptions::default());
    assert_eq!(outcome.annotations(), vec!["2|Missing gender in clone # 1"]);
    assert_eq!(collect(&outcome.row).gains, vec![Chromosome::Numbered(8)]);
}

#[test]
fn test_bracket_errors_select_matching_shape() {
    let cases = [
        (
            "46,XX,del5)(q13)",
            "11|Missing '(' for chromosome list '5'",
        ),
        (
            "46,XX,t(9;22(q34;q11.2)",
            "12|Missing ')' for chromosome list '9;22'",
        ),
        (
            "46,XX,del(5)q13",
            "15|Missing '()' for breakpoints list 'q13'",
        ),
        (
            "46,XX,del[5](q13)",
            "12|Wrong bracket format for chromosome list '5', expecting '()'",
        ),
    ];
    let options = ParseOptions::default();
    for (source, expected) in cases {
        let outcome = parse(source, &options);
        assert_eq!(outcome.annotations(), vec![expected], "for `{source}`");
        assert!(!outcome.is_rejected());
    }
}

#[test]
fn test_corrected_rows_print_canonically() {
    let cases = [
        ("47,XX+21", "47,XX,+21"),
        ("46,XX,+21,,+8", "46,XX,+21,+8"),
        ("46,XX,del5)(q13)", "46,XX,del(5)(q13)"),
        ("46,XX,t(9,22)(q34;q11.2)", "46,XX,t(9;22)(q34;q11.2)"),
        ("46,XX//47,XY", "46,XX/47,XY"),
        ("46,XX;47,XY", "46,XX/47,XY"),
        ("46,XX47,XY,+21", "46,XX/47,XY,+21"),
    ];
    let options = ParseOptions::default();
    for (source, canonical) in cases {
        let outcome = parse(source, &options);
        assert!(!outcome.is_clean(), "`{source}` should be corrected");
        assert_eq!(outcome.row.to_string(), canonical);

        let reparsed = parse(canonical, &options);
        assert!(reparsed.is_clean(), "`{canonical}` should be clean");
        assert_eq!(reparsed.row.to_string(), canonical);
    }
}

#[test]
fn test_clone_roles() {
    let options = ParseOptions::default();

    let outcome = parse("46,XX,t(9;22)(q34;q11.2)[20]/47,idem,+8[5]", &options);
    let roles: Vec<_> = outcome.row.clones().iter().map(|c| c.role).collect();
    assert_eq!(roles, vec![CloneRole::First, CloneRole::Idem]);
    assert!(matches!(outcome.row, Row::Sequence(_)));

    let outcome = parse("46,XX,+8[10]/47,sl,+9[5]", &options);
    let roles: Vec<_> = outcome.row.clones().iter().map(|c| c.role).collect();
    assert_eq!(roles, vec![CloneRole::Stemline, CloneRole::Sideline]);
    assert!(matches!(outcome.row, Row::Lineage(_)));
}

#[test]
fn test_undetermined_prefix_keeps_event() {
    let outcome = parse("46,XX,+-7", &ParseOptions::default());
    assert_eq!(
        outcome.annotations(),
        vec!["9|Undetermined prefix '+-' before '7', cannot use both '-' and '+'"]
    );

    let event = &outcome.row.clones()[0].body.events[0];
    let interpretation = &event.event.interpretations[0];
    assert!(matches!(
        &**interpretation,
        RegEventType::GainLoss(GainLoss {
            change: NumericalChange::Undetermined(_),
            ..
        })
    ));
}

#[test]
fn test_rejected_input_has_single_error() {
    let options = ParseOptions::default();
    for source in ["hello", "", "46,XX)"] {
        let outcome = parse(source, &options);
        assert!(outcome.is_rejected(), "`{source}` should be rejected");
        assert_eq!(outcome.diagnostics.len(), 1);

        let diagnostic = &outcome.diagnostics[0];
        assert!(diagnostic.severity().is_error());
        assert_eq!(diagnostic.code(), Some(ErrorCode::E203));
        assert_eq!(diagnostic.marker(), -1);
        assert_eq!(outcome.row.to_string(), source);
    }
}

#[test]
fn test_parse_strict() {
    let options = ParseOptions::default();

    let row = parse_strict("47,XY,+21", &options).expect("clean karyotype");
    assert_eq!(row.clones().len(), 1);

    let err = parse_strict("hello", &options).unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(err.diagnostics().len(), 1);
}

#[test]
fn test_memoization_does_not_change_results() {
    let memoized = ParseOptions::default();
    let plain = ParseOptions {
        memoize: false,
        ..ParseOptions::default()
    };
    for source in [
        "46,XX,der(22)t(9;22)(q34;q11.2),+8/47,idem,+21",
        "46,XX47,XY,t(9;22(q34;q11.2)",
        "46,XX,del(5),(q13)",
    ] {
        let a = parse(source, &memoized);
        let b = parse(source, &plain);
        assert_eq!(a.row, b.row, "for `{source}`");
        assert_eq!(a.annotations(), b.annotations(), "for `{source}`");
    }
}
