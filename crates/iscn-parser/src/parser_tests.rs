//! Unit tests for the karyotype grammar.
//!
//! These tests drive [`crate::parse`] over small karyotypes and check both
//! the tree shape and the exact diagnostics produced for each malformed
//! input.

use iscn_core::{
    chromosome::{Chromosome, SexChromosome},
    semantic::{CloneRole, Mosaicism},
};

use crate::{
    ParseOptions, ParseOutcome,
    error::ErrorCode,
    parse,
    span::Span,
    tree::{
        Aberration, AberrationId, BodyVariant, BracketShape, BreakpointGroup, CellNotation,
        ChromosomeCount, CloneSeparator, Count, DerivativeId, EventKind, KaryotypeBody,
        ListElement, Location, NumericalChange, RegEventType, Row, SeparatorShape, SpecialKind,
        Undecoded,
    },
};

/// Helper function to parse a karyotype with default options
fn parse_source(source: &str) -> ParseOutcome {
    parse(source, &ParseOptions::default())
}

/// Helper function to assert a karyotype parses without diagnostics
fn assert_clean(source: &str) -> Row {
    let outcome = parse_source(source);
    assert!(
        outcome.diagnostics.is_empty(),
        "Expected '{source}' to parse cleanly, got {:?}",
        outcome.annotations()
    );
    outcome.row
}

/// Helper function to assert the exact annotations of a karyotype
fn assert_annotations(source: &str, expected: &[&str]) -> Row {
    let outcome = parse_source(source);
    assert_eq!(
        outcome.annotations(),
        expected,
        "Unexpected diagnostics for '{source}'"
    );
    outcome.row
}

fn first_body(row: &Row) -> &KaryotypeBody {
    row.clones()
        .first()
        .map(|clone| clone.body.inner())
        .expect("row should have a clone")
}

/// Interpretations of the `index`-th event of the first clone.
fn event_types(row: &Row, index: usize) -> Vec<RegEventType> {
    first_body(row).events[index]
        .event
        .interpretations
        .iter()
        .map(|t| t.inner().clone())
        .collect()
}

fn single_aberration(row: &Row, index: usize) -> Aberration {
    match event_types(row, index).as_slice() {
        [RegEventType::Aberration(aberration)] => aberration.clone(),
        other => panic!("expected one aberration, got {other:?}"),
    }
}

// ----------------------------------------------------------------------
// Canonical karyotypes
// ----------------------------------------------------------------------

#[test]
fn test_normal_karyotypes() {
    for source in ["46,XX", "46,XY", "45,X", "47,XXY", "92,XXYY"] {
        let row = assert_clean(source);
        assert!(matches!(row, Row::Sequence(_)));
        assert_eq!(row.to_string(), source);
    }
}

#[test]
fn test_count_and_gender_fields() {
    let row = assert_clean("47,XY,+21");
    let body = first_body(&row);

    assert_eq!(body.variant, BodyVariant::Standard);
    assert_eq!(body.count.as_deref(), Some(&ChromosomeCount::Exact(47)));
    let gender = body.gender().expect("gender");
    assert_eq!(
        gender.complements[0].chromosomes(),
        &[SexChromosome::X, SexChromosome::Y]
    );
    assert!(!gender.constitutional);

    match event_types(&row, 0).as_slice() {
        [RegEventType::GainLoss(gain)] => {
            assert_eq!(gain.change, NumericalChange::Gain);
            assert_eq!(
                gain.chromosome.as_deref(),
                Some(&Chromosome::Numbered(21))
            );
        }
        other => panic!("expected a gain, got {other:?}"),
    }
}

#[test]
fn test_count_range_and_unknown_count() {
    let row = assert_clean("45~48,XX");
    assert_eq!(
        first_body(&row).count.as_deref(),
        Some(&ChromosomeCount::Range { from: 45, to: 48 })
    );

    let row = assert_clean("?,XX");
    assert_eq!(
        first_body(&row).count.as_deref(),
        Some(&ChromosomeCount::Unknown)
    );
}

#[test]
fn test_translocation() {
    let row = assert_clean("46,XY,t(9;22)(q34;q11.2)");
    let Aberration::Basic(translocation) = single_aberration(&row, 0) else {
        panic!("expected a basic aberration");
    };

    assert_eq!(*translocation.id, AberrationId::Translocation);
    assert_eq!(
        translocation.location.chromosomes(),
        vec![Chromosome::Numbered(9), Chromosome::Numbered(22)]
    );
    let breakpoints: Vec<String> = translocation
        .location
        .breakpoints()
        .iter()
        .map(|b| b.to_string())
        .collect();
    assert_eq!(breakpoints, vec!["q34", "q11.2"]);
}

#[test]
fn test_three_way_translocation_without_breakpoints() {
    let row = assert_clean("46,XX,t(2;5;7)");
    let Aberration::Basic(translocation) = single_aberration(&row, 0) else {
        panic!("expected a basic aberration");
    };
    assert_eq!(translocation.location.chromosomes().len(), 3);
    assert!(translocation.location.breakpoints().is_empty());
}

#[test]
fn test_deletion_forms_expose_same_parts() {
    let lists = assert_clean("46,XX,del(5)(q13q33)");
    let detailed = assert_clean("46,XX,del(5q13q33)");

    let (Aberration::Basic(lists), Aberration::Basic(detailed)) =
        (single_aberration(&lists, 0), single_aberration(&detailed, 0))
    else {
        panic!("expected basic aberrations");
    };
    assert!(matches!(lists.location, Location::Lists { .. }));
    assert!(matches!(detailed.location, Location::Detailed(_)));
    assert_eq!(lists.location.chromosomes(), detailed.location.chromosomes());
    assert_eq!(lists.location.breakpoints(), detailed.location.breakpoints());
}

#[test]
fn test_isochromosome_arm_only() {
    let row = assert_clean("46,XX,i(17q)");
    let Aberration::Basic(iso) = single_aberration(&row, 0) else {
        panic!("expected a basic aberration");
    };
    assert_eq!(*iso.id, AberrationId::Isochromosome);
    assert_eq!(iso.location.chromosomes(), vec![Chromosome::Numbered(17)]);
    assert_eq!(iso.location.breakpoints()[0].to_string(), "q");
}

#[test]
fn test_derivative_with_rearrangement() {
    let row = assert_clean("46,XY,der(22)t(9;22)(q34;q11.2)");
    let Aberration::Derivative(derivative) = single_aberration(&row, 0) else {
        panic!("expected a derivative aberration");
    };
    assert_eq!(*derivative.id, DerivativeId::Derivative);
    assert_eq!(derivative.chromosomes(), vec![Chromosome::Numbered(22)]);
    assert!(derivative.breakpoints.is_none());
    assert_eq!(derivative.rearrangements.len(), 1);
    assert_eq!(
        derivative.rearrangements[0].to_string(),
        "t(9;22)(q34;q11.2)"
    );
}

#[test]
fn test_isoderivative_is_not_isochromosome() {
    let row = assert_clean("46,XX,ider(9)(q10)del(9)(q22)");
    let Aberration::Derivative(derivative) = single_aberration(&row, 0) else {
        panic!("expected a derivative aberration");
    };
    assert_eq!(*derivative.id, DerivativeId::Isoderivative);
    assert!(derivative.breakpoints.is_some());
}

#[test]
fn test_uncertain_chromosome() {
    let row = assert_clean("46,XX,add(?5q)");
    let Aberration::Uncertain(uncertain) = single_aberration(&row, 0) else {
        panic!("expected an uncertain aberration");
    };
    assert_eq!(*uncertain.id, AberrationId::Addition);
    assert_eq!(uncertain.to_string(), "add(?5q)");
}

#[test]
fn test_detailed_segments() {
    let row = assert_clean("46,XY,del(1)(pter->q21::q31->qter)");
    let Aberration::Basic(deletion) = single_aberration(&row, 0) else {
        panic!("expected a basic aberration");
    };
    let Location::Lists {
        breakpoints: Some(breakpoints),
        ..
    } = &deletion.location
    else {
        panic!("expected a breakpoints list");
    };
    match &breakpoints.elements[0] {
        ListElement::Single(BreakpointGroup::Detailed(segments)) => assert_eq!(segments.len(), 2),
        other => panic!("expected detailed segments, got {other:?}"),
    }
    assert_eq!(row.to_string(), "46,XY,del(1)(pter->q21::q31->qter)");
}

#[test]
fn test_ambiguous_breakpoint_readings() {
    let row = assert_clean("46,XX,t(9;22)(q34::q33;q11)");
    let Aberration::Basic(translocation) = single_aberration(&row, 0) else {
        panic!("expected a basic aberration");
    };
    let Location::Lists {
        breakpoints: Some(breakpoints),
        ..
    } = &translocation.location
    else {
        panic!("expected a breakpoints list");
    };
    assert!(breakpoints.elements[0].is_ambiguous());
    assert_eq!(breakpoints.elements[0].readings().len(), 2);
}

#[test]
fn test_or_alternatives() {
    let row = assert_clean("46,XX/or/XY");
    assert_eq!(first_body(&row).gender().map(|g| g.complements.len()), Some(2));

    let row = assert_clean("47,XX,+8/or/+9");
    assert_eq!(event_types(&row, 0).len(), 2);
}

#[test]
fn test_derivative_rearrangement_alternatives() {
    let source = "46,XX,der(22)t(9;22)(q34;q11.2)/or/t(9;22)(q34;q11.1)";
    let row = assert_clean(source);
    assert_eq!(row.clones().len(), 1);
    assert_eq!(row.to_string(), source);

    let Aberration::Derivative(derivative) = single_aberration(&row, 0) else {
        panic!("expected a derivative aberration");
    };
    assert_eq!(derivative.rearrangements.len(), 1);
    let alternatives = &derivative.rearrangements[0].alternatives;
    assert_eq!(alternatives.len(), 2);
    assert_eq!(alternatives[1].to_string(), "t(9;22)(q34;q11.1)");
}

#[test]
fn test_markers_and_double_minutes() {
    let row = assert_clean("48,XX,+2mar,+mar1,~10dmin,+?mar");

    match event_types(&row, 0).as_slice() {
        [RegEventType::Undecoded(Undecoded::Marker { count, number, .. })] => {
            assert_eq!(count.as_deref(), Some(&Count::Exact(2)));
            assert_eq!(*number, None);
        }
        other => panic!("expected markers, got {other:?}"),
    }
    match event_types(&row, 1).as_slice() {
        [RegEventType::Undecoded(Undecoded::Marker { number, .. })] => {
            assert_eq!(*number, Some(1));
        }
        other => panic!("expected a numbered marker, got {other:?}"),
    }
    match event_types(&row, 2).as_slice() {
        [RegEventType::Undecoded(Undecoded::DoubleMinute { count, .. })] => {
            assert_eq!(count.as_deref(), Some(&Count::Approximate(10)));
        }
        other => panic!("expected double minutes, got {other:?}"),
    }
    assert!(matches!(
        event_types(&row, 3).as_slice(),
        [RegEventType::UndecodedSpecial(_)]
    ));
}

#[test]
fn test_incomplete_karyotype() {
    let row = assert_clean("46,XX,+8,inc");
    assert_eq!(event_types(&row, 1), vec![RegEventType::Incomplete]);
}

#[test]
fn test_suffix_origin_and_multiplier() {
    let row = assert_clean("47,XY,+21c,dup(1)(q21q32)x2mat");
    assert_eq!(row.to_string(), "47,XY,+21c,dup(1)(q21q32)x2mat");

    let aberration = single_aberration(&row, 1);
    assert_eq!(aberration.suffix().multiplier, Some(2));
}

#[test]
fn test_mosaic_cells_and_modal_number() {
    let row = assert_clean("mos 45,X[5]/46,XX[cp15]");
    let body = first_body(&row);
    assert_eq!(body.mosaicism.as_deref(), Some(&Mosaicism::Mosaic));
    assert_eq!(body.cells.as_ref().map(|c| c.count), Some(5));

    let second = row.clones()[1].body.inner();
    assert!(second.cells.as_ref().is_some_and(|c| c.is_composite()));

    let row = assert_clean("69<3n>,XXY");
    let modal = first_body(&row).modal.as_ref().expect("modal number");
    assert_eq!(modal.level, 3);
    assert_eq!(modal.brackets, BracketShape::Correct);
}

// ----------------------------------------------------------------------
// Clones and rows
// ----------------------------------------------------------------------

#[test]
fn test_idem_clone() {
    let row = assert_clean("46,XX,t(9;22)(q34;q11.2)/47,idem,+8");
    let clones = row.clones();
    assert_eq!(clones.len(), 2);
    assert_eq!(clones[1].role, CloneRole::Idem);
    assert_eq!(clones[1].ordinal, 2);
    assert_eq!(clones[1].body.variant, BodyVariant::Idem);
    assert_eq!(clones[1].body.events[0].kind, EventKind::Idem);
}

#[test]
fn test_stemline_and_sidelines() {
    let row = assert_clean("46,XX,+8/47,sl,+9/48,sdl2x2,+10");
    assert!(matches!(row, Row::Lineage(_)));

    let clones = row.clones();
    assert_eq!(clones[0].role, CloneRole::Stemline);
    assert_eq!(clones[1].body.variant, BodyVariant::StemlineDerived);
    assert_eq!(clones[2].body.variant, BodyVariant::SidelineDerived);
    let special = clones[2].body.special_marker().expect("special marker");
    assert_eq!(special.kind, SpecialKind::Sideline(Some(2)));
    assert_eq!(special.multiplier, Some(2));
}

#[test]
fn test_terminated_row() {
    let row = assert_clean("46,XX.");
    assert!(row.is_terminated());
    assert_eq!(row.to_string(), "46,XX.");
}

#[test]
fn test_clone_records_sex_chromosomes_of_its_events() {
    let row = assert_clean("45,X,-X/46,XX");
    let clones = row.clones();
    assert!(clones[0].sex_chromosomes.contains(SexChromosome::X));
    assert!(clones[1].sex_chromosomes.is_empty());
}

// ----------------------------------------------------------------------
// Recoverable mistakes
// ----------------------------------------------------------------------

#[test]
fn test_missing_comma_before_gender() {
    let row = assert_annotations("46XX", &["4|Missing a comma before 'XX'"]);
    assert_eq!(row.to_string(), "46,XX");
}

#[test]
fn test_comma_mistakes_before_events() {
    assert_annotations("47,XX+21", &["8|Missing a comma before '+21'"]);
    assert_annotations("46,XX,+21,,+8", &["13|Too many commas before '+8'"]);
    assert_annotations("46,,XX", &["6|Too many commas before 'XX'"]);
}

#[test]
fn test_comma_mistakes_before_sideline_markers() {
    for (source, expected) in [
        ("46,XX,+8/47sl,+9", "Missing a comma before 'sl'"),
        ("46,XX,+8/47,,sl,+9", "Too many commas before 'sl'"),
        ("46,XX,+8/47,sl,+9/48,,sdl,+10", "Too many commas before 'sdl'"),
        ("46,XX,+8/47,sl,+9/48sdl,+10", "Missing a comma before 'sdl'"),
    ] {
        let outcome = parse_source(source);
        assert!(
            matches!(outcome.row, Row::Lineage(_)),
            "expected '{source}' to keep its sidelines"
        );
        let messages: Vec<_> = outcome.diagnostics.iter().map(|d| d.message()).collect();
        assert_eq!(messages, vec![expected], "unexpected diagnostics for '{source}'");
    }
}

#[test]
fn test_missing_gender_unless_events_name_sex_chromosomes() {
    assert_annotations("46,+8", &["2|Missing gender in clone # 1"]);
    assert_clean("45,-X");
    assert_clean("45,X,-X");
}

#[test]
fn test_missing_count_and_gender() {
    assert_annotations("XX,+21", &["2|Missing chromosome number in clone # 1"]);
    assert_annotations(
        "+21",
        &["3|Missing chromosome numbers and gender in clone # 1"],
    );
    assert_annotations(
        "46,XX,+8/idem,+9",
        &["13|Missing chromosome number in clone # 2"],
    );
}

#[test]
fn test_bracket_shapes() {
    assert_annotations(
        "46,XX,del5)(q13)",
        &["11|Missing '(' for chromosome list '5'"],
    );
    assert_annotations(
        "46,XX,t(9;22(q34;q11.2)",
        &["12|Missing ')' for chromosome list '9;22'"],
    );
    assert_annotations(
        "46,XX,del(5)q13",
        &["15|Missing '()' for breakpoints list 'q13'"],
    );
    assert_annotations(
        "46,XX,del[5](q13)",
        &["12|Wrong bracket format for chromosome list '5', expecting '()'"],
    );
    assert_annotations(
        "69<3n,XXX",
        &["5|Missing '>' for modal number '3n'"],
    );
    let row = assert_annotations("693n>,XXX", &["5|Missing '<' for modal number '3n'"]);
    assert_eq!(row.to_string(), "69<3n>,XXX");
}

#[test]
fn test_malformed_shapes_of_every_list_kind() {
    use ErrorCode::{E100, E101, E102, E103};

    let cases = [
        ("chromosome list", E100, "46,XX,del5)(q13)"),
        ("chromosome list", E101, "46,XX,t(9;22(q34;q11.2)"),
        ("chromosome list", E102, "46,XX,del5(q13)"),
        ("chromosome list", E103, "46,XX,del[5](q13)"),
        ("breakpoints list", E100, "46,XX,del(5)q13)"),
        ("breakpoints list", E101, "46,XX,del(5)(q13"),
        ("breakpoints list", E102, "46,XX,del(5)q13"),
        ("breakpoints list", E103, "46,XX,del(5)[q13]"),
        ("derivative chromosome list", E100, "46,XX,der22)t(9;22)(q34;q11.2)"),
        ("derivative chromosome list", E101, "46,XX,der(22t(9;22)(q34;q11.2)"),
        ("derivative chromosome list", E102, "46,XX,der22t(9;22)(q34;q11.2)"),
        ("derivative chromosome list", E103, "46,XX,der[22]t(9;22)(q34;q11.2)"),
        ("derivative breakpoints list", E100, "46,XX,der(1;7)q10;p10)"),
        ("derivative breakpoints list", E101, "46,XX,der(1;7)(q10;p10"),
        ("derivative breakpoints list", E102, "46,XX,der(1;7)q10;p10"),
        ("derivative breakpoints list", E103, "46,XX,der(1;7)[q10;p10]"),
        ("detailed breakpoints list", E100, "46,XX,del5q13q33)"),
        ("detailed breakpoints list", E101, "46,XX,del(5q13q33"),
        ("detailed breakpoints list", E102, "46,XX,del5q13q33"),
        ("detailed breakpoints list", E103, "46,XX,del[5q13q33]"),
        ("uncertain chromosome", E100, "46,XX,add?5q)"),
        ("uncertain chromosome", E101, "46,XX,add(?5q"),
        ("uncertain chromosome", E102, "46,XX,add?5q"),
        ("uncertain chromosome", E103, "46,XX,add[?5q]"),
        ("modal number", E100, "693n>,XXX"),
        ("modal number", E101, "69<3n,XXX"),
        ("modal number", E102, "693n,XXX"),
        ("modal number", E103, "69[3n],XXX"),
        ("cell count", E100, "46,XX20]"),
        ("cell count", E101, "46,XX[20"),
        ("cell count", E102, "46,XX20"),
        ("cell count", E103, "46,XX(20)"),
    ];

    for (label, code, source) in cases {
        let outcome = parse_source(source);
        assert_eq!(
            outcome.diagnostics.len(),
            1,
            "expected one diagnostic for '{source}', got {:?}",
            outcome.annotations()
        );
        let diagnostic = &outcome.diagnostics[0];
        assert_eq!(diagnostic.code(), Some(code), "wrong code for '{source}'");
        assert!(
            diagnostic.message().contains(&format!("for {label} '")),
            "expected '{source}' to name the {label}, got '{}'",
            diagnostic.message()
        );
    }
}

#[test]
fn test_wrong_separator_is_recorded() {
    let row = assert_annotations(
        "46,XX,t(9,22)(q34;q11.2)",
        &["12|Incorrect use of separators in chromosome list '9,22', expecting ';'"],
    );
    let Aberration::Basic(translocation) = single_aberration(&row, 0) else {
        panic!("expected a basic aberration");
    };
    let Location::Lists { chromosomes, .. } = &translocation.location else {
        panic!("expected lists");
    };
    assert_eq!(chromosomes.separators, SeparatorShape::Incorrect);
    assert_eq!(row.to_string(), "46,XX,t(9;22)(q34;q11.2)");
}

#[test]
fn test_misplaced_comma_in_aberration() {
    let row = assert_annotations("46,XX,del(5),(q13)", &["18|Incorrect comma before '(q13)'"]);
    let aberration = single_aberration(&row, 0);
    assert!(aberration.has_misplaced_comma());
    assert_eq!(aberration.to_string(), "del(5)(q13)");
}

#[test]
fn test_undetermined_sign() {
    let row = assert_annotations(
        "46,XX,+-7",
        &["9|Undetermined prefix '+-' before '7', cannot use both '-' and '+'"],
    );
    match event_types(&row, 0).as_slice() {
        [RegEventType::GainLoss(gain_loss)] => {
            assert_eq!(
                gain_loss.change,
                NumericalChange::Undetermined("+-".to_string())
            );
        }
        other => panic!("expected a gain or loss, got {other:?}"),
    }
}

#[test]
fn test_cell_count_mistakes() {
    let row = assert_annotations(
        "46,XX[20cp]",
        &["10|Incorrect expression of composite karyotype (cp) '20cp'"],
    );
    let cells = first_body(&row).cells.as_ref().expect("cells");
    assert_eq!(cells.notation, CellNotation::MisplacedComposite);

    let row = assert_annotations(
        "46,XX[20cells]",
        &["13|Incorrect addition of the word 'cell(s)' '20cells'"],
    );
    let cells = first_body(&row).cells.as_ref().expect("cells");
    assert_eq!(cells.notation, CellNotation::CellWord("cells".to_string()));
}

#[test]
fn test_clone_separator_mistakes() {
    let row = assert_annotations(
        "46,XX47,XY,+21",
        &["14|Missing '/' before clone # 2 '47,XY,+21'"],
    );
    assert_eq!(
        row.clones()[1].separator.as_deref(),
        Some(&CloneSeparator::Missing)
    );
    assert_eq!(row.to_string(), "46,XX/47,XY,+21");

    let row = assert_annotations("46,XX//47,XY", &["12|Too many '/' before clone # 2 '//47,XY'"]);
    assert_eq!(
        row.clones()[1].separator.as_deref(),
        Some(&CloneSeparator::TooMany(2))
    );

    let row = assert_annotations(
        "46,XX;47,XY",
        &["11|Incorrect clone separation ';' before clone # 2, expecting '/'"],
    );
    assert_eq!(
        row.clones()[1].separator.as_deref(),
        Some(&CloneSeparator::Other(";".to_string()))
    );
}

#[test]
fn test_separator_warning_points_at_previous_clone() {
    for source in ["46,XX47,XY", "46,XX//47,XY", "46,XX;47,XY"] {
        let outcome = parse_source(source);
        assert_eq!(outcome.diagnostics.len(), 1, "for '{source}'");

        let labels = outcome.diagnostics[0].labels();
        assert_eq!(labels.len(), 2, "for '{source}'");
        assert!(labels[0].is_primary());
        assert!(labels[1].is_secondary());
        assert_eq!(labels[1].span(), Span::new(0..5));
        assert_eq!(labels[1].message(), "previous clone");
    }
}

#[test]
fn test_outer_warning_precedes_inner_warnings() {
    assert_annotations(
        "46,XX47,XY,t(9;22(q34;q11.2)",
        &[
            "28|Missing '/' before clone # 2 '47,XY,t(9;22(q34;q11.2)'",
            "17|Missing ')' for chromosome list '9;22'",
        ],
    );
}

// ----------------------------------------------------------------------
// Rejection
// ----------------------------------------------------------------------

#[test]
fn test_rejected_input() {
    for source in ["hello", "", "46,XX)"] {
        let outcome = parse_source(source);
        assert!(outcome.is_rejected(), "expected '{source}' to be rejected");
        assert_eq!(
            outcome.annotations(),
            vec!["-1|This is an incorrect input for karyotype parsing."]
        );
        assert_eq!(outcome.row.to_string(), source);
    }
}

#[test]
fn test_rejection_help_names_furthest_failure() {
    for (source, offset) in [("46,XX)", 5), ("46,XX,+8)", 8)] {
        let outcome = parse_source(source);
        assert!(outcome.is_rejected());
        let help = outcome.diagnostics[0].help().expect("help");
        assert!(
            help.contains(&format!("at offset {offset}, found ')'")),
            "unexpected help for '{source}': {help}"
        );
    }
}

// ----------------------------------------------------------------------
// Options
// ----------------------------------------------------------------------

#[test]
fn test_memoization_does_not_change_results() {
    let memoized = ParseOptions::default();
    let plain = ParseOptions {
        memoize: false,
        ..ParseOptions::default()
    };

    for source in [
        "46,XX,t(9;22)(q34;q11.2)/47,idem,+8",
        "46,XX,+8/47,sl,+9",
        "45,-X",
        "46,XX47,XY,t(9;22(q34;q11.2)",
        "46,XX,del(5),(q13)",
    ] {
        let a = parse(source, &memoized);
        let b = parse(source, &plain);
        assert_eq!(a.row, b.row, "trees differ for '{source}'");
        assert_eq!(a.annotations(), b.annotations(), "diagnostics differ for '{source}'");
    }
}

#[test]
fn test_whitespace_is_ignored() {
    let row = assert_clean("46, XX, t(9;22)(q34;q11.2)");
    assert_eq!(row.to_string(), "46,XX,t(9;22)(q34;q11.2)");
}
