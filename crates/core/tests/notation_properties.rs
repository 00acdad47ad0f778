//! End-to-end properties of the public parse / resolve / format API.

use repline_core::{
    decompose, format_record, parse_set_line, ErrorKind, Notation, NotationKind, ParseError,
};
use rust_decimal::Decimal;

fn d(n: i64) -> Decimal {
    Decimal::from(n)
}

#[test]
fn standard_round_trips_through_the_formatter() {
    for sets in [1u32, 3, 12] {
        for reps in [1u32, 5, 30] {
            for weight in ["2.5", "60", "142.5"] {
                let line = format!("{} x {} @{}kg", sets, reps, weight);
                let parsed = parse_set_line(&line).unwrap();
                let resolved = parsed.clone().into_resolved().unwrap();
                let text = format_record(&decompose(&resolved)[0]);
                assert_eq!(parse_set_line(&text).unwrap(), parsed, "line: {}", line);
            }
        }
    }
}

#[test]
fn arity_mismatch_names_expected_and_actual() {
    let err = parse_set_line("3 x 1 @50 60").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArityMismatch);
    let msg = err.to_string();
    assert!(msg.contains("Expected 3 weights"), "{}", msg);
    assert!(msg.contains("got 2"), "{}", msg);
}

#[test]
fn wave_expands_to_one_set_per_rep_count() {
    let p = parse_set_line("3-2-1-1-1 65").unwrap();
    let s = p.summary();
    assert_eq!(s.sets, 5);
    let phases = s.wave_phases.unwrap();
    assert_eq!(
        phases.iter().map(|ph| ph.reps).collect::<Vec<_>>(),
        vec![3, 2, 1, 1, 1]
    );
    assert!(phases.iter().all(|ph| ph.weight == d(65)));
}

#[test]
fn percentage_needs_lookup_then_resolves() {
    let p = parse_set_line("4 x 5 @80%").unwrap();
    let s = p.summary();
    assert!(s.needs_rm_lookup);
    assert_eq!(s.weight_percentage, Some(d(80)));
    assert_eq!(s.weight, Decimal::ZERO);

    let resolved = p.apply_one_rep_max(d(100)).unwrap();
    assert_eq!(decompose(&resolved)[0].weight, d(80));
}

#[test]
fn rir_only_line() {
    let s = parse_set_line("2x 10, 2-3RIR").unwrap().summary();
    assert_eq!(s.sets, 2);
    assert_eq!(s.reps, 10);
    assert_eq!(s.rir_min, Some(2));
    assert_eq!(s.rir_max, Some(3));
    assert_eq!(s.weight, Decimal::ZERO);
}

#[test]
fn rest_suffix_in_seconds_or_minutes() {
    let plain = parse_set_line("4 x 3 @50kg").unwrap();
    for line in ["4 x 3 @50kg 120s", "4 x 3 @50kg 2m"] {
        let p = parse_set_line(line).unwrap();
        assert_eq!(p.rest_time_seconds(), Some(120), "line: {}", line);
        assert_eq!(p.notation(), plain.notation(), "line: {}", line);
    }
}

#[test]
fn zero_and_out_of_bounds_values_are_rejected() {
    for line in [
        "0 x 5 @50kg",
        "5 x 0 @50kg",
        "5 x 5 @0kg",
        "5 x 5 @0%",
        "5 x 5 @100.5%",
        "5 x 5 @250%",
    ] {
        let err = parse_set_line(line).unwrap_err();
        assert!(
            matches!(err, ParseError::OutOfRangeValue { .. }),
            "line {} gave {:?}",
            line,
            err
        );
    }
}

#[test]
fn parsing_is_deterministic_across_threads() {
    let lines = ["4 x 3 @50kg", "3-2-1 60", "Build to 5RM", "3 x 5 @60 70 80"];
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(move || {
                lines
                    .iter()
                    .map(|l| parse_set_line(l).map(|p| p.kind()))
                    .collect::<Vec<_>>()
            })
        })
        .collect();
    for h in handles {
        let kinds = h.join().unwrap();
        assert_eq!(
            kinds,
            vec![
                Ok(NotationKind::Standard),
                Ok(NotationKind::Wave),
                Ok(NotationKind::RmBuild),
                Ok(NotationKind::MultiWeight),
            ]
        );
    }
}

#[test]
fn rm_build_payload() {
    assert_eq!(
        parse_set_line("Build to 8RM").unwrap().notation(),
        &Notation::RmBuild { target_rm: 8 }
    );
}
