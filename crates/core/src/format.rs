//! Reconstruct a set line from a stored [`PhaseRecord`].
//!
//! The inverse of the parser for every absolute-weight notation. Records
//! resolved from a percentage come back as absolute weights unless
//! [`FormatOptions::prefer_percentage`] is set.

use rust_decimal::Decimal;

use crate::notation::PercentageSpec;
use crate::record::{ExerciseType, PhaseRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Style {
    /// Editing form, e.g. `4 x 3 @50kg`.
    #[default]
    Canonical,
    /// Read-only workout view, e.g. `4×3 @ 50kg`.
    Display,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatOptions {
    pub style: Style,
    /// Emit the source percentage instead of the resolved weight when the
    /// record carries one.
    pub prefer_percentage: bool,
}

/// Canonical editing text for a record.
pub fn format_record(record: &PhaseRecord) -> String {
    format_record_with(record, FormatOptions::default())
}

pub fn format_record_with(record: &PhaseRecord, opts: FormatOptions) -> String {
    let body = Writer { record, opts }.body();
    match record.rest_time_seconds {
        Some(secs) => format!("{} {}s", body, secs),
        None => body,
    }
}

struct Writer<'a> {
    record: &'a PhaseRecord,
    opts: FormatOptions,
}

impl Writer<'_> {
    fn body(&self) -> String {
        let r = self.record;

        if r.exercise_type == ExerciseType::RmBuild {
            let target = r.target_rm.unwrap_or(r.repetitions);
            return format!("Build to {}RM", target);
        }

        if r.exercise_type == ExerciseType::Circuit {
            if let Some(items) = r.circuit_exercises.as_ref().filter(|i| !i.is_empty()) {
                let listed = items
                    .iter()
                    .filter(|item| !item.name.is_empty())
                    .map(|item| {
                        if item.reps.is_empty() {
                            item.name.clone()
                        } else {
                            format!("{} {}", item.reps, item.name)
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                return match self.opts.style {
                    Style::Canonical => format!("{} x {}", r.sets, listed),
                    Style::Display => format!("{}× {}", r.sets, listed),
                };
            }
        }

        if let Some(rir_min) = r.rir_min {
            let rir = match r.rir_max {
                Some(max) if max != rir_min => format!("{}-{}RIR", rir_min, max),
                _ => format!("{}RIR", rir_min),
            };
            let head = self.sets_reps(r.repetitions);
            return if r.weight > Decimal::ZERO {
                format!("{}{}{}kg, {}", head, self.at(), fmt_num(r.weight), rir)
            } else {
                format!("{}, {}", head, rir)
            };
        }

        if let (Some(min), Some(max)) = (r.weight_min, r.weight_max) {
            let head = self.sets_reps(r.repetitions);
            if let Some(PercentageSpec::Range { min, max }) = self.percentage() {
                return format!("{}{}{}-{}%", head, self.at(), fmt_num(min), fmt_num(max));
            }
            return format!("{}{}{}-{}kg", head, self.at(), fmt_num(min), fmt_num(max));
        }

        if let Some(parts) = r.compound_reps.as_ref().filter(|p| !p.is_empty()) {
            let joined = parts
                .iter()
                .map(u32::to_string)
                .collect::<Vec<_>>()
                .join(" + ");
            let head = match self.opts.style {
                Style::Canonical => format!("{} x {}", r.sets, joined),
                Style::Display => format!("{}×{}", r.sets, joined),
            };
            return format!("{}{}{}", head, self.at(), self.single_load());
        }

        if let Some(weights) = r.weights.as_ref().filter(|w| w.len() > 1) {
            let listed = match self.opts.style {
                Style::Canonical => {
                    let nums: Vec<String> = weights.iter().map(|w| fmt_num(*w)).collect();
                    format!("{}kg", nums.join(" "))
                }
                Style::Display => weights
                    .iter()
                    .map(|w| format!("{}kg", fmt_num(*w)))
                    .collect::<Vec<_>>()
                    .join(" "),
            };
            return format!("{}{}{}", self.sets_reps(r.repetitions), self.at(), listed);
        }

        format!(
            "{}{}{}",
            self.sets_reps(r.repetitions),
            self.at(),
            self.single_load()
        )
    }

    fn sets_reps(&self, reps: u32) -> String {
        match self.opts.style {
            Style::Canonical => format!("{} x {}", self.record.sets, reps),
            Style::Display => format!("{}×{}", self.record.sets, reps),
        }
    }

    fn at(&self) -> &'static str {
        match self.opts.style {
            Style::Canonical => " @",
            Style::Display => " @ ",
        }
    }

    /// `50kg`, or `80%` when the percentage form is preferred.
    fn single_load(&self) -> String {
        match self.percentage() {
            Some(PercentageSpec::Single { percentage }) => format!("{}%", fmt_num(percentage)),
            _ => format!("{}kg", fmt_num(self.record.weight)),
        }
    }

    fn percentage(&self) -> Option<PercentageSpec> {
        if self.opts.prefer_percentage {
            self.record.source_percentage
        } else {
            None
        }
    }
}

fn fmt_num(d: Decimal) -> String {
    d.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::CircuitItem;
    use crate::parse_set_line;
    use crate::record::decompose;

    fn records(line: &str) -> Vec<PhaseRecord> {
        let resolved = parse_set_line(line)
            .unwrap()
            .into_resolved()
            .expect("absolute line");
        decompose(&resolved)
    }

    fn roundtrip(line: &str) -> String {
        format_record(&records(line)[0])
    }

    #[test]
    fn standard_parse_format_parse() {
        for (sets, reps, weight) in [(1, 1, "1"), (4, 3, "50"), (10, 20, "100"), (3, 5, "72.5")] {
            let line = format!("{} x {} @{}kg", sets, reps, weight);
            let first = parse_set_line(&line).unwrap();
            let again = parse_set_line(&roundtrip(&line)).unwrap();
            assert_eq!(first, again, "line: {}", line);
        }
    }

    #[test]
    fn canonical_forms() {
        assert_eq!(roundtrip("4x3@50"), "4 x 3 @50kg");
        assert_eq!(roundtrip("4 x 2+2 @50"), "4 x 2 + 2 @50kg");
        assert_eq!(roundtrip("3 x 5 @60kg 70kg 80kg"), "3 x 5 @60 70 80kg");
        assert_eq!(roundtrip("3 x 5 @60-70"), "3 x 5 @60-70kg");
        assert_eq!(roundtrip("Build to 8 rm"), "Build to 8RM");
        assert_eq!(roundtrip("2x 10, 2-3RIR"), "2 x 10, 2-3RIR");
        assert_eq!(roundtrip("2x 10, 2-2RIR"), "2 x 10, 2RIR");
        assert_eq!(roundtrip("3 x 5 @80kg, 1RIR"), "3 x 5 @80kg, 1RIR");
        assert_eq!(
            roundtrip("3 sets of 10 Burpees, plank"),
            "3 x 10 Burpees, plank"
        );
        assert_eq!(roundtrip("4 x 3 @50kg 2m"), "4 x 3 @50kg 120s");
        assert_eq!(roundtrip("4 x 3 @50.50kg"), "4 x 3 @50.5kg");
    }

    #[test]
    fn formatted_records_reparse_to_same_fields() {
        for line in [
            "4 x 2 + 2 @50kg",
            "3 x 5 @60 70 80kg",
            "3 x 5 @60-70kg",
            "2x 10, 2-3RIR",
            "3 x 5 @80kg, 1-2RIR 90s",
            "3 sets of 10/12 KB Swings, 5 pull-ups",
            "Build to 3RM",
        ] {
            let original = records(line);
            let reparsed = records(&format_record(&original[0]));
            assert_eq!(original, reparsed, "line: {}", line);
        }
    }

    #[test]
    fn wave_records_format_as_single_sets() {
        let lines: Vec<String> = records("3-2-1 65").iter().map(format_record).collect();
        assert_eq!(lines, vec!["1 x 3 @65kg", "1 x 2 @65kg", "1 x 1 @65kg"]);
    }

    #[test]
    fn percentage_records_are_lossy_by_default() {
        let resolved = parse_set_line("4 x 5 @80%")
            .unwrap()
            .apply_one_rep_max(Decimal::from(100))
            .unwrap();
        let record = &decompose(&resolved)[0];
        assert_eq!(format_record(record), "4 x 5 @80kg");

        let opts = FormatOptions {
            prefer_percentage: true,
            ..FormatOptions::default()
        };
        assert_eq!(format_record_with(record, opts), "4 x 5 @80%");
    }

    #[test]
    fn percentage_range_and_compound_can_round_trip() {
        let opts = FormatOptions {
            prefer_percentage: true,
            ..FormatOptions::default()
        };
        for (line, max) in [("3 x 5 @75-85%", 140), ("4 x 2 + 2 @80% 3m", 120)] {
            let original = parse_set_line(line).unwrap();
            let resolved = original.apply_one_rep_max(Decimal::from(max)).unwrap();
            let text = format_record_with(&decompose(&resolved)[0], opts);
            assert_eq!(parse_set_line(&text).unwrap(), original, "text: {}", text);
        }
    }

    #[test]
    fn display_style_matches_workout_view_and_reparses() {
        let opts = FormatOptions {
            style: Style::Display,
            ..FormatOptions::default()
        };
        let cases = [
            ("4 x 3 @50kg 90s", "4×3 @ 50kg 90s"),
            ("3 x 5 @60 70 80", "3×5 @ 60kg 70kg 80kg"),
            ("4 x 2 + 2 @50", "4×2 + 2 @ 50kg"),
            ("3 x 10 burpees", "3× 10 burpees"),
            ("3 x 5 @80kg, 2RIR", "3×5 @ 80kg, 2RIR"),
        ];
        for (line, expected) in cases {
            let record = &records(line)[0];
            let shown = format_record_with(record, opts);
            assert_eq!(shown, expected);
            assert_eq!(records(&shown)[0], *record, "display: {}", shown);
        }
    }

    #[test]
    fn circuit_without_items_falls_back_to_sets_and_reps() {
        let record = PhaseRecord {
            sets: 3,
            repetitions: 10,
            weight: Decimal::from(20),
            exercise_type: ExerciseType::Circuit,
            circuit_exercises: Some(Vec::<CircuitItem>::new()),
            ..PhaseRecord::default()
        };
        assert_eq!(format_record(&record), "3 x 10 @20kg");
    }

    #[test]
    fn rm_build_without_target_uses_repetitions() {
        let record = PhaseRecord {
            sets: 1,
            repetitions: 5,
            exercise_type: ExerciseType::RmBuild,
            ..PhaseRecord::default()
        };
        let line = format_record(&record);
        assert_eq!(line, "Build to 5RM");
        assert_eq!(
            parse_set_line(&line).unwrap().notation(),
            &crate::notation::Notation::RmBuild { target_rm: 5 }
        );
    }
}
