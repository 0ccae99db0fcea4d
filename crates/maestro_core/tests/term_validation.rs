use chrono::NaiveDate;
use maestro_core::{validate_term, Term, TermDraft, TermField, TermNumber, TermViolation};
use uuid::Uuid;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn term(number: TermNumber, start: NaiveDate, end: NaiveDate) -> Term {
    Term::new(number, start, end)
}

/// Terms one and two of the 2022/23 academic year, as stored by an
/// administrator before each scenario.
fn autumn_terms() -> Vec<Term> {
    vec![
        term(TermNumber::One, date(2022, 9, 1), date(2022, 10, 21)),
        term(TermNumber::Two, date(2022, 10, 31), date(2022, 12, 16)),
    ]
}

/// A full 2022/23 academic year holding all six terms.
fn full_academic_year() -> Vec<Term> {
    vec![
        term(TermNumber::One, date(2022, 9, 1), date(2022, 10, 21)),
        term(TermNumber::Two, date(2022, 10, 31), date(2022, 12, 16)),
        term(TermNumber::Three, date(2023, 1, 4), date(2023, 2, 10)),
        term(TermNumber::Four, date(2023, 2, 20), date(2023, 4, 1)),
        term(TermNumber::Five, date(2023, 4, 17), date(2023, 5, 26)),
        term(TermNumber::Six, date(2023, 6, 5), date(2023, 7, 21)),
    ]
}

#[test]
fn accepts_a_term_in_an_empty_schedule() {
    let draft = TermDraft::filled(TermNumber::One, date(2022, 9, 1), date(2022, 10, 21));

    let accepted = validate_term(&draft, &[], None).unwrap();
    assert_eq!(accepted.number, TermNumber::One);
    assert_eq!(accepted.start_date, date(2022, 9, 1));
    assert_eq!(accepted.end_date, date(2022, 10, 21));
}

#[test]
fn rejects_end_date_before_start_date() {
    let draft = TermDraft::filled(TermNumber::One, date(2022, 10, 21), date(2022, 9, 1));

    let violations = validate_term(&draft, &[], None).unwrap_err();
    assert_eq!(violations, vec![TermViolation::EndNotAfterStart]);
    assert_eq!(violations[0].field(), TermField::EndDate);
    assert_eq!(
        violations[0].to_string(),
        "End date should be greater than the start date."
    );
}

#[test]
fn rejects_end_date_equal_to_start_date() {
    let draft = TermDraft::filled(TermNumber::One, date(2022, 9, 1), date(2022, 9, 1));

    let violations = validate_term(&draft, &[], None).unwrap_err();
    assert_eq!(violations, vec![TermViolation::EndNotAfterStart]);
}

#[test]
fn rejects_each_missing_field_separately() {
    let draft = TermDraft {
        number: None,
        start_date: Some(date(2022, 9, 1)),
        end_date: None,
    };

    let violations = validate_term(&draft, &[], None).unwrap_err();
    assert_eq!(
        violations,
        vec![TermViolation::MissingNumber, TermViolation::MissingEndDate]
    );
    for violation in &violations {
        assert_eq!(violation.to_string(), "This field is required.");
    }
}

#[test]
fn empty_draft_reports_all_three_required_fields() {
    let violations = validate_term(&TermDraft::default(), &[], None).unwrap_err();
    assert_eq!(
        violations,
        vec![
            TermViolation::MissingNumber,
            TermViolation::MissingStartDate,
            TermViolation::MissingEndDate,
        ]
    );
}

#[test]
fn rejects_overlap_with_an_existing_term() {
    let existing = autumn_terms();
    // Starts inside term one.
    let draft = TermDraft::filled(TermNumber::Three, date(2022, 10, 10), date(2022, 10, 28));

    let violations = validate_term(&draft, &existing, None).unwrap_err();
    assert_eq!(violations, vec![TermViolation::OverlapsExistingTerm]);
    assert_eq!(violations[0].field(), TermField::StartDate);
    assert_eq!(violations[0].to_string(), "Term dates cannot overlap.");
}

#[test]
fn overlap_with_several_terms_is_one_aggregate_error() {
    let existing = autumn_terms();
    // Spans both stored terms.
    let draft = TermDraft::filled(TermNumber::Five, date(2022, 9, 15), date(2022, 12, 31));

    let violations = validate_term(&draft, &existing, None).unwrap_err();
    assert_eq!(violations, vec![TermViolation::OverlapsExistingTerm]);
}

#[test]
fn touching_boundary_dates_count_as_overlap() {
    let existing = autumn_terms();
    // Starts on term one's end date; closed intervals share that day.
    let draft = TermDraft::filled(TermNumber::Three, date(2022, 10, 21), date(2022, 10, 28));

    let violations = validate_term(&draft, &existing, None).unwrap_err();
    assert_eq!(violations, vec![TermViolation::OverlapsExistingTerm]);
}

#[test]
fn rejects_a_term_touching_august() {
    let draft = TermDraft::filled(TermNumber::Six, date(2023, 7, 24), date(2023, 8, 18));

    let violations = validate_term(&draft, &[], None).unwrap_err();
    assert_eq!(violations, vec![TermViolation::AugustBlackout]);
    assert_eq!(violations[0].field(), TermField::StartDate);
    assert_eq!(
        violations[0].to_string(),
        "There should not be a school term in August. The academic school year starts in September and ends in July."
    );
}

#[test]
fn blackout_predicate_is_literal_month_arithmetic() {
    // January to August trips the predicate even though the term only
    // reaches the first day of August.
    let draft = TermDraft::filled(TermNumber::Four, date(2023, 1, 9), date(2023, 8, 1));
    let violations = validate_term(&draft, &[], None).unwrap_err();
    assert_eq!(violations, vec![TermViolation::AugustBlackout]);

    // September through December never trips it.
    let draft = TermDraft::filled(TermNumber::One, date(2023, 9, 1), date(2023, 12, 15));
    assert!(validate_term(&draft, &[], None).is_ok());
}

#[test]
fn blackout_suppresses_the_duplicate_number_check() {
    // Term two of 2021/22 already exists as a spring term; the July
    // candidate is the same number in the same academic year, but only the
    // blackout may be reported.
    let existing = vec![term(TermNumber::Two, date(2022, 1, 10), date(2022, 3, 20))];
    let draft = TermDraft::filled(TermNumber::Two, date(2022, 7, 1), date(2022, 8, 15));

    let violations = validate_term(&draft, &existing, None).unwrap_err();
    assert_eq!(violations, vec![TermViolation::AugustBlackout]);
}

#[test]
fn summer_candidate_against_autumn_terms_fails_only_the_blackout() {
    let existing = autumn_terms();
    let draft = TermDraft::filled(TermNumber::Two, date(2022, 7, 1), date(2022, 8, 15));

    let violations = validate_term(&draft, &existing, None).unwrap_err();
    assert_eq!(violations, vec![TermViolation::AugustBlackout]);
}

#[test]
fn rejects_duplicate_number_within_one_academic_year() {
    let existing = autumn_terms();
    // No overlap, but term two of 2022/23 is taken.
    let draft = TermDraft::filled(TermNumber::Two, date(2023, 1, 4), date(2023, 2, 10));

    let violations = validate_term(&draft, &existing, None).unwrap_err();
    assert_eq!(
        violations,
        vec![TermViolation::DuplicateNumber(TermNumber::Two)]
    );
    assert_eq!(violations[0].field(), TermField::Number);
    assert_eq!(
        violations[0].to_string(),
        "Term two already exists for this academic year."
    );
}

#[test]
fn duplicate_check_crosses_the_calendar_year_boundary_both_ways() {
    // Existing spring term (academic year 2022/23), candidate autumn term
    // of the same academic year.
    let existing = vec![term(TermNumber::Four, date(2023, 2, 20), date(2023, 4, 1))];
    let draft = TermDraft::filled(TermNumber::Four, date(2022, 9, 1), date(2022, 10, 21));
    let violations = validate_term(&draft, &existing, None).unwrap_err();
    assert_eq!(
        violations,
        vec![TermViolation::DuplicateNumber(TermNumber::Four)]
    );

    // And the mirror image: existing autumn term, candidate spring term.
    let existing = vec![term(TermNumber::Four, date(2022, 9, 1), date(2022, 10, 21))];
    let draft = TermDraft::filled(TermNumber::Four, date(2023, 2, 20), date(2023, 4, 1));
    let violations = validate_term(&draft, &existing, None).unwrap_err();
    assert_eq!(
        violations,
        vec![TermViolation::DuplicateNumber(TermNumber::Four)]
    );
}

#[test]
fn a_seventh_term_is_rejected_whatever_number_it_takes() {
    let existing = full_academic_year();

    for number in TermNumber::ALL {
        // Fits in the half-term gap, so only the number can be at fault.
        let draft = TermDraft::filled(number, date(2022, 10, 24), date(2022, 10, 27));
        let violations = validate_term(&draft, &existing, None).unwrap_err();
        assert_eq!(violations, vec![TermViolation::DuplicateNumber(number)]);
    }
}

#[test]
fn same_number_is_free_again_in_the_next_academic_year() {
    let existing = full_academic_year();
    let draft = TermDraft::filled(TermNumber::One, date(2023, 9, 4), date(2023, 10, 20));

    assert!(validate_term(&draft, &existing, None).is_ok());
}

#[test]
fn resubmitting_a_stored_term_as_new_fails_overlap_and_duplicate_together() {
    let existing = autumn_terms();
    // Exact copy of stored term two, submitted without an exclusion.
    let draft = TermDraft::filled(TermNumber::Two, date(2022, 10, 31), date(2022, 12, 16));

    let violations = validate_term(&draft, &existing, None).unwrap_err();
    assert_eq!(
        violations,
        vec![
            TermViolation::OverlapsExistingTerm,
            TermViolation::DuplicateNumber(TermNumber::Two),
        ]
    );
    assert_eq!(violations[0].field(), TermField::StartDate);
    assert_eq!(violations[1].field(), TermField::Number);
}

#[test]
fn different_academic_year_with_clear_dates_is_accepted() {
    let existing = autumn_terms();
    let draft = TermDraft::filled(TermNumber::One, date(2023, 9, 1), date(2023, 10, 21));

    let accepted = validate_term(&draft, &existing, None).unwrap();
    assert_eq!(accepted.number, TermNumber::One);
}

#[test]
fn excluded_term_is_invisible_to_every_check() {
    let existing = autumn_terms();
    let edited = existing[1].uuid;
    // Same number, dates overlapping only term two's own previous interval.
    let draft = TermDraft::filled(TermNumber::Two, date(2022, 11, 7), date(2022, 12, 20));

    let accepted = validate_term(&draft, &existing, Some(edited)).unwrap();
    assert_eq!(accepted.start_date, date(2022, 11, 7));

    // Without the exclusion the same draft fails both checks.
    let violations = validate_term(&draft, &existing, None).unwrap_err();
    assert_eq!(
        violations,
        vec![
            TermViolation::OverlapsExistingTerm,
            TermViolation::DuplicateNumber(TermNumber::Two),
        ]
    );
}

#[test]
fn exclusion_of_an_unknown_id_changes_nothing() {
    let existing = autumn_terms();
    let draft = TermDraft::filled(TermNumber::Two, date(2022, 10, 31), date(2022, 12, 16));

    let violations = validate_term(&draft, &existing, Some(Uuid::new_v4())).unwrap_err();
    assert_eq!(violations.len(), 2);
}

#[test]
fn independent_violations_aggregate_in_check_order() {
    let existing = autumn_terms();
    // Reversed dates, landing inside term one, and touching August.
    let draft = TermDraft::filled(TermNumber::Three, date(2022, 8, 20), date(2022, 8, 10));

    let violations = validate_term(&draft, &existing, None).unwrap_err();
    assert_eq!(
        violations,
        vec![
            TermViolation::EndNotAfterStart,
            TermViolation::AugustBlackout,
        ]
    );
}

#[test]
fn accepted_set_never_contains_an_overlapping_pair() {
    // Build a schedule by repeated validation, then re-check the accepted
    // set against the overlap predicate pairwise.
    let mut accepted: Vec<Term> = Vec::new();
    let candidates = [
        (TermNumber::One, date(2022, 9, 1), date(2022, 10, 21)),
        (TermNumber::Two, date(2022, 10, 31), date(2022, 12, 16)),
        (TermNumber::Two, date(2022, 12, 10), date(2022, 12, 20)), // overlaps
        (TermNumber::Three, date(2023, 1, 4), date(2023, 2, 10)),
        (TermNumber::Three, date(2023, 3, 1), date(2023, 3, 20)), // duplicate
        (TermNumber::One, date(2023, 9, 4), date(2023, 10, 20)),
    ];

    for (number, start, end) in candidates {
        if let Ok(term) = validate_term(&TermDraft::filled(number, start, end), &accepted, None)
            .map(|ok| Term::new(ok.number, ok.start_date, ok.end_date))
        {
            accepted.push(term);
        }
    }

    assert_eq!(accepted.len(), 4);
    for a in &accepted {
        for b in &accepted {
            if a.uuid != b.uuid {
                assert!(
                    !(a.end_date >= b.start_date && a.start_date <= b.end_date),
                    "terms {} and {} overlap",
                    a.uuid,
                    b.uuid
                );
            }
        }
    }
}
