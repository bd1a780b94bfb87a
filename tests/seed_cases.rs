//! Integration tests for concrete matching scenarios and boundary behaviors,
//! run against the public `Regex` API end to end (parser through dispatcher
//! through whichever matcher branch wins).

use std::sync::Once;

use quickrex::{Error, Regex};

static LOG_INIT: Once = Once::new();

/// Turn on `dispatch`'s `debug!`/`trace!` output under `cargo test -- --nocapture`,
/// so a failing case shows which matcher branch actually ran.
fn init() {
    LOG_INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[test]
fn seed_case_1_any_byte() {
    init();
    let re = Regex::new("h.llo").unwrap();
    assert!(re.is_match("hello"));
    assert!(!re.is_match("hllo"));
    assert!(re.is_match("h@llo"));
}

#[test]
fn seed_case_2_anchors() {
    let re = Regex::new("^hello$").unwrap();
    assert!(re.is_match("hello"));
    assert!(!re.is_match("hello world"));
    assert!(!re.is_match(""));
}

#[test]
fn seed_case_3_plus_quantifier() {
    let re = Regex::new("ab+c").unwrap();
    assert!(re.is_match("abbbbc"));
    assert!(!re.is_match("ac"));
    assert!(re.is_match("xabcy"));
}

#[test]
fn seed_case_4_negated_class() {
    let re = Regex::new("[^0-9]+").unwrap();
    assert!(re.is_match("abc"));
    assert!(!re.is_match("123"));
    assert!(re.is_match("a1b2"));
}

#[test]
fn seed_case_5_catastrophic_backtracking_immunity() {
    let re = Regex::new("(a+)+").unwrap();
    let mut text = "a".repeat(30);
    text.push('X');
    let start = std::time::Instant::now();
    assert!(re.is_match(&text));
    assert!(start.elapsed() < std::time::Duration::from_secs(1));
}

#[test]
fn seed_case_6_fdsn_alternation() {
    let re = Regex::new(
        "^FDSN:NET_STA_LOC_L_H_N/MSEED3?|^FDSN:XY_STA_10_B_H_.*/MSEED3?|^FDSN:YY_ST1_.*_.*_.*_Z/MSEED3?",
    )
    .unwrap();
    assert!(re.is_match("FDSN:XY_STA_10_B_H_Z/MSEED"));
    assert!(!re.is_match("FDSN:ZZ_STA_LOC/MSEED"));
    assert!(!re.is_match("prefix FDSN:NET_STA_LOC_L_H_N/MSEED"));
}

#[test]
fn boundary_empty_pattern_matches_everything() {
    let re = Regex::new("").unwrap();
    assert!(re.is_match("anything"));
    assert!(re.is_match(""));
}

#[test]
fn boundary_empty_text() {
    assert!(Regex::new("^$").unwrap().is_match(""));
    assert!(Regex::new(".*").unwrap().is_match(""));
    assert!(Regex::new("").unwrap().is_match(""));
    assert!(!Regex::new("a").unwrap().is_match(""));
}

#[test]
fn boundary_full_byte_range_class() {
    // A class spanning the whole byte space must accept every byte,
    // including the 0xFF endpoint, without looping forever at compile time.
    let re = Regex::new("[\x00-\x7f]").unwrap();
    assert!(re.is_match("\x00"));
    assert!(re.is_match("\x7f"));
}

#[test]
fn boundary_deep_nesting() {
    const CAP: usize = 1_000;
    let ok_depth = "(".repeat(CAP - 1) + "a" + &")".repeat(CAP - 1);
    assert!(Regex::new(&ok_depth).is_ok());

    let bad_depth = "(".repeat(CAP + 1) + "a" + &")".repeat(CAP + 1);
    assert!(matches!(Regex::new(&bad_depth), Err(Error::RecursionLimit { .. })));
}

#[test]
fn boundary_alternation_cap() {
    const CAP: usize = 1_000;
    let many = (0..CAP + 5).map(|_| "a").collect::<Vec<_>>().join("|");
    assert!(matches!(Regex::new(&many), Err(Error::TooManyAlternates { .. })));
}

#[test]
fn law_alternation_commutativity() {
    let texts = ["cat", "dog", "neither", ""];
    for t in texts {
        assert_eq!(Regex::new("cat|dog").unwrap().is_match(t), Regex::new("dog|cat").unwrap().is_match(t));
    }
}

#[test]
fn law_non_capturing_group_alias() {
    for t in ["a", "b", "ab", "", "x"] {
        assert_eq!(Regex::new("(a|b)+").unwrap().is_match(t), Regex::new("(?:a|b)+").unwrap().is_match(t));
    }
}

#[test]
fn law_dotstar_prefix_absorption() {
    let re = Regex::new("cat.*").unwrap();
    assert!(re.is_match("cat"));
    assert!(re.is_match("catastrophe"));
    assert!(!re.is_match("dog"));
    assert!(re.is_match("a cat nearby"));
}

#[test]
fn anchors_are_scoped_to_their_own_alternation_branch() {
    init();
    // `^` and `$` are ordinary atoms scoped to the branch they appear in
    // (`A|B$` means `(A)|(B$)`), not flags over the whole alternation — a
    // plain, un-anchored branch elsewhere in the alternation must still
    // match anywhere.
    let re = Regex::new("cat|dog$").unwrap();
    assert!(re.is_match("catfish"));
    assert!(re.is_match("dog"));
    assert!(!re.is_match("dogfish"));

    let re = Regex::new("^a|b|c$").unwrap();
    assert!(re.is_match("xbx"));
    assert!(re.is_match("axxx"));
    assert!(re.is_match("xxxc"));
    assert!(!re.is_match("xxx"));
}

#[test]
fn dispatcher_specialization_agreement() {
    init();
    // Patterns chosen to exercise each specialization in turn; each must
    // agree with what an equivalent general-path pattern would report.
    let cases: &[(&str, &str, bool)] = &[
        ("^foo.*bar$", "foobazbar", true),
        ("^foo.*bar$", "foobarx", false),
        ("https?://[a-z.]+", "see http://example.com here", true),
        ("https?://[a-z.]+", "no links here", false),
        ("cat|dog|fish", "I like fish", true),
        ("cat|dog|fish", "I like birds", false),
        ("hello", "say hello now", true),
        ("^hello$", "hello", true),
        ("^hello$", "hello!", false),
    ];
    for (pattern, text, expected) in cases {
        let re = Regex::new(pattern).unwrap();
        assert_eq!(re.is_match(text), *expected, "pattern {:?} text {:?}", pattern, text);
    }
}
