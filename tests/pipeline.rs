mod common;

use common::{accepts, reference_match, strings};
use fa_minify::{regex_to_automaton, regex_to_min_dfa, Automaton, Error, SyntaxError};

#[test]
fn a_star_b() {
    let nfa = regex_to_automaton("a*b").unwrap();
    assert!(!nfa.is_deterministic());
    let dfa = nfa.to_deterministic().unwrap();
    assert!(dfa.is_deterministic());
    let min = dfa.minify().unwrap();

    assert_eq!(min.len(), 2);
    assert!(!min.is_accepting(min.start()));
    assert_eq!(min.accepting().len(), 1);
    for s in vec!["b", "ab", "aab"] {
        assert!(accepts(&min, s), "should accept {:?}", s);
    }
    for s in vec!["", "a", "ba"] {
        assert!(!accepts(&min, s), "should reject {:?}", s);
    }
}

#[test]
fn sample_pattern_round_trip() {
    let pattern = "1(1010*|1(010)*1)*0";
    let nfa = regex_to_automaton(pattern).unwrap();
    let dfa = nfa.to_deterministic().unwrap();
    let min = dfa.minify().unwrap();
    assert!(min.is_deterministic());
    assert!(min.len() <= dfa.len());

    for s in strings(&['0', '1'], 10) {
        let expected = reference_match(pattern, &s);
        assert_eq!(accepts(&nfa, &s), expected, "nfa on {:?}", s);
        assert_eq!(accepts(&dfa, &s), expected, "dfa on {:?}", s);
        assert_eq!(accepts(&min, &s), expected, "minimal dfa on {:?}", s);
    }

    for s in vec!["10", "1110", "11010", "1101000", "1101010"] {
        assert!(accepts(&min, s), "should accept {:?}", s);
    }
    // 每次重复至少读两个字符，所以 "110" 不在语言里。
    for s in vec!["1", "0", "110", ""] {
        assert!(!accepts(&min, s), "should reject {:?}", s);
    }
}

#[test]
fn convenience_pipeline_matches_manual_one() {
    let pattern = "(a|b)*abb";
    let manual = regex_to_automaton(pattern)
        .unwrap()
        .to_deterministic()
        .unwrap()
        .minify()
        .unwrap();
    let min = regex_to_min_dfa(pattern).unwrap();
    assert_eq!(min, manual);
    // 经典例子：(a|b)*abb 的极小DFA有4个状态。
    assert_eq!(min.len(), 4);
}

#[test]
fn textbook_nfa_to_dfa() {
    let nfa = Automaton::new(
        1,
        vec![4],
        vec![
            (1, 2, Some('a')),
            (1, 3, Some('a')),
            (2, 2, Some('a')),
            (2, 4, Some('b')),
            (3, 3, Some('c')),
            (3, 4, Some('c')),
            (1, 4, None),
        ],
    )
    .unwrap();
    let result = nfa.determinize().unwrap();
    assert_eq!(
        result.subset_of(result.automaton.start()),
        Some(&nfa.epsilon_closure(1).unwrap())
    );
    for s in strings(&['a', 'b', 'c'], 5) {
        assert_eq!(accepts(&nfa, &s), accepts(&result.automaton, &s), "{:?}", s);
    }
}

#[test]
fn every_state_accepting() {
    let dfa = Automaton::new(
        0,
        vec![0, 1, 2, 3],
        vec![
            (0, 1, 'a'),
            (0, 2, 'b'),
            (1, 2, 'b'),
            (2, 1, 'a'),
            (1, 3, 'a'),
            (2, 3, 'b'),
            (3, 3, 'a'),
            (3, 3, 'b'),
        ],
    )
    .unwrap();
    let min = dfa.minify().unwrap();
    assert!(min.len() <= dfa.len());
    assert_eq!(min.accepting(), min.states());
    for s in strings(&['a', 'b'], 6) {
        assert_eq!(accepts(&dfa, &s), accepts(&min, &s), "{:?}", s);
    }
}

#[test]
fn sample_dfa_minimizes() {
    let dfa = Automaton::new(
        0,
        vec![3],
        vec![
            (0, 1, 'a'),
            (0, 2, 'b'),
            (1, 2, 'b'),
            (2, 1, 'a'),
            (1, 3, 'a'),
            (2, 3, 'b'),
            (3, 3, 'a'),
            (3, 3, 'b'),
        ],
    )
    .unwrap();
    let min = dfa.minify().unwrap();
    assert!(min.len() <= dfa.len());
    for s in strings(&['a', 'b'], 7) {
        assert_eq!(accepts(&dfa, &s), accepts(&min, &s), "{:?}", s);
    }
}

#[test]
fn errors_surface_from_the_pipeline() {
    assert_eq!(
        regex_to_min_dfa("(ab"),
        Err(Error::Syntax(SyntaxError::UnclosedGroup(0)))
    );
    let nfa = regex_to_automaton("a|b").unwrap();
    assert!(matches!(nfa.minify(), Err(Error::Precondition(_))));
    assert_eq!(nfa.epsilon_closure(1000), Err(Error::Lookup(1000)));
}
