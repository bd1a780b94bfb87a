//! The state arena and the fragment/patch-list machinery used by the
//! parser to build an automaton in a single recursive-descent pass.
//!
//! This is compile-time-only infrastructure: once a pattern is fully
//! compiled, the arena is frozen into `Automaton` and the patch lists are
//! dropped. Nothing here is reachable from the match-time hot path.

use crate::class::ByteClass;
use crate::error::Error;

/// Index of a state in the arena. There is no pointer chasing; every
/// out-arrow is an index into the same `Vec`.
pub(crate) type StateId = usize;

/// Sentinel for an out-arrow that hasn't been patched yet. Never appears in
/// a finished `Automaton`.
const NULL: StateId = StateId::MAX;

/// A single automaton state.
#[derive(Clone, Debug)]
pub(crate) enum State {
    /// Match one specific byte; one out-arrow.
    Byte { byte: u8, out: StateId },
    /// Match any byte; one out-arrow.
    Any { out: StateId },
    /// Match by class membership; one out-arrow.
    Class { class: Box<ByteClass>, out: StateId },
    /// Epsilon with two out-arrows. Used for `*`, `+`, `?`, `|`, and as a
    /// plain epsilon pass-through for the empty atom (both arrows equal).
    Split { out1: StateId, out2: StateId },
    /// Epsilon, traversable only at byte offset 0.
    StartAnchor { out: StateId },
    /// Epsilon, traversable only at end-of-text.
    EndAnchor { out: StateId },
    /// Terminal; no out-arrows.
    Accept,
}

/// Which out-arrow(s) of a state are still dangling, awaiting a patch
/// target. A fragment may carry any number of these, collected from its
/// sub-fragments during concatenation/alternation/quantification.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Out {
    /// The lone out-arrow of `Byte`/`Any`/`Class`/`StartAnchor`/`EndAnchor`.
    Single(StateId),
    /// `Split.out1`.
    Split1(StateId),
    /// `Split.out2`.
    Split2(StateId),
}

/// A partial automaton under construction: a known entry point plus the
/// list of out-arrows that still need to be threaded onto whatever comes
/// next.
#[derive(Clone, Debug)]
pub(crate) struct Fragment {
    pub start: StateId,
    pub dangling: Vec<Out>,
}

/// The fixed-capacity arena of states built during one `compile` call.
/// Dropped at the end of compilation; the finished `Automaton` only keeps
/// the frozen `Vec<State>`.
pub(crate) struct Pool {
    states: Vec<State>,
    max_states: usize,
}

impl Pool {
    pub fn new(max_states: usize) -> Pool {
        Pool { states: Vec::new(), max_states }
    }

    pub fn push(&mut self, state: State) -> Result<StateId, Error> {
        if self.states.len() >= self.max_states {
            return Err(Error::PoolExhausted);
        }
        self.states.push(state);
        Ok(self.states.len() - 1)
    }

    /// Thread every dangling out-arrow in `dangling` onto `target`.
    pub fn patch(&mut self, dangling: &[Out], target: StateId) {
        for &d in dangling {
            match d {
                Out::Single(id) => match &mut self.states[id] {
                    State::Byte { out, .. }
                    | State::Any { out }
                    | State::Class { out, .. }
                    | State::StartAnchor { out }
                    | State::EndAnchor { out } => *out = target,
                    State::Split { .. } | State::Accept => unreachable!(
                        "Out::Single never points at a Split or Accept state"
                    ),
                },
                Out::Split1(id) => {
                    if let State::Split { out1, .. } = &mut self.states[id] {
                        *out1 = target;
                    } else {
                        unreachable!("Out::Split1 target is not a Split state")
                    }
                }
                Out::Split2(id) => {
                    if let State::Split { out2, .. } = &mut self.states[id] {
                        *out2 = target;
                    } else {
                        unreachable!("Out::Split2 target is not a Split state")
                    }
                }
            }
        }
    }

    // --- atom fragments -------------------------------------------------

    pub fn lit_byte(&mut self, b: u8) -> Result<Fragment, Error> {
        let id = self.push(State::Byte { byte: b, out: NULL })?;
        Ok(Fragment { start: id, dangling: vec![Out::Single(id)] })
    }

    pub fn any_byte(&mut self) -> Result<Fragment, Error> {
        let id = self.push(State::Any { out: NULL })?;
        Ok(Fragment { start: id, dangling: vec![Out::Single(id)] })
    }

    pub fn class(&mut self, class: ByteClass) -> Result<Fragment, Error> {
        let id = self.push(State::Class { class: Box::new(class), out: NULL })?;
        Ok(Fragment { start: id, dangling: vec![Out::Single(id)] })
    }

    pub fn start_anchor(&mut self) -> Result<Fragment, Error> {
        let id = self.push(State::StartAnchor { out: NULL })?;
        Ok(Fragment { start: id, dangling: vec![Out::Single(id)] })
    }

    pub fn end_anchor(&mut self) -> Result<Fragment, Error> {
        let id = self.push(State::EndAnchor { out: NULL })?;
        Ok(Fragment { start: id, dangling: vec![Out::Single(id)] })
    }

    /// A fragment that matches the empty string: an epsilon pass-through
    /// with both out-arrows dangling onto the same eventual target.
    pub fn empty(&mut self) -> Result<Fragment, Error> {
        let id = self.push(State::Split { out1: NULL, out2: NULL })?;
        Ok(Fragment { start: id, dangling: vec![Out::Split1(id), Out::Split2(id)] })
    }

    // --- combinators ------------------------------------------------------

    /// `cat`: splice fragments left to right. An empty list (an empty
    /// group body, or the empty alternative in `(a|)`) is the empty
    /// fragment.
    pub fn concat(&mut self, mut frags: Vec<Fragment>) -> Result<Fragment, Error> {
        if frags.is_empty() {
            return self.empty();
        }
        let mut acc = frags.remove(0);
        for frag in frags {
            self.patch(&acc.dangling, frag.start);
            acc = Fragment { start: acc.start, dangling: frag.dangling };
        }
        Ok(acc)
    }

    /// `alt`: binary-split chain over two or more branches, built from the
    /// right so every Split's out-arrows are known at construction time
    /// (no patching needed for the Splits themselves).
    pub fn alternate(&mut self, mut frags: Vec<Fragment>) -> Result<Fragment, Error> {
        assert!(!frags.is_empty(), "alternate() requires at least one branch");
        let mut acc = frags.pop().unwrap();
        while let Some(frag) = frags.pop() {
            let id = self.push(State::Split { out1: frag.start, out2: acc.start })?;
            let mut dangling = frag.dangling;
            dangling.extend(acc.dangling);
            acc = Fragment { start: id, dangling };
        }
        Ok(acc)
    }

    /// `X*`
    pub fn star(&mut self, x: Fragment) -> Result<Fragment, Error> {
        let split = self.push(State::Split { out1: x.start, out2: NULL })?;
        self.patch(&x.dangling, split);
        Ok(Fragment { start: split, dangling: vec![Out::Split2(split)] })
    }

    /// `X+`
    pub fn plus(&mut self, x: Fragment) -> Result<Fragment, Error> {
        let split = self.push(State::Split { out1: x.start, out2: NULL })?;
        self.patch(&x.dangling, split);
        Ok(Fragment { start: x.start, dangling: vec![Out::Split2(split)] })
    }

    /// `X?`
    pub fn quest(&mut self, x: Fragment) -> Result<Fragment, Error> {
        let split = self.push(State::Split { out1: x.start, out2: NULL })?;
        let mut dangling = x.dangling;
        dangling.push(Out::Split2(split));
        Ok(Fragment { start: split, dangling })
    }

    /// Patch every remaining dangling out-arrow in `frag` onto a fresh
    /// `Accept` state and freeze the arena.
    pub fn finish(mut self, frag: Fragment) -> Result<Automaton, Error> {
        let accept = self.push(State::Accept)?;
        self.patch(&frag.dangling, accept);
        Ok(Automaton { states: self.states, start: frag.start, accept })
    }
}

/// The frozen, immutable automaton graph produced by one `compile` call.
#[derive(Clone, Debug)]
pub(crate) struct Automaton {
    pub states: Vec<State>,
    pub start: StateId,
    pub accept: StateId,
}

impl Automaton {
    pub fn len(&self) -> usize {
        self.states.len()
    }
}
