use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use log::trace;

use crate::error::{Error, Result, ValidationError};

mod edge;

pub use edge::Edge;

/// 状态的编号。状态本身没有任何含义，只用来区分彼此。
pub type StateId = u32;

/// 转移的标注。`None` 代表空转移ε，它不属于字母表。
pub type Label = Option<char>;

pub const EPSILON: Label = None;

/// 有穷自动机：
/// - 有穷状态集（状态转移图中的节点）
/// - 输入字母表（转移边上的标注，不含ε）
/// - 状态转移关系（边），一个 `(状态, 输入)` 可以对应多个目标状态
/// - 一个开始状态
/// - 接收状态集
///
/// NFA 和 DFA 共用这一个类型。所谓DFA，就是每个 `(状态, 输入)` 最多只有一个目标状态、
/// 并且没有空转移的自动机。某些状态缺少某些输入的转移是允许的。
///
/// 自动机构造完成后就不可变了，确定化、极小化都会返回一个新的自动机。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Automaton {
    states: BTreeSet<StateId>,
    alphabet: BTreeSet<char>,
    transitions: BTreeMap<StateId, BTreeMap<Label, BTreeSet<StateId>>>,
    start: StateId,
    accepting: BTreeSet<StateId>,
}

/// 构造和校验
impl Automaton {
    /// 从开始状态、接收状态集和转移规则构造自动机。
    ///
    /// 每条转移规则是一个三元组 `(src, dst, by)`，表示从 `src` 输入 `by` 可以转移到 `dst`，
    /// `by` 为 `None` 时表示空转移。
    ///
    /// 状态集由所有转移的起点、终点以及开始状态组成，所以这里开始状态总是合法的，
    /// 不会返回 [`ValidationError::UnknownStart`]；开始状态可以不出现在任何转移里。
    /// 接收状态必须出现在状态集中，否则返回 [`ValidationError::UnknownAccepting`]。
    pub fn new<A, T, E>(start: StateId, accepting: A, transitions: T) -> Result<Self>
    where
        A: IntoIterator<Item = StateId>,
        T: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        let edges: Vec<Edge> = transitions.into_iter().map(Into::into).collect();
        let states = edges
            .iter()
            .flat_map(|edge| vec![edge.from(), edge.to()])
            .chain(std::iter::once(start))
            .collect();
        Self::build(states, start, accepting.into_iter().collect(), edges)
    }

    /// 在给定的状态集上构造自动机，允许存在孤立的状态。
    ///
    /// 开始状态、接收状态以及每条转移的两端都必须属于 `states`。
    pub fn with_states<S, A, T, E>(
        states: S,
        start: StateId,
        accepting: A,
        transitions: T,
    ) -> Result<Self>
    where
        S: IntoIterator<Item = StateId>,
        A: IntoIterator<Item = StateId>,
        T: IntoIterator<Item = E>,
        E: Into<Edge>,
    {
        Self::build(
            states.into_iter().collect(),
            start,
            accepting.into_iter().collect(),
            transitions.into_iter().map(Into::into).collect(),
        )
    }

    fn build(
        states: BTreeSet<StateId>,
        start: StateId,
        accepting: BTreeSet<StateId>,
        edges: Vec<Edge>,
    ) -> Result<Self> {
        if !states.contains(&start) {
            return Err(ValidationError::UnknownStart(start).into());
        }
        if let Some(&state) = accepting.iter().find(|s| !states.contains(*s)) {
            return Err(ValidationError::UnknownAccepting(state).into());
        }

        let mut alphabet = BTreeSet::new();
        let mut transitions: BTreeMap<StateId, BTreeMap<Label, BTreeSet<StateId>>> =
            BTreeMap::new();
        for Edge(from, label, to) in edges {
            for endpoint in vec![from, to] {
                if !states.contains(&endpoint) {
                    return Err(ValidationError::UnknownEndpoint(endpoint).into());
                }
            }
            if let Some(symbol) = label {
                alphabet.insert(symbol);
            }
            transitions
                .entry(from)
                .or_default()
                .entry(label)
                .or_default()
                .insert(to);
        }

        Ok(Automaton {
            states,
            alphabet,
            transitions,
            start,
            accepting,
        })
    }
}

/// 只读的访问接口，画图、打印转移表之类的外部代码只需要这些。
impl Automaton {
    pub fn states(&self) -> &BTreeSet<StateId> {
        &self.states
    }

    /// 字母表，按字符排好序。
    pub fn alphabet(&self) -> &BTreeSet<char> {
        &self.alphabet
    }

    pub fn start(&self) -> StateId {
        self.start
    }

    pub fn accepting(&self) -> &BTreeSet<StateId> {
        &self.accepting
    }

    pub fn is_accepting(&self, state: StateId) -> bool {
        self.accepting.contains(&state)
    }

    pub fn contains(&self, state: StateId) -> bool {
        self.states.contains(&state)
    }

    /// 状态的数量。
    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// 从 `from` 经过标注 `label` 能直接到达的状态，没有这样的转移时返回 `None`。
    pub fn targets(&self, from: StateId, label: Label) -> Option<&BTreeSet<StateId>> {
        self.transitions.get(&from).and_then(|by| by.get(&label))
    }

    /// 所有的转移边，按 `(源状态, 标注, 目标状态)` 排序。
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.transitions.iter().flat_map(|(&from, by)| {
            by.iter().flat_map(move |(&label, targets)| {
                targets.iter().map(move |&to| Edge(from, label, to))
            })
        })
    }
}

/// 确定性判断和空闭包
impl Automaton {
    /// 是否为确定的有穷自动机（DFA）。
    ///
    /// 有空转移，或者某个状态对于某个输入有多个后继状态，就不是DFA。
    pub fn is_deterministic(&self) -> bool {
        self.transitions.values().all(|by| {
            by.iter()
                .all(|(label, targets)| label.is_some() && targets.len() <= 1)
        })
    }

    /// 求状态的空闭包：从 `state` 出发只走空转移能到达的所有状态，包括它自己。
    ///
    /// 反复把闭包中每个状态的空转移目标加进来，直到不再增加。状态有限，一定会停下来。
    pub fn epsilon_closure(&self, state: StateId) -> Result<BTreeSet<StateId>> {
        if !self.contains(state) {
            return Err(Error::Lookup(state));
        }
        let mut closure = BTreeSet::new();
        self.close_into(state, &mut closure);
        Ok(closure)
    }

    /// 把 `state` 的空闭包并入 `closure`。
    fn close_into(&self, state: StateId, closure: &mut BTreeSet<StateId>) {
        if !closure.insert(state) {
            return;
        }
        let mut stack = vec![state];
        while let Some(current) = stack.pop() {
            if let Some(targets) = self.targets(current, EPSILON) {
                for &to in targets {
                    if closure.insert(to) {
                        stack.push(to);
                    }
                }
            }
        }
    }

    /// 先让 `subset` 中的每个状态经过一次 `symbol`，再求空闭包。
    /// 也就是子集构造法里的 `closure(move(I, a))`。
    pub(crate) fn step(&self, subset: &BTreeSet<StateId>, symbol: char) -> BTreeSet<StateId> {
        let mut next = BTreeSet::new();
        for &state in subset {
            if let Some(targets) = self.targets(state, Some(symbol)) {
                for &to in targets {
                    self.close_into(to, &mut next);
                }
            }
        }
        trace!(
            "move({{{}}}, {}) = {{{}}}",
            subset.iter().join(", "),
            symbol,
            next.iter().join(", ")
        );
        next
    }

    pub(crate) fn start_closure(&self) -> BTreeSet<StateId> {
        let mut closure = BTreeSet::new();
        self.close_into(self.start, &mut closure);
        closure
    }
}
