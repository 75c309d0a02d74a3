use indexmap::map::Entry;
use indexmap::IndexMap;
use itertools::Itertools;
use log::{debug, trace};
use std::collections::{BTreeSet, VecDeque};

use crate::automaton::{Automaton, Edge, StateId};
use crate::error::Result;

/// DFA的极小化相关的方法。
pub mod minimize;

/// 子集构造法给新状态编号时使用的第一个编号，之后按发现的顺序依次加一。
pub const FIRST_STATE: StateId = 1;

/// 子集构造法的完整结果。
///
/// 除了构造出来的DFA，还保留了每个新状态对应的原状态子集，以及构造过程的表格，
/// 外部代码可以据此打印“重命名”记录和 `I`、`I_a`、`I_b`…… 形式的表格。
#[derive(Debug, Clone)]
pub struct Determinization {
    pub automaton: Automaton,
    /// 原自动机的状态子集 -> 新状态编号，按发现的顺序排列。
    pub subsets: IndexMap<BTreeSet<StateId>, StateId>,
    /// 构造过程的表格，每处理一个子集就记一行。
    pub table: Vec<SubsetRow>,
}

/// 子集构造表格中的一行：子集 `I` 经过每个输入之后到达的子集 `I_a`。
/// 到达的子集为空时记为 `None`，这时新DFA里没有对应的转移。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsetRow {
    pub source: StateId,
    pub targets: Vec<(char, Option<StateId>)>,
}

impl Determinization {
    /// 查询新状态由哪些原状态组成。
    pub fn subset_of(&self, state: StateId) -> Option<&BTreeSet<StateId>> {
        let index = state.checked_sub(FIRST_STATE)? as usize;
        self.subsets.get_index(index).map(|(subset, _)| subset)
    }
}

impl Automaton {
    /// 用子集构造法（幂集构造法）把自动机确定化。
    ///
    /// 1. 开始状态的空闭包 `I0` 是新DFA的第一个状态。
    /// 2. 按广度优先的顺序处理每个子集 `I`，对字母表里的每个字符 `a`（按字典序），
    ///    `I_a = closure(move(I, a))`。`I_a` 为空就不记录转移；`I_a` 是没见过的子集就给它一个新编号并入队。
    /// 3. 包含原接收状态的子集是新的接收状态。
    ///
    /// 新状态从 [`FIRST_STATE`] 开始按发现顺序编号，所以同一个输入每次得到的结果都一样。
    /// 最坏情况下新状态数是原状态数的指数级，这是问题本身决定的。
    pub fn determinize(&self) -> Result<Determinization> {
        let alphabet: Vec<char> = self.alphabet().iter().copied().collect();

        let mut subsets = IndexMap::new();
        let mut queue = VecDeque::new();
        let mut table = Vec::new();
        let mut edges = Vec::new();

        let initial = self.start_closure();
        subsets.insert(initial.clone(), FIRST_STATE);
        queue.push_back((FIRST_STATE, initial));

        while let Some((source, current)) = queue.pop_front() {
            let mut targets = Vec::with_capacity(alphabet.len());
            for &symbol in &alphabet {
                let next = self.step(&current, symbol);
                if next.is_empty() {
                    targets.push((symbol, None));
                    continue;
                }
                let fresh = FIRST_STATE + subsets.len() as StateId;
                let target = match subsets.entry(next) {
                    Entry::Occupied(entry) => *entry.get(),
                    Entry::Vacant(entry) => {
                        queue.push_back((fresh, entry.key().clone()));
                        entry.insert(fresh);
                        fresh
                    }
                };
                edges.push(Edge(source, Some(symbol), target));
                targets.push((symbol, Some(target)));
            }
            trace!(
                "{{{}}}: {}",
                current.iter().join(", "),
                targets
                    .iter()
                    .map(|(symbol, target)| match target {
                        Some(target) => format!("{} -> {}", symbol, target),
                        None => format!("{} -> null", symbol),
                    })
                    .join(", ")
            );
            table.push(SubsetRow { source, targets });
        }

        for (subset, id) in &subsets {
            debug!("rename {{{}}} --> {}", subset.iter().join(", "), id);
        }

        let accepting: Vec<StateId> = subsets
            .iter()
            .filter(|(subset, _)| !subset.is_disjoint(self.accepting()))
            .map(|(_, &id)| id)
            .collect();

        // 新自动机同样要经过校验。
        let automaton = Automaton::new(FIRST_STATE, accepting, edges)?;

        Ok(Determinization {
            automaton,
            subsets,
            table,
        })
    }

    /// 非确定有穷自动机（NFA）的确定化，返回转化后的DFA。
    pub fn to_deterministic(&self) -> Result<Automaton> {
        Ok(self.determinize()?.automaton)
    }
}
