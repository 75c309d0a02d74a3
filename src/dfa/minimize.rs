use std::collections::BTreeMap;

use itertools::Itertools;
use log::{debug, trace};

use super::FIRST_STATE;
use crate::automaton::{Automaton, Edge, StateId};
use crate::disjoint::DisjointSet;
use crate::error::{Error, Result};

/// 极小化的完整结果。
#[derive(Debug, Clone)]
pub struct Minimization {
    pub automaton: Automaton,
    /// 原状态 -> 它所在的分区在极小DFA里的编号。
    pub classes: BTreeMap<StateId, StateId>,
    /// 分割法一共进行了几轮，最后一轮没有任何分区被拆开。
    pub rounds: usize,
}

impl Automaton {
    /// 确定有穷自动机（DFA）的最小化，采用教材上的分割法。
    ///
    /// 用一个并查集表示分区，根相同的状态位于同一个分区。
    ///
    /// 0. 初始时按接收状态和非接收状态分成两个区（如果全是接收状态，就只有一个区）。
    /// 1. 对每个区，用一个新的并查集描述区内的等价关系：两个状态等价，当且仅当对每个输入，
    ///    它们要么都没有转移，要么都转移到当前同一个分区。一个有转移一个没有，就是可区分的。
    /// 2. 按区内的等价关系重新分区。只要有一个区被拆开，就再来一轮。
    /// 3. 分区数只增不减且不超过状态数，所以最多 `|states|` 轮就会停下来。
    /// 4. 每个分区成为极小DFA的一个状态，从 1 开始重新编号。
    ///
    /// 输入不是DFA时返回 [`Error::Precondition`]。
    pub fn minimize(&self) -> Result<Minimization> {
        if !self.is_deterministic() {
            return Err(Error::Precondition(
                "minimization requires a deterministic automaton",
            ));
        }

        let mut partition = self.initial_partition()?;
        let mut rounds = 0;
        loop {
            rounds += 1;
            debug!("minify round {} ......", rounds);
            for &state in self.states() {
                trace!("state {} is in group {}", state, partition.find(state)?);
            }

            let mut stable = true;
            for group in partition.all_roots() {
                let members = partition.members_of(group)?;
                let mut equals: DisjointSet = members.iter().copied().collect();
                for (&state1, &state2) in members.iter().tuple_combinations() {
                    if self.indistinguishable(state1, state2, &mut partition)? {
                        equals.union(state1, state2)?;
                    }
                }
                if equals.all_roots().len() > 1 {
                    stable = false;
                }
                // 对当前区重新分区
                for &state in &members {
                    partition.reset(state)?;
                }
                for &state in &members {
                    let root = equals.find(state)?;
                    partition.union(state, root)?;
                }
            }
            if stable {
                break;
            }
        }

        let numbering: BTreeMap<StateId, StateId> = partition
            .all_roots()
            .into_iter()
            .zip(FIRST_STATE..)
            .collect();
        let mut classes = BTreeMap::new();
        for &state in self.states() {
            let root = partition.find(state)?;
            let class = numbering.get(&root).copied().ok_or(Error::Lookup(root))?;
            classes.insert(state, class);
        }
        let class_of = |state: StateId| classes.get(&state).copied().ok_or(Error::Lookup(state));

        let edges: Vec<Edge> = self
            .edges()
            .map(|Edge(from, label, to)| -> Result<Edge> {
                Ok(Edge(class_of(from)?, label, class_of(to)?))
            })
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .unique()
            .collect();
        let accepting = self
            .accepting()
            .iter()
            .map(|&state| class_of(state))
            .collect::<Result<Vec<_>>>()?;
        let start = class_of(self.start())?;

        let automaton =
            Automaton::with_states(numbering.values().copied(), start, accepting, edges)?;

        Ok(Minimization {
            automaton,
            classes,
            rounds,
        })
    }

    /// DFA的最小化，返回极小DFA。
    pub fn minify(&self) -> Result<Automaton> {
        Ok(self.minimize()?.automaton)
    }

    fn initial_partition(&self) -> Result<DisjointSet> {
        let mut partition: DisjointSet = self.states().iter().copied().collect();
        let (accepting, rejecting): (Vec<StateId>, Vec<StateId>) = self
            .states()
            .iter()
            .copied()
            .partition(|&state| self.is_accepting(state));
        for group in vec![accepting, rejecting] {
            if let Some((&first, rest)) = group.split_first() {
                for &state in rest {
                    partition.union(state, first)?;
                }
            }
        }
        Ok(partition)
    }

    /// 在当前分区下，两个状态对每个输入的转移是否都落在同一个分区。
    fn indistinguishable(
        &self,
        state1: StateId,
        state2: StateId,
        partition: &mut DisjointSet,
    ) -> Result<bool> {
        for &symbol in self.alphabet() {
            match (self.delta(state1, symbol), self.delta(state2, symbol)) {
                (None, None) => continue,
                (Some(to1), Some(to2)) => {
                    if partition.find(to1)? != partition.find(to2)? {
                        return Ok(false);
                    }
                }
                _ => return Ok(false),
            }
        }
        Ok(true)
    }

    /// delta 是状态转移函数δ的读音，等价于 δ(from, input)。只对DFA有意义。
    fn delta(&self, from: StateId, input: char) -> Option<StateId> {
        self.targets(from, Some(input))
            .and_then(|targets| targets.iter().next().copied())
    }
}
