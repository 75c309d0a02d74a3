use super::{Label, StateId};

/// 一条状态转移，也就是状态转移图中的一条边：`(from, label, to)`。
///
/// `label` 为 `None` 时表示空转移。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(pub StateId, pub Label, pub StateId);

impl Edge {
    pub fn from(&self) -> StateId {
        self.0
    }
    pub fn to(&self) -> StateId {
        self.2
    }
    pub fn label(&self) -> Label {
        self.1
    }
}

/// 按 `(源状态, 目标状态, 输入)` 的顺序给出一条边，和构造自动机时的写法一致。
impl From<(StateId, StateId, Label)> for Edge {
    fn from((from, to, label): (StateId, StateId, Label)) -> Self {
        Edge(from, label, to)
    }
}

/// 非空转移的简写。
impl From<(StateId, StateId, char)> for Edge {
    fn from((from, to, symbol): (StateId, StateId, char)) -> Self {
        Edge(from, Some(symbol), to)
    }
}
