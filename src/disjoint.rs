use std::collections::{BTreeMap, BTreeSet};
use std::iter::FromIterator;

use crate::automaton::StateId;
use crate::error::{Error, Result};

/// 并查集，用来表示状态集合上的一个划分（等价关系）。
///
/// 每个元素记录自己的父元素，根元素的父元素是它自己，同一棵树上的元素属于同一个等价类。
/// 这里没有按秩合并：`union(a, b)` 总是把 `a` 的根挂到 `b` 的根下面，
/// 所以合并之后的代表元一定是第二个参数所在类的根。极小化时分区的编号依赖这个约定。
///
/// 用 `BTreeMap` 储存是为了让 `members_of`、`all_roots` 的结果顺序稳定。
#[derive(Debug, Clone, Default)]
pub struct DisjointSet {
    parent: BTreeMap<StateId, StateId>,
}

impl DisjointSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入一个单元素的等价类。元素已经存在时什么也不做。
    pub fn add(&mut self, elem: StateId) {
        self.parent.entry(elem).or_insert(elem);
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    fn parent_of(&self, elem: StateId) -> Result<StateId> {
        self.parent.get(&elem).copied().ok_or(Error::Lookup(elem))
    }

    /// 查找元素所在类的根，顺便做路径压缩：
    /// 不断把 `parent[elem]` 换成 `parent[parent[elem]]`，直到它指向根为止。
    pub fn find(&mut self, elem: StateId) -> Result<StateId> {
        let mut parent = self.parent_of(elem)?;
        loop {
            let grandparent = self.parent_of(parent)?;
            if grandparent == parent {
                return Ok(parent);
            }
            self.parent.insert(elem, grandparent);
            parent = grandparent;
        }
    }

    /// 合并 `a` 和 `b` 所在的类，`b` 的根成为新的根。
    pub fn union(&mut self, a: StateId, b: StateId) -> Result<()> {
        let root_a = self.find(a)?;
        let root_b = self.find(b)?;
        self.parent.insert(root_a, root_b);
        Ok(())
    }

    pub fn same_class(&mut self, a: StateId, b: StateId) -> Result<bool> {
        Ok(self.find(a)? == self.find(b)?)
    }

    /// 查询根为 `root` 的类里的所有元素。需要扫描全部元素。
    pub fn members_of(&mut self, root: StateId) -> Result<BTreeSet<StateId>> {
        let mut members = BTreeSet::new();
        for elem in self.elements() {
            if self.find(elem)? == root {
                members.insert(elem);
            }
        }
        Ok(members)
    }

    /// 查询所有作为根的元素，也就是每个类的代表元。
    pub fn all_roots(&mut self) -> BTreeSet<StateId> {
        let mut roots = BTreeSet::new();
        for elem in self.elements() {
            // 元素都来自 parent 的键，find 不会失败。
            if let Ok(root) = self.find(elem) {
                roots.insert(root);
            }
        }
        roots
    }

    /// 把元素重新设为自己的父元素。用于在细化分区时拆掉一个类再重建。
    pub fn reset(&mut self, elem: StateId) -> Result<()> {
        match self.parent.get_mut(&elem) {
            Some(parent) => {
                *parent = elem;
                Ok(())
            }
            None => Err(Error::Lookup(elem)),
        }
    }

    fn elements(&self) -> Vec<StateId> {
        self.parent.keys().copied().collect()
    }
}

impl FromIterator<StateId> for DisjointSet {
    fn from_iter<I: IntoIterator<Item = StateId>>(iter: I) -> Self {
        let mut set = DisjointSet::new();
        for elem in iter {
            set.add(elem);
        }
        set
    }
}
