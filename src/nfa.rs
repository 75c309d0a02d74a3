use itertools::Itertools;
use log::trace;

use crate::automaton::{Automaton, Edge, StateId, EPSILON};
use crate::error::{Result, SyntaxError};

/// 把正则表达式翻译为带空转移的NFA。
///
/// 支持的语法只有连接、或 `|`、克林闭包 `*` 和括号：
///
/// ```text
/// expr   := term ('|' term)*
/// term   := factor factor*
/// factor := (symbol | '(' expr ')') '*'?
/// ```
///
/// 除了 `(`、`)`、`|`、`*` 之外的任何字符都是普通的输入字符，没有转义。
/// 括号最多嵌套 [`MAX_NESTING`] 层，更深的括号返回 [`SyntaxError::TooDeep`]。
pub fn regex_to_automaton(pattern: &str) -> Result<Automaton> {
    Builder::new().build_nfa_from_re(pattern)
}

/// 括号嵌套的最大层数。解析器每进入一层括号就递归一次。
pub const MAX_NESTING: usize = 128;

/// NFA的构造器，用递归下降的方法解析正则表达式，同时用 thompson 构造法生成NFA。
///
/// 每个语法结构生成一个子NFA（`Fragment`），子NFA之间用空转移连接。
/// 构造器持有输入的字符序列和当前读到的位置，每个解析函数都从当前位置向后读。
pub struct Builder {
    chars: Vec<char>,
    pos: usize,
    next_state: StateId,
    edges: Vec<Edge>,
    depth: usize,
}

/// 构造过程中的子NFA：一个入口状态和若干个出口状态，转移都已经记在构造器里了。
#[derive(Debug)]
struct Fragment {
    entry: StateId,
    exits: Vec<StateId>,
}

impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            chars: Vec::new(),
            pos: 0,
            next_state: 1,
            edges: Vec::new(),
            depth: 0,
        }
    }

    /// 本方法会消费掉这个builder自己，然后返回构造完毕的NFA。
    ///
    /// NFA的开始状态是最外层表达式的入口，唯一的接收状态是最外层表达式的出口。
    pub fn build_nfa_from_re(mut self, re: &str) -> Result<Automaton> {
        self.chars = re.chars().collect();
        self.pos = 0;
        self.depth = 0;

        let fragment = self.expr()?;
        // expr 只会停在 `)` 或者输入结尾。
        if self.peek().is_some() {
            return Err(SyntaxError::UnmatchedClose(self.pos).into());
        }
        trace!(
            "{:?} -> start {}, finish {{{}}}, {} transitions",
            re,
            fragment.entry,
            fragment.exits.iter().join(", "),
            self.edges.len()
        );
        Automaton::new(fragment.entry, fragment.exits, self.edges)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn add_state(&mut self) -> StateId {
        let id = self.next_state;
        self.next_state += 1;
        id
    }

    fn add_transition(&mut self, from: StateId, input: char, to: StateId) {
        self.edges.push(Edge(from, Some(input), to));
    }

    fn add_epsilon_transition(&mut self, from: StateId, to: StateId) {
        self.edges.push(Edge(from, EPSILON, to));
    }

    /// 或：新建公共的入口和出口，入口空转移到每个分支的入口，每个分支的出口空转移到公共出口。
    /// 只有一个分支时也会包一层。
    fn expr(&mut self) -> Result<Fragment> {
        let entry = self.add_state();
        let mut branches = Vec::new();
        loop {
            match self.term()? {
                Some(branch) => branches.push(branch),
                None => return Err(SyntaxError::EmptyOperand(self.pos).into()),
            }
            if self.peek() == Some('|') {
                self.pos += 1;
            } else {
                break;
            }
        }

        let exit = self.add_state();
        for branch in branches {
            self.add_epsilon_transition(entry, branch.entry);
            for state in branch.exits {
                self.add_epsilon_transition(state, exit);
            }
        }
        Ok(Fragment {
            entry,
            exits: vec![exit],
        })
    }

    /// 连接若干个因子。一个因子都没有时返回 `None`，由调用者决定这是不是错误。
    fn term(&mut self) -> Result<Option<Fragment>> {
        let mut result: Option<Fragment> = None;
        while let Some(c) = self.peek() {
            let next = match c {
                '|' | ')' => break,
                '*' => return Err(SyntaxError::DanglingStar(self.pos).into()),
                '(' => self.group()?,
                _ => self.symbol(c),
            };
            result = Some(match result {
                Some(prev) => self.concat(prev, next),
                None => next,
            });
        }
        Ok(result)
    }

    /// 连接：前一个子NFA的每个出口空转移到后一个子NFA的入口。
    fn concat(&mut self, first: Fragment, second: Fragment) -> Fragment {
        for &state in &first.exits {
            self.add_epsilon_transition(state, second.entry);
        }
        Fragment {
            entry: first.entry,
            exits: second.exits,
        }
    }

    /// 单个字符，后面可能跟着一个 `*`。
    fn symbol(&mut self, c: char) -> Fragment {
        self.pos += 1;
        let entry = self.add_state();
        if self.peek() == Some('*') {
            self.pos += 1;
            // 带自环的状态，前后各有一条空转移。
            let loop_state = self.add_state();
            let exit = self.add_state();
            self.add_epsilon_transition(entry, loop_state);
            self.add_transition(loop_state, c, loop_state);
            self.add_epsilon_transition(loop_state, exit);
            Fragment {
                entry,
                exits: vec![exit],
            }
        } else {
            let exit = self.add_state();
            self.add_transition(entry, c, exit);
            Fragment {
                entry,
                exits: vec![exit],
            }
        }
    }

    /// 括号，后面可能跟着一个 `*`。
    fn group(&mut self) -> Result<Fragment> {
        let open = self.pos;
        if self.depth == MAX_NESTING {
            return Err(SyntaxError::TooDeep(open).into());
        }
        self.pos += 1;
        if self.peek().is_none() {
            return Err(SyntaxError::UnclosedGroup(open).into());
        }
        self.depth += 1;
        let inner = self.expr()?;
        self.depth -= 1;
        if self.peek() != Some(')') {
            return Err(SyntaxError::UnclosedGroup(open).into());
        }
        self.pos += 1;

        if self.peek() != Some('*') {
            return Ok(inner);
        }
        self.pos += 1;
        // 克林闭包：可以直接跳过，也可以从出口回到入口再来一次。
        let entry = self.add_state();
        let exit = self.add_state();
        self.add_epsilon_transition(entry, inner.entry);
        self.add_epsilon_transition(entry, exit);
        for &state in &inner.exits {
            self.add_epsilon_transition(state, inner.entry);
            self.add_epsilon_transition(state, exit);
        }
        Ok(Fragment {
            entry,
            exits: vec![exit],
        })
    }
}
