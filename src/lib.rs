/*!
本项目实现有穷自动机的构造和变换，
适用于完成《编译原理》课程中词法分析部分的实验作业。

包含这些功能：
- 正则表达式 -> 带空转移的NFA（thompson 构造法）
- NFA -> DFA（子集构造法）
- DFA的极小化（分割法）
- 判断一个自动机是不是DFA、求状态的空闭包

NFA 和 DFA 使用同一个类型 [`Automaton`]，每一步变换都返回一个新的自动机，不会修改输入。

```
let min_dfa = fa_minify::regex_to_min_dfa("a*b").unwrap();
assert_eq!(min_dfa.len(), 2);
assert!(!min_dfa.is_accepting(min_dfa.start()));
```

打印转移表、画状态转移图这些事情不在本crate里做，
需要的数据都可以通过 [`Automaton`] 的只读接口拿到。
*/
mod utils;

/// 有穷自动机的数据结构，以及确定性判断和空闭包。
///
/// 状态用 `u32` 编号，转移的标注用 `Option<char>` 表示，`None` 就是空转移。
pub mod automaton;

/// 并查集，极小化时用来表示分区。
pub mod disjoint;

pub mod error;

/// DFA 相关的方法。
///
/// 本模块包含了从NFA构建DFA的子集构造法，以及DFA的极小化。
pub mod dfa;

/// NFA 相关的方法。
///
/// 本模块包含了从正则表达式构建NFA的方法。
pub mod nfa;

pub use automaton::{Automaton, Edge, Label, StateId, EPSILON};
pub use dfa::minimize::Minimization;
pub use dfa::{Determinization, SubsetRow};
pub use disjoint::DisjointSet;
pub use error::{Error, Result, SyntaxError, ValidationError};
pub use nfa::regex_to_automaton;

use wasm_bindgen::prelude::*;

/// 将正则表达式转化为极小化DFA。
pub fn regex_to_min_dfa(re: &str) -> Result<Automaton> {
    regex_to_automaton(re)?.to_deterministic()?.minify()
}

/// `transitions()` 里用来表示空转移的编码。
pub const EPSILON_CODE: u32 = u32::MAX;

/// 给网页用的自动机。只暴露只读的数据和变换，画图、打表由前端完成。
#[wasm_bindgen(js_name = Automaton)]
pub struct JsAutomaton {
    inner: Automaton,
}

/// 输入正则表达式，返回对应的NFA。
#[wasm_bindgen]
pub fn compile(pattern: &str) -> std::result::Result<JsAutomaton, JsError> {
    utils::set_panic_hook();
    Ok(JsAutomaton {
        inner: regex_to_automaton(pattern)?,
    })
}

#[wasm_bindgen(js_class = Automaton)]
impl JsAutomaton {
    pub fn determinize(&self) -> std::result::Result<JsAutomaton, JsError> {
        Ok(JsAutomaton {
            inner: self.inner.to_deterministic()?,
        })
    }

    pub fn minify(&self) -> std::result::Result<JsAutomaton, JsError> {
        Ok(JsAutomaton {
            inner: self.inner.minify()?,
        })
    }

    #[wasm_bindgen(js_name = isDeterministic)]
    pub fn is_deterministic(&self) -> bool {
        self.inner.is_deterministic()
    }

    pub fn states(&self) -> Vec<u32> {
        self.inner.states().iter().copied().collect()
    }

    pub fn start(&self) -> u32 {
        self.inner.start()
    }

    pub fn accepting(&self) -> Vec<u32> {
        self.inner.accepting().iter().copied().collect()
    }

    /// 排好序的字母表，拼成一个字符串。
    pub fn alphabet(&self) -> String {
        self.inner.alphabet().iter().collect()
    }

    /// 所有的转移，每三个数一组：`[from, to, input]`。
    /// `input` 是字符的码点，空转移是 [`EPSILON_CODE`]。
    pub fn transitions(&self) -> Vec<u32> {
        self.inner
            .edges()
            .flat_map(|edge| {
                let code = edge.label().map_or(EPSILON_CODE, u32::from);
                vec![edge.from(), edge.to(), code]
            })
            .collect()
    }
}
