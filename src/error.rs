use std::fmt;

use crate::automaton::StateId;

/// 本crate所有可能失败的操作的返回类型。
pub type Result<T> = std::result::Result<T, Error>;

/// 错误分为四类，分别对应构造自动机、查询状态、最小化的前置条件以及正则表达式语法。
///
/// 出错时不会返回任何半成品。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// 构造出来的自动机不合法。
    Validation(ValidationError),
    /// 引用了自动机中不存在的状态。
    Lookup(StateId),
    /// 操作的前置条件不满足，例如对NFA做极小化。
    Precondition(&'static str),
    /// 正则表达式有语法错误。
    Syntax(SyntaxError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// 开始状态不在状态集中。
    UnknownStart(StateId),
    /// 某个接收状态不在状态集中。
    UnknownAccepting(StateId),
    /// 某条转移的起点或终点不在状态集中。
    UnknownEndpoint(StateId),
}

/// 正则表达式的语法错误。每种错误都带着出错字符在表达式中的位置（从0开始）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    /// 出现了没有对应 `(` 的 `)`。
    UnmatchedClose(usize),
    /// 括号还没闭合，输入就结束了。位置是 `(` 所在的位置。
    UnclosedGroup(usize),
    /// `*` 前面没有可以重复的因子。
    DanglingStar(usize),
    /// 需要一个操作数的地方是空的，例如空表达式、`a|`、`()`。
    EmptyOperand(usize),
    /// 括号嵌套太深。位置是超出层数限制的那个 `(`。
    TooDeep(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Validation(e) => write!(f, "invalid automaton: {}", e),
            Error::Lookup(state) => write!(f, "no such state: {}", state),
            Error::Precondition(s) => write!(f, "precondition violated: {}", s),
            Error::Syntax(e) => write!(f, "syntax error: {}", e),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ValidationError::UnknownStart(s) => write!(f, "start state {} is not a state", s),
            ValidationError::UnknownAccepting(s) => {
                write!(f, "accepting state {} is not a state", s)
            }
            ValidationError::UnknownEndpoint(s) => {
                write!(f, "transition endpoint {} is not a state", s)
            }
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            SyntaxError::UnmatchedClose(at) => write!(f, "unmatched ')' at {}", at),
            SyntaxError::UnclosedGroup(at) => write!(f, "unclosed '(' opened at {}", at),
            SyntaxError::DanglingStar(at) => write!(f, "'*' with nothing to repeat at {}", at),
            SyntaxError::EmptyOperand(at) => write!(f, "missing operand at {}", at),
            SyntaxError::TooDeep(at) => write!(f, "groups nested too deeply at {}", at),
        }
    }
}

impl std::error::Error for Error {}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<SyntaxError> for Error {
    fn from(e: SyntaxError) -> Self {
        Error::Syntax(e)
    }
}
