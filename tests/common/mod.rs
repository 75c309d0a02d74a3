#![allow(dead_code)]

use std::collections::BTreeSet;

use fa_minify::Automaton;

/// 沿着转移和空闭包模拟自动机，判断它是否接收 `input`。只在测试里使用。
pub fn accepts(automaton: &Automaton, input: &str) -> bool {
    let mut current = automaton.epsilon_closure(automaton.start()).unwrap();
    for c in input.chars() {
        let mut next = BTreeSet::new();
        for &state in &current {
            if let Some(targets) = automaton.targets(state, Some(c)) {
                for &to in targets {
                    next.extend(automaton.epsilon_closure(to).unwrap());
                }
            }
        }
        current = next;
    }
    current.iter().any(|&state| automaton.is_accepting(state))
}

/// 字母表上所有长度不超过 `max_len` 的串，包括空串。
pub fn strings(alphabet: &[char], max_len: usize) -> Vec<String> {
    let mut all = vec![String::new()];
    let mut layer = vec![String::new()];
    for _ in 0..max_len {
        let mut next = Vec::new();
        for prefix in &layer {
            for &c in alphabet {
                let mut s = prefix.clone();
                s.push(c);
                next.push(s);
            }
        }
        all.extend(next.iter().cloned());
        layer = next;
    }
    all
}

/// 一个很小的伪随机数生成器（xorshift64*），保证每次跑测试得到的用例都一样。
pub struct Rng(u64);

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng(seed.max(1))
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// `[0, n)` 之间的数。
    pub fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    pub fn chance(&mut self, numerator: u64, denominator: u64) -> bool {
        self.below(denominator) < numerator
    }
}

/// 正则表达式的语法树，用来当作对照的“标准答案”。
enum Re {
    Symbol(char),
    Cat(Vec<Re>),
    Alt(Vec<Re>),
    Star(Box<Re>),
}

fn parse_alt(chars: &[char], pos: &mut usize) -> Re {
    let mut branches = vec![parse_cat(chars, pos)];
    while chars.get(*pos) == Some(&'|') {
        *pos += 1;
        branches.push(parse_cat(chars, pos));
    }
    Re::Alt(branches)
}

fn parse_cat(chars: &[char], pos: &mut usize) -> Re {
    let mut factors = Vec::new();
    while let Some(&c) = chars.get(*pos) {
        let factor = match c {
            '|' | ')' => break,
            '(' => {
                *pos += 1;
                let inner = parse_alt(chars, pos);
                assert_eq!(chars.get(*pos), Some(&')'));
                *pos += 1;
                inner
            }
            c => {
                *pos += 1;
                Re::Symbol(c)
            }
        };
        if chars.get(*pos) == Some(&'*') {
            *pos += 1;
            factors.push(Re::Star(Box::new(factor)));
        } else {
            factors.push(factor);
        }
    }
    Re::Cat(factors)
}

/// 从位置 `from` 开始匹配 `re`，返回所有可能的结束位置。
fn ends(re: &Re, input: &[char], from: usize) -> BTreeSet<usize> {
    match re {
        Re::Symbol(c) => {
            let mut result = BTreeSet::new();
            if input.get(from) == Some(c) {
                result.insert(from + 1);
            }
            result
        }
        Re::Cat(factors) => {
            let mut positions: BTreeSet<usize> = vec![from].into_iter().collect();
            for factor in factors {
                positions = positions
                    .iter()
                    .flat_map(|&p| ends(factor, input, p))
                    .collect();
            }
            positions
        }
        Re::Alt(branches) => branches
            .iter()
            .flat_map(|branch| ends(branch, input, from))
            .collect(),
        Re::Star(inner) => {
            let mut reached: BTreeSet<usize> = vec![from].into_iter().collect();
            let mut frontier = vec![from];
            while let Some(p) = frontier.pop() {
                for q in ends(inner, input, p) {
                    if reached.insert(q) {
                        frontier.push(q);
                    }
                }
            }
            reached
        }
    }
}

/// 按通常的正则语义判断 `input` 是否整个匹配 `pattern`。`pattern` 必须是合法的。
pub fn reference_match(pattern: &str, input: &str) -> bool {
    let chars: Vec<char> = pattern.chars().collect();
    let mut pos = 0;
    let re = parse_alt(&chars, &mut pos);
    assert_eq!(pos, chars.len(), "bad reference pattern {:?}", pattern);
    let input: Vec<char> = input.chars().collect();
    ends(&re, &input, 0).contains(&input.len())
}

/// 随机生成一个合法的正则表达式，字母表为 `a`、`b`。
pub fn random_regex(rng: &mut Rng, depth: u32) -> String {
    let symbol = if rng.chance(1, 2) { 'a' } else { 'b' };
    if depth == 0 {
        return symbol.to_string();
    }
    match rng.below(6) {
        0 => symbol.to_string(),
        1 => format!("{}*", symbol),
        2 | 3 => format!(
            "{}{}",
            random_regex(rng, depth - 1),
            random_regex(rng, depth - 1)
        ),
        4 => format!(
            "({}|{})",
            random_regex(rng, depth - 1),
            random_regex(rng, depth - 1)
        ),
        _ => format!("({})*", random_regex(rng, depth - 1)),
    }
}
